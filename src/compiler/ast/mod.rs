pub mod ast_node;
pub mod datatype;
pub mod literals;
pub mod location;
pub mod node_id;
pub mod operators;

pub use self::{
    ast_node::{Expr, ExprKind, FunctionDef, Ident, Param, Program, Stmt, TypeSpec, TypeSpecKind, VariableDecl},
    datatype::BasicType,
    literals::Literal,
    location::Location,
    node_id::{NodeId, NodeIdGenerator},
    operators::{
        UnaryOperation,
        BinaryOperation
    }
};

/// Intermediate representation of the compiler model. The tree is built by
/// a parser and stays immutable afterwards: the passes annotate it through
/// node-id keyed side tables instead of mutating nodes.
#[derive(Debug)]
pub struct AbstractSyntaxTree {
    root: Program
}

impl AbstractSyntaxTree {
    pub fn new(root: Program) -> Self {
        Self {
            root
        }
    }

    pub fn root(&self) -> &Program {
        &self.root
    }

    /// Convert AST into its root node
    pub fn into_root(self) -> Program {
        self.root
    }
}
