use super::datatype::BasicType;
use super::literals::Literal;
use super::location::Location;
use super::node_id::NodeId;
use super::operators::{UnaryOperation, BinaryOperation};

/// Identifier is a named reference to a symbol, that is a variable,
/// parameter or function. Identifiers carry their own node id because the
/// type check pass decorates them independently of the expression they
/// appear in (a call decorates its callee identifier with the function
/// type, for instance).
///
/// # Example:
///     x := 4;
///     ^ -> Ident
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub id: NodeId,
    pub loc: Location,
    pub name: String
}

/// Program is the root node of an Asl tree: an ordered list of function
/// definitions. It owns the global scope decoration after the symbols pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub id: NodeId,
    pub loc: Location,
    pub functions: Vec<FunctionDef>
}

/// Function definition with parameters, an optional basic return type,
/// local variable declarations and a statement body.
///
/// # Syntax:
///     func <identifier>( (<parameter>, )* ) (: basic_type)? { <var_decl>* <statement>* }
///
/// # Example:
///     func add(a: int, b: int) : int {
///         return a + b;
///     }
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub id: NodeId,
    pub name: Ident,
    pub params: Vec<Param>,
    pub return_type: Option<TypeSpec>,
    pub declarations: Vec<VariableDecl>,
    pub body: Vec<Stmt>
}

/// Function parameters are defined when defining a function. They carry an
/// identifier and a type.
///
/// # Example:
///     func my_func(x: int, v: array [10] of float) { ... }
///                  ^^^^^^ -> Param
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub type_spec: TypeSpec
}

/// Variable declaration introduces one or more local variables of the same
/// type within a function.
///
/// # Syntax:
///     var <identifier> (, <identifier>)* : <type> ;
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub names: Vec<Ident>,
    pub type_spec: TypeSpec,
    pub loc: Location
}

/// Type specification as written in the source. The symbols pass resolves
/// it into an interned type and decorates the node with the result.
///
/// # Example:
///     var a: array [3] of int;
///            ^^^^^^^^^^^^^^^^ -> TypeSpec
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub id: NodeId,
    pub loc: Location,
    pub kind: TypeSpecKind
}

#[derive(Debug, Clone, PartialEq)]
#[allow(non_camel_case_types)]
pub enum TypeSpecKind {
    BASIC(BasicType),
    ARRAY {
        size: u32,
        element: BasicType
    }
}

/// Statements of the Asl language. Statements carry no type decorations of
/// their own; the expressions inside them do.
#[derive(Debug, Clone, PartialEq)]
#[allow(non_camel_case_types)]
pub enum Stmt {
    /// Assignment statement stores a new value into a referenceable
    /// location.
    ///
    /// # Syntax:
    ///     <left_expr> := <expression> ;
    ///
    /// # Example:
    ///     x := 42;
    ///     a[i] := x + 1;
    ASSIGNMENT {
        target: Expr,
        value: Expr,
        loc: Location
    },

    /// If statement conditionally runs its then branch, and the else branch
    /// otherwise when one is present.
    ///
    /// # Syntax:
    ///     if <expression> then <statement>* (else <statement>*)? endif
    IF {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
        loc: Location
    },

    /// While statement iteratively runs its body while the condition holds.
    ///
    /// # Syntax:
    ///     while <expression> do <statement>* endwhile
    WHILE_LOOP {
        condition: Expr,
        body: Vec<Stmt>,
        loc: Location
    },

    /// Procedure call in statement position. The returned value, if any, is
    /// discarded; unlike a call in expression position a void callee is
    /// accepted here.
    ///
    /// # Example:
    ///     fill(a, 0);
    PROC_CALL {
        callee: Ident,
        arguments: Vec<Expr>,
        loc: Location
    },

    /// Read statement stores one input value into a referenceable location.
    ///
    /// # Example:
    ///     read x;
    READ {
        target: Expr,
        loc: Location
    },

    /// Write statement prints the value of a primitive typed expression.
    ///
    /// # Example:
    ///     write x + 1;
    WRITE_EXPR {
        expression: Expr,
        loc: Location
    },

    /// Write statement for a string literal. Holds the bytes between the
    /// quotes with escape sequences unprocessed; code generation walks them
    /// byte by byte.
    ///
    /// # Example:
    ///     write "total:\n";
    WRITE_STRING {
        value: String,
        loc: Location
    },

    /// Return statement leaves the current function, with a result value
    /// when an expression is given.
    ///
    /// # Syntax:
    ///     return <expression>? ;
    RETURN {
        expression: Option<Expr>,
        loc: Location
    }
}

/// Expression node. Every expression owns a node id; after the type check
/// pass each one carries a type and an l-value decoration.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub id: NodeId,
    pub loc: Location,
    pub kind: ExprKind
}

#[derive(Debug, Clone, PartialEq)]
#[allow(non_camel_case_types)]
pub enum ExprKind {
    /// Literal value.
    VALUE(Literal),

    /// Identifier in expression position.
    IDENT(Ident),

    /// Array element access. The base must name an array variable or
    /// parameter directly; Asl has no nested aggregate expressions.
    ///
    /// # Example:
    ///     a[i + 1]
    ARRAY_ELEMENT {
        array: Ident,
        index: Box<Expr>
    },

    /// Function call in expression position. The callee must return a
    /// non-void value here.
    ///
    /// # Example:
    ///     x := add(1, 2) * 3;
    ///          ^^^^^^^^^ -> FUNC_CALL
    FUNC_CALL {
        callee: Ident,
        arguments: Vec<Expr>
    },

    /// # Example:
    ///     b := not (x < 0);
    ///          ^^^ -> Unary Operator
    UNARY_OP {
        op: UnaryOperation,
        expression: Box<Expr>
    },

    /// # Syntax:
    ///     <lhs> <op> <rhs>
    BINARY_OP {
        op: BinaryOperation,
        lhs: Box<Expr>,
        rhs: Box<Expr>
    },

    /// Parenthesised sub expression. Inherits the inner type but is never
    /// an l-value.
    PARENTHESIS(Box<Expr>)
}

impl Expr {
    /// True for the array element form of a left expression; assignment and
    /// read lower these through an indexed store.
    pub fn is_array_element(&self) -> bool {
        matches!(self.kind, ExprKind::ARRAY_ELEMENT { .. })
    }
}
