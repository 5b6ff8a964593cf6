pub mod decorations;
pub mod errors;
pub mod symbol_table;
pub mod types;

mod symbols_visitor;
mod type_check_visitor;

#[cfg(test)]
mod test;

use super::ast::AbstractSyntaxTree;

pub use self::decorations::TreeDecorations;
pub use self::errors::{SemError, SemErrorKind, SemErrors};
pub use self::symbol_table::{ScopeId, Symbol, SymbolKind, SymTable};
pub use self::types::{TypeId, TypesMgr};

use self::symbols_visitor::SymbolsVisitor;
use self::type_check_visitor::TypeCheckVisitor;

/// SemanticContext is everything the analysis passes computed about one
/// tree: the interned types, the scopes and symbols, the node decorations
/// and the collected diagnostics. It is the only channel between the
/// analysis passes and the back end.
pub struct SemanticContext {
    pub types: TypesMgr,
    pub symbols: SymTable,
    pub decorations: TreeDecorations,
    pub errors: SemErrors
}

impl SemanticContext {
    pub fn has_errors(&self) -> bool {
        self.errors.has_errors()
    }
}

/// SemanticAnalyser consumes an abstract syntax tree and produces the
/// semantic context the back end generates code from. Implementations must
/// leave the context's decorations total for every node the back end
/// reads, regardless of how many diagnostics were collected.
pub trait SemanticAnalyser {
    fn default() -> Self;
    fn analyse(self, ast: &AbstractSyntaxTree) -> SemanticContext;
}

/// AslSemanticAnalyser is the concrete SemanticAnalyser for Asl. It runs
/// the symbols pass to build scopes and register declarations, then the
/// type check pass inside those same scopes. All state lives in the
/// returned context; one analyser invocation never leaks into the next.
pub struct AslSemanticAnalyser;

impl SemanticAnalyser for AslSemanticAnalyser {
    fn default() -> Self {
        Self {}
    }

    fn analyse(self, ast: &AbstractSyntaxTree) -> SemanticContext {
        let mut types = TypesMgr::new();
        let mut symbols = SymTable::new();
        let mut decorations = TreeDecorations::new();
        let mut errors = SemErrors::new();

        SymbolsVisitor::new(&mut types, &mut symbols, &mut decorations, &mut errors)
            .visit_program(ast.root());
        TypeCheckVisitor::new(&mut types, &mut symbols, &mut decorations, &mut errors)
            .visit_program(ast.root());

        SemanticContext {
            types,
            symbols,
            decorations,
            errors
        }
    }
}
