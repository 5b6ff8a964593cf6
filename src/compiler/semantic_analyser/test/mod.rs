mod unit_type_check;

use crate::compiler::ast::AbstractSyntaxTree;
use crate::compiler::parser::{AstParser, PestAslParser};
use crate::compiler::semantic_analyser::{AslSemanticAnalyser, SemanticAnalyser, SemanticContext, SemErrorKind};

fn parse(source: &str) -> AbstractSyntaxTree {
    PestAslParser::default().parse(source).unwrap()
}

fn analyse(source: &str) -> (AbstractSyntaxTree, SemanticContext) {
    let ast = parse(source);
    let context = AslSemanticAnalyser::default().analyse(&ast);
    (ast, context)
}

/// The diagnostic kinds of an analysis, in report order
fn error_kinds(context: &SemanticContext) -> Vec<SemErrorKind> {
    context.errors.errors().iter().map(|error| error.kind.clone()).collect()
}
