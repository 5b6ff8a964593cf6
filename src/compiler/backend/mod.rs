mod code_gen_visitor;

#[cfg(test)]
mod test;

use super::ast::AbstractSyntaxTree;
use super::program_code::ProgramCode;
use super::semantic_analyser::SemanticContext;

use self::code_gen_visitor::CodeGenVisitor;

/// BackEndGenerator lowers an analysed tree into program code for the
/// target virtual machine. Generators may assume the context carries zero
/// diagnostics and total decorations; the pipeline enforces that before
/// invoking one.
pub trait BackEndGenerator {
    fn default() -> Self;
    fn generate(self, ast: &AbstractSyntaxTree, context: SemanticContext) -> ProgramCode;
}

/// AslCodeGenerator is the concrete BackEndGenerator emitting the three
/// address stack code described in `program_code`.
pub struct AslCodeGenerator;

impl BackEndGenerator for AslCodeGenerator {
    fn default() -> Self {
        Self {}
    }

    fn generate(self, ast: &AbstractSyntaxTree, mut context: SemanticContext) -> ProgramCode {
        let mut visitor = CodeGenVisitor::new(&context.types, &mut context.symbols, &context.decorations);
        visitor.visit_program(ast.root())
    }
}
