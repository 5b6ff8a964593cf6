// External Modules
extern crate pest;
#[macro_use]
extern crate pest_derive;

// Internal Modules
mod compiler;

#[cfg(test)]
mod test;

// Compiler types to use
type PARSER = compiler::PestAslParser;
type ANALYSER = compiler::AslSemanticAnalyser;
type GENERATOR = compiler::AslCodeGenerator;

pub use compiler::{AslCodeGenerator, AslSemanticAnalyser, CompileError, Compiler, PestAslParser};
pub use compiler::ast;
pub use compiler::backend::BackEndGenerator;
pub use compiler::parser::{AstParser, SyntaxError};
pub use compiler::program_code::{Instruction, ProgramCode, Subroutine, Var};
pub use compiler::semantic_analyser::{
    ScopeId,
    SemanticAnalyser,
    SemanticContext,
    SemError,
    SemErrorKind,
    SemErrors,
    Symbol,
    SymbolKind,
    SymTable,
    TreeDecorations,
    TypeId,
    TypesMgr
};

/// Compile attempts to compile Asl source text into program code for the
/// target virtual machine. On failure it returns either the syntax error
/// or the full list of semantic diagnostics.
pub fn compile(source: &str) -> Result<ProgramCode, CompileError> {
    let compiler: Compiler<PARSER, ANALYSER, GENERATOR> = Compiler::default();
    compiler.compile_str(source)
}
