mod unit_code_generator;

use crate::compiler::{AslCodeGenerator, AslSemanticAnalyser, Compiler, PestAslParser};
use crate::compiler::program_code::ProgramCode;

/// Run the whole pipeline on a source text that must compile cleanly
fn compile(source: &str) -> ProgramCode {
    let compiler: Compiler<PestAslParser, AslSemanticAnalyser, AslCodeGenerator> = Compiler::default();
    compiler.compile_str(source).unwrap()
}
