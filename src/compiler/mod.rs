pub mod ast;
pub mod backend;
pub mod parser;
pub mod program_code;
pub mod semantic_analyser;

use std::error::Error;
use std::fmt;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;

// Interface Definitions
use self::backend::BackEndGenerator;
use self::parser::{AstParser, SyntaxError};
use self::program_code::ProgramCode;
use self::semantic_analyser::{SemanticAnalyser, SemError};

// Concrete Definitions Re-Export
pub use self::backend::AslCodeGenerator;
pub use self::parser::PestAslParser;
pub use self::semantic_analyser::AslSemanticAnalyser;

/// CompileError is everything that can stop a compilation: a source text
/// that does not parse, or an analysis that finished with diagnostics.
/// Semantic failures carry every collected diagnostic so one run surfaces
/// as many errors as possible.
#[derive(Debug)]
pub enum CompileError {
    Syntax(SyntaxError),
    Semantic(Vec<SemError>)
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Syntax(error) => write!(f, "{}", error),
            CompileError::Semantic(errors) => {
                for error in errors {
                    writeln!(f, "{}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl Error for CompileError {}

impl From<SyntaxError> for CompileError {
    fn from(error: SyntaxError) -> Self {
        CompileError::Syntax(error)
    }
}

/// Compiler is a simple struct that holds the configuration of one
/// compilation. Compiler takes three typed parameters defining:
///  the AstParser being used,
///  the SemanticAnalyser being used,
///  and the BackEndGenerator being used.
///
/// # Compilation Diagram
/// asl source -> AstParser -> AbstractSyntaxTree -> SemanticAnalyser -> decorations + diagnostics -> BackEndGenerator -> ProgramCode
pub struct Compiler<P: AstParser, A: SemanticAnalyser, G: BackEndGenerator> {
    parser: P,
    analyser: A,
    generator: G
}

#[allow(dead_code)] // Many of the functions on compiler act as a library interface and are not used
impl<P: AstParser, A: SemanticAnalyser, G: BackEndGenerator> Compiler<P, A, G> {

    /// Default generates a default compiler configuration. Default
    /// configuration is determined by the default methods of the parser,
    /// analyser and generator.
    pub fn default() -> Self {
        Compiler {
            parser: P::default(),
            analyser: A::default(),
            generator: G::default()
        }
    }

    /// Create new compiler using a preconfigured parser, analyser and
    /// generator.
    pub fn new(parser: P, analyser: A, generator: G) -> Self {
        Compiler {
            parser,
            analyser,
            generator
        }
    }

    /// Compiles a string of Asl source into program code. Code generation
    /// only runs when the analysis produced zero diagnostics.
    pub fn compile_str(self, source: &str) -> Result<ProgramCode, CompileError> {
        let ast = self.parser.parse(source)?;
        let context = self.analyser.analyse(&ast);
        if context.has_errors() {
            return Err(CompileError::Semantic(context.errors.into_errors()));
        }
        Ok(self.generator.generate(&ast, context))
    }

    /// Compiles a program file into program code.
    /// @return: ProgramCode if Ok. Otherwise the compile error or an IO
    /// error from a failed read.
    pub fn compile(self, source_filename: &Path) -> Result<ProgramCode, Box<dyn Error>> {
        let source_str = fs::read_to_string(source_filename)?;
        Ok(self.compile_str(source_str.as_str())?)
    }

    /// Compiles a program file and writes the program code encoded as
    /// string into the destination file path.
    pub fn compile_and_save(self, source_filename: &Path, dest_filename: &Path) -> Result<(), Box<dyn Error>> {
        let compiled_program = self.compile(source_filename)?;
        let program_str = format!("{}", compiled_program);

        let display_dest = dest_filename.display();

        let mut file = match File::create(dest_filename) {
            Err(why) => panic!("Couldn't create {}: {}", display_dest, why),
            Ok(file) => file,
        };

        match file.write_all(program_str.as_bytes()) {
            Err(why) => panic!("Couldn't write to {}: {}", display_dest, why),
            Ok(_) => println!("Successfully wrote to {}", display_dest),
        };

        Ok(())
    }
}
