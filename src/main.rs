// External Modules
extern crate exitcode;

use asl_compiler::{AslCodeGenerator, AslSemanticAnalyser, CompileError, Compiler, PestAslParser};

// Standard Imports
use clap::Parser;

// Basic Compiler Configuration
type PARSER = PestAslParser;
type ANALYSER = AslSemanticAnalyser;
type GENERATOR = AslCodeGenerator;

/// Command Line interface struct
/// Describes possible arguments using the clap library
#[derive(Parser)]
struct CompilerCLIOptions {
    /// Path of file to compile. Asl source files end in .asl
    #[clap(parse(from_os_str))]
    path: std::path::PathBuf,

    /// Path to output file, default is <path_filename>.t
    #[clap(short, long, parse(from_os_str))]
    output: Option<std::path::PathBuf>,

    // Flags

    /// Write compilation result to stdout instead of output
    #[clap(long, action)]
    stdout: bool
}

impl CompilerCLIOptions {
    /// Derives default values for empty arguments that cannot be set to
    /// constants. For instance output is derived from the input file path.
    /// @return: Returns CompilerCLIOptions with modified empty arguments
    fn derive_defaults(mut self) -> Self {
        // Derive output file path from input file path if not set
        if self.output.is_none() {
            self.output = Some(self.path.with_extension("t"))
        }

        return self;
    }
}

fn main() {
    // Parse Command line arguments
    let cli_args = CompilerCLIOptions::parse().derive_defaults();

    let compiler: Compiler<PARSER, ANALYSER, GENERATOR> = Compiler::default();
    let source_path = cli_args.path.as_path();

    // Check if output should be to stdout
    let result = if cli_args.stdout {
        match compiler.compile(source_path) {
            Ok(program_code) => {
                print!("{}", program_code);
                Ok(())
            }
            Err(result) => { Err(result) }
        }
    } else {
        let dest_path = cli_args.output.unwrap(); // Can unwrap as output will always be derived
        let dest_path = dest_path.as_path();
        compiler.compile_and_save(source_path, dest_path)
    };

    // Check result
    match result {
        Ok(_) => {
            if !cli_args.stdout { // Don't pollute stdout if it has been selected
                println!("Compile success!");
            }
            std::process::exit(exitcode::OK);
        },
        Err(why) => {
            // Source errors carry their own diagnostics; everything else is
            // an environment problem such as an unreadable input file
            match why.downcast_ref::<CompileError>() {
                Some(compile_error) => {
                    eprintln!("{}", compile_error.to_string().trim_end());
                    std::process::exit(exitcode::DATAERR);
                }
                None => {
                    eprintln!("Compile Error: {:?}", why);
                    std::process::exit(exitcode::SOFTWARE);
                }
            }
        }
    };
}
