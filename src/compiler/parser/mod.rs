use std::error::Error;
use std::fmt;

use super::ast::AbstractSyntaxTree;

pub mod asl_pest_parser;

#[cfg(test)]
mod test;

/// SyntaxError wraps the rendered parse failure of a source text. The
/// parser either yields a complete tree or exactly one of these; syntax
/// recovery is not attempted.
#[derive(Debug)]
pub struct SyntaxError {
    message: String
}

impl SyntaxError {
    pub fn new(message: String) -> Self {
        SyntaxError {
            message
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for SyntaxError {}

/// Parser handles interpretation of source text into the AST model used by
/// the analysis passes.
pub trait AstParser {
    fn default() -> Self;
    fn parse(self, source: &str) -> Result<AbstractSyntaxTree, SyntaxError>;
}

// Concrete Definition Export
pub use self::asl_pest_parser::PestAslParser;
