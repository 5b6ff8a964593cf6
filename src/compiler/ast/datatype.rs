use strum_macros::{Display, EnumString};

/// Primitive data types supported by the Asl AST model. The strum
/// serializations are the lexical type names of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BasicType {
    Int,
    Float,
    Bool,
    Char
}
