
/// Literal is a constant value used within an expression. The lexical kind
/// decides the value's type during type checking, so the raw spelling is
/// kept rather than an evaluated value; code generation passes it through
/// to the emitted instruction unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum Literal {
    /// # Example:
    ///     x := 4;
    ///          ^ -> INTVAL
    INTVAL(String),

    /// # Example:
    ///     x := 4.5;
    ///          ^^^ -> FLOATVAL
    FLOATVAL(String),

    /// Holds the bytes between the quotes: one byte for 'a', two bytes for
    /// an escape such as '\n'.
    CHARVAL(String),

    /// # Example:
    ///     b := true;
    ///          ^^^^ -> BOOLVAL
    BOOLVAL(bool)
}
