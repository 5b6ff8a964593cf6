use strum_macros::Display;

/// Unary operation is an expression operation with only one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UnaryOperation {
    #[strum(serialize = "not")]
    NOT,
    #[strum(serialize = "-")]
    NEGATE,
    #[strum(serialize = "+")]
    PLUS
}

/// Binary operation is an expression operation with two arguments.
/// The strum serializations are the source spellings, used verbatim in
/// diagnostics about operator misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[allow(non_camel_case_types)]
pub enum BinaryOperation {
    #[strum(serialize = "+")]
    ADD,
    #[strum(serialize = "-")]
    SUB,
    #[strum(serialize = "/")]
    DIV,
    #[strum(serialize = "*")]
    MUL,
    #[strum(serialize = "%")]
    MOD,

    #[strum(serialize = "==")]
    EQUAL,
    #[strum(serialize = "!=")]
    NOT_EQUAL,
    #[strum(serialize = ">")]
    GREATER_THAN,
    #[strum(serialize = "<")]
    LESS_THAN,
    #[strum(serialize = ">=")]
    GREATER_EQUAL,
    #[strum(serialize = "<=")]
    LESS_EQUAL,

    #[strum(serialize = "and")]
    AND,
    #[strum(serialize = "or")]
    OR
}

impl BinaryOperation {
    /// Arithmetic operations combine two numeric operands.
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Self::ADD | Self::SUB | Self::DIV | Self::MUL | Self::MOD)
    }

    /// Relational operations compare two operands into a boolean.
    pub fn is_relational(&self) -> bool {
        self.is_equality() || self.is_ordering()
    }

    /// Equality accepts any matching operand family, ordering only numeric
    /// operands.
    pub fn is_equality(&self) -> bool {
        matches!(self, Self::EQUAL | Self::NOT_EQUAL)
    }

    pub fn is_ordering(&self) -> bool {
        matches!(self, Self::GREATER_THAN | Self::LESS_THAN | Self::GREATER_EQUAL | Self::LESS_EQUAL)
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Self::AND | Self::OR)
    }
}
