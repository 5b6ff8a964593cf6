use std::fmt;

/// Location is the line/column position of a token within the source text.
/// Every diagnostic carries one so errors can be traced back to the
/// offending code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub line: usize,
    pub column: usize
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Location {
            line,
            column
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
