use std::fmt;

/// Instruction is the three address instruction set of the target stack
/// virtual machine. Operands are symbolic: declared names, the synthetic
/// `_result` return slot, or temporaries of the form `%tK` unique within a
/// subroutine. Literal operands keep their source spelling so the VM
/// loader decides the concrete representation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum Instruction {
    /// Copy between locations: dest = src
    LOAD(String, String),
    /// Load integer literal: dest = literal
    ILOAD(String, String),
    /// Load float literal: dest = literal
    FLOAD(String, String),
    /// Load character bytes: dest = bytes (escape sequences pass through)
    CHLOAD(String, String),
    /// Take the reference of a named location: dest = &name
    ALOAD(String, String),

    // Integer arithmetic
    ADD(String, String, String),
    SUB(String, String, String),
    MUL(String, String, String),
    DIV(String, String, String),
    NEG(String, String),

    // Float arithmetic
    FADD(String, String, String),
    FSUB(String, String, String),
    FMUL(String, String, String),
    FDIV(String, String, String),
    FNEG(String, String),
    /// Integer to float widening: dest = float(src)
    FLOAT(String, String),

    // Relational, integer/boolean and float families. Only the three base
    // comparisons exist; !=, > and >= are synthesised by the generator.
    EQ(String, String, String),
    LT(String, String, String),
    LE(String, String, String),
    FEQ(String, String, String),
    FLT(String, String, String),
    FLE(String, String, String),

    // Logical
    AND(String, String, String),
    OR(String, String, String),
    NOT(String, String),

    /// Indexed load: dest = base[idx]
    LOADX(String, String, String),
    /// Indexed store: base[idx] = src
    XLOAD(String, String, String),

    // Control
    LABEL(String),
    UJUMP(String),
    /// Jump to the label when the condition is false
    FJUMP(String, String),
    CALL(String),
    RETURN,
    /// Push a value, or reserve an uninitialised slot when no operand is
    /// given (the callee return slot)
    PUSH(Option<String>),
    /// Pop into a destination, or discard the slot when no operand is given
    POP(Option<String>),

    // Input/output
    READI(String),
    READF(String),
    READC(String),
    WRITEI(String),
    WRITEF(String),
    WRITEC(String),
    WRITELN
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::LOAD(d, s) => write!(f, "LOAD {}, {}", d, s),
            Instruction::ILOAD(d, v) => write!(f, "ILOAD {}, {}", d, v),
            Instruction::FLOAD(d, v) => write!(f, "FLOAD {}, {}", d, v),
            Instruction::CHLOAD(d, v) => write!(f, "CHLOAD {}, '{}'", d, v),
            Instruction::ALOAD(d, s) => write!(f, "ALOAD {}, {}", d, s),
            Instruction::ADD(d, a, b) => write!(f, "ADD {}, {}, {}", d, a, b),
            Instruction::SUB(d, a, b) => write!(f, "SUB {}, {}, {}", d, a, b),
            Instruction::MUL(d, a, b) => write!(f, "MUL {}, {}, {}", d, a, b),
            Instruction::DIV(d, a, b) => write!(f, "DIV {}, {}, {}", d, a, b),
            Instruction::NEG(d, s) => write!(f, "NEG {}, {}", d, s),
            Instruction::FADD(d, a, b) => write!(f, "FADD {}, {}, {}", d, a, b),
            Instruction::FSUB(d, a, b) => write!(f, "FSUB {}, {}, {}", d, a, b),
            Instruction::FMUL(d, a, b) => write!(f, "FMUL {}, {}, {}", d, a, b),
            Instruction::FDIV(d, a, b) => write!(f, "FDIV {}, {}, {}", d, a, b),
            Instruction::FNEG(d, s) => write!(f, "FNEG {}, {}", d, s),
            Instruction::FLOAT(d, s) => write!(f, "FLOAT {}, {}", d, s),
            Instruction::EQ(d, a, b) => write!(f, "EQ {}, {}, {}", d, a, b),
            Instruction::LT(d, a, b) => write!(f, "LT {}, {}, {}", d, a, b),
            Instruction::LE(d, a, b) => write!(f, "LE {}, {}, {}", d, a, b),
            Instruction::FEQ(d, a, b) => write!(f, "FEQ {}, {}, {}", d, a, b),
            Instruction::FLT(d, a, b) => write!(f, "FLT {}, {}, {}", d, a, b),
            Instruction::FLE(d, a, b) => write!(f, "FLE {}, {}, {}", d, a, b),
            Instruction::AND(d, a, b) => write!(f, "AND {}, {}, {}", d, a, b),
            Instruction::OR(d, a, b) => write!(f, "OR {}, {}, {}", d, a, b),
            Instruction::NOT(d, s) => write!(f, "NOT {}, {}", d, s),
            Instruction::LOADX(d, base, idx) => write!(f, "LOADX {}, {}, {}", d, base, idx),
            Instruction::XLOAD(base, idx, s) => write!(f, "XLOAD {}, {}, {}", base, idx, s),
            Instruction::LABEL(name) => write!(f, "LABEL {}", name),
            Instruction::UJUMP(name) => write!(f, "UJUMP {}", name),
            Instruction::FJUMP(cond, name) => write!(f, "FJUMP {}, {}", cond, name),
            Instruction::CALL(name) => write!(f, "CALL {}", name),
            Instruction::RETURN => write!(f, "RETURN"),
            Instruction::PUSH(Some(s)) => write!(f, "PUSH {}", s),
            Instruction::PUSH(None) => write!(f, "PUSH"),
            Instruction::POP(Some(d)) => write!(f, "POP {}", d),
            Instruction::POP(None) => write!(f, "POP"),
            Instruction::READI(d) => write!(f, "READI {}", d),
            Instruction::READF(d) => write!(f, "READF {}", d),
            Instruction::READC(d) => write!(f, "READC {}", d),
            Instruction::WRITEI(s) => write!(f, "WRITEI {}", s),
            Instruction::WRITEF(s) => write!(f, "WRITEF {}", s),
            Instruction::WRITEC(s) => write!(f, "WRITEC {}", s),
            Instruction::WRITELN => write!(f, "WRITELN")
        }
    }
}
