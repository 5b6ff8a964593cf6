pub mod instructions;

pub use self::instructions::Instruction;

use std::fmt;

/// Var is one local variable slot of a subroutine together with its size in
/// VM cells. Scalars take one cell, arrays one cell per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var {
    pub name: String,
    pub size: usize
}

impl Var {
    pub fn new(name: &str, size: usize) -> Self {
        Var {
            name: String::from(name),
            size
        }
    }
}

/// Subroutine is one function's compiled code: its name, the parameter
/// names in passing order, the local variable slots and the instruction
/// list. Parameter order matters, the caller pushes arguments positionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subroutine {
    pub name: String,
    pub params: Vec<String>,
    pub vars: Vec<Var>,
    pub instructions: Vec<Instruction>
}

impl Subroutine {
    pub fn new(name: &str) -> Self {
        Subroutine {
            name: String::from(name),
            params: vec![],
            vars: vec![],
            instructions: vec![]
        }
    }

    pub fn add_param(&mut self, name: &str) {
        self.params.push(String::from(name));
    }

    pub fn add_var(&mut self, var: Var) {
        self.vars.push(var);
    }

    pub fn set_instructions(&mut self, instructions: Vec<Instruction>) {
        self.instructions = instructions;
    }
}

impl fmt::Display for Subroutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FUNC {}", self.name)?;
        for param in &self.params {
            writeln!(f, "  PARAM {}", param)?;
        }
        for var in &self.vars {
            writeln!(f, "  VAR {} {}", var.name, var.size)?;
        }
        for instruction in &self.instructions {
            writeln!(f, "  {}", instruction)?;
        }
        writeln!(f, "ENDFUNC")
    }
}

/// ProgramCode describes one compiled module: the ordered list of
/// subroutines handed to the target virtual machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramCode {
    subroutines: Vec<Subroutine>
}

#[allow(dead_code)]
impl ProgramCode {

    /// Generates an empty ProgramCode. Useful when using the builder
    /// functions.
    pub fn default() -> ProgramCode {
        ProgramCode {
            subroutines: vec![]
        }
    }

    /// Builder function appends a finished subroutine to the module
    pub fn add_subroutine(&mut self, subroutine: Subroutine) {
        self.subroutines.push(subroutine);
    }

    pub fn subroutines(&self) -> &[Subroutine] {
        &self.subroutines
    }

    /// Find a subroutine by function name
    pub fn get_subroutine(&self, name: &str) -> Option<&Subroutine> {
        self.subroutines.iter().find(|subroutine| subroutine.name == name)
    }
}

impl fmt::Display for ProgramCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for subroutine in &self.subroutines {
            write!(f, "{}", subroutine)?;
        }
        Ok(())
    }
}
