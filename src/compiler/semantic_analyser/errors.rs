use std::fmt;

use super::super::ast::Location;

/// Every kind of diagnostic the analysis passes can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemErrorKind {
    DeclaredIdent(String),
    UndeclaredIdent(String),
    IncompatibleAssignment,
    IncompatibleReturn,
    /// 1-based position of the offending argument
    IncompatibleParameter(usize),
    /// Source spelling of the operator
    IncompatibleOperator(String),
    BooleanRequired,
    ReadWriteRequireBasic,
    NonReferenceableLeftExpr,
    NonReferenceableExpression,
    IsNotCallable,
    IsNotFunction,
    NumberOfParameters,
    NonArrayInArrayAccess,
    NonIntegerIndexInArrayAccess,
    NoMainProperlyDeclared
}

/// A single recoverable diagnostic: where plus what. Analysis never stops
/// on one of these; a run surfaces as many as the program deserves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemError {
    pub loc: Location,
    pub kind: SemErrorKind
}

impl fmt::Display for SemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: ", self.loc)?;
        match &self.kind {
            SemErrorKind::DeclaredIdent(ident) =>
                write!(f, "identifier '{}' already declared", ident),
            SemErrorKind::UndeclaredIdent(ident) =>
                write!(f, "identifier '{}' undeclared", ident),
            SemErrorKind::IncompatibleAssignment =>
                write!(f, "assignment with incompatible types"),
            SemErrorKind::IncompatibleReturn =>
                write!(f, "return with incompatible type"),
            SemErrorKind::IncompatibleParameter(position) =>
                write!(f, "incompatible type for parameter #{} in call", position),
            SemErrorKind::IncompatibleOperator(op) =>
                write!(f, "operator '{}' with incompatible types", op),
            SemErrorKind::BooleanRequired =>
                write!(f, "condition must be of type bool"),
            SemErrorKind::ReadWriteRequireBasic =>
                write!(f, "read and write require basic types"),
            SemErrorKind::NonReferenceableLeftExpr =>
                write!(f, "left expression of assignment is not referenceable"),
            SemErrorKind::NonReferenceableExpression =>
                write!(f, "expression is not referenceable"),
            SemErrorKind::IsNotCallable =>
                write!(f, "identifier is not callable"),
            SemErrorKind::IsNotFunction =>
                write!(f, "call to a procedure inside an expression"),
            SemErrorKind::NumberOfParameters =>
                write!(f, "wrong number of parameters in call"),
            SemErrorKind::NonArrayInArrayAccess =>
                write!(f, "array access to a non-array operand"),
            SemErrorKind::NonIntegerIndexInArrayAccess =>
                write!(f, "array index is not an integer"),
            SemErrorKind::NoMainProperlyDeclared =>
                write!(f, "program requires a function 'main' with no parameters and no return type")
        }
    }
}

/// SemErrors collects the diagnostics of one compilation. There is one
/// reporting method per kind so the visitors read like the rules they
/// implement.
#[derive(Debug, Default)]
pub struct SemErrors {
    errors: Vec<SemError>
}

impl SemErrors {
    pub fn new() -> Self {
        Default::default()
    }

    fn report(&mut self, loc: Location, kind: SemErrorKind) {
        self.errors.push(SemError { loc, kind });
    }

    pub fn declared_ident(&mut self, loc: Location, ident: &str) {
        self.report(loc, SemErrorKind::DeclaredIdent(String::from(ident)));
    }

    pub fn undeclared_ident(&mut self, loc: Location, ident: &str) {
        self.report(loc, SemErrorKind::UndeclaredIdent(String::from(ident)));
    }

    pub fn incompatible_assignment(&mut self, loc: Location) {
        self.report(loc, SemErrorKind::IncompatibleAssignment);
    }

    pub fn incompatible_return(&mut self, loc: Location) {
        self.report(loc, SemErrorKind::IncompatibleReturn);
    }

    pub fn incompatible_parameter(&mut self, loc: Location, position: usize) {
        self.report(loc, SemErrorKind::IncompatibleParameter(position));
    }

    pub fn incompatible_operator(&mut self, loc: Location, op: &str) {
        self.report(loc, SemErrorKind::IncompatibleOperator(String::from(op)));
    }

    pub fn boolean_required(&mut self, loc: Location) {
        self.report(loc, SemErrorKind::BooleanRequired);
    }

    pub fn read_write_require_basic(&mut self, loc: Location) {
        self.report(loc, SemErrorKind::ReadWriteRequireBasic);
    }

    pub fn non_referenceable_left_expr(&mut self, loc: Location) {
        self.report(loc, SemErrorKind::NonReferenceableLeftExpr);
    }

    pub fn non_referenceable_expression(&mut self, loc: Location) {
        self.report(loc, SemErrorKind::NonReferenceableExpression);
    }

    pub fn is_not_callable(&mut self, loc: Location) {
        self.report(loc, SemErrorKind::IsNotCallable);
    }

    pub fn is_not_function(&mut self, loc: Location) {
        self.report(loc, SemErrorKind::IsNotFunction);
    }

    pub fn number_of_parameters(&mut self, loc: Location) {
        self.report(loc, SemErrorKind::NumberOfParameters);
    }

    pub fn non_array_in_array_access(&mut self, loc: Location) {
        self.report(loc, SemErrorKind::NonArrayInArrayAccess);
    }

    pub fn non_integer_index_in_array_access(&mut self, loc: Location) {
        self.report(loc, SemErrorKind::NonIntegerIndexInArrayAccess);
    }

    pub fn no_main_properly_declared(&mut self, loc: Location) {
        self.report(loc, SemErrorKind::NoMainProperlyDeclared);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[SemError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<SemError> {
        self.errors
    }
}
