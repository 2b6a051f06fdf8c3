//! SemErrors — accumulates and renders semantic diagnostics.
//!
//! Diagnostic kinds are modeled as a `thiserror`-derived enum, following the
//! pattern in the sibling example `Luvion1-Fax/faxc/crates/faxc-util/src/error.rs`:
//! one `#[error("...")]` variant per kind, carrying exactly the data needed to
//! render a message. Unlike a `Result`-returning API, these are never
//! propagated with `?` — every check in `passes::typecheck` pushes into this
//! accumulator and keeps walking, per the "reported, not raised" rule.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::span::SourceSpan;

#[derive(Debug, Clone, Error, PartialEq, Eq, Hash)]
pub enum SemErrorKind {
    #[error("identifier '{0}' already declared in this scope")]
    DeclaredIdent(String),

    #[error("identifier '{0}' not declared")]
    UndeclaredIdent(String),

    #[error("incompatible operator '{0}'")]
    IncompatibleOperator(String),

    #[error("incompatible types in assignment")]
    IncompatibleAssignment,

    #[error("expression cannot be used as the left side of an assignment")]
    NonReferenceableLeftExpr,

    #[error("expression is not referenceable")]
    NonReferenceableExpression,

    #[error("boolean expression required")]
    BooleanRequired,

    #[error("read/write statements require a basic type")]
    ReadWriteRequireBasic,

    #[error("'{0}' is not callable")]
    IsNotCallable(String),

    #[error("'{0}' is not a function (has no return value)")]
    IsNotFunction(String),

    #[error("wrong number of parameters calling '{0}'")]
    NumberOfParameters(String),

    #[error("incompatible type for parameter {index} of '{callee}'")]
    IncompatibleParameter { index: usize, callee: String },

    #[error("incompatible return type")]
    IncompatibleReturn,

    #[error("non-array type used as an array in array access")]
    NonArrayInArrayAccess,

    #[error("non-integer index used in array access")]
    NonIntegerIndexInArrayAccess,

    #[error("program does not properly declare 'main' (no parameters, void return)")]
    NoMainProperlyDeclared,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemError {
    pub kind: SemErrorKind,
    pub span: SourceSpan,
}

impl fmt::Display for SemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span, self.kind)
    }
}

/// Accumulates diagnostics in insertion order and renders them deduplicated
/// per (location, kind): a re-check of an already-flagged node (common once
/// an `Error` type starts propagating) does not produce a second message.
#[derive(Debug, Default)]
pub struct SemErrors {
    errors: Vec<SemError>,
    seen: HashSet<SemError>,
}

impl SemErrors {
    pub fn new() -> Self {
        SemErrors::default()
    }

    fn push(&mut self, kind: SemErrorKind, span: SourceSpan) {
        let error = SemError { kind, span };
        if self.seen.insert(error.clone()) {
            self.errors.push(error);
        }
    }

    pub fn declared_ident(&mut self, name: &str, span: SourceSpan) {
        self.push(SemErrorKind::DeclaredIdent(name.to_string()), span);
    }
    pub fn undeclared_ident(&mut self, name: &str, span: SourceSpan) {
        self.push(SemErrorKind::UndeclaredIdent(name.to_string()), span);
    }
    pub fn incompatible_operator(&mut self, op: &str, span: SourceSpan) {
        self.push(SemErrorKind::IncompatibleOperator(op.to_string()), span);
    }
    pub fn incompatible_assignment(&mut self, span: SourceSpan) {
        self.push(SemErrorKind::IncompatibleAssignment, span);
    }
    pub fn non_referenceable_left_expr(&mut self, span: SourceSpan) {
        self.push(SemErrorKind::NonReferenceableLeftExpr, span);
    }
    pub fn non_referenceable_expression(&mut self, span: SourceSpan) {
        self.push(SemErrorKind::NonReferenceableExpression, span);
    }
    pub fn boolean_required(&mut self, span: SourceSpan) {
        self.push(SemErrorKind::BooleanRequired, span);
    }
    pub fn read_write_require_basic(&mut self, span: SourceSpan) {
        self.push(SemErrorKind::ReadWriteRequireBasic, span);
    }
    pub fn is_not_callable(&mut self, name: &str, span: SourceSpan) {
        self.push(SemErrorKind::IsNotCallable(name.to_string()), span);
    }
    pub fn is_not_function(&mut self, name: &str, span: SourceSpan) {
        self.push(SemErrorKind::IsNotFunction(name.to_string()), span);
    }
    pub fn number_of_parameters(&mut self, name: &str, span: SourceSpan) {
        self.push(SemErrorKind::NumberOfParameters(name.to_string()), span);
    }
    pub fn incompatible_parameter(&mut self, index: usize, callee: &str, span: SourceSpan) {
        self.push(
            SemErrorKind::IncompatibleParameter {
                index,
                callee: callee.to_string(),
            },
            span,
        );
    }
    pub fn incompatible_return(&mut self, span: SourceSpan) {
        self.push(SemErrorKind::IncompatibleReturn, span);
    }
    pub fn non_array_in_array_access(&mut self, span: SourceSpan) {
        self.push(SemErrorKind::NonArrayInArrayAccess, span);
    }
    pub fn non_integer_index_in_array_access(&mut self, span: SourceSpan) {
        self.push(SemErrorKind::NonIntegerIndexInArrayAccess, span);
    }
    pub fn no_main_properly_declared(&mut self, span: SourceSpan) {
        self.push(SemErrorKind::NoMainProperlyDeclared, span);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
    pub fn len(&self) -> usize {
        self.errors.len()
    }
    pub fn iter(&self) -> impl Iterator<Item = &SemError> {
        self.errors.iter()
    }
}

impl fmt::Display for SemErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}
