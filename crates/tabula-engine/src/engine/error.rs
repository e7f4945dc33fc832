//! Typed formula evaluation failures.

use thiserror::Error;

/// Errors produced while parsing or evaluating a single formula.
///
/// Every variant is terminal for the cell being evaluated. The document
/// layer folds all of them into one error sentinel display; the variants
/// exist for diagnostics and tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// The formula does not parse, contains a character the arithmetic
    /// grammar disallows, or applies arithmetic to non-numeric cell text.
    #[error("invalid formula")]
    InvalidFormula,

    /// A cell label that does not decode (row 0, overflow, malformed).
    #[error("invalid cell reference: {0}")]
    InvalidReference(String),

    /// Evaluation produced a non-finite number.
    #[error("division by zero")]
    DivisionByZero,

    /// A call to a function this engine does not provide.
    #[error("unknown function: {0}")]
    InvalidFunction(String),

    /// A range missing its second endpoint, or too large to expand.
    #[error("invalid range: {0}")]
    InvalidRange(String),
}
