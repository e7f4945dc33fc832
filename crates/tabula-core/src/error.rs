//! Error types for the Tabula document layer.

use tabula_engine::engine::CellRef;
use thiserror::Error;

/// Errors from document-level operations.
///
/// Formula failures and reference cycles never surface here: they are
/// per-cell state (error flag plus sentinel display), not operation
/// failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("cell {at} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        at: CellRef,
        rows: usize,
        cols: usize,
    },
}

pub type Result<T> = std::result::Result<T, DocumentError>;
