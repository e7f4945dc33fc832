//! Formula engine API.
//!
//! This module provides the computation core for the spreadsheet:
//!
//! - [`CellRef`] - cell reference parsing (A1 notation ↔ row/col indices)
//! - [`evaluate`] - parse and evaluate one formula against a [`ValueSource`]
//! - [`extract_dependencies`] - textual scan for referenced cells
//! - [`detect_cycle`] - depth-first reachability check over dependencies
//! - [`FormulaError`] - typed evaluation failures
//! - [`format_number`], [`normalize_literal`] - display formatting

mod cell_ref;
mod cycle;
mod deps;
mod error;
mod eval;
mod format;
mod parser;

pub use cell_ref::CellRef;
pub use cycle::detect_cycle;
pub use deps::extract_dependencies;
pub use error::FormulaError;
pub use eval::{ValueSource, evaluate};
pub use format::{format_number, normalize_literal};
