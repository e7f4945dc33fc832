//! tabula-core - UI-agnostic document model and recalculation.
//!
//! Owns the fixed-size grid of cells and keeps every formula cell's display
//! consistent with a cycle-free evaluation order after each edit. Rendering,
//! input handling, and persistence are the caller's concern.

pub mod document;
pub mod error;

pub use document::{Cell, Document, ERROR_DISPLAY, FORMULA_MARKER, RecalcReport};
pub use error::{DocumentError, Result};

pub use tabula_engine::engine::CellRef;
