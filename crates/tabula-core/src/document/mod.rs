//! Document state and recalculation (UI-agnostic).

mod eval;
mod ops;
mod state;

pub use eval::RecalcReport;
pub use state::{Cell, Document, ERROR_DISPLAY, FORMULA_MARKER, formula_body};
