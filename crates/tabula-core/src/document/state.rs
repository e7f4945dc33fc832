//! Cell and document data structures.
//!
//! The grid is a dense `rows x cols` array, allocated once at construction.
//! Cells are never created or destroyed afterwards; edits and recompute
//! passes only mutate their fields.

use serde::{Deserialize, Serialize};
use tabula_engine::engine::CellRef;

/// Display value for any cell whose evaluation failed or which sits on (or
/// depends on) a reference cycle.
pub const ERROR_DISPLAY: &str = "#ERROR!";

/// Leading character distinguishing formula input from literal input.
pub const FORMULA_MARKER: char = '=';

/// The formula body of an input, when it carries the marker.
pub fn formula_body(input: &str) -> Option<&str> {
    input.trim().strip_prefix(FORMULA_MARKER)
}

/// One cell of the grid.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Raw user text: empty, a literal, or a `=`-prefixed formula.
    pub input: String,
    /// Last computed display string; [`ERROR_DISPLAY`] when `error` is set.
    pub display: String,
    /// True when evaluation failed or the cell participates in a cycle.
    pub error: bool,
}

impl Cell {
    /// True when this cell's input is a formula.
    pub fn is_formula(&self) -> bool {
        formula_body(&self.input).is_some()
    }
}

/// A fixed-dimension grid of cells plus the recomputation machinery.
pub struct Document {
    rows: usize,
    cols: usize,
    pub(crate) cells: Vec<Vec<Cell>>,
}

impl Document {
    /// Create an empty `rows x cols` document.
    pub fn new(rows: usize, cols: usize) -> Document {
        Document {
            rows,
            cols,
            cells: vec![vec![Cell::default(); cols]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when the coordinate falls inside the grid.
    pub fn contains(&self, at: CellRef) -> bool {
        at.row < self.rows && at.col < self.cols
    }
}
