//! Edit operations and cell accessors.

use tabula_engine::engine::CellRef;

use super::eval::RecalcReport;
use super::state::{Cell, Document};
use crate::error::{DocumentError, Result};

impl Document {
    /// Borrow the cell at `at`, if in bounds.
    pub fn cell(&self, at: CellRef) -> Option<&Cell> {
        self.cells.get(at.row)?.get(at.col)
    }

    /// Raw input at `at`; empty for out-of-bounds coordinates.
    pub fn input_at(&self, at: CellRef) -> &str {
        self.cell(at).map(|c| c.input.as_str()).unwrap_or("")
    }

    /// Display value at `at`; empty for out-of-bounds coordinates.
    pub fn display_at(&self, at: CellRef) -> &str {
        self.cell(at).map(|c| c.display.as_str()).unwrap_or("")
    }

    /// Error flag at `at`.
    pub fn is_error_at(&self, at: CellRef) -> bool {
        self.cell(at).is_some_and(|c| c.error)
    }

    /// Replace a cell's input, evaluate that cell immediately against the
    /// current grid (the fast path, which may read values not yet
    /// recomputed), then run the authoritative global recompute.
    pub fn apply_edit(&mut self, at: CellRef, input: &str) -> Result<RecalcReport> {
        if !self.contains(at) {
            return Err(DocumentError::OutOfBounds {
                at,
                rows: self.rows(),
                cols: self.cols(),
            });
        }

        self.cells[at.row][at.col].input = input.to_string();
        self.evaluate_single(at);
        Ok(self.recompute())
    }

    /// Reset a cell to empty input and recompute.
    pub fn clear_cell(&mut self, at: CellRef) -> Result<RecalcReport> {
        self.apply_edit(at, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(label: &str) -> CellRef {
        CellRef::parse(label).unwrap()
    }

    #[test]
    fn test_apply_edit_rejects_out_of_bounds() {
        let mut doc = Document::new(2, 2);
        let err = doc.apply_edit(at("C9"), "1").unwrap_err();
        assert_eq!(
            err,
            DocumentError::OutOfBounds {
                at: at("C9"),
                rows: 2,
                cols: 2,
            }
        );
    }

    #[test]
    fn test_apply_edit_stores_input_and_display() {
        let mut doc = Document::new(2, 2);
        doc.apply_edit(at("A1"), "007").unwrap();
        assert_eq!(doc.input_at(at("A1")), "007");
        assert_eq!(doc.display_at(at("A1")), "7");
        assert!(!doc.is_error_at(at("A1")));
    }

    #[test]
    fn test_clear_cell_resets_state() {
        let mut doc = Document::new(2, 2);
        doc.apply_edit(at("A1"), "=1/0").unwrap();
        assert!(doc.is_error_at(at("A1")));

        doc.clear_cell(at("A1")).unwrap();
        assert_eq!(doc.input_at(at("A1")), "");
        assert_eq!(doc.display_at(at("A1")), "");
        assert!(!doc.is_error_at(at("A1")));
    }

    #[test]
    fn test_accessors_tolerate_out_of_bounds() {
        let doc = Document::new(1, 1);
        assert_eq!(doc.display_at(at("Z99")), "");
        assert_eq!(doc.input_at(at("Z99")), "");
        assert!(!doc.is_error_at(at("Z99")));
        assert!(doc.cell(at("Z99")).is_none());
    }
}
