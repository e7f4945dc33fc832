//! End-to-end document tests through the public API.

use tabula_core::{Cell, CellRef, Document, DocumentError, ERROR_DISPLAY};

fn at(label: &str) -> CellRef {
    CellRef::parse(label).unwrap()
}

fn edit(doc: &mut Document, label: &str, input: &str) {
    doc.apply_edit(at(label), input).unwrap();
}

#[test]
fn small_ledger_scenario() {
    let mut doc = Document::new(12, 8);

    edit(&mut doc, "A1", "10");
    edit(&mut doc, "A2", "20");
    edit(&mut doc, "A3", "30");
    edit(&mut doc, "B1", "=SUM(A1:A3)");
    edit(&mut doc, "B2", "=AVERAGE(A3:A1)");
    edit(&mut doc, "B3", "=B1/B2");

    assert_eq!(doc.display_at(at("B1")), "60");
    assert_eq!(doc.display_at(at("B2")), "20");
    assert_eq!(doc.display_at(at("B3")), "3");

    // Replacing one input flows through both aggregate layers.
    edit(&mut doc, "A2", "50");
    assert_eq!(doc.display_at(at("B1")), "90");
    assert_eq!(doc.display_at(at("B2")), "30");
    assert_eq!(doc.display_at(at("B3")), "3");
}

#[test]
fn literal_normalization_and_passthrough() {
    let mut doc = Document::new(4, 4);
    edit(&mut doc, "A1", "007");
    edit(&mut doc, "A2", "3.140");
    edit(&mut doc, "A3", "hello");
    edit(&mut doc, "A4", "");

    assert_eq!(doc.display_at(at("A1")), "7");
    assert_eq!(doc.display_at(at("A2")), "3.14");
    assert_eq!(doc.display_at(at("A3")), "hello");
    assert_eq!(doc.display_at(at("A4")), "");
    for label in ["A1", "A2", "A3", "A4"] {
        assert!(!doc.is_error_at(at(label)));
    }
}

#[test]
fn error_state_carries_the_sentinel_display() {
    let mut doc = Document::new(4, 4);
    edit(&mut doc, "A1", "=1/0");
    edit(&mut doc, "A2", "=NOPE(1)");
    edit(&mut doc, "A3", "=A3");

    for label in ["A1", "A2", "A3"] {
        assert!(doc.is_error_at(at(label)), "cell {label}");
        assert_eq!(doc.display_at(at(label)), ERROR_DISPLAY, "cell {label}");
    }
}

#[test]
fn cycles_flag_members_and_dependents_but_not_bystanders() {
    let mut doc = Document::new(6, 6);
    edit(&mut doc, "A1", "=B1");
    edit(&mut doc, "B1", "=C1");
    edit(&mut doc, "C1", "=A1");
    edit(&mut doc, "D1", "=C1+1");
    edit(&mut doc, "E1", "=2*3");

    let report = doc.recompute();
    assert_eq!(report.cycle_cells, 4);
    assert_eq!(report.cells_recomputed, 1);

    for label in ["A1", "B1", "C1", "D1"] {
        assert!(doc.is_error_at(at(label)), "cell {label}");
    }
    assert_eq!(doc.display_at(at("E1")), "6");
    assert!(!doc.is_error_at(at("E1")));
}

#[test]
fn recompute_twice_is_stable() {
    let mut doc = Document::new(6, 6);
    edit(&mut doc, "A1", "2");
    edit(&mut doc, "B1", "=A1*A1");
    edit(&mut doc, "C1", "=SUM(A1,B1)");
    edit(&mut doc, "D1", "=D1+1");

    doc.recompute();
    let first: Vec<(String, bool)> = snapshot(&doc);
    doc.recompute();
    assert_eq!(snapshot(&doc), first);
}

fn snapshot(doc: &Document) -> Vec<(String, bool)> {
    let mut state = Vec::new();
    for row in 0..doc.rows() {
        for col in 0..doc.cols() {
            let cell = doc.cell(CellRef::new(row, col)).unwrap();
            state.push((cell.display.clone(), cell.error));
        }
    }
    state
}

#[test]
fn out_of_bounds_edits_are_rejected() {
    let mut doc = Document::new(2, 2);
    assert!(matches!(
        doc.apply_edit(at("A5"), "1"),
        Err(DocumentError::OutOfBounds { .. })
    ));
    // The grid is untouched.
    assert_eq!(doc.input_at(at("A1")), "");
}

#[test]
fn cell_state_serializes_for_external_persistence() {
    let cell = Cell {
        input: "=A1+1".to_string(),
        display: "2".to_string(),
        error: false,
    };
    let json = serde_json::to_string(&cell).unwrap();
    let back: Cell = serde_json::from_str(&json).unwrap();
    assert_eq!(back.input, cell.input);
    assert_eq!(back.display, cell.display);
    assert_eq!(back.error, cell.error);
}
