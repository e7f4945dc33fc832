//! End-to-end engine tests through the public API.

use std::collections::HashMap;

use tabula_engine::engine::{CellRef, FormulaError, ValueSource, evaluate, extract_dependencies};

fn sheet(cells: &[(&str, &str)]) -> impl ValueSource {
    let map: HashMap<(usize, usize), String> = cells
        .iter()
        .map(|(label, content)| {
            let cr = CellRef::parse(label).unwrap();
            ((cr.row, cr.col), content.to_string())
        })
        .collect();
    move |row: usize, col: usize| map.get(&(row, col)).cloned()
}

#[test]
fn evaluates_arithmetic_over_cell_values() {
    let s = sheet(&[("A1", "6"), ("A2", "4"), ("B1", "2")]);
    assert_eq!(evaluate("(A1+A2)/B1", &s).unwrap(), "5");
    assert_eq!(evaluate("A1*B1-A2", &s).unwrap(), "8");
}

#[test]
fn composes_functions_ranges_and_arithmetic() {
    let s = sheet(&[
        ("A1", "10"),
        ("A2", "20"),
        ("A3", "30"),
        ("B1", "3"),
    ]);
    assert_eq!(evaluate("SUM(A1:A3)/B1", &s).unwrap(), "20");
    assert_eq!(evaluate("MAX(A1:A3)-MIN(A1:A3)", &s).unwrap(), "20");
    assert_eq!(evaluate("ROUND(AVERAGE(A1:A3);1)", &s).unwrap(), "20");
    assert_eq!(evaluate("SUM(A1:A3,B1,2)", &s).unwrap(), "65");
}

#[test]
fn reports_typed_errors() {
    let s = sheet(&[("A1", "note")]);
    assert_eq!(evaluate("A1+1", &s), Err(FormulaError::InvalidFormula));
    assert_eq!(
        evaluate("MEDIAN(1,2)", &s),
        Err(FormulaError::InvalidFunction("MEDIAN".to_string()))
    );
    assert_eq!(evaluate("5/0", &s), Err(FormulaError::DivisionByZero));
    assert!(matches!(
        evaluate("SUM(A1:)", &s),
        Err(FormulaError::InvalidRange(_))
    ));
    assert_eq!(
        evaluate("A0+1", &s),
        Err(FormulaError::InvalidReference("A0".to_string()))
    );
}

#[test]
fn extraction_matches_what_evaluation_reads() {
    let formula = "SUM(B2:D4)+E5*2";
    assert_eq!(
        extract_dependencies(formula),
        vec![
            CellRef::parse("B2").unwrap(),
            CellRef::parse("D4").unwrap(),
            CellRef::parse("E5").unwrap(),
        ]
    );
}

#[test]
fn closure_sources_satisfy_the_capability_trait() {
    let constant = |_: usize, _: usize| Some("7".to_string());
    assert_eq!(evaluate("A1+B9", &constant).unwrap(), "14");
}
