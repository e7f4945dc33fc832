//! Dependency extraction from formula text.
//!
//! Scans the raw formula (before any evaluation) for cell labels and decodes
//! them. The scan is purely textual: a range like `A1:A3` surfaces only its
//! two endpoint labels, not the interior cells. That is enough to build the
//! recomputation graph. The extractor itself never fails; labels that do not
//! decode are skipped.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use super::cell_ref::CellRef;

fn cell_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b([A-Za-z]+)([0-9]+)\b").expect("dependency cell label regex must compile")
    })
}

/// Extract the distinct cell references a formula mentions, in first-seen
/// order.
pub fn extract_dependencies(formula: &str) -> Vec<CellRef> {
    let mut seen = HashSet::new();
    let mut deps = Vec::new();

    for caps in cell_label_re().captures_iter(formula) {
        if let Some(cr) = CellRef::parse(&caps[0]) {
            if seen.insert(cr) {
                deps.push(cr);
            }
        }
    }

    deps
}
