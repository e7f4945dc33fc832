//! Cycle detection over cell dependencies.
//!
//! Depth-first search from a starting cell through a caller-supplied
//! dependency lookup. The document layer uses this on its single-cell fast
//! path to refuse evaluating a formula that can reach a cycle before the
//! global topological pass has run.

use std::collections::HashSet;

use super::cell_ref::CellRef;

/// True when following dependencies from `start` reaches any cycle,
/// including a direct self-reference.
pub fn detect_cycle(start: CellRef, deps_of: &dyn Fn(CellRef) -> Vec<CellRef>) -> bool {
    let mut visiting = HashSet::new();
    dfs(start, deps_of, &mut visiting)
}

fn dfs(
    current: CellRef,
    deps_of: &dyn Fn(CellRef) -> Vec<CellRef>,
    visiting: &mut HashSet<CellRef>,
) -> bool {
    if !visiting.insert(current) {
        return true;
    }

    for dep in deps_of(current) {
        if dfs(dep, deps_of, visiting) {
            return true;
        }
    }

    visiting.remove(&current);
    false
}
