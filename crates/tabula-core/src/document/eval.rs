//! Full-grid recalculation.
//!
//! Every pass rebuilds the dependency graph from scratch and evaluates the
//! formula cells in topological order (Kahn's algorithm). Formula cells the
//! order never reaches sit on a cycle, or downstream of one, and are marked
//! erroring without evaluating their formula text. Literal cells are
//! normalized first so formulas always read finished values.

use std::collections::{HashMap, HashSet, VecDeque};

use tabula_engine::engine::{
    CellRef, ValueSource, detect_cycle, evaluate, extract_dependencies, normalize_literal,
};

use super::state::{Cell, Document, ERROR_DISPLAY, formula_body};

/// Outcome summary of one recompute pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecalcReport {
    /// Formula cells evaluated in order.
    pub cells_recomputed: usize,
    /// Formula cells flagged as on, or downstream of, a cycle.
    pub cycle_cells: usize,
    /// Formula cells whose evaluation failed.
    pub errors: usize,
}

impl RecalcReport {
    pub fn had_cycles(&self) -> bool {
        self.cycle_cells > 0
    }

    /// One-line summary for diagnostics.
    pub fn summary(&self) -> String {
        format!(
            "{} cells recomputed, cycles={}, errors={}",
            self.cells_recomputed, self.cycle_cells, self.errors
        )
    }
}

/// Grid-backed value source. Formulas read the *display* values of their
/// precedents, which is why a dependency must be recomputed before any of
/// its dependents.
struct GridSource<'a> {
    cells: &'a [Vec<Cell>],
}

impl ValueSource for GridSource<'_> {
    fn get(&self, row: usize, col: usize) -> Option<String> {
        self.cells.get(row)?.get(col).map(|cell| cell.display.clone())
    }
}

impl Document {
    /// Recompute the whole grid.
    ///
    /// Always global: the dependency graph is rebuilt from every formula
    /// cell's text on every pass, with no dirty tracking. Fine at these
    /// grid sizes; incremental recomputation is the first thing to revisit
    /// for much larger grids.
    pub fn recompute(&mut self) -> RecalcReport {
        let mut report = RecalcReport::default();

        // Literal cells first: their displays feed the formula pass.
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                if formula_body(&cell.input).is_none() {
                    cell.display = normalize_literal(&cell.input);
                    cell.error = false;
                }
            }
        }

        // Dependency edges, restricted to in-bounds formula cells. Literal
        // precedents are already final and never gate ordering.
        let formulas: Vec<CellRef> = self.formula_cells();
        let formula_set: HashSet<CellRef> = formulas.iter().copied().collect();

        let mut dependents: HashMap<CellRef, Vec<CellRef>> = HashMap::new();
        let mut in_degree: HashMap<CellRef, usize> = HashMap::new();

        for &cell in &formulas {
            let precedents: Vec<CellRef> = self
                .deps_of(cell)
                .into_iter()
                .filter(|dep| formula_set.contains(dep))
                .collect();
            in_degree.insert(cell, precedents.len());
            for dep in precedents {
                dependents.entry(dep).or_default().push(cell);
            }
        }

        // Kahn's algorithm, seeded row-major for a deterministic order.
        let mut queue: VecDeque<CellRef> = formulas
            .iter()
            .copied()
            .filter(|cell| in_degree.get(cell) == Some(&0))
            .collect();
        let mut order: Vec<CellRef> = Vec::with_capacity(formulas.len());

        while let Some(cell) = queue.pop_front() {
            order.push(cell);
            if let Some(deps) = dependents.get(&cell) {
                for &dependent in deps {
                    if let Some(deg) = in_degree.get_mut(&dependent) {
                        *deg = deg.saturating_sub(1);
                        if *deg == 0 {
                            queue.push_back(dependent);
                        }
                    }
                }
            }
        }

        // Anything the order never reached is on a cycle or downstream of
        // one: flag it without evaluating.
        let ordered: HashSet<CellRef> = order.iter().copied().collect();
        for &at in &formulas {
            if !ordered.contains(&at) {
                let cell = &mut self.cells[at.row][at.col];
                cell.display = ERROR_DISPLAY.to_string();
                cell.error = true;
                report.cycle_cells += 1;
            }
        }

        for at in order {
            self.evaluate_formula_cell(at, &mut report);
        }

        report
    }

    /// Single-cell evaluation run right after an edit, before the global
    /// pass. May read neighbors the pass has not recomputed yet; the global
    /// pass that follows is authoritative and overwrites the result.
    pub(crate) fn evaluate_single(&mut self, at: CellRef) {
        if formula_body(&self.cells[at.row][at.col].input).is_none() {
            let cell = &mut self.cells[at.row][at.col];
            cell.display = normalize_literal(&cell.input);
            cell.error = false;
            return;
        }

        // A formula that can reach a cycle must not be evaluated at all.
        if detect_cycle(at, &|cell| self.deps_of(cell)) {
            let cell = &mut self.cells[at.row][at.col];
            cell.display = ERROR_DISPLAY.to_string();
            cell.error = true;
            return;
        }

        let mut scratch = RecalcReport::default();
        self.evaluate_formula_cell(at, &mut scratch);
    }

    /// In-bounds textual dependencies of a cell's formula; empty for
    /// literal cells.
    fn deps_of(&self, at: CellRef) -> Vec<CellRef> {
        match self.cell(at).and_then(|cell| formula_body(&cell.input)) {
            Some(body) => extract_dependencies(body)
                .into_iter()
                .filter(|dep| self.contains(*dep))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Coordinates of all formula cells, row-major.
    fn formula_cells(&self) -> Vec<CellRef> {
        let mut cells = Vec::new();
        for (row, cols) in self.cells.iter().enumerate() {
            for (col, cell) in cols.iter().enumerate() {
                if cell.is_formula() {
                    cells.push(CellRef::new(row, col));
                }
            }
        }
        cells
    }

    /// Evaluate one formula cell against current display values and store
    /// the outcome.
    fn evaluate_formula_cell(&mut self, at: CellRef, report: &mut RecalcReport) {
        let Some(body) = formula_body(&self.cells[at.row][at.col].input) else {
            return;
        };
        let body = body.to_string();

        let result = {
            let source = GridSource { cells: &self.cells };
            evaluate(&body, &source)
        };

        let cell = &mut self.cells[at.row][at.col];
        match result {
            Ok(display) => {
                cell.display = display;
                cell.error = false;
            }
            Err(_) => {
                cell.display = ERROR_DISPLAY.to_string();
                cell.error = true;
                report.errors += 1;
            }
        }
        report.cells_recomputed += 1;
    }
}
