//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell labels
//! (e.g., "A1", "B2", "AA100") and zero-indexed (row, column) coordinates.
//! Column letters use the standard spreadsheet base-26 scheme: single letters
//! A..Z map to columns 0..25, then "AA" follows "Z". There is no letter for
//! "zero", so this is not a positional base-26 numeral system.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::FormulaError;

/// A reference to a cell by zero-indexed row and column.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

fn label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<digits>[0-9]+)$")
            .expect("cell label regex must compile")
    })
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell label from spreadsheet notation (e.g., "A1", "b2",
    /// "AA10"). Letters are case-insensitive; the row number is 1-based.
    /// Returns `None` for anything that is not letters-then-digits, for a
    /// row of 0, and on overflow.
    pub fn parse(label: &str) -> Option<CellRef> {
        let caps = label_re().captures(label)?;
        let letters = &caps["letters"];
        let digits = &caps["digits"];

        let mut col_acc = 0usize;
        for b in letters.to_ascii_uppercase().bytes() {
            let digit = (b - b'A') as usize + 1;
            col_acc = col_acc.checked_mul(26)?.checked_add(digit)?;
        }
        let col = col_acc.checked_sub(1)?;

        let row = digits.parse::<usize>().ok()?.checked_sub(1)?;

        Some(CellRef::new(row, col))
    }

    /// Convert a column index to spreadsheet-style letters (0 -> A, 25 -> Z,
    /// 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut letters = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            letters.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        letters
    }
}

impl std::str::FromStr for CellRef {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| FormulaError::InvalidReference(s.to_string()))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}
