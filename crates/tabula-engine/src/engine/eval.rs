//! Formula evaluation.
//!
//! [`evaluate`] drives the full pipeline: parse into an AST, walk it against
//! a [`ValueSource`], and format the result. Cell contents resolve
//! differently by position: inside a function argument, blank and
//! non-numeric cells fold to 0, while a bare arithmetic reference to
//! non-numeric text fails the whole formula.

use crate::builtins::Builtin;

use super::error::FormulaError;
use super::format::format_number;
use super::parser::{self, Expr, Op};

/// Maximum number of cells a single range argument may cover.
const MAX_RANGE_CELLS: usize = 1_000_000;

/// Read access to current cell values, keyed by zero-based coordinates.
///
/// The document layer backs this with its display values; tests can pass a
/// closure.
pub trait ValueSource {
    /// The current textual value at (row, col), or `None` when the
    /// coordinate holds nothing the caller can resolve.
    fn get(&self, row: usize, col: usize) -> Option<String>;
}

impl<F> ValueSource for F
where
    F: Fn(usize, usize) -> Option<String>,
{
    fn get(&self, row: usize, col: usize) -> Option<String> {
        self(row, col)
    }
}

/// Evaluate a formula body (leading `=` already stripped by the caller) and
/// format the result for display.
pub fn evaluate(formula: &str, source: &dyn ValueSource) -> Result<String, FormulaError> {
    let expr = parser::parse(formula)?;
    let n = eval_scalar(&expr, source)?;
    if !n.is_finite() {
        return Err(FormulaError::DivisionByZero);
    }
    Ok(format_number(n))
}

/// A resolved function-argument position.
enum ArgValue {
    Number(f64),
    Text,
    Blank,
}

impl ArgValue {
    /// Blank and text positions fold to 0 for the numeric aggregates.
    fn as_number(&self) -> f64 {
        match self {
            ArgValue::Number(n) => *n,
            ArgValue::Text | ArgValue::Blank => 0.0,
        }
    }
}

fn classify(text: Option<String>) -> ArgValue {
    match text {
        None => ArgValue::Blank,
        Some(s) => {
            let s = s.trim();
            if s.is_empty() {
                return ArgValue::Blank;
            }
            match s.parse::<f64>() {
                Ok(n) if n.is_finite() => ArgValue::Number(n),
                _ => ArgValue::Text,
            }
        }
    }
}

fn eval_scalar(expr: &Expr, source: &dyn ValueSource) -> Result<f64, FormulaError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Ref(at) => match classify(source.get(at.row, at.col)) {
            ArgValue::Number(n) => Ok(n),
            ArgValue::Blank => Ok(0.0),
            // Substituting non-numeric text into an arithmetic expression
            // cannot produce a number.
            ArgValue::Text => Err(FormulaError::InvalidFormula),
        },
        // A range is only meaningful as a function argument.
        Expr::Range(..) => Err(FormulaError::InvalidFormula),
        Expr::Neg(inner) => Ok(-eval_scalar(inner, source)?),
        Expr::Binary { op, lhs, rhs } => {
            let l = eval_scalar(lhs, source)?;
            let r = eval_scalar(rhs, source)?;
            Ok(match op {
                Op::Add => l + r,
                Op::Sub => l - r,
                Op::Mul => l * r,
                Op::Div => l / r,
            })
        }
        Expr::Call { func, args, tail } => apply(*func, args, tail.as_deref(), source),
    }
}

/// Resolve one argument expression into classified value positions.
///
/// Ranges contribute one position per cell of their direction-normalized
/// bounding box; a direct reference contributes its classified content; any
/// other expression contributes its scalar result.
fn resolve_arg(
    arg: &Expr,
    values: &mut Vec<ArgValue>,
    source: &dyn ValueSource,
) -> Result<(), FormulaError> {
    match arg {
        Expr::Range(start, end) => {
            let row_lo = start.row.min(end.row);
            let row_hi = start.row.max(end.row);
            let col_lo = start.col.min(end.col);
            let col_hi = start.col.max(end.col);

            let cell_count = (row_hi - row_lo + 1).checked_mul(col_hi - col_lo + 1);
            match cell_count {
                Some(n) if n <= MAX_RANGE_CELLS => {}
                _ => return Err(FormulaError::InvalidRange(format!("{start}:{end}"))),
            }

            for row in row_lo..=row_hi {
                for col in col_lo..=col_hi {
                    values.push(classify(source.get(row, col)));
                }
            }
            Ok(())
        }
        Expr::Ref(at) => {
            values.push(classify(source.get(at.row, at.col)));
            Ok(())
        }
        other => {
            values.push(ArgValue::Number(eval_scalar(other, source)?));
            Ok(())
        }
    }
}

fn apply(
    func: Builtin,
    args: &[Expr],
    tail: Option<&Expr>,
    source: &dyn ValueSource,
) -> Result<f64, FormulaError> {
    let mut values = Vec::new();
    for arg in args {
        resolve_arg(arg, &mut values, source)?;
    }

    // ROUND consumes the trailing segment as its decimal count; for every
    // other function a present segment is one more argument value.
    if func == Builtin::Round {
        let value = values.first().map(ArgValue::as_number).unwrap_or(0.0);
        let digits = match tail {
            Some(expr) => eval_scalar(expr, source).map(|n| n as i32).unwrap_or(0),
            None => 0,
        };
        let scale = 10f64.powi(digits);
        return Ok((value * scale).round() / scale);
    }
    if let Some(expr) = tail {
        resolve_arg(expr, &mut values, source)?;
    }

    let numbers = || values.iter().map(ArgValue::as_number);

    Ok(match func {
        Builtin::Sum => numbers().sum(),
        Builtin::Product => {
            if values.is_empty() {
                0.0
            } else {
                numbers().product()
            }
        }
        Builtin::Average => {
            if values.is_empty() {
                0.0
            } else {
                numbers().sum::<f64>() / values.len() as f64
            }
        }
        Builtin::Min => {
            if values.is_empty() {
                0.0
            } else {
                numbers().fold(f64::INFINITY, f64::min)
            }
        }
        Builtin::Max => {
            if values.is_empty() {
                0.0
            } else {
                numbers().fold(f64::NEG_INFINITY, f64::max)
            }
        }
        Builtin::Count => values
            .iter()
            .filter(|v| matches!(v, ArgValue::Number(_)))
            .count() as f64,
        Builtin::Abs => values.first().map(ArgValue::as_number).unwrap_or(0.0).abs(),
        Builtin::Round => unreachable!("handled above"),
    })
}
