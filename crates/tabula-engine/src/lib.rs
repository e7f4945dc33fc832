//! tabula-engine - grid-agnostic formula engine.
//!
//! Parses and evaluates a single formula against a caller-supplied
//! [`engine::ValueSource`], and extracts the cell references a formula
//! mentions. Grid ownership, recomputation order, and cycle flagging live in
//! `tabula-core`.

pub mod builtins;
pub mod engine;
