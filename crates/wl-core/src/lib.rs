//! Ledger engine for a human-edited, line-oriented work-log format.
//!
//! The format records dated intervals of work, free-text notes, and
//! billing-status markers. This crate derives structured accounting
//! facts from line scanning and supports surgical, immediately persisted
//! edits that leave every untouched line byte-identical:
//! - Document: load/save with newline-convention fidelity
//! - Scan: per-line classification (dates, times, markers, blanks)
//! - Intervals: contiguous time runs with line spans and statuses
//! - Periods: date blocks grouped between status markers
//! - Totals: paid/invoiced/uninvoiced headline figures
//!
//! Derived structures are transient: every query recomputes them from
//! the current lines, so indices always reflect the latest edits.

pub mod document;
pub mod interval;
pub mod ledger;
pub mod period;
pub mod scan;
pub mod totals;

pub use document::{LedgerError, LogDocument, Newline};
pub use interval::{IntervalSum, RawInterval, compute_interval, extract_intervals};
pub use ledger::Ledger;
pub use period::{DateEntry, Period, aggregate_periods};
pub use scan::{INVOICED, PAID, Status};
pub use totals::{Totals, TotalsLine, compute_totals};
