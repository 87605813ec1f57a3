//! The engine facade: queries plus persisted line-level mutations.
//!
//! Every read recomputes derived structure from the current lines; no
//! parse result survives a mutation. Every mutation re-resolves the
//! indices it needs from a fresh parse, edits the line sequence, and
//! persists through [`LogDocument::save`] before returning. Missing
//! targets are reported as `Ok(false)`, never as errors; only an
//! unwritable destination fails.

use std::path::PathBuf;

use crate::document::{LedgerError, LogDocument};
use crate::interval::{self, RawInterval};
use crate::period::{self, Period};
use crate::scan::{self, INVOICED, PAID};
use crate::totals::{self, Totals};

/// One open work log.
///
/// Assumes exclusive ownership of the file for its lifetime; concurrent
/// writers are last-writer-wins. Hosts wrapping this in threads must
/// serialize all calls to one instance.
#[derive(Debug)]
pub struct Ledger {
    doc: LogDocument,
}

impl Ledger {
    /// Opens the log at `path`, starting empty if the file is absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        Ok(Self {
            doc: LogDocument::open(path)?,
        })
    }

    /// The underlying document.
    pub const fn document(&self) -> &LogDocument {
        &self.doc
    }

    /// All lines, in file order.
    pub fn lines(&self) -> &[String] {
        self.doc.lines()
    }

    /// Extracts raw intervals from the current lines.
    pub fn intervals(&self) -> Vec<RawInterval> {
        interval::extract_intervals(self.doc.lines())
    }

    /// One formatted listing line per interval, with a separator between
    /// blank-separated intervals of the same date.
    pub fn intervals_with_statuses(&self) -> Vec<String> {
        interval::list_with_statuses(&self.intervals())
    }

    /// Groups the current lines into periods.
    pub fn periods(&self) -> Vec<Period> {
        period::aggregate_periods(self.doc.lines())
    }

    /// Derives the three headline totals.
    pub fn totals(&self) -> Totals {
        totals::compute_totals(self.doc.lines())
    }

    /// Replaces one line verbatim. False if the index is out of range.
    pub fn update_line(&mut self, index: usize, text: impl Into<String>) -> Result<bool, LedgerError> {
        if index >= self.doc.len() {
            return Ok(false);
        }
        self.doc.set(index, text.into());
        tracing::debug!(index, "updated line");
        self.doc.save()?;
        Ok(true)
    }

    /// Inserts a new line after `index`, shifting every later index by
    /// one. Callers holding indices must re-query after this returns.
    pub fn insert_line_after(&mut self, index: usize, text: impl Into<String>) -> Result<bool, LedgerError> {
        if index >= self.doc.len() {
            return Ok(false);
        }
        self.doc.insert(index + 1, text.into());
        tracing::debug!(index, "inserted line");
        self.doc.save()?;
        Ok(true)
    }

    /// Inserts a date literal and a trailing blank line after `index`,
    /// opening a fresh date block.
    pub fn insert_date_after(&mut self, index: usize, date: impl Into<String>) -> Result<bool, LedgerError> {
        if index >= self.doc.len() {
            return Ok(false);
        }
        self.doc.insert(index + 1, date.into());
        self.doc.insert(index + 2, String::new());
        tracing::debug!(index, "inserted date block");
        self.doc.save()?;
        Ok(true)
    }

    /// Removes an inclusive range of lines. False if the range is empty
    /// or reaches past the end.
    pub fn delete_lines(&mut self, start: usize, end: usize) -> Result<bool, LedgerError> {
        if start > end || end >= self.doc.len() {
            return Ok(false);
        }
        self.doc.remove_range(start, end);
        tracing::debug!(start, end, "deleted lines");
        self.doc.save()?;
        Ok(true)
    }

    /// Rewrites a status line's content wholesale.
    pub fn change_status(&mut self, index: usize, status: impl Into<String>) -> Result<bool, LedgerError> {
        self.update_line(index, status)
    }

    /// Index of the last line carrying the paid marker.
    fn last_paid_index(&self) -> Option<usize> {
        self.doc.lines().iter().rposition(|line| line.contains(PAID))
    }

    /// Index of the first line carrying the invoiced marker after the
    /// last paid marker.
    fn open_invoice_index(&self) -> Option<usize> {
        let from = self.last_paid_index().map_or(0, |idx| idx + 1);
        self.doc.lines()[from..]
            .iter()
            .position(|line| line.contains(INVOICED))
            .map(|offset| from + offset)
    }

    /// Rewrites the open invoice marker as paid, substituting only the
    /// marker substring so trailing annotation on the line survives.
    /// False when no invoice is open.
    pub fn mark_invoice_as_paid(&mut self) -> Result<bool, LedgerError> {
        let Some(index) = self.open_invoice_index() else {
            return Ok(false);
        };
        let rewritten = self.doc.lines()[index].replace(INVOICED, PAID);
        self.doc.set(index, rewritten);
        tracing::debug!(index, "marked invoice as paid");
        self.doc.save()?;
        Ok(true)
    }

    /// Appends an invoiced marker line at end of file, closing the open
    /// period. False when an invoice is already open.
    pub fn mark_last_period_as_invoiced(&mut self) -> Result<bool, LedgerError> {
        if self.open_invoice_index().is_some() {
            return Ok(false);
        }
        self.doc.push(INVOICED.to_string());
        tracing::debug!("marked last period as invoiced");
        self.doc.save()?;
        Ok(true)
    }

    /// Appends a timed entry under `date`, opening a new date block when
    /// the last line is not already that date literal.
    pub fn add_entry(&mut self, date: &str, start: &str, end: &str, note: &str) -> Result<(), LedgerError> {
        if self.doc.lines().last().map(String::as_str) != Some(date) {
            self.doc.push(date.to_string());
            self.doc.push(String::new());
        }
        self.doc.push(format!("{start} {note}").trim().to_string());
        self.doc.push(end.to_string());
        tracing::debug!(date, start, end, "added entry");
        self.doc.save()
    }

    /// Inserts a one-line invoice summary (`start-end hours INVOICED`)
    /// immediately after the last line of the period at `period_index`
    /// (position within [`Self::periods`]). False if no such period.
    pub fn add_invoice_for_period(&mut self, period_index: usize) -> Result<bool, LedgerError> {
        let periods = self.periods();
        let Some(period) = periods.get(period_index) else {
            return Ok(false);
        };
        let start = period.start_date.as_deref().unwrap_or("");
        let end = period.end_date.as_deref().unwrap_or("");
        let summary = format!("{start}-{end} {:.1} {INVOICED}", period.total_hours);
        self.doc.insert(period.end_line + 1, summary);
        tracing::debug!(period_index, "added invoice summary");
        self.doc.save()?;
        Ok(true)
    }

    /// Closes a custom date range with an invoiced marker, inserted after
    /// the last non-blank line of `end_date`'s block. Both literals must
    /// already exist as date lines and `start_date` must not come later
    /// than `end_date` in file order; otherwise nothing changes.
    pub fn add_custom_period(&mut self, start_date: &str, end_date: &str) -> Result<bool, LedgerError> {
        let date_lines: Vec<usize> = self
            .doc
            .lines()
            .iter()
            .enumerate()
            .filter(|(_, line)| scan::is_date(line))
            .map(|(idx, _)| idx)
            .collect();
        let Some(start_idx) = date_lines
            .iter()
            .copied()
            .find(|&idx| self.doc.lines()[idx] == start_date)
        else {
            return Ok(false);
        };
        let Some(end_idx) = date_lines
            .iter()
            .copied()
            .find(|&idx| self.doc.lines()[idx] == end_date)
        else {
            return Ok(false);
        };
        if start_idx > end_idx {
            return Ok(false);
        }

        // Block of end_date runs until the next date or status line
        let boundary = ((end_idx + 1)..self.doc.len())
            .find(|&idx| {
                let line = &self.doc.lines()[idx];
                scan::is_date(line) || scan::is_status(line)
            })
            .unwrap_or(self.doc.len());
        let insert_at = (end_idx..boundary)
            .rev()
            .find(|&idx| !scan::is_blank(&self.doc.lines()[idx]))
            .map_or(boundary, |idx| idx + 1);
        self.doc.insert(insert_at, INVOICED.to_string());
        tracing::debug!(start_date, end_date, insert_at, "added custom period");
        self.doc.save()?;
        Ok(true)
    }
}
