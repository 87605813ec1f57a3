//! Period aggregation.
//!
//! A second scan over the same lines groups date blocks between
//! successive status markers into [`Period`]s, attaching per-date note
//! lists and computed hour totals. Like intervals, periods are derived
//! and transient: recomputed on every query, never cached across a
//! mutation.

use serde::Serialize;

use crate::interval::{RawInterval, extract_intervals, round_half_hours};
use crate::scan::{self, Status};

/// One day's notes and computed hours within a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateEntry {
    /// The date literal line opening the block.
    pub date: String,
    /// Worked hours for this date, rounded to the nearest half hour for
    /// display. Period totals are not built from this figure.
    pub hours: f64,
    /// Free-text lines of the block, with edge blanks stripped and
    /// internal blank runs collapsed to a single empty-string separator.
    /// Time-bearing lines belong to intervals and are not repeated here.
    pub notes: Vec<String>,
    /// Index of the date literal line.
    pub start_line: usize,
    /// Index of the last line of the block.
    pub end_line: usize,
}

/// All date blocks between two status markers (or file boundaries).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Period {
    /// Full text of the closing marker line; `None` means still open,
    /// which callers report as unpaid.
    pub status: Option<String>,
    /// Date literal of the first date block, if any.
    pub start_date: Option<String>,
    /// Date literal of the last date block, if any.
    pub end_date: Option<String>,
    /// Index of the first line after the previous marker (or file start).
    pub start_line: usize,
    /// Index of the closing marker line, or of the last file line for a
    /// trailing open period.
    pub end_line: usize,
    /// Worked hours, rounded once from the summed raw minutes of every
    /// date block. Not generally equal to the sum of the per-date
    /// `hours` figures, which are rounded independently.
    pub total_hours: f64,
    /// Date blocks in file order.
    pub dates: Vec<DateEntry>,
}

impl Period {
    /// Billing status resolved from the marker line.
    pub fn status_label(&self) -> Status {
        Status::of(self.status.as_deref())
    }
}

/// A date block still being accumulated by the aggregator.
#[derive(Debug)]
struct OpenDate {
    date: String,
    start_line: usize,
    raw: Vec<String>,
}

impl OpenDate {
    /// Closes the block at `end_line`, computing its hours from the
    /// intervals whose runs fall inside the block's line span. Returns
    /// the entry plus the unrounded minute total for the period sum.
    fn close(self, end_line: usize, intervals: &[RawInterval]) -> (DateEntry, f64) {
        let minutes: f64 = intervals
            .iter()
            .filter(|iv| iv.date.as_deref() == Some(self.date.as_str()))
            .filter(|iv| iv.start_line >= self.start_line && iv.start_line <= end_line)
            .filter_map(RawInterval::minutes)
            .sum();
        let entry = DateEntry {
            date: self.date,
            hours: round_half_hours(minutes),
            notes: collapse_notes(&self.raw),
            start_line: self.start_line,
            end_line,
        };
        (entry, minutes)
    }
}

/// Drops leading and trailing blank note lines and replaces any internal
/// run of blanks with a single empty-string separator.
fn collapse_notes(raw: &[String]) -> Vec<String> {
    let mut notes: Vec<String> = Vec::new();
    let mut pending_blank = false;
    for line in raw {
        if scan::is_blank(line) {
            pending_blank = !notes.is_empty();
        } else {
            if pending_blank {
                notes.push(String::new());
                pending_blank = false;
            }
            notes.push(line.clone());
        }
    }
    notes
}

fn build_period(
    status: Option<String>,
    start_line: usize,
    end_line: usize,
    dates: Vec<DateEntry>,
    minutes: f64,
) -> Period {
    Period {
        status,
        start_date: dates.first().map(|d| d.date.clone()),
        end_date: dates.last().map(|d| d.date.clone()),
        start_line,
        end_line,
        total_hours: round_half_hours(minutes),
        dates,
    }
}

/// Groups date blocks into periods delimited by status marker lines.
///
/// A marker closes the current period inclusive of the marker line; the
/// next period begins on the following line. A trailing run without a
/// marker is still returned, with `status: None`. Notes exclude
/// time-bearing lines, which are represented by intervals instead.
pub fn aggregate_periods(lines: &[String]) -> Vec<Period> {
    let intervals = extract_intervals(lines);
    let mut periods: Vec<Period> = Vec::new();
    let mut dates: Vec<DateEntry> = Vec::new();
    let mut period_minutes = 0.0;
    let mut period_start = 0usize;
    let mut open: Option<OpenDate> = None;

    for (idx, line) in lines.iter().enumerate() {
        if scan::is_status(line) {
            if let Some(block) = open.take() {
                let (entry, minutes) = block.close(idx.saturating_sub(1), &intervals);
                period_minutes += minutes;
                dates.push(entry);
            }
            periods.push(build_period(
                Some(line.trim().to_string()),
                period_start,
                idx,
                std::mem::take(&mut dates),
                period_minutes,
            ));
            period_minutes = 0.0;
            period_start = idx + 1;
        } else if scan::is_date(line) {
            if let Some(block) = open.take() {
                let (entry, minutes) = block.close(idx.saturating_sub(1), &intervals);
                period_minutes += minutes;
                dates.push(entry);
            }
            open = Some(OpenDate {
                date: line.clone(),
                start_line: idx,
                raw: Vec::new(),
            });
        } else if let Some(block) = open.as_mut() {
            if !scan::contains_time(line) {
                block.raw.push(line.clone());
            }
        }
    }

    if let Some(block) = open.take() {
        let (entry, minutes) = block.close(lines.len().saturating_sub(1), &intervals);
        period_minutes += minutes;
        dates.push(entry);
    }
    if !dates.is_empty() {
        periods.push(build_period(
            None,
            period_start,
            lines.len().saturating_sub(1),
            dates,
            period_minutes,
        ));
    }
    periods
}
