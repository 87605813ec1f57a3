//! Interval extraction and time arithmetic.
//!
//! One left-to-right scan groups contiguous time-bearing lines under the
//! most recent date literal into [`RawInterval`]s, tracking line spans so
//! the mutator can anchor edits. A second, simpler walk
//! ([`compute_interval`]) sums minutes over an arbitrary line slice and is
//! the workhorse of the totals calculator.

use chrono::NaiveTime;
use serde::Serialize;

use crate::scan::{self, Status};

/// Separator rendered between two blank-separated intervals of one date.
pub const REST_SEPARATOR: &str = "------------";

/// One contiguous run of time-bearing lines under a date literal.
///
/// Derived and transient: recomputed on every query, discarded after.
/// Only the first and last time tokens of the run matter for duration; a
/// run carrying four tokens yields one interval from token one to token
/// four, not two intervals. Downstream totals depend on this behavior, so
/// it is preserved deliberately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawInterval {
    /// The date literal line governing the run, if any was seen.
    pub date: Option<String>,
    /// First time token of the run.
    pub start: String,
    /// Last time token of the run.
    pub end: String,
    /// Index of the first time-bearing line of the run.
    pub start_line: usize,
    /// Index of the last line of the run.
    pub end_line: usize,
    /// Full text of the status marker line closing the surrounding
    /// period, or `None` for a still-open period.
    pub status: Option<String>,
    /// True when the run was closed by a blank line rather than a date,
    /// marker, or end of file.
    pub ends_with_blank: bool,
}

impl RawInterval {
    /// Duration in minutes, wrapping past midnight when the end time is
    /// earlier than the start time. `None` when a token does not parse as
    /// a clock time.
    pub fn minutes(&self) -> Option<f64> {
        minutes_between(&self.start, &self.end)
    }
}

/// Minute sum and date bounds over one slice of lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalSum {
    pub minutes: f64,
    /// First date literal seen in the slice.
    pub start_date: Option<String>,
    /// Last date literal seen in the slice.
    pub end_date: Option<String>,
}

/// Parses an `H:MM` token into a clock time.
///
/// The scan pattern admits tokens like `25:99` that are not clock times;
/// those are treated as malformed and ignored by callers.
fn parse_time(token: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(token, "%H:%M").ok()
}

/// Minutes from `start` to `end`, adding a day when the span crosses
/// midnight. Multi-day spans are not representable and wrap silently.
#[allow(clippy::cast_precision_loss)]
pub fn minutes_between(start: &str, end: &str) -> Option<f64> {
    let t1 = parse_time(start)?;
    let t2 = parse_time(end)?;
    let mut delta = (t2 - t1).num_minutes();
    if delta < 0 {
        delta += 24 * 60;
    }
    Some(delta as f64)
}

/// Rounds raw minutes to the nearest half hour, expressed in hours.
///
/// Ties round to even, so 45 minutes becomes 1.0 and 75 minutes 1.0 as
/// well. Applied once per figure; see [`crate::period`] for where the
/// single rounding step happens.
pub fn round_half_hours(minutes: f64) -> f64 {
    (minutes / 30.0).round_ties_even() / 2.0
}

/// Sums worked minutes over `lines` and reports the first and last date
/// literals seen.
///
/// Blocks are delimited by blank lines and date literals; within a block
/// every time token is collected but only the first and last contribute
/// to the duration.
pub fn compute_interval(lines: &[String]) -> IntervalSum {
    let mut minutes = 0.0;
    let mut start_date: Option<String> = None;
    let mut end_date: Option<String> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        if scan::is_date(line) {
            if start_date.is_none() {
                start_date = Some(line.clone());
            }
            end_date = Some(line.clone());
            i += 1;
            continue;
        }
        if scan::starts_with_time(line) {
            let mut tokens: Vec<&str> = Vec::new();
            while i < lines.len() && !lines[i].is_empty() && !scan::is_date(&lines[i]) {
                tokens.extend(scan::time_tokens(&lines[i]));
                i += 1;
            }
            if tokens.len() >= 2 {
                if let Some(delta) = minutes_between(tokens[0], tokens[tokens.len() - 1]) {
                    minutes += delta;
                }
            }
            continue;
        }
        i += 1;
    }

    IntervalSum {
        minutes,
        start_date,
        end_date,
    }
}

/// State of the run currently being accumulated by [`extract_intervals`].
#[derive(Debug, Default)]
struct OpenRun {
    start: Option<String>,
    end: Option<String>,
    start_line: usize,
}

impl OpenRun {
    fn close(&mut self, date: Option<&str>, end_line: usize, ends_with_blank: bool) -> Option<RawInterval> {
        let start = self.start.take()?;
        let end = self.end.take().unwrap_or_else(|| start.clone());
        Some(RawInterval {
            date: date.map(String::from),
            start,
            end,
            start_line: self.start_line,
            end_line,
            status: None,
            ends_with_blank,
        })
    }
}

/// Scans all lines once, producing one [`RawInterval`] per contiguous run
/// of time-bearing lines.
///
/// Intervals accumulated since the previous status marker are stamped
/// with the marker line's text when the marker is reached; a marker also
/// resets the current date, so the next period starts fresh. Intervals
/// still pending at end of file keep `status: None`.
pub fn extract_intervals(lines: &[String]) -> Vec<RawInterval> {
    let mut intervals: Vec<RawInterval> = Vec::new();
    let mut pending: Vec<RawInterval> = Vec::new();
    let mut current_date: Option<String> = None;
    let mut run = OpenRun::default();

    for (idx, line) in lines.iter().enumerate() {
        if scan::is_date(line) {
            if let Some(interval) = run.close(current_date.as_deref(), idx.saturating_sub(1), false) {
                pending.push(interval);
            }
            current_date = Some(line.clone());
        } else if scan::is_status(line) {
            if let Some(interval) = run.close(current_date.as_deref(), idx.saturating_sub(1), false) {
                pending.push(interval);
            }
            for mut interval in pending.drain(..) {
                interval.status = Some(line.trim().to_string());
                intervals.push(interval);
            }
            current_date = None;
        } else if scan::is_blank(line) {
            if let Some(interval) = run.close(current_date.as_deref(), idx.saturating_sub(1), true) {
                pending.push(interval);
            }
        } else if scan::contains_time(line) {
            let tokens = scan::time_tokens(line);
            if run.start.is_none() {
                run.start = tokens.first().map(|t| (*t).to_string());
                run.start_line = idx;
            }
            run.end = tokens.last().map(|t| (*t).to_string());
        }
    }
    if let Some(interval) = run.close(current_date.as_deref(), lines.len().saturating_sub(1), false) {
        pending.push(interval);
    }
    intervals.extend(pending);
    intervals
}

/// Formats one listing line per interval, with a separator between two
/// blank-separated intervals of the same date.
pub fn list_with_statuses(intervals: &[RawInterval]) -> Vec<String> {
    let mut result = Vec::with_capacity(intervals.len());
    for (idx, interval) in intervals.iter().enumerate() {
        let status = Status::of(interval.status.as_deref());
        let date = interval.date.as_deref().unwrap_or("");
        result.push(format!("{date} {} - {} {status}", interval.start, interval.end));
        if interval.ends_with_blank
            && intervals.get(idx + 1).is_some_and(|next| next.date == interval.date)
        {
            result.push(REST_SEPARATOR.to_string());
        }
    }
    result
}
