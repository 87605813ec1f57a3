//! Line classification for the work-log format.
//!
//! A log file is a flat sequence of lines; nothing here looks at more than
//! one line at a time. Structure (intervals, periods) is recovered by the
//! scans in [`crate::interval`] and [`crate::period`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Marker substring closing a period that has been paid out.
pub const PAID: &str = "PAID";

/// Marker substring closing a period that has been invoiced.
pub const INVOICED: &str = "INVOICED";

/// Pre-compiled pattern for a date literal at the start of a line.
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}\.\d{2}\.\d{2}").unwrap());

/// Pre-compiled pattern for a time literal anywhere in a line.
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").unwrap());

/// Returns true if the line starts with a `YYYY.MM.DD` date literal.
///
/// No calendar validation happens here: `2024.02.31` is a valid date
/// boundary for scanning purposes. Real-date checks belong to edit-time
/// validators in the callers.
pub fn is_date(line: &str) -> bool {
    DATE_RE.is_match(line)
}

/// Returns true if the line contains an `H:MM` time literal anywhere.
pub fn contains_time(line: &str) -> bool {
    TIME_RE.is_match(line)
}

/// Returns true if the line begins with a time literal.
pub fn starts_with_time(line: &str) -> bool {
    TIME_RE.find(line).is_some_and(|m| m.start() == 0)
}

/// Extracts every time token from the line, in order.
pub fn time_tokens(line: &str) -> Vec<&str> {
    TIME_RE.find_iter(line).map(|m| m.as_str()).collect()
}

/// Returns true if the line carries one of the two status markers.
///
/// Markers are matched as substrings, so trailing annotation on the same
/// line (e.g. `PAID 2024.03.01`) still counts as a marker line and the
/// annotation is preserved untouched.
pub fn is_status(line: &str) -> bool {
    line.contains(PAID) || line.contains(INVOICED)
}

/// Returns true if the line strips to the empty string.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Billing status of an interval or period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// The closing marker line contains the paid marker.
    Paid,
    /// The closing marker line contains the invoiced marker.
    Invoiced,
    /// No closing marker line exists yet.
    Unpaid,
}

impl Status {
    /// Classifies a marker line, or `None` for a still-open run of lines.
    ///
    /// The paid marker is checked first, mirroring the scan order used
    /// everywhere else in the engine.
    pub fn of(marker_line: Option<&str>) -> Self {
        match marker_line {
            Some(line) if line.contains(PAID) => Self::Paid,
            Some(line) if line.contains(INVOICED) => Self::Invoiced,
            _ => Self::Unpaid,
        }
    }

    /// Display label for listings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "PAID",
            Self::Invoiced => "INVOICED",
            Self::Unpaid => "UNPAID",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_literal_anchors_at_line_start() {
        assert!(is_date("2024.01.15"));
        assert!(is_date("2024.01.15 trailing text"));
        assert!(!is_date("on 2024.01.15"));
        assert!(!is_date("2024-01-15"));
        assert!(!is_date("202.01.15"));
    }

    #[test]
    fn impossible_calendar_dates_still_classify() {
        // Validity checks live in edit-time validators, not the scanner
        assert!(is_date("2024.02.31"));
        assert!(is_date("2024.99.99"));
    }

    #[test]
    fn time_literal_matches_anywhere() {
        assert!(contains_time("9:05"));
        assert!(contains_time("23:59"));
        assert!(contains_time("call at 14:30 with client"));
        assert!(!contains_time("no times here"));
    }

    #[test]
    fn leading_time_distinguished_from_embedded() {
        assert!(starts_with_time("9:05 standup"));
        assert!(!starts_with_time("lunch until 13:00"));
    }

    #[test]
    fn multiple_tokens_extracted_in_order() {
        assert_eq!(time_tokens("9:00 12:00 13:00 18:00"), vec!["9:00", "12:00", "13:00", "18:00"]);
        assert!(time_tokens("nothing").is_empty());
    }

    #[test]
    fn status_markers_allow_trailing_annotation() {
        assert!(is_status("PAID"));
        assert!(is_status("INVOICED #42"));
        assert!(is_status("PAID on 2024.03.01"));
        assert!(!is_status("paid"));
        assert!(!is_status("2024.01.01"));
    }

    #[test]
    fn status_of_marker_lines() {
        assert_eq!(Status::of(Some("PAID")), Status::Paid);
        assert_eq!(Status::of(Some("INVOICED #42")), Status::Invoiced);
        assert_eq!(Status::of(None), Status::Unpaid);
        assert_eq!(Status::of(Some("just a note")), Status::Unpaid);
    }

    #[test]
    fn blank_lines() {
        assert!(is_blank(""));
        assert!(is_blank("   \t"));
        assert!(!is_blank("x"));
    }
}
