//! Add command appending a timed entry to the log.
//!
//! Date and time arguments are validated here, at edit time: the read
//! path accepts any literal matching the patterns, but new entries must
//! be real calendar dates and clock times.

use std::io::Write;

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime};
use wl_core::Ledger;

/// Validates a `YYYY.MM.DD` argument as a real calendar date.
fn validate_date(date: &str) -> Result<()> {
    NaiveDate::parse_from_str(date, "%Y.%m.%d")
        .map_err(|_| anyhow::anyhow!("invalid date: {date}. Expected YYYY.MM.DD"))?;
    if !wl_core::scan::is_date(date) {
        // Zero-padding matters: the scanner will not see e.g. 2024.1.5
        anyhow::bail!("invalid date: {date}. Expected YYYY.MM.DD");
    }
    Ok(())
}

/// Validates an `H:MM` argument as a real clock time.
fn validate_time(time: &str) -> Result<()> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| anyhow::anyhow!("invalid time: {time}. Expected H:MM"))?;
    if !wl_core::scan::starts_with_time(time) {
        anyhow::bail!("invalid time: {time}. Expected H:MM");
    }
    Ok(())
}

pub fn run<W: Write>(
    writer: &mut W,
    ledger: &mut Ledger,
    date: Option<&str>,
    start: &str,
    end: &str,
    note: &str,
) -> Result<()> {
    let date = date.map_or_else(
        || Local::now().format("%Y.%m.%d").to_string(),
        ToString::to_string,
    );
    validate_date(&date)?;
    validate_time(start)?;
    validate_time(end)?;

    ledger.add_entry(&date, start, end, note)?;
    writeln!(writer, "Added {date} {start} - {end}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_appends_entry_and_reports_it() {
        let temp = tempfile::tempdir().unwrap();
        let log_path = temp.path().join("work.log");
        let mut ledger = Ledger::open(&log_path).unwrap();

        let mut output = Vec::new();
        run(&mut output, &mut ledger, Some("2024.02.01"), "09:00", "10:00", "call").unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Added 2024.02.01 09:00 - 10:00\n"
        );
        assert_eq!(
            std::fs::read_to_string(&log_path).unwrap(),
            "2024.02.01\n\n09:00 call\n10:00"
        );
    }

    #[test]
    fn add_rejects_impossible_dates_and_times() {
        let temp = tempfile::tempdir().unwrap();
        let mut ledger = Ledger::open(temp.path().join("work.log")).unwrap();
        let mut output = Vec::new();

        assert!(run(&mut output, &mut ledger, Some("2024.02.31"), "09:00", "10:00", "").is_err());
        assert!(run(&mut output, &mut ledger, Some("2024-02-01"), "09:00", "10:00", "").is_err());
        assert!(run(&mut output, &mut ledger, Some("2024.02.01"), "25:00", "10:00", "").is_err());
        assert!(run(&mut output, &mut ledger, Some("2024.02.01"), "09:00", "9:99", "").is_err());
        assert!(ledger.lines().is_empty());
    }

    #[test]
    fn add_defaults_to_today() {
        let temp = tempfile::tempdir().unwrap();
        let log_path = temp.path().join("work.log");
        let mut ledger = Ledger::open(&log_path).unwrap();

        let mut output = Vec::new();
        run(&mut output, &mut ledger, None, "09:00", "10:00", "").unwrap();

        let today = Local::now().format("%Y.%m.%d").to_string();
        assert_eq!(ledger.lines()[0], today);
    }
}
