//! Periods command listing billing periods with their date blocks.

use std::io::Write;

use anyhow::Result;
use wl_core::Ledger;

pub fn run<W: Write>(writer: &mut W, ledger: &Ledger, json: bool) -> Result<()> {
    let periods = ledger.periods();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&periods)?)?;
        return Ok(());
    }

    if periods.is_empty() {
        writeln!(writer, "No periods recorded.")?;
        return Ok(());
    }

    for period in &periods {
        let start = period.start_date.as_deref().unwrap_or("");
        let end = period.end_date.as_deref().unwrap_or("");
        let status = period
            .status
            .as_deref()
            .unwrap_or_else(|| period.status_label().as_str());
        writeln!(writer, "{start} - {end} {:.1} h {status}", period.total_hours)?;
        for entry in &period.dates {
            writeln!(writer, "  {} {:.1} h", entry.date, entry.hours)?;
            for note in &entry.notes {
                if note.is_empty() {
                    writeln!(writer, "    ------------")?;
                } else {
                    writeln!(writer, "    {note}")?;
                }
            }
        }
    }
    Ok(())
}
