//! Intervals command listing scanned work intervals with statuses.

use std::io::Write;

use anyhow::Result;
use wl_core::Ledger;

pub fn run<W: Write>(writer: &mut W, ledger: &Ledger) -> Result<()> {
    let listing = ledger.intervals_with_statuses();
    if listing.is_empty() {
        writeln!(writer, "No intervals recorded.")?;
        return Ok(());
    }
    for line in listing {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
