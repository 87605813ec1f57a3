//! Invoice status commands: close the open period, settle the open invoice.

use std::io::Write;

use anyhow::Result;
use wl_core::Ledger;

/// Appends an invoiced marker closing the open period.
pub fn run_mark_invoiced<W: Write>(writer: &mut W, ledger: &mut Ledger) -> Result<()> {
    if ledger.mark_last_period_as_invoiced()? {
        writeln!(writer, "Marked last period as invoiced.")?;
    } else {
        writeln!(writer, "An open invoice already exists.")?;
    }
    Ok(())
}

/// Rewrites the open invoice marker as paid.
pub fn run_mark_paid<W: Write>(writer: &mut W, ledger: &mut Ledger) -> Result<()> {
    if ledger.mark_invoice_as_paid()? {
        writeln!(writer, "Marked invoice as paid.")?;
    } else {
        writeln!(writer, "No open invoice to mark as paid.")?;
    }
    Ok(())
}
