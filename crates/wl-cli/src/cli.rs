//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Work-log ledger.
///
/// Reads and edits a plain-text log of dated work intervals, notes, and
/// billing-status markers, deriving hours per date, per billing period,
/// and un-invoiced/un-paid remainders.
#[derive(Debug, Parser)]
#[command(name = "worklog", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the log file, overriding the configured location.
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show hours since last payment, awaiting payment, and not yet invoiced.
    Totals,

    /// List billing periods with their dates and hour totals.
    Periods {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List scanned work intervals with their billing status.
    Intervals,

    /// Append a timed entry to the log.
    Add {
        /// Date literal (YYYY.MM.DD); defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Start time (H:MM).
        #[arg(long)]
        start: String,

        /// End time (H:MM).
        #[arg(long)]
        end: String,

        /// Note text placed on the start line.
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Close the open period by appending an invoiced marker.
    Invoiced,

    /// Mark the open invoice as paid.
    Paid,
}
