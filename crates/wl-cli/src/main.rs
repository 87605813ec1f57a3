use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wl_cli::commands::{add, intervals, invoice, periods, totals};
use wl_cli::{Cli, Commands, Config};
use wl_core::Ledger;

/// Resolve the log path from the CLI override or the configuration,
/// ensuring the parent directory exists, and open the ledger.
fn open_ledger(cli: &Cli) -> Result<Ledger> {
    let log_path: PathBuf = match &cli.file {
        Some(path) => path.clone(),
        None => {
            let config = Config::load_from(cli.config.as_deref())
                .context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");
            config.log_path
        }
    };

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create log directory")?;
    }

    Ledger::open(&log_path).with_context(|| format!("failed to open {}", log_path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Totals) => {
            let ledger = open_ledger(&cli)?;
            totals::run(&mut stdout, &ledger)?;
        }
        Some(Commands::Periods { json }) => {
            let ledger = open_ledger(&cli)?;
            periods::run(&mut stdout, &ledger, *json)?;
        }
        Some(Commands::Intervals) => {
            let ledger = open_ledger(&cli)?;
            intervals::run(&mut stdout, &ledger)?;
        }
        Some(Commands::Add {
            date,
            start,
            end,
            note,
        }) => {
            let mut ledger = open_ledger(&cli)?;
            add::run(&mut stdout, &mut ledger, date.as_deref(), start, end, note)?;
        }
        Some(Commands::Invoiced) => {
            let mut ledger = open_ledger(&cli)?;
            invoice::run_mark_invoiced(&mut stdout, &mut ledger)?;
        }
        Some(Commands::Paid) => {
            let mut ledger = open_ledger(&cli)?;
            invoice::run_mark_paid(&mut stdout, &mut ledger)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
