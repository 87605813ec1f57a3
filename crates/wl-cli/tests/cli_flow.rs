//! End-to-end tests for the complete ledger flow.
//!
//! Drives the built binary: add entries → list → invoice → settle,
//! checking both stdout and the bytes left on disk.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn worklog_binary() -> String {
    env!("CARGO_BIN_EXE_worklog").to_string()
}

fn run_worklog(log: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(worklog_binary())
        .arg("--file")
        .arg(log)
        .args(args)
        .output()
        .expect("failed to run worklog");
    (
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
        output.status.success(),
    )
}

#[test]
fn test_add_invoice_paid_flow() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("work.log");

    let (_, stderr, ok) = run_worklog(
        &log,
        &["add", "--date", "2024.02.01", "--start", "09:00", "--end", "12:00", "--note", "call"],
    );
    assert!(ok, "add should succeed: {stderr}");
    assert_eq!(
        std::fs::read_to_string(&log).unwrap(),
        "2024.02.01\n\n09:00 call\n12:00"
    );

    let (stdout, _, ok) = run_worklog(&log, &["totals"]);
    assert!(ok);
    assert_eq!(
        stdout,
        "3.0 hours since last payment (from 2024.02.01 to 2024.02.01)\n\
         3.0 hours not yet invoiced (from 2024.02.01 to 2024.02.01)\n"
    );

    let (stdout, _, ok) = run_worklog(&log, &["invoiced"]);
    assert!(ok);
    assert_eq!(stdout, "Marked last period as invoiced.\n");

    // A second close is refused while the invoice is open
    let (stdout, _, ok) = run_worklog(&log, &["invoiced"]);
    assert!(ok);
    assert_eq!(stdout, "An open invoice already exists.\n");

    let (stdout, _, ok) = run_worklog(&log, &["paid"]);
    assert!(ok);
    assert_eq!(stdout, "Marked invoice as paid.\n");
    assert!(std::fs::read_to_string(&log).unwrap().ends_with("PAID"));

    let (stdout, _, ok) = run_worklog(&log, &["totals"]);
    assert!(ok);
    assert_eq!(stdout, "Nothing outstanding.\n");
}

#[test]
fn test_intervals_listing_matches_log() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("work.log");
    std::fs::write(
        &log,
        "2024.01.05\n\n09:00 First block\n10:00\n\n11:00 Second block\n12:00\n",
    )
    .unwrap();

    let (stdout, _, ok) = run_worklog(&log, &["intervals"]);
    assert!(ok);
    assert_eq!(
        stdout,
        "2024.01.05 09:00 - 10:00 UNPAID\n\
         ------------\n\
         2024.01.05 11:00 - 12:00 UNPAID\n"
    );
}

#[test]
fn test_periods_json_round_trips_through_serde() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("work.log");
    std::fs::write(&log, "2024.01.01\n\n09:00 Work A\n12:00\n\nPAID\n").unwrap();

    let (stdout, _, ok) = run_worklog(&log, &["periods", "--json"]);
    assert!(ok);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(1));
    assert_eq!(parsed[0]["status"], "PAID");
    assert_eq!(parsed[0]["dates"][0]["hours"], 3.0);
}

#[test]
fn test_invalid_add_arguments_fail_without_touching_the_log() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("work.log");

    let (_, stderr, ok) = run_worklog(
        &log,
        &["add", "--date", "2024.02.31", "--start", "09:00", "--end", "10:00"],
    );
    assert!(!ok);
    assert!(stderr.contains("invalid date"), "stderr was: {stderr}");
    assert!(!log.exists());
}

#[test]
fn test_missing_log_reads_as_empty() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("never-created.log");

    let (stdout, _, ok) = run_worklog(&log, &["periods"]);
    assert!(ok);
    assert_eq!(stdout, "No periods recorded.\n");

    let (stdout, _, ok) = run_worklog(&log, &["totals"]);
    assert!(ok);
    assert_eq!(stdout, "Nothing outstanding.\n");
}
