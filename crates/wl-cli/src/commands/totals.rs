//! Totals command for the three headline figures.

use std::io::Write;

use anyhow::Result;
use wl_core::Ledger;

pub fn run<W: Write>(writer: &mut W, ledger: &Ledger) -> Result<()> {
    let totals = ledger.totals();
    let rendered = totals.to_string();
    if rendered.is_empty() {
        writeln!(writer, "Nothing outstanding.")?;
    } else {
        writeln!(writer, "{rendered}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    #[test]
    fn totals_command_prints_each_figure() {
        let temp = tempfile::tempdir().unwrap();
        let log_path = temp.path().join("work.log");
        std::fs::write(
            &log_path,
            "2024.01.01\n9:00\n12:00\nPAID\n2024.01.02\n10:00\n12:00\nINVOICED\n2024.01.03\n10:00\n11:00\n",
        )
        .unwrap();
        let ledger = Ledger::open(&log_path).unwrap();

        let mut output = Vec::new();
        run(&mut output, &ledger).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        3.0 hours since last payment (from 2024.01.02 to 2024.01.03)
        2.0 hours awaiting payment (from 2024.01.02 to 2024.01.02)
        1.0 hours not yet invoiced (from 2024.01.03 to 2024.01.03)
        ");
    }

    #[test]
    fn settled_log_prints_placeholder() {
        let temp = tempfile::tempdir().unwrap();
        let log_path = temp.path().join("work.log");
        std::fs::write(&log_path, "2024.01.01\n9:00\n12:00\nPAID\n").unwrap();
        let ledger = Ledger::open(&log_path).unwrap();

        let mut output = Vec::new();
        run(&mut output, &ledger).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "Nothing outstanding.\n");
    }
}
