//! Headline totals derived from the position of the last status markers.
//!
//! Three figures: everything worked since the last paid marker, the slice
//! of that already invoiced, and the remainder not yet on any invoice.
//! Each figure is independently optional; see [`compute_totals`].

use std::fmt;

use serde::Serialize;

use crate::interval::{compute_interval, round_half_hours};
use crate::scan::{INVOICED, PAID};

/// One headline figure: rounded hours plus its date bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalsLine {
    pub hours: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TotalsLine {
    fn new(minutes: f64, start_date: Option<String>, end_date: Option<String>) -> Self {
        Self {
            hours: round_half_hours(minutes),
            start_date,
            end_date,
        }
    }

    fn bounds(&self) -> (&str, &str) {
        (
            self.start_date.as_deref().unwrap_or("?"),
            self.end_date.as_deref().unwrap_or("?"),
        )
    }
}

/// The three headline figures for a log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    /// Hours worked since the last paid marker. Present when non-zero,
    /// or when zero but a date literal was seen in the range.
    pub since_paid: Option<TotalsLine>,
    /// Hours between the last paid marker and the following invoiced
    /// marker. Present only when an invoiced marker exists after the
    /// last paid one and the sum is non-zero.
    pub awaiting_payment: Option<TotalsLine>,
    /// Hours after the last marker of either kind, not yet invoiced.
    /// Present only when non-zero.
    pub uninvoiced: Option<TotalsLine>,
}

impl fmt::Display for Totals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut line = |f: &mut fmt::Formatter<'_>, text: String| {
            if first {
                first = false;
                write!(f, "{text}")
            } else {
                write!(f, "\n{text}")
            }
        };
        if let Some(total) = &self.since_paid {
            let (start, end) = total.bounds();
            line(
                f,
                format!("{:.1} hours since last payment (from {start} to {end})", total.hours),
            )?;
        }
        if let Some(total) = &self.awaiting_payment {
            let (start, end) = total.bounds();
            line(
                f,
                format!("{:.1} hours awaiting payment (from {start} to {end})", total.hours),
            )?;
        }
        if let Some(total) = &self.uninvoiced {
            let (start, end) = total.bounds();
            line(
                f,
                format!("{:.1} hours not yet invoiced (from {start} to {end})", total.hours),
            )?;
        }
        Ok(())
    }
}

/// Derives the three headline figures from the full line sequence.
///
/// The since-paid range starts after the last paid marker (or file
/// start); the awaiting-payment range ends at the first invoiced marker
/// inside it; the uninvoiced range starts after whichever marker comes
/// later. Zero-minute figures are suppressed, except since-paid, which
/// is still reported when its range contained a date literal.
pub fn compute_totals(lines: &[String]) -> Totals {
    let last_paid = lines.iter().rposition(|line| line.contains(PAID));
    let post_paid_from = last_paid.map_or(0, |idx| idx + 1);
    let post_paid = compute_interval(&lines[post_paid_from..]);

    let next_invoice = lines[post_paid_from..]
        .iter()
        .position(|line| line.contains(INVOICED))
        .map(|offset| post_paid_from + offset);

    let since_paid = (post_paid.minutes > 0.0 || post_paid.start_date.is_some()).then(|| {
        TotalsLine::new(
            post_paid.minutes,
            post_paid.start_date.clone(),
            post_paid.end_date.clone(),
        )
    });

    let awaiting_payment = next_invoice.and_then(|invoice_idx| {
        let invoiced = compute_interval(&lines[post_paid_from..invoice_idx]);
        (invoiced.minutes > 0.0).then(|| {
            // Bounds open at the first post-paid date, as the invoiced
            // slice is a prefix of the since-paid range.
            TotalsLine::new(invoiced.minutes, post_paid.start_date.clone(), invoiced.end_date)
        })
    });

    let uninvoiced_from = next_invoice.or(last_paid).map_or(0, |idx| idx + 1);
    let uninvoiced_sum = compute_interval(&lines[uninvoiced_from..]);
    let uninvoiced = (uninvoiced_sum.minutes > 0.0).then(|| {
        TotalsLine::new(
            uninvoiced_sum.minutes,
            uninvoiced_sum.start_date,
            uninvoiced_sum.end_date,
        )
    });

    Totals {
        since_paid,
        awaiting_payment,
        uninvoiced,
    }
}
