//! Display derivation rules: overdue state, three-way status
//! classification, installment labels, and euro formatting.
//!
//! These functions are consumed per-row during rendering, so they fail
//! open on bad input (malformed date -> not overdue, bad amount ->
//! zero) instead of aborting a whole page. Mutation paths do NOT share
//! this behaviour; they validate strictly (see [`crate::registration`]).

use chrono::NaiveDate;

use crate::types::PaymentStatus;

/// Fail-open ISO date parse for display derivation. Returns `None` on
/// malformed input, never errors.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// An installment is overdue iff its due date is strictly before today.
/// A missing (unparseable) due date counts as not overdue.
pub fn is_overdue(due_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    match due_date {
        Some(due) => due < today,
        None => false,
    }
}

/// Three-way derived payment state. Never stored; always recomputed
/// from the stored status plus the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Paid,
    OverdueUnpaid,
    PendingUnpaid,
}

impl Classification {
    /// CSS badge class used by the dashboard UI.
    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Paid => "sb-green",
            Self::OverdueUnpaid => "sb-red",
            Self::PendingUnpaid => "sb-yellow",
        }
    }

    /// Lowercase status phrase shown next to the badge. Kept on the
    /// same type as [`Classification::badge_class`] so the two
    /// presentations can never disagree.
    pub fn label(self) -> &'static str {
        match self {
            Self::Paid => "pagato",
            Self::OverdueUnpaid => "da pagare (scaduto)",
            Self::PendingUnpaid => "da pagare",
        }
    }
}

/// Classify an installment given its stored status and due date.
pub fn classify(
    status: PaymentStatus,
    due_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Classification {
    match status {
        PaymentStatus::Paid => Classification::Paid,
        PaymentStatus::Unpaid if is_overdue(due_date, today) => Classification::OverdueUnpaid,
        PaymentStatus::Unpaid => Classification::PendingUnpaid,
    }
}

/// Format the "index/total" installment label. A stored total below 1
/// is clamped to 1; callers apply the stored-null fallback of 1 before
/// calling.
pub fn installment_label(index: i32, total: i32) -> String {
    format!("{}/{}", index, total.max(1))
}

/// Fixed-format euro display: `€ 1,234.56`. Fails open to `€ 0,00` on
/// a missing or non-finite amount.
pub fn euro(amount: Option<f64>) -> String {
    match amount {
        Some(x) if x.is_finite() => format!("€ {}", group_thousands(x)),
        _ => "€ 0,00".to_string(),
    }
}

fn group_thousands(x: f64) -> String {
    let negative = x < 0.0;
    let cents = (x.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac:02}")
}
