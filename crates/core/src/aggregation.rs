//! Yearly aggregation over installment rows: scalar totals, the
//! per-year chart series, period/property/status filtering, and the
//! deterministic detail-listing order.
//!
//! Sums are fail-open: a missing or non-finite amount counts as zero so
//! one bad row never breaks the dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::PaymentStatus;

/// The fields of an installment the aggregation layer needs. Built from
/// a joined `spese` row by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRow {
    pub immobile: String,
    pub esercizio: i32,
    pub importo: Option<f64>,
    pub stato: PaymentStatus,
    pub scadenza: NaiveDate,
    pub numero_rata: i32,
}

/// Dashboard period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    #[default]
    LastThreeYears,
    All,
}

/// Dashboard filter set. `None` means "all".
#[derive(Debug, Clone, Default)]
pub struct SummaryFilter {
    pub period: Period,
    pub immobile: Option<String>,
    pub stato: Option<PaymentStatus>,
}

/// The three scalar sums shown as dashboard metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub pagato: f64,
    pub da_pagare: f64,
    pub totale: f64,
}

/// One bar of the per-year chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTotal {
    pub esercizio: i32,
    pub importo: f64,
}

/// The `n` largest distinct fiscal years present, sorted ascending.
/// Fewer than `n` distinct years -> all of them. No data at all ->
/// `[current-2, current-1, current]` so the chart axis stays sensible.
pub fn last_n_years(years_present: &[i32], n: usize, current_year: i32) -> Vec<i32> {
    let mut years: Vec<i32> = years_present.to_vec();
    years.sort_unstable();
    years.dedup();

    if years.is_empty() {
        return vec![current_year - 2, current_year - 1, current_year];
    }
    if years.len() > n {
        years.split_off(years.len() - n)
    } else {
        years
    }
}

fn coerce(amount: Option<f64>) -> f64 {
    match amount {
        Some(x) if x.is_finite() => x,
        _ => 0.0,
    }
}

/// Keep only rows matching the filter, resolving the last-three-years
/// period against the years actually present in `rows`.
pub fn filter_rows(rows: &[ExpenseRow], filter: &SummaryFilter, current_year: i32) -> Vec<ExpenseRow> {
    let year_window = match filter.period {
        Period::LastThreeYears => {
            let years: Vec<i32> = rows.iter().map(|r| r.esercizio).collect();
            Some(last_n_years(&years, 3, current_year))
        }
        Period::All => None,
    };

    rows.iter()
        .filter(|r| match &year_window {
            Some(window) => window.contains(&r.esercizio),
            None => true,
        })
        .filter(|r| match &filter.immobile {
            Some(immobile) => r.immobile == *immobile,
            None => true,
        })
        .filter(|r| match filter.stato {
            Some(stato) => r.stato == stato,
            None => true,
        })
        .cloned()
        .collect()
}

/// Compute the paid / unpaid / grand totals over a (filtered) set.
pub fn totals(rows: &[ExpenseRow]) -> Totals {
    let mut pagato = 0.0;
    let mut da_pagare = 0.0;
    for row in rows {
        match row.stato {
            PaymentStatus::Paid => pagato += coerce(row.importo),
            PaymentStatus::Unpaid => da_pagare += coerce(row.importo),
        }
    }
    Totals {
        pagato,
        da_pagare,
        totale: pagato + da_pagare,
    }
}

/// Per-fiscal-year amount sums, sorted ascending by year. Drives the
/// dashboard bar chart.
pub fn yearly_series(rows: &[ExpenseRow]) -> Vec<YearTotal> {
    let mut series: Vec<YearTotal> = Vec::new();
    for row in rows {
        match series.iter_mut().find(|y| y.esercizio == row.esercizio) {
            Some(bucket) => bucket.importo += coerce(row.importo),
            None => series.push(YearTotal {
                esercizio: row.esercizio,
                importo: coerce(row.importo),
            }),
        }
    }
    series.sort_by_key(|y| y.esercizio);
    series
}

/// Detail-listing order: due date, then property name, then fiscal
/// year, then installment index. The SQL `ORDER BY` in
/// `SpesaRepo::list_detail` must match this exactly.
pub fn sort_detail(rows: &mut [ExpenseRow]) {
    rows.sort_by(|a, b| {
        a.scadenza
            .cmp(&b.scadenza)
            .then_with(|| a.immobile.cmp(&b.immobile))
            .then_with(|| a.esercizio.cmp(&b.esercizio))
            .then_with(|| a.numero_rata.cmp(&b.numero_rata))
    });
}
