//! Expense installment (spesa) models.
//!
//! `stato` and `tipo_spesa` decode through `TryFrom<String>` into the
//! closed core enums, so a row carrying an unrecognized status fails at
//! the data-access boundary instead of reaching derivation logic.

use chrono::NaiveDate;
use condospese_core::types::{DbId, ExpenseCategory, PaymentStatus};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A raw row from the `spese` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Spesa {
    pub id: DbId,
    pub immobile_id: DbId,
    pub esercizio: i32,
    pub scadenza: NaiveDate,
    pub importo: f64,
    pub note: Option<String>,
    #[sqlx(try_from = "String")]
    pub stato: PaymentStatus,
    pub data_pagamento: Option<NaiveDate>,
    pub numero_rata: Option<i32>,
    pub numero_rate_totali: Option<i32>,
    #[sqlx(try_from = "String")]
    pub tipo_spesa: ExpenseCategory,
}

/// A `spese` row joined with the owning property's name, in the shape
/// the payments listing and the dashboard consume.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SpesaDettaglio {
    pub id: DbId,
    pub immobile_id: DbId,
    pub immobile: String,
    pub esercizio: i32,
    pub numero_rata: Option<i32>,
    pub numero_rate_totali: Option<i32>,
    #[sqlx(try_from = "String")]
    pub tipo_spesa: ExpenseCategory,
    pub scadenza: NaiveDate,
    pub importo: f64,
    pub note: Option<String>,
    #[sqlx(try_from = "String")]
    pub stato: PaymentStatus,
    pub data_pagamento: Option<NaiveDate>,
}

impl SpesaDettaglio {
    /// Project this row into the shape the aggregation layer consumes.
    pub fn to_expense_row(&self) -> condospese_core::aggregation::ExpenseRow {
        condospese_core::aggregation::ExpenseRow {
            immobile: self.immobile.clone(),
            esercizio: self.esercizio,
            importo: Some(self.importo),
            stato: self.stato,
            scadenza: self.scadenza,
            numero_rata: self.numero_rata.unwrap_or(1),
        }
    }
}

/// Listing filters for the payments view. `None` means "all".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpesaFilter {
    pub immobile_id: Option<DbId>,
    pub stato: Option<PaymentStatus>,
    pub esercizio: Option<i32>,
}
