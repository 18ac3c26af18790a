//! Shared domain types.
//!
//! The stored status and category strings are the historical Italian
//! values ("Pagato", "Da pagare", "Ordinario", "Straordinario"). They are
//! modelled as closed enums here; anything else coming out of the store
//! is rejected at the row-decoding boundary instead of leaking into
//! derivation logic.

use serde::{Deserialize, Serialize};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Payment status of a single installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "Pagato")]
    Paid,
    #[serde(rename = "Da pagare")]
    Unpaid,
}

impl PaymentStatus {
    /// The exact string stored in the `spese.stato` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "Pagato",
            Self::Unpaid => "Da pagare",
        }
    }
}

impl TryFrom<String> for PaymentStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Pagato" => Ok(Self::Paid),
            "Da pagare" => Ok(Self::Unpaid),
            other => Err(format!("unknown payment status: {other:?}")),
        }
    }
}

/// Expense category of an installment batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "Ordinario")]
    Ordinary,
    #[serde(rename = "Straordinario")]
    Extraordinary,
}

impl ExpenseCategory {
    /// The exact string stored in the `spese.tipo_spesa` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ordinary => "Ordinario",
            Self::Extraordinary => "Straordinario",
        }
    }
}

impl TryFrom<String> for ExpenseCategory {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Ordinario" => Ok(Self::Ordinary),
            "Straordinario" => Ok(Self::Extraordinary),
            other => Err(format!("unknown expense category: {other:?}")),
        }
    }
}
