//! Expense registration planning: turn a user-entered draft (one
//! expense split into N installments) into the exact rows to persist.
//!
//! Planning is pure; the resulting rows are written atomically by
//! `SpesaRepo::insert_batch`. Validation here is strict, unlike the
//! fail-open display derivation.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::note::note_merge;
use crate::types::{DbId, ExpenseCategory, PaymentStatus};

/// One (due date, amount) pair entered in the registration form.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct InstallmentInput {
    pub scadenza: NaiveDate,
    pub importo: f64,
}

/// A complete registration draft as submitted by the UI.
///
/// `stato` applies uniformly to the whole batch; when it is `Paid`, a
/// single `data_pagamento` (defaulting to today) applies to every row.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ExpenseDraft {
    pub immobile_id: DbId,
    pub esercizio: i32,
    pub tipo_spesa: ExpenseCategory,
    pub stato: PaymentStatus,
    pub data_pagamento: Option<NaiveDate>,
    #[serde(default)]
    pub note: String,
    pub rate: Vec<InstallmentInput>,
}

/// One row ready to be inserted into `spese`.
#[derive(Debug, Clone)]
pub struct PlannedInstallment {
    pub immobile_id: DbId,
    pub esercizio: i32,
    pub scadenza: NaiveDate,
    pub importo: f64,
    pub note: Option<String>,
    pub stato: PaymentStatus,
    pub data_pagamento: Option<NaiveDate>,
    pub numero_rata: i32,
    pub numero_rate_totali: i32,
    pub tipo_spesa: ExpenseCategory,
}

/// Build the rows to persist for a registration draft.
///
/// Pairs with `importo <= 0` are skipped while keeping their original
/// 1-based position, so a draft of [100, 0, 50] yields rows numbered
/// 1/3 and 3/3. Fails with [`CoreError::Validation`] when no pair
/// survives filtering.
pub fn plan_installments(
    draft: &ExpenseDraft,
    today: NaiveDate,
) -> Result<Vec<PlannedInstallment>, CoreError> {
    let totale_rate = draft.rate.len() as i32;
    let data_pagamento = match draft.stato {
        PaymentStatus::Paid => Some(draft.data_pagamento.unwrap_or(today)),
        PaymentStatus::Unpaid => None,
    };

    let mut rows = Vec::new();
    for (i, rata) in draft.rate.iter().enumerate() {
        if rata.importo <= 0.0 || !rata.importo.is_finite() {
            continue;
        }
        let numero_rata = (i + 1) as i32;
        let suffix = format!(
            "{} | Esercizio {} | Rata {}/{}",
            draft.tipo_spesa.as_str(),
            draft.esercizio,
            numero_rata,
            totale_rate
        );
        let note = note_merge(&draft.note, &suffix);

        rows.push(PlannedInstallment {
            immobile_id: draft.immobile_id,
            esercizio: draft.esercizio,
            scadenza: rata.scadenza,
            importo: rata.importo,
            note: (!note.is_empty()).then_some(note),
            stato: draft.stato,
            data_pagamento,
            numero_rata,
            numero_rate_totali: totale_rate,
            tipo_spesa: draft.tipo_spesa,
        });
    }

    if rows.is_empty() {
        return Err(CoreError::Validation(
            "registration requires at least one installment with amount > 0".to_string(),
        ));
    }
    Ok(rows)
}

/// Sum of amounts that will actually be committed. Equals the total
/// shown to the user before confirmation, restricted to amounts > 0.
pub fn total_amount(rows: &[PlannedInstallment]) -> f64 {
    rows.iter().map(|r| r.importo).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn draft(amounts: &[f64], stato: PaymentStatus) -> ExpenseDraft {
        ExpenseDraft {
            immobile_id: 7,
            esercizio: 2026,
            tipo_spesa: ExpenseCategory::Ordinary,
            stato,
            data_pagamento: None,
            note: "gestione ordinaria".to_string(),
            rate: amounts
                .iter()
                .enumerate()
                .map(|(i, &importo)| InstallmentInput {
                    scadenza: d(&format!("2026-0{}-01", i + 1)),
                    importo,
                })
                .collect(),
        }
    }

    #[test]
    fn test_zero_amounts_skipped_indices_preserved() {
        let rows =
            plan_installments(&draft(&[100.0, 0.0, 50.0], PaymentStatus::Unpaid), d("2026-08-28"))
                .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].numero_rata, 1);
        assert_eq!(rows[1].numero_rata, 3);
        assert!(rows.iter().all(|r| r.numero_rate_totali == 3));
        assert_eq!(total_amount(&rows), 150.0);
    }

    #[test]
    fn test_all_zero_amounts_is_validation_error() {
        let err = plan_installments(&draft(&[0.0, 0.0], PaymentStatus::Unpaid), d("2026-08-28"))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_note_carries_descriptive_suffix() {
        let rows =
            plan_installments(&draft(&[100.0], PaymentStatus::Unpaid), d("2026-08-28")).unwrap();
        assert_eq!(
            rows[0].note.as_deref(),
            Some("gestione ordinaria | Ordinario | Esercizio 2026 | Rata 1/1")
        );
    }

    #[test]
    fn test_empty_base_note_leaves_only_suffix() {
        let mut dr = draft(&[100.0, 200.0], PaymentStatus::Unpaid);
        dr.note = "  ".to_string();
        let rows = plan_installments(&dr, d("2026-08-28")).unwrap();
        assert_eq!(rows[1].note.as_deref(), Some("Ordinario | Esercizio 2026 | Rata 2/2"));
    }

    #[test]
    fn test_paid_batch_defaults_payment_date_to_today() {
        let today = d("2026-08-28");
        let rows = plan_installments(&draft(&[100.0, 50.0], PaymentStatus::Paid), today).unwrap();
        assert!(rows.iter().all(|r| r.data_pagamento == Some(today)));
    }

    #[test]
    fn test_paid_batch_uses_explicit_payment_date() {
        let mut dr = draft(&[100.0], PaymentStatus::Paid);
        dr.data_pagamento = Some(d("2026-03-15"));
        let rows = plan_installments(&dr, d("2026-08-28")).unwrap();
        assert_eq!(rows[0].data_pagamento, Some(d("2026-03-15")));
    }

    #[test]
    fn test_unpaid_batch_has_no_payment_date() {
        let mut dr = draft(&[100.0], PaymentStatus::Unpaid);
        // A stray date on an unpaid draft must not be persisted.
        dr.data_pagamento = Some(d("2026-03-15"));
        let rows = plan_installments(&dr, d("2026-08-28")).unwrap();
        assert_eq!(rows[0].data_pagamento, None);
    }

    #[test]
    fn test_negative_and_non_finite_amounts_skipped() {
        let rows = plan_installments(
            &draft(&[-5.0, f64::NAN, 30.0], PaymentStatus::Unpaid),
            d("2026-08-28"),
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].numero_rata, 3);
    }
}
