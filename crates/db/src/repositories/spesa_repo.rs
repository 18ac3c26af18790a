//! Repository for the `spese` table.

use chrono::NaiveDate;
use condospese_core::registration::PlannedInstallment;
use condospese_core::types::DbId;
use sqlx::PgPool;

use crate::models::spesa::{Spesa, SpesaDettaglio, SpesaFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, immobile_id, esercizio, scadenza, importo, note, stato, \
                       data_pagamento, numero_rata, numero_rate_totali, tipo_spesa";

/// Provides persistence operations for expense installments.
pub struct SpesaRepo;

impl SpesaRepo {
    /// Insert a planned registration batch in a single transaction.
    /// Either every row is written or none are.
    pub async fn insert_batch(
        pool: &PgPool,
        rows: &[PlannedInstallment],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        for row in rows {
            sqlx::query(
                "INSERT INTO spese
                 (immobile_id, esercizio, scadenza, importo, note, stato,
                  data_pagamento, numero_rata, numero_rate_totali, tipo_spesa)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            )
            .bind(row.immobile_id)
            .bind(row.esercizio)
            .bind(row.scadenza)
            .bind(row.importo)
            .bind(&row.note)
            .bind(row.stato.as_str())
            .bind(row.data_pagamento)
            .bind(row.numero_rata)
            .bind(row.numero_rate_totali)
            .bind(row.tipo_spesa.as_str())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        tracing::debug!(rows = rows.len(), "installment batch committed");
        Ok(rows.len() as u64)
    }

    /// Find an installment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Spesa>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spese WHERE id = $1");
        sqlx::query_as::<_, Spesa>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List installments joined with the owning property name, applying
    /// the optional filters, in the canonical detail order: due date,
    /// property name, fiscal year, installment index.
    pub async fn list_detail(
        pool: &PgPool,
        filter: &SpesaFilter,
    ) -> Result<Vec<SpesaDettaglio>, sqlx::Error> {
        sqlx::query_as::<_, SpesaDettaglio>(
            "SELECT s.id, s.immobile_id, i.nome AS immobile, s.esercizio,
                    s.numero_rata, s.numero_rate_totali, s.tipo_spesa,
                    s.scadenza, s.importo, s.note, s.stato, s.data_pagamento
             FROM spese s
             JOIN immobili i ON i.id = s.immobile_id
             WHERE ($1::bigint IS NULL OR s.immobile_id = $1)
               AND ($2::text IS NULL OR s.stato = $2)
               AND ($3::int IS NULL OR s.esercizio = $3)
             ORDER BY s.scadenza ASC, i.nome ASC, s.esercizio ASC, s.numero_rata ASC",
        )
        .bind(filter.immobile_id)
        .bind(filter.stato.map(|s| s.as_str()))
        .bind(filter.esercizio)
        .fetch_all(pool)
        .await
    }

    /// Find a single installment joined with its property name.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SpesaDettaglio>, sqlx::Error> {
        sqlx::query_as::<_, SpesaDettaglio>(
            "SELECT s.id, s.immobile_id, i.nome AS immobile, s.esercizio,
                    s.numero_rata, s.numero_rate_totali, s.tipo_spesa,
                    s.scadenza, s.importo, s.note, s.stato, s.data_pagamento
             FROM spese s
             JOIN immobili i ON i.id = s.immobile_id
             WHERE s.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Distinct fiscal years present, most recent first. Feeds the
    /// year filter dropdown.
    pub async fn distinct_esercizi(pool: &PgPool) -> Result<Vec<i32>, sqlx::Error> {
        let rows: Vec<(i32,)> =
            sqlx::query_as("SELECT DISTINCT esercizio FROM spese ORDER BY esercizio DESC")
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(y,)| y).collect())
    }

    /// Append a note fragment to an installment, matching
    /// `condospese_core::note::note_merge` semantics: an empty or
    /// blank stored note is replaced, otherwise the fragment is joined
    /// with " | ". Appends, never overwrites.
    pub async fn append_note(pool: &PgPool, id: DbId, extra: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE spese
             SET note = CASE
                 WHEN note IS NULL OR trim(note) = '' THEN $2
                 ELSE note || ' | ' || $2
             END
             WHERE id = $1",
        )
        .bind(id)
        .bind(extra.trim())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark an installment paid with the given payment date. Re-marking
    /// an already-paid row simply overwrites the date.
    pub async fn set_pagato(
        pool: &PgPool,
        id: DbId,
        data_pagamento: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE spese SET stato = 'Pagato', data_pagamento = $2 WHERE id = $1")
                .bind(id)
                .bind(data_pagamento)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark an installment unpaid, clearing its payment date.
    pub async fn set_da_pagare(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE spese SET stato = 'Da pagare', data_pagamento = NULL WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete an installment. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM spese WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
