//! Repository for the `immobili` table.

use condospese_core::types::DbId;
use sqlx::PgPool;

use crate::models::immobile::{CreateImmobile, Immobile, UpdateImmobile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nome, indirizzo, codice_fiscale, iban";

/// Provides CRUD operations for properties.
pub struct ImmobileRepo;

impl ImmobileRepo {
    /// Insert a new property, returning the created row. A duplicate
    /// name violates `uq_immobili_nome`.
    pub async fn create(pool: &PgPool, input: &CreateImmobile) -> Result<Immobile, sqlx::Error> {
        let query = format!(
            "INSERT INTO immobili (nome, indirizzo, codice_fiscale, iban)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Immobile>(&query)
            .bind(&input.nome)
            .bind(&input.indirizzo)
            .bind(&input.codice_fiscale)
            .bind(&input.iban)
            .fetch_one(pool)
            .await
    }

    /// List all properties ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Immobile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM immobili ORDER BY nome");
        sqlx::query_as::<_, Immobile>(&query).fetch_all(pool).await
    }

    /// Find a property by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Immobile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM immobili WHERE id = $1");
        sqlx::query_as::<_, Immobile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a property by its unique name.
    pub async fn find_by_nome(pool: &PgPool, nome: &str) -> Result<Option<Immobile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM immobili WHERE nome = $1");
        sqlx::query_as::<_, Immobile>(&query)
            .bind(nome)
            .fetch_optional(pool)
            .await
    }

    /// Replace a property's fields. `None` optional fields are stored
    /// as NULL, so a blanked field is cleared rather than kept.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateImmobile,
    ) -> Result<Option<Immobile>, sqlx::Error> {
        let query = format!(
            "UPDATE immobili SET
                nome = $2,
                indirizzo = $3,
                codice_fiscale = $4,
                iban = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Immobile>(&query)
            .bind(id)
            .bind(&input.nome)
            .bind(&input.indirizzo)
            .bind(&input.codice_fiscale)
            .bind(&input.iban)
            .fetch_optional(pool)
            .await
    }

    /// Number of installments referencing a property. Deletion is
    /// blocked by the application while this is non-zero.
    pub async fn count_spese(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM spese WHERE immobile_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Permanently delete a property by ID. Returns `true` if a row was
    /// removed. The FK on `spese` is RESTRICT, so a referenced property
    /// cannot be deleted even if the application guard is bypassed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM immobili WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
