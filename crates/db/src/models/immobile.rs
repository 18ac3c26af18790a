//! Property (immobile) entity model and DTOs.

use condospese_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A property row from the `immobili` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Immobile {
    pub id: DbId,
    pub nome: String,
    pub indirizzo: Option<String>,
    pub codice_fiscale: Option<String>,
    pub iban: Option<String>,
}

/// DTO for creating a new property. `nome` must be non-empty after
/// trimming; handlers validate before persisting.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateImmobile {
    pub nome: String,
    pub indirizzo: Option<String>,
    pub codice_fiscale: Option<String>,
    pub iban: Option<String>,
}

/// Replacement payload for updating a property. The edit is a full
/// replace: an optional field left absent or blank is stored as NULL.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateImmobile {
    pub nome: String,
    pub indirizzo: Option<String>,
    pub codice_fiscale: Option<String>,
    pub iban: Option<String>,
}
