//! Handlers for the `/immobili` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use condospese_core::error::CoreError;
use condospese_core::types::DbId;
use condospese_db::models::immobile::{CreateImmobile, Immobile, UpdateImmobile};
use condospese_db::repositories::ImmobileRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Normalize an optional free-text field: trim, empty becomes absent.
fn clean(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// POST /api/v1/immobili
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateImmobile>,
) -> AppResult<(StatusCode, Json<Immobile>)> {
    let nome = input.nome.trim().to_string();
    if nome.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "property name must not be empty".to_string(),
        )));
    }
    let input = CreateImmobile {
        nome,
        indirizzo: clean(input.indirizzo),
        codice_fiscale: clean(input.codice_fiscale),
        iban: clean(input.iban),
    };

    let immobile = ImmobileRepo::create(&state.pool, &input).await?;
    tracing::info!(id = immobile.id, nome = %immobile.nome, "property created");
    Ok((StatusCode::CREATED, Json(immobile)))
}

/// GET /api/v1/immobili
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Immobile>>>> {
    let immobili = ImmobileRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: immobili }))
}

/// GET /api/v1/immobili/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Immobile>> {
    let immobile = ImmobileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Immobile",
            id,
        }))?;
    Ok(Json(immobile))
}

/// PUT /api/v1/immobili/{id}
///
/// Full replace: an optional field omitted or blanked in the payload
/// is cleared, not kept.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateImmobile>,
) -> AppResult<Json<Immobile>> {
    let nome = input.nome.trim().to_string();
    if nome.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "property name must not be empty".to_string(),
        )));
    }
    let input = UpdateImmobile {
        nome,
        indirizzo: clean(input.indirizzo),
        codice_fiscale: clean(input.codice_fiscale),
        iban: clean(input.iban),
    };

    let immobile = ImmobileRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Immobile",
            id,
        }))?;
    Ok(Json(immobile))
}

/// DELETE /api/v1/immobili/{id}
///
/// Refused while any installment still references the property; the
/// count is reported so the UI can explain the disabled action.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let n_spese = ImmobileRepo::count_spese(&state.pool, id).await?;
    if n_spese > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "property has {n_spese} associated installments and cannot be deleted"
        ))));
    }

    let deleted = ImmobileRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "property deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Immobile",
            id,
        }))
    }
}
