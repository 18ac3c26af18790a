//! Handlers for the `/spese` resource: batch registration, filtered
//! listing with per-row derivation, payment transitions, and deletion.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use condospese_core::derivation;
use condospese_core::error::CoreError;
use condospese_core::registration::{self, ExpenseDraft};
use condospese_core::types::DbId;
use condospese_db::models::spesa::{SpesaDettaglio, SpesaFilter};
use condospese_db::repositories::SpesaRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// A listing row with the derived presentation fields attached.
#[derive(Debug, Serialize)]
pub struct SpesaView {
    #[serde(flatten)]
    pub row: SpesaDettaglio,
    /// "index/total" installment label.
    pub rata: String,
    /// Derived three-way state.
    pub classificazione: derivation::Classification,
    /// Badge CSS class, from the same classification as `stato_label`.
    pub stato_badge: &'static str,
    /// Lowercase status phrase.
    pub stato_label: &'static str,
    /// Fixed euro display format.
    pub importo_fmt: String,
}

impl SpesaView {
    pub(crate) fn from_row(row: SpesaDettaglio, today: NaiveDate) -> Self {
        let classificazione = derivation::classify(row.stato, Some(row.scadenza), today);
        let rata = derivation::installment_label(
            row.numero_rata.unwrap_or(1),
            row.numero_rate_totali.unwrap_or(1),
        );
        let importo_fmt = derivation::euro(Some(row.importo));
        Self {
            rata,
            classificazione,
            stato_badge: classificazione.badge_class(),
            stato_label: classificazione.label(),
            importo_fmt,
            row,
        }
    }
}

/// Outcome of a successful batch registration.
#[derive(Debug, Serialize)]
pub struct RegistrazioneEsito {
    pub registrate: u64,
    pub totale: f64,
}

/// POST /api/v1/spese
///
/// Registers one expense as a batch of installments. Pairs with amount
/// <= 0 are dropped (keeping original indices); the insert is atomic.
pub async fn register(
    State(state): State<AppState>,
    Json(draft): Json<ExpenseDraft>,
) -> AppResult<(StatusCode, Json<RegistrazioneEsito>)> {
    let rows = registration::plan_installments(&draft, today())?;
    let totale = registration::total_amount(&rows);
    let registrate = SpesaRepo::insert_batch(&state.pool, &rows).await?;

    tracing::info!(
        immobile_id = draft.immobile_id,
        esercizio = draft.esercizio,
        registrate,
        totale,
        "expense batch registered"
    );
    Ok((
        StatusCode::CREATED,
        Json(RegistrazioneEsito { registrate, totale }),
    ))
}

/// GET /api/v1/spese?immobile_id=&stato=&esercizio=
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<SpesaFilter>,
) -> AppResult<Json<DataResponse<Vec<SpesaView>>>> {
    let oggi = today();
    let rows = SpesaRepo::list_detail(&state.pool, &filter).await?;
    let views = rows
        .into_iter()
        .map(|row| SpesaView::from_row(row, oggi))
        .collect();
    Ok(Json(DataResponse { data: views }))
}

/// GET /api/v1/spese/esercizi
pub async fn esercizi(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<i32>>>> {
    let anni = SpesaRepo::distinct_esercizi(&state.pool).await?;
    Ok(Json(DataResponse { data: anni }))
}

/// Body for POST /spese/{id}/pay.
#[derive(Debug, Deserialize)]
pub struct PagaRequest {
    /// Defaults to today when unspecified.
    pub data_pagamento: Option<NaiveDate>,
    /// Optional note fragment to append.
    pub nota: Option<String>,
}

/// Body for POST /spese/{id}/unpay.
#[derive(Debug, Deserialize)]
pub struct RiapriRequest {
    /// Optional note fragment to append.
    pub nota: Option<String>,
}

/// Append the extra note fragment if it is non-blank.
///
/// Deliberately a separate statement (and commit) from the status
/// update that follows, preserving the reference behaviour of the
/// original dashboard. Repeating a transition re-appends the fragment.
async fn maybe_append_note(
    state: &AppState,
    id: DbId,
    nota: Option<&str>,
) -> Result<(), sqlx::Error> {
    if let Some(nota) = nota {
        if !nota.trim().is_empty() {
            SpesaRepo::append_note(&state.pool, id, nota).await?;
        }
    }
    Ok(())
}

/// POST /api/v1/spese/{id}/pay
pub async fn paga(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<PagaRequest>,
) -> AppResult<Json<SpesaView>> {
    ensure_exists(&state, id).await?;

    maybe_append_note(&state, id, body.nota.as_deref()).await?;
    let data = body.data_pagamento.unwrap_or_else(today);
    SpesaRepo::set_pagato(&state.pool, id, data).await?;
    tracing::info!(id, %data, "installment marked paid");

    reload_view(&state, id).await
}

/// POST /api/v1/spese/{id}/unpay
pub async fn riapri(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<RiapriRequest>,
) -> AppResult<Json<SpesaView>> {
    ensure_exists(&state, id).await?;

    maybe_append_note(&state, id, body.nota.as_deref()).await?;
    SpesaRepo::set_da_pagare(&state.pool, id).await?;
    tracing::info!(id, "installment reopened");

    reload_view(&state, id).await
}

/// DELETE /api/v1/spese/{id}
///
/// Irreversible single-row delete. The confirmation step lives in the
/// UI; the API performs the action unconditionally.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = SpesaRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "installment deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Spesa", id }))
    }
}

async fn ensure_exists(state: &AppState, id: DbId) -> AppResult<()> {
    SpesaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Spesa", id }))?;
    Ok(())
}

async fn reload_view(state: &AppState, id: DbId) -> AppResult<Json<SpesaView>> {
    let row = SpesaRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Spesa", id }))?;
    Ok(Json(SpesaView::from_row(row, today())))
}
