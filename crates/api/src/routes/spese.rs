//! Route definitions for the `/spese` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::spesa;
use crate::state::AppState;

/// Routes mounted at `/spese`.
///
/// ```text
/// GET    /               -> list (filters: immobile_id, stato, esercizio)
/// POST   /               -> register (batch installment creation)
/// GET    /esercizi       -> distinct fiscal years
/// DELETE /{id}           -> delete
/// POST   /{id}/pay       -> paga
/// POST   /{id}/unpay     -> riapri
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(spesa::list).post(spesa::register))
        .route("/esercizi", get(spesa::esercizi))
        .route("/{id}", delete(spesa::delete))
        .route("/{id}/pay", post(spesa::paga))
        .route("/{id}/unpay", post(spesa::riapri))
}
