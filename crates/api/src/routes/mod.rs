pub mod dashboard;
pub mod health;
pub mod immobili;
pub mod spese;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /immobili                 list, create
/// /immobili/{id}            get, update, delete (delete guarded by
///                           associated-installment count)
///
/// /spese                    list (?immobile_id, stato, esercizio), register batch
/// /spese/esercizi           distinct fiscal years (filter dropdown)
/// /spese/{id}               delete
/// /spese/{id}/pay           mark paid (POST)
/// /spese/{id}/unpay         mark unpaid (POST)
///
/// /dashboard/summary        totals + per-year series + detail rows
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/immobili", immobili::router())
        .nest("/spese", spese::router())
        .nest("/dashboard", dashboard::router())
}
