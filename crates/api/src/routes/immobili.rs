//! Route definitions for the `/immobili` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::immobile;
use crate::state::AppState;

/// Routes mounted at `/immobili`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create
/// GET    /{id}     -> get_by_id
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(immobile::list).post(immobile::create))
        .route(
            "/{id}",
            get(immobile::get_by_id)
                .put(immobile::update)
                .delete(immobile::delete),
        )
}
