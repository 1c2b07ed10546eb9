//! Route definitions for the Bloom Climate relay

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Relay routes, mounted at the root so the browser client can call them
/// same-origin
pub fn relay_routes() -> Router<AppState> {
    Router::new()
        .route("/fetch_climate", get(handlers::fetch_climate))
        .route("/fetch_ndvi", get(handlers::fetch_ndvi))
}
