//! Bloom Climate relay
//!
//! A thin same-origin proxy in front of the NASA POWER daily point API.
//! The browser client cannot call POWER directly, so the relay validates
//! coordinates, forwards the request with a fixed parameter set and
//! returns the upstream JSON unchanged.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;

pub use config::Config;
pub use error::{AppError, AppResult};

use external::PowerClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub power: PowerClient,
}

impl AppState {
    /// Build the state, including the upstream HTTP client
    pub fn new(config: Config) -> AppResult<Self> {
        let power = PowerClient::new(&config.upstream)?;
        Ok(Self {
            config: Arc::new(config),
            power,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .merge(routes::relay_routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Bloom Climate relay v0.1"
}
