//! Axum router construction.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- rendered selector page
/// - `GET /health` -- liveness probe
/// - `GET /api/species` -- species catalog
/// - `POST /api/fish` -- proxy endpoint
///
/// CORS allows any origin so a separately hosted front end can call the
/// proxy endpoint.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Selector page
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        // REST API
        .route("/api/species", get(handlers::list_species))
        .route("/api/fish", post(handlers::post_fish))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
