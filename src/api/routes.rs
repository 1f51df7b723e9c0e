//! Route definitions for the API.

use axum::http::{header, HeaderValue, Method};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::handlers;
use super::SharedState;
use crate::config::Config;
use crate::error::{AppError, Result};

/// Create the main API router
pub fn create_router(state: SharedState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/upload", post(handlers::projects::upload_project))
        .route("/list", get(handlers::projects::list_projects))
        .route("/project/:id", get(handlers::projects::get_project))
        .route("/download", get(handlers::downloads::download_project))
        .route("/health", get(handlers::health::health_check))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

/// Build the CORS layer for the configured browser origins.
///
/// The frontend runs on a different origin in development, so its origin must
/// be whitelisted for GET/POST with Content-Type and Authorization headers.
/// Preflight OPTIONS requests are answered by the layer itself.
pub fn cors_layer(config: &Config) -> Result<CorsLayer> {
    let origins = config
        .cors_origins
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<HeaderValue>()
                .map_err(|_| AppError::Config(format!("invalid CORS origin: {s}")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}
