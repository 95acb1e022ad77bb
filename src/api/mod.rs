//! HTTP API: router construction and endpoint handlers

pub mod generate;
pub mod products;

use axum::error_handling::HandleErrorLayer;
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::AppState;

/// Total wall-clock cap for one request, external generation included
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    router_with_timeout(state, REQUEST_TIMEOUT)
}

/// Router with an explicit request timeout; split out so tests can use
/// a short one.
pub fn router_with_timeout(state: Arc<AppState>, request_timeout: Duration) -> Router {
    // Composite responses are per-request artifacts; caching them is
    // always wrong.
    let generate = Router::new()
        .route("/api/generate-fit", post(generate::generate_fit))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ));

    Router::new()
        .route("/health", get(health))
        .route("/api/products", get(products::list_products))
        .route("/api/outfit/preview", post(products::outfit_preview))
        .merge(generate)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// An exhausted wall-clock cap is a server-side failure, not a client
/// one; surface it through the standard error envelope.
async fn handle_middleware_error(error: BoxError) -> AppError {
    if error.is::<tower::timeout::error::Elapsed>() {
        AppError::Timeout("request exceeded the processing time limit".to_string())
    } else {
        AppError::Internal(error.to_string())
    }
}

async fn health() -> &'static str {
    "OK"
}
