//! Common error types for the fitting-room service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid or empty cart items provided")]
    EmptyCart,

    #[error("No valid products found in cart items")]
    NoValidProducts,

    #[error("No valid product images found")]
    NoValidImages,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid composition config: {0}")]
    ComposeConfig(String),

    #[error("Failed to concatenate images: {0}")]
    Compose(String),

    #[error("Generation backend error: {0}")]
    Backend(String),

    #[error("No image was generated")]
    NoImageGenerated,

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body; mirrors the `success`/`error` envelope of the API
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Client-caused input errors map to 400; everything past input
        // validation is a server-side failure.
        let status = match &self {
            AppError::EmptyCart
            | AppError::NoValidProducts
            | AppError::NoValidImages
            | AppError::InvalidRequest(_)
            | AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Config(_)
            | AppError::Io(_)
            | AppError::HttpClient(_)
            | AppError::ComposeConfig(_)
            | AppError::Compose(_)
            | AppError::Backend(_)
            | AppError::NoImageGenerated
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            success: false,
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
