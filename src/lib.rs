//! Virtual Fitting-Room Service
//!
//! A storefront backend that resolves a cart against the product
//! catalog, composites the selected product images into one canvas,
//! and optionally asks a generative model to render the outfit on a
//! lifestyle photo.

pub mod api;
pub mod backend;
pub mod cart;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod error;
pub mod outfit;
pub mod response;
pub mod store;

pub use error::{AppError, Result};

use std::sync::Arc;

use backend::FitModelBackend;
use catalog::Catalog;
use store::ImageStore;

/// Application state shared across all handlers.
///
/// Everything here is read-only for the process lifetime; requests
/// share nothing mutable.
pub struct AppState {
    pub settings: config::Settings,
    pub catalog: Arc<Catalog>,
    pub image_store: Arc<dyn ImageStore>,
    pub model_backend: Option<Arc<dyn FitModelBackend>>,
}
