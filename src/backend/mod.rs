//! Generative model backend: capability trait plus the HTTP adapter

pub mod http;
pub mod traits;

pub use http::HttpModelBackend;
pub use traits::{FitModelBackend, FitPrompt, GenerateResponse, GeneratedImage};
