//! Configuration module

pub mod settings;

pub use settings::{
    CatalogConfig, ComposeConfig, GenerationConfig, LoggingConfig, ServerConfig, Settings,
};
