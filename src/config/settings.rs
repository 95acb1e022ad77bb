//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub compose: ComposeConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Catalog and image-store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Optional JSON file with the product catalog; the built-in seed
    /// catalog is used when absent.
    #[serde(default)]
    pub products_file: Option<String>,
    /// Root directory that product image references resolve under.
    #[serde(default = "default_assets_root")]
    pub assets_root: String,
}

fn default_assets_root() -> String {
    "./public".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            products_file: None,
            assets_root: default_assets_root(),
        }
    }
}

/// Composite canvas configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComposeConfig {
    #[serde(default = "default_canvas_side")]
    pub target_width: u32,
    #[serde(default = "default_canvas_side")]
    pub target_height: u32,
    /// Background fill, RGB
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    /// Inter-cell padding in pixels
    #[serde(default = "default_padding")]
    pub padding: u32,
    /// JPEG encoder quality, 0-100
    #[serde(default = "default_quality")]
    pub quality: u8,
}

fn default_canvas_side() -> u32 {
    800
}

fn default_background() -> [u8; 3] {
    [255, 255, 255]
}

fn default_padding() -> u32 {
    20
}

fn default_quality() -> u8 {
    90
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            target_width: default_canvas_side(),
            target_height: default_canvas_side(),
            background: default_background(),
            padding: default_padding(),
            quality: default_quality(),
        }
    }
}

/// External generative-model configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// When disabled the service returns only the composite image.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_timeout() -> u64 {
    60_000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            model: None,
            timeout_ms: default_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from configuration files and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/default.toml")
    }

    /// Load settings from a specific configuration file path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(
                File::with_name(path.as_ref().to_str().unwrap_or("config/default"))
                    .required(false),
            )
            // Override with environment variables (prefixed with FITROOM__)
            .add_source(
                Environment::with_prefix("FITROOM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Server port cannot be 0".to_string(),
            )));
        }

        if self.compose.target_width == 0 || self.compose.target_height == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Composite canvas dimensions cannot be 0".to_string(),
            )));
        }

        if self.compose.quality > 100 {
            return Err(AppError::Config(config::ConfigError::Message(
                "JPEG quality must be in 0-100".to_string(),
            )));
        }

        if self.generation.enabled && self.generation.endpoint.is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(
                "Generation is enabled but no endpoint is configured".to_string(),
            )));
        }

        Ok(())
    }
}
