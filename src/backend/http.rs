//! HTTP adapter for the generative model service

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::backend::traits::{FitModelBackend, FitPrompt, GenerateResponse, GeneratedImage};
use crate::config::GenerationConfig;
use crate::error::{AppError, Result};

/// Production adapter: one remote endpoint, JSON in, JSON out
pub struct HttpModelBackend {
    client: Client,
    endpoint: String,
    model: Option<String>,
}

/// Request body sent to the generation endpoint
#[derive(Debug, Serialize)]
struct ApiGenerateRequest<'a> {
    prompt: &'a str,
    image: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    n: u32,
    response_format: &'a str,
}

/// Response body; tolerates both `images` and `data` carriers
#[derive(Debug, Deserialize)]
struct ApiGenerateResponse {
    #[serde(default)]
    images: Vec<ApiImageData>,
    #[serde(default)]
    data: Vec<ApiImageData>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiImageData {
    #[serde(default, alias = "base64")]
    b64_json: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, alias = "mime_type")]
    media_type: Option<String>,
}

impl HttpModelBackend {
    /// Create a backend from configuration
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl FitModelBackend for HttpModelBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate(&self, prompt: FitPrompt) -> Result<GenerateResponse> {
        debug!(endpoint = %self.endpoint, "Sending generate request");

        let request = ApiGenerateRequest {
            prompt: &prompt.instruction,
            image: &prompt.image_data_url,
            model: self.model.as_deref(),
            n: 1,
            response_format: "b64_json",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(format!("generation request to {} timed out", self.endpoint))
                } else if e.is_connect() {
                    AppError::Backend(format!("connection failed to {}: {e}", self.endpoint))
                } else {
                    AppError::HttpClient(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Backend(format!(
                "generation service returned {status}: {body}"
            )));
        }

        let api_response: ApiGenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("failed to parse generation response: {e}")))?;

        let mut outputs = api_response.images;
        outputs.extend(api_response.data);

        let images = outputs
            .into_iter()
            .map(|img| GeneratedImage {
                b64_json: img.b64_json,
                url: img.url,
                media_type: img.media_type,
            })
            .collect();

        Ok(GenerateResponse {
            images,
            model: api_response.model,
        })
    }
}
