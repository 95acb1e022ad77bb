//! Generative model capability trait and wire types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::outfit::ModelGender;

/// Instruction plus composite image sent to the generative model
#[derive(Debug, Clone, Serialize)]
pub struct FitPrompt {
    /// Text instruction for the model
    pub instruction: String,

    /// The composite outfit image, as a base64 data URL
    pub image_data_url: String,
}

impl FitPrompt {
    /// Standard lifestyle-photo instruction for an outfit composite
    pub fn for_outfit(model: ModelGender, image_data_url: String) -> Self {
        Self {
            instruction: format!(
                "assemble the outfit onto a {model} model, lifestyle image, \
                 do not add items not provided"
            ),
            image_data_url,
        }
    }
}

/// A single output from the generative model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Base64 encoded image data
    pub b64_json: Option<String>,

    /// URL to the image
    pub url: Option<String>,

    /// Media type tag, e.g. "image/png"
    pub media_type: Option<String>,
}

impl GeneratedImage {
    /// Whether this output carries image content
    pub fn is_image(&self) -> bool {
        match &self.media_type {
            Some(media_type) => media_type.starts_with("image/"),
            None => self.b64_json.is_some() || self.url.is_some(),
        }
    }
}

/// Response from the generative model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub images: Vec<GeneratedImage>,
    pub model: Option<String>,
}

impl GenerateResponse {
    /// The first image-typed output is authoritative
    pub fn first_image(&self) -> Option<&GeneratedImage> {
        self.images.iter().find(|img| img.is_image())
    }
}

/// A generative model that renders an outfit composite as a lifestyle photo
#[async_trait]
pub trait FitModelBackend: Send + Sync {
    /// Backend name, for logging
    fn name(&self) -> &str;

    /// Render the prompt into zero or more images
    async fn generate(&self, prompt: FitPrompt) -> Result<GenerateResponse>;
}
