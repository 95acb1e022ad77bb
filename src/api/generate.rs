//! POST /api/generate-fit: the fit-generation orchestration handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::backend::FitPrompt;
use crate::cart::{self, CartItem};
use crate::catalog::Product;
use crate::compose::{concatenate_product_images, CompositeMetadata};
use crate::error::{AppError, Result};
use crate::outfit::ModelGender;
use crate::response::base64;
use crate::store::validate::validate_products;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFitRequest {
    /// Kept loose on purpose: a missing, non-array, or malformed list
    /// must produce the service's own client error, not an extractor
    /// rejection.
    #[serde(default)]
    pub cart_items: serde_json::Value,
    #[serde(default)]
    pub model: Option<ModelGender>,
}

/// Validate the cart-items payload shape: present, an array, non-empty,
/// each entry a well-formed cart item.
fn parse_cart_items(value: serde_json::Value) -> Result<Vec<CartItem>> {
    if !value.is_array() {
        return Err(AppError::EmptyCart);
    }

    let items: Vec<CartItem> = serde_json::from_value(value).map_err(|_| AppError::EmptyCart)?;
    if items.is_empty() {
        return Err(AppError::EmptyCart);
    }

    Ok(items)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFitResponse {
    pub success: bool,
    pub data: GenerateFitData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFitData {
    /// The grid composite, as a base64 data URL
    pub concatenated_image: String,
    /// The AI lifestyle render, when generation is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_image: Option<String>,
    pub metadata: FitMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitMetadata {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub size: usize,
    pub product_count: usize,
    pub valid_products: usize,
    pub invalid_products: Vec<String>,
}

impl FitMetadata {
    fn new(
        composite: &CompositeMetadata,
        product_count: usize,
        valid_products: usize,
        invalid_products: Vec<String>,
    ) -> Self {
        Self {
            width: composite.width,
            height: composite.height,
            format: composite.format.clone(),
            size: composite.size,
            product_count,
            valid_products,
            invalid_products,
        }
    }
}

/// Composite the cart's product images and optionally render them onto
/// a model via the generative backend.
pub async fn generate_fit(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateFitRequest>,
) -> Result<Json<GenerateFitResponse>> {
    let items = parse_cart_items(request.cart_items)?;

    info!(cart_items = items.len(), "Processing cart items for fit generation");

    let products: Vec<Product> = cart::resolve_items(&state.catalog, &items)
        .into_iter()
        .cloned()
        .collect();
    if products.is_empty() {
        return Err(AppError::NoValidProducts);
    }

    let validated = validate_products(state.image_store.as_ref(), &products).await;
    if validated.valid.is_empty() {
        return Err(AppError::NoValidImages);
    }

    info!(
        valid = validated.valid.len(),
        invalid = validated.invalid.len(),
        "Validated product images"
    );

    let valid_count = validated.valid.len();
    let invalid_names: Vec<String> = validated.invalid.iter().map(|p| p.name.clone()).collect();

    // Compose on the blocking pool; decode and resize are CPU-bound.
    let compose_config = state.settings.compose.clone();
    let images = validated.valid;
    let composite =
        tokio::task::spawn_blocking(move || concatenate_product_images(&images, &compose_config))
            .await
            .map_err(|e| AppError::Internal(format!("composition task failed: {e}")))??;

    info!(
        valid = valid_count,
        size = composite.metadata.size,
        "Concatenated product images"
    );

    let concatenated_image = base64::data_url(&composite.bytes, &composite.metadata.format);

    let generated_image = match &state.model_backend {
        Some(backend) => {
            let model = request.model.unwrap_or_default();
            info!(backend = backend.name(), %model, "Requesting lifestyle render");
            let prompt = FitPrompt::for_outfit(model, concatenated_image.clone());
            let response = backend.generate(prompt).await?;
            let image = response.first_image().ok_or(AppError::NoImageGenerated)?;

            let data_url = match (&image.b64_json, &image.url) {
                (Some(b64), _) => base64::ensure_data_url(b64, image.media_type.as_deref()),
                (None, Some(url)) => url.clone(),
                (None, None) => return Err(AppError::NoImageGenerated),
            };
            Some(data_url)
        }
        None => None,
    };

    Ok(Json(GenerateFitResponse {
        success: true,
        data: GenerateFitData {
            concatenated_image,
            generated_image,
            metadata: FitMetadata::new(
                &composite.metadata,
                products.len(),
                valid_count,
                invalid_names,
            ),
        },
    }))
}
