//! Catalog listing and outfit preview endpoints

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::cart::CartItem;
use crate::catalog::Product;
use crate::error::Result;
use crate::outfit::{build_outfit, ModelGender, Outfit};
use crate::AppState;

/// GET /api/products: the full catalog
pub async fn list_products(State(state): State<Arc<AppState>>) -> Json<Vec<Product>> {
    Json(state.catalog.products().to_vec())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitPreviewRequest {
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
    #[serde(default)]
    pub model: ModelGender,
}

/// POST /api/outfit/preview: derive outfit slot state from cart items
pub async fn outfit_preview(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OutfitPreviewRequest>,
) -> Result<Json<Outfit>> {
    let outfit = build_outfit(&state.catalog, &request.cart_items, request.model)?;
    Ok(Json(outfit))
}
