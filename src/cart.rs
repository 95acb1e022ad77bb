//! Cart items and catalog resolution

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};

/// A single (product id, quantity) cart entry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CartItem {
    pub id: String,
    pub quantity: u32,
}

/// Resolve cart items against the catalog, dropping unresolvable ids.
///
/// Each distinct product appears once in the result regardless of
/// quantity or duplicate entries; order follows first occurrence.
pub fn resolve_items<'a>(catalog: &'a Catalog, items: &[CartItem]) -> Vec<&'a Product> {
    let mut seen: Vec<&str> = Vec::with_capacity(items.len());
    let mut products = Vec::with_capacity(items.len());

    for item in items {
        if seen.contains(&item.id.as_str()) {
            continue;
        }
        if let Some(product) = catalog.get(&item.id) {
            seen.push(&item.id);
            products.push(product);
        }
    }

    products
}

/// Total price of the cart, quantity-weighted; unresolvable ids add nothing.
pub fn cart_total(catalog: &Catalog, items: &[CartItem]) -> f64 {
    items
        .iter()
        .filter_map(|item| {
            catalog
                .get(&item.id)
                .map(|product| product.price * f64::from(item.quantity))
        })
        .sum()
}
