//! Per-category outfit slot derivation
//!
//! Pure functions: (cart selections, catalog) in, immutable slot state
//! out. Nothing here touches shared state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::cart::{self, CartItem};
use crate::catalog::{Catalog, Category, Product};
use crate::error::{AppError, Result};

/// Which model the generated lifestyle image should feature
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelGender {
    #[default]
    Male,
    Female,
}

impl fmt::Display for ModelGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelGender::Male => f.write_str("male"),
            ModelGender::Female => f.write_str("female"),
        }
    }
}

/// One outfit slot: the selected product and swap candidates.
///
/// Alternatives are ordered most recently superseded first.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SlotState {
    pub selected: String,
    pub alternatives: Vec<String>,
}

/// Resolved outfit state: required slots always present, optional
/// slots only when the cart contains a product for them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Outfit {
    pub slots: BTreeMap<Category, SlotState>,
    pub model: ModelGender,
}

/// Build outfit slot state from cart items.
///
/// Per category: the most recently added cart product is selected and
/// earlier ones become alternatives; the category default is appended
/// as a final alternative when distinct. Required categories with no
/// cart product fall back to the default-flagged product, then to any
/// non-default product of that category.
pub fn build_outfit(
    catalog: &Catalog,
    cart_items: &[CartItem],
    model: ModelGender,
) -> Result<Outfit> {
    let cart_products = cart::resolve_items(catalog, cart_items);

    let mut by_category: BTreeMap<Category, Vec<&Product>> = BTreeMap::new();
    for product in cart_products {
        by_category.entry(product.category).or_default().push(product);
    }

    let mut slots = BTreeMap::new();

    for category in Category::REQUIRED.into_iter().chain(Category::OPTIONAL) {
        match slot_for(catalog, category, by_category.get(&category)) {
            Some(slot) => {
                slots.insert(category, slot);
            }
            None if category.is_required() => {
                return Err(AppError::Internal(format!(
                    "Failed to initialize required outfit slot '{}'",
                    category.as_str()
                )));
            }
            None => {}
        }
    }

    Ok(Outfit { slots, model })
}

fn slot_for(
    catalog: &Catalog,
    category: Category,
    cart_products: Option<&Vec<&Product>>,
) -> Option<SlotState> {
    let default = catalog.default_for(category);

    if let Some(products) = cart_products.filter(|p| !p.is_empty()) {
        let selected = products[products.len() - 1];
        // Superseded selections, newest first
        let mut alternatives: Vec<String> = products[..products.len() - 1]
            .iter()
            .rev()
            .map(|p| p.id.clone())
            .collect();

        if let Some(default) = default {
            if default.id != selected.id && !alternatives.contains(&default.id) {
                alternatives.push(default.id.clone());
            }
        }

        return Some(SlotState {
            selected: selected.id.clone(),
            alternatives,
        });
    }

    if !category.is_required() {
        return None;
    }

    default
        .or_else(|| catalog.first_non_default(category))
        .map(|p| SlotState {
            selected: p.id.clone(),
            alternatives: Vec::new(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> CartItem {
        CartItem {
            id: id.to_string(),
            quantity: 1,
        }
    }

    #[test]
    fn test_most_recent_cart_product_is_selected() {
        let catalog = Catalog::seed();
        // Two bottoms in the cart: id 2 (default) then id 7
        let outfit = build_outfit(&catalog, &[item("2"), item("7")], ModelGender::Male).unwrap();

        let bottom = &outfit.slots[&Category::Bottom];
        assert_eq!(bottom.selected, "7");
        assert_eq!(bottom.alternatives, vec!["2".to_string()]);
    }

    #[test]
    fn test_superseded_alternatives_are_newest_first() {
        let catalog = Catalog::seed();
        // Two shades products; the required slots fill from defaults
        let outfit = build_outfit(&catalog, &[item("4"), item("8")], ModelGender::Female).unwrap();

        let shades = &outfit.slots[&Category::Shades];
        assert_eq!(shades.selected, "8");
        assert_eq!(shades.alternatives, vec!["4".to_string()]);
    }

    #[test]
    fn test_required_slots_fall_back_to_defaults() {
        let catalog = Catalog::seed();
        let outfit = build_outfit(&catalog, &[], ModelGender::Male).unwrap();

        for category in Category::REQUIRED {
            let slot = &outfit.slots[&category];
            assert_eq!(
                slot.selected,
                catalog.default_for(category).unwrap().id,
                "slot {} should fall back to its default",
                category.as_str()
            );
        }
    }

    #[test]
    fn test_optional_slots_absent_without_cart_products() {
        let catalog = Catalog::seed();
        let outfit = build_outfit(&catalog, &[], ModelGender::Male).unwrap();

        for category in Category::OPTIONAL {
            assert!(!outfit.slots.contains_key(&category));
        }
    }

    #[test]
    fn test_required_fallback_to_non_default() {
        // Catalog whose only shoes product is not default-flagged
        let mut products = Catalog::seed().products().to_vec();
        for p in &mut products {
            if p.category == Category::Shoes {
                p.is_default = false;
            }
        }
        let catalog = Catalog::new(products);

        let outfit = build_outfit(&catalog, &[], ModelGender::Male).unwrap();
        assert_eq!(outfit.slots[&Category::Shoes].selected, "3");
    }

    #[test]
    fn test_unfillable_required_slot_is_an_error() {
        let products: Vec<_> = Catalog::seed()
            .products()
            .iter()
            .filter(|p| p.category != Category::Shoes)
            .cloned()
            .collect();
        let catalog = Catalog::new(products);

        assert!(build_outfit(&catalog, &[], ModelGender::Male).is_err());
    }
}
