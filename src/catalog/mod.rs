//! Read-only product reference data
//!
//! The catalog is loaded once at startup and injected as `Arc<Catalog>`;
//! nothing mutates it afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Outfit category a product belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Top,
    Bottom,
    Shoes,
    Outerwear,
    Shades,
    Hats,
}

impl Category {
    /// Categories that must always resolve to a selected product
    pub const REQUIRED: [Category; 3] = [Category::Top, Category::Bottom, Category::Shoes];

    /// Categories that may be absent from an outfit
    pub const OPTIONAL: [Category; 3] = [Category::Outerwear, Category::Shades, Category::Hats];

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Shoes => "shoes",
            Category::Outerwear => "outerwear",
            Category::Shades => "shades",
            Category::Hats => "hats",
        }
    }
}

/// A single catalog entry
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: Category,
    pub image_url: String,
    pub description: String,
    pub brand: String,
    /// Marks a fallback item used to fill a required category when the
    /// user has made no selection.
    #[serde(default)]
    pub is_default: bool,
}

/// Static product catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load a catalog from a JSON array of products
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read(path)?;
        let products: Vec<Product> = serde_json::from_slice(&raw)?;
        Ok(Self::new(products))
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The default-flagged product for a category, if any
    pub fn default_for(&self, category: Category) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.category == category && p.is_default)
    }

    /// First non-default product of a category; last-resort fill for a
    /// required slot with no default.
    pub fn first_non_default(&self, category: Category) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.category == category && !p.is_default)
    }

    /// Built-in seed catalog used when no products file is configured
    pub fn seed() -> Self {
        let products = vec![
            Product {
                id: "1".to_string(),
                name: "Off-White T-Shirt".to_string(),
                price: 189.99,
                category: Category::Top,
                image_url: "/products/off-white-tee.png".to_string(),
                description: "Premium streetwear t-shirt with signature Off-White branding."
                    .to_string(),
                brand: "Off-White".to_string(),
                is_default: true,
            },
            Product {
                id: "2".to_string(),
                name: "American Vintage Pants".to_string(),
                price: 129.99,
                category: Category::Bottom,
                image_url: "/products/american-vintage-pants.png".to_string(),
                description: "Comfortable vintage-inspired pants perfect for casual wear."
                    .to_string(),
                brand: "American Vintage".to_string(),
                is_default: true,
            },
            Product {
                id: "3".to_string(),
                name: "Balenciaga Sneakers".to_string(),
                price: 795.99,
                category: Category::Shoes,
                image_url: "/products/balenciaga-shoes.png".to_string(),
                description: "High-fashion sneakers with modern design and premium materials."
                    .to_string(),
                brand: "Balenciaga".to_string(),
                is_default: true,
            },
            Product {
                id: "4".to_string(),
                name: "Oakley Sunglasses".to_string(),
                price: 149.99,
                category: Category::Shades,
                image_url: "/products/oakly-shades.png".to_string(),
                description: "Sport sunglasses with advanced lens technology and sleek design."
                    .to_string(),
                brand: "Oakley".to_string(),
                is_default: false,
            },
            Product {
                id: "5".to_string(),
                name: "Casablanca Jacket".to_string(),
                price: 1295.99,
                category: Category::Outerwear,
                image_url: "/products/casablanca-jacket.png".to_string(),
                description:
                    "Luxury silk jacket with vibrant prints inspired by Moroccan heritage."
                        .to_string(),
                brand: "Casablanca".to_string(),
                is_default: false,
            },
            Product {
                id: "6".to_string(),
                name: "Gucci Beanie".to_string(),
                price: 295.99,
                category: Category::Hats,
                image_url: "/products/gucci-beanie.png".to_string(),
                description:
                    "Premium wool beanie with iconic GG logo and Italian craftsmanship."
                        .to_string(),
                brand: "Gucci".to_string(),
                is_default: false,
            },
            Product {
                id: "7".to_string(),
                name: "MISBHV Pants".to_string(),
                price: 379.99,
                category: Category::Bottom,
                image_url: "/products/misbhv-pants.png".to_string(),
                description:
                    "Contemporary streetwear pants with avant-garde silhouette and details."
                        .to_string(),
                brand: "MISBHV".to_string(),
                is_default: false,
            },
            Product {
                id: "8".to_string(),
                name: "Balenciaga Sunglasses".to_string(),
                price: 525.99,
                category: Category::Shades,
                image_url: "/products/balenciaga-shades.png".to_string(),
                description:
                    "Designer sunglasses with futuristic frames and premium UV protection."
                        .to_string(),
                brand: "Balenciaga".to_string(),
                is_default: false,
            },
        ];

        Self::new(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_lookup() {
        let catalog = Catalog::seed();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get("1").unwrap().name, "Off-White T-Shirt");
        assert!(catalog.get("no-such-id").is_none());
    }

    #[test]
    fn test_seed_has_defaults_for_required_categories() {
        let catalog = Catalog::seed();
        for category in Category::REQUIRED {
            assert!(
                catalog.default_for(category).is_some(),
                "missing default for {}",
                category.as_str()
            );
        }
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&Category::Outerwear).unwrap();
        assert_eq!(json, "\"outerwear\"");
        let back: Category = serde_json::from_str("\"shoes\"").unwrap();
        assert_eq!(back, Category::Shoes);
    }
}
