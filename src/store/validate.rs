//! Settle-all validation of product image resources

use futures::future::join_all;
use tracing::warn;

use crate::catalog::Product;
use crate::compose::ProductImage;
use crate::store::ImageStore;

/// Partition of products by image readability, both in input order.
///
/// Valid products carry their image bytes so the compose stage does not
/// read them a second time.
pub struct ValidatedImages {
    pub valid: Vec<ProductImage>,
    pub invalid: Vec<Product>,
}

/// Check every product's image resource independently.
///
/// Reads are issued concurrently and joined settle-all: one product's
/// failure never aborts the batch, it only lands the product in
/// `invalid`. The caller decides what an empty `valid` list means.
pub async fn validate_products(store: &dyn ImageStore, products: &[Product]) -> ValidatedImages {
    let reads = products.iter().map(|p| store.read(&p.image_url));
    let results = join_all(reads).await;

    let mut valid = Vec::with_capacity(products.len());
    let mut invalid = Vec::new();

    for (product, result) in products.iter().zip(results) {
        match result {
            Ok(bytes) => valid.push(ProductImage {
                product: product.clone(),
                bytes,
            }),
            Err(error) => {
                warn!(
                    product_id = %product.id,
                    image_url = %product.image_url,
                    %error,
                    "Failed to load product image"
                );
                invalid.push(product.clone());
            }
        }
    }

    ValidatedImages { valid, invalid }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Category};
    use crate::store::FsImageStore;

    fn product(id: &str, image_url: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price: 10.0,
            category: Category::Top,
            image_url: image_url.to_string(),
            description: String::new(),
            brand: String::new(),
            is_default: false,
        }
    }

    #[tokio::test]
    async fn test_partitions_preserving_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"a").unwrap();
        std::fs::write(dir.path().join("c.png"), b"c").unwrap();
        let store = FsImageStore::new(dir.path());

        let products = vec![
            product("a", "/a.png"),
            product("b", "/missing.png"),
            product("c", "/c.png"),
        ];

        let outcome = validate_products(&store, &products).await;

        let valid_ids: Vec<&str> = outcome.valid.iter().map(|v| v.product.id.as_str()).collect();
        assert_eq!(valid_ids, vec!["a", "c"]);
        assert_eq!(outcome.invalid.len(), 1);
        assert_eq!(outcome.invalid[0].id, "b");
    }

    #[tokio::test]
    async fn test_all_failures_yield_empty_valid_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsImageStore::new(dir.path());

        let products = vec![product("a", "/nope.png"), product("b", "/also-nope.png")];
        let outcome = validate_products(&store, &products).await;

        assert!(outcome.valid.is_empty());
        assert_eq!(outcome.invalid.len(), 2);
    }

    #[tokio::test]
    async fn test_seed_catalog_products_validate_against_assets() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("products")).unwrap();
        let catalog = Catalog::seed();
        for p in catalog.products() {
            let rel = p.image_url.trim_start_matches('/');
            std::fs::write(dir.path().join(rel), b"img").unwrap();
        }
        let store = FsImageStore::new(dir.path());

        let outcome = validate_products(&store, catalog.products()).await;
        assert_eq!(outcome.valid.len(), catalog.len());
        assert!(outcome.invalid.is_empty());
    }
}
