//! Image composition engine
//!
//! Pure transformation: an ordered list of product images in, a single
//! fixed-size composite out. Each input is cover-fitted into its grid
//! cell and placed row-major on a background-filled canvas, then the
//! canvas is encoded as JPEG.

pub mod layout;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use serde::Serialize;
use tracing::debug;

use crate::catalog::Product;
use crate::config::ComposeConfig;
use crate::error::{AppError, Result};
use layout::grid_for;

/// A product paired with its raw image bytes
#[derive(Debug, Clone)]
pub struct ProductImage {
    pub product: Product,
    pub bytes: Vec<u8>,
}

/// Byte-accurate description of the encoded composite
#[derive(Debug, Clone, Serialize)]
pub struct CompositeMetadata {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub size: usize,
}

/// The encoded composite plus its metadata
#[derive(Debug, Clone)]
pub struct CompositeImage {
    pub bytes: Vec<u8>,
    pub metadata: CompositeMetadata,
}

/// Arrange product images into a grid on a single canvas.
///
/// Inputs are expected to be pre-validated; any image that fails to
/// decode here is a hard error for the whole batch.
pub fn concatenate_product_images(
    images: &[ProductImage],
    config: &ComposeConfig,
) -> Result<CompositeImage> {
    if images.is_empty() {
        return Err(AppError::Compose(
            "No products provided for image concatenation".to_string(),
        ));
    }

    let grid = grid_for(images.len());
    let (cell_width, cell_height) = cell_dimensions(config, grid.rows, grid.cols)?;

    debug!(
        images = images.len(),
        rows = grid.rows,
        cols = grid.cols,
        cell_width,
        cell_height,
        "Composing product images"
    );

    let mut canvas = RgbImage::from_pixel(
        config.target_width,
        config.target_height,
        Rgb(config.background),
    );

    for (index, input) in images.iter().enumerate() {
        let decoded = image::load_from_memory(&input.bytes).map_err(|e| {
            AppError::Compose(format!(
                "could not decode image for product '{}': {e}",
                input.product.id
            ))
        })?;

        // Cover fit: scale to fill the cell, center-cropping overflow
        let cell = decoded
            .resize_to_fill(cell_width, cell_height, FilterType::Lanczos3)
            .to_rgb8();

        let row = index as u32 / grid.cols;
        let col = index as u32 % grid.cols;
        let left = config.padding + col * (cell_width + config.padding);
        let top = config.padding + row * (cell_height + config.padding);

        imageops::overlay(&mut canvas, &cell, i64::from(left), i64::from(top));
    }

    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, config.quality);
    encoder
        .encode_image(&canvas)
        .map_err(|e| AppError::Compose(format!("jpeg encoding failed: {e}")))?;

    let size = bytes.len();
    Ok(CompositeImage {
        bytes,
        metadata: CompositeMetadata {
            width: config.target_width,
            height: config.target_height,
            format: "jpeg".to_string(),
            size,
        },
    })
}

/// Cell size from canvas size, padding and grid shape; floor division.
fn cell_dimensions(config: &ComposeConfig, rows: u32, cols: u32) -> Result<(u32, u32)> {
    let width = (i64::from(config.target_width) - i64::from(config.padding) * (i64::from(cols) + 1))
        / i64::from(cols);
    let height = (i64::from(config.target_height)
        - i64::from(config.padding) * (i64::from(rows) + 1))
        / i64::from(rows);

    if width < 1 || height < 1 {
        return Err(AppError::ComposeConfig(format!(
            "{}x{} canvas with {}px padding leaves no room for a {rows}x{cols} grid",
            config.target_width, config.target_height, config.padding
        )));
    }

    Ok((width as u32, height as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use image::{DynamicImage, GenericImageView, ImageFormat};
    use std::io::Cursor;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price: 1.0,
            category: Category::Top,
            image_url: format!("/products/{id}.png"),
            description: String::new(),
            brand: String::new(),
            is_default: false,
        }
    }

    fn png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn inputs(sizes: &[(u32, u32)]) -> Vec<ProductImage> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| ProductImage {
                product: product(&format!("{i}")),
                bytes: png_bytes(w, h, [60, 120, 180]),
            })
            .collect()
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = concatenate_product_images(&[], &ComposeConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No products provided"));
    }

    #[test]
    fn test_output_dimensions_match_target_for_any_count() {
        let config = ComposeConfig::default();
        for count in 1..=12 {
            // Mix of aspect ratios, none matching the cell shape
            let sizes: Vec<(u32, u32)> = (0..count)
                .map(|i| (40 + 30 * (i % 3) as u32, 90 - 20 * (i % 2) as u32))
                .collect();
            let composite = concatenate_product_images(&inputs(&sizes), &config).unwrap();

            assert_eq!(composite.metadata.width, 800, "count {count}");
            assert_eq!(composite.metadata.height, 800, "count {count}");
            assert_eq!(composite.metadata.format, "jpeg");
            assert_eq!(composite.metadata.size, composite.bytes.len());

            let decoded = image::load_from_memory(&composite.bytes).unwrap();
            assert_eq!(decoded.dimensions(), (800, 800), "count {count}");
        }
    }

    #[test]
    fn test_three_images_leave_fourth_cell_as_background() {
        let config = ComposeConfig::default();
        let composite =
            concatenate_product_images(&inputs(&[(50, 50), (50, 50), (50, 50)]), &config).unwrap();

        let decoded = image::load_from_memory(&composite.bytes).unwrap().to_rgb8();
        // Center of the empty bottom-right cell of the 2x2 grid
        let px = decoded.get_pixel(600, 600);
        for channel in px.0 {
            assert!(channel > 240, "expected near-white background, got {px:?}");
        }
    }

    #[test]
    fn test_composition_is_deterministic() {
        let config = ComposeConfig::default();
        let images = inputs(&[(64, 32), (32, 64), (48, 48)]);

        let first = concatenate_product_images(&images, &config).unwrap();
        let second = concatenate_product_images(&images, &config).unwrap();

        assert_eq!(first.bytes, second.bytes);
        assert_eq!(first.metadata.size, second.metadata.size);
    }

    #[test]
    fn test_corrupt_input_fails_the_batch() {
        let config = ComposeConfig::default();
        let mut images = inputs(&[(50, 50)]);
        images.push(ProductImage {
            product: product("bad"),
            bytes: b"definitely not an image".to_vec(),
        });

        let err = concatenate_product_images(&images, &config).unwrap_err();
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_oversized_padding_is_a_config_error() {
        let config = ComposeConfig {
            padding: 400,
            ..ComposeConfig::default()
        };

        let err = concatenate_product_images(&inputs(&[(50, 50), (50, 50)]), &config).unwrap_err();
        assert!(matches!(err, AppError::ComposeConfig(_)));
    }
}
