//! Image loading, fitting and encoding.

use crate::error::Result;
use image::imageops::{self, FilterType};
use image::{ImageEncoder, Rgba, RgbaImage};
use std::path::Path;

/// Extensions recognised as source images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Check whether a path has a supported image extension.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Load an image from encoded bytes as RGBA8.
pub fn load_image_from_bytes(data: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(data)?;
    Ok(img.to_rgba8())
}

/// Load an image file as RGBA8.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let data = std::fs::read(path)?;
    load_image_from_bytes(&data)
}

/// A single-color RGBA image.
pub fn solid_image(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// Resize an image to exactly `width x height`, optionally mirroring it horizontally.
pub fn fit_tile(
    image: &RgbaImage,
    width: u32,
    height: u32,
    filter: FilterType,
    mirror: bool,
) -> RgbaImage {
    let resized = if image.dimensions() == (width, height) {
        image.clone()
    } else {
        imageops::resize(image, width, height, filter)
    };

    if mirror {
        imageops::flip_horizontal(&resized)
    } else {
        resized
    }
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let cursor = std::io::Cursor::new(&mut bytes);
    let encoder = image::codecs::png::PngEncoder::new(cursor);

    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
    )?;

    Ok(bytes)
}
