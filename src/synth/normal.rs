//! Depth and normal map derivation.

use super::enhance::{contrast, grayscale, invert};
use super::SynthesisConfig;
use image::{imageops, GrayImage, Rgb, RgbImage, RgbaImage};

/// Horizontal Sobel kernel, indexed `[dy + 1][dx + 1]`.
const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
/// Vertical Sobel kernel, indexed `[dy + 1][dx + 1]`. Positive towards the top row.
const SOBEL_Y: [[i32; 3]; 3] = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];

/// Height field from a color image: brighter source pixels are nearer.
pub fn depth_map(image: &RgbaImage, config: &SynthesisConfig) -> GrayImage {
    let depth = invert(&grayscale(image));
    let depth = contrast(&depth, config.depth_contrast);
    if config.depth_blur_sigma > 0.0 {
        imageops::blur(&depth, config.depth_blur_sigma)
    } else {
        depth
    }
}

/// Apply a 3x3 kernel centred on `(x, y)`. The caller keeps the window in bounds.
fn convolve(depth: &GrayImage, x: u32, y: u32, kernel: &[[i32; 3]; 3]) -> i32 {
    let mut sum = 0;
    for (ky, row) in kernel.iter().enumerate() {
        for (kx, weight) in row.iter().enumerate() {
            let px = depth.get_pixel(x + kx as u32 - 1, y + ky as u32 - 1).0[0];
            sum += weight * px as i32;
        }
    }
    sum
}

/// Map a unit vector component from `[-1, 1]` to `[0, 255]`.
fn encode_component(v: f32) -> u8 {
    ((v + 1.0) * 0.5 * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Tangent-space normal map from a height field.
///
/// The outer one-pixel ring has no full 3x3 neighbourhood and gets a zero
/// gradient, i.e. the flat normal `(128, 128, 255)`.
pub fn normal_map(depth: &GrayImage, config: &SynthesisConfig) -> RgbImage {
    let (width, height) = depth.dimensions();
    let scale = config.normal_strength / 255.0;

    RgbImage::from_fn(width, height, |x, y| {
        let interior = x > 0 && y > 0 && x + 1 < width && y + 1 < height;
        let (gx, gy) = if interior {
            (
                convolve(depth, x, y, &SOBEL_X) as f32 * scale,
                convolve(depth, x, y, &SOBEL_Y) as f32 * scale,
            )
        } else {
            (0.0, 0.0)
        };

        let len = (gx * gx + gy * gy + 1.0).sqrt();
        Rgb([
            encode_component(gx / len),
            encode_component(gy / len),
            encode_component(1.0 / len),
        ])
    })
}

/// Negate the encoded X component (`r -> 255 - r`) of a normal map that has
/// been mirrored horizontally.
pub fn flip_normal_x(normals: &mut RgbaImage) {
    for pixel in normals.pixels_mut() {
        pixel.0[0] = 255 - pixel.0[0];
    }
}
