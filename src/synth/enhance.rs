//! Grayscale point operations used by map synthesis.

use image::{GrayImage, Luma, RgbaImage};

/// ITU-R 601-2 luma in 16-bit fixed point, rounded.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Convert an RGBA image to single-channel luma. Alpha is ignored.
pub fn grayscale(image: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, _] = image.get_pixel(x, y).0;
        Luma([luma(r, g, b)])
    })
}

/// Invert every pixel (`255 - p`).
pub fn invert(image: &GrayImage) -> GrayImage {
    let mut out = image.clone();
    for p in out.pixels_mut() {
        p.0[0] = 255 - p.0[0];
    }
    out
}

/// Interpolate each pixel from `base` towards (and past) itself by `factor`,
/// truncating and clamping to `0..=255`.
fn blend_towards(base: f32, p: u8, factor: f32) -> u8 {
    let value = base + factor * (p as f32 - base);
    if value <= 0.0 {
        0
    } else if value >= 255.0 {
        255
    } else {
        value as u8
    }
}

/// Rounded mean intensity; 0 for an empty image.
pub fn mean_intensity(image: &GrayImage) -> u8 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 0;
    }
    let sum: u64 = image.pixels().map(|p| p.0[0] as u64).sum();
    (sum as f64 / count as f64 + 0.5) as u8
}

/// Scale the distance of every pixel from the image mean by `factor`.
pub fn contrast(image: &GrayImage, factor: f32) -> GrayImage {
    let mean = mean_intensity(image) as f32;
    let mut out = image.clone();
    for p in out.pixels_mut() {
        p.0[0] = blend_towards(mean, p.0[0], factor);
    }
    out
}

/// Multiply every pixel by `factor`.
pub fn brightness(image: &GrayImage, factor: f32) -> GrayImage {
    let mut out = image.clone();
    for p in out.pixels_mut() {
        p.0[0] = blend_towards(0.0, p.0[0], factor);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_luma_weights() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
    }

    #[test]
    fn test_grayscale_ignores_alpha() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 0]));
        let gray = grayscale(&img);
        assert!(gray.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_invert() {
        let img = GrayImage::from_raw(3, 1, vec![0, 100, 255]).unwrap();
        assert_eq!(invert(&img).into_raw(), vec![255, 155, 0]);
    }

    #[test]
    fn test_contrast_around_mean() {
        // mean = 100
        let img = GrayImage::from_raw(3, 1, vec![50, 100, 150]).unwrap();
        assert_eq!(mean_intensity(&img), 100);
        assert_eq!(contrast(&img, 2.0).into_raw(), vec![0, 100, 200]);
        assert_eq!(contrast(&img, 1.5).into_raw(), vec![25, 100, 175]);
    }

    #[test]
    fn test_contrast_of_flat_image_is_identity() {
        let img = GrayImage::from_pixel(4, 4, Luma([77]));
        assert_eq!(contrast(&img, 2.0), img);
    }

    #[test]
    fn test_brightness_clamps() {
        let img = GrayImage::from_raw(3, 1, vec![10, 101, 200]).unwrap();
        assert_eq!(brightness(&img, 1.5).into_raw(), vec![15, 151, 255]);
    }
}
