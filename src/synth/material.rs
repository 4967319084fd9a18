//! Emission and roughness map derivation.

use super::enhance::{brightness, contrast, grayscale, invert};
use super::SynthesisConfig;
use image::{GrayImage, Rgba, RgbaImage};

/// Per-pixel emission intensity: grayscale with contrast then brightness applied.
pub fn emission_intensity(image: &RgbaImage, config: &SynthesisConfig) -> GrayImage {
    let intensity = contrast(&grayscale(image), config.emission_contrast);
    brightness(&intensity, config.emission_brightness)
}

/// Colored emission: each source channel scaled by `intensity / 255`.
///
/// Bright regions keep their hue, dark regions fall to black. Output is opaque.
pub fn emission_map(image: &RgbaImage, config: &SynthesisConfig) -> RgbaImage {
    let intensity = emission_intensity(image, config);
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, _] = image.get_pixel(x, y).0;
        let e = intensity.get_pixel(x, y).0[0] as u32;
        let scale = |c: u8| (c as u32 * e / 255) as u8;
        Rgba([scale(r), scale(g), scale(b), 255])
    })
}

/// Roughness from inverted intensity: dark source pixels are rough.
pub fn roughness_map(image: &RgbaImage, config: &SynthesisConfig) -> GrayImage {
    contrast(&invert(&grayscale(image)), config.roughness_contrast)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emission_of_flat_color() {
        let config = SynthesisConfig::default();
        for color in [[200, 40, 90, 255], [12, 250, 130, 128], [255, 255, 255, 255]] {
            let img = RgbaImage::from_pixel(6, 6, Rgba(color));
            let intensity = emission_intensity(&img, &config).get_pixel(0, 0).0[0] as u32;
            let emission = emission_map(&img, &config);

            let expected = [
                (color[0] as u32 * intensity / 255) as u8,
                (color[1] as u32 * intensity / 255) as u8,
                (color[2] as u32 * intensity / 255) as u8,
                255,
            ];
            assert!(emission.pixels().all(|p| p.0 == expected));
        }
    }

    #[test]
    fn test_flat_intensity_is_brightened_luma() {
        // luma(200, 40, 90) = 94; contrast keeps a flat image, brightness 1.5 -> 141.
        let img = RgbaImage::from_pixel(3, 3, Rgba([200, 40, 90, 255]));
        let intensity = emission_intensity(&img, &SynthesisConfig::default());
        assert!(intensity.pixels().all(|p| p.0[0] == 141));
    }

    #[test]
    fn test_emission_suppresses_dark_regions() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([250, 250, 250, 255]));
        img.put_pixel(1, 0, Rgba([20, 20, 20, 255]));

        let emission = emission_map(&img, &SynthesisConfig::default());
        assert_eq!(emission.get_pixel(0, 0).0, [250, 250, 250, 255]);
        assert_eq!(emission.get_pixel(1, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_roughness_inverts_intensity() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 255]));

        let roughness = roughness_map(&img, &SynthesisConfig::default());
        assert!(roughness.get_pixel(0, 0).0[0] < roughness.get_pixel(1, 0).0[0]);
        assert_eq!(roughness.get_pixel(1, 0).0[0], 255);
    }
}
