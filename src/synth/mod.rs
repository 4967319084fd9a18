//! Procedural map synthesis.
//!
//! Derives depth, normal, emission and roughness maps from a single color
//! image. All operations are deterministic functions of the input pixels and
//! the constants in [`SynthesisConfig`].

pub mod enhance;
mod material;
mod normal;

pub use material::{emission_intensity, emission_map, roughness_map};
pub use normal::{depth_map, flip_normal_x, normal_map};

use crate::error::{AtlasError, Result};
use crate::source::texture::load_image;
use crate::source::DirectorySource;
use crate::types::MapKind;
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Constants for map synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Contrast factor applied to the inverted grayscale depth.
    pub depth_contrast: f32,
    /// Gaussian blur sigma applied to the depth before gradients (0 disables).
    pub depth_blur_sigma: f32,
    /// Multiplier on Sobel gradients before normalization.
    pub normal_strength: f32,
    /// Contrast factor for the emission intensity mask.
    pub emission_contrast: f32,
    /// Brightness factor for the emission intensity mask.
    pub emission_brightness: f32,
    /// Contrast factor applied to the inverted grayscale roughness.
    pub roughness_contrast: f32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            depth_contrast: 2.0,
            depth_blur_sigma: 1.0,
            normal_strength: 5.0,
            emission_contrast: 2.0,
            emission_brightness: 1.5,
            roughness_contrast: 1.5,
        }
    }
}

/// Every map derived from one color image.
#[derive(Debug, Clone)]
pub struct SynthesizedMaps {
    pub depth: GrayImage,
    pub normal: RgbImage,
    pub emission: RgbaImage,
    pub roughness: GrayImage,
}

/// Derives auxiliary maps from color images.
#[derive(Debug, Clone, Default)]
pub struct MapSynthesizer {
    config: SynthesisConfig,
}

impl MapSynthesizer {
    pub fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    pub fn depth(&self, color: &RgbaImage) -> GrayImage {
        depth_map(color, &self.config)
    }

    pub fn normal(&self, color: &RgbaImage) -> RgbImage {
        normal_map(&self.depth(color), &self.config)
    }

    pub fn emission(&self, color: &RgbaImage) -> RgbaImage {
        emission_map(color, &self.config)
    }

    pub fn roughness(&self, color: &RgbaImage) -> GrayImage {
        roughness_map(color, &self.config)
    }

    /// Synthesize one auxiliary kind as RGBA. Returns `None` for [`MapKind::Color`].
    pub fn synthesize_kind(&self, kind: MapKind, color: &RgbaImage) -> Option<RgbaImage> {
        match kind {
            MapKind::Color => None,
            MapKind::Normal => Some(DynamicImage::ImageRgb8(self.normal(color)).to_rgba8()),
            MapKind::Emission => Some(self.emission(color)),
            MapKind::Roughness => Some(DynamicImage::ImageLuma8(self.roughness(color)).to_rgba8()),
        }
    }

    /// Synthesize every map, reusing the depth for the normal map.
    pub fn synthesize(&self, color: &RgbaImage) -> SynthesizedMaps {
        let depth = self.depth(color);
        let normal = normal_map(&depth, &self.config);
        SynthesizedMaps {
            depth,
            normal,
            emission: self.emission(color),
            roughness: self.roughness(color),
        }
    }
}

/// Files written for one base color image.
#[derive(Debug, Clone)]
pub struct SynthesizedFiles {
    pub source: PathBuf,
    pub depth: PathBuf,
    pub normal: PathBuf,
    pub emission: PathBuf,
    pub roughness: PathBuf,
}

/// Outcome of [`synthesize_directory`].
#[derive(Debug, Default)]
pub struct SynthesisReport {
    pub written: Vec<SynthesizedFiles>,
    pub failures: Vec<(PathBuf, AtlasError)>,
}

/// Write `{stem}_depth.png`, `{stem}_normal.png`, `{stem}_emission.png` and
/// `{stem}_roughness.png` next to every base color image in `dir`.
///
/// Per-file failures are logged and collected; only a missing directory fails
/// the whole pass.
pub fn synthesize_directory<P: AsRef<Path>>(dir: P, config: &SynthesisConfig) -> Result<SynthesisReport> {
    let source = DirectorySource::open(dir)?;
    let synthesizer = MapSynthesizer::new(config.clone());
    let mut report = SynthesisReport::default();

    for path in source.base_color_files() {
        log::info!("Processing {}", path.display());
        match synthesize_file(&synthesizer, path) {
            Ok(files) => report.written.push(files),
            Err(e) => {
                log::warn!("Failed to synthesize maps for {}: {}", path.display(), e);
                report.failures.push((path.to_path_buf(), e));
            }
        }
    }

    log::info!(
        "Synthesized maps for {} images ({} failed) in {}",
        report.written.len(),
        report.failures.len(),
        source.root().display()
    );
    Ok(report)
}

fn synthesize_file(synthesizer: &MapSynthesizer, path: &Path) -> Result<SynthesizedFiles> {
    let color = load_image(path)?;
    let maps = synthesizer.synthesize(&color);

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let sibling = |suffix: &str| dir.join(format!("{}_{}.png", stem, suffix));

    let files = SynthesizedFiles {
        source: path.to_path_buf(),
        depth: sibling("depth"),
        normal: sibling("normal"),
        emission: sibling("emission"),
        roughness: sibling("roughness"),
    };

    maps.depth.save(&files.depth)?;
    maps.normal.save(&files.normal)?;
    maps.emission.save(&files.emission)?;
    maps.roughness.save(&files.roughness)?;

    Ok(files)
}
