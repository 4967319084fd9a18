//! Atlas build configuration.

use crate::error::{AtlasError, Result};
use crate::synth::SynthesisConfig;
use crate::types::{CornerOrder, GridSpec, MapKind};
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted atlas side, in pixels.
pub const MAX_ATLAS_SIZE: u32 = 16384;

/// Resampling filter used when fitting sources into tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// What happens to identifiers whose index is past the grid capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Log a warning and leave the identifier out of the atlas.
    #[default]
    Skip,
    /// Reuse cell `index % capacity`, overwriting whatever was placed there.
    Wrap,
}

/// Main atlas configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Grid partition of every canvas.
    pub grid: GridSpec,
    /// Side length of the square atlas in pixels.
    pub atlas_size: u32,
    /// Map kinds to build, one canvas each.
    pub kinds: Vec<MapKind>,
    /// Filter used to resize sources to the tile size.
    pub filter: ResampleFilter,
    /// Mirror every tile horizontally before placing it.
    pub mirror: bool,
    /// Handling of identifiers past the grid capacity.
    pub overflow: OverflowPolicy,
    /// Derive missing auxiliary maps from the color source.
    pub synthesize_missing: bool,
    /// Constants for map synthesis.
    pub synthesis: SynthesisConfig,
    /// Corner order handed to hosts applying UVs.
    pub corner_order: CornerOrder,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            atlas_size: 1024,
            kinds: vec![MapKind::Color],
            filter: ResampleFilter::Lanczos3,
            mirror: false,
            overflow: OverflowPolicy::Skip,
            synthesize_missing: true,
            synthesis: SynthesisConfig::default(),
            corner_order: CornerOrder::Standard,
        }
    }
}

impl AtlasConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_atlas_size(mut self, atlas_size: u32) -> Self {
        self.atlas_size = atlas_size;
        self
    }

    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_kinds(mut self, kinds: &[MapKind]) -> Self {
        self.kinds = kinds.to_vec();
        self
    }

    /// Build color, normal, emission and roughness atlases.
    pub fn with_pbr_maps(self) -> Self {
        self.with_kinds(&MapKind::ALL)
    }

    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_corner_order(mut self, corner_order: CornerOrder) -> Self {
        self.corner_order = corner_order;
        self
    }

    /// Nominal tile width and height in pixels.
    ///
    /// When the atlas size does not divide evenly, some cells are one pixel
    /// wider or taller; see [`GridSpec::pixel_rect`].
    pub fn tile_size(&self) -> (u32, u32) {
        (
            self.atlas_size / self.grid.columns.max(1),
            self.atlas_size / self.grid.rows.max(1),
        )
    }

    /// Check the configuration before a build.
    pub fn validate(&self) -> Result<()> {
        if self.grid.columns == 0 || self.grid.rows == 0 {
            return Err(AtlasError::InvalidConfig(format!(
                "grid must have at least one cell, got {}x{}",
                self.grid.columns, self.grid.rows
            )));
        }
        if self.atlas_size == 0 || self.atlas_size > MAX_ATLAS_SIZE {
            return Err(AtlasError::InvalidConfig(format!(
                "atlas size must be in 1..={}, got {}",
                MAX_ATLAS_SIZE, self.atlas_size
            )));
        }
        if self.atlas_size < self.grid.columns || self.atlas_size < self.grid.rows {
            return Err(AtlasError::InvalidConfig(format!(
                "atlas size {} is smaller than the {}x{} grid",
                self.atlas_size, self.grid.columns, self.grid.rows
            )));
        }
        if self.kinds.is_empty() {
            return Err(AtlasError::InvalidConfig("no map kinds configured".to_string()));
        }
        for (i, kind) in self.kinds.iter().enumerate() {
            if self.kinds[..i].contains(kind) {
                return Err(AtlasError::InvalidConfig(format!("map kind '{}' listed twice", kind)));
            }
        }
        Ok(())
    }
}
