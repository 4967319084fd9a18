//! Grid atlas builder.

use super::canvas::AtlasSet;
use super::config::{AtlasConfig, OverflowPolicy};
use super::report::{AtlasReport, Placement};
use crate::error::{AtlasError, Result};
use crate::source::texture::fit_tile;
use crate::source::SourceImages;
use crate::synth::{flip_normal_x, MapSynthesizer};
use crate::types::{GridSpec, Identifier, MapKind, OrderList};
use image::RgbaImage;
use std::borrow::Cow;
use std::path::Path;

/// Builder for grid texture atlases.
///
/// Each identifier in an [`OrderList`] owns the grid cell matching its
/// position. Sources are resized to the tile size and written into one
/// canvas per configured [`MapKind`].
#[derive(Debug, Clone, Default)]
pub struct AtlasBuilder {
    config: AtlasConfig,
    synthesizer: MapSynthesizer,
}

impl AtlasBuilder {
    /// Create a new atlas builder.
    pub fn new(config: AtlasConfig) -> Self {
        let synthesizer = MapSynthesizer::new(config.synthesis.clone());
        Self { config, synthesizer }
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// Assemble every configured canvas in a single pass over `order`.
    ///
    /// Missing or broken sources are logged and leave their tiles at the
    /// canvas default; only configuration problems fail the build.
    pub fn build<S: SourceImages + ?Sized>(&self, order: &OrderList, source: &S) -> Result<AtlasBuild> {
        self.config.validate()?;
        if order.is_empty() {
            return Err(AtlasError::EmptyOrder);
        }

        let grid = self.config.grid;
        let mut canvases = AtlasSet::new(&self.config.kinds, self.config.atlas_size);
        let mut placements = Vec::with_capacity(order.len().min(grid.capacity()));
        let mut skipped = Vec::new();

        for (index, identifier) in order.iter().enumerate() {
            let Some(cell) = self.resolve_cell(index) else {
                log::warn!(
                    "Skipping '{}': index {} exceeds the {}x{} grid",
                    identifier,
                    index,
                    grid.columns,
                    grid.rows
                );
                skipped.push(identifier.clone());
                continue;
            };

            let bounds = grid.pixel_rect(cell, self.config.atlas_size);
            let kinds = self.place_identifier(&mut canvases, source, identifier, bounds);

            placements.push(Placement {
                identifier: identifier.clone(),
                index,
                cell,
                uv: grid.uv_rect(cell),
                kinds,
            });
        }

        let placed = placements.iter().filter(|p| !p.kinds.is_empty()).count();
        log::info!(
            "Assembled {} of {} identifiers into {} atlas canvas(es) of {}px",
            placed,
            order.len(),
            canvases.len(),
            self.config.atlas_size
        );

        Ok(AtlasBuild {
            grid,
            atlas_size: self.config.atlas_size,
            canvases,
            placements,
            skipped,
        })
    }

    /// Grid cell for an order index, per the overflow policy.
    fn resolve_cell(&self, index: usize) -> Option<usize> {
        let capacity = self.config.grid.capacity();
        if index < capacity {
            return Some(index);
        }
        match self.config.overflow {
            OverflowPolicy::Skip => None,
            OverflowPolicy::Wrap => Some(index % capacity),
        }
    }

    /// Write every available map of one identifier. Returns the kinds placed.
    fn place_identifier<S: SourceImages + ?Sized>(
        &self,
        canvases: &mut AtlasSet,
        source: &S,
        identifier: &Identifier,
        (x, y, tile_w, tile_h): (u32, u32, u32, u32),
    ) -> Vec<MapKind> {
        let color = match source.load(identifier, MapKind::Color) {
            Ok(Some(image)) => Some(image),
            Ok(None) => {
                log::warn!("No color source found for '{}'", identifier);
                None
            }
            Err(e) => {
                log::warn!("Failed to load color source for '{}': {}", identifier, e);
                None
            }
        };

        let mut placed = Vec::new();

        for &kind in &self.config.kinds {
            let image = match self.kind_source(identifier, kind, color.as_ref(), source) {
                Ok(Some(image)) => image,
                Ok(None) => {
                    log::debug!("No {} source for '{}', tile left at default", kind, identifier);
                    continue;
                }
                Err(e) => {
                    log::warn!("Skipping {} tile for '{}': {}", kind, identifier, e);
                    continue;
                }
            };

            let mut tile = fit_tile(&image, tile_w, tile_h, self.config.filter.into(), self.config.mirror);
            if self.config.mirror && kind == MapKind::Normal {
                flip_normal_x(&mut tile);
            }
            if let Some(canvas) = canvases.get_mut(kind) {
                canvas.place(x, y, &tile);
                placed.push(kind);
            }
        }

        placed
    }

    /// Source raster for one kind: the explicit file, else a synthesized map.
    fn kind_source<'a, S: SourceImages + ?Sized>(
        &self,
        identifier: &Identifier,
        kind: MapKind,
        color: Option<&'a RgbaImage>,
        source: &S,
    ) -> Result<Option<Cow<'a, RgbaImage>>> {
        let image = if kind == MapKind::Color {
            color.map(Cow::Borrowed)
        } else if let Some(explicit) = source.load(identifier, kind)? {
            Some(Cow::Owned(explicit))
        } else if self.config.synthesize_missing {
            color
                .and_then(|c| self.synthesizer.synthesize_kind(kind, c))
                .map(Cow::Owned)
        } else {
            None
        };

        match image {
            Some(image) if image.width() == 0 || image.height() == 0 => Err(AtlasError::Asset {
                identifier: identifier.to_string(),
                message: format!("{} source is empty", kind),
            }),
            other => Ok(other),
        }
    }
}

/// Canvases and UV placements produced by [`AtlasBuilder::build`].
#[derive(Debug, Clone)]
pub struct AtlasBuild {
    pub grid: GridSpec,
    pub atlas_size: u32,
    pub canvases: AtlasSet,
    /// One entry per identifier inside the grid, in order.
    pub placements: Vec<Placement>,
    /// Identifiers left out because they did not fit the grid.
    pub skipped: Vec<Identifier>,
}

impl AtlasBuild {
    /// Placement of the first occurrence of an identifier.
    pub fn placement(&self, identifier: &str) -> Option<&Placement> {
        self.placements
            .iter()
            .find(|p| p.identifier.as_str() == identifier)
    }

    /// Save every canvas as `texture_atlas[_<kind>].png` in `dir`.
    ///
    /// A kind that fails to save is recorded in the report; the other kinds
    /// are still written.
    pub fn save<P: AsRef<Path>>(self, dir: P) -> AtlasReport {
        let dir = dir.as_ref();
        let mut report = AtlasReport::new(self.grid, self.atlas_size, self.placements, self.skipped);

        if let Err(e) = std::fs::create_dir_all(dir) {
            log::warn!("Failed to create atlas directory {}: {}", dir.display(), e);
        }

        for canvas in self.canvases.iter() {
            let kind = canvas.kind();
            let path = dir.join(kind.atlas_file_name());
            match canvas.save(&path) {
                Ok(()) => {
                    log::info!("Saved {} atlas to {}", kind, path.display());
                    report.files.insert(kind, path);
                }
                Err(e) => {
                    log::error!("Failed to save {} atlas to {}: {}", kind, path.display(), e);
                    report.failures.push(AtlasError::Persist {
                        kind,
                        path,
                        message: e.to_string(),
                    });
                }
            }
        }

        report
    }
}
