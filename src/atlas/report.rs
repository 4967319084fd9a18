//! Build results handed to hosts: saved files, UV placements and failures.

use crate::error::{AtlasError, Result};
use crate::types::{CornerOrder, GridSpec, Identifier, MapKind, UvRect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the UV manifest written next to the atlases.
pub const UV_MANIFEST_FILE: &str = "texture_atlas_uv.json";

/// Saved atlas files by map kind.
pub type AtlasFiles = BTreeMap<MapKind, PathBuf>;

/// Where one identifier landed in the atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub identifier: Identifier,
    /// Position in the order list.
    pub index: usize,
    /// Grid cell; differs from `index` only when wrapping.
    pub cell: usize,
    pub uv: UvRect,
    /// Kinds that received a tile. Empty when nothing could be loaded.
    pub kinds: Vec<MapKind>,
}

/// Outcome of saving an atlas build.
#[derive(Debug)]
pub struct AtlasReport {
    pub grid: GridSpec,
    pub atlas_size: u32,
    pub files: AtlasFiles,
    /// Kinds that could not be written.
    pub failures: Vec<AtlasError>,
    pub placements: Vec<Placement>,
    pub skipped: Vec<Identifier>,
}

impl AtlasReport {
    pub(crate) fn new(
        grid: GridSpec,
        atlas_size: u32,
        placements: Vec<Placement>,
        skipped: Vec<Identifier>,
    ) -> Self {
        Self {
            grid,
            atlas_size,
            files: AtlasFiles::new(),
            failures: Vec::new(),
            placements,
            skipped,
        }
    }

    /// Whether every canvas was saved.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn saved_kinds(&self) -> Vec<MapKind> {
        self.files.keys().copied().collect()
    }

    /// Serializable view of the placements and files.
    pub fn uv_manifest(&self, corner_order: CornerOrder) -> UvManifest {
        UvManifest {
            grid: self.grid,
            atlas_size: self.atlas_size,
            corner_order,
            files: self.files.clone(),
            items: self
                .placements
                .iter()
                .map(|p| ManifestItem {
                    identifier: p.identifier.clone(),
                    index: p.index,
                    cell: p.cell,
                    uv: p.uv,
                    corners: p.uv.corners(corner_order).map(|c| c.to_array()),
                    kinds: p.kinds.clone(),
                })
                .collect(),
        }
    }

    /// Write the UV manifest as pretty JSON.
    pub fn write_uv_manifest<P: AsRef<Path>>(&self, path: P, corner_order: CornerOrder) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.uv_manifest(corner_order))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// One entry of a [`UvManifest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestItem {
    pub identifier: Identifier,
    pub index: usize,
    pub cell: usize,
    pub uv: UvRect,
    /// Face corners in the manifest's corner order.
    pub corners: [[f32; 2]; 4],
    pub kinds: Vec<MapKind>,
}

/// Identifier to UV mapping for hosts that read files instead of linking the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvManifest {
    pub grid: GridSpec,
    pub atlas_size: u32,
    pub corner_order: CornerOrder,
    pub files: AtlasFiles,
    pub items: Vec<ManifestItem>,
}

impl UvManifest {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn get(&self, identifier: &str) -> Option<&ManifestItem> {
        self.items.iter().find(|item| item.identifier.as_str() == identifier)
    }
}
