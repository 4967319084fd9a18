//! Shared types used throughout the library.

mod uv;

pub use uv::{CornerOrder, UvRect};

use image::Rgba;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A sanitized item name: alphanumerics, `_` and `-` only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Sanitize a raw name, e.g. `"Bitcoin Cash (BCH)"` -> `"Bitcoin_Cash_BCH"`.
    ///
    /// Returns `None` when nothing survives sanitization.
    pub fn sanitize(raw: &str) -> Option<Self> {
        let cleaned: String = raw
            .trim()
            .replace(' ', "_")
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
            .collect();

        if cleaned.is_empty() {
            None
        } else {
            Some(Self(cleaned))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File stem of the source image for a map kind (`btc`, `btc_normal`, ...).
    pub fn source_stem(&self, kind: MapKind) -> String {
        match kind.suffix() {
            Some(suffix) => format!("{}_{}", self.0, suffix),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered identifiers; the position of an identifier is its grid index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderList {
    identifiers: Vec<Identifier>,
}

impl OrderList {
    pub fn new(identifiers: Vec<Identifier>) -> Self {
        Self { identifiers }
    }

    /// Build an order list from raw names, dropping names that sanitize to nothing.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            identifiers: names
                .into_iter()
                .filter_map(|name| Identifier::sanitize(name.as_ref()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Identifier> {
        self.identifiers.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Identifier> {
        self.identifiers.iter()
    }

    /// Grid index of the first occurrence of an identifier.
    pub fn position(&self, identifier: &str) -> Option<usize> {
        self.identifiers.iter().position(|id| id.as_str() == identifier)
    }
}

impl<'a> IntoIterator for &'a OrderList {
    type Item = &'a Identifier;
    type IntoIter = std::slice::Iter<'a, Identifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.identifiers.iter()
    }
}

/// Grid partition of an atlas, `columns x rows` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 10,
        }
    }
}

impl GridSpec {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of cells in the grid.
    pub fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Grid cell `(row, col)` for an index. Indices past capacity keep counting rows.
    pub fn cell(&self, index: usize) -> (u32, u32) {
        let columns = self.columns as usize;
        ((index / columns) as u32, (index % columns) as u32)
    }

    /// UV rectangle of the cell at `index`.
    pub fn uv_rect(&self, index: usize) -> UvRect {
        let (row, col) = self.cell(index);
        UvRect::from_cell(row, col, *self)
    }

    /// Pixel bounds `(x, y, width, height)` of the cell at `index` on a square
    /// canvas of `atlas_size` pixels.
    ///
    /// Cell edges sit at `floor(c * atlas_size / columns)`, so the cells cover
    /// the canvas without gaps and each one lies under its [`UvRect`].
    pub fn pixel_rect(&self, index: usize, atlas_size: u32) -> (u32, u32, u32, u32) {
        let (row, col) = self.cell(index);
        let x0 = grid_edge(col, self.columns, atlas_size);
        let x1 = grid_edge(col + 1, self.columns, atlas_size);
        let y0 = grid_edge(row, self.rows, atlas_size);
        let y1 = grid_edge(row + 1, self.rows, atlas_size);
        (x0, y0, x1 - x0, y1 - y0)
    }
}

fn grid_edge(line: u32, cells: u32, size: u32) -> u32 {
    (line as u64 * size as u64 / cells.max(1) as u64) as u32
}

/// Stem shared by every saved atlas file.
pub const ATLAS_FILE_STEM: &str = "texture_atlas";

/// A physically-based-rendering input channel with its own atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapKind {
    Color,
    Normal,
    Emission,
    Roughness,
}

impl MapKind {
    /// All kinds, in canvas order.
    pub const ALL: [MapKind; 4] = [
        MapKind::Color,
        MapKind::Normal,
        MapKind::Emission,
        MapKind::Roughness,
    ];

    /// Auxiliary kinds; these may be synthesized from the color image.
    pub const AUXILIARY: [MapKind; 3] = [MapKind::Normal, MapKind::Emission, MapKind::Roughness];

    /// Position of this kind in [`MapKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            MapKind::Color => 0,
            MapKind::Normal => 1,
            MapKind::Emission => 2,
            MapKind::Roughness => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MapKind::Color => "color",
            MapKind::Normal => "normal",
            MapKind::Emission => "emission",
            MapKind::Roughness => "roughness",
        }
    }

    /// File name suffix for source images and atlases. Color has none.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            MapKind::Color => None,
            other => Some(other.name()),
        }
    }

    /// Output file name of this kind's atlas.
    pub fn atlas_file_name(self) -> String {
        match self.suffix() {
            Some(suffix) => format!("{}_{}.png", ATLAS_FILE_STEM, suffix),
            None => format!("{}.png", ATLAS_FILE_STEM),
        }
    }

    /// Pixel value an empty tile of this kind holds.
    pub fn default_fill(self) -> Rgba<u8> {
        match self {
            // Flat surface, normal pointing straight out of the tile.
            MapKind::Normal => Rgba([128, 128, 255, 255]),
            _ => Rgba([0, 0, 0, 0]),
        }
    }
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
