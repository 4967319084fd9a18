//! Texture atlas building.
//!
//! This module tiles per-identifier source images into fixed-size grid
//! atlases, one per map kind, and records the UV rectangle of every tile.

mod builder;
mod canvas;
mod config;
mod report;

pub use builder::{AtlasBuild, AtlasBuilder};
pub use canvas::{AtlasCanvas, AtlasSet};
pub use config::{AtlasConfig, OverflowPolicy, ResampleFilter, MAX_ATLAS_SIZE};
pub use report::{AtlasFiles, AtlasReport, ManifestItem, Placement, UvManifest, UV_MANIFEST_FILE};
