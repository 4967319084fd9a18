//! # Market Atlas
//!
//! A Rust library for turning daily market snapshots into texture atlases and
//! scene placement data.
//!
//! ## Overview
//!
//! Each day's snapshot (`data/MM-DD-YYYY.txt`) lists named records. Every
//! record gets a grid cell: its source image (`images/MM-DD-YYYY/{name}.png`)
//! is tiled into a fixed-size atlas, normal/emission/roughness maps are
//! synthesized when no explicit file exists, and the cell's UV rectangle is
//! handed to the host application that owns the 3D scene.
//!
//! ## Quick Start
//!
//! ```ignore
//! use market_atlas::{build_daily_atlas, AtlasConfig, Workspace};
//!
//! let workspace = Workspace::new("/srv/market-viz");
//! let date = market_atlas::snapshot::today();
//!
//! let report = build_daily_atlas(&workspace, date, &AtlasConfig::default().with_pbr_maps())?;
//! for placement in &report.placements {
//!     println!("{} -> {:?}", placement.identifier, placement.uv);
//! }
//! ```
//!
//! ## Host Integration
//!
//! Implement [`AtlasHost`] to apply the saved atlases to scene objects:
//!
//! ```ignore
//! struct MyScene { /* ... */ }
//!
//! impl AtlasHost for MyScene {
//!     fn apply_atlas(&mut self, id: &Identifier, files: &AtlasFiles, uv: &UvRect) -> Result<()> {
//!         // Create the material from files[&MapKind::Color], set face UVs from uv.corners(..)
//!         Ok(())
//!     }
//! }
//!
//! report.apply_to(&mut my_scene);
//! ```

pub mod error;
pub mod types;
pub mod source;
pub mod synth;
pub mod atlas;
pub mod snapshot;
pub mod layout;
pub mod host;

// Re-export main types for convenience
pub use error::{AtlasError, Result};
pub use types::{CornerOrder, GridSpec, Identifier, MapKind, OrderList, UvRect};
pub use source::{DirectorySource, MemorySource, SourceImages};
pub use synth::{synthesize_directory, MapSynthesizer, SynthesisConfig, SynthesizedMaps};
pub use atlas::{
    AtlasBuild, AtlasBuilder, AtlasConfig, AtlasFiles, AtlasReport, OverflowPolicy, Placement,
    ResampleFilter, UvManifest,
};
pub use snapshot::{OrderConfig, Record, Workspace};
pub use layout::{plan_scene, LayoutConfig, ScenePlan, SizingMode};
pub use host::{ApplySummary, AtlasHost};

use chrono::NaiveDate;

/// Build the atlases for one day of a workspace.
///
/// Reads the order from `data/MM-DD-YYYY.txt`, sources from
/// `images/MM-DD-YYYY/`, and writes the atlases plus a UV manifest into that
/// same image directory.
pub fn build_daily_atlas(workspace: &Workspace, date: NaiveDate, config: &AtlasConfig) -> Result<AtlasReport> {
    build_daily_atlas_with(workspace, date, config, &OrderConfig::default())
}

/// [`build_daily_atlas`] with explicit order parsing options.
pub fn build_daily_atlas_with(
    workspace: &Workspace,
    date: NaiveDate,
    config: &AtlasConfig,
    order_config: &OrderConfig,
) -> Result<AtlasReport> {
    config.validate()?;
    let images_dir = workspace.images_dir(date);
    let source = DirectorySource::open(&images_dir)?;
    let order = workspace.read_order(date, order_config)?;

    let report = AtlasBuilder::new(config.clone())
        .build(&order, &source)?
        .save(&images_dir);

    if let Err(e) = report.write_uv_manifest(images_dir.join(atlas::UV_MANIFEST_FILE), config.corner_order) {
        log::warn!("Failed to write UV manifest: {}", e);
    }
    Ok(report)
}

/// Plan the scene for one day, tinting labels against the previous snapshot.
pub fn plan_daily_scene(workspace: &Workspace, date: NaiveDate, config: &LayoutConfig) -> Result<ScenePlan> {
    let records = workspace.read_records(date)?;
    let previous = workspace.read_previous_records(date)?;
    Ok(plan_scene(&records, &previous, config))
}

/// Create `files/MM-DD-YYYY/` and return the export path of every box in `plan`.
pub fn daily_export_paths(
    workspace: &Workspace,
    date: NaiveDate,
    plan: &ScenePlan,
    extension: &str,
) -> Result<Vec<std::path::PathBuf>> {
    let dir = workspace.ensure_files_dir(date)?;
    Ok(plan.export_paths(&dir, extension))
}
