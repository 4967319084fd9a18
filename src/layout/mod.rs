//! Scene placement plans.
//!
//! Turns snapshot records into plain placement data (boxes, signs and text
//! labels on a grid) that a host application instantiates in its own scene.

mod sizing;

pub use sizing::{
    export_file_stem, market_cap_height, SizingMode, BASE_CUBE, BILL_DEPTH, BILL_HEIGHT, BILL_WIDTH,
};

use crate::atlas::Placement;
use crate::snapshot::Record;
use crate::types::{Identifier, UvRect};
use glam::Vec3;
use std::collections::HashMap;
use std::f32::consts::PI;
use std::path::{Path, PathBuf};

/// Label tint for rising values.
pub const UP_COLOR: [f32; 4] = [0.1, 0.8, 0.2, 1.0];
/// Label tint for falling values.
pub const DOWN_COLOR: [f32; 4] = [0.85, 0.15, 0.15, 1.0];
/// Label tint for unchanged or new values.
pub const NEUTRAL_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Layout configuration.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Items per grid row.
    pub columns: u32,
    /// Distance between neighbouring grid positions.
    pub spacing: f32,
    pub sizing: SizingMode,
    /// Sign center relative to its grid position.
    pub sign_offset: Vec3,
    pub sign_dimensions: Vec3,
    /// Label anchor relative to the grid position, before the per-label height.
    pub label_offset: Vec3,
    /// Heights of the name, market cap and price labels.
    pub label_heights: [f32; 3],
    pub label_size: f32,
    pub label_extrude: f32,
    /// Euler XYZ rotation turning labels to face the front.
    pub label_rotation: Vec3,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            spacing: 1.0,
            sizing: SizingMode::MarketCap,
            sign_offset: Vec3::new(0.0, 0.2, 0.2),
            // Base cube of 0.5 scaled by (0.5, 0.125, 0.5).
            sign_dimensions: Vec3::new(0.25, 0.0625, 0.25),
            label_offset: Vec3::new(0.0, 0.2, 0.0),
            label_heights: [0.5, 0.45, 0.4],
            label_size: 0.075 * 0.7,
            label_extrude: 0.01,
            label_rotation: Vec3::new(PI / 2.0, 0.0, PI),
        }
    }
}

impl LayoutConfig {
    pub fn with_sizing(mut self, sizing: SizingMode) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_columns(mut self, columns: u32) -> Self {
        self.columns = columns;
        self
    }
}

/// Grid position of the `index`-th item: columns run along +X, rows along -Y.
pub fn grid_position(index: usize, columns: u32, spacing: f32) -> Vec3 {
    let columns = columns.max(1) as usize;
    Vec3::new(
        (index % columns) as f32 * spacing,
        -((index / columns) as f32) * spacing,
        0.0,
    )
}

/// Day-over-day movement of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
    /// No previous value to compare against.
    New,
}

impl Trend {
    pub fn between(current: f64, previous: Option<f64>) -> Self {
        match previous {
            None => Trend::New,
            Some(prev) if current > prev => Trend::Up,
            Some(prev) if current < prev => Trend::Down,
            Some(_) => Trend::Flat,
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            Trend::Up => UP_COLOR,
            Trend::Down => DOWN_COLOR,
            Trend::Flat | Trend::New => NEUTRAL_COLOR,
        }
    }
}

/// A box sized from a record value.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlan {
    /// Object name; the record name as written.
    pub name: String,
    pub identifier: Identifier,
    pub center: Vec3,
    pub dimensions: Vec3,
    /// File stem the host exports this box under, from [`export_file_stem`].
    pub export_stem: String,
}

/// A sign that displays the identifier's atlas tile.
#[derive(Debug, Clone, PartialEq)]
pub struct SignPlan {
    /// `{identifier}_sign`
    pub name: String,
    pub identifier: Identifier,
    pub center: Vec3,
    pub dimensions: Vec3,
    /// Atlas tile, once attached with [`ScenePlan::attach_uvs`].
    pub uv: Option<UvRect>,
}

/// Which value a label shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Name,
    MarketCap,
    Price,
}

impl LabelKind {
    pub fn suffix(self) -> &'static str {
        match self {
            LabelKind::Name => "name",
            LabelKind::MarketCap => "market_cap",
            LabelKind::Price => "price",
        }
    }
}

/// A floating text label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlan {
    /// `{identifier}_{kind suffix}`
    pub name: String,
    pub identifier: Identifier,
    pub kind: LabelKind,
    pub text: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub size: f32,
    pub extrude: f32,
    pub color: [f32; 4],
    pub trend: Trend,
}

/// Everything a host needs to build one day's scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenePlan {
    pub boxes: Vec<BoxPlan>,
    pub signs: Vec<SignPlan>,
    pub labels: Vec<LabelPlan>,
}

impl ScenePlan {
    /// Set each sign's UV rectangle from atlas placements with the same identifier.
    ///
    /// Returns the number of signs that received a rectangle.
    pub fn attach_uvs(&mut self, placements: &[Placement]) -> usize {
        let by_id: HashMap<&str, UvRect> = placements
            .iter()
            .rev()
            .map(|p| (p.identifier.as_str(), p.uv))
            .collect();

        let mut attached = 0;
        for sign in &mut self.signs {
            sign.uv = by_id.get(sign.identifier.as_str()).copied();
            if sign.uv.is_some() {
                attached += 1;
            }
        }
        attached
    }

    /// Export path `{dir}/{export_stem}.{extension}` for every box, in box order.
    pub fn export_paths(&self, dir: &Path, extension: &str) -> Vec<PathBuf> {
        self.boxes
            .iter()
            .map(|b| dir.join(format!("{}.{}", b.export_stem, extension)))
            .collect()
    }
}

/// Plan boxes, signs and labels for `records`.
///
/// `previous` is the prior snapshot; labels are tinted by the change of each
/// record's price (or sole value) against it. Records whose value cannot be
/// sized are logged and left without a box but keep their grid slot.
pub fn plan_scene(records: &[Record], previous: &[Record], config: &LayoutConfig) -> ScenePlan {
    let previous: HashMap<&str, f64> = previous
        .iter()
        .map(|r| (r.identifier.as_str(), r.price()))
        .collect();

    let mut plan = ScenePlan::default();
    for (index, record) in records.iter().enumerate() {
        let origin = grid_position(index, config.columns, config.spacing);
        let identifier = &record.identifier;

        let value = config.sizing.input(record);
        match config.sizing.dimensions(value) {
            Some(dimensions) => plan.boxes.push(BoxPlan {
                name: record.name.clone(),
                identifier: identifier.clone(),
                // Rest on the ground plane.
                center: origin + Vec3::new(0.0, 0.0, dimensions.z / 2.0),
                dimensions,
                export_stem: export_file_stem(&record.name),
            }),
            None => log::warn!("Cannot size '{}' from value {}", record.name, value),
        }

        plan.signs.push(SignPlan {
            name: format!("{}_sign", identifier),
            identifier: identifier.clone(),
            center: origin + config.sign_offset,
            dimensions: config.sign_dimensions,
            uv: None,
        });

        let trend = Trend::between(record.price(), previous.get(identifier.as_str()).copied());
        let mut texts = vec![(LabelKind::Name, record.name.clone())];
        if let Some(cap) = record.market_cap_text() {
            texts.push((LabelKind::MarketCap, cap.to_string()));
        }
        texts.push((LabelKind::Price, record.price_text().to_string()));

        for (kind, text) in texts {
            let height = match kind {
                LabelKind::Name => config.label_heights[0],
                LabelKind::MarketCap => config.label_heights[1],
                LabelKind::Price => config.label_heights[2],
            };
            plan.labels.push(LabelPlan {
                name: format!("{}_{}", identifier, kind.suffix()),
                identifier: identifier.clone(),
                kind,
                text,
                position: origin + config.label_offset + Vec3::new(0.0, 0.0, height),
                rotation: config.label_rotation,
                size: config.label_size,
                extrude: config.label_extrude,
                color: trend.color(),
                trend,
            });
        }
    }

    log::debug!(
        "Planned {} boxes, {} signs and {} labels",
        plan.boxes.len(),
        plan.signs.len(),
        plan.labels.len()
    );
    plan
}
