//! Box sizing from record values.

use crate::snapshot::Record;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// US dollar bill footprint, in scene units (meters).
pub const BILL_WIDTH: f32 = 0.156;
pub const BILL_HEIGHT: f32 = 0.0665;
/// Thickness of one bill.
pub const BILL_DEPTH: f32 = 0.0043;

/// Edge length of the base cube that stacks are scaled from.
pub const BASE_CUBE: f32 = 0.5;

/// Scale factor applied to `log10(cap + 3)` before stacking.
pub const MARKET_CAP_SCALE: f32 = 0.1;
/// Exaggeration applied to log-scaled market cap heights.
pub const MARKET_CAP_EXAGGERATION: f32 = 1000.0;

/// How a record value becomes a box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMode {
    /// Cube with edge `cbrt(value)`.
    Volume,
    /// Cube whose volume is `value` bills of 0.0663 x 0.156 on a 2.61 x 6.14 reference.
    BillVolume,
    /// Stack of `value` bills.
    Stack,
    /// Stack height from the log-scaled market cap.
    #[default]
    MarketCap,
    /// Stack of `price` bills.
    Price,
}

impl SizingMode {
    /// The record value this mode sizes by.
    pub fn input(self, record: &Record) -> f64 {
        match self {
            SizingMode::MarketCap => record.market_cap().unwrap_or_else(|| record.value()),
            SizingMode::Price => record.price(),
            _ => record.value(),
        }
    }

    /// Dimensions of the box for `value`, or `None` when the value cannot be sized.
    pub fn dimensions(self, value: f64) -> Option<Vec3> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let value = value as f32;

        let dims = match self {
            SizingMode::Volume => Vec3::splat(value.cbrt()),
            SizingMode::BillVolume => {
                Vec3::splat((value * 0.0663 * 0.156 / (2.61 * 6.14)).cbrt())
            }
            SizingMode::Stack | SizingMode::Price => bill_stack(value * BILL_DEPTH),
            SizingMode::MarketCap => bill_stack(market_cap_height(value)),
        };
        Some(dims)
    }
}

/// Log-scaled stack scale for a market cap.
pub fn market_cap_height(value: f32) -> f32 {
    (value + 3.0).log10() * MARKET_CAP_SCALE * BILL_DEPTH * MARKET_CAP_EXAGGERATION
}

/// A base cube scaled to a bill footprint with the given vertical scale.
fn bill_stack(z_scale: f32) -> Vec3 {
    Vec3::new(BILL_WIDTH, BILL_HEIGHT, z_scale) * BASE_CUBE
}

/// Sanitize a display name into an export file stem
/// (`"Bitcoin Cash (BCH)"` -> `"Bitcoin_Cash_BCH"`).
pub fn export_file_stem(name: &str) -> String {
    name.trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '(' | ')'))
        .collect()
}
