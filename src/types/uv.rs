//! UV rectangles for grid cells.

use super::GridSpec;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Order in which [`UvRect::corners`] emits the four corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerOrder {
    /// Bottom-left, top-left, top-right, bottom-right.
    #[default]
    Standard,
    /// Same winding with `u_start` and `u_end` swapped (back faces).
    Mirrored,
}

/// Normalized bounds of one grid cell in atlas UV space.
///
/// V is flipped relative to raster rows: raster row 0 is the top of the
/// image, which is `v_end == 1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvRect {
    pub u_start: f32,
    pub u_end: f32,
    pub v_start: f32,
    pub v_end: f32,
}

impl UvRect {
    /// UV rectangle of grid cell `(row, col)`.
    pub fn from_cell(row: u32, col: u32, grid: GridSpec) -> Self {
        let columns = grid.columns as f32;
        let rows = grid.rows as f32;
        Self {
            u_start: col as f32 / columns,
            u_end: (col + 1) as f32 / columns,
            v_start: 1.0 - (row + 1) as f32 / rows,
            v_end: 1.0 - row as f32 / rows,
        }
    }

    pub fn width(&self) -> f32 {
        self.u_end - self.u_start
    }

    pub fn height(&self) -> f32 {
        self.v_end - self.v_start
    }

    /// Transform a local UV coordinate (0-1) to atlas coordinate.
    pub fn transform_uv(&self, u: f32, v: f32) -> Vec2 {
        Vec2::new(
            self.u_start + u * self.width(),
            self.v_start + v * self.height(),
        )
    }

    /// The four corners of the rectangle for a face.
    pub fn corners(&self, order: CornerOrder) -> [Vec2; 4] {
        let (left, right) = match order {
            CornerOrder::Standard => (self.u_start, self.u_end),
            CornerOrder::Mirrored => (self.u_end, self.u_start),
        };
        [
            Vec2::new(left, self.v_start),
            Vec2::new(left, self.v_end),
            Vec2::new(right, self.v_end),
            Vec2::new(right, self.v_start),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    #[test]
    fn test_first_cells() {
        let grid = GridSpec::default();

        let alpha = grid.uv_rect(0);
        assert!(approx(alpha.u_start, 0.0));
        assert!(approx(alpha.u_end, 0.1));
        assert!(approx(alpha.v_start, 0.9));
        assert!(approx(alpha.v_end, 1.0));

        let beta = grid.uv_rect(1);
        assert!(approx(beta.u_start, 0.1));
        assert!(approx(beta.u_end, 0.2));
        assert!(approx(beta.v_start, 0.9));
        assert!(approx(beta.v_end, 1.0));

        let last = grid.uv_rect(99);
        assert!(approx(last.u_end, 1.0));
        assert!(approx(last.v_start, 0.0));
    }

    #[test]
    fn test_uv_rect_is_deterministic() {
        for grid in [GridSpec::new(10, 10), GridSpec::new(4, 7), GridSpec::new(1, 1)] {
            for i in 0..grid.capacity() {
                let (row, col) = grid.cell(i);
                assert_eq!(grid.uv_rect(i), grid.uv_rect(i));
                assert_eq!(grid.uv_rect(i), UvRect::from_cell(row, col, grid));
            }
        }
    }

    #[test]
    fn test_rows_partition_unit_interval() {
        let grid = GridSpec::new(3, 8);
        let mut rows: Vec<UvRect> = (0..grid.rows).map(|r| UvRect::from_cell(r, 0, grid)).collect();

        assert_eq!(rows[0].v_end, 1.0);
        assert_eq!(rows.last().unwrap().v_start, 0.0);
        for window in rows.windows(2) {
            // Row r's bottom edge is exactly row r+1's top edge.
            assert_eq!(window[0].v_start, window[1].v_end);
        }
        for rect in rows.drain(..) {
            assert!(rect.height() > 0.0);
            assert!(approx(rect.v_start + rect.height(), rect.v_end));
        }
    }

    #[test]
    fn test_corner_orders() {
        let rect = UvRect {
            u_start: 0.2,
            u_end: 0.3,
            v_start: 0.5,
            v_end: 0.6,
        };

        let standard = rect.corners(CornerOrder::Standard);
        assert_eq!(standard[0], Vec2::new(0.2, 0.5));
        assert_eq!(standard[1], Vec2::new(0.2, 0.6));
        assert_eq!(standard[2], Vec2::new(0.3, 0.6));
        assert_eq!(standard[3], Vec2::new(0.3, 0.5));

        let mirrored = rect.corners(CornerOrder::Mirrored);
        assert_eq!(mirrored[0], Vec2::new(0.3, 0.5));
        assert_eq!(mirrored[2], Vec2::new(0.2, 0.6));
    }

    #[test]
    fn test_transform_uv() {
        let rect = UvRect {
            u_start: 0.25,
            u_end: 0.5,
            v_start: 0.5,
            v_end: 0.75,
        };

        let p = rect.transform_uv(0.0, 0.0);
        assert!(approx(p.x, 0.25));
        assert!(approx(p.y, 0.5));

        let p = rect.transform_uv(1.0, 1.0);
        assert!(approx(p.x, 0.5));
        assert!(approx(p.y, 0.75));
    }
}
