//! Atlas canvases, one per map kind.

use crate::error::Result;
use crate::source::texture::encode_png;
use crate::types::MapKind;
use image::{imageops, RgbaImage};
use std::path::Path;

/// A square RGBA canvas for one map kind.
#[derive(Debug, Clone)]
pub struct AtlasCanvas {
    kind: MapKind,
    image: RgbaImage,
}

impl AtlasCanvas {
    /// Create a canvas filled with the kind's default pixel.
    pub fn new(kind: MapKind, size: u32) -> Self {
        Self {
            kind,
            image: RgbaImage::from_pixel(size, size, kind.default_fill()),
        }
    }

    pub fn kind(&self) -> MapKind {
        self.kind
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Overwrite the pixels under `tile` with its top-left corner at `(x, y)`.
    ///
    /// Source alpha is copied, not blended. Pixels falling outside the canvas
    /// are dropped.
    pub fn place(&mut self, x: u32, y: u32, tile: &RgbaImage) {
        imageops::replace(&mut self.image, tile, x as i64, y as i64);
    }

    /// Export the canvas as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.image)
    }

    /// Write the canvas as a PNG file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.to_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Canvases for a build, indexed by [`MapKind::index`].
#[derive(Debug, Clone, Default)]
pub struct AtlasSet {
    canvases: [Option<AtlasCanvas>; 4],
}

impl AtlasSet {
    /// Allocate a canvas of side `size` for each kind.
    pub fn new(kinds: &[MapKind], size: u32) -> Self {
        let mut set = Self::default();
        for &kind in kinds {
            set.canvases[kind.index()] = Some(AtlasCanvas::new(kind, size));
        }
        set
    }

    pub fn get(&self, kind: MapKind) -> Option<&AtlasCanvas> {
        self.canvases[kind.index()].as_ref()
    }

    pub fn get_mut(&mut self, kind: MapKind) -> Option<&mut AtlasCanvas> {
        self.canvases[kind.index()].as_mut()
    }

    /// Allocated canvases in kind order.
    pub fn iter(&self) -> impl Iterator<Item = &AtlasCanvas> {
        self.canvases.iter().flatten()
    }

    pub fn kinds(&self) -> Vec<MapKind> {
        self.iter().map(AtlasCanvas::kind).collect()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::texture::{load_image_from_bytes, solid_image};
    use image::Rgba;

    #[test]
    fn test_canvas_default_fill() {
        let color = AtlasCanvas::new(MapKind::Color, 8);
        assert!(color.image().pixels().all(|p| *p == Rgba([0, 0, 0, 0])));

        let normal = AtlasCanvas::new(MapKind::Normal, 8);
        assert!(normal.image().pixels().all(|p| *p == Rgba([128, 128, 255, 255])));
    }

    #[test]
    fn test_place_overwrites_fully() {
        let mut canvas = AtlasCanvas::new(MapKind::Normal, 8);
        // Transparent source replaces the opaque background instead of blending.
        canvas.place(2, 2, &solid_image(2, 2, [10, 20, 30, 0]));

        assert_eq!(canvas.image().get_pixel(2, 2), &Rgba([10, 20, 30, 0]));
        assert_eq!(canvas.image().get_pixel(3, 3), &Rgba([10, 20, 30, 0]));
        assert_eq!(canvas.image().get_pixel(4, 4), &Rgba([128, 128, 255, 255]));
    }

    #[test]
    fn test_place_clips_at_edge() {
        let mut canvas = AtlasCanvas::new(MapKind::Color, 4);
        canvas.place(3, 3, &solid_image(4, 4, [255, 255, 255, 255]));
        assert_eq!(canvas.image().dimensions(), (4, 4));
        assert_eq!(canvas.image().get_pixel(3, 3), &Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.image().get_pixel(2, 2), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_to_png() {
        let canvas = AtlasCanvas::new(MapKind::Normal, 4);
        let decoded = load_image_from_bytes(&canvas.to_png().unwrap()).unwrap();
        assert_eq!(&decoded, canvas.image());
    }

    #[test]
    fn test_atlas_set_arena() {
        let set = AtlasSet::new(&[MapKind::Roughness, MapKind::Color], 16);
        assert_eq!(set.len(), 2);
        assert_eq!(set.kinds(), vec![MapKind::Color, MapKind::Roughness]);
        assert!(set.get(MapKind::Normal).is_none());
        assert_eq!(set.get(MapKind::Roughness).unwrap().image().width(), 16);
    }
}
