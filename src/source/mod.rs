//! Source image lookup.
//!
//! Atlas assembly asks a [`SourceImages`] implementation for the image of an
//! identifier and map kind. [`DirectorySource`] follows the on-disk naming
//! convention (`{identifier}.png`, `{identifier}_normal.png`, ...);
//! [`MemorySource`] holds images that are already decoded.

mod directory;
pub mod texture;

pub use directory::DirectorySource;

use crate::error::Result;
use crate::types::{Identifier, MapKind};
use image::RgbaImage;
use std::collections::HashMap;

/// Trait for source image providers.
pub trait SourceImages {
    /// Load the image for an identifier and kind.
    ///
    /// `Ok(None)` means no source exists; `Err` means a source exists but could
    /// not be used.
    fn load(&self, identifier: &Identifier, kind: MapKind) -> Result<Option<RgbaImage>>;
}

/// In-memory source images keyed by identifier and kind.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    images: HashMap<(String, MapKind), RgbaImage>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image for an identifier and kind, replacing any previous one.
    pub fn insert(&mut self, identifier: impl Into<String>, kind: MapKind, image: RgbaImage) {
        self.images.insert((identifier.into(), kind), image);
    }

    pub fn with(mut self, identifier: impl Into<String>, kind: MapKind, image: RgbaImage) -> Self {
        self.insert(identifier, kind, image);
        self
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl SourceImages for MemorySource {
    fn load(&self, identifier: &Identifier, kind: MapKind) -> Result<Option<RgbaImage>> {
        Ok(self
            .images
            .get(&(identifier.as_str().to_string(), kind))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::texture::solid_image;
    use super::*;

    #[test]
    fn test_memory_source_lookup() {
        let source = MemorySource::new()
            .with("btc", MapKind::Color, solid_image(2, 2, [255, 0, 0, 255]))
            .with("btc", MapKind::Normal, solid_image(2, 2, [128, 128, 255, 255]));
        assert_eq!(source.len(), 2);

        let btc = Identifier::sanitize("btc").unwrap();
        assert!(source.load(&btc, MapKind::Color).unwrap().is_some());
        assert!(source.load(&btc, MapKind::Normal).unwrap().is_some());
        assert!(source.load(&btc, MapKind::Emission).unwrap().is_none());

        let eth = Identifier::sanitize("eth").unwrap();
        assert!(source.load(&eth, MapKind::Color).unwrap().is_none());
    }
}
