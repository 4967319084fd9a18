//! Source images from a directory following the naming convention.

use super::texture::{is_image_file, load_image};
use super::SourceImages;
use crate::error::{AtlasError, Result};
use crate::types::{Identifier, MapKind, ATLAS_FILE_STEM};
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Stem suffixes that mark a file as an auxiliary map rather than a base color image.
const AUXILIARY_SUFFIXES: [&str; 4] = ["_normal", "_depth", "_emission", "_roughness"];

/// A directory of source images, listed once when opened.
///
/// Entries are sorted by file name, so when several files share a stem
/// (`btc.png`, `btc.jpg`) the first by name wins on every filesystem.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    entries: Vec<PathBuf>,
}

impl DirectorySource {
    /// List the image files in `root`.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(AtlasError::MissingDirectory(root));
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&root)? {
            let path = entry?.path();
            // Follows symlinks.
            if path.is_file() && is_image_file(&path) {
                entries.push(path);
            }
        }
        entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        log::debug!("Found {} source images in {}", entries.len(), root.display());
        Ok(Self { root, entries })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All listed image files.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Find the source file for an identifier and kind.
    pub fn find(&self, identifier: &Identifier, kind: MapKind) -> Option<&Path> {
        let stem = identifier.source_stem(kind);
        self.entries
            .iter()
            .find(|path| file_stem(path) == Some(stem.as_str()))
            .map(PathBuf::as_path)
    }

    /// Image files that are base color images: no auxiliary suffix in the
    /// stem, and not an atlas saved by an earlier build.
    pub fn base_color_files(&self) -> impl Iterator<Item = &Path> + '_ {
        self.entries
            .iter()
            .filter(|path| file_stem(path).map(is_base_color_stem).unwrap_or(false))
            .map(PathBuf::as_path)
    }
}

impl SourceImages for DirectorySource {
    fn load(&self, identifier: &Identifier, kind: MapKind) -> Result<Option<RgbaImage>> {
        match self.find(identifier, kind) {
            Some(path) => load_image(path).map(Some).map_err(|e| AtlasError::Asset {
                identifier: identifier.to_string(),
                message: format!("{} ({})", e, path.display()),
            }),
            None => Ok(None),
        }
    }
}

fn is_base_color_stem(stem: &str) -> bool {
    !stem.starts_with(ATLAS_FILE_STEM) && !AUXILIARY_SUFFIXES.iter().any(|s| stem.ends_with(s))
}

fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}
