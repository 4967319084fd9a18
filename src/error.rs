//! Error types for atlas building and snapshot handling.

use crate::types::MapKind;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using AtlasError.
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Main error type for atlas, synthesis and snapshot operations.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// Failed to parse or write JSON data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read, decode or encode an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required directory does not exist.
    #[error("Directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// The order/data file for a date does not exist.
    #[error("Order file not found: {}", .0.display())]
    MissingOrderFile(PathBuf),

    /// The data directory holds no snapshot files at all.
    #[error("No .txt snapshot files found in {}", .0.display())]
    NoDataFiles(PathBuf),

    /// Order parsing produced no identifiers.
    #[error("Order list is empty")]
    EmptyOrder,

    /// Order list length does not match the configured exact count.
    #[error("Expected {expected} identifiers in order list, got {actual}")]
    OrderCount { expected: usize, actual: usize },

    /// A snapshot line could not be parsed.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Invalid atlas or grid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A source image for an identifier could not be used.
    #[error("Asset error for '{identifier}': {message}")]
    Asset { identifier: String, message: String },

    /// An atlas canvas could not be written.
    #[error("Failed to save {kind} atlas to {}: {message}", .path.display())]
    Persist {
        kind: MapKind,
        path: PathBuf,
        message: String,
    },

    /// The host rejected an atlas application.
    #[error("Host error: {0}")]
    Host(String),
}

impl AtlasError {
    /// Whether this error aborts a build, as opposed to being skipped per item.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AtlasError::MissingDirectory(_)
                | AtlasError::MissingOrderFile(_)
                | AtlasError::NoDataFiles(_)
                | AtlasError::EmptyOrder
                | AtlasError::OrderCount { .. }
                | AtlasError::InvalidConfig(_)
        )
    }
}
