use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the image-auditor library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Embedded metadata error
    #[error("Metadata error: {0}")]
    Metadata(#[from] exif::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configured directory is missing or not a directory
    #[error("Invalid directory {}: {}", .path.display(), .reason)]
    InvalidDirectory { path: PathBuf, reason: &'static str },

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}
