use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Image formats the auditor recognises
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
    Tiff,
    Bmp,
    Other(String),
}

impl ImageFormat {
    /// Determine format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            "png" => Self::Png,
            "gif" => Self::Gif,
            "webp" => Self::WebP,
            "tif" | "tiff" => Self::Tiff,
            "bmp" => Self::Bmp,
            other => Self::Other(other.to_string()),
        }
    }

    /// Determine format from the decoder's content-based guess
    pub fn from_decoded(format: image::ImageFormat) -> Self {
        match format {
            image::ImageFormat::Jpeg => Self::Jpeg,
            image::ImageFormat::Png => Self::Png,
            image::ImageFormat::Gif => Self::Gif,
            image::ImageFormat::WebP => Self::WebP,
            image::ImageFormat::Tiff => Self::Tiff,
            image::ImageFormat::Bmp => Self::Bmp,
            other => Self::Other(format!("{:?}", other).to_lowercase()),
        }
    }

    /// Canonical lowercase name, as matched against the configured format list
    pub fn name(&self) -> &str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::WebP => "webp",
            Self::Tiff => "tiff",
            Self::Bmp => "bmp",
            Self::Other(name) => name,
        }
    }

    /// Check if format is supported
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

/// A candidate file yielded by the directory scanner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedFile {
    /// Full path to the image file
    pub path: PathBuf,

    /// File name component of the path
    pub file_name: String,

    /// Class label of the containing directory
    pub class: String,
}

/// A single failed check for a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inconsistency {
    /// File the check ran against
    pub file_path: PathBuf,

    /// Canonical label of the failed check
    pub error: String,

    /// Detail of why the check failed
    pub issue: String,
}

/// Dimensions synthesised for a file whose embedded metadata is missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionRecord {
    /// File name of the image
    pub image_name: String,

    /// Decoded pixel width
    pub width: u32,

    /// Decoded pixel height
    pub height: u32,

    /// Class label of the containing directory
    pub class: String,
}

/// A file whose content was already seen earlier in the pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRecord {
    /// File name of the duplicate
    pub image_name: String,

    /// Class label of the duplicate's directory
    pub class: String,

    /// File name of the first-seen copy. Names are not disambiguated
    /// across directories; the full path is not retained here.
    pub duplicate_of: String,
}
