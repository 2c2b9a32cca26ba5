//! Embedded metadata access and dimension synthesis.

use exif::{In, Tag};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Result;
use crate::types::DimensionRecord;

/// Summary of the embedded metadata block of an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifSummary {
    /// Number of decoded metadata fields
    pub field_count: usize,

    /// Camera manufacturer, if recorded
    pub camera_make: Option<String>,

    /// Camera model, if recorded
    pub camera_model: Option<String>,

    /// Original capture timestamp, if recorded
    pub captured_at: Option<String>,
}

/// Decode the embedded metadata block of an image file.
///
/// Returns an error when the file cannot be read or carries no
/// parseable metadata container.
pub fn read_exif(path: &Path) -> Result<ExifSummary> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut reader)?;

    let field_count = exif.fields().len();
    let text = |tag: Tag| {
        exif.get_field(tag, In::PRIMARY)
            .map(|field| field.display_value().to_string())
    };

    Ok(ExifSummary {
        field_count,
        camera_make: text(Tag::Make),
        camera_model: text(Tag::Model),
        captured_at: text(Tag::DateTimeOriginal),
    })
}

/// Build a dimension record for a file whose metadata is missing.
///
/// Reads width and height from the image header. The class label is
/// supplied by the caller so the same labelling convention holds
/// everywhere in a pass. Failures are returned for the caller to log;
/// no record is produced.
pub fn synthesize_dimensions(path: &Path, class: &str) -> Result<DimensionRecord> {
    let (width, height) = image::image_dimensions(path)?;
    let image_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(DimensionRecord {
        image_name,
        width,
        height,
        class: class.to_string(),
    })
}

// -- Tests --
