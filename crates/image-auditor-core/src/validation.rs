//! The four per-file audit checks.
//!
//! Each check is independently callable and resolves to a verdict, never
//! an error: a file that cannot be opened or decoded fails the check
//! that was looking at it. The audit pass runs all four in a fixed order
//! and records one inconsistency per failed check.

use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::metadata::{self, ExifSummary};
use crate::types::ImageFormat;

/// The four audit checks, in pass order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Format,
    Integrity,
    Metadata,
    Dimensions,
}

impl CheckKind {
    /// Canonical label recorded on an inconsistency for this check
    pub fn error_label(self) -> &'static str {
        match self {
            Self::Format => "Invalid extension",
            Self::Integrity => "Corrupted or empty file",
            Self::Metadata => "No metadata",
            Self::Dimensions => "Dimension mismatch",
        }
    }
}

/// Outcome of a single check against a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckVerdict {
    Pass,
    Fail(FailureReason),
}

impl CheckVerdict {
    pub fn passed(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            Self::Pass => None,
            Self::Fail(reason) => Some(reason),
        }
    }
}

/// Why a check failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Decoded format is not in the configured allowed list
    DisallowedFormat { detected: String },

    /// No known image format matches the file content
    UnknownFormat,

    /// File is zero bytes long
    EmptyFile,

    /// File has content but does not decode as an image
    CorruptImage { detail: String },

    /// No embedded metadata block was found
    NoMetadata,

    /// Decoded dimensions differ from the configured expectation
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    /// File could not be opened or read by the active check
    Unreadable { detail: String },
}

impl FailureReason {
    /// Human-readable detail recorded in the `issue` field
    pub fn describe(&self) -> String {
        match self {
            Self::DisallowedFormat { detected } => {
                format!("decoded format `{}` is not in the allowed list", detected)
            }
            Self::UnknownFormat => {
                "could not determine an image format from file content".to_string()
            }
            Self::EmptyFile => "file is empty (0 bytes)".to_string(),
            Self::CorruptImage { detail } => {
                format!("image failed structural verification: {}", detail)
            }
            Self::NoMetadata => "no embedded metadata block was found".to_string(),
            Self::DimensionMismatch { expected, found } => format!(
                "decoded dimensions {}x{} do not match expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::Unreadable { detail } => format!("file could not be read: {}", detail),
        }
    }
}

/// Check that the decoded image format is in the allowed list.
///
/// The format is guessed from file content, never from the file-name
/// extension, and compared case-insensitively against `allowed`.
pub fn check_format(path: &Path, allowed: &[String]) -> CheckVerdict {
    let reader = match image::io::Reader::open(path).and_then(|r| r.with_guessed_format()) {
        Ok(reader) => reader,
        Err(err) => {
            return CheckVerdict::Fail(FailureReason::Unreadable {
                detail: err.to_string(),
            })
        }
    };

    match reader.format() {
        Some(format) => {
            let format = ImageFormat::from_decoded(format);
            if allowed
                .iter()
                .any(|name| name.eq_ignore_ascii_case(format.name()))
            {
                CheckVerdict::Pass
            } else {
                CheckVerdict::Fail(FailureReason::DisallowedFormat {
                    detected: format.name().to_string(),
                })
            }
        }
        None => CheckVerdict::Fail(FailureReason::UnknownFormat),
    }
}

/// Check that the file is non-empty and decodes as an image
pub fn check_integrity(path: &Path) -> CheckVerdict {
    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(err) => {
            return CheckVerdict::Fail(FailureReason::Unreadable {
                detail: err.to_string(),
            })
        }
    };
    if size == 0 {
        return CheckVerdict::Fail(FailureReason::EmptyFile);
    }

    let reader = match image::io::Reader::open(path).and_then(|r| r.with_guessed_format()) {
        Ok(reader) => reader,
        Err(err) => {
            return CheckVerdict::Fail(FailureReason::Unreadable {
                detail: err.to_string(),
            })
        }
    };
    match reader.decode() {
        Ok(_) => CheckVerdict::Pass,
        Err(err) => CheckVerdict::Fail(FailureReason::CorruptImage {
            detail: err.to_string(),
        }),
    }
}

/// Check that the file carries a non-empty embedded metadata block.
///
/// Also returns the decoded summary on success; the audit pass only
/// consumes the verdict.
pub fn check_metadata(path: &Path) -> (CheckVerdict, Option<ExifSummary>) {
    match metadata::read_exif(path) {
        Ok(summary) if summary.field_count > 0 => (CheckVerdict::Pass, Some(summary)),
        Ok(_) => (CheckVerdict::Fail(FailureReason::NoMetadata), None),
        Err(Error::Io(err)) => (
            CheckVerdict::Fail(FailureReason::Unreadable {
                detail: err.to_string(),
            }),
            None,
        ),
        Err(_) => (CheckVerdict::Fail(FailureReason::NoMetadata), None),
    }
}

/// Check that the decoded dimensions equal the expected width and height
pub fn check_dimensions(path: &Path, expected: (u32, u32)) -> CheckVerdict {
    match image::image_dimensions(path) {
        Ok(found) if found == expected => CheckVerdict::Pass,
        Ok(found) => CheckVerdict::Fail(FailureReason::DimensionMismatch { expected, found }),
        Err(err) => CheckVerdict::Fail(FailureReason::Unreadable {
            detail: err.to_string(),
        }),
    }
}

// -- Tests --
