use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::scanner;

/// Configuration for a dataset audit pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Class-labelled image directories, in audit order
    pub images_dir: Vec<PathBuf>,

    /// Expected pixel width of every image
    pub width: u32,

    /// Expected pixel height of every image
    pub height: u32,

    /// Accepted decoded format names, e.g. "jpeg" or "png". Matched
    /// case-insensitively against the format guessed from file content,
    /// not against the file-name extension.
    pub extensions: Vec<String>,

    /// Stop checking a file after its first failed check
    #[serde(default)]
    pub skip_remaining_checks_on_failure: bool,

    /// Leave files that failed any check out of the valid-images mapping
    #[serde(default)]
    pub exclude_failed_files: bool,
}

impl AuditConfig {
    /// Create a configuration from the required fields
    pub fn new(
        images_dir: Vec<PathBuf>,
        width: u32,
        height: u32,
        extensions: Vec<String>,
    ) -> Self {
        Self {
            images_dir,
            width,
            height,
            extensions,
            skip_remaining_checks_on_failure: false,
            exclude_failed_files: false,
        }
    }

    /// Configure whether a failed check skips the remaining checks for that file
    pub fn with_skip_remaining_checks(mut self, enabled: bool) -> Self {
        self.skip_remaining_checks_on_failure = enabled;
        self
    }

    /// Configure whether failing files are excluded from the valid-images mapping
    pub fn with_exclude_failed_files(mut self, enabled: bool) -> Self {
        self.exclude_failed_files = enabled;
        self
    }

    /// Check that every configured directory exists and is a directory
    pub fn validate(&self) -> Result<()> {
        for dir in &self.images_dir {
            scanner::ensure_directory(dir)?;
        }
        Ok(())
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Save the configuration as a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Sample configuration written by `generate-config`
    pub fn example() -> Self {
        Self::new(
            vec![
                PathBuf::from("data/train/benign"),
                PathBuf::from("data/train/malignant"),
            ],
            224,
            224,
            vec!["jpeg".to_string()],
        )
    }
}

// -- Tests --
