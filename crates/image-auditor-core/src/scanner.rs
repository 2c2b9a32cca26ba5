use log::{debug, info};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::{ImageFormat, ScannedFile};

/// Result of scanning the configured class directories
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Candidate image files, in directory order then file-name order
    pub files: Vec<ScannedFile>,

    /// Raw entry count per directory, recorded before any filtering
    pub directory_sizes: BTreeMap<PathBuf, usize>,
}

/// Scan the class directories and collect candidate image files.
///
/// Each directory maps to one class; its label is the configured path
/// rendered as a string. Listing is flat: subdirectories count towards
/// the directory size but are never descended into. Entries are sorted
/// by file name so results are reproducible across platforms.
pub fn scan_directories(directories: &[PathBuf]) -> Result<ScanOutcome> {
    let mut files = Vec::new();
    let mut directory_sizes = BTreeMap::new();

    for dir in directories {
        ensure_directory(dir)?;
        info!("Scanning directory {}", dir.display());

        // Raw listing count, taken before extension filtering
        let entry_count = fs::read_dir(dir)?.count();
        directory_sizes.insert(dir.clone(), entry_count);

        let class = dir.to_string_lossy().into_owned();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if !is_image_path(entry.path()) {
                debug!("Skipping non-image entry {}", entry.path().display());
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().into_owned();
            files.push(ScannedFile {
                path: entry.into_path(),
                file_name,
                class: class.clone(),
            });
        }
    }

    Ok(ScanOutcome {
        files,
        directory_sizes,
    })
}

/// Fail with `InvalidDirectory` unless the path is an existing directory
pub fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(Error::InvalidDirectory {
            path: dir.to_path_buf(),
            reason: "does not exist",
        });
    }
    if !dir.is_dir() {
        return Err(Error::InvalidDirectory {
            path: dir.to_path_buf(),
            reason: "is not a directory",
        });
    }
    Ok(())
}

/// Returns if the given path has a recognised image extension
pub fn is_image_path(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => ImageFormat::from_extension(ext).is_supported(),
        None => false,
    }
}

// -- Tests --
