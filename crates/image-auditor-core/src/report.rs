use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::types::{DimensionRecord, DuplicateRecord, Inconsistency};
use crate::validation::{CheckKind, FailureReason};

/// Everything one audit pass found. Scoped to the pass and returned by
/// `ImageAuditor::run`; nothing here persists between runs.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    /// Path to file name for every audited file. By default this
    /// includes files that failed checks; `exclude_failed_files` opts
    /// into filtering them out.
    pub valid_images: BTreeMap<PathBuf, String>,

    /// Raw entry count per configured directory
    pub directory_sizes: BTreeMap<PathBuf, usize>,

    /// One entry per failed check, in pass order
    pub inconsistencies: Vec<Inconsistency>,

    /// Records synthesised for files without embedded metadata
    pub dimensions: Vec<DimensionRecord>,

    /// Files whose content was already seen earlier in the pass
    pub duplicates: Vec<DuplicateRecord>,

    #[serde(skip)]
    pub(crate) hash_index: HashMap<String, String>,
}

impl AuditReport {
    pub(crate) fn new(directory_sizes: BTreeMap<PathBuf, usize>) -> Self {
        Self {
            directory_sizes,
            ..Self::default()
        }
    }

    /// Append an inconsistency for a failed check
    pub fn record_inconsistency(&mut self, path: &Path, check: CheckKind, reason: &FailureReason) {
        self.inconsistencies.push(Inconsistency {
            file_path: path.to_path_buf(),
            error: check.error_label().to_string(),
            issue: reason.describe(),
        });
    }

    /// Append a synthesised dimension record
    pub fn record_dimensions(&mut self, record: DimensionRecord) {
        self.dimensions.push(record);
    }

    /// Append a duplicate record
    pub fn record_duplicate(&mut self, record: DuplicateRecord) {
        self.duplicates.push(record);
    }

    /// Insert a file into the valid-images mapping
    pub fn mark_valid(&mut self, path: &Path, file_name: &str) {
        self.valid_images
            .insert(path.to_path_buf(), file_name.to_string());
    }

    /// Content hash to first-seen file name, for diagnostics
    pub fn hash_index(&self) -> &HashMap<String, String> {
        &self.hash_index
    }

    /// Inconsistencies recorded with the given label
    pub fn inconsistencies_labelled(&self, label: &str) -> Vec<&Inconsistency> {
        self.inconsistencies
            .iter()
            .filter(|entry| entry.error == label)
            .collect()
    }

    /// True when the pass found at least one inconsistency or duplicate
    pub fn has_findings(&self) -> bool {
        !self.inconsistencies.is_empty() || !self.duplicates.is_empty()
    }
}

// -- Tests --
