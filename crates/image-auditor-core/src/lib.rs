//! Core functionality for auditing labelled image datasets.
//!
//! This library provides the foundational components of a dataset audit:
//! - Flat per-class directory scanning
//! - Independent per-file quality checks
//! - Dimension synthesis for files without embedded metadata
//! - Corpus-wide duplicate detection via content hashing

// -- External Dependencies --
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::hashing::DuplicateIndex;
use crate::validation::CheckKind;

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::*;
pub use error::{Error, Result};
pub use report::AuditReport;
pub use types::*;

// -- Public Modules --
pub mod config;
pub mod hashing;
pub mod logging;
pub mod metadata;
pub mod report;
pub mod scanner;
pub mod types;
pub mod validation;

// -- Test Modules --
#[cfg(test)]
pub mod test_utils;

/// Main entry point for a dataset audit
pub struct ImageAuditor {
    config: AuditConfig,
}

impl ImageAuditor {
    /// Create a new ImageAuditor with the provided configuration
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Run the full audit pass and return everything it found.
    ///
    /// Fails fast with `InvalidDirectory` when a configured directory is
    /// missing; everything found at file level is data in the report,
    /// not an error.
    pub fn run(&self) -> Result<AuditReport> {
        info!("Auditing {} directories", self.config.images_dir.len());
        let outcome = scanner::scan_directories(&self.config.images_dir)?;
        info!("Found {} candidate images", outcome.files.len());

        let mut report = AuditReport::new(outcome.directory_sizes);
        let mut index = DuplicateIndex::new();

        let progress_bar = ProgressBar::new(outcome.files.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("[{eta}] {bar:40.cyan/blue} {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("##-"),
        );
        progress_bar.set_message("Auditing images...");

        for file in &outcome.files {
            let passed = self.audit_file(file, &mut report);

            // Every scanned file is hashed, whatever the checks found
            match index.register(&file.path, &file.file_name, &file.class) {
                Ok(Some(duplicate)) => report.record_duplicate(duplicate),
                Ok(None) => {}
                Err(err) => logging::log_audit_error(&file.path, "content_hash", &err),
            }

            if passed || !self.config.exclude_failed_files {
                report.mark_valid(&file.path, &file.file_name);
            }

            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        report.hash_index = index.into_inner();
        info!(
            "Audit complete: {} files, {} inconsistencies, {} duplicates",
            report.valid_images.len(),
            report.inconsistencies.len(),
            report.duplicates.len()
        );

        Ok(report)
    }

    /// Run the four checks against one file, in fixed order.
    ///
    /// A failed check records an inconsistency and keeps going unless
    /// `skip_remaining_checks_on_failure` is set. Returns whether every
    /// check passed.
    fn audit_file(&self, file: &ScannedFile, report: &mut AuditReport) -> bool {
        let config = &self.config;
        let mut passed = true;
        let mut skip_rest = false;

        let verdict = validation::check_format(&file.path, &config.extensions);
        if let Some(reason) = verdict.failure() {
            report.record_inconsistency(&file.path, CheckKind::Format, reason);
            passed = false;
            skip_rest = config.skip_remaining_checks_on_failure;
        }

        if !skip_rest {
            let verdict = validation::check_integrity(&file.path);
            if let Some(reason) = verdict.failure() {
                report.record_inconsistency(&file.path, CheckKind::Integrity, reason);
                passed = false;
                skip_rest = config.skip_remaining_checks_on_failure;
            }
        }

        if !skip_rest {
            let (verdict, _exif) = validation::check_metadata(&file.path);
            if let Some(reason) = verdict.failure() {
                report.record_inconsistency(&file.path, CheckKind::Metadata, reason);
                passed = false;
                skip_rest = config.skip_remaining_checks_on_failure;

                // A file without readable metadata still gets a dimension entry
                match metadata::synthesize_dimensions(&file.path, &file.class) {
                    Ok(record) => report.record_dimensions(record),
                    Err(err) => {
                        logging::log_audit_error(&file.path, "synthesize_dimensions", &err)
                    }
                }
            }
        }

        if !skip_rest {
            let verdict =
                validation::check_dimensions(&file.path, (config.width, config.height));
            if let Some(reason) = verdict.failure() {
                report.record_inconsistency(&file.path, CheckKind::Dimensions, reason);
                passed = false;
            }
        }

        passed
    }
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{write_empty_file, write_jpeg, write_jpeg_with_exif, write_png};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn jpeg_config(dirs: Vec<PathBuf>) -> AuditConfig {
        AuditConfig::new(dirs, 64, 64, vec!["jpeg".to_string()])
    }

    fn audit(config: AuditConfig) -> AuditReport {
        ImageAuditor::new(config).run().unwrap()
    }

    #[test]
    fn test_run_fails_on_missing_directory() {
        let config = jpeg_config(vec![PathBuf::from("/path/that/does/not/exist")]);
        let result = ImageAuditor::new(config).run();

        assert!(matches!(result, Err(Error::InvalidDirectory { .. })));
    }

    #[test]
    fn test_run_on_empty_directory() {
        let dir = tempdir().unwrap();
        let report = audit(jpeg_config(vec![dir.path().to_path_buf()]));

        assert!(report.valid_images.is_empty());
        assert!(report.inconsistencies.is_empty());
        assert!(report.duplicates.is_empty());
        assert_eq!(report.directory_sizes[dir.path()], 0);
    }

    #[test]
    fn test_clean_image_produces_no_findings() {
        let dir = tempdir().unwrap();
        let path = write_jpeg_with_exif(dir.path(), "clean.jpg", 64, 64, 0);

        let report = audit(jpeg_config(vec![dir.path().to_path_buf()]));

        assert!(report.inconsistencies.is_empty());
        assert!(report.duplicates.is_empty());
        assert!(report.dimensions.is_empty());
        assert_eq!(report.valid_images[&path], "clean.jpg");
    }

    #[test]
    fn test_zero_byte_file_fails_every_check_but_stays_valid() {
        let dir = tempdir().unwrap();
        write_jpeg_with_exif(dir.path(), "ok.jpg", 64, 64, 0);
        let empty = write_empty_file(dir.path(), "empty.jpg");

        let report = audit(jpeg_config(vec![dir.path().to_path_buf()]));

        // One integrity finding, and no check was skipped after it
        let integrity = report.inconsistencies_labelled("Corrupted or empty file");
        assert_eq!(integrity.len(), 1);
        assert_eq!(integrity[0].file_path, empty);
        assert_eq!(report.inconsistencies.len(), 4);
        assert!(report
            .inconsistencies
            .iter()
            .all(|entry| entry.file_path == empty));

        // Synthesis cannot decode the file, so no dimension entry appears
        assert!(report.dimensions.is_empty());

        // Failing files stay in the valid mapping by default
        assert_eq!(report.valid_images.len(), 2);
        assert_eq!(report.valid_images[&empty], "empty.jpg");
    }

    #[test]
    fn test_missing_metadata_synthesizes_dimension_record() {
        let dir = tempdir().unwrap();
        let path = write_jpeg(dir.path(), "plain.jpg", 64, 64, 0);

        let report = audit(jpeg_config(vec![dir.path().to_path_buf()]));

        assert_eq!(report.inconsistencies.len(), 1);
        assert_eq!(report.inconsistencies[0].error, "No metadata");

        assert_eq!(report.dimensions.len(), 1);
        let record = &report.dimensions[0];
        assert_eq!(record.image_name, "plain.jpg");
        assert_eq!(record.width, 64);
        assert_eq!(record.height, 64);
        assert_eq!(record.class, dir.path().to_string_lossy());

        assert_eq!(report.valid_images[&path], "plain.jpg");
    }

    #[test]
    fn test_dimension_mismatch_is_flagged() {
        let dir = tempdir().unwrap();
        write_jpeg_with_exif(dir.path(), "small.jpg", 32, 48, 0);

        let report = audit(jpeg_config(vec![dir.path().to_path_buf()]));

        let mismatches = report.inconsistencies_labelled("Dimension mismatch");
        assert_eq!(mismatches.len(), 1);
        assert!(mismatches[0].issue.contains("32x48"));
        assert!(mismatches[0].issue.contains("64x64"));
    }

    #[test]
    fn test_duplicate_across_classes_reported_once() {
        let root = tempdir().unwrap();
        let benign = root.path().join("benign");
        let malignant = root.path().join("malignant");
        fs::create_dir(&benign).unwrap();
        fs::create_dir(&malignant).unwrap();
        write_jpeg(&benign, "a.jpg", 64, 64, 7);
        write_jpeg(&malignant, "z.jpg", 64, 64, 7);

        let report = audit(jpeg_config(vec![benign.clone(), malignant.clone()]));

        assert_eq!(report.duplicates.len(), 1);
        let record = &report.duplicates[0];
        assert_eq!(record.image_name, "z.jpg");
        assert_eq!(record.class, malignant.to_string_lossy());
        assert_eq!(record.duplicate_of, "a.jpg");

        // The index keeps the first-seen name for the shared content
        assert_eq!(report.hash_index().len(), 1);
        assert!(report.hash_index().values().any(|name| name == "a.jpg"));
    }

    #[test]
    fn test_every_copy_points_at_first_occurrence() {
        let dir = tempdir().unwrap();
        write_jpeg(dir.path(), "a.jpg", 64, 64, 3);
        write_jpeg(dir.path(), "b.jpg", 64, 64, 3);
        write_jpeg(dir.path(), "c.jpg", 64, 64, 3);

        let report = audit(jpeg_config(vec![dir.path().to_path_buf()]));

        assert_eq!(report.duplicates.len(), 2);
        assert!(report
            .duplicates
            .iter()
            .all(|record| record.duplicate_of == "a.jpg"));
    }

    #[test]
    fn test_disallowed_format_flagged_once() {
        let dir = tempdir().unwrap();
        write_png(dir.path(), "sneaky.png", 64, 64, 0);

        let report = audit(jpeg_config(vec![dir.path().to_path_buf()]));

        let findings = report.inconsistencies_labelled("Invalid extension");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].issue.contains("png"));
    }

    #[test]
    fn test_rerun_produces_identical_report() {
        let root = tempdir().unwrap();
        let benign = root.path().join("benign");
        let malignant = root.path().join("malignant");
        fs::create_dir(&benign).unwrap();
        fs::create_dir(&malignant).unwrap();
        write_jpeg_with_exif(&benign, "clean.jpg", 64, 64, 0);
        write_jpeg(&benign, "plain.jpg", 64, 64, 1);
        write_jpeg(&malignant, "copy.jpg", 64, 64, 1);
        write_empty_file(&malignant, "empty.jpg");

        let config = jpeg_config(vec![benign, malignant]);
        let first = audit(config.clone());
        let second = audit(config);

        assert_eq!(first, second);
    }

    #[test]
    fn test_skip_remaining_checks_on_failure() {
        let dir = tempdir().unwrap();
        let first = write_empty_file(dir.path(), "e1.jpg");
        let second = write_empty_file(dir.path(), "e2.jpg");

        let config =
            jpeg_config(vec![dir.path().to_path_buf()]).with_skip_remaining_checks(true);
        let report = audit(config);

        // Each file fails the format check and nothing after it runs
        assert_eq!(report.inconsistencies.len(), 2);
        assert!(report
            .inconsistencies
            .iter()
            .all(|entry| entry.error == "Invalid extension"));
        assert!(report.dimensions.is_empty());

        // Skipped files are still hashed and still mapped
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.duplicates[0].duplicate_of, "e1.jpg");
        assert_eq!(report.valid_images[&first], "e1.jpg");
        assert_eq!(report.valid_images[&second], "e2.jpg");
    }

    #[test]
    fn test_exclude_failed_files_filters_valid_mapping() {
        let dir = tempdir().unwrap();
        let clean = write_jpeg_with_exif(dir.path(), "clean.jpg", 64, 64, 0);
        write_empty_file(dir.path(), "empty.jpg");

        let config = jpeg_config(vec![dir.path().to_path_buf()]).with_exclude_failed_files(true);
        let report = audit(config);

        assert_eq!(report.valid_images.len(), 1);
        assert_eq!(report.valid_images[&clean], "clean.jpg");

        // The excluded file was still audited and hashed
        assert!(!report.inconsistencies.is_empty());
        assert_eq!(report.hash_index().len(), 2);
    }
}
