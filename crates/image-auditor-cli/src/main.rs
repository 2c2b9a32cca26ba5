use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use image_auditor_core::{logging, AuditConfig, AuditReport, ImageAuditor};

#[derive(Parser)]
#[command(name = "image-auditor")]
#[command(about = "Audit labelled image datasets for inconsistencies and duplicates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit class directories and report findings
    Audit {
        /// Class-labelled directories to audit
        #[arg(required = true)]
        directories: Vec<PathBuf>,

        /// Expected image width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Expected image height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Accepted decoded format name, e.g. jpeg (repeatable)
        #[arg(long = "format", value_name = "NAME")]
        formats: Vec<String>,

        /// Stop checking a file after its first failed check
        #[arg(long)]
        skip_remaining_checks: bool,

        /// Leave failing files out of the valid-images mapping
        #[arg(long)]
        exclude_failed: bool,

        /// Write the full report to a JSON file
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Write logs to rotating files in this directory
        #[arg(long, value_name = "DIR")]
        log_dir: Option<PathBuf>,

        /// Verbosity level
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate a sample configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "image-auditor.json")]
        path: PathBuf,
    },
}

fn main() -> Result<(), anyhow::Error> {
    // Parse command line arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Audit {
            directories,
            width,
            height,
            formats,
            skip_remaining_checks,
            exclude_failed,
            report,
            log_dir,
            verbose,
            config,
        } => {
            // File logging replaces console logging when requested
            if let Some(dir) = &log_dir {
                logging::init_logger(&dir.to_string_lossy())?;
            } else {
                let filter = match verbose {
                    0 => "info",
                    1 => "debug",
                    _ => "trace",
                };
                env_logger::Builder::from_env(
                    env_logger::Env::default().default_filter_or(filter),
                )
                .init();
            }

            // Set up configuration
            let mut config = if let Some(config_path) = config {
                // Load config from file
                AuditConfig::from_file(&config_path)?
            } else {
                let width = width.context("--width is required when no config file is given")?;
                let height =
                    height.context("--height is required when no config file is given")?;
                AuditConfig::new(Vec::new(), width, height, vec!["jpeg".to_string()])
            };

            // Override config with command line arguments
            config.images_dir = directories;
            if let Some(width) = width {
                config.width = width;
            }
            if let Some(height) = height {
                config.height = height;
            }
            if !formats.is_empty() {
                config.extensions = formats;
            }
            if skip_remaining_checks {
                config.skip_remaining_checks_on_failure = true;
            }
            if exclude_failed {
                config.exclude_failed_files = true;
            }

            // Validate configuration
            config.validate()?;

            // Run the audit
            let auditor = ImageAuditor::new(config);
            info!("Starting dataset audit...");
            let results = auditor.run()?;
            info!("Audit complete");

            print_findings(&results);

            if let Some(path) = report {
                let file = File::create(&path)?;
                serde_json::to_writer_pretty(BufWriter::new(file), &results)?;
                println!("Report written to {}", path.display());
            }

            Ok(())
        }

        Commands::GenerateConfig { path } => {
            env_logger::init();

            let config = AuditConfig::example();
            config.save_to_file(&path)?;
            println!("Configuration file generated at: {}", path.display());
            Ok(())
        }
    }
}

fn print_findings(report: &AuditReport) {
    for entry in &report.inconsistencies {
        println!(
            "{}: {} ({})",
            entry.file_path.display(),
            entry.error,
            entry.issue
        );
    }
    for record in &report.duplicates {
        println!(
            "{} [{}] duplicates {}",
            record.image_name, record.class, record.duplicate_of
        );
    }

    println!();
    println!("Audit summary:");
    for (dir, count) in &report.directory_sizes {
        println!("  {}: {} entries", dir.display(), count);
    }
    println!("  Valid images:      {}", report.valid_images.len());
    println!("  Inconsistencies:   {}", report.inconsistencies.len());
    println!("  Dimension records: {}", report.dimensions.len());
    println!("  Duplicates:        {}", report.duplicates.len());
}
