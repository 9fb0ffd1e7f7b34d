//! Worker pool for screenshot processing.
//!
//! Every screenshot is an independent unit: decode, extract, then move the file
//! into its species folder. Units share only the read-only scanner. A unit that
//! fails (or panics) is counted as critical and its file is left untouched.

use anyhow::{Context, Result};
use image::DynamicImage;
use rayon::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::relocate::relocate;
use crate::card::{CardRecord, CardScanner};

/// Result of one unit of work.
#[derive(Debug)]
pub enum UnitOutcome {
    /// Extraction finished (complete or partial). `moved_to` is None in dry-run mode.
    Finished {
        record: CardRecord,
        moved_to: Option<PathBuf>,
    },
    /// Decode, OCR or file move failed; the source file was not moved.
    Critical { path: PathBuf, error: String },
}

/// Decodes, scans and relocates one screenshot.
pub fn process_file(
    path: &Path,
    scanner: &CardScanner,
    output_root: &Path,
    dry_run: bool,
) -> Result<(CardRecord, Option<PathBuf>)> {
    crate::log(&format!("Starting to process {}", path.display()));

    let image = image::open(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let image = DynamicImage::ImageRgb8(image.to_rgb8());

    let record = scanner.scan(&image, path.to_path_buf())?;
    let dest_dir = record.destination().dir(output_root);

    if !record.is_complete() {
        let missing: Vec<&str> = record.missing().iter().map(|f| f.as_str()).collect();
        crate::log(&format!(
            "Incomplete data for {} (missing: {}), manual input needed",
            path.display(),
            missing.join(", ")
        ));
    }

    if dry_run {
        crate::log(&format!(
            "Dry run: would move {} to {}",
            path.display(),
            dest_dir.display()
        ));
        return Ok((record, None));
    }

    let target = relocate(path, &dest_dir)?;
    crate::log(&format!("Moved file to {}", target.display()));
    Ok((record, Some(target)))
}

/// Runs all files through a pool of `workers` threads.
///
/// Outcomes come back in input order; completion order does not matter.
pub fn run_pool(
    files: &[PathBuf],
    scanner: &CardScanner,
    output_root: &Path,
    workers: usize,
    dry_run: bool,
) -> Result<Vec<UnitOutcome>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()
        .context("Failed to build worker pool")?;

    let done = AtomicUsize::new(0);
    let total = files.len();

    let outcomes = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let result = catch_unwind(AssertUnwindSafe(|| {
                    process_file(path, scanner, output_root, dry_run)
                }));
                let counter = done.fetch_add(1, Ordering::SeqCst) + 1;

                match result {
                    Ok(Ok((record, moved_to))) => {
                        crate::log(&format!(
                            "Finished processing {} ({}/{} done)",
                            path.display(),
                            counter,
                            total
                        ));
                        UnitOutcome::Finished { record, moved_to }
                    }
                    Ok(Err(e)) => critical(path, format!("{:#}", e)),
                    Err(panic) => {
                        let msg = panic
                            .downcast_ref::<&str>()
                            .map(|s| s.to_string())
                            .or_else(|| panic.downcast_ref::<String>().cloned())
                            .unwrap_or_else(|| "unknown panic".to_string());
                        critical(path, format!("panicked: {}", msg))
                    }
                }
            })
            .collect()
    });

    Ok(outcomes)
}

fn critical(path: &Path, error: String) -> UnitOutcome {
    crate::log(&format!("{} generated an exception: {}", path.display(), error));
    UnitOutcome::Critical {
        path: path.to_path_buf(),
        error,
    }
}
