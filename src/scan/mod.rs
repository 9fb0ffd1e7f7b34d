//! Batch scanning of a screenshot folder.
//!
//! This module provides:
//! - Configuration loading
//! - Recursive screenshot discovery
//! - A bounded worker pool running the card extraction per file
//! - Sorting screenshots into species folders
//! - CSV result output and an end-of-run summary

pub mod config;
pub mod csv_writer;
pub mod relocate;
pub mod walker;
pub mod worker;

pub use config::{default_config_path, load_config, ScanConfig};

use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::card::{CardRecord, CardScanner};
use crate::ocr::{Recognizer, SliceReader};
use csv_writer::{append_records, COMPLETE_CSV, PARTIAL_CSV};
use walker::collect_screenshots;
use worker::{run_pool, UnitOutcome};

/// Everything a scan run produced.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub complete: Vec<CardRecord>,
    pub partial: Vec<CardRecord>,
    pub critical: Vec<(PathBuf, String)>,
    /// Files actually moved into the output tree (zero in dry-run mode)
    pub moved: usize,
    pub elapsed: Duration,
}

impl ScanReport {
    pub fn total(&self) -> usize {
        self.complete.len() + self.partial.len() + self.critical.len()
    }

    fn from_outcomes(outcomes: Vec<UnitOutcome>, elapsed: Duration) -> Self {
        let mut report = ScanReport {
            elapsed,
            ..ScanReport::default()
        };
        for outcome in outcomes {
            match outcome {
                UnitOutcome::Finished { record, moved_to } => {
                    if moved_to.is_some() {
                        report.moved += 1;
                    }
                    if record.is_complete() {
                        report.complete.push(record);
                    } else {
                        report.partial.push(record);
                    }
                }
                UnitOutcome::Critical { path, error } => report.critical.push((path, error)),
            }
        }
        report.complete.sort_by_key(|r| r.file_name());
        report.partial.sort_by_key(|r| r.file_name());
        report.critical.sort();
        report
    }

    /// End-of-run summary: totals, failed files, timing.
    pub fn summary_lines(&self) -> Vec<String> {
        let secs = self.elapsed.as_secs_f64();
        let whole = self.elapsed.as_secs();

        let mut lines = vec![format!(
            "Processed {} images: {} complete, {} partial, {} critical errors, {} moved",
            self.total(),
            self.complete.len(),
            self.partial.len(),
            self.critical.len(),
            self.moved
        )];
        if !self.critical.is_empty() {
            lines.push(format!(
                "Encountered {} critical errors; these files remain in the input folder:",
                self.critical.len()
            ));
            for (path, error) in &self.critical {
                lines.push(format!("  {}: {}", path.display(), error));
            }
        }
        lines.push(format!(
            "It took {} hours {} minutes and {:.1} seconds",
            whole / 3600,
            (whole % 3600) / 60,
            secs - (whole - whole % 60) as f64
        ));
        if self.total() > 0 {
            lines.push(format!(
                "It took {:.2} seconds on average to scan a single image",
                secs / self.total() as f64
            ));
        }
        lines
    }

    pub fn log_summary(&self) {
        for line in self.summary_lines() {
            crate::log(&line);
        }
    }
}

/// Scans every screenshot under the configured input folder.
pub fn run_scan(config: &ScanConfig, recognizer: &dyn Recognizer) -> Result<ScanReport> {
    let files = collect_screenshots(&config.input_dir)?;
    let output_root = config.output_root();

    let reader = SliceReader::new(recognizer, config.ocr_profile(), config.min_confidence);
    let scanner = CardScanner::new(reader, config.debug);

    crate::log(&format!(
        "{}: Starting to process {} files with {} workers",
        Local::now().format("%H:%M:%S"),
        files.len(),
        config.workers
    ));
    let started = Instant::now();
    let outcomes = run_pool(
        &files,
        &scanner,
        &output_root,
        config.workers,
        config.dry_run,
    )?;
    let report = ScanReport::from_outcomes(outcomes, started.elapsed());

    if config.dry_run {
        crate::log("Dry run: result tables not written");
        return Ok(report);
    }

    std::fs::create_dir_all(&output_root)
        .with_context(|| format!("Failed to create {}", output_root.display()))?;

    let complete_csv = output_root.join(COMPLETE_CSV);
    let written = append_records(&complete_csv, &report.complete)?;
    crate::log(&format!(
        "Wrote {} lines of data into {}",
        written,
        complete_csv.display()
    ));

    let partial_csv = output_root.join(PARTIAL_CSV);
    let written = append_records(&partial_csv, &report.partial)?;
    if written > 0 {
        crate::log(&format!(
            "Encountered {} problems and wrote the data into {}",
            written,
            partial_csv.display()
        ));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::infobox::InfoboxFields;
    use crate::card::testing::ScriptedRecognizer;
    use image::RgbImage;
    use tempfile::tempdir;

    fn record(file: &str, years: Option<u32>) -> CardRecord {
        CardRecord::finalize(
            Some("SLY VULPAPHYLA"),
            InfoboxFields {
                years,
                months: Some(1),
                weight: Some(4.5),
                gender: Some(crate::card::validate::Gender::Female),
                note: Some("calm".to_string()),
            },
            PathBuf::from(file),
        )
    }

    #[test]
    fn test_summary_lines() {
        let report = ScanReport {
            complete: vec![record("a.png", Some(2))],
            partial: vec![record("b.png", None)],
            critical: vec![(PathBuf::from("in/c.jpg"), "Failed to load in/c.jpg".to_string())],
            moved: 2,
            elapsed: Duration::from_millis(3_725_500),
        };

        assert_eq!(
            report.summary_lines(),
            vec![
                "Processed 3 images: 1 complete, 1 partial, 1 critical errors, 2 moved",
                "Encountered 1 critical errors; these files remain in the input folder:",
                "  in/c.jpg: Failed to load in/c.jpg",
                "It took 1 hours 2 minutes and 5.5 seconds",
                "It took 1241.83 seconds on average to scan a single image",
            ]
        );
    }

    #[test]
    fn test_summary_lines_no_files() {
        let report = ScanReport::default();
        assert_eq!(
            report.summary_lines(),
            vec![
                "Processed 0 images: 0 complete, 0 partial, 0 critical errors, 0 moved",
                "It took 0 hours 0 minutes and 0.0 seconds",
            ]
        );
    }

    #[test]
    fn test_from_outcomes_counts_moves() {
        let outcomes = vec![
            UnitOutcome::Finished {
                record: record("b.png", None),
                moved_to: Some(PathBuf::from("out/b.png")),
            },
            UnitOutcome::Critical {
                path: PathBuf::from("c.png"),
                error: "boom".to_string(),
            },
            UnitOutcome::Finished {
                record: record("a.png", Some(3)),
                moved_to: None,
            },
        ];
        let report = ScanReport::from_outcomes(outcomes, Duration::ZERO);
        assert_eq!(report.moved, 1);
        assert_eq!(report.complete.len(), 1);
        assert_eq!(report.partial[0].file_name(), "b.png");
        assert_eq!(report.critical.len(), 1);
    }

    #[test]
    fn test_run_scan_writes_tables_and_sorts_files() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("Screenshots");
        std::fs::create_dir_all(input.join("old")).unwrap();
        RgbImage::new(320, 400)
            .save(input.join("old").join("fox.png"))
            .unwrap();
        std::fs::write(input.join("broken.jpg"), b"nope").unwrap();

        let config = ScanConfig {
            input_dir: input.clone(),
            workers: 1,
            ..ScanConfig::default()
        };
        let recognizer = ScriptedRecognizer::new(vec![
            vec![("SLY", 90), ("VULPAPHYLA", 90)],
            vec![("2", 90), ("years", 90), ("6", 90), ("months", 90)],
            vec![("12.5", 90), ("kg", 90)],
            vec![("Male", 90)],
            vec![("playful", 90)],
        ]);

        let report = run_scan(&config, &recognizer).unwrap();
        assert_eq!(report.total(), 2);
        assert_eq!(report.complete.len(), 1);
        assert_eq!(report.critical.len(), 1);
        assert_eq!(report.moved, 1);

        let root = dir.path().join("Warframe_Animals").join("Animals");
        assert!(root.join("VULPAPHYLA").join("SLY").join("fox.png").exists());
        assert!(input.join("broken.jpg").exists());

        let complete = std::fs::read_to_string(root.join(COMPLETE_CSV)).unwrap();
        let lines: Vec<&str> = complete.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "SLY VULPAPHYLA,2,6,12.5,Male,playful,fox.png,");

        let partial = std::fs::read_to_string(root.join(PARTIAL_CSV)).unwrap();
        assert_eq!(partial.lines().count(), 1); // header only
    }

    #[test]
    fn test_run_scan_missing_input_dir() {
        let dir = tempdir().unwrap();
        let config = ScanConfig {
            input_dir: dir.path().join("missing"),
            ..ScanConfig::default()
        };
        let recognizer = ScriptedRecognizer::new(vec![]);
        assert!(run_scan(&config, &recognizer).is_err());
    }
}
