//! Conservation Card Scanner
//!
//! Reads creature info-card screenshots, extracts name, age, weight, gender and
//! quirk with Tesseract, sorts the screenshots into species folders and appends
//! the results to CSV tables.

mod card;
mod ocr;
mod paths;
mod scan;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use ocr::TesseractEngine;
use scan::{default_config_path, load_config, run_scan};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Folder searched recursively for .jpg/.png screenshots
    input_dir: Option<PathBuf>,

    /// Where sorted screenshots and CSV tables go
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Number of screenshots processed in parallel
    #[arg(short, long)]
    workers: Option<usize>,

    /// Extract only; do not move files or write CSV tables
    #[arg(long)]
    dry_run: bool,

    /// Log every slice read
    #[arg(long)]
    debug: bool,

    /// Path to config.json (defaults to the one next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join("card_scanner.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        let log_msg = format!("[PANIC]{} {}\n", location, msg);
        eprintln!("{}", log_msg);
        let log_path = paths::get_logs_dir().join("card_scanner.log");
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) {
            let _ = file.write_all(log_msg.as_bytes());
        }
    }));

    let args = Args::parse();

    // Ensure output directories exist
    paths::ensure_directories()?;

    let mut config = load_config(&args.config.unwrap_or_else(default_config_path));
    if let Some(input_dir) = args.input_dir {
        config.input_dir = input_dir;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = Some(output_dir);
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    config.dry_run |= args.dry_run;
    config.debug |= args.debug;

    let engine = TesseractEngine::from_config(&config)?;

    log(&format!(
        "Scanning {} into {}",
        config.input_dir.display(),
        config.output_root().display()
    ));
    let report = run_scan(&config, &engine)?;
    report.log_summary();

    Ok(())
}
