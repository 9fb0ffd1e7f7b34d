//! CSV tables for scan results.
//!
//! Complete and partial records go to separate files. Both are append-only: the
//! header is written once when the file is new or empty, rows are added on every run.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;

use crate::card::CardRecord;

pub const COMPLETE_CSV: &str = "animals.csv";
pub const PARTIAL_CSV: &str = "error.csv";

pub const CSV_HEADER: [&str; 8] = [
    "name", "years", "months", "weight", "gender", "quirk", "filename", "error?",
];

fn needs_header(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true)
}

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

/// One table row; the last column lists missing fields separated by ';'.
pub fn record_row(record: &CardRecord) -> [String; 8] {
    let missing: Vec<&str> = record.missing().iter().map(|f| f.as_str()).collect();
    [
        opt(&record.name),
        opt(&record.years),
        opt(&record.months),
        opt(&record.weight),
        opt(&record.gender),
        opt(&record.note),
        record.file_name(),
        missing.join(";"),
    ]
}

/// Appends records to `path`, creating it with a header if needed.
///
/// Returns the number of rows written.
pub fn append_records(path: &Path, records: &[CardRecord]) -> Result<usize> {
    let write_header = needs_header(path);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {} for append", path.display()))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if write_header {
        writer
            .write_record(CSV_HEADER)
            .context("Failed to write CSV header")?;
    }
    for record in records {
        writer
            .write_record(record_row(record))
            .context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV file")?;

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::infobox::InfoboxFields;
    use crate::card::validate::Gender;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn partial_record() -> CardRecord {
        CardRecord::finalize(
            Some("SLY VULPAPHYLA"),
            InfoboxFields {
                years: Some(2),
                months: None,
                weight: Some(12.5),
                gender: Some(Gender::Male),
                note: Some("dull, waxy feathers".to_string()),
            },
            PathBuf::from("shots/fox.png"),
        )
    }

    #[test]
    fn test_record_row() {
        let row = record_row(&partial_record());
        assert_eq!(
            row,
            [
                "SLY VULPAPHYLA",
                "2",
                "",
                "12.5",
                "Male",
                "dull, waxy feathers",
                "fox.png",
                "months"
            ]
            .map(String::from)
        );
    }

    #[test]
    fn test_append_creates_header_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(PARTIAL_CSV);

        append_records(&path, &[partial_record()]).unwrap();
        append_records(&path, &[partial_record()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert_eq!(lines[0], "name,years,months,weight,gender,quirk,filename,error?");
        assert_eq!(
            lines[1],
            "SLY VULPAPHYLA,2,,12.5,Male,\"dull, waxy feathers\",fox.png,months"
        );
    }

    #[test]
    fn test_append_preserves_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(COMPLETE_CSV);
        std::fs::write(&path, "existing,data\n").unwrap();

        append_records(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "existing,data\n");
    }

    #[test]
    fn test_empty_file_gets_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(COMPLETE_CSV);
        std::fs::write(&path, "").unwrap();

        append_records(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("name,years"));
    }
}
