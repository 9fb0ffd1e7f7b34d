//! Configuration for a scan run.
//!
//! Loads settings from config.json at startup. Command line flags override
//! individual values afterwards.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ocr::{OcrProfile, DEFAULT_MIN_CONFIDENCE};

/// Complete scan configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Directory searched recursively for screenshots
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    /// Root for sorted screenshots and the CSV tables.
    /// Defaults to `<parent of input_dir>/Warframe_Animals/Animals`
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Number of screenshots processed in parallel
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// OCR words must score strictly above this confidence (0-100)
    #[serde(default = "default_min_confidence")]
    pub min_confidence: i32,
    /// Tesseract language
    #[serde(default = "default_language")]
    pub language: String,
    /// Tesseract page segmentation mode
    #[serde(default = "default_page_seg_mode")]
    pub page_seg_mode: u8,
    /// Explicit path to the tesseract executable
    #[serde(default)]
    pub tesseract_path: Option<PathBuf>,
    /// Explicit tessdata directory
    #[serde(default)]
    pub tessdata_dir: Option<PathBuf>,
    /// Extract and log only: no files are moved and no CSV is written
    #[serde(default)]
    pub dry_run: bool,
    /// Log every slice read and every field found
    #[serde(default)]
    pub debug: bool,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("Screenshots")
}

fn default_workers() -> usize {
    12
}

fn default_min_confidence() -> i32 {
    DEFAULT_MIN_CONFIDENCE
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_page_seg_mode() -> u8 {
    7
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: None,
            workers: default_workers(),
            min_confidence: default_min_confidence(),
            language: default_language(),
            page_seg_mode: default_page_seg_mode(),
            tesseract_path: None,
            tessdata_dir: None,
            dry_run: false,
            debug: false,
        }
    }
}

impl ScanConfig {
    /// Root directory for sorted screenshots and result tables.
    pub fn output_root(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        self.input_dir
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("Warframe_Animals")
            .join("Animals")
    }

    pub fn ocr_profile(&self) -> OcrProfile {
        OcrProfile {
            language: self.language.clone(),
            page_seg_mode: self.page_seg_mode,
        }
    }
}

/// Returns the default config.json location, next to the executable.
pub fn default_config_path() -> PathBuf {
    crate::paths::get_exe_dir().join("config.json")
}

/// Loads configuration from `path` or returns defaults.
pub fn load_config(path: &Path) -> ScanConfig {
    crate::log(&format!("Looking for config at: {}", path.display()));

    if !path.exists() {
        crate::log("config.json not found. Using default config.");
        return ScanConfig::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(config) => {
                crate::log("Config loaded from config.json");
                config
            }
            Err(e) => {
                crate::log(&format!(
                    "Failed to parse config.json: {}. Using defaults.",
                    e
                ));
                ScanConfig::default()
            }
        },
        Err(e) => {
            crate::log(&format!(
                "Failed to read config.json: {}. Using defaults.",
                e
            ));
            ScanConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.workers, 12);
        assert_eq!(config.min_confidence, 60);
        assert_eq!(config.ocr_profile(), OcrProfile::default());
        assert!(!config.dry_run);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ScanConfig =
            serde_json::from_str(r#"{ "input_dir": "D:/Conservation/Screenshots", "workers": 4 }"#)
                .unwrap();
        assert_eq!(config.workers, 4);
        assert_eq!(config.language, "eng");
        assert_eq!(config.page_seg_mode, 7);
        assert_eq!(
            config.output_root(),
            PathBuf::from("D:/Conservation/Warframe_Animals/Animals")
        );
    }

    #[test]
    fn test_output_dir_override() {
        let config = ScanConfig {
            output_dir: Some(PathBuf::from("/data/sorted")),
            ..ScanConfig::default()
        };
        assert_eq!(config.output_root(), PathBuf::from("/data/sorted"));
    }

    #[test]
    fn test_load_config_falls_back_on_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_config(&path).workers, 12);

        std::fs::write(&path, r#"{ "debug": true, "min_confidence": 75 }"#).unwrap();
        let config = load_config(&path);
        assert!(config.debug);
        assert_eq!(config.min_confidence, 75);

        assert_eq!(load_config(&dir.path().join("missing.json")).workers, 12);
    }
}
