use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::log;

#[cfg(windows)]
const TESSERACT_EXE: &str = "tesseract.exe";
#[cfg(not(windows))]
const TESSERACT_EXE: &str = "tesseract";

const COMMON_EXECUTABLE_PATHS: [&str; 5] = [
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
];

const COMMON_TESSDATA_PATHS: [&str; 5] = [
    r"C:\Program Files\Tesseract-OCR\tessdata",
    r"C:\Program Files (x86)\Tesseract-OCR\tessdata",
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/local/share/tessdata",
];

/// Returns the directory for a locally installed Tesseract copy
pub fn get_tesseract_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("card-scanner")
        .join("tesseract")
}

/// Finds the Tesseract executable: explicit override, local dir, PATH, then common paths.
pub fn find_tesseract_executable(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(anyhow!(
            "Configured Tesseract executable does not exist: {}",
            path.display()
        ));
    }

    let local_exe = get_tesseract_dir().join(TESSERACT_EXE);
    if local_exe.exists() {
        return Ok(local_exe);
    }

    // Check PATH
    if let Ok(output) = Command::new("tesseract").arg("--version").output() {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    for path in &COMMON_EXECUTABLE_PATHS {
        let p = PathBuf::from(path);
        if p.exists() {
            log(&format!("Found Tesseract at: {}", path));
            return Ok(p);
        }
    }

    Err(anyhow!(
        "Tesseract not found. Install Tesseract-OCR, add it to PATH, or set \
         \"tesseract_path\" in config.json"
    ))
}

/// Finds a tessdata directory containing eng.traineddata.
///
/// Returns None when nothing suitable is found, in which case Tesseract falls
/// back to its compiled-in default.
pub fn find_tessdata_dir(override_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = override_dir {
        return Some(dir.to_path_buf());
    }

    let local_tessdata = get_tesseract_dir().join("tessdata");
    if has_eng_traineddata(&local_tessdata) {
        return Some(local_tessdata);
    }

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let p = PathBuf::from(&prefix);
        if has_eng_traineddata(&p) {
            return Some(p);
        }
        let p = p.join("tessdata");
        if has_eng_traineddata(&p) {
            return Some(p);
        }
    }

    COMMON_TESSDATA_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| has_eng_traineddata(p))
}

fn has_eng_traineddata(dir: &Path) -> bool {
    dir.join("eng.traineddata").exists()
}
