use anyhow::{anyhow, Context, Result};
use image::DynamicImage;
use std::path::PathBuf;
use std::process::Command;
use tempfile::NamedTempFile;

use super::setup::{find_tessdata_dir, find_tesseract_executable};
use crate::scan::config::ScanConfig;

/// A single recognized word with its Tesseract confidence (0-100, -1 for non-words).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub confidence: i32,
}

impl Token {
    pub fn new(text: impl Into<String>, confidence: i32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// Recognition profile passed along with every crop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrProfile {
    pub language: String,
    /// Tesseract page segmentation mode; 7 treats the crop as a single text line.
    pub page_seg_mode: u8,
}

impl Default for OcrProfile {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            page_seg_mode: 7,
        }
    }
}

/// Anything that turns an image into ordered tokens.
///
/// Implementations must be shareable between worker threads; the extraction
/// engines call this thousands of times per screenshot.
pub trait Recognizer: Sync {
    fn recognize(&self, image: &DynamicImage, profile: &OcrProfile) -> Result<Vec<Token>>;
}

/// Recognizer backed by the Tesseract command line tool.
pub struct TesseractEngine {
    executable: PathBuf,
    tessdata: Option<PathBuf>,
}

impl TesseractEngine {
    /// Locates Tesseract using the config overrides first, then the usual places.
    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        let executable = find_tesseract_executable(config.tesseract_path.as_deref())?;
        let tessdata = find_tessdata_dir(config.tessdata_dir.as_deref());
        Ok(Self {
            executable,
            tessdata,
        })
    }
}

impl Recognizer for TesseractEngine {
    fn recognize(&self, image: &DynamicImage, profile: &OcrProfile) -> Result<Vec<Token>> {
        // Save image to temporary file
        let temp_input = NamedTempFile::with_suffix(".png")?;
        image
            .save(temp_input.path())
            .context("Failed to write OCR input image")?;

        // Tesseract appends .tsv to the output base
        let temp_output = NamedTempFile::new()?;
        let output_base = temp_output.path().to_string_lossy().to_string();

        let mut command = Command::new(&self.executable);
        command.arg(temp_input.path()).arg(&output_base);
        if let Some(tessdata) = &self.tessdata {
            command.arg("--tessdata-dir").arg(tessdata);
        }
        let output = command
            .arg("-l")
            .arg(&profile.language)
            .arg("--psm")
            .arg(profile.page_seg_mode.to_string())
            .arg("tsv")
            .output()
            .with_context(|| format!("Failed to run {}", self.executable.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr));
        }

        let tsv_path = format!("{}.tsv", output_base);
        let tsv_content = std::fs::read_to_string(&tsv_path)
            .map_err(|e| anyhow!("Failed to read Tesseract output: {}", e))?;
        let _ = std::fs::remove_file(&tsv_path);

        Ok(parse_tsv_output(&tsv_content))
    }
}

/// Parses Tesseract TSV output into word tokens in reading order.
///
/// Only level 5 (word) rows with non-empty text are kept. The confidence column
/// is a float in the TSV and is truncated to an integer.
pub fn parse_tsv_output(tsv: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for line in tsv.lines().skip(1) {
        // TSV fields: level, page_num, block_num, par_num, line_num, word_num,
        //             left, top, width, height, conf, text
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }

        let level: i32 = fields[0].parse().unwrap_or(-1);
        if level != 5 {
            continue;
        }

        let text = fields[11].trim();
        if text.is_empty() {
            continue;
        }

        let confidence = fields[10].trim().parse::<f32>().unwrap_or(-1.0) as i32;
        tokens.push(Token::new(text, confidence));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    #[test]
    fn test_parse_tsv_keeps_words_in_order() {
        let tsv = format!(
            "{HEADER}\n\
             1\t1\t0\t0\t0\t0\t0\t0\t200\t30\t-1\t\n\
             4\t1\t1\t1\t1\t0\t2\t3\t150\t20\t-1\t\n\
             5\t1\t1\t1\t1\t1\t2\t3\t40\t20\t91.534\tSLY\n\
             5\t1\t1\t1\t1\t2\t50\t3\t90\t20\t88.0\tVULPAPHYLA\n"
        );

        let tokens = parse_tsv_output(&tsv);
        assert_eq!(
            tokens,
            vec![Token::new("SLY", 91), Token::new("VULPAPHYLA", 88)]
        );
    }

    #[test]
    fn test_parse_tsv_skips_blank_and_short_rows() {
        let tsv = format!(
            "{HEADER}\n\
             5\t1\t1\t1\t1\t1\t2\t3\t40\t20\t95\t   \n\
             garbage row\n\
             5\t1\t1\t1\t1\t2\t2\t3\t40\t20\t12.9\tkg\n"
        );

        let tokens = parse_tsv_output(&tsv);
        assert_eq!(tokens, vec![Token::new("kg", 12)]);
    }

    #[test]
    fn test_parse_tsv_empty_output() {
        assert!(parse_tsv_output("").is_empty());
        assert!(parse_tsv_output(HEADER).is_empty());
    }

    #[test]
    fn test_default_profile_is_single_line() {
        let profile = OcrProfile::default();
        assert_eq!(profile.language, "eng");
        assert_eq!(profile.page_seg_mode, 7);
    }
}
