pub mod engine;
pub mod preprocess;
pub mod setup;

pub use engine::{OcrProfile, Recognizer, TesseractEngine};
pub use preprocess::{crop_window, edge_map, top_hat, SliceWindow};

use anyhow::Result;
use image::DynamicImage;

/// Tokens at or below this confidence are discarded.
pub const DEFAULT_MIN_CONFIDENCE: i32 = 60;

/// Crops slices out of an image and returns the confidently recognized words.
///
/// Shared by the name and info-box searches so both apply the same profile and
/// confidence cut-off.
pub struct SliceReader<'a> {
    recognizer: &'a dyn Recognizer,
    profile: OcrProfile,
    min_confidence: i32,
}

impl<'a> SliceReader<'a> {
    pub fn new(recognizer: &'a dyn Recognizer, profile: OcrProfile, min_confidence: i32) -> Self {
        Self {
            recognizer,
            profile,
            min_confidence,
        }
    }

    /// Crops `window` out of `image`, recognizes it and keeps words with
    /// confidence strictly above the threshold. Zero-area windows read as empty.
    pub fn read(&self, image: &DynamicImage, window: &SliceWindow) -> Result<Vec<String>> {
        let Some(slice) = crop_window(image, window) else {
            return Ok(Vec::new());
        };

        let tokens = self.recognizer.recognize(&slice, &self.profile)?;
        Ok(tokens
            .into_iter()
            .filter(|t| t.confidence > self.min_confidence)
            .map(|t| t.text)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::engine::Token;
    use super::*;
    use image::RgbImage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedRecognizer {
        tokens: Vec<Token>,
        calls: AtomicUsize,
    }

    impl Recognizer for FixedRecognizer {
        fn recognize(&self, _image: &DynamicImage, _profile: &OcrProfile) -> Result<Vec<Token>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.tokens.clone())
        }
    }

    #[test]
    fn test_read_filters_on_strict_confidence() {
        let recognizer = FixedRecognizer {
            tokens: vec![
                Token::new("12.5", 61),
                Token::new("noise", 60),
                Token::new("kg", 95),
                Token::new("", -1),
            ],
            calls: AtomicUsize::new(0),
        };
        let reader = SliceReader::new(&recognizer, OcrProfile::default(), DEFAULT_MIN_CONFIDENCE);
        let img = DynamicImage::ImageRgb8(RgbImage::new(50, 50));

        let words = reader.read(&img, &SliceWindow::rows(0.0, 0.5)).unwrap();
        assert_eq!(words, vec!["12.5", "kg"]);
    }

    #[test]
    fn test_read_degenerate_window_skips_recognizer() {
        let recognizer = FixedRecognizer {
            tokens: vec![Token::new("Male", 99)],
            calls: AtomicUsize::new(0),
        };
        let reader = SliceReader::new(&recognizer, OcrProfile::default(), DEFAULT_MIN_CONFIDENCE);
        let img = DynamicImage::ImageRgb8(RgbImage::new(50, 50));

        let words = reader.read(&img, &SliceWindow::rows(0.2, 0.0)).unwrap();
        assert!(words.is_empty());
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
    }
}
