//! Info-card extraction.
//!
//! Turns one decoded screenshot into a [`CardRecord`]:
//! - species name from the banner ([`name`])
//! - age, weight, gender and quirk from the info-box ([`infobox`])
//! - completeness and destination ([`record`])

pub mod infobox;
pub mod name;
pub mod record;
pub mod validate;
pub mod vocab;

pub use record::CardRecord;

use anyhow::Result;
use image::DynamicImage;
use std::path::PathBuf;

use crate::ocr::SliceReader;

/// Runs the banner and info-box searches against one recognizer.
///
/// Holds no per-card state, so one scanner can serve every worker thread.
pub struct CardScanner<'a> {
    reader: SliceReader<'a>,
    debug: bool,
}

impl<'a> CardScanner<'a> {
    pub fn new(reader: SliceReader<'a>, debug: bool) -> Self {
        Self { reader, debug }
    }

    /// Extracts every field from a screenshot.
    pub fn scan(&self, image: &DynamicImage, source_file: PathBuf) -> Result<CardRecord> {
        let name = self.find_name(image)?;
        if name.is_none() {
            crate::log(&format!(
                "No species name found in {}, using default info-box",
                source_file.display()
            ));
        }

        let fields = self.read_infobox(image, name)?;
        Ok(CardRecord::finalize(name, fields, source_file))
    }

    fn trace(&self, msg: impl FnOnce() -> String) {
        if self.debug {
            crate::log(&msg());
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use anyhow::Result;
    use image::DynamicImage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::ocr::engine::Token;
    use crate::ocr::{OcrProfile, Recognizer};

    /// Returns one scripted token list per call, then nothing.
    pub struct ScriptedRecognizer {
        script: Vec<Vec<Token>>,
        calls: AtomicUsize,
    }

    impl ScriptedRecognizer {
        pub fn new(script: Vec<Vec<(&str, i32)>>) -> Self {
            Self {
                script: script
                    .into_iter()
                    .map(|line| {
                        line.into_iter()
                            .map(|(text, conf)| Token::new(text, conf))
                            .collect()
                    })
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Recognizer for ScriptedRecognizer {
        fn recognize(&self, _image: &DynamicImage, _profile: &OcrProfile) -> Result<Vec<Token>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.script.get(call).cloned().unwrap_or_default())
        }
    }
}
