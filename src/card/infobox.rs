//! Info-box field extraction.
//!
//! The info-box lists age, weight, gender and quirk top to bottom. Each pass
//! filters the box with the next step of [`extraction_schedule`], then slides a
//! one-row window down the part of the box that still holds unresolved fields.

use anyhow::Result;
use image::DynamicImage;

use super::validate::{
    validate_age, validate_gender, validate_note, validate_weight, AgeReading, Gender,
};
use super::vocab::{geometry_for, has_no_gender, has_no_quirk, NO_QUIRK};
use super::CardScanner;
use crate::ocr::{crop_window, edge_map, top_hat, SliceWindow};

/// Horizontal extent of the info-box as a fraction of screenshot width.
pub const INFOBOX_LEFT: f64 = 0.75;
pub const INFOBOX_RIGHT: f64 = 0.91;

/// Height of one text row as a fraction of the whole screenshot.
pub const ROW_HEIGHT: f64 = 0.028;

/// Position increment between two slices.
pub const BASE_STEP: f64 = 0.01;

/// Share of a row skipped after a row was consumed by a field.
pub const ROW_SKIP: f64 = 0.8;

pub const EXTRACTION_PASSES: usize = 12;

/// Image filter applied to the info-box before one scan pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PassFilter {
    TopHat { kernel: u8 },
    /// Top-hat followed by grayscale Canny edges.
    TopHatEdges { kernel: u8, low: f32, high: f32 },
}

impl PassFilter {
    pub fn apply(&self, img: &DynamicImage) -> DynamicImage {
        match *self {
            PassFilter::TopHat { kernel } => top_hat(img, kernel),
            PassFilter::TopHatEdges { kernel, low, high } => edge_map(&top_hat(img, kernel), low, high),
        }
    }
}

/// The twelve pass filters in order: top-hat with kernels 8 down to 1, then
/// top-hat plus edges with kernels 8 down to 5.
pub fn extraction_schedule() -> impl Iterator<Item = PassFilter> {
    let shrinking = (0..8u8).map(|pass| PassFilter::TopHat { kernel: 8 - pass });
    let edges = (8..EXTRACTION_PASSES as u8).map(|pass| PassFilter::TopHatEdges {
        kernel: 16 - pass,
        low: 30.0,
        high: 100.0,
    });
    shrinking.chain(edges)
}

/// Values resolved from the info-box so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InfoboxFields {
    pub years: Option<u32>,
    pub months: Option<u32>,
    pub weight: Option<f64>,
    pub gender: Option<Gender>,
    pub note: Option<String>,
}

impl InfoboxFields {
    pub fn is_complete(&self) -> bool {
        self.years.is_some()
            && self.months.is_some()
            && self.weight.is_some()
            && self.gender.is_some()
            && self.note.is_some()
    }
}

/// Vertical span of slice start positions, relative to the info-box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanRange {
    pub start: f64,
    pub end: f64,
}

impl ScanRange {
    pub fn full(thickness: f64) -> Self {
        Self {
            start: 0.0,
            end: 1.0 - thickness,
        }
    }
}

/// Drops rows of already resolved fields from both ends of the scan range.
///
/// From the top the rows are age, weight, gender, quirk; from the bottom the same
/// rows in reverse. Each side stops at its first unresolved field.
pub fn narrow_scan(fields: &InfoboxFields, base: ScanRange, thickness: f64) -> ScanRange {
    let from_top = [
        fields.years.is_some(),
        fields.weight.is_some(),
        fields.gender.is_some(),
        fields.note.is_some(),
    ];
    let skipped_top = from_top.iter().take_while(|resolved| **resolved).count();
    let skipped_bottom = from_top.iter().rev().take_while(|resolved| **resolved).count();

    ScanRange {
        start: base.start + skipped_top as f64 * thickness,
        end: base.end - skipped_bottom as f64 * thickness,
    }
}

/// Running state of one info-box search.
#[derive(Debug, Default)]
pub struct FieldTracker {
    pub fields: InfoboxFields,
    last_age: Option<AgeReading>,
    no_gender: bool,
    no_quirk: bool,
}

impl FieldTracker {
    /// Starts a search for `name`. Species whose card has no gender or quirk row
    /// start with those fields already filled in.
    pub fn for_species(name: Option<&str>) -> Self {
        let no_gender = has_no_gender(name);
        let no_quirk = has_no_quirk(name);
        Self {
            fields: InfoboxFields {
                gender: no_gender.then_some(Gender::Genderless),
                note: no_quirk.then(|| NO_QUIRK.to_string()),
                ..InfoboxFields::default()
            },
            no_gender,
            no_quirk,
            ..Self::default()
        }
    }

    /// Merges an age reading. Values only grow; a reading is considered at all
    /// while either unit is missing or when it covers more units than the last
    /// accepted reading. Returns whether the reading was accepted.
    pub fn merge_age(&mut self, reading: AgeReading) -> bool {
        let richer = self
            .last_age
            .is_none_or(|last| last.unit_count() < reading.unit_count());
        if !(self.fields.years.is_none() || self.fields.months.is_none() || richer) {
            return false;
        }
        self.last_age = Some(reading);

        if let Some(years) = reading.years {
            if self.fields.years.is_none_or(|current| current < years) {
                self.fields.years = Some(years);
            }
        }
        if let Some(months) = reading.months {
            if self.fields.months.is_none_or(|current| current < months) {
                self.fields.months = Some(months);
            }
        }
        true
    }

    /// Offers one slice's words to every validator and records what they accept.
    ///
    /// Returns the extra distance to advance on top of [`BASE_STEP`], in units of
    /// row thickness.
    pub fn absorb(&mut self, words: &[String]) -> f64 {
        let age = validate_age(words);
        let weight = validate_weight(words);

        let gender = if self.no_gender { None } else { validate_gender(words) };
        let note = if self.no_quirk { None } else { validate_note(words) };

        let mut skip = 0.0;

        if let Some(reading) = age {
            if self.merge_age(reading) && reading.unit_count() > 1 {
                skip += ROW_SKIP;
            }
        }
        if let Some(value) = weight.filter(|_| self.fields.weight.is_none()) {
            skip += ROW_SKIP;
            // The missing gender row sits right below the weight
            if self.no_gender {
                skip += ROW_SKIP;
            }
            self.fields.weight = Some(value);
        }
        if let Some(value) = gender.filter(|_| self.fields.gender.is_none()) {
            if self.no_quirk {
                skip += ROW_SKIP;
            }
            skip += ROW_SKIP;
            self.fields.gender = Some(value);
        }
        if let Some(value) = note.filter(|_| self.fields.note.is_none()) {
            skip += ROW_SKIP;
            self.fields.note = Some(value);
        }

        skip
    }
}

impl CardScanner<'_> {
    /// Reads age, weight, gender and quirk from the info-box.
    ///
    /// Stops as soon as every field is resolved; otherwise returns whatever was
    /// found after all passes.
    pub fn read_infobox(&self, image: &DynamicImage, name: Option<&str>) -> Result<InfoboxFields> {
        let geometry = geometry_for(name);
        let region = SliceWindow::new(
            geometry.top_offset,
            geometry.height,
            INFOBOX_LEFT,
            INFOBOX_RIGHT,
        );
        let mut tracker = FieldTracker::for_species(name);

        let Some(infobox) = crop_window(image, &region) else {
            return Ok(tracker.fields);
        };

        // Constant pixel row height regardless of how tall this species' box is
        let thickness = ROW_HEIGHT / geometry.height;

        let schedule: Vec<PassFilter> = extraction_schedule().collect();
        let mut current: Option<(usize, DynamicImage)> = None;

        search_rows(&mut tracker, thickness, |pass, window| {
            if current.as_ref().is_some_and(|(p, _)| *p != pass) {
                current = None;
            }
            let (_, filtered) = current.get_or_insert_with(|| {
                self.trace(|| format!("pass {} {:?}", pass, schedule[pass]));
                (pass, schedule[pass].apply(&infobox))
            });
            let words = self.reader.read(filtered, window)?;
            self.trace(|| format!("row at {:.3}: {:?}", window.top, words));
            Ok(words)
        })?;

        Ok(tracker.fields)
    }
}

/// Runs the pass loop over the info-box, asking `read_row` for the words in
/// each slice.
///
/// The scan range is narrowed again at the start of every pass. Inside a pass
/// the slice advances by [`BASE_STEP`] plus whatever rows the last slice used up.
fn search_rows(
    tracker: &mut FieldTracker,
    thickness: f64,
    mut read_row: impl FnMut(usize, &SliceWindow) -> Result<Vec<String>>,
) -> Result<()> {
    for pass in 0..EXTRACTION_PASSES {
        let range = narrow_scan(&tracker.fields, ScanRange::full(thickness), thickness);

        let mut position = range.start;
        while position < range.end {
            let words = read_row(pass, &SliceWindow::rows(position, thickness))?;
            let skip = tracker.absorb(&words);
            position += BASE_STEP + skip * thickness;

            if tracker.fields.is_complete() {
                return Ok(());
            }
        }
    }
    Ok(())
}
