use anyhow::Result;
use image::DynamicImage;

use super::validate::validate_name;
use super::CardScanner;
use crate::ocr::{crop_window, top_hat, SliceWindow};

/// Part of the screenshot holding the species banner.
pub const NAME_REGION: SliceWindow = SliceWindow::new(0.08, 0.04, 0.29, 0.74);

/// Slice thickness and position move in steps of 1/GRID_STEPS.
const GRID_STEPS: u32 = 100;

/// Top-hat kernel sizes tried on the banner: 9, then 12.
pub fn banner_kernels() -> impl Iterator<Item = u8> {
    (9u8..15).step_by(3)
}

/// Every banner slice in search order: thick slices first, each swept top to bottom.
///
/// A full-height slice has no room to move and is skipped, so the first slice is
/// 0.99 thick at position 0 and the last is 0.01 thick at position 0.98.
pub fn banner_slices() -> impl Iterator<Item = SliceWindow> {
    (1..=GRID_STEPS).rev().flat_map(|thickness| {
        (0..GRID_STEPS - thickness).map(move |top| {
            SliceWindow::rows(
                top as f64 / GRID_STEPS as f64,
                thickness as f64 / GRID_STEPS as f64,
            )
        })
    })
}

impl CardScanner<'_> {
    /// Searches the banner for a known species name.
    ///
    /// The whole slice grid is swept once per kernel size; the first accepted
    /// name wins. Returns None once every slice of every kernel has been tried.
    pub fn find_name(&self, image: &DynamicImage) -> Result<Option<&'static str>> {
        let Some(banner) = crop_window(image, &NAME_REGION) else {
            return Ok(None);
        };

        for kernel in banner_kernels() {
            let filtered = top_hat(&banner, kernel);
            for window in banner_slices() {
                let words = self.reader.read(&filtered, &window)?;
                self.trace(|| format!("name slice {:?}: {:?}", window, words));
                if let Some(name) = validate_name(&words) {
                    self.trace(|| format!("found name {} with kernel {}", name, kernel));
                    return Ok(Some(name));
                }
            }
        }

        Ok(None)
    }
}
