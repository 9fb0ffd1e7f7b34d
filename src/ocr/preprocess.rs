use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::edges::canny;
use imageproc::morphology::{grayscale_open, Mask};

/// A crop expressed as ratios (0.0 to 1.0) of the source image.
///
/// `top` and `thickness` select rows, `left` and `right` select columns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceWindow {
    pub top: f64,
    pub thickness: f64,
    pub left: f64,
    pub right: f64,
}

impl SliceWindow {
    pub const fn new(top: f64, thickness: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            thickness,
            left,
            right,
        }
    }

    /// A full-width horizontal band.
    pub const fn rows(top: f64, thickness: f64) -> Self {
        Self::new(top, thickness, 0.0, 1.0)
    }
}

/// Crops a window out of an image.
///
/// Pixel bounds are `floor(dimension * ratio)` clamped to the image. Returns None
/// when the window covers no pixels.
pub fn crop_window(img: &DynamicImage, window: &SliceWindow) -> Option<DynamicImage> {
    let (w, h) = (img.width(), img.height());

    let y0 = scale(h, window.top);
    let y1 = scale(h, window.top + window.thickness);
    let x0 = scale(w, window.left);
    let x1 = scale(w, window.right);

    if y1 <= y0 || x1 <= x0 {
        return None;
    }

    Some(img.crop_imm(x0, y0, x1 - x0, y1 - y0))
}

fn scale(dimension: u32, ratio: f64) -> u32 {
    let px = (dimension as f64 * ratio).floor();
    if px <= 0.0 {
        0
    } else {
        (px as u32).min(dimension)
    }
}

/// Builds an elliptical structuring element of `size` x `size` pixels.
///
/// Mirrors the classic filled-ellipse construction: row `i` spans
/// `round(c * sqrt((r^2 - dy^2) / r^2))` pixels either side of the centre column.
pub fn elliptical_kernel(size: u8) -> GrayImage {
    let size = size.max(1) as i32;
    let r = size / 2;
    let c = size / 2;
    let inv_r2 = if r > 0 { 1.0 / (r * r) as f64 } else { 0.0 };

    let mut kernel = GrayImage::new(size as u32, size as u32);
    for i in 0..size {
        let dy = i - r;
        if dy.abs() > r {
            continue;
        }
        let dx = (c as f64 * (((r * r - dy * dy) as f64) * inv_r2).sqrt()).round() as i32;
        let j1 = (c - dx).max(0);
        let j2 = (c + dx + 1).min(size);
        for j in j1..j2 {
            kernel.put_pixel(j as u32, i as u32, Luma([255]));
        }
    }
    kernel
}

fn elliptical_mask(size: u8) -> Mask {
    let kernel = elliptical_kernel(size);
    let centre = (kernel.width() / 2) as u8;
    Mask::from_image(&kernel, centre, centre)
}

fn top_hat_plane(plane: &GrayImage, mask: &Mask) -> GrayImage {
    let opened = grayscale_open(plane, mask);
    GrayImage::from_fn(plane.width(), plane.height(), |x, y| {
        Luma([plane.get_pixel(x, y)[0].saturating_sub(opened.get_pixel(x, y)[0])])
    })
}

/// White top-hat: the image minus its morphological opening with an elliptical kernel.
///
/// Keeps thin bright strokes smaller than the kernel and flattens the background.
/// Grayscale images stay grayscale; everything else is processed per RGB channel.
pub fn top_hat(img: &DynamicImage, kernel_size: u8) -> DynamicImage {
    if img.width() == 0 || img.height() == 0 {
        return img.clone();
    }
    let mask = elliptical_mask(kernel_size);

    if let DynamicImage::ImageLuma8(gray) = img {
        return DynamicImage::ImageLuma8(top_hat_plane(gray, &mask));
    }

    let rgb = img.to_rgb8();
    let (w, h) = rgb.dimensions();
    let planes: Vec<GrayImage> = (0..3)
        .map(|c| {
            let plane = GrayImage::from_fn(w, h, |x, y| Luma([rgb.get_pixel(x, y)[c]]));
            top_hat_plane(&plane, &mask)
        })
        .collect();

    DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
        Rgb([
            planes[0].get_pixel(x, y)[0],
            planes[1].get_pixel(x, y)[0],
            planes[2].get_pixel(x, y)[0],
        ])
    }))
}

/// Converts to grayscale and runs Canny edge detection with the given hysteresis thresholds.
pub fn edge_map(img: &DynamicImage, low: f32, high: f32) -> DynamicImage {
    let gray = img.to_luma8();
    if gray.width() == 0 || gray.height() == 0 {
        return DynamicImage::ImageLuma8(gray);
    }
    DynamicImage::ImageLuma8(canny(&gray, low, high))
}
