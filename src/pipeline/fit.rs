//! Aspect-preserving scale and center crop to the canvas.
//!
//! The crop is taken from the source first and only the kept window is
//! resampled, so the working buffer never exceeds the source or the canvas.

use crate::models::Canvas;
use image::imageops::{self, FilterType};
use image::RgbImage;

/// Scale-to-cover size and crop offsets for one source, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitPlan {
    pub scaled_width: u32,
    pub scaled_height: u32,
    pub crop_x: u32,
    pub crop_y: u32,
}

impl FitPlan {
    /// Work out the scale and crop for a `width`x`height` source.
    ///
    /// Wider-than-canvas sources are scaled to the canvas height and lose
    /// columns; everything else is scaled to the canvas width and loses rows.
    /// The ratio test and the rounding are done in integers so results never
    /// depend on float error.
    pub fn new(width: u32, height: u32, canvas: Canvas) -> Self {
        let (w, h) = (width as u64, height as u64);
        let (cw, ch) = (canvas.width as u64, canvas.height as u64);

        let (scaled_width, scaled_height) = if is_wider(width, height, canvas) {
            (round_div(ch * w, h), ch)
        } else {
            (cw, round_div(cw * h, w))
        };

        Self {
            scaled_width: saturate(scaled_width),
            scaled_height: saturate(scaled_height),
            crop_x: saturate((scaled_width - cw) / 2),
            crop_y: saturate((scaled_height - ch) / 2),
        }
    }

    pub fn needs_crop(&self, canvas: Canvas) -> bool {
        (self.scaled_width, self.scaled_height) != (canvas.width, canvas.height)
    }
}

/// Region of the source that ends up on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SourceWindow {
    /// The centered window with the canvas aspect ratio. Odd excess leaves
    /// the extra pixel on the trailing edge.
    pub fn new(width: u32, height: u32, canvas: Canvas) -> Self {
        let (w, h) = (width as u64, height as u64);
        let (cw, ch) = (canvas.width as u64, canvas.height as u64);

        if is_wider(width, height, canvas) {
            let keep = round_div(cw * h, ch).clamp(1, w);
            Self {
                x: ((w - keep) / 2) as u32,
                y: 0,
                width: keep as u32,
                height,
            }
        } else {
            let keep = round_div(ch * w, cw).clamp(1, h);
            Self {
                x: 0,
                y: ((h - keep) / 2) as u32,
                width,
                height: keep as u32,
            }
        }
    }

    pub fn is_full(&self, width: u32, height: u32) -> bool {
        (self.x, self.y, self.width, self.height) == (0, 0, width, height)
    }
}

fn is_wider(width: u32, height: u32, canvas: Canvas) -> bool {
    width as u64 * canvas.height as u64 > canvas.width as u64 * height as u64
}

/// Round-half-up integer division.
fn round_div(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Center-crop `image` to the canvas aspect ratio, then scale it to exactly
/// the canvas size.
pub fn fit(image: RgbImage, canvas: Canvas, filter: FilterType) -> RgbImage {
    let (width, height) = image.dimensions();
    let window = SourceWindow::new(width, height, canvas);
    let plan = FitPlan::new(width, height, canvas);

    tracing::debug!(
        width,
        height,
        scaled_width = plan.scaled_width,
        scaled_height = plan.scaled_height,
        crop_x = window.x,
        crop_y = window.y,
        crop_width = window.width,
        crop_height = window.height,
        "Fitting image to canvas"
    );

    let cropped = if window.is_full(width, height) {
        image
    } else {
        imageops::crop_imm(&image, window.x, window.y, window.width, window.height).to_image()
    };

    if cropped.dimensions() == (canvas.width, canvas.height) {
        cropped
    } else {
        imageops::resize(&cropped, canvas.width, canvas.height, filter)
    }
}
