//! Synthetic source images and palettes.

use image::{Rgb, RgbImage};
use ink_quant::Palette;
use inkpack::models::AppConfig;
use std::path::{Path, PathBuf};

/// Source sizes from the fitting scenarios
pub mod sizes {
    /// Exactly twice the canvas, scales without cropping
    pub const LANDSCAPE: (u32, u32) = (1200, 896);

    /// Taller than wide, rotated before fitting
    pub const PORTRAIT: (u32, u32) = (900, 1200);

    /// Very wide panorama, loses columns on both sides
    pub const PANORAMA: (u32, u32) = (2000, 400);
}

/// The panel's datasheet palette
pub fn canonical_palette() -> Palette {
    AppConfig::default()
        .build_palette()
        .expect("default palette is valid")
}

pub fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

/// Smooth color ramp that exercises every channel.
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) * 255 / (width + height).max(1)) as u8,
        ])
    })
}

/// Save an image into `dir` (format from the extension) and return its path.
pub fn write_image(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).expect("write fixture image");
    path
}
