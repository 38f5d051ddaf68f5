//! Nearest-color mapping without error diffusion.

use crate::color::Srgb;
use crate::palette::Palette;

use super::{Dither, DitherOptions};

/// Map each pixel independently to its nearest palette entry.
///
/// No error is carried between pixels, so gradients band into flat
/// regions. `options` is accepted for interface parity and ignored.
pub struct NearestColor;

impl Dither for NearestColor {
    fn dither(
        &self,
        image: &[Srgb],
        width: usize,
        height: usize,
        palette: &Palette,
        _options: &DitherOptions,
    ) -> Vec<u8> {
        image[..width * height]
            .iter()
            .map(|&pixel| palette.find_nearest(pixel).0 as u8)
            .collect()
    }
}
