//! Floyd-Steinberg error diffusion dithering algorithm.
//!
//! Floyd-Steinberg distributes 100% of the quantization error to 4
//! neighbors. It is the reference strategy for converting photographs.

use crate::color::Srgb;
use crate::palette::Palette;

use super::{dither_with_kernel, Dither, DitherOptions, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion dithering.
///
/// # Algorithm
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// Weights: 7/16 right, 3/16 bottom-left, 5/16 bottom, 1/16 bottom-right.
///
/// # Example
///
/// ```
/// use ink_quant::{Dither, DitherOptions, FloydSteinberg, Palette, Srgb};
///
/// let palette = Palette::from_hex(&["#000000", "#FFFFFF"], None).unwrap();
/// let pixels = vec![Srgb::from_u8(0, 0, 0); 4];
/// let indices = FloydSteinberg.dither(&pixels, 2, 2, &palette, &DitherOptions::new());
/// assert_eq!(indices, vec![0, 0, 0, 0]);
/// ```
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(
        &self,
        image: &[Srgb],
        width: usize,
        height: usize,
        palette: &Palette,
        options: &DitherOptions,
    ) -> Vec<u8> {
        dither_with_kernel(image, width, height, palette, &FLOYD_STEINBERG, options)
    }
}
