//! Quantizer builder, the primary entry point for the crate.
//!
//! [`Quantizer`] wraps palette mapping with fluent configuration.

use crate::api::QuantError;
use crate::color::Srgb;
use crate::dither::{DitherAlgorithm, DitherOptions};
use crate::output::QuantizedGrid;
use crate::palette::{DistanceMetric, Palette};

/// High-level quantization builder for fixed-palette panels.
///
/// # Design
///
/// - Constructor requires [`Palette`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`quantize()`](Self::quantize) takes `&self` so the builder is
///   reusable across images and shareable across threads
///
/// # Example
///
/// ```
/// use ink_quant::{DitherAlgorithm, Palette, Quantizer, Srgb};
///
/// let palette = Palette::from_hex(&["#000000", "#FFFFFF"], None).unwrap();
/// let quantizer = Quantizer::new(palette)
///     .algorithm(DitherAlgorithm::Atkinson)
///     .serpentine(true);
///
/// let pixels = vec![Srgb::from_u8(128, 128, 128); 4];
/// let grid = quantizer.quantize(&pixels, 2, 2).unwrap();
///
/// assert_eq!(grid.width(), 2);
/// assert_eq!(grid.height(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Quantizer {
    palette: Palette,
    dither_opts: DitherOptions,
    algorithm: DitherAlgorithm,
}

impl Quantizer {
    /// Create a quantizer with Floyd-Steinberg diffusion, plain row-major
    /// scanning and an error clamp of 1.0.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            dither_opts: DitherOptions::new(),
            algorithm: DitherAlgorithm::default(),
        }
    }

    /// Set the mapping algorithm.
    #[inline]
    pub fn algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set serpentine scanning mode.
    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.dither_opts = self.dither_opts.serpentine(enabled);
        self
    }

    /// Set error clamping threshold.
    #[inline]
    pub fn error_clamp(mut self, clamp: f32) -> Self {
        self.dither_opts = self.dither_opts.error_clamp(clamp);
        self
    }

    /// Set the color distance used for nearest-color matching.
    #[inline]
    pub fn distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.palette = self.palette.with_distance_metric(metric);
        self
    }

    /// The palette indices will refer to.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The configured algorithm.
    #[inline]
    pub fn selected_algorithm(&self) -> DitherAlgorithm {
        self.algorithm
    }

    /// The configured diffusion options.
    #[inline]
    pub fn options(&self) -> &DitherOptions {
        &self.dither_opts
    }

    /// Quantize row-major sRGB pixels into a [`QuantizedGrid`].
    ///
    /// Fails with [`QuantError::DimensionMismatch`] when `pixels` does not
    /// hold exactly `width * height` entries.
    pub fn quantize(
        &self,
        pixels: &[Srgb],
        width: usize,
        height: usize,
    ) -> Result<QuantizedGrid, QuantError> {
        if pixels.len() != width * height {
            return Err(QuantError::DimensionMismatch {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        let indices = self.algorithm.strategy().dither(
            pixels,
            width,
            height,
            &self.palette,
            &self.dither_opts,
        );
        Ok(QuantizedGrid::new(indices, width, height, self.palette.clone()))
    }

    /// Quantize a packed RGB8 buffer (3 bytes per pixel).
    pub fn quantize_rgb8(
        &self,
        rgb: &[u8],
        width: usize,
        height: usize,
    ) -> Result<QuantizedGrid, QuantError> {
        if rgb.len() != width * height * 3 {
            return Err(QuantError::DimensionMismatch {
                expected: width * height,
                actual: rgb.len() / 3,
            });
        }
        let pixels = Srgb::from_rgb8_buffer(rgb);
        self.quantize(&pixels, width, height)
    }
}
