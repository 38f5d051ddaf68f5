//! Palette mapping strategies: plain nearest-color and error diffusion.
//!
//! Every strategy implements the [`Dither`] trait, which turns a grid of
//! sRGB pixels into palette indices. Configuration is done via
//! [`DitherOptions`].
//!
//! # Strategies
//!
//! - [`NearestColor`]: each pixel maps to its nearest palette entry, no
//!   error is carried between pixels
//! - [`FloydSteinberg`]: classic 4-neighbour kernel, 100% propagation
//! - [`Atkinson`]: 6-neighbour kernel, 75% propagation
//!
//! # Example
//!
//! ```
//! use ink_quant::{Dither, DitherOptions, FloydSteinberg, Palette, Srgb};
//!
//! let palette = Palette::from_hex(&["#000000", "#FFFFFF"], None).unwrap();
//! let pixels = vec![Srgb::from_u8(128, 128, 128); 16];
//!
//! let indices = FloydSteinberg.dither(&pixels, 4, 4, &palette, &DitherOptions::new());
//! assert_eq!(indices.len(), 16);
//! ```

mod atkinson;
mod floyd_steinberg;
mod kernel;
mod nearest;
mod options;

pub use atkinson::Atkinson;
pub use floyd_steinberg::FloydSteinberg;
pub use kernel::{Kernel, ATKINSON, FLOYD_STEINBERG};
pub use nearest::NearestColor;
pub use options::DitherOptions;

use crate::color::Srgb;
use crate::palette::Palette;

/// Dither algorithm selection for the [`Quantizer`](crate::Quantizer) builder.
///
/// # Example
///
/// ```
/// use ink_quant::{DitherAlgorithm, Palette, Quantizer};
///
/// let palette = Palette::from_hex(&["#000000", "#FFFFFF"], None).unwrap();
/// let quantizer = Quantizer::new(palette).algorithm(DitherAlgorithm::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherAlgorithm {
    /// Nearest palette color per pixel, no error diffusion.
    None,

    /// Floyd-Steinberg error diffusion (100% propagation).
    #[default]
    FloydSteinberg,

    /// Atkinson error diffusion (75% propagation).
    Atkinson,
}

impl DitherAlgorithm {
    /// The diffusion kernel for this algorithm, if it diffuses error.
    pub fn kernel(self) -> Option<&'static Kernel> {
        match self {
            DitherAlgorithm::None => None,
            DitherAlgorithm::FloydSteinberg => Some(&FLOYD_STEINBERG),
            DitherAlgorithm::Atkinson => Some(&ATKINSON),
        }
    }

    /// The strategy object implementing this algorithm.
    pub fn strategy(self) -> &'static dyn Dither {
        match self {
            DitherAlgorithm::None => &NearestColor,
            DitherAlgorithm::FloydSteinberg => &FloydSteinberg,
            DitherAlgorithm::Atkinson => &Atkinson,
        }
    }

    /// Stable lowercase name, as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            DitherAlgorithm::None => "none",
            DitherAlgorithm::FloydSteinberg => "floyd-steinberg",
            DitherAlgorithm::Atkinson => "atkinson",
        }
    }
}

/// Trait for palette mapping strategies.
///
/// Implementors convert a grid of sRGB pixels into palette indices.
/// Implementations must be deterministic: the same pixels, palette and
/// options always produce the same indices.
pub trait Dither: Send + Sync {
    /// Map an image to palette indices.
    ///
    /// # Arguments
    ///
    /// * `image` - Input pixels (row-major order)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `palette` - Color palette for quantization
    /// * `options` - Dithering configuration
    ///
    /// # Returns
    ///
    /// One palette index per pixel, row-major, each in `0..palette.len()`.
    fn dither(
        &self,
        image: &[Srgb],
        width: usize,
        height: usize,
        palette: &Palette,
        options: &DitherOptions,
    ) -> Vec<u8>;
}

/// Error buffer for efficient error diffusion.
///
/// Manages a sliding window of error rows, storing only the rows that
/// the diffusion kernel can reach (determined by `max_dy`).
///
/// # Usage Pattern
///
/// 1. Create buffer with `new(width, row_depth)`
/// 2. For each row:
///    a. Read accumulated error with `get_accumulated(x)`
///    b. After processing pixel, distribute error with `add_error(x, dy, error)`
///    c. After row complete, call `advance_row()`
#[derive(Debug)]
pub struct ErrorBuffer {
    /// Error rows: rows[0] is current row, rows[1] is next, etc.
    rows: Vec<Vec<[f32; 3]>>,
    width: usize,
}

impl ErrorBuffer {
    /// Create a new error buffer tracking `row_depth` rows of `width` pixels.
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![[0.0; 3]; width]).collect(),
            width,
        }
    }

    /// Get accumulated error for a pixel in the current row.
    #[inline]
    pub fn get_accumulated(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    /// Add error to a future pixel.
    ///
    /// `row_offset` 0 is the current row. Out-of-bounds targets are ignored.
    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: [f32; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            for c in 0..3 {
                self.rows[row_offset][x][c] += error[c];
            }
        }
    }

    /// Advance to the next row.
    ///
    /// The first row is discarded, later rows shift forward, and a zeroed
    /// row is added at the end.
    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; 3]);
        }
    }
}

/// Clamp a channel value with error to `[-max_error, 1.0 + max_error]`.
#[inline]
pub(crate) fn clamp_channel(value: f32, max_error: f32) -> f32 {
    value.clamp(-max_error, 1.0 + max_error)
}

/// Core error diffusion loop parameterized by kernel.
///
/// Pixels are visited row by row (alternating direction when serpentine
/// scanning is enabled). Each pixel has the error accumulated so far added
/// to it, is matched against the palette, and the residual
/// `pixel - palette.actual(idx)` is spread to unvisited neighbours.
pub(crate) fn dither_with_kernel(
    image: &[Srgb],
    width: usize,
    height: usize,
    palette: &Palette,
    kernel: &Kernel,
    options: &DitherOptions,
) -> Vec<u8> {
    let mut output = vec![0u8; width * height];
    let mut error_buf = ErrorBuffer::new(width, kernel.max_dy + 1);
    let divisor = kernel.divisor as f32;

    for y in 0..height {
        let reverse = options.serpentine && y % 2 == 1;

        let x_range: Box<dyn Iterator<Item = usize>> = if reverse {
            Box::new((0..width).rev())
        } else {
            Box::new(0..width)
        };

        for x in x_range {
            let idx = y * width + x;

            let accumulated = error_buf.get_accumulated(x);
            let pixel = Srgb::new(
                clamp_channel(image[idx].r + accumulated[0], options.error_clamp),
                clamp_channel(image[idx].g + accumulated[1], options.error_clamp),
                clamp_channel(image[idx].b + accumulated[2], options.error_clamp),
            );

            let (nearest_idx, _dist) = palette.find_nearest(pixel);
            output[idx] = nearest_idx as u8;

            let nearest = palette.actual(nearest_idx);
            let error = [
                pixel.r - nearest.r,
                pixel.g - nearest.g,
                pixel.b - nearest.b,
            ];
            if error == [0.0; 3] {
                continue;
            }

            for &(dx, dy, weight) in kernel.entries {
                // Flip dx for serpentine reverse rows
                let effective_dx = if reverse { -dx } else { dx };
                let nx = x as i32 + effective_dx;

                if nx >= 0 && (nx as usize) < width && y + (dy as usize) < height {
                    let w = weight as f32 / divisor;
                    error_buf.add_error(
                        nx as usize,
                        dy as usize,
                        [error[0] * w, error[1] * w, error[2] * w],
                    );
                }
            }
        }

        error_buf.advance_row();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_buffer_accumulates_and_advances() {
        let mut buf = ErrorBuffer::new(3, 2);
        buf.add_error(1, 0, [0.25, 0.0, 0.0]);
        buf.add_error(1, 0, [0.25, 0.0, 0.0]);
        buf.add_error(2, 1, [0.0, 0.5, 0.0]);
        assert_eq!(buf.get_accumulated(1), [0.5, 0.0, 0.0]);

        buf.advance_row();
        assert_eq!(buf.get_accumulated(1), [0.0; 3]);
        assert_eq!(buf.get_accumulated(2), [0.0, 0.5, 0.0]);

        buf.advance_row();
        assert_eq!(buf.get_accumulated(2), [0.0; 3]);
    }

    #[test]
    fn test_error_buffer_ignores_out_of_bounds() {
        let mut buf = ErrorBuffer::new(2, 2);
        buf.add_error(5, 0, [1.0; 3]);
        buf.add_error(0, 7, [1.0; 3]);
        assert_eq!(buf.get_accumulated(0), [0.0; 3]);
        assert_eq!(buf.get_accumulated(1), [0.0; 3]);
    }

    #[test]
    fn test_clamp_channel() {
        assert_eq!(clamp_channel(2.5, 1.0), 2.0);
        assert_eq!(clamp_channel(-3.0, 1.0), -1.0);
        assert_eq!(clamp_channel(0.4, 0.1), 0.4);
    }

    #[test]
    fn test_algorithm_kernels() {
        assert!(DitherAlgorithm::None.kernel().is_none());
        assert_eq!(DitherAlgorithm::FloydSteinberg.kernel().unwrap().divisor, 16);
        assert_eq!(DitherAlgorithm::Atkinson.kernel().unwrap().divisor, 8);
        assert_eq!(DitherAlgorithm::default(), DitherAlgorithm::FloydSteinberg);
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(DitherAlgorithm::None.name(), "none");
        assert_eq!(DitherAlgorithm::FloydSteinberg.name(), "floyd-steinberg");
        assert_eq!(DitherAlgorithm::Atkinson.name(), "atkinson");
    }
}
