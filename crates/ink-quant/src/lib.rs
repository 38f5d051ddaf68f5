#![allow(clippy::module_inception, clippy::needless_range_loop)]

//! ink-quant: fixed-palette quantization for color e-paper panels
//!
//! Maps sRGB images onto a small palette of panel ink colors (at most 16),
//! producing one palette index per pixel.
//!
//! # Quick Start
//!
//! The [`Quantizer`] builder is the primary entry point:
//!
//! ```
//! use ink_quant::{Palette, Quantizer, Srgb};
//!
//! let palette = Palette::from_hex(&["#000000", "#FFFFFF", "#BF0000"], None).unwrap();
//!
//! let quantizer = Quantizer::new(palette);
//! let pixels = vec![Srgb::from_u8(128, 128, 128); 4];
//! let grid = quantizer.quantize(&pixels, 2, 2).unwrap();
//!
//! assert_eq!(grid.indices().len(), 4);
//! ```
//!
//! # Palettes
//!
//! A [`Palette`] keeps two colors per entry: the *official* color from the
//! panel's datasheet, and an optional *actual* color measured off a real
//! panel. Matching and error computation always use the actual colors, so
//! supplying measurements makes the quantizer aim for what the panel really
//! shows. The index written for a pixel is the same either way.
//!
//! # Algorithms
//!
//! Three strategies are available via [`DitherAlgorithm`]:
//!
//! - None: nearest palette color per pixel, no error diffusion
//! - Floyd-Steinberg (default): 7/16, 3/16, 5/16, 1/16 to the four
//!   unvisited neighbours
//! - Atkinson: 1/8 to six neighbours, discarding a quarter of the error
//!
//! Error is computed and diffused per channel on the 0.0..=1.0 sRGB scale.
//!
//! # Distance
//!
//! [`DistanceMetric::Euclidean`] (default) is plain squared distance in
//! sRGB. [`DistanceMetric::Redmean`] weights the channels by the mean red
//! level, a cheap approximation of perceived difference. Ties resolve to
//! the lowest palette index under both.

pub mod api;
pub mod color;
pub mod dither;
pub mod output;
pub mod palette;


pub use api::{QuantError, Quantizer};
pub use color::Srgb;
pub use dither::{
    Atkinson, Dither, DitherAlgorithm, DitherOptions, FloydSteinberg, Kernel, NearestColor,
};
pub use output::QuantizedGrid;
pub use palette::{DistanceMetric, Palette, PaletteError, ParseColorError, MAX_PALETTE_LEN};
