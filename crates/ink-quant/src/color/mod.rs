//! Color types
//!
//! Pixels and palette entries share one representation, [`Srgb`]. Matching
//! and error diffusion both happen directly in sRGB so results line up
//! with what the palette table on the device encodes.
//!
//! # Example
//!
//! ```
//! use ink_quant::Srgb;
//!
//! let orange: Srgb = "#E87E00".parse().unwrap();
//! assert_eq!(orange.to_bytes(), [0xE8, 0x7E, 0x00]);
//! ```

mod srgb;

pub use srgb::Srgb;
