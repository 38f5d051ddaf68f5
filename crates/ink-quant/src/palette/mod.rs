//! Palette types and utilities
//!
//! This module provides the [`Palette`] type, the [`DistanceMetric`] used
//! for nearest-color matching, and error types for parsing and validation.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{DistanceMetric, Palette, MAX_PALETTE_LEN};
