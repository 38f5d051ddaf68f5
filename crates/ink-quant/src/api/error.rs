//! Unified error type for the ink-quant public API.
//!
//! [`QuantError`] wraps all error types from the crate into a single enum
//! for convenient `?` propagation in application code.

use crate::palette::{PaletteError, ParseColorError};
use std::fmt;

/// Unified error type for the ink-quant public API.
///
/// # Example
///
/// ```
/// use ink_quant::{Palette, QuantError};
///
/// fn create_palette() -> Result<Palette, QuantError> {
///     let palette = Palette::from_hex(&["#000000", "#FFFFFF"], None)?;
///     Ok(palette)
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum QuantError {
    /// Palette validation error (empty, oversized, duplicate, length mismatch, or parse error)
    Palette(PaletteError),
    /// Color parsing error (invalid hex string)
    ParseColor(ParseColorError),
    /// Pixel or index buffer does not match `width * height`
    DimensionMismatch {
        /// Expected number of elements
        expected: usize,
        /// Number supplied
        actual: usize,
    },
    /// An index does not address any palette entry
    IndexOutOfRange {
        /// Row-major position of the offending index
        position: usize,
        /// The index value found
        value: u8,
        /// Palette length
        palette_len: usize,
    },
}

impl fmt::Display for QuantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantError::Palette(err) => write!(f, "palette error: {}", err),
            QuantError::ParseColor(err) => write!(f, "color parse error: {}", err),
            QuantError::DimensionMismatch { expected, actual } => write!(
                f,
                "buffer holds {} pixels, expected {}",
                actual, expected
            ),
            QuantError::IndexOutOfRange {
                position,
                value,
                palette_len,
            } => write!(
                f,
                "index {} at position {} exceeds palette of {} colors",
                value, position, palette_len
            ),
        }
    }
}

impl std::error::Error for QuantError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuantError::Palette(err) => Some(err),
            QuantError::ParseColor(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PaletteError> for QuantError {
    fn from(err: PaletteError) -> Self {
        QuantError::Palette(err)
    }
}

impl From<ParseColorError> for QuantError {
    fn from(err: ParseColorError) -> Self {
        QuantError::ParseColor(err)
    }
}
