use crate::error::ConvertError;
use serde::{Deserialize, Serialize};

/// Target frame dimensions every image is fitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// 5.65" 7-color panel: 600x448
    pub const DEFAULT: Self = Self {
        width: 600,
        height: 448,
    };

    /// Build a canvas, rejecting zero or odd-width frames.
    pub fn new(width: u32, height: u32) -> Result<Self, ConvertError> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Both dimensions must be positive and the width even, since two
    /// horizontally adjacent pixels share one packed byte.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConvertError::InvalidConfiguration(format!(
                "canvas {}x{} has a zero dimension",
                self.width, self.height
            )));
        }
        if self.width % 2 != 0 {
            return Err(ConvertError::InvalidConfiguration(format!(
                "canvas width {} is odd",
                self.width
            )));
        }
        Ok(())
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size of the nibble-packed frame in bytes.
    pub fn packed_len(&self) -> usize {
        self.pixel_count() / 2
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
