//! Dithering options and configuration.
//!
//! This module provides the [`DitherOptions`] struct for configuring
//! error diffusion dithering behavior.

/// Configuration options for error diffusion dithering.
///
/// # Defaults
///
/// - Serpentine scanning: disabled (plain row-major scan, left to right)
/// - Error clamp: 1.0 (a pixel plus its accumulated error stays within
///   `[-1.0, 2.0]` per channel)
///
/// # Example
///
/// ```
/// use ink_quant::DitherOptions;
///
/// let options = DitherOptions::new()
///     .serpentine(true)
///     .error_clamp(0.5);
/// assert!(options.serpentine);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitherOptions {
    /// Enable serpentine scanning (alternating row direction).
    ///
    /// When enabled, odd rows are processed right-to-left and the diffusion
    /// kernel is horizontally flipped.
    ///
    /// Default: `false`
    pub serpentine: bool,

    /// Maximum overshoot per channel, on the 0.0..=1.0 scale.
    ///
    /// A pixel plus its accumulated error is clamped to
    /// `[-error_clamp, 1.0 + error_clamp]` before matching.
    ///
    /// Default: `1.0`
    pub error_clamp: f32,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            serpentine: false,
            error_clamp: 1.0,
        }
    }
}

impl DitherOptions {
    /// Create new dither options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set serpentine scanning mode.
    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.serpentine = enabled;
        self
    }

    /// Set error clamping threshold.
    #[inline]
    pub fn error_clamp(mut self, clamp: f32) -> Self {
        self.error_clamp = clamp;
        self
    }
}
