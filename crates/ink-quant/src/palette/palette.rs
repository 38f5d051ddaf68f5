//! Palette struct with dual color storage and nearest-color matching.
//!
//! This module provides the core `Palette` type that stores both official
//! (device color code) and actual (measured) colors for indexed e-paper
//! panels, and the distance metrics used to match pixels against it.

use std::collections::HashSet;
use std::str::FromStr;

use super::error::PaletteError;
use crate::color::Srgb;

/// Largest palette a packed 4-bit index can address.
pub const MAX_PALETTE_LEN: usize = 16;

/// Distance metric for palette color matching.
///
/// The metric decides which palette entry is "nearest" to a pixel. Changing
/// it changes quantized output bit for bit, so it is always an explicit
/// part of the configuration rather than an implementation detail.
///
/// Both metrics return squared distances; only the ordering matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Squared Euclidean distance over the R, G and B channels.
    ///
    /// `dr² + dg² + db²`, with channels on the 0.0..=1.0 scale.
    #[default]
    Euclidean,

    /// "Redmean" weighted RGB distance.
    ///
    /// A cheap approximation of perceived difference that weights the red
    /// and blue channels by the mean red level of the two colors:
    ///
    /// `(2 + r̄)·dr² + 4·dg² + (3 - r̄)·db²`
    ///
    /// where `r̄ = (r1 + r2) / 2` on the 0.0..=1.0 scale. Pixels carrying
    /// diffused error can leave that range, so `r̄` is clamped to it to keep
    /// every weight positive.
    Redmean,
}

impl DistanceMetric {
    /// Squared distance between two colors under this metric.
    #[inline]
    pub fn distance(self, a: Srgb, b: Srgb) -> f32 {
        let dr = a.r - b.r;
        let dg = a.g - b.g;
        let db = a.b - b.b;
        match self {
            DistanceMetric::Euclidean => dr * dr + dg * dg + db * db,
            DistanceMetric::Redmean => {
                let rmean = ((a.r + b.r) * 0.5).clamp(0.0, 1.0);
                (2.0 + rmean) * dr * dr + 4.0 * dg * dg + (3.0 - rmean) * db * db
            }
        }
    }
}

/// A color palette with dual color storage and nearest-color matching.
///
/// The position of a color in the palette is the code stored for every
/// pixel that maps to it, so the order must match the decoder's
/// compiled-in table exactly.
///
/// # Dual Palette Support
///
/// E-paper panels rarely show the colors their datasheet names. `Palette`
/// keeps both:
///
/// - **Official colors**: the color table the device is built around
/// - **Actual colors**: what the panel really shows (used for matching
///   and error diffusion)
///
/// Without measured colors both sets are the same.
///
/// # Example
///
/// ```
/// use ink_quant::{Palette, Srgb};
///
/// let colors = [Srgb::from_u8(0, 0, 0), Srgb::from_u8(255, 255, 255)];
/// let palette = Palette::new(&colors, None).unwrap();
///
/// assert_eq!(palette.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Palette {
    official: Vec<Srgb>,
    actual: Vec<Srgb>,
    distance_metric: DistanceMetric,
}

impl Palette {
    /// Create a new palette from official sRGB colors.
    ///
    /// # Arguments
    ///
    /// * `official` - The official palette colors (device color table)
    /// * `actual` - Optional measured colors. If `None`, official colors
    ///              are used for both.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `official` is empty ([`PaletteError::EmptyPalette`])
    /// - `official` has more than [`MAX_PALETTE_LEN`] entries ([`PaletteError::TooManyColors`])
    /// - `actual` has a different length than `official` ([`PaletteError::LengthMismatch`])
    /// - Either array contains duplicate colors ([`PaletteError::DuplicateColor`])
    pub fn new(official: &[Srgb], actual: Option<&[Srgb]>) -> Result<Self, PaletteError> {
        if official.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if official.len() > MAX_PALETTE_LEN {
            return Err(PaletteError::TooManyColors {
                len: official.len(),
                max: MAX_PALETTE_LEN,
            });
        }

        let actual_colors: Vec<Srgb> = match actual {
            Some(a) => {
                if a.len() != official.len() {
                    return Err(PaletteError::LengthMismatch {
                        official: official.len(),
                        actual: a.len(),
                    });
                }
                a.to_vec()
            }
            None => official.to_vec(),
        };

        check_unique(official)?;
        check_unique(&actual_colors)?;

        Ok(Self {
            official: official.to_vec(),
            actual: actual_colors,
            distance_metric: DistanceMetric::default(),
        })
    }

    /// Create a palette from hex color strings.
    ///
    /// # Example
    ///
    /// ```
    /// use ink_quant::Palette;
    ///
    /// let palette = Palette::from_hex(
    ///     &["#000000", "#FFFFFF", "#BF0000"],
    ///     Some(&["#1F1F1F", "#B6B6B6", "#674949"]),
    /// ).unwrap();
    /// assert_eq!(palette.len(), 3);
    /// ```
    pub fn from_hex<S: AsRef<str>>(
        official: &[S],
        actual: Option<&[S]>,
    ) -> Result<Self, PaletteError> {
        let official_srgb = parse_all(official)?;
        let actual_srgb = actual.map(parse_all).transpose()?;
        Palette::new(&official_srgb, actual_srgb.as_deref())
    }

    /// Override the distance metric used by [`find_nearest()`](Self::find_nearest).
    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    /// The distance metric used for matching.
    #[inline]
    pub fn distance_metric(&self) -> DistanceMetric {
        self.distance_metric
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.official.len()
    }

    /// Always `false`: empty palettes are rejected at construction time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.official.is_empty()
    }

    /// Get the official color at the given index.
    #[inline]
    pub fn official(&self, idx: usize) -> Srgb {
        self.official[idx]
    }

    /// Get the actual (measured) color at the given index.
    #[inline]
    pub fn actual(&self, idx: usize) -> Srgb {
        self.actual[idx]
    }

    /// Returns true if measured colors differ from the official table.
    pub fn has_measured_colors(&self) -> bool {
        self.official
            .iter()
            .zip(&self.actual)
            .any(|(o, a)| o.to_bytes() != a.to_bytes())
    }

    /// Official colors as 8-bit triples, in index order.
    pub fn official_bytes(&self) -> Vec<[u8; 3]> {
        self.official.iter().map(|c| c.to_bytes()).collect()
    }

    /// Actual colors as 8-bit triples, in index order.
    pub fn actual_bytes(&self) -> Vec<[u8; 3]> {
        self.actual.iter().map(|c| c.to_bytes()).collect()
    }

    /// Find the nearest palette entry to `color`.
    ///
    /// Matches against the ACTUAL colors. Returns `(index, distance)`;
    /// ties resolve to the lowest index so the result is deterministic.
    ///
    /// # Example
    ///
    /// ```
    /// use ink_quant::{Palette, Srgb};
    ///
    /// let colors = [Srgb::from_u8(0, 0, 0), Srgb::from_u8(255, 255, 255)];
    /// let palette = Palette::new(&colors, None).unwrap();
    ///
    /// let (idx, _) = palette.find_nearest(Srgb::from_u8(40, 40, 40));
    /// assert_eq!(idx, 0);
    /// ```
    #[inline]
    pub fn find_nearest(&self, color: Srgb) -> (usize, f32) {
        let mut best_idx = 0;
        let mut best_dist = f32::MAX;

        for (i, &entry) in self.actual.iter().enumerate() {
            let dist = self.distance_metric.distance(color, entry);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        (best_idx, best_dist)
    }
}

fn parse_all<S: AsRef<str>>(colors: &[S]) -> Result<Vec<Srgb>, PaletteError> {
    colors
        .iter()
        .map(|s| Srgb::from_str(s.as_ref()).map_err(PaletteError::ParseColor))
        .collect()
}

fn check_unique(colors: &[Srgb]) -> Result<(), PaletteError> {
    let mut seen = HashSet::new();
    for (i, color) in colors.iter().enumerate() {
        if !seen.insert(color.to_bytes()) {
            return Err(PaletteError::DuplicateColor { index: i });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seven_color() -> Palette {
        Palette::from_hex(
            &[
                "#000000", "#FFFFFF", "#438A1C", "#6440FF", "#BF0000", "#FFF338", "#E87E00",
                "#C2A4F4",
            ],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_palette_basic_construction() {
        let colors = [
            Srgb::from_u8(0, 0, 0),
            Srgb::from_u8(255, 255, 255),
            Srgb::from_u8(255, 0, 0),
        ];
        let palette = Palette::new(&colors, None).unwrap();
        assert_eq!(palette.len(), 3);
        assert!(!palette.is_empty());
        assert!(!palette.has_measured_colors());
    }

    #[test]
    fn test_palette_dual_colors() {
        let official = [Srgb::from_u8(255, 0, 0)];
        let actual = [Srgb::from_u8(0x67, 0x49, 0x49)];
        let palette = Palette::new(&official, Some(&actual)).unwrap();

        assert_eq!(palette.official(0).to_bytes(), [255, 0, 0]);
        assert_eq!(palette.actual(0).to_bytes(), [0x67, 0x49, 0x49]);
        assert!(palette.has_measured_colors());
    }

    #[test]
    fn test_palette_empty_error() {
        let result = Palette::new(&[], None);
        assert!(matches!(result, Err(PaletteError::EmptyPalette)));
    }

    #[test]
    fn test_palette_too_many_colors() {
        let colors: Vec<Srgb> = (0..17).map(|i| Srgb::from_u8(i * 10, 0, 0)).collect();
        let result = Palette::new(&colors, None);
        assert_eq!(
            result.unwrap_err(),
            PaletteError::TooManyColors { len: 17, max: 16 }
        );

        // Sixteen is the nibble limit and still valid
        assert!(Palette::new(&colors[..16], None).is_ok());
    }

    #[test]
    fn test_palette_length_mismatch() {
        let official = [Srgb::from_u8(0, 0, 0), Srgb::from_u8(255, 255, 255)];
        let actual = [Srgb::from_u8(10, 10, 10)];
        let result = Palette::new(&official, Some(&actual));
        assert!(matches!(result, Err(PaletteError::LengthMismatch { .. })));
    }

    #[test]
    fn test_palette_duplicate_in_official() {
        let colors = [
            Srgb::from_u8(255, 0, 0),
            Srgb::from_u8(0, 255, 0),
            Srgb::from_u8(255, 0, 0),
        ];
        let result = Palette::new(&colors, None);
        assert_eq!(result.unwrap_err(), PaletteError::DuplicateColor { index: 2 });
    }

    #[test]
    fn test_palette_duplicate_in_actual() {
        let official = [Srgb::from_u8(255, 0, 0), Srgb::from_u8(0, 255, 0)];
        let actual = [Srgb::from_u8(200, 50, 50), Srgb::from_u8(200, 50, 50)];
        let result = Palette::new(&official, Some(&actual));
        assert!(matches!(result, Err(PaletteError::DuplicateColor { .. })));
    }

    #[test]
    fn test_find_nearest_exact_match() {
        let palette = seven_color();
        for i in 0..palette.len() {
            let (idx, dist) = palette.find_nearest(palette.official(i));
            assert_eq!(idx, i);
            assert_eq!(dist, 0.0);
        }
    }

    #[test]
    fn test_find_nearest_greys() {
        let colors = [Srgb::from_u8(0, 0, 0), Srgb::from_u8(255, 255, 255)];
        let palette = Palette::new(&colors, None).unwrap();

        let (idx, _) = palette.find_nearest(Srgb::from_u8(100, 100, 100));
        assert_eq!(idx, 0, "Dark gray should match black");

        let (idx, _) = palette.find_nearest(Srgb::from_u8(160, 160, 160));
        assert_eq!(idx, 1, "Light gray should match white");
    }

    #[test]
    fn test_find_nearest_tie_prefers_lowest_index() {
        let colors = [Srgb::from_u8(0, 0, 0), Srgb::from_u8(254, 254, 254)];
        let palette = Palette::new(&colors, None).unwrap();

        let (idx, _) = palette.find_nearest(Srgb::from_u8(127, 127, 127));
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_find_nearest_uses_actual_not_official() {
        let official = [Srgb::from_u8(0, 0, 0), Srgb::from_u8(255, 255, 255)];
        let actual = [Srgb::from_u8(255, 255, 255), Srgb::from_u8(0, 0, 0)];
        let palette = Palette::new(&official, Some(&actual)).unwrap();

        let (idx, _) = palette.find_nearest(Srgb::from_u8(30, 30, 30));
        assert_eq!(idx, 1, "Should match against actual colors (black at idx 1)");

        let (idx, _) = palette.find_nearest(Srgb::from_u8(220, 220, 220));
        assert_eq!(idx, 0, "Should match against actual colors (white at idx 0)");
    }

    #[test]
    fn test_euclidean_distance_values() {
        let black = Srgb::from_u8(0, 0, 0);
        let white = Srgb::from_u8(255, 255, 255);
        assert_eq!(DistanceMetric::Euclidean.distance(black, white), 3.0);
        assert_eq!(DistanceMetric::Euclidean.distance(white, white), 0.0);
    }

    #[test]
    fn test_redmean_weights_green_heaviest() {
        let base = Srgb::new(0.5, 0.5, 0.5);
        let red_shift = Srgb::new(0.6, 0.5, 0.5);
        let green_shift = Srgb::new(0.5, 0.6, 0.5);
        let metric = DistanceMetric::Redmean;
        assert!(metric.distance(base, green_shift) > metric.distance(base, red_shift));
    }

    #[test]
    fn test_redmean_overshoot_keeps_blue_weight_positive() {
        // Red far past 1.0 from accumulated error
        let pixel = Srgb::new(6.0, 0.0, 0.0);
        let red = Srgb::new(1.0, 0.0, 0.0);
        let magenta = Srgb::new(1.0, 0.0, 1.0);
        let metric = DistanceMetric::Redmean;
        assert!(metric.distance(pixel, magenta) > metric.distance(pixel, red));
    }

    #[test]
    fn test_metrics_can_disagree() {
        // Dark green: plain Euclidean picks black, the green-weighted
        // metric picks the green entry.
        let palette = seven_color();
        let dark_green = Srgb::from_u8(0, 80, 0);

        let (euclid, _) = palette.find_nearest(dark_green);
        let (redmean, _) = palette
            .clone()
            .with_distance_metric(DistanceMetric::Redmean)
            .find_nearest(dark_green);

        assert_eq!(euclid, 0);
        assert_eq!(redmean, 2);
        assert_eq!(palette.distance_metric(), DistanceMetric::Euclidean);
    }

    #[test]
    fn test_from_hex_dual_palette() {
        let palette = Palette::from_hex(
            &["#000000", "#FFFFFF", "#FF0000"],
            Some(&["#1F1F1F", "#B6B6B6", "#674949"]),
        )
        .unwrap();
        assert_eq!(palette.official_bytes()[2], [255, 0, 0]);
        assert_eq!(palette.actual_bytes()[0], [0x1f, 0x1f, 0x1f]);
    }

    #[test]
    fn test_from_hex_owned_strings() {
        let colors = vec!["#000".to_string(), "#fff".to_string()];
        let palette = Palette::from_hex(&colors, None).unwrap();
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_from_hex_invalid_hex() {
        let result = Palette::from_hex(&["#ZZZZZZ"], None);
        assert!(matches!(result, Err(PaletteError::ParseColor(_))));
    }
}
