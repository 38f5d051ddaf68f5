//! QuantizedGrid: palette indices plus the palette they index.
//!
//! [`QuantizedGrid`] wraps quantized palette indices with dimension metadata
//! and an owned [`Palette`]. The indexed form is canonical; RGB outputs are
//! computed on demand by looking up palette colors.

use crate::api::QuantError;
use crate::palette::Palette;

/// The canonical output of quantization.
///
/// Stores one `u8` palette index per pixel in row-major order, along with
/// image dimensions and the palette the indices refer to. Every index is
/// guaranteed to be `< palette.len()`.
///
/// # Example
///
/// ```
/// use ink_quant::{Palette, QuantizedGrid};
///
/// let palette = Palette::from_hex(&["#000000", "#FFFFFF"], None).unwrap();
/// let grid = QuantizedGrid::from_indices(vec![0, 1, 1, 0], 2, 2, palette).unwrap();
///
/// assert_eq!(grid.get(1, 0), 1);
/// assert_eq!(grid.to_rgb_official().len(), 2 * 2 * 3);
/// ```
#[derive(Debug, Clone)]
pub struct QuantizedGrid {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl QuantizedGrid {
    /// Wrap indices produced by a [`Dither`](crate::Dither) strategy.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub(crate) fn new(indices: Vec<u8>, width: usize, height: usize, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match width * height ({}x{}={})",
            indices.len(),
            width,
            height,
            width * height,
        );
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    /// Build a grid from externally supplied indices, validating both the
    /// length and that every index addresses a palette entry.
    pub fn from_indices(
        indices: Vec<u8>,
        width: usize,
        height: usize,
        palette: Palette,
    ) -> Result<Self, QuantError> {
        if indices.len() != width * height {
            return Err(QuantError::DimensionMismatch {
                expected: width * height,
                actual: indices.len(),
            });
        }
        if let Some((position, &value)) = indices
            .iter()
            .enumerate()
            .find(|(_, &v)| v as usize >= palette.len())
        {
            return Err(QuantError::IndexOutOfRange {
                position,
                value,
                palette_len: palette.len(),
            });
        }
        Ok(Self::new(indices, width, height, palette))
    }

    /// Returns the palette indices, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Returns the grid width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the palette the indices refer to.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Index at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.indices[y * self.width + x]
    }

    /// Iterate over rows of indices.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.indices.chunks_exact(self.width.max(1))
    }

    /// Count how many pixels use each palette entry.
    pub fn histogram(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.palette.len()];
        for &idx in &self.indices {
            counts[idx as usize] += 1;
        }
        counts
    }

    /// Convert to RGB bytes using official device colors.
    ///
    /// The returned buffer has length `width * height * 3`.
    pub fn to_rgb_official(&self) -> Vec<u8> {
        self.indices
            .iter()
            .flat_map(|&idx| self.palette.official(idx as usize).to_bytes())
            .collect()
    }

    /// Convert to RGB bytes using actual measured colors, for previews that
    /// show how the panel will really look.
    pub fn to_rgb_actual(&self) -> Vec<u8> {
        self.indices
            .iter()
            .flat_map(|&idx| self.palette.actual(idx as usize).to_bytes())
            .collect()
    }
}

impl PartialEq for QuantizedGrid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.indices == other.indices
            && self.palette.official_bytes() == other.palette.official_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Srgb;

    fn dual_palette() -> Palette {
        let official = [
            Srgb::from_u8(0, 0, 0),
            Srgb::from_u8(255, 0, 0),
            Srgb::from_u8(255, 255, 255),
        ];
        let actual = [
            Srgb::from_u8(0x1f, 0x1f, 0x1f),
            Srgb::from_u8(0x67, 0x49, 0x49),
            Srgb::from_u8(0xb6, 0xb6, 0xb6),
        ];
        Palette::new(&official, Some(&actual)).unwrap()
    }

    #[test]
    fn test_from_indices_stores_fields() {
        let grid = QuantizedGrid::from_indices(vec![0, 1, 2, 0, 1, 2], 3, 2, dual_palette()).unwrap();

        assert_eq!(grid.indices(), &[0, 1, 2, 0, 1, 2]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.palette().len(), 3);
        assert_eq!(grid.get(2, 1), 2);
    }

    #[test]
    fn test_from_indices_length_mismatch() {
        let result = QuantizedGrid::from_indices(vec![0; 5], 3, 2, dual_palette());
        assert!(matches!(
            result,
            Err(QuantError::DimensionMismatch {
                expected: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_from_indices_index_out_of_range() {
        let result = QuantizedGrid::from_indices(vec![0, 1, 3, 0], 2, 2, dual_palette());
        assert!(matches!(
            result,
            Err(QuantError::IndexOutOfRange {
                position: 2,
                value: 3,
                palette_len: 3
            })
        ));
    }

    #[test]
    fn test_to_rgb_official_and_actual() {
        let grid = QuantizedGrid::from_indices(vec![1, 2], 2, 1, dual_palette()).unwrap();
        assert_eq!(grid.to_rgb_official(), vec![255, 0, 0, 255, 255, 255]);
        assert_eq!(
            grid.to_rgb_actual(),
            vec![0x67, 0x49, 0x49, 0xb6, 0xb6, 0xb6]
        );
    }

    #[test]
    fn test_rows_and_histogram() {
        let grid = QuantizedGrid::from_indices(vec![0, 0, 2, 1, 0, 2], 3, 2, dual_palette()).unwrap();
        let rows: Vec<&[u8]> = grid.rows().collect();
        assert_eq!(rows, vec![&[0, 0, 2][..], &[1, 0, 2][..]]);
        assert_eq!(grid.histogram(), vec![3, 1, 2]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics() {
        let grid = QuantizedGrid::from_indices(vec![0; 4], 2, 2, dual_palette()).unwrap();
        grid.get(2, 0);
    }
}
