//! Nibble packing: two horizontally adjacent palette indices per byte.
//!
//! Byte `i` holds pixels `2i` (high nibble) and `2i + 1` (low nibble) in
//! row-major order. This is the layout the panel controller streams
//! straight out of its frame buffer.

use crate::error::ConvertError;
use ink_quant::QuantizedGrid;

/// Pack a quantized grid. The grid width must be even so that no byte
/// straddles two rows.
pub fn pack(grid: &QuantizedGrid) -> Result<Vec<u8>, ConvertError> {
    if grid.width() % 2 != 0 {
        return Err(ConvertError::InvalidConfiguration(format!(
            "cannot nibble-pack odd width {}",
            grid.width()
        )));
    }
    Ok(pack_indices(grid.indices()))
}

/// Pack a flat row-major index buffer of even length.
pub fn pack_indices(indices: &[u8]) -> Vec<u8> {
    debug_assert!(indices.len() % 2 == 0, "odd index count {}", indices.len());
    indices
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | (pair[1] & 0x0f))
        .collect()
}

/// Inverse of [`pack_indices`].
pub fn unpack(packed: &[u8]) -> Vec<u8> {
    packed
        .iter()
        .flat_map(|&byte| [byte >> 4, byte & 0x0f])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ink_quant::Palette;
    use pretty_assertions::assert_eq;

    fn palette() -> Palette {
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
    fn test_high_nibble_is_even_pixel() {
        assert_eq!(pack_indices(&[1, 2, 7, 0]), vec![0x12, 0x70]);
    }

    #[test]
    fn test_pack_preserves_row_order() {
        let grid =
            QuantizedGrid::from_indices(vec![0, 1, 2, 3, 4, 5, 6, 7], 4, 2, palette()).unwrap();
        assert_eq!(pack(&grid).unwrap(), vec![0x01, 0x23, 0x45, 0x67]);
    }

    #[test]
    fn test_pack_length_is_half_pixel_count() {
        let grid = QuantizedGrid::from_indices(vec![3; 600 * 448], 600, 448, palette()).unwrap();
        let packed = pack(&grid).unwrap();
        assert_eq!(packed.len(), 134_400);
        assert!(packed.iter().all(|&b| b == 0x33));
    }

    #[test]
    fn test_unpack_inverts_pack() {
        let indices: Vec<u8> = (0..64).map(|i| (i * 5 % 8) as u8).collect();
        let grid = QuantizedGrid::from_indices(indices.clone(), 8, 8, palette()).unwrap();
        assert_eq!(unpack(&pack(&grid).unwrap()), indices);
    }

    #[test]
    fn test_pack_rejects_odd_width() {
        let grid = QuantizedGrid::from_indices(vec![0; 6], 3, 2, palette()).unwrap();
        assert!(matches!(
            pack(&grid),
            Err(ConvertError::InvalidConfiguration(_))
        ));
    }
}
