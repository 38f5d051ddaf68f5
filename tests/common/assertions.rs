//! Assertion helpers for packed frames.

use inkpack::models::Canvas;
use pretty_assertions::assert_eq;

/// Assert a packed frame holds exactly one byte per two canvas pixels
pub fn assert_frame_size(packed: &[u8], canvas: Canvas) {
    assert_eq!(
        packed.len(),
        canvas.width as usize * canvas.height as usize / 2,
        "Packed frame size does not match canvas {canvas}"
    );
}

/// Assert every nibble addresses a palette entry
pub fn assert_indices_in_palette(packed: &[u8], palette_len: usize) {
    for (offset, byte) in packed.iter().enumerate() {
        let (hi, lo) = ((byte >> 4) as usize, (byte & 0x0f) as usize);
        assert!(
            hi < palette_len && lo < palette_len,
            "Byte {offset} = {byte:#04x} has an index outside a {palette_len}-color palette"
        );
    }
}

/// Assert the whole frame uses a single palette index
pub fn assert_uniform_frame(packed: &[u8], index: u8) {
    let expected = (index << 4) | index;
    if let Some(offset) = packed.iter().position(|&b| b != expected) {
        panic!(
            "Expected every byte to be {expected:#04x}, byte {offset} is {:#04x}",
            packed[offset]
        );
    }
}
