//! Indexed PNG previews of quantized frames.
//!
//! The preview stores the same palette indices the device receives, with the
//! palette as PLTE, so viewing it shows exactly which ink each pixel gets.

use crate::error::EmitError;
use ink_quant::QuantizedGrid;
use std::io::Cursor;
use std::path::Path;

/// Which color set to write into PLTE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewColors {
    /// Datasheet colors
    #[default]
    Official,
    /// Measured panel colors, closer to what the frame really looks like
    Measured,
}

/// Encode a grid as an indexed PNG at the smallest bit depth that fits the
/// palette.
pub fn encode_preview(grid: &QuantizedGrid, colors: PreviewColors) -> Result<Vec<u8>, EmitError> {
    let palette = grid.palette();
    let rgb = match colors {
        PreviewColors::Official => palette.official_bytes(),
        PreviewColors::Measured => palette.actual_bytes(),
    };
    let plte: Vec<u8> = rgb.iter().flatten().copied().collect();

    let (depth, bits) = match palette.len() {
        0..=2 => (png::BitDepth::One, 1),
        3..=4 => (png::BitDepth::Two, 2),
        _ => (png::BitDepth::Four, 4),
    };
    let width = grid.width() as u32;
    let packed = pack_nbits(grid.indices(), width, bits);

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, grid.height() as u32);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(depth);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        encoder.set_palette(plte);
        let mut writer = encoder
            .write_header()
            .map_err(|e| EmitError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&packed)
            .map_err(|e| EmitError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Encode and write a preview file.
pub fn write_preview(
    grid: &QuantizedGrid,
    colors: PreviewColors,
    path: &Path,
) -> Result<(), EmitError> {
    let bytes = encode_preview(grid, colors)?;
    std::fs::write(path, &bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote preview");
    Ok(())
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
/// Each row starts on a byte boundary.
fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let height = indices.len() / width as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width as usize) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}
