//! sRGB color type
//!
//! Pixels arrive from decoded image files as 8-bit sRGB triples. The
//! quantizer works on them as-is: no gamma decoding and no color
//! management, so a palette entry written as `#438A1C` is matched and
//! diffused exactly as the file encodes it.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color in sRGB color space.
///
/// Values are in the range 0.0..=1.0 (mapping to 0..255 for 8-bit).
/// Intermediate values produced by error diffusion may leave that range;
/// [`Srgb::to_bytes`] clamps on the way out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    /// Red channel (0.0..=1.0)
    pub r: f32,
    /// Green channel (0.0..=1.0)
    pub g: f32,
    /// Blue channel (0.0..=1.0)
    pub b: f32,
}

impl Srgb {
    /// Create a new Srgb color from float values.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from 8-bit unsigned integer values.
    ///
    /// # Example
    /// ```
    /// use ink_quant::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create an Srgb color from a byte array [R, G, B].
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    ///
    /// Rounds and clamps values to the 0..=255 range.
    ///
    /// # Example
    /// ```
    /// use ink_quant::Srgb;
    /// let color = Srgb::new(1.0, 0.5, 0.0);
    /// let bytes = color.to_bytes();
    /// assert_eq!(bytes[0], 255);
    /// assert_eq!(bytes[2], 0);
    /// ```
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Format as an uppercase `#RRGGBB` string.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Convert a packed RGB8 buffer (`[R, G, B, R, G, B, ...]`) to pixels.
    ///
    /// Trailing bytes that do not form a full triple are ignored.
    pub fn from_rgb8_buffer(rgb: &[u8]) -> Vec<Srgb> {
        rgb.chunks_exact(3)
            .map(|px| Srgb::from_u8(px[0], px[1], px[2]))
            .collect()
    }
}

impl fmt::Display for Srgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` - standard 6-digit hex with hash
    /// - `RRGGBB` - standard 6-digit hex without hash
    /// - `#RGB` - shorthand 3-digit hex with hash (expands to RRGGBB)
    /// - `RGB` - shorthand 3-digit hex without hash
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ink_quant::Srgb;
    ///
    /// let white: Srgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white.r, 1.0);
    ///
    /// let red: Srgb = "#F00".parse().unwrap();
    /// assert_eq!(red.r, 1.0);
    /// assert_eq!(red.g, 0.0);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_round_trip_is_exact() {
        for i in 0..=255u8 {
            let color = Srgb::from_u8(i, 255 - i, i / 2);
            assert_eq!(color.to_bytes(), [i, 255 - i, i / 2]);
        }
    }

    #[test]
    fn test_srgb_constructors() {
        let color = Srgb::from_u8(255, 128, 0);
        assert_eq!(color.r, 1.0);
        assert!((color.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(color.b, 0.0);

        let from_bytes = Srgb::from_bytes([255, 128, 0]);
        assert_eq!(from_bytes, color);
    }

    #[test]
    fn test_to_bytes_clamps_out_of_range() {
        let color = Srgb::new(1.4, -0.2, 0.5);
        assert_eq!(color.to_bytes(), [255, 0, 128]);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Srgb::from_u8(0x43, 0x8a, 0x1c).to_hex(), "#438A1C");
        assert_eq!(Srgb::from_u8(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn test_from_rgb8_buffer() {
        let pixels = Srgb::from_rgb8_buffer(&[255, 0, 0, 0, 0, 255, 7]);
        assert_eq!(pixels.len(), 2);
        assert_eq!(pixels[0].to_bytes(), [255, 0, 0]);
        assert_eq!(pixels[1].to_bytes(), [0, 0, 255]);
    }

    #[test]
    fn test_parse_hex_6_digit() {
        let color: Srgb = "#438a1c".parse().unwrap();
        assert_eq!(color.to_bytes(), [0x43, 0x8a, 0x1c]);

        let no_hash: Srgb = "FFF338".parse().unwrap();
        assert_eq!(no_hash.to_bytes(), [0xff, 0xf3, 0x38]);
    }

    #[test]
    fn test_parse_hex_shorthand() {
        let color: Srgb = "#F0A".parse().unwrap();
        assert_eq!(color.to_bytes(), [0xff, 0x00, 0xaa]);
    }

    #[test]
    fn test_parse_hex_trims_whitespace() {
        let color: Srgb = "  #000000 ".parse().unwrap();
        assert_eq!(color.to_bytes(), [0, 0, 0]);
    }

    #[test]
    fn test_parse_hex_invalid_length() {
        assert_eq!(
            "#12345".parse::<Srgb>(),
            Err(ParseColorError::InvalidLength)
        );
        assert_eq!("".parse::<Srgb>(), Err(ParseColorError::InvalidLength));
    }

    #[test]
    fn test_parse_hex_invalid_character() {
        assert!(matches!(
            "#GG0000".parse::<Srgb>(),
            Err(ParseColorError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_parse_hex_rejects_multibyte() {
        assert_eq!("#ééé".parse::<Srgb>(), Err(ParseColorError::InvalidLength));
    }
}
