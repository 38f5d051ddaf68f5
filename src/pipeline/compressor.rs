//! Lossless compression of packed frames.
//!
//! All variants are built on `miniz_oxide`, so the device side can inflate
//! with the same family of decoders.

use crate::error::CompressionError;
use crate::models::CompressionKind;
use miniz_oxide::deflate::{compress_to_vec, compress_to_vec_zlib};
use miniz_oxide::inflate::{decompress_to_vec, decompress_to_vec_zlib};

/// miniz "uber" level, the highest ratio it offers.
const MAX_LEVEL: u8 = 10;

/// Pluggable compression stage.
pub trait Compressor: Send + Sync {
    /// Stable name, as used in configuration and emitted headers.
    fn name(&self) -> &'static str;

    fn compress(&self, data: &[u8]) -> Vec<u8>;

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError>;
}

/// Deflate with a zlib header and Adler-32 trailer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zlib;

/// Raw deflate stream, no header.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deflate;

/// No compression; the packed frame is stored verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stored;

impl Compressor for Zlib {
    fn name(&self) -> &'static str {
        "zlib"
    }

    fn compress(&self, data: &[u8]) -> Vec<u8> {
        compress_to_vec_zlib(data, MAX_LEVEL)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        decompress_to_vec_zlib(data).map_err(|e| CompressionError::Corrupt(format!("{:?}", e.status)))
    }
}

impl Compressor for Deflate {
    fn name(&self) -> &'static str {
        "deflate"
    }

    fn compress(&self, data: &[u8]) -> Vec<u8> {
        compress_to_vec(data, MAX_LEVEL)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        decompress_to_vec(data).map_err(|e| CompressionError::Corrupt(format!("{:?}", e.status)))
    }
}

impl Compressor for Stored {
    fn name(&self) -> &'static str {
        "none"
    }

    fn compress(&self, data: &[u8]) -> Vec<u8> {
        data.to_vec()
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        Ok(data.to_vec())
    }
}

/// Strategy object for a configured compression kind.
pub fn for_kind(kind: CompressionKind) -> Box<dyn Compressor> {
    match kind {
        CompressionKind::Zlib => Box::new(Zlib),
        CompressionKind::Deflate => Box::new(Deflate),
        CompressionKind::None => Box::new(Stored),
    }
}
