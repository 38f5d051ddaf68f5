use ink_quant::{PaletteError, QuantError};
use std::path::PathBuf;
use thiserror::Error;

/// Failure converting a single image.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Source decode error: {0}")]
    SourceDecode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Compression error: {0}")]
    Compression(#[from] CompressionError),

    #[error("Preview error: {0}")]
    Preview(#[from] EmitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<QuantError> for ConvertError {
    fn from(e: QuantError) -> Self {
        ConvertError::InvalidConfiguration(e.to_string())
    }
}

impl From<PaletteError> for ConvertError {
    fn from(e: PaletteError) -> Self {
        ConvertError::InvalidConfiguration(e.to_string())
    }
}

impl From<image::ImageError> for ConvertError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => ConvertError::Io(io),
            other => ConvertError::SourceDecode(other.to_string()),
        }
    }
}

/// A conversion failure inside a batch, tagged with the offending input.
#[derive(Debug, Error)]
#[error("Image #{index} ({name}): {source}")]
pub struct BatchError {
    pub index: usize,
    pub name: String,
    #[source]
    pub source: ConvertError,
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("Corrupt stream: {0}")]
    Corrupt(String),

    #[error("Decompressed size {actual} does not match expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_error_source_decode() {
        let error = ConvertError::SourceDecode("not a JPEG".to_string());
        assert_eq!(error.to_string(), "Source decode error: not a JPEG");
    }

    #[test]
    fn test_convert_error_invalid_configuration() {
        let error = ConvertError::InvalidConfiguration("canvas width 601 is odd".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid configuration: canvas width 601 is odd"
        );
    }

    #[test]
    fn test_convert_error_from_quant_error() {
        let quant = QuantError::DimensionMismatch {
            expected: 4,
            actual: 3,
        };
        let error: ConvertError = quant.into();
        match error {
            ConvertError::InvalidConfiguration(msg) => {
                assert_eq!(msg, "buffer holds 3 pixels, expected 4")
            }
            _ => panic!("Expected InvalidConfiguration variant"),
        }
    }

    #[test]
    fn test_convert_error_from_compression_error() {
        let error: ConvertError = CompressionError::Corrupt("bad header".to_string()).into();
        assert_eq!(error.to_string(), "Compression error: Corrupt stream: bad header");
    }

    #[test]
    fn test_compression_error_size_mismatch() {
        let error = CompressionError::SizeMismatch {
            expected: 134400,
            actual: 10,
        };
        assert_eq!(
            error.to_string(),
            "Decompressed size 10 does not match expected 134400"
        );
    }

    #[test]
    fn test_batch_error_names_input() {
        let error = BatchError {
            index: 2,
            name: "beach.jpg".to_string(),
            source: ConvertError::SourceDecode("truncated".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "Image #2 (beach.jpg): Source decode error: truncated"
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_config_error_read() {
        let error = ConfigError::Read {
            path: PathBuf::from("inkpack.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(error.to_string(), "Failed to read config inkpack.yaml: denied");
    }

    #[test]
    fn test_emit_error_not_found() {
        let error = EmitError::NotFound("header.hpp.tera".to_string());
        assert_eq!(error.to_string(), "Template not found: header.hpp.tera");
    }

    #[test]
    fn test_emit_error_png_encode() {
        let error = EmitError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }
}
