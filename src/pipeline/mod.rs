//! Per-image conversion stages.
//!
//! Orientation normalize -> aspect fit -> quantize -> nibble pack -> compress.
//! Each stage takes ownership of its input buffer and returns a new one.

pub mod compressor;
pub mod fit;
pub mod orientation;
pub mod packer;
pub mod process;
pub mod source;

pub use compressor::{Compressor, Deflate, Stored, Zlib};
pub use fit::{FitPlan, SourceWindow};
pub use process::{process_image, CompressedAsset, ImagePipeline, QuantizedFrame};
pub use source::SourceImage;
