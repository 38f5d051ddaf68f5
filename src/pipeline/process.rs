use super::compressor::{Compressor, Zlib};
use super::source::SourceImage;
use super::{fit, orientation, packer};
use crate::error::{CompressionError, ConvertError};
use crate::models::Canvas;
use image::imageops::FilterType;
use ink_quant::{DistanceMetric, DitherAlgorithm, Palette, QuantizedGrid, Quantizer};

/// One converted image, ready for the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedAsset {
    pub name: String,
    pub data: Vec<u8>,
    pub portrait: bool,
}

impl CompressedAsset {
    pub fn compressed_size(&self) -> usize {
        self.data.len()
    }
}

/// Quantized frame before packing, kept around for previews.
#[derive(Debug, Clone)]
pub struct QuantizedFrame {
    pub name: String,
    pub grid: QuantizedGrid,
    pub portrait: bool,
}

/// Configured conversion pipeline, shared read-only across a batch.
///
/// Defaults: Floyd-Steinberg diffusion, Euclidean RGB distance, plain
/// scan order, Lanczos3 resampling and zlib compression.
pub struct ImagePipeline {
    canvas: Canvas,
    quantizer: Quantizer,
    filter: FilterType,
    compressor: Box<dyn Compressor>,
}

impl ImagePipeline {
    pub fn new(palette: Palette, canvas: Canvas) -> Result<Self, ConvertError> {
        canvas.validate()?;
        Ok(Self {
            canvas,
            quantizer: Quantizer::new(palette),
            filter: FilterType::Lanczos3,
            compressor: Box::new(Zlib),
        })
    }

    pub fn dither(mut self, algorithm: DitherAlgorithm) -> Self {
        self.quantizer = self.quantizer.algorithm(algorithm);
        self
    }

    pub fn distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.quantizer = self.quantizer.distance_metric(metric);
        self
    }

    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.quantizer = self.quantizer.serpentine(enabled);
        self
    }

    pub fn error_clamp(mut self, clamp: f32) -> Self {
        self.quantizer = self.quantizer.error_clamp(clamp);
        self
    }

    pub fn resample(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn compressor(mut self, compressor: Box<dyn Compressor>) -> Self {
        self.compressor = compressor;
        self
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn palette(&self) -> &Palette {
        self.quantizer.palette()
    }

    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    pub fn compression(&self) -> &dyn Compressor {
        self.compressor.as_ref()
    }

    /// Orient, fit and quantize a source image.
    pub fn quantize(&self, source: SourceImage) -> Result<QuantizedFrame, ConvertError> {
        let name = source.name().to_string();
        let oriented = orientation::normalize(source.into_image());
        let fitted = fit::fit(oriented.image, self.canvas, self.filter);

        let (width, height) = (self.canvas.width as usize, self.canvas.height as usize);
        let grid = self.quantizer.quantize_rgb8(fitted.as_raw(), width, height)?;
        tracing::debug!(
            name = %name,
            algorithm = self.quantizer.selected_algorithm().name(),
            "Quantized frame"
        );

        Ok(QuantizedFrame {
            name,
            grid,
            portrait: oriented.portrait,
        })
    }

    /// Pack and compress a quantized frame.
    pub fn encode(&self, frame: QuantizedFrame) -> Result<CompressedAsset, ConvertError> {
        let packed = packer::pack(&frame.grid)?;
        let data = self.compressor.compress(&packed);
        tracing::debug!(
            name = %frame.name,
            packed = packed.len(),
            compressed = data.len(),
            compression = self.compressor.name(),
            "Compressed frame"
        );
        Ok(CompressedAsset {
            name: frame.name,
            data,
            portrait: frame.portrait,
        })
    }

    /// Run every stage on one source image.
    pub fn process(&self, source: SourceImage) -> Result<CompressedAsset, ConvertError> {
        let frame = self.quantize(source)?;
        self.encode(frame)
    }

    /// Decompress an asset back to its packed frame, checking the size the
    /// device will expect.
    pub fn unpack_asset(&self, asset: &CompressedAsset) -> Result<Vec<u8>, ConvertError> {
        let packed = self.compressor.decompress(&asset.data)?;
        let expected = self.canvas.packed_len();
        if packed.len() != expected {
            return Err(CompressionError::SizeMismatch {
                expected,
                actual: packed.len(),
            }
            .into());
        }
        Ok(packed)
    }
}

/// Convert raw RGB8 pixels with the default strategies.
pub fn process_image(
    pixels: &[u8],
    width: u32,
    height: u32,
    palette: &Palette,
    canvas_width: u32,
    canvas_height: u32,
) -> Result<CompressedAsset, ConvertError> {
    let canvas = Canvas::new(canvas_width, canvas_height)?;
    let source = SourceImage::from_rgb8("image", pixels.to_vec(), width, height)?;
    ImagePipeline::new(palette.clone(), canvas)?.process(source)
}
