use crate::error::ConvertError;
use image::{DynamicImage, RgbImage};
use std::path::Path;

/// A decoded source photograph, flattened to opaque RGB.
#[derive(Debug, Clone)]
pub struct SourceImage {
    name: String,
    image: RgbImage,
}

impl SourceImage {
    /// Decode an image file. The format is sniffed from the content, not
    /// the extension.
    pub fn open(path: &Path) -> Result<Self, ConvertError> {
        let reader = image::ImageReader::open(path)?.with_guessed_format()?;
        let decoded = reader.decode()?;
        Ok(Self::from_dynamic(path.display().to_string(), decoded))
    }

    /// Decode an in-memory encoded image.
    pub fn decode(name: impl Into<String>, bytes: &[u8]) -> Result<Self, ConvertError> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::from_dynamic(name, decoded))
    }

    /// Wrap raw RGB8 pixels (3 bytes per pixel, row-major).
    pub fn from_rgb8(
        name: impl Into<String>,
        pixels: Vec<u8>,
        width: u32,
        height: u32,
    ) -> Result<Self, ConvertError> {
        if width == 0 || height == 0 {
            return Err(ConvertError::SourceDecode(format!(
                "empty image {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize * 3;
        let actual = pixels.len();
        let image = RgbImage::from_raw(width, height, pixels).ok_or_else(|| {
            ConvertError::InvalidConfiguration(format!(
                "pixel buffer holds {actual} bytes, {width}x{height} RGB needs {expected}"
            ))
        })?;
        Ok(Self {
            name: name.into(),
            image,
        })
    }

    /// Take a decoded image, compositing any alpha channel onto white.
    pub fn from_dynamic(name: impl Into<String>, image: DynamicImage) -> Self {
        Self {
            name: name.into(),
            image: flatten_on_white(image),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_portrait(&self) -> bool {
        super::orientation::is_portrait(self.width(), self.height())
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

/// Blend translucent pixels over a white background.
fn flatten_on_white(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }
    let rgba = image.into_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let a = a as u32;
        let blend = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}
