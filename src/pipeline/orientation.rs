use image::{imageops, RgbImage};

/// Portrait sources are stored rotated so every frame is landscape.
#[derive(Debug, Clone)]
pub struct Oriented {
    pub image: RgbImage,
    /// Set when the source was rotated. The device rotates back 90°
    /// counter-clockwise when showing it.
    pub portrait: bool,
}

/// An image is portrait iff it is strictly taller than wide.
pub fn is_portrait(width: u32, height: u32) -> bool {
    height > width
}

/// Rotate portrait images 90° clockwise, leave everything else untouched.
pub fn normalize(image: RgbImage) -> Oriented {
    let (width, height) = image.dimensions();
    if is_portrait(width, height) {
        tracing::debug!(width, height, "Rotating portrait source clockwise");
        Oriented {
            image: imageops::rotate90(&image),
            portrait: true,
        }
    } else {
        Oriented {
            image,
            portrait: false,
        }
    }
}
