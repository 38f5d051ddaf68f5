pub mod canvas;
pub mod config;

pub use canvas::Canvas;
pub use config::{
    AppConfig, CompressionKind, DistanceKind, DitherKind, PalettePreset, ResampleFilter,
    CANONICAL_PALETTE, MEASURED_PALETTE,
};
