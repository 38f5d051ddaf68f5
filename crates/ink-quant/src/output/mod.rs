//! Output types for the quantization pipeline.
//!
//! [`QuantizedGrid`] stores palette indices with dimension metadata and an
//! owned [`Palette`](crate::palette::Palette), offering:
//!
//! - **Indexed** ([`QuantizedGrid::indices`]): raw `u8` palette indices
//! - **Official RGB** ([`QuantizedGrid::to_rgb_official`]): device table colors
//! - **Actual RGB** ([`QuantizedGrid::to_rgb_actual`]): measured appearance

mod quantized_grid;

pub use quantized_grid::QuantizedGrid;
