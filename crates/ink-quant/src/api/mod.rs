//! Public API for the ink-quant crate.
//!
//! This module provides the high-level API: [`Quantizer`] builder and
//! [`QuantError`] unified error type.

mod builder;
mod error;

pub use builder::Quantizer;
pub use error::QuantError;
