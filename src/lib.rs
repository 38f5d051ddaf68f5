//! Inkpack
//!
//! Converts photographs into compressed, nibble-packed image tables for
//! fixed-palette color e-paper frames.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod rendering;
pub mod services;
