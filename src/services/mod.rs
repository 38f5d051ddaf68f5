pub mod batch;
pub mod emitter;

pub use batch::{convert_files, convert_sources, BatchOptions};
pub use emitter::{Bundle, Emitter};
