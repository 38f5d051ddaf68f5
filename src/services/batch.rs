//! Batch conversion.
//!
//! Images are converted in parallel and collected back in input order.
//! A failing input fails the batch, naming the lowest failing index.

use crate::error::{BatchError, ConvertError, EmitError};
use crate::pipeline::{CompressedAsset, ImagePipeline, SourceImage};
use crate::rendering::{write_preview, PreviewColors};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// How a batch is run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Worker threads. `0` uses the global pool, `1` runs sequentially.
    pub jobs: usize,
    /// Write an indexed PNG of every quantized frame here.
    pub preview_dir: Option<PathBuf>,
    pub preview_colors: PreviewColors,
}

impl BatchOptions {
    /// Create the preview directory, if one is set. Run once before
    /// converting; a failure here is not tied to any input image.
    pub fn prepare(&self) -> Result<(), EmitError> {
        if let Some(dir) = &self.preview_dir {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            jobs: 0,
            preview_dir: None,
            preview_colors: PreviewColors::Official,
        }
    }
}

/// Convert image files, returning one asset per path in the same order.
///
/// The preview directory must already exist, see [`BatchOptions::prepare`].
pub fn convert_files(
    pipeline: &ImagePipeline,
    paths: &[PathBuf],
    options: &BatchOptions,
) -> Result<Vec<CompressedAsset>, BatchError> {
    tracing::info!(
        images = paths.len(),
        jobs = options.jobs,
        canvas = %pipeline.canvas(),
        "Converting batch"
    );

    run_ordered(paths, options.jobs, |index, path| {
        convert_one(pipeline, path, options).map_err(|source| BatchError {
            index,
            name: display_name(path),
            source,
        })
    })
}

/// Convert already decoded images, in order.
pub fn convert_sources(
    pipeline: &ImagePipeline,
    sources: Vec<SourceImage>,
    jobs: usize,
) -> Result<Vec<CompressedAsset>, BatchError> {
    run_ordered(&sources, jobs, |index, source| {
        let name = source.name().to_string();
        pipeline.process(source.clone()).map_err(|source| BatchError {
            index,
            name,
            source,
        })
    })
}

fn convert_one(
    pipeline: &ImagePipeline,
    path: &Path,
    options: &BatchOptions,
) -> Result<CompressedAsset, ConvertError> {
    let source = SourceImage::open(path)?;
    tracing::debug!(
        path = %path.display(),
        width = source.width(),
        height = source.height(),
        "Decoded source"
    );

    let frame = pipeline.quantize(source)?;

    if let Some(dir) = &options.preview_dir {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "preview".to_string());
        write_preview(
            &frame.grid,
            options.preview_colors,
            &dir.join(format!("{stem}.png")),
        )?;
    }

    let asset = pipeline.encode(frame)?;
    let packed = pipeline.canvas().packed_len();
    tracing::info!(
        name = %asset.name,
        bytes = asset.compressed_size(),
        ratio = %format!("{:.1}%", asset.compressed_size() as f64 * 100.0 / packed as f64),
        portrait = asset.portrait,
        "Converted"
    );
    Ok(asset)
}

/// Map `f` over `items` on up to `jobs` threads, keeping input order.
///
/// Every item runs to completion before results are folded, so when
/// several inputs fail the reported one is always the lowest index.
fn run_ordered<T, F>(items: &[T], jobs: usize, f: F) -> Result<Vec<CompressedAsset>, BatchError>
where
    T: Sync,
    F: Fn(usize, &T) -> Result<CompressedAsset, BatchError> + Sync + Send,
{
    let collect = || {
        items
            .par_iter()
            .enumerate()
            .map(|(index, item)| f(index, item))
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
    };

    match jobs {
        1 => items
            .iter()
            .enumerate()
            .map(|(index, item)| f(index, item))
            .collect(),
        0 => collect(),
        n => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
            Ok(pool) => pool.install(collect),
            Err(e) => {
                tracing::warn!(jobs = n, "Failed to build worker pool, using global pool: {}", e);
                collect()
            }
        },
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
