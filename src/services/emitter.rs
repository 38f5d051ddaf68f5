use crate::assets::AssetLoader;
use crate::error::EmitError;
use crate::models::Canvas;
use crate::pipeline::CompressedAsset;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

pub const HEADER_TEMPLATE: &str = "header.hpp.tera";
pub const SOURCE_TEMPLATE: &str = "source.cpp.tera";

const BYTES_PER_LINE: usize = 16;

/// Everything the templates need about one converted run.
#[derive(Debug, Clone, Copy)]
pub struct Bundle<'a> {
    pub assets: &'a [CompressedAsset],
    pub canvas: Canvas,
    /// Compression name, so firmware can pick the matching inflater
    pub compression: &'a str,
}

#[derive(Debug, Serialize)]
struct Record {
    ident: String,
    name: String,
    size: usize,
    portrait: bool,
    lines: Vec<String>,
}

/// Renders the C++ header and source holding the image table.
pub struct Emitter {
    tera: Tera,
}

impl Emitter {
    pub fn new(loader: &AssetLoader) -> Result<Self, EmitError> {
        let mut tera = Tera::default();
        for name in [HEADER_TEMPLATE, SOURCE_TEMPLATE] {
            let content = loader
                .read_template(name)
                .map_err(|_| EmitError::NotFound(name.to_string()))?;
            tera.add_raw_template(name, &content)?;
        }
        Self::register_filters(&mut tera);

        tracing::debug!(
            custom = loader.templates_dir().is_some(),
            "Emitter templates loaded"
        );

        Ok(Self { tera })
    }

    /// Register custom Tera filters
    fn register_filters(tera: &mut Tera) {
        // Escape for use inside a C string literal
        tera.register_filter(
            "c_string",
            |value: &tera::Value, _: &HashMap<String, tera::Value>| {
                let s = tera::try_get_value!("c_string", "value", String, value);
                Ok(tera::Value::String(escape_c_string(&s)))
            },
        );
    }

    fn context(&self, bundle: &Bundle<'_>, header_include: &str) -> Context {
        let records: Vec<Record> = bundle
            .assets
            .iter()
            .enumerate()
            .map(|(index, asset)| Record {
                ident: format!("image_{index}"),
                name: asset.name.clone(),
                size: asset.compressed_size(),
                portrait: asset.portrait,
                lines: hex_lines(&asset.data),
            })
            .collect();

        let mut context = Context::new();
        context.insert("version", env!("CARGO_PKG_VERSION"));
        context.insert("width", &bundle.canvas.width);
        context.insert("height", &bundle.canvas.height);
        context.insert("packed_size", &bundle.canvas.packed_len());
        context.insert("compression", bundle.compression);
        context.insert("num_images", &records.len());
        context.insert("header_include", header_include);
        context.insert("records", &records);
        context
    }

    pub fn render_header(&self, bundle: &Bundle<'_>) -> Result<String, EmitError> {
        let context = self.context(bundle, "");
        Ok(self.tera.render(HEADER_TEMPLATE, &context)?)
    }

    pub fn render_source(
        &self,
        bundle: &Bundle<'_>,
        header_include: &str,
    ) -> Result<String, EmitError> {
        let context = self.context(bundle, header_include);
        Ok(self.tera.render(SOURCE_TEMPLATE, &context)?)
    }

    /// Render both files, then write them. Both are staged next to their
    /// targets and only renamed into place once both writes succeeded, so a
    /// failure leaves neither file behind. The source includes the header by
    /// its file name.
    pub fn write(
        &self,
        bundle: &Bundle<'_>,
        header_path: &Path,
        source_path: &Path,
    ) -> Result<(), EmitError> {
        let header_include = header_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| header_path.display().to_string());

        let header = self.render_header(bundle)?;
        let source = self.render_source(bundle, &header_include)?;

        let header_staged = staging_path(header_path);
        let source_staged = staging_path(source_path);

        std::fs::write(&header_staged, header)?;
        if let Err(e) = std::fs::write(&source_staged, source) {
            discard(&[header_staged.as_path(), source_staged.as_path()]);
            return Err(e.into());
        }
        if let Err(e) = std::fs::rename(&header_staged, header_path) {
            discard(&[header_staged.as_path(), source_staged.as_path()]);
            return Err(e.into());
        }
        if let Err(e) = std::fs::rename(&source_staged, source_path) {
            discard(&[source_staged.as_path(), header_path]);
            return Err(e.into());
        }

        tracing::info!(
            header = %header_path.display(),
            source = %source_path.display(),
            images = bundle.assets.len(),
            "Wrote image table"
        );
        Ok(())
    }
}

/// Sibling path a file is written to before being renamed into place.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

fn discard(paths: &[&Path]) {
    for path in paths {
        if let Err(e) = std::fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), "Failed to remove partial output: {}", e);
            }
        }
    }
}

fn hex_lines(data: &[u8]) -> Vec<String> {
    data.chunks(BYTES_PER_LINE)
        .map(|chunk| {
            chunk
                .iter()
                .map(|b| format!("0x{b:02x},"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn escape_c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
