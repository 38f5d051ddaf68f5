//! Asset loading with embedded fallbacks
//!
//! Emitter templates and the default config ship inside the binary:
//!
//! - If no template directory is given: use embedded templates only
//! - If a template directory is given: files there override embedded ones by name

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded emitter templates
#[derive(RustEmbed)]
#[folder = "templates/"]
#[include = "*.tera"]
struct EmbeddedTemplates;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "inkpack.yaml"]
struct EmbeddedConfig;

pub const CONFIG_FILE_NAME: &str = "inkpack.yaml";

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Templates,
    Config,
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External template directory (from --templates)
    templates_dir: Option<PathBuf>,
}

impl AssetLoader {
    pub fn new(templates_dir: Option<PathBuf>) -> Self {
        Self { templates_dir }
    }

    pub fn templates_dir(&self) -> Option<&Path> {
        self.templates_dir.as_deref()
    }

    /// Read a template by file name, filesystem first, then embedded.
    pub fn read_template(&self, name: &str) -> io::Result<String> {
        if let Some(ref dir) = self.templates_dir {
            let full_path = dir.join(name);
            if full_path.exists() {
                tracing::trace!(path = %full_path.display(), "Loading template from filesystem");
                return fs::read_to_string(&full_path);
            }
        }

        let data = EmbeddedTemplates::get(name)
            .map(|f| {
                tracing::trace!(template = %name, "Loading template from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("Template not found: {name}"))
            })?;
        String::from_utf8(data.into_owned()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// The default config file, with comments.
    pub fn default_config() -> io::Result<Cow<'static, [u8]>> {
        EmbeddedConfig::get(CONFIG_FILE_NAME)
            .map(|f| f.data)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Embedded {CONFIG_FILE_NAME} not found"),
                )
            })
    }

    /// Extract embedded assets to the filesystem (init command).
    ///
    /// The config goes to `config_path`; templates go to the loader's
    /// template directory, or `./templates` if none was given.
    pub fn init(
        &self,
        categories: &[AssetCategory],
        config_path: &Path,
        force: bool,
    ) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for category in categories {
            match category {
                AssetCategory::Templates => {
                    let dir = self
                        .templates_dir
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./templates"));
                    fs::create_dir_all(&dir)?;

                    for file in EmbeddedTemplates::iter() {
                        let path = dir.join(file.as_ref());
                        if !force && path.exists() {
                            report.skipped.push(path.display().to_string());
                            continue;
                        }
                        if let Some(data) = EmbeddedTemplates::get(&file) {
                            fs::write(&path, &*data.data)?;
                            report.written.push(path.display().to_string());
                        }
                    }
                }
                AssetCategory::Config => {
                    if !force && config_path.exists() {
                        report.skipped.push(config_path.display().to_string());
                        continue;
                    }
                    if let Some(parent) = config_path.parent() {
                        if !parent.as_os_str().is_empty() {
                            fs::create_dir_all(parent)?;
                        }
                    }
                    fs::write(config_path, &*Self::default_config()?)?;
                    report.written.push(config_path.display().to_string());
                }
            }
        }

        Ok(report)
    }

    /// List embedded assets by category (for display)
    pub fn list_embedded(category: AssetCategory) -> Vec<String> {
        match category {
            AssetCategory::Templates => EmbeddedTemplates::iter().map(|s| s.to_string()).collect(),
            AssetCategory::Config => vec![CONFIG_FILE_NAME.to_string()],
        }
    }
}
