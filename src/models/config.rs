use crate::error::{ConfigError, ConvertError};
use crate::models::Canvas;
use crate::pipeline::{compressor, ImagePipeline};
use image::imageops::FilterType;
use ink_quant::{DistanceMetric, DitherAlgorithm, Palette};
use serde::Deserialize;
use std::path::Path;

/// Datasheet colors of the 7-color panel plus the "clean" entry, in the
/// controller's index order.
pub const CANONICAL_PALETTE: [&str; 8] = [
    "#000000", "#FFFFFF", "#438A1C", "#6440FF", "#BF0000", "#FFF338", "#E87E00", "#C2A4F4",
];

/// Colors photographed off a real panel. Dimmer and muddier than the
/// datasheet values.
pub const MEASURED_PALETTE: [&str; 8] = [
    "#1F1F1F", "#B6B6B6", "#525F2D", "#323050", "#674949", "#C4BB39", "#9B6E26", "#755568",
];

/// Converter configuration loaded from inkpack.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Target frame size
    pub canvas: Canvas,

    /// Device color table, index order matters
    pub palette: Vec<String>,

    /// Measured panel colors used for matching, one per palette entry
    pub measured: Option<Vec<String>>,

    pub dither: DitherKind,

    pub distance: DistanceKind,

    /// Alternate scan direction on every other row
    pub serpentine: bool,

    /// Overshoot allowed for a pixel plus accumulated error, on 0..1 scale
    pub error_clamp: f32,

    pub resample: ResampleFilter,

    pub compression: CompressionKind,

    /// Worker threads for batch conversion, 0 = one per core
    pub jobs: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::DEFAULT,
            palette: CANONICAL_PALETTE.iter().map(|s| s.to_string()).collect(),
            measured: None,
            dither: DitherKind::default(),
            distance: DistanceKind::default(),
            serpentine: false,
            error_clamp: 1.0,
            resample: ResampleFilter::default(),
            compression: CompressionKind::default(),
            jobs: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DitherKind {
    /// Nearest color, no diffusion
    None,
    #[default]
    FloydSteinberg,
    Atkinson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceKind {
    /// Squared Euclidean distance in RGB
    #[default]
    Euclidean,
    /// Red-mean weighted RGB distance
    Redmean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CompressionKind {
    /// Deflate with zlib header
    #[default]
    Zlib,
    /// Raw deflate stream
    Deflate,
    /// Uncompressed packed frames
    None,
}

/// Built-in palette selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PalettePreset {
    /// Datasheet colors
    Canonical,
    /// Datasheet indices matched against measured panel colors
    Legacy,
}

impl From<DitherKind> for DitherAlgorithm {
    fn from(kind: DitherKind) -> Self {
        match kind {
            DitherKind::None => DitherAlgorithm::None,
            DitherKind::FloydSteinberg => DitherAlgorithm::FloydSteinberg,
            DitherKind::Atkinson => DitherAlgorithm::Atkinson,
        }
    }
}

impl From<DistanceKind> for DistanceMetric {
    fn from(kind: DistanceKind) -> Self {
        match kind {
            DistanceKind::Euclidean => DistanceMetric::Euclidean,
            DistanceKind::Redmean => DistanceMetric::Redmean,
        }
    }
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl DistanceKind {
    pub fn name(self) -> &'static str {
        match self {
            DistanceKind::Euclidean => "euclidean",
            DistanceKind::Redmean => "redmean",
        }
    }
}

impl CompressionKind {
    pub fn name(self) -> &'static str {
        match self {
            CompressionKind::Zlib => "zlib",
            CompressionKind::Deflate => "deflate",
            CompressionKind::None => "none",
        }
    }
}

impl ResampleFilter {
    pub fn name(self) -> &'static str {
        match self {
            ResampleFilter::Nearest => "nearest",
            ResampleFilter::Triangle => "triangle",
            ResampleFilter::CatmullRom => "catmull-rom",
            ResampleFilter::Gaussian => "gaussian",
            ResampleFilter::Lanczos3 => "lanczos3",
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file. A missing file yields the
    /// defaults; an unreadable or malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            canvas = %config.canvas,
            colors = config.palette.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Replace the palette with a built-in one.
    pub fn apply_preset(&mut self, preset: PalettePreset) {
        self.palette = CANONICAL_PALETTE.iter().map(|s| s.to_string()).collect();
        self.measured = match preset {
            PalettePreset::Canonical => None,
            PalettePreset::Legacy => Some(MEASURED_PALETTE.iter().map(|s| s.to_string()).collect()),
        };
    }

    /// Parse and validate the configured palette.
    pub fn build_palette(&self) -> Result<Palette, ConvertError> {
        let palette = Palette::from_hex(self.palette.as_slice(), self.measured.as_deref())?;
        Ok(palette.with_distance_metric(self.distance.into()))
    }

    /// Validate everything and assemble the conversion pipeline.
    pub fn pipeline(&self) -> Result<ImagePipeline, ConvertError> {
        if !self.error_clamp.is_finite() || self.error_clamp < 0.0 {
            return Err(ConvertError::InvalidConfiguration(format!(
                "error_clamp must be a non-negative number, got {}",
                self.error_clamp
            )));
        }
        let pipeline = ImagePipeline::new(self.build_palette()?, self.canvas)?
            .dither(self.dither.into())
            .serpentine(self.serpentine)
            .error_clamp(self.error_clamp)
            .resample(self.resample.into())
            .compressor(compressor::for_kind(self.compression));
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.canvas, Canvas::DEFAULT);
        assert_eq!(config.palette.len(), 8);
        assert_eq!(config.palette[0], "#000000");
        assert!(config.measured.is_none());
        assert_eq!(config.dither, DitherKind::FloydSteinberg);
        assert_eq!(config.distance, DistanceKind::Euclidean);
        assert!(!config.serpentine);
        assert_eq!(config.resample, ResampleFilter::Lanczos3);
        assert_eq!(config.compression, CompressionKind::Zlib);
        assert_eq!(config.jobs, 0);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml(
            "dither: atkinson\ncompression: none\ncanvas: { width: 800, height: 480 }\n",
        )
        .unwrap();

        assert_eq!(config.dither, DitherKind::Atkinson);
        assert_eq!(config.compression, CompressionKind::None);
        assert_eq!(config.canvas, Canvas { width: 800, height: 480 });
        assert_eq!(config.distance, DistanceKind::Euclidean);
        assert_eq!(config.palette.len(), 8);
    }

    #[test]
    fn test_kebab_case_names() {
        let config =
            AppConfig::from_yaml("dither: floyd-steinberg\nresample: catmull-rom\ndistance: redmean\n")
                .unwrap();
        assert_eq!(config.dither, DitherKind::FloydSteinberg);
        assert_eq!(config.resample, ResampleFilter::CatmullRom);
        assert_eq!(config.distance, DistanceKind::Redmean);
    }

    #[test]
    fn test_unknown_strategy_is_parse_error() {
        let result = AppConfig::from_yaml("dither: ordered\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "canvas: [1, 2\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_legacy_preset_sets_measured_colors() {
        let mut config = AppConfig::default();
        config.apply_preset(PalettePreset::Legacy);

        let palette = config.build_palette().unwrap();
        assert!(palette.has_measured_colors());
        assert_eq!(palette.official(1).to_hex(), "#FFFFFF");
        assert_eq!(palette.actual(1).to_hex(), "#B6B6B6");

        config.apply_preset(PalettePreset::Canonical);
        assert!(config.measured.is_none());
    }

    #[test]
    fn test_pipeline_rejects_duplicate_palette() {
        let config = AppConfig {
            palette: vec!["#000000".into(), "#FFFFFF".into(), "#000000".into()],
            ..AppConfig::default()
        };
        assert!(matches!(
            config.pipeline(),
            Err(ConvertError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_pipeline_rejects_bad_hex() {
        let config = AppConfig {
            palette: vec!["#000000".into(), "white".into()],
            ..AppConfig::default()
        };
        assert!(config.pipeline().is_err());
    }

    #[test]
    fn test_pipeline_rejects_odd_canvas() {
        let config = AppConfig {
            canvas: Canvas {
                width: 599,
                height: 448,
            },
            ..AppConfig::default()
        };
        assert!(config.pipeline().is_err());
    }

    #[test]
    fn test_pipeline_rejects_negative_clamp() {
        let config = AppConfig {
            error_clamp: -0.5,
            ..AppConfig::default()
        };
        assert!(config.pipeline().is_err());
    }

    #[test]
    fn test_pipeline_carries_settings() {
        let config = AppConfig {
            dither: DitherKind::Atkinson,
            distance: DistanceKind::Redmean,
            compression: CompressionKind::Deflate,
            serpentine: true,
            ..AppConfig::default()
        };
        let pipeline = config.pipeline().unwrap();
        assert_eq!(
            pipeline.quantizer().selected_algorithm(),
            DitherAlgorithm::Atkinson
        );
        assert_eq!(pipeline.palette().distance_metric(), DistanceMetric::Redmean);
        assert!(pipeline.quantizer().options().serpentine);
        assert_eq!(pipeline.compression().name(), "deflate");
    }
}
