use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpack::assets::{AssetCategory, AssetLoader, CONFIG_FILE_NAME};
use inkpack::models::{
    AppConfig, CompressionKind, DistanceKind, DitherKind, PalettePreset, ResampleFilter,
};
use inkpack::rendering::PreviewColors;
use inkpack::services::{convert_files, BatchOptions, Bundle, Emitter};

#[derive(Parser)]
#[command(name = "inkpack")]
#[command(about = "Convert photos into compressed image tables for 7-color e-paper frames")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert images and write the C++ header and source
    Convert {
        /// Output header file (e.g. images.hpp)
        #[arg(long)]
        header: PathBuf,

        /// Output source file (e.g. images.cpp)
        #[arg(long)]
        source: PathBuf,

        /// Config file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        config: PathBuf,

        /// Dithering
        #[arg(long, value_enum)]
        dither: Option<DitherKind>,

        /// Color distance metric
        #[arg(long, value_enum)]
        distance: Option<DistanceKind>,

        /// Compression of each packed frame
        #[arg(long, value_enum)]
        compression: Option<CompressionKind>,

        /// Built-in palette, replacing the configured one
        #[arg(long, value_enum)]
        palette: Option<PalettePreset>,

        /// Resampling filter used when scaling
        #[arg(long, value_enum)]
        resample: Option<ResampleFilter>,

        /// Alternate scan direction every other row
        #[arg(long)]
        serpentine: bool,

        /// Write an indexed PNG preview of each frame into this directory
        #[arg(long)]
        preview_dir: Option<PathBuf>,

        /// Use measured panel colors in previews
        #[arg(long, requires = "preview_dir")]
        preview_measured: bool,

        /// Directory with custom header.hpp.tera / source.cpp.tera
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Worker threads (0 = one per core, 1 = sequential)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Input images, in table order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Write the default config (and optionally templates) for customization
    Init {
        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// Config file to write
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,

        /// Also extract the emitter templates into this directory
        #[arg(long)]
        templates: Option<PathBuf>,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// Flags that override config file values
struct Overrides {
    dither: Option<DitherKind>,
    distance: Option<DistanceKind>,
    compression: Option<CompressionKind>,
    palette: Option<PalettePreset>,
    resample: Option<ResampleFilter>,
    serpentine: bool,
    jobs: Option<usize>,
}

impl Overrides {
    fn apply(self, config: &mut AppConfig) {
        if let Some(preset) = self.palette {
            config.apply_preset(preset);
        }
        if let Some(dither) = self.dither {
            config.dither = dither;
        }
        if let Some(distance) = self.distance {
            config.distance = distance;
        }
        if let Some(compression) = self.compression {
            config.compression = compression;
        }
        if let Some(resample) = self.resample {
            config.resample = resample;
        }
        if self.serpentine {
            config.serpentine = true;
        }
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert {
            header,
            source,
            config,
            dither,
            distance,
            compression,
            palette,
            resample,
            serpentine,
            preview_dir,
            preview_measured,
            templates,
            jobs,
            files,
        }) => {
            init_tracing();
            let overrides = Overrides {
                dither,
                distance,
                compression,
                palette,
                resample,
                serpentine,
                jobs,
            };
            let preview_colors = if preview_measured {
                PreviewColors::Measured
            } else {
                PreviewColors::Official
            };
            run_convert_command(
                &header,
                &source,
                &config,
                overrides,
                preview_dir,
                preview_colors,
                templates,
                &files,
            )
        }
        Some(Commands::Init {
            force,
            output,
            templates,
            list,
        }) => run_init_command(force, &output, templates, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkpack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Convert a batch of images into the emitted image table
#[allow(clippy::too_many_arguments)]
fn run_convert_command(
    header: &Path,
    source: &Path,
    config_path: &Path,
    overrides: Overrides,
    preview_dir: Option<PathBuf>,
    preview_colors: PreviewColors,
    templates: Option<PathBuf>,
    files: &[PathBuf],
) -> anyhow::Result<()> {
    let mut config = AppConfig::load(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    overrides.apply(&mut config);

    let pipeline = config.pipeline().context("Invalid configuration")?;

    let loader = AssetLoader::new(templates);
    let emitter = Emitter::new(&loader).context("Failed to load emitter templates")?;

    let options = BatchOptions {
        jobs: config.jobs,
        preview_dir,
        preview_colors,
    };
    options
        .prepare()
        .context("Failed to create preview directory")?;
    let assets = convert_files(&pipeline, files, &options)?;

    let bundle = Bundle {
        assets: &assets,
        canvas: pipeline.canvas(),
        compression: pipeline.compression().name(),
    };
    emitter
        .write(&bundle, header, source)
        .context("Failed to write image table")?;

    let total: usize = assets.iter().map(|a| a.compressed_size()).sum();
    println!(
        "Wrote {} images ({} bytes) to {} and {}",
        assets.len(),
        total,
        header.display(),
        source.display()
    );

    Ok(())
}

/// Extract the embedded config and templates
fn run_init_command(
    force: bool,
    output: &Path,
    templates: Option<PathBuf>,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Templates:");
        for f in AssetLoader::list_embedded(AssetCategory::Templates) {
            println!("  {f}");
        }
        println!("\nConfig:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        return Ok(());
    }

    let mut categories = vec![AssetCategory::Config];
    if templates.is_some() {
        categories.push(AssetCategory::Templates);
    }

    let loader = AssetLoader::new(templates);
    let report = loader
        .init(&categories, output, force)
        .context("Failed to extract assets")?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    Ok(())
}

/// Display version and the effective configuration
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Inkpack v{VERSION}");
    println!("Photo converter for 7-color e-paper frames\n");

    let path = PathBuf::from(CONFIG_FILE_NAME);
    let (config, source) = match AppConfig::load(&path) {
        Ok(config) if path.exists() => (config, CONFIG_FILE_NAME.to_string()),
        Ok(config) => (config, "built-in defaults".to_string()),
        Err(e) => {
            println!("Config: {CONFIG_FILE_NAME} is invalid: {e}\n");
            (AppConfig::default(), "built-in defaults".to_string())
        }
    };

    println!("Configuration ({source}):");
    println!("  Canvas:      {}", config.canvas);
    println!(
        "  Palette:     {} colors{}",
        config.palette.len(),
        if config.measured.is_some() {
            ", measured"
        } else {
            ""
        }
    );
    println!(
        "  Dither:      {}",
        ink_quant::DitherAlgorithm::from(config.dither).name()
    );
    println!("  Distance:    {}", config.distance.name());
    println!("  Serpentine:  {}", config.serpentine);
    println!("  Resample:    {}", config.resample.name());
    println!("  Compression: {}", config.compression.name());
    println!(
        "  Jobs:        {}",
        if config.jobs == 0 {
            "one per core".to_string()
        } else {
            config.jobs.to_string()
        }
    );

    println!("\nCommands:");
    println!("  inkpack convert   Convert images into a C++ image table");
    println!("  inkpack init      Write the default config file");
    println!("\nRun 'inkpack --help' for more details.");
}
