//! Command-line interface for the color and grayscale mosaic generators

use crate::algorithm::pipeline::{GrayConfig, MosaicConfig, color_mosaic, gray_mosaic};
use crate::io::configuration::{
    COLOR_TONES_DIR, DEFAULT_BRIGHTNESS_LEVELS, DEFAULT_CANVAS_FACTOR, DEFAULT_SEED_FACTOR,
    GRAY_TONES_DIR, OUTPUT_SUFFIX, TONE_EXTENSION,
};
use crate::io::error::Result;
use crate::io::image::{load_image, save_image};
use crate::io::progress::{BlockProgress, NoProgress, ProgressManager};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "tonemosaic")]
#[command(
    author,
    version,
    about = "Rebuild an image out of tinted copies of itself"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Mosaic variant to generate
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output and informational logging
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Mosaic variants
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Tile with copies of the image tinted by each block's average color
    Color(ColorArgs),
    /// Tile with brightness levels of the grayscale image
    Gray(GrayArgs),
}

/// Arguments shared by both variants
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Image to turn into a mosaic
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output image path (defaults to `<input>_mosaic.<ext>`)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Also write every tone tile as a separate image
    #[arg(short = 't', long)]
    pub save_tones: bool,

    /// Directory for tone tiles written with --save-tones
    #[arg(long, value_name = "DIR", requires = "save_tones")]
    pub tones_dir: Option<PathBuf>,

    /// Size of the final mosaic relative to the input (2.0 doubles it)
    #[arg(short, long, default_value_t = DEFAULT_CANVAS_FACTOR)]
    pub canvas_factor: f64,

    /// Size of each tile relative to the input
    #[arg(short = 'f', long, default_value_t = DEFAULT_SEED_FACTOR)]
    pub seed_factor: f64,

    /// Resampling filter for scaling and tile fitting
    #[arg(long, value_enum, default_value_t = ResizeFilter::CatmullRom)]
    pub filter: ResizeFilter,
}

impl CommonArgs {
    /// Scaling parameters described by these arguments
    pub fn mosaic_config(&self) -> MosaicConfig {
        MosaicConfig {
            canvas_factor: self.canvas_factor,
            seed_factor: self.seed_factor,
            filter: self.filter.into(),
        }
    }
}

/// Arguments of the color variant
#[derive(Args, Debug, Clone)]
pub struct ColorArgs {
    /// Shared arguments
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments of the grayscale variant
#[derive(Args, Debug, Clone)]
pub struct GrayArgs {
    /// Shared arguments
    #[command(flatten)]
    pub common: CommonArgs,

    /// Number of brightness levels (at least 2)
    #[arg(short = 'n', long, default_value_t = DEFAULT_BRIGHTNESS_LEVELS)]
    pub levels: usize,
}

/// Resampling filters selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeFilter {
    /// Nearest neighbor
    Nearest,
    /// Linear
    Triangle,
    /// Cubic
    CatmullRom,
    /// Gaussian
    Gaussian,
    /// Lanczos with window 3
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => Self::Nearest,
            ResizeFilter::Triangle => Self::Triangle,
            ResizeFilter::CatmullRom => Self::CatmullRom,
            ResizeFilter::Gaussian => Self::Gaussian,
            ResizeFilter::Lanczos3 => Self::Lanczos3,
        }
    }
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Arguments shared by whichever variant was selected
    pub const fn common(&self) -> &CommonArgs {
        match &self.command {
            Command::Color(args) => &args.common,
            Command::Gray(args) => &args.common,
        }
    }
}

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence; otherwise informational messages are shown
/// unless `quiet` is set.
pub fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    // A subscriber may already be installed, e.g. by a test harness
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

/// Runs one mosaic generation described by the command line
pub struct MosaicRunner {
    cli: Cli,
    progress: Box<dyn BlockProgress>,
}

impl MosaicRunner {
    /// Create a runner with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress: Box<dyn BlockProgress> = if cli.should_show_progress() {
            Box::new(ProgressManager::new())
        } else {
            Box::new(NoProgress)
        };

        Self { cli, progress }
    }

    /// Generate the mosaic and save it, returning the output path
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be loaded, the parameters are
    /// invalid, composition fails or the output cannot be saved
    pub fn run(&mut self) -> Result<PathBuf> {
        let start_time = Instant::now();
        let common = self.cli.common().clone();
        let output_path = common
            .output
            .clone()
            .unwrap_or_else(|| Self::get_output_path(&common.input));
        let source = load_image(&common.input)?;
        tracing::info!(
            input = %common.input.display(),
            width = source.width(),
            height = source.height(),
            "loaded source image"
        );

        match &self.cli.command {
            Command::Color(_) => {
                let tones_dir = Self::tones_dir(&common, COLOR_TONES_DIR);
                let mosaic = color_mosaic(
                    &source,
                    &common.mosaic_config(),
                    tones_dir.as_deref(),
                    self.progress.as_mut(),
                )?;
                if mosaic.stats().persist_failures > 0 {
                    tracing::warn!(
                        failures = mosaic.stats().persist_failures,
                        "some tone tiles were not saved"
                    );
                }
                save_image(&mosaic.canvas, &output_path)?;
            }
            Command::Gray(args) => {
                let tones_dir = Self::tones_dir(&common, GRAY_TONES_DIR);
                let config = GrayConfig {
                    mosaic: common.mosaic_config(),
                    levels: args.levels,
                };
                let mosaic = gray_mosaic(
                    &source,
                    &config,
                    tones_dir.as_deref(),
                    self.progress.as_mut(),
                )?;
                if mosaic.persist_failures > 0 {
                    tracing::warn!(
                        failures = mosaic.persist_failures,
                        "some brightness tiles were not saved"
                    );
                }
                save_image(&mosaic.canvas, &output_path)?;
            }
        }

        tracing::info!(
            output = %output_path.display(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "mosaic saved"
        );
        Ok(output_path)
    }

    fn tones_dir(common: &CommonArgs, default_dir: &str) -> Option<PathBuf> {
        common.save_tones.then(|| {
            common
                .tones_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(default_dir))
        })
    }

    /// Output path derived from the input: `<stem>_mosaic.<ext>` beside it
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path
            .extension()
            .map_or_else(|| TONE_EXTENSION.into(), |ext| ext.to_string_lossy());
        let output_name = format!("{}{OUTPUT_SUFFIX}.{extension}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
