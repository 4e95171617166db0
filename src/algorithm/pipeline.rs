//! End-to-end mosaic generation for the color and grayscale variants
//!
//! Both variants validate their configuration and derive the seed and the
//! canvas source before any block is processed, so invalid parameters never
//! leave a half-built mosaic behind.

use crate::algorithm::brightness_bank::BrightnessBank;
use crate::algorithm::composer::{CompositionReport, compose};
use crate::algorithm::selector::{ColorSelector, GraySelector};
use crate::algorithm::tone_cache::{CacheStats, ToneCache};
use crate::io::configuration::{
    DEFAULT_BRIGHTNESS_LEVELS, DEFAULT_CANVAS_FACTOR, DEFAULT_FILTER, DEFAULT_SEED_FACTOR,
    MIN_BRIGHTNESS_LEVELS,
};
use crate::io::error::{Result, ensure_positive_factor, invalid_parameter};
use crate::io::progress::BlockProgress;
use crate::spatial::scaler::scale;
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageBuffer, Pixel, RgbImage};
use std::path::Path;

/// Scaling parameters shared by both mosaic variants
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MosaicConfig {
    /// Enlargement applied to the source to get the canvas that gets tiled
    pub canvas_factor: f64,
    /// Reduction applied to the source to get the seed; also sets the block size
    pub seed_factor: f64,
    /// Resampling filter for scaling and tile fitting
    pub filter: FilterType,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            canvas_factor: DEFAULT_CANVAS_FACTOR,
            seed_factor: DEFAULT_SEED_FACTOR,
            filter: DEFAULT_FILTER,
        }
    }
}

impl MosaicConfig {
    /// Check that both factors are finite and positive
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid factor
    pub fn validate(&self) -> Result<()> {
        ensure_positive_factor("canvas factor", self.canvas_factor)?;
        ensure_positive_factor("seed factor", self.seed_factor)?;
        Ok(())
    }
}

/// Parameters of the grayscale variant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrayConfig {
    /// Shared scaling parameters
    pub mosaic: MosaicConfig,
    /// Number of brightness levels in the bank
    pub levels: usize,
}

impl Default for GrayConfig {
    fn default() -> Self {
        Self {
            mosaic: MosaicConfig::default(),
            levels: DEFAULT_BRIGHTNESS_LEVELS,
        }
    }
}

impl GrayConfig {
    /// Check the scaling parameters and the bank size
    ///
    /// # Errors
    ///
    /// Returns an error if a factor is invalid or fewer than two levels are requested
    pub fn validate(&self) -> Result<()> {
        self.mosaic.validate()?;
        if self.levels < MIN_BRIGHTNESS_LEVELS {
            return Err(invalid_parameter(
                "levels",
                &self.levels,
                &format!("at least {MIN_BRIGHTNESS_LEVELS} brightness levels are required"),
            ));
        }
        Ok(())
    }
}

/// Result of a color mosaic run
pub struct ColorMosaic {
    /// Recomposed output canvas
    pub canvas: RgbImage,
    /// Tone cache filled during the run
    pub cache: ToneCache,
    /// Per-block composition summary
    pub report: CompositionReport,
}

impl ColorMosaic {
    /// Cache counters of the run
    pub const fn stats(&self) -> CacheStats {
        self.cache.stats
    }
}

/// Result of a grayscale mosaic run
pub struct GrayMosaic {
    /// Recomposed output canvas
    pub canvas: GrayImage,
    /// Brightness bank used for selection
    pub bank: BrightnessBank,
    /// Per-block composition summary
    pub report: CompositionReport,
    /// Brightness tiles that could not be persisted
    pub persist_failures: usize,
}

/// Seed and canvas source derived from the same image
struct ScaledPair<I> {
    seed: I,
    canvas_source: I,
}

fn scale_pair<P>(
    image: &ImageBuffer<P, Vec<u8>>,
    config: &MosaicConfig,
) -> Result<ScaledPair<ImageBuffer<P, Vec<u8>>>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let seed = scale(image, config.seed_factor, config.filter)?;
    let canvas_source = scale(image, config.canvas_factor, config.filter)?;
    tracing::info!(
        seed = %format!("{}x{}", seed.width(), seed.height()),
        canvas = %format!("{}x{}", canvas_source.width(), canvas_source.height()),
        "scaled source"
    );
    Ok(ScaledPair {
        seed,
        canvas_source,
    })
}

/// Build a color mosaic of `source`
///
/// When `tones_dir` is given, every new tone tile is also written there as
/// `<r>_<g>_<b>.png`; failures to do so are logged and counted only.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, a scaled dimension
/// collapses to zero, or composition fails
pub fn color_mosaic(
    source: &DynamicImage,
    config: &MosaicConfig,
    tones_dir: Option<&Path>,
    progress: &mut dyn BlockProgress,
) -> Result<ColorMosaic> {
    config.validate()?;
    let rgb = source.to_rgb8();
    let ScaledPair {
        seed,
        canvas_source,
    } = scale_pair(&rgb, config)?;
    let (block_width, block_height) = seed.dimensions();

    let cache = tones_dir.map_or_else(ToneCache::new, |dir| ToneCache::persisting_to(dir));
    let mut selector = ColorSelector::new(seed, cache);

    let (canvas, report) = compose(
        &canvas_source,
        block_width,
        block_height,
        &mut selector,
        progress,
        config.filter,
    )?;
    let cache = selector.into_cache();
    tracing::info!(
        blocks = report.blocks,
        tones = cache.len(),
        hits = cache.stats.hits,
        "color mosaic composed"
    );

    Ok(ColorMosaic {
        canvas,
        cache,
        report,
    })
}

/// Build a grayscale mosaic of `source`
///
/// When `tones_dir` is given, the brightness tiles are written there as
/// `gray_tone_<index>.png` before composition starts.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, a scaled dimension
/// collapses to zero, or composition fails
pub fn gray_mosaic(
    source: &DynamicImage,
    config: &GrayConfig,
    tones_dir: Option<&Path>,
    progress: &mut dyn BlockProgress,
) -> Result<GrayMosaic> {
    config.validate()?;
    let luma = source.to_luma8();
    let ScaledPair {
        seed,
        canvas_source,
    } = scale_pair(&luma, &config.mosaic)?;
    let (block_width, block_height) = seed.dimensions();

    let bank = BrightnessBank::build(config.levels, &seed)?;
    let persist_failures = tones_dir.map_or(0, |dir| bank.persist(dir));
    let mut selector = GraySelector::new(bank);

    let (canvas, report) = compose(
        &canvas_source,
        block_width,
        block_height,
        &mut selector,
        progress,
        config.mosaic.filter,
    )?;
    tracing::info!(
        blocks = report.blocks,
        levels = config.levels,
        "grayscale mosaic composed"
    );

    Ok(GrayMosaic {
        canvas,
        bank: selector.into_bank(),
        report,
        persist_failures,
    })
}
