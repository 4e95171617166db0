//! Eagerly rendered brightness levels for the grayscale mosaic
//!
//! Level `i` of an `n` level bank has threshold `i * 255 / (n - 1)` and holds
//! the seed darkened by `threshold / 255`. Thresholds therefore run from 0 to
//! 255 inclusive in strictly increasing order.

use crate::analysis::tint::scale_brightness;
use crate::io::configuration::{
    GRAY_TONE_PREFIX, MAX_CHANNEL_VALUE, MIN_BRIGHTNESS_LEVELS, TONE_EXTENSION,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::save_image;
use image::GrayImage;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// One brightness level: the upper luminance it serves and its tile
#[derive(Clone, Debug)]
pub struct BrightnessLevel {
    /// Highest block luminance this level accepts
    pub threshold: f64,
    /// Seed image rendered at this brightness
    pub tile: Rc<GrayImage>,
}

/// Ordered sequence of brightness levels with strictly increasing thresholds
#[derive(Clone, Debug)]
pub struct BrightnessBank {
    levels: Vec<BrightnessLevel>,
}

impl BrightnessBank {
    /// Render `n` evenly spaced brightness levels of `seed`
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is below 2, since the spacing `255 / (n - 1)`
    /// needs at least two levels
    pub fn build(n: usize, seed: &GrayImage) -> Result<Self> {
        let thresholds = level_thresholds(n)?;
        let levels = thresholds
            .into_iter()
            .map(|threshold| -> Result<BrightnessLevel> {
                let tile = scale_brightness(seed, threshold / MAX_CHANNEL_VALUE)?;
                Ok(BrightnessLevel {
                    threshold,
                    tile: Rc::new(tile),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { levels })
    }

    /// Assemble a bank from explicit levels
    ///
    /// The levels do not need to span the whole 0..=255 range; luminances above
    /// the last threshold are reported as unmatched during selection.
    ///
    /// # Errors
    ///
    /// Returns an error if `levels` is empty or its thresholds are not strictly
    /// increasing
    pub fn from_levels(levels: Vec<BrightnessLevel>) -> Result<Self> {
        if levels.is_empty() {
            return Err(invalid_parameter(
                "levels",
                &0,
                &"a brightness bank needs at least one level",
            ));
        }
        if let Some(pair) = levels.windows(2).find(|pair| {
            matches!(pair, [a, b] if a.threshold.partial_cmp(&b.threshold) != Some(Ordering::Less))
        }) {
            let shown: Vec<f64> = pair.iter().map(|level| level.threshold).collect();
            return Err(invalid_parameter(
                "levels",
                &format!("{shown:?}"),
                &"thresholds must be strictly increasing",
            ));
        }

        Ok(Self { levels })
    }

    /// All levels in ascending threshold order
    pub fn levels(&self) -> &[BrightnessLevel] {
        &self.levels
    }

    /// Thresholds in ascending order
    pub fn thresholds(&self) -> Vec<f64> {
        self.levels.iter().map(|level| level.threshold).collect()
    }

    /// Level at position `index`
    pub fn level(&self, index: usize) -> Option<&BrightnessLevel> {
        self.levels.get(index)
    }

    /// Highest threshold in the bank
    pub fn max_threshold(&self) -> f64 {
        self.levels.last().map_or(0.0, |level| level.threshold)
    }

    /// Number of levels
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the bank holds no level
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Write every tile to `dir` as `gray_tone_<index>.png`
    ///
    /// Failures are logged and skipped. Returns the number of tiles that could
    /// not be written.
    pub fn persist(&self, dir: &Path) -> usize {
        let mut failures = 0;
        for (index, level) in self.levels.iter().enumerate() {
            let path = level_path(dir, index);
            if let Err(error) = save_image(&*level.tile, &path) {
                tracing::warn!(%error, "could not save brightness tile, continuing");
                failures += 1;
            }
        }
        failures
    }
}

/// Thresholds `i * 255 / (n - 1)` for `i` in `0..n`
///
/// # Errors
///
/// Returns an error if `n` is below 2
pub fn level_thresholds(n: usize) -> Result<Vec<f64>> {
    if n < MIN_BRIGHTNESS_LEVELS {
        return Err(invalid_parameter(
            "levels",
            &n,
            &format!("at least {MIN_BRIGHTNESS_LEVELS} brightness levels are required"),
        ));
    }

    let last = (n - 1) as f64;
    // Multiply before dividing so the final threshold lands exactly on 255
    Ok((0..n)
        .map(|i| i as f64 * MAX_CHANNEL_VALUE / last)
        .collect())
}

/// Side-output location of brightness level `index` inside `dir`
pub fn level_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{GRAY_TONE_PREFIX}{index}.{TONE_EXTENSION}"))
}
