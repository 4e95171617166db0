//! Tile selection policies for the color and grayscale mosaics
//!
//! The color policy is exact-key dispatch: the block's average color is the
//! cache key and a missing key builds a new tile. The grayscale policy scans
//! the brightness bank in ascending order and takes the first level whose
//! threshold is at least the block's luminance.

use crate::algorithm::brightness_bank::BrightnessBank;
use crate::algorithm::tone_cache::ToneCache;
use crate::analysis::statistics::{ToneKey, average_color, average_luminance};
use crate::io::error::{MosaicError, Result};
use crate::spatial::Block;
use image::{GrayImage, ImageBuffer, Luma, Pixel, Rgb, RgbImage};
use std::rc::Rc;

/// Which tone a block resolved to
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tone {
    /// Color tile keyed by the block's average color
    Color(ToneKey),
    /// Brightness level chosen for the block's luminance
    Level {
        /// Position of the level in the bank
        index: usize,
        /// Average luminance of the block
        luminance: u8,
    },
}

/// Tile chosen for a block together with the tone that selected it
#[derive(Clone, Debug)]
pub struct Selection<P: Pixel> {
    /// Shared tile, resized by the composer to the block dimensions
    pub tile: Rc<ImageBuffer<P, Vec<u8>>>,
    /// Tone the block resolved to
    pub tone: Tone,
}

/// Resolves the tile that replaces a block of the canvas source
pub trait TileSelector {
    /// Pixel type of both the canvas source and the tiles
    type Pixel: Pixel<Subpixel = u8> + 'static;

    /// Compute the block statistic and return the matching tile
    ///
    /// # Errors
    ///
    /// Returns an error if the statistic cannot be computed or no tile matches
    fn select(
        &mut self,
        source: &ImageBuffer<Self::Pixel, Vec<u8>>,
        block: &Block,
    ) -> Result<Selection<Self::Pixel>>;
}

/// Color policy backed by a lazily filled [`ToneCache`]
pub struct ColorSelector {
    seed: RgbImage,
    cache: ToneCache,
}

impl ColorSelector {
    /// Create a selector tinting `seed` through `cache`
    pub const fn new(seed: RgbImage, cache: ToneCache) -> Self {
        Self { seed, cache }
    }

    /// Tone cache filled so far
    pub const fn cache(&self) -> &ToneCache {
        &self.cache
    }

    /// Give up the selector, keeping the cache
    pub fn into_cache(self) -> ToneCache {
        self.cache
    }
}

impl TileSelector for ColorSelector {
    type Pixel = Rgb<u8>;

    fn select(&mut self, source: &RgbImage, block: &Block) -> Result<Selection<Rgb<u8>>> {
        let key = average_color(source, block)?;
        let tile = self.cache.get_or_create(key, &self.seed)?;
        Ok(Selection {
            tile,
            tone: Tone::Color(key),
        })
    }
}

/// Grayscale policy over an eagerly built [`BrightnessBank`]
pub struct GraySelector {
    bank: BrightnessBank,
}

impl GraySelector {
    /// Create a selector over `bank`
    pub const fn new(bank: BrightnessBank) -> Self {
        Self { bank }
    }

    /// Brightness bank the selector scans
    pub const fn bank(&self) -> &BrightnessBank {
        &self.bank
    }

    /// Give up the selector, keeping the bank
    pub fn into_bank(self) -> BrightnessBank {
        self.bank
    }
}

impl TileSelector for GraySelector {
    type Pixel = Luma<u8>;

    fn select(&mut self, source: &GrayImage, block: &Block) -> Result<Selection<Luma<u8>>> {
        let luminance = average_luminance(source, block)?;
        let index = select_level(&self.bank, luminance)?;
        let level = self
            .bank
            .level(index)
            .ok_or_else(|| MosaicError::UnmatchedTile {
                luminance,
                max_threshold: self.bank.max_threshold(),
            })?;
        Ok(Selection {
            tile: Rc::clone(&level.tile),
            tone: Tone::Level { index, luminance },
        })
    }
}

/// Index of the first threshold greater than or equal to `luminance`
///
/// Thresholds must be in ascending order. This is a first-match scan, not a
/// nearest-threshold search: a luminance between two thresholds always maps to
/// the higher one.
pub fn first_match_above(
    thresholds: impl IntoIterator<Item = f64>,
    luminance: u8,
) -> Option<usize> {
    let value = f64::from(luminance);
    thresholds
        .into_iter()
        .position(|threshold| value <= threshold)
}

/// Bank level serving `luminance`
///
/// # Errors
///
/// Returns [`MosaicError::UnmatchedTile`] when the luminance exceeds every
/// threshold, which only happens for banks that stop short of 255
pub fn select_level(bank: &BrightnessBank, luminance: u8) -> Result<usize> {
    first_match_above(bank.levels().iter().map(|level| level.threshold), luminance).ok_or_else(
        || MosaicError::UnmatchedTile {
            luminance,
            max_threshold: bank.max_threshold(),
        },
    )
}
