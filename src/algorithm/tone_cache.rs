//! Lazily built tinted tiles keyed by exact average color

use crate::analysis::statistics::ToneKey;
use crate::analysis::tint::{blend, solid_fill};
use crate::io::configuration::{TINT_ALPHA, TONE_EXTENSION};
use crate::io::error::Result;
use crate::io::image::save_image;
use image::{Rgb, RgbImage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Lazily built store of tinted tiles, one per distinct block color
///
/// Tiles are never mutated after insertion and are handed out as shared
/// references, so every block with the same average color reuses the same
/// tile instance.
#[derive(Default)]
pub struct ToneCache {
    tiles: HashMap<ToneKey, Rc<RgbImage>>,
    persist_dir: Option<PathBuf>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Counters describing how the cache was used during a run
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of lookups served from the cache
    pub hits: usize,
    /// Number of tiles built
    pub misses: usize,
    /// Number of tiles that could not be written to the side-output directory
    pub persist_failures: usize,
}

impl ToneCache {
    /// Create an empty cache that keeps tiles in memory only
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache that also writes each new tile into `dir`
    pub fn persisting_to(dir: impl Into<PathBuf>) -> Self {
        Self {
            persist_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Return the tile for `key`, building it from `seed` on first use
    ///
    /// A new tile is a solid fill of the key's color blended evenly with the
    /// seed. Failing to persist it is logged and counted but the tile is
    /// still cached and returned.
    ///
    /// # Errors
    ///
    /// Returns an error only if the tile itself cannot be rendered
    pub fn get_or_create(&mut self, key: ToneKey, seed: &RgbImage) -> Result<Rc<RgbImage>> {
        if let Some(tile) = self.tiles.get(&key) {
            self.stats.hits += 1;
            return Ok(Rc::clone(tile));
        }

        self.stats.misses += 1;
        let tile = Rc::new(tint_seed(key, seed)?);
        tracing::debug!(tone = %key, "built tone tile");

        if let Some(dir) = &self.persist_dir {
            if !persist_tile(dir, key, &tile) {
                self.stats.persist_failures += 1;
            }
        }

        self.tiles.insert(key, Rc::clone(&tile));
        Ok(tile)
    }

    /// Cached tile for `key`, if it has been built
    pub fn get(&self, key: &ToneKey) -> Option<&Rc<RgbImage>> {
        self.tiles.get(key)
    }

    /// Number of distinct tones built so far
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tone has been built yet
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All keys present in the cache, in ascending order
    pub fn keys(&self) -> Vec<ToneKey> {
        let mut keys: Vec<ToneKey> = self.tiles.keys().copied().collect();
        keys.sort_unstable();
        keys
    }
}

/// Blend `seed` evenly with a solid layer of the key's color
///
/// # Errors
///
/// Returns an error if blending fails
pub fn tint_seed(key: ToneKey, seed: &RgbImage) -> Result<RgbImage> {
    let layer = solid_fill(seed.width(), seed.height(), Rgb(key.channels()));
    blend(seed, &layer, TINT_ALPHA)
}

/// Side-output location of the tile for `key` inside `dir`
pub fn tone_path(dir: &Path, key: ToneKey) -> PathBuf {
    dir.join(format!("{key}.{TONE_EXTENSION}"))
}

fn persist_tile(dir: &Path, key: ToneKey, tile: &RgbImage) -> bool {
    let path = tone_path(dir, key);
    match save_image(tile, &path) {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(%error, "could not save tone tile, continuing");
            false
        }
    }
}
