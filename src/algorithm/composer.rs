//! Single forward pass that rebuilds the canvas source out of tiles
//!
//! For every block, in grid order: compute the block statistic, resolve a tile
//! through the selector, resize that tile to the block's exact size and paste
//! it at the block origin. Tiles are resized on every use because trailing
//! blocks at the right and bottom edges can be smaller than interior ones.

use crate::algorithm::selector::{TileSelector, Tone};
use crate::io::error::Result;
use crate::io::progress::BlockProgress;
use crate::spatial::{BlockGrid, CoverageMask};
use image::imageops::{self, FilterType};
use image::ImageBuffer;

/// Summary of a composition pass
#[derive(Clone, Debug, PartialEq)]
pub struct CompositionReport {
    /// Number of blocks pasted
    pub blocks: usize,
    /// Tone chosen for each block, in grid order
    pub tones: Vec<Tone>,
}

/// Tile the canvas source with `block_width` x `block_height` blocks
///
/// Returns a freshly allocated canvas of the source's dimensions in which
/// every pixel has been written by exactly one resized tile.
///
/// # Errors
///
/// Returns an error if:
/// - The block size has a zero dimension
/// - The selector fails to resolve a tile for a block
/// - The pasted blocks do not cover the canvas exactly once
pub fn compose<S>(
    source: &ImageBuffer<S::Pixel, Vec<u8>>,
    block_width: u32,
    block_height: u32,
    selector: &mut S,
    progress: &mut dyn BlockProgress,
    filter: FilterType,
) -> Result<(ImageBuffer<S::Pixel, Vec<u8>>, CompositionReport)>
where
    S: TileSelector,
{
    let grid = BlockGrid::new(source.width(), source.height(), block_width, block_height)?;
    let mut canvas = ImageBuffer::new(source.width(), source.height());
    let mut coverage = CoverageMask::new(source.width(), source.height());
    let mut tones = Vec::with_capacity(grid.len());

    progress.begin(grid.len());

    for block in grid.blocks() {
        let selection = selector.select(source, &block)?;
        let fitted = imageops::resize(&*selection.tile, block.width, block.height, filter);
        coverage.claim(&block)?;
        imageops::replace(&mut canvas, &fitted, i64::from(block.x), i64::from(block.y));
        tones.push(selection.tone);
        progress.advance();
    }

    progress.finish();
    coverage.ensure_complete()?;

    Ok((
        canvas,
        CompositionReport {
            blocks: tones.len(),
            tones,
        },
    ))
}
