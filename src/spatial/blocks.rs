//! Rectangular block decomposition of an image and coverage tracking
//!
//! Blocks are laid out row by row, left to right inside a row. When the image
//! size is not a multiple of the block size, the last column and the last row
//! hold clipped (smaller) blocks so that the grid covers every pixel once.

use crate::io::error::{MosaicError, Result, invalid_parameter};
use bitvec::prelude::*;

/// Axis-aligned rectangle over an image's pixel grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    /// Left edge (inclusive)
    pub x: u32,
    /// Top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Block {
    /// Create a block from its origin and size
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive), saturating at `u32::MAX`
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive), saturating at `u32::MAX`
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Number of pixels inside the block
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether the block lies entirely inside a `width` x `height` image
    ///
    /// Blocks whose edges overflow `u32` never fit.
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        if self.width == 0 || self.height == 0 {
            return false;
        }
        match (
            self.x.checked_add(self.width),
            self.y.checked_add(self.height),
        ) {
            (Some(right), Some(bottom)) => right <= width && bottom <= height,
            _ => false,
        }
    }
}

/// Grid of blocks covering a `width` x `height` image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockGrid {
    width: u32,
    height: u32,
    block_width: u32,
    block_height: u32,
}

impl BlockGrid {
    /// Create a grid of `block_width` x `block_height` cells over an image
    ///
    /// # Errors
    ///
    /// Returns an error if the image or the block has a zero dimension
    pub fn new(width: u32, height: u32, block_width: u32, block_height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "image size",
                &format!("{width}x{height}"),
                &"cannot tile an empty image",
            ));
        }
        if block_width == 0 || block_height == 0 {
            return Err(invalid_parameter(
                "block size",
                &format!("{block_width}x{block_height}"),
                &"blocks must be at least one pixel wide and tall",
            ));
        }

        Ok(Self {
            width,
            height,
            block_width,
            block_height,
        })
    }

    /// Number of block columns, counting a trailing partial column
    pub const fn columns(&self) -> u32 {
        self.width.div_ceil(self.block_width)
    }

    /// Number of block rows, counting a trailing partial row
    pub const fn rows(&self) -> u32 {
        self.height.div_ceil(self.block_height)
    }

    /// Total number of blocks in the grid
    pub const fn len(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Always false, a valid grid holds at least one block
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Image dimensions covered by the grid
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Nominal block dimensions (edge blocks may be smaller)
    pub const fn block_dimensions(&self) -> (u32, u32) {
        (self.block_width, self.block_height)
    }

    /// Block at grid cell (`column`, `row`), clipped to the image bounds
    pub fn block_at(&self, column: u32, row: u32) -> Option<Block> {
        if column >= self.columns() || row >= self.rows() {
            return None;
        }
        let x = column * self.block_width;
        let y = row * self.block_height;
        Some(Block::new(
            x,
            y,
            self.block_width.min(self.width - x),
            self.block_height.min(self.height - y),
        ))
    }

    /// Iterate over all blocks, row by row
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        (0..self.rows()).flat_map(move |row| {
            (0..self.columns()).filter_map(move |column| self.block_at(column, row))
        })
    }
}

/// Bit mask recording which pixels of an image have been written
///
/// Backs the completeness check of the composer: each pixel must be claimed
/// by exactly one block.
#[derive(Clone, Debug)]
pub struct CoverageMask {
    bits: BitVec,
    width: u32,
    height: u32,
}

impl CoverageMask {
    /// Create a mask with no pixel covered
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            bits: bitvec![0; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Mark every pixel of `block` as written
    ///
    /// # Errors
    ///
    /// Returns an error if the block leaves the image or overlaps a pixel that
    /// was already claimed
    pub fn claim(&mut self, block: &Block) -> Result<()> {
        if !block.fits_within(self.width, self.height) {
            return Err(MosaicError::CoverageViolation {
                x: block.x,
                y: block.y,
                reason: "block extends past the canvas",
            });
        }

        let row_width = self.width as usize;
        for y in block.y..block.bottom() {
            let start = y as usize * row_width + block.x as usize;
            let end = start + block.width as usize;
            let Some(span) = self.bits.get_mut(start..end) else {
                return Err(MosaicError::CoverageViolation {
                    x: block.x,
                    y,
                    reason: "block extends past the canvas",
                });
            };
            if let Some(offset) = span.first_one() {
                return Err(MosaicError::CoverageViolation {
                    x: block.x + offset as u32,
                    y,
                    reason: "pixel written by more than one block",
                });
            }
            span.fill(true);
        }

        Ok(())
    }

    /// Number of pixels claimed so far
    pub fn covered(&self) -> usize {
        self.bits.count_ones()
    }

    /// Confirm that every pixel has been claimed
    ///
    /// # Errors
    ///
    /// Returns an error naming the first pixel no block has written
    pub fn ensure_complete(&self) -> Result<()> {
        match self.bits.first_zero() {
            None => Ok(()),
            Some(index) => {
                let row_width = self.width as usize;
                Err(MosaicError::CoverageViolation {
                    x: (index % row_width) as u32,
                    y: (index / row_width) as u32,
                    reason: "pixel not covered by any block",
                })
            }
        }
    }
}
