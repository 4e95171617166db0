//! Per-block average color and average luminance extraction
//!
//! Images are viewed as `rows x cols x channels` arrays over their raw buffer.
//! A block becomes a sliced view whose channel lanes are summed in `u64` and
//! divided by the pixel count, which is the truncated mean for 8-bit data.

use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::spatial::Block;
use image::{GrayImage, ImageBuffer, Pixel, RgbImage};
use ndarray::{ArrayView3, Axis, Slice};
use std::fmt;

/// Exact average color of a block, used as the tone cache key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToneKey(pub [u8; 3]);

impl ToneKey {
    /// Build a key from individual channel values
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Channel values in RGB order
    pub const fn channels(&self) -> [u8; 3] {
        self.0
    }
}

impl fmt::Display for ToneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{r}_{g}_{b}")
    }
}

/// View an image buffer as a `rows x cols x channels` array
///
/// # Errors
///
/// Returns an error if the buffer length disagrees with the image dimensions
pub fn pixel_view<P>(image: &ImageBuffer<P, Vec<u8>>) -> Result<ArrayView3<'_, u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let shape = (
        image.height() as usize,
        image.width() as usize,
        usize::from(P::CHANNEL_COUNT),
    );
    ArrayView3::from_shape(shape, image.as_raw().as_slice())
        .map_err(|e| computation_error("pixel view", &e))
}

/// Truncated mean of every channel over `block`
///
/// # Errors
///
/// Returns an error if the block is empty or extends past the image
pub fn channel_means<P>(image: &ImageBuffer<P, Vec<u8>>, block: &Block) -> Result<Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    if !block.fits_within(image.width(), image.height()) {
        return Err(invalid_parameter(
            "block",
            &format!("{block:?}"),
            &format!(
                "must be non-empty and inside the {}x{} image",
                image.width(),
                image.height()
            ),
        ));
    }

    let view = pixel_view(image)?;
    let region = view
        .slice_axis_move(Axis(0), Slice::from(block.y as usize..block.bottom() as usize))
        .slice_axis_move(Axis(1), Slice::from(block.x as usize..block.right() as usize));
    let count = block.area();

    Ok(region
        .axis_iter(Axis(2))
        .map(|lane| {
            let sum = lane.fold(0_u64, |acc, &value| acc + u64::from(value));
            // The mean of u8 values never exceeds u8::MAX
            (sum / count) as u8
        })
        .collect())
}

/// Average color of `block`, each channel truncated to an integer
///
/// # Errors
///
/// Returns an error if the block is empty or extends past the image
pub fn average_color(image: &RgbImage, block: &Block) -> Result<ToneKey> {
    let means = channel_means(image, block)?;
    match means.as_slice() {
        &[r, g, b] => Ok(ToneKey::new(r, g, b)),
        other => Err(computation_error(
            "average color",
            &format!("expected 3 channels, found {}", other.len()),
        )),
    }
}

/// Average luminance of `block`, truncated to an integer
///
/// # Errors
///
/// Returns an error if the block is empty or extends past the image
pub fn average_luminance(image: &GrayImage, block: &Block) -> Result<u8> {
    let means = channel_means(image, block)?;
    means
        .first()
        .copied()
        .ok_or_else(|| computation_error("average luminance", &"image has no channels"))
}

/// Whole-image block, convenient for statistics over an entire image
pub fn full_block<P: Pixel>(image: &ImageBuffer<P, Vec<P::Subpixel>>) -> Block {
    Block::new(0, 0, image.width(), image.height())
}
