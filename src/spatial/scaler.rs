//! Width-driven, aspect-preserving image scaling

use crate::io::error::{MosaicError, Result, ensure_positive_factor};
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Pixel};
use num_traits::ToPrimitive;

/// Compute the dimensions of an image scaled by `factor`
///
/// The new width is `round(width * factor)`. The new height follows from the
/// ratio between the new and the original width, so the aspect ratio of the
/// original is kept instead of scaling the height independently.
///
/// # Errors
///
/// Returns an error if:
/// - `factor` is not a finite positive number
/// - The source image has a zero dimension
/// - Either scaled dimension rounds to zero or exceeds `u32`
pub fn scaled_dimensions(width: u32, height: u32, factor: f64) -> Result<(u32, u32)> {
    let factor = ensure_positive_factor("factor", factor)?;
    let degenerate = || MosaicError::DegenerateScale {
        factor,
        width,
        height,
    };

    if width == 0 || height == 0 {
        return Err(degenerate());
    }

    let new_width = (f64::from(width) * factor)
        .round()
        .to_u32()
        .filter(|&w| w > 0)
        .ok_or_else(degenerate)?;
    let new_height = (f64::from(new_width) / f64::from(width) * f64::from(height))
        .round()
        .to_u32()
        .filter(|&h| h > 0)
        .ok_or_else(degenerate)?;

    Ok((new_width, new_height))
}

/// Resize an image by `factor` using [`scaled_dimensions`]
///
/// # Errors
///
/// Returns an error if the scaled dimensions are degenerate
pub fn scale<P>(
    image: &ImageBuffer<P, Vec<u8>>,
    factor: f64,
    filter: FilterType,
) -> Result<ImageBuffer<P, Vec<u8>>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let (width, height) = scaled_dimensions(image.width(), image.height(), factor)?;
    Ok(imageops::resize(image, width, height, filter))
}
