//! Pixel-level tone primitives: solid fills, alpha blending and brightness scaling

use crate::io::error::{Result, invalid_parameter};
use image::{GrayImage, ImageBuffer, Luma, Pixel};

/// Image of the given size where every pixel is `pixel`
pub fn solid_fill<P>(width: u32, height: u32, pixel: P) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    ImageBuffer::from_pixel(width, height, pixel)
}

fn mix(base: u8, overlay: u8, alpha: f32) -> u8 {
    let value = f32::from(base) + alpha * (f32::from(overlay) - f32::from(base));
    value.round().clamp(0.0, 255.0) as u8
}

/// Blend two equally sized images as `base * (1 - alpha) + overlay * alpha`
///
/// # Errors
///
/// Returns an error if the images differ in size or `alpha` is outside `[0, 1]`
pub fn blend<P>(
    base: &ImageBuffer<P, Vec<u8>>,
    overlay: &ImageBuffer<P, Vec<u8>>,
    alpha: f32,
) -> Result<ImageBuffer<P, Vec<u8>>>
where
    P: Pixel<Subpixel = u8>,
{
    if !(0.0..=1.0).contains(&alpha) {
        return Err(invalid_parameter("alpha", &alpha, &"must lie within [0, 1]"));
    }
    if base.dimensions() != overlay.dimensions() {
        return Err(invalid_parameter(
            "overlay",
            &format!("{}x{}", overlay.width(), overlay.height()),
            &format!("must match the {}x{} base", base.width(), base.height()),
        ));
    }

    let mut blended = base.clone();
    for (out, top) in blended.pixels_mut().zip(overlay.pixels()) {
        out.apply2(top, |b, o| mix(b, o, alpha));
    }
    Ok(blended)
}

/// Multiply every luminance value by `factor`, clamping to the 8-bit range
///
/// A factor of 0 yields a black image and 1 returns the image unchanged.
///
/// # Errors
///
/// Returns an error if `factor` is negative or not finite
pub fn scale_brightness(image: &GrayImage, factor: f64) -> Result<GrayImage> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(invalid_parameter(
            "brightness factor",
            &factor,
            &"must be a finite non-negative number",
        ));
    }

    let mut scaled = image.clone();
    for Luma([value]) in scaled.pixels_mut() {
        *value = (f64::from(*value) * factor).round().clamp(0.0, 255.0) as u8;
    }
    Ok(scaled)
}
