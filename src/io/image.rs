//! Image decoding and encoding with path-aware errors

use crate::io::error::{MosaicError, Result};
use image::{DynamicImage, ImageBuffer, Pixel, PixelWithColorType};
use std::path::Path;

/// Decode the image at `path`
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a supported image
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Encode `image` to `path`, creating missing parent directories
///
/// The format follows the path's extension.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn save_image<P>(image: &ImageBuffer<P, Vec<u8>>, path: &Path) -> Result<()>
where
    P: Pixel<Subpixel = u8> + PixelWithColorType,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image.save(path).map_err(|e| MosaicError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}
