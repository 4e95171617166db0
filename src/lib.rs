//! Recursive tone mosaics: an image rebuilt out of small copies of itself
//!
//! The source is enlarged into a canvas, the canvas is cut into a grid of
//! blocks, and every block is replaced by a small copy of the source that has
//! been tinted with the block's average color (color variant) or darkened to
//! the block's average luminance (grayscale variant).

#![forbid(unsafe_code)]

/// Tone caching, tile selection and canvas recomposition
pub mod algorithm;
/// Block statistics and tone rendering primitives
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Image scaling and block grid geometry
pub mod spatial;

pub use io::error::{MosaicError, Result};
