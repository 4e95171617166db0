/// Eagerly rendered brightness levels for the grayscale variant
pub mod brightness_bank;
/// Block-by-block recomposition of the output canvas
pub mod composer;
/// Configuration validation and end-to-end mosaic runs
pub mod pipeline;
/// Tile selection policies for both variants
pub mod selector;
/// Lazily built tinted tiles keyed by exact average color
pub mod tone_cache;
