//! Mosaic constants and runtime configuration defaults

use image::imageops::FilterType;

// Default values for configurable parameters
/// Enlargement applied to the source to obtain the canvas that gets tiled
pub const DEFAULT_CANVAS_FACTOR: f64 = 2.0;

/// Reduction applied to the source to obtain the seed every tile derives from
pub const DEFAULT_SEED_FACTOR: f64 = 0.02;

/// Number of brightness levels rendered for the grayscale variant
pub const DEFAULT_BRIGHTNESS_LEVELS: usize = 30;

// A bank needs both ends of the 0..=255 range
/// Smallest accepted brightness bank size
pub const MIN_BRIGHTNESS_LEVELS: usize = 2;

/// Resampling filter used for scaling and per-block tile resizing
pub const DEFAULT_FILTER: FilterType = FilterType::CatmullRom;

/// Weight of the solid tone layer when tinting the seed
pub const TINT_ALPHA: f32 = 0.5;

/// Highest value an 8-bit channel can hold, as a float
pub const MAX_CHANNEL_VALUE: f64 = 255.0;

// Output settings
/// Suffix added to derived output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Default directory for color tone tiles
pub const COLOR_TONES_DIR: &str = "color_tones";
/// Default directory for grayscale brightness tiles
pub const GRAY_TONES_DIR: &str = "gray_tones";
/// File extension for persisted tone tiles
pub const TONE_EXTENSION: &str = "png";
/// File name prefix for persisted brightness tiles
pub const GRAY_TONE_PREFIX: &str = "gray_tone_";

// Progress bar display settings
/// Blocks processed between progress bar color changes
pub const PROGRESS_COLOR_PERIOD: usize = 100;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
