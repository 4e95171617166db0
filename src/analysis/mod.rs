//! Analysis modules for block statistics and tone rendering

/// Per-block average color and luminance
pub mod statistics;
/// Solid fills, blending and brightness scaling
pub mod tint;
