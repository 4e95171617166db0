//! Error types and context management for mosaic operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Mosaic parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Scale factor collapses one of the image dimensions to zero
    DegenerateScale {
        /// Requested scale factor
        factor: f64,
        /// Width of the image being scaled
        width: u32,
        /// Height of the image being scaled
        height: u32,
    },

    /// No brightness level accepts the block luminance
    ///
    /// Only reachable with a bank whose thresholds stop short of 255.
    UnmatchedTile {
        /// Average luminance of the block
        luminance: u8,
        /// Highest threshold available in the bank
        max_threshold: f64,
    },

    /// Output canvas pixels were written twice or not at all
    CoverageViolation {
        /// Column of the first offending pixel
        x: u32,
        /// Row of the first offending pixel
        y: u32,
        /// Description of the violation
        reason: &'static str,
    },

    /// Numerical or buffer computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::DegenerateScale {
                factor,
                width,
                height,
            } => {
                write!(
                    f,
                    "Scale factor {factor} collapses a {width}x{height} image to zero size"
                )
            }
            Self::UnmatchedTile {
                luminance,
                max_threshold,
            } => {
                write!(
                    f,
                    "No brightness level for luminance {luminance} (highest threshold {max_threshold:.2})"
                )
            }
            Self::CoverageViolation { x, y, reason } => {
                write!(f, "Canvas coverage violated at ({x}, {y}): {reason}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> MosaicError {
    MosaicError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Reject factors that are not finite and strictly positive
///
/// # Errors
///
/// Returns [`MosaicError::InvalidParameter`] naming `parameter` when the factor is
/// zero, negative, NaN or infinite
pub fn ensure_positive_factor(parameter: &'static str, factor: f64) -> Result<f64> {
    if factor.is_finite() && factor > 0.0 {
        Ok(factor)
    } else {
        Err(invalid_parameter(
            parameter,
            &factor,
            &"must be a finite number greater than zero",
        ))
    }
}

