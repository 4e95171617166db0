//! Spatial data structures and image geometry
//!
//! This module contains spatial-related functionality including:
//! - Aspect-preserving image scaling
//! - Block grid decomposition and coverage tracking

/// Block grid decomposition and pixel coverage tracking
pub mod blocks;
/// Width-driven image scaling
pub mod scaler;

pub use blocks::{Block, BlockGrid, CoverageMask};
