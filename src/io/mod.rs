//! Input/output operations and error handling

/// Command-line parsing and run orchestration
pub mod cli;
/// Constants and runtime configuration defaults
pub mod configuration;
/// Error taxonomy shared by the whole crate
pub mod error;
/// Image loading and saving
pub mod image;
/// Block progress reporting
pub mod progress;
