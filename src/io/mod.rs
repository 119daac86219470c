//! Input/output: style loading, exports, CLI and error handling

/// Command-line interface and batch processing
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG layout preview
pub mod image;
/// Serializable layout snapshot
pub mod layout;
/// Terminal progress display
pub mod progress;
/// Room style data model
pub mod style;
