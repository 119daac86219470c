//! Error types for room generation and its file surface

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum GenerationError {
    /// A generation call was made before `initialize`
    NotInitialized {
        /// Operation that was attempted
        operation: &'static str,
    },

    /// A generation call was made before a grid was created
    GridNotCreated {
        /// Operation that was attempted
        operation: &'static str,
    },

    /// Style data required by a phase is absent
    MissingStyle {
        /// Which style block is missing
        style: &'static str,
    },

    /// A phase was given nothing to place
    EmptyPool {
        /// Which pool is empty
        pool: &'static str,
    },

    /// Grid dimensions are below what the room shape supports
    GridTooSmall {
        /// Requested width in cells
        width: usize,
        /// Requested height in cells
        height: usize,
        /// Smallest supported width
        min_width: usize,
        /// Smallest supported height
        min_height: usize,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to parse a room style file
    StyleLoad {
        /// Path to the style file
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// Failed to write a layout file
    LayoutExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying serialization error
        source: serde_json::Error,
    },

    /// Failed to save a preview image
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
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized { operation } => {
                write!(f, "Cannot {operation}: generator is not initialized")
            }
            Self::GridNotCreated { operation } => {
                write!(f, "Cannot {operation}: no grid has been created")
            }
            Self::MissingStyle { style } => {
                write!(f, "Missing style data: {style}")
            }
            Self::EmptyPool { pool } => {
                write!(f, "Nothing to place: {pool} is empty")
            }
            Self::GridTooSmall {
                width,
                height,
                min_width,
                min_height,
            } => {
                write!(
                    f,
                    "Grid {width}x{height} is smaller than the supported minimum {min_width}x{min_height}"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::StyleLoad { path, source } => {
                write!(f, "Failed to load style '{}': {source}", path.display())
            }
            Self::LayoutExport { path, source } => {
                write!(
                    f,
                    "Failed to export layout to '{}': {source}",
                    path.display()
                )
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
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StyleLoad { source, .. } | Self::LayoutExport { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

impl From<std::io::Error> for GenerationError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for an operation on a path
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> GenerationError {
    GenerationError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}

/// Whether an error is a configuration problem rather than an I/O failure
pub const fn is_configuration_error(error: &GenerationError) -> bool {
    matches!(
        error,
        GenerationError::NotInitialized { .. }
            | GenerationError::GridNotCreated { .. }
            | GenerationError::MissingStyle { .. }
            | GenerationError::EmptyPool { .. }
            | GenerationError::GridTooSmall { .. }
            | GenerationError::InvalidParameter { .. }
    )
}
