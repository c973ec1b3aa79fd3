//! Error types for reconstruction and surrounding file operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all reconstruction operations
#[derive(Debug)]
pub enum SolverError {
    /// Failed to load a piece image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered assembly to disk
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

    /// Piece data doesn't meet reconstruction requirements
    InvalidPieceData {
        /// Description of what's wrong with the pieces
        reason: String,
    },

    /// A piece's dimensions differ from the rest of its group
    PieceSizeMismatch {
        /// Name of the offending piece
        name: String,
        /// Dimensions shared by the group (rows, cols)
        expected: (usize, usize),
        /// Dimensions of the offending piece (rows, cols)
        actual: (usize, usize),
    },

    /// No pair of remaining assemblies admits any valid join
    ///
    /// The puzzle cannot be fully reassembled from the given pieces; the
    /// listed assemblies remain disjoint.
    DisjointPieces {
        /// Labels of the assemblies that could not be joined
        remaining: Vec<String>,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Internal computation reached an impossible state
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for SolverError {
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
            Self::InvalidPieceData { reason } => {
                write!(f, "Invalid piece data: {reason}")
            }
            Self::PieceSizeMismatch {
                name,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Piece '{name}' is {}x{} but its group is {}x{}",
                    actual.0, actual.1, expected.0, expected.1
                )
            }
            Self::DisjointPieces { remaining } => {
                write!(
                    f,
                    "No joinable pair among {} remaining assemblies: {}",
                    remaining.len(),
                    remaining.join(", ")
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for reconstruction results
pub type Result<T> = std::result::Result<T, SolverError>;

impl From<image::ImageError> for SolverError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SolverError {
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
) -> SolverError {
    SolverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> SolverError {
    SolverError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a generic path validation error
pub fn io_error(msg: &str) -> SolverError {
    SolverError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}
