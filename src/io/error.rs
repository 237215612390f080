//! Error types for solver operations
//!
//! Invalid input and internal invariant violations surface here; ordinary
//! infeasibility is not an error and travels through the reply stream
//! instead.

use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver operations
#[derive(Debug)]
pub enum SolverError {
    /// Board dimensions or hole coordinates failed validation
    InvalidBoard {
        /// Description of what is wrong with the board
        reason: String,
    },

    /// A tile type in the catalog failed validation
    InvalidTile {
        /// Name of the offending tile type
        name: String,
        /// Description of what is wrong with the shape
        reason: String,
    },

    /// Request parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A problem file could not be parsed
    ProblemParse {
        /// Path to the problem file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
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

    /// Internal invariant violation
    Internal {
        /// Name of the operation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBoard { reason } => {
                write!(f, "Invalid board: {reason}")
            }
            Self::InvalidTile { name, reason } => {
                write!(f, "Invalid tile type '{name}': {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ProblemParse { path, source } => {
                write!(f, "Failed to parse problem '{}': {source}", path.display())
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
            Self::Internal { operation, reason } => {
                write!(f, "Internal error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ProblemParse { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
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

impl From<serde_json::Error> for SolverError {
    fn from(err: serde_json::Error) -> Self {
        Self::ProblemParse {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

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

/// Create an internal invariant-violation error
pub fn internal_error(operation: &'static str, reason: &impl ToString) -> SolverError {
    SolverError::Internal {
        operation,
        reason: reason.to_string(),
    }
}
