//! Error types for vastu-merge.

use thiserror::Error;

/// Errors raised by map registration and its supporting I/O.
///
/// An attempt that simply never finds a correspondence is not an error: it
/// yields a [`RegistrationResult`](crate::RegistrationResult) without an
/// alignment.
#[derive(Error, Debug)]
pub enum MergeError {
    /// Grid or point-set input that cannot be registered.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Registration parameters outside their valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A correspondence step produced no pairs or a non-finite error.
    #[error("Numerical degeneracy: {0}")]
    NumericalDegeneracy(String),

    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed map or configuration file.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_yaml::Error> for MergeError {
    fn from(e: serde_yaml::Error) -> Self {
        MergeError::Parse(e.to_string())
    }
}

impl From<image::ImageError> for MergeError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => MergeError::Io(io),
            other => MergeError::Parse(other.to_string()),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MergeError>;
