//! Configuration loading errors.

use thiserror::Error;

/// Config load error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigLoadError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
    /// Values parsed but out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigLoadError> for crate::error::MergeError {
    fn from(e: ConfigLoadError) -> Self {
        match e {
            ConfigLoadError::Io(msg) => {
                crate::error::MergeError::Io(std::io::Error::other(msg))
            }
            ConfigLoadError::Parse(msg) => crate::error::MergeError::Parse(msg),
            ConfigLoadError::Invalid(msg) => crate::error::MergeError::InvalidConfiguration(msg),
        }
    }
}
