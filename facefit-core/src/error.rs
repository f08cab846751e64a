//! Error types for facefit

use thiserror::Error;

/// Main error type for facefit operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Landmark index {index} out of range for a mesh of {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for facefit operations
pub type Result<T> = std::result::Result<T, Error>;
