//! Error types for export operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting or reading back captures
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Storage is read-only: {}", .path.display())]
    StorageReadOnly { path: PathBuf },

    #[error("Storage is not available: {}", .path.display())]
    StorageUnavailable { path: PathBuf },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// One-line message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            IoError::StorageReadOnly { .. } => {
                "Write permission to storage denied. Grant the permission to save the file.".to_string()
            }
            IoError::StorageUnavailable { .. } => "Storage is not available.".to_string(),
            IoError::ParseError { message } => format!("Could not read the file: {}", message),
            IoError::Io(err) => format!("Error creating the file: {}", err),
        }
    }
}

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, IoError>;
