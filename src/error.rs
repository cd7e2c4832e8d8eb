//! Error types for `mbutil`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `mbutil` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Archive Errors ====================
    /// The ZIP backend reported a non-success status.
    #[error("zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The output archive could not be created.
    #[error("failed to create archive {path}: {message}")]
    ArchiveCreateFailed {
        /// The destination archive path.
        path: PathBuf,
        /// The underlying error message.
        message: String,
    },

    // ==================== Traversal Errors ====================
    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    /// A traversal hook requested abort.
    #[error("walk aborted at: {path}")]
    WalkAborted {
        /// The entry being visited when the walk aborted.
        path: PathBuf,
    },

    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    // ==================== ROM Registry Errors ====================
    /// The requested ROM id is not present in the registry.
    #[error("unknown ROM: {id}")]
    RomNotFound {
        /// The ROM id that was looked up.
        id: String,
    },

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `mbutil` operations.
pub type Result<T> = std::result::Result<T, Error>;
