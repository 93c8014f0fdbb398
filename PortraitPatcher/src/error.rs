//! Error types for `PortraitPatcher`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `PortraitPatcher` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error tied to a specific file and operation.
    #[error("failed to {operation} {path}: {source}")]
    FileIo {
        /// What was being attempted (read, write, rename, ...).
        operation: &'static str,
        /// The file involved.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    // ==================== Document Errors ====================
    /// The file could not be parsed as JSON5.
    #[error("failed to parse {path}: {message}")]
    Json5Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The parser's error message.
        message: String,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    /// A document's top level is not a JSON object.
    #[error("{path}: expected a JSON object at the top level")]
    NotAnObject {
        /// The offending document.
        path: PathBuf,
    },

    /// A required field is missing or has the wrong type.
    #[error("{path}: field `{field}` is missing or not {expected}")]
    InvalidField {
        /// The document containing the field.
        path: PathBuf,
        /// The field name.
        field: String,
        /// Human-readable expected type ("an array", "a string", ...).
        expected: &'static str,
    },

    // ==================== Template Errors ====================
    /// A glob pattern derived from a templated `FromFile` was invalid.
    #[error("invalid glob pattern `{pattern}`: {message}")]
    InvalidGlobPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The glob error message.
        message: String,
    },

    // ==================== File System Errors ====================
    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    // ==================== Driver Errors ====================
    /// The input directory is not a directory.
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    /// Refused to patch the game's whole Mods folder.
    #[error("refusing to patch every mod in {0}; point at a specific mod folder instead")]
    RefusingGameModsFolder(PathBuf),
}

impl Error {
    /// Wrap an IO error with the file and operation that produced it.
    pub(crate) fn file_io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileIo {
            operation,
            path: path.into(),
            source,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `PortraitPatcher` operations.
pub type Result<T> = std::result::Result<T, Error>;
