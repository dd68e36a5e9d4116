use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Main error type for linecut
#[derive(Error, Debug)]
pub enum LinecutError {
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not valid {encoding}: {source}", path.display())]
    Encoding {
        path: PathBuf,
        encoding: String,
        source: FromUtf8Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to parse config {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Line {line} does not contain {expected:?} (found {found:?})")]
    BoundaryMismatch {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("Content of {} changed during write (expected {expected}, found {actual})", path.display())]
    WriteVerification {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Failed to write diagnostics: {0}")]
    Output(#[source] std::io::Error),
}

impl LinecutError {
    /// Create a new file access error with path context
    pub fn file_access(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::FileAccess {
            source: err,
            path: path.into(),
        }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new config parse error
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using LinecutError
pub type LinecutResult<T> = Result<T, LinecutError>;

/// Contextual error mapping function
pub fn map_io_err<P: Into<PathBuf>>(path: P) -> impl FnOnce(std::io::Error) -> LinecutError {
    let path = path.into();
    move |err| LinecutError::file_access(err, path)
}
