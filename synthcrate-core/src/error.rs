//! Error types for synthcrate

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for synthcrate operations
///
/// Placement saturation and degenerate camera orientations are not errors:
/// the samplers report them through flags on their results.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Image error: {0}")]
    Image(String),
}

impl Error {
    /// Shorthand for a [`Error::MalformedRecord`] at a 1-based line number
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Error::MalformedRecord {
            line,
            message: message.into(),
        }
    }

    /// Map an `open`/`read` failure onto [`Error::InputNotFound`] when the
    /// path does not exist, keeping every other I/O failure as-is
    pub fn from_input_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::InputNotFound { path: path.into() }
        } else {
            Error::Io(err)
        }
    }
}

/// Result type alias for synthcrate operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_input_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::from_input_io("models/chair.obj", io);
        assert!(matches!(err, Error::InputNotFound { .. }));
        assert_eq!(err.to_string(), "Input not found: models/chair.obj");
    }

    #[test]
    fn test_other_io_errors_are_kept() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from_input_io("models/chair.obj", io);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_malformed_message_names_line() {
        let err = Error::malformed(7, "expected a number, found 'abc'");
        assert_eq!(
            err.to_string(),
            "Malformed record at line 7: expected a number, found 'abc'"
        );
    }
}
