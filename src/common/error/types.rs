//! Unified error types for Longan.
//!
//! Low-level I/O failures raised while reading a file are wrapped into
//! [`Error::Read`], keeping the original `io::Error` as the source.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Longan operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Coordinate component outside the addressable grid
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Malformed column name, cell address, range or reader option
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Failure opening or reading an input file
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error on a caller-supplied stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A codec backend rejected the requested conversion
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// No registered reader accepts the input
    #[error("Unsupported input: {0}")]
    Unsupported(String),

    /// Configuration document could not be parsed or written
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap an I/O failure on `path` into the reader-level error kind.
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }
}

/// Result type for Longan operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_read_error_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::read("missing.csv", io);

        assert!(err.to_string().contains("missing.csv"));
        let source = err.source().expect("cause must be chained");
        assert_eq!(source.to_string(), "no such file");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::other("boom");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
