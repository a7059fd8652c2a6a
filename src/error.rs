//! Error types for numfix

use crate::archive::ArchiveState;
use std::io;
use thiserror::Error;
use zip::result::ZipError;

/// Errors raised while encoding, decoding or packing arrays
#[derive(Debug, Error)]
pub enum Error {
    /// Corrupt or unrecognized data: bad magic, bad header text, length mismatch
    #[error("format error: {0}")]
    Format(String),

    /// Archive member name already in use
    #[error("duplicate member name: {0:?}")]
    DuplicateName(String),

    /// Archive member name rejected
    #[error("invalid member name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// Archive member or record field does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Well-formed input using something this crate does not handle
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// Typed access with the wrong element type
    #[error("element type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Operation not allowed in the archive's current state
    #[error("cannot {operation}: archive is {state}")]
    ArchiveState {
        state: ArchiveState,
        operation: &'static str,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        Error::Format(message.into())
    }

    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Error::UnsupportedFeature(message.into())
    }
}

impl From<ZipError> for Error {
    fn from(e: ZipError) -> Self {
        match e {
            ZipError::Io(e) => Error::Io(e),
            ZipError::UnsupportedArchive(message) => Error::UnsupportedFeature(message.to_string()),
            ZipError::FileNotFound => Error::NotFound("archive member".to_string()),
            other => Error::Format(other.to_string()),
        }
    }
}

/// Result type for numfix operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = Error::InvalidName {
            name: String::new(),
            reason: "name is empty",
        };
        assert_eq!(err.to_string(), "invalid member name \"\": name is empty");

        let err = Error::ArchiveState {
            state: ArchiveState::Finalized,
            operation: "add member",
        };
        assert_eq!(err.to_string(), "cannot add member: archive is finalized");
    }

    #[test]
    fn zip_io_errors_stay_io() {
        let err: Error = ZipError::Io(io::Error::other("disk full")).into();
        assert!(matches!(err, Error::Io(_)));

        let err: Error = ZipError::InvalidArchive("bad central directory".into()).into();
        assert!(matches!(err, Error::Format(_)));
    }
}
