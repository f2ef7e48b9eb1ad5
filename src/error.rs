//! Error types for loading and querying dictionaries.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DawgError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Truncated or malformed binary input. Nothing loaded from it is usable.
    #[error("format error: {0}")]
    Format(String),

    #[error("key not found")]
    KeyNotFound,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A stored payload is not valid base64.
    #[error("payload decode error: {0}")]
    Payload(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, DawgError>;

impl DawgError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!(error = %msg, "rejecting malformed dictionary data");
        DawgError::Format(msg)
    }

    /// Maps a short read while decoding a section to a format error, keeping
    /// every other I/O failure as-is.
    pub(crate) fn from_section_read(err: io::Error, section: &str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::format(format!("{section} section truncated"))
        } else {
            DawgError::Io(err)
        }
    }
}
