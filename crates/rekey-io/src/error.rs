//! Error types for I/O operations.
//!
//! Decode failures are surfaced as-is from the decoder; codec failures while
//! encoding carry the target format.

use std::io;
use thiserror::Error;

use crate::Format;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input could not be decoded into an RGBA raster.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Codec failed while serializing a raster.
    #[error("{format} encode error: {message}")]
    EncodeError {
        /// Target format.
        format: Format,
        /// Codec message.
        message: String,
    },

    /// Decoded buffer did not form a valid raster.
    #[error(transparent)]
    Raster(#[from] rekey_core::Error),
}

impl IoError {
    /// Creates an [`IoError::EncodeError`].
    pub fn encode(format: Format, message: impl ToString) -> Self {
        Self::EncodeError {
            format,
            message: message.to_string(),
        }
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
