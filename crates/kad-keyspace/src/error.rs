//! Error types for the identifier keyspace

use crate::encoding::EncodingType;
use thiserror::Error;

/// Errors that can occur when constructing an identifier
///
/// All variants are input-validation failures; none are transient and none
/// are retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyspaceError {
    /// Raw byte buffer has the wrong length for an identifier
    #[error("raw identifier must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Encoded text could not be decoded in the requested format
    /// (out-of-alphabet character, bad padding, or wrong decoded length)
    #[error("failed to decode {encoding} identifier: {reason}")]
    Decoding {
        encoding: EncodingType,
        reason: String,
    },

    /// Power-of-two exponent outside `[0, KEY_SIZE_BITS)`
    #[error("power-of-two exponent {power} outside [0, {max})")]
    PowerOutOfRange { power: usize, max: usize },
}

impl KeyspaceError {
    /// Shorthand for a decoding failure in `encoding` with the given reason.
    pub(crate) fn decoding(encoding: EncodingType, reason: impl Into<String>) -> Self {
        Self::Decoding {
            encoding,
            reason: reason.into(),
        }
    }
}
