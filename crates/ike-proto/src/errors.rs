//! Error types for IKE payload handling.
//!
//! All errors are structured, testable, and provide actionable information.

use thiserror::Error;

use crate::encodings::EncodingType;

/// Errors that can occur while building, generating, or parsing payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    // Resource errors
    /// Owned value buffer could not be allocated
    #[error("allocation failure: could not reserve {requested} bytes for attribute value")]
    AllocationFailure {
        /// Number of bytes requested
        requested: usize,
    },

    /// Attribute value does not fit the 16-bit length field
    #[error("attribute value too long: {len} bytes exceeds maximum {max}")]
    ValueTooLong {
        /// Actual value length
        len: usize,
        /// Maximum allowed length
        max: usize,
    },

    // Parsing errors
    /// Input ended before a field could be read
    #[error("buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort {
        /// Bytes needed for the next field
        expected: usize,
        /// Bytes actually available
        actual: usize,
    },

    /// Value bytes disagree with the length already placed in the payload
    #[error("value length mismatch: length field says {declared} bytes, value has {actual}")]
    ValueLengthMismatch {
        /// Length from the length-or-value field
        declared: usize,
        /// Length of the supplied value bytes
        actual: usize,
    },

    /// Input has bytes left over after the last payload
    #[error("trailing bytes: {remaining} bytes left after payload")]
    TrailingBytes {
        /// Unconsumed byte count
        remaining: usize,
    },

    // Field placement errors
    /// Field value shape does not match the encoding rule
    #[error("field type mismatch for {kind:?}")]
    FieldTypeMismatch {
        /// Rule that received the wrong shape
        kind: EncodingType,
    },

    /// Payload has no storage for this field in its current state
    #[error("unexpected field {kind:?} for payload state")]
    UnexpectedField {
        /// Rule that was rejected
        kind: EncodingType,
    },
}

/// Convenient Result type alias for payload operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
