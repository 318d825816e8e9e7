//! Decode failures for encoded entries

use thiserror::Error;

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Reasons an encoded entry cannot be turned back into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer bytes than the smallest possible entry
    #[error("entry too short: {len} bytes, minimum is {min}")]
    TooShort { len: usize, min: usize },

    /// Length prefix disagrees with the buffer
    #[error("entry length mismatch: header says {declared} bytes, buffer has {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("checksum mismatch: computed {computed:08x}, stored {stored:08x}")]
    ChecksumMismatch { computed: u32, stored: u32 },

    /// Entry was written with a different positional layout
    #[error("incompatible field layout: expected {expected} fields, found {found}")]
    FieldLayout { expected: u8, found: u8 },

    #[error("entry truncated while reading field '{field}'")]
    Truncated { field: &'static str },

    #[error("field '{field}' is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    #[error("field '{field}' has invalid presence flag {value}")]
    InvalidFlag { field: &'static str, value: u8 },

    /// Body continues past the last field
    #[error("{count} unexpected bytes after the last field")]
    TrailingBytes { count: usize },
}
