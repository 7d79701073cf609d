//! Unified error type for the giftirs crate.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors reported by the GIFTI container and codec.
///
/// Every error is raised synchronously at the offending call; mismatched
/// payload lengths are never silently truncated or padded.
#[derive(Error, Debug)]
pub enum Error {
    /// A datatype code or name outside the supported GIFTI enumeration.
    #[error("unsupported data type: {0}")]
    UnsupportedDatatype(String),

    /// Decoded payload does not match the declared shape and datatype.
    #[error("array length mismatch: expected {expected}, got {actual}")]
    ArrayLengthMismatch { expected: usize, actual: usize },

    /// Malformed base64 text, a broken compressed stream, or an
    /// unparseable ASCII token.
    #[error("corrupt payload: {0}")]
    CorruptPayload(String),

    /// Positional data-array access outside `[0, numDA)`.
    #[error("index {index} out of range for {len} data arrays")]
    IndexOutOfRange { index: usize, len: usize },

    /// A value that fails validation at an assignment or parse boundary.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A color value with a component count other than 4.
    #[error("invalid color: expected exactly 4 components (RGBA), got {0}")]
    InvalidColorComponents(usize),

    /// An error from the delegated external-file read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
