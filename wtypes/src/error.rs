use std::string::FromUtf16Error;

use thiserror::Error;
use wtypes_memory::MemoryError;

/// Result alias for marshaling operations.
pub type Result<T> = std::result::Result<T, MarshalError>;

/// Failures surfaced while marshaling COM/OLE values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MarshalError {
    /// Payload bytes do not decode as UTF-16LE (an unpaired surrogate).
    #[error("payload is not valid UTF-16LE: {0}")]
    Encoding(#[from] FromUtf16Error),

    /// A `BSTR` length prefix no payload can satisfy: negative, or not a
    /// whole number of 2-byte code units.
    #[error("BSTR length prefix {0} is not a valid payload byte count")]
    InvalidPrefix(i32),

    /// The underlying foreign block rejected an access.
    #[error("foreign memory access failed: {0}")]
    Memory(#[from] MemoryError),
}
