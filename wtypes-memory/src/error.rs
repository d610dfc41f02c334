use thiserror::Error;

/// Failures raised by foreign memory blocks.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MemoryError {
    /// The requested block size is zero or not allocatable.
    #[error("invalid foreign block size: {size}")]
    InvalidSize {
        /// Requested size in bytes.
        size: usize,
    },

    /// The global allocator refused the request.
    #[error("failed to allocate a {size}-byte foreign block")]
    AllocationFailed {
        /// Requested size in bytes.
        size: usize,
    },

    /// An access would reach outside the block.
    #[error("access of {len} byte(s) at offset {offset} is out of bounds for a {size}-byte block")]
    OutOfBounds {
        /// Byte offset of the access.
        offset: usize,
        /// Byte length of the access.
        len: usize,
        /// Size of the block in bytes.
        size: usize,
    },

    /// Text destined for a terminator-delimited layout contains U+0000.
    #[error("text contains an interior NUL at code unit {at}")]
    InteriorNul {
        /// Index of the offending UTF-16 code unit.
        at: usize,
    },
}
