#![allow(
    clippy::undocumented_unsafe_blocks,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::cargo_common_metadata
)]

//! Foreign memory primitives for COM/OLE marshaling.
//!
//! Two types, one ownership rule:
//!
//! - [`Memory`]: an owned, zero-filled heap block with bounds-checked
//!   little-endian accessors. Dropping it releases the block exactly once;
//!   [`Memory::into_raw_parts`] defers the release to the caller.
//! - [`ForeignPtr`]: an address into such a block, carrying the byte offset
//!   it sits at. A handle never owns or frees anything; its raw readers can
//!   step backwards over a length prefix, but never in front of the block
//!   base the handle was derived from.
//!
//! Blocks come from the process heap through the global allocator. They are
//! not `SysAllocString` or `CoTaskMemAlloc` allocations; never hand one to
//! an API that frees with those.

mod block;
mod error;
mod ptr;

pub use block::Memory;
pub use error::MemoryError;
pub use ptr::ForeignPtr;

#[cfg(test)]
mod tests;
