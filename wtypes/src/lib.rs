#![allow(
    clippy::undocumented_unsafe_blocks,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::cargo_common_metadata
)]

//! COM/OLE string and variant-type marshaling over foreign memory.
//!
//! Each type here owns the binary layout of one wtypes.h value and nothing
//! more; no COM activation, no apartment management, no `VARIANT` payloads.
//!
//! - [`Bstr`]: `[i32 byte length][UTF-16LE payload][00 00]`. The handle
//!   COM traffics in addresses the payload, four bytes past the block
//!   base; a null handle decodes as the empty string.
//! - [`Lpstr`], [`Lpwstr`], [`Lpolestr`]: `[UTF-16LE payload][00 00]`, no
//!   prefix. A null handle is "no string", decoded as `None` and distinct
//!   from the empty string.
//! - [`VarType`]: the 16-bit tag naming a variant's runtime type, with the
//!   `VT_*` catalog and a 2-byte by-reference cell for out-parameters.
//!
//! Blocks come from [`wtypes_memory`]: process-heap allocations, not
//! `SysAllocString` or `CoTaskMemAlloc` ones. Every constructor allocates
//! a fresh block that the wrapper owns and frees on drop, exactly once.
//! `into_raw`/`into_block` defer that release to the caller; handles
//! rebuilt from raw addresses with `from_raw` never free. Decoding always
//! reads current foreign bytes, so a callee that rewrote the block is
//! reflected in the next read.

mod bstr;
mod clsctx;
mod error;
mod vartype;
mod wstring;

pub use bstr::{Bstr, BstrByRef};
pub use clsctx::*;
pub use error::{MarshalError, Result};
pub use vartype::*;
pub use wstring::{Lpolestr, Lpstr, Lpwstr};
