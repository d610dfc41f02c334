//! Class context flags (`CLSCTX`) for object activation calls.
//!
//! Carried as plain `u32` bits for building activation parameters;
//! activation itself lives elsewhere.

pub const CLSCTX_INPROC_SERVER: u32 = 0x1;
pub const CLSCTX_INPROC_HANDLER: u32 = 0x2;
pub const CLSCTX_LOCAL_SERVER: u32 = 0x4;
pub const CLSCTX_INPROC_SERVER16: u32 = 0x8;
pub const CLSCTX_REMOTE_SERVER: u32 = 0x10;
pub const CLSCTX_INPROC_HANDLER16: u32 = 0x20;
pub const CLSCTX_RESERVED1: u32 = 0x40;
pub const CLSCTX_RESERVED2: u32 = 0x80;
pub const CLSCTX_RESERVED3: u32 = 0x100;
pub const CLSCTX_RESERVED4: u32 = 0x200;
pub const CLSCTX_NO_CODE_DOWNLOAD: u32 = 0x400;
pub const CLSCTX_RESERVED5: u32 = 0x800;
pub const CLSCTX_NO_CUSTOM_MARSHAL: u32 = 0x1000;
pub const CLSCTX_ENABLE_CODE_DOWNLOAD: u32 = 0x2000;
pub const CLSCTX_NO_FAILURE_LOG: u32 = 0x4000;
pub const CLSCTX_DISABLE_AAA: u32 = 0x8000;
pub const CLSCTX_ENABLE_AAA: u32 = 0x1_0000;
pub const CLSCTX_FROM_DEFAULT_CONTEXT: u32 = 0x2_0000;
pub const CLSCTX_ACTIVATE_32_BIT_SERVER: u32 = 0x4_0000;
pub const CLSCTX_ACTIVATE_64_BIT_SERVER: u32 = 0x8_0000;
pub const CLSCTX_ENABLE_CLOAKING: u32 = 0x10_0000;
pub const CLSCTX_APPCONTAINER: u32 = 0x40_0000;
pub const CLSCTX_ACTIVATE_AAA_AS_IU: u32 = 0x80_0000;
pub const CLSCTX_PS_DLL: u32 = 0x8000_0000;

/// Every server context: in-process, local, and remote.
pub const CLSCTX_SERVER: u32 = CLSCTX_INPROC_SERVER | CLSCTX_LOCAL_SERVER | CLSCTX_REMOTE_SERVER;

/// The usual activation default: in-process server and handler plus local
/// server.
pub const CLSCTX_ALL: u32 = CLSCTX_INPROC_SERVER | CLSCTX_INPROC_HANDLER | CLSCTX_LOCAL_SERVER;
