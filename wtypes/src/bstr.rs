//! Length-prefixed OLE string (`BSTR`) marshaling.

use wtypes_memory::{ForeignPtr, Memory, MemoryError};

use crate::error::{MarshalError, Result};

/// Byte width of the length prefix in front of a `BSTR` payload.
const PREFIX_LEN: usize = 4;
/// Byte width of the zero terminator behind the payload.
const TERMINATOR_LEN: usize = 2;

/// A length-prefixed, zero-terminated UTF-16LE string in foreign memory.
///
/// Block layout: `[i32 byte length][UTF-16LE payload][00 00]`. The handle
/// COM signatures traffic in addresses the *payload*, four bytes past the
/// block base; the prefix counts payload bytes only, never the terminator.
/// A null handle is the canonical empty string.
///
/// [`Bstr::new`] allocates a fresh block on every call and owns it;
/// dropping the `Bstr` releases the block, exactly once. Handles rebuilt
/// with [`Bstr::from_raw`] own nothing and never free. Decoding reads the
/// current foreign bytes each time, so a callee that rewrote the block is
/// reflected in the next [`Bstr::value`] call.
#[derive(Debug, Default)]
pub struct Bstr {
    /// Backing block, present when this instance allocated it.
    block: Option<Memory>,
    value: ForeignPtr,
}

impl Bstr {
    /// The null handle. Decodes as the empty string without allocating.
    pub const fn null() -> Self {
        Self {
            block: None,
            value: ForeignPtr::null(),
        }
    }

    /// Marshals `text` into a freshly allocated block.
    ///
    /// The block is `4 + L + 2` zero-filled bytes for an `L`-byte UTF-16LE
    /// encoding of `text`; the zero fill doubles as the terminator. The
    /// empty string still allocates (a 6-byte block whose prefix is 0);
    /// use [`Bstr::null`] for the allocation-free empty representation.
    pub fn new(text: &str) -> Result<Self> {
        let payload: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
        // The prefix is an i32; a payload it cannot count is unrepresentable.
        let prefix = i32::try_from(payload.len())
            .map_err(|_| MemoryError::InvalidSize { size: payload.len() })?;
        let mut block = Memory::new(PREFIX_LEN + payload.len() + TERMINATOR_LEN)?;
        block.write_i32(0, prefix)?;
        block.write_bytes(PREFIX_LEN, &payload)?;
        let value = block.share(PREFIX_LEN)?;
        Ok(Self {
            block: Some(block),
            value,
        })
    }

    /// Marshals `text`, mapping absent text to the empty string.
    ///
    /// `None` behaves exactly like `Some("")`: it allocates the 6-byte
    /// empty block rather than producing a null handle.
    pub fn from_option(text: Option<&str>) -> Result<Self> {
        Self::new(text.unwrap_or_default())
    }

    /// Rebuilds a handle from a raw `BSTR` payload address.
    ///
    /// The result borrows the foreign allocation and will never free it.
    /// A null `ptr` yields the null handle.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must address the payload of a live BSTR-shaped
    /// block: four readable prefix bytes in front of it and as many
    /// readable payload bytes behind it as the prefix counts. The block
    /// must stay live for every later read through this handle.
    pub unsafe fn from_raw(ptr: *mut u16) -> Self {
        if ptr.is_null() {
            return Self::null();
        }
        let base = ptr.cast::<u8>().wrapping_sub(PREFIX_LEN);
        Self {
            block: None,
            value: ForeignPtr::new(base, PREFIX_LEN),
        }
    }

    /// Whether this is the null handle.
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// The `BSTR` value itself: the payload address, or null.
    pub fn as_ptr(&self) -> *const u16 {
        self.value.addr().cast::<u16>().cast_const()
    }

    /// The offset-aware handle (payload address plus its prefix window).
    pub fn handle(&self) -> ForeignPtr {
        self.value
    }

    /// The backing block, when this instance owns one.
    pub fn block(&self) -> Option<&Memory> {
        self.block.as_ref()
    }

    /// Releases the backing block to the caller, consuming the wrapper.
    /// Unowned handles yield `None`.
    pub fn into_block(mut self) -> Option<Memory> {
        self.block.take()
    }

    /// Releases ownership and returns the raw payload address.
    ///
    /// Nothing frees the block afterwards. Reclaim it by rebuilding the
    /// base address (`address - 4`) and size (`4 + prefix + 2`) and calling
    /// [`Memory::from_raw_parts`].
    pub fn into_raw(mut self) -> *mut u16 {
        if let Some(block) = self.block.take() {
            let _ = block.into_raw_parts();
        }
        self.value.addr().cast::<u16>()
    }

    /// Reads the length prefix and validates it as a payload byte count.
    fn prefix(&self) -> Result<usize> {
        // Non-null handles carry four readable prefix bytes, per the
        // construction and `from_raw` contracts.
        let prefix = unsafe { self.value.read_i32(-(PREFIX_LEN as isize)) };
        match usize::try_from(prefix) {
            Ok(byte_len) if byte_len % 2 == 0 => Ok(byte_len),
            _ => Err(MarshalError::InvalidPrefix(prefix)),
        }
    }

    /// Payload size in bytes, read from the length prefix. The null handle
    /// reports 0.
    pub fn byte_len(&self) -> Result<usize> {
        if self.is_null() {
            return Ok(0);
        }
        self.prefix()
    }

    /// Payload length in UTF-16 code units. The null handle reports 0.
    pub fn len(&self) -> Result<usize> {
        Ok(self.byte_len()? / 2)
    }

    /// Whether the payload is empty. The null handle is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.byte_len()? == 0)
    }

    /// Decodes the payload to a `String`.
    ///
    /// The null handle decodes as the empty string. The read is governed
    /// by the length prefix alone; interior zero units are payload, not
    /// terminators. Malformed UTF-16LE (an unpaired surrogate) is an
    /// [`MarshalError::Encoding`] error, never a silent substitution.
    pub fn value(&self) -> Result<String> {
        if self.is_null() {
            return Ok(String::new());
        }
        let units = self.payload_units()?;
        Ok(String::from_utf16(&units)?)
    }

    /// Best-effort decode: malformed UTF-16LE becomes U+FFFD, and a handle
    /// whose prefix is unusable decodes as the empty string.
    pub fn to_string_lossy(&self) -> String {
        if self.is_null() {
            return String::new();
        }
        match self.payload_units() {
            Ok(units) => String::from_utf16_lossy(&units),
            Err(_) => String::new(),
        }
    }

    fn payload_units(&self) -> Result<Vec<u16>> {
        let byte_len = self.prefix()?;
        // Same contract as `prefix`: the payload spans `byte_len` readable
        // bytes behind the handle.
        let bytes = unsafe { self.value.read_bytes(0, byte_len) };
        Ok(bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect())
    }

    /// Borrows the payload as a `PCWSTR` for Win32 signatures.
    #[cfg(windows)]
    pub fn as_pcwstr(&self) -> windows::core::PCWSTR {
        windows::core::PCWSTR::from_raw(self.as_ptr())
    }
}

/// A pointer-sized foreign cell holding a `BSTR` handle address.
///
/// This is the by-reference form COM out-parameters traffic in: the caller
/// passes the cell's address, the callee writes a payload address into it.
/// The cell stores a bare address. It does not keep any block alive, and
/// storing a new address never frees the previous target; freeing remains
/// wherever block ownership already was.
#[derive(Debug)]
pub struct BstrByRef {
    cell: Memory,
}

impl BstrByRef {
    /// Allocates a zeroed cell, holding the null handle.
    pub fn new() -> Result<Self> {
        Ok(Self {
            cell: Memory::new(std::mem::size_of::<*mut u16>())?,
        })
    }

    /// Allocates a cell holding `value`'s handle address.
    pub fn with(value: &Bstr) -> Result<Self> {
        let mut cell = Self::new()?;
        cell.set(value);
        Ok(cell)
    }

    /// Stores `value`'s handle address in the cell.
    ///
    /// Only the address is recorded; the cell does not keep `value`'s
    /// block alive. Dropping `value` while the cell still points at it
    /// leaves a dangling address behind, which is why [`BstrByRef::get`]
    /// is unsafe.
    pub fn set(&mut self, value: &Bstr) {
        let addr = value.as_ptr() as usize;
        self.cell.bytes_mut().copy_from_slice(&addr.to_le_bytes());
    }

    /// Rebuilds a non-owning handle from the address the cell holds.
    ///
    /// # Safety
    ///
    /// The stored address must be null or still reference a live
    /// BSTR-shaped block, as for [`Bstr::from_raw`].
    pub unsafe fn get(&self) -> Bstr {
        let mut buf = [0u8; std::mem::size_of::<usize>()];
        buf.copy_from_slice(self.cell.bytes());
        let addr = usize::from_le_bytes(buf) as *mut u16;
        unsafe { Bstr::from_raw(addr) }
    }

    /// Decodes the string behind the cell in one step.
    ///
    /// # Safety
    ///
    /// As for [`BstrByRef::get`].
    pub unsafe fn to_string(&self) -> Result<String> {
        unsafe { self.get() }.value()
    }

    /// The out-parameter view of the cell: a pointer COM can write a
    /// `BSTR` handle through.
    pub fn as_out_ptr(&mut self) -> *mut *mut u16 {
        self.cell.as_mut_ptr().cast::<*mut u16>()
    }
}
