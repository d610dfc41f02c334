use std::ptr;

/// An address into foreign memory that remembers where its block begins.
///
/// A handle records the base of the block it was derived from plus the byte
/// offset it sits at; the address it denotes is `base + offset`. COM string
/// types hand out payload addresses while keeping metadata in front of
/// them, so readers here take a *signed* offset relative to the address: a
/// `BSTR` length prefix is `read_i32(-4)` on a handle created with offset 4.
///
/// The offset is also the hard lower bound. A read may reach at most
/// `offset` bytes behind the address; anything further would leave the
/// block, and the reader panics instead of dereferencing. The upper bound
/// cannot be recorded in a bare address and stays part of each reader's
/// safety contract.
///
/// Handles never own or free memory and do not keep their block alive.
#[derive(Clone, Copy, Debug)]
pub struct ForeignPtr {
    base: *mut u8,
    offset: usize,
}

impl ForeignPtr {
    /// The null handle.
    pub const fn null() -> Self {
        Self {
            base: ptr::null_mut(),
            offset: 0,
        }
    }

    /// Builds a handle from a block base and the byte offset of the
    /// addressed value within that block.
    pub const fn new(base: *mut u8, offset: usize) -> Self {
        Self { base, offset }
    }

    /// Whether this is the null handle.
    pub const fn is_null(self) -> bool {
        self.base.is_null()
    }

    /// The address this handle denotes: `base + offset`, or null for the
    /// null handle.
    pub fn addr(self) -> *mut u8 {
        if self.base.is_null() {
            return ptr::null_mut();
        }
        self.base.wrapping_add(self.offset)
    }

    /// Base address of the block the handle was derived from.
    pub const fn base(self) -> *mut u8 {
        self.base
    }

    /// Byte offset of the addressed value within its block.
    pub const fn offset(self) -> usize {
        self.offset
    }

    /// Resolves `at` bytes relative to the address, panicking when the
    /// result would land in front of the block base.
    fn resolve(self, at: isize) -> *const u8 {
        assert!(!self.base.is_null(), "access through a null foreign handle");
        let rel = isize::try_from(self.offset)
            .ok()
            .and_then(|offset| offset.checked_add(at));
        match rel {
            Some(rel) if rel >= 0 => self.base.wrapping_offset(rel).cast_const(),
            _ => panic!(
                "relative offset {at} reaches in front of the block base (payload offset {})",
                self.offset
            ),
        }
    }

    /// Reads a little-endian `i32` at `at` bytes relative to the address.
    ///
    /// # Safety
    ///
    /// The handle must be non-null, its block still live, and the four
    /// bytes at `address + at` readable.
    pub unsafe fn read_i32(self, at: isize) -> i32 {
        let mut buf = [0u8; 4];
        unsafe { ptr::copy_nonoverlapping(self.resolve(at), buf.as_mut_ptr(), 4) };
        i32::from_le_bytes(buf)
    }

    /// Reads a little-endian `u16` at `at` bytes relative to the address.
    ///
    /// # Safety
    ///
    /// The handle must be non-null, its block still live, and the two
    /// bytes at `address + at` readable.
    pub unsafe fn read_u16(self, at: isize) -> u16 {
        let mut buf = [0u8; 2];
        unsafe { ptr::copy_nonoverlapping(self.resolve(at), buf.as_mut_ptr(), 2) };
        u16::from_le_bytes(buf)
    }

    /// Copies `len` bytes starting `at` bytes relative to the address.
    ///
    /// # Safety
    ///
    /// The handle must be non-null, its block still live, and the whole
    /// `len`-byte range readable.
    pub unsafe fn read_bytes(self, at: isize, len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        unsafe { ptr::copy_nonoverlapping(self.resolve(at), buf.as_mut_ptr(), len) };
        buf
    }

    /// Reads UTF-16LE code units from `at` bytes relative to the address up
    /// to, not including, the first zero unit.
    ///
    /// # Safety
    ///
    /// The handle must be non-null, its block still live, and a zero unit
    /// must exist before the readable range ends; the scan stops nowhere
    /// else.
    pub unsafe fn read_wide_string(self, at: isize) -> Vec<u16> {
        let mut units = Vec::new();
        let mut pos = at;
        loop {
            let unit = unsafe { self.read_u16(pos) };
            if unit == 0 {
                return units;
            }
            units.push(unit);
            pos += 2;
        }
    }
}

impl Default for ForeignPtr {
    fn default() -> Self {
        Self::null()
    }
}
