use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::{ForeignPtr, MemoryError};

/// Alignment for every foreign block.
///
/// Covers pointer-sized cells and every prefix/payload layout carried here,
/// so accessors never have to reason about unaligned block bases.
const BLOCK_ALIGN: usize = 8;

/// An owned, zero-filled block of foreign memory.
///
/// The block is allocated through the global allocator and freed exactly
/// once, when the `Memory` is dropped. [`Memory::into_raw_parts`] transfers
/// that responsibility to the caller instead; [`Memory::from_raw_parts`]
/// takes it back.
///
/// All accessors are bounds-checked against the block and use little-endian
/// byte order, matching the wire layout of the COM string and tag types
/// built on top. Nothing here synchronizes; sharing one block across
/// threads is the caller's problem, which is why `Memory` is neither `Send`
/// nor `Sync`.
#[derive(Debug)]
pub struct Memory {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl Memory {
    /// Allocates a zero-filled block of `size` bytes.
    ///
    /// Zero-size blocks are rejected; a zero-size `VARTYPE` cell or string
    /// buffer has no meaning and the allocator cannot represent one.
    pub fn new(size: usize) -> Result<Self, MemoryError> {
        if size == 0 {
            return Err(MemoryError::InvalidSize { size });
        }
        let layout = Layout::from_size_align(size, BLOCK_ALIGN)
            .map_err(|_| MemoryError::InvalidSize { size })?;
        // Zero fill doubles as the string terminator and the null handle in
        // pointer cells.
        let Some(ptr) = NonNull::new(unsafe { alloc::alloc_zeroed(layout) }) else {
            return Err(MemoryError::AllocationFailed { size });
        };
        tracing::trace!(size, addr = ?ptr, "allocated foreign block");
        Ok(Self { ptr, layout })
    }

    /// Adopts a block previously released with [`Memory::into_raw_parts`].
    ///
    /// The returned `Memory` frees the block on drop, as if it had
    /// allocated it.
    ///
    /// # Safety
    ///
    /// `ptr` and `size` must come from [`Memory::into_raw_parts`], and the
    /// block must not be adopted twice.
    pub unsafe fn from_raw_parts(ptr: *mut u8, size: usize) -> Self {
        debug_assert!(!ptr.is_null());
        debug_assert!(size > 0);
        Self {
            ptr: unsafe { NonNull::new_unchecked(ptr) },
            layout: unsafe { Layout::from_size_align_unchecked(size, BLOCK_ALIGN) },
        }
    }

    /// Releases ownership of the block and returns its base address and
    /// size. The block is not freed until readopted via
    /// [`Memory::from_raw_parts`].
    pub fn into_raw_parts(self) -> (*mut u8, usize) {
        let parts = (self.ptr.as_ptr(), self.layout.size());
        std::mem::forget(self);
        parts
    }

    /// Size of the block in bytes.
    pub fn len(&self) -> usize {
        self.layout.size()
    }

    /// Always `false`; zero-size blocks cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.layout.size() == 0
    }

    /// Base address of the block.
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Mutable base address of the block.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// The whole block as a byte slice.
    pub fn bytes(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.layout.size()) }
    }

    /// The whole block as a mutable byte slice.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.layout.size()) }
    }

    /// Zero-fills the whole block.
    pub fn clear(&mut self) {
        self.bytes_mut().fill(0);
    }

    /// Derives an offset-aware handle addressing `offset` bytes into the
    /// block.
    ///
    /// `offset` may equal the block size (a one-past-the-end handle); any
    /// larger value is out of bounds. The handle does not keep the block
    /// alive.
    pub fn share(&self, offset: usize) -> Result<ForeignPtr, MemoryError> {
        if offset > self.layout.size() {
            return Err(MemoryError::OutOfBounds {
                offset,
                len: 0,
                size: self.layout.size(),
            });
        }
        Ok(ForeignPtr::new(self.ptr.as_ptr(), offset))
    }

    fn check(&self, offset: usize, len: usize) -> Result<(), MemoryError> {
        match offset.checked_add(len) {
            Some(end) if end <= self.layout.size() => Ok(()),
            _ => Err(MemoryError::OutOfBounds {
                offset,
                len,
                size: self.layout.size(),
            }),
        }
    }

    /// Reads a little-endian `i32` at `offset`.
    pub fn read_i32(&self, offset: usize) -> Result<i32, MemoryError> {
        self.check(offset, 4)?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&self.bytes()[offset..offset + 4]);
        Ok(i32::from_le_bytes(buf))
    }

    /// Writes `value` at `offset` as little-endian bytes.
    pub fn write_i32(&mut self, offset: usize, value: i32) -> Result<(), MemoryError> {
        self.check(offset, 4)?;
        self.bytes_mut()[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Reads a little-endian `u16` at `offset`.
    pub fn read_u16(&self, offset: usize) -> Result<u16, MemoryError> {
        self.check(offset, 2)?;
        let mut buf = [0u8; 2];
        buf.copy_from_slice(&self.bytes()[offset..offset + 2]);
        Ok(u16::from_le_bytes(buf))
    }

    /// Writes `value` at `offset` as little-endian bytes.
    pub fn write_u16(&mut self, offset: usize, value: u16) -> Result<(), MemoryError> {
        self.check(offset, 2)?;
        self.bytes_mut()[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Copies `len` bytes starting at `offset` out of the block.
    pub fn read_bytes(&self, offset: usize, len: usize) -> Result<Vec<u8>, MemoryError> {
        self.check(offset, len)?;
        Ok(self.bytes()[offset..offset + len].to_vec())
    }

    /// Copies `bytes` into the block starting at `offset`.
    pub fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<(), MemoryError> {
        self.check(offset, bytes.len())?;
        self.bytes_mut()[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Reads UTF-16LE code units from `offset` up to, not including, the
    /// first zero unit.
    ///
    /// The scan never leaves the block; a block with no terminator before
    /// its end is a [`MemoryError::OutOfBounds`] error.
    pub fn read_wide_string(&self, offset: usize) -> Result<Vec<u16>, MemoryError> {
        let mut units = Vec::new();
        let mut at = offset;
        loop {
            let unit = self.read_u16(at)?;
            if unit == 0 {
                return Ok(units);
            }
            units.push(unit);
            at += 2;
        }
    }

    /// Writes `text` at `offset` as UTF-16LE code units followed by a zero
    /// terminator.
    ///
    /// Text containing U+0000 is rejected before anything is written; a
    /// terminator-delimited layout cannot carry it. An undersized block
    /// also fails before anything is written.
    pub fn write_wide_string(&mut self, offset: usize, text: &str) -> Result<(), MemoryError> {
        if let Some(at) = text.encode_utf16().position(|unit| unit == 0) {
            return Err(MemoryError::InteriorNul { at });
        }
        let units = text.encode_utf16().count();
        let needed = units
            .checked_add(1)
            .and_then(|units| units.checked_mul(2))
            .ok_or(MemoryError::InvalidSize { size: usize::MAX })?;
        self.check(offset, needed)?;
        let mut at = offset;
        for unit in text.encode_utf16() {
            self.bytes_mut()[at..at + 2].copy_from_slice(&unit.to_le_bytes());
            at += 2;
        }
        self.bytes_mut()[at..at + 2].copy_from_slice(&[0, 0]);
        Ok(())
    }
}

impl Drop for Memory {
    fn drop(&mut self) {
        tracing::trace!(size = self.layout.size(), addr = ?self.ptr, "released foreign block");
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) };
    }
}
