//! Terminator-delimited wide string (`LPSTR`, `LPWSTR`, `LPOLESTR`)
//! marshaling.
//!
//! One codec serves all three names; the trio exists for matching interop
//! signatures, not for behavioral difference. Block layout is
//! `[UTF-16LE payload][00 00]` with no length prefix, so the terminator is
//! the only end marker and interior U+0000 cannot be carried.

use wtypes_memory::{ForeignPtr, Memory, MemoryError};

use crate::error::Result;

/// Shared core of the three nominal wide-string types.
#[derive(Debug, Default)]
struct WideString {
    /// Backing block, present when this instance allocated it.
    block: Option<Memory>,
    value: ForeignPtr,
}

impl WideString {
    const fn null() -> Self {
        Self {
            block: None,
            value: ForeignPtr::null(),
        }
    }

    fn new(text: &str) -> Result<Self> {
        // Sized by UTF-16 code units, so astral-plane characters get both
        // their surrogate slots.
        let units = text.encode_utf16().count();
        let size = units
            .checked_add(1)
            .and_then(|units| units.checked_mul(2))
            .ok_or(MemoryError::InvalidSize { size: usize::MAX })?;
        let mut block = Memory::new(size)?;
        block.write_wide_string(0, text)?;
        let value = block.share(0)?;
        Ok(Self {
            block: Some(block),
            value,
        })
    }

    unsafe fn from_raw(ptr: *mut u16) -> Self {
        if ptr.is_null() {
            return Self::null();
        }
        Self {
            block: None,
            value: ForeignPtr::new(ptr.cast::<u8>(), 0),
        }
    }

    fn value(&self) -> Result<Option<String>> {
        if self.value.is_null() {
            return Ok(None);
        }
        // The scan ends at the terminator written at construction, or at
        // the one promised by the `from_raw` contract.
        let units = unsafe { self.value.read_wide_string(0) };
        Ok(Some(String::from_utf16(&units)?))
    }

    fn to_string_lossy(&self) -> Option<String> {
        if self.value.is_null() {
            return None;
        }
        let units = unsafe { self.value.read_wide_string(0) };
        Some(String::from_utf16_lossy(&units))
    }

    fn is_null(&self) -> bool {
        self.value.is_null()
    }

    fn as_ptr(&self) -> *const u16 {
        self.value.addr().cast::<u16>().cast_const()
    }

    fn handle(&self) -> ForeignPtr {
        self.value
    }

    fn block(&self) -> Option<&Memory> {
        self.block.as_ref()
    }

    fn into_block(mut self) -> Option<Memory> {
        self.block.take()
    }

    fn into_raw(mut self) -> *mut u16 {
        if let Some(block) = self.block.take() {
            let _ = block.into_raw_parts();
        }
        self.value.addr().cast::<u16>()
    }
}

macro_rules! wide_string_type {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        ///
        /// The buffer holds UTF-16LE code units followed by a zero
        /// terminator; the handle addresses the first unit. A null handle
        /// is "no string", decoded as `None` and distinct from the empty
        /// string, which is a live buffer holding only the terminator.
        ///
        /// Constructors allocate a fresh owned block that is freed on
        /// drop; handles rebuilt with `from_raw` own nothing and never
        /// free.
        #[derive(Debug, Default)]
        pub struct $name(WideString);

        impl $name {
            /// The null handle. Decodes as `None` without allocating.
            pub const fn null() -> Self {
                Self(WideString::null())
            }

            /// Marshals `text` into a freshly allocated block, sized by
            /// UTF-16 code units plus the terminator.
            ///
            /// Text containing U+0000 is rejected; this layout has no way
            /// to carry it past the terminator scan.
            pub fn new(text: &str) -> Result<Self> {
                Ok(Self(WideString::new(text)?))
            }

            /// Marshals `text`, mapping absent text to the null handle.
            pub fn from_option(text: Option<&str>) -> Result<Self> {
                match text {
                    Some(text) => Self::new(text),
                    None => Ok(Self::null()),
                }
            }

            /// Rebuilds a handle from a raw wide-string address.
            ///
            /// The result borrows the foreign allocation and will never
            /// free it. A null `ptr` yields the null handle.
            ///
            /// # Safety
            ///
            /// A non-null `ptr` must address a live, zero-terminated
            /// UTF-16LE buffer that stays live for every later read
            /// through this handle.
            pub unsafe fn from_raw(ptr: *mut u16) -> Self {
                Self(unsafe { WideString::from_raw(ptr) })
            }

            /// Decodes the buffer, `None` for the null handle.
            ///
            /// Malformed UTF-16LE (an unpaired surrogate) is an error,
            /// never a silent substitution.
            pub fn value(&self) -> Result<Option<String>> {
                self.0.value()
            }

            /// Best-effort decode: malformed UTF-16LE becomes U+FFFD.
            /// `None` for the null handle.
            pub fn to_string_lossy(&self) -> Option<String> {
                self.0.to_string_lossy()
            }

            /// Whether this is the null handle.
            pub fn is_null(&self) -> bool {
                self.0.is_null()
            }

            /// The wide-string address COM signatures traffic in, or null.
            pub fn as_ptr(&self) -> *const u16 {
                self.0.as_ptr()
            }

            /// The offset-aware handle.
            pub fn handle(&self) -> ForeignPtr {
                self.0.handle()
            }

            /// The backing block, when this instance owns one.
            pub fn block(&self) -> Option<&Memory> {
                self.0.block()
            }

            /// Releases the backing block to the caller, consuming the
            /// wrapper. Unowned handles yield `None`.
            pub fn into_block(self) -> Option<Memory> {
                self.0.into_block()
            }

            /// Releases ownership and returns the raw buffer address.
            ///
            /// Nothing frees the block afterwards. Reclaim it with
            /// [`Memory::from_raw_parts`] and the terminated buffer's
            /// size.
            pub fn into_raw(self) -> *mut u16 {
                self.0.into_raw()
            }

            /// Borrows the buffer as a `PCWSTR` for Win32 signatures.
            #[cfg(windows)]
            pub fn as_pcwstr(&self) -> windows::core::PCWSTR {
                windows::core::PCWSTR::from_raw(self.as_ptr())
            }
        }
    };
}

wide_string_type!(
    /// A zero-terminated wide string under the `LPSTR` name.
    ///
    /// Nominally the ANSI string alias, but this marshaling layer carries
    /// it as UTF-16LE like its siblings; the name exists to line up with
    /// signatures spelled `LPSTR`.
    Lpstr
);

wide_string_type!(
    /// A zero-terminated UTF-16LE string (`LPWSTR`).
    Lpwstr
);

wide_string_type!(
    /// A zero-terminated UTF-16LE string under COM's `LPOLESTR` name.
    Lpolestr
);
