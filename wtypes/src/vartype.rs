//! 16-bit variant type tags (`VARTYPE`) and the `VT_*` catalog.

use wtypes_memory::Memory;

use crate::error::Result;

/// The 16-bit tag naming a COM variant's runtime type.
///
/// Layout-compatible with the wire representation: `#[repr(transparent)]`
/// over `u16`, little-endian in foreign cells. The default tag is
/// [`VT_EMPTY`].
#[repr(transparent)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarType(pub u16);

impl VarType {
    /// Wraps a tag value, keeping only the low 16 bits.
    ///
    /// Tags are 16-bit on the wire; a wider input is truncated, so
    /// `VarType::new(0x0001_0005)` is the same tag as `VarType::new(5)`.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(value: u32) -> Self {
        Self(value as u16)
    }

    /// The raw tag value.
    pub const fn value(self) -> u16 {
        self.0
    }

    /// The base type with the [`VT_VECTOR`]/[`VT_ARRAY`]/[`VT_BYREF`]
    /// modifier bits stripped.
    pub const fn base(self) -> Self {
        Self(self.0 & VT_TYPEMASK.0)
    }
}

impl From<u16> for VarType {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<VarType> for u16 {
    fn from(tag: VarType) -> Self {
        tag.0
    }
}

impl std::ops::BitOr for VarType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for VarType {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

pub const VT_EMPTY: VarType = VarType::new(0);
pub const VT_NULL: VarType = VarType::new(1);
pub const VT_I2: VarType = VarType::new(2);
pub const VT_I4: VarType = VarType::new(3);
pub const VT_R4: VarType = VarType::new(4);
pub const VT_R8: VarType = VarType::new(5);
pub const VT_CY: VarType = VarType::new(6);
pub const VT_DATE: VarType = VarType::new(7);
pub const VT_BSTR: VarType = VarType::new(8);
pub const VT_DISPATCH: VarType = VarType::new(9);
pub const VT_ERROR: VarType = VarType::new(10);
pub const VT_BOOL: VarType = VarType::new(11);
pub const VT_VARIANT: VarType = VarType::new(12);
pub const VT_UNKNOWN: VarType = VarType::new(13);
pub const VT_DECIMAL: VarType = VarType::new(14);
pub const VT_I1: VarType = VarType::new(16);
pub const VT_UI1: VarType = VarType::new(17);
pub const VT_UI2: VarType = VarType::new(18);
pub const VT_UI4: VarType = VarType::new(19);
pub const VT_I8: VarType = VarType::new(20);
pub const VT_UI8: VarType = VarType::new(21);
pub const VT_INT: VarType = VarType::new(22);
pub const VT_UINT: VarType = VarType::new(23);
pub const VT_VOID: VarType = VarType::new(24);
pub const VT_HRESULT: VarType = VarType::new(25);
pub const VT_PTR: VarType = VarType::new(26);
pub const VT_SAFEARRAY: VarType = VarType::new(27);
pub const VT_CARRAY: VarType = VarType::new(28);
pub const VT_USERDEFINED: VarType = VarType::new(29);
pub const VT_LPSTR: VarType = VarType::new(30);
pub const VT_LPWSTR: VarType = VarType::new(31);
pub const VT_RECORD: VarType = VarType::new(36);
pub const VT_INT_PTR: VarType = VarType::new(37);
pub const VT_UINT_PTR: VarType = VarType::new(38);
pub const VT_FILETIME: VarType = VarType::new(64);
pub const VT_BLOB: VarType = VarType::new(65);
pub const VT_STREAM: VarType = VarType::new(66);
pub const VT_STORAGE: VarType = VarType::new(67);
pub const VT_STREAMED_OBJECT: VarType = VarType::new(68);
pub const VT_STORED_OBJECT: VarType = VarType::new(69);
pub const VT_BLOB_OBJECT: VarType = VarType::new(70);
pub const VT_CF: VarType = VarType::new(71);
pub const VT_CLSID: VarType = VarType::new(72);
pub const VT_VERSIONED_STREAM: VarType = VarType::new(73);
pub const VT_BSTR_BLOB: VarType = VarType::new(0xFFF);

// Modifier and mask bits.
pub const VT_VECTOR: VarType = VarType::new(0x1000);
pub const VT_ARRAY: VarType = VarType::new(0x2000);
pub const VT_BYREF: VarType = VarType::new(0x4000);
pub const VT_RESERVED: VarType = VarType::new(0x8000);
pub const VT_ILLEGAL: VarType = VarType::new(0xFFFF);
pub const VT_ILLEGALMASKED: VarType = VarType::new(0xFFF);
pub const VT_TYPEMASK: VarType = VarType::new(0xFFF);

/// A 2-byte foreign cell holding a [`VarType`] tag.
///
/// The by-reference form for out-parameters: APIs that report a variant
/// type write the tag through the cell's address, and [`VarTypeByRef::get`]
/// reads back whatever is there. The cell owns its 2 bytes and frees them
/// on drop.
#[derive(Debug)]
pub struct VarTypeByRef {
    cell: Memory,
}

impl VarTypeByRef {
    /// Allocates a zeroed cell, which reads back as [`VT_EMPTY`].
    pub fn new() -> Result<Self> {
        Ok(Self {
            cell: Memory::new(2)?,
        })
    }

    /// Allocates a cell initialized to `tag`.
    pub fn with(tag: VarType) -> Result<Self> {
        let mut cell = Self::new()?;
        cell.set(tag);
        Ok(cell)
    }

    /// Allocates a cell initialized to a raw tag value.
    pub fn with_raw(value: u16) -> Result<Self> {
        Self::with(VarType::from(value))
    }

    /// Writes `tag` into the cell.
    pub fn set(&mut self, tag: VarType) {
        self.cell
            .bytes_mut()
            .copy_from_slice(&tag.value().to_le_bytes());
    }

    /// Reads the tag currently in the cell.
    pub fn get(&self) -> VarType {
        let bytes = self.cell.bytes();
        VarType(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// The out-parameter view of the cell: a pointer an API can write a
    /// tag through.
    pub fn as_out_ptr(&mut self) -> *mut u16 {
        self.cell.as_mut_ptr().cast::<u16>()
    }
}
