use super::*;

#[test]
fn test_new_block_is_zero_filled() {
    let block = Memory::new(16).unwrap();
    assert_eq!(block.len(), 16);
    assert!(!block.is_empty());
    assert!(block.bytes().iter().all(|byte| *byte == 0));
}

#[test]
fn test_zero_size_block_is_rejected() {
    let result = Memory::new(0);
    assert!(matches!(
        result,
        Err(MemoryError::InvalidSize { size: 0 })
    ));
}

#[test]
fn test_i32_accessors_are_little_endian() {
    let mut block = Memory::new(8).unwrap();
    block.write_i32(0, 0x0102_0304).unwrap();
    assert_eq!(&block.bytes()[..4], &[0x04, 0x03, 0x02, 0x01]);
    assert_eq!(block.read_i32(0).unwrap(), 0x0102_0304);

    block.write_i32(4, -1).unwrap();
    assert_eq!(&block.bytes()[4..], &[0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(block.read_i32(4).unwrap(), -1);
}

#[test]
fn test_u16_accessors_are_little_endian() {
    let mut block = Memory::new(4).unwrap();
    block.write_u16(2, 0xABCD).unwrap();
    assert_eq!(&block.bytes()[2..], &[0xCD, 0xAB]);
    assert_eq!(block.read_u16(2).unwrap(), 0xABCD);
}

#[test]
fn test_byte_accessors_round_trip() {
    let mut block = Memory::new(6).unwrap();
    block.write_bytes(1, &[0x41, 0x42, 0x43]).unwrap();
    assert_eq!(block.read_bytes(1, 3).unwrap(), vec![0x41, 0x42, 0x43]);
    assert_eq!(block.bytes(), &[0x00, 0x41, 0x42, 0x43, 0x00, 0x00]);
}

#[test]
fn test_out_of_bounds_access_is_rejected() {
    let mut block = Memory::new(4).unwrap();
    assert!(matches!(
        block.read_i32(1),
        Err(MemoryError::OutOfBounds {
            offset: 1,
            len: 4,
            size: 4
        })
    ));
    assert!(matches!(
        block.write_u16(3, 7),
        Err(MemoryError::OutOfBounds { .. })
    ));
    assert!(matches!(
        block.read_bytes(0, 5),
        Err(MemoryError::OutOfBounds { .. })
    ));
    // Offsets that would overflow the end computation are out of bounds,
    // not a wrap-around back into the block.
    assert!(matches!(
        block.read_bytes(usize::MAX, 2),
        Err(MemoryError::OutOfBounds { .. })
    ));
    // A zero-length read at the end of the block is still in bounds.
    assert_eq!(block.read_bytes(4, 0).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_wide_string_round_trip() {
    let mut block = Memory::new(12).unwrap();
    block.write_wide_string(0, "abcde").unwrap();
    assert_eq!(
        block.read_wide_string(0).unwrap(),
        "abcde".encode_utf16().collect::<Vec<u16>>()
    );
    // Terminator sits right after the last code unit.
    assert_eq!(block.read_u16(10).unwrap(), 0);
}

#[test]
fn test_wide_string_write_is_atomic_on_overflow() {
    let mut block = Memory::new(4).unwrap();
    let result = block.write_wide_string(0, "too long");
    assert!(matches!(result, Err(MemoryError::OutOfBounds { .. })));
    assert!(block.bytes().iter().all(|byte| *byte == 0));
}

#[test]
fn test_wide_string_rejects_interior_nul() {
    let mut block = Memory::new(16).unwrap();
    let result = block.write_wide_string(0, "ab\0cd");
    assert!(matches!(result, Err(MemoryError::InteriorNul { at: 2 })));
    assert!(block.bytes().iter().all(|byte| *byte == 0));
}

#[test]
fn test_wide_string_scan_stops_at_block_end() {
    let mut block = Memory::new(6).unwrap();
    block.bytes_mut().fill(0xFF);
    assert!(matches!(
        block.read_wide_string(0),
        Err(MemoryError::OutOfBounds { .. })
    ));
}

#[test]
fn test_clear_zero_fills() {
    let mut block = Memory::new(8).unwrap();
    block.write_bytes(0, &[0xFF; 8]).unwrap();
    block.clear();
    assert!(block.bytes().iter().all(|byte| *byte == 0));
}

#[test]
fn test_share_produces_offset_handle() {
    let block = Memory::new(10).unwrap();
    let handle = block.share(4).unwrap();
    assert!(!handle.is_null());
    assert_eq!(handle.base(), block.as_ptr().cast_mut());
    assert_eq!(handle.offset(), 4);
    assert_eq!(handle.addr(), block.as_ptr().cast_mut().wrapping_add(4));

    // One-past-the-end is allowed, anything further is not.
    assert!(block.share(10).is_ok());
    assert!(matches!(
        block.share(11),
        Err(MemoryError::OutOfBounds { offset: 11, .. })
    ));
}

#[test]
fn test_null_handle() {
    let handle = ForeignPtr::null();
    assert!(handle.is_null());
    assert!(handle.addr().is_null());
    assert!(ForeignPtr::default().is_null());
}

#[test]
fn test_handle_reads_behind_the_address() {
    let mut block = Memory::new(10).unwrap();
    block.write_i32(0, 77).unwrap();
    block.write_u16(4, 0x0041).unwrap();
    let handle = block.share(4).unwrap();
    // The prefix read pattern: step back over the four bytes in front of
    // the payload.
    assert_eq!(unsafe { handle.read_i32(-4) }, 77);
    assert_eq!(unsafe { handle.read_u16(0) }, 0x0041);
    assert_eq!(unsafe { handle.read_bytes(-4, 4) }, vec![77, 0, 0, 0]);
}

#[test]
fn test_handle_reads_wide_string() {
    let mut block = Memory::new(10).unwrap();
    block.write_wide_string(0, "wide").unwrap();
    let handle = block.share(0).unwrap();
    let units = unsafe { handle.read_wide_string(0) };
    assert_eq!(String::from_utf16(&units).unwrap(), "wide");
}

#[test]
#[should_panic(expected = "in front of the block base")]
fn test_handle_refuses_to_read_before_base() {
    let block = Memory::new(8).unwrap();
    let handle = block.share(0).unwrap();
    let _ = unsafe { handle.read_i32(-4) };
}

#[test]
#[should_panic(expected = "null foreign handle")]
fn test_null_handle_refuses_to_read() {
    let _ = unsafe { ForeignPtr::null().read_u16(0) };
}

#[test]
fn test_raw_parts_round_trip() {
    let mut block = Memory::new(8).unwrap();
    block.write_i32(0, 42).unwrap();
    let (ptr, size) = block.into_raw_parts();
    assert_eq!(size, 8);

    let adopted = unsafe { Memory::from_raw_parts(ptr, size) };
    assert_eq!(adopted.read_i32(0).unwrap(), 42);
}
