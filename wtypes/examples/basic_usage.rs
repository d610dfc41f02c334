//! Basic usage example for wtypes
//!
//! This example walks through the marshaled COM/OLE types: building them
//! from Rust strings, inspecting the foreign blocks behind them, and the
//! by-reference cells used for out-parameters.

use wtypes::{Bstr, BstrByRef, Lpwstr, VT_BSTR, VarType, VarTypeByRef};

fn main() -> wtypes::Result<()> {
    println!("wtypes - COM/OLE Marshaling Patterns");
    println!("====================================");

    // Example 1: BSTR construction and layout
    println!("\n1. BSTR construction:");
    println!("   - Block layout: [i32 byte length][UTF-16LE payload][00 00]");
    println!("   - The handle addresses the payload, 4 bytes past the base");

    let greeting = Bstr::new("Hello, COM")?;
    println!("   Prefix (payload bytes): {}", greeting.byte_len()?);
    println!("   Code units:             {}", greeting.len()?);
    if let Some(block) = greeting.block() {
        println!("   Block bytes:            {:02X?}", block.bytes());
    }
    println!("   Decoded:                {:?}", greeting.value()?);

    // Example 2: the null BSTR is the canonical empty string
    println!("\n2. Null BSTR:");
    let null = Bstr::null();
    println!("   null: {}, decodes as: {:?}", null.is_null(), null.value()?);

    // Example 3: BSTR by-reference cell (out-parameter pattern)
    println!("\n3. BSTR out-parameter cell:");
    println!("   - The cell stores a handle address; it never frees the target");
    let mut cell = BstrByRef::new()?;
    cell.set(&greeting);
    // SAFETY: `greeting` is still alive, so the stored address is valid.
    println!("   Cell resolves to: {:?}", unsafe { cell.to_string()? });

    // Example 4: wide strings distinguish null from empty
    println!("\n4. Wide strings (LPWSTR):");
    let wide = Lpwstr::new("wide text")?;
    let absent = Lpwstr::null();
    println!("   Present: {:?}", wide.value()?);
    println!("   Absent:  {:?}", absent.value()?);
    println!("   Empty:   {:?}", Lpwstr::new("")?.value()?);

    // Example 5: variant type tags and their 2-byte cell
    println!("\n5. VARTYPE tags:");
    let mut tag_cell = VarTypeByRef::with(VT_BSTR)?;
    println!("   Cell holds: {:?}", tag_cell.get());
    tag_cell.set(VarType::new(0x0001_0005));
    println!("   Wide input truncates to 16 bits: {:?}", tag_cell.get());

    // Example 6: ownership transfer
    println!("\n6. Ownership:");
    println!("   - Constructors allocate a fresh owned block, freed on drop");
    println!("   - into_raw/into_block defer the release to the caller");
    println!("   - from_raw rebuilds a view that never frees");
    {
        let scoped = Bstr::new("freed at scope end")?;
        println!("   Scoped BSTR: {:?}", scoped.value()?);
    } // block released here

    println!("\n7. Example completed successfully!");
    Ok(())
}
