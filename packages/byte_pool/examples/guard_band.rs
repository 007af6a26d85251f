//! Guard band example: deliberate overrun scratch space past the logical end.
//!
//! A guard band is reserved but invisible to bounds-checked access. Disabling
//! bounds checking widens the validated window over the guard band, which is
//! useful for code that intentionally reads or writes past the logical end,
//! such as block-wise transforms with a fixed stride.

use byte_pool::{BytePool, OnHeap};

fn main() {
    // With bounds checking on, the guard band is reserved but unreachable.
    let checked = BytePool::<32, 16, OnHeap>::new();

    println!(
        "checked pool: len = {}, allocated = {}",
        checked.len(),
        checked.allocated()
    );
    println!(
        "checked access at the logical end: {:?}",
        checked.get::<u8>(32).is_some()
    );

    // With bounds checking off, the window extends over the guard band.
    let mut scratch = BytePool::<32, 16, OnHeap, false>::new();

    println!(
        "unchecked pool window: {} bytes",
        scratch.as_slice().len()
    );

    // A write that runs 8 bytes past the logical end lands in the guard band.
    let wrote = scratch.fill_range(0xFF, 24, 16);
    println!("write straddling the logical end succeeded: {wrote}");

    // Writes past the guard band are still rejected - the physical
    // allocation is never exceeded.
    let wrote_past = scratch.fill_range(0xFF, 40, 16);
    println!("write past the guard band succeeded: {wrote_past}");

    let logical_tail = scratch.as_slice()[28..32].to_vec();
    let guard_head = scratch.as_slice()[32..36].to_vec();
    println!("bytes around the logical end: {logical_tail:?} | {guard_head:?}");
}
