//! Basic usage example for `BytePool`.
//!
//! Demonstrates byte-level access, typed bulk copies and the value semantics
//! of fixed-capacity pools.

use byte_pool::{BytePool, OnStack};

fn main() {
    // 256 logical bytes stored inline in the pool value.
    let mut pool = BytePool::<256, 0, OnStack>::new();

    println!(
        "Created a pool of {} bytes ({} physically reserved)",
        pool.len(),
        pool.allocated()
    );

    // Paint the buffer and mark the corners.
    pool.fill(42);
    pool[0] = 16;
    pool[255] = 64;

    println!("pool[0] = {}, pool[1] = {}, pool[255] = {}", pool[0], pool[1], pool[255]);

    // Copy typed data into the middle of the buffer.
    let copied = pool.set::<u32>(8, &[0x1111_1111, 0x2222_2222]);
    println!("Copied two u32 values at element offset 8: {copied}");

    let element = pool.get::<u32>(9).expect("offset is in range");
    // SAFETY: the pointer is in range and aligned for u32.
    let value = unsafe { element.read() };
    println!("Read back element 9: {value:#010x}");

    // Clones are deep copies; mutating one side never affects the other.
    let mut copy = pool.clone();
    copy.fill(0);

    println!(
        "After clearing the clone, the original still holds pool[1] = {}",
        pool[1]
    );
    println!("Pools compare as {:?}", pool.compare(&copy));
}
