//! Placement construction example: destructor-bearing values inside a pool.
//!
//! The pool is a raw arena - it tracks no object liveness. Every `create`
//! must be paired with exactly one `destroy` at the same offset.

use byte_pool::BytePool;

fn main() {
    let mut pool = BytePool::<256>::new();

    // Place two Strings at aligned byte offsets.
    // SAFETY: the slots hold no live objects and String has no padding.
    let first = unsafe { pool.create::<String>(0, "first".to_string()) };
    // SAFETY: as above.
    let second = unsafe { pool.create::<String>(32, "second".to_string()) };
    println!("placed two strings: {first}, {second}");

    // Read them back through typed pointers.
    let slot = pool.get::<String>(0).expect("offset is in range");
    // SAFETY: a live String was placed at this aligned offset above.
    println!("slot 0 holds: {:?}", unsafe { slot.as_ref() });

    let slot = pool.at::<String>(1, 8).expect("offset is in range");
    // SAFETY: byte offset 32 holds the second live String.
    println!("slot at byte 32 holds: {:?}", unsafe { slot.as_ref() });

    // Misaligned or out-of-range placements are rejected with no effect.
    // SAFETY: rejected placements write nothing.
    let misaligned = unsafe { pool.create::<String>(3, "nope".to_string()) };
    println!("misaligned placement accepted: {misaligned}");

    // Every create is paired with exactly one destroy.
    // SAFETY: destroys the values created above, exactly once each.
    unsafe {
        assert!(pool.destroy::<String>(0));
        assert!(pool.destroy::<String>(32));
    }
    println!("both strings destroyed; the pool memory remains usable");

    pool.clear();
    println!("pool cleared: first byte = {}", pool[0]);
}
