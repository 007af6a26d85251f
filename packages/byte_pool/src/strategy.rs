use crate::storage::{AutoStorage, HeapStorage, InlineStorage, PoolStorage};

/// Determines where a [`BytePool`](crate::BytePool) places its byte buffer.
///
/// The strategy is part of the pool's type, so pools with different placements
/// are distinct types with distinct in-memory representations. Three
/// strategies are provided:
///
/// - [`OnStack`]: the buffer is stored inline in the pool value.
/// - [`OnHeap`]: the buffer is a single exclusively owned heap allocation.
/// - [`Automatic`]: resolved at construction based on the buffer size.
///
/// # Example
///
/// ```rust
/// use byte_pool::{BytePool, OnHeap, OnStack};
///
/// // 64 logical bytes, no guard band, stored inline.
/// let stack_pool = BytePool::<64, 0, OnStack>::new();
///
/// // Same dimensions, stored in one heap allocation.
/// let heap_pool = BytePool::<64, 0, OnHeap>::new();
///
/// assert_eq!(stack_pool.len(), heap_pool.len());
/// ```
pub trait Strategy {
    /// Backing storage used by pools of this strategy, for the given
    /// capacity and guard band.
    type Storage<const CAPACITY: usize, const GUARD_BAND: usize>: PoolStorage;
}

/// Places the buffer inline in the pool value, with no dynamic allocation.
///
/// The pool value itself is as large as its [`allocated()`][a] byte count,
/// so a pool kept as a local variable consumes that much stack space. Large
/// inline pools are the caller's responsibility; [`Automatic`] picks the heap
/// for sizes where this becomes a concern.
///
/// [a]: crate::BytePool::allocated
#[derive(Debug)]
#[non_exhaustive]
pub struct OnStack;

impl Strategy for OnStack {
    type Storage<const CAPACITY: usize, const GUARD_BAND: usize> =
        InlineStorage<CAPACITY, GUARD_BAND>;
}

/// Places the buffer in a single exclusively owned heap allocation.
///
/// The pool value holds only the pointer and layout, so moving the pool is
/// O(1) and the buffer address is stable across moves. The allocation is
/// freed exactly once, when the pool is dropped.
#[derive(Debug)]
#[non_exhaustive]
pub struct OnHeap;

impl Strategy for OnHeap {
    type Storage<const CAPACITY: usize, const GUARD_BAND: usize> = HeapStorage;
}

/// Resolves the placement at construction: buffers up to a fixed threshold
/// (a few KB) are stored inline, larger buffers are heap-allocated.
///
/// The selection happens at run time inside a two-variant storage enum, as
/// stable Rust cannot pick a storage *type* from a comparison on a const
/// parameter. Consequently the pool value always reserves room for the
/// inline variant, even when the heap variant is active. Callers who need a
/// compact pool value for a large buffer should use [`OnHeap`] directly.
#[derive(Debug)]
#[non_exhaustive]
pub struct Automatic;

impl Strategy for Automatic {
    type Storage<const CAPACITY: usize, const GUARD_BAND: usize> =
        AutoStorage<CAPACITY, GUARD_BAND>;
}

#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    // The markers are pure type-level configuration but still participate in
    // diagnostics, so they must be debuggable.
    assert_impl_all!(OnStack: std::fmt::Debug, Send, Sync);
    assert_impl_all!(OnHeap: std::fmt::Debug, Send, Sync);
    assert_impl_all!(Automatic: std::fmt::Debug, Send, Sync);

    #[test]
    fn strategies_project_expected_storage() {
        fn is_inline<S: Strategy>() -> bool {
            <S::Storage<16, 0> as PoolStorage>::reserve(16).is_inline()
        }

        assert!(is_inline::<OnStack>());
        assert!(!is_inline::<OnHeap>());
        assert!(is_inline::<Automatic>());
    }
}
