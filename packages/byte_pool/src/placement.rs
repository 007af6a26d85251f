use std::mem::MaybeUninit;
use std::ptr::{self, NonNull};

use crate::pool::BytePool;
use crate::strategy::Strategy;

impl<const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool>
    BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
    /// Validates byte range and address alignment for placing one `T` at
    /// the given byte offset, returning the slot pointer.
    fn placement_slot<T>(&mut self, byte_offset: usize) -> Option<NonNull<T>> {
        const {
            assert!(size_of::<T>() != 0, "zero-sized element types are not supported");
        }

        let end = byte_offset.checked_add(size_of::<T>())?;
        if end > Self::LIMIT {
            return None;
        }

        let base = self.base_mut();

        // Cannot overflow: the address plus offset stays inside the allocation.
        let address = base.addr().get().wrapping_add(byte_offset);
        if address % align_of::<T>() != 0 {
            return None;
        }

        // SAFETY: byte_offset + size_of::<T>() <= LIMIT <= allocated bytes.
        Some(unsafe { base.byte_add(byte_offset) }.cast())
    }

    /// Resolves a `(major, minor)` pair for the placement family.
    fn placement_offset<T>(major: usize, minor: usize) -> Option<usize> {
        major
            .checked_mul(size_of::<T>())
            .and_then(|offset| offset.checked_add(minor))
    }

    /// Places one `T` at the given byte offset, taking ownership of `value`.
    ///
    /// Returns `false` - with no write performed - when the whole object
    /// does not fit inside the window or the resolved address is misaligned
    /// for `T`. On failure `value` is dropped.
    ///
    /// The pool does not track which slots hold live objects; this is a raw
    /// arena, not a managed slot allocator. Pair every successful `create`
    /// with exactly one [`destroy()`](Self::destroy) of the same type at the
    /// same offset.
    ///
    /// # Safety
    ///
    /// The caller must ensure that:
    /// - No live object that still requires destruction occupies the target
    ///   bytes (it would be overwritten without its destructor running).
    /// - If `T`'s representation contains padding, those padding bytes
    ///   become uninitialized and must not be observed through the byte-level
    ///   accessors until overwritten.
    ///
    /// # Example
    ///
    /// ```rust
    /// use byte_pool::BytePool;
    ///
    /// let mut pool = BytePool::<64>::new();
    ///
    /// // SAFETY: the slot holds no live object and String has no padding.
    /// let created = unsafe { pool.create::<String>(0, "hello".to_string()) };
    /// assert!(created);
    ///
    /// let slot = pool.get::<String>(0).expect("offset is in range");
    /// // SAFETY: a live String was placed at this aligned offset above.
    /// assert_eq!(unsafe { slot.as_ref() }, "hello");
    ///
    /// // SAFETY: destroys the String created above, exactly once.
    /// assert!(unsafe { pool.destroy::<String>(0) });
    /// ```
    #[must_use = "the success flag reports whether the operation happened"]
    pub unsafe fn create<T>(&mut self, offset: usize, value: T) -> bool {
        let Some(slot) = self.placement_slot::<T>(offset) else {
            return false;
        };

        // SAFETY: the slot is in range and aligned for T, checked above.
        unsafe { slot.write(value) };

        true
    }

    /// Places one `T` at `major` whole elements of `T` plus `minor` bytes.
    ///
    /// # Safety
    ///
    /// Same contract as [`create()`](Self::create).
    #[must_use = "the success flag reports whether the operation happened"]
    pub unsafe fn create_at<T>(&mut self, major: usize, minor: usize, value: T) -> bool {
        let Some(byte_offset) = Self::placement_offset::<T>(major, minor) else {
            return false;
        };

        // SAFETY: forwarding the caller's contract.
        unsafe { self.create(byte_offset, value) }
    }

    /// Places one `T` at the given byte offset using in-place
    /// initialization instead of a pre-built value.
    ///
    /// The closure receives the slot as `&mut MaybeUninit<T>` and is useful
    /// when constructing the value separately and moving it in would be
    /// wasteful, or when only part of the object should be initialized.
    ///
    /// Returns `false` - without invoking the closure - on a range or
    /// alignment violation.
    ///
    /// # Safety
    ///
    /// The contract of [`create()`](Self::create), and additionally: if the
    /// slot is to be treated as holding a live `T` afterwards (read via
    /// [`get()`](Self::get), destroyed via [`destroy()`](Self::destroy)),
    /// the closure must fully initialize the value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::mem::MaybeUninit;
    ///
    /// use byte_pool::BytePool;
    ///
    /// let mut pool = BytePool::<64>::new();
    ///
    /// // SAFETY: the closure fully initializes the value and the slot
    /// // holds no live object.
    /// let placed = unsafe {
    ///     pool.emplace::<u64>(8, |uninit: &mut MaybeUninit<u64>| {
    ///         uninit.write(0xFEED);
    ///     })
    /// };
    /// assert!(placed);
    ///
    /// let slot = pool.get::<u64>(1).expect("offset is in range");
    /// // SAFETY: in range, aligned, initialized above.
    /// assert_eq!(unsafe { slot.read() }, 0xFEED);
    /// ```
    #[must_use = "the success flag reports whether the operation happened"]
    pub unsafe fn emplace<T>(
        &mut self,
        offset: usize,
        init: impl FnOnce(&mut MaybeUninit<T>),
    ) -> bool {
        let Some(slot) = self.placement_slot::<T>(offset) else {
            return false;
        };

        let mut slot = slot.cast::<MaybeUninit<T>>();

        // SAFETY: the slot is in range and aligned; MaybeUninit imposes no
        // validity requirement on the existing bytes.
        init(unsafe { slot.as_mut() });

        true
    }

    /// In-place initialization at `major` whole elements of `T` plus
    /// `minor` bytes.
    ///
    /// # Safety
    ///
    /// Same contract as [`emplace()`](Self::emplace).
    #[must_use = "the success flag reports whether the operation happened"]
    pub unsafe fn emplace_at<T>(
        &mut self,
        major: usize,
        minor: usize,
        init: impl FnOnce(&mut MaybeUninit<T>),
    ) -> bool {
        let Some(byte_offset) = Self::placement_offset::<T>(major, minor) else {
            return false;
        };

        // SAFETY: forwarding the caller's contract.
        unsafe { self.emplace(byte_offset, init) }
    }

    /// Runs `T`'s destructor on the object at the given byte offset, without
    /// releasing the pool's memory.
    ///
    /// The slot remains part of the pool and simply no longer holds a live
    /// object. Returns `false` - with nothing dropped - on a range or
    /// alignment violation. Whether a live object actually exists at the
    /// offset is not tracked and cannot be detected here.
    ///
    /// # Safety
    ///
    /// A live `T`, placed by [`create()`](Self::create) or a fully
    /// initializing [`emplace()`](Self::emplace), must be at exactly this
    /// offset and must not have been destroyed already. After this call the
    /// object's bytes remain in the buffer but the object is dead; treat the
    /// slot as raw bytes again.
    #[must_use = "the success flag reports whether the operation happened"]
    pub unsafe fn destroy<T>(&mut self, offset: usize) -> bool {
        let Some(slot) = self.placement_slot::<T>(offset) else {
            return false;
        };

        // SAFETY: the caller guarantees a live T at this offset; range and
        // alignment were checked above.
        unsafe { ptr::drop_in_place(slot.as_ptr()) };

        true
    }

    /// Runs `T`'s destructor at `major` whole elements of `T` plus `minor`
    /// bytes.
    ///
    /// # Safety
    ///
    /// Same contract as [`destroy()`](Self::destroy).
    #[must_use = "the success flag reports whether the operation happened"]
    pub unsafe fn destroy_at<T>(&mut self, major: usize, minor: usize) -> bool {
        let Some(byte_offset) = Self::placement_offset::<T>(major, minor) else {
            return false;
        };

        // SAFETY: forwarding the caller's contract.
        unsafe { self.destroy::<T>(byte_offset) }
    }
}

#[cfg(test)]
#[allow(
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    type Pool = BytePool<64>;

    /// Test helper that counts how many times it has been dropped.
    struct DropCounter {
        drops: Rc<Cell<usize>>,
    }

    impl DropCounter {
        fn new() -> (Self, Rc<Cell<usize>>) {
            let drops = Rc::new(Cell::new(0));
            (
                Self {
                    drops: Rc::clone(&drops),
                },
                drops,
            )
        }
    }

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[test]
    fn create_then_get_reads_the_value_back() {
        let mut pool = Pool::new();

        assert!(unsafe { pool.create::<u64>(8, 0xABCD_EF01) });

        let slot = pool.get::<u64>(1).unwrap();
        assert_eq!(unsafe { slot.read() }, 0xABCD_EF01);

        assert!(unsafe { pool.destroy::<u64>(8) });
    }

    #[test]
    fn create_out_of_range_is_rejected_without_effects() {
        let mut pool = BytePool::<16>::new();
        pool.fill(0x3C);

        // The object would straddle the end of the window.
        assert!(!unsafe { pool.create::<u64>(12, 1) });
        assert!(!unsafe { pool.create::<u64>(16, 1) });
        assert!(pool.iter().all(|&byte| byte == 0x3C));
    }

    #[test]
    fn create_misaligned_is_rejected() {
        let mut pool = Pool::new();

        // The buffer base is 16-aligned, so offset 3 is misaligned for u64.
        assert!(!unsafe { pool.create::<u64>(3, 1) });
        assert!(unsafe { pool.create::<u64>(8, 1) });
        assert!(unsafe { pool.destroy::<u64>(8) });
    }

    #[test]
    fn create_with_non_trivial_type() {
        let mut pool = Pool::new();

        assert!(unsafe { pool.create::<String>(0, "in the pool".to_string()) });

        let slot = pool.get::<String>(0).unwrap();
        assert_eq!(unsafe { slot.as_ref() }, "in the pool");

        assert!(unsafe { pool.destroy::<String>(0) });
    }

    #[test]
    fn destroy_runs_the_destructor_exactly_once() {
        let mut pool = Pool::new();
        let (counter, drops) = DropCounter::new();

        assert!(unsafe { pool.create::<DropCounter>(0, counter) });
        assert_eq!(drops.get(), 0);

        assert!(unsafe { pool.destroy::<DropCounter>(0) });
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn destroy_out_of_range_drops_nothing() {
        let mut pool = BytePool::<16>::new();

        assert!(!unsafe { pool.destroy::<u64>(16) });
        assert!(!unsafe { pool.destroy::<u64>(12) });
    }

    #[test]
    fn create_at_addresses_element_offsets() {
        let mut pool = Pool::new();

        assert!(unsafe { pool.create_at::<u32>(3, 0, 0x1234_5678_u32) });

        let slot = pool.get::<u32>(3).unwrap();
        assert_eq!(unsafe { slot.read() }, 0x1234_5678);

        assert!(unsafe { pool.destroy_at::<u32>(3, 0) });
    }

    #[test]
    fn create_at_with_minor_byte_offset() {
        let mut pool = Pool::new();

        // One u32 element plus four bytes: byte offset 8, aligned for u32.
        assert!(unsafe { pool.create_at::<u32>(1, 4, 0x0B0B_0B0B_u32) });
        assert_eq!(pool[8], 0x0B);
        assert_eq!(pool[11], 0x0B);

        assert!(unsafe { pool.destroy_at::<u32>(1, 4) });
    }

    #[test]
    fn emplace_initializes_in_place() {
        let mut pool = Pool::new();

        let placed = unsafe {
            pool.emplace::<[u8; 8]>(16, |uninit| {
                uninit.write(*b"eightchr");
            })
        };
        assert!(placed);

        let slot = pool.get::<[u8; 8]>(2).unwrap();
        assert_eq!(&unsafe { slot.read() }, b"eightchr");

        assert!(unsafe { pool.destroy::<[u8; 8]>(16) });
    }

    #[test]
    fn emplace_out_of_range_never_invokes_the_closure() {
        let mut pool = BytePool::<16>::new();
        let mut invoked = false;

        let placed = unsafe {
            pool.emplace::<u64>(16, |_uninit| {
                invoked = true;
            })
        };

        assert!(!placed);
        assert!(!invoked);
    }

    #[test]
    fn emplace_at_mirrors_create_at_addressing() {
        let mut pool = Pool::new();
        let (counter, drops) = DropCounter::new();

        let placed = unsafe {
            pool.emplace_at::<DropCounter>(2, 0, move |uninit| {
                uninit.write(counter);
            })
        };
        assert!(placed);

        assert!(unsafe { pool.destroy_at::<DropCounter>(2, 0) });
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn placement_respects_the_unchecked_window() {
        let mut pool = BytePool::<16, 16, crate::OnHeap, false>::new();

        // The guard band is part of the window when checking is disabled.
        assert!(unsafe { pool.create::<u64>(24, 7) });
        assert!(unsafe { pool.destroy::<u64>(24) });
        assert!(!unsafe { pool.create::<u64>(32, 7) });
    }

    #[test]
    fn checked_placement_stops_at_the_capacity() {
        let mut pool = BytePool::<16, 16>::new();

        assert!(!unsafe { pool.create::<u64>(16, 7) });
        assert!(unsafe { pool.create::<u64>(8, 7) });
        assert!(unsafe { pool.destroy::<u64>(8) });
    }
}
