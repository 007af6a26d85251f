use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut, Range};
use std::ptr::NonNull;
use std::slice;

use bytemuck::Pod;

use crate::storage::PoolStorage;
use crate::strategy::{OnHeap, Strategy};

/// A fixed-capacity contiguous byte buffer with typed, offset-addressed access.
///
/// A `BytePool` owns exactly `CAPACITY + GUARD_BAND` bytes for its entire
/// lifetime. It cannot grow or shrink; it is a realloc-free fixed-size arena,
/// not a dynamic vector. The buffer starts zeroed and can be read, written,
/// bulk-copied, compared, and used as the backing memory for placement
/// construction of typed values.
///
/// # Configuration
///
/// All configuration is type-level:
///
/// - `CAPACITY`: logical capacity in bytes, fixed for the pool's lifetime.
/// - `GUARD_BAND`: extra bytes physically reserved past the capacity. They
///   are invisible to bounds-checked access and become addressable when
///   bounds checking is disabled - scratch space for code that deliberately
///   reads or writes past the logical end.
/// - `S`: the [placement strategy](crate::Strategy) - [`OnStack`](crate::OnStack),
///   [`OnHeap`](crate::OnHeap) or [`Automatic`](crate::Automatic).
/// - `BOUNDS_CHECKED`: when `true` (the default), checked accessors validate
///   offsets against `CAPACITY`; when `false`, the validated window extends
///   over the guard band to `CAPACITY + GUARD_BAND`. Access beyond the
///   physical allocation is never possible through safe methods; the
///   genuinely unvalidated path is [`get_unchecked()`](Self::get_unchecked).
///
/// # Out-of-band access
///
/// The pool does not create or keep references to its buffer, so it is valid
/// to access the bytes via pointers obtained from [`get()`](Self::get) and
/// friends from unsafe code. Pointers into an [`OnStack`](crate::OnStack)
/// pool are invalidated when the pool value moves; pointers into a heap
/// placement stay valid until the pool is dropped.
///
/// # Raw arena semantics
///
/// The pool tracks no object liveness. The placement family
/// ([`create()`](Self::create), [`emplace()`](Self::emplace),
/// [`destroy()`](Self::destroy)) writes and drops values at caller-chosen
/// offsets, and the caller is responsible for pairing every construction with
/// exactly one destruction.
///
/// # Thread safety
///
/// A plain value-like container, `Send` and `Sync` exactly like a `Vec<u8>`:
/// concurrent mutation requires external synchronization via `&mut`.
///
/// # Examples
///
/// ```rust
/// use byte_pool::{BytePool, OnStack};
///
/// let mut pool = BytePool::<256, 0, OnStack>::new();
///
/// pool.fill(42);
/// pool[0] = 16;
/// pool[255] = 64;
///
/// assert_eq!(pool[0], 16);
/// assert_eq!(pool[1], 42);
/// assert_eq!(pool[255], 64);
/// ```
///
/// Typed bulk access:
///
/// ```rust
/// use byte_pool::BytePool;
///
/// let mut pool = BytePool::<64>::new();
///
/// // Copy four u32 values to element offset 2 (byte offset 8).
/// assert!(pool.set::<u32>(2, &[1, 2, 3, 4]));
///
/// let third = pool.get::<u32>(3).expect("offset is in range");
/// // SAFETY: the pointer is in range and the buffer base is 16-aligned,
/// // so element offsets of u32 are aligned.
/// assert_eq!(unsafe { third.read() }, 2);
/// ```
pub struct BytePool<
    const CAPACITY: usize,
    const GUARD_BAND: usize = 0,
    S: Strategy = OnHeap,
    const BOUNDS_CHECKED: bool = true,
> {
    storage: S::Storage<CAPACITY, GUARD_BAND>,
}

impl<const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool>
    BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
    /// Total physically reserved bytes, guard band included.
    ///
    /// Evaluated at compile time, so an overflowing configuration is a
    /// compile-time error rather than a runtime hazard.
    pub(crate) const ALLOCATED: usize = CAPACITY + GUARD_BAND;

    /// Upper bound of the byte window that checked accessors validate
    /// against: the logical capacity, or the whole allocation when bounds
    /// checking is disabled.
    pub(crate) const LIMIT: usize = if BOUNDS_CHECKED {
        CAPACITY
    } else {
        CAPACITY + GUARD_BAND
    };

    /// Creates a pool with a zero-initialized buffer.
    ///
    /// # Panics
    ///
    /// Panics if a heap placement cannot allocate the buffer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use byte_pool::BytePool;
    ///
    /// let pool = BytePool::<64, 16>::new();
    ///
    /// assert_eq!(pool.len(), 64);
    /// assert_eq!(pool.allocated(), 80);
    /// assert!(pool.as_slice().iter().all(|&byte| byte == 0));
    /// ```
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            storage: <S::Storage<CAPACITY, GUARD_BAND> as PoolStorage>::reserve(Self::ALLOCATED),
        }
    }

    /// The logical capacity of the pool in bytes.
    ///
    /// This never changes after construction.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        CAPACITY
    }

    /// Same value as [`len()`](Self::len), kept as a distinct method for
    /// symmetry with growable containers. This pool never grows.
    #[must_use]
    #[inline]
    pub const fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Total physically reserved bytes, including the guard band.
    ///
    /// # Example
    ///
    /// ```rust
    /// use byte_pool::{BytePool, OnHeap, OnStack};
    ///
    /// let stack_pool = BytePool::<64, 16, OnStack>::new();
    /// let heap_pool = BytePool::<64, 16, OnHeap>::new();
    ///
    /// // Both placements physically reserve the guard band.
    /// assert_eq!(stack_pool.allocated(), 80);
    /// assert_eq!(heap_pool.allocated(), 80);
    /// ```
    #[must_use]
    #[inline]
    pub const fn allocated(&self) -> usize {
        Self::ALLOCATED
    }

    /// The size of the guard band in bytes.
    #[must_use]
    #[inline]
    pub const fn guard_band(&self) -> usize {
        GUARD_BAND
    }

    /// Whether checked accessors validate against the logical capacity
    /// (`true`) or the whole allocation including the guard band (`false`).
    #[must_use]
    #[inline]
    pub const fn is_bounds_checked(&self) -> bool {
        BOUNDS_CHECKED
    }

    /// Whether the pool has zero logical capacity.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        CAPACITY == 0
    }

    /// Whether the buffer is stored inline in the pool value.
    ///
    /// Always `true` for [`OnStack`](crate::OnStack) and `false` for
    /// [`OnHeap`](crate::OnHeap); for [`Automatic`](crate::Automatic) this
    /// reports the placement resolved at construction.
    #[must_use]
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.storage.is_inline()
    }

    /// The number of whole elements of type `T` that fit in the logical
    /// capacity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use byte_pool::BytePool;
    ///
    /// let pool = BytePool::<256>::new();
    ///
    /// assert_eq!(pool.len_of::<u8>(), 256);
    /// assert_eq!(pool.len_of::<u64>(), 32);
    /// assert_eq!(pool.len_of::<[u8; 100]>(), 2);
    /// ```
    #[must_use]
    #[inline]
    #[expect(
        clippy::integer_division,
        reason = "truncating division is the definition of whole-element count"
    )]
    pub const fn len_of<T>(&self) -> usize {
        const {
            assert!(size_of::<T>() != 0, "zero-sized element types are not supported");
        }

        CAPACITY / size_of::<T>()
    }

    /// Pointer to the first byte of the buffer, for reads.
    #[inline]
    pub(crate) fn base(&self) -> NonNull<u8> {
        self.storage.base()
    }

    /// Pointer to the first byte of the buffer, for writes.
    #[inline]
    pub(crate) fn base_mut(&mut self) -> NonNull<u8> {
        self.storage.base_mut()
    }

    /// Resolves an element offset to a validated byte offset.
    ///
    /// Validation follows the start-byte rule: the first byte of the element
    /// must fall inside the window, which makes a trailing partial element
    /// addressable and one-past-the-end invalid.
    fn resolve<T>(offset: usize) -> Option<usize> {
        const {
            assert!(size_of::<T>() != 0, "zero-sized element types are not supported");
        }

        let byte_offset = offset.checked_mul(size_of::<T>())?;
        (byte_offset < Self::LIMIT).then_some(byte_offset)
    }

    /// Resolves a `(major, minor)` element-plus-byte offset pair to a
    /// validated byte offset: `major * size_of::<T>() + minor`.
    fn resolve_pair<T>(major: usize, minor: usize) -> Option<usize> {
        const {
            assert!(size_of::<T>() != 0, "zero-sized element types are not supported");
        }

        let byte_offset = major.checked_mul(size_of::<T>())?.checked_add(minor)?;
        (byte_offset < Self::LIMIT).then_some(byte_offset)
    }

    /// Validates that `offset..offset + len` lies inside the window.
    fn byte_range(offset: usize, len: usize) -> Option<Range<usize>> {
        let end = offset.checked_add(len)?;
        (end <= Self::LIMIT).then_some(offset..end)
    }

    /// Pointer to element `offset` (in units of `T`), for reads.
    ///
    /// Returns `None` when the first byte of the element falls outside the
    /// validated window; the offset one past the end is out of range, unlike
    /// for [`end()`](Self::end). The pointer carries no alignment guarantee
    /// beyond what the offset arithmetic implies - the buffer base is
    /// 16-aligned, so naturally aligned element offsets of primitive types
    /// are aligned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use byte_pool::BytePool;
    ///
    /// let pool = BytePool::<16>::new();
    ///
    /// let byte = pool.get::<u8>(15).expect("last byte is in range");
    /// // SAFETY: the pointer is in range and u8 is always aligned.
    /// assert_eq!(unsafe { byte.read() }, 0);
    ///
    /// assert!(pool.get::<u8>(16).is_none());
    /// assert!(pool.get::<u64>(2).is_none());
    /// ```
    #[must_use]
    pub fn get<T>(&self, offset: usize) -> Option<NonNull<T>> {
        let byte_offset = Self::resolve::<T>(offset)?;

        // SAFETY: byte_offset < LIMIT <= allocated bytes, so the address
        // stays inside the buffer.
        Some(unsafe { self.base().byte_add(byte_offset) }.cast())
    }

    /// Pointer to element `offset` (in units of `T`), for writes.
    ///
    /// Identical validation to [`get()`](Self::get); requires exclusive
    /// access so that writes through the pointer do not alias shared reads.
    #[must_use]
    pub fn get_mut<T>(&mut self, offset: usize) -> Option<NonNull<T>> {
        let byte_offset = Self::resolve::<T>(offset)?;

        // SAFETY: byte_offset < LIMIT <= allocated bytes.
        Some(unsafe { self.base_mut().byte_add(byte_offset) }.cast())
    }

    /// Pointer addressed as `major` whole elements of `T` plus `minor`
    /// bytes, for reads.
    ///
    /// The pair resolves to the byte offset `major * size_of::<T>() + minor`
    /// once, at this boundary; validation is then the same start-byte rule
    /// as [`get()`](Self::get).
    ///
    /// # Example
    ///
    /// ```rust
    /// use byte_pool::BytePool;
    ///
    /// let pool = BytePool::<64>::new();
    ///
    /// // Three whole u32 elements plus one byte: byte offset 13.
    /// let ptr = pool.at::<u32>(3, 1).expect("offset is in range");
    /// let direct = pool.get::<u8>(13).expect("offset is in range");
    /// assert_eq!(ptr.cast::<u8>(), direct);
    /// ```
    #[must_use]
    pub fn at<T>(&self, major: usize, minor: usize) -> Option<NonNull<T>> {
        let byte_offset = Self::resolve_pair::<T>(major, minor)?;

        // SAFETY: byte_offset < LIMIT <= allocated bytes.
        Some(unsafe { self.base().byte_add(byte_offset) }.cast())
    }

    /// Pointer addressed as `major` whole elements of `T` plus `minor`
    /// bytes, for writes.
    #[must_use]
    pub fn at_mut<T>(&mut self, major: usize, minor: usize) -> Option<NonNull<T>> {
        let byte_offset = Self::resolve_pair::<T>(major, minor)?;

        // SAFETY: byte_offset < LIMIT <= allocated bytes.
        Some(unsafe { self.base_mut().byte_add(byte_offset) }.cast())
    }

    /// Pointer to element `offset` with no validation whatsoever.
    ///
    /// This is the deliberate escape hatch past every check, including the
    /// guard band accounting - the caller takes over the entire contract.
    ///
    /// # Safety
    ///
    /// `offset * size_of::<T>()` must not overflow and must not exceed
    /// [`allocated()`](Self::allocated). Dereferencing the pointer is subject
    /// to the usual aliasing, alignment and initialization rules.
    #[must_use]
    pub unsafe fn get_unchecked<T>(&self, offset: usize) -> NonNull<T> {
        const {
            assert!(size_of::<T>() != 0, "zero-sized element types are not supported");
        }

        debug_assert!(
            offset
                .checked_mul(size_of::<T>())
                .is_some_and(|byte_offset| byte_offset <= Self::ALLOCATED),
            "unchecked offset {offset} escapes the allocation of {} bytes",
            Self::ALLOCATED
        );

        // Cannot overflow per the caller's contract, asserted above in debug builds.
        let byte_offset = offset.wrapping_mul(size_of::<T>());

        // SAFETY: the caller guarantees the address stays inside the buffer.
        unsafe { self.base().byte_add(byte_offset) }.cast()
    }

    /// Pointer to the first element, equivalent to `get::<T>(0)`.
    #[must_use]
    #[inline]
    pub fn first<T>(&self) -> Option<NonNull<T>> {
        self.get::<T>(0)
    }

    /// Pointer to the final element-sized slot: `size_of::<T>()` bytes
    /// before the end of the window. `None` when the window is smaller than
    /// one element.
    ///
    /// When the window is not a multiple of `size_of::<T>()`, this slot sits
    /// past the last grid-aligned element - it backs up from the window end,
    /// not from [`end()`](Self::end).
    ///
    /// # Example
    ///
    /// ```rust
    /// use byte_pool::BytePool;
    ///
    /// let pool = BytePool::<64>::new();
    ///
    /// let last = pool.last::<u32>().expect("64 bytes hold sixteen u32");
    /// let direct = pool.get::<u32>(15).expect("offset is in range");
    /// assert_eq!(last, direct);
    ///
    /// assert!(pool.last::<[u8; 100]>().is_none());
    /// ```
    #[must_use]
    pub fn last<T>(&self) -> Option<NonNull<T>> {
        const {
            assert!(size_of::<T>() != 0, "zero-sized element types are not supported");
        }

        let byte_offset = Self::LIMIT.checked_sub(size_of::<T>())?;

        // SAFETY: byte_offset + size_of::<T>() == LIMIT <= allocated bytes.
        Some(unsafe { self.base().byte_add(byte_offset) }.cast())
    }

    /// One-past-the-last-whole-element sentinel pointer.
    ///
    /// Valid for pointer comparisons and as the exclusive bound of the
    /// window - for example as the rejection boundary of
    /// [`set_in()`](Self::set_in) - but never for reading or writing, and
    /// out of range for [`get()`](Self::get).
    #[must_use]
    #[expect(
        clippy::integer_division,
        reason = "flooring to the whole-element boundary is intended"
    )]
    pub fn end<T>(&self) -> NonNull<T> {
        const {
            assert!(size_of::<T>() != 0, "zero-sized element types are not supported");
        }

        // Cannot overflow: the product is at most LIMIT.
        let byte_offset = (Self::LIMIT / size_of::<T>()).wrapping_mul(size_of::<T>());

        // SAFETY: byte_offset <= LIMIT <= allocated bytes.
        unsafe { self.base().byte_add(byte_offset) }.cast()
    }

    /// The validated byte window as a slice.
    ///
    /// Covers the logical capacity, or the whole allocation including the
    /// guard band when bounds checking is disabled.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: the storage contract guarantees LIMIT <= allocated bytes,
        // all initialized, valid for the lifetime of this borrow.
        unsafe { slice::from_raw_parts(self.base().as_ptr(), Self::LIMIT) }
    }

    /// The validated byte window as a mutable slice.
    #[must_use]
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as for as_slice(); exclusive access via &mut self.
        unsafe { slice::from_raw_parts_mut(self.base_mut().as_ptr(), Self::LIMIT) }
    }

    /// The logical capacity window, independent of the bounds-checking mode.
    pub(crate) fn logical_window(&self) -> &[u8] {
        self.as_slice()
            .get(..CAPACITY)
            .expect("the window is never smaller than the logical capacity")
    }

    /// Iterates over the bytes of the window.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, u8> {
        self.as_slice().iter()
    }

    /// Iterates mutably over the bytes of the window.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, u8> {
        self.as_mut_slice().iter_mut()
    }

    /// Sets every byte of the window to `value`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use byte_pool::BytePool;
    ///
    /// let mut pool = BytePool::<8>::new();
    /// pool.fill(0xFF);
    ///
    /// assert!(pool.iter().all(|&byte| byte == 0xFF));
    /// ```
    #[inline]
    pub fn fill(&mut self, value: u8) {
        self.as_mut_slice().fill(value);
    }

    /// Sets the `len` bytes starting at `offset` to `value`.
    ///
    /// An out-of-range request is rejected entirely - `false` is returned
    /// and nothing is written. A zero-length request inside the window
    /// succeeds and writes nothing.
    #[must_use = "the success flag reports whether anything was written"]
    pub fn fill_range(&mut self, value: u8, offset: usize, len: usize) -> bool {
        let Some(range) = Self::byte_range(offset, len) else {
            return false;
        };

        self.as_mut_slice()
            .get_mut(range)
            .expect("range was validated against the window above")
            .fill(value);

        true
    }

    /// Sets every byte of the window to zero, equivalent to `fill(0)`.
    #[inline]
    pub fn clear(&mut self) {
        self.fill(0);
    }

    /// Sets the `len` bytes starting at `offset` to zero, with the same
    /// all-or-nothing contract as [`fill_range()`](Self::fill_range).
    #[inline]
    #[must_use = "the success flag reports whether anything was written"]
    pub fn clear_range(&mut self, offset: usize, len: usize) -> bool {
        self.fill_range(0, offset, len)
    }

    /// Copies `src` into the pool starting at element offset `offset`
    /// (in units of `T`).
    ///
    /// The whole destination range must fit in the window; otherwise the
    /// copy is rejected with no partial write and `false` is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use byte_pool::BytePool;
    ///
    /// let mut pool = BytePool::<16>::new();
    ///
    /// assert!(pool.set::<u32>(1, &[0xAABBCCDD, 0x11223344]));
    ///
    /// // Three elements cannot fit at offset 2 of a 16-byte pool.
    /// assert!(!pool.set::<u32>(2, &[1, 2, 3]));
    /// ```
    #[must_use = "the success flag reports whether anything was written"]
    pub fn set<T: Pod>(&mut self, offset: usize, src: &[T]) -> bool {
        const {
            assert!(size_of::<T>() != 0, "zero-sized element types are not supported");
        }

        let Some(byte_offset) = offset.checked_mul(size_of::<T>()) else {
            return false;
        };

        self.write_bytes(byte_offset, bytemuck::cast_slice(src))
    }

    /// Copies `src` into the pool at `major` whole elements of `T` plus
    /// `minor` bytes, with the same all-or-nothing contract as
    /// [`set()`](Self::set).
    #[must_use = "the success flag reports whether anything was written"]
    pub fn set_at<T: Pod>(&mut self, major: usize, minor: usize, src: &[T]) -> bool {
        const {
            assert!(size_of::<T>() != 0, "zero-sized element types are not supported");
        }

        let Some(byte_offset) = major
            .checked_mul(size_of::<T>())
            .and_then(|offset| offset.checked_add(minor))
        else {
            return false;
        };

        self.write_bytes(byte_offset, bytemuck::cast_slice(src))
    }

    /// Copies `src` to a destination expressed as a pointer previously
    /// obtained from this pool (for example from [`get()`](Self::get) or
    /// [`first()`](Self::first)).
    ///
    /// Rejected - `false`, nothing written - when `dest` precedes the buffer,
    /// is at or past [`end::<T>()`](Self::end), or the copy would run past
    /// the window. When bounds checking is disabled the window extends over
    /// the guard band, so writes past the logical end land there.
    ///
    /// The write goes through the pool's own buffer at the offset the
    /// pointer encodes, so a pointer that was never derived from this pool
    /// is either rejected or addresses pool-owned bytes; it cannot reach
    /// foreign memory.
    ///
    /// # Example
    ///
    /// ```rust
    /// use byte_pool::BytePool;
    ///
    /// let mut pool = BytePool::<16>::new();
    ///
    /// let dest = pool.get::<u32>(2).expect("offset is in range");
    /// assert!(pool.set_in::<u32>(dest, &[7]));
    ///
    /// let read_back = pool.get::<u32>(2).expect("offset is in range");
    /// // SAFETY: in range and aligned for u32.
    /// assert_eq!(unsafe { read_back.read() }, 7);
    ///
    /// assert!(!pool.set_in::<u32>(pool.end::<u32>(), &[7]));
    /// ```
    #[expect(
        clippy::integer_division,
        reason = "flooring to the whole-element boundary is intended"
    )]
    #[must_use = "the success flag reports whether anything was written"]
    pub fn set_in<T: Pod>(&mut self, dest: NonNull<T>, src: &[T]) -> bool {
        const {
            assert!(size_of::<T>() != 0, "zero-sized element types are not supported");
        }

        let Some(byte_offset) = dest.addr().get().checked_sub(self.base().addr().get()) else {
            return false;
        };

        // Cannot overflow: the product is at most LIMIT.
        let element_window = (Self::LIMIT / size_of::<T>()).wrapping_mul(size_of::<T>());
        if byte_offset >= element_window {
            return false;
        }

        self.write_bytes(byte_offset, bytemuck::cast_slice(src))
    }

    /// Copies raw bytes to a validated byte offset, all-or-nothing.
    fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> bool {
        let Some(range) = Self::byte_range(offset, bytes.len()) else {
            return false;
        };

        self.as_mut_slice()
            .get_mut(range)
            .expect("range was validated against the window above")
            .copy_from_slice(bytes);

        true
    }

    /// Exchanges the buffers of two pools of the same configuration.
    ///
    /// Heap placements swap pointers without copying or reallocating; inline
    /// placements swap their byte content.
    ///
    /// # Example
    ///
    /// ```rust
    /// use byte_pool::BytePool;
    ///
    /// let mut first = BytePool::<8>::new();
    /// let mut second = BytePool::<8>::new();
    /// first.fill(1);
    /// second.fill(2);
    ///
    /// first.swap(&mut second);
    ///
    /// assert_eq!(first[0], 2);
    /// assert_eq!(second[0], 1);
    /// ```
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.storage, &mut other.storage);
    }
}

impl<const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool>
    Default for BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool> Clone
    for BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
    /// Produces an independent pool with byte-for-byte identical content,
    /// guard band included. Heap placements copy into a fresh allocation,
    /// never a shared one.
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
        }
    }
}

impl<const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool>
    fmt::Debug for BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BytePool")
            .field("capacity", &CAPACITY)
            .field("guard_band", &GUARD_BAND)
            .field("bounds_checked", &BOUNDS_CHECKED)
            .field("inline", &self.storage.is_inline())
            .finish_non_exhaustive()
    }
}

impl<const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool>
    AsRef<[u8]> for BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl<const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool>
    AsMut<[u8]> for BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl<const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool>
    Index<usize> for BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
    type Output = u8;

    /// Direct byte indexing - the fast sibling of [`get()`](BytePool::get).
    ///
    /// # Panics
    ///
    /// Panics when the offset falls outside the validated window.
    fn index(&self, offset: usize) -> &u8 {
        self.as_slice().get(offset).unwrap_or_else(|| {
            panic!(
                "byte offset {offset} out of range for pool window of {} bytes",
                Self::LIMIT
            )
        })
    }
}

impl<const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool>
    IndexMut<usize> for BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
    fn index_mut(&mut self, offset: usize) -> &mut u8 {
        self.as_mut_slice().get_mut(offset).unwrap_or_else(|| {
            panic!(
                "byte offset {offset} out of range for pool window of {} bytes",
                Self::LIMIT
            )
        })
    }
}

impl<'a, const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool>
    IntoIterator for &'a BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
    type Item = &'a u8;
    type IntoIter = slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool>
    IntoIterator for &'a mut BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
    type Item = &'a mut u8;
    type IntoIter = slice::IterMut<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
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
    use static_assertions::assert_impl_all;

    use super::*;
    use crate::{Automatic, OnStack};

    type Stack256 = BytePool<256, 0, OnStack>;
    type Heap64 = BytePool<64>;
    type Guarded = BytePool<16, 8, OnHeap>;
    type Unchecked = BytePool<16, 8, OnHeap, false>;

    assert_impl_all!(Heap64: Send, Sync, Clone, Default, std::fmt::Debug);
    assert_impl_all!(Stack256: Send, Sync, Clone, Default, std::fmt::Debug);
    assert_impl_all!(BytePool<8, 0, Automatic>: Send, Sync, Clone, std::fmt::Debug);

    #[test]
    fn sizing_invariants() {
        let pool = Guarded::new();

        assert_eq!(pool.len(), 16);
        assert_eq!(pool.capacity(), 16);
        assert_eq!(pool.allocated(), 24);
        assert_eq!(pool.guard_band(), 8);
        assert!(pool.is_bounds_checked());
        assert!(!pool.is_empty());
    }

    #[test]
    fn len_of_counts_whole_elements() {
        let pool = Stack256::new();

        assert_eq!(pool.len_of::<u8>(), 256);
        assert_eq!(pool.len_of::<u16>(), 128);
        assert_eq!(pool.len_of::<u64>(), 32);
        assert_eq!(pool.len_of::<[u8; 100]>(), 2);
        assert_eq!(pool.len_of::<[u8; 300]>(), 0);
    }

    #[test]
    fn new_pool_is_zeroed() {
        let pool = Heap64::new();
        assert!(pool.iter().all(|&byte| byte == 0));

        let pool = Stack256::new();
        assert!(pool.iter().all(|&byte| byte == 0));
    }

    #[test]
    fn get_respects_window_edges() {
        let pool = Heap64::new();

        assert!(pool.get::<u8>(63).is_some());
        assert!(pool.get::<u8>(64).is_none());
        assert!(pool.get::<u8>(usize::MAX).is_none());

        // Start-byte rule: the last partial u64 start is addressable.
        assert!(pool.get::<u64>(7).is_some());
        assert!(pool.get::<u64>(8).is_none());
    }

    #[test]
    fn get_offset_overflow_is_rejected() {
        let pool = Heap64::new();
        assert!(pool.get::<u64>(usize::MAX / 4).is_none());
    }

    #[test]
    fn at_combines_major_and_minor() {
        let mut pool = Heap64::new();
        pool[13] = 0x5A;

        let ptr = pool.at::<u32>(3, 1).expect("byte offset 13 is in range");
        unsafe {
            assert_eq!(ptr.cast::<u8>().read(), 0x5A);
        }

        // Byte offset 64 is one past the end.
        assert!(pool.at::<u32>(15, 4).is_none());
        assert!(pool.at::<u32>(16, 0).is_none());
    }

    #[test]
    fn first_and_last_bracket_the_window() {
        let pool = Heap64::new();

        let first = pool.first::<u32>().expect("pool is not empty");
        let last = pool.last::<u32>().expect("pool holds whole u32 elements");

        assert_eq!(first.cast::<u8>(), pool.get::<u8>(0).unwrap());
        assert_eq!(last, pool.get::<u32>(15).unwrap());
        assert!(pool.last::<[u8; 65]>().is_none());
    }

    #[test]
    fn end_is_one_past_the_last_whole_element() {
        let pool = BytePool::<10>::new();
        let base = pool.first::<u8>().unwrap().addr().get();

        // Two whole u32 fit in 10 bytes; the sentinel sits at byte 8.
        assert_eq!(pool.end::<u32>().addr().get() - base, 8);

        // last() backs up from the window end, not from the element grid.
        assert_eq!(pool.last::<u32>().unwrap().addr().get() - base, 6);
    }

    #[test]
    fn end_meets_last_on_an_exact_multiple() {
        let pool = BytePool::<12>::new();

        let last = pool.last::<u32>().expect("12 bytes hold three u32");
        assert_eq!(unsafe { last.add(1) }, pool.end::<u32>());
    }

    #[test]
    fn fill_and_read_back() {
        let mut pool = Stack256::new();
        pool.fill(42);

        assert!(pool.iter().all(|&byte| byte == 42));
    }

    #[test]
    fn clear_is_fill_zero() {
        let mut filled = Heap64::new();
        let mut cleared = Heap64::new();

        filled.fill(0xEE);
        cleared.fill(0xEE);

        filled.fill(0);
        cleared.clear();

        assert_eq!(filled.as_slice(), cleared.as_slice());
    }

    #[test]
    fn fill_range_is_all_or_nothing() {
        let mut pool = Heap64::new();
        pool.fill(1);

        assert!(pool.fill_range(9, 8, 4));
        assert_eq!(&pool.as_slice()[6..14], &[1, 1, 9, 9, 9, 9, 1, 1]);

        // Runs one byte past the window: rejected, nothing written.
        assert!(!pool.fill_range(7, 60, 5));
        assert!(pool.as_slice()[60..].iter().all(|&byte| byte == 1));

        // Zero-length requests succeed anywhere in the window.
        assert!(pool.fill_range(7, 64, 0));
        assert!(!pool.fill_range(7, 65, 0));
    }

    #[test]
    fn clear_range_matches_fill_range_zero() {
        let mut pool = Heap64::new();
        pool.fill(0xFF);

        assert!(pool.clear_range(4, 8));
        assert!(pool.as_slice()[4..12].iter().all(|&byte| byte == 0));
        assert!(pool.as_slice()[..4].iter().all(|&byte| byte == 0xFF));
        assert!(!pool.clear_range(63, 2));
    }

    #[test]
    fn set_round_trip_leaves_neighbors_untouched() {
        let mut pool = Heap64::new();
        pool.fill(0xAA);

        assert!(pool.set::<u32>(2, &[0x0102_0304, 0x0506_0708]));

        let read_back = pool.get::<u32>(2).unwrap();
        unsafe {
            assert_eq!(read_back.read(), 0x0102_0304);
            assert_eq!(read_back.add(1).read(), 0x0506_0708);
        }

        assert!(pool.as_slice()[..8].iter().all(|&byte| byte == 0xAA));
        assert!(pool.as_slice()[16..].iter().all(|&byte| byte == 0xAA));
    }

    #[test]
    fn set_rejection_has_no_side_effects() {
        let mut pool = BytePool::<16>::new();
        pool.fill(0x11);

        // Two u64 at element offset 1 would end at byte 24.
        assert!(!pool.set::<u64>(1, &[1, 2]));
        assert!(pool.iter().all(|&byte| byte == 0x11));
    }

    #[test]
    fn set_at_addresses_element_plus_byte() {
        let mut pool = Heap64::new();

        assert!(pool.set_at::<u32>(2, 1, &[0x1111_1111]));

        // The write landed at byte offset 9.
        let direct = pool.get::<u8>(9).unwrap();
        unsafe {
            assert_eq!(direct.read(), 0x11);
        }
        assert_eq!(pool.as_slice()[8], 0);
        assert_eq!(pool.as_slice()[13], 0);
    }

    #[test]
    fn set_in_writes_through_pool_pointers() {
        let mut pool = BytePool::<16>::new();

        let dest = pool.get::<u32>(1).unwrap();
        assert!(pool.set_in::<u32>(dest, &[0xDEAD_BEEF]));

        unsafe {
            assert_eq!(pool.get::<u32>(1).unwrap().read(), 0xDEAD_BEEF);
        }
    }

    #[test]
    fn set_in_rejects_the_end_sentinel_and_beyond() {
        let mut pool = BytePool::<16>::new();

        let end = pool.end::<u32>();
        assert!(!pool.set_in::<u32>(end, &[1]));

        // A pointer that precedes the buffer resolves to no offset at all.
        let foreign = NonNull::<u32>::dangling();
        assert!(!pool.set_in::<u32>(foreign, &[1]));
        assert!(pool.iter().all(|&byte| byte == 0));
    }

    #[test]
    fn set_in_rejects_oversized_copies() {
        let mut pool = BytePool::<16>::new();

        let dest = pool.get::<u32>(3).unwrap();
        assert!(!pool.set_in::<u32>(dest, &[1, 2]));
        assert!(pool.iter().all(|&byte| byte == 0));
    }

    #[test]
    fn guard_band_is_invisible_when_checked() {
        let pool = Guarded::new();

        assert_eq!(pool.allocated(), 24);
        assert!(pool.get::<u8>(15).is_some());
        assert!(pool.get::<u8>(16).is_none());
        assert_eq!(pool.as_slice().len(), 16);
    }

    #[test]
    fn guard_band_opens_up_when_unchecked() {
        let pool = Unchecked::new();

        assert!(!pool.is_bounds_checked());
        assert!(pool.get::<u8>(16).is_some());
        assert!(pool.get::<u8>(23).is_some());
        assert!(pool.get::<u8>(24).is_none());
        assert_eq!(pool.as_slice().len(), 24);
    }

    #[test]
    fn unchecked_window_supports_guard_band_writes() {
        let mut pool = Unchecked::new();

        assert!(pool.fill_range(0xAB, 16, 8));
        assert!(pool.as_slice()[16..24].iter().all(|&byte| byte == 0xAB));
        assert!(!pool.fill_range(0xAB, 20, 8));
    }

    #[test]
    fn index_reads_and_writes_bytes() {
        let mut pool = Stack256::new();

        pool.fill(42);
        pool[0] = 16;
        pool[255] = 64;

        assert_eq!(pool[0], 16);
        assert_eq!(pool[1], 42);
        assert_eq!(pool[254], 42);
        assert_eq!(pool[255], 64);
    }

    #[test]
    #[should_panic]
    fn index_out_of_window_panics() {
        let pool = BytePool::<8>::new();
        let _byte = pool[8];
    }

    #[test]
    fn clone_is_a_deep_copy_both_directions() {
        let mut original = Stack256::new();
        original.fill(42);
        original[0] = 16;
        original[255] = 64;

        let mut copy = original.clone();
        copy.fill(0x77);

        assert_eq!(original[0], 16);
        assert_eq!(original[1], 42);
        assert_eq!(original[254], 42);
        assert_eq!(original[255], 64);

        original.fill(0x33);
        assert!(copy.iter().all(|&byte| byte == 0x77));
    }

    #[test]
    fn heap_clone_copies_into_a_fresh_allocation() {
        let mut original = Heap64::new();
        original.fill(5);

        let copy = original.clone();

        assert_ne!(
            original.first::<u8>().unwrap(),
            copy.first::<u8>().unwrap(),
            "a clone must not share the buffer"
        );

        original.fill(9);
        assert!(copy.iter().all(|&byte| byte == 5));
    }

    #[test]
    fn heap_move_keeps_the_buffer_address() {
        let mut pool = Heap64::new();
        pool.fill(0x42);
        let before = pool.first::<u8>().unwrap();

        let moved = pool;

        assert_eq!(moved.first::<u8>().unwrap(), before);
        assert!(moved.iter().all(|&byte| byte == 0x42));
    }

    #[test]
    fn swap_exchanges_content_without_aliasing() {
        let mut first = Heap64::new();
        let mut second = Heap64::new();
        first.fill(1);
        second.fill(2);

        first.swap(&mut second);

        assert!(first.iter().all(|&byte| byte == 2));
        assert!(second.iter().all(|&byte| byte == 1));

        first.fill(3);
        assert!(second.iter().all(|&byte| byte == 1));
    }

    #[test]
    fn swap_inline_pools() {
        let mut first = Stack256::new();
        let mut second = Stack256::new();
        first.fill(0xA);
        second.fill(0xB);

        first.swap(&mut second);

        assert!(first.iter().all(|&byte| byte == 0xB));
        assert!(second.iter().all(|&byte| byte == 0xA));
    }

    #[test]
    fn automatic_resolves_by_size() {
        let small = BytePool::<64, 0, Automatic>::new();
        let large = BytePool::<8192, 0, Automatic>::new();

        assert!(small.is_inline());
        assert!(!large.is_inline());
        assert_eq!(large.len(), 8192);
    }

    #[test]
    fn zero_capacity_pool_is_coherent() {
        let pool = BytePool::<0>::new();

        assert_eq!(pool.len(), 0);
        assert!(pool.is_empty());
        assert!(pool.as_slice().is_empty());
        assert!(pool.get::<u8>(0).is_none());
        assert!(pool.first::<u8>().is_none());
        assert!(pool.last::<u8>().is_none());
        assert_eq!(pool.len_of::<u32>(), 0);
    }

    #[test]
    fn get_unchecked_reaches_the_guard_band() {
        let mut pool = Guarded::new();
        pool.fill(1);

        // The guard band is invisible to checked access but reachable here.
        let guard_byte = unsafe { pool.get_unchecked::<u8>(20) };
        unsafe {
            assert_eq!(guard_byte.read(), 0);
        }
    }

    #[test]
    fn debug_output_summarizes_configuration() {
        let pool = Guarded::new();
        let output = format!("{pool:?}");

        assert!(output.contains("BytePool"));
        assert!(output.contains("capacity: 16"));
        assert!(output.contains("guard_band: 8"));
    }

    #[test]
    fn default_matches_new() {
        let pool = Heap64::default();
        assert!(pool.iter().all(|&byte| byte == 0));
    }
}
