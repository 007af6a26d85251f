use std::cmp::Ordering;

use bytemuck::Pod;

use crate::pool::BytePool;
use crate::strategy::Strategy;

impl<const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool>
    BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
    /// Byte-wise lexicographic comparison of the full logical capacity of
    /// two pools of the same configuration.
    ///
    /// The ordering operators (`==`, `<`, ...) are defined in terms of this
    /// method, giving the pool value semantics usable in ordered containers.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::cmp::Ordering;
    ///
    /// use byte_pool::BytePool;
    ///
    /// let first = BytePool::<8>::new();
    /// let mut second = BytePool::<8>::new();
    ///
    /// assert_eq!(first.compare(&second), Ordering::Equal);
    ///
    /// second[7] = 1;
    /// assert_eq!(first.compare(&second), Ordering::Less);
    /// assert_eq!(second.compare(&first), Ordering::Greater);
    /// ```
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.logical_window().cmp(other.logical_window())
    }

    /// Compares the `len` bytes starting at `offset` in both pools.
    ///
    /// The same offset applies to both sides and each side is truncated at
    /// its capacity, so an offset at or past the end compares two exhausted
    /// windows: `Equal`, regardless of content.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::cmp::Ordering;
    ///
    /// use byte_pool::BytePool;
    ///
    /// let mut first = BytePool::<8>::new();
    /// let mut second = BytePool::<8>::new();
    /// first[0] = 1; // outside the compared range
    /// second[7] = 9;
    ///
    /// assert_eq!(first.compare_range(&second, 4, 4), Ordering::Less);
    /// assert_eq!(first.compare_range(&second, 4, 3), Ordering::Equal);
    ///
    /// // Both windows exhausted.
    /// let len = first.len();
    /// assert_eq!(first.compare_range(&second, len, len), Ordering::Equal);
    /// ```
    #[must_use]
    pub fn compare_range(&self, other: &Self, offset: usize, len: usize) -> Ordering {
        self.clamped_window(offset, len)
            .cmp(other.clamped_window(offset, len))
    }

    /// Compares the bytes starting at `offset` against an external buffer,
    /// over `other.len()` bytes.
    ///
    /// Truncated-comparison rule: when the pool window exhausts before the
    /// external buffer and the compared prefixes are equal, the pool sorts
    /// after the external buffer (`Greater`). A zero-length comparison is
    /// `Equal`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::cmp::Ordering;
    ///
    /// use byte_pool::BytePool;
    ///
    /// let mut pool = BytePool::<4>::new();
    /// pool.fill(5);
    ///
    /// assert_eq!(pool.compare_bytes(0, &[5, 5, 5, 5]), Ordering::Equal);
    /// assert_eq!(pool.compare_bytes(0, &[5, 6]), Ordering::Less);
    /// assert_eq!(pool.compare_bytes(2, &[5, 5, 5]), Ordering::Greater);
    /// assert_eq!(pool.compare_bytes(4, &[]), Ordering::Equal);
    /// ```
    #[must_use]
    pub fn compare_bytes(&self, offset: usize, other: &[u8]) -> Ordering {
        let window = self.logical_window();
        let start = offset.min(window.len());
        let available = window
            .get(start..)
            .expect("start is clamped to the window length");

        let take = available.len().min(other.len());

        let lhs = available.get(..take).expect("take is at most the available length");
        let rhs = other.get(..take).expect("take is at most the buffer length");

        let ordering = lhs.cmp(rhs);
        if ordering != Ordering::Equal {
            return ordering;
        }

        if take < other.len() {
            // The exhausted pool window is treated as the later sequence
            // while external bytes remain.
            return Ordering::Greater;
        }

        Ordering::Equal
    }

    /// Compares against an external buffer at `major` whole elements of `T`
    /// plus `minor` bytes, byte-wise over the elements of `other`.
    ///
    /// Identical truncation rules to [`compare_bytes()`](Self::compare_bytes);
    /// an unrepresentable offset behaves as a fully exhausted window.
    #[must_use]
    pub fn compare_at<T: Pod>(&self, major: usize, minor: usize, other: &[T]) -> Ordering {
        const {
            assert!(size_of::<T>() != 0, "zero-sized element types are not supported");
        }

        let Some(byte_offset) = major
            .checked_mul(size_of::<T>())
            .and_then(|offset| offset.checked_add(minor))
        else {
            return if other.is_empty() {
                Ordering::Equal
            } else {
                Ordering::Greater
            };
        };

        self.compare_bytes(byte_offset, bytemuck::cast_slice(other))
    }

    /// The logical window clamped to `offset..offset + len`, truncated at
    /// the capacity on both ends.
    fn clamped_window(&self, offset: usize, len: usize) -> &[u8] {
        let window = self.logical_window();
        let start = offset.min(window.len());
        let end = offset
            .checked_add(len)
            .map_or(window.len(), |end| end.min(window.len()));

        window
            .get(start..end)
            .expect("both bounds are clamped to the window length")
    }
}

impl<const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool>
    PartialEq for BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl<const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool> Eq
    for BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
}

impl<const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool>
    PartialOrd for BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const CAPACITY: usize, const GUARD_BAND: usize, S: Strategy, const BOUNDS_CHECKED: bool> Ord
    for BytePool<CAPACITY, GUARD_BAND, S, BOUNDS_CHECKED>
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

#[cfg(test)]
#[allow(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]
mod tests {
    use super::*;
    use crate::OnStack;

    type Heap16 = BytePool<16>;
    type Stack16 = BytePool<16, 0, OnStack>;

    #[test]
    fn compare_is_reflexive() {
        let mut pool = Heap16::new();
        pool.fill(0x5C);

        assert_eq!(pool.compare(&pool), Ordering::Equal);
    }

    #[test]
    fn compare_is_antisymmetric() {
        let mut first = Heap16::new();
        let mut second = Heap16::new();
        first[9] = 1;
        second[9] = 2;

        assert_eq!(first.compare(&second), Ordering::Less);
        assert_eq!(second.compare(&first), Ordering::Greater);
    }

    #[test]
    fn ordering_operators_follow_compare() {
        let mut first = Stack16::new();
        let mut second = Stack16::new();

        assert!(first == second);
        assert!(first <= second);
        assert!(first >= second);

        second[15] = 1;
        assert!(first != second);
        assert!(first < second);
        assert!(second > first);

        first[0] = 1;
        assert!(first > second);
    }

    #[test]
    fn compare_range_ignores_bytes_outside_the_range() {
        let mut first = Heap16::new();
        let mut second = Heap16::new();
        first[0] = 0xFF;

        assert_eq!(first.compare_range(&second, 1, 15), Ordering::Equal);
        assert_eq!(first.compare_range(&second, 0, 16), Ordering::Greater);
    }

    #[test]
    fn compare_range_with_both_windows_exhausted_is_equal() {
        let mut first = Heap16::new();
        let mut second = Heap16::new();
        first.fill(1);
        second.fill(2);

        let len = first.len();
        assert_eq!(first.compare_range(&second, len, len), Ordering::Equal);
        assert_eq!(first.compare_range(&second, len + 100, 1), Ordering::Equal);
        assert_eq!(first.compare_range(&second, 0, 0), Ordering::Equal);
    }

    #[test]
    fn compare_range_truncates_at_capacity() {
        let mut first = Heap16::new();
        let mut second = Heap16::new();
        first[15] = 3;
        second[15] = 4;

        // The requested range runs past the end; both sides truncate alike.
        assert_eq!(first.compare_range(&second, 8, 100), Ordering::Less);
        assert_eq!(first.compare_range(&second, 8, usize::MAX), Ordering::Less);
    }

    #[test]
    fn compare_bytes_matches_equal_content() {
        let mut pool = Heap16::new();
        pool.fill(7);

        assert_eq!(pool.compare_bytes(0, &[7; 16]), Ordering::Equal);
        assert_eq!(pool.compare_bytes(12, &[7; 4]), Ordering::Equal);
    }

    #[test]
    fn compare_bytes_orders_by_first_difference() {
        let mut pool = Heap16::new();
        pool.fill(5);

        assert_eq!(pool.compare_bytes(0, &[5, 5, 6]), Ordering::Less);
        assert_eq!(pool.compare_bytes(0, &[5, 4]), Ordering::Greater);
    }

    #[test]
    fn exhausted_pool_window_sorts_after_remaining_bytes() {
        let mut pool = Heap16::new();
        pool.fill(9);

        // Equal prefix, external bytes remain: the pool sorts after.
        assert_eq!(pool.compare_bytes(14, &[9, 9, 9]), Ordering::Greater);
        assert_eq!(pool.compare_bytes(16, &[1]), Ordering::Greater);

        // Zero-length comparisons are equal even when fully out of range.
        assert_eq!(pool.compare_bytes(16, &[]), Ordering::Equal);
        assert_eq!(pool.compare_bytes(usize::MAX, &[]), Ordering::Equal);
    }

    #[test]
    fn compare_at_addresses_typed_offsets() {
        let mut pool = Heap16::new();
        assert!(pool.set::<u32>(0, &[0x0101_0101, 0x0202_0202]));

        assert_eq!(pool.compare_at::<u32>(1, 0, &[0x0202_0202]), Ordering::Equal);
        assert_eq!(pool.compare_at::<u32>(0, 0, &[0x0202_0202]), Ordering::Less);

        // Offset arithmetic that cannot be represented behaves as exhausted.
        assert_eq!(
            pool.compare_at::<u32>(usize::MAX, usize::MAX, &[1]),
            Ordering::Greater
        );
        assert_eq!(
            pool.compare_at::<u32>(usize::MAX, usize::MAX, &[]),
            Ordering::Equal
        );
    }

    #[test]
    fn guard_band_does_not_participate_in_comparison() {
        let mut first = BytePool::<8, 8, crate::OnHeap, false>::new();
        let mut second = BytePool::<8, 8, crate::OnHeap, false>::new();

        // Differ only inside the guard band.
        assert!(first.fill_range(0xAA, 8, 8));
        assert!(second.fill_range(0xBB, 8, 8));

        assert_eq!(first.compare(&second), Ordering::Equal);
        assert!(first == second);
    }
}
