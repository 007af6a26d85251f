//! Fixed-capacity byte pools with guard bands and typed offset-addressed access.
//!
//! This crate provides [`BytePool`], a contiguous byte buffer whose capacity,
//! guard band, placement and bounds-checking mode are all part of its type.
//! The pool is a realloc-free fixed-size arena: it never grows or shrinks,
//! and it offers byte-level access, bulk copy/fill/compare primitives, and
//! placement construction of typed values at caller-chosen offsets.
//!
//! # Key Features
//!
//! - **Fixed capacity**: `CAPACITY` logical bytes for the pool's lifetime,
//!   starting zeroed
//! - **Guard band**: `GUARD_BAND` extra bytes past the logical end, invisible
//!   to bounds-checked access, addressable when checking is disabled
//! - **Placement strategies**: [`OnStack`] (inline, allocation-free),
//!   [`OnHeap`] (one exclusive allocation), [`Automatic`] (resolved at
//!   construction by size)
//! - **Typed views**: pointer access, bulk copy and comparison in units of
//!   any element type
//! - **Placement construction**: [`create()`](BytePool::create) /
//!   [`emplace()`](BytePool::emplace) / [`destroy()`](BytePool::destroy) for
//!   destructor-bearing types, with raw-arena semantics (no liveness
//!   tracking)
//! - **Value semantics**: deep [`Clone`], full [`Ord`], O(1) [`swap()`](BytePool::swap)
//!   for heap placements
//! - **Recoverable failures**: out-of-range operations return `None`/`false`
//!   with no side effects; only construction can fail hard (allocation)
//!
//! # Examples
//!
//! Byte-level use:
//!
//! ```rust
//! use byte_pool::{BytePool, OnStack};
//!
//! // 256 logical bytes stored inline, no guard band.
//! let mut pool = BytePool::<256, 0, OnStack>::new();
//!
//! pool.fill(42);
//! pool[0] = 16;
//!
//! assert_eq!(pool[0], 16);
//! assert_eq!(pool[1], 42);
//! assert_eq!(pool.len(), 256);
//! ```
//!
//! Typed bulk copy and read-back:
//!
//! ```rust
//! use byte_pool::BytePool;
//!
//! let mut pool = BytePool::<64>::new();
//!
//! assert!(pool.set::<u32>(0, &[10, 20, 30]));
//!
//! let second = pool.get::<u32>(1).expect("offset is in range");
//! // SAFETY: the pointer is in range and aligned for u32.
//! assert_eq!(unsafe { second.read() }, 20);
//! ```
//!
//! A guard band as deliberate overrun scratch space:
//!
//! ```rust
//! use byte_pool::{BytePool, OnHeap};
//!
//! // 32 logical bytes plus a 16-byte guard band, bounds checking disabled:
//! // the window extends over the guard band.
//! let mut pool = BytePool::<32, 16, OnHeap, false>::new();
//!
//! assert_eq!(pool.allocated(), 48);
//! assert!(pool.fill_range(0xFF, 32, 16));
//!
//! // The logical capacity is unchanged; only the window widened.
//! assert_eq!(pool.len(), 32);
//! ```

mod cmp;
mod placement;
mod pool;
mod storage;
mod strategy;

pub use pool::BytePool;
pub use storage::{AutoStorage, HeapStorage, InlineStorage, PoolStorage};
pub use strategy::{Automatic, OnHeap, OnStack, Strategy};
