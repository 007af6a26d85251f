//! Basic benchmarks for the `byte_pool` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::time::Instant;

use alloc_tracker::Allocator;
use byte_pool::{BytePool, OnHeap, OnStack};
use criterion::{Criterion, criterion_group, criterion_main};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

#[global_allocator]
static ALLOCATOR: Allocator<std::alloc::System> = Allocator::system();

const POOL_BYTES: usize = 4096;

fn entrypoint(c: &mut Criterion) {
    let allocs = alloc_tracker::Session::new();

    let mut group = c.benchmark_group("pool_basic");

    let allocs_op = allocs.operation("new_on_stack");
    group.bench_function("new_on_stack", |b| {
        b.iter_custom(|iters| {
            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                drop(black_box(BytePool::<POOL_BYTES, 0, OnStack>::new()));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("new_on_heap");
    group.bench_function("new_on_heap", |b| {
        b.iter_custom(|iters| {
            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                drop(black_box(BytePool::<POOL_BYTES, 0, OnHeap>::new()));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("clone_on_heap");
    group.bench_function("clone_on_heap", |b| {
        b.iter_custom(|iters| {
            let pool = BytePool::<POOL_BYTES, 0, OnHeap>::new();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                drop(black_box(pool.clone()));
            }

            start.elapsed()
        });
    });

    group.bench_function("fill", |b| {
        let mut pool = BytePool::<POOL_BYTES, 0, OnHeap>::new();

        b.iter(|| {
            pool.fill(black_box(0x5A));
            black_box(&pool);
        });
    });

    group.bench_function("set_u64_round_trip", |b| {
        let mut pool = BytePool::<POOL_BYTES, 0, OnHeap>::new();
        let payload = [0xDEAD_BEEF_u64; 64];

        b.iter(|| {
            assert!(pool.set::<u64>(black_box(0), black_box(&payload)));

            let read_back = pool.get::<u64>(63).expect("offset is in range");
            // SAFETY: the pointer is in range and aligned for u64.
            black_box(unsafe { read_back.read() });
        });
    });

    group.bench_function("compare_equal", |b| {
        let first = BytePool::<POOL_BYTES, 0, OnHeap>::new();
        let second = BytePool::<POOL_BYTES, 0, OnHeap>::new();

        b.iter(|| black_box(first.compare(&second)));
    });

    group.finish();

    allocs.print_to_stdout();
}
