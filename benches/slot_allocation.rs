// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for output slot allocation.
//!
//! Allocation probes the filesystem once per taken slot, so its cost grows
//! with the number of photos already filed under a code.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use muwi_scan::application::FileSlotAllocator;
use muwi_scan::domain::{classify, slot::file_name};
use std::hint::black_box;
use tempfile::tempdir;

const CODE: &str = "MUXX-01-000001";

/// Measures `next_slot` against directories holding a growing series.
fn bench_next_slot(c: &mut Criterion) {
    let mut group = c.benchmark_group("slot_allocation");

    for existing in [0u32, 10, 100, 500] {
        let dir = tempdir().unwrap();
        for sequence in 1..=existing {
            std::fs::write(dir.path().join(file_name(CODE, sequence)), b"").unwrap();
        }
        let allocator = FileSlotAllocator::new(dir.path());

        group.bench_with_input(
            BenchmarkId::new("next_slot", existing),
            &allocator,
            |b, allocator| {
                b.iter(|| black_box(allocator.next_slot(CODE).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_file_name(c: &mut Criterion) {
    c.bench_function("file_name", |b| {
        b.iter(|| black_box(file_name(black_box(CODE), black_box(7))));
    });
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_full_turn", |b| {
        b.iter(|| {
            for angle in 0..360 {
                black_box(classify(black_box(angle)));
            }
        });
    });
}

criterion_group!(benches, bench_next_slot, bench_file_name, bench_classify);
criterion_main!(benches);
