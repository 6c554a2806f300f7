//! Bulk copies across chunk boundaries
//!
//! Run with: cargo bench --bench large_copy

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use imgbits_core::ByteOrder;
use imgbits_storage::{MemoryStorage, Storage};
use imgbits_view::LargeStorage;

const TOTAL: usize = 1 << 20;

fn bench_chunked_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("large copy");
    group.throughput(Throughput::Elements(TOTAL as u64));

    let src: Vec<u64> = (0..TOTAL as u64).map(|i| i & 0xFFFF).collect();
    let mut dst = vec![0u64; TOTAL];

    for capacity in [1 << 12, 1 << 16, TOTAL] {
        let mut storage = LargeStorage::allocate(TOTAL, capacity, |len| {
            MemoryStorage::<u16>::new(len, ByteOrder::native())
        })
        .unwrap();

        group.bench_with_input(BenchmarkId::new("copy_from", capacity), &capacity, |b, _| {
            b.iter(|| storage.copy_from(0, black_box(&src)));
        });
        group.bench_with_input(BenchmarkId::new("copy_to", capacity), &capacity, |b, _| {
            b.iter(|| storage.copy_to(0, black_box(&mut dst)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chunked_copy);
criterion_main!(benches);
