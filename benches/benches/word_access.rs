//! Word access through composers and packed storage
//!
//! Run with: cargo bench --bench word_access

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use imgbits_core::ByteOrder;
use imgbits_repr::presets;
use imgbits_storage::{MemoryStorage, PackedStorage, Storage, WordComposer};
use imgbits_view::{NumericView, ReprView};

const WORDS: usize = 1 << 16;

fn bench_composed_words(c: &mut Criterion) {
    let mut group = c.benchmark_group("composed words");
    group.throughput(Throughput::Elements(WORDS as u64));

    let orders = [
        ("big_endian", ByteOrder::BigEndian),
        ("little_endian", ByteOrder::LittleEndian),
    ];
    for (name, order) in orders {
        let bytes = MemoryStorage::<u8>::new(WORDS * 4, ByteOrder::native());
        let mut words = WordComposer::new(bytes, 4, order).unwrap();

        group.bench_function(format!("u32_from_bytes_{}", name), |b| {
            b.iter(|| {
                for i in 0..WORDS {
                    words.set(i, black_box(i as u64));
                }
                (0..WORDS).fold(0u64, |acc, i| acc ^ words.get(i))
            });
        });
    }

    let mut packed = PackedStorage::new(10, WORDS, ByteOrder::native()).unwrap();
    group.bench_function("packed_10_bit", |b| {
        b.iter(|| {
            for i in 0..WORDS {
                packed.set(i, black_box(i as u64));
            }
            (0..WORDS).fold(0u64, |acc, i| acc ^ packed.get(i))
        });
    });

    group.finish();
}

fn bench_half_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("half float view");
    group.throughput(Throughput::Elements(WORDS as u64));

    let bytes = MemoryStorage::<u8>::new(WORDS * 2, ByteOrder::native());
    let words = WordComposer::new(bytes, 2, ByteOrder::BigEndian).unwrap();
    let mut view = ReprView::new(words, &*presets::FLOAT16).unwrap();
    let values: Vec<f64> = (0..WORDS).map(|i| i as f64 / 64.0).collect();
    let mut out = vec![0.0; WORDS];

    group.bench_function("set_values", |b| {
        b.iter(|| view.set_values(0, black_box(&values)));
    });
    group.bench_function("get_values", |b| {
        b.iter(|| view.get_values(0, black_box(&mut out)));
    });

    group.finish();
}

criterion_group!(benches, bench_composed_words, bench_half_view);
criterion_main!(benches);
