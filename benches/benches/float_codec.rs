//! Custom float conversions, general path vs lookup tables
//!
//! Run with: cargo bench --bench float_codec

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use imgbits_repr::{Acceleration, BitCodec, FloatCodec};

const SAMPLES: usize = 4096;

fn formats() -> [(&'static str, u32, u32, bool); 3] {
    [("half", 5, 10, true), ("ufloat11", 5, 6, false), ("e8m23", 8, 23, true)]
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("float encode");
    group.throughput(Throughput::Elements(SAMPLES as u64));

    let values: Vec<f64> = (0..SAMPLES).map(|i| (i as f64 - 1000.0) * 0.37).collect();

    for (name, e, m, signed) in formats() {
        for acceleration in [Acceleration::General, Acceleration::Tables] {
            let codec = FloatCodec::new(e, m, signed, acceleration).unwrap();
            group.bench_with_input(
                BenchmarkId::new(name, format!("{:?}", acceleration)),
                &values,
                |b, values| {
                    b.iter(|| {
                        let mut acc = 0u64;
                        for &v in values {
                            acc ^= codec.to_bits(black_box(v));
                        }
                        acc
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("float decode");
    group.throughput(Throughput::Elements(SAMPLES as u64));

    for (name, e, m, signed) in formats() {
        for acceleration in [Acceleration::General, Acceleration::Tables] {
            let codec = FloatCodec::new(e, m, signed, acceleration).unwrap();
            let mask = (1u64 << codec.bit_width()) - 1;
            let patterns: Vec<u64> = (0..SAMPLES as u64)
                .map(|i| i.wrapping_mul(0x9E37_79B9) & mask)
                .collect();

            group.bench_with_input(
                BenchmarkId::new(name, format!("{:?}", acceleration)),
                &patterns,
                |b, patterns| {
                    b.iter(|| {
                        let mut sum = 0.0;
                        for &bits in patterns {
                            sum += codec.to_numeric_value(black_box(bits));
                        }
                        sum
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
