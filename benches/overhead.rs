use cipher_bencher::RawBencher;
use criterion::{criterion_group, criterion_main, Criterion};

// Times the harness itself: with no-op operations, buffer setup and the timed loop are all
// that's left to measure.
fn bench_harness_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("harness_overhead");

    for measurements in [1_000u64, 10_000, 100_000] {
        group.bench_function(format!("encrypt_noop_{}", measurements), |b| {
            b.iter(|| {
                let mut bencher = RawBencher::default();
                bencher.time_encrypt(4, measurements * 16, 16, |_message, _key| {})
            })
        });
        group.bench_function(format!("permutation_noop_{}", measurements), |b| {
            b.iter(|| {
                let mut bencher = RawBencher::default();
                bencher.time_permutation(4, measurements * 32, 32, |_state| {})
            })
        });
        group.bench_function(format!("fixed_noop_{}", measurements), |b| {
            b.iter(|| {
                let mut bencher = RawBencher::default();
                bencher.time_encrypt_fixed::<4, _>(measurements, |_message, _key| {})
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_harness_overhead);
criterion_main!(benches);
