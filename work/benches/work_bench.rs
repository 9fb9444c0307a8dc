use std::sync::atomic::AtomicBool;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use znn_types::Hash;
use znn_work::{validate_work, WorkGenerator};

fn bench_pow_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("pow_generation");
    let digest = Hash::new([0x42; 32]);
    let cancel = AtomicBool::new(false);

    // 80_000 is the network's default difficulty.
    for difficulty in [1_000u64, 10_000, 80_000] {
        group.bench_with_input(
            BenchmarkId::new("generate", difficulty),
            &difficulty,
            |b, &diff| {
                b.iter(|| {
                    black_box(
                        WorkGenerator
                            .generate(black_box(&digest), black_box(diff), &cancel)
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_pow_validation(c: &mut Criterion) {
    let digest = Hash::new([0x42; 32]);
    let difficulty = 10_000u64;
    let nonce = WorkGenerator
        .generate(&digest, difficulty, &AtomicBool::new(false))
        .unwrap();

    c.bench_function("pow_validate", |b| {
        b.iter(|| {
            black_box(validate_work(
                black_box(&digest),
                black_box(&nonce),
                black_box(difficulty),
            ))
        });
    });
}

criterion_group!(benches, bench_pow_generation, bench_pow_validation);
criterion_main!(benches);
