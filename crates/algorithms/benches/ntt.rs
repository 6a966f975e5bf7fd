//! Benchmarks for Number Theoretic Transform (NTT) operations
//!
//! This benchmark suite measures the performance of:
//! - Forward and inverse NTT over the Kyber ring
//! - NTT-domain pointwise multiplication
//! - The centered binomial sampler

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use qcrypt_algorithms::poly::polynomial::Polynomial;
use qcrypt_algorithms::poly::sampling::{cbd_eta2, CBD_ETA2_BYTES};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn random_poly(rng: &mut ChaCha20Rng) -> Polynomial {
    let mut p = Polynomial::zero();
    for c in p.coeffs.iter_mut() {
        *c = rng.gen_range(0..3329);
    }
    p
}

fn bench_forward_ntt(c: &mut Criterion) {
    let mut group = c.benchmark_group("kyber_ntt");
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let poly = random_poly(&mut rng);

    group.bench_function("forward", |b| {
        b.iter_batched(
            || poly.clone(),
            |mut p| {
                p.ntt_inplace();
                black_box(p)
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_inverse_ntt(c: &mut Criterion) {
    let mut group = c.benchmark_group("kyber_ntt");
    let mut rng = ChaCha20Rng::seed_from_u64(43);
    let mut poly = random_poly(&mut rng);
    poly.ntt_inplace();

    group.bench_function("inverse", |b| {
        b.iter_batched(
            || poly.clone(),
            |mut p| {
                p.from_ntt_inplace();
                black_box(p)
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_pointwise_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("kyber_ntt");
    let mut rng = ChaCha20Rng::seed_from_u64(44);
    let mut a = random_poly(&mut rng);
    let mut b_poly = random_poly(&mut rng);
    a.ntt_inplace();
    b_poly.ntt_inplace();

    group.bench_function("pointwise_mul", |bench| {
        bench.iter(|| black_box(a.ntt_mul(&b_poly)))
    });

    group.finish();
}

fn bench_cbd(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(45);
    let mut buf = vec![0u8; CBD_ETA2_BYTES];
    rng.fill(buf.as_mut_slice());

    c.bench_function("cbd_eta2", |b| b.iter(|| cbd_eta2(black_box(&buf)).unwrap()));
}

criterion_group!(
    benches,
    bench_forward_ntt,
    bench_inverse_ntt,
    bench_pointwise_mul,
    bench_cbd
);
criterion_main!(benches);
