//! Benchmark comparing the two SASA integrators on a synthetic cluster.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use molsasa::{Algorithm, Atom, SasaParams, compute};

/// Deterministic pseudo-random cluster with protein-like density.
fn cluster(n: usize) -> Vec<Atom> {
    let mut state = 0x5deece66du64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    let side = (n as f64).cbrt() * 3.5;
    (0..n)
        .map(|_| {
            Atom::new(
                next() * side,
                next() * side,
                next() * side,
                1.4 + next() * 0.6,
            )
        })
        .collect()
}

fn bench_integrators(c: &mut Criterion) {
    for &n in &[100usize, 600] {
        let atoms = cluster(n);
        let mut group = c.benchmark_group(format!("sasa_{n}_atoms"));
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function("shrake_rupley_100pts", |b| {
            let params = SasaParams::default();
            b.iter(|| {
                compute(
                    black_box(&atoms),
                    Algorithm::ShrakeRupley,
                    black_box(&params),
                )
                .unwrap()
            });
        });

        group.bench_function("lee_richards_0.25", |b| {
            let params = SasaParams::default();
            b.iter(|| {
                compute(
                    black_box(&atoms),
                    Algorithm::LeeRichards,
                    black_box(&params),
                )
                .unwrap()
            });
        });

        group.bench_function("lee_richards_0.25_4threads", |b| {
            let params = SasaParams {
                n_threads: 4,
                ..Default::default()
            };
            b.iter(|| {
                compute(
                    black_box(&atoms),
                    Algorithm::LeeRichards,
                    black_box(&params),
                )
                .unwrap()
            });
        });

        group.finish();
    }
}

criterion_group!(benches, bench_integrators);
criterion_main!(benches);
