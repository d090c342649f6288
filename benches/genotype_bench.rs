//! Criterion benchmarks for u-genotype operators.
//!
//! Measures the per-generation cost a driver pays for mutating, crossing
//! and copying genotypes of a few typical sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_genotype::gene::{Crossover, Gene, GeneOperators};
use u_genotype::genotype::{mutate_population, Genotype};
use u_genotype::random::create_rng;

// ===========================================================================
// Fixtures
// ===========================================================================

/// A mixed genotype: one quarter of each gene kind.
fn mixed_genotype(n: usize) -> Genotype {
    let blend = GeneOperators::default().with_crossover(Crossover::Blend { alpha: 0.5 });
    let genes = (0..n).map(|i| match i % 4 {
        0 => Gene::real(format!("w{i}"), 0.0, -1.0, 1.0)
            .and_then(|g| g.with_operators(blend))
            .unwrap(),
        1 => Gene::integer(format!("n{i}"), 8, 1, 64).unwrap(),
        2 => Gene::flag(format!("f{i}"), false).unwrap(),
        _ => Gene::choice(format!("c{i}"), ["relu", "tanh", "sigmoid", "gelu"], "relu").unwrap(),
    });
    Genotype::new(genes).unwrap()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_mutate(c: &mut Criterion) {
    let mut group = c.benchmark_group("genotype_mutate");
    for &size in &[8, 64, 512] {
        group.bench_with_input(BenchmarkId::new("strength_0.5", size), &size, |b, &size| {
            let mut g = mixed_genotype(size);
            let mut rng = create_rng(42);
            b.iter(|| black_box(g.mutate(0.5, &mut rng)));
        });
    }
    group.finish();
}

fn bench_cross(c: &mut Criterion) {
    let mut group = c.benchmark_group("genotype_cross");
    for &size in &[8, 64, 512] {
        group.bench_with_input(BenchmarkId::new("cross", size), &size, |b, &size| {
            let mut a = mixed_genotype(size);
            let mut peer = mixed_genotype(size);
            peer.mutate(1.0, &mut create_rng(7));
            let mut rng = create_rng(42);
            b.iter(|| a.cross(black_box(&peer), &mut rng).unwrap());
        });
    }
    group.finish();
}

fn bench_copy(c: &mut Criterion) {
    let g = mixed_genotype(512);
    c.bench_function("genotype_copy_512", |b| b.iter(|| black_box(g.copy())));
}

fn bench_population(c: &mut Criterion) {
    let mut population: Vec<Genotype> = (0..100).map(|_| mixed_genotype(64)).collect();
    c.bench_function("mutate_population_100x64", |b| {
        b.iter(|| black_box(mutate_population(&mut population, 0.2, 42)))
    });
}

criterion_group!(benches, bench_mutate, bench_cross, bench_copy, bench_population);
criterion_main!(benches);
