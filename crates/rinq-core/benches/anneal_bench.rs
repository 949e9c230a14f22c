use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use rinq_core::{
    construct_qubo, Adjacency, ContinuousAnnealer, ContinuousConfig, DiscreteAnnealer,
    SampleParams, SimulatedAnnealingSampler,
};

/// Ring of `n` nodes with a chord every fifth node.
fn ring_with_chords(n: usize) -> Adjacency {
    let mut m = Array2::zeros((n, n));
    for i in 0..n {
        let next = (i + 1) % n;
        m[[i, next]] = 1.0;
        m[[next, i]] = 1.0;
        if i % 5 == 0 {
            let across = (i + n / 2) % n;
            if across != i {
                m[[i, across]] = 1.0;
                m[[across, i]] = 1.0;
            }
        }
    }
    Adjacency::new(m).unwrap()
}

fn bench_formulate(c: &mut Criterion) {
    let adj = ring_with_chords(200);
    c.bench_function("construct_qubo_200_nodes", |b| {
        b.iter(|| construct_qubo(black_box(&adj), 10, None, None))
    });
}

fn bench_solvers(c: &mut Criterion) {
    let adj = ring_with_chords(50);
    let q = construct_qubo(&adj, 5, None, None).unwrap();

    let discrete = DiscreteAnnealer::new(
        SimulatedAnnealingSampler::default(),
        SampleParams {
            num_reads: 100,
            num_sweeps: 500,
            ..Default::default()
        },
    );
    c.bench_function("discrete_50_nodes_100_reads", |b| {
        b.iter(|| discrete.solve(black_box(&q), 5))
    });

    let continuous = ContinuousAnnealer::new(ContinuousConfig {
        num_reads: 20,
        ..Default::default()
    });
    c.bench_function("continuous_50_nodes_20_reads", |b| {
        b.iter(|| continuous.solve(black_box(&q), 5))
    });
}

criterion_group!(benches, bench_formulate, bench_solvers);
criterion_main!(benches);
