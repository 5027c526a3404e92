//! Benchmarks the Metropolis-Hastings basic sampler at realistic proposal
//! counts.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ergm_benches::ring_graph;
use ergm_core::{AttributeTable, BasicSampler, EstimationConfig, Statistic};
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[expect(
    clippy::expect_used,
    reason = "benchmark fixtures use hard-coded valid configuration"
)]
fn bench_sampler_call(c: &mut Criterion) {
    let attrs = AttributeTable::new();
    let statistics = [
        Statistic::Arc,
        Statistic::Reciprocity,
        Statistic::AltInStars,
        Statistic::AltOutStars,
        Statistic::AltKTrianglesT,
    ];
    let theta = vec![0.0_f64; statistics.len()];

    let mut group = c.benchmark_group("sampler_call");
    for &n in &[64_usize, 256, 1024] {
        let config = EstimationConfig::builder()
            .with_sampler_proposals(1000)
            .build()
            .expect("default sampler proposal count is valid");
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut graph = ring_graph(n);
            let mut sampler = BasicSampler::new(n);
            let mut rng = SmallRng::seed_from_u64(42);
            b.iter(|| {
                sampler
                    .call(&mut graph, &attrs, &statistics, &theta, &config, true, &mut rng)
                    .expect("change statistics stay non-negative on a ring fixture")
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sampler_call);
criterion_main!(benches);
