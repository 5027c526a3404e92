//! Benchmarks incremental two-path matrix maintenance under a steady stream
//! of arc insert/remove toggles.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ergm_benches::ring_graph;

#[expect(
    clippy::expect_used,
    reason = "benchmark toggles an arc known to exist or be absent by construction"
)]
fn bench_arc_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("arc_toggle");
    for &n in &[64_usize, 256, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut graph = ring_graph(n);
            let (i, j) = (0, n / 2);
            b.iter(|| {
                graph.insert_arc(i, j).expect("arc absent before insert");
                graph.remove_arc(i, j).expect("arc present after insert");
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_arc_toggle);
criterion_main!(benches);
