//! Shared fixtures for the ERGM estimator benchmarks.

use ergm_core::Graph;

/// Builds a directed ring graph on `n` nodes (`i -> (i+1) % n` for every
/// `i`), a cheap, reproducible fixture with non-trivial two-path structure.
#[must_use]
#[expect(
    clippy::expect_used,
    reason = "ring edges are distinct and i != j by construction for n >= 2"
)]
pub fn ring_graph(n: usize) -> Graph {
    let mut graph = Graph::new(n);
    for i in 0..n {
        let j = (i + 1) % n;
        if i != j {
            graph.insert_arc(i, j).expect("ring edges are distinct");
        }
    }
    graph
}
