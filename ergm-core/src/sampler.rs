//! Metropolis–Hastings basic sampler.

use rand::Rng;
use rand::rngs::SmallRng;

use crate::attributes::AttributeTable;
use crate::config::EstimationConfig;
use crate::error::{ErgmError, Result};
use crate::graph::Graph;
use crate::statistics::Statistic;

/// Result of one basic-sampler call: `M` Metropolis–Hastings proposals
/// against the linear-exponential model parameterized by `theta`.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplerOutcome {
    /// Fraction of the `M` proposals accepted.
    pub acceptance_rate: f64,
    /// Change-statistic vector accumulated over accepted add moves.
    pub add_delta: Vec<f64>,
    /// Change-statistic vector accumulated over accepted delete moves.
    pub del_delta: Vec<f64>,
}

/// Samples two distinct node indices without replacement from `0..n`, via
/// partial Fisher–Yates over a reusable scratch buffer so the hot loop makes
/// no allocations.
#[derive(Clone, Debug)]
pub struct BasicSampler {
    scratch: Vec<usize>,
}

impl BasicSampler {
    /// Creates a sampler for a graph with `n` nodes.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            scratch: (0..n).collect(),
        }
    }

    fn sample_two_distinct(&mut self, rng: &mut SmallRng) -> (usize, usize) {
        let n = self.scratch.len();
        let pos_a = rng.gen_range(0..n);
        self.scratch.swap(pos_a, n - 1);
        let a = self.scratch[n - 1];
        let pos_b = rng.gen_range(0..n - 1);
        self.scratch.swap(pos_b, n - 2);
        let b = self.scratch[n - 2];
        (a, b)
    }

    /// Runs one basic-sampler call: `config.sampler_proposals()` proposals
    /// against `theta`, mutating `graph` when `perform_move` is set.
    ///
    /// When `perform_move` is `false`, `graph` (including its two-path
    /// matrices) is guaranteed bit-identical on return to its state on
    /// entry.
    ///
    /// # Errors
    /// Returns [`ErgmError::NegativeChangeStatistic`] if any bound
    /// statistic returns a negative value for a proposed arc.
    pub fn call(
        &mut self,
        graph: &mut Graph,
        attrs: &AttributeTable,
        statistics: &[Statistic],
        theta: &[f64],
        config: &EstimationConfig,
        perform_move: bool,
        rng: &mut SmallRng,
    ) -> Result<SamplerOutcome> {
        let k = statistics.len();
        let m = config.sampler_proposals();
        let mut accepted = 0_usize;
        let mut add_delta = vec![0.0_f64; k];
        let mut del_delta = vec![0.0_f64; k];
        let mut deltas = vec![0.0_f64; k];

        for _ in 0..m {
            let (i, j) = self.sample_two_distinct(rng);
            let is_delete = graph.has_arc(i, j);
            if is_delete {
                graph.remove_arc(i, j)?;
            }

            for (statistic, slot) in statistics.iter().zip(deltas.iter_mut()) {
                let value = statistic.delta(graph, attrs, config.lambda(), i, j);
                if value < 0.0 {
                    return Err(ErgmError::NegativeChangeStatistic {
                        statistic: *statistic,
                        value,
                        i,
                        j,
                    });
                }
                *slot = value;
            }

            let sign = if is_delete { -1.0 } else { 1.0 };
            let total: f64 = theta
                .iter()
                .zip(deltas.iter())
                .map(|(t, d)| t * sign * d)
                .sum();

            let u: f64 = rng.gen_range(0.0..1.0);
            if u < total.exp() {
                accepted += 1;
                if perform_move {
                    if !is_delete {
                        graph.insert_arc(i, j)?;
                    }
                } else if is_delete {
                    graph.insert_arc(i, j)?;
                }
                let accumulator = if is_delete {
                    &mut del_delta
                } else {
                    &mut add_delta
                };
                for (acc, delta) in accumulator.iter_mut().zip(deltas.iter()) {
                    *acc += delta;
                }
            } else if is_delete {
                graph.insert_arc(i, j)?;
            }
        }

        #[allow(
            clippy::cast_precision_loss,
            reason = "proposal counts stay far below f64's exact-integer range"
        )]
        let acceptance_rate = accepted as f64 / m as f64;
        Ok(SamplerOutcome {
            acceptance_rate,
            add_delta,
            del_delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::statistics::Statistic;

    #[test]
    fn non_mutating_call_restores_graph_state() {
        let mut graph = Graph::new(6);
        for &(i, j) in &[(0, 1), (1, 2), (2, 3)] {
            graph.insert_arc(i, j).expect("fixture arcs are distinct");
        }
        let before_arcs: Vec<(usize, usize)> = (0..6)
            .flat_map(|i| (0..6).map(move |j| (i, j)))
            .filter(|&(i, j)| graph.has_arc(i, j))
            .collect();
        let before_two_path: Vec<(i64, i64, i64)> = (0..6)
            .flat_map(|u| (0..6).map(move |v| (u, v)))
            .map(|(u, v)| {
                (
                    graph.two_path().out_two_path(u, v),
                    graph.two_path().in_two_path(u, v),
                    graph.two_path().mix_two_path(u, v),
                )
            })
            .collect();
        let attrs = AttributeTable::new();
        let statistics = [Statistic::Arc];
        let theta = [0.0];
        let config = EstimationConfig::builder().build().expect("defaults valid");
        let mut sampler = BasicSampler::new(graph.n());
        let mut rng = SmallRng::seed_from_u64(42);

        sampler
            .call(&mut graph, &attrs, &statistics, &theta, &config, false, &mut rng)
            .expect("sampler call succeeds");

        let after_arcs: Vec<(usize, usize)> = (0..6)
            .flat_map(|i| (0..6).map(move |j| (i, j)))
            .filter(|&(i, j)| graph.has_arc(i, j))
            .collect();
        let after_two_path: Vec<(i64, i64, i64)> = (0..6)
            .flat_map(|u| (0..6).map(move |v| (u, v)))
            .map(|(u, v)| {
                (
                    graph.two_path().out_two_path(u, v),
                    graph.two_path().in_two_path(u, v),
                    graph.two_path().mix_two_path(u, v),
                )
            })
            .collect();

        assert_eq!(before_arcs, after_arcs);
        assert_eq!(before_two_path, after_two_path);
    }

    #[test]
    fn zero_theta_accepts_every_proposal() {
        let mut graph = Graph::new(2);
        let attrs = AttributeTable::new();
        let statistics = [Statistic::Arc];
        let theta = [0.0];
        let config = EstimationConfig::builder()
            .with_sampler_proposals(1)
            .build()
            .expect("defaults valid");
        let mut sampler = BasicSampler::new(graph.n());
        let mut rng = SmallRng::seed_from_u64(7);

        let outcome = sampler
            .call(&mut graph, &attrs, &statistics, &theta, &config, true, &mut rng)
            .expect("sampler call succeeds");

        assert_eq!(outcome.acceptance_rate, 1.0);
        assert_eq!(graph.arc_count(), 1);
    }
}
