//! Algorithm EE: equilibrium expectation parameter estimation.

use rand::rngs::SmallRng;
use tracing::instrument;

use crate::attributes::AttributeTable;
use crate::config::EstimationConfig;
use crate::error::Result;
use crate::estimation::{DzaTraceRow, ThetaTraceRow};
use crate::graph::Graph;
use crate::sampler::BasicSampler;
use crate::statistics::Statistic;

/// Outcome of Algorithm EE: the final parameter vector, the final
/// per-coordinate derivative scale, and the emitted trace rows.
#[derive(Clone, Debug, PartialEq)]
pub struct AlgorithmEeOutcome {
    /// Parameter vector after `m_outer * m` inner iterations.
    pub theta: Vec<f64>,
    /// `D` after the final outer-loop rescaling.
    pub d: Vec<f64>,
    /// One theta trace row per inner iteration, across the whole run.
    pub theta_trace: Vec<ThetaTraceRow>,
    /// One dzA trace row per inner iteration, across the whole run.
    pub dza_trace: Vec<DzaTraceRow>,
}

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn mean(values: &[f64]) -> f64 {
    #[allow(
        clippy::cast_precision_loss,
        reason = "inner iteration counts stay far below f64's exact-integer range"
    )]
    let count = values.len() as f64;
    values.iter().sum::<f64>() / count
}

fn population_stddev(values: &[f64], mean_value: f64) -> f64 {
    #[allow(
        clippy::cast_precision_loss,
        reason = "inner iteration counts stay far below f64's exact-integer range"
    )]
    let count = values.len() as f64;
    let variance = values
        .iter()
        .map(|v| (v - mean_value) * (v - mean_value))
        .sum::<f64>()
        / count;
    variance.sqrt()
}

/// Runs Algorithm EE for `m_outer` outer iterations of `m` inner iterations
/// each, mutating `graph` in place.
///
/// `theta` and `d` are typically the outputs of [`crate::run_algorithm_s`].
///
/// # Errors
/// Propagates [`crate::error::ErgmError::NegativeChangeStatistic`] from the
/// underlying sampler calls.
#[instrument(
    skip(graph, attrs, statistics, config, theta, d, rng),
    fields(n = graph.n(), m_outer, m)
)]
#[allow(clippy::too_many_arguments, reason = "mirrors the reference algorithm's explicit parameter list")]
pub fn run_algorithm_ee(
    graph: &mut Graph,
    attrs: &AttributeTable,
    statistics: &[Statistic],
    config: &EstimationConfig,
    theta: Vec<f64>,
    d: Vec<f64>,
    m_outer: usize,
    m: usize,
    rng: &mut SmallRng,
) -> Result<AlgorithmEeOutcome> {
    let k = statistics.len();
    let mut theta = theta;
    let mut d = d;
    let mut dz_a = vec![0.0_f64; k];
    let mut theta_trace = Vec::with_capacity(m_outer * m);
    let mut dza_trace = Vec::with_capacity(m_outer * m);
    let mut sampler = BasicSampler::new(graph.n());
    let mut t_global = 0_i64;

    for _ in 0..m_outer {
        let mut theta_history = Vec::with_capacity(m);

        for _ in 0..m {
            let outcome = sampler.call(graph, attrs, statistics, &theta, config, true, rng)?;
            for l in 0..k {
                dz_a[l] += outcome.add_delta[l] - outcome.del_delta[l];
            }
            for l in 0..k {
                let da_l = d[l] * config.aca_ee();
                let step = -sign(dz_a[l]) * da_l * dz_a[l] * dz_a[l];
                theta[l] += step;
            }

            theta_trace.push(ThetaTraceRow {
                t: t_global,
                theta: theta.clone(),
                acceptance_rate: outcome.acceptance_rate,
            });
            dza_trace.push(DzaTraceRow {
                t: t_global,
                dz_a: dz_a.clone(),
            });
            theta_history.push(theta.clone());
            t_global += 1;
        }

        for l in 0..k {
            let column: Vec<f64> = theta_history.iter().map(|row| row[l]).collect();
            let mu = mean(&column);
            let sigma = population_stddev(&column, mu);
            let mu_floor = if mu.abs() < 1.0 { 1.0 } else { mu.abs() };
            let dd = sigma / mu_floor;
            d[l] *= config.comp_c() / dd;
        }
    }

    Ok(AlgorithmEeOutcome {
        theta,
        d,
        theta_trace,
        dza_trace,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn trace_row_count_matches_outer_times_inner() {
        let mut graph = Graph::new(6);
        for &(i, j) in &[(0, 1), (1, 2), (2, 0), (3, 4)] {
            graph.insert_arc(i, j).expect("fixture arcs are distinct");
        }
        let attrs = AttributeTable::new();
        let statistics = [Statistic::Arc, Statistic::Reciprocity];
        let config = EstimationConfig::builder()
            .with_sampler_proposals(4)
            .build()
            .expect("defaults valid");
        let mut rng = SmallRng::seed_from_u64(3);
        let theta = vec![0.0, 0.0];
        let d = vec![1.0, 1.0];

        let outcome = run_algorithm_ee(
            &mut graph, &attrs, &statistics, &config, theta, d, 3, 5, &mut rng,
        )
        .expect("algorithm ee succeeds");

        assert_eq!(outcome.theta_trace.len(), 15);
        assert_eq!(outcome.dza_trace.len(), 15);
        assert_eq!(
            outcome.theta_trace.iter().map(|row| row.t).collect::<Vec<_>>(),
            (0..15).collect::<Vec<_>>()
        );
    }

    #[test]
    fn graph_invariants_hold_after_run() {
        let mut graph = Graph::new(8);
        for &(i, j) in &[(0, 1), (1, 2), (2, 3), (3, 0)] {
            graph.insert_arc(i, j).expect("fixture arcs are distinct");
        }
        let attrs = AttributeTable::new();
        let statistics = [Statistic::Arc];
        let config = EstimationConfig::builder()
            .with_sampler_proposals(6)
            .build()
            .expect("defaults valid");
        let mut rng = SmallRng::seed_from_u64(4);

        run_algorithm_ee(
            &mut graph,
            &attrs,
            &statistics,
            &config,
            vec![0.0],
            vec![1.0],
            2,
            3,
            &mut rng,
        )
        .expect("algorithm ee succeeds");

        graph.check_invariants().expect("invariants hold");
    }
}
