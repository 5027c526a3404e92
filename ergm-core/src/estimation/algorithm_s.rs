//! Algorithm S: burn-in and initial derivative calibration.

use rand::rngs::SmallRng;
use tracing::instrument;

use crate::attributes::AttributeTable;
use crate::config::EstimationConfig;
use crate::error::Result;
use crate::estimation::ThetaTraceRow;
use crate::graph::Graph;
use crate::sampler::BasicSampler;
use crate::statistics::Statistic;

/// Outcome of Algorithm S: the calibrated parameter vector, the derived
/// per-coordinate step-size scale `D_mean`, and the emitted trace rows.
#[derive(Clone, Debug, PartialEq)]
pub struct AlgorithmSOutcome {
    /// Parameter vector after `m1` calibration iterations.
    pub theta: Vec<f64>,
    /// `D_mean = M / D0`, elementwise, fed into Algorithm EE as the initial
    /// `D`.
    pub d_mean: Vec<f64>,
    /// One trace row per iteration, with `t` running from `-m1` to `-1`.
    pub trace: Vec<ThetaTraceRow>,
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

/// Runs Algorithm S for `m1` iterations against a fixed graph (the sampler is
/// always called with `perform_move = false`).
///
/// # Errors
/// Propagates [`crate::error::ErgmError::NegativeChangeStatistic`] from the
/// underlying sampler calls.
#[instrument(skip(graph, attrs, statistics, config, rng), fields(n = graph.n(), m1))]
pub fn run_algorithm_s(
    graph: &mut Graph,
    attrs: &AttributeTable,
    statistics: &[Statistic],
    config: &EstimationConfig,
    m1: usize,
    rng: &mut SmallRng,
) -> Result<AlgorithmSOutcome> {
    let k = statistics.len();
    let mut theta = vec![0.0_f64; k];
    let mut d0 = vec![0.0_f64; k];
    let mut trace = Vec::with_capacity(m1);
    let mut sampler = BasicSampler::new(graph.n());

    #[allow(
        clippy::cast_possible_wrap,
        reason = "iteration counts stay far below i64::MAX"
    )]
    let m1_signed = m1 as i64;

    for t in 0..m1 {
        let outcome = sampler.call(graph, attrs, statistics, &theta, config, false, rng)?;
        let dz_a: Vec<f64> = outcome
            .del_delta
            .iter()
            .zip(outcome.add_delta.iter())
            .map(|(del, add)| del - add)
            .collect();
        let sum_delta: Vec<f64> = outcome
            .add_delta
            .iter()
            .zip(outcome.del_delta.iter())
            .map(|(add, del)| add + del)
            .collect();
        for (d0_l, dz_l) in d0.iter_mut().zip(dz_a.iter()) {
            *d0_l += dz_l * dz_l;
        }
        for l in 0..k {
            let da_l = if sum_delta[l] != 0.0 {
                config.aca_s() / (sum_delta[l] * sum_delta[l])
            } else {
                0.0
            };
            let step = sign(dz_a[l]) * da_l * dz_a[l] * dz_a[l];
            theta[l] += step.min(config.maxstep_s());
        }

        #[allow(
            clippy::cast_possible_wrap,
            reason = "iteration counts stay far below i64::MAX"
        )]
        let t_signed = t as i64;
        trace.push(ThetaTraceRow {
            t: t_signed - m1_signed,
            theta: theta.clone(),
            acceptance_rate: outcome.acceptance_rate,
        });
    }

    #[allow(
        clippy::cast_precision_loss,
        reason = "proposal counts stay far below f64's exact-integer range"
    )]
    let m = config.sampler_proposals() as f64;
    // Division by a zero D0 (a statistic with no observed add/delete
    // imbalance across the whole run) yields IEEE-754 infinity, matching
    // the reference implementation's unchecked `sampler_m / D0`.
    let d_mean: Vec<f64> = d0.iter().map(|d0_l| m / d0_l).collect();

    Ok(AlgorithmSOutcome {
        theta,
        d_mean,
        trace,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn runs_requested_number_of_iterations() {
        let mut graph = Graph::new(6);
        for &(i, j) in &[(0, 1), (1, 2), (2, 0)] {
            graph.insert_arc(i, j).expect("fixture arcs are distinct");
        }
        let attrs = AttributeTable::new();
        let statistics = [Statistic::Arc, Statistic::Reciprocity];
        let config = EstimationConfig::builder()
            .with_sampler_proposals(4)
            .build()
            .expect("defaults valid");
        let mut rng = SmallRng::seed_from_u64(1);

        let outcome = run_algorithm_s(&mut graph, &attrs, &statistics, &config, 5, &mut rng)
            .expect("algorithm s succeeds");

        assert_eq!(outcome.trace.len(), 5);
        assert_eq!(outcome.trace.first().expect("non-empty").t, -5);
        assert_eq!(outcome.trace.last().expect("non-empty").t, -1);
        assert_eq!(outcome.theta.len(), 2);
        assert_eq!(outcome.d_mean.len(), 2);
    }

    #[test]
    fn zero_iterations_leaves_theta_at_zero() {
        let mut graph = Graph::new(4);
        let attrs = AttributeTable::new();
        let statistics = [Statistic::Arc];
        let config = EstimationConfig::builder().build().expect("defaults valid");
        let mut rng = SmallRng::seed_from_u64(2);

        let outcome = run_algorithm_s(&mut graph, &attrs, &statistics, &config, 0, &mut rng)
            .expect("algorithm s succeeds");

        assert!(outcome.trace.is_empty());
        assert_eq!(outcome.theta, vec![0.0]);
    }
}
