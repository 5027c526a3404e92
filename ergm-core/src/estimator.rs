//! Top-level orchestration tying the graph, attributes, statistics, and
//! two-phase estimation procedure together.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::instrument;

use crate::attributes::AttributeTable;
use crate::config::EstimationConfig;
use crate::error::{ErgmError, Result};
use crate::estimation::{self, AlgorithmEeOutcome, AlgorithmSOutcome};
use crate::graph::Graph;
use crate::statistics::Statistic;

/// Outcome of running Algorithm S followed by Algorithm EE back-to-back.
#[derive(Clone, Debug, PartialEq)]
pub struct EstimationOutcome {
    /// Result of the Algorithm S phase.
    pub algorithm_s: AlgorithmSOutcome,
    /// Result of the Algorithm EE phase.
    pub algorithm_ee: AlgorithmEeOutcome,
}

/// Owns a graph, its attribute tables, a bound statistic list, and the
/// estimation configuration, and drives Algorithm S / Algorithm EE.
///
/// # Examples
/// ```
/// use ergm_core::{AttributeTable, EstimationConfig, Estimator, Graph, Statistic};
///
/// let mut graph = Graph::new(4);
/// graph.insert_arc(0, 1).expect("fixture arc");
/// let attrs = AttributeTable::new();
/// let config = EstimationConfig::builder().build().expect("defaults valid");
/// let mut estimator = Estimator::new(graph, attrs, vec![Statistic::Arc], config, 7)
///     .expect("single Arc statistic needs no attribute table");
/// let outcome = estimator.estimate(2, 2, 2).expect("estimation run succeeds");
/// assert_eq!(outcome.algorithm_s.trace.len(), 2);
/// assert_eq!(outcome.algorithm_ee.theta_trace.len(), 4);
/// ```
#[derive(Debug)]
pub struct Estimator {
    graph: Graph,
    attrs: AttributeTable,
    statistics: Vec<Statistic>,
    config: EstimationConfig,
    rng: SmallRng,
}

impl Estimator {
    /// Builds an estimator, validating that every selected statistic's
    /// required attribute table is present.
    ///
    /// # Errors
    /// Returns [`ErgmError::MissingAttribute`] if a selected statistic needs
    /// an attribute table that was not supplied.
    #[instrument(skip(graph, attrs, statistics, config), fields(n = graph.n(), k = statistics.len()))]
    pub fn new(
        graph: Graph,
        attrs: AttributeTable,
        statistics: Vec<Statistic>,
        config: EstimationConfig,
        seed: u64,
    ) -> Result<Self> {
        for &statistic in &statistics {
            match statistic.required_attribute() {
                Some(crate::statistics::RequiredAttribute::Binary) if attrs.binary().is_none() => {
                    return Err(ErgmError::MissingAttribute {
                        statistic,
                        attribute: "binary",
                    });
                }
                Some(crate::statistics::RequiredAttribute::Categorical)
                    if attrs.categorical().is_none() =>
                {
                    return Err(ErgmError::MissingAttribute {
                        statistic,
                        attribute: "categorical",
                    });
                }
                _ => {}
            }
        }

        Ok(Self {
            graph,
            attrs,
            statistics,
            config,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// The underlying graph, including any mutations from a prior
    /// [`Estimator::run_algorithm_ee`] or [`Estimator::estimate`] call.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The bound statistic list, in the order used for every theta/dzA
    /// coordinate.
    #[must_use]
    pub fn statistics(&self) -> &[Statistic] {
        &self.statistics
    }

    /// Runs Algorithm S (burn-in / derivative calibration) for `m1`
    /// iterations. The graph is left unchanged.
    ///
    /// # Errors
    /// Propagates [`ErgmError::NegativeChangeStatistic`] from the sampler.
    #[instrument(skip(self), fields(n = self.graph.n(), m1))]
    pub fn run_algorithm_s(&mut self, m1: usize) -> Result<AlgorithmSOutcome> {
        estimation::run_algorithm_s(
            &mut self.graph,
            &self.attrs,
            &self.statistics,
            &self.config,
            m1,
            &mut self.rng,
        )
    }

    /// Runs Algorithm EE (equilibrium expectation) for `m_outer` outer
    /// iterations of `m` inner iterations each, mutating the graph in place.
    ///
    /// # Errors
    /// Propagates [`ErgmError::NegativeChangeStatistic`] from the sampler.
    #[instrument(skip(self, theta, d), fields(n = self.graph.n(), m_outer, m))]
    pub fn run_algorithm_ee(
        &mut self,
        theta: Vec<f64>,
        d: Vec<f64>,
        m_outer: usize,
        m: usize,
    ) -> Result<AlgorithmEeOutcome> {
        estimation::run_algorithm_ee(
            &mut self.graph,
            &self.attrs,
            &self.statistics,
            &self.config,
            theta,
            d,
            m_outer,
            m,
            &mut self.rng,
        )
    }

    /// Runs Algorithm S then Algorithm EE back-to-back, the common driver
    /// entry point.
    ///
    /// # Errors
    /// Propagates [`ErgmError::NegativeChangeStatistic`] from either phase.
    #[instrument(skip(self), fields(n = self.graph.n(), m1, m_outer, m))]
    pub fn estimate(&mut self, m1: usize, m_outer: usize, m: usize) -> Result<EstimationOutcome> {
        let algorithm_s = self.run_algorithm_s(m1)?;
        let algorithm_ee =
            self.run_algorithm_ee(algorithm_s.theta.clone(), algorithm_s.d_mean.clone(), m_outer, m)?;
        Ok(EstimationOutcome {
            algorithm_s,
            algorithm_ee,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_sender_without_binary_attribute() {
        let graph = Graph::new(3);
        let attrs = AttributeTable::new();
        let err = Estimator::new(graph, attrs, vec![Statistic::Sender], EstimationConfig::builder().build().expect("defaults valid"), 1)
            .expect_err("Sender requires a binary attribute table");
        assert!(matches!(err, ErgmError::MissingAttribute { .. }));
    }

    #[test]
    fn accepts_matching_with_categorical_attribute() {
        let graph = Graph::new(3);
        let attrs = AttributeTable::new().with_categorical("group", vec![0, 1, 0]);
        let estimator = Estimator::new(
            graph,
            attrs,
            vec![Statistic::Matching],
            EstimationConfig::builder().build().expect("defaults valid"),
            2,
        );
        assert!(estimator.is_ok());
    }

    #[test]
    fn scenario_d_trace_row_count() {
        let n = 20;
        let mut graph = Graph::new(n);
        for i in 0..n {
            let j = (i + 1) % n;
            graph.insert_arc(i, j).expect("cycle arcs are distinct");
        }
        let attrs = AttributeTable::new();
        let statistics = vec![
            Statistic::Arc,
            Statistic::Reciprocity,
            Statistic::AltInStars,
            Statistic::AltOutStars,
            Statistic::AltKTrianglesT,
            Statistic::AltTwoPathsTD,
            Statistic::AltKTrianglesC,
        ];
        let config = EstimationConfig::builder()
            .with_sampler_proposals(10)
            .build()
            .expect("defaults valid");
        let mut estimator = Estimator::new(graph, attrs, statistics, config, 99)
            .expect("none of these statistics require attributes");

        let m1 = 4;
        let m_outer = 3;
        let m = 2;
        let outcome = estimator
            .estimate(m1, m_outer, m)
            .expect("estimation succeeds on a small fixture");

        assert_eq!(outcome.algorithm_s.trace.len(), m1);
        assert_eq!(outcome.algorithm_ee.theta_trace.len(), m_outer * m);
        estimator.graph().check_invariants().expect("invariants hold");
    }
}
