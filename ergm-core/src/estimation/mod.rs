//! Two-phase parameter estimation: Algorithm S followed by Algorithm EE.

mod algorithm_ee;
mod algorithm_s;

pub use algorithm_ee::{AlgorithmEeOutcome, run_algorithm_ee};
pub use algorithm_s::{AlgorithmSOutcome, run_algorithm_s};

/// One row of the theta trace, emitted once per inner sampler iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct ThetaTraceRow {
    /// Iteration index. Negative during Algorithm S (`t - M1`), non-negative
    /// and monotonically increasing across the whole of Algorithm EE.
    pub t: i64,
    /// Parameter vector after this iteration's step.
    pub theta: Vec<f64>,
    /// Sampler acceptance rate for this iteration.
    pub acceptance_rate: f64,
}

/// One row of the dzA trace, emitted only during Algorithm EE.
#[derive(Clone, Debug, PartialEq)]
pub struct DzaTraceRow {
    /// Iteration index, matching the corresponding [`ThetaTraceRow::t`].
    pub t: i64,
    /// Running imbalance vector after this iteration.
    pub dz_a: Vec<f64>,
}
