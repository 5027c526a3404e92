//! Error types for the ERGM estimation core.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::statistics::Statistic;

/// Stable codes describing [`ErgmError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ErgmErrorCode {
    /// An estimation-config value was outside its valid range.
    InvalidConfig,
    /// An arc operation was attempted between a node and itself.
    SelfLoopArc,
    /// An arc was inserted that already existed.
    DuplicateArc,
    /// An arc was removed that did not exist.
    MissingArc,
    /// A node index fell outside the graph's allocated node count.
    NodeOutOfRange,
    /// A statistic was selected but its required attribute table is absent.
    MissingAttribute,
    /// A change-statistic function returned a negative value.
    NegativeChangeStatistic,
    /// Out-degree and in-degree totals disagreed after a mutation.
    ArcCountMismatch,
}

impl ErgmErrorCode {
    /// Return the stable machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidConfig => "ERGM_INVALID_CONFIG",
            Self::SelfLoopArc => "ERGM_SELF_LOOP_ARC",
            Self::DuplicateArc => "ERGM_DUPLICATE_ARC",
            Self::MissingArc => "ERGM_MISSING_ARC",
            Self::NodeOutOfRange => "ERGM_NODE_OUT_OF_RANGE",
            Self::MissingAttribute => "ERGM_MISSING_ATTRIBUTE",
            Self::NegativeChangeStatistic => "ERGM_NEGATIVE_CHANGE_STATISTIC",
            Self::ArcCountMismatch => "ERGM_ARC_COUNT_MISMATCH",
        }
    }
}

impl fmt::Display for ErgmErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type produced while constructing or running an [`crate::Estimator`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ErgmError {
    /// An estimation-config value was outside its valid range.
    #[error("invalid estimation config: {reason}")]
    InvalidConfig {
        /// Human-readable explanation of the invalid field.
        reason: String,
    },
    /// An arc operation was attempted between a node and itself.
    #[error("self-loops are not permitted (node {node})")]
    SelfLoopArc {
        /// The node that was proposed as both endpoints.
        node: usize,
    },
    /// An arc was inserted that already existed.
    #[error("arc {i}->{j} already exists")]
    DuplicateArc {
        /// Tail of the duplicate arc.
        i: usize,
        /// Head of the duplicate arc.
        j: usize,
    },
    /// An arc was removed that did not exist.
    #[error("arc {i}->{j} does not exist")]
    MissingArc {
        /// Tail of the missing arc.
        i: usize,
        /// Head of the missing arc.
        j: usize,
    },
    /// A node index fell outside the graph's allocated node count.
    #[error("node {node} is out of range for a graph of {n} nodes")]
    NodeOutOfRange {
        /// The offending node index.
        node: usize,
        /// Number of nodes the graph was constructed with.
        n: usize,
    },
    /// A statistic was selected but its required attribute table is absent.
    #[error(
        "statistic {statistic:?} requires the {attribute} attribute table, which was not loaded"
    )]
    MissingAttribute {
        /// The statistic whose requirement was not satisfied.
        statistic: Statistic,
        /// Name of the missing attribute table ("binary" or "categorical").
        attribute: &'static str,
    },
    /// A change-statistic function returned a negative value.
    #[error("statistic {statistic:?} returned a negative change value {value} for arc {i}->{j}")]
    NegativeChangeStatistic {
        /// The statistic that produced the negative value.
        statistic: Statistic,
        /// The offending value.
        value: f64,
        /// Tail of the candidate arc.
        i: usize,
        /// Head of the candidate arc.
        j: usize,
    },
    /// Out-degree and in-degree totals disagreed after a mutation.
    #[error("arc count mismatch: sum(out-degree)={out_total} sum(in-degree)={in_total}")]
    ArcCountMismatch {
        /// Sum of out-degrees over all nodes.
        out_total: usize,
        /// Sum of in-degrees over all nodes.
        in_total: usize,
    },
}

impl ErgmError {
    /// Retrieve the stable [`ErgmErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ErgmErrorCode {
        match self {
            Self::InvalidConfig { .. } => ErgmErrorCode::InvalidConfig,
            Self::SelfLoopArc { .. } => ErgmErrorCode::SelfLoopArc,
            Self::DuplicateArc { .. } => ErgmErrorCode::DuplicateArc,
            Self::MissingArc { .. } => ErgmErrorCode::MissingArc,
            Self::NodeOutOfRange { .. } => ErgmErrorCode::NodeOutOfRange,
            Self::MissingAttribute { .. } => ErgmErrorCode::MissingAttribute,
            Self::NegativeChangeStatistic { .. } => ErgmErrorCode::NegativeChangeStatistic,
            Self::ArcCountMismatch { .. } => ErgmErrorCode::ArcCountMismatch,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ErgmError>;
