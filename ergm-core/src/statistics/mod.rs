//! The change-statistics library: one pure function per sufficient statistic.

mod formulas;

use crate::attributes::AttributeTable;
use crate::graph::Graph;

/// Which attribute table, if any, a [`Statistic`] must read.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RequiredAttribute {
    /// The statistic reads the binary attribute table.
    Binary,
    /// The statistic reads the categorical attribute table.
    Categorical,
}

impl RequiredAttribute {
    /// Human-readable name used in error messages and CLI help.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Categorical => "categorical",
        }
    }
}

/// A selectable ERGM sufficient statistic.
///
/// Dispatch is a monomorphic `match` in [`Statistic::delta`] rather than
/// virtual dispatch, since the sampler's inner loop calls it millions of
/// times per estimation run.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Statistic {
    /// Edge count.
    Arc,
    /// Mutuality / reciprocated arcs.
    Reciprocity,
    /// Alternating k-in-stars (popularity spread).
    AltInStars,
    /// Alternating k-out-stars (activity spread).
    AltOutStars,
    /// Alternating k-triangles, transitive closure.
    AltKTrianglesT,
    /// Alternating k-triangles, cyclic closure.
    AltKTrianglesC,
    /// Alternating two-paths, transitive arm (multiple two-paths).
    AltTwoPathsT,
    /// Alternating two-paths, "D" arm (shared popularity).
    AltTwoPathsD,
    /// Average of the transitive and "D" alternating two-path arms.
    AltTwoPathsTD,
    /// Binary-attribute sender effect.
    Sender,
    /// Binary-attribute receiver effect.
    Receiver,
    /// Binary-attribute interaction effect.
    Interaction,
    /// Categorical-attribute matching effect.
    Matching,
    /// Categorical matching conditioned on reciprocation.
    MatchingReciprocity,
    /// Categorical-attribute mismatching effect.
    Mismatching,
    /// Categorical mismatching conditioned on reciprocation.
    MismatchingReciprocity,
}

impl Statistic {
    /// All statistics, in the canonical order used when no explicit
    /// selection is supplied.
    pub const ALL: [Self; 16] = [
        Self::Arc,
        Self::Reciprocity,
        Self::AltInStars,
        Self::AltOutStars,
        Self::AltKTrianglesT,
        Self::AltKTrianglesC,
        Self::AltTwoPathsT,
        Self::AltTwoPathsD,
        Self::AltTwoPathsTD,
        Self::Sender,
        Self::Receiver,
        Self::Interaction,
        Self::Matching,
        Self::MatchingReciprocity,
        Self::Mismatching,
        Self::MismatchingReciprocity,
    ];

    /// Display label used in trace file headers, matching the reference
    /// driver's short-form names (`"AinS"`, `"AT-T"`, `"A2P-TD"`, ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Arc => "Arc",
            Self::Reciprocity => "Reciprocity",
            Self::AltInStars => "AinS",
            Self::AltOutStars => "AoutS",
            Self::AltKTrianglesT => "AT-T",
            Self::AltKTrianglesC => "AT-C",
            Self::AltTwoPathsT => "A2P-T",
            Self::AltTwoPathsD => "A2P-D",
            Self::AltTwoPathsTD => "A2P-TD",
            Self::Sender => "Sender",
            Self::Receiver => "Receiver",
            Self::Interaction => "Interaction",
            Self::Matching => "Matching",
            Self::MatchingReciprocity => "MatchingReciprocity",
            Self::Mismatching => "Mismatching",
            Self::MismatchingReciprocity => "MismatchingReciprocity",
        }
    }

    /// The attribute table this statistic requires, if any.
    #[must_use]
    pub const fn required_attribute(self) -> Option<RequiredAttribute> {
        match self {
            Self::Sender | Self::Receiver | Self::Interaction => Some(RequiredAttribute::Binary),
            Self::Matching
            | Self::MatchingReciprocity
            | Self::Mismatching
            | Self::MismatchingReciprocity => Some(RequiredAttribute::Categorical),
            Self::Arc
            | Self::Reciprocity
            | Self::AltInStars
            | Self::AltOutStars
            | Self::AltKTrianglesT
            | Self::AltKTrianglesC
            | Self::AltTwoPathsT
            | Self::AltTwoPathsD
            | Self::AltTwoPathsTD => None,
        }
    }

    /// Computes the change statistic for candidate arc `i -> j` against the
    /// current graph and attribute state.
    ///
    /// `graph` must reflect the state with the candidate arc *absent*
    /// (the sampler removes a to-be-deleted arc before calling this).
    #[must_use]
    pub fn delta(self, graph: &Graph, attrs: &AttributeTable, lambda: f64, i: usize, j: usize) -> f64 {
        match self {
            Self::Arc => formulas::arc(graph, i, j),
            Self::Reciprocity => formulas::reciprocity(graph, i, j),
            Self::AltInStars => formulas::alt_in_stars(graph, lambda, i, j),
            Self::AltOutStars => formulas::alt_out_stars(graph, lambda, i, j),
            Self::AltKTrianglesT => formulas::alt_k_triangles_t(graph, lambda, i, j),
            Self::AltKTrianglesC => formulas::alt_k_triangles_c(graph, lambda, i, j),
            Self::AltTwoPathsT => formulas::alt_two_paths_t(graph, lambda, i, j),
            Self::AltTwoPathsD => formulas::alt_two_paths_d(graph, lambda, i, j),
            Self::AltTwoPathsTD => formulas::alt_two_paths_td(graph, lambda, i, j),
            Self::Sender => formulas::sender(graph, attrs, i, j),
            Self::Receiver => formulas::receiver(graph, attrs, i, j),
            Self::Interaction => formulas::interaction(graph, attrs, i, j),
            Self::Matching => formulas::matching(graph, attrs, i, j),
            Self::MatchingReciprocity => formulas::matching_reciprocity(graph, attrs, i, j),
            Self::Mismatching => formulas::mismatching(graph, attrs, i, j),
            Self::MismatchingReciprocity => formulas::mismatching_reciprocity(graph, attrs, i, j),
        }
    }
}
