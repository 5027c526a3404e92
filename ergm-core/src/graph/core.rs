//! Mutable directed graph store with incremental two-path accounting.

use std::collections::HashSet;

use crate::error::{ErgmError, Result};
use crate::graph::twopath::TwoPathMatrices;

/// A directed graph on nodes `0..n`, with out/in adjacency kept exactly
/// synchronized and two-path count matrices maintained incrementally on every
/// arc toggle.
///
/// # Examples
/// ```
/// use ergm_core::Graph;
///
/// let mut graph = Graph::new(3);
/// graph.insert_arc(0, 1).expect("0 != 1 and arc absent");
/// assert!(graph.has_arc(0, 1));
/// assert_eq!(graph.out_degree(0), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Graph {
    n: usize,
    out: Vec<HashSet<usize>>,
    in_: Vec<HashSet<usize>>,
    two_path: TwoPathMatrices,
}

impl Graph {
    /// Creates an empty graph on `n` nodes.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            n,
            out: vec![HashSet::new(); n],
            in_: vec![HashSet::new(); n],
            two_path: TwoPathMatrices::new(n),
        }
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Total number of arcs currently present.
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.out.iter().map(HashSet::len).sum()
    }

    /// Density `|arcs| / (n * (n - 1))`. Zero when `n < 2`.
    #[must_use]
    pub fn density(&self) -> f64 {
        if self.n < 2 {
            return 0.0;
        }
        let possible = self.n * (self.n - 1);
        #[allow(
            clippy::cast_precision_loss,
            reason = "node/arc counts stay well under f64's exact-integer range"
        )]
        let ratio = self.arc_count() as f64 / possible as f64;
        ratio
    }

    /// Returns `true` if arc `i -> j` is present.
    #[must_use]
    pub fn has_arc(&self, i: usize, j: usize) -> bool {
        self.out[i].contains(&j)
    }

    /// Out-degree of node `i`.
    #[must_use]
    pub fn out_degree(&self, i: usize) -> usize {
        self.out[i].len()
    }

    /// In-degree of node `j`.
    #[must_use]
    pub fn in_degree(&self, j: usize) -> usize {
        self.in_[j].len()
    }

    /// Iterator over the out-neighbours of `i`.
    pub fn out_iter(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.out[i].iter().copied()
    }

    /// Iterator over the in-neighbours of `j`.
    pub fn in_iter(&self, j: usize) -> impl Iterator<Item = usize> + '_ {
        self.in_[j].iter().copied()
    }

    /// Access to the incrementally maintained two-path matrices.
    #[must_use]
    pub const fn two_path(&self) -> &TwoPathMatrices {
        &self.two_path
    }

    /// Inserts arc `i -> j`.
    ///
    /// # Errors
    /// Returns [`ErgmError::SelfLoopArc`] if `i == j`, or
    /// [`ErgmError::NodeOutOfRange`] if either index is out of range, or
    /// [`ErgmError::DuplicateArc`] if the arc is already present.
    pub fn insert_arc(&mut self, i: usize, j: usize) -> Result<()> {
        self.validate_endpoints(i, j)?;
        if self.has_arc(i, j) {
            return Err(ErgmError::DuplicateArc { i, j });
        }
        self.out[i].insert(j);
        self.in_[j].insert(i);
        self.two_path
            .on_toggle(i, j, 1, |a, b| self.out[a].contains(&b));
        Ok(())
    }

    /// Removes arc `i -> j`.
    ///
    /// # Errors
    /// Returns [`ErgmError::NodeOutOfRange`] if either index is out of range,
    /// or [`ErgmError::MissingArc`] if the arc is not present.
    pub fn remove_arc(&mut self, i: usize, j: usize) -> Result<()> {
        self.validate_range(i)?;
        self.validate_range(j)?;
        if !self.has_arc(i, j) {
            return Err(ErgmError::MissingArc { i, j });
        }
        self.out[i].remove(&j);
        self.in_[j].remove(&i);
        self.two_path
            .on_toggle(i, j, -1, |a, b| self.out[a].contains(&b));
        Ok(())
    }

    /// Verifies the arc-count and adjacency-symmetry invariants from scratch.
    ///
    /// # Errors
    /// Returns [`ErgmError::ArcCountMismatch`] if `Out`/`In` disagree on the
    /// total arc count.
    pub fn check_invariants(&self) -> Result<()> {
        let out_total: usize = self.out.iter().map(HashSet::len).sum();
        let in_total: usize = self.in_.iter().map(HashSet::len).sum();
        if out_total != in_total {
            return Err(ErgmError::ArcCountMismatch {
                out_total,
                in_total,
            });
        }
        for i in 0..self.n {
            for &j in &self.out[i] {
                debug_assert!(self.in_[j].contains(&i), "adjacency desync at {i}->{j}");
            }
        }
        Ok(())
    }

    fn validate_range(&self, node: usize) -> Result<()> {
        if node >= self.n {
            return Err(ErgmError::NodeOutOfRange { node, n: self.n });
        }
        Ok(())
    }

    fn validate_endpoints(&self, i: usize, j: usize) -> Result<()> {
        self.validate_range(i)?;
        self.validate_range(j)?;
        if i == j {
            return Err(ErgmError::SelfLoopArc { node: i });
        }
        Ok(())
    }
}
