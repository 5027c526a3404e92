//! Pure change-statistic formulas.
//!
//! Each function computes `delta` for adding arc `i -> j`, matching the
//! alternating-statistic conventions of the reference PNet/EstimNetDirected
//! family. Callers (the sampler) apply the sign for add/delete moves.

use crate::attributes::AttributeTable;
use crate::graph::Graph;

fn pow1m_inv_lambda(lambda: f64, exponent: i64) -> f64 {
    #[allow(
        clippy::cast_precision_loss,
        reason = "two-path counts stay far below f64's exact-integer range"
    )]
    let exponent = exponent as f64;
    (1.0 - 1.0 / lambda).powf(exponent)
}

fn bool_to_f64(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

fn degree_term(lambda: f64, degree: usize) -> f64 {
    #[allow(
        clippy::cast_precision_loss,
        reason = "node degrees stay far below f64's exact-integer range"
    )]
    let degree = degree as f64;
    lambda * (1.0 - (1.0 - 1.0 / lambda).powf(degree))
}

pub(super) fn arc(_graph: &Graph, _i: usize, _j: usize) -> f64 {
    1.0
}

pub(super) fn reciprocity(graph: &Graph, i: usize, j: usize) -> f64 {
    bool_to_f64(graph.has_arc(j, i))
}

pub(super) fn alt_in_stars(graph: &Graph, lambda: f64, _i: usize, j: usize) -> f64 {
    degree_term(lambda, graph.in_degree(j))
}

pub(super) fn alt_out_stars(graph: &Graph, lambda: f64, i: usize, _j: usize) -> f64 {
    degree_term(lambda, graph.out_degree(i))
}

/// Transitive alternating-k-triangles (path closure).
///
/// The first arm iterates `Out(i)` and tests `j -> v`; the second arm
/// iterates `In(i)` and tests `v -> j`. This arm structure is load-bearing:
/// swapping the two existence tests silently changes which triangle
/// orientation is weighted.
pub(super) fn alt_k_triangles_t(graph: &Graph, lambda: f64, i: usize, j: usize) -> f64 {
    let mut delta = 0.0;
    for v in graph.out_iter(i) {
        if v == i || v == j {
            continue;
        }
        if graph.has_arc(j, v) {
            delta += pow1m_inv_lambda(lambda, graph.two_path().mix_two_path(i, v));
        }
    }
    for v in graph.in_iter(i) {
        if v == i || v == j {
            continue;
        }
        if graph.has_arc(v, j) {
            delta += pow1m_inv_lambda(lambda, graph.two_path().mix_two_path(v, j));
        }
    }
    delta + lambda * (1.0 - pow1m_inv_lambda(lambda, graph.two_path().mix_two_path(i, j)))
}

/// Cyclic alternating-k-triangles (cyclic closure).
pub(super) fn alt_k_triangles_c(graph: &Graph, lambda: f64, i: usize, j: usize) -> f64 {
    let mut delta = 0.0;
    for v in graph.in_iter(i) {
        if v == i || v == j {
            continue;
        }
        if graph.has_arc(j, v) {
            delta += pow1m_inv_lambda(lambda, graph.two_path().mix_two_path(i, v))
                + pow1m_inv_lambda(lambda, graph.two_path().mix_two_path(v, j));
        }
    }
    delta + lambda * (1.0 - pow1m_inv_lambda(lambda, graph.two_path().mix_two_path(j, i)))
}

/// Alternating two-paths, transitive arm (multiple two-paths).
pub(super) fn alt_two_paths_t(graph: &Graph, lambda: f64, i: usize, j: usize) -> f64 {
    let mut delta = 0.0;
    for v in graph.out_iter(j) {
        if v == i || v == j {
            continue;
        }
        delta += pow1m_inv_lambda(lambda, graph.two_path().mix_two_path(i, v));
    }
    for v in graph.in_iter(i) {
        if v == i || v == j {
            continue;
        }
        delta += pow1m_inv_lambda(lambda, graph.two_path().mix_two_path(v, j));
    }
    delta
}

/// Alternating two-paths, "D" arm (shared popularity).
pub(super) fn alt_two_paths_d(graph: &Graph, lambda: f64, i: usize, j: usize) -> f64 {
    let mut delta = 0.0;
    for v in graph.out_iter(i) {
        if v == i || v == j {
            continue;
        }
        delta += pow1m_inv_lambda(lambda, graph.two_path().out_two_path(j, v));
    }
    delta
}

pub(super) fn alt_two_paths_td(graph: &Graph, lambda: f64, i: usize, j: usize) -> f64 {
    0.5 * (alt_two_paths_t(graph, lambda, i, j) + alt_two_paths_d(graph, lambda, i, j))
}

fn binary_at(attrs: &AttributeTable, node: usize) -> f64 {
    debug_assert!(attrs.binary().is_some(), "binary attribute not bound");
    f64::from(
        attrs
            .binary()
            .and_then(|values| values.get(node))
            .copied()
            .unwrap_or(0),
    )
}

fn categorical_at(attrs: &AttributeTable, node: usize) -> Option<i64> {
    debug_assert!(attrs.categorical().is_some(), "categorical attribute not bound");
    attrs.categorical().and_then(|values| values.get(node)).copied()
}

pub(super) fn sender(_graph: &Graph, attrs: &AttributeTable, i: usize, _j: usize) -> f64 {
    binary_at(attrs, i)
}

pub(super) fn receiver(_graph: &Graph, attrs: &AttributeTable, _i: usize, j: usize) -> f64 {
    binary_at(attrs, j)
}

pub(super) fn interaction(_graph: &Graph, attrs: &AttributeTable, i: usize, j: usize) -> f64 {
    binary_at(attrs, i) * binary_at(attrs, j)
}

pub(super) fn matching(_graph: &Graph, attrs: &AttributeTable, i: usize, j: usize) -> f64 {
    bool_to_f64(categorical_at(attrs, i) == categorical_at(attrs, j))
}

pub(super) fn matching_reciprocity(graph: &Graph, attrs: &AttributeTable, i: usize, j: usize) -> f64 {
    bool_to_f64(categorical_at(attrs, i) == categorical_at(attrs, j) && graph.has_arc(j, i))
}

pub(super) fn mismatching(_graph: &Graph, attrs: &AttributeTable, i: usize, j: usize) -> f64 {
    bool_to_f64(categorical_at(attrs, i) != categorical_at(attrs, j))
}

pub(super) fn mismatching_reciprocity(
    graph: &Graph,
    attrs: &AttributeTable,
    i: usize,
    j: usize,
) -> f64 {
    bool_to_f64(categorical_at(attrs, i) != categorical_at(attrs, j) && graph.has_arc(j, i))
}
