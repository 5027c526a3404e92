//! Property test covering arbitrary interleaved insert/remove sequences.
//!
//! Generates a random walk over arc toggles and revalidates the two-path
//! matrices against a brute-force recomputation after every step, the same
//! check [`super::tests`] runs by hand for a handful of fixed sequences.

use proptest::prelude::*;
use test_strategy::Arbitrary;

use super::Graph;
use super::tests::brute_force_two_path;

const FIXTURE_N: usize = 7;

/// Which half of a toggle pair to apply; both kinds are equally likely so
/// the random walk spends roughly as much time inserting as removing.
#[derive(Debug, Clone, Copy, Arbitrary)]
enum ToggleKind {
    #[weight(1)]
    Insert,
    #[weight(1)]
    Remove,
}

fn toggle_strategy() -> impl Strategy<Value = (usize, usize, ToggleKind)> {
    (0..FIXTURE_N, 0..FIXTURE_N, any::<ToggleKind>())
}

fn apply_toggle(graph: &mut Graph, (i, j, kind): (usize, usize, ToggleKind)) {
    if i == j {
        return;
    }
    match kind {
        ToggleKind::Insert => {
            let _ = graph.insert_arc(i, j);
        }
        ToggleKind::Remove => {
            let _ = graph.remove_arc(i, j);
        }
    }
}

fn assert_matches_brute_force(graph: &Graph) -> Result<(), TestCaseError> {
    let (out_tp, in_tp, mix_tp) = brute_force_two_path(graph);
    let n = graph.n();
    for u in 0..n {
        for v in 0..n {
            prop_assert_eq!(graph.two_path().out_two_path(u, v), out_tp[u * n + v]);
            prop_assert_eq!(graph.two_path().in_two_path(u, v), in_tp[u * n + v]);
            prop_assert_eq!(graph.two_path().mix_two_path(u, v), mix_tp[u * n + v]);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn two_path_matrices_survive_arbitrary_toggle_sequences(toggles in prop::collection::vec(toggle_strategy(), 1..60)) {
        let mut graph = Graph::new(FIXTURE_N);
        for toggle in toggles {
            apply_toggle(&mut graph, toggle);
            assert_matches_brute_force(&graph)?;
        }
        graph.check_invariants().map_err(|err| TestCaseError::fail(err.to_string()))?;
    }
}
