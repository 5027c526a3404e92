//! Incrementally maintained two-path count matrices.

/// Dense `n×n` matrices counting the three two-path flavors used by the
/// change-statistics library.
///
/// `out_two_path[u,v]` counts shared out-neighbours of `u` and `v`,
/// `in_two_path[u,v]` counts shared in-neighbours, and `mix_two_path[u,v]`
/// counts directed two-paths `u -> w -> v`. Diagonals are always zero.
#[derive(Clone, Debug)]
pub struct TwoPathMatrices {
    n: usize,
    out_two_path: Vec<i64>,
    in_two_path: Vec<i64>,
    mix_two_path: Vec<i64>,
}

impl TwoPathMatrices {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            n,
            out_two_path: vec![0; n * n],
            in_two_path: vec![0; n * n],
            mix_two_path: vec![0; n * n],
        }
    }

    const fn index(&self, u: usize, v: usize) -> usize {
        u * self.n + v
    }

    /// Shared out-neighbour count between `u` and `v`.
    #[must_use]
    pub fn out_two_path(&self, u: usize, v: usize) -> i64 {
        self.out_two_path[self.index(u, v)]
    }

    /// Shared in-neighbour count between `u` and `v`.
    #[must_use]
    pub fn in_two_path(&self, u: usize, v: usize) -> i64 {
        self.in_two_path[self.index(u, v)]
    }

    /// Directed two-path count `u -> w -> v`.
    #[must_use]
    pub fn mix_two_path(&self, u: usize, v: usize) -> i64 {
        self.mix_two_path[self.index(u, v)]
    }

    fn add_out_two_path(&mut self, u: usize, v: usize, delta: i64) {
        let idx = self.index(u, v);
        self.out_two_path[idx] += delta;
    }

    fn add_in_two_path(&mut self, u: usize, v: usize, delta: i64) {
        let idx = self.index(u, v);
        self.in_two_path[idx] += delta;
    }

    fn add_mix_two_path(&mut self, u: usize, v: usize, delta: i64) {
        let idx = self.index(u, v);
        self.mix_two_path[idx] += delta;
    }

    /// Apply the two-path update rule for a toggle of arc `i -> j` with sign
    /// `sign` (`+1` for insert, `-1` for remove), given the post-toggle
    /// adjacency via `has_arc`.
    ///
    /// Must be called after the adjacency mutation so `has_arc` reflects the
    /// new state.
    pub(crate) fn on_toggle(
        &mut self,
        i: usize,
        j: usize,
        sign: i64,
        has_arc: impl Fn(usize, usize) -> bool,
    ) {
        for v in 0..self.n {
            if v == i || v == j {
                continue;
            }
            if has_arc(i, v) {
                self.add_out_two_path(v, j, sign);
                self.add_out_two_path(j, v, sign);
            }
            if has_arc(v, j) {
                self.add_in_two_path(v, i, sign);
                self.add_in_two_path(i, v, sign);
            }
            if has_arc(v, i) {
                self.add_mix_two_path(v, j, sign);
            }
            if has_arc(j, v) {
                self.add_mix_two_path(i, v, sign);
            }
        }
    }
}
