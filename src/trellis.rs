//! The dynamic-programming table shared by the Forward and Viterbi engines.
//!
//! A [`Trellis`] holds one score per `(state, time)` cell and, when requested,
//! one backpointer per cell naming the best predecessor state. Storage is
//! time-major so each column is a contiguous slice.

use std::fmt;

/// Score table indexed by `(state, time)` with optional backpointers.
#[derive(Clone, Debug, PartialEq)]
pub struct Trellis {
    n_states: usize,
    len: usize,
    scores: Vec<f64>,
    backpointers: Option<Vec<usize>>,
}

impl Trellis {
    /// Zero-filled table for `n_states` states over `len` time steps.
    pub fn new(n_states: usize, len: usize, with_backpointers: bool) -> Self {
        let cells = n_states * len;
        Self {
            n_states,
            len,
            scores: vec![0.0; cells],
            backpointers: with_backpointers.then(|| vec![0; cells]),
        }
    }

    /// Number of states per column.
    #[inline]
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Number of time steps (columns).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn has_backpointers(&self) -> bool {
        self.backpointers.is_some()
    }

    /// Score of `state` at time `t`.
    ///
    /// # Panics
    /// Panics if `state` or `t` is out of range.
    #[inline]
    pub fn get(&self, state: usize, t: usize) -> f64 {
        assert!(state < self.n_states, "state {state} out of range");
        self.scores[t * self.n_states + state]
    }

    /// All state scores at time `t`.
    #[inline]
    pub fn column(&self, t: usize) -> &[f64] {
        let n = self.n_states;
        &self.scores[t * n..(t + 1) * n]
    }

    pub fn last_column(&self) -> Option<&[f64]> {
        self.len.checked_sub(1).map(|t| self.column(t))
    }

    /// Best predecessor of `state` at time `t`; `None` at `t = 0` or when the
    /// table carries no backpointers.
    pub fn backpointer(&self, state: usize, t: usize) -> Option<usize> {
        if t == 0 || t >= self.len || state >= self.n_states {
            return None;
        }
        self.backpointers
            .as_ref()
            .map(|back| back[t * self.n_states + state])
    }

    /// Follow backpointers from `end_state` at the last time step back to `t = 0`.
    ///
    /// Returns the state index at each time step, oldest first, or `None` if the
    /// table has no backpointers or `end_state` is out of range.
    pub fn backtrace(&self, end_state: usize) -> Option<Vec<usize>> {
        let back = self.backpointers.as_ref()?;
        if end_state >= self.n_states {
            return None;
        }
        let mut path = Vec::with_capacity(self.len);
        let mut state = end_state;
        for t in (0..self.len).rev() {
            path.push(state);
            if t > 0 {
                state = back[t * self.n_states + state];
            }
        }
        path.reverse();
        Some(path)
    }

    pub(crate) fn column_mut(&mut self, t: usize) -> &mut [f64] {
        let n = self.n_states;
        &mut self.scores[t * n..(t + 1) * n]
    }

    /// Split borrows for filling column `t >= 1`: the previous column, the
    /// column being written, and its backpointer slots if tracked.
    pub(crate) fn step_mut(&mut self, t: usize) -> (&[f64], &mut [f64], Option<&mut [usize]>) {
        debug_assert!(t >= 1 && t < self.len);
        let n = self.n_states;
        let (done, rest) = self.scores.split_at_mut(t * n);
        let prev = &done[(t - 1) * n..];
        let next = &mut rest[..n];
        let back = self
            .backpointers
            .as_mut()
            .map(|back| &mut back[t * n..(t + 1) * n]);
        (prev, next, back)
    }
}

impl fmt::Display for Trellis {
    /// One row per state, one column per time step.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        for state in 0..self.n_states {
            for t in 0..self.len {
                if t > 0 {
                    f.write_str("  ")?;
                }
                write!(f, "{:.*}", precision, self.get(state, t))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
