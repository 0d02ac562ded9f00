//! Generic trellis driver.
//!
//! The engine runs any [`TrellisProblem`] in two phases:
//! 1. A fill pass that seeds column 0 and applies the recurrence for
//!    `t = 1..T`, left to right.
//! 2. A termination step that hands the finished table back to the problem.
//!
//! Each [`run`](TrellisEngine::run) allocates its own [`Trellis`] and drops it
//! before returning, so one engine (and the model it borrows) can be shared
//! across threads.

use crate::traits::TrellisProblem;
use crate::trellis::Trellis;

/// Trellis engine for a given problem instance `P`.
///
/// ```
/// use hmm_dp::{presets, problems::forward::ForwardProblem, Linear, TrellisEngine};
///
/// let model = presets::ice_cream().unwrap();
/// let problem = ForwardProblem::<Linear>::new(&model, &["3", "1", "3"]).unwrap();
/// let engine = TrellisEngine::new(problem);
/// let p = engine.run();
/// assert!((p - 0.026264).abs() < 1e-12);
/// ```
pub struct TrellisEngine<P: TrellisProblem> {
    problem: P,
}

impl<P: TrellisProblem> TrellisEngine<P> {
    pub fn new(problem: P) -> Self {
        Self { problem }
    }

    /// Phase I: allocate a fresh table and fill it left to right.
    pub fn fill(&self) -> Trellis {
        let n = self.problem.num_states();
        let t_len = self.problem.num_layers();
        let mut trellis = Trellis::new(n, t_len, self.problem.tracks_backpointers());
        if t_len == 0 {
            return trellis;
        }

        self.problem.init_column(trellis.column_mut(0));
        #[cfg(feature = "tracing")]
        tracing::trace!(t = 0, column = ?trellis.column(0), "column filled");

        for t in 1..t_len {
            let (prev, next, back) = trellis.step_mut(t);
            self.problem.recurrence(t, prev, next, back);
            #[cfg(feature = "tracing")]
            tracing::trace!(t, column = ?trellis.column(t), "column filled");
        }
        trellis
    }

    /// Fill the table and reduce it with the problem's termination step.
    pub fn run(&self) -> P::Output {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "trellis_run",
            states = self.problem.num_states(),
            layers = self.problem.num_layers()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let trellis = {
            #[cfg(feature = "tracing")]
            let span = tracing::info_span!("fill");
            #[cfg(feature = "tracing")]
            let _enter = span.enter();
            self.fill()
        };

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("terminate");
        #[cfg(feature = "tracing")]
        let _enter = span.enter();
        self.problem.terminate(&trellis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Column `t` holds `t + state`; output is the last column and call count.
    struct CountingProblem {
        n: usize,
        t: usize,
        steps: Cell<usize>,
    }

    impl TrellisProblem for CountingProblem {
        type Output = (Vec<f64>, usize);

        fn num_states(&self) -> usize {
            self.n
        }
        fn num_layers(&self) -> usize {
            self.t
        }
        fn init_column(&self, column: &mut [f64]) {
            for (state, cell) in column.iter_mut().enumerate() {
                *cell = state as f64;
            }
        }
        fn recurrence(&self, t: usize, prev: &[f64], next: &mut [f64], back: Option<&mut [usize]>) {
            assert!(back.is_none());
            assert_eq!(prev.len(), self.n);
            self.steps.set(self.steps.get() + 1);
            for (state, cell) in next.iter_mut().enumerate() {
                *cell = prev[state] + 1.0;
                assert_eq!(*cell, (t + state) as f64);
            }
        }
        fn terminate(&self, trellis: &Trellis) -> Self::Output {
            (
                trellis.last_column().map(<[f64]>::to_vec).unwrap_or_default(),
                self.steps.get(),
            )
        }
    }

    fn counting(n: usize, t: usize) -> CountingProblem {
        CountingProblem {
            n,
            t,
            steps: Cell::new(0),
        }
    }

    #[test]
    fn fill_shapes() {
        let engine = TrellisEngine::new(counting(3, 4));
        let trellis = engine.fill();
        assert_eq!(trellis.n_states(), 3);
        assert_eq!(trellis.len(), 4);
        assert!(!trellis.has_backpointers());
        assert_eq!(trellis.column(3), &[3.0, 4.0, 5.0]);
    }

    #[test]
    fn run_applies_recurrence_once_per_later_column() {
        let engine = TrellisEngine::new(counting(2, 5));
        let (last, steps) = engine.run();
        assert_eq!(last, vec![4.0, 5.0]);
        assert_eq!(steps, 4);
    }

    #[test]
    fn zero_layers_skip_initialisation() {
        let engine = TrellisEngine::new(counting(2, 0));
        let (last, steps) = engine.run();
        assert!(last.is_empty());
        assert_eq!(steps, 0);
    }
}
