//! HMM inference procedures.
//!
//! - [`likelihood`] : P(O|Q) and the joint P(O,Q) for a fully specified path.
//! - [`forward`]    : total observation probability via [`TrellisProblem`].
//! - [`viterbi`]    : most probable state path with backpointer backtrace.
//!
//! [`TrellisProblem`]: crate::traits::TrellisProblem

pub mod forward;
pub mod likelihood;
pub mod viterbi;

use crate::error::{HmmError, Result};
use crate::model::Model;
use crate::space::ProbSpace;
use std::marker::PhantomData;

/// Model parameters converted once into the numeric domain `S`.
///
/// `transition` is `N x N` between emitting states (`[from * N + to]`),
/// `emission` is `N x T`, already specialised to the observation sequence.
#[derive(Clone, Debug)]
pub(crate) struct Tables<S: ProbSpace> {
    pub n: usize,
    pub start: Vec<f64>,
    pub transition: Vec<f64>,
    pub emission: Vec<f64>,
    space: PhantomData<S>,
}

impl<S: ProbSpace> Tables<S> {
    pub fn new(model: &Model, obs: &[usize]) -> Self {
        let n = model.num_states();
        let start = (0..n).map(|j| S::from_prob(model.start_prob(j))).collect();
        let transition = (0..n)
            .flat_map(|from| (0..n).map(move |to| (from, to)))
            .map(|(from, to)| S::from_prob(model.transition_prob(from + 1, to + 1)))
            .collect();
        let emission = obs
            .iter()
            .flat_map(|&o| (0..n).map(move |j| (j, o)))
            .map(|(j, o)| S::from_prob(model.emission_prob(j, o)))
            .collect();
        Self {
            n,
            start,
            transition,
            emission,
            space: PhantomData,
        }
    }

    /// Score of moving from emitting state `from` to emitting state `to`.
    #[inline]
    pub fn transition(&self, from: usize, to: usize) -> f64 {
        self.transition[from * self.n + to]
    }

    /// Score of state `j` emitting the observation at time `t`.
    #[inline]
    pub fn emission(&self, j: usize, t: usize) -> f64 {
        self.emission[t * self.n + j]
    }

    /// Column 0 shared by Forward and Viterbi: start transition times emission.
    pub fn init_column(&self, column: &mut [f64]) {
        for (j, cell) in column.iter_mut().enumerate() {
            *cell = S::mul(self.start[j], self.emission(j, 0));
        }
    }
}

/// Encode a non-empty observation sequence.
pub(crate) fn encode_nonempty<O: AsRef<str>>(
    model: &Model,
    observations: &[O],
) -> Result<Vec<usize>> {
    if observations.is_empty() {
        return Err(HmmError::EmptySequence);
    }
    model.encode_observations(observations)
}
