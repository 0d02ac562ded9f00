//! Viterbi decoding as a [`TrellisProblem`].
//!
//! Same initialisation as Forward; the recurrence keeps the best incoming
//! path instead of summing, and records its predecessor in the backpointer
//! table. The decoded path is recovered by following backpointers from the
//! best final state, so it is optimal for any number of states.
//!
//! Ties are resolved towards the lowest state index, both for the
//! backpointer at each cell and for the final state. A cell whose emission
//! probability is zero ties every predecessor at zero and points to state 0.

use crate::error::Result;
use crate::model::Model;
use crate::problems::{encode_nonempty, Tables};
use crate::space::{Linear, ProbSpace};
use crate::traits::TrellisProblem;
use crate::trellis::Trellis;
use crate::utils::argmax;
use crate::TrellisEngine;

/// Viterbi DP instance: model tables specialised to one observation sequence.
#[derive(Clone, Debug)]
pub struct ViterbiProblem<S: ProbSpace = Linear> {
    tables: Tables<S>,
    len: usize,
}

/// Best state index sequence and its score, before labels are attached.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedPath {
    /// State index at each time step.
    pub states: Vec<usize>,
    /// Joint score of the path in the problem's domain.
    pub score: f64,
}

/// Most probable hidden path for an observation sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct ViterbiPath {
    /// State labels, one per observation.
    pub states: Vec<String>,
    /// State indices, one per observation.
    pub indices: Vec<usize>,
    /// Joint score P(O, Q*) of the path (a natural log under `LogSpace`).
    pub score: f64,
}

impl ViterbiPath {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn into_labels(self) -> Vec<String> {
        self.states
    }

    fn labelled(model: &Model, decoded: DecodedPath) -> Self {
        Self {
            states: decoded
                .states
                .iter()
                .map(|&j| model.state_label(j).to_owned())
                .collect(),
            indices: decoded.states,
            score: decoded.score,
        }
    }
}

impl<S: ProbSpace> ViterbiProblem<S> {
    /// # Errors
    /// [`HmmError::EmptySequence`] for an empty sequence,
    /// [`HmmError::UnknownSymbol`] for a symbol outside the vocabulary.
    ///
    /// [`HmmError::EmptySequence`]: crate::HmmError::EmptySequence
    /// [`HmmError::UnknownSymbol`]: crate::HmmError::UnknownSymbol
    pub fn new<O: AsRef<str>>(model: &Model, observations: &[O]) -> Result<Self> {
        let obs = encode_nonempty(model, observations)?;
        Ok(Self {
            tables: Tables::new(model, &obs),
            len: obs.len(),
        })
    }
}

impl<S: ProbSpace> TrellisProblem for ViterbiProblem<S> {
    type Output = DecodedPath;

    fn num_states(&self) -> usize {
        self.tables.n
    }

    fn num_layers(&self) -> usize {
        self.len
    }

    fn tracks_backpointers(&self) -> bool {
        true
    }

    fn init_column(&self, column: &mut [f64]) {
        self.tables.init_column(column);
    }

    fn recurrence(&self, t: usize, prev: &[f64], next: &mut [f64], mut back: Option<&mut [usize]>) {
        let n = self.tables.n;
        let mut candidates = vec![S::zero(); n];
        for (j, cell) in next.iter_mut().enumerate() {
            for (k, cand) in candidates.iter_mut().enumerate() {
                *cand = S::mul(self.tables.transition(k, j), prev[k]);
            }
            let emission = self.tables.emission(j, t);
            let (arg, best) = argmax(&candidates).unwrap_or((0, S::zero()));
            *cell = S::mul(best, emission);
            if let Some(back) = back.as_deref_mut() {
                // A cell that cannot emit scores zero from every predecessor.
                back[j] = if emission == S::zero() { 0 } else { arg };
            }
        }
    }

    fn terminate(&self, trellis: &Trellis) -> DecodedPath {
        let (end_state, score) = trellis
            .last_column()
            .and_then(argmax)
            .unwrap_or((0, S::zero()));
        let states = trellis.backtrace(end_state).unwrap_or_default();
        DecodedPath { states, score }
    }
}

/// Decode `observations` in domain `S`.
pub fn viterbi_in<S: ProbSpace, O: AsRef<str>>(
    model: &Model,
    observations: &[O],
) -> Result<ViterbiPath> {
    let engine = TrellisEngine::new(ViterbiProblem::<S>::new(model, observations)?);
    let decoded = engine.run();
    #[cfg(feature = "tracing")]
    {
        if S::CAN_UNDERFLOW && decoded.score == S::zero() {
            tracing::warn!(
                space = S::NAME,
                len = observations.len(),
                "best path probability is zero (impossible sequence or underflow)"
            );
        }
    }
    Ok(ViterbiPath::labelled(model, decoded))
}

/// Most probable hidden state sequence for `observations`, as state labels.
///
/// # Errors
/// [`HmmError::EmptySequence`](crate::HmmError::EmptySequence) if
/// `observations` is empty,
/// [`HmmError::UnknownSymbol`](crate::HmmError::UnknownSymbol) if a symbol is
/// not in the vocabulary.
///
/// ```
/// let model = hmm_dp::presets::ice_cream().unwrap();
/// assert_eq!(hmm_dp::viterbi(&model, &["3"]).unwrap(), ["HOT"]);
/// ```
pub fn viterbi<O: AsRef<str>>(model: &Model, observations: &[O]) -> Result<Vec<String>> {
    viterbi_in::<Linear, _>(model, observations).map(ViterbiPath::into_labels)
}
