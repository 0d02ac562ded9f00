//! Forward algorithm as a [`TrellisProblem`].
//!
//! `α[j][0] = a(start, j) b(j, o_0)` and
//! `α[j][t] = b(j, o_t) Σ_k a(k, j) α[k][t-1]`; the emission factor is applied
//! once per cell, outside the sum. The result is `Σ_j α[j][T-1]`.

use crate::error::Result;
use crate::model::Model;
use crate::problems::{encode_nonempty, Tables};
use crate::space::{Linear, ProbSpace};
use crate::traits::TrellisProblem;
use crate::trellis::Trellis;
use crate::TrellisEngine;

/// Forward DP instance: model tables specialised to one observation sequence.
#[derive(Clone, Debug)]
pub struct ForwardProblem<S: ProbSpace = Linear> {
    tables: Tables<S>,
    len: usize,
}

impl<S: ProbSpace> ForwardProblem<S> {
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

impl<S: ProbSpace> TrellisProblem for ForwardProblem<S> {
    type Output = f64;

    fn num_states(&self) -> usize {
        self.tables.n
    }

    fn num_layers(&self) -> usize {
        self.len
    }

    fn init_column(&self, column: &mut [f64]) {
        self.tables.init_column(column);
    }

    fn recurrence(&self, t: usize, prev: &[f64], next: &mut [f64], _back: Option<&mut [usize]>) {
        for (j, cell) in next.iter_mut().enumerate() {
            let incoming = S::sum(
                prev.iter()
                    .enumerate()
                    .map(|(k, &alpha)| S::mul(self.tables.transition(k, j), alpha)),
            );
            *cell = S::mul(self.tables.emission(j, t), incoming);
        }
    }

    fn terminate(&self, trellis: &Trellis) -> f64 {
        trellis
            .last_column()
            .map_or(S::zero(), |column| S::sum(column.iter().copied()))
    }
}

/// Total probability of `observations` summed over every hidden path, in
/// domain `S` (a natural log under [`LogSpace`](crate::LogSpace)).
pub fn forward_in<S: ProbSpace, O: AsRef<str>>(model: &Model, observations: &[O]) -> Result<f64> {
    let engine = TrellisEngine::new(ForwardProblem::<S>::new(model, observations)?);
    let p = engine.run();
    #[cfg(feature = "tracing")]
    {
        if S::CAN_UNDERFLOW && p == S::zero() {
            tracing::warn!(
                space = S::NAME,
                len = observations.len(),
                "forward probability is zero (impossible sequence or underflow)"
            );
        }
    }
    Ok(p)
}

/// The full α table, for inspection or printing.
pub fn forward_trellis_in<S: ProbSpace, O: AsRef<str>>(
    model: &Model,
    observations: &[O],
) -> Result<Trellis> {
    Ok(TrellisEngine::new(ForwardProblem::<S>::new(model, observations)?).fill())
}

/// Total probability P(O) of `observations` under `model`.
///
/// # Errors
/// [`HmmError::EmptySequence`](crate::HmmError::EmptySequence) if
/// `observations` is empty,
/// [`HmmError::UnknownSymbol`](crate::HmmError::UnknownSymbol) if a symbol is
/// not in the vocabulary.
///
/// ```
/// let model = hmm_dp::presets::ice_cream().unwrap();
/// let p = hmm_dp::forward(&model, &["3"]).unwrap();
/// assert!((p - (0.8 * 0.4 + 0.2 * 0.1)).abs() < 1e-12);
/// ```
pub fn forward<O: AsRef<str>>(model: &Model, observations: &[O]) -> Result<f64> {
    forward_in::<Linear, _>(model, observations)
}
