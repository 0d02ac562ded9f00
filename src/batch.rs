//! Evaluate many observation sequences against one model.
//!
//! Each sequence gets its own trellis, so the calls are independent. With the
//! `parallel` feature they are spread over the rayon pool; results always come
//! back in input order, one `Result` per sequence.

use crate::error::Result;
use crate::model::Model;
use crate::problems::forward::forward_in;
use crate::problems::viterbi::{viterbi_in, ViterbiPath};
use crate::space::ProbSpace;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
fn map_sequences<O, T, F>(sequences: &[Vec<O>], f: F) -> Vec<T>
where
    O: AsRef<str> + Sync,
    T: Send,
    F: Fn(&[O]) -> T + Sync + Send,
{
    sequences.par_iter().map(|seq| f(seq.as_slice())).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_sequences<O, T, F>(sequences: &[Vec<O>], f: F) -> Vec<T>
where
    O: AsRef<str> + Sync,
    T: Send,
    F: Fn(&[O]) -> T + Sync + Send,
{
    sequences.iter().map(|seq| f(seq.as_slice())).collect()
}

/// Forward probability of every sequence, in domain `S`.
pub fn forward_batch<S, O>(model: &Model, sequences: &[Vec<O>]) -> Vec<Result<f64>>
where
    S: ProbSpace,
    O: AsRef<str> + Sync,
{
    #[cfg(feature = "tracing")]
    let span = tracing::info_span!("forward_batch", sequences = sequences.len(), space = S::NAME);
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    map_sequences(sequences, |seq| forward_in::<S, _>(model, seq))
}

/// Viterbi path of every sequence, in domain `S`.
pub fn viterbi_batch<S, O>(model: &Model, sequences: &[Vec<O>]) -> Vec<Result<ViterbiPath>>
where
    S: ProbSpace,
    O: AsRef<str> + Sync,
{
    #[cfg(feature = "tracing")]
    let span = tracing::info_span!("viterbi_batch", sequences = sequences.len(), space = S::NAME);
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    map_sequences(sequences, |seq| viterbi_in::<S, _>(model, seq))
}
