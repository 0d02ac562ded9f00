//! Numeric domains the trellis recurrences run in.
//!
//! [`Linear`] multiplies raw probabilities and is the default; it reproduces
//! the textbook numbers exactly but underflows to zero on long sequences.
//! [`LogSpace`] stores natural logs, turning products into sums and sums into
//! log-sum-exp. Maximisation is shared: `ln` is monotone, so both domains pick
//! the same argmax.

use crate::utils::log_sum_exp;
use std::fmt::Debug;

/// Arithmetic used by the Forward and Viterbi recurrences.
///
/// Values are plain `f64`; the implementing type only decides how they are
/// interpreted.
pub trait ProbSpace: Copy + Debug + Send + Sync + 'static {
    /// Short name used in logs.
    const NAME: &'static str;

    /// Whether long products can silently reach zero.
    const CAN_UNDERFLOW: bool;

    /// Map a probability in `[0, 1]` into this domain.
    fn from_prob(p: f64) -> f64;

    /// Map a value of this domain back to a probability.
    fn to_prob(x: f64) -> f64;

    /// Multiplicative identity (probability 1).
    fn one() -> f64;

    /// Additive identity (probability 0).
    fn zero() -> f64;

    /// Product of two probabilities.
    fn mul(a: f64, b: f64) -> f64;

    /// Sum of probabilities.
    fn sum<I: IntoIterator<Item = f64>>(values: I) -> f64;
}

/// Ordinary probabilities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Linear;

/// Natural-log probabilities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogSpace;

impl ProbSpace for Linear {
    const NAME: &'static str = "linear";
    const CAN_UNDERFLOW: bool = true;

    #[inline]
    fn from_prob(p: f64) -> f64 {
        p
    }
    #[inline]
    fn to_prob(x: f64) -> f64 {
        x
    }
    #[inline]
    fn one() -> f64 {
        1.0
    }
    #[inline]
    fn zero() -> f64 {
        0.0
    }
    #[inline]
    fn mul(a: f64, b: f64) -> f64 {
        a * b
    }
    #[inline]
    fn sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
        values.into_iter().sum()
    }
}

impl ProbSpace for LogSpace {
    const NAME: &'static str = "log";
    const CAN_UNDERFLOW: bool = false;

    #[inline]
    fn from_prob(p: f64) -> f64 {
        p.ln()
    }
    #[inline]
    fn to_prob(x: f64) -> f64 {
        x.exp()
    }
    #[inline]
    fn one() -> f64 {
        0.0
    }
    #[inline]
    fn zero() -> f64 {
        f64::NEG_INFINITY
    }
    #[inline]
    fn mul(a: f64, b: f64) -> f64 {
        a + b
    }
    #[inline]
    fn sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
        log_sum_exp(values)
    }
}
