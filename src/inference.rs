//! A model bound to a numeric domain.

use crate::error::Result;
use crate::model::Model;
use crate::problems::viterbi::ViterbiPath;
use crate::problems::{forward, likelihood, viterbi};
use crate::space::{Linear, ProbSpace};
use crate::trellis::Trellis;
use std::marker::PhantomData;

/// Runs every inference procedure against one borrowed [`Model`] in domain `S`.
///
/// Under [`LogSpace`](crate::LogSpace) every returned score is a natural log.
///
/// ```
/// use hmm_dp::{presets, Inference, LogSpace};
///
/// let model = presets::ice_cream().unwrap();
/// let log = Inference::<LogSpace>::new(&model);
/// let lp = log.forward(&["3", "1", "3"]).unwrap();
/// assert!((lp.exp() - 0.026264).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct Inference<'m, S: ProbSpace = Linear> {
    model: &'m Model,
    space: PhantomData<S>,
}

impl<S: ProbSpace> Clone for Inference<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ProbSpace> Copy for Inference<'_, S> {}

impl<'m, S: ProbSpace> Inference<'m, S> {
    pub fn new(model: &'m Model) -> Self {
        Self {
            model,
            space: PhantomData,
        }
    }

    pub fn model(&self) -> &'m Model {
        self.model
    }

    /// P(O|Q); see [`likelihood`](crate::likelihood).
    pub fn likelihood<Q, O>(&self, states: &[Q], observations: &[O]) -> Result<f64>
    where
        Q: AsRef<str>,
        O: AsRef<str>,
    {
        likelihood::likelihood_in::<S, _, _>(self.model, states, observations)
    }

    /// P(O,Q); see [`joint_probability`](crate::joint_probability).
    pub fn joint_probability<Q, O>(&self, states: &[Q], observations: &[O]) -> Result<f64>
    where
        Q: AsRef<str>,
        O: AsRef<str>,
    {
        likelihood::joint_probability_in::<S, _, _>(self.model, states, observations)
    }

    /// P(O); see [`forward`](crate::forward).
    pub fn forward<O: AsRef<str>>(&self, observations: &[O]) -> Result<f64> {
        forward::forward_in::<S, _>(self.model, observations)
    }

    /// The filled α table.
    pub fn forward_trellis<O: AsRef<str>>(&self, observations: &[O]) -> Result<Trellis> {
        forward::forward_trellis_in::<S, _>(self.model, observations)
    }

    /// Most probable path with its joint score.
    pub fn viterbi<O: AsRef<str>>(&self, observations: &[O]) -> Result<ViterbiPath> {
        viterbi::viterbi_in::<S, _>(self.model, observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::ice_cream;
    use crate::space::LogSpace;

    #[test]
    fn domains_agree_through_the_facade() {
        let model = ice_cream().unwrap();
        let linear = Inference::<Linear>::new(&model);
        let log = Inference::<LogSpace>::new(&model);
        let q = ["HOT", "COLD", "COLD"];
        let o = ["3", "1", "2"];

        let pairs = [
            (linear.likelihood(&q, &o).unwrap(), log.likelihood(&q, &o).unwrap()),
            (
                linear.joint_probability(&q, &o).unwrap(),
                log.joint_probability(&q, &o).unwrap(),
            ),
            (linear.forward(&o).unwrap(), log.forward(&o).unwrap()),
            (linear.viterbi(&o).unwrap().score, log.viterbi(&o).unwrap().score),
        ];
        for (p, lp) in pairs {
            assert!((p.ln() - lp).abs() < 1e-10, "{p} vs exp({lp})");
        }
    }

    #[test]
    fn forward_trellis_reduces_to_forward() {
        let model = ice_cream().unwrap();
        let inference = Inference::<Linear>::new(&model);
        let o = ["2", "3"];
        let alpha = inference.forward_trellis(&o).unwrap();
        let total: f64 = alpha.last_column().unwrap().iter().sum();
        assert!((total - inference.forward(&o).unwrap()).abs() < 1e-15);
    }
}
