//! Probability of an observation sequence along one fully specified state path.
//!
//! [`likelihood`] is P(O|Q): the product of emission probabilities only. The
//! transition matrix is not consulted. [`joint_probability`] is
//! P(O,Q), which additionally multiplies in the start and transition terms;
//! it is the quantity the Viterbi path maximises.

use crate::error::{HmmError, Result};
use crate::model::{Model, START};
use crate::space::{Linear, ProbSpace};

/// Resolve both sequences, checking lengths before any lookup.
fn encode_pair<Q, O>(
    model: &Model,
    states: &[Q],
    observations: &[O],
) -> Result<(Vec<usize>, Vec<usize>)>
where
    Q: AsRef<str>,
    O: AsRef<str>,
{
    if states.len() != observations.len() {
        return Err(HmmError::LengthMismatch {
            states: states.len(),
            observations: observations.len(),
        });
    }
    Ok((
        model.encode_states(states)?,
        model.encode_observations(observations)?,
    ))
}

/// P(O|Q) in domain `S`.
pub fn likelihood_in<S, Q, O>(model: &Model, states: &[Q], observations: &[O]) -> Result<f64>
where
    S: ProbSpace,
    Q: AsRef<str>,
    O: AsRef<str>,
{
    let (q, o) = encode_pair(model, states, observations)?;
    Ok(q.iter().zip(&o).fold(S::one(), |acc, (&j, &v)| {
        S::mul(acc, S::from_prob(model.emission_prob(j, v)))
    }))
}

/// P(O,Q) in domain `S`.
pub fn joint_probability_in<S, Q, O>(model: &Model, states: &[Q], observations: &[O]) -> Result<f64>
where
    S: ProbSpace,
    Q: AsRef<str>,
    O: AsRef<str>,
{
    let (q, o) = encode_pair(model, states, observations)?;
    let mut score = S::one();
    let mut from = START;
    for (&j, &v) in q.iter().zip(&o) {
        score = S::mul(score, S::from_prob(model.transition_prob(from, j + 1)));
        score = S::mul(score, S::from_prob(model.emission_prob(j, v)));
        from = j + 1;
    }
    Ok(score)
}

/// Likelihood of `observations` given the exact hidden path `states`:
/// `Π_t P(o_t | q_t)`.
///
/// An empty pair of sequences yields `1.0`.
///
/// # Errors
/// [`HmmError::LengthMismatch`] if the sequences differ in length,
/// [`HmmError::UnknownSymbol`] for a label or symbol absent from the model.
///
/// ```
/// let model = hmm_dp::presets::ice_cream().unwrap();
/// let p = hmm_dp::likelihood(&model, &["HOT", "HOT", "COLD"], &["3", "1", "3"]).unwrap();
/// assert!((p - 0.4 * 0.2 * 0.1).abs() < 1e-15);
/// ```
pub fn likelihood<Q, O>(model: &Model, states: &[Q], observations: &[O]) -> Result<f64>
where
    Q: AsRef<str>,
    O: AsRef<str>,
{
    likelihood_in::<Linear, _, _>(model, states, observations)
}

/// Joint probability of `states` and `observations`:
/// `a(start, q_0) b(q_0, o_0) Π_{t>0} a(q_{t-1}, q_t) b(q_t, o_t)`.
///
/// Same errors as [`likelihood`].
pub fn joint_probability<Q, O>(model: &Model, states: &[Q], observations: &[O]) -> Result<f64>
where
    Q: AsRef<str>,
    O: AsRef<str>,
{
    joint_probability_in::<Linear, _, _>(model, states, observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SymbolKind;
    use crate::presets::ice_cream;
    use crate::space::LogSpace;

    #[test]
    fn product_of_emissions() {
        let model = ice_cream().unwrap();
        let p = likelihood(&model, &["HOT", "COLD"], &["3", "1"]).unwrap();
        assert!((p - 0.4 * 0.5).abs() < 1e-15);
    }

    #[test]
    fn empty_pair_is_one() {
        let model = ice_cream().unwrap();
        let none: [&str; 0] = [];
        assert_eq!(likelihood(&model, &none, &none), Ok(1.0));
        assert_eq!(joint_probability(&model, &none, &none), Ok(1.0));
        assert_eq!(likelihood_in::<LogSpace, _, _>(&model, &none, &none), Ok(0.0));
    }

    #[test]
    fn length_checked_before_symbols() {
        let model = ice_cream().unwrap();
        assert_eq!(
            likelihood(&model, &["HOT", "HOT"], &["3"]),
            Err(HmmError::LengthMismatch {
                states: 2,
                observations: 1
            })
        );
        assert_eq!(
            likelihood(&model, &["WARM", "HOT"], &["3"]),
            Err(HmmError::LengthMismatch {
                states: 2,
                observations: 1
            })
        );
    }

    #[test]
    fn unknown_labels_and_symbols() {
        let model = ice_cream().unwrap();
        assert_eq!(
            likelihood(&model, &["WARM"], &["3"]),
            Err(HmmError::UnknownSymbol {
                kind: SymbolKind::State,
                symbol: "WARM".into()
            })
        );
        assert_eq!(
            joint_probability(&model, &["HOT"], &["4"]),
            Err(HmmError::UnknownSymbol {
                kind: SymbolKind::Observation,
                symbol: "4".into()
            })
        );
    }

    #[test]
    fn joint_includes_transitions() {
        let model = ice_cream().unwrap();
        let p = joint_probability(&model, &["HOT", "HOT", "COLD"], &["3", "1", "3"]).unwrap();
        let expected = 0.8 * 0.4 * 0.7 * 0.2 * 0.3 * 0.1;
        assert!((p - expected).abs() < 1e-15);

        let q = ["HOT", "HOT", "COLD"];
        let log_p = joint_probability_in::<LogSpace, _, _>(&model, &q, &["3", "1", "3"]).unwrap();
        assert!((log_p - expected.ln()).abs() < 1e-12);
    }
}
