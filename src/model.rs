//! The read-only HMM description every engine call borrows.
//!
//! Index conventions:
//! - Emitting states are numbered `0..N` in the order they were given.
//! - The transition matrix is `(N+1) x (N+1)`. Row `0` is the start
//!   pseudo-state; row `i + 1` is emitting state `i`. Column `j + 1` is
//!   emitting state `j`; column `0` is never a destination.
//! - Observation symbols are numbered `0..M` in the order they were given.
//!
//! Both label-to-index maps are derived from the ordered label lists, so index
//! assignment is reproducible.

use crate::error::{HmmError, Result};
use std::collections::HashMap;

/// Row-sum tolerance applied when validating distributions.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Matrix row/column of the start pseudo-state.
pub const START: usize = 0;

/// Hidden Markov Model with a designated start pseudo-state.
#[derive(Clone, Debug)]
pub struct Model {
    states: Vec<String>,
    state_index: HashMap<String, usize>,
    symbols: Vec<String>,
    symbol_index: HashMap<String, usize>,
    /// `(N+1) x (N+1)`, row 0 = start.
    transition: Vec<Vec<f64>>,
    /// `N x M`.
    emission: Vec<Vec<f64>>,
}

/// How strictly [`Model::validated`] checks the tables.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Normalization {
    /// Distribution rows must sum to 1 within the tolerance.
    Checked(f64),
    /// Only shape and range are checked.
    Unchecked,
}

impl Model {
    /// Build a model from raw matrices, checking shape, range and normalization
    /// with [`DEFAULT_TOLERANCE`].
    ///
    /// `transition` must be `(N+1) x (N+1)` with row 0 holding the start
    /// distribution; `emission` must be `N x M`.
    ///
    /// # Errors
    /// [`HmmError::InvalidModel`] when the tables are malformed or the labels
    /// are empty or duplicated.
    pub fn new<S, V>(
        states: impl IntoIterator<Item = S>,
        symbols: impl IntoIterator<Item = V>,
        transition: Vec<Vec<f64>>,
        emission: Vec<Vec<f64>>,
    ) -> Result<Self>
    where
        S: Into<String>,
        V: Into<String>,
    {
        Self::validated(
            states.into_iter().map(Into::into).collect(),
            symbols.into_iter().map(Into::into).collect(),
            transition,
            emission,
            Normalization::Checked(DEFAULT_TOLERANCE),
        )
    }

    pub(crate) fn validated(
        states: Vec<String>,
        symbols: Vec<String>,
        transition: Vec<Vec<f64>>,
        emission: Vec<Vec<f64>>,
        normalization: Normalization,
    ) -> Result<Self> {
        let n = states.len();
        let m = symbols.len();
        if n == 0 {
            return Err(HmmError::InvalidModel("model has no emitting states".into()));
        }
        if m == 0 {
            return Err(HmmError::InvalidModel(
                "model has no observation symbols".into(),
            ));
        }

        let state_index = index_labels(&states, "state")?;
        let symbol_index = index_labels(&symbols, "observation symbol")?;

        if transition.len() != n + 1 {
            return Err(HmmError::InvalidModel(format!(
                "transition matrix has {} rows, expected {}",
                transition.len(),
                n + 1
            )));
        }
        for (row_idx, row) in transition.iter().enumerate() {
            let name = if row_idx == START {
                "start".to_owned()
            } else {
                states[row_idx - 1].clone()
            };
            if row.len() != n + 1 {
                return Err(HmmError::InvalidModel(format!(
                    "transition row '{name}' has {} columns, expected {}",
                    row.len(),
                    n + 1
                )));
            }
            check_range(row, || format!("transition row '{name}'"))?;
            if let Normalization::Checked(tol) = normalization {
                check_sums_to_one(&row[1..], tol, || format!("transition row '{name}'"))?;
            }
        }

        if emission.len() != n {
            return Err(HmmError::InvalidModel(format!(
                "{} emission vectors for {} states",
                emission.len(),
                n
            )));
        }
        for (state, row) in states.iter().zip(&emission) {
            if row.len() != m {
                return Err(HmmError::InvalidModel(format!(
                    "emission vector for '{state}' has length {}, expected {}",
                    row.len(),
                    m
                )));
            }
            check_range(row, || format!("emission vector for '{state}'"))?;
            if let Normalization::Checked(tol) = normalization {
                check_sums_to_one(row, tol, || format!("emission vector for '{state}'"))?;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(states = n, symbols = m, "model constructed");

        Ok(Self {
            states,
            state_index,
            symbols,
            symbol_index,
            transition,
            emission,
        })
    }

    /// Number of emitting states `N` (the start pseudo-state is not counted).
    #[inline]
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Size of the observation vocabulary `M`.
    #[inline]
    pub fn num_symbols(&self) -> usize {
        self.symbols.len()
    }

    /// Emitting-state labels in index order.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Observation symbols in index order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Label of emitting state `index`.
    ///
    /// # Panics
    /// Panics if `index >= N`.
    pub fn state_label(&self, index: usize) -> &str {
        &self.states[index]
    }

    /// Index in `0..N` of an emitting-state label.
    pub fn state_index(&self, label: &str) -> Result<usize> {
        self.state_index
            .get(label)
            .copied()
            .ok_or_else(|| HmmError::unknown_state(label))
    }

    /// Index in `0..M` of an observation symbol.
    pub fn observation_index(&self, symbol: &str) -> Result<usize> {
        self.symbol_index
            .get(symbol)
            .copied()
            .ok_or_else(|| HmmError::unknown_observation(symbol))
    }

    /// Resolve a whole label sequence, reporting the first unknown label.
    pub fn encode_states<Q: AsRef<str>>(&self, labels: &[Q]) -> Result<Vec<usize>> {
        labels
            .iter()
            .map(|label| self.state_index(label.as_ref()))
            .collect()
    }

    /// Resolve a whole observation sequence, reporting the first unknown symbol.
    pub fn encode_observations<O: AsRef<str>>(&self, symbols: &[O]) -> Result<Vec<usize>> {
        symbols
            .iter()
            .map(|symbol| self.observation_index(symbol.as_ref()))
            .collect()
    }

    /// `P(state to | state from)` in matrix coordinates: `from = 0` is the start
    /// pseudo-state, `from = i + 1` and `to = j + 1` are emitting states `i`, `j`.
    ///
    /// # Panics
    /// Panics if either index exceeds `N`.
    #[inline]
    pub fn transition_prob(&self, from: usize, to: usize) -> f64 {
        self.transition[from][to]
    }

    /// Probability of entering emitting state `state` from the start pseudo-state.
    #[inline]
    pub fn start_prob(&self, state: usize) -> f64 {
        self.transition[START][state + 1]
    }

    /// `P(observe obs | state)` for emitting state `state` and symbol index `obs`.
    ///
    /// # Panics
    /// Panics if `state >= N` or `obs >= M`.
    #[inline]
    pub fn emission_prob(&self, state: usize, obs: usize) -> f64 {
        self.emission[state][obs]
    }
}

fn index_labels(labels: &[String], what: &str) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        if index.insert(label.clone(), i).is_some() {
            return Err(HmmError::InvalidModel(format!(
                "duplicate {what} label '{label}'"
            )));
        }
    }
    Ok(index)
}

fn check_range(row: &[f64], name: impl Fn() -> String) -> Result<()> {
    match row.iter().find(|p| !(0.0..=1.0).contains(*p)) {
        Some(p) => Err(HmmError::InvalidModel(format!(
            "{} contains {p}, outside [0, 1]",
            name()
        ))),
        None => Ok(()),
    }
}

fn check_sums_to_one(row: &[f64], tol: f64, name: impl Fn() -> String) -> Result<()> {
    let total: f64 = row.iter().sum();
    if (total - 1.0).abs() > tol {
        return Err(HmmError::InvalidModel(format!(
            "{} sums to {total}, expected 1",
            name()
        )));
    }
    Ok(())
}
