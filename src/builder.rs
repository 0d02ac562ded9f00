//! Label-keyed construction of a [`Model`].
//!
//! ```
//! use hmm_dp::ModelBuilder;
//!
//! let model = ModelBuilder::new()
//!     .with_states(["RAIN", "SUN"])
//!     .with_symbols(["walk", "shop", "clean"])
//!     .with_start([0.6, 0.4])
//!     .with_transition("RAIN", [0.7, 0.3])
//!     .with_transition("SUN", [0.4, 0.6])
//!     .with_emission("RAIN", [0.1, 0.4, 0.5])
//!     .with_emission("SUN", [0.6, 0.3, 0.1])
//!     .build()
//!     .unwrap();
//! assert_eq!(model.num_states(), 2);
//! assert_eq!(model.start_prob(1), 0.4);
//! ```

use crate::error::{HmmError, Result};
use crate::model::{Model, Normalization, DEFAULT_TOLERANCE};

#[derive(Clone, Debug, Default)]
pub struct ModelBuilder {
    states: Vec<String>,
    symbols: Vec<String>,
    start: Option<Vec<f64>>,
    transitions: Vec<(String, Vec<f64>)>,
    emissions: Vec<(String, Vec<f64>)>,
    tolerance: Option<f64>,
    unnormalized: bool,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emitting-state labels; their order fixes the state indices.
    pub fn with_states<S: Into<String>>(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    /// Observation symbols; their order fixes the symbol indices.
    pub fn with_symbols<S: Into<String>>(mut self, symbols: impl IntoIterator<Item = S>) -> Self {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Distribution over emitting states leaving the start pseudo-state.
    pub fn with_start(mut self, probs: impl Into<Vec<f64>>) -> Self {
        self.start = Some(probs.into());
        self
    }

    /// Outgoing distribution of state `from`, one entry per emitting state.
    pub fn with_transition(mut self, from: impl Into<String>, probs: impl Into<Vec<f64>>) -> Self {
        self.transitions.push((from.into(), probs.into()));
        self
    }

    /// Emission distribution of `state`, one entry per observation symbol.
    pub fn with_emission(mut self, state: impl Into<String>, probs: impl Into<Vec<f64>>) -> Self {
        self.emissions.push((state.into(), probs.into()));
        self
    }

    /// Row-sum tolerance (default [`DEFAULT_TOLERANCE`]). Must be finite and
    /// non-negative.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Skip row-sum checks. Values must still lie in `[0, 1]`.
    pub fn allow_unnormalized(mut self) -> Self {
        self.unnormalized = true;
        self
    }

    pub fn build(self) -> Result<Model> {
        let n = self.states.len();
        let position = |label: &str| self.states.iter().position(|s| s == label);

        let start = self
            .start
            .ok_or_else(|| HmmError::InvalidModel("missing start distribution".into()))?;

        let mut transition: Vec<Option<Vec<f64>>> = vec![None; n];
        for (from, row) in self.transitions {
            let idx = position(&from).ok_or_else(|| HmmError::unknown_state(&from))?;
            if transition[idx].replace(row).is_some() {
                return Err(HmmError::InvalidModel(format!(
                    "duplicate transition row for '{from}'"
                )));
            }
        }

        let mut emission: Vec<Option<Vec<f64>>> = vec![None; n];
        for (state, row) in self.emissions {
            let idx = position(&state).ok_or_else(|| HmmError::unknown_state(&state))?;
            if emission[idx].replace(row).is_some() {
                return Err(HmmError::InvalidModel(format!(
                    "duplicate emission vector for '{state}'"
                )));
            }
        }

        // Matrix form: prepend the never-entered start column to every row.
        let with_start_column = |row: Vec<f64>| {
            let mut full = Vec::with_capacity(row.len() + 1);
            full.push(0.0);
            full.extend(row);
            full
        };
        let mut matrix = Vec::with_capacity(n + 1);
        matrix.push(with_start_column(start));
        for (label, row) in self.states.iter().zip(transition) {
            let row = row.ok_or_else(|| {
                HmmError::InvalidModel(format!("missing transition row for '{label}'"))
            })?;
            matrix.push(with_start_column(row));
        }

        let emission = self
            .states
            .iter()
            .zip(emission)
            .map(|(label, row)| {
                row.ok_or_else(|| {
                    HmmError::InvalidModel(format!("missing emission vector for '{label}'"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let normalization = if self.unnormalized {
            Normalization::Unchecked
        } else {
            let tol = self.tolerance.unwrap_or(DEFAULT_TOLERANCE);
            if !tol.is_finite() || tol < 0.0 {
                return Err(HmmError::InvalidModel(format!(
                    "tolerance must be finite and non-negative, got {tol}"
                )));
            }
            Normalization::Checked(tol)
        };
        Model::validated(self.states, self.symbols, matrix, emission, normalization)
    }
}

#[cfg(test)]
mod tests {
    use super::ModelBuilder;
    use crate::error::{HmmError, SymbolKind};
    use crate::model::START;

    fn two_state() -> ModelBuilder {
        ModelBuilder::new()
            .with_states(["A", "B"])
            .with_symbols(["x", "y"])
            .with_start([0.5, 0.5])
            .with_transition("B", [0.2, 0.8])
            .with_transition("A", [0.9, 0.1])
            .with_emission("A", [1.0, 0.0])
            .with_emission("B", [0.3, 0.7])
    }

    #[test]
    fn rows_are_placed_by_label_not_call_order() {
        let model = two_state().build().unwrap();
        assert_eq!(model.transition_prob(START, 0), 0.0);
        assert_eq!(model.transition_prob(1, 2), 0.1);
        assert_eq!(model.transition_prob(2, 1), 0.2);
        assert_eq!(model.emission_prob(1, 1), 0.7);
    }

    #[test]
    fn missing_pieces_are_reported() {
        let err = ModelBuilder::new()
            .with_states(["A"])
            .with_symbols(["x"])
            .with_transition("A", [1.0])
            .with_emission("A", [1.0])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("start"));

        let err = ModelBuilder::new()
            .with_states(["A", "B"])
            .with_symbols(["x"])
            .with_start([1.0, 0.0])
            .with_transition("A", [1.0, 0.0])
            .with_emission("A", [1.0])
            .with_emission("B", [1.0])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("missing transition row for 'B'"));
    }

    #[test]
    fn unknown_and_duplicate_labels() {
        let err = two_state().with_emission("C", [0.5, 0.5]).build().unwrap_err();
        assert_eq!(
            err,
            HmmError::UnknownSymbol {
                kind: SymbolKind::State,
                symbol: "C".into()
            }
        );

        let err = two_state().with_transition("A", [0.5, 0.5]).build().unwrap_err();
        assert!(err.to_string().contains("duplicate transition row"));
    }

    #[test]
    fn tolerance_and_unnormalized_modes() {
        let sloppy = || {
            ModelBuilder::new()
                .with_states(["A"])
                .with_symbols(["x", "y"])
                .with_start([1.0])
                .with_transition("A", [1.0])
                .with_emission("A", [0.5, 0.4999])
        };
        assert!(sloppy().build().is_err());
        assert!(sloppy().with_tolerance(1e-3).build().is_ok());
        assert!(sloppy().allow_unnormalized().build().is_ok());

        let out_of_range = ModelBuilder::new()
            .with_states(["A"])
            .with_symbols(["x", "y"])
            .with_start([1.0])
            .with_transition("A", [1.0])
            .with_emission("A", [2.0, 0.0])
            .allow_unnormalized()
            .build();
        assert!(out_of_range.is_err());
    }

    #[test]
    fn tolerance_must_be_finite_and_non_negative() {
        for tol in [f64::NAN, f64::INFINITY, -1.0] {
            let err = two_state().with_tolerance(tol).build().unwrap_err();
            assert!(
                err.to_string().contains("tolerance must be finite"),
                "tolerance {tol}: {err}"
            );
        }
        assert!(two_state().with_tolerance(0.0).build().is_ok());
    }
}
