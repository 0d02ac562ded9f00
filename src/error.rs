//! Typed failures reported by model construction and the inference engines.
//!
//! Every error is a precondition violation on caller input; nothing here is
//! retried or recovered internally.

use std::fmt;
use thiserror::Error;

/// Which vocabulary a failed lookup was performed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Hidden-state label.
    State,
    /// Observation symbol.
    Observation,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::State => f.write_str("state label"),
            SymbolKind::Observation => f.write_str("observation symbol"),
        }
    }
}

/// Error type for all `hmm_dp` operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HmmError {
    /// A state label or observation symbol is absent from the model.
    #[error("unknown {kind} '{symbol}'")]
    UnknownSymbol { kind: SymbolKind, symbol: String },

    /// Likelihood was given state and observation sequences of different lengths.
    #[error("length mismatch: {states} states vs {observations} observations")]
    LengthMismatch { states: usize, observations: usize },

    /// Forward or Viterbi was given a zero-length observation sequence.
    #[error("observation sequence is empty")]
    EmptySequence,

    /// The model tables are malformed (shape, range or normalization).
    #[error("invalid model: {0}")]
    InvalidModel(String),
}

impl HmmError {
    pub(crate) fn unknown_state(label: &str) -> Self {
        HmmError::UnknownSymbol {
            kind: SymbolKind::State,
            symbol: label.to_owned(),
        }
    }

    pub(crate) fn unknown_observation(symbol: &str) -> Self {
        HmmError::UnknownSymbol {
            kind: SymbolKind::Observation,
            symbol: symbol.to_owned(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HmmError>;
