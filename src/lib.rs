//! Trellis-based inference for discrete Hidden Markov Models.
//!
//! Given a model's state space, observation vocabulary, transition and
//! emission probabilities, this crate computes:
//! - the likelihood P(O|Q) of a fully specified state/observation pair,
//! - the total probability P(O) of an observation sequence (forward algorithm),
//! - the most probable hidden state sequence (Viterbi with backtrace).
//!
//! ## Core idea
//! 1. Describe the HMM once as an immutable [`Model`] (directly from matrices
//!    or through [`ModelBuilder`]). A non-emitting start pseudo-state seeds the
//!    first transition.
//! 2. Forward and Viterbi are [`TrellisProblem`] implementations.
//! 3. [`TrellisEngine`] allocates a fresh [`Trellis`] per call, fills it left
//!    to right and hands it back to the problem for the final reduction or
//!    backtrace.
//!
//! Every call borrows the model read-only and owns its table, so independent
//! calls may run on different threads without locking (see [`batch`]).
//!
//! ## Quick start
//! ```
//! use hmm_dp::{forward, likelihood, presets, viterbi};
//!
//! let model = presets::ice_cream().unwrap();
//! let p = forward(&model, &["3", "1", "3"]).unwrap();
//! assert!((p - 0.026264).abs() < 1e-12);
//!
//! let path = viterbi(&model, &["3", "1", "3"]).unwrap();
//! assert_eq!(path, ["HOT", "HOT", "HOT"]);
//!
//! let l = likelihood(&model, &path, &["3", "1", "3"]).unwrap();
//! assert!((l - 0.4 * 0.2 * 0.4).abs() < 1e-15);
//! ```
//!
//! ## Numeric modes
//! Probabilities are multiplied directly by default ([`Linear`]), which
//! underflows to zero on long sequences. [`LogSpace`] runs the same
//! recurrences on natural logs; select it through [`Inference`]:
//! ```
//! use hmm_dp::{presets, Inference, LogSpace};
//!
//! let model = presets::ice_cream().unwrap();
//! let long: Vec<&str> = ["3", "1", "2"].iter().copied().cycle().take(3000).collect();
//! let lp = Inference::<LogSpace>::new(&model).forward(&long).unwrap();
//! assert!(lp.is_finite());
//! ```

pub mod batch;
pub mod builder;
pub mod engine;
pub mod error;
pub mod inference;
pub mod model;
pub mod presets;
pub mod problems;
pub mod space;
pub mod traits;
pub mod trellis;
pub mod utils;

pub use crate::builder::ModelBuilder;
pub use crate::engine::TrellisEngine;
pub use crate::error::{HmmError, Result, SymbolKind};
pub use crate::inference::Inference;
pub use crate::model::{Model, DEFAULT_TOLERANCE, START};
pub use crate::problems::forward::forward;
pub use crate::problems::likelihood::{joint_probability, likelihood};
pub use crate::problems::viterbi::{viterbi, ViterbiPath};
pub use crate::space::{Linear, LogSpace, ProbSpace};
pub use crate::traits::TrellisProblem;
pub use crate::trellis::Trellis;
