//! The seam between the trellis driver and a concrete recurrence.
//!
//! To run a left-to-right dynamic program through [`TrellisEngine`], implement
//! [`TrellisProblem`] for a struct capturing the instance (model reference,
//! encoded observations). The engine owns the table; the problem only fills
//! cells and reads the finished table.
//!
//! Semantics:
//! - There are `T = num_layers()` columns and `N = num_states()` rows.
//! - `init_column` fills column 0.
//! - `recurrence(t, prev, next, back)` fills column `t` from column `t - 1`.
//! - `terminate` reduces the finished table to the problem's output.
//!
//! [`TrellisEngine`]: crate::engine::TrellisEngine

use crate::trellis::Trellis;

/// A left-to-right dynamic program over a `(state, time)` trellis.
pub trait TrellisProblem {
    /// Result extracted from the finished table.
    type Output;

    /// Rows per column.
    fn num_states(&self) -> usize;

    /// Number of columns `T`.
    fn num_layers(&self) -> usize;

    /// Whether the engine should allocate a backpointer table.
    fn tracks_backpointers(&self) -> bool {
        false
    }

    /// Fill column 0.
    fn init_column(&self, column: &mut [f64]);

    /// Fill column `t >= 1` from column `t - 1`.
    ///
    /// `back` is `Some` exactly when [`tracks_backpointers`] returns true; each
    /// slot receives the predecessor state chosen for the corresponding cell.
    ///
    /// [`tracks_backpointers`]: TrellisProblem::tracks_backpointers
    fn recurrence(&self, t: usize, prev: &[f64], next: &mut [f64], back: Option<&mut [usize]>);

    /// Reduce the filled table to the output.
    fn terminate(&self, trellis: &Trellis) -> Self::Output;
}
