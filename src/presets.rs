//! Ready-made models.

use crate::error::Result;
use crate::model::Model;

/// Eisner's ice-cream model: hidden weather (`HOT`, `COLD`) observed through
/// the number of ice creams eaten (`"1"`, `"2"`, `"3"`).
///
/// ```
/// let model = hmm_dp::presets::ice_cream().unwrap();
/// let p = hmm_dp::forward(&model, &["3"]).unwrap();
/// assert!((p - 0.34).abs() < 1e-12);
/// ```
pub fn ice_cream() -> Result<Model> {
    Model::new(
        ["HOT", "COLD"],
        ["1", "2", "3"],
        vec![
            vec![0.0, 0.8, 0.2],
            vec![0.0, 0.7, 0.3],
            vec![0.0, 0.4, 0.6],
        ],
        vec![vec![0.2, 0.4, 0.4], vec![0.5, 0.4, 0.1]],
    )
}
