//! Assorted numeric helpers shared by the engines.

/// Index and value of the largest element, ties resolved to the lowest index.
///
/// Returns `None` for an empty slice. Comparisons are strict, so a later
/// element must be *greater* to displace the current best; NaN never wins.
#[inline]
pub fn argmax(values: &[f64]) -> Option<(usize, f64)> {
    let (&first, rest) = values.split_first()?;
    let mut best_idx = 0;
    let mut best = first;
    for (offset, &v) in rest.iter().enumerate() {
        if v > best || (best.is_nan() && !v.is_nan()) {
            best = v;
            best_idx = offset + 1;
        }
    }
    Some((best_idx, best))
}

/// Numerically stable `ln(Σ exp(x))`.
///
/// Empty input and all-`-inf` input both yield `-inf`.
pub fn log_sum_exp<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let values: Vec<f64> = values.into_iter().collect();
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    if max == f64::INFINITY {
        return f64::INFINITY;
    }
    let sum: f64 = values.iter().map(|&x| (x - max).exp()).sum();
    max + sum.ln()
}
