//! Finite-difference tables.
//!
//! For samples `y_0 .. y_{n-1}`:
//!
//! - forward:  `Δ^k y_j = Δ^{k-1} y_{j+1} - Δ^{k-1} y_j`
//! - backward: `∇^k y_j = ∇^{k-1} y_j - ∇^{k-1} y_{j-1}`
//! - central:  `δ y_i = (y_{i+1} - y_{i-1}) / 2`
//!
//! Forward and backward tables hold the same numbers level by level; only the
//! indexing convention differs, and both are stored left-to-right.

use crate::error::AppError;

/// Forward-difference table. Level 0 is the input; level `k` has `n - k` entries.
///
/// Returns exactly `n` levels for `n >= 1`. An empty input yields a single
/// empty level.
pub fn forward_difference(y: &[f64]) -> Result<Vec<Vec<f64>>, AppError> {
    ensure_real(y)?;

    let mut table = vec![y.to_vec()];
    for _ in 1..y.len() {
        let prev = table.last().map(Vec::as_slice).unwrap_or_default();
        let level: Vec<f64> = prev.windows(2).map(|w| w[1] - w[0]).collect();
        table.push(level);
    }
    Ok(table)
}

/// Backward-difference table.
///
/// Each level is built walking from the end of the previous one
/// (`prev[j] - prev[j-1]` for `j = len-1 .. 1`) and then stored in ascending
/// index order, so level contents match `forward_difference`.
pub fn backward_difference(y: &[f64]) -> Result<Vec<Vec<f64>>, AppError> {
    ensure_real(y)?;

    let mut table = vec![y.to_vec()];
    for _ in 1..y.len() {
        let prev = table.last().map(Vec::as_slice).unwrap_or_default();
        let mut level: Vec<f64> = (1..prev.len()).rev().map(|j| prev[j] - prev[j - 1]).collect();
        level.reverse();
        table.push(level);
    }
    Ok(table)
}

/// Central differences `(y[i+2] - y[i]) / 2` for the interior points.
///
/// Returns `n - 2` values, or an empty vector when `n < 3`.
pub fn central_difference(y: &[f64]) -> Result<Vec<f64>, AppError> {
    ensure_real(y)?;

    Ok(y.windows(3).map(|w| (w[2] - w[0]) / 2.0).collect())
}

fn ensure_real(y: &[f64]) -> Result<(), AppError> {
    match y.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(AppError::invalid_input(format!(
            "Sample {idx} is not a real number ({}).",
            y[idx]
        ))),
        None => Ok(()),
    }
}
