//! Recency-weighted linear regression
//!
//! Each point `i` of `n` gets weight `e^(i/n)`: the oldest point weighs 1
//! and the most recent weighs close to `e`, so the fitted line leans toward
//! what happened lately without discarding older history.

use serde::{Deserialize, Serialize};

/// Weighted variance of `x` below which the fit is treated as degenerate
pub const VARIANCE_EPSILON: f64 = 1e-10;

/// Fitted straight line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    /// Change in value per hourly step
    pub slope: f64,
    /// Value at index 0
    pub intercept: f64,
}

impl TrendLine {
    /// A line with zero slope at the given level
    pub fn flat(level: f64) -> Self {
        Self {
            slope: 0.0,
            intercept: level,
        }
    }

    /// Evaluate the line at index `x`
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Exponentially growing weights for `n` ordered points
pub fn recency_weights(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 / n as f64).exp()).collect()
}

/// Fit a line through `values` indexed `0..n`, weighting recent points more.
///
/// With fewer than two points, or when the weighted variance of the index
/// is negligible, the result is a flat line at the weighted mean.
pub fn weighted_linear_regression(values: &[f64]) -> TrendLine {
    let n = values.len();
    if n < 2 {
        return TrendLine::flat(values.first().copied().unwrap_or(0.0));
    }

    let weights = recency_weights(n);
    let total_weight: f64 = weights.iter().sum();

    let mean_x = weights
        .iter()
        .enumerate()
        .map(|(i, w)| w * i as f64)
        .sum::<f64>()
        / total_weight;
    let mean_y = weights
        .iter()
        .zip(values)
        .map(|(w, y)| w * y)
        .sum::<f64>()
        / total_weight;

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (i, (w, y)) in weights.iter().zip(values).enumerate() {
        let dx = i as f64 - mean_x;
        covariance += w * dx * (y - mean_y);
        variance += w * dx * dx;
    }

    if variance.abs() < VARIANCE_EPSILON {
        return TrendLine::flat(mean_y);
    }

    let slope = covariance / variance;
    TrendLine {
        slope,
        intercept: mean_y - slope * mean_x,
    }
}
