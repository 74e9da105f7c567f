//! # Trend Math
//!
//! Numeric building blocks for short-horizon popularity forecasts.
//! Everything in this crate is pure: no I/O, no shared state, identical
//! input always yields identical output.
//!
//! ```
//! use trend_math::forecasting::forecast;
//! use trend_math::sampling::DataPoint;
//!
//! let history: Vec<DataPoint> = (0..8)
//!     .map(|i| DataPoint::new(1_700_000_000 + i * 3600, 1000.0 + 10.0 * i as f64))
//!     .collect();
//!
//! let points = forecast(&history);
//! assert_eq!(points.len(), 24);
//! ```

use thiserror::Error;

pub mod forecasting;
pub mod regression;
pub mod sampling;
pub mod seasonality;

pub use forecasting::{forecast, FittedTrend, ForecastConfig, ForecastPoint, Forecaster};
pub use sampling::{DataPoint, HourlyBucket, Sample};

/// Errors that can occur in trend calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for trend math operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::InsufficientData("3 hourly buckets, need 6".to_string());
        assert_eq!(
            err.to_string(),
            "Insufficient data for calculation: 3 hourly buckets, need 6"
        );
    }
}
