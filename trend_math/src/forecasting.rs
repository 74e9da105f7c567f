//! Short-horizon popularity forecasts
//!
//! The pipeline runs in four steps:
//! - downsample raw samples into hourly buckets
//! - fit a recency-weighted linear trend over the bucket index
//! - derive an hour-of-day seasonality factor from the same buckets
//! - project the trend forward one hour at a time, scaled by the factor
//!   for each future hour, rounded and clamped to zero
//!
//! Too little history is not an error here: [`forecast`] returns an empty
//! vector and the caller decides whether that is worth mentioning.

use crate::regression::{weighted_linear_regression, TrendLine};
use crate::sampling::{hourly_buckets, Sample, SECONDS_PER_HOUR};
use crate::seasonality::{daily_cycle_factors, SeasonalFactors};
use crate::{MathError, Result};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Minimum number of distinct hourly buckets needed to forecast
pub const MIN_HOURS: usize = 6;

/// Number of hourly points produced by a forecast
pub const FORECAST_HOURS: usize = 24;

/// One projected hourly value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Projected count, never negative
    pub value: u64,
    /// Start of the projected hour (Unix seconds)
    pub recorded_at: i64,
    /// Marks synthesized points when mixed with observed history
    pub is_forecast: bool,
}

/// Forecaster tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Minimum distinct hourly buckets before a forecast is attempted
    pub min_hours: usize,
    /// Number of hourly points to project
    pub horizon_hours: usize,
    /// Offset from UTC used to decide the hour of day
    pub utc_offset_seconds: i32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_hours: MIN_HOURS,
            horizon_hours: FORECAST_HOURS,
            utc_offset_seconds: 0,
        }
    }
}

impl ForecastConfig {
    /// Check the configuration and resolve its UTC offset
    pub fn validate(&self) -> Result<FixedOffset> {
        if self.min_hours == 0 {
            return Err(MathError::InvalidInput(
                "min_hours must be at least 1".to_string(),
            ));
        }
        if self.horizon_hours == 0 {
            return Err(MathError::InvalidInput(
                "horizon_hours must be at least 1".to_string(),
            ));
        }

        FixedOffset::east_opt(self.utc_offset_seconds).ok_or_else(|| {
            MathError::InvalidInput(format!(
                "utc_offset_seconds {} is outside +/-24h",
                self.utc_offset_seconds
            ))
        })
    }
}

/// Trend and daily cycle fitted from one history
#[derive(Debug, Clone, PartialEq)]
pub struct FittedTrend {
    /// Weighted linear trend over the bucket index
    pub trend: TrendLine,
    /// Hour-of-day multipliers
    pub seasonality: SeasonalFactors,
    /// Number of hourly buckets the fit used
    pub buckets: usize,
    /// Start of the last observed hour
    pub last_hour_start: i64,
}

impl FittedTrend {
    /// Trend value at `steps` hours past the last observed bucket,
    /// before seasonality is applied
    pub fn trend_value(&self, steps: usize) -> f64 {
        self.trend.value_at((self.buckets + steps) as f64)
    }

    /// Project `horizon` hourly points past the last observed bucket.
    ///
    /// Stops early if a projected hour would not fit in an `i64` timestamp.
    pub fn project(&self, horizon: usize) -> Vec<ForecastPoint> {
        (1..=horizon)
            .map_while(|step| {
                let recorded_at = i64::try_from(step)
                    .ok()
                    .and_then(|s| s.checked_mul(SECONDS_PER_HOUR))
                    .and_then(|offset| self.last_hour_start.checked_add(offset))?;
                let adjusted = self.trend_value(step) * self.seasonality.factor_at(recorded_at);

                Some(ForecastPoint {
                    value: adjusted.round_ties_even().max(0.0) as u64,
                    recorded_at,
                    is_forecast: true,
                })
            })
            .collect()
    }
}

/// Forecaster with a fixed configuration
#[derive(Debug, Clone)]
pub struct Forecaster {
    config: ForecastConfig,
    offset: FixedOffset,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self {
            config: ForecastConfig::default(),
            offset: Utc.fix(),
        }
    }
}

impl Forecaster {
    /// Create a forecaster, rejecting invalid configurations
    pub fn new(config: ForecastConfig) -> Result<Self> {
        let offset = config.validate()?;
        Ok(Self { config, offset })
    }

    /// Get the configuration
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Fit trend and seasonality without projecting.
    ///
    /// Fails with [`MathError::InsufficientData`] when the samples cover
    /// fewer than `min_hours` distinct hours.
    pub fn fit<S: Sample>(&self, samples: &[S]) -> Result<FittedTrend> {
        let buckets = hourly_buckets(samples);
        if buckets.len() < self.config.min_hours {
            return Err(MathError::InsufficientData(format!(
                "{} hourly buckets, need {}",
                buckets.len(),
                self.config.min_hours
            )));
        }

        let values: Vec<f64> = buckets.iter().map(|b| b.mean_value).collect();
        let trend = weighted_linear_regression(&values);
        let seasonality = daily_cycle_factors(&buckets, self.offset);
        let last_hour_start = buckets
            .last()
            .map(|b| b.hour_start)
            .ok_or_else(|| MathError::InsufficientData("no hourly buckets".to_string()))?;

        Ok(FittedTrend {
            trend,
            seasonality,
            buckets: buckets.len(),
            last_hour_start,
        })
    }

    /// Project the configured horizon, or nothing if history is too thin
    pub fn forecast<S: Sample>(&self, samples: &[S]) -> Vec<ForecastPoint> {
        match self.fit(samples) {
            Ok(fitted) => fitted.project(self.config.horizon_hours),
            Err(_) => Vec::new(),
        }
    }
}

/// Forecast the next 24 hours with the default configuration
pub fn forecast<S: Sample>(samples: &[S]) -> Vec<ForecastPoint> {
    Forecaster::default().forecast(samples)
}
