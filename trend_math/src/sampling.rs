//! Hourly downsampling of irregular observations
//!
//! Raw readings arrive whenever the ingestion cycle happens to run, so the
//! spacing between them is uneven and several readings may land in the same
//! hour. Grouping them into clock-hour buckets gives the regression a uniform
//! time index.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Length of one bucket in seconds
pub const SECONDS_PER_HOUR: i64 = 3_600;

/// A timestamped reading that can be fed to the forecaster
pub trait Sample {
    /// Unix timestamp in seconds
    fn recorded_at(&self) -> i64;

    /// Measured value
    fn value(&self) -> f64;
}

impl<T: Sample> Sample for &T {
    fn recorded_at(&self) -> i64 {
        (**self).recorded_at()
    }

    fn value(&self) -> f64 {
        (**self).value()
    }
}

/// Plain `(timestamp, value)` sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Unix timestamp in seconds
    pub recorded_at: i64,
    /// Measured value
    pub value: f64,
}

impl DataPoint {
    /// Create a new data point
    pub fn new(recorded_at: i64, value: f64) -> Self {
        Self { recorded_at, value }
    }
}

impl Sample for DataPoint {
    fn recorded_at(&self) -> i64 {
        self.recorded_at
    }

    fn value(&self) -> f64 {
        self.value
    }
}

/// Mean of all samples falling in `[hour_start, hour_start + 3600)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyBucket {
    /// Timestamp truncated to the top of the hour
    pub hour_start: i64,
    /// Arithmetic mean of the member values
    pub mean_value: f64,
    /// Number of member samples
    pub samples: usize,
}

/// Truncate a timestamp to the start of its hour.
///
/// Uses floor division so timestamps before the epoch land in the hour that
/// contains them rather than the following one.
pub fn hour_floor(timestamp: i64) -> i64 {
    timestamp.div_euclid(SECONDS_PER_HOUR) * SECONDS_PER_HOUR
}

/// Group samples by clock hour and average each group.
///
/// The result is sorted ascending by `hour_start` regardless of input order.
pub fn hourly_buckets<S: Sample>(samples: &[S]) -> Vec<HourlyBucket> {
    let mut groups: BTreeMap<i64, (f64, usize)> = BTreeMap::new();

    for sample in samples {
        let group = groups
            .entry(hour_floor(sample.recorded_at()))
            .or_insert((0.0, 0));
        group.0 += sample.value();
        group.1 += 1;
    }

    groups
        .into_iter()
        .map(|(hour_start, (sum, count))| HourlyBucket {
            hour_start,
            mean_value: sum / count as f64,
            samples: count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hour_floor() {
        assert_eq!(hour_floor(0), 0);
        assert_eq!(hour_floor(3_599), 0);
        assert_eq!(hour_floor(3_600), 3_600);
        assert_eq!(hour_floor(7_261), 7_200);
        assert_eq!(hour_floor(-1), -3_600);
    }

    #[test]
    fn test_buckets_average_within_hour() {
        let samples = vec![
            DataPoint::new(7_200, 10.0),
            DataPoint::new(7_300, 20.0),
            DataPoint::new(10_799, 30.0),
            DataPoint::new(10_800, 100.0),
        ];

        let buckets = hourly_buckets(&samples);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].hour_start, 7_200);
        assert_relative_eq!(buckets[0].mean_value, 20.0);
        assert_eq!(buckets[0].samples, 3);
        assert_eq!(buckets[1].hour_start, 10_800);
        assert_relative_eq!(buckets[1].mean_value, 100.0);
        assert_eq!(buckets[1].samples, 1);
    }

    #[test]
    fn test_buckets_sorted_for_unordered_input() {
        let samples = vec![
            DataPoint::new(36_000, 3.0),
            DataPoint::new(3_600, 1.0),
            DataPoint::new(18_000, 2.0),
        ];

        let starts: Vec<i64> = hourly_buckets(&samples)
            .iter()
            .map(|b| b.hour_start)
            .collect();

        assert_eq!(starts, vec![3_600, 18_000, 36_000]);
    }

    #[test]
    fn test_empty_input() {
        let samples: Vec<DataPoint> = Vec::new();
        assert!(hourly_buckets(&samples).is_empty());
    }

    #[test]
    fn test_borrowed_samples() {
        let owned = vec![DataPoint::new(0, 4.0), DataPoint::new(60, 6.0)];
        let borrowed: Vec<&DataPoint> = owned.iter().collect();

        let buckets = hourly_buckets(&borrowed);
        assert_eq!(buckets.len(), 1);
        assert_relative_eq!(buckets[0].mean_value, 5.0);
    }
}
