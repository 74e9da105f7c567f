//! Hour-of-day seasonality factors

use crate::sampling::{HourlyBucket, SECONDS_PER_HOUR};
use chrono::{DateTime, FixedOffset, Timelike, Utc};

/// Number of distinct hour-of-day slots
pub const HOURS_PER_DAY: usize = 24;

const SECONDS_PER_DAY: i64 = SECONDS_PER_HOUR * HOURS_PER_DAY as i64;

/// Hour of day (0-23) of a Unix timestamp in the given offset
pub fn hour_of_day(timestamp: i64, offset: &FixedOffset) -> u32 {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(utc) => utc.with_timezone(offset).hour(),
        // Outside chrono's representable range; plain modular arithmetic
        // gives the same answer.
        None => {
            let local = timestamp.saturating_add(i64::from(offset.local_minus_utc()));
            (local.rem_euclid(SECONDS_PER_DAY) / SECONDS_PER_HOUR) as u32
        }
    }
}

/// Multiplicative adjustment per hour of day.
///
/// A factor of 1.2 at hour 20 means buckets at 20:00 run 20% above the
/// average bucket in the fitted window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalFactors {
    factors: [f64; HOURS_PER_DAY],
    offset: FixedOffset,
}

impl SeasonalFactors {
    /// All factors 1.0
    pub fn neutral(offset: FixedOffset) -> Self {
        Self {
            factors: [1.0; HOURS_PER_DAY],
            offset,
        }
    }

    /// Factor for an hour of day; out-of-range hours are neutral
    pub fn factor(&self, hour: u32) -> f64 {
        self.factors.get(hour as usize).copied().unwrap_or(1.0)
    }

    /// Factor for the hour of day containing `timestamp`
    pub fn factor_at(&self, timestamp: i64) -> f64 {
        self.factor(hour_of_day(timestamp, &self.offset))
    }

    /// All 24 factors, indexed by hour of day
    pub fn as_slice(&self) -> &[f64] {
        &self.factors
    }

    /// Offset the hours of day were computed in
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Compute the daily cycle from a run of hourly buckets.
///
/// Each hour's factor is the mean of the buckets on that hour divided by the
/// mean of every bucket. Hours with no buckets stay at 1.0, and a zero
/// overall mean is replaced by 1.0 so the division stays finite.
pub fn daily_cycle_factors(buckets: &[HourlyBucket], offset: FixedOffset) -> SeasonalFactors {
    let mut seasonal = SeasonalFactors::neutral(offset);
    if buckets.is_empty() {
        return seasonal;
    }

    let mut sums = [0.0f64; HOURS_PER_DAY];
    let mut counts = [0usize; HOURS_PER_DAY];
    for bucket in buckets {
        let hour = hour_of_day(bucket.hour_start, &offset) as usize;
        sums[hour] += bucket.mean_value;
        counts[hour] += 1;
    }

    let mut overall_mean =
        buckets.iter().map(|b| b.mean_value).sum::<f64>() / buckets.len() as f64;
    if overall_mean == 0.0 {
        overall_mean = 1.0;
    }

    for hour in 0..HOURS_PER_DAY {
        if counts[hour] > 0 {
            seasonal.factors[hour] = sums[hour] / counts[hour] as f64 / overall_mean;
        }
    }

    seasonal
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn bucket(hour_start: i64, mean_value: f64) -> HourlyBucket {
        HourlyBucket {
            hour_start,
            mean_value,
            samples: 1,
        }
    }

    #[test]
    fn test_hour_of_day() {
        assert_eq!(hour_of_day(0, &utc()), 0);
        assert_eq!(hour_of_day(5 * 3_600 + 59, &utc()), 5);
        assert_eq!(hour_of_day(86_400 + 23 * 3_600, &utc()), 23);

        let taipei = FixedOffset::east_opt(8 * 3_600).unwrap();
        assert_eq!(hour_of_day(0, &taipei), 8);
        assert_eq!(hour_of_day(20 * 3_600, &taipei), 4);
    }

    #[test]
    fn test_factors_relative_to_overall_mean() {
        // Two days: hour 0 runs at 50, hour 1 at 150.
        let buckets = vec![
            bucket(0, 50.0),
            bucket(3_600, 150.0),
            bucket(86_400, 50.0),
            bucket(86_400 + 3_600, 150.0),
        ];

        let seasonal = daily_cycle_factors(&buckets, utc());

        assert_relative_eq!(seasonal.factor(0), 0.5);
        assert_relative_eq!(seasonal.factor(1), 1.5);
        for hour in 2..24 {
            assert_relative_eq!(seasonal.factor(hour), 1.0);
        }
    }

    #[test]
    fn test_zero_mean_does_not_divide_by_zero() {
        let buckets = vec![bucket(0, 0.0), bucket(3_600, 0.0)];
        let seasonal = daily_cycle_factors(&buckets, utc());

        assert!(seasonal.as_slice().iter().all(|f| f.is_finite()));
        assert_relative_eq!(seasonal.factor(0), 0.0);
        assert_relative_eq!(seasonal.factor(2), 1.0);
    }

    #[test]
    fn test_empty_buckets_are_neutral() {
        let seasonal = daily_cycle_factors(&[], utc());
        assert_eq!(seasonal, SeasonalFactors::neutral(utc()));
        assert_relative_eq!(seasonal.factor(99), 1.0);
    }

    #[test]
    fn test_factor_at_uses_offset() {
        let offset = FixedOffset::east_opt(2 * 3_600).unwrap();
        // 00:00 UTC is 02:00 in the offset.
        let seasonal = daily_cycle_factors(&[bucket(0, 10.0), bucket(3_600, 30.0)], offset);

        assert_relative_eq!(seasonal.factor(2), 0.5);
        assert_relative_eq!(seasonal.factor_at(86_400), 0.5);
        assert_relative_eq!(seasonal.factor_at(86_400 + 3_600), 1.5);
    }
}
