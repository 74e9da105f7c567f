use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;
use trend_math::forecasting::{forecast, Forecaster, FORECAST_HOURS, MIN_HOURS};
use trend_math::sampling::{hour_floor, DataPoint, SECONDS_PER_HOUR};

const START: i64 = 1_717_200_000; // 2024-06-01 00:00:00 UTC

fn hourly_series(values: &[f64]) -> Vec<DataPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| DataPoint::new(START + i as i64 * SECONDS_PER_HOUR, *v))
        .collect()
}

fn assert_hourly_after(points: &[trend_math::ForecastPoint], last_observed: i64) {
    assert_eq!(points.len(), FORECAST_HOURS);
    assert_eq!(points[0].recorded_at, hour_floor(last_observed) + SECONDS_PER_HOUR);
    for pair in points.windows(2) {
        assert_eq!(pair[1].recorded_at - pair[0].recorded_at, SECONDS_PER_HOUR);
    }
    assert!(points.iter().all(|p| p.is_forecast));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
#[case(5)]
fn test_too_few_hours_yields_nothing(#[case] hours: usize) {
    let data = hourly_series(&vec![250.0; hours]);
    assert!(forecast(&data).is_empty());
}

#[test]
fn test_exactly_min_hours_is_enough() {
    let data = hourly_series(&vec![250.0; MIN_HOURS]);
    assert_eq!(forecast(&data).len(), FORECAST_HOURS);
}

#[test]
fn test_steam_example_series() {
    let values: Vec<f64> = (0..8).map(|i| 1000.0 + 10.0 * i as f64).collect();
    let data = hourly_series(&values);

    let points = forecast(&data);

    assert_hourly_after(&points, data.last().unwrap().recorded_at);
    let first = points[0].value as i64;
    assert!((first - 1080).abs() <= 20, "first forecast was {}", first);
    assert!(points.iter().all(|p| p.value > 0));
}

#[test]
fn test_constant_series_stays_flat() {
    // Every 20 minutes for 30 hours, always 700.
    let data: Vec<DataPoint> = (0..90)
        .map(|i| DataPoint::new(START + i * 1_200, 700.0))
        .collect();

    let fitted = Forecaster::default().fit(&data).unwrap();
    assert_relative_eq!(fitted.trend.slope, 0.0, epsilon = 1e-9);

    let points = forecast(&data);
    assert_hourly_after(&points, data.last().unwrap().recorded_at);
    assert!(points.iter().all(|p| p.value == 700));
}

#[test]
fn test_increasing_series_has_rising_trend() {
    let values: Vec<f64> = (0..12).map(|i| 300.0 + i as f64).collect();
    let fitted = Forecaster::default().fit(&hourly_series(&values)).unwrap();

    assert!(fitted.trend.slope > 0.0);
    let trend: Vec<f64> = (1..=FORECAST_HOURS).map(|s| fitted.trend_value(s)).collect();
    assert!(trend.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn test_daily_cycle_shapes_forecast() {
    // Two full days where evenings (18:00-23:00) run three times busier.
    let values: Vec<f64> = (0..48)
        .map(|i| if i % 24 >= 18 { 300.0 } else { 100.0 })
        .collect();
    let data = hourly_series(&values);

    let points = forecast(&data);
    assert_hourly_after(&points, data.last().unwrap().recorded_at);

    let morning = points[9].value; // 09:00 on day three
    let evening = points[20].value; // 20:00 on day three
    assert!(evening > morning * 2, "evening {} morning {}", evening, morning);
}

#[test]
fn test_collapsing_series_never_goes_negative() {
    let values: Vec<f64> = (0..10).map(|i| 1000.0 - 110.0 * i as f64).collect();
    let points = forecast(&hourly_series(&values));

    assert_eq!(points.len(), FORECAST_HOURS);
    assert_eq!(points.last().unwrap().value, 0);
}

#[test]
fn test_irregular_samples_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let count = rng.gen_range(0..120);
        let mut ts = START;
        let data: Vec<DataPoint> = (0..count)
            .map(|_| {
                ts += rng.gen_range(60..7_200);
                DataPoint::new(ts, rng.gen_range(0.0..5_000.0))
            })
            .collect();

        let points = forecast(&data);
        assert_eq!(points, forecast(&data));

        if points.is_empty() {
            continue;
        }
        assert_hourly_after(&points, data.iter().map(|d| d.recorded_at).max().unwrap());
    }
}
