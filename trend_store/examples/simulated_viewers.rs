use std::sync::Arc;
use trend_store::{HistoryStore, ManualClock, Reading, StoreConfig, TrendView};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = StoreConfig::new(dir.path().join("history.db"));
    println!("Opening history at: {}", config.path.display());

    // Replay three days of half-hourly refresh cycles.
    let start = 1_717_200_000;
    let clock = Arc::new(ManualClock::new(start));
    let store = HistoryStore::open(config)?.with_clock(clock.clone());

    for step in 0..144 {
        let hour = (step / 2) % 24;
        let evening_boost = if (18..24).contains(&hour) { 2 } else { 1 };
        let viewers = (40_000 + step * 150) * evening_boost;

        let summary = store.record_readings(
            "twitch",
            &[Reading::new(32_982, "Grand Theft Auto V", viewers)],
        );
        if summary.failed > 0 {
            println!("Step {}: {} reading(s) failed", step, summary.failed);
        }
        clock.advance(1_800);
    }

    let series = TrendView::new(&store).load("twitch", "32982", 7, true)?;
    println!(
        "Loaded {} observations, projected {} hours",
        series.data.len(),
        series.forecast.len()
    );
    for point in &series.forecast {
        println!("{}: {}", point.recorded_at, point.value);
    }

    Ok(())
}
