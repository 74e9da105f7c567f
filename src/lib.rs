//! # Trendscope
//!
//! Popularity history and short-horizon forecasts for entities tracked
//! across several feeds (storefront rankings, stream viewership and the
//! like).
//!
//! - [`trend_store`] keeps the durable per-entity history
//! - [`trend_math`] turns a slice of that history into a 24 hour forecast
//!
//! ## Example
//!
//! ```
//! use trendscope_workspace::{HistoryStore, ManualClock, TrendView};
//! use std::sync::Arc;
//!
//! let clock = Arc::new(ManualClock::new(1_717_200_000));
//! let store = HistoryStore::open_in_memory()?.with_clock(clock.clone());
//!
//! for hour in 0..8 {
//!     store.record("steam", "100", "Demo", 1000 + 10 * hour)?;
//!     clock.advance(3_600);
//! }
//!
//! let series = TrendView::new(&store).load("steam", "100", 7, true)?;
//! assert_eq!(series.data.len(), 8);
//! assert_eq!(series.forecast.len(), 24);
//! # Ok::<(), trendscope_workspace::HistoryError>(())
//! ```

pub use trend_math;
pub use trend_store;

pub use trend_math::{forecast, ForecastConfig, ForecastPoint, Forecaster};
pub use trend_store::{
    HistoryError, HistoryStore, IngestSummary, ManualClock, Observation, Reading, StoreConfig,
    TrendSeries, TrendView,
};
