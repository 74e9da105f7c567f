//! # Trend Store
//!
//! Durable popularity history for entities tracked across several feeds,
//! with bounded retention and forecast-ready trend views.
//!
//! ## Features
//!
//! - Append-only `SQLite` history keyed by `(source, entity_id)`
//! - Retention enforced on every write (90 days by default)
//! - Range queries capped at 30 days, oldest first
//! - Batch recording that logs and skips failed writes
//! - Trend views that attach a 24 hour forecast from `trend_math`
//!
//! ## Quick Start
//!
//! ```rust
//! use trend_store::{HistoryStore, Reading, TrendView};
//!
//! let store = HistoryStore::open_in_memory()?;
//!
//! let summary = store.record_readings(
//!     "steam",
//!     &[Reading::new(730, "Counter-Strike 2", 1_250_000)],
//! );
//! assert_eq!(summary.recorded, 1);
//!
//! let series = TrendView::new(&store).load("steam", "730", 7, true)?;
//! assert_eq!(series.data.len(), 1);
//! assert!(series.forecast.is_empty()); // not enough history yet
//! # Ok::<(), trend_store::HistoryError>(())
//! ```

pub mod clock;
pub mod config;
pub mod data;
pub mod error;
pub mod ingest;
pub mod store;
pub mod trend;

// Re-export commonly used types
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::{JournalMode, StoreConfig};
pub use crate::data::{Observation, Reading};
pub use crate::error::{HistoryError, Result};
pub use crate::ingest::IngestSummary;
pub use crate::store::HistoryStore;
pub use crate::trend::{TrendSeries, TrendView};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
