//! Recording a refresh cycle's readings
//!
//! A refresh cycle produces one reading per tracked entity. A storage
//! failure on one of them must not abort the rest of the cycle, so failures
//! are logged and counted instead of returned.

use crate::data::Reading;
use crate::store::HistoryStore;
use serde::Serialize;
use tracing::{debug, warn};

/// Outcome of recording one batch of readings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Readings written to the store
    pub recorded: usize,
    /// Readings that failed and were skipped
    pub failed: usize,
}

impl HistoryStore {
    /// Record every reading for `source`, each as its own unit of work
    pub fn record_readings(&self, source: &str, readings: &[Reading]) -> IngestSummary {
        let mut summary = IngestSummary::default();

        for reading in readings {
            match self.record(
                source,
                &reading.entity_id,
                &reading.entity_name,
                reading.value,
            ) {
                Ok(()) => summary.recorded += 1,
                Err(err) => {
                    warn!(
                        source,
                        entity_id = %reading.entity_id,
                        error = %err,
                        "Failed to record reading"
                    );
                    summary.failed += 1;
                }
            }
        }

        debug!(
            source,
            recorded = summary.recorded,
            failed = summary.failed,
            "Recorded refresh cycle"
        );
        summary
    }
}
