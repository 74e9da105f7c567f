//! Observation types stored in and read from the history

use serde::{Deserialize, Serialize};
use trend_math::Sample;

/// One timestamped reading for an entity from a source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Feed the reading came from, e.g. `"steam"`
    pub source: String,
    /// Item identifier within the source, kept as text
    pub entity_id: String,
    /// Label as it was when the reading was taken
    pub entity_name: String,
    /// Measured count
    pub value: u64,
    /// Unix seconds assigned by the store on insert
    pub recorded_at: i64,
}

impl Sample for Observation {
    fn recorded_at(&self) -> i64 {
        self.recorded_at
    }

    fn value(&self) -> f64 {
        self.value as f64
    }
}

/// One entity's reading produced by a refresh cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub entity_id: String,
    pub entity_name: String,
    pub value: u64,
}

impl Reading {
    /// Create a new reading. Numeric ids are accepted through `ToString`.
    pub fn new(entity_id: impl ToString, entity_name: impl Into<String>, value: u64) -> Self {
        Self {
            entity_id: entity_id.to_string(),
            entity_name: entity_name.into(),
            value,
        }
    }
}
