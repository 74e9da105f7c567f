//! History plus optional forecast for one entity

use crate::data::Observation;
use crate::error::Result;
use crate::store::HistoryStore;
use serde::Serialize;
use trend_math::{ForecastPoint, Forecaster};

/// Observed history and projected points for one `(source, entity_id)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub source: String,
    pub entity_id: String,
    /// Observations, oldest first
    pub data: Vec<Observation>,
    /// Hourly projection; empty when not requested or history is too short
    pub forecast: Vec<ForecastPoint>,
}

impl TrendSeries {
    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Read path combining a store query with the forecaster
#[derive(Debug)]
pub struct TrendView<'a> {
    store: &'a HistoryStore,
    forecaster: Forecaster,
}

impl<'a> TrendView<'a> {
    /// View over `store` with the default forecaster
    pub fn new(store: &'a HistoryStore) -> Self {
        Self::with_forecaster(store, Forecaster::default())
    }

    /// View over `store` with a configured forecaster
    pub fn with_forecaster(store: &'a HistoryStore, forecaster: Forecaster) -> Self {
        Self { store, forecaster }
    }

    /// Load the last `days` days of history for one entity.
    ///
    /// The forecast is only computed when asked for and when there are at
    /// least as many raw observations as the forecaster needs hourly
    /// buckets; the forecaster applies its own bucket-level check after that.
    pub fn load(
        &self,
        source: &str,
        entity_id: &str,
        days: u32,
        include_forecast: bool,
    ) -> Result<TrendSeries> {
        let data = self.store.query(source, entity_id, days)?;

        let forecast = if include_forecast && data.len() >= self.forecaster.config().min_hours {
            self.forecaster.forecast(&data)
        } else {
            Vec::new()
        };

        Ok(TrendSeries {
            source: source.to_string(),
            entity_id: entity_id.to_string(),
            data,
            forecast,
        })
    }
}
