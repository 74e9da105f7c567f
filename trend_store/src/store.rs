//! `SQLite`-backed history of entity observations
//!
//! The store is an append-only log keyed by `(source, entity_id)`. Every
//! write inserts one row and evicts everything older than the retention
//! horizon inside the same transaction, so the table never holds expired
//! rows after a successful write and a failed write leaves it untouched.
//!
//! All access goes through one connection behind a mutex, so reads and
//! writes from different threads are serialized.

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::data::Observation;
use crate::error::{HistoryError, Result};
use rusqlite::{params, Connection};
use std::fs;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};

/// Seconds in one day
pub const SECONDS_PER_DAY: i64 = 86_400;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        source TEXT NOT NULL,
        entity_id TEXT NOT NULL,
        entity_name TEXT NOT NULL,
        value INTEGER NOT NULL,
        recorded_at INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_history_source_entity ON history (source, entity_id);
    CREATE INDEX IF NOT EXISTS idx_history_recorded_at ON history (recorded_at);
";

/// Durable per-entity observation history
#[derive(Debug)]
pub struct HistoryStore {
    conn: Mutex<Connection>,
    config: StoreConfig,
    clock: Arc<dyn Clock>,
}

impl HistoryStore {
    /// Open (or create) the database at `config.path`
    pub fn open(config: StoreConfig) -> Result<Self> {
        config.validate()?;

        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&config.path)?;
        apply_pragmas(&conn, &config)?;
        initialize_schema(&conn)?;
        info!(path = %config.path.display(), "Initialized history store");

        Ok(Self::from_connection(conn, config))
    }

    /// Private in-memory store with default limits
    pub fn open_in_memory() -> Result<Self> {
        Self::open_in_memory_with(StoreConfig::new(":memory:"))
    }

    /// Private in-memory store with the limits from `config`; its path is ignored
    pub fn open_in_memory_with(config: StoreConfig) -> Result<Self> {
        config.validate()?;

        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;

        Ok(Self::from_connection(conn, config))
    }

    fn from_connection(conn: Connection, config: StoreConfig) -> Self {
        Self {
            conn: Mutex::new(conn),
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Append one observation stamped with the current time, then evict
    /// every observation older than the retention horizon.
    ///
    /// Insert and eviction commit together or not at all.
    pub fn record(
        &self,
        source: &str,
        entity_id: &str,
        entity_name: &str,
        value: u64,
    ) -> Result<()> {
        let stored_value = i64::try_from(value).map_err(|_| {
            HistoryError::InvalidParameter(format!("value {} exceeds storage range", value))
        })?;

        let mut conn = self.lock()?;
        let now = self.clock.now();
        let cutoff = now - i64::from(self.config.retention_days) * SECONDS_PER_DAY;

        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO history (source, entity_id, entity_name, value, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![source, entity_id, entity_name, stored_value, now],
        )?;
        let evicted = tx.execute(
            "DELETE FROM history WHERE recorded_at < ?1",
            params![cutoff],
        )?;
        tx.commit()?;

        if evicted > 0 {
            debug!(evicted, cutoff, "Evicted expired observations");
        }

        Ok(())
    }

    /// Observations for one entity from the last `days` days, oldest first.
    ///
    /// `days` is capped at `max_query_days` (30 by default). No matches is an
    /// empty vector, not an error.
    pub fn query(&self, source: &str, entity_id: &str, days: u32) -> Result<Vec<Observation>> {
        let window = days.min(self.config.max_query_days);

        let conn = self.lock()?;
        let cutoff = self.clock.now() - i64::from(window) * SECONDS_PER_DAY;

        let mut stmt = conn.prepare_cached(
            "SELECT source, entity_id, entity_name, value, recorded_at
             FROM history
             WHERE source = ?1 AND entity_id = ?2 AND recorded_at >= ?3
             ORDER BY recorded_at ASC, id ASC",
        )?;
        let rows = stmt.query_map(params![source, entity_id, cutoff], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)?,
            ))
        })?;

        let mut observations = Vec::new();
        for row in rows {
            let (source, entity_id, entity_name, value, recorded_at) = row?;
            let value = u64::try_from(value).map_err(|_| {
                HistoryError::DataError(format!(
                    "negative value {} stored for {}/{}",
                    value, source, entity_id
                ))
            })?;

            observations.push(Observation {
                source,
                entity_id,
                entity_name,
                value,
                recorded_at,
            });
        }

        Ok(observations)
    }

    /// Total number of stored observations across all entities
    pub fn len(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Whether the store holds no observations
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            HistoryError::StorageUnavailable("history connection lock poisoned".to_string())
        })
    }
}

fn apply_pragmas(conn: &Connection, config: &StoreConfig) -> Result<()> {
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
    conn.execute_batch(&format!(
        "PRAGMA journal_mode = {};",
        config.journal_mode.pragma_value()
    ))?;
    Ok(())
}

fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
