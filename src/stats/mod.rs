mod histogram;

pub use histogram::{Bucket, Histogram, HistogramBuilder};

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::time::Instant;
use tracing::*;

use crate::catalog::capabilities::Table;
use crate::errors::{Error, Result};
use crate::session::Context;

/// Snapshot of one table's statistics. Never mutated once stored, only replaced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableStatistics {
    pub database: String,
    pub table: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub row_count: u64,
    /// Keyed by column name.
    pub histograms: BTreeMap<String, Histogram>,
}

type StatsKey = (String, String);

fn stats_key(database: &str, table: &str) -> StatsKey {
    (database.to_lowercase(), table.to_lowercase())
}

/// In-memory statistics cache shared by every session.
#[derive(Debug, Default)]
pub struct StatsStore {
    entries: RwLock<HashMap<StatsKey, Arc<TableStatistics>>>,
    // Serialises writers of the same (database, table)
    key_locks: Mutex<HashMap<StatsKey, Arc<Mutex<()>>>>,
}

impl StatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `write` while holding the lock of `key`. The lock is forgotten again once
    /// no other writer is waiting on it, so the map only holds keys being written.
    fn with_key_lock<T>(&self, key: &StatsKey, write: impl FnOnce() -> T) -> T {
        let key_lock = self.key_locks.lock().entry(key.clone()).or_default().clone();
        let outcome = {
            let _guard = key_lock.lock();
            write()
        };
        drop(key_lock);
        let mut key_locks = self.key_locks.lock();
        if key_locks
            .get(key)
            .map_or(false, |key_lock| Arc::strong_count(key_lock) == 1)
        {
            key_locks.remove(key);
        }
        outcome
    }

    /// Full scan of every partition, replacing whatever was cached for the table.
    pub fn analyze(
        &self,
        ctx: &Context,
        database: &str,
        table: &dyn Table,
    ) -> Result<Arc<TableStatistics>> {
        let key = stats_key(database, table.name());
        self.with_key_lock(&key, || self.scan_and_store(ctx, database, table, key.clone()))
    }

    fn scan_and_store(
        &self,
        ctx: &Context,
        database: &str,
        table: &dyn Table,
        key: StatsKey,
    ) -> Result<Arc<TableStatistics>> {
        let timer = Instant::now();
        debug!("📊 Analyzing table {}.{}...", database, table.name());
        let schema = table.schema();
        let mut builders: Vec<HistogramBuilder> = schema
            .iter()
            .map(|column| HistogramBuilder::new(column.data_type.raw_type.is_numeric_convertible()))
            .collect();
        let progress_interval = ctx.analyze_progress_interval.max(1);
        let mut rows_scanned: u64 = 0;
        for partition in table.partitions(ctx)? {
            for row in table.partition_rows(ctx, &partition)? {
                rows_scanned += 1;
                if rows_scanned % progress_interval as u64 == 0 {
                    ctx.check_cancelled()?;
                }
                for (position, builder) in builders.iter_mut().enumerate() {
                    builder.add(row.get(position));
                }
            }
        }
        ctx.check_cancelled()?;

        let histograms = schema
            .iter()
            .zip(builders)
            .map(|(column, builder)| (column.name.clone(), builder.finish()))
            .collect();
        let statistics = Arc::new(TableStatistics {
            database: database.to_string(),
            table: table.name().to_string(),
            created_at: OffsetDateTime::now_utc(),
            row_count: rows_scanned,
            histograms,
        });
        self.entries.write().insert(key, statistics.clone());
        info!(
            "📊 Analyzed table {}.{}: {} rows in {} µs",
            database,
            table.name(),
            rows_scanned,
            timer.elapsed().as_micros()
        );
        Ok(statistics)
    }

    /// Replace the cached entry wholesale with one carrying only a row count.
    pub fn set_row_count(&self, database: &str, table: &str, row_count: u64) -> Arc<TableStatistics> {
        let key = stats_key(database, table);
        self.with_key_lock(&key, || {
            let statistics = Arc::new(TableStatistics {
                database: database.to_string(),
                table: table.to_string(),
                created_at: OffsetDateTime::now_utc(),
                row_count,
                histograms: BTreeMap::new(),
            });
            self.entries.write().insert(key.clone(), statistics.clone());
            info!(
                "✏️ Statistics of table {}.{} overwritten with row count {}",
                database, table, row_count
            );
            statistics
        })
    }

    pub fn get(&self, database: &str, table: &str) -> Option<Arc<TableStatistics>> {
        self.entries.read().get(&stats_key(database, table)).cloned()
    }

    /// Cached row count, else the table's own count, else `None`.
    pub fn row_count(&self, ctx: &Context, database: &str, table: &dyn Table) -> Result<Option<u64>> {
        if let Some(statistics) = self.get(database, table.name()) {
            return Ok(Some(statistics.row_count));
        }
        match table.as_statistics_table() {
            Some(statistics_table) => Ok(Some(statistics_table.row_count(ctx)?)),
            None => Ok(None),
        }
    }

    pub fn hist(&self, database: &str, table: &str, column: &str) -> Result<Histogram> {
        let statistics = self
            .get(database, table)
            .ok_or_else(|| Error::StatisticsNotFound {
                database: database.to_string(),
                table: table.to_string(),
            })?;
        statistics
            .histograms
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, histogram)| histogram.clone())
            .ok_or_else(|| Error::HistogramNotFound {
                database: database.to_string(),
                table: table.to_string(),
                column: column.to_string(),
            })
    }

    /// Every cached entry, ordered by database then table.
    pub fn all(&self) -> Vec<Arc<TableStatistics>> {
        let mut all: Vec<(StatsKey, Arc<TableStatistics>)> = self
            .entries
            .read()
            .iter()
            .map(|(key, statistics)| (key.clone(), statistics.clone()))
            .collect();
        all.sort_by(|(left, _), (right, _)| left.cmp(right));
        all.into_iter().map(|(_, statistics)| statistics).collect()
    }
}
