//! Time-boxed snapshot cache.
//!
//! Holds the last computed snapshot for a fixed window. The cache is keyed by
//! elapsed time only: the sheet contents are never hashed, so a change made
//! outside this process shows up once the window runs out.

use chrono::{DateTime, Duration, Utc};
use equity_core::{EquitySeries, Result};
use equity_curve::{DisplayTable, PerformanceSummary};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Fully computed dashboard data.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Equity curve, ascending by date.
    pub series: EquitySeries,
    /// Summary figures.
    pub summary: PerformanceSummary,
    /// Styled table rows.
    pub table: DisplayTable,
    /// Rows dropped for an unparseable amount.
    pub rows_dropped: u64,
    /// When the snapshot was computed.
    pub computed_at: DateTime<Utc>,
}

impl Snapshot {
    /// Derive summary and table from a series.
    pub fn new(series: EquitySeries, rows_dropped: u64, computed_at: DateTime<Utc>) -> Self {
        let summary = PerformanceSummary::from_series(&series);
        let table = DisplayTable::from_series(&series);
        Self {
            series,
            summary,
            table,
            rows_dropped,
            computed_at,
        }
    }

    /// Total P/L. Zero when there is no data.
    pub fn total_pl(&self) -> f64 {
        self.summary.total_pl
    }
}

/// Memoizes the snapshot for `ttl` after it is computed.
#[derive(Debug)]
pub struct ResultCache {
    ttl: Duration,
    snapshot: Option<Arc<Snapshot>>,
    hits: u64,
    misses: u64,
}

impl ResultCache {
    /// Default validity window.
    pub const DEFAULT_TTL_SECS: u64 = 600;

    /// Create an empty cache with the given validity window.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            snapshot: None,
            hits: 0,
            misses: 0,
        }
    }

    /// Create an empty cache with a window given in seconds.
    pub fn with_ttl_secs(secs: u64) -> Self {
        // chrono durations are bounded by i64::MAX milliseconds
        let secs = secs.min((i64::MAX / 1000) as u64) as i64;
        Self::new(Duration::seconds(secs))
    }

    /// Return the stored snapshot if it is still valid at `now`, otherwise
    /// run `compute` and store its result.
    ///
    /// An expired snapshot is dropped before `compute` runs, so a failed
    /// computation leaves the cache empty.
    pub fn get_or_compute<F>(&mut self, now: DateTime<Utc>, compute: F) -> Result<Arc<Snapshot>>
    where
        F: FnOnce(DateTime<Utc>) -> Result<Snapshot>,
    {
        if let Some(snapshot) = self.valid_at(now) {
            self.hits += 1;
            debug!(computed_at = %snapshot.computed_at, "snapshot cache hit");
            return Ok(snapshot);
        }

        self.snapshot = None;
        self.misses += 1;

        let snapshot = Arc::new(compute(now)?);
        self.snapshot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Drop the stored snapshot so the next call recomputes.
    pub fn invalidate(&mut self) {
        if self.snapshot.take().is_some() {
            debug!("snapshot cache invalidated");
        }
    }

    /// The stored snapshot, valid or not.
    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        self.snapshot.as_ref()
    }

    /// The stored snapshot if it is still valid at `now`.
    pub fn valid_at(&self, now: DateTime<Utc>) -> Option<Arc<Snapshot>> {
        self.snapshot
            .as_ref()
            .filter(|s| now - s.computed_at < self.ttl)
            .cloned()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::with_ttl_secs(Self::DEFAULT_TTL_SECS)
    }
}
