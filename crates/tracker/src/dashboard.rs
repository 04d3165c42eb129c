//! Dashboard facade.
//!
//! Owns the sheet client for its whole lifetime and runs the read path
//! (read, normalize, build, cache) and the write path (append, invalidate,
//! re-read) on it.

use crate::cache::{ResultCache, Snapshot};
use crate::source::RowSource;
use crate::submission::{EntrySubmissionHandler, NewEntry};
use chrono::{DateTime, NaiveDate, Utc};
use equity_core::{Config, Error, Result};
use equity_curve::EquityCurveBuilder;
use equity_ingestion::{NormalizationStats, Normalizer};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of a successful append.
#[derive(Debug)]
pub enum Submitted {
    /// The sheet was read again after the append.
    Reloaded(Arc<Snapshot>),
    /// The entry is saved but reading the sheet afterwards failed.
    ReloadFailed(Error),
}

impl Submitted {
    /// Snapshot read after the append, if the read succeeded.
    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        match self {
            Submitted::Reloaded(snapshot) => Some(snapshot),
            Submitted::ReloadFailed(_) => None,
        }
    }
}

/// Read and write paths over one sheet client.
pub struct Dashboard<S> {
    source: S,
    normalizer: Normalizer,
    builder: EquityCurveBuilder,
    cache: ResultCache,
    handler: EntrySubmissionHandler,
    decimal_places: u32,
}

impl<S: RowSource> Dashboard<S> {
    /// Create a dashboard over `source` with default settings.
    pub fn new(source: S) -> Self {
        Self::with_config(source, &Config::default())
    }

    /// Create a dashboard over `source` using cache and entry settings from `config`.
    pub fn with_config(source: S, config: &Config) -> Self {
        Self {
            source,
            normalizer: Normalizer::new(),
            builder: EquityCurveBuilder::new(),
            cache: ResultCache::with_ttl_secs(config.cache.ttl_secs),
            handler: EntrySubmissionHandler::new(),
            decimal_places: config.entry.decimal_places,
        }
    }

    /// Current snapshot, recomputed from a fresh read when the cache is empty
    /// or expired.
    pub fn load(&mut self, now: DateTime<Utc>) -> Result<Arc<Snapshot>> {
        let Self {
            source,
            normalizer,
            builder,
            cache,
            ..
        } = self;

        cache.get_or_compute(now, |at| Self::compute(source, normalizer, builder, at))
    }

    /// Drop the cached snapshot and read again.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> Result<Arc<Snapshot>> {
        self.cache.invalidate();
        self.load(now)
    }

    /// Log a new entry, then read the sheet again.
    ///
    /// The append decides success: if it fails the error is returned and
    /// nothing changes. Once it succeeds the entry is in the sheet, so a failing
    /// re-read is reported inside the outcome instead of as an error.
    pub fn submit(
        &mut self,
        date: NaiveDate,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<Submitted> {
        let entry = NewEntry::new(date, amount, self.decimal_places)?;
        self.handler.submit(&mut self.source, &mut self.cache, &entry)?;

        Ok(match self.load(now) {
            Ok(snapshot) => Submitted::Reloaded(snapshot),
            Err(e) => {
                warn!(error = %e, "entry saved but re-read failed");
                Submitted::ReloadFailed(e)
            }
        })
    }

    /// Drop the cached snapshot without reading.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Statistics from the last normalization pass.
    pub fn normalization_stats(&self) -> &NormalizationStats {
        self.normalizer.stats()
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn compute(
        source: &mut S,
        normalizer: &mut Normalizer,
        builder: &EquityCurveBuilder,
        now: DateTime<Utc>,
    ) -> Result<Snapshot> {
        let rows = source.read_all().map_err(|e| {
            warn!(error = %e, "failed to read sheet");
            match e {
                Error::RemoteRead(_) => e,
                other => Error::remote_read(other.to_string()),
            }
        })?;

        let records = normalizer.normalize_sheet(&rows)?;
        let stats = normalizer.stats();
        let series = builder.build(records);

        info!(
            rows = stats.rows_seen,
            kept = stats.rows_kept,
            dropped = stats.rows_dropped,
            "recomputed equity curve"
        );

        Ok(Snapshot::new(series, stats.rows_dropped, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryRowSource;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 4, 12, 0, 0).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_load_is_cached() {
        let source = MemoryRowSource::with_rows(vec![("2024-01-01", "100")]);
        let mut dashboard = Dashboard::new(source);

        let first = dashboard.load(t0()).unwrap();
        let second = dashboard.load(t0() + Duration::minutes(5)).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(dashboard.source().read_calls(), 1);
    }

    #[test]
    fn test_load_rereads_after_window() {
        let source = MemoryRowSource::with_rows(vec![("2024-01-01", "100")]);
        let mut dashboard = Dashboard::new(source);

        dashboard.load(t0()).unwrap();
        dashboard.load(t0() + Duration::minutes(10)).unwrap();

        assert_eq!(dashboard.source().read_calls(), 2);
    }

    #[test]
    fn test_submit_rereads() {
        let source = MemoryRowSource::with_rows(vec![("2024-01-01", "100")]);
        let mut dashboard = Dashboard::new(source);
        dashboard.load(t0()).unwrap();

        let outcome = dashboard.submit(date(2), -40.0, t0()).unwrap();
        let snapshot = outcome.snapshot().unwrap();

        assert_eq!(snapshot.series.len(), 2);
        assert_eq!(snapshot.total_pl(), 60.0);
        assert_eq!(dashboard.source().read_calls(), 2);
    }

    #[test]
    fn test_invalid_entry_not_appended() {
        let mut dashboard = Dashboard::new(MemoryRowSource::new());

        let err = dashboard.submit(date(2), f64::NAN, t0()).unwrap_err();

        assert!(matches!(err, Error::InvalidEntry(_)));
        assert_eq!(dashboard.source().append_calls(), 0);
    }

    #[test]
    fn test_submit_with_failing_read_still_succeeds() {
        let mut source = MemoryRowSource::with_rows(vec![("2024-01-01", "100")]);
        source.fail_reads("timeout");
        let mut dashboard = Dashboard::new(source);

        let outcome = dashboard.submit(date(4), 25.0, t0()).unwrap();

        assert!(matches!(outcome, Submitted::ReloadFailed(Error::RemoteRead(_))));
        assert!(outcome.snapshot().is_none());
        assert_eq!(dashboard.source().append_calls(), 1);
        assert_eq!(dashboard.source().rows().len(), 3);
        assert!(dashboard.cache().snapshot().is_none());

        dashboard.source_mut().heal();
        let snapshot = dashboard.load(t0()).unwrap();
        assert_eq!(snapshot.series.iter().filter(|p| p.date == date(4)).count(), 1);
    }

    #[test]
    fn test_submit_rejects_unrepresentable_amount() {
        let mut dashboard = Dashboard::new(MemoryRowSource::new());

        let err = dashboard.submit(date(4), 1e307, t0()).unwrap_err();

        assert!(matches!(err, Error::InvalidEntry(_)));
        assert_eq!(dashboard.source().append_calls(), 0);
        assert_eq!(dashboard.source().rows().len(), 1);
    }

    #[test]
    fn test_bad_date_fails_load() {
        let source = MemoryRowSource::with_rows(vec![("2024-01-01", "1"), ("someday", "2")]);
        let mut dashboard = Dashboard::new(source);

        let err = dashboard.load(t0()).unwrap_err();
        assert!(matches!(err, Error::DataFormat(_)));
        assert!(dashboard.cache().snapshot().is_none());
    }

    #[test]
    fn test_refresh_forces_read() {
        let mut dashboard = Dashboard::new(MemoryRowSource::new());
        dashboard.load(t0()).unwrap();
        dashboard.refresh(t0()).unwrap();
        assert_eq!(dashboard.source().read_calls(), 2);
    }
}
