//! Raw sheet rows to validated P/L records.
//!
//! Rows whose amount cannot be parsed are dropped and counted. A row that keeps
//! its amount but has an unparseable date fails the whole batch.

use crate::parse::{parse_amount, parse_date};
use equity_core::{Error, PnlRecord, RawRow, Result};
use serde::Serialize;
use tracing::debug;

/// Why a row was left out of the normalized output.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    /// The amount cell is not a finite number.
    #[error("row {row}: unparseable amount {text:?}")]
    Amount { row: usize, text: String },
}

/// Statistics about the last normalization pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizationStats {
    /// Data rows seen (header excluded).
    pub rows_seen: u64,
    /// Rows that became records.
    pub rows_kept: u64,
    /// Rows dropped for a bad amount.
    pub rows_dropped: u64,
}

impl NormalizationStats {
    /// Fraction of rows dropped.
    pub fn dropped_frac(&self) -> f64 {
        if self.rows_seen > 0 {
            self.rows_dropped as f64 / self.rows_seen as f64
        } else {
            0.0
        }
    }

    /// Reset statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Converts sheet rows into validated records.
#[derive(Debug, Default)]
pub struct Normalizer {
    stats: NormalizationStats,
    rejections: Vec<RowRejection>,
}

impl Normalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a full sheet read, where the first row is the header.
    pub fn normalize_sheet(&mut self, rows: &[RawRow]) -> Result<Vec<PnlRecord>> {
        let data = rows.get(1..).unwrap_or(&[]);
        self.normalize(data)
    }

    /// Normalize data rows (no header).
    ///
    /// Output keeps input order; sorting is left to the curve builder. Row
    /// numbers in rejections and errors are 1-based positions within `rows`.
    pub fn normalize(&mut self, rows: &[RawRow]) -> Result<Vec<PnlRecord>> {
        self.stats.reset();
        self.rejections.clear();

        let mut records = Vec::with_capacity(rows.len());

        for (idx, row) in rows.iter().enumerate() {
            let row_no = idx + 1;
            self.stats.rows_seen += 1;

            let Some(amount) = parse_amount(&row.amount_text) else {
                let rejection = RowRejection::Amount {
                    row: row_no,
                    text: row.amount_text.clone(),
                };
                debug!(%rejection, "dropping row");
                self.rejections.push(rejection);
                self.stats.rows_dropped += 1;
                continue;
            };

            let date = parse_date(&row.date_text).ok_or_else(|| {
                Error::data_format(format!(
                    "row {}: cannot parse date {:?}",
                    row_no, row.date_text
                ))
            })?;

            records.push(PnlRecord::new(date, amount));
            self.stats.rows_kept += 1;
        }

        Ok(records)
    }

    /// Statistics from the last pass.
    pub fn stats(&self) -> &NormalizationStats {
        &self.stats
    }

    /// Rows dropped in the last pass.
    pub fn rejections(&self) -> &[RowRejection] {
        &self.rejections
    }
}
