//! Entry submission.
//!
//! Appends one P/L entry to the sheet and invalidates the snapshot cache. No
//! local state is touched before the append, so a failed append leaves
//! everything as it was.

use crate::cache::ResultCache;
use crate::source::RowSource;
use chrono::NaiveDate;
use equity_core::{CellValue, Error, Result, ValueInputOption, ISO_DATE_FORMAT};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use tracing::{info, warn};

/// Extra digits kept when converting to decimal, so that binary noise
/// (`1.00499999...`) does not decide the rounding.
const ROUNDING_GUARD_DIGITS: u32 = 6;

/// A new daily P/L entry, ready to append.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewEntry {
    date: NaiveDate,
    amount: f64,
}

impl NewEntry {
    /// Validate an entry and round its amount to `decimal_places`.
    ///
    /// Rounding is decimal, half away from zero, so `1.005` becomes `1.01`.
    /// Amounts outside the decimal range are rejected.
    pub fn new(date: NaiveDate, amount: f64, decimal_places: u32) -> Result<Self> {
        if !amount.is_finite() {
            return Err(Error::invalid_entry(format!(
                "amount must be a finite number, got {}",
                amount
            )));
        }

        let digits = (decimal_places + ROUNDING_GUARD_DIGITS) as usize;
        let rounded = Decimal::from_str(&format!("{:.*}", digits, amount))
            .ok()
            .map(|d| {
                d.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
            })
            .and_then(|d| d.to_f64())
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::invalid_entry(format!("amount out of range: {:e}", amount)))?;

        // -0.0 would be written back as "-0.0"
        let amount = if rounded == 0.0 { 0.0 } else { rounded };
        Ok(Self { date, amount })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Cells to append: ISO date text, then the amount.
    pub fn to_cells(&self) -> [CellValue; 2] {
        [
            CellValue::Text(self.date.format(ISO_DATE_FORMAT).to_string()),
            CellValue::Number(self.amount),
        ]
    }
}

/// Appends entries and keeps the cache consistent with the sheet.
#[derive(Debug, Clone, Copy)]
pub struct EntrySubmissionHandler {
    input_option: ValueInputOption,
}

impl EntrySubmissionHandler {
    /// Create a handler that appends values as user-entered input.
    pub fn new() -> Self {
        Self {
            input_option: ValueInputOption::UserEntered,
        }
    }

    /// Append `entry`, then invalidate `cache`.
    ///
    /// Failures are reported as `Error::RemoteWrite` and are not retried; the
    /// cache is left untouched in that case.
    pub fn submit<S>(
        &self,
        source: &mut S,
        cache: &mut ResultCache,
        entry: &NewEntry,
    ) -> Result<()>
    where
        S: RowSource + ?Sized,
    {
        let cells = entry.to_cells();

        if let Err(e) = source.append_row(&cells, self.input_option) {
            warn!(date = %entry.date, amount = entry.amount, error = %e, "failed to append entry");
            return Err(match e {
                Error::RemoteWrite(_) => e,
                other => Error::remote_write(other.to_string()),
            });
        }

        cache.invalidate();
        info!(date = %entry.date, amount = entry.amount, "entry logged");
        Ok(())
    }
}

impl Default for EntrySubmissionHandler {
    fn default() -> Self {
        Self::new()
    }
}
