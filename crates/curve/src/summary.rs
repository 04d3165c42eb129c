//! Performance summary.
//!
//! Aggregates an equity series into the figures shown above the chart.

use chrono::NaiveDate;
use equity_core::{Amount, EquitySeries, OrderedAmount};
use serde::Serialize;
use statrs::statistics::Statistics;

/// Summary figures for an equity series.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PerformanceSummary {
    /// Number of entries on the curve.
    pub entries: u32,
    /// Sum of all P/L.
    pub total_pl: Amount,
    /// Equity the curve starts from. Always zero.
    pub starting_equity: Amount,
    /// Equity after the last entry.
    pub final_equity: Amount,
    /// Entries with positive P/L.
    pub winning_days: u32,
    /// Entries with negative P/L.
    pub losing_days: u32,
    /// Entries with zero P/L.
    pub flat_days: u32,
    /// Winning entries over all entries (0-1).
    pub win_rate: f64,
    /// Largest single-entry gain.
    pub best_day: Option<DayResult>,
    /// Largest single-entry loss.
    pub worst_day: Option<DayResult>,
    /// Mean P/L per entry.
    pub mean_pl: f64,
    /// Sample standard deviation of P/L per entry.
    pub std_dev_pl: f64,
    /// Largest drop from a running equity peak (absolute, non-negative).
    pub max_drawdown: Amount,
    /// Longest run of winning entries.
    pub max_consecutive_wins: u32,
    /// Longest run of losing entries.
    pub max_consecutive_losses: u32,
}

/// A single entry picked out by the summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayResult {
    pub date: NaiveDate,
    pub amount: Amount,
}

impl PerformanceSummary {
    /// Summarize an equity series.
    pub fn from_series(series: &EquitySeries) -> Self {
        if series.is_empty() {
            return Self::default();
        }

        let mut summary = Self {
            entries: series.len() as u32,
            total_pl: series.total_pl(),
            final_equity: series.last().map(|p| p.equity).unwrap_or(0.0),
            ..Self::default()
        };

        let mut current_wins = 0u32;
        let mut current_losses = 0u32;
        // The curve starts from the zero baseline, so the first peak is zero.
        let mut peak = summary.starting_equity;

        for point in series {
            if point.amount > 0.0 {
                summary.winning_days += 1;
                current_wins += 1;
                current_losses = 0;
                summary.max_consecutive_wins = summary.max_consecutive_wins.max(current_wins);
            } else if point.amount < 0.0 {
                summary.losing_days += 1;
                current_losses += 1;
                current_wins = 0;
                summary.max_consecutive_losses =
                    summary.max_consecutive_losses.max(current_losses);
            } else {
                summary.flat_days += 1;
                current_wins = 0;
                current_losses = 0;
            }

            peak = peak.max(point.equity);
            summary.max_drawdown = summary.max_drawdown.max(peak - point.equity);
        }

        summary.win_rate = summary.winning_days as f64 / summary.entries as f64;

        summary.best_day = series
            .iter()
            .filter(|p| p.amount > 0.0)
            .max_by_key(|p| OrderedAmount::from(p.amount))
            .map(|p| DayResult {
                date: p.date,
                amount: p.amount,
            });

        summary.worst_day = series
            .iter()
            .filter(|p| p.amount < 0.0)
            .min_by_key(|p| OrderedAmount::from(p.amount))
            .map(|p| DayResult {
                date: p.date,
                amount: p.amount,
            });

        let amounts: Vec<f64> = series.iter().map(|p| p.amount).collect();
        summary.mean_pl = amounts.iter().mean();
        summary.std_dev_pl = if amounts.len() >= 2 {
            amounts.iter().std_dev()
        } else {
            0.0
        };

        summary
    }

    /// Whether there is anything to chart.
    pub fn has_data(&self) -> bool {
        self.entries > 0
    }
}
