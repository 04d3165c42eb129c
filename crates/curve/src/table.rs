//! Display table for the raw data log.

use chrono::NaiveDate;
use equity_core::{style, Amount, CellStyle, EquitySeries};
use serde::Serialize;

/// Column headers, in display order.
pub const TABLE_COLUMNS: [&str; 3] = ["Date", "Daily P/L", "Cumulative Equity"];

/// One display row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayRow {
    pub date: NaiveDate,
    pub daily_pl: Amount,
    pub cumulative_equity: Amount,
    /// Highlight for the daily P/L cell.
    pub pl_style: CellStyle,
}

/// Rendering-ready table of the equity series.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayTable {
    pub rows: Vec<DisplayRow>,
}

impl DisplayTable {
    /// Build the table, styling the daily P/L column.
    pub fn from_series(series: &EquitySeries) -> Self {
        Self::with_style(series, style)
    }

    /// Build the table with a caller-supplied style rule for the P/L column.
    pub fn with_style<F>(series: &EquitySeries, rule: F) -> Self
    where
        F: Fn(Amount) -> CellStyle,
    {
        let rows = series
            .iter()
            .map(|p| DisplayRow {
                date: p.date,
                daily_pl: p.amount,
                cumulative_equity: p.equity,
                pl_style: rule(p.amount),
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Format an amount as dollars with thousands separators, e.g. `$1,234.50`.
///
/// Negative values render as `$-50.00`.
pub fn format_currency(value: Amount) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("${}{}.{:02}", sign, grouped, frac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use equity_core::EquityPoint;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_table_styles() {
        let series = EquitySeries::from_points(vec![
            EquityPoint {
                date: date(1),
                amount: 100.0,
                equity: 100.0,
            },
            EquityPoint {
                date: date(2),
                amount: -50.0,
                equity: 50.0,
            },
            EquityPoint {
                date: date(3),
                amount: 0.0,
                equity: 50.0,
            },
        ]);

        let table = DisplayTable::from_series(&series);

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].pl_style, CellStyle::Highlight);
        assert_eq!(table.rows[1].pl_style, CellStyle::Warn);
        assert_eq!(table.rows[2].pl_style, CellStyle::None);
        assert_eq!(table.rows[1].cumulative_equity, 50.0);
    }

    #[test]
    fn test_custom_rule() {
        let series = EquitySeries::from_points(vec![EquityPoint {
            date: date(1),
            amount: 5.0,
            equity: 5.0,
        }]);

        let table = DisplayTable::with_style(&series, |v| {
            if v > 10.0 { CellStyle::Highlight } else { CellStyle::None }
        });
        assert_eq!(table.rows[0].pl_style, CellStyle::None);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(50.0), "$50.00");
        assert_eq!(format_currency(-50.0), "$-50.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(-0.001), "$0.00");
    }
}
