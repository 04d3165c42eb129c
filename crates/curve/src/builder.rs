//! Equity curve building.
//!
//! Sorts validated records by date and accumulates P/L into a running total.

use equity_core::{EquityPoint, EquitySeries, PnlRecord};
use tracing::debug;

/// Builds the cumulative equity curve from validated records.
#[derive(Debug, Clone, Copy, Default)]
pub struct EquityCurveBuilder;

impl EquityCurveBuilder {
    /// Create a new curve builder.
    pub fn new() -> Self {
        Self
    }

    /// Build the equity curve.
    ///
    /// Records are sorted by date with a stable sort, so entries sharing a date
    /// keep their sheet order. An empty input yields an empty series.
    pub fn build(&self, mut records: Vec<PnlRecord>) -> EquitySeries {
        records.sort_by_key(|r| r.date);

        let mut equity = 0.0;
        let points: Vec<EquityPoint> = records
            .into_iter()
            .map(|r| {
                equity += r.amount;
                EquityPoint {
                    date: r.date,
                    amount: r.amount,
                    equity,
                }
            })
            .collect();

        debug!(points = points.len(), final_equity = equity, "built equity curve");

        EquitySeries::from_points(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rec(d: u32, amount: f64) -> PnlRecord {
        PnlRecord::new(date(2024, 1, d), amount)
    }

    #[test]
    fn test_running_total() {
        let series = EquityCurveBuilder::new().build(vec![rec(1, 100.0), rec(2, -50.0)]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].equity, 100.0);
        assert_eq!(series.points()[1].equity, 50.0);
        assert_relative_eq!(series.total_pl(), 50.0);
    }

    #[test]
    fn test_sorted_by_date() {
        let series =
            EquityCurveBuilder::new().build(vec![rec(3, 1.0), rec(1, 10.0), rec(2, 100.0)]);

        let dates: Vec<_> = series.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]);
        let equity: Vec<_> = series.equity_values().collect();
        assert_eq!(equity, vec![10.0, 110.0, 111.0]);
    }

    #[test]
    fn test_stable_for_same_date() {
        let series = EquityCurveBuilder::new().build(vec![
            rec(2, 5.0),
            rec(1, 1.0),
            rec(2, -3.0),
            rec(2, 7.0),
        ]);

        let amounts: Vec<_> = series.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![1.0, 5.0, -3.0, 7.0]);
    }

    #[test]
    fn test_equity_is_prefix_sum() {
        let amounts = [12.5, -3.25, 0.0, 40.0, -17.75, 8.0];
        let records: Vec<_> = amounts
            .iter()
            .enumerate()
            .map(|(i, &a)| rec(i as u32 + 1, a))
            .collect();

        let series = EquityCurveBuilder::new().build(records);

        for (i, point) in series.iter().enumerate() {
            let expected: f64 = amounts[..=i].iter().sum();
            assert_relative_eq!(point.equity, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_monotonic_when_non_negative() {
        let series = EquityCurveBuilder::new()
            .build(vec![rec(1, 0.0), rec(2, 3.0), rec(3, 0.5), rec(4, 0.0)]);
        let equity: Vec<_> = series.equity_values().collect();
        assert!(equity.windows(2).all(|w| w[1] >= w[0]));

        let series = EquityCurveBuilder::new().build(vec![rec(1, 3.0), rec(2, -0.5)]);
        let equity: Vec<_> = series.equity_values().collect();
        assert!(!equity.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_empty() {
        let series = EquityCurveBuilder::new().build(Vec::new());
        assert!(series.is_empty());
        assert_eq!(series.total_pl(), 0.0);
    }
}
