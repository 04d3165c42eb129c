//! Core data types for the equity tracker.

use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Signed P/L amount for one period.
pub type Amount = f64;

/// Amount with total ordering, for picking best/worst days.
pub type OrderedAmount = OrderedFloat<f64>;

/// Header written as the first row of a fresh sheet.
pub const SHEET_HEADER: [&str; 2] = ["Date", "Amount"];

/// Date format used when writing entries back to the sheet.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A row exactly as read from the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// Date cell text.
    pub date_text: String,
    /// Amount cell text.
    pub amount_text: String,
}

impl RawRow {
    pub fn new(date_text: impl Into<String>, amount_text: impl Into<String>) -> Self {
        Self {
            date_text: date_text.into(),
            amount_text: amount_text.into(),
        }
    }

    /// Build a row from arbitrary cells.
    ///
    /// Only the first two cells are used; missing cells read as empty text.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells = cells.into_iter().map(Into::into);
        let date_text = cells.next().unwrap_or_default();
        let amount_text = cells.next().unwrap_or_default();
        Self {
            date_text,
            amount_text,
        }
    }
}

/// A validated P/L entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PnlRecord {
    /// Calendar date of the entry.
    pub date: NaiveDate,
    /// Signed P/L.
    pub amount: Amount,
}

impl PnlRecord {
    pub fn new(date: NaiveDate, amount: Amount) -> Self {
        Self { date, amount }
    }
}

/// One point of the equity curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// Calendar date of the entry.
    pub date: NaiveDate,
    /// P/L booked on this row.
    pub amount: Amount,
    /// Running total of P/L up to and including this row.
    pub equity: Amount,
}

/// Chronologically ordered equity curve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquitySeries {
    points: Vec<EquityPoint>,
}

impl EquitySeries {
    /// Wrap already ordered and accumulated points.
    pub fn from_points(points: Vec<EquityPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[EquityPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last point of the curve, if any.
    pub fn last(&self) -> Option<&EquityPoint> {
        self.points.last()
    }

    /// Sum of all amounts. Zero for an empty series.
    pub fn total_pl(&self) -> Amount {
        self.points.iter().map(|p| p.amount).sum()
    }

    /// Equity values in order.
    pub fn equity_values(&self) -> impl Iterator<Item = Amount> + '_ {
        self.points.iter().map(|p| p.equity)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EquityPoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a EquitySeries {
    type Item = &'a EquityPoint;
    type IntoIter = std::slice::Iter<'a, EquityPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Cell value handed to the sheet on append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Text the sheet displays for this cell once entered.
    ///
    /// Numbers use the shortest text that round-trips (`25.0`, `-50.5`).
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format!("{:?}", n),
        }
    }
}

/// How the sheet interprets appended values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueInputOption {
    /// Values are stored exactly as given.
    Raw,
    /// Values are parsed as if typed by a user.
    UserEntered,
}

/// Highlight applied to an amount cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStyle {
    /// Zero or missing: no highlight.
    None,
    /// Positive amount.
    Highlight,
    /// Negative amount.
    Warn,
}

impl CellStyle {
    /// Background CSS for HTML renderers.
    pub fn css(self) -> &'static str {
        match self {
            CellStyle::None => "",
            CellStyle::Highlight => "background-color: #ccffcc",
            CellStyle::Warn => "background-color: #ff9999",
        }
    }
}

/// Pick the highlight for an amount.
#[inline]
pub fn style(value: Amount) -> CellStyle {
    if value < 0.0 {
        CellStyle::Warn
    } else if value > 0.0 {
        CellStyle::Highlight
    } else {
        CellStyle::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_raw_row_from_cells() {
        let row = RawRow::from_cells(vec!["2024-01-01", "100", "ignored"]);
        assert_eq!(row, RawRow::new("2024-01-01", "100"));

        let short = RawRow::from_cells(vec!["2024-01-01"]);
        assert_eq!(short.amount_text, "");
    }

    #[test]
    fn test_cell_display_text() {
        assert_eq!(CellValue::Number(25.0).display_text(), "25.0");
        assert_eq!(CellValue::Number(-50.5).display_text(), "-50.5");
        assert_eq!(CellValue::Number(0.1 + 0.2).display_text(), "0.30000000000000004");
        assert_eq!(CellValue::Text("2024-01-04".into()).display_text(), "2024-01-04");
    }

    #[test]
    fn test_style() {
        assert_eq!(style(-0.01), CellStyle::Warn);
        assert_eq!(style(12.0), CellStyle::Highlight);
        assert_eq!(style(0.0), CellStyle::None);
        assert_eq!(style(f64::NAN), CellStyle::None);
        assert_eq!(CellStyle::Warn.css(), "background-color: #ff9999");
    }

    #[test]
    fn test_series_total() {
        let series = EquitySeries::from_points(vec![
            EquityPoint {
                date: date(2024, 1, 1),
                amount: 100.0,
                equity: 100.0,
            },
            EquityPoint {
                date: date(2024, 1, 2),
                amount: -50.0,
                equity: 50.0,
            },
        ]);
        assert_relative_eq!(series.total_pl(), 50.0);
        assert_eq!(series.last().unwrap().equity, 50.0);
        assert_eq!(EquitySeries::default().total_pl(), 0.0);
    }
}
