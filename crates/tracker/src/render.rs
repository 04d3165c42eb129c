//! Plain-text rendering of a snapshot.

use crate::cache::Snapshot;
use equity_core::{CellStyle, EquitySeries};
use equity_curve::table::TABLE_COLUMNS;
use equity_curve::format_currency;
use std::fmt::Write;

/// Shown instead of the chart when there are no entries.
pub const NO_DATA_MESSAGE: &str = "No data logged yet. Log your first daily P/L with `log`.";

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the full dashboard: summary, equity chart and data log.
pub fn render_text(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let summary = &snapshot.summary;

    let _ = writeln!(out, "Stock Trading Equity Curve Tracker");
    let _ = writeln!(out);
    let _ = writeln!(out, "== Performance Summary ==");
    let _ = writeln!(out, "TOTAL P/L: {}", format_currency(summary.total_pl));
    let _ = writeln!(out, "Start: {}", format_currency(summary.starting_equity));
    if summary.has_data() {
        let _ = writeln!(
            out,
            "Entries: {}  Wins: {}  Losses: {}  Win rate: {:.1}%",
            summary.entries,
            summary.winning_days,
            summary.losing_days,
            summary.win_rate * 100.0
        );
        let _ = writeln!(out, "Max drawdown: {}", format_currency(summary.max_drawdown));
    }
    if snapshot.rows_dropped > 0 {
        let _ = writeln!(out, "Skipped {} row(s) with a non-numeric amount", snapshot.rows_dropped);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "== Total Equity Curve ==");
    if snapshot.series.is_empty() {
        let _ = writeln!(out, "{}", NO_DATA_MESSAGE);
        return out;
    }
    let _ = writeln!(out, "{}", sparkline(&snapshot.series));
    if let (Some(first), Some(last)) = (snapshot.series.points().first(), snapshot.series.last()) {
        let _ = writeln!(out, "{} .. {}", first.date, last.date);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "== Raw Data Log ==");
    let _ = writeln!(
        out,
        "{:<12} {:>16} {:>20}",
        TABLE_COLUMNS[0], TABLE_COLUMNS[1], TABLE_COLUMNS[2]
    );
    for row in &snapshot.table.rows {
        let _ = writeln!(
            out,
            "{:<12} {:>16} {:>20}",
            row.date.to_string(),
            styled(&format_currency(row.daily_pl), row.pl_style),
            format_currency(row.cumulative_equity)
        );
    }

    out
}

/// One-line chart of the equity values.
pub fn sparkline(series: &EquitySeries) -> String {
    let values: Vec<f64> = series.equity_values().collect();
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;
    let top = (SPARK_LEVELS.len() - 1) as f64;

    values
        .iter()
        .map(|&v| {
            let level = if range > 0.0 { ((v - min) / range * top).round() as usize } else { 0 };
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

/// Mark a styled cell for terminals: `+` for highlight, `!` for warn.
fn styled(text: &str, style: CellStyle) -> String {
    match style {
        CellStyle::None => format!("{}  ", text),
        CellStyle::Highlight => format!("{} +", text),
        CellStyle::Warn => format!("{} !", text),
    }
}
