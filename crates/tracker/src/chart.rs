//! Equity curve chart rendered as SVG.
//!
//! Plots cumulative equity against date as a line. The text renderer keeps its
//! sparkline as a terminal preview; this is the full chart with axes.

use chrono::NaiveDate;
use equity_core::{EquitySeries, Error, Result, ISO_DATE_FORMAT};
use equity_curve::format_currency;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

/// Chart styling options.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Title drawn above the plot.
    pub title: String,
    /// X-axis label.
    pub x_label: String,
    /// Y-axis label.
    pub y_label: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Cumulative P/L Over Time".to_string(),
            x_label: "Date".to_string(),
            y_label: "Equity".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Render the equity curve of `series` to an SVG document.
///
/// The y-axis always includes zero, the curve's starting equity. An empty
/// series has nothing to draw and is an error.
pub fn render_equity_svg(series: &EquitySeries, options: &ChartOptions) -> Result<String> {
    let (Some(first), Some(last)) = (series.points().first(), series.last()) else {
        return Err(Error::Other("no entries to chart".to_string()));
    };

    let x_end = if last.date > first.date {
        last.date
    } else {
        first.date.succ_opt().unwrap_or(first.date)
    };
    let (y_min, y_max) = series
        .equity_values()
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let pad = ((y_max - y_min) * 0.05).max(1.0);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&options.title, ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(80)
            .build_cartesian_2d(first.date..x_end, (y_min - pad)..(y_max + pad))
            .map_err(chart_error)?;

        chart
            .configure_mesh()
            .x_desc(&options.x_label)
            .y_desc(&options.y_label)
            .x_labels(6)
            .x_label_formatter(&|d: &NaiveDate| d.format(ISO_DATE_FORMAT).to_string())
            .y_label_formatter(&|v: &f64| format_currency(*v))
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(LineSeries::new(
                series.iter().map(|p| (p.date, p.equity)),
                &BLUE,
            ))
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
    }

    Ok(svg)
}

/// Render the equity curve and write it to `path`.
pub fn write_equity_chart(
    series: &EquitySeries,
    options: &ChartOptions,
    path: &Path,
) -> Result<()> {
    let svg = render_equity_svg(series, options)?;
    std::fs::write(path, svg)?;
    info!(path = %path.display(), points = series.len(), "wrote equity chart");
    Ok(())
}

fn chart_error(e: impl std::fmt::Display) -> Error {
    Error::Other(format!("chart drawing failed: {}", e))
}
