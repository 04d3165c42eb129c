//! Equity curve derivation for the equity tracker.
//!
//! This crate provides:
//! - Stable chronological sort and cumulative P/L
//! - Performance summary (total P/L, drawdown, daily statistics)
//! - Display table with per-cell styling

pub mod builder;
pub mod summary;
pub mod table;

pub use builder::EquityCurveBuilder;
pub use summary::PerformanceSummary;
pub use table::{format_currency, DisplayRow, DisplayTable};
