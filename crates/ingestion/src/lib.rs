//! Sheet row ingestion and normalization for the equity tracker.
//!
//! This crate handles:
//! - Header skipping
//! - Amount parsing (bad amounts are dropped)
//! - Date parsing (bad dates fail the batch)
//! - Normalization statistics

pub mod normalizer;
pub mod parse;

pub use normalizer::{NormalizationStats, Normalizer, RowRejection};
pub use parse::{parse_amount, parse_date};
