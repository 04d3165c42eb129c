//! Core types and configuration for the equity tracker.
//!
//! This crate provides shared types used across all other crates:
//! - Sheet rows, validated P/L records and equity series
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
