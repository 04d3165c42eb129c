//! Sheet-backed equity tracker.
//!
//! This crate wires the pipeline together:
//! - Row source clients (in-memory and SQLite-backed sheets)
//! - Time-boxed snapshot cache
//! - Entry submission (append, invalidate, re-read)
//! - Dashboard facade, text rendering and SVG equity chart
//! - Interactive session commands

pub mod cache;
pub mod chart;
pub mod dashboard;
pub mod render;
pub mod session;
pub mod source;
pub mod submission;

pub use cache::{ResultCache, Snapshot};
pub use dashboard::{Dashboard, Submitted};
pub use source::{MemoryRowSource, RowSource, SqliteRowSource};
pub use submission::{EntrySubmissionHandler, NewEntry};
