//! Interactive session commands.
//!
//! A session keeps one dashboard, and so one cache, alive across commands
//! read line by line.

use crate::cache::Snapshot;
use crate::dashboard::{Dashboard, Submitted};
use crate::render::{render_text, NO_DATA_MESSAGE};
use crate::source::RowSource;
use chrono::{DateTime, NaiveDate, Utc};
use equity_core::{Error, Result};
use equity_ingestion::{parse_amount, parse_date};
use std::io::Write;

pub const SESSION_HELP: &str = "\
commands:
  show [--json]           show the dashboard
  log <amount> [date]     log a P/L entry (date as YYYY-MM-DD, default today)
  refresh                 drop the cached snapshot and re-read the sheet
  help                    show this help
  quit                    leave the session";

/// Printed once an append has gone through.
pub const LOGGED_MESSAGE: &str = "Entry logged successfully and saved to sheet.";

/// One parsed session line.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Blank line.
    Empty,
    Help,
    Quit,
    Show { json: bool },
    Refresh,
    Log { amount: f64, date: NaiveDate },
    /// Unparseable input, with the message to show.
    Invalid(String),
}

/// Whether the session keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parse one input line. `log` without a date uses `today`.
pub fn parse_command(line: &str, today: NaiveDate) -> SessionCommand {
    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        [] => SessionCommand::Empty,
        ["quit"] | ["exit"] => SessionCommand::Quit,
        ["help"] => SessionCommand::Help,
        ["show", rest @ ..] => SessionCommand::Show {
            json: rest.contains(&"--json"),
        },
        ["refresh"] => SessionCommand::Refresh,
        ["log", amount, rest @ ..] => {
            let Some(amount) = parse_amount(amount) else {
                return SessionCommand::Invalid(format!("Not a number: {}", amount));
            };
            let date = match rest.first() {
                Some(text) => match parse_date(text) {
                    Some(date) => date,
                    None => {
                        return SessionCommand::Invalid(format!(
                            "Not a date (YYYY-MM-DD): {}",
                            text
                        ))
                    }
                },
                None => today,
            };
            SessionCommand::Log { amount, date }
        }
        ["log"] => SessionCommand::Invalid("usage: log <amount> [date]".to_string()),
        _ => SessionCommand::Invalid("Unknown command. Type `help`.".to_string()),
    }
}

/// Run one command against `dashboard`, writing its output to `out`.
///
/// Sheet failures are reported in the output; only failures writing to `out`
/// are returned as errors.
pub fn execute<S, W>(
    dashboard: &mut Dashboard<S>,
    command: SessionCommand,
    now: DateTime<Utc>,
    out: &mut W,
) -> Result<Flow>
where
    S: RowSource,
    W: Write,
{
    match command {
        SessionCommand::Empty => {}
        SessionCommand::Quit => return Ok(Flow::Quit),
        SessionCommand::Help => writeln!(out, "{}", SESSION_HELP)?,
        SessionCommand::Show { json } => match dashboard.load(now) {
            Ok(snapshot) => write_snapshot(out, &snapshot, json)?,
            Err(e) => write_load_error(out, &e)?,
        },
        SessionCommand::Refresh => match dashboard.refresh(now) {
            Ok(snapshot) => write_snapshot(out, &snapshot, false)?,
            Err(e) => write_load_error(out, &e)?,
        },
        SessionCommand::Log { amount, date } => match dashboard.submit(date, amount, now) {
            Ok(Submitted::Reloaded(snapshot)) => {
                writeln!(out, "{}", LOGGED_MESSAGE)?;
                write_snapshot(out, &snapshot, false)?;
            }
            Ok(Submitted::ReloadFailed(e)) => {
                writeln!(out, "{}", LOGGED_MESSAGE)?;
                write_load_error(out, &e)?;
            }
            Err(e) => writeln!(out, "{}", submit_error_message(&e))?,
        },
        SessionCommand::Invalid(msg) => writeln!(out, "{}", msg)?,
    }
    Ok(Flow::Continue)
}

/// Write a snapshot as pretty JSON or as the text dashboard.
pub fn write_snapshot<W: Write>(out: &mut W, snapshot: &Snapshot, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(snapshot)?)?;
    } else {
        write!(out, "{}", render_text(snapshot))?;
    }
    Ok(())
}

/// Report a failed read: the error, then the no-data state.
pub fn write_load_error<W: Write>(out: &mut W, e: &Error) -> Result<()> {
    writeln!(out, "Error: {}", e)?;
    writeln!(out, "{}", NO_DATA_MESSAGE)?;
    Ok(())
}

/// User-facing message for a failed submission.
pub fn submit_error_message(e: &Error) -> String {
    match e {
        Error::RemoteWrite(_) => format!(
            "Failed to write to sheet. Check your config and sheet permissions. Error: {}",
            e
        ),
        _ => format!("Error: {}", e),
    }
}
