//! Error types for the equity tracker.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the equity tracker.
#[derive(Error, Debug)]
pub enum Error {
    /// A date cell could not be parsed. Fatal to the whole read.
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// Reading rows from the sheet failed.
    #[error("Failed to read from sheet: {0}")]
    RemoteRead(String),

    /// Appending a row to the sheet failed.
    #[error("Failed to write to sheet: {0}")]
    RemoteWrite(String),

    /// A new entry was rejected before reaching the sheet.
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a data format error.
    pub fn data_format(msg: impl Into<String>) -> Self {
        Error::DataFormat(msg.into())
    }

    /// Create a sheet read error.
    pub fn remote_read(msg: impl Into<String>) -> Self {
        Error::RemoteRead(msg.into())
    }

    /// Create a sheet write error.
    pub fn remote_write(msg: impl Into<String>) -> Self {
        Error::RemoteWrite(msg.into())
    }

    /// Create an invalid entry error.
    pub fn invalid_entry(msg: impl Into<String>) -> Self {
        Error::InvalidEntry(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::remote_write("permission denied");
        assert_eq!(err.to_string(), "Failed to write to sheet: permission denied");

        let err = Error::data_format("row 3: 'yesterday'");
        assert_eq!(err.to_string(), "Data format error: row 3: 'yesterday'");

        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
