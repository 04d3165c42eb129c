//! In-memory sheet.

use super::{cell_text, RowSource};
use equity_core::{CellValue, Error, RawRow, Result, ValueInputOption, SHEET_HEADER};
use tracing::debug;

/// Sheet held in memory, with call counters and failure injection.
#[derive(Debug, Clone)]
pub struct MemoryRowSource {
    rows: Vec<Vec<String>>,
    read_calls: u64,
    append_calls: u64,
    read_failure: Option<String>,
    write_failure: Option<String>,
}

impl MemoryRowSource {
    /// Create a sheet holding only the header row.
    pub fn new() -> Self {
        Self::with_rows(Vec::<(String, String)>::new())
    }

    /// Create a sheet with the header followed by the given data rows.
    pub fn with_rows<I, D, A>(rows: I) -> Self
    where
        I: IntoIterator<Item = (D, A)>,
        D: Into<String>,
        A: Into<String>,
    {
        let header: Vec<String> = SHEET_HEADER.iter().map(|s| s.to_string()).collect();
        let mut all = vec![header];
        all.extend(rows.into_iter().map(|(d, a)| vec![d.into(), a.into()]));
        Self {
            rows: all,
            read_calls: 0,
            append_calls: 0,
            read_failure: None,
            write_failure: None,
        }
    }

    /// Make every following read fail with the given message.
    pub fn fail_reads(&mut self, msg: impl Into<String>) {
        self.read_failure = Some(msg.into());
    }

    /// Make every following append fail with the given message.
    pub fn fail_writes(&mut self, msg: impl Into<String>) {
        self.write_failure = Some(msg.into());
    }

    /// Clear injected failures.
    pub fn heal(&mut self) {
        self.read_failure = None;
        self.write_failure = None;
    }

    /// Stored rows, header included.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of `read_all` calls made, failed ones included.
    pub fn read_calls(&self) -> u64 {
        self.read_calls
    }

    /// Number of `append_row` calls made, failed ones included.
    pub fn append_calls(&self) -> u64 {
        self.append_calls
    }
}

impl Default for MemoryRowSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RowSource for MemoryRowSource {
    fn read_all(&mut self) -> Result<Vec<RawRow>> {
        self.read_calls += 1;
        if let Some(msg) = &self.read_failure {
            return Err(Error::remote_read(msg.clone()));
        }
        Ok(self.rows.iter().map(|r| RawRow::from_cells(r.iter().cloned())).collect())
    }

    fn append_row(&mut self, cells: &[CellValue], option: ValueInputOption) -> Result<()> {
        self.append_calls += 1;
        if let Some(msg) = &self.write_failure {
            return Err(Error::remote_write(msg.clone()));
        }
        let row: Vec<String> = cells.iter().map(|c| cell_text(c, option)).collect();
        debug!(?row, "appended row to memory sheet");
        self.rows.push(row);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_first() {
        let mut source = MemoryRowSource::with_rows(vec![("2024-01-01", "100")]);
        let rows = source.read_all().unwrap();

        assert_eq!(rows[0], RawRow::new("Date", "Amount"));
        assert_eq!(rows[1], RawRow::new("2024-01-01", "100"));
        assert_eq!(source.read_calls(), 1);
    }

    #[test]
    fn test_append() {
        let mut source = MemoryRowSource::new();
        source
            .append_row(
                &[CellValue::Text("2024-01-04".into()), CellValue::Number(25.0)],
                ValueInputOption::UserEntered,
            )
            .unwrap();

        assert_eq!(
            source.rows().last().unwrap(),
            &vec!["2024-01-04".to_string(), "25.0".to_string()]
        );
        assert_eq!(source.append_calls(), 1);
    }

    #[test]
    fn test_injected_failures() {
        let mut source = MemoryRowSource::new();
        source.fail_reads("network unreachable");
        source.fail_writes("permission denied");

        assert!(matches!(source.read_all(), Err(Error::RemoteRead(_))));
        let err = source
            .append_row(&[CellValue::Number(1.0)], ValueInputOption::Raw)
            .unwrap_err();
        assert!(matches!(err, Error::RemoteWrite(_)));
        assert_eq!(source.rows().len(), 1);

        source.heal();
        assert!(source.read_all().is_ok());
    }
}
