//! SQLite-backed sheet.
//!
//! Rows of every worksheet live in one table, ordered by an autoincrement row id
//! so that appends keep their arrival order.

use super::{cell_text, RowSource};
use equity_core::{CellValue, Error, RawRow, Result, ValueInputOption, SHEET_HEADER};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS sheet_rows (
    row_id          INTEGER PRIMARY KEY AUTOINCREMENT,
    spreadsheet_key TEXT NOT NULL,
    worksheet       TEXT NOT NULL,
    date_cell       TEXT NOT NULL,
    amount_cell     TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_sheet_rows_sheet
    ON sheet_rows (spreadsheet_key, worksheet, row_id);
";

/// Sheet client over a SQLite database.
pub struct SqliteRowSource {
    conn: Connection,
    spreadsheet_key: String,
    worksheet: String,
}

impl SqliteRowSource {
    /// Open (or create) the sheet at `path`.
    ///
    /// A worksheet with no rows gets the `Date, Amount` header.
    pub fn open(
        path: impl AsRef<Path>,
        spreadsheet_key: impl Into<String>,
        worksheet: impl Into<String>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            Error::config(format!("cannot open sheet database {}: {}", path.display(), e))
        })?;
        Self::from_connection(conn, spreadsheet_key, worksheet)
    }

    /// Open a throwaway in-memory sheet.
    pub fn open_in_memory(
        spreadsheet_key: impl Into<String>,
        worksheet: impl Into<String>,
    ) -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::config(format!("cannot open in-memory sheet: {}", e)))?;
        Self::from_connection(conn, spreadsheet_key, worksheet)
    }

    fn from_connection(
        conn: Connection,
        spreadsheet_key: impl Into<String>,
        worksheet: impl Into<String>,
    ) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| Error::config(format!("cannot prepare sheet schema: {}", e)))?;

        let source = Self {
            conn,
            spreadsheet_key: spreadsheet_key.into(),
            worksheet: worksheet.into(),
        };
        source.ensure_header()?;
        Ok(source)
    }

    fn ensure_header(&self) -> Result<()> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sheet_rows WHERE spreadsheet_key = ?1 AND worksheet = ?2",
                params![self.spreadsheet_key, self.worksheet],
                |row| row.get(0),
            )
            .map_err(|e| Error::remote_read(e.to_string()))?;

        if count == 0 {
            self.insert(SHEET_HEADER[0], SHEET_HEADER[1])
                .map_err(|e| Error::remote_write(e.to_string()))?;
            info!(
                spreadsheet = %self.spreadsheet_key,
                worksheet = %self.worksheet,
                "created worksheet with header"
            );
        }
        Ok(())
    }

    fn insert(&self, date_cell: &str, amount_cell: &str) -> rusqlite::Result<usize> {
        self.conn.execute(
            "INSERT INTO sheet_rows (spreadsheet_key, worksheet, date_cell, amount_cell)
             VALUES (?1, ?2, ?3, ?4)",
            params![self.spreadsheet_key, self.worksheet, date_cell, amount_cell],
        )
    }

    pub fn spreadsheet_key(&self) -> &str {
        &self.spreadsheet_key
    }

    pub fn worksheet(&self) -> &str {
        &self.worksheet
    }
}

impl RowSource for SqliteRowSource {
    fn read_all(&mut self) -> Result<Vec<RawRow>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT date_cell, amount_cell FROM sheet_rows
                 WHERE spreadsheet_key = ?1 AND worksheet = ?2
                 ORDER BY row_id",
            )
            .map_err(|e| Error::remote_read(e.to_string()))?;

        let rows = stmt
            .query_map(params![self.spreadsheet_key, self.worksheet], |row| {
                Ok(RawRow::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| Error::remote_read(e.to_string()))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::remote_read(e.to_string()))?;

        debug!(rows = rows.len(), worksheet = %self.worksheet, "read sheet");
        Ok(rows)
    }

    fn append_row(&mut self, cells: &[CellValue], option: ValueInputOption) -> Result<()> {
        let [date_cell, amount_cell] = cells else {
            return Err(Error::remote_write(format!(
                "worksheet has 2 columns, got {} cells",
                cells.len()
            )));
        };

        let date_text = cell_text(date_cell, option);
        let amount_text = cell_text(amount_cell, option);
        self.insert(&date_text, &amount_text)
            .map_err(|e| Error::remote_write(e.to_string()))?;

        debug!(date = %date_text, amount = %amount_text, "appended row");
        Ok(())
    }
}
