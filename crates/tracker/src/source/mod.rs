//! Row source clients.
//!
//! A row source is the durable sheet of entries: it can return every row
//! (header first) and append one row at the end.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryRowSource;
pub use sqlite::SqliteRowSource;

use equity_core::{CellValue, RawRow, Result, ValueInputOption};

/// Tabular store holding the P/L entries.
///
/// Implementations report read failures as `Error::RemoteRead` and append
/// failures as `Error::RemoteWrite`.
pub trait RowSource {
    /// Every row of the worksheet in sheet order, header included.
    fn read_all(&mut self) -> Result<Vec<RawRow>>;

    /// Append one row after the last one.
    fn append_row(&mut self, cells: &[CellValue], option: ValueInputOption) -> Result<()>;
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn read_all(&mut self) -> Result<Vec<RawRow>> {
        (**self).read_all()
    }

    fn append_row(&mut self, cells: &[CellValue], option: ValueInputOption) -> Result<()> {
        (**self).append_row(cells, option)
    }
}

/// Text a cell holds once written with the given input option.
pub(crate) fn cell_text(cell: &CellValue, option: ValueInputOption) -> String {
    match (cell, option) {
        (CellValue::Text(s), ValueInputOption::UserEntered) => s.trim().to_string(),
        (cell, _) => cell.display_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        let padded = CellValue::Text(" 2024-01-04 ".to_string());
        assert_eq!(cell_text(&padded, ValueInputOption::UserEntered), "2024-01-04");
        assert_eq!(cell_text(&padded, ValueInputOption::Raw), " 2024-01-04 ");
        assert_eq!(cell_text(&CellValue::Number(25.0), ValueInputOption::UserEntered), "25.0");
    }
}
