//! In-memory table, used in tests and for running operations without a
//! remote spreadsheet.

use parking_lot::Mutex;
use sheetrow_error::{Result, SheetError};

use crate::cell::CellValue;
use crate::range::A1Range;
use crate::table::RemoteTable;

/// Grid of cells that answers queries the way the sheets api does: trailing
/// empty cells and trailing empty rows are dropped, empty cells inside a row
/// come back as empty strings.
#[derive(Debug, Default)]
pub struct MemoryTable {
    grid: Mutex<Vec<Vec<CellValue>>>,
    fail_clear: bool,
    queries: Mutex<Vec<String>>,
    writes: Mutex<Vec<String>>,
}

impl MemoryTable {
    /// Create a table from rows, starting at row 1.
    pub fn with_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = &'static str>,
    {
        let grid = rows
            .into_iter()
            .map(|row| row.into_iter().map(CellValue::text).collect())
            .collect();
        MemoryTable {
            grid: Mutex::new(grid),
            ..Default::default()
        }
    }

    pub fn failing_clear(mut self) -> Self {
        self.fail_clear = true;
        self
    }

    /// Get a row (1-indexed) with trailing empty cells trimmed.
    pub fn row(&self, row: usize) -> Vec<CellValue> {
        let grid = self.grid.lock();
        match row.checked_sub(1).and_then(|idx| grid.get(idx)) {
            Some(cells) => trim_row(cells.clone()),
            None => Vec::new(),
        }
    }

    pub fn row_text(&self, row: usize) -> Vec<String> {
        self.row(row).into_iter().map(|c| c.to_string()).collect()
    }

    /// Ranges written to, in order.
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }

    /// Ranges queried, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

fn trim_row(mut row: Vec<CellValue>) -> Vec<CellValue> {
    while row.last().is_some_and(|c| c.is_empty()) {
        row.pop();
    }
    row.into_iter()
        .map(|c| match c {
            CellValue::Empty => CellValue::text(""),
            other => other,
        })
        .collect()
}

impl RemoteTable for MemoryTable {
    async fn query(&self, range: &str) -> Result<Vec<Vec<CellValue>>> {
        self.queries.lock().push(range.to_string());
        let range = A1Range::parse(range)?;
        let grid = self.grid.lock();

        let first_row = range.first_row();
        let last_row = range
            .last_row()
            .map(|r| usize::min(r, grid.len()))
            .unwrap_or(grid.len());
        let first_col = range.first_column();

        let mut rows = Vec::new();
        for row_idx in first_row..=last_row {
            let Some(cells) = grid.get(row_idx - 1) else {
                break;
            };
            let last_col = range
                .last_column()
                .map(|c| usize::min(c + 1, cells.len()))
                .unwrap_or(cells.len());
            let slice = if first_col < last_col {
                cells[first_col..last_col].to_vec()
            } else {
                Vec::new()
            };
            rows.push(trim_row(slice));
        }

        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }

        Ok(rows)
    }

    async fn write(&self, range: &str, row: Vec<CellValue>) -> Result<()> {
        self.writes.lock().push(range.to_string());
        let range = A1Range::parse(range)?;
        let mut grid = self.grid.lock();

        let row_idx = range.first_row() - 1;
        if grid.len() <= row_idx {
            grid.resize(row_idx + 1, Vec::new());
        }

        let cells = &mut grid[row_idx];
        let first_col = range.first_column();
        if cells.len() < first_col + row.len() {
            cells.resize(first_col + row.len(), CellValue::Empty);
        }
        for (idx, value) in row.into_iter().enumerate() {
            cells[first_col + idx] = value;
        }

        Ok(())
    }

    async fn clear(&self, range: &str) -> Result<()> {
        if self.fail_clear {
            return Err(SheetError::new("Clear failed").with_field("range", range));
        }

        let range = A1Range::parse(range)?;
        let mut grid = self.grid.lock();

        let last_row = range.last_row().unwrap_or(grid.len());
        for row_idx in range.first_row()..=last_row {
            let Some(cells) = grid.get_mut(row_idx - 1) else {
                break;
            };
            let last_col = range
                .last_column()
                .map(|c| usize::min(c + 1, cells.len()))
                .unwrap_or(cells.len());
            for col in range.first_column()..last_col {
                cells[col] = CellValue::Empty;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn query_trims_like_the_api() {
        let table = MemoryTable::with_rows([
            vec!["Name", "Birthdate", "Age", "Eyecolor"],
            vec!["Alice", "", "", ""],
            vec!["", "", "", ""],
            vec!["", "", "30", "Blue"],
            vec!["", "", "", ""],
        ]);

        let rows = table.query("Users!A:B").await.unwrap();
        assert_eq!(2, rows.len());
        assert_eq!(vec![CellValue::text("Alice")], rows[1]);

        let rows = table.query("Users!A2:D").await.unwrap();
        assert_eq!(3, rows.len());
        assert!(rows[1].is_empty());
        assert_eq!(
            vec![
                CellValue::text(""),
                CellValue::text(""),
                CellValue::text("30"),
                CellValue::text("Blue"),
            ],
            rows[2]
        );
    }

    #[tokio::test]
    async fn write_grows_grid() {
        let table = MemoryTable::default();
        table
            .write("Users!A3", vec![CellValue::text("a"), CellValue::text("b")])
            .await
            .unwrap();

        assert!(table.row(1).is_empty());
        assert_eq!(vec!["a", "b"], table.row_text(3));
    }

    #[tokio::test]
    async fn clear_blanks_cells() {
        let table = MemoryTable::with_rows([vec!["a", "b", "c"]]);
        table.clear("Users!A1:B1").await.unwrap();
        assert_eq!(vec!["", "", "c"], table.row_text(1));
    }
}
