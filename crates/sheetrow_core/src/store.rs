use sheetrow_error::{Result, SheetError};
use tracing::{debug, info};

use crate::cell::CellValue;
use crate::config::TableConfig;
use crate::range::SheetRanges;
use crate::record::Record;
use crate::table::RemoteTable;

/// Result of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The first row with a matching key was overwritten.
    Updated { row: usize },
    /// The table has data rows, but none matched the key.
    NotFound,
    /// The table has no data rows.
    NoData,
}

/// Records stored one per row in a sheet whose first row is the header.
#[derive(Debug)]
pub struct SheetStore<T> {
    table: T,
    ranges: SheetRanges,
}

impl<T> SheetStore<T>
where
    T: RemoteTable,
{
    pub fn new(table: T, sheet_name: impl Into<String>) -> Self {
        SheetStore {
            table,
            ranges: SheetRanges::new(sheet_name, Record::width()),
        }
    }

    pub fn from_config(table: T, config: &TableConfig) -> Self {
        Self::new(table, config.sheet_name.clone())
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn ranges(&self) -> &SheetRanges {
        &self.ranges
    }

    /// Write a record into `row`, starting at column A.
    pub async fn write_record(&self, row: usize, record: &Record) -> Result<()> {
        if row < 2 {
            return Err(SheetError::new("Records start at row 2, row 1 holds the header")
                .with_field("row", row));
        }

        let range = self.ranges.row_start(row).to_string();
        debug!(%range, name = %record.name, "writing record");
        self.table.write(&range, record.encode()).await
    }

    /// Append a record after the last row, returning the row written.
    ///
    /// The next row is found by counting the rows with anything in columns A
    /// or B (header included). A row with only columns C and D filled isn't
    /// counted and will be overwritten.
    pub async fn add(&self, record: &Record) -> Result<usize> {
        let count = self
            .table
            .query(&self.ranges.key_columns().to_string())
            .await?
            .len();
        let row = count + 1;

        let range = self.ranges.row_start(row).to_string();
        info!(%range, row, name = %record.name, "adding record");
        self.table.write(&range, record.encode()).await?;

        Ok(row)
    }

    /// Overwrite the first row whose name equals `key` with `values`.
    ///
    /// Values are written left to right from column A, so updating anything
    /// but the name needs a full width row. Rows that aren't exactly as wide
    /// as a record are skipped.
    pub async fn update(&self, key: &str, values: Vec<CellValue>) -> Result<UpdateOutcome> {
        let rows = self
            .table
            .query(&self.ranges.data_rows().to_string())
            .await?;
        if rows.is_empty() {
            info!("No data found");
            return Ok(UpdateOutcome::NoData);
        }

        for (idx, row) in rows.iter().enumerate() {
            if row.len() != Record::width() {
                debug!(row = idx + 2, cells = row.len(), "skipping malformed row");
                continue;
            }

            let record = Record::decode(row).map_err(|e| e.with_field("row", idx + 2))?;
            if record.name != key {
                continue;
            }

            let row = idx + 2;
            let range = self.ranges.row_start(row).to_string();
            info!(%key, row, %range, "found matching row");
            self.table.write(&range, values).await?;

            return Ok(UpdateOutcome::Updated { row });
        }

        debug!(%key, "no matching row");
        Ok(UpdateOutcome::NotFound)
    }

    /// Overwrite the first row whose name equals `key` with a full record.
    pub async fn update_record(&self, key: &str, record: &Record) -> Result<UpdateOutcome> {
        self.update(key, record.encode()).await
    }
}
