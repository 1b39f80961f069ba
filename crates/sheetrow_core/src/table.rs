use std::fmt::Debug;

use sheetrow_error::Result;
use sheetrow_http::Url;
use sheetrow_http::client::HttpClient;
use sheetrow_http::google::sheets::{ValueRange, ValuesClient};
use tracing::debug;

use crate::cell::CellValue;
use crate::config::TableConfig;

/// Read/write access to a remote table, addressed by A1 ranges.
pub trait RemoteTable: Debug + Sync + Send {
    /// Read all rows in `range`.
    ///
    /// Trailing empty cells of a row and trailing empty rows are omitted, so
    /// rows may be shorter than the range is wide.
    fn query(&self, range: &str) -> impl Future<Output = Result<Vec<Vec<CellValue>>>> + Send;

    /// Overwrite the single row starting at the first cell of `range`, left
    /// to right. Values are stored literally, never parsed as formulas.
    fn write(&self, range: &str, row: Vec<CellValue>) -> impl Future<Output = Result<()>> + Send;

    /// Blank every cell in `range`.
    fn clear(&self, range: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Remote table backed by a sheet in a Google spreadsheet.
#[derive(Debug, Clone)]
pub struct SheetsTable<C: HttpClient> {
    values: ValuesClient<C>,
}

impl<C> SheetsTable<C>
where
    C: HttpClient,
{
    pub fn new(values: ValuesClient<C>) -> Self {
        SheetsTable { values }
    }

    /// Create a table for the configured spreadsheet, authenticating every
    /// request with `access_token`.
    pub fn connect(
        client: C,
        api_url: Url,
        config: &TableConfig,
        access_token: impl Into<String>,
    ) -> Self {
        Self::new(ValuesClient::new(
            client,
            api_url,
            config.spreadsheet_id.clone(),
            access_token,
        ))
    }
}

impl<C> RemoteTable for SheetsTable<C>
where
    C: HttpClient,
{
    async fn query(&self, range: &str) -> Result<Vec<Vec<CellValue>>> {
        let value_range = self.values.get(range).await?;
        rows_from_value_range(value_range)
    }

    async fn write(&self, range: &str, row: Vec<CellValue>) -> Result<()> {
        let row = row.into_iter().map(CellValue::into_json).collect();
        let resp = self.values.update(range, vec![row]).await?;
        debug!(
            updated_range = ?resp.updated_range,
            updated_cells = ?resp.updated_cells,
            "wrote row"
        );
        Ok(())
    }

    async fn clear(&self, range: &str) -> Result<()> {
        let resp = self.values.clear(range).await?;
        debug!(cleared_range = ?resp.cleared_range, "cleared range");
        Ok(())
    }
}

fn rows_from_value_range(value_range: ValueRange) -> Result<Vec<Vec<CellValue>>> {
    value_range
        .values
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(CellValue::try_from_json)
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}
