use sheetrow_error::{Result, SheetError};
use tracing::{info, warn};

use crate::cell::format_row;
use crate::record::Record;
use crate::store::SheetStore;
use crate::table::RemoteTable;

/// Outcome of a successful header check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheck {
    /// The sheet had no header, the expected one was written.
    Initialized,
    /// The existing header matches.
    Matched,
}

impl<T> SheetStore<T>
where
    T: RemoteTable,
{
    /// Ensure the first row holds the record field names.
    ///
    /// A missing header is written. A header that differs in any cell, order
    /// or length is an error, it is never rewritten.
    pub async fn validate_headers(&self) -> Result<HeaderCheck> {
        let expected = Record::header();
        let range = self.ranges().header().to_string();

        let rows = self.table().query(&range).await?;
        let Some(current) = rows.first() else {
            info!(%range, "No header found, adding");
            self.table().write(&range, expected).await?;
            return Ok(HeaderCheck::Initialized);
        };

        if *current != expected {
            let expected = format_row(&expected);
            let current = format_row(current);
            info!(defined = %expected, current = %current, "header mismatch");
            return Err(SheetError::new("Mismatched headers")
                .with_field("defined", expected)
                .with_field("current", current));
        }

        Ok(HeaderCheck::Matched)
    }

    /// Clear the header row so the next validation writes it again.
    ///
    /// Failure is logged and ignored. Returns whether the header was cleared.
    pub async fn reset_headers(&self) -> bool {
        let range = self.ranges().header().to_string();
        match self.table().clear(&range).await {
            Ok(()) => {
                info!(%range, "cleared header row");
                true
            }
            Err(e) => {
                warn!(%range, error = %e, "Error clearing header row");
                false
            }
        }
    }
}
