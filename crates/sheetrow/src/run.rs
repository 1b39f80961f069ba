use sheetrow_core::cell::CellValue;
use sheetrow_core::header::HeaderCheck;
use sheetrow_core::record::Record;
use sheetrow_core::store::{SheetStore, UpdateOutcome};
use sheetrow_core::table::{RemoteTable, SheetsTable};
use sheetrow_error::Result;
use sheetrow_http::google::credentials::{SPREADSHEETS_SCOPE, ServiceAccount};
use tracing::{debug, info};

use crate::args::Args;
use crate::http::ReqwestHttpClient;

/// Authenticate, check the header, then run the demo against the configured
/// sheet.
pub async fn run(args: Args) -> Result<()> {
    let config = args.table_config();

    let account = ServiceAccount::load_from_file(&args.credentials)?;
    let client = ReqwestHttpClient::try_new()?;
    let token = account
        .fetch_access_token(&client, SPREADSHEETS_SCOPE)
        .await?;
    info!(
        client_email = %account.client_email,
        expires_in = token.expires_in,
        "authenticated"
    );

    let table = SheetsTable::connect(client, args.api_url, &config, token.access_token);
    let store = SheetStore::from_config(table, &config);
    debug!(spreadsheet_id = %config.spreadsheet_id, sheet = %config.sheet_name, "opened sheet");

    prepare(&store, args.reset_header).await?;
    run_demo(&store).await
}

/// Make sure the header row exists and matches, optionally clearing it first.
pub async fn prepare<T>(store: &SheetStore<T>, reset_header: bool) -> Result<HeaderCheck>
where
    T: RemoteTable,
{
    if reset_header {
        store.reset_headers().await;
    }
    store.validate_headers().await
}

/// Write a record at row 5, rename it from John to Jane, then append the same
/// record again.
pub async fn run_demo<T>(store: &SheetStore<T>) -> Result<()>
where
    T: RemoteTable,
{
    let record = Record::new("John", "1/1/1990", "100", "Gray");

    store.write_record(5, &record).await?;

    match store.update("John", vec![CellValue::text("Jane")]).await? {
        UpdateOutcome::Updated { row } => info!(row, "renamed John to Jane"),
        UpdateOutcome::NotFound | UpdateOutcome::NoData => (),
    }

    let row = store.add(&record).await?;
    info!(row, "appended record");

    Ok(())
}
