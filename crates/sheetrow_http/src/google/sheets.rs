//! Client for the values collection of the Sheets v4 REST API.
//!
//! See <https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets.values>

use reqwest::{Method, Request};
use serde::{Deserialize, Serialize};
use sheetrow_error::{Result, ResultExt, SheetError};
use tracing::debug;
use url::Url;

use super::check_response;
use crate::client::{HttpClient, HttpResponse, read_json_response, set_bearer_auth, set_json_body};

pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com";

/// A range of values, as sent and returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    /// Omitted by the API when the range holds no values.
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    #[serde(default)]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_rows: Option<u64>,
    #[serde(default)]
    pub updated_columns: Option<u64>,
    #[serde(default)]
    pub updated_cells: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearValuesResponse {
    #[serde(default)]
    pub cleared_range: Option<String>,
}

/// Values client bound to a single spreadsheet.
#[derive(Debug, Clone)]
pub struct ValuesClient<C: HttpClient> {
    client: C,
    base_url: Url,
    spreadsheet_id: String,
    access_token: String,
}

impl<C> ValuesClient<C>
where
    C: HttpClient,
{
    pub fn new(
        client: C,
        base_url: Url,
        spreadsheet_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        ValuesClient {
            client,
            base_url,
            spreadsheet_id: spreadsheet_id.into(),
            access_token: access_token.into(),
        }
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Read the values in `range`.
    pub async fn get(&self, range: &str) -> Result<ValueRange> {
        debug!(%range, "sheets values get");

        let url = self.values_url(range)?;
        let request = self.request(Method::GET, url)?;

        let resp = self.client.do_request(request).await?;
        let resp = check_response(resp, "Unable to retrieve data from sheet")
            .await
            .map_err(|e| e.with_field("range", range))?;

        read_json_response(resp.into_bytes_stream()).await
    }

    /// Overwrite `range` with `values`, interpreting every value literally
    /// (`valueInputOption=RAW`).
    pub async fn update(
        &self,
        range: &str,
        values: Vec<Vec<serde_json::Value>>,
    ) -> Result<UpdateValuesResponse> {
        debug!(%range, rows = values.len(), "sheets values update");

        let mut url = self.values_url(range)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let body = ValueRange {
            range: Some(range.to_string()),
            major_dimension: Some("ROWS".to_string()),
            values,
        };
        let mut request = self.request(Method::PUT, url)?;
        set_json_body(&mut request, &body)?;

        let resp = self.client.do_request(request).await?;
        let resp = check_response(resp, "Unable to write to sheet")
            .await
            .map_err(|e| e.with_field("range", range))?;

        read_json_response(resp.into_bytes_stream()).await
    }

    /// Clear all values in `range`, keeping formatting.
    pub async fn clear(&self, range: &str) -> Result<ClearValuesResponse> {
        debug!(%range, "sheets values clear");

        let url = self.values_url(&format!("{range}:clear"))?;
        let mut request = self.request(Method::POST, url)?;
        set_json_body(&mut request, &serde_json::json!({}))?;

        let resp = self.client.do_request(request).await?;
        let resp = check_response(resp, "Unable to clear sheet range")
            .await
            .map_err(|e| e.with_field("range", range))?;

        read_json_response(resp.into_bytes_stream()).await
    }

    fn values_url(&self, range_segment: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                SheetError::new("Sheets api url cannot be used as a base")
                    .with_field("url", &self.base_url)
            })?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                range_segment,
            ]);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> Result<Request> {
        let mut request = Request::new(method, url);
        set_bearer_auth(&mut request, &self.access_token)?;
        Ok(request)
    }
}

/// Parse the default api url.
pub fn default_api_url() -> Result<Url> {
    Url::parse(DEFAULT_SHEETS_API_URL).context("Failed to parse default sheets api url")
}
