pub mod credentials;
pub mod sheets;

use serde::Deserialize;
use sheetrow_error::{Result, SheetError};

use crate::client::{HttpResponse, read_text_response};

/// Error documents returned by Google endpoints.
///
/// The REST APIs wrap errors in an `error` object, the OAuth token endpoint
/// returns a flat `error`/`error_description` pair.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GoogleErrorBody {
    Api {
        error: ApiError,
    },
    OAuth {
        error: String,
        #[serde(default)]
        error_description: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Check the response status, turning a failed response into an error with
/// the message extracted from the Google error body when possible.
pub(crate) async fn check_response<R>(resp: R, msg: &'static str) -> Result<R>
where
    R: HttpResponse,
{
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = read_text_response(resp.into_bytes_stream()).await?;
    let err = SheetError::new(msg).with_field("status", status);

    let err = match serde_json::from_str::<GoogleErrorBody>(&body) {
        Ok(GoogleErrorBody::Api { error }) => {
            let err = err.with_field("message", error.message);
            match error.status {
                Some(reason) => err.with_field("reason", reason),
                None => err,
            }
        }
        Ok(GoogleErrorBody::OAuth {
            error,
            error_description,
        }) => {
            let err = err.with_field("reason", error);
            match error_description {
                Some(desc) => err.with_field("message", desc),
                None => err,
            }
        }
        Err(_) => err.with_field("body", body),
    };

    Err(err)
}
