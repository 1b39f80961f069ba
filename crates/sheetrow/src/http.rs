use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use reqwest::header::HeaderMap;
use reqwest::{Request, StatusCode};
use sheetrow_error::{Result, ResultExt, SheetError};
use sheetrow_http::client::{HttpClient, HttpResponse};
use tracing::debug;

const USER_AGENT: &str = concat!("sheetrow/", env!("CARGO_PKG_VERSION"));

/// Http client backed by reqwest, driven by the tokio runtime.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new(client: reqwest::Client) -> Self {
        ReqwestHttpClient { client }
    }

    pub fn try_new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build http client")?;
        Ok(Self::new(client))
    }
}

impl HttpClient for ReqwestHttpClient {
    type Response = ReqwestHttpResponse;
    type RequestFuture = BoxFuture<'static, Result<Self::Response>>;

    fn do_request(&self, request: Request) -> Self::RequestFuture {
        debug!(method = %request.method(), url = %request.url(), "http request");
        self.client
            .execute(request)
            .map(|result| match result {
                Ok(resp) => Ok(ReqwestHttpResponse(resp)),
                Err(e) => Err(SheetError::with_source("Failed to make request", Box::new(e))),
            })
            .boxed()
    }
}

#[derive(Debug)]
pub struct ReqwestHttpResponse(reqwest::Response);

impl HttpResponse for ReqwestHttpResponse {
    type BytesStream = BoxStream<'static, Result<Bytes>>;

    fn status(&self) -> StatusCode {
        self.0.status()
    }

    fn headers(&self) -> &HeaderMap {
        self.0.headers()
    }

    fn into_bytes_stream(self) -> Self::BytesStream {
        self.0
            .bytes_stream()
            .map_err(|e| SheetError::with_source("Failed to stream body", Box::new(e)))
            .boxed()
    }
}
