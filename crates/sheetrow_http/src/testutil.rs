//! Stub http client for tests.

use std::collections::VecDeque;
use std::sync::Arc;

use bytes::Bytes;
use futures::future::{Ready, ready};
use futures::stream::{Iter, iter};
use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use reqwest::{Method, Request, StatusCode};
use sheetrow_error::{Result, SheetError};
use url::Url;

use crate::client::{HttpClient, HttpResponse};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl RecordedRequest {
    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_slice(self.body.as_deref().unwrap_or_default()).unwrap()
    }

    pub fn body_str(&self) -> &str {
        std::str::from_utf8(self.body.as_deref().unwrap_or_default()).unwrap()
    }
}

#[derive(Debug, Default)]
struct StubState {
    requests: Vec<RecordedRequest>,
    responses: VecDeque<StubResponse>,
}

/// Client that records every request and replies with queued responses in
/// order.
#[derive(Debug, Clone, Default)]
pub struct StubHttpClient {
    state: Arc<Mutex<StubState>>,
}

impl StubHttpClient {
    pub fn with_responses(responses: impl IntoIterator<Item = StubResponse>) -> Self {
        let client = Self::default();
        client.state.lock().responses.extend(responses);
        client
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }
}

impl HttpClient for StubHttpClient {
    type Response = StubResponse;
    type RequestFuture = Ready<Result<StubResponse>>;

    fn do_request(&self, request: Request) -> Self::RequestFuture {
        let mut state = self.state.lock();
        state.requests.push(RecordedRequest {
            method: request.method().clone(),
            url: request.url().clone(),
            headers: request.headers().clone(),
            body: request.body().and_then(|b| b.as_bytes()).map(|b| b.to_vec()),
        });

        let resp = state
            .responses
            .pop_front()
            .ok_or_else(|| SheetError::new("No stub response queued"));
        ready(resp)
    }
}

#[derive(Debug, Clone)]
pub struct StubResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl StubResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        StubResponse {
            status,
            headers: HeaderMap::new(),
            body: Bytes::from(body.into()),
        }
    }

    pub fn ok_json(body: serde_json::Value) -> Self {
        Self::new(StatusCode::OK, body.to_string())
    }
}

impl HttpResponse for StubResponse {
    type BytesStream = Iter<std::vec::IntoIter<Result<Bytes>>>;

    fn status(&self) -> StatusCode {
        self.status
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn into_bytes_stream(self) -> Self::BytesStream {
        iter(vec![Ok(self.body)])
    }
}
