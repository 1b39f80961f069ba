use std::fmt::Debug;

use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Request, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sheetrow_error::{Result, ResultExt};

pub trait HttpClient: Sync + Send + Debug + Clone + 'static {
    type Response: HttpResponse;
    type RequestFuture: Future<Output = Result<Self::Response>> + Send + Unpin;

    /// Do the request.
    fn do_request(&self, request: Request) -> Self::RequestFuture;
}

pub trait HttpResponse: Send {
    type BytesStream: Stream<Item = Result<Bytes>> + Send + Unpin;

    fn status(&self) -> StatusCode;
    fn headers(&self) -> &HeaderMap;

    /// Convert the response body into a byte stream.
    fn into_bytes_stream(self) -> Self::BytesStream;
}

/// Helper to set a json body on this request.
///
/// Overwrites the existing body and 'Content-Type' of the request.
pub fn set_json_body<T>(request: &mut Request, body: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_vec(body).context("Failed to serialize request body to json")?;
    *request.body_mut() = Some(body.into());
    request
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(())
}

/// Helper to set a form body on this request.
///
/// Overwrites the existing body and 'Content-Type' of the request.
pub fn set_form_body<T>(request: &mut Request, body: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let body = serde_urlencoded::to_string(body)
        .context("Failed to serialize request body to url encoded form")?;
    *request.body_mut() = Some(body.into());
    request.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );

    Ok(())
}

/// Helper to set a bearer token on this request.
pub fn set_bearer_auth(request: &mut Request, token: &str) -> Result<()> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .context("Access token is not a valid header value")?;
    value.set_sensitive(true);
    request.headers_mut().insert(AUTHORIZATION, value);

    Ok(())
}

/// Collect the full byte stream into a vec.
pub async fn read_response_bytes<S>(mut stream: S) -> Result<Vec<u8>>
where
    S: Stream<Item = Result<Bytes>> + Send + Unpin,
{
    let mut bytes = Vec::new();
    while let Some(resp) = stream.try_next().await? {
        bytes.extend_from_slice(resp.as_ref());
    }
    Ok(bytes)
}

/// Helper to read a json response from a byte stream.
///
/// This will collect the full response before trying to deserialize it.
pub async fn read_json_response<T, S>(stream: S) -> Result<T>
where
    T: DeserializeOwned,
    S: Stream<Item = Result<Bytes>> + Send + Unpin,
{
    let bytes = read_response_bytes(stream).await?;
    serde_json::from_slice(&bytes).context("Failed to deserialize response body as json")
}

/// Helper to read a response body as (lossy) utf8 text.
pub async fn read_text_response<S>(stream: S) -> Result<String>
where
    S: Stream<Item = Result<Bytes>> + Send + Unpin,
{
    let bytes = read_response_bytes(stream).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use url::Url;

    use super::*;

    fn request() -> Request {
        Request::new(
            Method::POST,
            Url::parse("https://example.com/token").unwrap(),
        )
    }

    #[test]
    fn form_body() {
        let mut req = request();
        set_form_body(&mut req, &[("grant_type", "a b"), ("assertion", "x.y.z")]).unwrap();

        assert_eq!(
            "application/x-www-form-urlencoded",
            req.headers()[CONTENT_TYPE].to_str().unwrap()
        );
        let body = req.body().unwrap().as_bytes().unwrap();
        assert_eq!(b"grant_type=a+b&assertion=x.y.z", body);
    }

    #[test]
    fn json_body() {
        let mut req = request();
        set_json_body(&mut req, &serde_json::json!({"values": [["a"]]})).unwrap();

        assert_eq!(
            "application/json",
            req.headers()[CONTENT_TYPE].to_str().unwrap()
        );
        let body = req.body().unwrap().as_bytes().unwrap();
        assert_eq!(br#"{"values":[["a"]]}"#, body);
    }

    #[test]
    fn bearer_auth_header() {
        let mut req = request();
        set_bearer_auth(&mut req, "tok").unwrap();
        assert_eq!(
            "Bearer tok",
            req.headers()[AUTHORIZATION].to_str().unwrap()
        );
    }
}
