//! Captured HTTP response metadata.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::NotaryError;
use crate::Result;

/// Everything the client keeps from one HTTP exchange.
///
/// Captured exactly once per transport call: the underlying response body is
/// drained here and the connection released, so the raw text in
/// [`ResponseMetadata::raw_body`] is the only copy there will ever be.
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code, e.g. `200`.
    pub status_code: u16,
    /// HTTP status message, e.g. `OK`.
    pub status_message: String,
    /// All response headers. Later duplicates overwrite earlier ones.
    pub headers: HashMap<String, String>,
    /// Value of the `Content-Type` header, if present.
    pub content_type: Option<String>,
    /// Value of the `Content-Length` header, if present and numeric.
    pub content_length: Option<u64>,
    /// The response body as text, if a body was readable.
    pub raw_body: Option<String>,
    /// The URL the request was sent to.
    pub request_url: String,
    /// When the client finished reading the response.
    pub received_at: DateTime<Utc>,
}

impl ResponseMetadata {
    /// Drain a blocking response into an immutable metadata record.
    ///
    /// A failure reading the body is a transport failure (premature stream
    /// end) and surfaces as [`NotaryError::Connection`].
    pub(crate) fn from_blocking(
        response: reqwest::blocking::Response,
    ) -> Result<ResponseMetadata> {
        let status = response.status();
        let status_message = status
            .canonical_reason()
            .unwrap_or_default()
            .to_string();
        let request_url = response.url().to_string();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.as_str().to_string(), v.to_string());
            }
        }
        let content_type = headers.get("content-type").cloned();
        let content_length = headers
            .get("content-length")
            .and_then(|v| v.parse::<u64>().ok());

        let raw_body = match response.text() {
            Ok(text) => Some(text),
            Err(e) => return Err(NotaryError::Connection(e.to_string())),
        };

        Ok(ResponseMetadata {
            status_code: status.as_u16(),
            status_message,
            headers,
            content_type,
            content_length,
            raw_body,
            request_url,
            received_at: Utc::now(),
        })
    }

    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

impl fmt::Display for ResponseMetadata {
    /// Displays as e.g. `200 - OK; content-type: 'application/json'`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}; content-type: '{}'",
            self.status_code,
            self.status_message,
            self.content_type.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
pub(crate) fn metadata_for_test(
    status_code: u16,
    content_type: Option<&str>,
    raw_body: Option<&str>,
) -> ResponseMetadata {
    let mut headers = HashMap::new();
    if let Some(ct) = content_type {
        headers.insert("content-type".to_string(), ct.to_string());
    }
    ResponseMetadata {
        status_code,
        status_message: String::new(),
        headers,
        content_type: content_type.map(str::to_owned),
        content_length: raw_body.map(|b| b.len() as u64),
        raw_body: raw_body.map(str::to_owned),
        request_url: "https://example.test/notary/v2/submissions".to_string(),
        received_at: Utc::now(),
    }
}
