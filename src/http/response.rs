// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response envelope
//!
//! Callers of the API modules never see this type; the client unwraps it to
//! the payload on success and turns it into an [`Error`] on failure.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};

/// HTTP response representation
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            response_time_ms,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse body as JSON
    ///
    /// An empty body is read as JSON `null`, so endpoints that answer with
    /// no content still deserialize into `()` or `Option<_>`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        if self.body.iter().all(|b| b.is_ascii_whitespace()) {
            return serde_json::from_slice(b"null").map_err(Error::from);
        }
        serde_json::from_slice(&self.body).map_err(Error::from)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get all values for a header
    pub fn header_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get Set-Cookie headers
    pub fn set_cookies(&self) -> Vec<&str> {
        self.header_all("set-cookie")
    }

    /// Turn a non-2xx response into the matching error
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::from_status(
                self.status,
                self.url.as_str(),
                self.text_lossy(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: StatusCode, body: &'static str) -> Response {
        Response::new(
            status,
            HeaderMap::new(),
            Bytes::from(body),
            Url::parse("http://127.0.0.1:8000/api/exam/exams/").unwrap(),
            12,
        )
    }

    #[test]
    fn test_json_payload() {
        let resp = response(StatusCode::OK, r#"[{"id":1},{"id":2}]"#);
        let ids: Vec<serde_json::Value> = resp.json().unwrap();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_empty_body_is_null() {
        let resp = response(StatusCode::OK, "");
        let value: Option<serde_json::Value> = resp.json().unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_error_for_status() {
        let err = response(StatusCode::UNAUTHORIZED, r#"{"detail":"Invalid token."}"#)
            .error_for_status()
            .unwrap_err();
        assert!(err.is_unauthenticated());
        assert_eq!(err.body(), Some(r#"{"detail":"Invalid token."}"#));

        let err = response(StatusCode::NOT_FOUND, "").error_for_status().unwrap_err();
        assert_eq!(err.status_code(), Some(404));

        assert!(response(StatusCode::CREATED, "{}").error_for_status().is_ok());
    }
}
