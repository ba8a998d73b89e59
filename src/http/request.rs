// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Outgoing request descriptor

use crate::error::Result;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// HTTP request representation
///
/// `path` keeps the endpoint path as the API module wrote it (relative to
/// the client base address); `url` is the resolved absolute address.
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Endpoint path relative to the base address
    pub path: String,
    /// Resolved request URL
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Bytes>,
    /// Per-request timeout override
    pub timeout: Option<Duration>,
    /// Credentials mode
    pub credentials: CredentialsMode,
    /// Credential store generation the request was sent under
    pub session_generation: Option<u64>,
}

/// Credentials mode for requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsMode {
    /// Send cookies only to the same origin as the document
    #[default]
    SameOrigin,
    /// Always send cookies, including cross-origin
    Include,
    /// Never send cookies
    Omit,
}

impl Request {
    /// Create a request against an absolute URL
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(url.as_ref())?;
        Ok(Self {
            method,
            path: url.path().to_string(),
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
            credentials: CredentialsMode::default(),
            session_generation: None,
        })
    }

    /// Create a request for `path` resolved against `base`
    ///
    /// A base without a trailing slash is treated as a directory, so
    /// `http://h/api` + `exam/exams/` gives `http://h/api/exam/exams/`.
    pub fn relative(method: Method, base: &Url, path: &str) -> Result<Self> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }
        let url = base.join(path.trim_start_matches('/'))?;
        Ok(Self {
            method,
            path: path.to_string(),
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
            credentials: CredentialsMode::default(),
            session_generation: None,
        })
    }

    /// Create a new GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.body = Some(Bytes::from(json));
        self = self.header("content-type", "application/json");
        Ok(self)
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set credentials mode
    pub fn credentials(mut self, mode: CredentialsMode) -> Self {
        self.credentials = mode;
        self
    }

    /// Get a header value as a string
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Get the origin
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_resolution() {
        let base = Url::parse("http://127.0.0.1:8000/api").unwrap();
        let req = Request::relative(Method::GET, &base, "exam/exams/").unwrap();
        assert_eq!(req.url_str(), "http://127.0.0.1:8000/api/exam/exams/");
        assert_eq!(req.path, "exam/exams/");
        assert_eq!(req.session_generation, None);

        let base = Url::parse("http://127.0.0.1:8000/api/").unwrap();
        let req = Request::relative(Method::GET, &base, "/exam/records/3/").unwrap();
        assert_eq!(req.url_str(), "http://127.0.0.1:8000/api/exam/records/3/");
    }

    #[test]
    fn test_request_headers() {
        let req = Request::get("https://example.com")
            .unwrap()
            .header("x-custom", "value");
        assert_eq!(req.header_str("x-custom"), Some("value"));
    }

    #[test]
    fn test_json_body() {
        let req = Request::new(Method::POST, "http://h/")
            .unwrap()
            .json(&serde_json::json!({"exam_id": 3}))
            .unwrap();
        assert_eq!(req.header_str("content-type"), Some("application/json"));
        assert_eq!(req.body.as_deref(), Some(&b"{\"exam_id\":3}"[..]));
    }

    #[test]
    fn test_request_origin() {
        let req = Request::get("https://example.com:8080/path").unwrap();
        assert_eq!(req.origin(), "https://example.com:8080");
    }
}
