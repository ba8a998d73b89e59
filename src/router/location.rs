// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! In-app locations (`/path?query`)

use std::collections::BTreeMap;
use std::fmt;

/// A client-side location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Path, always starting with `/`
    pub path: String,
    /// Query pairs in order of appearance
    pub query: Vec<(String, String)>,
    /// Route parameters filled in when the location is matched
    pub params: BTreeMap<String, String>,
}

impl Location {
    /// Location at `path` with no query
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            path: if path.starts_with('/') {
                path
            } else {
                format!("/{}", path)
            },
            ..Default::default()
        }
    }

    /// Parse `/path?a=b`; any `#fragment` is dropped
    pub fn parse(full_path: &str) -> Self {
        let without_hash = full_path.split('#').next().unwrap_or("");
        let (path, query) = match without_hash.split_once('?') {
            Some((p, q)) => (p, q),
            None => (without_hash, ""),
        };

        let mut location = Location::new(path);
        location.query = url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        location
    }

    /// Add a query pair
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// First value of a query key
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Route parameter by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Path plus encoded query, e.g. `/login?redirect=/take/3`
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }

        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", encode_query_component(k), encode_query_component(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }

    /// Non-empty path segments
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

/// Percent-encode a query component, keeping `/`, `:` and `?` readable
fn encode_query_component(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'a'..=b'z'
            | b'A'..=b'Z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'~'
            | b'/'
            | b':'
            | b'?'
            | b'@'
            | b'!'
            | b'$'
            | b'\''
            | b'('
            | b')'
            | b'*'
            | b','
            | b';' => result.push(byte as char),
            _ => result.push_str(&format!("%{:02X}", byte)),
        }
    }
    result
}
