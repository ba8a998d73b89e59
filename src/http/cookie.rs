// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie jar backing both the session token and the anti-forgery token

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

/// A single HTTP cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Domain the cookie belongs to
    pub domain: String,
    /// Path the cookie is valid for
    pub path: String,
    /// Expiration time (None = session cookie)
    pub expires: Option<DateTime<Utc>>,
    /// Secure flag (HTTPS only)
    pub secure: bool,
    /// HttpOnly flag (hidden from the document cookie string)
    pub http_only: bool,
    /// SameSite attribute
    pub same_site: SameSite,
}

/// SameSite cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SameSite {
    /// Cookie sent with all requests
    None,
    /// Cookie sent with same-site and top-level navigations
    #[default]
    Lax,
    /// Cookie only sent with same-site requests
    Strict,
}

impl Cookie {
    /// Create a new cookie
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            path: "/".to_string(),
            expires: None,
            secure: false,
            http_only: false,
            same_site: SameSite::default(),
        }
    }

    /// Set the domain
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set the path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set http_only flag
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Check if the cookie is expired
    pub fn is_expired(&self) -> bool {
        self.expires.map_or(false, |exp| exp < Utc::now())
    }

    /// Check if the cookie matches the given URL
    pub fn matches(&self, url: &Url) -> bool {
        let host = url.host_str().unwrap_or("");
        if !self.domain_matches(host) {
            return false;
        }

        if !url.path().starts_with(&self.path) {
            return false;
        }

        if self.secure && url.scheme() != "https" {
            return false;
        }

        !self.is_expired()
    }

    fn domain_matches(&self, host: &str) -> bool {
        if self.domain.is_empty() {
            return true;
        }

        let domain = self.domain.trim_start_matches('.');
        host == domain || host.ends_with(&format!(".{}", domain))
    }

    /// Parse a Set-Cookie header value
    pub fn parse(header: &str, url: &Url) -> Option<Self> {
        let mut parts = header.split(';');
        let first = parts.next()?.trim();

        let (name, value) = first.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let mut cookie = Cookie::new(name, value.trim().trim_matches('"'));

        // Default domain to request host
        cookie.domain = url.host_str().unwrap_or("").to_string();

        for part in parts {
            let part = part.trim();
            if let Some((attr, val)) = part.split_once('=') {
                let attr = attr.trim().to_lowercase();
                let val = val.trim();
                match attr.as_str() {
                    "domain" => cookie.domain = val.trim_start_matches('.').to_string(),
                    "path" => cookie.path = val.to_string(),
                    "expires" => {
                        if let Ok(dt) = DateTime::parse_from_rfc2822(val) {
                            cookie.expires = Some(dt.with_timezone(&Utc));
                        }
                    }
                    "max-age" => {
                        if let Ok(secs) = val.parse::<i64>() {
                            // Max-Age <= 0 means "delete now"
                            let secs = if secs <= 0 { -1 } else { secs };
                            cookie.expires = Some(Utc::now() + chrono::Duration::seconds(secs));
                        }
                    }
                    "samesite" => {
                        cookie.same_site = match val.to_lowercase().as_str() {
                            "strict" => SameSite::Strict,
                            "none" => SameSite::None,
                            _ => SameSite::Lax,
                        };
                    }
                    _ => {}
                }
            } else {
                match part.to_lowercase().as_str() {
                    "secure" => cookie.secure = true,
                    "httponly" => cookie.http_only = true,
                    _ => {}
                }
            }
        }

        Some(cookie)
    }

    /// Convert to cookie header format
    pub fn to_header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Thread-safe cookie storage
///
/// Clones share the same underlying storage, so the credential store, the
/// request stages and the transport all see one jar.
#[derive(Debug, Clone)]
pub struct CookieJar {
    cookies: Arc<DashMap<String, Vec<Cookie>>>,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar {
    /// Create a new empty cookie jar
    pub fn new() -> Self {
        Self {
            cookies: Arc::new(DashMap::new()),
        }
    }

    /// Add a cookie, replacing any cookie with the same name and path
    pub fn add(&self, cookie: Cookie) {
        let mut entry = self.cookies.entry(cookie.domain.clone()).or_default();
        entry.retain(|c| c.name != cookie.name || c.path != cookie.path);
        entry.push(cookie);
    }

    /// Add a cookie from a Set-Cookie header
    ///
    /// A cookie that arrives already expired deletes its namesake instead.
    pub fn add_from_header(&self, header: &str, url: &Url) {
        if let Some(cookie) = Cookie::parse(header, url) {
            if cookie.is_expired() {
                self.remove(&cookie.name, &cookie.domain, &cookie.path);
            } else {
                self.add(cookie);
            }
        }
    }

    /// Get all cookies for a URL
    pub fn get_cookies(&self, url: &Url) -> Vec<Cookie> {
        self.remove_expired();

        self.cookies
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|c| c.matches(url))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Get a cookie value by name for a URL
    pub fn get_value(&self, name: &str, url: &Url) -> Option<String> {
        self.get_cookies(url)
            .into_iter()
            .find(|c| c.name == name)
            .map(|c| c.value)
    }

    /// Get Cookie header value for a URL
    pub fn get_cookie_header(&self, url: &Url) -> Option<String> {
        let cookies = self.get_cookies(url);
        if cookies.is_empty() {
            return None;
        }

        Some(
            cookies
                .iter()
                .map(|c| c.to_header_value())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Raw cookie string as a page script would read it from the document
    ///
    /// HttpOnly cookies are left out. Returns an empty string when nothing
    /// is visible.
    pub fn document_cookie(&self, url: &Url) -> String {
        self.get_cookies(url)
            .iter()
            .filter(|c| !c.http_only)
            .map(|c| c.to_header_value())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Remove a specific cookie
    pub fn remove(&self, name: &str, domain: &str, path: &str) {
        if let Some(mut cookies) = self.cookies.get_mut(domain) {
            cookies.retain(|c| c.name != name || c.path != path);
        }
    }

    /// Remove every cookie with the given name that is visible to a URL
    pub fn remove_named(&self, name: &str, url: &Url) {
        for mut entry in self.cookies.iter_mut() {
            entry
                .value_mut()
                .retain(|c| c.name != name || !c.matches(url));
        }
    }

    fn remove_expired(&self) {
        for mut entry in self.cookies.iter_mut() {
            entry.value_mut().retain(|c| !c.is_expired());
        }
    }

    /// Get total cookie count
    pub fn len(&self) -> usize {
        self.cookies.iter().map(|e| e.value().len()).sum()
    }

    /// Check if jar is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Export all cookies as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        let all_cookies: Vec<Cookie> = self
            .cookies
            .iter()
            .flat_map(|e| e.value().clone())
            .filter(|c| !c.is_expired())
            .collect();
        serde_json::to_string_pretty(&all_cookies)
    }

    /// Import cookies from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let cookies: Vec<Cookie> = serde_json::from_str(json)?;
        let jar = CookieJar::new();
        for cookie in cookies {
            jar.add(cookie);
        }
        Ok(jar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_cookie_parsing() {
        let header = "csrftoken=abc123; Domain=example.com; Path=/; Secure; SameSite=Strict";
        let cookie = Cookie::parse(header, &url("https://example.com/api")).unwrap();

        assert_eq!(cookie.name, "csrftoken");
        assert_eq!(cookie.value, "abc123");
        assert_eq!(cookie.domain, "example.com");
        assert_eq!(cookie.path, "/");
        assert!(cookie.secure);
        assert!(!cookie.http_only);
        assert_eq!(cookie.same_site, SameSite::Strict);
    }

    #[test]
    fn test_add_replaces_same_name() {
        let jar = CookieJar::new();
        let u = url("http://127.0.0.1:8000/api/");

        jar.add(Cookie::new("user_token", "one").domain("127.0.0.1"));
        jar.add(Cookie::new("user_token", "two").domain("127.0.0.1"));

        assert_eq!(jar.len(), 1);
        assert_eq!(jar.get_value("user_token", &u).as_deref(), Some("two"));
    }

    #[test]
    fn test_document_cookie_hides_http_only() {
        let jar = CookieJar::new();
        let u = url("http://127.0.0.1:8000/api/");

        jar.add(Cookie::new("csrftoken", "c1").domain("127.0.0.1"));
        jar.add(Cookie::new("sessionid", "s1").domain("127.0.0.1").http_only(true));

        assert_eq!(jar.document_cookie(&u), "csrftoken=c1");
        assert_eq!(
            jar.get_cookie_header(&u).unwrap().split("; ").count(),
            2
        );
    }

    #[test]
    fn test_expired_set_cookie_deletes() {
        let jar = CookieJar::new();
        let u = url("http://127.0.0.1:8000/api/");

        jar.add_from_header("csrftoken=c1; Path=/", &u);
        assert_eq!(jar.len(), 1);

        jar.add_from_header("csrftoken=; Path=/; Max-Age=0", &u);
        jar.add_from_header(
            "csrftoken=\"\"; Path=/; expires=Thu, 01 Jan 1970 00:00:00 GMT",
            &u,
        );
        assert!(jar.get_value("csrftoken", &u).is_none());
    }

    #[test]
    fn test_remove_named() {
        let jar = CookieJar::new();
        let u = url("http://127.0.0.1:8000/api/");

        jar.add(Cookie::new("user_token", "t").domain("127.0.0.1"));
        jar.add(Cookie::new("csrftoken", "c").domain("127.0.0.1"));
        jar.remove_named("user_token", &u);

        assert!(jar.get_value("user_token", &u).is_none());
        assert_eq!(jar.get_value("csrftoken", &u).as_deref(), Some("c"));
    }

    #[test]
    fn test_json_roundtrip_keeps_flags() {
        let jar = CookieJar::new();
        jar.add(Cookie::new("user_token", "t").domain("127.0.0.1").http_only(true));

        let restored = CookieJar::from_json(&jar.to_json().unwrap()).unwrap();
        let u = url("http://127.0.0.1:8000/");
        let cookies = restored.get_cookies(&u);
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].http_only);
    }
}
