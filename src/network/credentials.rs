// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request stages attaching the anti-forgery token and the session token

use std::sync::Arc;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};
use url::Url;

use super::interceptor::{InterceptAction, Interceptor};
use crate::http::{CookieJar, Request};
use crate::session::CredentialStore;

/// Cookie the backend stores its anti-forgery token in
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header the backend expects the anti-forgery token in
pub const CSRF_HEADER: &str = "x-csrftoken";

/// Authorization scheme used for the session token
pub const TOKEN_SCHEME: &str = "Token";

lazy_static! {
    static ref CSRF_PATTERN: Regex =
        Regex::new(r"(?:^|;\s*)csrftoken=([^;]+)").expect("static regex");
}

/// Pull the anti-forgery token out of a raw document cookie string
pub fn csrf_from_cookie_string(cookies: &str) -> Option<&str> {
    CSRF_PATTERN
        .captures(cookies)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Copies the `csrftoken` cookie into the `X-CSRFToken` header
pub struct CsrfTokenInjector {
    jar: CookieJar,
    document_url: Url,
}

impl CsrfTokenInjector {
    /// Read cookies from `jar` as seen by the document at `document_url`
    pub fn new(jar: CookieJar, document_url: Url) -> Self {
        Self { jar, document_url }
    }
}

#[async_trait]
impl Interceptor for CsrfTokenInjector {
    fn name(&self) -> &'static str {
        "csrf"
    }

    async fn before_request(&self, request: &mut Request) -> InterceptAction {
        let cookies = self.jar.document_cookie(&self.document_url);
        let Some(token) = csrf_from_cookie_string(&cookies) else {
            return InterceptAction::Continue;
        };

        match HeaderValue::from_str(token) {
            Ok(value) => {
                request
                    .headers
                    .insert(HeaderName::from_static(CSRF_HEADER), value);
                InterceptAction::Continue
            }
            Err(e) => InterceptAction::Abort(format!("anti-forgery token is not a valid header value: {}", e)),
        }
    }

    fn priority(&self) -> i32 {
        200
    }
}

/// Sets `Authorization: Token <session token>` when a session exists
pub struct SessionTokenInjector {
    store: Arc<dyn CredentialStore>,
}

impl SessionTokenInjector {
    /// Read the session token from `store` on every request
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Interceptor for SessionTokenInjector {
    fn name(&self) -> &'static str {
        "session-token"
    }

    async fn before_request(&self, request: &mut Request) -> InterceptAction {
        request.session_generation = Some(self.store.generation());
        let Some(token) = self.store.get() else {
            tracing::debug!(url = %request.url, "No session token");
            return InterceptAction::Continue;
        };

        match HeaderValue::from_str(&format!("{} {}", TOKEN_SCHEME, token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers.insert(AUTHORIZATION, value);
                tracing::debug!(url = %request.url, "Session token attached");
                InterceptAction::Continue
            }
            Err(e) => InterceptAction::Abort(format!("session token is not a valid header value: {}", e)),
        }
    }

    fn priority(&self) -> i32 {
        100
    }
}

/// Session token a request was sent with, read back from its header
pub fn sent_session_token(request: &Request) -> Option<&str> {
    request
        .header_str(AUTHORIZATION.as_str())
        .and_then(|v| v.strip_prefix(TOKEN_SCHEME))
        .and_then(|v| v.strip_prefix(' '))
}
