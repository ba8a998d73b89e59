// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Credential store for the session token

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use url::Url;

use crate::http::{Cookie, CookieJar};

/// Cookie holding the session token
pub const USER_TOKEN_COOKIE: &str = "user_token";

/// Single source of truth for the session token
///
/// Shared by the request stages, the expiry handler and the navigation
/// guard. Each call is one atomic read or write; callers never hold a value
/// across a suspension point, so a cleared token is never sent afterwards.
pub trait CredentialStore: Send + Sync {
    /// Current session token, if any
    fn get(&self) -> Option<String>;

    /// Replace the session token
    fn set(&self, token: &str);

    /// Drop the session token. Clearing an empty store leaves no token.
    fn clear(&self);

    /// Counter bumped by every `set` and `clear`
    ///
    /// A request stamped with an older generation was sent under a session
    /// that has since been replaced or torn down.
    fn generation(&self) -> u64;

    /// Whether a session token is present
    fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

/// Credential store backed by the `user_token` cookie
#[derive(Debug, Clone)]
pub struct CookieCredentialStore {
    jar: CookieJar,
    document_url: Url,
    generation: Arc<AtomicU64>,
}

impl CookieCredentialStore {
    /// Create a store over `jar`, scoping the cookie to `document_url`
    pub fn new(jar: CookieJar, document_url: Url) -> Self {
        Self {
            jar,
            document_url,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The cookie jar the token lives in
    pub fn jar(&self) -> &CookieJar {
        &self.jar
    }
}

impl CredentialStore for CookieCredentialStore {
    fn get(&self) -> Option<String> {
        self.jar
            .get_value(USER_TOKEN_COOKIE, &self.document_url)
            .filter(|v| !v.is_empty())
    }

    fn set(&self, token: &str) {
        let cookie = Cookie::new(USER_TOKEN_COOKIE, token)
            .domain(self.document_url.host_str().unwrap_or(""))
            .path("/");
        self.jar.add(cookie);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn clear(&self) {
        self.jar.remove_named(USER_TOKEN_COOKIE, &self.document_url);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

/// In-memory credential store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<String>>,
    generation: AtomicU64,
}

impl MemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
            generation: AtomicU64::new(0),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn set(&self, token: &str) {
        *self.token.write() = Some(token.to_string());
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn clear(&self) {
        *self.token.write() = None;
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
