// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response stage tearing the session down on 401

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::credentials::sent_session_token;
use super::interceptor::Interceptor;
use crate::error::Error;
use crate::http::Request;
use crate::session::CredentialStore;
use crate::shell::{SessionExpired, Shell, SESSION_EXPIRED_NOTICE};

/// Clears the credential store and signals the shell when the backend
/// rejects the session
///
/// A 401 only tears the session down when it answers a request sent under
/// the store's current generation with the current token. Every `set` and
/// `clear` bumps the generation, so once one of N concurrent 401s has
/// cleared the store the others are superseded, and a late 401 arriving
/// after a fresh login (even one handed the same token) leaves the new
/// session alone. Every clear raises exactly one signal.
pub struct SessionExpiryHandler {
    store: Arc<dyn CredentialStore>,
    shell: Arc<dyn Shell>,
    login_path: String,
    teardown: Mutex<()>,
}

impl SessionExpiryHandler {
    /// Create a handler redirecting to `login_path`
    pub fn new(
        store: Arc<dyn CredentialStore>,
        shell: Arc<dyn Shell>,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            shell,
            login_path: login_path.into(),
            teardown: Mutex::new(()),
        }
    }

    fn handle_unauthenticated(&self, request: &Request) {
        let sent = sent_session_token(request).map(str::to_string);

        // Held across compare, clear and signal so two rejections cannot
        // interleave.
        let _teardown = self.teardown.lock();

        let generation = self.store.generation();
        let superseded = request
            .session_generation
            .map_or(false, |sent_under| sent_under != generation);

        if superseded || self.store.get() != sent {
            tracing::debug!(url = %request.url, "Ignoring 401 for a superseded session");
            return;
        }

        self.store.clear();

        tracing::warn!(url = %request.url, redirect = %self.login_path, "Session expired");
        self.shell.session_expired(&SessionExpired {
            redirect_to: self.login_path.clone(),
            notice: SESSION_EXPIRED_NOTICE.to_string(),
            url: request.url.to_string(),
        });
    }
}

#[async_trait]
impl Interceptor for SessionExpiryHandler {
    fn name(&self) -> &'static str {
        "session-expiry"
    }

    async fn on_error(&self, request: &Request, error: &Error) {
        if error.is_unauthenticated() {
            self.handle_unauthenticated(request);
        }
    }

    fn priority(&self) -> i32 {
        50
    }
}
