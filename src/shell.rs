// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Hosting shell
//!
//! The session layer never drives navigation itself. It raises signals
//! (title changes, committed routes, session expiry) to whatever hosts it:
//! a browser window, a test harness or the CLI.

use parking_lot::RwLock;

/// Notice shown when the backend rejects the session
pub const SESSION_EXPIRED_NOTICE: &str = "登录已过期,请重新登录";

/// Raised once per torn-down session when the backend answers 401
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionExpired {
    /// Where the shell must send the user (full reload, not an in-app hop)
    pub redirect_to: String,
    /// User-visible notice
    pub notice: String,
    /// The request that was rejected
    pub url: String,
}

/// Host of the session layer
pub trait Shell: Send + Sync {
    /// Set the document title
    fn set_title(&self, title: &str);

    /// Commit an in-app transition to `full_path`
    fn commit(&self, full_path: &str);

    /// Full-page navigation to `path`
    fn hard_redirect(&self, path: &str);

    /// Show a blocking notice to the user
    fn notify(&self, notice: &str);

    /// Session torn down by a 401
    fn session_expired(&self, event: &SessionExpired) {
        self.hard_redirect(&event.redirect_to);
        self.notify(&event.notice);
    }
}

/// Snapshot of what a [`HeadlessShell`] has been told
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellState {
    /// Current document title
    pub title: String,
    /// Current location (last committed or hard-redirected path)
    pub location: String,
    /// Every full-page redirect, in order
    pub hard_redirects: Vec<String>,
    /// Every notice shown, in order
    pub notices: Vec<String>,
}

/// Shell without a window: records every signal and logs it
#[derive(Debug, Default)]
pub struct HeadlessShell {
    state: RwLock<ShellState>,
}

impl HeadlessShell {
    /// Create a shell sitting at `/`
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ShellState {
                location: "/".to_string(),
                ..Default::default()
            }),
        }
    }

    /// Copy of the recorded state
    pub fn state(&self) -> ShellState {
        self.state.read().clone()
    }

    /// Current location
    pub fn location(&self) -> String {
        self.state.read().location.clone()
    }

    /// Current title
    pub fn title(&self) -> String {
        self.state.read().title.clone()
    }
}

impl Shell for HeadlessShell {
    fn set_title(&self, title: &str) {
        tracing::debug!(title, "Document title");
        self.state.write().title = title.to_string();
    }

    fn commit(&self, full_path: &str) {
        tracing::debug!(location = full_path, "Navigation committed");
        self.state.write().location = full_path.to_string();
    }

    fn hard_redirect(&self, path: &str) {
        tracing::info!(location = path, "Full-page redirect");
        let mut state = self.state.write();
        state.location = path.to_string();
        state.hard_redirects.push(path.to_string());
    }

    fn notify(&self, notice: &str) {
        tracing::warn!(notice, "User notice");
        self.state.write().notices.push(notice.to_string());
    }
}
