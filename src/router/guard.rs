// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Navigation guard

use std::sync::Arc;

use super::location::Location;
use super::route::Route;
use crate::session::CredentialStore;
use crate::shell::Shell;

/// Application name appended to every page title
pub const APP_TITLE: &str = "考试系统";

/// Query key carrying the originally requested location
pub const REDIRECT_QUERY: &str = "redirect";

/// Where a fresh login lands when no destination was recorded
pub const DEFAULT_HOME: &str = "/exams";

/// Result of one guard evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Go on to the requested location
    Proceed(Location),
    /// Go to login instead; the location carries the replay target
    Redirect(Location),
}

impl NavigationOutcome {
    /// Whether the transition was allowed
    pub fn is_allowed(&self) -> bool {
        matches!(self, NavigationOutcome::Proceed(_))
    }

    /// Location the navigation ends up at
    pub fn location(&self) -> &Location {
        match self {
            NavigationOutcome::Proceed(l) | NavigationOutcome::Redirect(l) => l,
        }
    }
}

/// Runs before every route transition
pub struct NavigationGuard {
    store: Arc<dyn CredentialStore>,
    shell: Arc<dyn Shell>,
    login_path: String,
}

impl NavigationGuard {
    /// Create a guard sending unauthenticated users to `login_path`
    pub fn new(
        store: Arc<dyn CredentialStore>,
        shell: Arc<dyn Shell>,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            shell,
            login_path: login_path.into(),
        }
    }

    /// Evaluate a transition to `to`, which matched `route`
    ///
    /// The document title is updated whatever the outcome.
    pub fn evaluate(&self, route: &Route, to: &Location) -> NavigationOutcome {
        self.shell.set_title(&page_title(route));

        if !route.requires_auth {
            return NavigationOutcome::Proceed(to.clone());
        }

        if self.store.is_authenticated() {
            tracing::debug!(to = %to, "Navigation allowed");
            NavigationOutcome::Proceed(to.clone())
        } else {
            tracing::debug!(to = %to, "No session, redirecting to login");
            NavigationOutcome::Redirect(
                Location::new(self.login_path.as_str()).with_query(REDIRECT_QUERY, to.full_path()),
            )
        }
    }

    /// Login path this guard redirects to
    pub fn login_path(&self) -> &str {
        &self.login_path
    }
}

/// Title for a route: `"<title> - 考试系统"` or just the app name
pub fn page_title(route: &Route) -> String {
    match route.title {
        Some(ref title) => format!("{} - {}", title, APP_TITLE),
        None => APP_TITLE.to_string(),
    }
}

/// Where to go after a successful login from `login_location`
///
/// Only in-app absolute paths are replayed; anything else (missing,
/// protocol-relative, absolute URL) lands on [`DEFAULT_HOME`].
pub fn post_login_target(login_location: &Location) -> String {
    match login_location.query_value(REDIRECT_QUERY) {
        Some(target) if target.starts_with('/') && !target.starts_with("//") => target.to_string(),
        _ => DEFAULT_HOME.to_string(),
    }
}
