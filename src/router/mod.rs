// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client-side routing gated by session state
//!
//! Every transition resolves the target against the [`RouteTable`], then
//! asks the [`NavigationGuard`]. A denied transition becomes a new
//! navigation to the login route, which runs through the guard as well.

mod guard;
mod location;
mod route;

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::shell::Shell;

pub use guard::{
    page_title, post_login_target, NavigationGuard, NavigationOutcome, APP_TITLE, DEFAULT_HOME,
    REDIRECT_QUERY,
};
pub use location::Location;
pub use route::{Resolved, Route, RouteTable, View};

/// Guard-driven redirects followed before giving up
const MAX_GUARD_REDIRECTS: usize = 3;

/// Result of a completed navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// What the guard decided for the requested location
    pub outcome: NavigationOutcome,
    /// Where the shell ended up
    pub resolved: Resolved,
}

/// Route table plus guard, committing transitions to the shell
pub struct Router {
    table: RouteTable,
    guard: NavigationGuard,
    shell: Arc<dyn Shell>,
}

impl Router {
    /// Create a router
    pub fn new(table: RouteTable, guard: NavigationGuard, shell: Arc<dyn Shell>) -> Self {
        Self {
            table,
            guard,
            shell,
        }
    }

    /// The route table
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The guard
    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Navigate to `full_path`
    pub fn navigate(&self, full_path: &str) -> Result<Navigation> {
        let mut resolved = self.table.resolve(&Location::parse(full_path))?;
        let mut first = None;

        for _ in 0..=MAX_GUARD_REDIRECTS {
            let outcome = self.guard.evaluate(&resolved.route, &resolved.location);
            let redirect = match outcome {
                NavigationOutcome::Proceed(_) => None,
                NavigationOutcome::Redirect(ref to) => Some(to.clone()),
            };
            let outcome = first.get_or_insert(outcome).clone();

            match redirect {
                None => {
                    self.shell.commit(&resolved.location.full_path());
                    return Ok(Navigation { outcome, resolved });
                }
                Some(to) => resolved = self.table.resolve(&to)?,
            }
        }

        Err(Error::navigation(format!(
            "guard redirect loop navigating to {}",
            full_path
        )))
    }
}
