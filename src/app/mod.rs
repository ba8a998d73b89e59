// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Application composition root
//!
//! Wires one cookie jar, one credential store and one shell into the HTTP
//! client pipeline, the API and the router, so the request stages and the
//! navigation guard read the same session.

mod config;

use std::sync::Arc;

use crate::api::ApiClient;
use crate::error::{ErrorContext, Result};
use crate::http::{CookieJar, HttpClient};
use crate::network::session_pipeline;
use crate::router::{Navigation, NavigationGuard, RouteTable, Router};
use crate::session::CookieCredentialStore;
use crate::shell::{HeadlessShell, Shell};

pub use config::{AppConfig, ENV_BASE_URL, ENV_COOKIE_FILE, ENV_LOG_BODIES, ENV_TIMEOUT_MS};

/// A fully wired exam client
pub struct App<S: Shell = HeadlessShell> {
    config: AppConfig,
    cookie_jar: CookieJar,
    store: Arc<CookieCredentialStore>,
    shell: Arc<S>,
    api: ApiClient,
    router: Router,
}

impl App<HeadlessShell> {
    /// Create an app hosted by a [`HeadlessShell`]
    pub fn new(config: AppConfig) -> Result<Self> {
        Self::with_shell(config, Arc::new(HeadlessShell::new()))
    }
}

impl<S: Shell + 'static> App<S> {
    /// Create an app hosted by `shell`
    ///
    /// Cookies are loaded from the configured cookie file when it exists.
    pub fn with_shell(config: AppConfig, shell: Arc<S>) -> Result<Self> {
        let cookie_jar = match config.cookie_file {
            Some(ref path) if path.exists() => {
                let json = std::fs::read_to_string(path)?;
                CookieJar::from_json(&json).context("loading cookie file")?
            }
            _ => CookieJar::new(),
        };

        let document_url = config.client.parsed_document_url()?;
        let store = Arc::new(CookieCredentialStore::new(
            cookie_jar.clone(),
            document_url.clone(),
        ));

        let chain = session_pipeline(
            cookie_jar.clone(),
            document_url,
            store.clone(),
            shell.clone(),
            &config.login_path,
            config.log_bodies,
        );
        let client = HttpClient::with_parts(config.client.clone(), cookie_jar.clone(), chain)?;
        let api = ApiClient::new(client, store.clone());

        let guard = NavigationGuard::new(store.clone(), shell.clone(), config.login_path.as_str());
        let router = Router::new(RouteTable::exam_app(), guard, shell.clone());

        tracing::debug!(
            base_url = %config.client.base_url,
            cookies = cookie_jar.len(),
            "App ready"
        );

        Ok(Self {
            config,
            cookie_jar,
            store,
            shell,
            api,
            router,
        })
    }

    /// Backend API
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Router
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Navigate to `full_path` through the guard
    pub fn navigate(&self, full_path: &str) -> Result<Navigation> {
        self.router.navigate(full_path)
    }

    /// Session token store
    pub fn store(&self) -> &Arc<CookieCredentialStore> {
        &self.store
    }

    /// Shared cookie jar
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.cookie_jar
    }

    /// Hosting shell
    pub fn shell(&self) -> &Arc<S> {
        &self.shell
    }

    /// Configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Write the cookie jar to the configured cookie file, if any
    pub fn save_cookies(&self) -> Result<()> {
        if let Some(ref path) = self.config.cookie_file {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, self.cookie_jar.to_json()?)?;
        }
        Ok(())
    }
}
