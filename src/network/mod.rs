// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request/response pipeline
//!
//! Every API call runs through an [`InterceptorChain`]. The standard session
//! pipeline, in execution order:
//!
//! | stage            | request                  | failure                     |
//! |------------------|--------------------------|-----------------------------|
//! | `csrf`           | `X-CSRFToken` from cookie |                            |
//! | `session-token`  | `Authorization: Token …` |                             |
//! | `session-expiry` |                          | 401 → clear store + signal  |
//! | `logger`         | log                      | log                         |

mod credentials;
mod expiry;
mod interceptor;
mod logger;

use std::sync::Arc;

use url::Url;

use crate::http::CookieJar;
use crate::session::CredentialStore;
use crate::shell::Shell;

pub use credentials::{
    csrf_from_cookie_string, sent_session_token, CsrfTokenInjector, SessionTokenInjector,
    CSRF_COOKIE, CSRF_HEADER, TOKEN_SCHEME,
};
pub use expiry::SessionExpiryHandler;
pub use interceptor::{InterceptAction, Interceptor, InterceptorChain};
pub use logger::RequestLogger;

/// Build the standard session pipeline
pub fn session_pipeline(
    jar: CookieJar,
    document_url: Url,
    store: Arc<dyn CredentialStore>,
    shell: Arc<dyn Shell>,
    login_path: &str,
    log_bodies: bool,
) -> InterceptorChain {
    InterceptorChain::new()
        .with(CsrfTokenInjector::new(jar, document_url))
        .with(SessionTokenInjector::new(store.clone()))
        .with(SessionExpiryHandler::new(store, shell, login_path))
        .with(RequestLogger::new(log_bodies))
}
