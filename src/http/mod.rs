// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer
//!
//! Request/response types, the cookie jar and the client facade all API
//! calls go through.

mod client;
mod cookie;
mod request;
mod response;

use std::time::Duration;

pub use client::{ClientConfig, HttpClient};
pub use cookie::{Cookie, CookieJar, SameSite};
pub use request::{CredentialsMode, Request};
pub use response::Response;

/// Backend API address used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Timeout applied to every call unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("exam-session/", env!("CARGO_PKG_VERSION"));
