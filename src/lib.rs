// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # exam-session - Session layer for the online exam client
//!
//! Keeps the backend session token, decorates every API call with it,
//! tears the session down when the backend rejects it, and gates client
//! routes on whether a session exists.
//!
//! ## Features
//!
//! - Credential store: the token lives in the `user_token` cookie
//! - Request pipeline: `X-CSRFToken` and `Authorization: Token …` on every call
//! - Session expiry: a 401 clears the token, redirects to `/login` and shows a notice, once
//! - Typed API: login, exams, attempts, answers, results
//! - Navigation guard: protected routes bounce to `/login?redirect=…`
//! - Headless shell: records titles, locations and notices for tests and the CLI
//!
//! ## Example
//!
//! ```rust,no_run
//! use exam_session::{App, AppConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = App::new(AppConfig::from_env()?)?;
//!
//!     app.api().login("alice", "secret").await?;
//!     app.navigate("/exams")?;
//!
//!     for exam in app.api().list_exams().await? {
//!         println!("{}: {}", exam.id, exam.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod error;
pub mod http;
pub mod network;
pub mod router;
pub mod session;
pub mod shell;

// Re-exports for convenience

// App
pub use app::{App, AppConfig};

// API
pub use api::{ApiClient, Endpoint};
pub use api::{AnswerSubmission, Exam, ExamRecord, Question, QuestionType, RecordStatus};

// Errors
pub use error::{Error, ErrorContext, ErrorKind, Result};

// HTTP
pub use http::{ClientConfig, Cookie, CookieJar, HttpClient, Request, Response};

// Network
pub use network::{session_pipeline, InterceptAction, Interceptor, InterceptorChain};
pub use network::{CsrfTokenInjector, RequestLogger, SessionExpiryHandler, SessionTokenInjector};

// Routing
pub use router::{Location, Navigation, NavigationGuard, NavigationOutcome, RouteTable, Router, View};

// Session
pub use session::{CookieCredentialStore, CredentialStore, MemoryCredentialStore};

// Shell
pub use shell::{HeadlessShell, SessionExpired, Shell, SESSION_EXPIRED_NOTICE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
