// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the exam session layer
//!
//! Every failed API call resolves to one of these. The variants map onto the
//! failure taxonomy the session layer reacts to: unauthenticated responses
//! tear the session down, everything else is handed back to the caller as-is.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for session layer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the session layer
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure (connection refused, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request timed out
    #[error("Operation timed out after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
        url: Option<String>,
    },

    /// Backend answered 401
    #[error("Not authenticated: {url}")]
    Unauthenticated { url: String, body: String },

    /// Backend answered with any other non-success status
    #[error("Request to {url} failed with status {status}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// A request stage refused to let the request go out
    #[error("Request rejected by stage '{stage}': {reason}")]
    Interceptor { stage: String, reason: String },

    /// Route table or navigation error
    #[error("Navigation error: {0}")]
    Navigation(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure wrapped with what the client was doing at the time
    #[error("{0}")]
    Other(String),
}

/// Failure classes the response stages distinguish between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 401 from the backend; the only kind with a session-wide side effect
    AuthenticationFailure,
    /// Any other HTTP status failure
    OtherHttpFailure,
    /// Connection-level failure or timeout
    NetworkOrTimeoutFailure,
    /// Request rejected before transmission
    InterceptorFailure,
    /// Everything local to the client (bad URL, bad JSON, I/O, config)
    Local,
}

impl Error {
    /// Create an error from a failed HTTP status
    pub fn from_status(status: StatusCode, url: impl Into<String>, body: impl Into<String>) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            Error::Unauthenticated {
                url: url.into(),
                body: body.into(),
            }
        } else {
            Error::Status {
                status: status.as_u16(),
                url: url.into(),
                body: body.into(),
            }
        }
    }

    /// Create an interceptor rejection
    pub fn interceptor(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Interceptor {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: None,
        }
    }

    /// Create a timeout error with URL
    pub fn timeout_with_url(
        operation: impl Into<String>,
        duration_ms: u64,
        url: impl Into<String>,
    ) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: Some(url.into()),
        }
    }

    /// Create a navigation error
    pub fn navigation<S: Into<String>>(msg: S) -> Self {
        Error::Navigation(msg.into())
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Unauthenticated { .. } => ErrorKind::AuthenticationFailure,
            Error::Status { .. } => ErrorKind::OtherHttpFailure,
            Error::Http(e) if e.status().is_some() => ErrorKind::OtherHttpFailure,
            Error::Http(_) | Error::Timeout { .. } => ErrorKind::NetworkOrTimeoutFailure,
            Error::Interceptor { .. } => ErrorKind::InterceptorFailure,
            _ => ErrorKind::Local,
        }
    }

    /// Check if the backend rejected the session
    pub fn is_unauthenticated(&self) -> bool {
        self.status_code() == Some(401)
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Http(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::NetworkOrTimeoutFailure
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Unauthenticated { .. } => Some(401),
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Unauthenticated { url, .. } => Some(url),
            Error::Status { url, .. } => Some(url),
            Error::Timeout { url: Some(u), .. } => Some(u),
            _ => None,
        }
    }

    /// Get the response body the backend sent along with a failure
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Unauthenticated { body, .. } | Error::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::AuthenticationFailure => "authentication failure",
            ErrorKind::OtherHttpFailure => "http failure",
            ErrorKind::NetworkOrTimeoutFailure => "network failure",
            ErrorKind::InterceptorFailure => "interceptor failure",
            ErrorKind::Local => "local failure",
        };
        f.write_str(name)
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add URL context to error
    fn with_url(self, url: &str) -> Result<T>;

    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn with_url(self, url: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            match err {
                Error::Timeout {
                    operation,
                    duration_ms,
                    ..
                } => Error::Timeout {
                    operation,
                    duration_ms,
                    url: Some(url.to_string()),
                },
                other => other,
            }
        })
    }

    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            Error::Other(format!("{}: {}", msg, err))
        })
    }
}
