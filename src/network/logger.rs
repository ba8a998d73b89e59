// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request logger stage

use async_trait::async_trait;

use super::interceptor::{InterceptAction, Interceptor};
use crate::error::{Error, Result};
use crate::http::{Request, Response};

/// Logs every call; never logs header values
#[derive(Debug, Clone, Default)]
pub struct RequestLogger {
    /// Log request and response bodies at debug level
    pub log_bodies: bool,
}

impl RequestLogger {
    /// Create a logger, optionally logging bodies
    pub fn new(log_bodies: bool) -> Self {
        Self { log_bodies }
    }
}

#[async_trait]
impl Interceptor for RequestLogger {
    fn name(&self) -> &'static str {
        "logger"
    }

    async fn before_request(&self, request: &mut Request) -> InterceptAction {
        tracing::info!(
            method = %request.method,
            url = %request.url,
            authenticated = request.headers.contains_key("authorization"),
            csrf = request.headers.contains_key("x-csrftoken"),
            "Request"
        );

        if self.log_bodies {
            if let Some(ref body) = request.body {
                tracing::debug!(body = ?String::from_utf8_lossy(body), "Request body");
            }
        }

        InterceptAction::Continue
    }

    async fn after_response(&self, request: &Request, response: &mut Response) -> Result<()> {
        tracing::info!(
            url = %request.url,
            status = %response.status,
            time_ms = response.response_time_ms,
            content_type = response.content_type().unwrap_or("-"),
            "Response"
        );

        if self.log_bodies {
            tracing::debug!(body = %response.text_lossy(), "Response body");
        }

        Ok(())
    }

    async fn on_error(&self, request: &Request, error: &Error) {
        tracing::warn!(
            method = %request.method,
            url = %request.url,
            kind = %error.kind(),
            status = ?error.status_code(),
            error = %error,
            "Request failed"
        );
    }

    fn priority(&self) -> i32 {
        -100 // run after every header-mutating stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    #[tokio::test]
    async fn test_body_logging_leaves_call_untouched() {
        let logger = RequestLogger::new(true);
        assert!(logger.log_bodies);
        assert!(!RequestLogger::default().log_bodies);

        let mut req = Request::new(Method::POST, "http://127.0.0.1:8000/api/exam/records/")
            .unwrap()
            .json(&serde_json::json!({"exam_id": 2}))
            .unwrap();
        let before = req.body.clone();

        assert_eq!(logger.before_request(&mut req).await, InterceptAction::Continue);
        assert_eq!(req.body, before);
        assert!(req.headers.get("authorization").is_none());
    }
}
