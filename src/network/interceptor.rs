// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interceptor trait and the ordered chain the client runs every call through

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::http::{Request, Response};

/// One named stage of the request/response pipeline
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use exam_session::http::Request;
/// use exam_session::network::{InterceptAction, Interceptor};
///
/// struct Tracer;
///
/// #[async_trait]
/// impl Interceptor for Tracer {
///     fn name(&self) -> &'static str {
///         "tracer"
///     }
///
///     async fn before_request(&self, req: &mut Request) -> InterceptAction {
///         req.headers.insert("x-trace", "1".parse().unwrap());
///         InterceptAction::Continue
///     }
/// }
/// ```
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Stage name, used in logs and rejection errors
    fn name(&self) -> &'static str;

    /// Called before a request is sent
    ///
    /// Can modify the request or reject it. A rejected request is never
    /// transmitted.
    async fn before_request(&self, _request: &mut Request) -> InterceptAction {
        InterceptAction::Continue
    }

    /// Called after a successful (2xx) response is received
    async fn after_response(&self, _request: &Request, _response: &mut Response) -> Result<()> {
        Ok(())
    }

    /// Called when the call failed, whatever the reason
    ///
    /// Observes the failure only; the error is always handed back to the
    /// caller unchanged.
    async fn on_error(&self, _request: &Request, _error: &Error) {}

    /// Filter - return true if this stage should handle the request
    fn should_intercept(&self, _request: &Request) -> bool {
        true
    }

    /// Priority - higher priority stages run first
    fn priority(&self) -> i32 {
        0
    }
}

/// Action to take after a request stage ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptAction {
    /// Continue with the (possibly modified) request
    Continue,
    /// Reject the request with a reason
    Abort(String),
}

/// Ordered list of pipeline stages
///
/// Stages run by descending priority; equal priorities keep insertion order.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stage
    pub fn add<I: Interceptor + 'static>(&mut self, interceptor: I) {
        self.interceptors.push(Arc::new(interceptor));
        // sort_by is stable, so insertion order breaks ties
        self.interceptors
            .sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Add a stage, builder style
    pub fn with<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.add(interceptor);
        self
    }

    /// Stage names in execution order
    pub fn names(&self) -> Vec<&'static str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Whether the chain has no stages
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Run the request stages; the first rejection stops the chain
    pub async fn process_request(&self, request: &mut Request) -> Result<()> {
        for interceptor in &self.interceptors {
            if !interceptor.should_intercept(request) {
                continue;
            }

            if let InterceptAction::Abort(reason) = interceptor.before_request(request).await {
                tracing::warn!(
                    stage = interceptor.name(),
                    url = %request.url,
                    reason = %reason,
                    "Request rejected"
                );
                return Err(Error::interceptor(interceptor.name(), reason));
            }
        }
        Ok(())
    }

    /// Run the success stages
    pub async fn process_response(&self, request: &Request, response: &mut Response) -> Result<()> {
        for interceptor in &self.interceptors {
            if !interceptor.should_intercept(request) {
                continue;
            }
            interceptor.after_response(request, response).await?;
        }
        Ok(())
    }

    /// Run the failure stages
    pub async fn notify_error(&self, request: &Request, error: &Error) {
        for interceptor in &self.interceptors {
            if interceptor.should_intercept(request) {
                interceptor.on_error(request, error).await;
            }
        }
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("stages", &self.names())
            .finish()
    }
}
