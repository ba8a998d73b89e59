// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client facade
//!
//! The one configured transport every API call goes through. It owns the
//! base address, timeout and default headers, forwards cookies, and runs
//! each call through its [`InterceptorChain`].

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::cookie::CookieJar;
use super::request::{CredentialsMode, Request};
use super::response::Response;
use super::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::error::{Error, Result};
use crate::network::InterceptorChain;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address every endpoint path is resolved against
    pub base_url: String,
    /// Address of the document the client runs in; decides which cookies
    /// the page can see. Defaults to the base address.
    pub document_url: Option<String>,
    /// User agent string
    pub user_agent: String,
    /// Timeout applied to every call
    pub timeout: Duration,
    /// Default headers
    pub default_headers: HeaderMap,
    /// Forward cookies on every call, cross-origin included
    pub with_credentials: bool,
    /// Capture Set-Cookie into the jar and send jar cookies
    pub handle_cookies: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert("accept", HeaderValue::from_static("application/json"));

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            document_url: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_headers,
            with_credentials: true,
            handle_cookies: true,
            proxy: None,
        }
    }
}

impl ClientConfig {
    /// Create a new client config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base address
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set document address
    pub fn document_url(mut self, document_url: impl Into<String>) -> Self {
        self.document_url = Some(document_url.into());
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Forward cookies cross-origin or not
    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = with_credentials;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Parsed base address
    pub fn parsed_base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", self.base_url, e)))
    }

    /// Parsed document address
    pub fn parsed_document_url(&self) -> Result<Url> {
        match self.document_url {
            Some(ref u) => Url::parse(u)
                .map_err(|e| Error::Config(format!("Invalid document URL '{}': {}", u, e))),
            None => self.parsed_base_url(),
        }
    }
}

/// The configured HTTP client
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
    base_url: Url,
    document_url: Url,
    cookie_jar: CookieJar,
    chain: InterceptorChain,
}

impl HttpClient {
    /// Create a client with default configuration and no pipeline stages
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with its own cookie jar and no pipeline stages
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_parts(config, CookieJar::new(), InterceptorChain::new())
    }

    /// Create a client over a shared jar running `chain` on every call
    pub fn with_parts(
        config: ClientConfig,
        cookie_jar: CookieJar,
        chain: InterceptorChain,
    ) -> Result<Self> {
        let base_url = config.parsed_base_url()?;
        let document_url = config.parsed_document_url()?;

        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(10))
            .default_headers(config.default_headers.clone())
            .cookie_store(false); // We handle cookies ourselves

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            config,
            base_url,
            document_url,
            cookie_jar,
            chain,
        })
    }

    /// Get the cookie jar
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.cookie_jar
    }

    /// Get the pipeline
    pub fn chain(&self) -> &InterceptorChain {
        &self.chain
    }

    /// Get the base address
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the document address
    pub fn document_url(&self) -> &Url {
        &self.document_url
    }

    /// Get client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Describe a call to `path` relative to the base address
    pub fn request(&self, method: Method, path: &str) -> Result<Request> {
        let credentials = if self.config.with_credentials {
            CredentialsMode::Include
        } else {
            CredentialsMode::SameOrigin
        };
        Ok(Request::relative(method, &self.base_url, path)?.credentials(credentials))
    }

    /// Call an endpoint and return only the decoded payload
    pub async fn call<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.request(method, path)?;
        if let Some(body) = body {
            request = request.json(body)?;
        }
        self.execute(request).await?.json()
    }

    /// GET `path`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call::<T, ()>(Method::GET, path, None).await
    }

    /// POST `body` as JSON to `path`
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(Method::POST, path, Some(body)).await
    }

    /// Run a request through the pipeline and the transport
    ///
    /// Returns the response envelope for 2xx answers. Every failure, from
    /// a rejecting stage, the transport or a non-2xx status, is shown to
    /// the failure stages first and then returned unchanged.
    pub async fn execute(&self, mut request: Request) -> Result<Response> {
        if let Err(e) = self.chain.process_request(&mut request).await {
            self.chain.notify_error(&request, &e).await;
            return Err(e);
        }

        let sent = self.send(&request).await.and_then(Response::error_for_status);
        let mut response = match sent {
            Ok(response) => response,
            Err(e) => {
                self.chain.notify_error(&request, &e).await;
                return Err(e);
            }
        };

        self.chain.process_response(&request, &mut response).await?;
        Ok(response)
    }

    /// Execute multiple requests concurrently
    pub async fn execute_all(&self, requests: Vec<Request>) -> Vec<Result<Response>> {
        let futures: Vec<_> = requests.into_iter().map(|r| self.execute(r)).collect();
        futures::future::join_all(futures).await
    }

    fn forwards_cookies(&self, request: &Request) -> bool {
        match request.credentials {
            CredentialsMode::Include => true,
            CredentialsMode::SameOrigin => request.url.origin() == self.document_url.origin(),
            CredentialsMode::Omit => false,
        }
    }

    async fn send(&self, request: &Request) -> Result<Response> {
        let start = Instant::now();

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        if self.config.handle_cookies && self.forwards_cookies(request) {
            if let Some(cookie_header) = self.cookie_jar.get_cookie_header(&request.url) {
                builder = builder.header(COOKIE, cookie_header);
            }
        }

        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        let timeout = request.timeout.unwrap_or(self.config.timeout);
        builder = builder.timeout(timeout);

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout_with_url(
                    format!("{} {}", request.method, request.path),
                    timeout.as_millis() as u64,
                    request.url.as_str(),
                )
            } else {
                Error::Http(e)
            }
        })?;
        let response_time = start.elapsed().as_millis() as u64;

        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        let response = Response::new(status, headers, body, final_url, response_time);

        if self.config.handle_cookies {
            for cookie in response.set_cookies() {
                self.cookie_jar.add_from_header(cookie, &response.url);
            }
        }

        Ok(response)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.config.timeout)
            .field("with_credentials", &self.config.with_credentials)
            .field("chain", &self.chain)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{session_pipeline, InterceptAction, Interceptor};
    use crate::session::MemoryCredentialStore;
    use crate::shell::HeadlessShell;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use wiremock::matchers::{any, body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Refuse;

    #[async_trait]
    impl Interceptor for Refuse {
        fn name(&self) -> &'static str {
            "refuse"
        }

        async fn before_request(&self, _request: &mut Request) -> InterceptAction {
            InterceptAction::Abort("not today".to_string())
        }
    }

    struct FailureCounter(Arc<AtomicUsize>);

    #[async_trait]
    impl Interceptor for FailureCounter {
        fn name(&self) -> &'static str {
            "failures"
        }

        async fn on_error(&self, _request: &Request, _error: &Error) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn client_for(server: &MockServer) -> HttpClient {
        HttpClient::with_config(ClientConfig::new().base_url(format!("{}/api", server.uri()))).unwrap()
    }

    #[test]
    fn test_default_config() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8000/api");
        assert_eq!(client.config().timeout, Duration::from_millis(5000));
        assert!(client.config().with_credentials);
        assert_eq!(
            client.config().default_headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpClient::with_config(ClientConfig::new().base_url("not a url")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_success_returns_payload_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/exam/exams/"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
            .expect(1)
            .mount(&server)
            .await;

        let exams: Value = client_for(&server).get("exam/exams/").await.unwrap();
        assert_eq!(exams, json!([{"id": 1}]));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/exam/records/"))
            .and(body_json(json!({"exam_id": 4})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 9})))
            .mount(&server)
            .await;

        let record: Value = client_for(&server)
            .post("exam/records/", &json!({"exam_id": 4}))
            .await
            .unwrap();
        assert_eq!(record["id"], 9);
    }

    #[tokio::test]
    async fn test_failure_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("{\"detail\":\"Not found.\"}"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get::<Value>("exam/records/77/")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.body(), Some("{\"detail\":\"Not found.\"}"));
    }

    #[tokio::test]
    async fn test_timeout_maps_to_timeout_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = HttpClient::with_config(
            ClientConfig::new()
                .base_url(format!("{}/api", server.uri()))
                .timeout(Duration::from_millis(50)),
        )
        .unwrap();

        let err = client.get::<Value>("exam/exams/").await.unwrap_err();
        assert!(err.is_timeout());
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_set_cookie_captured_and_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/exam/exams/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "csrftoken=fromserver; Path=/")
                    .set_body_json(json!([])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/exam/records/1/"))
            .and(header("cookie", "csrftoken=fromserver"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let _: Value = client.get("exam/exams/").await.unwrap();
        assert_eq!(
            client
                .cookie_jar()
                .get_value("csrftoken", client.document_url())
                .as_deref(),
            Some("fromserver")
        );

        let record: Value = client.get("exam/records/1/").await.unwrap();
        assert_eq!(record["id"], 1);
    }

    #[tokio::test]
    async fn test_cross_origin_cookies_need_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
            .mount(&server)
            .await;

        let client = HttpClient::with_config(
            ClientConfig::new()
                .base_url(format!("{}/api", server.uri()))
                .document_url("http://frontend.test/")
                .with_credentials(false),
        )
        .unwrap();
        let req = client.request(Method::GET, "exam/exams/").unwrap();
        assert!(!client.forwards_cookies(&req));

        let client = HttpClient::with_config(
            ClientConfig::new()
                .base_url(format!("{}/api", server.uri()))
                .document_url("http://frontend.test/"),
        )
        .unwrap();
        let req = client.request(Method::GET, "exam/exams/").unwrap();
        assert!(client.forwards_cookies(&req));
    }

    #[tokio::test]
    async fn test_rejected_request_is_never_sent() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let failures = Arc::new(AtomicUsize::new(0));
        let chain = InterceptorChain::new()
            .with(Refuse)
            .with(FailureCounter(failures.clone()));
        let client = HttpClient::with_parts(
            ClientConfig::new().base_url(format!("{}/api", server.uri())),
            CookieJar::new(),
            chain,
        )
        .unwrap();

        let req = client.request(Method::GET, "exam/exams/").unwrap();
        let err = client.execute(req).await.unwrap_err();

        match err {
            Error::Interceptor { ref stage, ref reason } => {
                assert_eq!(stage, "refuse");
                assert_eq!(reason, "not today");
            }
            other => panic!("expected a stage rejection, got {:?}", other),
        }
        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_tokens_means_no_session_headers() {
        let server = MockServer::start().await;
        Mock::given(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(header_exists("x-csrftoken"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/exam/exams/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::new().base_url(format!("{}/api", server.uri()));
        let jar = CookieJar::new();
        let chain = session_pipeline(
            jar.clone(),
            config.parsed_document_url().unwrap(),
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(HeadlessShell::new()),
            "/login",
            false,
        );
        let client = HttpClient::with_parts(config, jar, chain).unwrap();

        let exams: Value = client.get("exam/exams/").await.unwrap();
        assert_eq!(exams, json!([]));
    }
}
