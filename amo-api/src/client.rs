//! HTTP client for the amoCRM REST API.
//!
//! Handles authentication, the subdomain-derived API root, custom headers,
//! and request/response lifecycle. There is deliberately no retry and no
//! token refresh: an expired token surfaces as a typed authentication
//! error, and the provider's rate limits are the caller's to respect (see
//! [`crate::batch::gather_bounded`]).

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::debug;

use amo_core::config::AmoConfig;
use amo_core::constants;
use amo_core::error::{AmoError, AmoResult};

use crate::filter::QueryParams;
use crate::response;

/// Authenticated session over the provider's REST API.
///
/// Wraps `reqwest::Client` with a bearer credential pre-attached to every
/// request and the API root derived from the account subdomain. Cloning is
/// cheap; repository handles borrow the client, and each call is an
/// independent request/response cycle with no shared mutable state.
#[derive(Clone)]
pub struct AmoClient {
    inner: Client,
    /// Base URL for the API, e.g. "https://myteam.amocrm.ru/api/v4".
    api_root: String,
    /// Extra headers from configuration.
    custom_headers: Vec<(String, String)>,
}

impl AmoClient {
    /// Create a new client from configuration.
    pub fn new(config: &AmoConfig) -> AmoResult<Self> {
        config.validate()?;

        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", config.auth.token))
            .map_err(|_| AmoError::Config("access token contains invalid header bytes".into()))?;
        auth_value.set_sensitive(true);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(AUTHORIZATION, auth_value);

        let inner = Client::builder()
            .timeout(Duration::from_millis(constants::DEFAULT_API_TIMEOUT_MS))
            .connect_timeout(Duration::from_secs(constants::CONNECT_TIMEOUT_SECS))
            .default_headers(default_headers)
            .build()
            .map_err(|e| AmoError::Internal(format!("failed to build HTTP client: {e}")))?;

        let custom_headers = config
            .http
            .custom_headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            inner,
            api_root: config.api_root(),
            custom_headers,
        })
    }

    /// The API root URL this client talks to.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Build the full URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    /// Apply configured custom headers to a request builder.
    fn apply_headers(&self, mut builder: RequestBuilder) -> RequestBuilder {
        for (key, value) in &self.custom_headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        builder
    }

    /// Dispatch one request. Only transport-level failures are mapped here;
    /// HTTP error statuses are the caller's to interpret per operation.
    async fn send(
        &self,
        method: Method,
        path: &str,
        params: Option<&QueryParams>,
        body: Option<&serde_json::Value>,
    ) -> AmoResult<Response> {
        let url = self.url(path);
        debug!("{} {}", method, path);

        let mut builder = self.inner.request(method, &url);
        if let Some(params) = params {
            if !params.is_empty() {
                builder = builder.query(params);
            }
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        self.apply_headers(builder)
            .send()
            .await
            .map_err(Self::classify_error)
    }

    // --- HTTP verbs ---

    /// Execute a GET request.
    pub async fn get(&self, path: &str, params: Option<&QueryParams>) -> AmoResult<Response> {
        self.send(Method::GET, path, params, None).await
    }

    /// Execute a HEAD request.
    pub async fn head(&self, path: &str) -> AmoResult<Response> {
        self.send(Method::HEAD, path, None, None).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post(&self, path: &str, body: &serde_json::Value) -> AmoResult<Response> {
        self.send(Method::POST, path, None, Some(body)).await
    }

    /// Execute a PATCH request with a JSON body.
    pub async fn patch(&self, path: &str, body: &serde_json::Value) -> AmoResult<Response> {
        self.send(Method::PATCH, path, None, Some(body)).await
    }

    /// Execute a DELETE request.
    pub async fn delete(&self, path: &str) -> AmoResult<Response> {
        self.send(Method::DELETE, path, None, None).await
    }

    // --- Response helpers ---

    /// Pass through success responses; turn any status >= 400 into the
    /// matching error kind.
    pub(crate) async fn ensure_success(response: Response) -> AmoResult<Response> {
        if response.status().as_u16() >= 400 {
            Err(Self::error_from_response(response).await)
        } else {
            Ok(response)
        }
    }

    /// Translate an HTTP error response into a typed error, carrying the
    /// body's detail message, the numeric status, and the raw body.
    pub(crate) async fn error_from_response(response: Response) -> AmoError {
        let status = response.status().as_u16();
        let body = response.text().await.ok().filter(|b| !b.is_empty());
        let message = response::error_message(status, body.as_deref());

        if status == 401 && message.to_ascii_lowercase().contains("expired") {
            return AmoError::TokenExpired(message);
        }
        AmoError::from_status(status, message, body)
    }

    /// Classify a transport-level failure. These never carry an HTTP
    /// status; the request did not produce a response.
    fn classify_error(e: reqwest::Error) -> AmoError {
        if e.is_timeout() {
            AmoError::Timeout(e.to_string())
        } else if e.is_connect() {
            AmoError::Network(format!("connection failed: {e}"))
        } else {
            AmoError::Network(e.to_string())
        }
    }
}
