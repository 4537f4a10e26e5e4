//! # Core Transport
//!
//! ## Key Types
//!
//! - [`Transport`]: The trait every request client implements.
//! - [`HttpTransport`]: The `reqwest`-backed implementation.
//! - [`TransportConfig`]: Construction-time settings (timeout, proxy bypass).
//! - [`TransportError`]: What can go wrong on the wire.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// A single backend call, fully addressed.
///
/// `address` is the `host:port` obtained from the service directory and is used
/// verbatim. `bearer` is attached as `Authorization: Bearer <token>` when present.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub address: String,
    pub path: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, address: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method,
            address: address.into(),
            path: path.into(),
            body: None,
            bearer: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn url(&self) -> String {
        format!("http://{}{}", self.address, self.path)
    }
}

/// Trait for anything that can carry an [`ApiRequest`] to a backend.
///
/// # Architecture Note
/// Every typed client in [`crate::clients`] talks through this trait, so swapping
/// the real network for [`mock::MockTransport`](super::mock::MockTransport) needs
/// no change anywhere above this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the parsed JSON body.
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError>;
}

// =============================================================================
// 2. ERRORS
// =============================================================================

/// Failures below the envelope layer. None of these are retried.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("Transport build error: {0}")]
    Build(String),

    /// The host was unreachable, the connection dropped, or the call timed out.
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// The backend answered with a non-success status code.
    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The response body was not valid JSON.
    #[error("Response from {url} is not JSON: {message}")]
    Decode { url: String, message: String },
}

// =============================================================================
// 3. THE HTTP IMPLEMENTATION
// =============================================================================

/// Settings fixed when the transport is built.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    /// Skip every system proxy. The backends are addressed by raw IP and must
    /// never be reached through an HTTP proxy.
    pub bypass_proxy: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            bypass_proxy: true,
        }
    }
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().timeout(config.timeout);
        if config.bypass_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let url = request.url();
        debug!(method = %request.method, %url, body = ?request.body, "Sending");

        let mut builder = self.client.request(request.method, &url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| TransportError::Request {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Non-success status");
            return Err(TransportError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Decode {
                url,
                message: e.to_string(),
            })
    }
}
