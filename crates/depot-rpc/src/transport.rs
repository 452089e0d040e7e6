//! HTTP transport seam.
//!
//! The RPC layer only needs "POST this JSON with these headers and tell me
//! the status and body". [`HttpTransport`] is that contract;
//! [`ReqwestTransport`] is the production implementation.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::TransportError;

/// An outgoing HTTP POST.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: serde_json::Value,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What came back. `body` is `None` when the payload was not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Option<serde_json::Value>,
}

/// Anything that can carry a JSON-RPC request over HTTP.
///
/// Implementations resolve with a response for every HTTP status, and only
/// fail when no response was obtained at all.
pub trait HttpTransport: Send + Sync + 'static {
    fn post(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport. The timeout, if any, covers the whole exchange.
    pub fn new(timeout: Option<Duration>, user_agent: &str) -> Self {
        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            client: builder.build().unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client, using defaults: {}", e);
                reqwest::Client::new()
            }),
        }
    }

    /// Wrap an existing client (shared connection pool, custom TLS, ...).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::from_client(reqwest::Client::new())
    }
}

impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::new(format!("Invalid header name '{}': {}", name, e)))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                TransportError::new(format!("Invalid value for header '{}': {}", name, e))
            })?;
            headers.insert(header_name, header_value);
        }

        let body = serde_json::to_vec(&request.body)
            .map_err(|e| TransportError::new(format!("Failed to serialize request: {}", e)))?;

        let resp = self
            .client
            .post(&request.url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            })?;

        let status = resp.status().as_u16();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| TransportError::with_status(status, e.to_string()))?;

        Ok(HttpResponse {
            status,
            body: serde_json::from_slice(&bytes).ok(),
        })
    }
}
