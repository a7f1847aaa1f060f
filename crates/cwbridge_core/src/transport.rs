//! Raw access to the ConnectWise REST API

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::fmt::Debug;
use std::time::Duration;

use crate::{UpstreamCredentials, UpstreamError};

/// Per-request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Authenticated JSON requests against the API root.
///
/// Paths are relative to the API root (e.g. `/service/tickets`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamTransport: Send + Sync + Debug {
    async fn get(&self, path: &str, query: Vec<(String, String)>) -> Result<Value, UpstreamError>;

    async fn post(&self, path: &str, body: Value) -> Result<Value, UpstreamError>;

    async fn patch(&self, path: &str, body: Value) -> Result<Value, UpstreamError>;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    authorization: String,
}

impl HttpTransport {
    pub fn new(
        credentials: &UpstreamCredentials,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|cause| UpstreamError::ClientBuild { cause })?;

        Ok(Self {
            client,
            base_url: credentials.base_url(),
            authorization: credentials.authorization_header(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: String,
    ) -> Result<Value, UpstreamError> {
        let response = request
            .header(AUTHORIZATION, &self.authorization)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|cause| UpstreamError::Request {
                url: url.clone(),
                cause,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|cause| UpstreamError::Request {
            url: url.clone(),
            cause,
        })?;

        // 204 and friends
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|cause| UpstreamError::Decode { url, cause })
    }
}

#[async_trait]
impl UpstreamTransport for HttpTransport {
    async fn get(&self, path: &str, query: Vec<(String, String)>) -> Result<Value, UpstreamError> {
        let url = self.url(path);
        tracing::debug!("GET {} {:?}", url, query);
        let request = self.client.get(&url).query(&query);
        self.send(request, url).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, UpstreamError> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let request = self.client.post(&url).json(&body);
        self.send(request, url).await
    }

    async fn patch(&self, path: &str, body: Value) -> Result<Value, UpstreamError> {
        let url = self.url(path);
        tracing::debug!("PATCH {}", url);
        let request = self.client.patch(&url).json(&body);
        self.send(request, url).await
    }
}

impl Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
