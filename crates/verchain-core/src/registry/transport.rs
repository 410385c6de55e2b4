//! HTTP transport seam.

use anyhow::Context;
use async_trait::async_trait;
use url::Url;

/// Status and body of a registry response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single GET and returns whatever the server answered.
///
/// Implementations must not retry. Errors are transport failures only; any
/// response, successful or not, is returned as a [`RawResponse`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &Url) -> anyhow::Result<RawResponse>;
}

/// `reqwest`-backed transport used for real runs.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("verchain/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> anyhow::Result<RawResponse> {
        // Request URLs carry the credential; strip them from transport errors.
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|err| anyhow::anyhow!("request failed: {}", err.without_url()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| anyhow::anyhow!("failed to read response body: {}", err.without_url()))?;

        Ok(RawResponse { status, body })
    }
}
