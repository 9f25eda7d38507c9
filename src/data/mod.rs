//! Market data providers.
//!
//! Defines the `Transport` seam used to reach external HTTP endpoints,
//! the per-provider payload parsers, and the fallback-aware fetcher
//! that turns them into a price and a difficulty.

pub mod difficulty;
pub mod fetcher;
pub mod price;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Status and body of a completed HTTP GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Only 200 counts; any other status, 2xx included, is a provider failure.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Abstraction over the HTTP client.
///
/// Errors returned here are network-level failures (DNS, connect,
/// timeout). A non-200 response is still `Ok` and is judged by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// `Transport` backed by a reqwest client with a fixed per-request timeout.
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to build market data HTTP client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))?;

        Ok(HttpResponse { status, body })
    }
}

/// A mock that answers every endpoint of the default config: Binance with
/// `price_body`, blockchain.info with `difficulty_body`, anything else 503.
#[cfg(test)]
pub(crate) fn mock_market(price_body: &str, difficulty_body: &str) -> MockTransport {
    let price_body = price_body.to_string();
    let difficulty_body = difficulty_body.to_string();
    let mut mock = MockTransport::new();
    mock.expect_get().returning(move |url: &str| {
        if url.contains("getdifficulty") {
            Ok(HttpResponse::ok(difficulty_body.clone()))
        } else if url.contains("binance") {
            Ok(HttpResponse::ok(price_body.clone()))
        } else {
            Ok(HttpResponse {
                status: 503,
                body: String::new(),
            })
        }
    });
    mock
}
