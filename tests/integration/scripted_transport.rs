//! Scripted transport for integration testing.
//!
//! Provides a deterministic `Transport` implementation that answers each
//! URL from a programmable table and records every request, all in-memory
//! with no network access.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use minecalc::data::{HttpResponse, Transport};

pub const BINANCE_OK: &str = r#"{"symbol":"BTCUSDT","price":"65000.00"}"#;
pub const COINGECKO_OK: &str = r#"{"bitcoin":{"usd":64950.5}}"#;
pub const OKX_OK: &str = r#"{"code":"0","msg":"","data":[{"instId":"BTC-USDT","last":"64900.1"}]}"#;
pub const DIFFICULTY_OK: &str = "90000000000000";

/// What a scripted endpoint does when requested.
#[derive(Clone)]
pub enum Reply {
    Respond(HttpResponse),
    Fail(String),
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Reply::Respond(HttpResponse::ok(body))
    }

    pub fn status(code: u16) -> Self {
        Reply::Respond(HttpResponse {
            status: code,
            body: String::new(),
        })
    }

    pub fn fail(msg: &str) -> Self {
        Reply::Fail(msg.to_string())
    }
}

/// A scripted market data transport.
///
/// Replies are keyed by a substring of the URL. Unscripted URLs fail as
/// if the host were unreachable. The request log is shared, so clones
/// handed to a fetcher can be inspected from test code.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    replies: Arc<Mutex<HashMap<String, Reply>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every provider healthy.
    pub fn healthy() -> Self {
        let t = Self::new();
        t.script("binance", Reply::ok(BINANCE_OK));
        t.script("coingecko", Reply::ok(COINGECKO_OK));
        t.script("okx", Reply::ok(OKX_OK));
        t.script("getdifficulty", Reply::ok(DIFFICULTY_OK));
        t
    }

    /// Set (or replace) the reply for URLs containing `needle`.
    pub fn script(&self, needle: &str, reply: Reply) {
        self.replies.lock().unwrap().insert(needle.to_string(), reply);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of requests whose URL contains `needle`.
    pub fn hits(&self, needle: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.contains(needle))
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(url.to_string());

        let reply = self
            .replies
            .lock()
            .unwrap()
            .iter()
            .find(|(needle, _)| url.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Respond(resp)) => Ok(resp),
            Some(Reply::Fail(msg)) => Err(anyhow!(msg)),
            None => Err(anyhow!("no route to host for {url}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_reply_and_log() {
        let t = ScriptedTransport::healthy();
        let resp = t.get("https://api.binance.com/api/v3/ticker/price").await.unwrap();
        assert_eq!(resp.body, BINANCE_OK);
        assert_eq!(t.request_count(), 1);
        assert_eq!(t.hits("binance"), 1);
    }

    #[tokio::test]
    async fn test_unscripted_url_fails() {
        let t = ScriptedTransport::new();
        let err = t.get("https://example.com").await.unwrap_err();
        assert!(err.to_string().contains("no route"));
        assert_eq!(t.requests(), vec!["https://example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_clones_share_log() {
        let t = ScriptedTransport::healthy();
        let handle = t.clone();
        t.get("https://blockchain.info/q/getdifficulty").await.unwrap();
        assert_eq!(handle.hits("getdifficulty"), 1);
    }
}
