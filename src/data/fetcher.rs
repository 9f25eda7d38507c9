//! Market data fetcher.
//!
//! Queries price providers in priority order and falls through on any
//! failure (network error, timeout, non-200 status, malformed payload).
//! The last good value of each quantity is kept in a `MarketCache` owned
//! by the fetcher. The cache is only read when the caller opts in, which
//! batch comparisons do so that many scenarios share one snapshot.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::difficulty::{parse_difficulty, DIFFICULTY_SOURCE};
use super::price::PriceProvider;
use super::{ReqwestTransport, Transport};
use crate::config::MarketDataConfig;
use crate::types::{FetchError, MarketSnapshot};

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Last successfully fetched value of each quantity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketCache {
    pub btc_price: Option<Decimal>,
    pub network_difficulty: Option<f64>,
    /// When either value was last refreshed from the network.
    pub updated_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

pub struct MarketDataFetcher<T: Transport> {
    transport: T,
    config: MarketDataConfig,
    cache: MarketCache,
}

impl MarketDataFetcher<ReqwestTransport> {
    /// Build a fetcher that talks to the real endpoints over HTTP.
    pub fn from_config(config: &MarketDataConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(
            Duration::from_secs(config.request_timeout_secs),
            &config.user_agent,
        )?;
        Ok(Self::new(transport, config.clone()))
    }
}

impl<T: Transport> MarketDataFetcher<T> {
    pub fn new(transport: T, config: MarketDataConfig) -> Self {
        Self {
            transport,
            config,
            cache: MarketCache::default(),
        }
    }

    pub fn cache(&self) -> &MarketCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache = MarketCache::default();
    }

    /// GET a URL and return the body of a 200 response.
    async fn request(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .transport
            .get(url)
            .await
            .map_err(|e| FetchError::Transport(format!("{e:#}")))?;

        debug!(url, status = resp.status, body = %resp.body, "Market data response");

        if !resp.is_success() {
            return Err(FetchError::Status(resp.status));
        }
        Ok(resp.body)
    }

    async fn fetch_price_from(&self, provider: PriceProvider) -> Result<Decimal, FetchError> {
        let body = self.request(provider.url(&self.config)).await?;
        provider.parse(&body)
    }

    /// Current BTC/USD price, or `None` if every provider failed.
    ///
    /// With `use_cache` set, a previously fetched price is returned
    /// without touching the network.
    pub async fn get_price(&mut self, use_cache: bool) -> Option<Decimal> {
        if use_cache {
            if let Some(price) = self.cache.btc_price {
                debug!(%price, "Using cached BTC price");
                return Some(price);
            }
        }

        for provider in PriceProvider::PRIORITY {
            debug!(provider = provider.name(), "Requesting BTC price");
            match self.fetch_price_from(provider).await {
                Ok(price) => {
                    info!(provider = provider.name(), %price, "BTC price fetched");
                    self.cache.btc_price = Some(price);
                    self.cache.updated_at = Some(Utc::now());
                    return Some(price);
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "Price provider failed, trying next");
                }
            }
        }

        error!("All price providers failed");
        None
    }

    /// Current network difficulty, or `None` if the provider failed.
    pub async fn get_difficulty(&mut self, use_cache: bool) -> Option<f64> {
        if use_cache {
            if let Some(difficulty) = self.cache.network_difficulty {
                debug!(difficulty, "Using cached network difficulty");
                return Some(difficulty);
            }
        }

        let result = match self.request(&self.config.difficulty_url).await {
            Ok(body) => parse_difficulty(&body),
            Err(e) => Err(e),
        };

        match result {
            Ok(difficulty) => {
                info!(source = DIFFICULTY_SOURCE, difficulty, "Network difficulty fetched");
                self.cache.network_difficulty = Some(difficulty);
                self.cache.updated_at = Some(Utc::now());
                Some(difficulty)
            }
            Err(e) => {
                error!(source = DIFFICULTY_SOURCE, error = %e, "Failed to fetch network difficulty");
                None
            }
        }
    }

    /// Price and difficulty together, stamped with the time they were
    /// last fetched. `None` if either is unavailable.
    pub async fn snapshot(&mut self, use_cache: bool) -> Option<MarketSnapshot> {
        let price = self.get_price(use_cache).await;
        let difficulty = self.get_difficulty(use_cache).await;
        let fetched_at = self.cache.updated_at.unwrap_or_else(Utc::now);
        match (price, difficulty) {
            (Some(p), Some(d)) => Some(MarketSnapshot::observed_at(p, d, fetched_at)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
