//! BTC/USD price providers.
//!
//! Three public ticker endpoints, tried in a fixed priority order:
//!
//! - Binance `api/v3/ticker/price?symbol=BTCUSDT` → `{"symbol":"BTCUSDT","price":"67012.34"}`
//! - CoinGecko `api/v3/simple/price?ids=bitcoin&vs_currencies=usd` → `{"bitcoin":{"usd":67012.3}}`
//! - OKX `api/v5/market/ticker?instId=BTC-USDT` → `{"code":"0","data":[{"last":"67012.3",...}]}`
//!
//! None of them require a key. Each has its own payload shape, so each
//! variant carries its own parser.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::config::MarketDataConfig;
use crate::types::FetchError;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct BinanceTicker {
    price: String,
}

#[derive(Debug, Deserialize)]
struct CoinGeckoPrice {
    bitcoin: CoinGeckoQuote,
}

#[derive(Debug, Deserialize)]
struct CoinGeckoQuote {
    usd: serde_json::Number,
}

#[derive(Debug, Deserialize)]
struct OkxTicker {
    #[serde(default)]
    data: Vec<OkxTick>,
}

#[derive(Debug, Deserialize)]
struct OkxTick {
    last: String,
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceProvider {
    Binance,
    CoinGecko,
    Okx,
}

impl PriceProvider {
    /// Order in which providers are tried. The first well-formed price wins.
    pub const PRIORITY: [PriceProvider; 3] =
        [PriceProvider::Binance, PriceProvider::CoinGecko, PriceProvider::Okx];

    pub fn name(&self) -> &'static str {
        match self {
            PriceProvider::Binance => "binance",
            PriceProvider::CoinGecko => "coingecko",
            PriceProvider::Okx => "okx",
        }
    }

    pub fn url<'a>(&self, config: &'a MarketDataConfig) -> &'a str {
        match self {
            PriceProvider::Binance => &config.binance_url,
            PriceProvider::CoinGecko => &config.coingecko_url,
            PriceProvider::Okx => &config.okx_url,
        }
    }

    /// Extract a positive USD price from a response body.
    pub fn parse(&self, body: &str) -> Result<Decimal, FetchError> {
        let price = match self {
            PriceProvider::Binance => {
                let t: BinanceTicker = serde_json::from_str(body)
                    .map_err(|e| FetchError::Malformed(format!("binance ticker: {e}")))?;
                parse_decimal(&t.price)?
            }
            PriceProvider::CoinGecko => {
                let p: CoinGeckoPrice = serde_json::from_str(body)
                    .map_err(|e| FetchError::Malformed(format!("coingecko price: {e}")))?;
                parse_decimal(&p.bitcoin.usd.to_string())?
            }
            PriceProvider::Okx => {
                let t: OkxTicker = serde_json::from_str(body)
                    .map_err(|e| FetchError::Malformed(format!("okx ticker: {e}")))?;
                let first = t
                    .data
                    .first()
                    .ok_or_else(|| FetchError::Malformed("okx ticker: empty data".into()))?;
                parse_decimal(&first.last)?
            }
        };

        if price <= Decimal::ZERO {
            return Err(FetchError::Malformed(format!("non-positive price {price}")));
        }
        Ok(price)
    }
}

impl fmt::Display for PriceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parse a plain or scientific-notation number into a Decimal.
fn parse_decimal(raw: &str) -> Result<Decimal, FetchError> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|e| FetchError::Malformed(format!("'{raw}' is not a number: {e}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
