//! Provider fallback order and cache behaviour of the market data fetcher.

use rust_decimal_macros::dec;

use minecalc::config::MarketDataConfig;
use minecalc::data::fetcher::MarketDataFetcher;
use minecalc::data::HttpResponse;

use crate::scripted_transport::{Reply, ScriptedTransport};

fn fetcher(t: &ScriptedTransport) -> MarketDataFetcher<ScriptedTransport> {
    MarketDataFetcher::new(t.clone(), MarketDataConfig::default())
}

#[tokio::test]
async fn test_malformed_primary_uses_secondary_and_caches_it() {
    let t = ScriptedTransport::healthy();
    t.script("binance", Reply::ok(r#"{"symbol":"BTCUSDT""#));
    let mut f = fetcher(&t);

    assert_eq!(f.get_price(false).await, Some(dec!(64950.5)));
    assert_eq!(f.cache().btc_price, Some(dec!(64950.5)));
    assert_eq!(t.hits("binance"), 1);
    assert_eq!(t.hits("coingecko"), 1);
    assert_eq!(t.hits("okx"), 0);
}

#[tokio::test]
async fn test_providers_tried_in_priority_order() {
    let t = ScriptedTransport::new();
    t.script("binance", Reply::status(418));
    t.script("coingecko", Reply::fail("timed out"));
    t.script("okx", Reply::status(500));
    let mut f = fetcher(&t);

    assert_eq!(f.get_price(false).await, None);
    let order: Vec<_> = t
        .requests()
        .iter()
        .map(|u| {
            if u.contains("binance") {
                "binance"
            } else if u.contains("coingecko") {
                "coingecko"
            } else {
                "okx"
            }
        })
        .collect();
    assert_eq!(order, vec!["binance", "coingecko", "okx"]);
}

#[tokio::test]
async fn test_partial_content_primary_is_skipped() {
    let t = ScriptedTransport::healthy();
    t.script(
        "binance",
        Reply::Respond(HttpResponse {
            status: 203,
            body: r#"{"symbol":"BTCUSDT","price":"1.00"}"#.to_string(),
        }),
    );
    let mut f = fetcher(&t);

    assert_eq!(f.get_price(false).await, Some(dec!(64950.5)));
    assert_eq!(t.hits("coingecko"), 1);
}

#[tokio::test]
async fn test_cached_price_issues_no_requests() {
    let t = ScriptedTransport::healthy();
    let mut f = fetcher(&t);

    let first = f.get_price(false).await;
    let before = t.request_count();
    let second = f.get_price(true).await;

    assert_eq!(t.request_count(), before);
    assert_eq!(second, first);
}

#[tokio::test]
async fn test_fresh_fetch_overwrites_cache() {
    let t = ScriptedTransport::healthy();
    let mut f = fetcher(&t);
    assert_eq!(f.get_price(false).await, Some(dec!(65000)));

    t.script("binance", Reply::status(503));
    assert_eq!(f.get_price(false).await, Some(dec!(64950.5)));
    assert_eq!(f.cache().btc_price, Some(dec!(64950.5)));
}

#[tokio::test]
async fn test_difficulty_has_no_fallback() {
    let t = ScriptedTransport::healthy();
    t.script("getdifficulty", Reply::ok("<html>502 Bad Gateway</html>"));
    let mut f = fetcher(&t);

    assert_eq!(f.get_difficulty(false).await, None);
    assert_eq!(t.request_count(), 1);
}

#[tokio::test]
async fn test_snapshot_with_only_tertiary_price() {
    let t = ScriptedTransport::healthy();
    t.script("binance", Reply::fail("connection reset"));
    t.script("coingecko", Reply::ok(r#"{"bitcoin":{}}"#));
    let mut f = fetcher(&t);

    let snap = f.snapshot(false).await.unwrap();
    assert_eq!(snap.btc_price, dec!(64900.1));
    assert_eq!(snap.network_difficulty, 9.0e13);
    assert_eq!(f.cache().btc_price, Some(dec!(64900.1)));
}
