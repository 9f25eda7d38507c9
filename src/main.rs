//! MINECALC: Bitcoin mining profitability estimator
//!
//! Entry point. Loads configuration, initialises structured logging,
//! runs the demo scenario against live market data, then compares the
//! selected miner models and sweeps electricity prices.

use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

use minecalc::analysis::{best_performers, compare_miners, sensitivity_sweep};
use minecalc::config::AppConfig;
use minecalc::data::fetcher::MarketDataFetcher;
use minecalc::engine::RoiCalculator;
use minecalc::report;
use minecalc::types::MiningInputs;

const CONFIG_PATH: &str = "config.toml";

const BANNER: &str = r#"
 __  __ ___ _  _ ___ ___   _   _    ___
|  \/  |_ _| \| | __/ __| /_\ | |  / __|
| |\/| || || .` | _| (__ / _ \| |_| (__
|_|  |_|___|_|\_|___\___/_/ \_\____\___|

  Bitcoin mining profitability estimator
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let cfg = if Path::new(CONFIG_PATH).exists() {
        AppConfig::load(CONFIG_PATH)?
    } else {
        warn!(path = CONFIG_PATH, "No config file found, using built-in defaults");
        AppConfig::default()
    };

    println!("{BANNER}");
    info!(
        name = %cfg.calculator.name,
        miners = cfg.miners.len(),
        timeout_secs = cfg.market_data.request_timeout_secs,
        "MINECALC starting up"
    );

    let fetcher = MarketDataFetcher::from_config(&cfg.market_data)?;
    let mut calc = RoiCalculator::new(fetcher);

    // -- Single scenario (always fresh market data) -----------------------

    let demo = &cfg.calculator.demo;
    let inputs = MiningInputs::new(
        demo.hashrate_th,
        demo.power_watts,
        demo.electricity_cost_kwh,
        demo.hardware_cost,
    );
    println!("Scenario: {inputs}");

    let Some(result) = calc.calculate_roi(&inputs, false).await else {
        println!("{}", report::RETRY_PROMPT);
        return Ok(());
    };
    if let Some(market) = calc.last_market() {
        println!("{}", report::render_snapshot(market));
    }
    println!("{}", report::render_report(&result));

    // -- Comparison and sensitivity (cached snapshot) ---------------------

    let miners = cfg.selected_miners();
    if miners.is_empty() {
        info!("No miners configured for comparison");
        return Ok(());
    }

    let rows = compare_miners(&mut calc, &miners, &cfg.defaults).await;
    if rows.is_empty() {
        println!("{}", report::RETRY_PROMPT);
        return Ok(());
    }
    println!("=== Miner comparison ({} selected) ===", miners.len());
    println!("{}", report::render_comparison(&rows));
    if let Some(best) = best_performers(&rows) {
        println!("{}", report::render_best(&best));
    }

    let curves = sensitivity_sweep(&mut calc, &miners, &cfg.defaults, &cfg.analysis.electricity_sweep).await;
    println!("=== Electricity price sensitivity (daily profit, USD) ===");
    println!("{}", report::render_sensitivity(&curves));

    info!("MINECALC finished");
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("minecalc=info"));

    let json_logging = std::env::var("MINECALC_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
