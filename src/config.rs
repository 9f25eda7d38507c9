//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section carries serde defaults, so a partial file (or no file at
//! all, via `AppConfig::default()`) still yields a usable configuration.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;

use crate::analysis::sensitivity::ElectricitySweep;
use crate::analysis::{CostAssumptions, MinerModel};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub calculator: CalculatorConfig,
    #[serde(default)]
    pub market_data: MarketDataConfig,
    /// Cost assumptions applied to every miner in comparisons.
    #[serde(default)]
    pub defaults: CostAssumptions,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub miners: Vec<MinerModel>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CalculatorConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Parameters for the standalone demo run.
    #[serde(default)]
    pub demo: DemoConfig,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            demo: DemoConfig::default(),
        }
    }
}

fn default_name() -> String {
    "MINECALC".to_string()
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DemoConfig {
    pub hashrate_th: Decimal,
    pub power_watts: Decimal,
    pub electricity_cost_kwh: Decimal,
    pub hardware_cost: Decimal,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            hashrate_th: dec!(200),
            power_watts: dec!(3500),
            electricity_cost_kwh: dec!(0.01),
            hardware_cost: dec!(4000),
        }
    }
}

/// Market data endpoints, in the order they are tried for price.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MarketDataConfig {
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub binance_url: String,
    pub coingecko_url: String,
    pub okx_url: String,
    pub difficulty_url: String,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            user_agent: "MINECALC/0.1.0".to_string(),
            binance_url: "https://api.binance.com/api/v3/ticker/price?symbol=BTCUSDT".to_string(),
            coingecko_url:
                "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd"
                    .to_string(),
            okx_url: "https://www.okx.com/api/v5/market/ticker?instId=BTC-USDT".to_string(),
            difficulty_url: "https://blockchain.info/q/getdifficulty".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AnalysisConfig {
    /// Miner names (from `[[miners]]`) included in comparison and sweep.
    /// Empty means every configured miner.
    #[serde(default)]
    pub selected_miners: Vec<String>,
    #[serde(default)]
    pub electricity_sweep: ElectricitySweep,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// Miners selected for analysis, in config order. Unknown names are ignored.
    pub fn selected_miners(&self) -> Vec<MinerModel> {
        if self.analysis.selected_miners.is_empty() {
            return self.miners.clone();
        }
        self.miners
            .iter()
            .filter(|m| self.analysis.selected_miners.iter().any(|s| s == &m.name))
            .cloned()
            .collect()
    }

    /// Look up a configured miner by name.
    pub fn miner(&self, name: &str) -> Option<&MinerModel> {
        self.miners.iter().find(|m| m.name == name)
    }
}
