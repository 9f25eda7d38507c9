//! Shared types for the MINECALC estimator.
//!
//! Market data, caller-supplied mining parameters and the resulting
//! profitability report. The fetcher, engine and analysis modules all
//! depend on these without depending on each other.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Market snapshot
// ---------------------------------------------------------------------------

/// Price and difficulty observed at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// BTC/USD spot price.
    pub btc_price: Decimal,
    /// Network difficulty as reported by the chain explorer.
    pub network_difficulty: f64,
    pub fetched_at: DateTime<Utc>,
}

impl MarketSnapshot {
    pub fn new(btc_price: Decimal, network_difficulty: f64) -> Self {
        Self {
            btc_price,
            network_difficulty,
            fetched_at: Utc::now(),
        }
    }

    /// Snapshot of values observed at an earlier time.
    pub fn observed_at(btc_price: Decimal, network_difficulty: f64, fetched_at: DateTime<Utc>) -> Self {
        Self {
            btc_price,
            network_difficulty,
            fetched_at,
        }
    }
}

/// Round half away from zero to `dp` places. Precision formatting of a
/// `Decimal` truncates, so displayed figures go through this first.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for MarketSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BTC ${:.2} | difficulty {:.3e} | as of {}",
            round_half_up(self.btc_price, 2),
            self.network_difficulty,
            self.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"),
        )
    }
}

// ---------------------------------------------------------------------------
// Mining inputs
// ---------------------------------------------------------------------------

/// Everything the caller knows about a miner and its operating costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningInputs {
    /// Miner hashrate in TH/s.
    pub hashrate_th: Decimal,
    /// Wall power draw in watts.
    pub power_watts: Decimal,
    /// USD per kWh.
    pub electricity_cost_per_kwh: Decimal,
    /// Purchase price of the hardware in USD.
    pub hardware_cost: Decimal,
    pub pool_fee_percent: Decimal,
    pub maintenance_cost_yearly: Decimal,
    pub hardware_depreciation_yearly: Decimal,
    /// Block subsidy plus average fees, in BTC.
    pub block_reward_btc: Decimal,
    /// Share of the year the miner is actually running (1–100).
    pub annual_utilization_rate_percent: Decimal,
}

impl Default for MiningInputs {
    fn default() -> Self {
        Self {
            hashrate_th: dec!(200),
            power_watts: dec!(3500),
            electricity_cost_per_kwh: dec!(0.01),
            hardware_cost: dec!(4000),
            pool_fee_percent: dec!(2),
            maintenance_cost_yearly: Decimal::ZERO,
            hardware_depreciation_yearly: Decimal::ZERO,
            block_reward_btc: dec!(3.16),
            annual_utilization_rate_percent: dec!(100),
        }
    }
}

impl MiningInputs {
    /// Inputs for a miner with the remaining parameters left at their defaults
    /// (2% pool fee, no maintenance or depreciation, 3.16 BTC reward, full uptime).
    pub fn new(
        hashrate_th: Decimal,
        power_watts: Decimal,
        electricity_cost_per_kwh: Decimal,
        hardware_cost: Decimal,
    ) -> Self {
        Self {
            hashrate_th,
            power_watts,
            electricity_cost_per_kwh,
            hardware_cost,
            ..Default::default()
        }
    }

    /// Watts consumed per TH/s of hashrate. `None` for zero hashrate.
    pub fn efficiency_w_per_th(&self) -> Option<Decimal> {
        if self.hashrate_th.is_zero() {
            None
        } else {
            Some(self.power_watts / self.hashrate_th)
        }
    }
}

impl fmt::Display for MiningInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} TH/s @ {} W | ${}/kWh | hardware ${} | pool {}% | uptime {}%",
            self.hashrate_th,
            self.power_watts,
            self.electricity_cost_per_kwh,
            self.hardware_cost,
            self.pool_fee_percent,
            self.annual_utilization_rate_percent,
        )
    }
}

// ---------------------------------------------------------------------------
// Payback
// ---------------------------------------------------------------------------

/// Time to recover the hardware cost from daily profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payback {
    Days(Decimal),
    /// Daily profit is zero or negative; the hardware never pays for itself.
    Never,
}

impl Payback {
    pub fn days(&self) -> Option<Decimal> {
        match self {
            Payback::Days(d) => Some(*d),
            Payback::Never => None,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Payback::Never)
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payback::Days(d) => write!(f, "{:.1} days", round_half_up(*d, 1)),
            Payback::Never => write!(f, "never"),
        }
    }
}

// ---------------------------------------------------------------------------
// Profitability report
// ---------------------------------------------------------------------------

/// Flat set of metrics for one (inputs, market snapshot) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityReport {
    pub btc_price: Decimal,
    pub network_difficulty: f64,
    /// Estimated network hashrate in H/s.
    pub network_hashrate_hs: f64,
    pub utilization_percent: Decimal,

    /// BTC per day at 100% uptime, before pool fee.
    pub daily_btc_full: Decimal,
    /// BTC per day scaled by utilization, before pool fee.
    pub daily_btc_actual: Decimal,
    pub daily_btc_after_fee: Decimal,
    pub daily_revenue_usd: Decimal,

    pub daily_power_cost_full: Decimal,
    pub daily_power_cost_actual: Decimal,
    pub daily_maintenance_cost: Decimal,
    pub daily_depreciation: Decimal,
    pub daily_total_cost: Decimal,

    pub daily_profit: Decimal,
    pub monthly_profit: Decimal,
    pub annual_profit: Decimal,
    pub payback: Payback,

    pub pool_fee_percent: Decimal,
    pub maintenance_cost_yearly: Decimal,
    pub hardware_depreciation_yearly: Decimal,
}

impl ProfitabilityReport {
    pub fn is_profitable(&self) -> bool {
        self.daily_profit > Decimal::ZERO
    }

    pub fn payback_years(&self) -> Option<Decimal> {
        self.payback.days().map(|d| d / dec!(365))
    }

    /// Annualised return on the hardware: `365 / payback_days * 100`.
    /// Zero when the hardware never pays back.
    pub fn annual_return_percent(&self) -> Decimal {
        match self.payback {
            Payback::Days(d) if d > Decimal::ZERO => dec!(365) / d * dec!(100),
            _ => Decimal::ZERO,
        }
    }
}

impl fmt::Display for ProfitabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "revenue=${:.2}/d cost=${:.2}/d profit=${:.2}/d (${:.2}/yr) payback={}",
            round_half_up(self.daily_revenue_usd, 2),
            round_half_up(self.daily_total_cost, 2),
            round_half_up(self.daily_profit, 2),
            round_half_up(self.annual_profit, 2),
            self.payback,
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Why a single market data provider was skipped.
///
/// Never surfaced to callers of the fetcher; it only appears in logs.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Arithmetic failures in the profitability engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("network difficulty must be positive and finite, got {0}")]
    InvalidDifficulty(f64),

    #[error("{0} cannot be represented as a decimal")]
    Unrepresentable(&'static str),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
