//! Scenario analysis across miner models and electricity prices.
//!
//! Everything here runs the engine repeatedly against one cached market
//! snapshot: a side-by-side comparison of miners under shared cost
//! assumptions, and an electricity-price sweep with break-even detection.

pub mod comparison;
pub mod sensitivity;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::engine::maintenance::{adjusted_maintenance_cost, annual_depreciation};
use crate::types::MiningInputs;

pub use comparison::{best_performers, compare_miners, BestPerformers, MinerComparison};
pub use sensitivity::{break_even_price, sensitivity_sweep, BreakEven, ElectricitySweep, SensitivityCurve};

// ---------------------------------------------------------------------------
// Miner models
// ---------------------------------------------------------------------------

/// Spec sheet of a miner model, as listed under `[[miners]]` in config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MinerModel {
    pub name: String,
    pub hashrate_th: Decimal,
    pub power_watts: Decimal,
    /// Purchase price in USD.
    pub cost: Decimal,
    /// Vendor-stated efficiency. Derived from power and hashrate when absent.
    #[serde(default)]
    pub efficiency_w_per_th: Option<Decimal>,
    #[serde(default)]
    pub cost_per_th: Option<Decimal>,
}

impl MinerModel {
    pub fn new(name: &str, hashrate_th: Decimal, power_watts: Decimal, cost: Decimal) -> Self {
        Self {
            name: name.to_string(),
            hashrate_th,
            power_watts,
            cost,
            efficiency_w_per_th: None,
            cost_per_th: None,
        }
    }

    /// W per TH/s. A zero-hashrate model falls into the least efficient tier.
    pub fn efficiency(&self) -> Decimal {
        self.efficiency_w_per_th.unwrap_or_else(|| {
            self.power_watts
                .checked_div(self.hashrate_th)
                .unwrap_or(Decimal::MAX)
        })
    }

    /// USD per TH/s.
    pub fn cost_per_th(&self) -> Decimal {
        self.cost_per_th
            .unwrap_or_else(|| self.cost.checked_div(self.hashrate_th).unwrap_or(Decimal::ZERO))
    }
}

// ---------------------------------------------------------------------------
// Cost assumptions
// ---------------------------------------------------------------------------

/// Operating assumptions shared by every miner in a comparison.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CostAssumptions {
    pub electricity_cost_kwh: Decimal,
    pub block_reward_btc: Decimal,
    pub pool_fee_percent: Decimal,
    /// Yearly maintenance as a percentage of hardware cost, before the
    /// efficiency coefficient is applied.
    pub maintenance_base_percent: Decimal,
    /// Yearly depreciation as a percentage of hardware cost.
    pub depreciation_percent: Decimal,
    pub utilization_percent: Decimal,
}

impl Default for CostAssumptions {
    fn default() -> Self {
        Self {
            electricity_cost_kwh: dec!(0.01),
            block_reward_btc: dec!(3.16),
            pool_fee_percent: dec!(2.0),
            maintenance_base_percent: dec!(6.0),
            depreciation_percent: dec!(20.0),
            utilization_percent: dec!(75.0),
        }
    }
}

impl CostAssumptions {
    /// Engine inputs for a miner under these assumptions, with maintenance
    /// adjusted for the miner's efficiency.
    pub fn inputs_for(&self, miner: &MinerModel) -> MiningInputs {
        MiningInputs {
            hashrate_th: miner.hashrate_th,
            power_watts: miner.power_watts,
            electricity_cost_per_kwh: self.electricity_cost_kwh,
            hardware_cost: miner.cost,
            pool_fee_percent: self.pool_fee_percent,
            maintenance_cost_yearly: adjusted_maintenance_cost(
                miner.cost,
                self.maintenance_base_percent,
                miner.efficiency(),
            ),
            hardware_depreciation_yearly: annual_depreciation(miner.cost, self.depreciation_percent),
            block_reward_btc: self.block_reward_btc,
            annual_utilization_rate_percent: self.utilization_percent,
        }
    }
}
