//! Profitability engine.
//!
//! Pure arithmetic from (inputs, market snapshot) to a report. Money is
//! carried in `Decimal`; only the difficulty-derived network hashrate and
//! the miner's share of it are computed in `f64`.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{EngineError, MarketSnapshot, MiningInputs, Payback, ProfitabilityReport};

/// Hashes needed on average per unit of difficulty.
pub const HASHES_PER_DIFFICULTY: f64 = 4_294_967_296.0; // 2^32
/// Target block interval in seconds.
pub const BLOCK_INTERVAL_SECS: f64 = 600.0;
pub const BLOCKS_PER_DAY: Decimal = dec!(144);
pub const DAYS_PER_MONTH: Decimal = dec!(30);
pub const DAYS_PER_YEAR: Decimal = dec!(365);

const HASHES_PER_TH: f64 = 1e12;

/// Network hashrate (H/s) implied by a difficulty.
pub fn network_hashrate(difficulty: f64) -> f64 {
    difficulty * HASHES_PER_DIFFICULTY / BLOCK_INTERVAL_SECS
}

/// Expected BTC per day at full uptime, before pool fee.
pub fn daily_btc_full(
    hashrate_th: Decimal,
    difficulty: f64,
    block_reward_btc: Decimal,
) -> Result<Decimal, EngineError> {
    if !difficulty.is_finite() || difficulty <= 0.0 {
        return Err(EngineError::InvalidDifficulty(difficulty));
    }

    let hashrate_hs = hashrate_th
        .to_f64()
        .ok_or(EngineError::Unrepresentable("hashrate"))?
        * HASHES_PER_TH;
    let share = hashrate_hs / network_hashrate(difficulty);
    let share = Decimal::from_f64(share).ok_or(EngineError::Unrepresentable("hash share"))?;

    Ok(share * BLOCKS_PER_DAY * block_reward_btc)
}

/// Electricity cost per day at full uptime.
pub fn daily_power_cost(power_watts: Decimal, electricity_cost_per_kwh: Decimal) -> Decimal {
    power_watts * dec!(24) / dec!(1000) * electricity_cost_per_kwh
}

/// Hardware cost divided by daily profit, or `Never` if profit is not positive.
pub fn payback(hardware_cost: Decimal, daily_profit: Decimal) -> Payback {
    if daily_profit <= Decimal::ZERO {
        return Payback::Never;
    }
    // A vanishingly small profit overflows the division; that is "never" in practice.
    hardware_cost
        .checked_div(daily_profit)
        .map(Payback::Days)
        .unwrap_or(Payback::Never)
}

/// Compute the full report.
///
/// Utilization scales BTC yield and electricity. Maintenance and
/// depreciation are yearly allocations and do not depend on uptime.
pub fn calculate(
    inputs: &MiningInputs,
    market: &MarketSnapshot,
) -> Result<ProfitabilityReport, EngineError> {
    let utilization = inputs.annual_utilization_rate_percent / dec!(100);

    let network_hashrate_hs = network_hashrate(market.network_difficulty);
    let daily_btc_full = daily_btc_full(
        inputs.hashrate_th,
        market.network_difficulty,
        inputs.block_reward_btc,
    )?;
    let daily_btc_actual = daily_btc_full * utilization;
    let daily_btc_after_fee = daily_btc_actual * (Decimal::ONE - inputs.pool_fee_percent / dec!(100));
    let daily_revenue_usd = daily_btc_after_fee * market.btc_price;

    let daily_power_cost_full = daily_power_cost(inputs.power_watts, inputs.electricity_cost_per_kwh);
    let daily_power_cost_actual = daily_power_cost_full * utilization;
    let daily_maintenance_cost = inputs.maintenance_cost_yearly / DAYS_PER_YEAR;
    let daily_depreciation = inputs.hardware_depreciation_yearly / DAYS_PER_YEAR;
    let daily_total_cost = daily_power_cost_actual + daily_maintenance_cost + daily_depreciation;

    let daily_profit = daily_revenue_usd - daily_total_cost;

    Ok(ProfitabilityReport {
        btc_price: market.btc_price,
        network_difficulty: market.network_difficulty,
        network_hashrate_hs,
        utilization_percent: inputs.annual_utilization_rate_percent,
        daily_btc_full,
        daily_btc_actual,
        daily_btc_after_fee,
        daily_revenue_usd,
        daily_power_cost_full,
        daily_power_cost_actual,
        daily_maintenance_cost,
        daily_depreciation,
        daily_total_cost,
        daily_profit,
        monthly_profit: daily_profit * DAYS_PER_MONTH,
        annual_profit: daily_profit * DAYS_PER_YEAR,
        payback: payback(inputs.hardware_cost, daily_profit),
        pool_fee_percent: inputs.pool_fee_percent,
        maintenance_cost_yearly: inputs.maintenance_cost_yearly,
        hardware_depreciation_yearly: inputs.hardware_depreciation_yearly,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
