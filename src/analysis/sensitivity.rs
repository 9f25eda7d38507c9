//! Electricity-price sensitivity.
//!
//! Sweeps a range of $/kWh prices for each miner and finds the price at
//! which daily profit turns negative.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fmt;
use tracing::{debug, warn};

use super::{CostAssumptions, MinerModel};
use crate::data::Transport;
use crate::engine::RoiCalculator;
use crate::types::{round_half_up, Payback};

/// Upper bound on the number of prices in one sweep.
pub const MAX_SWEEP_POINTS: usize = 1_000;

/// Inclusive range of electricity prices to evaluate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ElectricitySweep {
    pub start: Decimal,
    pub end: Decimal,
    pub step: Decimal,
}

impl Default for ElectricitySweep {
    fn default() -> Self {
        Self {
            start: dec!(0.00),
            end: dec!(0.10),
            step: dec!(0.01),
        }
    }
}

impl ElectricitySweep {
    /// Every price from `start` to `end` inclusive, at most
    /// `MAX_SWEEP_POINTS` of them. A non-positive step yields just `start`;
    /// `end < start` yields nothing.
    pub fn prices(&self) -> Vec<Decimal> {
        if self.step <= Decimal::ZERO {
            return vec![self.start];
        }
        let mut prices = Vec::new();
        let mut next = Some(self.start);
        while let Some(price) = next.filter(|p| *p <= self.end) {
            if prices.len() == MAX_SWEEP_POINTS {
                warn!(
                    start = %self.start,
                    end = %self.end,
                    step = %self.step,
                    max_points = MAX_SWEEP_POINTS,
                    "Electricity sweep truncated"
                );
                break;
            }
            prices.push(price);
            next = price.checked_add(self.step);
        }
        prices
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensitivityPoint {
    pub electricity_price: Decimal,
    pub daily_profit: Decimal,
    pub monthly_profit: Decimal,
    pub annual_profit: Decimal,
    pub payback: Payback,
    pub annual_return_percent: Decimal,
}

/// Profit of one miner across the sweep, ordered by price.
#[derive(Debug, Clone, PartialEq)]
pub struct SensitivityCurve {
    pub miner: String,
    pub points: Vec<SensitivityPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakEven {
    /// Last swept price with non-negative profit before it turns negative.
    AtPrice(Decimal),
    ProfitableThroughout,
    NeverProfitable,
}

impl fmt::Display for BreakEven {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakEven::AtPrice(p) => write!(f, "break-even at ${:.3}/kWh", round_half_up(*p, 3)),
            BreakEven::ProfitableThroughout => write!(f, "profitable across the whole range"),
            BreakEven::NeverProfitable => write!(f, "unprofitable across the whole range"),
        }
    }
}

/// Evaluate every miner at every price in the sweep, using the cached snapshot.
pub async fn sensitivity_sweep<T: Transport>(
    calc: &mut RoiCalculator<T>,
    miners: &[MinerModel],
    assumptions: &CostAssumptions,
    sweep: &ElectricitySweep,
) -> Vec<SensitivityCurve> {
    let prices = sweep.prices();
    let mut curves = Vec::with_capacity(miners.len());

    for miner in miners {
        let base = assumptions.inputs_for(miner);
        let mut points = Vec::with_capacity(prices.len());

        for &price in &prices {
            let mut inputs = base.clone();
            inputs.electricity_cost_per_kwh = price;
            if let Some(report) = calc.calculate_roi(&inputs, true).await {
                points.push(SensitivityPoint {
                    electricity_price: price,
                    daily_profit: report.daily_profit,
                    monthly_profit: report.monthly_profit,
                    annual_profit: report.annual_profit,
                    payback: report.payback,
                    annual_return_percent: report.annual_return_percent(),
                });
            }
        }

        if points.is_empty() {
            warn!(miner = %miner.name, "Sensitivity sweep produced no data");
            continue;
        }
        debug!(miner = %miner.name, points = points.len(), "Sensitivity curve computed");
        curves.push(SensitivityCurve {
            miner: miner.name.clone(),
            points,
        });
    }

    curves
}

/// First adjacent pair where profit goes from `>= 0` to `< 0`; the
/// break-even price reported is the lower (still profitable) one.
/// An empty curve counts as never profitable.
pub fn break_even_price(curve: &SensitivityCurve) -> BreakEven {
    let crossing = curve
        .points
        .windows(2)
        .find(|w| w[0].daily_profit >= Decimal::ZERO && w[1].daily_profit < Decimal::ZERO);

    if let Some(w) = crossing {
        return BreakEven::AtPrice(w[0].electricity_price);
    }

    if !curve.points.is_empty() && curve.points.iter().all(|p| p.daily_profit >= Decimal::ZERO) {
        BreakEven::ProfitableThroughout
    } else {
        BreakEven::NeverProfitable
    }
}
