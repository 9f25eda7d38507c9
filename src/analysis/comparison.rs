//! Side-by-side comparison of miner models.

use rust_decimal::Decimal;
use tracing::{info, warn};

use super::{CostAssumptions, MinerModel};
use crate::data::Transport;
use crate::engine::maintenance::EfficiencyTier;
use crate::engine::RoiCalculator;
use crate::types::ProfitabilityReport;

/// One miner's result under the shared assumptions.
#[derive(Debug, Clone)]
pub struct MinerComparison {
    pub miner: MinerModel,
    pub tier: EfficiencyTier,
    pub report: ProfitabilityReport,
}

impl MinerComparison {
    pub fn maintenance_coefficient(&self) -> Decimal {
        self.tier.coefficient()
    }
}

/// The miner leading on some metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Leader {
    pub miner: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BestPerformers {
    pub highest_daily_profit: Leader,
    pub highest_annual_profit: Leader,
    /// `None` when no miner is profitable.
    pub fastest_payback: Option<Leader>,
    pub highest_annual_return: Leader,
}

/// Run every miner through the engine against the cached market snapshot.
/// Miners whose report is unavailable are skipped.
pub async fn compare_miners<T: Transport>(
    calc: &mut RoiCalculator<T>,
    miners: &[MinerModel],
    assumptions: &CostAssumptions,
) -> Vec<MinerComparison> {
    let mut rows = Vec::with_capacity(miners.len());

    for miner in miners {
        let inputs = assumptions.inputs_for(miner);
        match calc.calculate_roi(&inputs, true).await {
            Some(report) => rows.push(MinerComparison {
                miner: miner.clone(),
                tier: EfficiencyTier::from_efficiency(miner.efficiency()),
                report,
            }),
            None => warn!(miner = %miner.name, "No report for miner, skipping"),
        }
    }

    info!(requested = miners.len(), compared = rows.len(), "Miner comparison complete");
    rows
}

/// Leaders on each headline metric. Ties go to the miner listed first.
pub fn best_performers(rows: &[MinerComparison]) -> Option<BestPerformers> {
    let leader = |row: &MinerComparison, value: Decimal| Leader {
        miner: row.miner.name.clone(),
        value,
    };

    // `max_by_key` keeps the last maximum; reversing makes it the first.
    let daily = rows.iter().rev().max_by_key(|r| r.report.daily_profit)?;
    let annual = rows.iter().rev().max_by_key(|r| r.report.annual_profit)?;
    let annual_return = rows.iter().rev().max_by_key(|r| r.report.annual_return_percent())?;
    let fastest = rows
        .iter()
        .filter_map(|r| r.report.payback.days().map(|d| (r, d)))
        .min_by_key(|(_, d)| *d);

    Some(BestPerformers {
        highest_daily_profit: leader(daily, daily.report.daily_profit),
        highest_annual_profit: leader(annual, annual.report.annual_profit),
        fastest_payback: fastest.map(|(r, d)| leader(r, d)),
        highest_annual_return: leader(annual_return, annual_return.report.annual_return_percent()),
    })
}
