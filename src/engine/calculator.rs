//! ROI calculator: the entry point consumed by presentation code.
//!
//! Fetches a market snapshot, runs the profitability engine, and reports
//! absence (rather than an error) when market data cannot be obtained.

use tracing::{error, info, warn};

use super::profitability;
use crate::data::fetcher::MarketDataFetcher;
use crate::data::Transport;
use crate::types::{round_half_up, MarketSnapshot, MiningInputs, ProfitabilityReport};

pub struct RoiCalculator<T: Transport> {
    fetcher: MarketDataFetcher<T>,
    last_market: Option<MarketSnapshot>,
}

impl<T: Transport> RoiCalculator<T> {
    pub fn new(fetcher: MarketDataFetcher<T>) -> Self {
        Self {
            fetcher,
            last_market: None,
        }
    }

    pub fn fetcher(&self) -> &MarketDataFetcher<T> {
        &self.fetcher
    }

    /// Market snapshot behind the most recent report.
    pub fn last_market(&self) -> Option<&MarketSnapshot> {
        self.last_market.as_ref()
    }

    /// Profitability for one scenario.
    ///
    /// `use_cache` reuses the last fetched price and difficulty. Leave it
    /// off for a single user-initiated calculation; batch comparisons turn
    /// it on so every scenario sees the same snapshot.
    ///
    /// Returns `None` when price or difficulty is unavailable. An
    /// unprofitable configuration is still a report, with `Payback::Never`.
    pub async fn calculate_roi(
        &mut self,
        inputs: &MiningInputs,
        use_cache: bool,
    ) -> Option<ProfitabilityReport> {
        info!(
            hashrate_th = %inputs.hashrate_th,
            power_watts = %inputs.power_watts,
            electricity = %inputs.electricity_cost_per_kwh,
            use_cache,
            "Starting ROI analysis"
        );

        let Some(market) = self.fetcher.snapshot(use_cache).await else {
            error!("BTC price or network difficulty unavailable, cannot compute ROI");
            return None;
        };

        let result = profitability::calculate(inputs, &market);
        self.last_market = Some(market);

        match result {
            Ok(report) => {
                if !report.is_profitable() {
                    warn!(
                        daily_profit = format!("${:.2}", round_half_up(report.daily_profit, 2)),
                        "Configuration is not profitable at current market conditions"
                    );
                }
                Some(report)
            }
            Err(e) => {
                error!(error = %e, "Profitability calculation failed");
                None
            }
        }
    }
}
