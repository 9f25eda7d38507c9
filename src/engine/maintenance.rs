//! Yearly upkeep and depreciation allocations.
//!
//! Less efficient hardware (more W per TH) is cheaper per unit, so a given
//! budget buys more machines. More machines and older designs mean more
//! cleaning, repairs and parts. The base maintenance percentage is scaled
//! by an efficiency tier to reflect that.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;

/// Upper bound (inclusive) of the high-efficiency tier, in W/TH.
pub const HIGH_EFFICIENCY_MAX: Decimal = dec!(15);
/// Upper bound (inclusive) of the mid-efficiency tier, in W/TH.
pub const MID_EFFICIENCY_MAX: Decimal = dec!(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EfficiencyTier {
    High,
    Mid,
    Low,
}

impl EfficiencyTier {
    pub fn from_efficiency(w_per_th: Decimal) -> Self {
        if w_per_th <= HIGH_EFFICIENCY_MAX {
            EfficiencyTier::High
        } else if w_per_th <= MID_EFFICIENCY_MAX {
            EfficiencyTier::Mid
        } else {
            EfficiencyTier::Low
        }
    }

    pub fn coefficient(&self) -> Decimal {
        match self {
            EfficiencyTier::High => dec!(1.0),
            EfficiencyTier::Mid => dec!(1.3),
            EfficiencyTier::Low => dec!(1.6),
        }
    }
}

impl fmt::Display for EfficiencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EfficiencyTier::High => write!(f, "high (<=15 W/TH)"),
            EfficiencyTier::Mid => write!(f, "mid (15-20 W/TH)"),
            EfficiencyTier::Low => write!(f, "low (>20 W/TH)"),
        }
    }
}

/// Maintenance multiplier for a miner's efficiency: 1.0, 1.3 or 1.6.
pub fn maintenance_coefficient(w_per_th: Decimal) -> Decimal {
    EfficiencyTier::from_efficiency(w_per_th).coefficient()
}

/// Yearly maintenance in USD: `hardware_cost * base_percent / 100 * coefficient`.
pub fn adjusted_maintenance_cost(
    hardware_cost: Decimal,
    base_percent: Decimal,
    w_per_th: Decimal,
) -> Decimal {
    hardware_cost * (base_percent / dec!(100)) * maintenance_coefficient(w_per_th)
}

/// Straight-line yearly depreciation in USD.
pub fn annual_depreciation(hardware_cost: Decimal, depreciation_percent: Decimal) -> Decimal {
    hardware_cost * (depreciation_percent / dec!(100))
}
