//! Profitability engine: revenue, cost and payback arithmetic, plus the
//! ROI entry point that feeds it live market data.

pub mod calculator;
pub mod maintenance;
pub mod profitability;

pub use calculator::RoiCalculator;
pub use maintenance::{adjusted_maintenance_cost, annual_depreciation, maintenance_coefficient};
pub use profitability::calculate;
