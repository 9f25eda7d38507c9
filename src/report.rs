//! Plain-text rendering of reports for the terminal.

use rust_decimal::Decimal;
use std::fmt::Write;

use crate::analysis::{break_even_price, BestPerformers, MinerComparison, SensitivityCurve};
use crate::types::{round_half_up, MarketSnapshot, Payback, ProfitabilityReport};

/// Shown when market data could not be fetched from any provider.
pub const RETRY_PROMPT: &str =
    "Unable to fetch BTC price or network difficulty from any provider. Please check your connection and try again.";

/// Format a network hashrate given in H/s with an SI unit.
pub fn format_hashrate(hs: f64) -> String {
    const UNITS: &[(f64, &str)] = &[
        (1e21, "ZH/s"),
        (1e18, "EH/s"),
        (1e15, "PH/s"),
        (1e12, "TH/s"),
        (1e9, "GH/s"),
        (1e6, "MH/s"),
        (1e3, "kH/s"),
    ];

    for &(divisor, unit) in UNITS {
        if hs >= divisor {
            return format!("{:.2} {unit}", hs / divisor);
        }
    }
    format!("{hs:.0} H/s")
}

/// `$1,234.56` style, two decimals, with a leading minus for losses.
pub fn format_usd(value: Decimal) -> String {
    let cents = round_half_up(value, 2);
    let rounded = format!("{:.2}", cents.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if cents.is_sign_negative() && !cents.is_zero() { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

pub fn format_payback(payback: &Payback) -> String {
    match payback {
        Payback::Days(d) => format!("{:.1}", round_half_up(*d, 1)),
        Payback::Never => "never".to_string(),
    }
}

/// Full breakdown of a single scenario.
pub fn render_report(report: &ProfitabilityReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Profitability ===");
    let _ = writeln!(out, "BTC price:               {}", format_usd(report.btc_price));
    let _ = writeln!(out, "Network difficulty:      {:.3e}", report.network_difficulty);
    let _ = writeln!(out, "Network hashrate:        {}", format_hashrate(report.network_hashrate_hs));
    let _ = writeln!(out, "Utilization:             {:.1}%", round_half_up(report.utilization_percent, 1));
    let _ = writeln!(out, "Daily BTC (full load):   {:.8}", round_half_up(report.daily_btc_full, 8));
    let _ = writeln!(out, "Daily BTC (actual):      {:.8}", round_half_up(report.daily_btc_actual, 8));
    let _ = writeln!(out, "Daily BTC (after fee):   {:.8}", round_half_up(report.daily_btc_after_fee, 8));
    let _ = writeln!(out, "Daily revenue:           {}", format_usd(report.daily_revenue_usd));
    let _ = writeln!(out, "--- Costs (per day) ---");
    let _ = writeln!(
        out,
        "Electricity:             {} (full load {})",
        format_usd(report.daily_power_cost_actual),
        format_usd(report.daily_power_cost_full)
    );
    let _ = writeln!(out, "Maintenance:             {}", format_usd(report.daily_maintenance_cost));
    let _ = writeln!(out, "Depreciation:            {}", format_usd(report.daily_depreciation));
    let _ = writeln!(out, "Total:                   {}", format_usd(report.daily_total_cost));
    let _ = writeln!(out, "--- Profit ---");
    let _ = writeln!(out, "Daily:                   {}", format_usd(report.daily_profit));
    let _ = writeln!(out, "Monthly:                 {}", format_usd(report.monthly_profit));
    let _ = writeln!(out, "Annual:                  {}", format_usd(report.annual_profit));

    match (report.payback, report.payback_years()) {
        (Payback::Days(days), Some(years)) => {
            let _ = writeln!(
                out,
                "Payback:                 {:.1} days (~{:.1} years)",
                round_half_up(days, 1),
                round_half_up(years, 1),
            );
            let _ = writeln!(out, "Annual return:           {:.1}%", round_half_up(report.annual_return_percent(), 1));
        }
        _ => {
            let _ = writeln!(out, "Payback:                 never (not profitable at these settings)");
        }
    }
    out
}

/// One row per miner with the headline metrics.
pub fn render_comparison(rows: &[MinerComparison]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:>8} {:>7} {:>6} {:>5} {:>11} {:>10} {:>10} {:>10} {:>12} {:>9} {:>8}",
        "Model", "TH/s", "W", "W/TH", "Coef", "Hardware", "Rev/day", "Cost/day", "Profit/d", "Profit/yr", "Payback", "Return"
    );
    for row in rows {
        let r = &row.report;
        let _ = writeln!(
            out,
            "{:<24} {:>8.1} {:>7.0} {:>6.1} {:>4.1}x {:>11} {:>10} {:>10} {:>10} {:>12} {:>9} {:>7.1}%",
            row.miner.name,
            round_half_up(row.miner.hashrate_th, 1),
            round_half_up(row.miner.power_watts, 0),
            round_half_up(row.miner.efficiency(), 1),
            round_half_up(row.maintenance_coefficient(), 1),
            format_usd(row.miner.cost),
            format_usd(r.daily_revenue_usd),
            format_usd(r.daily_total_cost),
            format_usd(r.daily_profit),
            format_usd(r.annual_profit),
            format_payback(&r.payback),
            round_half_up(r.annual_return_percent(), 1),
        );
    }
    out
}

pub fn render_best(best: &BestPerformers) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Highest daily profit:  {} ({})",
        best.highest_daily_profit.miner,
        format_usd(best.highest_daily_profit.value)
    );
    let _ = writeln!(
        out,
        "Highest annual profit: {} ({})",
        best.highest_annual_profit.miner,
        format_usd(best.highest_annual_profit.value)
    );
    match &best.fastest_payback {
        Some(l) => {
            let _ = writeln!(
                out,
                "Fastest payback:       {} ({:.1} days)",
                l.miner,
                round_half_up(l.value, 1),
            );
        }
        None => {
            let _ = writeln!(out, "Fastest payback:       no profitable miner");
        }
    }
    let _ = writeln!(
        out,
        "Highest annual return: {} ({:.1}%)",
        best.highest_annual_return.miner,
        round_half_up(best.highest_annual_return.value, 1)
    );
    out
}

/// Daily profit per miner at each swept price, followed by break-even prices.
pub fn render_sensitivity(curves: &[SensitivityCurve]) -> String {
    let mut out = String::new();
    let Some(first) = curves.first() else {
        return out;
    };

    let _ = write!(out, "{:<24}", "$/kWh");
    for p in &first.points {
        let _ = write!(out, " {:>9.3}", round_half_up(p.electricity_price, 3));
    }
    let _ = writeln!(out);

    for curve in curves {
        let _ = write!(out, "{:<24}", curve.miner);
        for p in &curve.points {
            let _ = write!(out, " {:>9.2}", round_half_up(p.daily_profit, 2));
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "--- Break-even ---");
    for curve in curves {
        let _ = writeln!(out, "{:<24} {}", curve.miner, break_even_price(curve));
    }
    out
}

pub fn render_snapshot(snapshot: &MarketSnapshot) -> String {
    format!("Market: {snapshot}")
}
