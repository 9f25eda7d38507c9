//! End-to-end: scripted market data through the calculator, the miner
//! comparison and the electricity sweep, down to rendered output.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use minecalc::analysis::{
    best_performers, break_even_price, compare_miners, sensitivity_sweep, BreakEven,
    CostAssumptions, ElectricitySweep, MinerModel,
};
use minecalc::config::MarketDataConfig;
use minecalc::data::fetcher::MarketDataFetcher;
use minecalc::engine::{adjusted_maintenance_cost, RoiCalculator};
use minecalc::report;
use minecalc::types::{MiningInputs, Payback};

use crate::scripted_transport::{Reply, ScriptedTransport};

fn calculator(t: &ScriptedTransport) -> RoiCalculator<ScriptedTransport> {
    RoiCalculator::new(MarketDataFetcher::new(t.clone(), MarketDataConfig::default()))
}

fn lineup() -> Vec<MinerModel> {
    vec![
        MinerModel::new("Antminer S21 pro", dec!(234), dec!(3510), dec!(3744)),
        MinerModel::new("Antminer S19k Pro", dec!(120), dec!(2760), dec!(840)),
        MinerModel::new("Custom", dec!(200), dec!(3500), dec!(4000)),
    ]
}

#[tokio::test]
async fn test_demo_scenario_end_to_end() {
    let t = ScriptedTransport::healthy();
    let mut calc = calculator(&t);
    let inputs = MiningInputs::new(dec!(200), dec!(3500), dec!(0.01), dec!(4000));

    let r = calc.calculate_roi(&inputs, false).await.expect("report");

    assert_eq!(r.btc_price, dec!(65000));
    assert_eq!(r.daily_power_cost_full, dec!(0.84));
    assert_eq!(r.daily_power_cost_actual, dec!(0.84));
    assert_eq!(r.daily_btc_actual, r.daily_btc_full);

    let btc = r.daily_btc_full.to_f64().unwrap();
    assert!(btc > 1.41e-4 && btc < 1.42e-4, "got {btc}");

    assert!(r.is_profitable());
    let days = r.payback.days().unwrap();
    assert!(days > dec!(480) && days < dec!(500), "got {days}");

    let text = report::render_report(&r);
    assert!(text.contains("$65,000.00"));
    assert!(text.contains("days"));
}

#[tokio::test]
async fn test_missing_price_yields_no_report() {
    let t = ScriptedTransport::new();
    t.script("getdifficulty", Reply::ok("90000000000000"));
    let mut calc = calculator(&t);

    let r = calc.calculate_roi(&MiningInputs::default(), false).await;
    assert!(r.is_none());
    // Three price providers attempted.
    assert_eq!(t.hits("binance") + t.hits("coingecko") + t.hits("okx"), 3);
}

#[tokio::test]
async fn test_expensive_power_reports_never_payback() {
    let t = ScriptedTransport::healthy();
    let mut calc = calculator(&t);
    let inputs = MiningInputs::new(dec!(200), dec!(3500), dec!(0.50), dec!(4000));

    let r = calc.calculate_roi(&inputs, false).await.expect("report");
    assert!(!r.is_profitable());
    assert_eq!(r.payback, Payback::Never);
    assert_eq!(report::format_payback(&r.payback), "never");
}

#[tokio::test]
async fn test_batch_reuses_single_snapshot() {
    let t = ScriptedTransport::healthy();
    let mut calc = calculator(&t);

    calc.calculate_roi(&MiningInputs::default(), false).await.expect("report");
    let after_first = t.request_count();

    let rows = compare_miners(&mut calc, &lineup(), &CostAssumptions::default()).await;
    let curves = sensitivity_sweep(
        &mut calc,
        &lineup(),
        &CostAssumptions::default(),
        &ElectricitySweep::default(),
    )
    .await;

    assert_eq!(rows.len(), 3);
    assert_eq!(curves.len(), 3);
    assert_eq!(t.request_count(), after_first);
}

#[tokio::test]
async fn test_comparison_applies_tiered_maintenance() {
    let t = ScriptedTransport::healthy();
    let mut calc = calculator(&t);
    let assumptions = CostAssumptions::default();

    let rows = compare_miners(&mut calc, &lineup(), &assumptions).await;

    for row in &rows {
        assert_eq!(
            row.report.maintenance_cost_yearly,
            adjusted_maintenance_cost(
                row.miner.cost,
                assumptions.maintenance_base_percent,
                row.miner.efficiency(),
            )
        );
    }
    // S19k Pro runs at 23 W/TH.
    assert_eq!(rows[1].maintenance_coefficient(), dec!(1.6));

    let best = best_performers(&rows).expect("leaders");
    assert_eq!(best.highest_daily_profit.miner, "Antminer S21 pro");
    assert!(best.fastest_payback.is_some());
    assert!(report::render_best(&best).contains("Antminer S21 pro"));
}

#[tokio::test]
async fn test_sweep_finds_break_even() {
    let t = ScriptedTransport::healthy();
    let mut calc = calculator(&t);
    let sweep = ElectricitySweep {
        start: Decimal::ZERO,
        end: dec!(0.20),
        step: dec!(0.01),
    };

    let curves = sensitivity_sweep(&mut calc, &lineup(), &CostAssumptions::default(), &sweep).await;
    let s19k = &curves[1];

    assert_eq!(s19k.points.len(), 21);
    assert!(s19k.points.windows(2).all(|w| w[1].daily_profit < w[0].daily_profit));
    match break_even_price(s19k) {
        BreakEven::AtPrice(p) => assert!(p > Decimal::ZERO && p < dec!(0.20), "got {p}"),
        other => panic!("expected a crossing, got {other:?}"),
    }

    let table = report::render_sensitivity(&curves);
    assert!(table.contains("Antminer S19k Pro"));
}
