//! Criterion benchmarks for the hot paths.
//!
//! 1. Indicator batch evaluation (all five kinds over a long series)
//! 2. Strategy evaluation (vote + confidence + reason)
//! 3. Full simulator run (prefix evaluation per bar dominates)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use advisor_core::backtest::{BacktestConfig, BacktestSimulator};
use advisor_core::domain::{PriceBar, PriceSeries};
use advisor_core::indicators::{
    BollingerParams, EmaParams, IndicatorConfig, MacdParams, RsiParams, SmaParams,
};
use advisor_core::strategy::{StrategyEngine, StrategyLibrary};
use chrono::NaiveDate;

fn make_bars(n: usize) -> Vec<PriceBar> {
    let base_date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0 + i as f64 * 0.01;
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000 + (i as u64 % 500_000),
            }
        })
        .collect()
}

fn all_indicators() -> Vec<IndicatorConfig> {
    vec![
        IndicatorConfig::Sma(SmaParams { window: 20 }),
        IndicatorConfig::Ema(EmaParams { window: 20 }),
        IndicatorConfig::Rsi(RsiParams::default()),
        IndicatorConfig::Macd(MacdParams::default()),
        IndicatorConfig::Bollinger(BollingerParams::default()),
    ]
}

fn bench_indicator_batch(c: &mut Criterion) {
    let series = PriceSeries::new(make_bars(2000)).unwrap();
    let indicators = all_indicators();

    c.bench_function("indicator_batch_2000_bars", |b| {
        b.iter(|| {
            for config in &indicators {
                black_box(config.evaluate(black_box(&series)).unwrap());
            }
        })
    });
}

fn bench_strategy_evaluate(c: &mut Criterion) {
    let series = PriceSeries::new(make_bars(500)).unwrap();
    let lib = StrategyLibrary::builtin();
    let engine = StrategyEngine::new(lib.lookup("Trend Following").unwrap().clone());

    c.bench_function("strategy_evaluate_500_bars", |b| {
        b.iter(|| black_box(engine.evaluate("BENCH", black_box(&series)).unwrap()))
    });
}

fn bench_simulator(c: &mut Criterion) {
    let lib = StrategyLibrary::builtin();
    let mut group = c.benchmark_group("simulator_run");
    for n in [250usize, 500] {
        let bars = make_bars(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &bars, |b, bars| {
            b.iter(|| {
                let config = BacktestConfig::from_key(
                    &lib,
                    "Trend Following",
                    "BENCH",
                    bars.clone(),
                    100_000.0,
                )
                .unwrap();
                black_box(BacktestSimulator::new(config).run().unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_indicator_batch,
    bench_strategy_evaluate,
    bench_simulator
);
criterion_main!(benches);
