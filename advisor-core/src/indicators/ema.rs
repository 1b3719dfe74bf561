//! Exponential Moving Average (EMA).
//!
//! Smoothing seeded with the first close, so the output covers every input
//! bar (offset 0) — the one indicator without warm-up truncation. The
//! cross rule matches SMA's.

use serde::{Deserialize, Serialize};

use crate::domain::{PriceSeries, SignalAction};
use crate::error::{CoreError, CoreResult};
use crate::math;

use super::{cross_signals, IndicatorResult, IndicatorSeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmaParams {
    pub window: usize,
}

impl EmaParams {
    pub fn new(window: usize) -> CoreResult<Self> {
        if window < 1 {
            return Err(CoreError::invalid_parameter("window", "must be >= 1"));
        }
        Ok(Self { window })
    }
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { window: 20 }
    }
}

pub(super) fn evaluate(params: &EmaParams, series: &PriceSeries) -> CoreResult<IndicatorResult> {
    if series.len() < params.window {
        return Err(CoreError::insufficient_data(
            format!("ema_{}", params.window),
            params.window,
            series.len(),
        ));
    }
    let closes = series.closes();
    let values = math::exponential_smoothing(&closes, params.window);
    let signals = cross_signals(&closes, &values, 0);
    Ok(IndicatorResult {
        offset: 0,
        signals,
        series: IndicatorSeries::Single(values),
    })
}

pub(super) fn describe(params: &EmaParams, result: &IndicatorResult) -> String {
    let level = result.latest_value().unwrap_or(f64::NAN);
    match result.latest_signal() {
        SignalAction::Buy => format!(
            "EMA({}): close crossed above the exponential average ({level:.2})",
            params.window
        ),
        SignalAction::Sell => format!(
            "EMA({}): close crossed below the exponential average ({level:.2})",
            params.window
        ),
        SignalAction::Hold => format!(
            "EMA({}): no cross against the exponential average ({level:.2})",
            params.window
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::make_series;

    #[test]
    fn rejects_zero_window() {
        assert!(EmaParams::new(0).is_err());
    }

    #[test]
    fn output_covers_every_input_bar() {
        let series = make_series(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let result = evaluate(&EmaParams::new(3).unwrap(), &series).unwrap();
        assert_eq!(result.offset, 0);
        assert_eq!(result.signals.len(), 5);
        match &result.series {
            IndicatorSeries::Single(values) => assert_eq!(values.len(), 5),
            other => panic!("unexpected series shape: {other:?}"),
        }
    }

    #[test]
    fn known_values_alpha_half() {
        // window 3 → alpha 0.5; seeded with the first close.
        // 10, 0.5*12+0.5*10 = 11, 0.5*14+0.5*11 = 12.5
        let series = make_series(&[10.0, 12.0, 14.0]);
        let result = evaluate(&EmaParams::new(3).unwrap(), &series).unwrap();
        match &result.series {
            IndicatorSeries::Single(values) => {
                assert!((values[0] - 10.0).abs() < 1e-10);
                assert!((values[1] - 11.0).abs() < 1e-10);
                assert!((values[2] - 12.5).abs() < 1e-10);
            }
            other => panic!("unexpected series shape: {other:?}"),
        }
    }

    #[test]
    fn too_few_bars_is_insufficient_data() {
        let series = make_series(&[10.0, 11.0]);
        let err = evaluate(&EmaParams::new(5).unwrap(), &series).unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn flat_series_converges_to_price_and_holds() {
        let series = make_series(&[100.0; 25]);
        let result = evaluate(&EmaParams::default(), &series).unwrap();
        assert!(result.signals.iter().all(|&s| s == SignalAction::Hold));
        match &result.series {
            IndicatorSeries::Single(values) => {
                assert!(values.iter().all(|v| (v - 100.0).abs() < 1e-10));
            }
            other => panic!("unexpected series shape: {other:?}"),
        }
    }

    #[test]
    fn dip_and_recovery_fires_buy() {
        let series = make_series(&[100.0, 100.0, 100.0, 80.0, 80.0, 130.0]);
        let result = evaluate(&EmaParams::new(3).unwrap(), &series).unwrap();
        assert_eq!(result.latest_signal(), SignalAction::Buy);
    }
}
