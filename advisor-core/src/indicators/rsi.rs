//! Relative Strength Index (RSI).
//!
//! Simple (non-exponential) trailing-window averaging of day-over-day
//! gains and losses: RS = avg_gain / avg_loss, RSI = 100 - 100/(1 + RS).
//! Warm-up: window bars (one delta per bar pair).
//!
//! Division-by-zero policy: no losses and no gains → 50 (flat market reads
//! neutral); no losses → 100; no gains → 0.

use serde::{Deserialize, Serialize};

use crate::domain::{PriceSeries, SignalAction};
use crate::error::{CoreError, CoreResult};

use super::{IndicatorResult, IndicatorSeries};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiParams {
    pub window: usize,
    pub overbought: f64,
    pub oversold: f64,
}

impl RsiParams {
    pub fn new(window: usize, overbought: f64, oversold: f64) -> CoreResult<Self> {
        if window < 1 {
            return Err(CoreError::invalid_parameter("window", "must be >= 1"));
        }
        if !oversold.is_finite() || !overbought.is_finite() {
            return Err(CoreError::invalid_parameter(
                "thresholds",
                "must be finite",
            ));
        }
        if !(0.0 < oversold && oversold < overbought && overbought < 100.0) {
            return Err(CoreError::invalid_parameter(
                "thresholds",
                format!("require 0 < oversold < overbought < 100, got {oversold}/{overbought}"),
            ));
        }
        Ok(Self {
            window,
            overbought,
            oversold,
        })
    }
}

impl Default for RsiParams {
    fn default() -> Self {
        Self {
            window: 14,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

pub(super) fn evaluate(params: &RsiParams, series: &PriceSeries) -> CoreResult<IndicatorResult> {
    let n = series.len();
    if n < params.window + 1 {
        return Err(CoreError::insufficient_data(
            format!("rsi_{}", params.window),
            params.window + 1,
            n,
        ));
    }
    let closes = series.closes();
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    let w = params.window;
    let mut values = Vec::with_capacity(n - w);
    let mut signals = Vec::with_capacity(n - w);
    for i in w..n {
        // Trailing window of the last `w` deltas ending at bar i.
        let window = &deltas[i - w..i];
        let mut gain_sum = 0.0;
        let mut loss_sum = 0.0;
        for &d in window {
            if d > 0.0 {
                gain_sum += d;
            } else {
                loss_sum -= d;
            }
        }
        let avg_gain = gain_sum / w as f64;
        let avg_loss = loss_sum / w as f64;
        let rsi = relative_strength_index(avg_gain, avg_loss);
        values.push(rsi);
        signals.push(if rsi < params.oversold {
            SignalAction::Buy
        } else if rsi > params.overbought {
            SignalAction::Sell
        } else {
            SignalAction::Hold
        });
    }

    Ok(IndicatorResult {
        offset: w,
        signals,
        series: IndicatorSeries::Single(values),
    })
}

fn relative_strength_index(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

pub(super) fn describe(params: &RsiParams, result: &IndicatorResult) -> String {
    let rsi = result.latest_value().unwrap_or(f64::NAN);
    match result.latest_signal() {
        SignalAction::Buy => format!(
            "RSI({}): {rsi:.2} below oversold threshold {:.0}",
            params.window, params.oversold
        ),
        SignalAction::Sell => format!(
            "RSI({}): {rsi:.2} above overbought threshold {:.0}",
            params.window, params.overbought
        ),
        SignalAction::Hold => format!(
            "RSI({}): {rsi:.2} within [{:.0}, {:.0}]",
            params.window, params.oversold, params.overbought
        ),
    }
}
