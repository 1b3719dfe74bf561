//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices; buy/sell on the close crossing the
//! average. Warm-up: window - 1 bars.

use serde::{Deserialize, Serialize};

use crate::domain::{PriceSeries, SignalAction};
use crate::error::{CoreError, CoreResult};
use crate::math;

use super::{cross_signals, IndicatorResult, IndicatorSeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmaParams {
    pub window: usize,
}

impl SmaParams {
    pub fn new(window: usize) -> CoreResult<Self> {
        if window < 1 {
            return Err(CoreError::invalid_parameter("window", "must be >= 1"));
        }
        Ok(Self { window })
    }
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { window: 20 }
    }
}

pub(super) fn evaluate(params: &SmaParams, series: &PriceSeries) -> CoreResult<IndicatorResult> {
    if series.len() < params.window {
        return Err(CoreError::insufficient_data(
            format!("sma_{}", params.window),
            params.window,
            series.len(),
        ));
    }
    let closes = series.closes();
    let values = math::rolling_mean(&closes, params.window);
    let offset = params.window - 1;
    let signals = cross_signals(&closes, &values, offset);
    Ok(IndicatorResult {
        offset,
        signals,
        series: IndicatorSeries::Single(values),
    })
}

pub(super) fn describe(params: &SmaParams, result: &IndicatorResult) -> String {
    let level = result.latest_value().unwrap_or(f64::NAN);
    match result.latest_signal() {
        SignalAction::Buy => format!(
            "SMA({}): close crossed above the {}-day average ({level:.2})",
            params.window, params.window
        ),
        SignalAction::Sell => format!(
            "SMA({}): close crossed below the {}-day average ({level:.2})",
            params.window, params.window
        ),
        SignalAction::Hold => format!(
            "SMA({}): no cross against the {}-day average ({level:.2})",
            params.window, params.window
        ),
    }
}
