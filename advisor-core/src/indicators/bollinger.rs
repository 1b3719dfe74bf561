//! Bollinger Bands.
//!
//! Middle band = SMA(window); upper/lower = middle ± multiplier ×
//! population standard deviation of the window. Buy at or below the lower
//! band, sell at or above the upper band (checked in that order).

use serde::{Deserialize, Serialize};

use crate::domain::{PriceSeries, SignalAction};
use crate::error::{CoreError, CoreResult};
use crate::math;

use super::{IndicatorResult, IndicatorSeries};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerParams {
    pub window: usize,
    pub multiplier: f64,
}

impl BollingerParams {
    pub fn new(window: usize, multiplier: f64) -> CoreResult<Self> {
        if window < 1 {
            return Err(CoreError::invalid_parameter("window", "must be >= 1"));
        }
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(CoreError::invalid_parameter(
                "multiplier",
                format!("must be finite and > 0, got {multiplier}"),
            ));
        }
        Ok(Self { window, multiplier })
    }
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            window: 20,
            multiplier: 2.0,
        }
    }
}

pub(super) fn evaluate(
    params: &BollingerParams,
    series: &PriceSeries,
) -> CoreResult<IndicatorResult> {
    let n = series.len();
    if n < params.window {
        return Err(CoreError::insufficient_data(
            format!("bollinger_{}", params.window),
            params.window,
            n,
        ));
    }
    let closes = series.closes();
    let w = params.window;
    let offset = w - 1;

    let mut upper = Vec::with_capacity(n - offset);
    let mut middle = Vec::with_capacity(n - offset);
    let mut lower = Vec::with_capacity(n - offset);
    let mut signals = Vec::with_capacity(n - offset);

    for i in offset..n {
        let window = &closes[i + 1 - w..=i];
        let mid = math::mean(window);
        let dev = math::std_dev_about(window, mid) * params.multiplier;
        let up = mid + dev;
        let lo = mid - dev;
        upper.push(up);
        middle.push(mid);
        lower.push(lo);

        let close = closes[i];
        signals.push(if close <= lo {
            SignalAction::Buy
        } else if close >= up {
            SignalAction::Sell
        } else {
            SignalAction::Hold
        });
    }

    Ok(IndicatorResult {
        offset,
        signals,
        series: IndicatorSeries::Bollinger {
            upper,
            middle,
            lower,
        },
    })
}

pub(super) fn describe(params: &BollingerParams, result: &IndicatorResult) -> String {
    let label = format!("BB({},{})", params.window, params.multiplier);
    let (upper, lower) = match &result.series {
        IndicatorSeries::Bollinger { upper, lower, .. } => (
            upper.last().copied().unwrap_or(f64::NAN),
            lower.last().copied().unwrap_or(f64::NAN),
        ),
        _ => (f64::NAN, f64::NAN),
    };
    match result.latest_signal() {
        SignalAction::Buy => format!("{label}: close at or below lower band {lower:.2}"),
        SignalAction::Sell => format!("{label}: close at or above upper band {upper:.2}"),
        SignalAction::Hold => {
            format!("{label}: close within bands [{lower:.2}, {upper:.2}]")
        }
    }
}
