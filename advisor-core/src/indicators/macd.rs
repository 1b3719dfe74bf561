//! Moving Average Convergence Divergence (MACD).
//!
//! macd line = EMA(fast) - EMA(slow), element-wise over the full-length
//! smoothed series; signal line = EMA(macd, signal); histogram = macd -
//! signal, defined only once the signal line has seen `signal` terms, so it
//! starts `signal - 1` bars later and is that much shorter than the lines.
//!
//! Buy when the macd line crosses above the signal line, sell on the
//! reverse cross.

use serde::{Deserialize, Serialize};

use crate::domain::{PriceSeries, SignalAction};
use crate::error::{CoreError, CoreResult};
use crate::math;

use super::{IndicatorResult, IndicatorSeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl MacdParams {
    pub fn new(fast: usize, slow: usize, signal: usize) -> CoreResult<Self> {
        if fast < 1 || slow < 1 || signal < 1 {
            return Err(CoreError::invalid_parameter(
                "periods",
                "must all be >= 1",
            ));
        }
        if fast >= slow {
            return Err(CoreError::invalid_parameter(
                "fast",
                format!("fast period {fast} must be shorter than slow period {slow}"),
            ));
        }
        Ok(Self { fast, slow, signal })
    }
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

pub(super) fn evaluate(params: &MacdParams, series: &PriceSeries) -> CoreResult<IndicatorResult> {
    let n = series.len();
    let required = params.slow.max(params.signal) + 1;
    if n < required {
        return Err(CoreError::insufficient_data(
            format!("macd_{}_{}_{}", params.fast, params.slow, params.signal),
            required,
            n,
        ));
    }
    let closes = series.closes();
    let ema_fast = math::exponential_smoothing(&closes, params.fast);
    let ema_slow = math::exponential_smoothing(&closes, params.slow);
    let macd: Vec<f64> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = math::exponential_smoothing(&macd, params.signal);

    let offset = params.signal - 1;
    let mut histogram = Vec::with_capacity(n - offset);
    let mut signals = Vec::with_capacity(n - offset);
    for k in 0..(n - offset) {
        let i = k + offset;
        histogram.push(macd[i] - signal_line[i]);
        let action = if i == 0 {
            SignalAction::Hold
        } else if macd[i - 1] <= signal_line[i - 1] && macd[i] > signal_line[i] {
            SignalAction::Buy
        } else if macd[i - 1] >= signal_line[i - 1] && macd[i] < signal_line[i] {
            SignalAction::Sell
        } else {
            SignalAction::Hold
        };
        signals.push(action);
    }

    Ok(IndicatorResult {
        offset,
        signals,
        series: IndicatorSeries::Macd {
            macd,
            signal: signal_line,
            histogram,
        },
    })
}

pub(super) fn describe(params: &MacdParams, result: &IndicatorResult) -> String {
    let histogram = result.latest_value().unwrap_or(f64::NAN);
    let label = format!("MACD({},{},{})", params.fast, params.slow, params.signal);
    match result.latest_signal() {
        SignalAction::Buy => {
            format!("{label}: macd line crossed above signal line (histogram {histogram:.2})")
        }
        SignalAction::Sell => {
            format!("{label}: macd line crossed below signal line (histogram {histogram:.2})")
        }
        SignalAction::Hold => format!("{label}: no crossover (histogram {histogram:.2})"),
    }
}
