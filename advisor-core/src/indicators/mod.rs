//! Indicator engine — five indicator kinds, one evaluation path each.
//!
//! Indicator kind is a closed enum, not a string-keyed factory: unknown
//! kinds cannot exist at runtime and a missing match arm is a compile
//! error. Parameters are validated once at construction, never clamped
//! inside a computation call.
//!
//! Output alignment: every result covers a suffix of the input series.
//! `offset` is the number of leading input bars with no value, so
//! `signals[j]` describes input bar `offset + j`. EMA is the deliberate
//! exception with `offset == 0` (see `math::exponential_smoothing`).

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::BollingerParams;
pub use ema::EmaParams;
pub use macd::MacdParams;
pub use rsi::RsiParams;
pub use sma::SmaParams;

use serde::{Deserialize, Serialize};

use crate::domain::{PriceSeries, SignalAction};
use crate::error::CoreResult;

/// Configuration for one indicator, carried by a `StrategyConfig`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
pub enum IndicatorConfig {
    #[serde(rename = "SMA")]
    Sma(SmaParams),
    #[serde(rename = "EMA")]
    Ema(EmaParams),
    #[serde(rename = "RSI")]
    Rsi(RsiParams),
    #[serde(rename = "MACD")]
    Macd(MacdParams),
    #[serde(rename = "BOLLINGER")]
    Bollinger(BollingerParams),
}

impl IndicatorConfig {
    /// Stable label, e.g. `"sma_20"`, `"macd_12_26_9"`, `"bollinger_20_2"`.
    pub fn label(&self) -> String {
        match self {
            IndicatorConfig::Sma(p) => format!("sma_{}", p.window),
            IndicatorConfig::Ema(p) => format!("ema_{}", p.window),
            IndicatorConfig::Rsi(p) => format!("rsi_{}", p.window),
            IndicatorConfig::Macd(p) => format!("macd_{}_{}_{}", p.fast, p.slow, p.signal),
            IndicatorConfig::Bollinger(p) => {
                format!("bollinger_{}_{}", p.window, p.multiplier)
            }
        }
    }

    /// The indicator's dominant window, used for simulator warm-up sizing.
    pub fn window(&self) -> usize {
        match self {
            IndicatorConfig::Sma(p) => p.window,
            IndicatorConfig::Ema(p) => p.window,
            IndicatorConfig::Rsi(p) => p.window,
            IndicatorConfig::Macd(p) => p.slow.max(p.fast).max(p.signal),
            IndicatorConfig::Bollinger(p) => p.window,
        }
    }

    /// Minimum input bars before `evaluate` produces output.
    pub fn min_bars(&self) -> usize {
        match self {
            IndicatorConfig::Sma(p) => p.window,
            IndicatorConfig::Ema(p) => p.window,
            IndicatorConfig::Rsi(p) => p.window + 1,
            IndicatorConfig::Macd(p) => p.slow.max(p.signal) + 1,
            IndicatorConfig::Bollinger(p) => p.window,
        }
    }

    /// Compute values and per-bar signals over the series.
    ///
    /// Fails with `InsufficientData` when the series is shorter than
    /// `min_bars()` — never a silent partial result.
    pub fn evaluate(&self, series: &PriceSeries) -> CoreResult<IndicatorResult> {
        match self {
            IndicatorConfig::Sma(p) => sma::evaluate(p, series),
            IndicatorConfig::Ema(p) => ema::evaluate(p, series),
            IndicatorConfig::Rsi(p) => rsi::evaluate(p, series),
            IndicatorConfig::Macd(p) => macd::evaluate(p, series),
            IndicatorConfig::Bollinger(p) => bollinger::evaluate(p, series),
        }
    }

    /// Fixed-format one-line explanation of the latest signal.
    pub fn describe(&self, result: &IndicatorResult) -> String {
        match self {
            IndicatorConfig::Sma(p) => sma::describe(p, result),
            IndicatorConfig::Ema(p) => ema::describe(p, result),
            IndicatorConfig::Rsi(p) => rsi::describe(p, result),
            IndicatorConfig::Macd(p) => macd::describe(p, result),
            IndicatorConfig::Bollinger(p) => bollinger::describe(p, result),
        }
    }
}

/// Value series shape, per indicator family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndicatorSeries {
    /// SMA, EMA, RSI: one value per covered bar.
    Single(Vec<f64>),
    /// MACD: the two lines are full input length; the histogram starts
    /// `signal - 1` bars later and is that much shorter.
    Macd {
        macd: Vec<f64>,
        signal: Vec<f64>,
        histogram: Vec<f64>,
    },
    /// Bollinger: three bands, equal length.
    Bollinger {
        upper: Vec<f64>,
        middle: Vec<f64>,
        lower: Vec<f64>,
    },
}

/// Result of evaluating one indicator over one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorResult {
    /// Number of leading input bars not covered by `signals`.
    pub offset: usize,
    /// One decision per covered bar; `signals[j]` is for input bar
    /// `offset + j`.
    pub signals: Vec<SignalAction>,
    pub series: IndicatorSeries,
}

impl IndicatorResult {
    /// The decision for the most recent bar.
    pub fn latest_signal(&self) -> SignalAction {
        self.signals.last().copied().unwrap_or(SignalAction::Hold)
    }

    /// The most recent primary value (single series value, MACD histogram,
    /// Bollinger middle band).
    pub fn latest_value(&self) -> Option<f64> {
        match &self.series {
            IndicatorSeries::Single(v) => v.last().copied(),
            IndicatorSeries::Macd { histogram, .. } => histogram.last().copied(),
            IndicatorSeries::Bollinger { middle, .. } => middle.last().copied(),
        }
    }

    /// Trailing slice of the signal history, newest last.
    pub fn recent_signals(&self, max: usize) -> &[SignalAction] {
        let start = self.signals.len().saturating_sub(max);
        &self.signals[start..]
    }
}

/// Cross-rule signal derivation shared by the SMA and EMA indicators.
///
/// `line[j]` corresponds to `closes[offset + j]`. A bar signals Buy when
/// the close crosses from at-or-below the line to above it, Sell on the
/// reverse cross, Hold otherwise. The first covered bar is Hold — there is
/// no prior bar to compare against.
pub(crate) fn cross_signals(closes: &[f64], line: &[f64], offset: usize) -> Vec<SignalAction> {
    let mut signals = Vec::with_capacity(line.len());
    for j in 0..line.len() {
        if j == 0 {
            signals.push(SignalAction::Hold);
            continue;
        }
        let i = offset + j;
        let (close, prev_close) = (closes[i], closes[i - 1]);
        let (level, prev_level) = (line[j], line[j - 1]);
        let action = if prev_close <= prev_level && close > level {
            SignalAction::Buy
        } else if prev_close >= prev_level && close < level {
            SignalAction::Sell
        } else {
            SignalAction::Hold
        };
        signals.push(action);
    }
    signals
}
