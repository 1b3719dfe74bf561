//! Signal types — the decision vocabulary shared by indicators, the
//! strategy engine, and the API layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-bar decision emitted by an indicator or a whole strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalAction {
    Buy,
    Hold,
    Sell,
}

impl SignalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalAction::Buy => "buy",
            SignalAction::Hold => "hold",
            SignalAction::Sell => "sell",
        }
    }
}

/// One indicator's contribution to a combined signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorVote {
    /// Indicator label, e.g. `"sma_20"` or `"macd_12_26_9"`.
    pub indicator: String,
    pub signal: SignalAction,
    /// Latest primary value (RSI level, SMA level, MACD histogram, ...).
    /// None when the indicator had insufficient data and was substituted
    /// with Hold.
    pub value: Option<f64>,
    /// Fixed-format explanation line, reproducible across runs.
    pub detail: String,
}

/// Combined decision for one ticker at one point in time.
///
/// Produced fresh on every evaluation; the core never persists these.
/// `as_of` is the date of the last bar used, so identical inputs yield
/// identical signals bit for bit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub ticker: String,
    pub signal: SignalAction,
    /// Stability-weighted agreement in [0, 1].
    pub confidence: f64,
    pub reason: String,
    #[serde(rename = "perIndicatorBreakdown")]
    pub breakdown: Vec<IndicatorVote>,
    /// Date of the last bar used for this evaluation.
    #[serde(rename = "timestamp")]
    pub as_of: NaiveDate,
}
