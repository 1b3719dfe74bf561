//! Trade — append-only log entry produced by the simulator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

/// One executed simulated trade.
///
/// `realized_pnl` is present on sells only; `reason` carries the forced
/// close annotation at the end of a run. Field names are the wire contract
/// the API layer serializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    pub price: f64,
    pub quantity: f64,
    /// Gross notional: `price * quantity`.
    pub value: f64,
    #[serde(rename = "realizedPnL", skip_serializing_if = "Option::is_none")]
    pub realized_pnl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Trade {
    pub fn is_profitable_sell(&self) -> bool {
        self.trade_type == TradeType::Sell && self.realized_pnl.map_or(false, |p| p > 0.0)
    }
}
