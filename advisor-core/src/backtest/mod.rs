//! Backtest simulator and performance metrics.

pub mod metrics;
pub mod simulator;

pub use metrics::PerformanceMetrics;
pub use simulator::{BacktestConfig, BacktestResult, BacktestSimulator, SimulatorState};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// End-of-day portfolio snapshot, recorded for every simulated bar whether
/// or not a trade occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyValue {
    pub date: NaiveDate,
    pub cash: f64,
    pub shares: f64,
    pub price: f64,
    pub portfolio_value: f64,
}
