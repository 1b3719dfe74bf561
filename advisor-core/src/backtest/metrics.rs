//! Performance metrics — pure functions over the daily value series and
//! trade log. Field names are the wire contract the API layer serializes.
//!
//! Every degenerate case (no trades, zero variance, zero elapsed time)
//! produces a defined 0.0, never NaN or an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Trade, TradeType};
use crate::math;

use super::DailyValue;

/// Trading days per year, for annualizing the Sharpe ratio.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Calendar days per year, for CAGR over elapsed calendar time.
const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub total_return: f64,
    pub cagr: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub total_trades: usize,
    pub profitable_trades: usize,
    pub average_return: f64,
    pub final_value: f64,
    pub initial_capital: f64,
}

impl PerformanceMetrics {
    /// Compute all metrics once, at the end of a run.
    ///
    /// `final_value` is the all-cash value after the forced close, so it can
    /// differ from the last daily snapshot by that trade's commission.
    pub fn compute(
        initial_capital: f64,
        final_value: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        daily_values: &[DailyValue],
        trades: &[Trade],
    ) -> Self {
        let sells: Vec<&Trade> = trades
            .iter()
            .filter(|t| t.trade_type == TradeType::Sell)
            .collect();
        let profitable_trades = sells.iter().filter(|t| t.is_profitable_sell()).count();
        let total_realized: f64 = sells.iter().filter_map(|t| t.realized_pnl).sum();

        let total_return = if initial_capital > 0.0 {
            (final_value - initial_capital) / initial_capital
        } else {
            0.0
        };
        let win_rate = if sells.is_empty() {
            0.0
        } else {
            profitable_trades as f64 / sells.len() as f64
        };
        let average_return = if sells.is_empty() || initial_capital <= 0.0 {
            0.0
        } else {
            total_realized / sells.len() as f64 / initial_capital
        };

        Self {
            total_return,
            cagr: cagr(initial_capital, final_value, start_date, end_date),
            sharpe_ratio: sharpe_ratio(daily_values),
            max_drawdown: max_drawdown(daily_values),
            win_rate,
            total_trades: trades.len(),
            profitable_trades,
            average_return,
            final_value,
            initial_capital,
        }
    }
}

/// Compound annual growth rate over elapsed calendar time.
///
/// 0.0 when no calendar time elapsed or either endpoint is non-positive
/// (the fractional power would be undefined).
pub fn cagr(initial: f64, final_value: f64, start: NaiveDate, end: NaiveDate) -> f64 {
    let years = (end - start).num_days() as f64 / DAYS_PER_YEAR;
    if years <= 0.0 || initial <= 0.0 || final_value <= 0.0 {
        return 0.0;
    }
    (final_value / initial).powf(1.0 / years) - 1.0
}

/// Annualized Sharpe ratio from daily portfolio returns, risk-free rate 0.
///
/// Uses population standard deviation. 0.0 with fewer than two daily values
/// or zero variance.
pub fn sharpe_ratio(daily_values: &[DailyValue]) -> f64 {
    let returns = daily_returns(daily_values);
    if returns.is_empty() {
        return 0.0;
    }
    let mean = math::mean(&returns);
    let std = math::std_dev_about(&returns, mean);
    if std < 1e-15 {
        return 0.0;
    }
    (mean / std) * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Most negative peak-to-trough fraction over the daily value series.
///
/// 0.0 for an empty or never-declining series; otherwise negative.
pub fn max_drawdown(daily_values: &[DailyValue]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for dv in daily_values {
        let value = dv.portfolio_value;
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let dd = (value - peak) / peak;
            if dd < worst {
                worst = dd;
            }
        }
    }
    worst
}

/// Day-over-day fractional changes of portfolio value.
pub fn daily_returns(daily_values: &[DailyValue]) -> Vec<f64> {
    daily_values
        .windows(2)
        .map(|w| {
            if w[0].portfolio_value > 0.0 {
                (w[1].portfolio_value - w[0].portfolio_value) / w[0].portfolio_value
            } else {
                0.0
            }
        })
        .collect()
}
