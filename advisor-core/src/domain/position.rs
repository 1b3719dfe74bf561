//! Position — simulation-local holding state.
//!
//! Owned exclusively by one simulator run; mutated only through
//! `increase`/`decrease`. A full close destroys the position (the simulator
//! drops it), so stale share counts can never leak into the next trade.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSide {
    Long,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub avg_cost: f64,
    pub shares: f64,
    pub side: PositionSide,
}

impl Position {
    pub fn open(shares: f64, price: f64) -> Self {
        Self {
            avg_cost: price,
            shares,
            side: PositionSide::Long,
        }
    }

    /// Add shares at `price`, re-weighting the average cost.
    pub fn increase(&mut self, shares: f64, price: f64) {
        let total = self.shares + shares;
        if total > 0.0 {
            self.avg_cost = (self.avg_cost * self.shares + price * shares) / total;
        }
        self.shares = total;
    }

    /// Remove shares; average cost is unchanged. Returns the realized P&L
    /// for the removed shares at `price`.
    pub fn decrease(&mut self, shares: f64, price: f64) -> f64 {
        let sold = shares.min(self.shares);
        self.shares -= sold;
        (price - self.avg_cost) * sold
    }

    pub fn market_value(&self, price: f64) -> f64 {
        self.shares * price
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        (price - self.avg_cost) * self.shares
    }

    pub fn is_closed(&self) -> bool {
        self.shares <= 0.0
    }
}
