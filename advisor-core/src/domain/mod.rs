//! Domain types: bars, series, signals, positions, trades.

pub mod bar;
pub mod position;
pub mod signal;
pub mod trade;

pub use bar::{PriceBar, PriceSeries};
pub use position::{Position, PositionSide};
pub use signal::{IndicatorVote, Signal, SignalAction};
pub use trade::{Trade, TradeType};
