//! PriceBar and PriceSeries — the fundamental market data units.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// OHLCV bar for a single ticker on a single day.
///
/// `close` is the canonical price for all indicator math and trade pricing.
/// Bars are immutable once produced by the data collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Basic OHLCV sanity check: high >= low, high bounds open/close, prices positive.
    pub fn is_sane(&self) -> bool {
        self.high.is_finite()
            && self.low.is_finite()
            && self.open.is_finite()
            && self.close.is_finite()
            && self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}

/// Ordered sequence of bars for one ticker.
///
/// Construction sorts ascending by date defensively — whatever order the
/// data collaborator hands over, the series the core computes on is
/// strictly increasing. Duplicate dates are rejected; missing trading days
/// are simply absent, never interpolated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(mut bars: Vec<PriceBar>) -> CoreResult<Self> {
        bars.sort_by_key(|b| b.date);
        for pair in bars.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(CoreError::invalid_parameter(
                    "price_data",
                    format!("duplicate bar date {}", pair[0].date),
                ));
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Close prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// The series restricted to bars `[0..=index]`.
    ///
    /// The simulator evaluates strategies on prefixes so that bar `i`'s
    /// decision can never see bar `i+1`.
    pub fn prefix(&self, index: usize) -> Self {
        let end = (index + 1).min(self.bars.len());
        Self {
            bars: self.bars[..end].to_vec(),
        }
    }
}
