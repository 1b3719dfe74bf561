//! Collaborator interfaces — the seams where the web shell feeds the core.
//!
//! The core consumes a fully materialized `PriceSeries`, never a stream.
//! Fetch timing, caching, and rate limits are the provider's problem; the
//! core re-sorts whatever it is handed (see `PriceSeries::new`) and trusts
//! nothing else about it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::PriceSeries;
use crate::error::CoreResult;

/// Bar granularity offered by a price data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceInterval {
    Daily,
    Weekly,
    Monthly,
}

impl Default for PriceInterval {
    fn default() -> Self {
        Self::Daily
    }
}

/// Source of historical OHLCV data.
///
/// Implementations live in the application shell (HTTP market-data client,
/// cache, fixtures); the core only defines the seam so backtests and signal
/// generation can be driven by anything that yields bars.
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch bars for one ticker over a closed date range.
    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: PriceInterval,
    ) -> CoreResult<PriceSeries>;
}
