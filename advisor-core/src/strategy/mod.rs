//! Strategy configuration — named indicator bundles and how their votes
//! are combined.

pub mod engine;
pub mod selector;

pub use engine::{majority_vote, StrategyEngine};
pub use selector::{recommend, Horizon, Recommendation, RiskTolerance};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::indicators::{
    BollingerParams, EmaParams, IndicatorConfig, MacdParams, RsiParams, SmaParams,
};

/// How often a recommended strategy should be re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebalanceFrequency {
    Daily,
    Weekly,
    Monthly,
}

/// Rule for folding per-indicator votes into one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CombinationRule {
    /// Strictly-highest vote count wins; every tie resolves to Hold.
    MajorityVote,
    /// All indicators must agree on a non-Hold action; anything else holds.
    Unanimous,
}

/// A named bundle of indicator configurations plus a combination rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyConfig {
    pub name: String,
    pub indicators: Vec<IndicatorConfig>,
    pub rebalance_frequency: RebalanceFrequency,
    pub combination_rule: CombinationRule,
}

impl StrategyConfig {
    pub fn new(
        name: impl Into<String>,
        indicators: Vec<IndicatorConfig>,
        rebalance_frequency: RebalanceFrequency,
        combination_rule: CombinationRule,
    ) -> CoreResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::invalid_parameter("name", "must not be empty"));
        }
        if indicators.is_empty() {
            return Err(CoreError::invalid_parameter(
                "indicators",
                "a strategy needs at least one indicator",
            ));
        }
        Ok(Self {
            name,
            indicators,
            rebalance_frequency,
            combination_rule,
        })
    }

    /// Longest indicator window in the bundle; sizes the simulator warm-up.
    pub fn max_window(&self) -> usize {
        self.indicators
            .iter()
            .map(|i| i.window())
            .max()
            .unwrap_or(0)
    }

    // ── Built-in strategies ──

    pub fn trend_following() -> Self {
        Self {
            name: "Trend Following".into(),
            indicators: vec![
                IndicatorConfig::Sma(SmaParams { window: 20 }),
                IndicatorConfig::Ema(EmaParams { window: 20 }),
                IndicatorConfig::Macd(MacdParams::default()),
            ],
            rebalance_frequency: RebalanceFrequency::Weekly,
            combination_rule: CombinationRule::MajorityVote,
        }
    }

    pub fn mean_reversion() -> Self {
        Self {
            name: "Mean Reversion".into(),
            indicators: vec![
                IndicatorConfig::Rsi(RsiParams::default()),
                IndicatorConfig::Bollinger(BollingerParams::default()),
            ],
            rebalance_frequency: RebalanceFrequency::Daily,
            combination_rule: CombinationRule::MajorityVote,
        }
    }

    pub fn momentum() -> Self {
        Self {
            name: "Momentum".into(),
            indicators: vec![
                IndicatorConfig::Rsi(RsiParams::default()),
                IndicatorConfig::Macd(MacdParams::default()),
                IndicatorConfig::Ema(EmaParams { window: 20 }),
            ],
            rebalance_frequency: RebalanceFrequency::Daily,
            combination_rule: CombinationRule::MajorityVote,
        }
    }

    pub fn conservative() -> Self {
        Self {
            name: "Conservative".into(),
            indicators: vec![
                IndicatorConfig::Sma(SmaParams { window: 50 }),
                IndicatorConfig::Rsi(RsiParams {
                    window: 14,
                    overbought: 75.0,
                    oversold: 25.0,
                }),
                IndicatorConfig::Bollinger(BollingerParams {
                    window: 20,
                    multiplier: 2.5,
                }),
            ],
            rebalance_frequency: RebalanceFrequency::Monthly,
            combination_rule: CombinationRule::Unanimous,
        }
    }
}

/// Registry of built-in and custom strategies.
///
/// Lookup of an unknown name is a hard error, never a silent default.
/// The library is a plain value — callers own their instance, the core
/// keeps no process-wide registry.
#[derive(Debug, Clone, Default)]
pub struct StrategyLibrary {
    strategies: BTreeMap<String, StrategyConfig>,
}

impl StrategyLibrary {
    /// A library seeded with the four built-in strategies.
    pub fn builtin() -> Self {
        let mut lib = Self::default();
        for config in [
            StrategyConfig::trend_following(),
            StrategyConfig::mean_reversion(),
            StrategyConfig::momentum(),
            StrategyConfig::conservative(),
        ] {
            lib.insert(config);
        }
        lib
    }

    /// Register (or replace) a strategy under its own name.
    pub fn insert(&mut self, config: StrategyConfig) {
        self.strategies.insert(config.name.clone(), config);
    }

    pub fn lookup(&self, name: &str) -> CoreResult<&StrategyConfig> {
        self.strategies
            .get(name)
            .ok_or_else(|| CoreError::UnknownStrategy(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(|s| s.as_str())
    }
}
