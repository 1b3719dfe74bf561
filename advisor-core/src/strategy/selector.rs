//! Strategy selector — maps an investor profile to one of the built-in
//! strategies and a rebalancing cadence.
//!
//! The mapping is a fixed decision table (horizon × risk tolerance), i.e.
//! configuration data, not a model. Portfolio size applies exactly one
//! deterministic adjustment: tiny accounts never get a daily cadence
//! (commission drag).

use serde::{Deserialize, Serialize};

use super::RebalanceFrequency;

/// Account value below which a daily cadence is downgraded to weekly.
const SMALL_PORTFOLIO_THRESHOLD: f64 = 1_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizon {
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

/// Outcome of a selector lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub strategy_name: String,
    pub rebalance_frequency: RebalanceFrequency,
    pub confidence: f64,
    pub reasoning: String,
}

/// One row of the decision table.
struct TableEntry {
    strategy: &'static str,
    cadence: RebalanceFrequency,
    confidence: f64,
    rationale: &'static str,
}

fn table_entry(horizon: Horizon, risk: RiskTolerance) -> TableEntry {
    use RebalanceFrequency::{Daily, Monthly, Weekly};
    use RiskTolerance::{High, Low, Medium};

    match (horizon, risk) {
        (Horizon::OneYear, Low) => TableEntry {
            strategy: "Conservative",
            cadence: Weekly,
            confidence: 0.80,
            rationale: "short horizon with low risk favors capital preservation",
        },
        (Horizon::OneYear, Medium) => TableEntry {
            strategy: "Mean Reversion",
            cadence: Weekly,
            confidence: 0.70,
            rationale: "short horizon suits range-bound entries over trend capture",
        },
        (Horizon::OneYear, High) => TableEntry {
            strategy: "Momentum",
            cadence: Daily,
            confidence: 0.65,
            rationale: "short horizon with high risk chases momentum, rechecked daily",
        },
        (Horizon::TwoYears, Low) => TableEntry {
            strategy: "Conservative",
            cadence: Monthly,
            confidence: 0.85,
            rationale: "medium horizon with low risk compounds quietly",
        },
        (Horizon::TwoYears, Medium) => TableEntry {
            strategy: "Trend Following",
            cadence: Weekly,
            confidence: 0.75,
            rationale: "medium horizon gives trends room to develop",
        },
        (Horizon::TwoYears, High) => TableEntry {
            strategy: "Momentum",
            cadence: Weekly,
            confidence: 0.70,
            rationale: "medium horizon with high risk rides momentum with weekly review",
        },
        (Horizon::FiveYears, Low) => TableEntry {
            strategy: "Trend Following",
            cadence: Monthly,
            confidence: 0.90,
            rationale: "long horizon with low risk captures major trends cheaply",
        },
        (Horizon::FiveYears, Medium) => TableEntry {
            strategy: "Trend Following",
            cadence: Monthly,
            confidence: 0.85,
            rationale: "long horizon favors patient trend capture",
        },
        (Horizon::FiveYears, High) => TableEntry {
            strategy: "Momentum",
            cadence: Weekly,
            confidence: 0.75,
            rationale: "long horizon with high risk compounds momentum aggressively",
        },
    }
}

/// Pick a built-in strategy and cadence for an investor profile.
pub fn recommend(horizon: Horizon, risk: RiskTolerance, portfolio_size: f64) -> Recommendation {
    let entry = table_entry(horizon, risk);

    let mut cadence = entry.cadence;
    let mut reasoning = entry.rationale.to_string();
    if cadence == RebalanceFrequency::Daily && portfolio_size < SMALL_PORTFOLIO_THRESHOLD {
        cadence = RebalanceFrequency::Weekly;
        reasoning.push_str("; small account downgraded to weekly to limit commission drag");
    }

    Recommendation {
        strategy_name: entry.strategy.to_string(),
        rebalance_frequency: cadence,
        confidence: entry.confidence,
        reasoning,
    }
}
