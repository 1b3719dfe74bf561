//! Strategy engine — folds per-indicator signals into one decision per
//! ticker with a confidence score and a reproducible reason string.

use std::collections::BTreeMap;

use crate::domain::{IndicatorVote, PriceSeries, Signal, SignalAction};
use crate::error::{CoreError, CoreResult};
use crate::indicators::IndicatorResult;

use super::{CombinationRule, StrategyConfig};

/// How many trailing per-bar signals feed the confidence score.
const SIGNAL_HISTORY_WINDOW: usize = 10;

/// Majority vote with a conservative tie policy.
///
/// The action with the strictly highest count wins. Every tie — including
/// an exact buy/sell split with zero hold votes — resolves to Hold. An
/// empty slate holds.
pub fn majority_vote(actions: &[SignalAction]) -> SignalAction {
    let buy = actions.iter().filter(|&&a| a == SignalAction::Buy).count();
    let sell = actions.iter().filter(|&&a| a == SignalAction::Sell).count();
    let hold = actions.iter().filter(|&&a| a == SignalAction::Hold).count();
    if buy > sell && buy > hold {
        SignalAction::Buy
    } else if sell > buy && sell > hold {
        SignalAction::Sell
    } else {
        SignalAction::Hold
    }
}

/// All indicators must agree on a non-Hold action; anything else holds.
fn unanimous(actions: &[SignalAction]) -> SignalAction {
    match actions.first() {
        Some(&first) if first != SignalAction::Hold && actions.iter().all(|&a| a == first) => first,
        _ => SignalAction::Hold,
    }
}

/// Evaluates a strategy over price series.
///
/// A plain value over its config: no caches, no shared state, safe to use
/// from any number of independent runs.
#[derive(Debug, Clone)]
pub struct StrategyEngine {
    config: StrategyConfig,
}

impl StrategyEngine {
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Combined signal for one ticker from the full series handed in.
    ///
    /// Indicators that fail with `InsufficientData` are substituted with
    /// Hold and noted in the breakdown — one starved indicator never aborts
    /// the evaluation. An empty series is the only fatal input.
    pub fn evaluate(&self, ticker: &str, series: &PriceSeries) -> CoreResult<Signal> {
        let last_bar = series
            .last()
            .ok_or_else(|| CoreError::insufficient_data("price series", 1, 0))?;

        let mut outcomes: Vec<Option<IndicatorResult>> =
            Vec::with_capacity(self.config.indicators.len());
        let mut latest: Vec<SignalAction> = Vec::with_capacity(self.config.indicators.len());
        for indicator in &self.config.indicators {
            match indicator.evaluate(series) {
                Ok(result) => {
                    latest.push(result.latest_signal());
                    outcomes.push(Some(result));
                }
                Err(err) if err.is_insufficient_data() => {
                    latest.push(SignalAction::Hold);
                    outcomes.push(None);
                }
                Err(err) => return Err(err),
            }
        }

        let decision = match self.config.combination_rule {
            CombinationRule::MajorityVote => majority_vote(&latest),
            CombinationRule::Unanimous => unanimous(&latest),
        };

        let breakdown: Vec<IndicatorVote> = self
            .config
            .indicators
            .iter()
            .zip(outcomes.iter())
            .zip(latest.iter())
            .map(|((indicator, outcome), &signal)| match outcome {
                Some(result) => IndicatorVote {
                    indicator: indicator.label(),
                    signal,
                    value: result.latest_value(),
                    detail: indicator.describe(result),
                },
                None => IndicatorVote {
                    indicator: indicator.label(),
                    signal: SignalAction::Hold,
                    value: None,
                    detail: format!(
                        "{}: insufficient data ({} bars); holding",
                        indicator.label(),
                        series.len()
                    ),
                },
            })
            .collect();

        Ok(Signal {
            ticker: ticker.to_string(),
            signal: decision,
            confidence: confidence(&outcomes),
            reason: reason(decision, &breakdown, &latest),
            breakdown,
            as_of: last_bar.date,
        })
    }

    /// One combined signal per ticker.
    ///
    /// Tickers whose series are empty are omitted (and logged) rather than
    /// failing the whole batch.
    pub fn generate_signals(
        &self,
        series_by_ticker: &BTreeMap<String, PriceSeries>,
    ) -> CoreResult<BTreeMap<String, Signal>> {
        let mut signals = BTreeMap::new();
        for (ticker, series) in series_by_ticker {
            if series.is_empty() {
                tracing::warn!(ticker = %ticker, "skipping ticker with empty price series");
                continue;
            }
            signals.insert(ticker.clone(), self.evaluate(ticker, series)?);
        }
        Ok(signals)
    }
}

/// Stability-weighted agreement: per indicator, the fraction of its recent
/// signal history matching its own latest signal, averaged over indicators
/// that produced output. An indicator that has held the same view for the
/// whole window contributes 1.0; a flip-flopping one dilutes the score.
fn confidence(outcomes: &[Option<IndicatorResult>]) -> f64 {
    let mut total = 0.0;
    let mut counted = 0usize;
    for result in outcomes.iter().flatten() {
        let recent = result.recent_signals(SIGNAL_HISTORY_WINDOW);
        if recent.is_empty() {
            continue;
        }
        let own_latest = result.latest_signal();
        let agree = recent.iter().filter(|&&s| s == own_latest).count();
        total += agree as f64 / recent.len() as f64;
        counted += 1;
    }
    if counted == 0 {
        0.0
    } else {
        total / counted as f64
    }
}

/// Deterministic reason text: the detail line of every computed indicator
/// whose latest signal matches the decision, or a fixed split summary when
/// none does (the tie fallback).
fn reason(decision: SignalAction, breakdown: &[IndicatorVote], latest: &[SignalAction]) -> String {
    let agreeing: Vec<&str> = breakdown
        .iter()
        .filter(|vote| vote.signal == decision && vote.value.is_some())
        .map(|vote| vote.detail.as_str())
        .collect();
    if agreeing.is_empty() {
        let buy = latest.iter().filter(|&&a| a == SignalAction::Buy).count();
        let sell = latest.iter().filter(|&&a| a == SignalAction::Sell).count();
        let hold = latest.iter().filter(|&&a| a == SignalAction::Hold).count();
        format!(
            "indicators split buy={buy} sell={sell} hold={hold}; defaulting to {}",
            decision.as_str()
        )
    } else {
        agreeing.join("; ")
    }
}
