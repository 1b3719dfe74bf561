//! Backtest simulator — replays a strategy day by day over one ticker's
//! history.
//!
//! The simulator is a plain value: it owns its cash, position, and trade
//! log exclusively for the duration of one `run()` and returns everything
//! as an immutable `BacktestResult`. Many simulators can run in parallel
//! because nothing is shared.
//!
//! Look-ahead is excluded by construction: the decision for bar `i` is
//! computed on the series prefix `[0..=i]` and nothing else.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Position, PriceBar, PriceSeries, SignalAction, Trade, TradeType};
use crate::error::{CoreError, CoreResult};
use crate::strategy::{StrategyConfig, StrategyEngine, StrategyLibrary};

use super::{DailyValue, PerformanceMetrics};

/// Extra bars beyond the longest indicator window before trading starts;
/// cross detection needs at least one fully-formed prior bar.
const WARMUP_BUFFER: usize = 5;

/// Configuration for one backtest run.
#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub ticker: String,
    pub price_data: Vec<PriceBar>,
    pub strategy: StrategyConfig,
    pub initial_capital: f64,
    /// Fraction of available cash committed per entry.
    pub position_size_percent: f64,
    /// Flat commission debited per executed trade.
    pub commission_per_trade: f64,
}

impl BacktestConfig {
    pub fn new(
        ticker: impl Into<String>,
        price_data: Vec<PriceBar>,
        strategy: StrategyConfig,
        initial_capital: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            price_data,
            strategy,
            initial_capital,
            position_size_percent: 0.5,
            commission_per_trade: 0.0,
        }
    }

    /// Resolve the strategy by name from a library (the `strategyKey` form
    /// of the run request).
    pub fn from_key(
        library: &StrategyLibrary,
        key: &str,
        ticker: impl Into<String>,
        price_data: Vec<PriceBar>,
        initial_capital: f64,
    ) -> CoreResult<Self> {
        let strategy = library.lookup(key)?.clone();
        Ok(Self::new(ticker, price_data, strategy, initial_capital))
    }

    pub fn with_position_size(mut self, percent: f64) -> Self {
        self.position_size_percent = percent;
        self
    }

    pub fn with_commission(mut self, commission: f64) -> Self {
        self.commission_per_trade = commission;
        self
    }
}

/// Lifecycle of one simulator value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulatorState {
    Idle,
    Running,
    Completed,
    Failed,
}

/// Result of a completed run. Created once, immutable afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestResult {
    pub ticker: String,
    pub strategy_name: String,
    /// Date of the first simulated (post-warm-up) bar.
    pub start_date: NaiveDate,
    /// Date of the last bar.
    pub end_date: NaiveDate,
    pub metrics: PerformanceMetrics,
    pub trades: Vec<Trade>,
    pub daily_values: Vec<DailyValue>,
    /// Absorbed per-bar faults, one line each.
    pub warnings: Vec<String>,
}

/// Day-by-day replay of one strategy over one ticker.
#[derive(Debug)]
pub struct BacktestSimulator {
    config: BacktestConfig,
    state: SimulatorState,
}

impl BacktestSimulator {
    pub fn new(config: BacktestConfig) -> Self {
        Self {
            config,
            state: SimulatorState::Idle,
        }
    }

    pub fn state(&self) -> SimulatorState {
        self.state
    }

    /// Bars required before the first simulated day.
    pub fn required_warmup(&self) -> usize {
        self.config.strategy.max_window() + WARMUP_BUFFER
    }

    /// Execute the full run.
    ///
    /// Setup errors (bad parameters, not enough history) are fatal and move
    /// the simulator to `Failed`. Per-bar evaluation errors are absorbed:
    /// the day becomes an implicit Hold, a warning is recorded, and the run
    /// continues — months of accumulated trades are never discarded for one
    /// bad day.
    pub fn run(&mut self) -> CoreResult<BacktestResult> {
        if self.state != SimulatorState::Idle {
            return Err(CoreError::invalid_parameter(
                "state",
                format!("simulator already ran (state {:?})", self.state),
            ));
        }
        match self.setup() {
            Ok(series) => {
                self.state = SimulatorState::Running;
                let result = self.simulate(&series);
                self.state = SimulatorState::Completed;
                Ok(result)
            }
            Err(err) => {
                self.state = SimulatorState::Failed;
                Err(err)
            }
        }
    }

    fn setup(&self) -> CoreResult<PriceSeries> {
        let c = &self.config;
        if !c.initial_capital.is_finite() || c.initial_capital <= 0.0 {
            return Err(CoreError::invalid_parameter(
                "initial_capital",
                format!("must be positive, got {}", c.initial_capital),
            ));
        }
        if !c.position_size_percent.is_finite()
            || c.position_size_percent <= 0.0
            || c.position_size_percent > 1.0
        {
            return Err(CoreError::invalid_parameter(
                "position_size_percent",
                format!("must be in (0, 1], got {}", c.position_size_percent),
            ));
        }
        if !c.commission_per_trade.is_finite() || c.commission_per_trade < 0.0 {
            return Err(CoreError::invalid_parameter(
                "commission_per_trade",
                format!("must be >= 0, got {}", c.commission_per_trade),
            ));
        }

        let series = PriceSeries::new(c.price_data.clone())?;
        let warmup = self.required_warmup();
        if series.len() < warmup {
            return Err(CoreError::insufficient_data(
                format!("backtest of {}", c.strategy.name),
                warmup,
                series.len(),
            ));
        }
        Ok(series)
    }

    fn simulate(&self, series: &PriceSeries) -> BacktestResult {
        let config = &self.config;
        let engine = StrategyEngine::new(config.strategy.clone());
        let bars = series.bars();
        let warmup = self.required_warmup();

        let mut cash = config.initial_capital;
        let mut position: Option<Position> = None;
        let mut trades: Vec<Trade> = Vec::new();
        let mut daily_values: Vec<DailyValue> = Vec::with_capacity(bars.len() - warmup);
        let mut warnings: Vec<String> = Vec::new();

        for i in warmup..bars.len() {
            let bar = &bars[i];
            let price = bar.close;

            // Decision from the prefix only — bar i never sees bar i+1.
            let decision = match engine.evaluate(&config.ticker, &series.prefix(i)) {
                Ok(signal) => signal.signal,
                Err(err) => {
                    tracing::warn!(
                        ticker = %config.ticker,
                        date = %bar.date,
                        error = %err,
                        "bar evaluation failed; holding"
                    );
                    warnings.push(format!("{}: {err}", bar.date));
                    SignalAction::Hold
                }
            };

            match decision {
                SignalAction::Buy if position.is_none() => {
                    let budget = cash * config.position_size_percent;
                    let shares = (budget / price).floor();
                    // Insufficient cash for a single share is a silent skip.
                    if shares > 0.0 {
                        cash -= shares * price + config.commission_per_trade;
                        position = Some(Position::open(shares, price));
                        trades.push(Trade {
                            date: bar.date,
                            trade_type: TradeType::Buy,
                            price,
                            quantity: shares,
                            value: shares * price,
                            realized_pnl: None,
                            reason: None,
                        });
                    }
                }
                SignalAction::Sell => {
                    if let Some(mut open) = position.take() {
                        let shares = open.shares;
                        let realized = open.decrease(shares, price);
                        cash += shares * price - config.commission_per_trade;
                        trades.push(Trade {
                            date: bar.date,
                            trade_type: TradeType::Sell,
                            price,
                            quantity: shares,
                            value: shares * price,
                            realized_pnl: Some(realized),
                            reason: None,
                        });
                    }
                }
                _ => {}
            }

            let held = position.as_ref().map_or(0.0, |p| p.shares);
            daily_values.push(DailyValue {
                date: bar.date,
                cash,
                shares: held,
                price,
                portfolio_value: cash + held * price,
            });
        }

        // Any position still open is closed at the final bar's price.
        if let Some(mut open) = position.take() {
            let last = &bars[bars.len() - 1];
            let shares = open.shares;
            let realized = open.decrease(shares, last.close);
            cash += shares * last.close - config.commission_per_trade;
            trades.push(Trade {
                date: last.date,
                trade_type: TradeType::Sell,
                price: last.close,
                quantity: shares,
                value: shares * last.close,
                realized_pnl: Some(realized),
                reason: Some("End of backtest".into()),
            });
        }

        let end_date = bars[bars.len() - 1].date;
        // A series exactly as long as the warm-up simulates zero days;
        // start collapses onto the end and every rate metric reads 0.
        let start_date = bars.get(warmup).map_or(end_date, |b| b.date);
        let metrics = PerformanceMetrics::compute(
            config.initial_capital,
            cash,
            start_date,
            end_date,
            &daily_values,
            &trades,
        );

        BacktestResult {
            ticker: config.ticker.clone(),
            strategy_name: config.strategy.name.clone(),
            start_date,
            end_date,
            metrics,
            trades,
            daily_values,
            warnings,
        }
    }
}
