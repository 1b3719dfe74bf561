//! Advisor Core — the quantitative signal-and-simulation engine.
//!
//! This crate is the deterministic heart of the advisor application:
//! - Numeric primitives (rolling mean, exponential smoothing, deviation,
//!   correlation)
//! - Five technical indicators with per-bar buy/hold/sell derivation
//! - Strategy engine combining indicator votes into one signal with
//!   confidence and a reproducible reason
//! - Profile-based strategy selector
//! - Day-by-day backtest simulator with trade log and performance metrics
//!
//! Everything is a pure function of its inputs: no global state, no clocks,
//! no I/O. Identical inputs produce bit-identical outputs, which is what
//! makes backtest comparisons meaningful.

pub mod backtest;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod math;
pub mod provider;
pub mod strategy;
