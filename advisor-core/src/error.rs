//! Structured error types for the quant core.
//!
//! Recovery rules differ per variant: `InsufficientData` is absorbed at the
//! indicator level (the strategy engine substitutes Hold) but fatal at
//! simulator setup; `InvalidParameter` and `UnknownStrategy` always surface
//! to the caller; `ComputationFault` is absorbed per bar inside the
//! simulator loop.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("insufficient data for {indicator}: need {required} bars, got {got}")]
    InsufficientData {
        indicator: String,
        required: usize,
        got: usize,
    },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("computation fault at bar {bar_index}: {detail}")]
    ComputationFault { bar_index: usize, detail: String },

    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
}

impl CoreError {
    pub fn insufficient_data(indicator: impl Into<String>, required: usize, got: usize) -> Self {
        Self::InsufficientData {
            indicator: indicator.into(),
            required,
            got,
        }
    }

    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// True for the variant the strategy engine may recover from locally.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_display_names_the_indicator() {
        let err = CoreError::insufficient_data("rsi_14", 15, 4);
        let msg = err.to_string();
        assert!(msg.contains("rsi_14"));
        assert!(msg.contains("15"));
        assert!(msg.contains("4"));
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn invalid_parameter_display_names_the_parameter() {
        let err = CoreError::invalid_parameter("window", "must be >= 1");
        assert!(err.to_string().contains("window"));
        assert!(!err.is_insufficient_data());
    }

    #[test]
    fn unknown_strategy_carries_the_name() {
        let err = CoreError::UnknownStrategy("momo9000".into());
        assert!(err.to_string().contains("momo9000"));
    }
}
