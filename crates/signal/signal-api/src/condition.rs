//! Dual-condition (bullish/bearish) classification.

use serde::{Deserialize, Serialize};
use signal_spi::{Signal, SignalClassifier, SignalInputs};

/// Emits the signal of whichever condition is active.
///
/// Bullish only is a Buy, bearish only is a Sell, neither or both is Neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DualCondition {
    #[serde(default)]
    pub reversed: bool,
}

impl DualCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&self, bullish: bool, bearish: bool) -> Signal {
        let signal = match (bullish, bearish) {
            (true, false) => Signal::Buy,
            (false, true) => Signal::Sell,
            _ => Signal::Neutral,
        };
        signal.reversed_if(self.reversed)
    }

    /// Numeric conditions are active when strictly positive.
    pub fn evaluate_numeric(&self, bullish: f64, bearish: f64) -> Signal {
        self.evaluate(bullish > 0.0, bearish > 0.0)
    }
}

impl SignalClassifier for DualCondition {
    /// Reads the bullish condition from `current_delta` and the bearish one
    /// from `prior_delta`.
    fn classify(&self, inputs: &SignalInputs) -> Signal {
        self.evaluate_numeric(inputs.current_delta, inputs.prior_delta)
    }
}
