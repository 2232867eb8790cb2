//! Crossover classification.

use serde::{Deserialize, Serialize};
use signal_spi::{Signal, SignalClassifier, SignalInputs};

/// How a zero delta on the prior bar is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverRule {
    /// A flat prior bar counts as the opposite side (`prior <= 0` then `current > 0` is a Buy).
    #[default]
    Inclusive,
    /// The prior bar must be strictly on the opposite side.
    Strict,
}

/// Flags a trend reversal when the sign of the delta flips between bars.
///
/// A delta turning positive is a Buy, a delta turning negative is a Sell.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Crossover {
    #[serde(default)]
    pub rule: CrossoverRule,
    #[serde(default)]
    pub reversed: bool,
}

impl Crossover {
    pub fn new(rule: CrossoverRule) -> Self {
        Self { rule, reversed: false }
    }

    pub fn strict() -> Self {
        Self::new(CrossoverRule::Strict)
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    /// Classify one pair of deltas.
    pub fn evaluate(&self, current_delta: f64, prior_delta: f64) -> Signal {
        let (turned_up, turned_down) = match self.rule {
            CrossoverRule::Inclusive => (
                current_delta > 0.0 && prior_delta <= 0.0,
                current_delta < 0.0 && prior_delta >= 0.0,
            ),
            CrossoverRule::Strict => (
                current_delta > 0.0 && prior_delta < 0.0,
                current_delta < 0.0 && prior_delta > 0.0,
            ),
        };

        let signal = if turned_up {
            Signal::Buy
        } else if turned_down {
            Signal::Sell
        } else {
            Signal::Neutral
        };
        signal.reversed_if(self.reversed)
    }
}

impl SignalClassifier for Crossover {
    fn classify(&self, inputs: &SignalInputs) -> Signal {
        self.evaluate(inputs.current_delta, inputs.prior_delta)
    }
}
