//! Signal Service Provider Interface
//!
//! Defines the discrete trade signal and the trait implemented by classifiers
//! that turn per-bar numeric deltas into signals.

use serde::{Deserialize, Serialize};

/// Discrete trade signal, produced once per bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    StrongBuy,
    Buy,
    #[default]
    Neutral,
    Sell,
    StrongSell,
}

impl Signal {
    /// Numeric encoding: StrongBuy = 2, Buy = 1, Neutral = 0, Sell = -1, StrongSell = -2.
    pub fn to_numeric(&self) -> f64 {
        match self {
            Signal::StrongBuy => 2.0,
            Signal::Buy => 1.0,
            Signal::Neutral => 0.0,
            Signal::Sell => -1.0,
            Signal::StrongSell => -2.0,
        }
    }

    pub fn is_bullish(&self) -> bool {
        matches!(self, Signal::StrongBuy | Signal::Buy)
    }

    pub fn is_bearish(&self) -> bool {
        matches!(self, Signal::StrongSell | Signal::Sell)
    }

    pub fn is_neutral(&self) -> bool {
        *self == Signal::Neutral
    }

    /// Mirror the signal (Buy <-> Sell, StrongBuy <-> StrongSell).
    pub fn reversed(self) -> Self {
        match self {
            Signal::StrongBuy => Signal::StrongSell,
            Signal::Buy => Signal::Sell,
            Signal::Neutral => Signal::Neutral,
            Signal::Sell => Signal::Buy,
            Signal::StrongSell => Signal::StrongBuy,
        }
    }

    /// Apply [`Signal::reversed`] only when `reverse` is set.
    pub fn reversed_if(self, reverse: bool) -> Self {
        if reverse {
            self.reversed()
        } else {
            self
        }
    }
}

/// Per-bar inputs consumed by a classifier.
///
/// Deltas are `current - previous` of whatever series the caller is tracking
/// (a slope, a histogram, price minus average). The optional fields are only
/// read by the modes that need them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignalInputs {
    pub current_delta: f64,
    pub prior_delta: f64,
    pub value: f64,
    pub prior_value: f64,
    pub upper: f64,
    pub prior_upper: f64,
    pub lower: f64,
    pub prior_lower: f64,
}

impl SignalInputs {
    pub fn deltas(current_delta: f64, prior_delta: f64) -> Self {
        Self {
            current_delta,
            prior_delta,
            ..Self::default()
        }
    }

    pub fn with_values(mut self, value: f64, prior_value: f64) -> Self {
        self.value = value;
        self.prior_value = prior_value;
        self
    }

    pub fn with_upper(mut self, upper: f64, prior_upper: f64) -> Self {
        self.upper = upper;
        self.prior_upper = prior_upper;
        self
    }

    pub fn with_lower(mut self, lower: f64, prior_lower: f64) -> Self {
        self.lower = lower;
        self.prior_lower = prior_lower;
        self
    }
}

/// Common trait for signal classifiers.
///
/// Classifiers hold configuration only; every call is a pure function of
/// the inputs for one bar.
pub trait SignalClassifier: Send + Sync {
    /// Classify a single bar.
    fn classify(&self, inputs: &SignalInputs) -> Signal;

    /// Classify a sequence of bars.
    fn classify_all(&self, inputs: &[SignalInputs]) -> Vec<Signal> {
        inputs.iter().map(|bar| self.classify(bar)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_is_involution() {
        for s in [
            Signal::StrongBuy,
            Signal::Buy,
            Signal::Neutral,
            Signal::Sell,
            Signal::StrongSell,
        ] {
            assert_eq!(s.reversed().reversed(), s);
            assert_eq!(s.reversed().to_numeric(), -s.to_numeric());
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Signal::StrongBuy).unwrap();
        assert_eq!(json, "\"strong_buy\"");
        let back: Signal = serde_json::from_str("\"sell\"").unwrap();
        assert_eq!(back, Signal::Sell);
    }

    #[test]
    fn test_default_is_neutral() {
        assert_eq!(Signal::default(), Signal::Neutral);
        assert!(Signal::default().is_neutral());
    }
}
