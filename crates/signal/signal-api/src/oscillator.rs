//! Bounded-oscillator classification with overbought/oversold thresholds.

use serde::{Deserialize, Serialize};
use signal_core::{Result, SignalError};
use signal_spi::{Signal, SignalClassifier, SignalInputs};

use crate::crossover::Crossover;

/// Classifies a bounded oscillator (RSI, stochastic, ...) against
/// overbought/oversold thresholds.
///
/// - Crossing down through `overbought` is a Sell, a StrongSell when the
///   delta turned down on the same bar.
/// - Crossing up through `oversold` is a Buy, a StrongBuy when the delta
///   turned up on the same bar.
/// - Otherwise the deltas are classified as a plain [`Crossover`].
///
/// The threshold is only considered crossed once the value leaves the zone,
/// so a value sitting inside the zone never repeats the signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundedOscillator {
    pub overbought: f64,
    pub oversold: f64,
    #[serde(default)]
    pub reversed: bool,
}

impl BoundedOscillator {
    pub fn new(overbought: f64, oversold: f64) -> Result<Self> {
        let osc = Self { overbought, oversold, reversed: false };
        osc.validate()?;
        Ok(osc)
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.overbought.is_finite() || !self.oversold.is_finite() {
            return Err(SignalError::InvalidParameter {
                name: "thresholds".to_string(),
                reason: "must be finite".to_string(),
            });
        }
        if self.overbought <= self.oversold {
            return Err(SignalError::InvalidParameter {
                name: "overbought".to_string(),
                reason: format!("must be greater than oversold ({})", self.oversold),
            });
        }
        Ok(())
    }

    pub fn evaluate(&self, current_delta: f64, prior_delta: f64, value: f64, prior_value: f64) -> Signal {
        let turn = Crossover::default().evaluate(current_delta, prior_delta);

        let signal = if prior_value >= self.overbought && value < self.overbought {
            if turn == Signal::Sell {
                Signal::StrongSell
            } else {
                Signal::Sell
            }
        } else if prior_value <= self.oversold && value > self.oversold {
            if turn == Signal::Buy {
                Signal::StrongBuy
            } else {
                Signal::Buy
            }
        } else {
            turn
        };
        signal.reversed_if(self.reversed)
    }
}

impl Default for BoundedOscillator {
    fn default() -> Self {
        Self {
            overbought: 70.0,
            oversold: 30.0,
            reversed: false,
        }
    }
}

impl SignalClassifier for BoundedOscillator {
    fn classify(&self, inputs: &SignalInputs) -> Signal {
        self.evaluate(
            inputs.current_delta,
            inputs.prior_delta,
            inputs.value,
            inputs.prior_value,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaving_overbought() {
        let osc = BoundedOscillator::default();
        // Value falls from 75 to 65 while the slope was already negative.
        assert_eq!(osc.evaluate(-10.0, -2.0, 65.0, 75.0), Signal::Sell);
        // Slope turns down on the same bar.
        assert_eq!(osc.evaluate(-10.0, 3.0, 65.0, 75.0), Signal::StrongSell);
    }

    #[test]
    fn test_leaving_oversold() {
        let osc = BoundedOscillator::default();
        assert_eq!(osc.evaluate(8.0, 1.0, 33.0, 25.0), Signal::Buy);
        assert_eq!(osc.evaluate(8.0, -1.0, 33.0, 25.0), Signal::StrongBuy);
    }

    #[test]
    fn test_inside_zone_falls_back_to_crossover() {
        let osc = BoundedOscillator::default();
        assert_eq!(osc.evaluate(1.0, -1.0, 50.0, 49.0), Signal::Buy);
        assert_eq!(osc.evaluate(-1.0, 1.0, 50.0, 51.0), Signal::Sell);
        assert_eq!(osc.evaluate(1.0, 1.0, 50.0, 49.0), Signal::Neutral);
        // Still overbought, no threshold crossing yet.
        assert_eq!(osc.evaluate(1.0, 1.0, 85.0, 84.0), Signal::Neutral);
    }

    #[test]
    fn test_validation() {
        assert!(BoundedOscillator::new(80.0, 20.0).is_ok());
        assert!(BoundedOscillator::new(20.0, 80.0).is_err());
        assert!(BoundedOscillator::new(f64::NAN, 20.0).is_err());
    }

    #[test]
    fn test_reversed() {
        let osc = BoundedOscillator::default().reversed();
        assert_eq!(osc.evaluate(-10.0, -2.0, 65.0, 75.0), Signal::Buy);
    }
}
