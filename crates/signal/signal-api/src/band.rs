//! Band-breakout classification.

use serde::{Deserialize, Serialize};
use signal_spi::{Signal, SignalClassifier, SignalInputs};

/// Classifies a value against an upper/lower band pair.
///
/// | transition                                 | signal      |
/// |--------------------------------------------|-------------|
/// | reaches the upper band from inside         | Sell        |
/// | reaches the lower band from inside         | Buy         |
/// | drops back inside from above the upper band| StrongSell  |
/// | rises back inside from below the lower band| StrongBuy   |
/// | anything else                              | Neutral     |
///
/// Touching a band counts as reaching it. `reversed` turns this into a
/// breakout-following rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BandBreakout {
    #[serde(default)]
    pub reversed: bool,
}

impl BandBreakout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    pub fn evaluate(
        &self,
        value: f64,
        prior_value: f64,
        upper: f64,
        prior_upper: f64,
        lower: f64,
        prior_lower: f64,
    ) -> Signal {
        let was_above = prior_value >= prior_upper;
        let was_below = prior_value <= prior_lower;

        let signal = if value >= upper && !was_above {
            Signal::Sell
        } else if value <= lower && !was_below {
            Signal::Buy
        } else if was_above && value < upper {
            Signal::StrongSell
        } else if was_below && value > lower {
            Signal::StrongBuy
        } else {
            Signal::Neutral
        };
        signal.reversed_if(self.reversed)
    }
}

impl SignalClassifier for BandBreakout {
    fn classify(&self, inputs: &SignalInputs) -> Signal {
        self.evaluate(
            inputs.value,
            inputs.prior_value,
            inputs.upper,
            inputs.prior_upper,
            inputs.lower,
            inputs.prior_lower,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BB: BandBreakout = BandBreakout { reversed: false };

    #[test]
    fn test_touching_upper_band_is_sell() {
        assert_eq!(BB.evaluate(110.0, 105.0, 110.0, 109.0, 90.0, 91.0), Signal::Sell);
    }

    #[test]
    fn test_touching_lower_band_is_buy() {
        assert_eq!(BB.evaluate(90.0, 95.0, 110.0, 109.0, 90.0, 91.0), Signal::Buy);
    }

    #[test]
    fn test_reentry() {
        assert_eq!(BB.evaluate(105.0, 112.0, 110.0, 109.0, 90.0, 91.0), Signal::StrongSell);
        assert_eq!(BB.evaluate(95.0, 88.0, 110.0, 109.0, 90.0, 91.0), Signal::StrongBuy);
    }

    #[test]
    fn test_staying_outside_or_inside_is_neutral() {
        assert_eq!(BB.evaluate(100.0, 101.0, 110.0, 109.0, 90.0, 91.0), Signal::Neutral);
        assert_eq!(BB.evaluate(115.0, 112.0, 110.0, 109.0, 90.0, 91.0), Signal::Neutral);
        assert_eq!(BB.evaluate(85.0, 88.0, 110.0, 109.0, 90.0, 91.0), Signal::Neutral);
    }

    #[test]
    fn test_reversed_follows_breakout() {
        let bb = BandBreakout::new().reversed();
        assert_eq!(bb.evaluate(110.0, 105.0, 110.0, 109.0, 90.0, 91.0), Signal::Buy);
    }
}
