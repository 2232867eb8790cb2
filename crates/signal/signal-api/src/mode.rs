//! Mode dispatch over the classifier family.

use serde::{Deserialize, Serialize};
use signal_core::Result;
use signal_spi::{Signal, SignalClassifier, SignalInputs};

use crate::band::BandBreakout;
use crate::condition::DualCondition;
use crate::crossover::{Crossover, CrossoverRule};
use crate::oscillator::BoundedOscillator;

/// Classification mode, loadable from configuration.
///
/// ```json
/// { "mode": "bounded_oscillator", "overbought": 80.0, "oversold": 20.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SignalMode {
    Crossover(Crossover),
    BoundedOscillator(BoundedOscillator),
    BandBreakout(BandBreakout),
    DualCondition(DualCondition),
}

impl SignalMode {
    pub fn crossover() -> Self {
        SignalMode::Crossover(Crossover::new(CrossoverRule::Inclusive))
    }

    pub fn bounded_oscillator(overbought: f64, oversold: f64) -> Result<Self> {
        Ok(SignalMode::BoundedOscillator(BoundedOscillator::new(overbought, oversold)?))
    }

    pub fn band_breakout() -> Self {
        SignalMode::BandBreakout(BandBreakout::new())
    }

    pub fn dual_condition() -> Self {
        SignalMode::DualCondition(DualCondition::new())
    }

    /// Check thresholds of modes that carry them.
    pub fn validate(&self) -> Result<()> {
        let result = match self {
            SignalMode::BoundedOscillator(osc) => osc.validate(),
            SignalMode::Crossover(_) | SignalMode::BandBreakout(_) | SignalMode::DualCondition(_) => {
                Ok(())
            }
        };
        if let Err(err) = &result {
            tracing::warn!(mode = self.name(), %err, "rejected signal mode");
        }
        result
    }

    pub fn name(&self) -> &'static str {
        match self {
            SignalMode::Crossover(_) => "Crossover",
            SignalMode::BoundedOscillator(_) => "BoundedOscillator",
            SignalMode::BandBreakout(_) => "BandBreakout",
            SignalMode::DualCondition(_) => "DualCondition",
        }
    }
}

impl Default for SignalMode {
    fn default() -> Self {
        Self::crossover()
    }
}

impl SignalClassifier for SignalMode {
    fn classify(&self, inputs: &SignalInputs) -> Signal {
        match self {
            SignalMode::Crossover(c) => c.classify(inputs),
            SignalMode::BoundedOscillator(c) => c.classify(inputs),
            SignalMode::BandBreakout(c) => c.classify(inputs),
            SignalMode::DualCondition(c) => c.classify(inputs),
        }
    }
}

/// Classify one bar under `mode`.
pub fn classify(mode: &SignalMode, inputs: &SignalInputs) -> Signal {
    mode.classify(inputs)
}
