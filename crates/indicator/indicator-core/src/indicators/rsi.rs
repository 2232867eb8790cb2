//! Relative Strength Index.

use indicator_api::RsiConfig;
use indicator_spi::{BarSet, IndicatorOutput, Result, SignalIndicator, TechnicalIndicator};
use signal_api::{oscillator_series, Signal};

use crate::history::prior_or_default;
use crate::moving_averages::compute_moving_average;
use crate::numeric::saturate;

/// Relative Strength Index.
///
/// Average gain and average loss are smoothed with the configured kernel
/// (Wilder by default). The result is clamped to `0..=100`; a bar with
/// neither gains nor losses in its average reads `50`.
#[derive(Debug, Clone)]
pub struct RelativeStrengthIndex {
    config: RsiConfig,
}

impl RelativeStrengthIndex {
    pub fn new(config: RsiConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Calculate RSI values.
    pub fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut gains = Vec::with_capacity(data.len());
        let mut losses = Vec::with_capacity(data.len());
        for (i, &x) in data.iter().enumerate() {
            let change = saturate(x - prior_or_default(data, i, 1, x));
            gains.push(change.max(0.0));
            losses.push((-change).max(0.0));
        }

        let kind = &self.config.smoothing;
        let avg_gain = compute_moving_average(kind, self.config.length, &gains);
        let avg_loss = compute_moving_average(kind, self.config.length, &losses);

        avg_gain
            .iter()
            .zip(&avg_loss)
            .map(|(&gain, &loss)| {
                // Halved so two saturated averages still sum to a finite total.
                let (gain, loss) = (gain / 2.0, loss / 2.0);
                let total = gain + loss;
                if total == 0.0 {
                    50.0
                } else {
                    saturate(100.0 * (gain / total)).clamp(0.0, 100.0)
                }
            })
            .collect()
    }
}

impl Default for RelativeStrengthIndex {
    fn default() -> Self {
        Self { config: RsiConfig::default() }
    }
}

impl TechnicalIndicator for RelativeStrengthIndex {
    fn name(&self) -> &str {
        "RSI"
    }

    fn compute(&self, data: &BarSet) -> Result<IndicatorOutput> {
        let values = self.calculate(&data.input(self.config.source)?);
        let signals = oscillator_series(&values, &self.config.signal);
        Ok(IndicatorOutput::single(values).with_signals(signals))
    }

    fn min_periods(&self) -> usize {
        self.config.length + 1
    }
}

impl SignalIndicator for RelativeStrengthIndex {
    fn signals(&self, data: &BarSet) -> Result<Vec<Signal>> {
        let values = self.calculate(&data.input(self.config.source)?);
        Ok(oscillator_series(&values, &self.config.signal))
    }
}
