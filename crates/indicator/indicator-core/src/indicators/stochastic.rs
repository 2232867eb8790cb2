//! Stochastic Oscillator.

use indicator_api::StochasticConfig;
use indicator_spi::{BarSet, IndicatorOutput, Result, SignalIndicator, TechnicalIndicator};
use signal_api::{oscillator_series, Signal};

use crate::moving_averages::compute_with_config;
use crate::numeric::safe_div;
use crate::rolling::highest_lowest;

/// %K and %D lines of one computation.
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticSeries {
    /// Raw position of the close in the high/low range.
    pub fast_k: Vec<f64>,
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

/// Stochastic Oscillator with kernel-smoothed %K and %D, all bounded to
/// `0..=100`. Signals classify %K against the thresholds.
#[derive(Debug, Clone)]
pub struct StochasticOscillator {
    config: StochasticConfig,
}

impl StochasticOscillator {
    pub fn new(config: StochasticConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn calculate(&self, high: &[f64], low: &[f64], close: &[f64]) -> StochasticSeries {
        let (highest, lowest) = highest_lowest(high, low, self.config.length);
        // Halved operands keep the differences finite for any finite prices.
        let fast_k: Vec<f64> = (0..close.len())
            .map(|i| {
                let position = safe_div(close[i] / 2.0 - lowest[i] / 2.0, highest[i] / 2.0 - lowest[i] / 2.0);
                (100.0 * position).clamp(0.0, 100.0)
            })
            .collect();
        let bound = |series: Vec<f64>| -> Vec<f64> {
            series.into_iter().map(|v| v.clamp(0.0, 100.0)).collect()
        };
        let k = bound(compute_with_config(&self.config.k_smoothing, &fast_k));
        let d = bound(compute_with_config(&self.config.d_smoothing, &k));
        StochasticSeries { fast_k, k, d }
    }

    fn evaluate(&self, data: &BarSet) -> Result<(StochasticSeries, Vec<Signal>)> {
        data.validate()?;
        let lines = self.calculate(&data.high, &data.low, &data.close);
        let signals = oscillator_series(&lines.k, &self.config.signal);
        Ok((lines, signals))
    }
}

impl Default for StochasticOscillator {
    fn default() -> Self {
        Self { config: StochasticConfig::default() }
    }
}

impl TechnicalIndicator for StochasticOscillator {
    fn name(&self) -> &str {
        "Stochastic"
    }

    fn compute(&self, data: &BarSet) -> Result<IndicatorOutput> {
        let (lines, signals) = self.evaluate(data)?;
        Ok(IndicatorOutput::new()
            .with_series("FastK", lines.fast_k)
            .with_primary("K", lines.k)
            .with_series("D", lines.d)
            .with_signals(signals))
    }

    fn min_periods(&self) -> usize {
        self.config.length + self.config.k_smoothing.length + self.config.d_smoothing.length - 2
    }

    fn output_features(&self) -> usize {
        3
    }
}

impl SignalIndicator for StochasticOscillator {
    fn signals(&self, data: &BarSet) -> Result<Vec<Signal>> {
        Ok(self.evaluate(data)?.1)
    }
}
