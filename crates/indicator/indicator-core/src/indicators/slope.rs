//! Slope direction of a moving average.

use indicator_api::SlopeConfig;
use indicator_spi::{BarSet, IndicatorOutput, Result, SignalIndicator, TechnicalIndicator};
use signal_api::{condition_series, DualCondition, Signal};

use crate::history::prior_or_default;
use crate::moving_averages::compute_with_config;
use crate::signal_error;

/// Bullish while the average rises by more than the threshold per bar,
/// bearish while it falls by more than the threshold.
#[derive(Debug, Clone)]
pub struct SlopeDirection {
    config: SlopeConfig,
    signal: DualCondition,
}

impl SlopeDirection {
    pub fn new(config: SlopeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, signal: DualCondition::default() })
    }

    pub fn with_signal(mut self, signal: DualCondition) -> Self {
        self.signal = signal;
        self
    }

    /// Average and its bar-over-bar change (`0` on the first bar).
    pub fn calculate(&self, data: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let average = compute_with_config(&self.config.average, data);
        let slope = (0..average.len())
            .map(|i| average[i] - prior_or_default(&average, i, 1, average[i]))
            .collect();
        (average, slope)
    }

    fn evaluate(&self, data: &BarSet) -> Result<(Vec<f64>, Vec<f64>, Vec<Signal>)> {
        let (average, slope) = self.calculate(&data.input(self.config.source)?);
        let threshold = self.config.threshold;
        let bullish: Vec<f64> = slope.iter().map(|s| s - threshold).collect();
        let bearish: Vec<f64> = slope.iter().map(|s| -s - threshold).collect();
        let signals = condition_series(&bullish, &bearish, &self.signal).map_err(signal_error)?;
        Ok((average, slope, signals))
    }
}

impl Default for SlopeDirection {
    fn default() -> Self {
        Self { config: SlopeConfig::default(), signal: DualCondition::default() }
    }
}

impl TechnicalIndicator for SlopeDirection {
    fn name(&self) -> &str {
        "SlopeDirection"
    }

    fn compute(&self, data: &BarSet) -> Result<IndicatorOutput> {
        let (average, slope, signals) = self.evaluate(data)?;
        Ok(IndicatorOutput::new()
            .with_primary("Average", average)
            .with_series("Slope", slope)
            .with_signals(signals))
    }

    fn min_periods(&self) -> usize {
        self.config.average.length + 1
    }

    fn output_features(&self) -> usize {
        2
    }
}

impl SignalIndicator for SlopeDirection {
    fn signals(&self, data: &BarSet) -> Result<Vec<Signal>> {
        Ok(self.evaluate(data)?.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicator_api::MovingAverageConfig;

    #[test]
    fn test_direction_follows_slope() {
        let mut data: Vec<f64> = (0..20).map(|i| i as f64).collect();
        data.extend((0..20).map(|i| 20.0 - i as f64));
        let indicator = SlopeDirection::new(SlopeConfig::new(MovingAverageConfig::simple(3))).unwrap();
        let signals = indicator.signals(&BarSet::from_close(data)).unwrap();
        assert_eq!(signals[0], Signal::Neutral);
        assert_eq!(signals[10], Signal::Buy);
        assert_eq!(signals[35], Signal::Sell);
    }

    #[test]
    fn test_threshold_filters_small_moves() {
        let data: Vec<f64> = (0..30).map(|i| 100.0 + 0.01 * i as f64).collect();
        let mut config = SlopeConfig::new(MovingAverageConfig::simple(5));
        config.threshold = 0.5;
        let signals = SlopeDirection::new(config)
            .unwrap()
            .signals(&BarSet::from_close(data))
            .unwrap();
        assert!(signals.iter().all(|s| s.is_neutral()));
    }

    #[test]
    fn test_outputs() {
        let data: Vec<f64> = (0..30).map(|i| (i as f64).sqrt()).collect();
        let out = SlopeDirection::default().compute_close(&data).unwrap();
        assert_eq!(out.primary_name(), Some("Average"));
        assert_eq!(out.require("Slope").unwrap()[0], 0.0);
    }
}
