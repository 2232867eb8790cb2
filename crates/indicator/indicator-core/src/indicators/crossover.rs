//! Fast/slow moving-average crossover (MACD-style).

use indicator_api::CrossoverConfig;
use indicator_spi::{BarSet, IndicatorOutput, Result, SignalIndicator, TechnicalIndicator};
use signal_api::{line_cross_series, Signal};

use crate::moving_averages::compute_with_config;
use crate::signal_error;

/// Lines of one computation.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossoverSeries {
    /// Fast average minus slow average.
    pub line: Vec<f64>,
    /// Smoothed `line`.
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Spread between a fast and a slow kernel, its smoothed signal line and the
/// histogram between them. Signals fire when the spread crosses its signal
/// line.
#[derive(Debug, Clone)]
pub struct MovingAverageCrossover {
    config: CrossoverConfig,
}

impl MovingAverageCrossover {
    pub fn new(config: CrossoverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn calculate(&self, data: &[f64]) -> CrossoverSeries {
        let fast = compute_with_config(&self.config.fast, data);
        let slow = compute_with_config(&self.config.slow, data);
        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal_line = compute_with_config(&self.config.signal_line, &line);
        let histogram = line.iter().zip(&signal_line).map(|(l, s)| l - s).collect();
        CrossoverSeries { line, signal_line, histogram }
    }

    fn evaluate(&self, data: &BarSet) -> Result<(CrossoverSeries, Vec<Signal>)> {
        let lines = self.calculate(&data.input(self.config.source)?);
        let signals = line_cross_series(&lines.line, &lines.signal_line, &self.config.signal)
            .map_err(signal_error)?;
        Ok((lines, signals))
    }
}

impl Default for MovingAverageCrossover {
    fn default() -> Self {
        Self { config: CrossoverConfig::default() }
    }
}

impl TechnicalIndicator for MovingAverageCrossover {
    fn name(&self) -> &str {
        "MovingAverageCrossover"
    }

    fn compute(&self, data: &BarSet) -> Result<IndicatorOutput> {
        let (lines, signals) = self.evaluate(data)?;
        Ok(IndicatorOutput::new()
            .with_primary("Line", lines.line)
            .with_series("Signal", lines.signal_line)
            .with_series("Histogram", lines.histogram)
            .with_signals(signals))
    }

    fn min_periods(&self) -> usize {
        self.config.slow.length + self.config.signal_line.length
    }

    fn output_features(&self) -> usize {
        3
    }
}

impl SignalIndicator for MovingAverageCrossover {
    fn signals(&self, data: &BarSet) -> Result<Vec<Signal>> {
        Ok(self.evaluate(data)?.1)
    }
}
