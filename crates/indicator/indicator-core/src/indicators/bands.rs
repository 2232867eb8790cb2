//! Moving-average bands (Bollinger-style).

use indicator_api::MovingAverageBandsConfig;
use indicator_spi::{BarSet, IndicatorOutput, Result, SignalIndicator, TechnicalIndicator};
use signal_api::{band_series, Signal};

use crate::moving_averages::compute_with_config;
use crate::numeric::{safe_div, saturating_dot, saturating_ratio};
use crate::rolling::rolling_std_dev;
use crate::signal_error;

/// Band series of one computation.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSeries {
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
    /// `(upper - lower) / middle`
    pub bandwidth: Vec<f64>,
    /// Position of the price within the bands, `0` at the lower band.
    pub percent_b: Vec<f64>,
}

/// Kernel middle band with `multiplier` rolling standard deviations on
/// either side. Signals use [`signal_api::BandBreakout`] on the price.
#[derive(Debug, Clone)]
pub struct MovingAverageBands {
    config: MovingAverageBandsConfig,
}

impl MovingAverageBands {
    pub fn new(config: MovingAverageBandsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn calculate(&self, price: &[f64]) -> BandSeries {
        let middle = compute_with_config(&self.config.average, price);
        let std_dev = rolling_std_dev(price, self.config.std_length());
        let k = self.config.multiplier;

        let offset = |sign: f64| -> Vec<f64> {
            middle
                .iter()
                .zip(&std_dev)
                .map(|(m, s)| saturating_dot([(1.0, *m), (sign * k, *s)]))
                .collect()
        };
        let upper = offset(1.0);
        let lower = offset(-1.0);
        let bandwidth = (0..price.len())
            .map(|i| saturating_ratio([(1.0, upper[i]), (-1.0, lower[i])], middle[i]))
            .collect();
        let percent_b = (0..price.len())
            .map(|i| {
                let width = saturating_dot([(0.5, upper[i]), (-0.5, lower[i])]);
                safe_div(saturating_dot([(0.5, price[i]), (-0.5, lower[i])]), width)
            })
            .collect();

        BandSeries { middle, upper, lower, bandwidth, percent_b }
    }

    fn evaluate(&self, data: &BarSet) -> Result<(BandSeries, Vec<Signal>)> {
        let price = data.input(self.config.source)?;
        let bands = self.calculate(&price);
        let signals = band_series(&price, &bands.upper, &bands.lower, &self.config.signal)
            .map_err(signal_error)?;
        Ok((bands, signals))
    }
}

impl Default for MovingAverageBands {
    fn default() -> Self {
        Self { config: MovingAverageBandsConfig::default() }
    }
}

impl TechnicalIndicator for MovingAverageBands {
    fn name(&self) -> &str {
        "MovingAverageBands"
    }

    fn compute(&self, data: &BarSet) -> Result<IndicatorOutput> {
        let (bands, signals) = self.evaluate(data)?;
        Ok(IndicatorOutput::new()
            .with_primary("MiddleBand", bands.middle)
            .with_series("UpperBand", bands.upper)
            .with_series("LowerBand", bands.lower)
            .with_series("Bandwidth", bands.bandwidth)
            .with_series("PercentB", bands.percent_b)
            .with_signals(signals))
    }

    fn min_periods(&self) -> usize {
        self.config.average.length.max(self.config.std_length())
    }

    fn output_features(&self) -> usize {
        5
    }
}

impl SignalIndicator for MovingAverageBands {
    fn signals(&self, data: &BarSet) -> Result<Vec<Signal>> {
        Ok(self.evaluate(data)?.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use indicator_api::MovingAverageConfig;

    #[test]
    fn test_band_geometry() {
        let price: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.4).sin() * 3.0).collect();
        let bands = MovingAverageBands::default().calculate(&price);
        for i in 0..price.len() {
            assert!(bands.upper[i] >= bands.middle[i]);
            assert!(bands.lower[i] <= bands.middle[i]);
            assert_relative_eq!(
                bands.upper[i] - bands.middle[i],
                bands.middle[i] - bands.lower[i],
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_flat_price_collapses_bands() {
        let bands = MovingAverageBands::default().calculate(&[50.0; 30]);
        assert_eq!(bands.upper[29], 50.0);
        assert_eq!(bands.lower[29], 50.0);
        // zero-width bands give a zero %B instead of a division error
        assert_eq!(bands.percent_b[29], 0.0);
        assert_eq!(bands.bandwidth[29], 0.0);
    }

    #[test]
    fn test_output_names() {
        let price: Vec<f64> = (0..40).map(|i| 10.0 + (i % 7) as f64).collect();
        let out = MovingAverageBands::default().compute_close(&price).unwrap();
        assert_eq!(out.primary_name(), Some("MiddleBand"));
        for name in ["UpperBand", "LowerBand", "Bandwidth", "PercentB"] {
            assert_eq!(out.require(name).unwrap().len(), price.len());
        }
        assert_eq!(out.signals().len(), price.len());
    }

    #[test]
    fn test_spike_through_upper_band_sells() {
        let mut price = vec![100.0, 101.0, 100.0, 99.0, 100.0, 101.0, 100.0, 99.0, 100.0, 101.0];
        price.push(120.0);
        let config = MovingAverageBandsConfig::new(MovingAverageConfig::simple(10), 2.0);
        let signals = MovingAverageBands::new(config)
            .unwrap()
            .signals(&BarSet::from_close(price))
            .unwrap();
        assert_eq!(signals[10], Signal::Sell);
    }

    #[test]
    fn test_exponential_middle_first_bar_is_neutral() {
        let price: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let config = MovingAverageBandsConfig::new(MovingAverageConfig::exponential(20), 2.0);
        let signals = MovingAverageBands::new(config)
            .unwrap()
            .signals(&BarSet::from_close(price))
            .unwrap();
        assert_eq!(signals[0], Signal::Neutral);
    }

    #[test]
    fn test_extreme_prices_give_finite_bands() {
        let price = [1e308, -1e308, 1e308, -1e308];
        let bands = MovingAverageBands::default().calculate(&price);
        for series in [&bands.middle, &bands.upper, &bands.lower, &bands.bandwidth, &bands.percent_b] {
            assert!(series.iter().all(|v| v.is_finite()), "{series:?}");
        }
    }

    #[test]
    fn test_rejects_negative_multiplier() {
        let config = MovingAverageBandsConfig::new(MovingAverageConfig::simple(20), -1.0);
        assert!(MovingAverageBands::new(config).is_err());
    }
}
