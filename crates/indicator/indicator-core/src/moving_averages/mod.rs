//! Moving-Average Kernel
//!
//! [`compute_moving_average`] dispatches a [`MovingAverageKind`] to its
//! recurrence with a single `match`. Every kernel is causal, returns one
//! value per input bar and keeps no state outside the call, so the output of
//! one invocation can be fed straight into another (see [`compose`]).

pub mod adaptive;
pub mod exponential;
pub mod filter_bank;
pub mod fixed_window;

use indicator_api::{MovingAverageConfig, MovingAverageKind};
use indicator_spi::{
    BarSet, IndicatorOutput, PriceSource, Result, SignalIndicator, TechnicalIndicator,
};
use signal_api::{line_cross_series, Crossover, Signal};

use crate::signal_error;

/// Run the kernel selected by `kind` over `input`.
///
/// `length` must be at least 1; this is not checked in release builds. Use
/// [`MovingAverage::new`] for a validated entry point.
pub fn compute_moving_average(kind: &MovingAverageKind, length: usize, input: &[f64]) -> Vec<f64> {
    debug_assert!(length >= 1, "moving average length must be at least 1");
    if input.is_empty() {
        return Vec::new();
    }
    let n = length.max(1);
    tracing::debug!(kind = kind.name(), length = n, bars = input.len(), "moving average");

    use adaptive as ad;
    use exponential as ex;
    use filter_bank as fb;
    use fixed_window as fw;

    match *kind {
        MovingAverageKind::Simple => fw::sma(input, n),
        MovingAverageKind::Weighted => fw::wma(input, n),
        MovingAverageKind::Triangular => fw::triangular(input, n),
        MovingAverageKind::SymmetricWeighted => fw::symmetric(input, n),
        MovingAverageKind::SineWeighted => fw::sine(input, n),
        MovingAverageKind::Hull => fw::hull(input, n),
        MovingAverageKind::ArnaudLegoux { offset, sigma } => fw::alma(input, n, offset, sigma),
        MovingAverageKind::LeastSquares => fw::least_squares(input, n),
        MovingAverageKind::Pascal => fw::pascal(input, n),
        MovingAverageKind::Median => fw::median(input, n),

        MovingAverageKind::Exponential => ex::ema(input, n),
        MovingAverageKind::Wilder => ex::wilder(input, n),
        MovingAverageKind::DoubleExponential => ex::dema(input, n),
        MovingAverageKind::TripleExponential => ex::tema(input, n),
        MovingAverageKind::QuadrupleExponential => ex::qema(input, n),
        MovingAverageKind::GeneralizedDouble { volume_factor } => {
            ex::generalized_double(input, n, volume_factor)
        }
        MovingAverageKind::T3 { volume_factor } => ex::t3(input, n, volume_factor),
        MovingAverageKind::ZeroLagExponential => ex::zlema(input, n),
        MovingAverageKind::ZeroLagTripleExponential => ex::zltema(input, n),
        MovingAverageKind::McNicholl => ex::mcnicholl(input, n),
        MovingAverageKind::ExponentialHull => ex::exponential_hull(input, n),
        MovingAverageKind::DoubleSmoothed => ex::double_smoothed(input, n),
        MovingAverageKind::Custom { alpha } => ex::ema_with_alpha(input, alpha),

        MovingAverageKind::KaufmanAdaptive { fast_length, slow_length } => {
            ad::kaufman(input, n, fast_length, slow_length)
        }
        MovingAverageKind::PoweredKaufman { fast_length, slow_length, power } => {
            ad::powered_kaufman(input, n, fast_length, slow_length, power)
        }
        MovingAverageKind::VariableIndexDynamic => ad::vidya(input, n),
        MovingAverageKind::Jurik { phase, power } => ad::jurik(input, n, phase, power),
        MovingAverageKind::McGinleyDynamic { constant } => ad::mcginley(input, n, constant),
        MovingAverageKind::BryantAdaptive { max_length, trend } => {
            ad::bryant(input, n, max_length, trend)
        }
        MovingAverageKind::VolatilityAdjusted => ad::volatility_adjusted(input, n),
        MovingAverageKind::FractalAdaptive => ad::fractal(input, n),

        MovingAverageKind::SuperSmoother2Pole => fb::super_smoother_2(input, n),
        MovingAverageKind::SuperSmoother3Pole => fb::super_smoother_3(input, n),
        MovingAverageKind::Butterworth2Pole => fb::butterworth_2(input, n),
        MovingAverageKind::Butterworth3Pole => fb::butterworth_3(input, n),
        MovingAverageKind::Gaussian2Pole => fb::gaussian_2(input, n),
        MovingAverageKind::HighPass2Pole => fb::high_pass_2(input, n),
        MovingAverageKind::Roofing { smooth_length } => fb::roofing(input, n, smooth_length.max(1)),
        MovingAverageKind::Decycler => fb::decycler(input, n),
        MovingAverageKind::Laguerre { gamma } => fb::laguerre(input, gamma),
        MovingAverageKind::InstantaneousTrendline => fb::instantaneous_trendline(input, n),
    }
}

/// Kernel selected by a configuration.
pub fn compute_with_config(config: &MovingAverageConfig, input: &[f64]) -> Vec<f64> {
    compute_moving_average(&config.kind, config.length, input)
}

/// Feed `input` through each stage in order, every stage consuming the
/// previous stage's output.
pub fn compose(stages: &[MovingAverageConfig], input: &[f64]) -> Vec<f64> {
    stages
        .iter()
        .fold(input.to_vec(), |series, stage| compute_with_config(stage, &series))
}

/// Moving average as a [`TechnicalIndicator`].
///
/// Emits the kernel output as the primary `"Value"` series, with a crossover
/// signal on price crossing the average.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    config: MovingAverageConfig,
    source: PriceSource,
    signal: Crossover,
}

impl MovingAverage {
    /// Validated constructor.
    pub fn new(config: MovingAverageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source: PriceSource::Close,
            signal: Crossover::default(),
        })
    }

    pub fn with_source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_signal(mut self, signal: Crossover) -> Self {
        self.signal = signal;
        self
    }

    pub fn config(&self) -> &MovingAverageConfig {
        &self.config
    }

    /// Calculate the average of a raw series.
    pub fn calculate(&self, data: &[f64]) -> Vec<f64> {
        compute_with_config(&self.config, data)
    }

    fn price_cross(&self, price: &[f64], average: &[f64]) -> Result<Vec<Signal>> {
        line_cross_series(price, average, &self.signal).map_err(signal_error)
    }
}

impl TechnicalIndicator for MovingAverage {
    fn name(&self) -> &str {
        self.config.kind.name()
    }

    fn compute(&self, data: &BarSet) -> Result<IndicatorOutput> {
        let price = data.input(self.source)?;
        let values = self.calculate(&price);
        let signals = self.price_cross(&price, &values)?;
        Ok(IndicatorOutput::single(values).with_signals(signals))
    }

    fn min_periods(&self) -> usize {
        self.config.length
    }
}

impl SignalIndicator for MovingAverage {
    fn signals(&self, data: &BarSet) -> Result<Vec<Signal>> {
        let price = data.input(self.source)?;
        let values = self.calculate(&price);
        self.price_cross(&price, &values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PRICES: [f64; 10] = [10.0, 11.0, 12.0, 11.0, 10.0, 9.0, 10.0, 11.0, 12.0, 13.0];

    #[test]
    fn test_every_kind_preserves_length() {
        for kind in MovingAverageKind::ALL {
            for length in [1, 2, 5, 14] {
                let out = compute_moving_average(&kind, length, &PRICES);
                assert_eq!(out.len(), PRICES.len(), "{kind} length {length}");
                assert!(out.iter().all(|v| v.is_finite()), "{kind} length {length}");
            }
        }
    }

    #[test]
    fn test_empty_input() {
        for kind in MovingAverageKind::ALL {
            assert!(compute_moving_average(&kind, 5, &[]).is_empty());
        }
    }

    #[test]
    fn test_compose_matches_nested_calls() {
        let stages = [MovingAverageConfig::simple(3), MovingAverageConfig::simple(3)];
        let composed = compose(&stages, &PRICES);
        let nested = fixed_window::sma(&fixed_window::sma(&PRICES, 3), 3);
        assert_eq!(composed, nested);
    }

    #[test]
    fn test_custom_alpha_matches_ema() {
        let custom = compute_moving_average(&MovingAverageKind::Custom { alpha: 0.5 }, 99, &PRICES);
        let ema = compute_moving_average(&MovingAverageKind::Exponential, 3, &PRICES);
        assert_eq!(custom, ema);
    }

    #[test]
    fn test_indicator_output() {
        let ma = MovingAverage::new(MovingAverageConfig::simple(3)).unwrap();
        let out = ma.compute_close(&PRICES).unwrap();
        assert_eq!(out.primary_name(), Some(IndicatorOutput::VALUE));
        assert_relative_eq!(out.primary().unwrap()[4], 11.0);
        assert_eq!(out.signals().len(), PRICES.len());
        assert_eq!(ma.name(), "SMA");
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(MovingAverage::new(MovingAverageConfig::simple(0)).is_err());
        let bad = MovingAverageConfig::new(MovingAverageKind::T3 { volume_factor: 2.0 }, 5);
        assert!(MovingAverage::new(bad).is_err());
    }

    #[test]
    fn test_price_crossing_average() {
        let close = vec![10.0, 10.0, 10.0, 10.0, 9.0, 8.0, 12.0];
        let ma = MovingAverage::new(MovingAverageConfig::simple(3)).unwrap();
        let signals = ma.signals(&BarSet::from_close(close)).unwrap();
        assert_eq!(signals[4], Signal::Sell);
        assert_eq!(signals[6], Signal::Buy);
    }
}
