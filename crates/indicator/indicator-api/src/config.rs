//! Indicator configuration types.

use indicator_spi::{IndicatorError, PriceSource, Result};
use serde::{Deserialize, Serialize};
use signal_api::{BandBreakout, BoundedOscillator, Crossover};

use crate::kind::MovingAverageKind;

fn ensure_length(name: &str, length: usize) -> Result<()> {
    if length == 0 {
        let err = IndicatorError::invalid(name, "must be at least 1");
        tracing::warn!(%err, "rejected indicator configuration");
        return Err(err);
    }
    Ok(())
}

fn ensure_signal(result: signal_api::Result<()>) -> Result<()> {
    result.map_err(|err| {
        tracing::warn!(%err, "rejected signal configuration");
        IndicatorError::invalid("signal", err.to_string())
    })
}

// ============================================================================
// Moving Averages
// ============================================================================

/// Moving-average kernel configuration: kind, its parameters and length.
///
/// ```json
/// { "kind": "kaufman_adaptive", "fast_length": 2, "slow_length": 30, "length": 10 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageConfig {
    #[serde(flatten)]
    pub kind: MovingAverageKind,
    pub length: usize,
}

impl MovingAverageConfig {
    pub fn new(kind: MovingAverageKind, length: usize) -> Self {
        Self { kind, length }
    }

    pub fn simple(length: usize) -> Self {
        Self::new(MovingAverageKind::Simple, length)
    }

    pub fn exponential(length: usize) -> Self {
        Self::new(MovingAverageKind::Exponential, length)
    }

    pub fn wilder(length: usize) -> Self {
        Self::new(MovingAverageKind::Wilder, length)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_length("length", self.length)?;
        self.kind.validate().map_err(|err| {
            tracing::warn!(kind = self.kind.name(), %err, "rejected moving average parameters");
            err
        })
    }
}

impl Default for MovingAverageConfig {
    fn default() -> Self {
        Self::simple(14)
    }
}

// ============================================================================
// Rolling Windows
// ============================================================================

/// Rolling-window statistics configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingConfig {
    pub length: usize,
}

impl RollingConfig {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_length("length", self.length)
    }
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self { length: 20 }
    }
}

// ============================================================================
// Bands
// ============================================================================

/// Moving-average band configuration (Bollinger-style).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageBandsConfig {
    /// Middle band kernel.
    pub average: MovingAverageConfig,
    /// Standard deviation window; defaults to the average length.
    #[serde(default)]
    pub std_length: Option<usize>,
    /// Band width in standard deviations.
    pub multiplier: f64,
    #[serde(default)]
    pub source: PriceSource,
    #[serde(default)]
    pub signal: BandBreakout,
}

impl MovingAverageBandsConfig {
    pub fn new(average: MovingAverageConfig, multiplier: f64) -> Self {
        Self {
            average,
            std_length: None,
            multiplier,
            source: PriceSource::Close,
            signal: BandBreakout::default(),
        }
    }

    pub fn std_length(&self) -> usize {
        self.std_length.unwrap_or(self.average.length)
    }

    pub fn validate(&self) -> Result<()> {
        self.average.validate()?;
        ensure_length("std_length", self.std_length())?;
        if !self.multiplier.is_finite() || self.multiplier < 0.0 {
            return Err(IndicatorError::invalid("multiplier", "must be finite and non-negative"));
        }
        Ok(())
    }
}

impl Default for MovingAverageBandsConfig {
    fn default() -> Self {
        Self::new(MovingAverageConfig::simple(20), 2.0)
    }
}

// ============================================================================
// Oscillators
// ============================================================================

/// Relative Strength Index configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiConfig {
    pub length: usize,
    /// Smoothing kernel for average gain and loss (Wilder by default).
    #[serde(default = "RsiConfig::default_smoothing")]
    pub smoothing: MovingAverageKind,
    #[serde(default)]
    pub source: PriceSource,
    #[serde(default)]
    pub signal: BoundedOscillator,
}

impl RsiConfig {
    fn default_smoothing() -> MovingAverageKind {
        MovingAverageKind::Wilder
    }

    pub fn new(length: usize) -> Self {
        Self {
            length,
            smoothing: Self::default_smoothing(),
            source: PriceSource::Close,
            signal: BoundedOscillator::default(),
        }
    }

    pub fn with_thresholds(mut self, overbought: f64, oversold: f64) -> Self {
        self.signal.overbought = overbought;
        self.signal.oversold = oversold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        MovingAverageConfig::new(self.smoothing, self.length).validate()?;
        ensure_signal(self.signal.validate())
    }
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self::new(14)
    }
}

/// Stochastic Oscillator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticConfig {
    /// Highest-high / lowest-low window.
    pub length: usize,
    /// %K smoothing.
    pub k_smoothing: MovingAverageConfig,
    /// %D smoothing of %K.
    pub d_smoothing: MovingAverageConfig,
    #[serde(default)]
    pub signal: BoundedOscillator,
}

impl StochasticConfig {
    pub fn new(length: usize, k_length: usize, d_length: usize) -> Self {
        Self {
            length,
            k_smoothing: MovingAverageConfig::simple(k_length),
            d_smoothing: MovingAverageConfig::simple(d_length),
            signal: BoundedOscillator {
                overbought: 80.0,
                oversold: 20.0,
                reversed: false,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_length("length", self.length)?;
        self.k_smoothing.validate()?;
        self.d_smoothing.validate()?;
        ensure_signal(self.signal.validate())
    }
}

impl Default for StochasticConfig {
    fn default() -> Self {
        Self::new(14, 3, 3)
    }
}

// ============================================================================
// Trend
// ============================================================================

/// Fast/slow moving-average crossover configuration (MACD-style).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossoverConfig {
    pub fast: MovingAverageConfig,
    pub slow: MovingAverageConfig,
    /// Smoothing of the fast-slow spread.
    pub signal_line: MovingAverageConfig,
    #[serde(default)]
    pub source: PriceSource,
    #[serde(default)]
    pub signal: Crossover,
}

impl CrossoverConfig {
    pub fn new(fast: MovingAverageConfig, slow: MovingAverageConfig, signal_line: MovingAverageConfig) -> Self {
        Self {
            fast,
            slow,
            signal_line,
            source: PriceSource::Close,
            signal: Crossover::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.fast.validate()?;
        self.slow.validate()?;
        self.signal_line.validate()?;
        if self.fast.length >= self.slow.length {
            let err = IndicatorError::invalid("fast", "length must be shorter than slow length");
            tracing::warn!(%err, "rejected indicator configuration");
            return Err(err);
        }
        Ok(())
    }
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self::new(
            MovingAverageConfig::exponential(12),
            MovingAverageConfig::exponential(26),
            MovingAverageConfig::exponential(9),
        )
    }
}

/// Slope-direction configuration: bullish when the average rises by more
/// than `threshold`, bearish when it falls by more than `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeConfig {
    pub average: MovingAverageConfig,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub source: PriceSource,
}

impl SlopeConfig {
    pub fn new(average: MovingAverageConfig) -> Self {
        Self {
            average,
            threshold: 0.0,
            source: PriceSource::Close,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.average.validate()?;
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(IndicatorError::invalid("threshold", "must be finite and non-negative"));
        }
        Ok(())
    }
}

impl Default for SlopeConfig {
    fn default() -> Self {
        Self::new(MovingAverageConfig::exponential(20))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average_config_json() {
        let config: MovingAverageConfig = serde_json::from_str(
            r#"{ "kind": "kaufman_adaptive", "fast_length": 2, "slow_length": 30, "length": 10 }"#,
        )
        .unwrap();
        assert_eq!(
            config,
            MovingAverageConfig::new(
                MovingAverageKind::KaufmanAdaptive { fast_length: 2, slow_length: 30 },
                10
            )
        );

        let config: MovingAverageConfig =
            serde_json::from_str(r#"{ "kind": "t3", "volume_factor": 0.5, "length": 5 }"#).unwrap();
        assert_eq!(config.kind, MovingAverageKind::T3 { volume_factor: 0.5 });
        assert_eq!(config.length, 5);
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(MovingAverageConfig::simple(0).validate().is_err());
        assert!(RollingConfig::new(0).validate().is_err());
        assert!(MovingAverageConfig::simple(1).validate().is_ok());
    }

    #[test]
    fn test_defaults_validate() {
        assert!(MovingAverageConfig::default().validate().is_ok());
        assert!(RollingConfig::default().validate().is_ok());
        assert!(MovingAverageBandsConfig::default().validate().is_ok());
        assert!(RsiConfig::default().validate().is_ok());
        assert!(StochasticConfig::default().validate().is_ok());
        assert!(CrossoverConfig::default().validate().is_ok());
        assert!(SlopeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rsi_thresholds() {
        assert!(RsiConfig::new(14).with_thresholds(30.0, 70.0).validate().is_err());
        let config: RsiConfig = serde_json::from_str(r#"{ "length": 7 }"#).unwrap();
        assert_eq!(config.smoothing, MovingAverageKind::Wilder);
        assert_eq!(config.signal.overbought, 70.0);
    }

    #[test]
    fn test_crossover_lengths() {
        let config = CrossoverConfig::new(
            MovingAverageConfig::exponential(26),
            MovingAverageConfig::exponential(12),
            MovingAverageConfig::exponential(9),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bands_std_length_defaults_to_average() {
        let config = MovingAverageBandsConfig::default();
        assert_eq!(config.std_length(), 20);
        let json = serde_json::to_string(&config).unwrap();
        let back: MovingAverageBandsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
