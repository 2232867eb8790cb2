//! Technical Indicator Service Provider Interface
//!
//! Defines the bar set consumed by indicators, the output bundle they
//! produce, and the traits implemented by indicator types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use signal_spi::Signal;

// ============================================================================
// Error Types
// ============================================================================

/// Indicator errors.
///
/// Numeric edge cases (short history, zero denominators) are never errors;
/// these variants cover configuration and input shape only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Misaligned series: {series} has {got} bars, expected {expected}")]
    MisalignedSeries {
        series: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Unknown output series: {0}")]
    UnknownOutput(String),
}

impl IndicatorError {
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        IndicatorError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IndicatorError>;

// ============================================================================
// Bar Types
// ============================================================================

/// One OHLCV (Open, High, Low, Close, Volume) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self { open, high, low, close, volume }
    }

    /// Typical price: (High + Low + Close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// True range against the previous close.
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

/// Price composite used as the primary input of an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    Open,
    High,
    Low,
    #[default]
    Close,
    /// (High + Low) / 2
    Median,
    /// (High + Low + Close) / 3
    Typical,
    /// (Open + High + Low + Close) / 4
    Average,
    /// (High + Low + 2 * Close) / 4
    Weighted,
    /// The bar set's pre-selected primary series, or close when none is set.
    Primary,
}

/// Parallel OHLCV series, index-aligned and chronologically ordered.
///
/// Read-only input to every computation; indicators never mutate it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarSet {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
    /// Optional pre-selected primary series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<Vec<f64>>,
}

impl BarSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_close(close: Vec<f64>) -> Self {
        let len = close.len();
        Self {
            open: close.clone(),
            high: close.clone(),
            low: close.clone(),
            close,
            volume: vec![0.0; len],
            primary: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            open: Vec::with_capacity(capacity),
            high: Vec::with_capacity(capacity),
            low: Vec::with_capacity(capacity),
            close: Vec::with_capacity(capacity),
            volume: Vec::with_capacity(capacity),
            primary: None,
        }
    }

    pub fn with_primary(mut self, primary: Vec<f64>) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn push(&mut self, bar: Bar) {
        self.open.push(bar.open);
        self.high.push(bar.high);
        self.low.push(bar.low);
        self.close.push(bar.close);
        self.volume.push(bar.volume);
    }

    pub fn bar(&self, i: usize) -> Option<Bar> {
        Some(Bar::new(
            *self.open.get(i)?,
            *self.high.get(i)?,
            *self.low.get(i)?,
            *self.close.get(i)?,
            *self.volume.get(i)?,
        ))
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Check that every series has as many bars as `close`.
    pub fn validate(&self) -> Result<()> {
        let expected = self.close.len();
        let mut columns: Vec<(&'static str, usize)> = vec![
            ("open", self.open.len()),
            ("high", self.high.len()),
            ("low", self.low.len()),
            ("volume", self.volume.len()),
        ];
        if let Some(primary) = &self.primary {
            columns.push(("primary", primary.len()));
        }

        for (series, got) in columns {
            if got != expected {
                return Err(IndicatorError::MisalignedSeries { series, expected, got });
            }
        }
        Ok(())
    }

    /// Build the input series for `source`.
    ///
    /// Fails with [`IndicatorError::MisalignedSeries`] when the set does not
    /// pass [`BarSet::validate`].
    pub fn input(&self, source: PriceSource) -> Result<Vec<f64>> {
        self.validate()?;
        let n = self.len();
        let zip = |f: &dyn Fn(usize) -> f64| (0..n).map(f).collect::<Vec<f64>>();
        let series = match source {
            PriceSource::Open => self.open.clone(),
            PriceSource::High => self.high.clone(),
            PriceSource::Low => self.low.clone(),
            PriceSource::Close => self.close.clone(),
            PriceSource::Median => zip(&|i| (self.high[i] + self.low[i]) / 2.0),
            PriceSource::Typical => zip(&|i| (self.high[i] + self.low[i] + self.close[i]) / 3.0),
            PriceSource::Average => {
                zip(&|i| (self.open[i] + self.high[i] + self.low[i] + self.close[i]) / 4.0)
            }
            PriceSource::Weighted => {
                zip(&|i| (self.high[i] + self.low[i] + 2.0 * self.close[i]) / 4.0)
            }
            PriceSource::Primary => self.primary.clone().unwrap_or_else(|| self.close.clone()),
        };
        Ok(series)
    }
}

impl FromIterator<Bar> for BarSet {
    fn from_iter<T: IntoIterator<Item = Bar>>(iter: T) -> Self {
        let mut set = BarSet::new();
        for bar in iter {
            set.push(bar);
        }
        set
    }
}

// ============================================================================
// Indicator Output
// ============================================================================

/// Output bundle of one indicator invocation.
///
/// Named series, one signal per bar, and optionally the name of the series
/// a composed computation should consume next. Created fresh per call and
/// owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorOutput {
    series: BTreeMap<String, Vec<f64>>,
    signals: Vec<Signal>,
    primary: Option<String>,
}

impl IndicatorOutput {
    /// Name used by single-output indicators.
    pub const VALUE: &'static str = "Value";

    pub fn new() -> Self {
        Self::default()
    }

    /// Single-output indicator; the series is also the primary output.
    pub fn single(values: Vec<f64>) -> Self {
        Self::new().with_primary(Self::VALUE, values)
    }

    /// Add a named series.
    pub fn with_series(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.series.insert(name.into(), values);
        self
    }

    /// Add a named series and mark it as the primary output.
    pub fn with_primary(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        let name = name.into();
        self.series.insert(name.clone(), values);
        self.primary = Some(name);
        self
    }

    pub fn with_signals(mut self, signals: Vec<Signal>) -> Self {
        self.signals = signals;
        self
    }

    pub fn series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// Like [`IndicatorOutput::series`] but fails on unknown names.
    pub fn require(&self, name: &str) -> Result<&[f64]> {
        self.series(name)
            .ok_or_else(|| IndicatorError::UnknownOutput(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn primary(&self) -> Option<&[f64]> {
        self.primary.as_deref().and_then(|name| self.series(name))
    }

    pub fn primary_name(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Take the primary series out of the bundle, for feeding a composed call.
    pub fn into_primary(mut self) -> Option<Vec<f64>> {
        let name = self.primary.take()?;
        self.series.remove(&name)
    }
}

// ============================================================================
// Core Traits
// ============================================================================

/// Technical indicator trait.
///
/// Implementations compute an output bundle from a bar set in one forward
/// pass; they hold configuration only, never state between calls.
pub trait TechnicalIndicator: Send + Sync {
    /// Indicator name.
    fn name(&self) -> &str;

    /// Compute indicator values.
    fn compute(&self, data: &BarSet) -> Result<IndicatorOutput>;

    /// Bars of history before the output is fully warmed up.
    fn min_periods(&self) -> usize;

    /// Number of named output series.
    fn output_features(&self) -> usize {
        1
    }

    /// Compute from close prices only.
    fn compute_close(&self, close: &[f64]) -> Result<IndicatorOutput> {
        self.compute(&BarSet::from_close(close.to_vec()))
    }
}

/// Incremental computation, one value per pushed input.
pub trait StreamingIndicator {
    type Output;

    /// Update with a new value and return the latest output.
    fn update(&mut self, value: f64) -> Self::Output;

    /// Reset internal state.
    fn reset(&mut self);
}

/// Trait for indicators that generate trading signals.
pub trait SignalIndicator: TechnicalIndicator {
    /// Generate signal series, one per bar.
    fn signals(&self, data: &BarSet) -> Result<Vec<Signal>>;

    /// Signal of the most recent bar.
    fn signal(&self, data: &BarSet) -> Result<Signal> {
        Ok(self.signals(data)?.last().copied().unwrap_or_default())
    }
}
