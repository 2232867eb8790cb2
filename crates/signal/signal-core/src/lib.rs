//! Signal Core
//!
//! Core types, error handling, and delta helpers for trading signals.

pub use signal_spi::{Signal, SignalClassifier, SignalInputs};
use thiserror::Error;

/// Result type for signal operations
pub type Result<T> = std::result::Result<T, SignalError>;

/// Errors that can occur while configuring a classifier
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Input series that must be index-aligned have different lengths
    #[error("Series length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}

/// Value at `i - 1`, or `0.0` at the first bar.
#[inline]
pub fn prior(series: &[f64], i: usize) -> f64 {
    if i >= 1 {
        series.get(i - 1).copied().unwrap_or(0.0)
    } else {
        0.0
    }
}

/// Bar-over-bar change `x[i] - x[i-1]`, with the missing prior treated as `0`.
pub fn deltas(series: &[f64]) -> Vec<f64> {
    (0..series.len())
        .map(|i| series[i] - prior(series, i))
        .collect()
}

/// Value at `i - 1`, or the value at `i` itself at the first bar.
///
/// Level-based modes (oscillator thresholds, bands) read a missing prior as
/// "unchanged", so the first bar never registers a crossing.
#[inline]
pub fn prior_or_current(series: &[f64], i: usize) -> f64 {
    let current = series.get(i).copied().unwrap_or(0.0);
    if i >= 1 {
        series.get(i - 1).copied().unwrap_or(current)
    } else {
        current
    }
}

/// Bar-over-bar change with the first bar read as unchanged (`0`).
pub fn level_deltas(series: &[f64]) -> Vec<f64> {
    (0..series.len())
        .map(|i| series[i] - prior_or_current(series, i))
        .collect()
}

/// Fail with [`SignalError::LengthMismatch`] unless both series line up.
pub fn ensure_aligned(left: &[f64], right: &[f64]) -> Result<()> {
    if left.len() != right.len() {
        return Err(SignalError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}
