//! Fixed-window averages: weighted sums over the trailing `length` inputs.
//!
//! Weights are indexed by offset from the current bar (`0` = current). Bars
//! before the start of the series contribute `0` while the denominator stays
//! the full weight sum, so the first `length - 1` outputs are pulled toward
//! zero. [`sma`] and [`median`] are the exceptions and use the partial window.

use std::f64::consts::PI;

use crate::history::prior_or_zero;
use crate::numeric::{saturate, saturating_dot, saturating_ratio};
use crate::rolling::rolling_mean;

/// `sum(w[k] * x[i - k]) / sum(w)` for every bar.
pub(crate) fn weighted_sum(data: &[f64], weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    (0..data.len())
        .map(|i| {
            let terms = weights
                .iter()
                .enumerate()
                .map(|(k, w)| (*w, prior_or_zero(data, i, k)));
            saturating_ratio(terms, total)
        })
        .collect()
}

/// Simple moving average over the (possibly partial) trailing window.
pub fn sma(data: &[f64], length: usize) -> Vec<f64> {
    rolling_mean(data, length)
}

/// Linearly weighted: the current bar weighs `length`, the oldest weighs `1`.
pub fn wma(data: &[f64], length: usize) -> Vec<f64> {
    let weights: Vec<f64> = (0..length).map(|k| (length - k) as f64).collect();
    weighted_sum(data, &weights)
}

/// SMA of an SMA; the two lengths add up to `length + 1`.
pub fn triangular(data: &[f64], length: usize) -> Vec<f64> {
    let (first, second) = if length % 2 == 1 {
        ((length + 1) / 2, (length + 1) / 2)
    } else {
        (length / 2, length / 2 + 1)
    };
    sma(&sma(data, first), second)
}

/// Triangular ramp weights peaking in the middle of the window.
pub fn symmetric(data: &[f64], length: usize) -> Vec<f64> {
    let weights: Vec<f64> = (0..length).map(|k| (k + 1).min(length - k) as f64).collect();
    weighted_sum(data, &weights)
}

/// Half-period sine weights.
pub fn sine(data: &[f64], length: usize) -> Vec<f64> {
    let weights: Vec<f64> = (0..length)
        .map(|k| (PI * (k + 1) as f64 / (length + 1) as f64).sin())
        .collect();
    weighted_sum(data, &weights)
}

/// Hull: `WMA(2 * WMA(n/2) - WMA(n), sqrt(n))`.
pub fn hull(data: &[f64], length: usize) -> Vec<f64> {
    let half = (length / 2).max(1);
    let root = ((length as f64).sqrt().floor() as usize).max(1);
    let fast = wma(data, half);
    let slow = wma(data, length);
    let raw: Vec<f64> = fast
        .iter()
        .zip(&slow)
        .map(|(f, s)| saturating_dot([(2.0, *f), (-1.0, *s)]))
        .collect();
    wma(&raw, root)
}

/// Arnaud Legoux: Gaussian weights centred at `offset * (length - 1)`
/// counted from the oldest bar of the window.
pub fn alma(data: &[f64], length: usize, offset: f64, sigma: f64) -> Vec<f64> {
    let m = offset * (length as f64 - 1.0);
    let s = length as f64 / sigma;
    let weights: Vec<f64> = (0..length)
        .map(|k| {
            let p = (length - 1 - k) as f64;
            (-(p - m).powi(2) / (2.0 * s * s)).exp()
        })
        .collect();
    weighted_sum(data, &weights)
}

/// End point of the least-squares line through the window.
pub fn least_squares(data: &[f64], length: usize) -> Vec<f64> {
    let w = wma(data, length);
    let s = sma(data, length);
    w.iter()
        .zip(&s)
        .map(|(w, s)| saturating_dot([(3.0, *w), (-2.0, *s)]))
        .collect()
}

/// Binomial weights `C(length - 1, k)`, built in log space and scaled by the
/// largest so wide windows do not overflow.
pub fn pascal(data: &[f64], length: usize) -> Vec<f64> {
    let n = length.saturating_sub(1);
    let mut log_weights = Vec::with_capacity(length);
    let mut acc = 0.0;
    for k in 0..length {
        if k > 0 {
            acc += ((n - k + 1) as f64).ln() - (k as f64).ln();
        }
        log_weights.push(acc);
    }
    let peak = log_weights.iter().copied().fold(f64::MIN, f64::max);
    let weights: Vec<f64> = log_weights.iter().map(|lw| (lw - peak).exp()).collect();
    weighted_sum(data, &weights)
}

/// Median of the (possibly partial) trailing window.
pub fn median(data: &[f64], length: usize) -> Vec<f64> {
    let mut window = Vec::with_capacity(length);
    (0..data.len())
        .map(|i| {
            window.clear();
            window.extend_from_slice(&data[(i + 1).saturating_sub(length)..=i]);
            window.sort_by(|a, b| a.total_cmp(b));
            let mid = window.len() / 2;
            if window.len() % 2 == 0 {
                saturate(window[mid - 1] / 2.0 + window[mid] / 2.0)
            } else {
                window[mid]
            }
        })
        .collect()
}
