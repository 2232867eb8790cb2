//! Access to prior bars and per-invocation accumulators.
//!
//! Every kernel reads history through [`prior_or_default`] or [`History`], so
//! the warm-up policy (what a missing prior bar is worth) lives in one place.

use crate::numeric::saturate;

/// `series[i - offset]`, or `default` when that bar precedes the series.
#[inline]
pub fn prior_or_default(series: &[f64], i: usize, offset: usize, default: f64) -> f64 {
    if offset <= i {
        series.get(i - offset).copied().unwrap_or(default)
    } else {
        default
    }
}

/// `series[i - offset]`, or `0.0` before the start of the series.
#[inline]
pub fn prior_or_zero(series: &[f64], i: usize, offset: usize) -> f64 {
    prior_or_default(series, i, offset, 0.0)
}

/// Append-only output buffer owned by one kernel invocation.
///
/// Recurrences push one value per bar and read their own earlier outputs
/// with [`History::back`]; nothing outlives the call that created it.
#[derive(Debug, Clone, Default)]
pub struct History {
    values: Vec<f64>,
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append the next output, saturated so later bars never read an
    /// infinity back.
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.values.push(saturate(value));
    }

    /// Value pushed `offset` bars ago (`back(1)` is the latest), or `0.0`.
    #[inline]
    pub fn back(&self, offset: usize) -> f64 {
        self.back_or(offset, 0.0)
    }

    /// Value pushed `offset` bars ago, or `default` when there is none.
    #[inline]
    pub fn back_or(&self, offset: usize, default: f64) -> f64 {
        if offset == 0 || offset > self.values.len() {
            default
        } else {
            self.values[self.values.len() - offset]
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}
