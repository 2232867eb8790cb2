//! Streaming rolling window: max, min, mean and population standard deviation.

use std::collections::VecDeque;

use indicator_spi::StreamingIndicator;

use super::extrema::{Extreme, MonotonicDeque};
use crate::numeric::saturate;

/// Above this magnitude (2^500) squared deviations may overflow.
const LARGE_MAGNITUDE: f64 = 3.273390607896142e150;

/// Statistics of the current window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowStats {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    pub std_dev: f64,
    /// Number of values in the window, `min(length, pushed)`.
    pub count: usize,
}

/// Trailing window of at most `length` values.
///
/// Windows shorter than `length` at the start of history are reported as-is;
/// the first push yields `max = min = mean = value`, `std_dev = 0`.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    length: usize,
    values: VecDeque<f64>,
    max: MonotonicDeque,
    min: MonotonicDeque,
    pushed: usize,
}

impl RollingWindow {
    /// `length` must be at least 1.
    pub fn new(length: usize) -> Self {
        debug_assert!(length >= 1, "rolling window length must be at least 1");
        let length = length.max(1);
        Self {
            length,
            values: VecDeque::with_capacity(length),
            max: MonotonicDeque::new(Extreme::Max, length),
            min: MonotonicDeque::new(Extreme::Min, length),
            pushed: 0,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Add the next value and return the statistics of the updated window.
    pub fn push(&mut self, value: f64) -> WindowStats {
        let i = self.pushed;
        self.pushed += 1;

        if self.values.len() == self.length {
            self.values.pop_front();
        }
        self.values.push_back(value);

        let first = (i + 1).saturating_sub(self.length);
        self.max.push(i, value);
        self.max.evict_before(first);
        self.min.push(i, value);
        self.min.evict_before(first);

        let max = self.max.front().unwrap_or(value);
        let min = self.min.front().unwrap_or(value);
        let (mean, std_dev) = self.moments(value, max.abs().max(min.abs()));
        WindowStats {
            max,
            min,
            mean,
            std_dev,
            count: self.values.len(),
        }
    }

    /// Mean and population standard deviation from the mean and mean of
    /// squares of the window, shifted by `pivot` to keep cancellation small.
    ///
    /// Windows holding magnitudes near the top of the `f64` range are
    /// evaluated in units of a power of two, which is exact, so squared
    /// deviations cannot overflow.
    fn moments(&self, pivot: f64, magnitude: f64) -> (f64, f64) {
        let scale = if magnitude > LARGE_MAGNITUDE { 2f64.powi(600) } else { 1.0 };
        let pivot = pivot / scale;
        let n = self.values.len() as f64;
        let (sum, sum_sq) = self.values.iter().fold((0.0, 0.0), |(s, sq), &v| {
            let d = v / scale - pivot;
            (s + d, sq + d * d)
        });
        let mean_shift = sum / n;
        let variance = (sum_sq / n - mean_shift * mean_shift).max(0.0);
        (
            saturate((pivot + mean_shift) * scale),
            saturate(variance.sqrt() * scale),
        )
    }

    pub fn reset(&mut self) {
        self.values.clear();
        self.max.clear();
        self.min.clear();
        self.pushed = 0;
    }
}

impl StreamingIndicator for RollingWindow {
    type Output = WindowStats;

    fn update(&mut self, value: f64) -> WindowStats {
        self.push(value)
    }

    fn reset(&mut self) {
        RollingWindow::reset(self);
    }
}
