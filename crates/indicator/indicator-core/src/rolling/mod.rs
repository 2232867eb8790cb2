//! Rolling Window Statistics Engine
//!
//! Causal windowed maximum, minimum, mean and population standard deviation
//! over `[max(0, i - length + 1), i]`. Every function is total for
//! `length >= 1` and returns one value per input bar.

mod extrema;
mod window;

pub use extrema::{highest_lowest, rolling_max, rolling_min, Extreme, MonotonicDeque};
pub use window::{RollingWindow, WindowStats};

use indicator_api::RollingConfig;

/// All four rolling statistics of one series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RollingStats {
    pub max: Vec<f64>,
    pub min: Vec<f64>,
    pub mean: Vec<f64>,
    pub std_dev: Vec<f64>,
}

impl RollingStats {
    /// Sweep a [`RollingWindow`] over `data`.
    pub fn compute(data: &[f64], length: usize) -> Self {
        let n = data.len();
        let mut stats = RollingStats {
            max: Vec::with_capacity(n),
            min: Vec::with_capacity(n),
            mean: Vec::with_capacity(n),
            std_dev: Vec::with_capacity(n),
        };
        let mut window = RollingWindow::new(length);
        for &value in data {
            let s = window.push(value);
            stats.max.push(s.max);
            stats.min.push(s.min);
            stats.mean.push(s.mean);
            stats.std_dev.push(s.std_dev);
        }
        stats
    }

    pub fn from_config(data: &[f64], config: RollingConfig) -> Self {
        Self::compute(data, config.length)
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}

/// Arithmetic mean over the trailing window.
pub fn rolling_mean(data: &[f64], length: usize) -> Vec<f64> {
    let mut window = RollingWindow::new(length);
    data.iter().map(|&v| window.push(v).mean).collect()
}

/// Population standard deviation over the trailing window.
pub fn rolling_std_dev(data: &[f64], length: usize) -> Vec<f64> {
    let mut window = RollingWindow::new(length);
    data.iter().map(|&v| window.push(v).std_dev).collect()
}
