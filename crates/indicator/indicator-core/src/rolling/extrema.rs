//! Rolling maximum/minimum with monotonic deques, O(n) per series.

use std::collections::VecDeque;

/// Which extreme a [`MonotonicDeque`] tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Max,
    Min,
}

/// Deque of `(index, value)` kept monotonic so the front is the window's
/// extreme.
#[derive(Debug, Clone)]
pub struct MonotonicDeque {
    extreme: Extreme,
    entries: VecDeque<(usize, f64)>,
}

impl MonotonicDeque {
    pub fn new(extreme: Extreme, capacity: usize) -> Self {
        Self {
            extreme,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Push the value at bar `i`, dropping entries it dominates.
    #[inline]
    pub fn push(&mut self, i: usize, value: f64) {
        while let Some(&(_, back)) = self.entries.back() {
            let dominated = match self.extreme {
                Extreme::Max => back <= value,
                Extreme::Min => back >= value,
            };
            if dominated {
                self.entries.pop_back();
            } else {
                break;
            }
        }
        self.entries.push_back((i, value));
    }

    /// Drop entries older than `first`, the first index still in the window.
    #[inline]
    pub fn evict_before(&mut self, first: usize) {
        while let Some(&(j, _)) = self.entries.front() {
            if j < first {
                self.entries.pop_front();
            } else {
                break;
            }
        }
    }

    #[inline]
    pub fn front(&self) -> Option<f64> {
        self.entries.front().map(|&(_, v)| v)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn sweep(data: &[f64], length: usize, extreme: Extreme) -> Vec<f64> {
    let mut deque = MonotonicDeque::new(extreme, length);
    data.iter()
        .enumerate()
        .map(|(i, &value)| {
            deque.push(i, value);
            deque.evict_before((i + 1).saturating_sub(length));
            deque.front().unwrap_or(value)
        })
        .collect()
}

/// Highest value over `[max(0, i - length + 1), i]` for every bar.
pub fn rolling_max(data: &[f64], length: usize) -> Vec<f64> {
    debug_assert!(length >= 1, "rolling window length must be at least 1");
    sweep(data, length.max(1), Extreme::Max)
}

/// Lowest value over `[max(0, i - length + 1), i]` for every bar.
pub fn rolling_min(data: &[f64], length: usize) -> Vec<f64> {
    debug_assert!(length >= 1, "rolling window length must be at least 1");
    sweep(data, length.max(1), Extreme::Min)
}

/// Rolling highest of `high` and lowest of `low`, returned as `(highest, lowest)`.
///
/// Pass the same series twice for the extremes of a single series.
pub fn highest_lowest(high: &[f64], low: &[f64], length: usize) -> (Vec<f64>, Vec<f64>) {
    (rolling_max(high, length), rolling_min(low, length))
}
