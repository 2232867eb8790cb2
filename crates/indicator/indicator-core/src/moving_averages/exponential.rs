//! Exponential family: `alpha * x + (1 - alpha) * prev` and fixed linear
//! combinations of nested passes.
//!
//! The output before the first bar counts as `0`. Nested smoothers call
//! [`ema`] once per stage and keep every stage's series.

use crate::history::{prior_or_zero, History};
use crate::numeric::{ema_alpha, saturating_dot, saturating_ratio};

/// Exponential recurrence with a fixed smoothing factor.
pub fn ema_with_alpha(data: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = History::with_capacity(data.len());
    for &x in data {
        let prev = out.back(1);
        out.push(saturating_dot([(alpha, x), (1.0 - alpha, prev)]));
    }
    out.into_vec()
}

/// EMA with `alpha = 2 / (length + 1)`.
pub fn ema(data: &[f64], length: usize) -> Vec<f64> {
    ema_with_alpha(data, ema_alpha(length))
}

/// Wilder smoothing, `alpha = 1 / length`.
pub fn wilder(data: &[f64], length: usize) -> Vec<f64> {
    ema_with_alpha(data, 1.0 / length.max(1) as f64)
}

/// `stages` nested EMA passes; element `k` is the `k + 1`-th smoothing.
fn cascade(data: &[f64], length: usize, stages: usize) -> Vec<Vec<f64>> {
    let mut passes: Vec<Vec<f64>> = Vec::with_capacity(stages);
    for _ in 0..stages {
        let next = ema(passes.last().map_or(data, |p| p.as_slice()), length);
        passes.push(next);
    }
    passes
}

/// Weighted sum of equally long series.
fn combine<S: AsRef<[f64]>>(series: &[S], coefficients: &[f64]) -> Vec<f64> {
    let n = series.first().map_or(0, |s| s.as_ref().len());
    (0..n)
        .map(|i| {
            saturating_dot(
                coefficients
                    .iter()
                    .zip(series)
                    .map(|(c, s)| (*c, s.as_ref()[i])),
            )
        })
        .collect()
}

pub fn dema(data: &[f64], length: usize) -> Vec<f64> {
    let e = cascade(data, length, 2);
    combine(&[&e[0], &e[1]], &[2.0, -1.0])
}

pub fn tema(data: &[f64], length: usize) -> Vec<f64> {
    let e = cascade(data, length, 3);
    combine(&[&e[0], &e[1], &e[2]], &[3.0, -3.0, 1.0])
}

pub fn qema(data: &[f64], length: usize) -> Vec<f64> {
    let e = cascade(data, length, 4);
    combine(&[&e[0], &e[1], &e[2], &e[3]], &[4.0, -6.0, 4.0, -1.0])
}

/// Generalized DEMA: `e1 * (1 + v) - e2 * v`.
pub fn generalized_double(data: &[f64], length: usize, volume_factor: f64) -> Vec<f64> {
    let e = cascade(data, length, 2);
    combine(&[&e[0], &e[1]], &[1.0 + volume_factor, -volume_factor])
}

/// Tillson T3: six cascaded EMAs combined as
/// `c1*e6 + c2*e5 + c3*e4 + c4*e3`.
pub fn t3(data: &[f64], length: usize, volume_factor: f64) -> Vec<f64> {
    let vf = volume_factor;
    let vf2 = vf * vf;
    let vf3 = vf2 * vf;

    let c1 = -vf3;
    let c2 = 3.0 * vf2 + 3.0 * vf3;
    let c3 = -6.0 * vf2 - 3.0 * vf - 3.0 * vf3;
    let c4 = 1.0 + 3.0 * vf + vf3 + 3.0 * vf2;

    let e = cascade(data, length, 6);
    combine(&[&e[5], &e[4], &e[3], &e[2]], &[c1, c2, c3, c4])
}

/// Zero-lag EMA: EMA of `2 * x[i] - x[i - (length - 1) / 2]`.
pub fn zlema(data: &[f64], length: usize) -> Vec<f64> {
    let lag = length.saturating_sub(1) / 2;
    let adjusted: Vec<f64> = (0..data.len())
        .map(|i| saturating_dot([(2.0, data[i]), (-1.0, prior_or_zero(data, i, lag))]))
        .collect();
    ema(&adjusted, length)
}

/// Zero-lag TEMA: `2 * TEMA(x) - TEMA(TEMA(x))`.
pub fn zltema(data: &[f64], length: usize) -> Vec<f64> {
    let t1 = tema(data, length);
    let t2 = tema(&t1, length);
    combine(&[&t1, &t2], &[2.0, -1.0])
}

/// McNicholl: `((2 - a) * e1 - e2) / (1 - a)`.
pub fn mcnicholl(data: &[f64], length: usize) -> Vec<f64> {
    let alpha = ema_alpha(length);
    let e = cascade(data, length, 2);
    e[0].iter()
        .zip(&e[1])
        .map(|(e1, e2)| saturating_ratio([(2.0 - alpha, *e1), (-1.0, *e2)], 1.0 - alpha))
        .collect()
}

/// Hull construction with EMAs in place of WMAs.
pub fn exponential_hull(data: &[f64], length: usize) -> Vec<f64> {
    let half = (length / 2).max(1);
    let root = ((length as f64).sqrt().floor() as usize).max(1);
    let fast = ema(data, half);
    let slow = ema(data, length);
    let raw = combine(&[&fast, &slow], &[2.0, -1.0]);
    ema(&raw, root)
}

pub fn double_smoothed(data: &[f64], length: usize) -> Vec<f64> {
    ema(&ema(data, length), length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ema_starts_from_zero_prior() {
        let out = ema(&[10.0, 10.0], 3);
        assert_relative_eq!(out[0], 5.0);
        assert_relative_eq!(out[1], 7.5);
    }

    #[test]
    fn test_wilder_alpha() {
        let out = wilder(&[4.0, 8.0], 4);
        assert_relative_eq!(out[0], 1.0);
        assert_relative_eq!(out[1], 0.25 * 8.0 + 0.75 * 1.0);
    }

    #[test]
    fn test_length_one_is_identity() {
        let data = [3.0, -1.0, 7.5, 2.0];
        assert_eq!(ema(&data, 1), data.to_vec());
        assert_eq!(dema(&data, 1), data.to_vec());
        assert_eq!(tema(&data, 1), data.to_vec());
    }

    #[test]
    fn test_nested_smoothers_converge_on_constant() {
        let data = vec![25.0; 400];
        for out in [
            dema(&data, 10),
            tema(&data, 10),
            qema(&data, 10),
            t3(&data, 5, 0.7),
            generalized_double(&data, 10, 0.7),
            zlema(&data, 10),
            zltema(&data, 10),
            mcnicholl(&data, 10),
            exponential_hull(&data, 10),
            double_smoothed(&data, 10),
        ] {
            assert_eq!(out.len(), data.len());
            assert_relative_eq!(out[399], 25.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_t3_with_zero_volume_factor_is_triple_ema() {
        let data: Vec<f64> = (0..30).map(|i| (i as f64 * 0.3).sin() * 10.0).collect();
        let t3 = t3(&data, 4, 0.0);
        let e3 = ema(&ema(&ema(&data, 4), 4), 4);
        for (a, b) in t3.iter().zip(&e3) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_nested_stages_saturate_on_overflow() {
        let data = [1e308, -1e308, 1e308, -1e308, 1e308, -1e308];
        for out in [
            ema(&data, 2),
            dema(&data, 2),
            tema(&data, 3),
            qema(&data, 3),
            t3(&data, 3, 0.7),
            zlema(&data, 3),
            zltema(&data, 3),
            mcnicholl(&data, 3),
            exponential_hull(&data, 4),
        ] {
            assert!(out.iter().all(|v| v.is_finite()), "{out:?}");
        }
        // 2 * x[i] - x[i] with no lag is x[i] again, even though 2 * x[i] overflows.
        assert_relative_eq!(zlema(&data, 1)[0], 1e308, max_relative = 1e-12);
        assert_relative_eq!(dema(&data, 1)[4], 1e308, max_relative = 1e-12);
    }

    #[test]
    fn test_dema_reduces_lag_on_trend() {
        let trend: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let e = ema(&trend, 10);
        let d = dema(&trend, 10);
        assert!((trend[99] - d[99]).abs() < (trend[99] - e[99]).abs());
    }
}
