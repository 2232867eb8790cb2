//! Ehlers-style filters: linear combinations of current and prior inputs and
//! prior outputs.
//!
//! Coefficients are derived from the length once, before the sweep. Low-pass
//! filters pass the input through for the bars before their poles are
//! filled; the high-pass filter emits `0` there instead.

use std::f64::consts::{PI, SQRT_2};

use crate::history::{prior_or_default, History};
use crate::numeric::{safe_div, saturating_dot, saturating_ratio};

/// Recursive part of a filter: weights on the previous outputs.
#[derive(Debug, Clone, Copy)]
struct Poles<const N: usize> {
    feedback: [f64; N],
}

impl<const N: usize> Poles<N> {
    /// Run `out[i] = input_term(i) + sum(feedback[k] * out[i - 1 - k])`,
    /// passing `data[i]` through while `i < N`.
    fn sweep(&self, data: &[f64], input_term: impl Fn(usize) -> f64) -> Vec<f64> {
        let mut out = History::with_capacity(data.len());
        for (i, &x) in data.iter().enumerate() {
            if i < N {
                out.push(x);
                continue;
            }
            let recursive = self
                .feedback
                .iter()
                .enumerate()
                .map(|(k, c)| (*c, out.back(k + 1)));
            out.push(saturating_dot(recursive.chain([(1.0, input_term(i))])));
        }
        out.into_vec()
    }
}

fn two_pole(length: usize) -> (f64, f64) {
    let arg = SQRT_2 * PI / length as f64;
    let a1 = (-arg).exp();
    (a1, 2.0 * a1 * arg.cos())
}

fn three_pole(length: usize) -> (f64, f64, f64) {
    let arg = PI / length as f64;
    let a1 = (-arg).exp();
    let b1 = 2.0 * a1 * (1.738 * arg).cos();
    (a1, b1, a1 * a1)
}

pub fn super_smoother_2(data: &[f64], length: usize) -> Vec<f64> {
    let (a1, b1) = two_pole(length);
    let c2 = b1;
    let c3 = -a1 * a1;
    let c1 = 1.0 - c2 - c3;
    let half = c1 / 2.0;
    Poles { feedback: [c2, c3] }.sweep(data, |i| saturating_dot([(half, data[i]), (half, data[i - 1])]))
}

pub fn super_smoother_3(data: &[f64], length: usize) -> Vec<f64> {
    let (_, b1, c1) = three_pole(length);
    let c2 = b1 + c1;
    let c3 = -(c1 + b1 * c1);
    let c4 = c1 * c1;
    let gain = 1.0 - c2 - c3 - c4;
    Poles { feedback: [c2, c3, c4] }.sweep(data, |i| saturating_dot([(gain, data[i])]))
}

pub fn butterworth_2(data: &[f64], length: usize) -> Vec<f64> {
    let (a1, b1) = two_pole(length);
    let c2 = b1;
    let c3 = -a1 * a1;
    let gain = (1.0 - b1 + a1 * a1) / 4.0;
    Poles { feedback: [c2, c3] }.sweep(data, |i| {
        saturating_dot([(gain, data[i]), (2.0 * gain, data[i - 1]), (gain, data[i - 2])])
    })
}

pub fn butterworth_3(data: &[f64], length: usize) -> Vec<f64> {
    let (_, b1, c1) = three_pole(length);
    let c2 = b1 + c1;
    let c3 = -(c1 + b1 * c1);
    let c4 = c1 * c1;
    let gain = (1.0 - b1 + c1) * (1.0 - c1) / 8.0;
    Poles { feedback: [c2, c3, c4] }.sweep(data, |i| {
        saturating_dot([
            (gain, data[i]),
            (3.0 * gain, data[i - 1]),
            (3.0 * gain, data[i - 2]),
            (gain, data[i - 3]),
        ])
    })
}

/// Two-pole Gaussian. A length too short to give a positive `alpha` passes
/// the input through unchanged.
pub fn gaussian_2(data: &[f64], length: usize) -> Vec<f64> {
    let beta = 1.0 - (2.0 * PI / length as f64).cos();
    let alpha = -beta + (beta * beta + 2.0 * beta).sqrt();
    let alpha = if length > 1 && alpha > 0.0 { alpha.min(1.0) } else { 1.0 };
    let decay = 1.0 - alpha;
    Poles {
        feedback: [2.0 * decay, -decay * decay],
    }
    .sweep(data, |i| saturating_dot([(alpha * alpha, data[i])]))
}

/// Two-pole high-pass; `0` for the first two bars.
pub fn high_pass_2(data: &[f64], length: usize) -> Vec<f64> {
    let arg = 0.707 * 2.0 * PI / length as f64;
    let alpha = safe_div(arg.cos() + arg.sin() - 1.0, arg.cos()).clamp(0.0, 1.0);
    let gain = (1.0 - alpha / 2.0).powi(2);
    let c2 = 2.0 * (1.0 - alpha);
    let c3 = -(1.0 - alpha).powi(2);

    let mut out = History::with_capacity(data.len());
    for i in 0..data.len() {
        if i < 2 {
            out.push(0.0);
            continue;
        }
        out.push(saturating_dot([
            (gain, data[i]),
            (-2.0 * gain, data[i - 1]),
            (gain, data[i - 2]),
            (c2, out.back(1)),
            (c3, out.back(2)),
        ]));
    }
    out.into_vec()
}

/// High-pass at `length`, then a two-pole super smoother at `smooth_length`.
pub fn roofing(data: &[f64], length: usize, smooth_length: usize) -> Vec<f64> {
    super_smoother_2(&high_pass_2(data, length), smooth_length)
}

/// Input minus its high-pass component.
pub fn decycler(data: &[f64], length: usize) -> Vec<f64> {
    let hp = high_pass_2(data, length);
    data.iter()
        .zip(&hp)
        .map(|(x, h)| saturating_dot([(1.0, *x), (-1.0, *h)]))
        .collect()
}

/// Four-element Laguerre filter. Only `gamma` shapes the response; the
/// stages start at the first input.
pub fn laguerre(data: &[f64], gamma: f64) -> Vec<f64> {
    let Some(&first) = data.first() else {
        return Vec::new();
    };
    let mut stages = [first; 4];
    data.iter()
        .map(|&x| {
            let prev = stages;
            stages[0] = saturating_dot([(1.0 - gamma, x), (gamma, prev[0])]);
            for k in 1..4 {
                stages[k] = saturating_dot([(-gamma, stages[k - 1]), (1.0, prev[k - 1]), (gamma, prev[k])]);
            }
            saturating_ratio(
                [(1.0, stages[0]), (2.0, stages[1]), (2.0, stages[2]), (1.0, stages[3])],
                6.0,
            )
        })
        .collect()
}

/// Ehlers instantaneous trendline. The first seven bars are a short FIR
/// smooth with missing priors taken as the current input.
pub fn instantaneous_trendline(data: &[f64], length: usize) -> Vec<f64> {
    let a = 2.0 / (length as f64 + 1.0);
    let a2 = a * a;
    let mut out = History::with_capacity(data.len());
    for (i, &x) in data.iter().enumerate() {
        let x1 = prior_or_default(data, i, 1, x);
        let x2 = prior_or_default(data, i, 2, x);
        let value = if i < 7 {
            saturating_ratio([(1.0, x), (2.0, x1), (1.0, x2)], 4.0)
        } else {
            saturating_dot([
                (a - a2 / 4.0, x),
                (0.5 * a2, x1),
                (-(a - 0.75 * a2), x2),
                (2.0 * (1.0 - a), out.back(1)),
                (-(1.0 - a).powi(2), out.back(2)),
            ])
        };
        out.push(value);
    }
    out.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wave(n: usize, period: f64) -> Vec<f64> {
        (0..n).map(|i| (2.0 * PI * i as f64 / period).sin()).collect()
    }

    #[test]
    fn test_low_pass_unit_dc_gain() {
        let data = vec![12.5; 300];
        let filters: [fn(&[f64], usize) -> Vec<f64>; 6] = [
            super_smoother_2,
            super_smoother_3,
            butterworth_2,
            butterworth_3,
            gaussian_2,
            instantaneous_trendline,
        ];
        for f in filters {
            let out = f(&data, 10);
            assert_relative_eq!(out[299], 12.5, epsilon = 1e-6);
        }
        assert_relative_eq!(laguerre(&data, 0.5)[299], 12.5, epsilon = 1e-9);
        assert_relative_eq!(decycler(&data, 10)[299], 12.5, epsilon = 1e-6);
    }

    #[test]
    fn test_high_pass_removes_dc() {
        let data = vec![40.0; 200];
        let hp = high_pass_2(&data, 20);
        assert_eq!(hp[0], 0.0);
        assert_eq!(hp[1], 0.0);
        assert!(hp.iter().all(|v| v.abs() < 1e-9));
        assert!(roofing(&data, 20, 10).iter().skip(2).all(|v| v.abs() < 1e-9));
    }

    #[test]
    fn test_smoothers_attenuate_fast_cycle() {
        let data = wave(400, 4.0);
        let out = super_smoother_2(&data, 20);
        let tail_peak = out[300..].iter().fold(0.0f64, |m, v| m.max(v.abs()));
        assert!(tail_peak < 0.2);
    }

    #[test]
    fn test_poles_pass_through_warm_up() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let ss3 = super_smoother_3(&data, 10);
        assert_eq!(&ss3[..3], &data[..3]);
        let bw2 = butterworth_2(&data, 10);
        assert_eq!(&bw2[..2], &data[..2]);
    }

    #[test]
    fn test_short_lengths_stay_finite() {
        let data = wave(100, 7.0);
        for length in 1..=4 {
            for out in [
                super_smoother_2(&data, length),
                butterworth_3(&data, length),
                gaussian_2(&data, length),
                high_pass_2(&data, length),
                instantaneous_trendline(&data, length),
            ] {
                assert!(out.iter().all(|v| v.is_finite()));
            }
        }
    }

    #[test]
    fn test_alternating_extremes_stay_finite() {
        let data: Vec<f64> = (0..40).map(|i| if i % 2 == 0 { 1e308 } else { -1e308 }).collect();
        for out in [
            super_smoother_2(&data, 10),
            super_smoother_3(&data, 10),
            butterworth_2(&data, 10),
            butterworth_3(&data, 10),
            gaussian_2(&data, 10),
            high_pass_2(&data, 10),
            roofing(&data, 10, 5),
            decycler(&data, 10),
            laguerre(&data, 0.8),
            instantaneous_trendline(&data, 10),
        ] {
            assert_eq!(out.len(), data.len());
            assert!(out.iter().all(|v| v.is_finite()), "{out:?}");
        }
    }

    #[test]
    fn test_laguerre_empty() {
        assert!(laguerre(&[], 0.5).is_empty());
    }
}
