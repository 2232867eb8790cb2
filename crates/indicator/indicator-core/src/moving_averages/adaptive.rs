//! Adaptive recurrences: the smoothing factor is recomputed every bar from a
//! secondary series and clamped before use.
//!
//! Except for [`jurik`], these kernels seed their first output with the
//! first input instead of a zero prior, so the average starts on the price.

use crate::history::{prior_or_default, History};
use crate::numeric::{ema_alpha, safe_div, saturate, saturating_dot};
use crate::rolling::{rolling_max, rolling_mean, rolling_min, rolling_std_dev};

/// Run `out[i] = prev + alpha_i * (x[i] - prev)` with `out[0] = x[0]`.
fn adaptive_sweep(data: &[f64], mut alpha: impl FnMut(usize, f64) -> f64) -> Vec<f64> {
    let mut out = History::with_capacity(data.len());
    for (i, &x) in data.iter().enumerate() {
        if i == 0 {
            out.push(x);
            continue;
        }
        let prev = out.back(1);
        let a = alpha(i, prev);
        let step = x - prev;
        if step.is_finite() {
            out.push(prev + a * step);
        } else {
            out.push(saturating_dot([(1.0 - a, prev), (a, x)]));
        }
    }
    out.into_vec()
}

/// Kaufman efficiency ratio: net change over the window divided by the sum of
/// absolute bar-to-bar changes, in `[0, 1]`. The window is clipped at the
/// first bar.
pub(crate) fn efficiency_ratio(data: &[f64], length: usize) -> Vec<f64> {
    let step = |j: usize| saturate((data[j] - data[j - 1]).abs());
    let mut noise = 0.0;
    (0..data.len())
        .map(|i| {
            if i >= 1 {
                noise += step(i);
            }
            if i > length {
                noise -= step(i - length);
            }
            if noise >= f64::MAX {
                // A saturated running sum cannot be unwound; rebuild it.
                let first = (i + 1).saturating_sub(length).max(1);
                noise = (first..=i).map(step).fold(0.0, |acc, d| saturate(acc + d));
            }
            let anchor = prior_or_default(data, i, length, data[0]);
            let change = saturate((data[i] - anchor).abs());
            safe_div(change, noise.max(0.0)).clamp(0.0, 1.0)
        })
        .collect()
}

/// Kaufman adaptive: `sc = (er * (fast - slow) + slow)^2`.
pub fn kaufman(data: &[f64], length: usize, fast_length: usize, slow_length: usize) -> Vec<f64> {
    let fast = ema_alpha(fast_length);
    let slow = ema_alpha(slow_length);
    let er = efficiency_ratio(data, length);
    adaptive_sweep(data, |i, _| (er[i] * (fast - slow) + slow).powi(2))
}

/// Kaufman variant raising the smoothing constant to `power`, clamped to the
/// published bounds `[slow^2, fast]`.
pub fn powered_kaufman(
    data: &[f64],
    length: usize,
    fast_length: usize,
    slow_length: usize,
    power: f64,
) -> Vec<f64> {
    let fast = ema_alpha(fast_length);
    let slow = ema_alpha(slow_length);
    let er = efficiency_ratio(data, length);
    adaptive_sweep(data, |i, _| {
        (er[i] * (fast - slow) + slow).powf(power).clamp(slow * slow, fast)
    })
}

/// Chande's VIDYA: EMA factor scaled by the absolute CMO over `length` bars.
pub fn vidya(data: &[f64], length: usize) -> Vec<f64> {
    let base = ema_alpha(length);
    let mut ups = Vec::with_capacity(data.len());
    let mut downs = Vec::with_capacity(data.len());
    for i in 0..data.len() {
        let change = if i == 0 { 0.0 } else { saturate(data[i] - data[i - 1]) };
        ups.push(change.max(0.0));
        downs.push((-change).max(0.0));
    }
    let up = rolling_mean(&ups, length);
    let down = rolling_mean(&downs, length);
    adaptive_sweep(data, |i, _| {
        let cmo = safe_div(up[i] - down[i], up[i] + down[i]).abs();
        (base * cmo).clamp(0.0, 1.0)
    })
}

/// Jurik-style adaptive smoother.
///
/// Three stages: an adaptive EMA, a Kalman-like error term scaled by the
/// phase ratio, and a second-order Jurik filter. The per-bar factor is
/// `beta^(power * k)` where `k` grows with the bar's volatility relative to
/// its recent average, so volatile bars are followed more closely. Stage
/// states start from zero.
pub fn jurik(data: &[f64], length: usize, phase: f64, power: f64) -> Vec<f64> {
    let len = length.max(1) as f64;
    let phase_ratio = (phase / 100.0 + 1.5).clamp(0.5, 2.5);
    let beta = 0.45 * (len - 1.0) / (0.45 * (len - 1.0) + 2.0);

    let volatility: Vec<f64> = (0..data.len())
        .map(|i| if i == 0 { 0.0 } else { saturate((data[i] - data[i - 1]).abs()) })
        .collect();
    let vol_length = ((len * 0.65).ceil() as usize).max(1);
    let avg_volatility = rolling_mean(&volatility, vol_length);

    let (mut e0, mut e1, mut e2) = (0.0, 0.0, 0.0);
    let mut out = History::with_capacity(data.len());
    for (i, &x) in data.iter().enumerate() {
        let relative = if avg_volatility[i] > 0.0 {
            volatility[i] / avg_volatility[i]
        } else {
            1.0
        };
        let k = (1.0 + (relative - 1.0) * 0.5).clamp(0.5, 2.0);
        let alpha = beta.powf(power * k).clamp(0.0, 1.0);

        let prev = out.back(1);
        let decay = (1.0 - alpha).powi(2);
        e0 = saturating_dot([(1.0 - alpha, x), (alpha, e0)]);
        e1 = saturating_dot([(1.0 - beta, x), (beta - 1.0, e0), (beta, e1)]);
        e2 = saturating_dot([
            (decay, e0),
            (decay * phase_ratio, e1),
            (-decay, prev),
            (alpha * alpha, e2),
        ]);
        out.push(saturating_dot([(1.0, prev), (1.0, e2)]));
    }
    out.into_vec()
}

/// McGinley dynamic: `prev + (x - prev) / max(k * n * (x / prev)^4, 1)`.
pub fn mcginley(data: &[f64], length: usize, constant: f64) -> Vec<f64> {
    let n = length as f64;
    adaptive_sweep(data, |i, prev| {
        let ratio = saturate(safe_div(data[i], prev).powi(4));
        1.0 / saturate(constant * n * ratio).max(1.0)
    })
}

/// Bryant adaptive: the efficiency ratio picks an effective EMA length in
/// `[1, max_length]`, biased by `trend`.
pub fn bryant(data: &[f64], length: usize, max_length: usize, trend: f64) -> Vec<f64> {
    let er = efficiency_ratio(data, length);
    let n = length as f64;
    adaptive_sweep(data, |i, _| {
        let e = er[i];
        let ver = (e - (2.0 * e - 1.0) / 2.0 * (1.0 - trend) + 0.5).powi(2);
        let effective = safe_div(n - ver + 1.0, ver).clamp(1.0, max_length as f64);
        2.0 / (effective + 1.0)
    })
}

/// Volatility-adjusted: EMA factor scaled by the current rolling standard
/// deviation relative to its own average.
pub fn volatility_adjusted(data: &[f64], length: usize) -> Vec<f64> {
    let base = ema_alpha(length);
    let std_dev = rolling_std_dev(data, length);
    let avg_std_dev = rolling_mean(&std_dev, length);
    adaptive_sweep(data, |i, _| (base * safe_div(std_dev[i], avg_std_dev[i])).clamp(0.0, 1.0))
}

/// Ehlers fractal adaptive: `alpha = exp(-4.6 * (d - 1))` from the fractal
/// dimension `d` of the two half windows against the full window.
pub fn fractal(data: &[f64], length: usize) -> Vec<f64> {
    let half = (length / 2).max(1);
    let span = 2 * half;
    let hh_half = rolling_max(data, half);
    let ll_half = rolling_min(data, half);
    let hh_full = rolling_max(data, span);
    let ll_full = rolling_min(data, span);
    adaptive_sweep(data, |i, _| {
        let n1 = saturate(hh_half[i] - ll_half[i]) / half as f64;
        let older_high = prior_or_default(&hh_half, i, half, hh_half[i]);
        let older_low = prior_or_default(&ll_half, i, half, ll_half[i]);
        let n2 = saturate(older_high - older_low) / half as f64;
        let n3 = saturate(hh_full[i] - ll_full[i]) / span as f64;
        let dimension = if n1 + n2 > 0.0 && n3 > 0.0 {
            ((n1 + n2).ln() - n3.ln()) / std::f64::consts::LN_2
        } else {
            1.0
        };
        (-4.6 * (dimension - 1.0)).exp().clamp(0.01, 1.0)
    })
}
