//! Numeric guards shared by every kernel.
//!
//! A kernel must produce a value for every bar: zero denominators give `0`
//! and overflowing results saturate at the representable maximum.

/// Clamp infinities to `±f64::MAX`.
///
/// With finite inputs a NaN can only come from combining two overflowed
/// terms (`inf - inf`, `inf / inf`, `0 * inf`); it reads as `0`, the same
/// value an undefined `0 / 0` ratio gets.
#[inline]
pub fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}

/// `numerator / denominator`, or `0.0` when the denominator is zero.
#[inline]
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        saturate(numerator / denominator)
    }
}

/// `2 / (length + 1)`.
#[inline]
pub fn ema_alpha(length: usize) -> f64 {
    2.0 / (length as f64 + 1.0)
}

/// Power of two that moves any finite input far enough from overflow for a
/// short weighted sum to be formed exactly.
fn overflow_scale() -> f64 {
    2f64.powi(600)
}

/// `sum(c * x) / divisor` over `(c, x)` pairs, or `0.0` for a zero divisor.
///
/// Equal to the plain expression whenever that is finite. Otherwise the sum
/// is formed again on inputs scaled down by [`overflow_scale`], so opposite
/// overflows cancel as they would in exact arithmetic, and the rescaled
/// result saturates.
pub fn saturating_ratio<I>(terms: I, divisor: f64) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
    I::IntoIter: Clone,
{
    if divisor == 0.0 {
        return 0.0;
    }
    let terms = terms.into_iter();
    let plain: f64 = terms.clone().map(|(c, x)| c * x).sum();
    if plain.is_finite() {
        return saturate(plain / divisor);
    }
    let scale = overflow_scale();
    let scaled: f64 = terms.map(|(c, x)| c * (x / scale)).sum();
    saturate(scaled / divisor * scale)
}

/// `sum(c * x)` over `(c, x)` pairs; see [`saturating_ratio`].
pub fn saturating_dot<I>(terms: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
    I::IntoIter: Clone,
{
    saturating_ratio(terms, 1.0)
}
