//! Per-series sweeps: one signal per bar from already computed series.

use signal_core::{deltas, ensure_aligned, level_deltas, prior, prior_or_current, Result};
use signal_spi::{Signal, SignalInputs};

use crate::band::BandBreakout;
use crate::condition::DualCondition;
use crate::crossover::Crossover;
use crate::oscillator::BoundedOscillator;

/// Crossover signal on the bar-over-bar change of `series`.
pub fn crossover_series(series: &[f64], classifier: &Crossover) -> Vec<Signal> {
    let d = deltas(series);
    (0..d.len())
        .map(|i| classifier.evaluate(d[i], prior(&d, i)))
        .collect()
}

/// Crossover signal on the sign of `fast - slow` (a line crossing another).
pub fn line_cross_series(fast: &[f64], slow: &[f64], classifier: &Crossover) -> Result<Vec<Signal>> {
    ensure_aligned(fast, slow)?;
    let spread: Vec<f64> = fast.iter().zip(slow).map(|(f, s)| f - s).collect();
    Ok((0..spread.len())
        .map(|i| classifier.evaluate(spread[i], prior(&spread, i)))
        .collect())
}

/// Bounded-oscillator signal, with deltas taken from the oscillator itself.
///
/// The first bar has no prior level and reads as unchanged, so it is never a
/// threshold crossing.
pub fn oscillator_series(values: &[f64], classifier: &BoundedOscillator) -> Vec<Signal> {
    let d = level_deltas(values);
    (0..values.len())
        .map(|i| classifier.evaluate(d[i], prior(&d, i), values[i], prior_or_current(values, i)))
        .collect()
}

/// Band-breakout signal for `values` against `upper`/`lower`.
///
/// Missing priors at the first bar read as the current value and band.
pub fn band_series(
    values: &[f64],
    upper: &[f64],
    lower: &[f64],
    classifier: &BandBreakout,
) -> Result<Vec<Signal>> {
    ensure_aligned(values, upper)?;
    ensure_aligned(values, lower)?;
    Ok((0..values.len())
        .map(|i| {
            classifier.evaluate(
                values[i],
                prior_or_current(values, i),
                upper[i],
                prior_or_current(upper, i),
                lower[i],
                prior_or_current(lower, i),
            )
        })
        .collect())
}

/// Dual-condition signal from two condition series (active when positive).
pub fn condition_series(bullish: &[f64], bearish: &[f64], classifier: &DualCondition) -> Result<Vec<Signal>> {
    ensure_aligned(bullish, bearish)?;
    Ok(bullish
        .iter()
        .zip(bearish)
        .map(|(&bull, &bear)| classifier.evaluate_numeric(bull, bear))
        .collect())
}

/// Build classifier inputs for every bar of a value series with its bands.
///
/// Deltas are the bar-over-bar change of `values`. Priors follow
/// [`band_series`].
pub fn band_inputs(values: &[f64], upper: &[f64], lower: &[f64]) -> Result<Vec<SignalInputs>> {
    ensure_aligned(values, upper)?;
    ensure_aligned(values, lower)?;
    let d = level_deltas(values);
    Ok((0..values.len())
        .map(|i| {
            SignalInputs::deltas(d[i], prior(&d, i))
                .with_values(values[i], prior_or_current(values, i))
                .with_upper(upper[i], prior_or_current(upper, i))
                .with_lower(lower[i], prior_or_current(lower, i))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_spi::SignalClassifier;

    #[test]
    fn test_crossover_series_detects_turns() {
        // Falls, then rises: delta flips from negative to positive at index 3.
        let prices = [10.0, 9.0, 8.0, 9.0, 10.0, 9.5];
        let signals = crossover_series(&prices, &Crossover::default());
        assert_eq!(signals.len(), prices.len());
        assert_eq!(signals[3], Signal::Buy);
        assert_eq!(signals[5], Signal::Sell);
        assert_eq!(signals[4], Signal::Neutral);
    }

    #[test]
    fn test_line_cross() {
        let fast = [1.0, 2.0, 3.0, 2.0];
        let slow = [2.0, 2.5, 2.5, 2.5];
        let signals = line_cross_series(&fast, &slow, &Crossover::default()).unwrap();
        assert_eq!(signals[2], Signal::Buy);
        assert_eq!(signals[3], Signal::Sell);
    }

    #[test]
    fn test_misaligned_is_error() {
        assert!(line_cross_series(&[1.0], &[1.0, 2.0], &Crossover::default()).is_err());
        assert!(band_series(&[1.0], &[1.0], &[], &BandBreakout::new()).is_err());
    }

    #[test]
    fn test_band_inputs_match_band_series() {
        let values = [100.0, 105.0, 111.0, 108.0];
        let upper = [110.0, 110.0, 110.0, 110.0];
        let lower = [90.0, 90.0, 90.0, 90.0];
        let bb = BandBreakout::new();
        let direct = band_series(&values, &upper, &lower, &bb).unwrap();
        let via_inputs = bb.classify_all(&band_inputs(&values, &upper, &lower).unwrap());
        assert_eq!(direct, via_inputs);
        assert_eq!(direct[2], Signal::Sell);
        assert_eq!(direct[3], Signal::StrongSell);
    }

    proptest::proptest! {
        #[test]
        fn prop_one_signal_per_bar(values in proptest::collection::vec(-1e6f64..1e6, 0..64)) {
            proptest::prop_assert_eq!(crossover_series(&values, &Crossover::default()).len(), values.len());
            proptest::prop_assert_eq!(oscillator_series(&values, &BoundedOscillator::default()).len(), values.len());
        }

        #[test]
        fn prop_reversed_mirrors_crossover(values in proptest::collection::vec(-1e6f64..1e6, 0..64)) {
            let plain = crossover_series(&values, &Crossover::default());
            let mirrored = crossover_series(&values, &Crossover::default().reversed());
            for (p, m) in plain.iter().zip(&mirrored) {
                proptest::prop_assert_eq!(p.reversed(), *m);
            }
        }
    }

    #[test]
    fn test_first_bar_is_neutral_for_level_modes() {
        // A zero prior would read as "below oversold" and "inside both bands".
        let rsi = [50.0, 55.0, 45.0];
        assert_eq!(oscillator_series(&rsi, &BoundedOscillator::default())[0], Signal::Neutral);

        let values = [100.0, 101.0];
        let band = [100.0, 102.0];
        let signals = band_series(&values, &band, &band, &BandBreakout::new()).unwrap();
        assert_eq!(signals[0], Signal::Neutral);
        let outside = band_series(&[120.0], &[110.0], &[90.0], &BandBreakout::new()).unwrap();
        assert_eq!(outside[0], Signal::Neutral);
    }

    #[test]
    fn test_oscillator_series_len() {
        let values = [50.0, 60.0, 75.0, 65.0, 55.0];
        let signals = oscillator_series(&values, &BoundedOscillator::default());
        assert_eq!(signals.len(), values.len());
        assert!(signals[3].is_bearish());
    }
}
