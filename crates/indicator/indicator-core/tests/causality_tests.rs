//! Causality Tests
//!
//! Every kernel and rolling statistic must be causal: appending bars, or
//! changing bars after index `i`, never changes an output at or before `i`.

use indicator_core::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn prices(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + (i as f64 * 0.3).sin() * 6.0 + (i as f64 * 0.07).cos() * 3.0)
        .collect()
}

/// Checks that historical outputs are unchanged after appending new bars.
fn assert_no_repaint<F>(name: &str, calc: F, initial_data: &[f64])
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let result1 = calc(initial_data);

    let last = *initial_data.last().unwrap_or(&100.0);
    let mut extended = initial_data.to_vec();
    extended.extend_from_slice(&[last * 1.02, last * 0.98, last * 1.01, last * 1.03, last * 0.99]);

    let result2 = calc(&extended);
    assert_eq!(result2.len(), extended.len(), "{name} changed the series length");

    for (idx, expected) in result1.iter().enumerate() {
        let actual = result2[idx];
        assert!(
            (actual - expected).abs() < 1e-10,
            "{} repainted at index {}: was {}, now {}",
            name,
            idx,
            expected,
            actual
        );
    }
}

/// Checks that rewriting every bar after `cut` leaves outputs up to `cut`
/// untouched.
fn assert_no_lookahead<F>(name: &str, calc: F, data: &[f64], cut: usize)
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let before = calc(data);
    let mut altered = data.to_vec();
    for (k, v) in altered.iter_mut().enumerate().skip(cut + 1) {
        *v = if k % 2 == 0 { 1e4 } else { -1e4 };
    }
    let after = calc(&altered);
    for idx in 0..=cut {
        assert!(
            (before[idx] - after[idx]).abs() < 1e-10,
            "{} looked ahead at index {}: was {}, now {}",
            name,
            idx,
            before[idx],
            after[idx]
        );
    }
}

// ============================================================================
// Moving-Average Kernel
// ============================================================================

#[test]
fn test_kernels_no_repaint() {
    let data = prices(80);
    for kind in MovingAverageKind::ALL {
        for length in [1, 3, 10, 21] {
            assert_no_repaint(
                &format!("{kind}({length})"),
                |d| compute_moving_average(&kind, length, d),
                &data,
            );
        }
    }
}

#[test]
fn test_kernels_no_lookahead() {
    let data = prices(60);
    for kind in MovingAverageKind::ALL {
        for cut in [0, 7, 30] {
            assert_no_lookahead(
                &format!("{kind} cut {cut}"),
                |d| compute_moving_average(&kind, 9, d),
                &data,
                cut,
            );
        }
    }
}

#[test]
fn test_composed_kernels_no_repaint() {
    let stages = [
        MovingAverageConfig::new(MovingAverageKind::Exponential, 5),
        MovingAverageConfig::new(MovingAverageKind::Hull, 9),
        MovingAverageConfig::new(MovingAverageKind::SuperSmoother2Pole, 10),
    ];
    assert_no_repaint("EMA>HMA>SS2", |d| compose(&stages, d), &prices(70));
}

// ============================================================================
// Rolling Window Engine
// ============================================================================

#[test]
fn test_rolling_no_repaint() {
    let data = prices(50);
    for length in [1, 2, 5, 20, 100] {
        assert_no_repaint("rolling_max", |d| rolling_max(d, length), &data);
        assert_no_repaint("rolling_min", |d| rolling_min(d, length), &data);
        assert_no_repaint("rolling_mean", |d| rolling_mean(d, length), &data);
        assert_no_repaint("rolling_std_dev", |d| rolling_std_dev(d, length), &data);
        assert_no_lookahead("rolling_std_dev", |d| rolling_std_dev(d, length), &data, 25);
    }
}

// ============================================================================
// Reference Indicators
// ============================================================================

#[test]
fn test_indicators_no_repaint() {
    let data = prices(90);
    let indicators: Vec<(&str, Box<dyn TechnicalIndicator>)> = vec![
        ("bands", Box::new(MovingAverageBands::default())),
        ("rsi", Box::new(RelativeStrengthIndex::default())),
        ("crossover", Box::new(MovingAverageCrossover::default())),
        ("slope", Box::new(SlopeDirection::default())),
    ];
    for (name, indicator) in &indicators {
        let primary = |d: &[f64]| {
            indicator
                .compute_close(d)
                .ok()
                .and_then(IndicatorOutput::into_primary)
                .unwrap_or_default()
        };
        assert_no_repaint(name, primary, &data);
        let signals = |d: &[f64]| {
            indicator
                .compute_close(d)
                .map(|out| out.signals().iter().map(|s| s.to_numeric()).collect::<Vec<f64>>())
                .unwrap_or_default()
        };
        assert_no_repaint(name, signals, &data);
    }
}

#[test]
fn test_stochastic_no_repaint() {
    let calc = |close: &[f64]| {
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
        StochasticOscillator::default().calculate(&high, &low, close).k
    };
    assert_no_repaint("stochastic", calc, &prices(60));
}
