//! Parallel evaluation of independent kernel configurations and indicators.

use indicator_api::MovingAverageConfig;
use indicator_core::compute_with_config;
use indicator_spi::{BarSet, IndicatorOutput, Result, TechnicalIndicator};
use rayon::prelude::*;

/// Run every kernel configuration over the same input, in parallel.
///
/// All configurations are validated before any work starts. Outputs are in
/// the order of `configs`.
pub fn compute_batch(configs: &[MovingAverageConfig], input: &[f64]) -> Result<Vec<Vec<f64>>> {
    for config in configs {
        config.validate()?;
    }
    tracing::debug!(kernels = configs.len(), bars = input.len(), "batch kernel evaluation");

    Ok(configs
        .par_iter()
        .map(|config| compute_with_config(config, input))
        .collect())
}

/// Compute several indicators over one bar set, in parallel.
///
/// Each indicator's result is returned in place, so one failure does not
/// hide the others.
pub fn compute_indicators(
    indicators: &[Box<dyn TechnicalIndicator>],
    data: &BarSet,
) -> Vec<Result<IndicatorOutput>> {
    tracing::debug!(indicators = indicators.len(), bars = data.len(), "batch indicator evaluation");

    indicators
        .par_iter()
        .map(|indicator| {
            let result = indicator.compute(data);
            if let Err(err) = &result {
                tracing::warn!(indicator = indicator.name(), %err, "indicator failed");
            }
            result
        })
        .collect()
}
