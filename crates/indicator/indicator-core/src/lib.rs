//! Technical Indicator Core Implementations
//!
//! The shared numeric primitives every indicator is built from:
//!
//! - [`moving_averages`]: the moving-average kernel, one causal recurrence per
//!   [`MovingAverageKind`]
//! - [`rolling`]: windowed max/min/mean/standard deviation
//! - [`indicators`]: reference indicators composing the kernel, the rolling
//!   engine and the signal classifier
//!
//! Numeric edge cases resolve to a value on every bar: missing history reads
//! as `0` unless a kernel documents otherwise, zero denominators give `0` and
//! overflow saturates. Errors are reserved for configuration and misaligned
//! input.

pub mod history;
pub mod indicators;
pub mod moving_averages;
pub mod numeric;
pub mod rolling;

// ============================================================================
// Kernel Exports
// ============================================================================
pub use moving_averages::{compose, compute_moving_average, compute_with_config, MovingAverage};

// ============================================================================
// Rolling Window Exports
// ============================================================================
pub use rolling::{
    highest_lowest, rolling_max, rolling_mean, rolling_min, rolling_std_dev, RollingStats,
    RollingWindow, WindowStats,
};

// ============================================================================
// Indicator Exports
// ============================================================================
pub use indicators::{
    BandSeries, CrossoverSeries, MovingAverageBands, MovingAverageCrossover,
    RelativeStrengthIndex, SlopeDirection, StochasticOscillator, StochasticSeries,
};

pub use history::{prior_or_default, prior_or_zero, History};

// Re-export SPI and API types
pub use indicator_api::{MovingAverageConfig, MovingAverageFamily, MovingAverageKind};
pub use indicator_spi::{
    BarSet, IndicatorError, IndicatorOutput, PriceSource, Result, Signal, SignalIndicator,
    StreamingIndicator, TechnicalIndicator,
};

use signal_api::SignalError;

/// Map a classifier error onto the indicator error type.
pub(crate) fn signal_error(err: SignalError) -> IndicatorError {
    match err {
        SignalError::LengthMismatch { left, right } => IndicatorError::MisalignedSeries {
            series: "signal input",
            expected: left,
            got: right,
        },
        SignalError::InvalidParameter { name, reason } => IndicatorError::InvalidParameter { name, reason },
    }
}
