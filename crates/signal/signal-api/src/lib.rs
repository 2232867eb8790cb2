//! Trading signal classification
//!
//! Converts per-bar numeric deltas into discrete [`Signal`]s. Every
//! classifier is a small decision table with no state across calls:
//!
//! - [`Crossover`]: sign flip of a delta
//! - [`BoundedOscillator`]: overbought/oversold threshold crossings
//! - [`BandBreakout`]: value against an upper/lower band pair
//! - [`DualCondition`]: independent bullish/bearish conditions
//!
//! [`SignalMode`] wraps the four for configuration-driven dispatch.

mod band;
mod condition;
mod crossover;
mod mode;
mod oscillator;
mod series;

// Re-export from core
pub use signal_core::{deltas, level_deltas, prior, prior_or_current, Result, SignalError};

// Re-export traits from SPI
pub use signal_spi::{Signal, SignalClassifier, SignalInputs};

// Re-export implementations
pub use band::BandBreakout;
pub use condition::DualCondition;
pub use crossover::{Crossover, CrossoverRule};
pub use mode::{classify, SignalMode};
pub use oscillator::BoundedOscillator;
pub use series::{
    band_inputs, band_series, condition_series, crossover_series, line_cross_series,
    oscillator_series,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::SignalClassifier;
    pub use crate::{BandBreakout, BoundedOscillator, Crossover, DualCondition, SignalMode};
    pub use crate::{Result, Signal, SignalError, SignalInputs};
}
