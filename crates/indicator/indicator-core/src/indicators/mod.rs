//! Reference indicators composed from the kernel, the rolling engine and the
//! signal classifier.

mod bands;
mod crossover;
mod rsi;
mod slope;
mod stochastic;

pub use bands::{BandSeries, MovingAverageBands};
pub use crossover::{CrossoverSeries, MovingAverageCrossover};
pub use rsi::RelativeStrengthIndex;
pub use slope::SlopeDirection;
pub use stochastic::{StochasticOscillator, StochasticSeries};
