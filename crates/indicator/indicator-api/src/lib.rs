//! Technical Indicator API
//!
//! Serde configuration types: the moving-average kind selector, kernel and
//! rolling-window configuration, and configuration of the reference
//! indicators. Each type has a `Default` and a `validate()` that rejects
//! configurations the numeric core does not check for itself.

mod config;
mod kind;

pub use config::{
    CrossoverConfig, MovingAverageBandsConfig, MovingAverageConfig, RollingConfig, RsiConfig,
    SlopeConfig, StochasticConfig,
};
pub use kind::{MovingAverageFamily, MovingAverageKind};
