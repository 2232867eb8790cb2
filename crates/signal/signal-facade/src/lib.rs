//! Signal Facade
//!
//! Single entry point for signal classification: the [`Signal`] type, the
//! four classification modes and the per-series sweeps.
//!
//! ```
//! use signal_facade::prelude::*;
//!
//! let mode = SignalMode::crossover();
//! assert_eq!(mode.classify(&SignalInputs::deltas(1.0, -1.0)), Signal::Buy);
//! ```

pub use signal_api::*;
