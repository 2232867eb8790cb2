//! Technical Indicator Facade
//!
//! Unified re-exports for the indicator module, plus caller-side batch
//! evaluation. Independent kernel calls and indicators share no state, so
//! [`compute_batch`] and [`compute_indicators`] spread them over the rayon
//! thread pool; each series is still swept in bar order.
//!
//! ```
//! use indicator_facade::*;
//!
//! let close: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64 * 0.2).sin()).collect();
//! let configs = [MovingAverageConfig::simple(10), MovingAverageConfig::exponential(10)];
//! let outputs = compute_batch(&configs, &close).unwrap();
//! assert_eq!(outputs.len(), 2);
//! assert_eq!(outputs[0].len(), close.len());
//! ```

mod batch;

// Re-export everything from SPI
pub use indicator_spi::*;

// Re-export everything from API
pub use indicator_api::*;

// Re-export everything from Core
pub use indicator_core::*;

// Signal classification
pub use signal_facade as signal;

pub use batch::{compute_batch, compute_indicators};
