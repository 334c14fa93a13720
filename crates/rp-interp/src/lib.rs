//! rp-interp: interpolation, resampling and rate/cumulative conversion of
//! sampled time series.
//!
//! - [`InterpMode`]: the four lookup rules (linear, linear volume, backwards
//!   and forwards constant)
//! - [`Series`]: validated `(time, value)` samples with lookup and resampling
//! - [`cumulative_from_rate`] / [`rate_from_cumulative`]: discrete integration
//!   and differentiation

pub mod derive;
pub mod error;
pub mod mode;
pub mod series;

pub use derive::{cumulative_from_rate, rate_from_cumulative};
pub use error::{InterpError, InterpResult};
pub use mode::InterpMode;
pub use series::{Series, interpolate, resample};
