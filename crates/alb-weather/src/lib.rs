//! alb-weather: weather-file and reflectance-file I/O.
//!
//! Provides:
//! - the weather CSV reader (two verbatim metadata lines + tabular body)
//! - the spectral reflectance curve loader
//! - the albedo-column merger with atomic rewrite

pub mod error;
pub mod merge;
pub mod reflectance;
pub mod series;

// Re-exports for public API
pub use error::{WeatherError, WeatherResult};
pub use merge::{MISSING_ALBEDO, merge_albedo_column};
pub use reflectance::ReflectanceCurve;
pub use series::{WeatherRow, WeatherSeries};
