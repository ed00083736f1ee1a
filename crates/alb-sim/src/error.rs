//! Error types for the albedo pipeline.
//!
//! Any failure in a per-hour step aborts the whole run: a missing spectrum
//! or geometry for one hour would break the positional alignment the
//! weather-file merge relies on.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid simulation window: {what}")]
    InvalidWindow { what: String },

    #[error("Reflectance curve too short: {len} bands, integration needs {needed}")]
    ReflectanceLength { len: usize, needed: usize },

    #[error("Weather series ends before the window: {rows} rows, hour {hour} requested")]
    MissingHour { hour: usize, rows: usize },

    #[error("Spectral model failed for hour {hour}: {message}")]
    Spectral { hour: usize, message: String },

    #[error("Geometry engine failed for hour {hour}: {message}")]
    Geometry { hour: usize, message: String },

    #[error("Geometry configuration rejected: {message}")]
    GeometryConfig { message: String },

    #[error("Non-finite result for hour {hour}: {message}")]
    NonFinite { hour: usize, message: String },

    #[error("Weather data error: {0}")]
    Weather(#[from] alb_weather::WeatherError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
