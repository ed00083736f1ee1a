//! Error types for weather and reflectance file handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed data: {what}")]
    DataFormat { what: String },

    #[error("Record/row mismatch: {records} computed records for {rows} weather rows")]
    Alignment { records: usize, rows: usize },
}

pub type WeatherResult<T> = Result<T, WeatherError>;
