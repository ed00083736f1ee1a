use thiserror::Error;

pub type AlbResult<T> = Result<T, AlbError>;

/// Shared numeric-guard error.
#[derive(Error, Debug)]
pub enum AlbError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
