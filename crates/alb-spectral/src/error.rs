//! Error types for spectral modelling.

use thiserror::Error;

/// Errors surfaced by the spectral model and its orchestrator.
#[derive(Error, Debug)]
pub enum SpectralError {
    #[error("Spectral model failed: {message}")]
    Model { message: String },

    #[error("Wavelength grid contract violated: {what}")]
    GridContract { what: String },
}

pub type SpectralResult<T> = Result<T, SpectralError>;
