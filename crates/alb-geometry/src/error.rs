//! Error types for geometric fitting and matrix assembly.

use thiserror::Error;

/// Errors from the geometric engine and the matrix builder.
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("Invalid array configuration: {what}")]
    InvalidConfig { what: String },

    #[error("Inconsistent fit: {what}")]
    InconsistentFit { what: String },
}

pub type GeometryResult<T> = Result<T, GeometryError>;
