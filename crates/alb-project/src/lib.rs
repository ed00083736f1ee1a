//! alb-project: simulation configuration files.
//!
//! A simulation is described by one YAML document: the PV array geometry,
//! the albedometer, atmosphere defaults, the hourly window and the input /
//! output file locations.

pub mod schema;
pub mod validate;

pub use schema::{
    ArrayDef, AtmosphereDef, FilesDef, HourStamp, SensorDef, SimulationConfig, WindowDef,
};
pub use validate::{ValidationError, validate_config};

use std::fs;
use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Load a simulation configuration from a YAML file, without validation.
pub fn load_config(path: &Path) -> ProjectResult<SimulationConfig> {
    let content = fs::read_to_string(path)?;
    let config = serde_yaml::from_str(&content)?;
    Ok(config)
}
