//! alb-spectral: wavelength-resolved irradiance modelling.
//!
//! Provides:
//! - the fixed 122-band wavelength grid and its contract check
//! - the `SpectralModel` strategy trait
//! - `ClearSkySpectrum`, a simplified clear-sky spectral model
//! - `SpectralOrchestrator`, the per-hour driver that derives sun geometry
//!   and atmosphere inputs before invoking the model

pub mod clearsky;
pub mod error;
pub mod grid;
pub mod model;
pub mod orchestrator;

// Re-exports for public API
pub use clearsky::ClearSkySpectrum;
pub use error::{SpectralError, SpectralResult};
pub use grid::{R_BAND_COUNT, R_BAND_OFFSET, SPECTRUM_BANDS, WAVELENGTH_NM, check_grid_contract};
pub use model::{SpectralInputs, SpectralModel, SpectralSample};
pub use orchestrator::{HourInputs, OrchestratorConfig, SpectralOrchestrator};
