//! Per-hour spectral orchestration.
//!
//! Derives the sun-geometry and atmosphere inputs for one timestep, invokes
//! the injected spectral model and enforces the wavelength-grid contract on
//! the response.

use chrono::{Datelike, Duration, NaiveDateTime};
use tracing::debug;

use alb_core::{angle_of_incidence, horizon_clamped_zenith, relative_airmass};

use crate::error::{SpectralError, SpectralResult};
use crate::grid::check_grid_contract;
use crate::model::{SpectralInputs, SpectralModel, SpectralSample};

/// The receiving surface is the ground itself, which is never tilted.
const GROUND_TILT_DEG: f64 = 0.0;

/// Run-constant inputs for the orchestrator.
#[derive(Clone, Copy, Debug)]
pub struct OrchestratorConfig {
    /// Azimuth shared by the PV rows and the ground surface.
    pub surface_azimuth_deg: f64,
    /// Broadband ground albedo fed to the spectral model.
    pub ground_albedo: f64,
    /// Precipitable water column (cm).
    pub precipitable_water_cm: f64,
    /// Ozone column (atm-cm).
    pub ozone_atm_cm: f64,
    /// Aerosol optical depth at 500 nm.
    pub aerosol_od_500nm: f64,
    /// First hour of the simulation window; hour offsets count from here.
    pub start: NaiveDateTime,
}

/// Per-hour weather inputs the orchestrator needs.
#[derive(Clone, Copy, Debug)]
pub struct HourInputs {
    pub apparent_zenith_deg: f64,
    pub solar_azimuth_deg: f64,
    /// Barometric pressure as reported by the weather file (mbar).
    pub pressure_mbar: f64,
}

/// Drives one spectral-model evaluation per hour.
pub struct SpectralOrchestrator<'a> {
    model: &'a dyn SpectralModel,
    config: OrchestratorConfig,
}

impl<'a> SpectralOrchestrator<'a> {
    pub fn new(model: &'a dyn SpectralModel, config: OrchestratorConfig) -> Self {
        Self { model, config }
    }

    /// Compute the spectral sample for the hour at `hour_index` after the
    /// window start.
    ///
    /// Below-horizon apparent zenith values are clamped to 0 before the
    /// airmass and spectrum evaluations; the raw value never reaches the
    /// model.
    pub fn sample_for_hour(
        &self,
        hour: &HourInputs,
        hour_index: u32,
    ) -> SpectralResult<SpectralSample> {
        let zenith_deg = horizon_clamped_zenith(hour.apparent_zenith_deg);
        let aoi_deg = angle_of_incidence(
            GROUND_TILT_DEG,
            self.config.surface_azimuth_deg,
            zenith_deg,
            hour.solar_azimuth_deg,
        );
        let airmass = relative_airmass(zenith_deg);

        let timestamp = self.config.start + Duration::hours(hour_index as i64);
        let day_of_year = timestamp.ordinal();

        let inputs = SpectralInputs {
            apparent_zenith_deg: zenith_deg,
            aoi_deg,
            surface_tilt_deg: GROUND_TILT_DEG,
            ground_albedo: self.config.ground_albedo,
            surface_pressure_pa: hour.pressure_mbar * 100.0,
            relative_airmass: airmass,
            precipitable_water_cm: self.config.precipitable_water_cm,
            ozone_atm_cm: self.config.ozone_atm_cm,
            aerosol_od_500nm: self.config.aerosol_od_500nm,
            day_of_year,
        };

        debug!(
            hour_index,
            zenith_deg, airmass, day_of_year, "evaluating spectral model"
        );

        let sample = self.model.spectrum(&inputs)?;
        check_grid_contract(&sample.wavelength_nm)?;
        if sample.poa_global.len() != sample.wavelength_nm.len() {
            return Err(SpectralError::GridContract {
                what: format!(
                    "poa_global has {} bands, wavelength axis has {}",
                    sample.poa_global.len(),
                    sample.wavelength_nm.len()
                ),
            });
        }
        Ok(sample)
    }
}
