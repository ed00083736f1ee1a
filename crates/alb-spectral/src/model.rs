//! Strategy trait for atmospheric spectral-irradiance models.

use crate::error::SpectralResult;

/// Inputs to one spectral-model evaluation.
///
/// All fields are scalars for a single timestep; angles in degrees, pressure
/// in pascal, water in centimetres of precipitable column, ozone in atm-cm.
#[derive(Clone, Copy, Debug)]
pub struct SpectralInputs {
    /// Apparent solar zenith angle. The model contract requires callers to
    /// pre-clamp below-horizon values; anything past 90 degrees yields NaN
    /// bands.
    pub apparent_zenith_deg: f64,
    /// Angle of incidence of the beam on the receiving surface.
    pub aoi_deg: f64,
    /// Tilt of the receiving surface from horizontal.
    pub surface_tilt_deg: f64,
    /// Broadband ground albedo used for the ground-reflected component.
    pub ground_albedo: f64,
    /// Surface air pressure (Pa).
    pub surface_pressure_pa: f64,
    /// Relative airmass along the slant path.
    pub relative_airmass: f64,
    /// Precipitable water column (cm).
    pub precipitable_water_cm: f64,
    /// Ozone column (atm-cm).
    pub ozone_atm_cm: f64,
    /// Aerosol optical depth at 500 nm.
    pub aerosol_od_500nm: f64,
    /// Day of year, 1-366; drives the earth-sun distance correction.
    pub day_of_year: u32,
}

/// One timestep's spectral sample: global plane-of-array irradiance per
/// wavelength band, aligned to the fixed grid.
#[derive(Clone, Debug)]
pub struct SpectralSample {
    /// Band centers (nm); must match [`crate::grid::WAVELENGTH_NM`].
    pub wavelength_nm: Vec<f64>,
    /// Global plane-of-array spectral irradiance (W m^-2 nm^-1) per band.
    pub poa_global: Vec<f64>,
}

/// Trait for atmospheric spectral-irradiance models.
///
/// Models are deterministic functions of their inputs: same inputs, same
/// spectrum. The wavelength axis must be identical across every call so that
/// downstream positional offsets stay valid for a whole run.
pub trait SpectralModel: Send + Sync {
    /// Model name for debugging and run manifests.
    fn name(&self) -> &str;

    /// Evaluate the spectrum for one timestep.
    fn spectrum(&self, inputs: &SpectralInputs) -> SpectralResult<SpectralSample>;
}
