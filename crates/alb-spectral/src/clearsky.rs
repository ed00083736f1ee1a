//! Simplified clear-sky spectral irradiance model.
//!
//! Direct transmittance follows the classic single-band-pass structure:
//! a Planck-shaped extraterrestrial spectrum normalized to the solar
//! constant, attenuated per band by Rayleigh scattering, Angstrom aerosol
//! extinction and water/ozone band absorption, plus simplified Rayleigh and
//! aerosol scattered diffuse components. Good enough to drive the albedo
//! pipeline end-to-end; tests that need exact numbers inject synthetic
//! models instead.

use crate::error::{SpectralError, SpectralResult};
use crate::grid::{SPECTRUM_BANDS, WAVELENGTH_NM};
use crate::model::{SpectralInputs, SpectralModel, SpectralSample};

/// Solar constant (W m^-2).
const SOLAR_CONSTANT: f64 = 1361.0;
/// Effective blackbody temperature of the sun (K).
const SUN_TEMPERATURE_K: f64 = 5772.0;
/// Second radiation constant h*c/k_B (m K).
const C2: f64 = 1.438_776_877e-2;
/// Standard sea-level pressure (Pa) for the Rayleigh pressure correction.
const STANDARD_PRESSURE_PA: f64 = 101_325.0;

/// Water absorption bands: (center nm, strength, half-width nm).
const WATER_BANDS: [(f64, f64, f64); 8] = [
    (720.0, 0.015, 20.0),
    (820.0, 0.012, 25.0),
    (940.0, 0.27, 35.0),
    (1130.0, 2.4, 45.0),
    (1380.0, 55.0, 60.0),
    (1870.0, 160.0, 70.0),
    (2700.0, 90.0, 120.0),
    (3200.0, 40.0, 150.0),
];

/// Single-scattering albedo used for the aerosol diffuse component.
const AEROSOL_SSA: f64 = 0.85;
/// Fraction of aerosol-scattered light going forward (downward).
const AEROSOL_FORWARD_FRACTION: f64 = 0.65;

#[derive(Clone, Copy, Debug, Default)]
pub struct ClearSkySpectrum;

impl ClearSkySpectrum {
    pub fn new() -> Self {
        Self
    }

    /// Extraterrestrial spectral irradiance (W m^-2 nm^-1) per band,
    /// Planck-weighted and normalized to the eccentricity-corrected solar
    /// constant over the grid.
    fn extraterrestrial(day_of_year: u32) -> [f64; SPECTRUM_BANDS] {
        let eccentricity =
            1.0 + 0.033 * (2.0 * std::f64::consts::PI * day_of_year as f64 / 365.0).cos();

        let mut weights = [0.0; SPECTRUM_BANDS];
        for (i, wl_nm) in WAVELENGTH_NM.iter().enumerate() {
            let wl_m = wl_nm * 1e-9;
            weights[i] = wl_m.powi(-5) / ((C2 / (wl_m * SUN_TEMPERATURE_K)).exp() - 1.0);
        }

        // Trapezoidal band widths in nm; edges get one-sided intervals.
        let mut total = 0.0;
        for i in 0..SPECTRUM_BANDS {
            total += weights[i] * band_width_nm(i);
        }

        let scale = SOLAR_CONSTANT * eccentricity / total;
        let mut e0 = [0.0; SPECTRUM_BANDS];
        for i in 0..SPECTRUM_BANDS {
            e0[i] = weights[i] * scale;
        }
        e0
    }

    fn water_absorption(wl_nm: f64) -> f64 {
        WATER_BANDS
            .iter()
            .map(|&(center, strength, width)| {
                let z = (wl_nm - center) / width;
                strength * (-0.5 * z * z).exp()
            })
            .sum()
    }

    fn ozone_absorption(wl_nm: f64) -> f64 {
        // Hartley-Huggins UV tail plus the broad Chappuis band.
        let huggins = 4.0 * ((300.0 - wl_nm) / 25.0).exp();
        let z = (wl_nm - 600.0) / 80.0;
        let chappuis = 0.12 * (-0.5 * z * z).exp();
        huggins + chappuis
    }
}

fn band_width_nm(i: usize) -> f64 {
    if i == 0 {
        WAVELENGTH_NM[1] - WAVELENGTH_NM[0]
    } else if i == SPECTRUM_BANDS - 1 {
        WAVELENGTH_NM[i] - WAVELENGTH_NM[i - 1]
    } else {
        0.5 * (WAVELENGTH_NM[i + 1] - WAVELENGTH_NM[i - 1])
    }
}

impl SpectralModel for ClearSkySpectrum {
    fn name(&self) -> &str {
        "clear-sky-122"
    }

    fn spectrum(&self, inputs: &SpectralInputs) -> SpectralResult<SpectralSample> {
        let wavelength_nm = WAVELENGTH_NM.to_vec();

        // Contract: past-horizon zenith yields NaN bands, not an error.
        if inputs.apparent_zenith_deg > 90.0 {
            return Ok(SpectralSample {
                wavelength_nm,
                poa_global: vec![f64::NAN; SPECTRUM_BANDS],
            });
        }

        if !inputs.relative_airmass.is_finite() || inputs.relative_airmass <= 0.0 {
            return Err(SpectralError::Model {
                message: format!("relative airmass out of range: {}", inputs.relative_airmass),
            });
        }
        if !(1..=366).contains(&inputs.day_of_year) {
            return Err(SpectralError::Model {
                message: format!("day of year out of range: {}", inputs.day_of_year),
            });
        }

        let am = inputs.relative_airmass;
        let am_pressure = am * inputs.surface_pressure_pa / STANDARD_PRESSURE_PA;
        let cos_zenith = inputs.apparent_zenith_deg.to_radians().cos().max(0.0);
        let cos_aoi = inputs.aoi_deg.to_radians().cos().max(0.0);
        let tilt_cos = inputs.surface_tilt_deg.to_radians().cos();

        let e0 = Self::extraterrestrial(inputs.day_of_year);
        let mut poa_global = vec![0.0; SPECTRUM_BANDS];

        for (i, wl_nm) in WAVELENGTH_NM.iter().enumerate() {
            let wl_um = wl_nm / 1000.0;

            let t_rayleigh =
                (-am_pressure / (wl_um.powi(4) * (115.6406 - 1.335 / wl_um.powi(2)))).exp();
            let t_aerosol = (-inputs.aerosol_od_500nm * (wl_um / 0.5).powf(-1.14) * am).exp();

            let aw = Self::water_absorption(*wl_nm);
            let water_path = aw * inputs.precipitable_water_cm * am;
            let t_water = (-0.2385 * water_path / (1.0 + 20.07 * water_path).powf(0.45)).exp();

            let t_ozone = (-Self::ozone_absorption(*wl_nm) * inputs.ozone_atm_cm * am).exp();

            let direct_normal = e0[i] * t_rayleigh * t_aerosol * t_water * t_ozone;

            // Scattered components reaching a horizontal plane.
            let rayleigh_diffuse =
                e0[i] * cos_zenith * t_aerosol * t_water * t_ozone * (1.0 - t_rayleigh.powf(0.95))
                    / 2.0;
            let aerosol_diffuse = e0[i]
                * cos_zenith
                * t_rayleigh.powf(1.5)
                * t_water
                * t_ozone
                * (1.0 - t_aerosol)
                * AEROSOL_SSA
                * AEROSOL_FORWARD_FRACTION;
            let diffuse_horizontal = rayleigh_diffuse + aerosol_diffuse;
            let global_horizontal = direct_normal * cos_zenith + diffuse_horizontal;

            poa_global[i] = direct_normal * cos_aoi
                + diffuse_horizontal * (1.0 + tilt_cos) / 2.0
                + global_horizontal * inputs.ground_albedo * (1.0 - tilt_cos) / 2.0;
        }

        Ok(SpectralSample {
            wavelength_nm,
            poa_global,
        })
    }
}
