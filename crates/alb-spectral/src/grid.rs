//! The fixed wavelength grid shared by every spectral sample.
//!
//! Downstream integration code indexes into spectra with fixed positional
//! offsets (the reflectance-weighted ratio starts two bands in, at 310 nm),
//! so the grid is a compile-time table with an explicit runtime contract
//! check instead of something re-derived per call.

use crate::error::{SpectralError, SpectralResult};

/// Number of bands in every spectrum produced by a [`crate::SpectralModel`].
pub const SPECTRUM_BANDS: usize = 122;

/// Positional offset of the first band consumed by the reflectance-weighted
/// integration: bands 0 and 1 (300 and 305 nm) sit below the 310 nm lower
/// edge of typical reflectance measurements and are skipped.
pub const R_BAND_OFFSET: usize = 2;

/// Number of band intervals integrated for the reflectance-weighted ratio,
/// spanning 310 nm up to the 2800 nm band edge.
pub const R_BAND_COUNT: usize = 107;

/// Band centers in nanometres: 5 nm steps through the UV edge, 10 nm through
/// the visible and NIR, 40 nm through the SWIR and 100 nm out to 4000 nm.
pub const WAVELENGTH_NM: [f64; SPECTRUM_BANDS] = [
    300.0, 305.0, 310.0, 320.0, 330.0, 340.0, 350.0, 360.0, 370.0, 380.0, 390.0, 400.0, 410.0,
    420.0, 430.0, 440.0, 450.0, 460.0, 470.0, 480.0, 490.0, 500.0, 510.0, 520.0, 530.0, 540.0,
    550.0, 560.0, 570.0, 580.0, 590.0, 600.0, 610.0, 620.0, 630.0, 640.0, 650.0, 660.0, 670.0,
    680.0, 690.0, 700.0, 710.0, 720.0, 730.0, 740.0, 750.0, 760.0, 770.0, 780.0, 790.0, 800.0,
    810.0, 820.0, 830.0, 840.0, 850.0, 860.0, 870.0, 880.0, 890.0, 900.0, 920.0, 960.0, 1000.0,
    1040.0, 1080.0, 1120.0, 1160.0, 1200.0, 1240.0, 1280.0, 1320.0, 1360.0, 1400.0, 1440.0,
    1480.0, 1520.0, 1560.0, 1600.0, 1640.0, 1680.0, 1720.0, 1760.0, 1800.0, 1840.0, 1880.0,
    1920.0, 1960.0, 2000.0, 2040.0, 2080.0, 2120.0, 2160.0, 2200.0, 2240.0, 2280.0, 2320.0,
    2360.0, 2400.0, 2440.0, 2480.0, 2520.0, 2560.0, 2600.0, 2640.0, 2680.0, 2720.0, 2760.0,
    2800.0, 2900.0, 3000.0, 3100.0, 3200.0, 3300.0, 3400.0, 3500.0, 3600.0, 3700.0, 3800.0,
    3900.0, 4000.0,
];

/// Verify that a returned wavelength axis matches the fixed grid.
///
/// The integration offsets above are only safe if every sample comes back on
/// this exact axis, so the orchestrator checks each model response.
pub fn check_grid_contract(wavelength_nm: &[f64]) -> SpectralResult<()> {
    if wavelength_nm.len() != SPECTRUM_BANDS {
        return Err(SpectralError::GridContract {
            what: format!(
                "expected {} bands, model returned {}",
                SPECTRUM_BANDS,
                wavelength_nm.len()
            ),
        });
    }
    for (i, (got, expected)) in wavelength_nm.iter().zip(WAVELENGTH_NM.iter()).enumerate() {
        if (got - expected).abs() > 1e-9 {
            return Err(SpectralError::GridContract {
                what: format!("band {i}: expected {expected} nm, model returned {got} nm"),
            });
        }
    }
    Ok(())
}
