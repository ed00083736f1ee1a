//! Sun-geometry helpers shared by the spectral and geometry crates.
//!
//! Angles are degrees at the API boundary (matching weather-file columns)
//! and converted to radians internally.

/// Solar zenith angles above this are "sun below horizon".
pub const HORIZON_ZENITH_DEG: f64 = 90.0;

/// Clamp a solar zenith angle for below-horizon hours.
///
/// Airmass and spectral models are undefined past 90 degrees, so night-time
/// zenith values are mapped to 0. Callers that need to distinguish night
/// hours must check irradiance columns, not the clamped angle.
pub fn horizon_clamped_zenith(zenith_deg: f64) -> f64 {
    if zenith_deg > HORIZON_ZENITH_DEG {
        0.0
    } else {
        zenith_deg
    }
}

/// Angle of incidence of the solar beam on a tilted surface, in degrees.
///
/// For a horizontal surface (tilt = 0) this reduces to the solar zenith.
pub fn angle_of_incidence(
    surface_tilt_deg: f64,
    surface_azimuth_deg: f64,
    solar_zenith_deg: f64,
    solar_azimuth_deg: f64,
) -> f64 {
    let tilt = surface_tilt_deg.to_radians();
    let zenith = solar_zenith_deg.to_radians();
    let az_delta = (solar_azimuth_deg - surface_azimuth_deg).to_radians();

    let cos_aoi = tilt.cos() * zenith.cos() + tilt.sin() * zenith.sin() * az_delta.cos();
    cos_aoi.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Relative airmass after Kasten & Young (1989).
///
/// Returns NaN for zenith angles past the horizon; callers are expected to
/// clamp night-time zenith values first (see [`horizon_clamped_zenith`]).
pub fn relative_airmass(zenith_deg: f64) -> f64 {
    if !(0.0..=HORIZON_ZENITH_DEG).contains(&zenith_deg) {
        return f64::NAN;
    }
    let cos_z = zenith_deg.to_radians().cos();
    1.0 / (cos_z + 0.50572 * (96.07995 - zenith_deg).powf(-1.6364))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};

    #[test]
    fn zenith_clamp_is_zero_past_horizon() {
        assert_eq!(horizon_clamped_zenith(90.1), 0.0);
        assert_eq!(horizon_clamped_zenith(120.0), 0.0);
        assert_eq!(horizon_clamped_zenith(89.9), 89.9);
        assert_eq!(horizon_clamped_zenith(0.0), 0.0);
    }

    #[test]
    fn aoi_on_horizontal_surface_equals_zenith() {
        let tol = Tolerances::default();
        for zenith in [0.0, 12.5, 45.0, 89.0] {
            let aoi = angle_of_incidence(0.0, 180.0, zenith, 95.0);
            assert!(nearly_equal(aoi, zenith, tol), "zenith {zenith} -> {aoi}");
        }
    }

    #[test]
    fn aoi_facing_the_sun() {
        // Surface tilted toward the sun's azimuth sees the beam head-on.
        let aoi = angle_of_incidence(30.0, 180.0, 30.0, 180.0);
        assert!(aoi.abs() < 1e-9);
    }

    #[test]
    fn airmass_overhead_is_unity() {
        let am = relative_airmass(0.0);
        assert!((am - 1.0).abs() < 1e-3, "am = {am}");
    }

    #[test]
    fn airmass_grows_toward_horizon() {
        let am_45 = relative_airmass(45.0);
        let am_85 = relative_airmass(85.0);
        assert!(am_45 > 1.0 && am_85 > am_45);
        // Kasten-Young stays finite right at the horizon.
        let am_90 = relative_airmass(90.0);
        assert!(am_90.is_finite() && am_90 > 30.0);
    }

    #[test]
    fn airmass_is_nan_below_horizon() {
        assert!(relative_airmass(90.5).is_nan());
        assert!(relative_airmass(-1.0).is_nan());
    }
}
