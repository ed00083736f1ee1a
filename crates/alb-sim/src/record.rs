//! Hourly result records.

use chrono::NaiveDateTime;

/// One processed hour with every intermediate quantity kept for
/// traceability, not just the final albedo. Records are immutable once
/// appended to the run's ordered sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HourlyAlbedoRecord {
    pub timestamp: NaiveDateTime,
    /// Spectral, geometry-weighted ground albedo.
    pub albedo: f64,
    /// Reflectance-weighted irradiance ratio.
    pub r: f64,
    /// Direct/diffuse irradiance ratio.
    pub h: f64,
    /// Sensor view factor to the unshaded ground composite.
    pub vf_unshaded: f64,
    /// Unshaded composite left of the shaded region.
    pub vf_partial_left: f64,
    /// Unshaded composite between shaded parts.
    pub vf_partial_mid: f64,
    /// Unshaded composite right of the shaded region.
    pub vf_partial_right: f64,
    /// Sensor view factor to the shaded ground composite.
    pub vf_shaded: f64,
}
