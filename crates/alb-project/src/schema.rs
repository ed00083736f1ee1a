//! Simulation configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub version: u32,
    pub name: String,
    pub array: ArrayDef,
    #[serde(default)]
    pub sensor: SensorDef,
    #[serde(default)]
    pub atmosphere: AtmosphereDef,
    pub window: WindowDef,
    pub files: FilesDef,
}

/// PV row array geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArrayDef {
    pub row_count: usize,
    /// Hub height of the rows (m).
    pub hub_height_m: f64,
    /// Width of one row cross-section (m).
    pub row_width_m: f64,
    pub tilt_deg: f64,
    pub azimuth_deg: f64,
    /// Ground coverage ratio.
    pub gcr: f64,
    #[serde(default)]
    pub axis_azimuth_deg: f64,
    #[serde(default = "default_ground_x_min_m")]
    pub ground_x_min_m: f64,
    #[serde(default = "default_ground_x_max_m")]
    pub ground_x_max_m: f64,
}

fn default_ground_x_min_m() -> f64 {
    -10.0
}

fn default_ground_x_max_m() -> f64 {
    10.0
}

/// Albedometer geometry: a single horizontal row sharing the array's
/// azimuth and ground span.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorDef {
    /// Mounting height of the sensor dome (m).
    #[serde(default = "default_sensor_height_m")]
    pub height_m: f64,
    /// Diameter of the glass dome (m).
    #[serde(default = "default_dome_width_m")]
    pub dome_width_m: f64,
}

fn default_sensor_height_m() -> f64 {
    1.0
}

fn default_dome_width_m() -> f64 {
    0.05
}

impl Default for SensorDef {
    fn default() -> Self {
        Self {
            height_m: default_sensor_height_m(),
            dome_width_m: default_dome_width_m(),
        }
    }
}

/// Fixed atmosphere parameters for the spectral model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AtmosphereDef {
    /// Broadband ground albedo fed to the spectral model.
    #[serde(default = "default_ground_albedo")]
    pub ground_albedo: f64,
    /// Precipitable water column (cm).
    #[serde(default = "default_precipitable_water_cm")]
    pub precipitable_water_cm: f64,
    /// Ozone column (atm-cm).
    #[serde(default = "default_ozone_atm_cm")]
    pub ozone_atm_cm: f64,
    /// Aerosol optical depth at 500 nm.
    #[serde(default = "default_aerosol_od_500nm")]
    pub aerosol_od_500nm: f64,
}

fn default_ground_albedo() -> f64 {
    0.2
}

fn default_precipitable_water_cm() -> f64 {
    1.551
}

fn default_ozone_atm_cm() -> f64 {
    0.314
}

fn default_aerosol_od_500nm() -> f64 {
    0.221
}

impl Default for AtmosphereDef {
    fn default() -> Self {
        Self {
            ground_albedo: default_ground_albedo(),
            precipitable_water_cm: default_precipitable_water_cm(),
            ozone_atm_cm: default_ozone_atm_cm(),
            aerosol_od_500nm: default_aerosol_od_500nm(),
        }
    }
}

/// One wall-clock hour boundary of the simulation window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HourStamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

/// Hourly simulation window, inclusive of both endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WindowDef {
    pub start: HourStamp,
    pub end: HourStamp,
    #[serde(default)]
    pub utc_offset_h: i32,
}

/// Input and output file locations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilesDef {
    pub weather: PathBuf,
    pub reflectance: PathBuf,
    pub results_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_YAML: &str = "\
version: 1
name: test-site
array:
  row_count: 3
  hub_height_m: 2.0
  row_width_m: 2.0
  tilt_deg: 25.0
  azimuth_deg: 180.0
  gcr: 0.4
window:
  start: { year: 2019, month: 11, day: 1, hour: 0 }
  end: { year: 2019, month: 11, day: 1, hour: 3 }
files:
  weather: data/weather.csv
  reflectance: data/reflectance.csv
  results_dir: results
";

    #[test]
    fn minimal_config_gets_defaults() {
        let config: SimulationConfig = serde_yaml::from_str(MINIMAL_YAML).unwrap();
        assert_eq!(config.sensor.height_m, 1.0);
        assert_eq!(config.sensor.dome_width_m, 0.05);
        assert_eq!(config.atmosphere.precipitable_water_cm, 1.551);
        assert_eq!(config.atmosphere.ozone_atm_cm, 0.314);
        assert_eq!(config.atmosphere.aerosol_od_500nm, 0.221);
        assert_eq!(config.array.ground_x_min_m, -10.0);
        assert_eq!(config.array.ground_x_max_m, 10.0);
        assert_eq!(config.window.utc_offset_h, 0);
    }

    #[test]
    fn roundtrips_through_yaml() {
        let config: SimulationConfig = serde_yaml::from_str(MINIMAL_YAML).unwrap();
        let text = serde_yaml::to_string(&config).unwrap();
        let back: SimulationConfig = serde_yaml::from_str(&text).unwrap();
        assert_eq!(config, back);
    }
}
