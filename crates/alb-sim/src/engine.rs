//! The hourly albedo-estimation engine.
//!
//! One linear pass over hour indices `0..T`, `T` spanning the configured
//! window inclusive of both endpoints. Each hour is an independent unit of
//! work: spectrum, irradiance ratios, view-factor matrix, albedo. No state
//! crosses hours except the growing record sequence, so the hours can run
//! on a rayon pool with records collected back in hour order.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rayon::prelude::*;
use tracing::{debug, info};

use alb_geometry::{RowConfig, SunPosition, ViewFactorMatrixBuilder};
use alb_project::{HourStamp, SimulationConfig, WindowDef};
use alb_spectral::{
    HourInputs, OrchestratorConfig, R_BAND_COUNT, R_BAND_OFFSET, SpectralModel,
    SpectralOrchestrator,
};
use alb_weather::{ReflectanceCurve, WeatherRow, WeatherSeries};

use crate::error::{PipelineError, PipelineResult};
use crate::record::HourlyAlbedoRecord;
use crate::results::{ENGINE_VERSION, ResultsStore, RunManifest, compute_run_id};

/// Options for engine runs.
#[derive(Clone, Copy, Debug)]
pub struct EngineOptions {
    /// Compute hours on the rayon pool. Records come back in hour order
    /// either way.
    pub parallel: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

fn stamp_to_naive(stamp: &HourStamp, field: &str) -> PipelineResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(stamp.year, stamp.month, stamp.day)
        .and_then(|d| d.and_hms_opt(stamp.hour, 0, 0))
        .ok_or_else(|| PipelineError::InvalidWindow {
            what: format!(
                "{field}: {}-{:02}-{:02} {:02}:00 is not a valid date",
                stamp.year, stamp.month, stamp.day, stamp.hour
            ),
        })
}

/// Number of hourly steps in a window, inclusive of both endpoints.
pub fn hour_count(window: &WindowDef) -> PipelineResult<usize> {
    let start = stamp_to_naive(&window.start, "window.start")?;
    let end = stamp_to_naive(&window.end, "window.end")?;
    if end < start {
        return Err(PipelineError::InvalidWindow {
            what: format!("window ends before it starts ({start} .. {end})"),
        });
    }
    Ok((end - start).num_hours() as usize + 1)
}

/// Drives the per-hour loop for one simulation window.
pub struct AlbedoEngine<'a> {
    config: &'a SimulationConfig,
    model: &'a dyn SpectralModel,
    reflectance: &'a ReflectanceCurve,
    options: EngineOptions,
    builder: ViewFactorMatrixBuilder,
    start: NaiveDateTime,
    hours: usize,
}

impl std::fmt::Debug for AlbedoEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlbedoEngine")
            .field("config", &self.config)
            .field("model", &self.model.name())
            .field("reflectance", &self.reflectance)
            .field("options", &self.options)
            .field("builder", &self.builder)
            .field("start", &self.start)
            .field("hours", &self.hours)
            .finish()
    }
}

impl<'a> AlbedoEngine<'a> {
    pub fn new(
        config: &'a SimulationConfig,
        model: &'a dyn SpectralModel,
        reflectance: &'a ReflectanceCurve,
        options: EngineOptions,
    ) -> PipelineResult<Self> {
        if reflectance.len() < R_BAND_COUNT {
            return Err(PipelineError::ReflectanceLength {
                len: reflectance.len(),
                needed: R_BAND_COUNT,
            });
        }

        let start = stamp_to_naive(&config.window.start, "window.start")?;
        let hours = hour_count(&config.window)?;

        let builder = ViewFactorMatrixBuilder::new(pv_row_config(config), sensor_row_config(config))
            .map_err(|e| PipelineError::GeometryConfig {
                message: e.to_string(),
            })?;

        Ok(Self {
            config,
            model,
            reflectance,
            options,
            builder,
            start,
            hours,
        })
    }

    pub fn hours(&self) -> usize {
        self.hours
    }

    /// Run the window and return one record per hour, in hour order.
    pub fn run(&self, weather: &WeatherSeries) -> PipelineResult<Vec<HourlyAlbedoRecord>> {
        if weather.len() < self.hours {
            return Err(PipelineError::MissingHour {
                hour: self.hours - 1,
                rows: weather.len(),
            });
        }

        let orchestrator = SpectralOrchestrator::new(
            self.model,
            OrchestratorConfig {
                surface_azimuth_deg: self.config.array.azimuth_deg,
                ground_albedo: self.config.atmosphere.ground_albedo,
                precipitable_water_cm: self.config.atmosphere.precipitable_water_cm,
                ozone_atm_cm: self.config.atmosphere.ozone_atm_cm,
                aerosol_od_500nm: self.config.atmosphere.aerosol_od_500nm,
                start: self.start,
            },
        );

        info!(
            hours = self.hours,
            parallel = self.options.parallel,
            model = self.model.name(),
            "starting albedo run"
        );

        let records = if self.options.parallel {
            (0..self.hours)
                .into_par_iter()
                .map(|j| self.compute_hour(&orchestrator, weather, j))
                .collect::<PipelineResult<Vec<_>>>()?
        } else {
            let mut records = Vec::with_capacity(self.hours);
            for j in 0..self.hours {
                records.push(self.compute_hour(&orchestrator, weather, j)?);
            }
            records
        };

        info!(records = records.len(), "albedo run complete");
        Ok(records)
    }

    fn compute_hour(
        &self,
        orchestrator: &SpectralOrchestrator<'_>,
        weather: &WeatherSeries,
        j: usize,
    ) -> PipelineResult<HourlyAlbedoRecord> {
        let row = weather.row(j).ok_or(PipelineError::MissingHour {
            hour: j,
            rows: weather.len(),
        })?;

        let sample = orchestrator
            .sample_for_hour(
                &HourInputs {
                    apparent_zenith_deg: row.apparent_zenith_deg,
                    solar_azimuth_deg: row.azimuth_deg,
                    pressure_mbar: row.pressure_mbar,
                },
                j as u32,
            )
            .map_err(|e| PipelineError::Spectral {
                hour: j,
                message: e.to_string(),
            })?;

        debug!(
            hour = j,
            poa_at_310nm = sample.poa_global[R_BAND_OFFSET],
            "spectral sample"
        );

        let r = reflectance_weighted_ratio(
            &sample.wavelength_nm,
            &sample.poa_global,
            self.reflectance.values(),
        );
        let h = direct_diffuse_ratio(row);

        // No global irradiance, no meaningful albedo: the view-factor
        // quantities default to zero without running the matrix numerics.
        let (view, vf_unshaded) = if row.ghi == 0.0 {
            (Default::default(), 0.0)
        } else {
            let matrix = self
                .builder
                .build(&SunPosition {
                    zenith_deg: row.apparent_zenith_deg,
                    azimuth_deg: row.azimuth_deg,
                })
                .map_err(|e| PipelineError::Geometry {
                    hour: j,
                    message: e.to_string(),
                })?;
            let view = matrix.sensor_ground_view();
            (view, view.vf_unshaded())
        };

        let albedo = alb_core::ensure_finite(r * (vf_unshaded + view.vf_shaded / (h + 1.0)), "albedo")
            .map_err(|e| PipelineError::NonFinite {
                hour: j,
                message: e.to_string(),
            })?;

        Ok(HourlyAlbedoRecord {
            timestamp: self.start + Duration::hours(j as i64),
            albedo,
            r,
            h,
            vf_unshaded,
            vf_partial_left: view.vf_partial_left,
            vf_partial_mid: view.vf_partial_mid,
            vf_partial_right: view.vf_partial_right,
            vf_shaded: view.vf_shaded,
        })
    }
}

/// Reflectance-weighted irradiance ratio over the 310-2800 nm window.
///
/// Integrates at the fixed positional offset into the band grid; the
/// wavelength spacing is taken between consecutive bands at the same
/// offset. Zero total irradiance yields R = 0 by policy, not error.
fn reflectance_weighted_ratio(wavelength_nm: &[f64], poa_global: &[f64], reflectance: &[f64]) -> f64 {
    let mut sum_rg = 0.0;
    let mut sum_g = 0.0;
    for i in 0..R_BAND_COUNT {
        let g = poa_global[i + R_BAND_OFFSET];
        let delta = wavelength_nm[i + R_BAND_OFFSET + 1] - wavelength_nm[i + R_BAND_OFFSET];
        sum_rg += g * reflectance[i] * delta;
        sum_g += g * delta;
    }
    if sum_g == 0.0 { 0.0 } else { sum_rg / sum_g }
}

/// Direct/diffuse irradiance ratio H = (DNI/DHI) * cos(zenith).
///
/// Uses the plain zenith column (not the apparent zenith the spectrum path
/// clamps); the below-horizon clamp maps the angle to zero before the
/// cosine. DHI = 0 yields H = 0 by policy, not error.
fn direct_diffuse_ratio(row: &WeatherRow) -> f64 {
    if row.dhi == 0.0 {
        return 0.0;
    }
    let theta = alb_core::horizon_clamped_zenith(row.zenith_deg).to_radians();
    (row.dni / row.dhi) * theta.cos()
}

fn pv_row_config(config: &SimulationConfig) -> RowConfig {
    RowConfig {
        row_count: config.array.row_count,
        row_height_m: config.array.hub_height_m,
        row_width_m: config.array.row_width_m,
        axis_azimuth_deg: config.array.axis_azimuth_deg,
        gcr: config.array.gcr,
        surface_tilt_deg: config.array.tilt_deg,
        surface_azimuth_deg: config.array.azimuth_deg,
        ground_x_min_m: config.array.ground_x_min_m,
        ground_x_max_m: config.array.ground_x_max_m,
    }
}

/// The albedometer modeled as a single-row horizontal array sharing the
/// ground discretization with the PV rows.
fn sensor_row_config(config: &SimulationConfig) -> RowConfig {
    RowConfig {
        row_count: 1,
        row_height_m: config.sensor.height_m,
        row_width_m: config.sensor.dome_width_m,
        axis_azimuth_deg: config.array.axis_azimuth_deg,
        gcr: config.array.gcr,
        surface_tilt_deg: 0.0,
        surface_azimuth_deg: config.array.azimuth_deg,
        ground_x_min_m: config.array.ground_x_min_m,
        ground_x_max_m: config.array.ground_x_max_m,
    }
}

/// Run a configured simulation and persist the results.
///
/// Returns the manifest and the record sequence; the caller is responsible
/// for splicing the albedo column back into the weather file afterwards.
pub fn run_and_save(
    config: &SimulationConfig,
    model: &dyn SpectralModel,
    reflectance: &ReflectanceCurve,
    weather: &WeatherSeries,
    options: EngineOptions,
) -> PipelineResult<(RunManifest, Vec<HourlyAlbedoRecord>)> {
    let engine = AlbedoEngine::new(config, model, reflectance, options)?;
    let records = engine.run(weather)?;

    let store = ResultsStore::new(config.files.results_dir.clone())?;
    let manifest = RunManifest {
        run_id: compute_run_id(config, ENGINE_VERSION),
        name: config.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        hours: records.len(),
        utc_offset_h: config.window.utc_offset_h,
        spectral_model: model.name().to_string(),
        engine_version: ENGINE_VERSION.to_string(),
    };
    store.save_run(&manifest, &records)?;

    Ok((manifest, records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(year: i32, month: u32, day: u32, hour: u32) -> HourStamp {
        HourStamp {
            year,
            month,
            day,
            hour,
        }
    }

    #[test]
    fn window_is_inclusive_of_both_endpoints() {
        let window = WindowDef {
            start: stamp(2019, 11, 1, 0),
            end: stamp(2019, 11, 1, 3),
            utc_offset_h: 0,
        };
        assert_eq!(hour_count(&window).unwrap(), 4);
    }

    #[test]
    fn single_hour_window_has_one_step() {
        let window = WindowDef {
            start: stamp(2019, 11, 1, 5),
            end: stamp(2019, 11, 1, 5),
            utc_offset_h: 0,
        };
        assert_eq!(hour_count(&window).unwrap(), 1);
    }

    #[test]
    fn window_spanning_midnight_counts_across_days() {
        let window = WindowDef {
            start: stamp(2019, 11, 1, 22),
            end: stamp(2019, 11, 2, 2),
            utc_offset_h: 0,
        };
        assert_eq!(hour_count(&window).unwrap(), 5);
    }

    #[test]
    fn reversed_window_is_rejected() {
        let window = WindowDef {
            start: stamp(2019, 11, 2, 0),
            end: stamp(2019, 11, 1, 0),
            utc_offset_h: 0,
        };
        assert!(matches!(
            hour_count(&window).unwrap_err(),
            PipelineError::InvalidWindow { .. }
        ));
    }

    #[test]
    fn impossible_date_is_rejected() {
        let window = WindowDef {
            start: stamp(2019, 2, 30, 0),
            end: stamp(2019, 3, 1, 0),
            utc_offset_h: 0,
        };
        assert!(matches!(
            hour_count(&window).unwrap_err(),
            PipelineError::InvalidWindow { .. }
        ));
    }

    #[test]
    fn h_ratio_policies() {
        let mut row = WeatherRow {
            apparent_zenith_deg: 45.0,
            zenith_deg: 60.0,
            azimuth_deg: 180.0,
            dni: 100.0,
            dhi: 50.0,
            ghi: 400.0,
            pressure_mbar: 1013.0,
            albedo: 0.2,
        };
        // cos(60 deg) = 0.5
        assert!((direct_diffuse_ratio(&row) - 1.0).abs() < 1e-12);

        row.dhi = 0.0;
        assert_eq!(direct_diffuse_ratio(&row), 0.0);

        // Below-horizon zenith clamps to zero inside the cosine.
        row.dhi = 50.0;
        row.zenith_deg = 95.0;
        assert!((direct_diffuse_ratio(&row) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn r_ratio_is_zero_for_dark_spectrum() {
        let wavelength: Vec<f64> = alb_spectral::WAVELENGTH_NM.to_vec();
        let dark = vec![0.0; wavelength.len()];
        let reflectance = vec![0.3; R_BAND_COUNT];
        assert_eq!(
            reflectance_weighted_ratio(&wavelength, &dark, &reflectance),
            0.0
        );
    }

    #[test]
    fn r_ratio_recovers_a_constant_reflectance() {
        let wavelength: Vec<f64> = alb_spectral::WAVELENGTH_NM.to_vec();
        let flat = vec![1.7; wavelength.len()];
        let reflectance = vec![0.3; R_BAND_COUNT];
        let r = reflectance_weighted_ratio(&wavelength, &flat, &reflectance);
        assert!((r - 0.3).abs() < 1e-12);
    }
}
