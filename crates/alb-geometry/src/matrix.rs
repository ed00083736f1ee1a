//! Per-timestep view-factor matrix assembly.
//!
//! The matrix covers the sensor fit's ordered surface set (shared ground
//! segments, then the sensor row's back and front sides) plus one extra
//! index for the sky. The PV-row fit contributes its shadows to the shared
//! ground discretization; its panel surfaces do not get matrix rows, which
//! matches sizing the matrix by the sensor configuration.

use nalgebra::DMatrix;
use tracing::debug;

use crate::error::{GeometryError, GeometryResult};
use crate::shadow::{discretize_ground, shadow_interval, shadow_slope};
use crate::surface::{DISTANCE_TOLERANCE, RowConfig, SunPosition, Surface, SurfaceKind};
use crate::vf::{vf_row_to_ground, vf_row_to_row};

/// View factors from the sensor's ground-facing side to the classified
/// ground composites.
///
/// The unshaded ground splits into three composites by position relative to
/// the shaded region: left of it, between its parts, and right of it. Their
/// sum is the total unshaded view factor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SensorGroundView {
    pub vf_shaded: f64,
    pub vf_partial_left: f64,
    pub vf_partial_mid: f64,
    pub vf_partial_right: f64,
}

impl SensorGroundView {
    pub fn vf_unshaded(&self) -> f64 {
        self.vf_partial_left + self.vf_partial_mid + self.vf_partial_right
    }
}

/// A fully assembled `(N+1) x (N+1)` view-factor matrix for one timestep,
/// with `N` real surfaces and the sky at index `N`.
#[derive(Clone, Debug)]
pub struct ViewFactorMatrix {
    vf: DMatrix<f64>,
    surfaces: Vec<Surface>,
    ground_count: usize,
}

impl ViewFactorMatrix {
    /// Number of real surfaces (the sky index).
    pub fn n_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    pub fn sky_index(&self) -> usize {
        self.surfaces.len()
    }

    /// Matrix side length, real surfaces plus sky.
    pub fn dimension(&self) -> usize {
        self.surfaces.len() + 1
    }

    pub fn value(&self, from: usize, to: usize) -> f64 {
        self.vf[(from, to)]
    }

    /// Sum of surface `i`'s outgoing view factors including the sky.
    pub fn row_sum(&self, from: usize) -> f64 {
        self.vf.row(from).sum()
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Index of the sensor's ground-facing (back) surface.
    pub fn sensor_back_index(&self) -> usize {
        self.ground_count
    }

    /// Index of the sensor's sky-facing (front) surface.
    pub fn sensor_front_index(&self) -> usize {
        self.ground_count + 1
    }

    /// Extract the sensor-to-ground view factors, split into the shaded
    /// composite and the three unshaded composites.
    pub fn sensor_ground_view(&self) -> SensorGroundView {
        let sensor = self.sensor_back_index();
        let shaded: Vec<usize> = (0..self.ground_count)
            .filter(|&i| self.surfaces[i].kind == SurfaceKind::GroundShaded)
            .collect();
        let first_shaded = shaded.first().copied();
        let last_shaded = shaded.last().copied();

        let mut view = SensorGroundView::default();
        for i in 0..self.ground_count {
            let f = self.vf[(sensor, i)];
            match self.surfaces[i].kind {
                SurfaceKind::GroundShaded => view.vf_shaded += f,
                SurfaceKind::GroundIlluminated => match (first_shaded, last_shaded) {
                    (Some(lo), Some(hi)) if i > lo && i < hi => view.vf_partial_mid += f,
                    (Some(_), Some(hi)) if i > hi => view.vf_partial_right += f,
                    _ => view.vf_partial_left += f,
                },
                _ => {}
            }
        }
        view
    }
}

/// Assembles the unified view-factor matrix for one timestep.
#[derive(Debug)]
pub struct ViewFactorMatrixBuilder {
    pv: RowConfig,
    sensor: RowConfig,
}

impl ViewFactorMatrixBuilder {
    pub fn new(pv: RowConfig, sensor: RowConfig) -> GeometryResult<Self> {
        pv.validate()?;
        sensor.validate()?;
        if sensor.row_count != 1 {
            return Err(GeometryError::InconsistentFit {
                what: format!(
                    "sensor fit must be a single row, got {}",
                    sensor.row_count
                ),
            });
        }
        if pv.ground_x_min_m != sensor.ground_x_min_m || pv.ground_x_max_m != sensor.ground_x_max_m
        {
            return Err(GeometryError::InconsistentFit {
                what: "PV and sensor fits must share the ground span".to_string(),
            });
        }
        if pv.axis_azimuth_deg != sensor.axis_azimuth_deg {
            return Err(GeometryError::InconsistentFit {
                what: "PV and sensor fits must share the axis azimuth".to_string(),
            });
        }
        Ok(Self { pv, sensor })
    }

    /// Build the matrix for the given sun position.
    pub fn build(&self, sun: &SunPosition) -> GeometryResult<ViewFactorMatrix> {
        let span = (self.pv.ground_x_min_m, self.pv.ground_x_max_m);
        let slope = shadow_slope(sun, self.pv.axis_azimuth_deg);

        let pv_strips = self.pv.strips();
        let sensor_strips = self.sensor.strips();

        // Shared ground discretization: cut at every caster's shadow edges.
        let mut shadows = Vec::with_capacity(pv_strips.len() + 1);
        for strip in pv_strips.iter().chain(sensor_strips.iter()) {
            if let Some(interval) = shadow_interval(strip, slope, span) {
                shadows.push(interval);
            }
        }
        let ground = discretize_ground(span, &shadows);
        let ground_count = ground.len();

        let mut surfaces: Vec<Surface> = ground.iter().map(|s| s.surface()).collect();
        for strip in &sensor_strips {
            surfaces.push(strip.back_surface());
            surfaces.push(strip.front_surface());
        }
        let n = surfaces.len();

        let mut vf = DMatrix::zeros(n + 1, n + 1);
        vf_row_to_ground(&sensor_strips, &ground, &mut vf);
        vf_row_to_row(&sensor_strips, ground_count, &mut vf);

        // Sky view factor by energy conservation, not geometry.
        for i in 0..n {
            let to_real: f64 = (0..n).map(|j| vf[(i, j)]).sum();
            vf[(i, n)] = 1.0 - to_real;
        }

        // A zero-length surface cannot see the sky (or anything else); the
        // conservation closure is only valid for surfaces with real extent.
        for i in 0..n {
            if surfaces[i].length() <= DISTANCE_TOLERANCE {
                for j in 0..=n {
                    vf[(i, j)] = 0.0;
                }
            }
        }

        debug!(
            ground_count,
            n_surfaces = n,
            zenith_deg = sun.zenith_deg,
            "assembled view-factor matrix"
        );

        Ok(ViewFactorMatrix {
            vf,
            surfaces,
            ground_count,
        })
    }
}
