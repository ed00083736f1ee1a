//! Surface primitives for the 2D array cross-section.
//!
//! The geometry lives in the vertical plane perpendicular to the row axis:
//! x runs along the ground away from the axis, y points up. Rows are line
//! segments ("strips") of the row cross-section; the ground is the y = 0
//! line between the configured span limits.

use crate::error::{GeometryError, GeometryResult};

/// Surfaces shorter than this are treated as degenerate: they cannot see
/// anything, and in particular must not pick up a sky view factor from the
/// conservation closure.
pub const DISTANCE_TOLERANCE: f64 = 1e-7;

/// A point in the cross-section plane (metres).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Category of a discretized surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Ground segment inside a caster's shadow interval.
    GroundShaded,
    /// Ground segment receiving direct beam.
    GroundIlluminated,
    /// Row side whose normal points to the rotated "up" half-plane.
    RowFront,
    /// Row side whose normal points to the rotated "down" half-plane.
    RowBack,
}

/// One planar element of the ordered surface set.
#[derive(Clone, Copy, Debug)]
pub struct Surface {
    pub kind: SurfaceKind,
    pub a: Point,
    pub b: Point,
    /// Unit normal on the side this surface radiates from.
    pub normal: (f64, f64),
}

impl Surface {
    pub fn length(&self) -> f64 {
        self.a.distance(&self.b)
    }
}

/// Scalar description of a row array, as handed to the geometric engine.
#[derive(Clone, Copy, Debug)]
pub struct RowConfig {
    pub row_count: usize,
    /// Hub height of the row center above ground (m).
    pub row_height_m: f64,
    /// Width of the row cross-section (m).
    pub row_width_m: f64,
    /// Azimuth of the rotation axis (deg).
    pub axis_azimuth_deg: f64,
    /// Ground coverage ratio; sets the row pitch as width / gcr.
    pub gcr: f64,
    pub surface_tilt_deg: f64,
    pub surface_azimuth_deg: f64,
    pub ground_x_min_m: f64,
    pub ground_x_max_m: f64,
}

impl RowConfig {
    pub fn validate(&self) -> GeometryResult<()> {
        if self.row_count == 0 {
            return Err(GeometryError::InvalidConfig {
                what: "row_count must be at least 1".to_string(),
            });
        }
        if !(self.row_width_m > 0.0) {
            return Err(GeometryError::InvalidConfig {
                what: format!("row_width_m must be positive, got {}", self.row_width_m),
            });
        }
        if !(self.row_height_m > 0.0) {
            return Err(GeometryError::InvalidConfig {
                what: format!("row_height_m must be positive, got {}", self.row_height_m),
            });
        }
        if !(self.gcr > 0.0 && self.gcr <= 1.0) {
            return Err(GeometryError::InvalidConfig {
                what: format!("gcr must be in (0, 1], got {}", self.gcr),
            });
        }
        if !(self.ground_x_min_m < self.ground_x_max_m) {
            return Err(GeometryError::InvalidConfig {
                what: format!(
                    "ground span is empty: [{}, {}]",
                    self.ground_x_min_m, self.ground_x_max_m
                ),
            });
        }
        if !(0.0..=90.0).contains(&self.surface_tilt_deg) {
            return Err(GeometryError::InvalidConfig {
                what: format!(
                    "surface_tilt_deg must be in [0, 90], got {}",
                    self.surface_tilt_deg
                ),
            });
        }
        Ok(())
    }

    /// Center-to-center row spacing (m).
    pub fn pitch_m(&self) -> f64 {
        self.row_width_m / self.gcr
    }

    /// Signed rotation of the rows for this timestep.
    ///
    /// Positive rotation means the front side faces the negative-x half of
    /// the cross-section ("tilted to left"), following the sign convention
    /// of the rotation vector the matrix assembly keys off.
    pub fn rotation_state(&self) -> RotationState {
        let facing_right = (self.surface_azimuth_deg - self.axis_azimuth_deg - 90.0)
            .to_radians()
            .cos()
            >= 0.0;
        let rotation_deg = if facing_right {
            -self.surface_tilt_deg
        } else {
            self.surface_tilt_deg
        };
        RotationState {
            rotation_deg,
            tilted_to_left: rotation_deg > 0.0,
        }
    }

    /// Row strips in x order, centered symmetrically around x = 0.
    pub fn strips(&self) -> Vec<RowStrip> {
        let rotation = self.rotation_state();
        let r = rotation.rotation_deg.to_radians();
        let half = self.row_width_m / 2.0;
        let pitch = self.pitch_m();
        let offset = (self.row_count as f64 - 1.0) / 2.0;

        (0..self.row_count)
            .map(|k| {
                let x_center = (k as f64 - offset) * pitch;
                let dx = half * r.cos();
                let dy = half * r.sin();
                RowStrip {
                    low: Point::new(x_center - dx, self.row_height_m - dy),
                    high: Point::new(x_center + dx, self.row_height_m + dy),
                    rotation_deg: rotation.rotation_deg,
                }
            })
            .collect()
    }
}

/// Sun position driving one timestep's fit.
#[derive(Clone, Copy, Debug)]
pub struct SunPosition {
    pub zenith_deg: f64,
    pub azimuth_deg: f64,
}

/// Per-timestep rotation state of a row array.
#[derive(Clone, Copy, Debug)]
pub struct RotationState {
    pub rotation_deg: f64,
    pub tilted_to_left: bool,
}

/// One row's cross-section segment.
#[derive(Clone, Copy, Debug)]
pub struct RowStrip {
    /// Endpoint on the lower-x side of the rotated strip.
    pub low: Point,
    /// Endpoint on the higher-x side.
    pub high: Point,
    pub rotation_deg: f64,
}

impl RowStrip {
    pub fn length(&self) -> f64 {
        self.low.distance(&self.high)
    }

    /// Unit normal of the front side (rotated "up").
    pub fn front_normal(&self) -> (f64, f64) {
        let r = self.rotation_deg.to_radians();
        (-r.sin(), r.cos())
    }

    /// Unit normal of the back side (rotated "down").
    pub fn back_normal(&self) -> (f64, f64) {
        let (nx, ny) = self.front_normal();
        (-nx, -ny)
    }

    pub fn front_surface(&self) -> Surface {
        Surface {
            kind: SurfaceKind::RowFront,
            a: self.low,
            b: self.high,
            normal: self.front_normal(),
        }
    }

    pub fn back_surface(&self) -> Surface {
        Surface {
            kind: SurfaceKind::RowBack,
            a: self.low,
            b: self.high,
            normal: self.back_normal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> RowConfig {
        RowConfig {
            row_count: 3,
            row_height_m: 2.0,
            row_width_m: 2.0,
            axis_azimuth_deg: 0.0,
            gcr: 0.4,
            surface_tilt_deg: 25.0,
            surface_azimuth_deg: 90.0,
            ground_x_min_m: -10.0,
            ground_x_max_m: 10.0,
        }
    }

    #[test]
    fn validation_catches_bad_configs() {
        let mut c = base_config();
        c.row_count = 0;
        assert!(c.validate().is_err());

        let mut c = base_config();
        c.gcr = 0.0;
        assert!(c.validate().is_err());

        let mut c = base_config();
        c.ground_x_min_m = 5.0;
        c.ground_x_max_m = -5.0;
        assert!(c.validate().is_err());

        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn rows_are_centered_with_pitch_spacing() {
        let strips = base_config().strips();
        assert_eq!(strips.len(), 3);
        let pitch = base_config().pitch_m();
        let center =
            |s: &RowStrip| Point::new((s.low.x + s.high.x) / 2.0, (s.low.y + s.high.y) / 2.0);
        assert!((center(&strips[0]).x + pitch).abs() < 1e-12);
        assert!(center(&strips[1]).x.abs() < 1e-12);
        assert!((center(&strips[2]).x - pitch).abs() < 1e-12);
    }

    #[test]
    fn horizontal_strip_normals_point_up_and_down() {
        let mut c = base_config();
        c.surface_tilt_deg = 0.0;
        c.row_count = 1;
        let strip = c.strips()[0];
        let (fx, fy) = strip.front_normal();
        assert!(fx.abs() < 1e-12 && (fy - 1.0).abs() < 1e-12);
        let (bx, by) = strip.back_normal();
        assert!(bx.abs() < 1e-12 && (by + 1.0).abs() < 1e-12);
    }

    #[test]
    fn rotation_sign_follows_surface_azimuth() {
        // Facing the +x half (azimuth == axis + 90): rotated to the right.
        let mut c = base_config();
        c.surface_azimuth_deg = c.axis_azimuth_deg + 90.0;
        let rot = c.rotation_state();
        assert!(rot.rotation_deg < 0.0);
        assert!(!rot.tilted_to_left);

        // Facing the -x half: rotated to the left.
        c.surface_azimuth_deg = c.axis_azimuth_deg + 270.0;
        let rot = c.rotation_state();
        assert!(rot.rotation_deg > 0.0);
        assert!(rot.tilted_to_left);
    }

    #[test]
    fn strip_length_equals_row_width() {
        for tilt in [0.0, 10.0, 45.0] {
            let mut c = base_config();
            c.surface_tilt_deg = tilt;
            let strip = c.strips()[0];
            assert!((strip.length() - c.row_width_m).abs() < 1e-12);
        }
    }
}
