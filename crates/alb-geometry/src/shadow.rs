//! Shadow projection and the shared ground discretization.

use crate::surface::{Point, RowStrip, SunPosition, Surface, SurfaceKind};

/// Bound on the horizontal shadow reach per unit caster height; grazing-sun
/// projections clamp here instead of running to infinity.
const MAX_SHADOW_SLOPE: f64 = 1.0e3;

/// Horizontal displacement of a shadow per unit caster height, projected
/// into the cross-section plane.
///
/// Zero when the sun is aligned with the row axis (the shadow falls along
/// the rows and does not move across the section).
pub fn shadow_slope(sun: &SunPosition, axis_azimuth_deg: f64) -> f64 {
    let zenith = sun.zenith_deg.clamp(0.0, 90.0).to_radians();
    let cross = (sun.azimuth_deg - axis_azimuth_deg - 90.0).to_radians();
    (zenith.tan() * cross.cos()).clamp(-MAX_SHADOW_SLOPE, MAX_SHADOW_SLOPE)
}

/// Shadow interval cast by one strip onto the ground line, clamped to the
/// span. Returns None when the shadow falls entirely outside the span.
pub fn shadow_interval(strip: &RowStrip, slope: f64, span: (f64, f64)) -> Option<(f64, f64)> {
    let project = |p: &Point| p.x - p.y * slope;
    let (s1, s2) = (project(&strip.low), project(&strip.high));
    let (lo, hi) = if s1 <= s2 { (s1, s2) } else { (s2, s1) };
    let lo = lo.max(span.0);
    let hi = hi.min(span.1);
    if lo < hi { Some((lo, hi)) } else { None }
}

/// One segment of the discretized ground.
#[derive(Clone, Copy, Debug)]
pub struct GroundSegment {
    pub x_start: f64,
    pub x_end: f64,
    pub shaded: bool,
}

impl GroundSegment {
    pub fn length(&self) -> f64 {
        self.x_end - self.x_start
    }

    pub fn surface(&self) -> Surface {
        Surface {
            kind: if self.shaded {
                SurfaceKind::GroundShaded
            } else {
                SurfaceKind::GroundIlluminated
            },
            a: Point::new(self.x_start, 0.0),
            b: Point::new(self.x_end, 0.0),
            normal: (0.0, 1.0),
        }
    }
}

/// Cut the ground span at every shadow boundary and classify each segment.
///
/// The cut points are shared between array fits: passing the union of both
/// configurations' shadow intervals yields the common discretization the
/// matrix assembly relies on. Segments are ordered by x; a segment is
/// shaded when its midpoint falls inside any interval.
pub fn discretize_ground(span: (f64, f64), shadows: &[(f64, f64)]) -> Vec<GroundSegment> {
    let mut cuts = vec![span.0, span.1];
    for &(lo, hi) in shadows {
        cuts.push(lo.clamp(span.0, span.1));
        cuts.push(hi.clamp(span.0, span.1));
    }
    cuts.sort_by(|a, b| a.total_cmp(b));
    cuts.dedup();

    cuts.windows(2)
        .map(|w| {
            let mid = (w[0] + w[1]) / 2.0;
            GroundSegment {
                x_start: w[0],
                x_end: w[1],
                shaded: shadows.iter().any(|&(lo, hi)| lo <= mid && mid <= hi),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_strip(x_center: f64, height: f64, width: f64) -> RowStrip {
        RowStrip {
            low: Point::new(x_center - width / 2.0, height),
            high: Point::new(x_center + width / 2.0, height),
            rotation_deg: 0.0,
        }
    }

    #[test]
    fn overhead_sun_casts_shadow_directly_below() {
        let sun = SunPosition {
            zenith_deg: 0.0,
            azimuth_deg: 180.0,
        };
        let slope = shadow_slope(&sun, 0.0);
        assert!(slope.abs() < 1e-12);
        let strip = flat_strip(1.0, 2.0, 0.5);
        let (lo, hi) = shadow_interval(&strip, slope, (-10.0, 10.0)).unwrap();
        assert!((lo - 0.75).abs() < 1e-12 && (hi - 1.25).abs() < 1e-12);
    }

    #[test]
    fn sun_along_axis_does_not_shift_the_shadow() {
        // Azimuth equal to the axis azimuth: no cross-section displacement.
        let sun = SunPosition {
            zenith_deg: 60.0,
            azimuth_deg: 0.0,
        };
        assert!(shadow_slope(&sun, 0.0).abs() < 1e-9);
    }

    #[test]
    fn low_sun_shifts_and_stretches_the_shadow() {
        let sun = SunPosition {
            zenith_deg: 45.0,
            azimuth_deg: 90.0,
        };
        let slope = shadow_slope(&sun, 0.0);
        assert!((slope - 1.0).abs() < 1e-9);
        let strip = flat_strip(0.0, 2.0, 1.0);
        let (lo, hi) = shadow_interval(&strip, slope, (-10.0, 10.0)).unwrap();
        assert!((lo + 2.5).abs() < 1e-9 && (hi + 1.5).abs() < 1e-9);
    }

    #[test]
    fn grazing_sun_projection_stays_finite() {
        let sun = SunPosition {
            zenith_deg: 90.0,
            azimuth_deg: 90.0,
        };
        let slope = shadow_slope(&sun, 0.0);
        assert!(slope.is_finite());
        let strip = flat_strip(0.0, 2.0, 1.0);
        // The clamped projection lands far outside the span on one side.
        assert!(shadow_interval(&strip, slope, (-10.0, 10.0)).is_none());
    }

    #[test]
    fn discretization_orders_and_classifies_segments() {
        let segments = discretize_ground((-10.0, 10.0), &[(-4.0, -2.0), (1.0, 3.0)]);
        let spans: Vec<(f64, f64, bool)> = segments
            .iter()
            .map(|s| (s.x_start, s.x_end, s.shaded))
            .collect();
        assert_eq!(
            spans,
            vec![
                (-10.0, -4.0, false),
                (-4.0, -2.0, true),
                (-2.0, 1.0, false),
                (1.0, 3.0, true),
                (3.0, 10.0, false),
            ]
        );
    }

    #[test]
    fn overlapping_shadows_merge_into_one_shaded_region() {
        let segments = discretize_ground((-10.0, 10.0), &[(-1.0, 2.0), (1.0, 4.0)]);
        let shaded: Vec<(f64, f64)> = segments
            .iter()
            .filter(|s| s.shaded)
            .map(|s| (s.x_start, s.x_end))
            .collect();
        assert_eq!(shaded, vec![(-1.0, 1.0), (1.0, 2.0), (2.0, 4.0)]);
        // Coverage is contiguous even though the cut points remain.
        let total: f64 = shaded.iter().map(|(a, b)| b - a).sum();
        assert!((total - 5.0).abs() < 1e-12);
    }

    #[test]
    fn segments_tile_the_span_exactly() {
        let segments = discretize_ground((-10.0, 10.0), &[(-0.5, 0.5), (2.0, 6.0)]);
        let total: f64 = segments.iter().map(GroundSegment::length).sum();
        assert!((total - 20.0).abs() < 1e-12);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].x_end, pair[1].x_start);
        }
    }
}
