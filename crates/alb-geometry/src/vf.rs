//! View-factor primitives on 2D strips (Hottel crossed strings).
//!
//! All surfaces here are infinite in the row-axis direction, so view
//! factors reduce to the 2D crossed-strings expression between the two
//! cross-section segments. Partial visibility is handled by clipping each
//! segment to the half-plane the other surface radiates into.

use nalgebra::DMatrix;

use crate::shadow::GroundSegment;
use crate::surface::{DISTANCE_TOLERANCE, Point, RowStrip, Surface};

fn signed_distance(p: &Point, origin: &Point, normal: (f64, f64)) -> f64 {
    (p.x - origin.x) * normal.0 + (p.y - origin.y) * normal.1
}

/// Clip a segment to the half-plane on the positive-normal side of a
/// surface. Returns None when the segment lies entirely behind it.
fn clip_to_half_plane(
    seg: (Point, Point),
    origin: &Point,
    normal: (f64, f64),
) -> Option<(Point, Point)> {
    let (a, b) = seg;
    let da = signed_distance(&a, origin, normal);
    let db = signed_distance(&b, origin, normal);

    match (da >= 0.0, db >= 0.0) {
        (true, true) => Some((a, b)),
        (false, false) => None,
        (front_a, _) => {
            let t = da / (da - db);
            let cross = Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
            if front_a {
                Some((a, cross))
            } else {
                Some((cross, b))
            }
        }
    }
}

fn crossed_strings(from: (Point, Point), to: (Point, Point), from_full_length: f64) -> f64 {
    let (a1, a2) = from;
    let (b1, b2) = to;
    let crossed = a1.distance(&b2) + a2.distance(&b1);
    let uncrossed = a1.distance(&b1) + a2.distance(&b2);
    ((crossed - uncrossed) / (2.0 * from_full_length)).max(0.0)
}

/// View factor from one surface to another.
///
/// Both surfaces are clipped to each other's radiating half-plane first;
/// the result is normalized by the full length of `from`, so partial
/// visibility shows up as a proportionally smaller factor.
pub fn vf_between(from: &Surface, to: &Surface) -> f64 {
    let from_len = from.length();
    if from_len <= DISTANCE_TOLERANCE || to.length() <= DISTANCE_TOLERANCE {
        return 0.0;
    }

    let Some(to_clipped) = clip_to_half_plane((to.a, to.b), &from.a, from.normal) else {
        return 0.0;
    };
    let Some(from_clipped) = clip_to_half_plane((from.a, from.b), &to.a, to.normal) else {
        return 0.0;
    };
    if to_clipped.0.distance(&to_clipped.1) <= DISTANCE_TOLERANCE
        || from_clipped.0.distance(&from_clipped.1) <= DISTANCE_TOLERANCE
    {
        return 0.0;
    }

    crossed_strings(from_clipped, to_clipped, from_len).min(1.0)
}

/// Populate row-to-ground and ground-to-row entries of a view-factor
/// matrix.
///
/// Ground segments occupy indices `0..ground.len()`; row `k`'s back and
/// front surfaces occupy `ground.len() + 2k` and `ground.len() + 2k + 1`.
/// Ground-to-row entries come from reciprocity, with zero-length ground
/// segments left at zero.
pub fn vf_row_to_ground(rows: &[RowStrip], ground: &[GroundSegment], matrix: &mut DMatrix<f64>) {
    let row_offset = ground.len();
    for (k, strip) in rows.iter().enumerate() {
        let row_len = strip.length();
        for (side, surface) in [strip.back_surface(), strip.front_surface()]
            .into_iter()
            .enumerate()
        {
            let row_idx = row_offset + 2 * k + side;
            for (j, segment) in ground.iter().enumerate() {
                let f = vf_between(&surface, &segment.surface());
                matrix[(row_idx, j)] = f;
                let seg_len = segment.length();
                if seg_len > DISTANCE_TOLERANCE {
                    matrix[(j, row_idx)] = f * row_len / seg_len;
                }
            }
        }
    }
}

/// Populate row-to-row entries among the given rows.
///
/// Neighbouring rows see each other through whichever side pair faces the
/// gap; non-facing side pairs clip to nothing and stay zero. Rows further
/// apart than the immediate neighbour are not occluded here; for the
/// single-row sensor fits driving the albedo pipeline there is nothing to
/// occlude.
pub fn vf_row_to_row(rows: &[RowStrip], ground_count: usize, matrix: &mut DMatrix<f64>) {
    for (i, a) in rows.iter().enumerate() {
        for (j, b) in rows.iter().enumerate() {
            if i == j {
                continue;
            }
            for (side_a, surf_a) in [a.back_surface(), a.front_surface()].into_iter().enumerate() {
                for (side_b, surf_b) in
                    [b.back_surface(), b.front_surface()].into_iter().enumerate()
                {
                    let idx_a = ground_count + 2 * i + side_a;
                    let idx_b = ground_count + 2 * j + side_b;
                    matrix[(idx_a, idx_b)] = vf_between(&surf_a, &surf_b);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceKind;

    fn ground_surface(x1: f64, x2: f64) -> Surface {
        Surface {
            kind: SurfaceKind::GroundIlluminated,
            a: Point::new(x1, 0.0),
            b: Point::new(x2, 0.0),
            normal: (0.0, 1.0),
        }
    }

    fn horizontal_strip(x_center: f64, height: f64, width: f64) -> RowStrip {
        RowStrip {
            low: Point::new(x_center - width / 2.0, height),
            high: Point::new(x_center + width / 2.0, height),
            rotation_deg: 0.0,
        }
    }

    #[test]
    fn narrow_strip_above_wide_ground_sees_mostly_ground() {
        let strip = horizontal_strip(0.0, 1.0, 0.05);
        let f = vf_between(&strip.back_surface(), &ground_surface(-10.0, 10.0));
        assert!(f > 0.99 && f <= 1.0, "f = {f}");
    }

    #[test]
    fn upward_side_sees_no_ground() {
        let strip = horizontal_strip(0.0, 1.0, 0.05);
        let f = vf_between(&strip.front_surface(), &ground_surface(-10.0, 10.0));
        assert_eq!(f, 0.0);
    }

    #[test]
    fn view_factor_is_additive_over_adjacent_segments() {
        let strip = horizontal_strip(0.0, 1.5, 0.4);
        let back = strip.back_surface();
        let whole = vf_between(&back, &ground_surface(-6.0, 6.0));
        let parts = vf_between(&back, &ground_surface(-6.0, -1.0))
            + vf_between(&back, &ground_surface(-1.0, 2.0))
            + vf_between(&back, &ground_surface(2.0, 6.0));
        assert!((whole - parts).abs() < 1e-12, "{whole} vs {parts}");
    }

    #[test]
    fn reciprocity_holds_between_strip_and_segment() {
        let strip = horizontal_strip(1.0, 2.0, 1.0);
        let back = strip.back_surface();
        let seg = ground_surface(-3.0, 2.0);
        let f_sg = vf_between(&back, &seg);
        let f_gs = vf_between(&seg, &back);
        // A_s * F_sg == A_g * F_gs
        assert!((back.length() * f_sg - seg.length() * f_gs).abs() < 1e-12);
    }

    #[test]
    fn symmetric_geometry_gives_symmetric_factors() {
        let strip = horizontal_strip(0.0, 1.0, 0.5);
        let back = strip.back_surface();
        let left = vf_between(&back, &ground_surface(-5.0, 0.0));
        let right = vf_between(&back, &ground_surface(0.0, 5.0));
        assert!((left - right).abs() < 1e-12);
    }

    #[test]
    fn degenerate_segment_has_zero_view_factor() {
        let strip = horizontal_strip(0.0, 1.0, 0.5);
        let f = vf_between(&strip.back_surface(), &ground_surface(2.0, 2.0));
        assert_eq!(f, 0.0);
    }

    #[test]
    fn facing_tilted_rows_see_each_other() {
        let tilt = 25.0f64;
        let r = tilt.to_radians();
        let make = |x: f64| RowStrip {
            low: Point::new(x - r.cos(), 2.0 - r.sin()),
            high: Point::new(x + r.cos(), 2.0 + r.sin()),
            rotation_deg: tilt,
        };
        let left = make(0.0);
        let right = make(5.0);

        // The left row's back (facing +x, downward) sees the right row's
        // front (facing -x, upward).
        let f = vf_between(&left.back_surface(), &right.front_surface());
        assert!(f > 0.0 && f < 1.0, "f = {f}");

        // Same-side pair faces away: nothing.
        assert_eq!(vf_between(&left.front_surface(), &right.front_surface()), 0.0);
    }

    #[test]
    fn row_to_ground_fills_both_directions() {
        let strip = horizontal_strip(0.0, 1.0, 0.05);
        let ground = vec![
            GroundSegment {
                x_start: -10.0,
                x_end: 0.0,
                shaded: false,
            },
            GroundSegment {
                x_start: 0.0,
                x_end: 10.0,
                shaded: false,
            },
        ];
        // 2 ground + back + front
        let mut m = DMatrix::zeros(5, 5);
        vf_row_to_ground(&[strip], &ground, &mut m);

        let back = 2;
        assert!(m[(back, 0)] > 0.45);
        assert!(m[(back, 1)] > 0.45);
        // Reciprocity scaled the ground-to-row entries way down.
        assert!(m[(0, back)] > 0.0 && m[(0, back)] < 1e-2);
        // Front row saw nothing.
        assert_eq!(m[(3, 0)], 0.0);
    }
}
