//! Circular-arc geometry: the circumscribed circle, side tests, sweep
//! membership, bounds and length.
//!
//! An arc is defined by three consecutive points of a circular string:
//! start, any interior point, end. Collinear defining points degenerate the
//! arc to a straight segment, signalled here by [`arc_center`] returning
//! `None`.

use super::segment_side;
use planar_types::Coord;

/// Tolerance below which the circumcircle determinant is treated as zero.
const ARC_EPSILON: f64 = 1e-8;

/// Whether the three defining points coincide.
pub fn arc_is_point(a1: &Coord, a2: &Coord, a3: &Coord) -> bool {
    a1.x == a2.x && a2.x == a3.x && a1.y == a2.y && a2.y == a3.y
}

/// Center and radius of the circle through the three points, or `None` when
/// they are collinear and the "arc" is really a segment.
pub fn arc_center(a1: &Coord, a2: &Coord, a3: &Coord) -> Option<(Coord, f64)> {
    // Matching start and end means a whole circle with a2 opposite a1.
    if (a1.x - a3.x).abs() < ARC_EPSILON && (a1.y - a3.y).abs() < ARC_EPSILON {
        let cx = a1.x + (a2.x - a1.x) / 2.0;
        let cy = a1.y + (a2.y - a1.y) / 2.0;
        let c = Coord::xy(cx, cy);
        let r = c.distance_2d(a1);
        return Some((c, r));
    }

    let dx21 = a2.x - a1.x;
    let dy21 = a2.y - a1.y;
    let dx31 = a3.x - a1.x;
    let dy31 = a3.y - a1.y;
    let h21 = dx21 * dx21 + dy21 * dy21;
    let h31 = dx31 * dx31 + dy31 * dy31;
    let d = 2.0 * (dx21 * dy31 - dx31 * dy21);
    if d.abs() < ARC_EPSILON {
        return None;
    }
    let cx = a1.x + (h21 * dy31 - h31 * dy21) / d;
    let cy = a1.y - (h21 * dx31 - h31 * dx21) / d;
    let c = Coord::xy(cx, cy);
    let r = c.distance_2d(a1);
    Some((c, r))
}

/// Whether `p` lies within the angular sweep of the arc: on the same side
/// of the chord `a1 -> a3` as the interior point `a2`.
pub fn point_in_arc_sweep(p: &Coord, a1: &Coord, a2: &Coord, a3: &Coord) -> bool {
    segment_side(a1, a3, a2) == segment_side(a1, a3, p)
}

/// Which side of the arc the point `q` falls on: `-1`/`1` as for
/// [`segment_side`] on the underlying curve direction, `0` on the arc.
pub fn arc_side(a1: &Coord, a2: &Coord, a3: &Coord, q: &Coord) -> i32 {
    let side_q = segment_side(a1, a3, q);
    let Some((center, radius)) = arc_center(a1, a2, a3) else {
        // Collinear control points: behave like the chord.
        return side_q;
    };
    let side_a2 = segment_side(a1, a3, a2);
    let d = q.distance_2d(&center);

    // On the circle and within the sweep.
    if d == radius && side_q == side_a2 {
        return 0;
    }
    // On the chord line, so on the opposite side to the bulge.
    if side_q == 0 {
        return -side_a2;
    }
    // Inside the circle on the bulge side means the arc curves around the
    // point: it is actually on the other side of the curve.
    if d < radius && side_q == side_a2 {
        return -side_q;
    }
    side_q
}

/// The tight planar bounds of the arc, as `(xmin, ymin, xmax, ymax)`.
///
/// Starts from the bounds of the endpoints and adds each axis extreme of
/// the circle that falls on the arc's side of the chord. Matched start and
/// end points mean a whole circle.
pub fn arc_bounding_rect(a1: &Coord, a2: &Coord, a3: &Coord) -> (f64, f64, f64, f64) {
    let Some((c, r)) = arc_center(a1, a2, a3) else {
        return (
            a1.x.min(a3.x),
            a1.y.min(a3.y),
            a1.x.max(a3.x),
            a1.y.max(a3.y),
        );
    };

    if a1.x == a3.x && a1.y == a3.y {
        return (c.x - r, c.y - r, c.x + r, c.y + r);
    }

    let mut xmin = a1.x.min(a3.x);
    let mut ymin = a1.y.min(a3.y);
    let mut xmax = a1.x.max(a3.x);
    let mut ymax = a1.y.max(a3.y);

    let side_a2 = segment_side(a1, a3, a2);
    let extremes = [
        Coord::xy(c.x - r, c.y),
        Coord::xy(c.x + r, c.y),
        Coord::xy(c.x, c.y - r),
        Coord::xy(c.x, c.y + r),
    ];
    for e in &extremes {
        if segment_side(a1, a3, e) == side_a2 {
            xmin = xmin.min(e.x);
            ymin = ymin.min(e.y);
            xmax = xmax.max(e.x);
            ymax = ymax.max(e.y);
        }
    }
    (xmin, ymin, xmax, ymax)
}

/// Length measured along the arc. Collinear control points degrade to the
/// chord length.
pub fn arc_length(a1: &Coord, a2: &Coord, a3: &Coord) -> f64 {
    if arc_is_point(a1, a2, a3) {
        return 0.0;
    }
    let Some((c, r)) = arc_center(a1, a2, a3) else {
        return a1.distance_2d(a3);
    };
    if r == 0.0 {
        return 0.0;
    }
    // Whole circle when the ends meet.
    if a1.x == a3.x && a1.y == a3.y {
        return 2.0 * std::f64::consts::PI * r;
    }
    let t1 = (a1.y - c.y).atan2(a1.x - c.x);
    let t3 = (a3.y - c.y).atan2(a3.x - c.x);
    // Counter-clockwise traversal turns left at the interior point.
    let ccw = segment_side(a1, a2, a3) == -1;
    let tau = 2.0 * std::f64::consts::PI;
    let sweep = if ccw {
        (t3 - t1).rem_euclid(tau)
    } else {
        (t1 - t3).rem_euclid(tau)
    };
    r * sweep
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coord {
        Coord::xy(x, y)
    }

    #[test]
    fn center_of_unit_half_circle() {
        // Upper half of the unit circle, traversed left to right.
        let (center, r) = arc_center(&c(-1.0, 0.0), &c(0.0, 1.0), &c(1.0, 0.0)).unwrap();
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(r, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn collinear_points_are_not_an_arc() {
        assert!(arc_center(&c(0.0, 0.0), &c(1.0, 1.0), &c(2.0, 2.0)).is_none());
    }

    #[test]
    fn side_tests() {
        let (a1, a2, a3) = (c(-1.0, 0.0), c(0.0, 1.0), c(1.0, 0.0));
        // On the arc.
        assert_eq!(arc_side(&a1, &a2, &a3, &c(0.0, 1.0)), 0);
        // Center of the circle is below the arc's curve.
        let below = arc_side(&a1, &a2, &a3, &c(0.0, 0.0));
        let above = arc_side(&a1, &a2, &a3, &c(0.0, 2.0));
        assert_ne!(below, 0);
        assert_ne!(above, 0);
        assert_ne!(below, above);
    }

    #[test]
    fn sweep_membership() {
        let (a1, a2, a3) = (c(-1.0, 0.0), c(0.0, 1.0), c(1.0, 0.0));
        assert!(point_in_arc_sweep(&c(0.0, 0.5), &a1, &a2, &a3));
        assert!(!point_in_arc_sweep(&c(0.0, -0.5), &a1, &a2, &a3));
    }

    #[test]
    fn bounds_include_the_bulge() {
        // The half circle tops out at y = 1 even though no control point
        // has to sit there.
        let (xmin, ymin, xmax, ymax) =
            arc_bounding_rect(&c(-1.0, 0.0), &c(0.0, 1.0), &c(1.0, 0.0));
        assert_relative_eq!(xmin, -1.0, epsilon = 1e-12);
        assert_relative_eq!(ymin, 0.0, epsilon = 1e-12);
        assert_relative_eq!(xmax, 1.0, epsilon = 1e-12);
        assert_relative_eq!(ymax, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn closed_arc_bounds_are_the_circle() {
        let (xmin, ymin, xmax, ymax) =
            arc_bounding_rect(&c(0.0, 1.0), &c(0.0, -1.0), &c(0.0, 1.0));
        assert_relative_eq!(xmin, -1.0, epsilon = 1e-12);
        assert_relative_eq!(ymin, -1.0, epsilon = 1e-12);
        assert_relative_eq!(xmax, 1.0, epsilon = 1e-12);
        assert_relative_eq!(ymax, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn arc_lengths() {
        // Half circle of radius 1.
        assert_relative_eq!(
            arc_length(&c(-1.0, 0.0), &c(0.0, 1.0), &c(1.0, 0.0)),
            std::f64::consts::PI,
            epsilon = 1e-12
        );
        // Quarter circle of radius 2, both traversal directions.
        let q = arc_length(&c(2.0, 0.0), &c(2.0f64.sqrt(), 2.0f64.sqrt()), &c(0.0, 2.0));
        assert_relative_eq!(q, std::f64::consts::PI, epsilon = 1e-9);
        // Collinear fallback.
        assert_relative_eq!(
            arc_length(&c(0.0, 0.0), &c(1.0, 0.0), &c(2.0, 0.0)),
            2.0,
            epsilon = 1e-12
        );
    }
}
