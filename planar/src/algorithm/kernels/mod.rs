//! Low-level predicates over points, segments and arcs.
//!
//! These are the leaf-level oracles of the rectangle-tree index and the
//! building blocks of the distance routines. Everything here is strictly
//! planar: only `x` and `y` participate.

pub mod arc;

use planar_types::Coord;
use robust::{orient2d, Coord as RobustCoord};

/// Which side of the directed segment `p1 -> p2` the point `q` falls on:
/// `-1` left, `1` right, `0` collinear.
///
/// Evaluated with an adaptive-precision determinant so the zero case is
/// exact even when `q` is nearly on the segment.
pub fn segment_side(p1: &Coord, p2: &Coord, q: &Coord) -> i32 {
    let det = orient2d(
        RobustCoord { x: p1.x, y: p1.y },
        RobustCoord { x: p2.x, y: p2.y },
        RobustCoord { x: q.x, y: q.y },
    );
    if det > 0.0 {
        -1
    } else if det < 0.0 {
        1
    } else {
        0
    }
}

/// Whether `p` falls inside the coordinate bounds of segment `a1 -> a2`.
///
/// The test is half-open at `a2` on each axis so that a ring vertex is
/// attributed to exactly one of its two incident edges during boundary
/// detection.
pub fn point_in_segment_bounds(p: &Coord, a1: &Coord, a2: &Coord) -> bool {
    ((a1.x <= p.x && p.x < a2.x) || (a2.x <= p.x && p.x < a1.x))
        || ((a1.y <= p.y && p.y < a2.y) || (a2.y <= p.y && p.y < a1.y))
}

/// Whether segments `p1 -> p2` and `q1 -> q2` share at least one point,
/// endpoints included.
pub fn segments_intersect(p1: &Coord, p2: &Coord, q1: &Coord, q2: &Coord) -> bool {
    let pq1 = segment_side(p1, p2, q1);
    let pq2 = segment_side(p1, p2, q2);
    let qp1 = segment_side(q1, q2, p1);
    let qp2 = segment_side(q1, q2, p2);

    // Both endpoints of one segment strictly on the same side of the other.
    if (pq1 > 0 && pq2 > 0)
        || (pq1 < 0 && pq2 < 0)
        || (qp1 > 0 && qp2 > 0)
        || (qp1 < 0 && qp2 < 0)
    {
        return false;
    }

    if pq1 == 0 && pq2 == 0 && qp1 == 0 && qp2 == 0 {
        // Collinear: they intersect only if the 1-D extents overlap.
        return in_bounds_inclusive(q1, p1, p2)
            || in_bounds_inclusive(q2, p1, p2)
            || in_bounds_inclusive(p1, q1, q2)
            || in_bounds_inclusive(p2, q1, q2);
    }

    true
}

fn in_bounds_inclusive(p: &Coord, a: &Coord, b: &Coord) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}
