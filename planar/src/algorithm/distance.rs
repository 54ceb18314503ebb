//! Pairwise distance between planar primitives and geometries.
//!
//! The primitive routines all funnel through a [`DistState`], which tracks
//! the best pair of points seen so far, the search mode, and whether the
//! two arguments have been swapped along the way (`twisted`) so the
//! reported pair keeps the caller's argument order. Geometry-level distance
//! goes through the rectangle-tree index.

use crate::algorithm::kernels::arc::{arc_center, arc_is_point, point_in_arc_sweep};
use crate::index::RectTree;
use planar_types::{Coord, Error, Geometry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceMode {
    Min,
    Max,
}

/// Running state of a distance computation.
#[derive(Clone, Debug)]
pub struct DistState {
    mode: DistanceMode,
    pub distance: f64,
    pub p1: Coord,
    pub p2: Coord,
    twisted: i32,
}

impl DistState {
    pub fn new(mode: DistanceMode) -> Self {
        let distance = match mode {
            DistanceMode::Min => f64::MAX,
            DistanceMode::Max => -1.0,
        };
        DistState {
            mode,
            distance,
            p1: Coord::default(),
            p2: Coord::default(),
            twisted: 1,
        }
    }

    fn is_max(&self) -> bool {
        self.mode == DistanceMode::Max
    }

    /// Record `d` if it beats the current extremum, keeping the point pair
    /// in the original argument order.
    fn update(&mut self, d: f64, a: &Coord, b: &Coord) {
        let better = match self.mode {
            DistanceMode::Min => d < self.distance,
            DistanceMode::Max => d > self.distance,
        };
        if better {
            self.distance = d;
            if self.twisted > 0 {
                self.p1 = *a;
                self.p2 = *b;
            } else {
                self.p1 = *b;
                self.p2 = *a;
            }
        }
    }
}

/// Run `f` with the argument order marked as swapped.
pub(crate) fn with_swapped<F: FnOnce(&mut DistState)>(state: &mut DistState, f: F) {
    state.twisted = -state.twisted;
    f(state);
    state.twisted = -state.twisted;
}

pub fn dist_pt_pt(state: &mut DistState, p1: &Coord, p2: &Coord) {
    let d = p1.distance_2d(p2);
    state.update(d, p1, p2);
}

pub fn dist_pt_seg(state: &mut DistState, p: &Coord, a: &Coord, b: &Coord) {
    // Degenerate segment.
    if a.x == b.x && a.y == b.y {
        return dist_pt_pt(state, p, a);
    }

    let r = ((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y))
        / ((b.x - a.x) * (b.x - a.x) + (b.y - a.y) * (b.y - a.y));

    if state.is_max() {
        // The farthest point of a segment from p is always a vertex.
        if r >= 0.5 {
            return dist_pt_pt(state, p, a);
        }
        return dist_pt_pt(state, p, b);
    }

    if r < 0.0 {
        return dist_pt_pt(state, p, a);
    }
    if r >= 1.0 {
        return dist_pt_pt(state, p, b);
    }

    // Exactly on the carrying line within the segment: distance is zero
    // regardless of what the projection arithmetic would round to.
    if (a.y - p.y) * (b.x - a.x) == (a.x - p.x) * (b.y - a.y) {
        state.update(0.0, p, p);
        return;
    }

    let c = Coord::xy(a.x + r * (b.x - a.x), a.y + r * (b.y - a.y));
    dist_pt_pt(state, p, &c);
}

pub fn dist_seg_seg(state: &mut DistState, a: &Coord, b: &Coord, c: &Coord, d: &Coord) {
    if a.x == b.x && a.y == b.y {
        return dist_pt_seg(state, a, c, d);
    }
    if c.x == d.x && c.y == d.y {
        return with_swapped(state, |s| dist_pt_seg(s, c, a, b));
    }

    // Parametric solution for the crossing of the two carrying lines
    // (comp.graphics.algorithms FAQ): r positions the crossing along a->b,
    // s along c->d.
    let r_top = (a.y - c.y) * (d.x - c.x) - (a.x - c.x) * (d.y - c.y);
    let r_bot = (b.x - a.x) * (d.y - c.y) - (b.y - a.y) * (d.x - c.x);
    let s_top = (a.y - c.y) * (b.x - a.x) - (a.x - c.x) * (b.y - a.y);
    let s_bot = (b.x - a.x) * (d.y - c.y) - (b.y - a.y) * (d.x - c.x);

    let endpoint_fallback = |state: &mut DistState| {
        dist_pt_seg(state, a, c, d);
        dist_pt_seg(state, b, c, d);
        with_swapped(state, |s| {
            dist_pt_seg(s, c, a, b);
            dist_pt_seg(s, d, a, b);
        });
    };

    // Parallel or collinear segments.
    if r_bot == 0.0 || s_bot == 0.0 {
        return endpoint_fallback(state);
    }

    let s = s_top / s_bot;
    let r = r_top / r_bot;

    if !(0.0..=1.0).contains(&r) || !(0.0..=1.0).contains(&s) || state.is_max() {
        return endpoint_fallback(state);
    }

    // A true crossing. When an endpoint coincides with an endpoint of the
    // other segment, return the shared vertex exactly instead of the
    // interpolated position.
    let the_p = if (a.x == c.x && a.y == c.y) || (a.x == d.x && a.y == d.y) {
        *a
    } else if (b.x == c.x && b.y == c.y) || (b.x == d.x && b.y == d.y) {
        *b
    } else {
        Coord::xy(a.x + r * (b.x - a.x), a.y + r * (b.y - a.y))
    };
    state.update(0.0, &the_p, &the_p);
}

pub fn dist_pt_arc(state: &mut DistState, p: &Coord, b1: &Coord, b2: &Coord, b3: &Coord) {
    if arc_is_point(b1, b2, b3) {
        return dist_pt_pt(state, p, b1);
    }
    let Some((center, radius)) = arc_center(b1, b2, b3) else {
        // Collinear control points: the arc is the chord.
        return dist_pt_seg(state, p, b1, b3);
    };

    if state.is_max() {
        // Vertex-to-vertex extremum.
        dist_pt_pt(state, p, b1);
        dist_pt_pt(state, p, b2);
        dist_pt_pt(state, p, b3);
        return;
    }

    let d = p.distance_2d(&center);
    if d == 0.0 {
        // Every arc point is equidistant from the center.
        state.update(radius, p, b1);
        return;
    }

    // The circle point on the ray from the center through p.
    let x = Coord::xy(
        center.x + (p.x - center.x) * radius / d,
        center.y + (p.y - center.y) * radius / d,
    );
    if (b1.x == b3.x && b1.y == b3.y) || point_in_arc_sweep(&x, b1, b2, b3) {
        dist_pt_pt(state, p, &x);
    } else {
        dist_pt_pt(state, p, b1);
        dist_pt_pt(state, p, b3);
    }
}

pub fn dist_seg_arc(
    state: &mut DistState,
    a1: &Coord,
    a2: &Coord,
    b1: &Coord,
    b2: &Coord,
    b3: &Coord,
) {
    if arc_is_point(b1, b2, b3) {
        return with_swapped(state, |s| dist_pt_seg(s, b1, a1, a2));
    }
    if a1.x == a2.x && a1.y == a2.y {
        return dist_pt_arc(state, a1, b1, b2, b3);
    }
    let Some((center, radius)) = arc_center(b1, b2, b3) else {
        return dist_seg_seg(state, a1, a2, b1, b3);
    };

    if state.is_max() {
        for p in [a1, a2] {
            for q in [b1, b2, b3] {
                dist_pt_pt(state, p, q);
            }
        }
        return;
    }

    // Crossing test: where does the segment meet the circle?
    let dx = a2.x - a1.x;
    let dy = a2.y - a1.y;
    let fx = a1.x - center.x;
    let fy = a1.y - center.y;
    let qa = dx * dx + dy * dy;
    let qb = 2.0 * (fx * dx + fy * dy);
    let qc = fx * fx + fy * fy - radius * radius;
    let disc = qb * qb - 4.0 * qa * qc;
    if disc >= 0.0 {
        let sq = disc.sqrt();
        for t in [(-qb - sq) / (2.0 * qa), (-qb + sq) / (2.0 * qa)] {
            if (0.0..=1.0).contains(&t) {
                let x = Coord::xy(a1.x + t * dx, a1.y + t * dy);
                if point_in_arc_sweep(&x, b1, b2, b3) {
                    state.update(0.0, &x, &x);
                    return;
                }
            }
        }
    }

    // No crossing: the interior-interior candidate lies on the ray from
    // the center through the segment point nearest to it.
    let mut probe = DistState::new(DistanceMode::Min);
    dist_pt_seg(&mut probe, &center, a1, a2);
    let d = probe.distance;
    if d > 0.0 {
        let on_seg = probe.p2;
        let g = Coord::xy(
            center.x + (on_seg.x - center.x) * radius / d,
            center.y + (on_seg.y - center.y) * radius / d,
        );
        if point_in_arc_sweep(&g, b1, b2, b3) {
            state.update(on_seg.distance_2d(&g), &on_seg, &g);
        }
    }

    // Endpoint candidates on both sides.
    dist_pt_arc(state, a1, b1, b2, b3);
    dist_pt_arc(state, a2, b1, b2, b3);
    with_swapped(state, |s| {
        dist_pt_seg(s, b1, a1, a2);
        dist_pt_seg(s, b3, a1, a2);
    });
}

pub fn dist_arc_arc(
    state: &mut DistState,
    a1: &Coord,
    a2: &Coord,
    a3: &Coord,
    b1: &Coord,
    b2: &Coord,
    b3: &Coord,
) {
    if arc_is_point(a1, a2, a3) {
        return dist_pt_arc(state, a1, b1, b2, b3);
    }
    if arc_is_point(b1, b2, b3) {
        return with_swapped(state, |s| dist_pt_arc(s, b1, a1, a2, a3));
    }
    let center_a = arc_center(a1, a2, a3);
    let center_b = arc_center(b1, b2, b3);
    match (center_a, center_b) {
        (None, None) => return dist_seg_seg(state, a1, a3, b1, b3),
        (None, Some(_)) => return dist_seg_arc(state, a1, a3, b1, b2, b3),
        (Some(_), None) => {
            return with_swapped(state, |s| dist_seg_arc(s, b1, b3, a1, a2, a3));
        }
        (Some(_), Some(_)) => {}
    }
    let (c1, r1) = center_a.unwrap();
    let (c2, r2) = center_b.unwrap();

    if state.is_max() {
        for p in [a1, a2, a3] {
            for q in [b1, b2, b3] {
                dist_pt_pt(state, p, q);
            }
        }
        return;
    }

    let d = c1.distance_2d(&c2);

    // Touching or crossing circles: test the (up to two) circle crossing
    // points against both sweeps.
    if d > 0.0 && (r1 - r2).abs() <= d && d <= r1 + r2 {
        let along = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
        let h = (r1 * r1 - along * along).max(0.0).sqrt();
        let mx = c1.x + along * (c2.x - c1.x) / d;
        let my = c1.y + along * (c2.y - c1.y) / d;
        for sign in [1.0, -1.0] {
            let x = Coord::xy(
                mx + sign * h * (c2.y - c1.y) / d,
                my - sign * h * (c2.x - c1.x) / d,
            );
            if point_in_arc_sweep(&x, a1, a2, a3) && point_in_arc_sweep(&x, b1, b2, b3) {
                state.update(0.0, &x, &x);
                return;
            }
        }
    }

    if d > 0.0 {
        // Interior-interior candidates along the line of centers.
        let ux = (c2.x - c1.x) / d;
        let uy = (c2.y - c1.y) / d;
        let on_a = [
            Coord::xy(c1.x + ux * r1, c1.y + uy * r1),
            Coord::xy(c1.x - ux * r1, c1.y - uy * r1),
        ];
        let on_b = [
            Coord::xy(c2.x + ux * r2, c2.y + uy * r2),
            Coord::xy(c2.x - ux * r2, c2.y - uy * r2),
        ];
        for p in on_a.iter().filter(|p| point_in_arc_sweep(p, a1, a2, a3)) {
            for q in on_b.iter().filter(|q| point_in_arc_sweep(q, b1, b2, b3)) {
                state.update(p.distance_2d(q), p, q);
            }
        }
    } else {
        // Concentric circles: any shared radial direction realizes the
        // |r1 - r2| gap. The angular overlap, if any, contains the radial
        // of one of the defining points.
        for e in [a1, a2, a3] {
            let de = e.distance_2d(&c1);
            if de > 0.0 {
                let q = Coord::xy(c1.x + (e.x - c1.x) * r2 / de, c1.y + (e.y - c1.y) * r2 / de);
                if point_in_arc_sweep(&q, b1, b2, b3) {
                    state.update(e.distance_2d(&q), e, &q);
                }
            }
        }
        for e in [b1, b2, b3] {
            let de = e.distance_2d(&c1);
            if de > 0.0 {
                let q = Coord::xy(c1.x + (e.x - c1.x) * r1 / de, c1.y + (e.y - c1.y) * r1 / de);
                if point_in_arc_sweep(&q, a1, a2, a3) {
                    with_swapped(state, |s| s.update(e.distance_2d(&q), e, &q));
                }
            }
        }
    }

    // Arc endpoints against the other arc.
    dist_pt_arc(state, a1, b1, b2, b3);
    dist_pt_arc(state, a3, b1, b2, b3);
    with_swapped(state, |s| {
        dist_pt_arc(s, b1, a1, a2, a3);
        dist_pt_arc(s, b3, a1, a2, a3);
    });
}

/// Minimum distance between two geometries via the rectangle-tree index.
///
/// `threshold` lets the search stop early once any pair closer than the
/// threshold has been found (zero searches to the true minimum). Distance
/// to or from an empty geometry is infinite.
pub fn min_distance(a: &Geometry, b: &Geometry, threshold: f64) -> Result<f64, Error> {
    let (Some(mut ta), Some(mut tb)) = (RectTree::build(a)?, RectTree::build(b)?) else {
        return Ok(f64::INFINITY);
    };
    ta.min_distance(&mut tb, threshold)
}

/// Maximum distance between two geometries: the vertex-to-vertex extremum.
pub fn max_distance(a: &Geometry, b: &Geometry) -> Result<f64, Error> {
    if a.is_empty() || b.is_empty() {
        return Ok(f64::INFINITY);
    }
    let mut state = DistState::new(DistanceMode::Max);
    let mut va: Vec<Coord> = Vec::new();
    a.for_each_point_array(&mut |pa| va.extend(pa.iter()));
    b.for_each_point_array(&mut |pa| {
        for q in pa.iter() {
            for p in &va {
                dist_pt_pt(&mut state, p, &q);
            }
        }
    });
    Ok(state.distance)
}

/// Minimum Euclidean distance between geometries.
///
/// # Examples
///
/// ```
/// use planar::{EuclideanDistance, Geometry, Dims, Srid, Coord};
///
/// let a = Geometry::point(Srid::UNKNOWN, Dims::XY, Coord::xy(0., 0.));
/// let b = Geometry::point(Srid::UNKNOWN, Dims::XY, Coord::xy(3., 4.));
/// assert_eq!(a.euclidean_distance(&b).unwrap(), 5.);
/// ```
pub trait EuclideanDistance<Rhs = Self> {
    fn euclidean_distance(&self, rhs: &Rhs) -> Result<f64, Error>;
}

impl EuclideanDistance for Geometry {
    fn euclidean_distance(&self, rhs: &Geometry) -> Result<f64, Error> {
        min_distance(self, rhs, 0.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coord {
        Coord::xy(x, y)
    }

    fn min_state() -> DistState {
        DistState::new(DistanceMode::Min)
    }

    #[test]
    fn pt_seg_projection() {
        let mut st = min_state();
        dist_pt_seg(&mut st, &c(1.0, 1.0), &c(0.0, 0.0), &c(2.0, 0.0));
        assert_eq!(st.distance, 1.0);
        assert_eq!(st.p1, c(1.0, 1.0));
        assert_eq!(st.p2, c(1.0, 0.0));
    }

    #[test]
    fn pt_seg_beyond_the_ends() {
        let mut st = min_state();
        dist_pt_seg(&mut st, &c(-3.0, 4.0), &c(0.0, 0.0), &c(2.0, 0.0));
        assert_eq!(st.distance, 5.0);
        assert_eq!(st.p2, c(0.0, 0.0));
    }

    #[test]
    fn pt_on_segment_is_zero() {
        let mut st = min_state();
        dist_pt_seg(&mut st, &c(1.0, 0.0), &c(0.0, 0.0), &c(2.0, 0.0));
        assert_eq!(st.distance, 0.0);
    }

    #[test]
    fn crossing_segments_distance_zero_at_crossing() {
        let mut st = min_state();
        dist_seg_seg(&mut st, &c(0.0, -1.0), &c(0.0, 1.0), &c(-1.0, 0.0), &c(1.0, 0.0));
        assert_eq!(st.distance, 0.0);
        assert_eq!(st.p1, c(0.0, 0.0));
        assert_eq!(st.p2, c(0.0, 0.0));
    }

    #[test]
    fn shared_endpoint_is_returned_exactly() {
        let shared = c(1.0, 1.0);
        let mut st = min_state();
        dist_seg_seg(&mut st, &c(0.0, 0.0), &shared, &shared, &c(2.0, 0.0));
        assert_eq!(st.distance, 0.0);
        assert!(st.p1.same(&shared));
    }

    #[test]
    fn parallel_segments() {
        let mut st = min_state();
        dist_seg_seg(&mut st, &c(0.0, 0.0), &c(2.0, 0.0), &c(0.0, 3.0), &c(2.0, 3.0));
        assert_eq!(st.distance, 3.0);
    }

    #[test]
    fn twisted_keeps_argument_order() {
        // Degenerate second segment forces an internal argument swap; the
        // reported pair must still be (first geometry, second geometry).
        let mut st = min_state();
        dist_seg_seg(&mut st, &c(0.0, 0.0), &c(2.0, 0.0), &c(1.0, 2.0), &c(1.0, 2.0));
        assert_eq!(st.distance, 2.0);
        assert_eq!(st.p1, c(1.0, 0.0));
        assert_eq!(st.p2, c(1.0, 2.0));
    }

    #[test]
    fn pt_arc_inside_and_outside() {
        // Upper unit half circle.
        let (b1, b2, b3) = (c(-1.0, 0.0), c(0.0, 1.0), c(1.0, 0.0));
        let mut st = min_state();
        dist_pt_arc(&mut st, &c(0.0, 2.0), &b1, &b2, &b3);
        assert_relative_eq!(st.distance, 1.0, epsilon = 1e-12);

        // Below the sweep: the closest approach is an arc endpoint.
        let mut st = min_state();
        dist_pt_arc(&mut st, &c(0.0, -1.0), &b1, &b2, &b3);
        assert_relative_eq!(st.distance, 2.0f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn seg_arc_crossing_is_zero() {
        let (b1, b2, b3) = (c(-1.0, 0.0), c(0.0, 1.0), c(1.0, 0.0));
        let mut st = min_state();
        dist_seg_arc(&mut st, &c(0.0, 0.0), &c(0.0, 5.0), &b1, &b2, &b3);
        assert_eq!(st.distance, 0.0);
    }

    #[test]
    fn seg_arc_interior_gap() {
        // Horizontal segment above the half circle.
        let (b1, b2, b3) = (c(-1.0, 0.0), c(0.0, 1.0), c(1.0, 0.0));
        let mut st = min_state();
        dist_seg_arc(&mut st, &c(-5.0, 3.0), &c(5.0, 3.0), &b1, &b2, &b3);
        assert_relative_eq!(st.distance, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn arc_arc_disjoint() {
        // Unit half circles bulging toward each other: the top of the first
        // is (0, 1), the bottom of the second is (0, 4).
        let mut st = min_state();
        dist_arc_arc(
            &mut st,
            &c(-1.0, 0.0),
            &c(0.0, 1.0),
            &c(1.0, 0.0),
            &c(-1.0, 5.0),
            &c(0.0, 4.0),
            &c(1.0, 5.0),
        );
        assert_relative_eq!(st.distance, 3.0, epsilon = 1e-12);
        assert_eq!(st.p1, c(0.0, 1.0));
        assert_eq!(st.p2, c(0.0, 4.0));
    }

    #[test]
    fn arc_arc_crossing() {
        let mut st = min_state();
        dist_arc_arc(
            &mut st,
            &c(-1.0, 0.0),
            &c(0.0, 1.0),
            &c(1.0, 0.0),
            &c(-1.0, 1.0),
            &c(0.0, 0.0),
            &c(1.0, 1.0),
        );
        assert_eq!(st.distance, 0.0);
    }

    #[test]
    fn max_mode_uses_vertices() {
        let mut st = DistState::new(DistanceMode::Max);
        dist_pt_seg(&mut st, &c(0.0, 0.0), &c(1.0, 0.0), &c(5.0, 0.0));
        assert_eq!(st.distance, 5.0);
        dist_pt_seg(&mut st, &c(0.0, 0.0), &c(1.0, 0.0), &c(3.0, 0.0));
        assert_eq!(st.distance, 5.0);
    }
}
