//! Ring orientation: detection and normalization.

use planar_types::{Geometry, GeometryData, PointArray};

/// Twice the signed Shoelace area of a closed ring:
/// `Σ (x[i+1] − x[i]) · (y[i+1] + y[i])`. Positive sums are clockwise.
pub(crate) fn twice_signed_ring_area(ring: &PointArray) -> f64 {
    let n = ring.npoints();
    let mut sum = 0.0;
    for i in 1..n {
        let (x0, y0) = ring.xy(i - 1);
        let (x1, y1) = ring.xy(i);
        sum += (x1 - x0) * (y1 + y0);
    }
    sum
}

/// Normalize ring orientation: exterior rings clockwise, holes
/// counter-clockwise.
///
/// A ring whose signed area is exactly zero is treated as already oriented.
/// The operation recurses through collections and is idempotent.
///
/// # Examples
///
/// ```
/// use planar::{ForceClockwise, Geometry, Dims, Srid, Coord, PointArray};
///
/// let ccw = PointArray::from_coords(Dims::XY, &[
///     Coord::xy(0., 0.),
///     Coord::xy(2., 0.),
///     Coord::xy(2., 2.),
///     Coord::xy(0., 2.),
///     Coord::xy(0., 0.),
/// ]);
/// let mut poly = Geometry::polygon(Srid::UNKNOWN, Dims::XY, vec![ccw]).unwrap();
/// assert!(!poly.is_clockwise());
/// poly.force_clockwise();
/// assert!(poly.is_clockwise());
/// ```
pub trait ForceClockwise {
    /// Whether every ring already follows the convention.
    fn is_clockwise(&self) -> bool;

    /// Reverse rings in place where needed.
    fn force_clockwise(&mut self);
}

impl ForceClockwise for Geometry {
    fn is_clockwise(&self) -> bool {
        match self.data() {
            GeometryData::Polygon(rings) => rings.iter().enumerate().all(|(i, ring)| {
                let area = twice_signed_ring_area(ring);
                if i == 0 {
                    area >= 0.0
                } else {
                    area <= 0.0
                }
            }),
            GeometryData::Triangle(ring) => twice_signed_ring_area(ring) >= 0.0,
            GeometryData::Collection(geoms) => geoms.iter().all(Geometry::is_clockwise),
            _ => true,
        }
    }

    fn force_clockwise(&mut self) {
        if let Some(rings) = self.rings_mut() {
            for (i, ring) in rings.iter_mut().enumerate() {
                let area = twice_signed_ring_area(ring);
                let reverse_needed = if i == 0 { area < 0.0 } else { area > 0.0 };
                if reverse_needed {
                    ring.reverse();
                }
            }
        } else if let Some(geoms) = self.geoms_mut() {
            for g in geoms {
                g.force_clockwise();
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::{Coord, Dims, Srid};

    fn pa_xy(points: &[(f64, f64)]) -> PointArray {
        let coords: Vec<Coord> = points.iter().map(|&(x, y)| Coord::xy(x, y)).collect();
        PointArray::from_coords(Dims::XY, &coords)
    }

    fn square_cw() -> PointArray {
        pa_xy(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)])
    }

    fn square_ccw() -> PointArray {
        pa_xy(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)])
    }

    #[test]
    fn shoelace_sign_convention() {
        assert!(twice_signed_ring_area(&square_cw()) > 0.0);
        assert!(twice_signed_ring_area(&square_ccw()) < 0.0);
    }

    #[test]
    fn polygon_with_hole_is_normalized() {
        let hole_cw = pa_xy(&[(0.5, 0.5), (0.5, 1.0), (1.0, 1.0), (1.0, 0.5), (0.5, 0.5)]);
        let mut poly =
            Geometry::polygon(Srid::UNKNOWN, Dims::XY, vec![square_ccw(), hole_cw]).unwrap();
        assert!(!poly.is_clockwise());
        poly.force_clockwise();
        assert!(poly.is_clockwise());
        let rings = poly.rings().unwrap();
        assert!(twice_signed_ring_area(&rings[0]) > 0.0);
        assert!(twice_signed_ring_area(&rings[1]) < 0.0);
    }

    #[test]
    fn idempotent() {
        let mut poly = Geometry::polygon(Srid::UNKNOWN, Dims::XY, vec![square_ccw()]).unwrap();
        poly.force_clockwise();
        let once = poly.clone_deep();
        poly.force_clockwise();
        assert!(poly.same(&once));
    }

    #[test]
    fn recurses_into_collections() {
        let mut mp = Geometry::new(planar_types::GeometryType::MultiPolygon, Srid::UNKNOWN, Dims::XY);
        mp.add_geom(Geometry::polygon(Srid::UNKNOWN, Dims::XY, vec![square_ccw()]).unwrap())
            .unwrap();
        assert!(!mp.is_clockwise());
        mp.force_clockwise();
        assert!(mp.is_clockwise());
    }
}
