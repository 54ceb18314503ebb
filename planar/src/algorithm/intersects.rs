use crate::index::RectTree;
use planar_types::{Error, Geometry};

/// Whether two geometries share at least one point.
///
/// The test is symmetric. Both geometries are indexed, the trees are
/// descended in step with disjoint-rectangle pruning, and primitive edge
/// pairs are resolved by the exact kernels. An area that swallows the
/// other geometry whole is caught by a containment test before the
/// descent, so no edge crossing is required.
///
/// # Examples
///
/// ```
/// use planar::{Intersects, Geometry, Dims, Srid, Coord, PointArray};
///
/// let a = Geometry::line_string(Srid::UNKNOWN, PointArray::from_coords(
///     Dims::XY,
///     &[Coord::xy(0., 0.), Coord::xy(2., 2.)],
/// )).unwrap();
/// let b = Geometry::line_string(Srid::UNKNOWN, PointArray::from_coords(
///     Dims::XY,
///     &[Coord::xy(0., 2.), Coord::xy(2., 0.)],
/// )).unwrap();
/// assert!(a.intersects(&b).unwrap());
/// ```
pub trait Intersects<Rhs = Self> {
    fn intersects(&self, rhs: &Rhs) -> Result<bool, Error>;
}

impl Intersects for Geometry {
    fn intersects(&self, rhs: &Geometry) -> Result<bool, Error> {
        let (Some(ta), Some(tb)) = (RectTree::build(self)?, RectTree::build(rhs)?) else {
            // Empty geometries intersect nothing.
            return Ok(false);
        };
        Ok(ta.intersects(&tb))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::{Coord, Dims, PointArray, Srid};

    fn pa_xy(points: &[(f64, f64)]) -> PointArray {
        let coords: Vec<Coord> = points.iter().map(|&(x, y)| Coord::xy(x, y)).collect();
        PointArray::from_coords(Dims::XY, &coords)
    }

    fn poly(points: &[(f64, f64)]) -> Geometry {
        Geometry::polygon(Srid::UNKNOWN, Dims::XY, vec![pa_xy(points)]).unwrap()
    }

    #[test]
    fn disjoint_boxes_short_circuit() {
        let a = poly(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let b = poly(&[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0), (5.0, 5.0)]);
        assert!(!a.intersects(&b).unwrap());
    }

    #[test]
    fn full_containment_without_edge_crossing() {
        let outer = poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let inner = poly(&[(4.0, 4.0), (5.0, 4.0), (5.0, 5.0), (4.0, 5.0), (4.0, 4.0)]);
        assert!(outer.intersects(&inner).unwrap());
        assert!(inner.intersects(&outer).unwrap());
    }

    #[test]
    fn point_vs_polygon() {
        let outer = poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let inside = Geometry::point(Srid::UNKNOWN, Dims::XY, Coord::xy(5.0, 5.0));
        let outside = Geometry::point(Srid::UNKNOWN, Dims::XY, Coord::xy(15.0, 5.0));
        assert!(outer.intersects(&inside).unwrap());
        assert!(!outer.intersects(&outside).unwrap());
    }

    #[test]
    fn empty_inputs_never_intersect() {
        let empty = Geometry::new(planar_types::GeometryType::Polygon, Srid::UNKNOWN, Dims::XY);
        let a = poly(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert!(!empty.intersects(&a).unwrap());
        assert!(!a.intersects(&empty).unwrap());
    }
}
