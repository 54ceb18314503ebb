use crate::algorithm::winding_order::twice_signed_ring_area;
use planar_types::{Geometry, GeometryData, GeometryType};

/// Planar area of a geometry.
///
/// A polygon's area is the area of its exterior ring minus the area of each
/// hole, independent of ring orientation. Puntal and lineal geometries have
/// zero area, and so do curvilinear surfaces: measuring under circular arcs
/// would require linearization, which this crate does not do.
///
/// # Examples
///
/// ```
/// use planar::{Area, Geometry, Dims, Srid, Coord, PointArray};
///
/// let ring = PointArray::from_coords(Dims::XY, &[
///     Coord::xy(0., 0.),
///     Coord::xy(5., 0.),
///     Coord::xy(5., 6.),
///     Coord::xy(0., 6.),
///     Coord::xy(0., 0.),
/// ]);
/// let polygon = Geometry::polygon(Srid::UNKNOWN, Dims::XY, vec![ring]).unwrap();
/// assert_eq!(polygon.area(), 30.);
/// ```
pub trait Area {
    fn area(&self) -> f64;
}

impl Area for Geometry {
    fn area(&self) -> f64 {
        match self.data() {
            GeometryData::Polygon(rings) => {
                let mut rings = rings.iter();
                let exterior = match rings.next() {
                    Some(r) => twice_signed_ring_area(r).abs() / 2.0,
                    None => return 0.0,
                };
                rings.fold(exterior, |total, hole| {
                    total - twice_signed_ring_area(hole).abs() / 2.0
                })
            }
            GeometryData::Triangle(ring) => twice_signed_ring_area(ring).abs() / 2.0,
            GeometryData::Collection(geoms) => {
                if self.geom_type() == GeometryType::CurvePolygon {
                    log::debug!("curve polygon area needs linearization, reporting zero");
                    0.0
                } else {
                    geoms.iter().map(Geometry::area).sum()
                }
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::{Coord, Dims, GeometryType, PointArray, Srid};

    fn pa_xy(points: &[(f64, f64)]) -> PointArray {
        let coords: Vec<Coord> = points.iter().map(|&(x, y)| Coord::xy(x, y)).collect();
        PointArray::from_coords(Dims::XY, &coords)
    }

    #[test]
    fn hole_subtracts() {
        let exterior = pa_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
        let hole = pa_xy(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0), (1.0, 1.0)]);
        let poly = Geometry::polygon(Srid::UNKNOWN, Dims::XY, vec![exterior, hole]).unwrap();
        assert_eq!(poly.area(), 15.0);
    }

    #[test]
    fn orientation_does_not_matter() {
        let cw = pa_xy(&[(0.0, 0.0), (0.0, 3.0), (3.0, 3.0), (3.0, 0.0), (0.0, 0.0)]);
        let poly = Geometry::polygon(Srid::UNKNOWN, Dims::XY, vec![cw]).unwrap();
        assert_eq!(poly.area(), 9.0);
    }

    #[test]
    fn lineal_and_puntal_are_zero() {
        let line = Geometry::line_string(Srid::UNKNOWN, pa_xy(&[(0.0, 0.0), (9.0, 9.0)])).unwrap();
        assert_eq!(line.area(), 0.0);
        let point = Geometry::point(Srid::UNKNOWN, Dims::XY, Coord::xy(1.0, 1.0));
        assert_eq!(point.area(), 0.0);
    }

    #[test]
    fn collections_sum() {
        let square = |offset: f64| {
            Geometry::polygon(
                Srid::UNKNOWN,
                Dims::XY,
                vec![pa_xy(&[
                    (offset, 0.0),
                    (offset + 1.0, 0.0),
                    (offset + 1.0, 1.0),
                    (offset, 1.0),
                    (offset, 0.0),
                ])],
            )
            .unwrap()
        };
        let mut mp = Geometry::new(GeometryType::MultiPolygon, Srid::UNKNOWN, Dims::XY);
        mp.add_geom(square(0.0)).unwrap();
        mp.add_geom(square(5.0)).unwrap();
        assert_eq!(mp.area(), 2.0);
    }
}
