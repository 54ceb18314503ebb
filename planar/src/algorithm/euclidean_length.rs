use crate::algorithm::kernels::arc::arc_length;
use planar_types::{Geometry, GeometryData, PointArray};

/// Length of the linear parts of a geometry.
///
/// Straight runs sum the Euclidean distances between consecutive points;
/// circular strings are measured along their arcs. Puntal and areal
/// geometries have zero length (an areal boundary is measured by
/// [`Perimeter`]).
pub trait EuclideanLength {
    fn euclidean_length(&self) -> f64;
}

/// Boundary length of the areal parts of a geometry: the exterior ring
/// plus every hole.
pub trait Perimeter {
    fn perimeter(&self) -> f64;
}

pub(crate) fn point_array_length(pa: &PointArray) -> f64 {
    let n = pa.npoints();
    let mut sum = 0.0;
    for i in 1..n {
        let (x0, y0) = pa.xy(i - 1);
        let (x1, y1) = pa.xy(i);
        sum += (x1 - x0).hypot(y1 - y0);
    }
    sum
}

pub(crate) fn circular_string_length(pa: &PointArray) -> f64 {
    let n = pa.npoints();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut i = 0;
    while i + 2 < n {
        let a1 = pa.coord(i);
        let a2 = pa.coord(i + 1);
        let a3 = pa.coord(i + 2);
        sum += arc_length(&a1, &a2, &a3);
        i += 2;
    }
    sum
}

impl EuclideanLength for Geometry {
    fn euclidean_length(&self) -> f64 {
        match self.data() {
            GeometryData::LineString(pa) => point_array_length(pa),
            GeometryData::CircularString(pa) => circular_string_length(pa),
            GeometryData::Collection(geoms) => {
                geoms.iter().map(Geometry::euclidean_length).sum()
            }
            _ => 0.0,
        }
    }
}

impl Perimeter for Geometry {
    fn perimeter(&self) -> f64 {
        match self.data() {
            GeometryData::Polygon(rings) => rings.iter().map(point_array_length).sum(),
            GeometryData::Triangle(ring) => point_array_length(ring),
            GeometryData::Collection(geoms) => {
                if self.geom_type() == planar_types::GeometryType::CurvePolygon {
                    // Rings of a curve polygon are themselves curves.
                    geoms.iter().map(Geometry::euclidean_length).sum()
                } else {
                    geoms.iter().map(Geometry::perimeter).sum()
                }
            }
            _ => 0.0,
        }
    }
}
