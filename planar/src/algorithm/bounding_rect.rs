use crate::algorithm::kernels::arc::{arc_bounding_rect, arc_center};
use planar_types::{BoundingBox, Geometry, GeometryData, PointArray};

/// Calculation of the minimum axis-aligned bounding box of a geometry.
///
/// Straight edges are bounded by their vertices; circular edges get the
/// tight box of their arc, which can bulge past every control point. Z and
/// M ranges always come from the vertices. Empty geometries have no box.
///
/// Geodetic geometries are not handled here: their box is a geocentric cap
/// computed by the geodetic subsystem, and this trait answers `None` for
/// them.
pub trait BoundingRect {
    fn bounding_rect(&self) -> Option<BoundingBox>;
}

impl BoundingRect for Geometry {
    fn bounding_rect(&self) -> Option<BoundingBox> {
        if self.is_geodetic() {
            return None;
        }
        match self.data() {
            GeometryData::Point(pa)
            | GeometryData::LineString(pa)
            | GeometryData::Triangle(pa) => pa.bounding_box(),
            GeometryData::CircularString(pa) => circular_string_rect(pa),
            GeometryData::Polygon(rings) => {
                let mut out: Option<BoundingBox> = None;
                for ring in rings {
                    merge_into(&mut out, ring.bounding_box());
                }
                out
            }
            GeometryData::Collection(geoms) => {
                let mut out: Option<BoundingBox> = None;
                for g in geoms {
                    merge_into(&mut out, g.bounding_rect());
                }
                out
            }
        }
    }
}

fn merge_into(acc: &mut Option<BoundingBox>, next: Option<BoundingBox>) {
    match (acc.as_mut(), next) {
        (Some(a), Some(b)) => {
            // Dimensionality agreement is a model invariant, enforced at
            // construction time.
            let _ = a.merge(&b);
        }
        (None, Some(b)) => *acc = Some(b),
        _ => {}
    }
}

fn circular_string_rect(pa: &PointArray) -> Option<BoundingBox> {
    // Control points give the right Z/M ranges and include every endpoint.
    let mut out = pa.bounding_box()?;
    let n = pa.npoints();
    let mut i = 0;
    while i + 2 < n {
        let a1 = pa.coord(i);
        let a2 = pa.coord(i + 1);
        let a3 = pa.coord(i + 2);
        if arc_center(&a1, &a2, &a3).is_some() {
            let (xmin, ymin, xmax, ymax) = arc_bounding_rect(&a1, &a2, &a3);
            out.xmin = out.xmin.min(xmin);
            out.ymin = out.ymin.min(ymin);
            out.xmax = out.xmax.max(xmax);
            out.ymax = out.ymax.max(ymax);
        }
        i += 2;
    }
    Some(out)
}
