use crate::index::RectTree;
use planar_types::{Coord, Error, Geometry};

/// Point-in-geometry containment, boundary inclusive.
///
/// Only areal geometries (polygons, curve polygons, triangles and their
/// collections) can contain a point. The test builds a rectangle tree over
/// the geometry and counts horizontal-ray crossings per ring, exterior
/// rings adding containment and holes subtracting it; a point exactly on
/// the boundary is contained.
///
/// For repeated tests against one geometry build a [`RectTree`] once and
/// call [`RectTree::contains_point`] directly.
pub trait ContainsPoint {
    fn contains_point(&self, pt: Coord) -> Result<bool, Error>;
}

impl ContainsPoint for Geometry {
    fn contains_point(&self, pt: Coord) -> Result<bool, Error> {
        match RectTree::build(self)? {
            Some(tree) => Ok(tree.contains_point(pt)),
            None => Ok(false),
        }
    }
}
