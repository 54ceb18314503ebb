//! In-place coordinate transformations of the geometry model.

use crate::{Coord, Error, Geometry, Ordinate};

impl Geometry {
    /// Deep structural copy with no storage shared with `self` or any
    /// deserialization buffer.
    pub fn clone_deep(&self) -> Geometry {
        let mut copy = self.clone();
        copy.for_each_point_array_mut(&mut |pa| pa.make_owned());
        copy
    }

    /// Swap two named ordinate axes over every coordinate.
    ///
    /// Both axes must be present in the geometry's dimensionality. Point
    /// arrays borrowed from a deserialization buffer are upgraded to owned
    /// storage before the swap; a cached bounding box has its matching
    /// ranges swapped in place.
    pub fn swap_ordinates(&mut self, a: Ordinate, b: Ordinate) -> Result<(), Error> {
        for ordinate in [a, b] {
            let present = match ordinate {
                Ordinate::X | Ordinate::Y => true,
                Ordinate::Z => self.has_z(),
                Ordinate::M => self.has_m(),
            };
            if !present {
                return Err(Error::InvalidGeometry(
                    "cannot swap an ordinate the geometry does not carry",
                ));
            }
        }
        if a != b {
            self.swap_ordinates_unchecked(a, b);
        }
        Ok(())
    }

    fn swap_ordinates_unchecked(&mut self, a: Ordinate, b: Ordinate) {
        self.for_each_point_array_mut(&mut |pa| pa.swap_ordinates(a, b));
        self.for_each_bbox_mut(&mut |bbox| bbox.swap_ordinates(a, b));
    }

    /// Multiply every coordinate componentwise by `factor`.
    ///
    /// A cached bounding box is scaled alongside, re-establishing min/max
    /// ordering where a factor is negative.
    pub fn scale(&mut self, factor: Coord) {
        self.for_each_point_array_mut(&mut |pa| pa.scale(factor));
        self.for_each_bbox_mut(&mut |bbox| bbox.scale(factor));
    }

    /// Reverse the point order of every point array (rings included).
    pub fn reverse(&mut self) {
        self.for_each_point_array_mut(&mut |pa| pa.reverse());
    }

    fn for_each_bbox_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut crate::BoundingBox),
    {
        if let Some(bbox) = &mut self.bbox {
            f(bbox);
        }
        if let crate::GeometryData::Collection(geoms) = &mut self.data {
            for g in geoms {
                g.for_each_bbox_mut(f);
            }
        }
    }
}
