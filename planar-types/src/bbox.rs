use crate::float::{next_float_down, next_float_up};
use crate::{Coord, Dims, Error, Ordinate};

/// An axis-aligned bounding box with the same dimensionality as the geometry
/// it was derived from.
///
/// For geodetic geometries the box is a geocentric XYZ cap: the Z range is a
/// unit-sphere coordinate, not an elevation, and the M range is unused
/// regardless of the geometry's dimensionality.
///
/// A box embedded in a serialization has been widened with
/// [`BoundingBox::widen`] so that the single-precision ranges still contain
/// every double-precision coordinate they were computed from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub zmin: f64,
    pub zmax: f64,
    pub mmin: f64,
    pub mmax: f64,
    dims: Dims,
    geodetic: bool,
}

impl BoundingBox {
    /// A zeroed box of the given dimensionality, for callers that fill the
    /// ranges in directly.
    pub fn new(dims: Dims, geodetic: bool) -> Self {
        BoundingBox {
            xmin: 0.0,
            xmax: 0.0,
            ymin: 0.0,
            ymax: 0.0,
            zmin: 0.0,
            zmax: 0.0,
            mmin: 0.0,
            mmax: 0.0,
            dims,
            geodetic,
        }
    }

    /// The degenerate box of a single coordinate.
    pub fn from_coord(c: Coord, dims: Dims) -> Self {
        BoundingBox {
            xmin: c.x,
            xmax: c.x,
            ymin: c.y,
            ymax: c.y,
            zmin: c.z,
            zmax: c.z,
            mmin: c.m,
            mmax: c.m,
            dims,
            geodetic: false,
        }
    }

    /// A planar box from explicit XY ranges.
    pub fn from_xy_ranges(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        BoundingBox {
            xmin,
            xmax,
            ymin,
            ymax,
            zmin: 0.0,
            zmax: 0.0,
            mmin: 0.0,
            mmax: 0.0,
            dims: Dims::XY,
            geodetic: false,
        }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn is_geodetic(&self) -> bool {
        self.geodetic
    }

    pub fn set_geodetic(&mut self, geodetic: bool) {
        self.geodetic = geodetic;
    }

    /// Number of serialized ranges: three for a geocentric cap, otherwise
    /// one per ordinate.
    pub fn ndims(&self) -> usize {
        if self.geodetic {
            3
        } else {
            self.dims.ndims()
        }
    }

    /// Grow the box to cover `c`. NaN ordinates are absorbed without
    /// poisoning the opposite bound.
    pub fn expand_to_include(&mut self, c: Coord) {
        self.xmin = self.xmin.min(c.x);
        self.xmax = self.xmax.max(c.x);
        self.ymin = self.ymin.min(c.y);
        self.ymax = self.ymax.max(c.y);
        if self.dims.has_z() || self.geodetic {
            self.zmin = self.zmin.min(c.z);
            self.zmax = self.zmax.max(c.z);
        }
        if self.dims.has_m() {
            self.mmin = self.mmin.min(c.m);
            self.mmax = self.mmax.max(c.m);
        }
    }

    /// Componentwise union with another box of the same dimensionality.
    pub fn merge(&mut self, other: &BoundingBox) -> Result<(), Error> {
        if self.dims != other.dims || self.geodetic != other.geodetic {
            log::error!(
                "cannot merge bounding boxes of differing dimensionality ({} vs {})",
                self.dims,
                other.dims
            );
            return Err(Error::DimensionMismatch {
                expected: self.dims,
                found: other.dims,
            });
        }
        self.xmin = self.xmin.min(other.xmin);
        self.xmax = self.xmax.max(other.xmax);
        self.ymin = self.ymin.min(other.ymin);
        self.ymax = self.ymax.max(other.ymax);
        if self.dims.has_z() || self.geodetic {
            self.zmin = self.zmin.min(other.zmin);
            self.zmax = self.zmax.max(other.zmax);
        }
        if self.dims.has_m() {
            self.mmin = self.mmin.min(other.mmin);
            self.mmax = self.mmax.max(other.mmax);
        }
        Ok(())
    }

    /// Move every side outward by `d` (inward for negative `d`).
    pub fn expand(&mut self, d: f64) {
        self.xmin -= d;
        self.xmax += d;
        self.ymin -= d;
        self.ymax += d;
        if self.dims.has_z() || self.geodetic {
            self.zmin -= d;
            self.zmax += d;
        }
        if self.dims.has_m() {
            self.mmin -= d;
            self.mmax += d;
        }
    }

    /// True when `low <= c <= high` holds on every ordinate the box carries.
    pub fn contains_coord(&self, c: Coord) -> bool {
        if c.x < self.xmin || c.x > self.xmax || c.y < self.ymin || c.y > self.ymax {
            return false;
        }
        if self.dims.has_z() && !self.geodetic && (c.z < self.zmin || c.z > self.zmax) {
            return false;
        }
        if self.dims.has_m() && (c.m < self.mmin || c.m > self.mmax) {
            return false;
        }
        true
    }

    /// Round every range outward to the nearest single-precision values.
    ///
    /// This is the only permitted widening: low sides go through
    /// [`next_float_down`], high sides through [`next_float_up`], and the
    /// result is what the wire format stores.
    pub fn widen(&mut self) {
        self.xmin = f64::from(next_float_down(self.xmin));
        self.xmax = f64::from(next_float_up(self.xmax));
        self.ymin = f64::from(next_float_down(self.ymin));
        self.ymax = f64::from(next_float_up(self.ymax));
        self.zmin = f64::from(next_float_down(self.zmin));
        self.zmax = f64::from(next_float_up(self.zmax));
        self.mmin = f64::from(next_float_down(self.mmin));
        self.mmax = f64::from(next_float_up(self.mmax));
    }

    /// Swap two ordinate ranges in place.
    pub fn swap_ordinates(&mut self, a: Ordinate, b: Ordinate) {
        let (amin, amax) = self.range(a);
        let (bmin, bmax) = self.range(b);
        self.set_range(a, bmin, bmax);
        self.set_range(b, amin, amax);
    }

    /// Scale every range componentwise, restoring min/max order where the
    /// factor is negative.
    pub fn scale(&mut self, factor: Coord) {
        let scale_range = |min: &mut f64, max: &mut f64, f: f64| {
            let lo = *min * f;
            let hi = *max * f;
            *min = lo.min(hi);
            *max = lo.max(hi);
        };
        scale_range(&mut self.xmin, &mut self.xmax, factor.x);
        scale_range(&mut self.ymin, &mut self.ymax, factor.y);
        scale_range(&mut self.zmin, &mut self.zmax, factor.z);
        scale_range(&mut self.mmin, &mut self.mmax, factor.m);
    }

    /// Planar center of the box.
    pub fn center(&self) -> (f64, f64) {
        ((self.xmin + self.xmax) / 2.0, (self.ymin + self.ymax) / 2.0)
    }

    /// A 64-bit Morton key derived from the planar center.
    ///
    /// Each midpoint is taken at single precision, folded into an unsigned
    /// value that preserves numeric order, and the two 32-bit values are
    /// bit-interleaved. Nearby boxes get nearby keys, which is what the
    /// index uses to keep tree edges joining spatially adjacent subtrees
    /// and what the serialized comparator sorts by.
    pub fn sortable_hash(&self) -> u64 {
        // Omitting the division by two only shifts the exponent; the key
        // ordering is unchanged.
        let x = sortable_u32((self.xmin + self.xmax) as f32);
        let y = sortable_u32((self.ymin + self.ymax) as f32);
        interleave_u32(x, y)
    }

    fn range(&self, o: Ordinate) -> (f64, f64) {
        match o {
            Ordinate::X => (self.xmin, self.xmax),
            Ordinate::Y => (self.ymin, self.ymax),
            Ordinate::Z => (self.zmin, self.zmax),
            Ordinate::M => (self.mmin, self.mmax),
        }
    }

    fn set_range(&mut self, o: Ordinate, min: f64, max: f64) {
        match o {
            Ordinate::X => {
                self.xmin = min;
                self.xmax = max;
            }
            Ordinate::Y => {
                self.ymin = min;
                self.ymax = max;
            }
            Ordinate::Z => {
                self.zmin = min;
                self.zmax = max;
            }
            Ordinate::M => {
                self.mmin = min;
                self.mmax = max;
            }
        }
    }
}

/// Map an `f32` onto a `u32` so that unsigned integer order matches the
/// numeric order of the floats (negative values fold below positives).
fn sortable_u32(f: f32) -> u32 {
    let bits = f.to_bits();
    if bits & 0x8000_0000 != 0 {
        !bits
    } else {
        bits ^ 0x8000_0000
    }
}

/// Interleave the bits of `x` (even positions from bit 1) and `y` into a
/// Morton code.
fn interleave_u32(x: u32, y: u32) -> u64 {
    (spread_u32(x) << 1) | spread_u32(y)
}

fn spread_u32(v: u32) -> u64 {
    let mut x = u64::from(v);
    x = (x | (x << 16)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x << 8)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    x = (x | (x << 1)) & 0x5555_5555_5555_5555;
    x
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expand_to_include_grows_all_present_dims() {
        let mut b = BoundingBox::from_coord(Coord::xyz(0.0, 0.0, 5.0), Dims::XYZ);
        b.expand_to_include(Coord::xyz(2.0, -1.0, 7.0));
        assert_eq!((b.xmin, b.xmax), (0.0, 2.0));
        assert_eq!((b.ymin, b.ymax), (-1.0, 0.0));
        assert_eq!((b.zmin, b.zmax), (5.0, 7.0));
    }

    #[test]
    fn merge_requires_matching_dims() {
        let mut a = BoundingBox::from_coord(Coord::xy(0.0, 0.0), Dims::XY);
        let b = BoundingBox::from_coord(Coord::xyz(1.0, 1.0, 1.0), Dims::XYZ);
        assert!(matches!(
            a.merge(&b),
            Err(Error::DimensionMismatch { .. })
        ));

        let c = BoundingBox::from_coord(Coord::xy(3.0, -2.0), Dims::XY);
        a.merge(&c).unwrap();
        assert_eq!((a.xmin, a.xmax, a.ymin, a.ymax), (0.0, 3.0, -2.0, 0.0));
    }

    #[test]
    fn widen_is_outward() {
        let mut b = BoundingBox::from_xy_ranges(0.1, 0.3, -0.7, -0.2);
        let orig = b;
        b.widen();
        assert!(b.xmin <= orig.xmin && b.xmax >= orig.xmax);
        assert!(b.ymin <= orig.ymin && b.ymax >= orig.ymax);
        assert!(b.contains_coord(Coord::xy(0.1, -0.7)));
        assert!(b.contains_coord(Coord::xy(0.3, -0.2)));
    }

    #[test]
    fn widen_keeps_infinite_sides() {
        let mut b = BoundingBox::from_xy_ranges(f64::NEG_INFINITY, 1.0, 0.0, f64::INFINITY);
        b.widen();
        assert_eq!(b.xmin, f64::NEG_INFINITY);
        assert_eq!(b.ymax, f64::INFINITY);
    }

    #[test]
    fn negative_scale_restores_order() {
        let mut b = BoundingBox::from_xy_ranges(1.0, 2.0, 3.0, 4.0);
        b.scale(Coord::xyzm(-2.0, 1.0, 1.0, 1.0));
        assert_eq!((b.xmin, b.xmax), (-4.0, -2.0));
        assert_eq!((b.ymin, b.ymax), (3.0, 4.0));
    }

    #[test]
    fn sortable_hash_orders_by_proximity() {
        let key = |x: f64, y: f64| BoundingBox::from_xy_ranges(x, x, y, y).sortable_hash();
        // A monotone fold: moving a center right or up never decreases the
        // per-axis component, so identical rows sort by x.
        assert!(key(0.0, 0.0) < key(1.0, 0.0));
        assert!(key(1.0, 0.0) < key(2.0, 0.0));
        assert!(key(-2.0, 0.0) < key(-1.0, 0.0));
        // Near neighbours beat far ones along the curve.
        let a = key(0.0, 0.0);
        let b = key(0.25, 0.25);
        let far = key(1e9, 1e9);
        assert!(far > a && far > b);
    }

    #[test]
    fn swap_ranges() {
        let mut b = BoundingBox::from_coord(Coord::xyz(1.0, 2.0, 3.0), Dims::XYZ);
        b.expand_to_include(Coord::xyz(2.0, 4.0, 6.0));
        b.swap_ordinates(Ordinate::X, Ordinate::Z);
        assert_eq!((b.xmin, b.xmax), (3.0, 6.0));
        assert_eq!((b.zmin, b.zmax), (1.0, 2.0));
    }
}
