mod convert;
mod transform;

use crate::{BoundingBox, Coord, Dims, Error, Flags, PointArray, Srid};
use std::fmt;

/// Extended-flags bit marking a closed polyhedral volume.
pub const XFLAG_SOLID: u64 = 0x01;

/// The closed set of geometry variants, carrying the wire type codes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum GeometryType {
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
    CircularString = 8,
    CompoundCurve = 9,
    CurvePolygon = 10,
    MultiCurve = 11,
    MultiSurface = 12,
    PolyhedralSurface = 13,
    Triangle = 14,
    Tin = 15,
}

impl GeometryType {
    /// Decode a wire type code.
    pub fn from_code(code: u32) -> Result<Self, Error> {
        use GeometryType::*;
        Ok(match code {
            1 => Point,
            2 => LineString,
            3 => Polygon,
            4 => MultiPoint,
            5 => MultiLineString,
            6 => MultiPolygon,
            7 => GeometryCollection,
            8 => CircularString,
            9 => CompoundCurve,
            10 => CurvePolygon,
            11 => MultiCurve,
            12 => MultiSurface,
            13 => PolyhedralSurface,
            14 => Triangle,
            15 => Tin,
            _ => return Err(Error::InvalidPayload("geometry type code out of range")),
        })
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        use GeometryType::*;
        match self {
            Point => "Point",
            LineString => "LineString",
            Polygon => "Polygon",
            MultiPoint => "MultiPoint",
            MultiLineString => "MultiLineString",
            MultiPolygon => "MultiPolygon",
            GeometryCollection => "GeometryCollection",
            CircularString => "CircularString",
            CompoundCurve => "CompoundCurve",
            CurvePolygon => "CurvePolygon",
            MultiCurve => "MultiCurve",
            MultiSurface => "MultiSurface",
            PolyhedralSurface => "PolyhedralSurface",
            Triangle => "Triangle",
            Tin => "Tin",
        }
    }

    /// Variants whose payload is a list of sub-geometries.
    pub fn is_collection(self) -> bool {
        use GeometryType::*;
        matches!(
            self,
            MultiPoint
                | MultiLineString
                | MultiPolygon
                | GeometryCollection
                | CompoundCurve
                | CurvePolygon
                | MultiCurve
                | MultiSurface
                | PolyhedralSurface
                | Tin
        )
    }

    /// Variants that bound an area, for containment reasoning.
    pub fn is_areal(self) -> bool {
        use GeometryType::*;
        matches!(
            self,
            Polygon | CurvePolygon | MultiPolygon | MultiSurface | PolyhedralSurface | Triangle | Tin
        )
    }

    /// Which member types a collection variant accepts.
    pub fn allows_member(self, member: GeometryType) -> bool {
        use GeometryType::*;
        match self {
            MultiPoint => member == Point,
            MultiLineString => member == LineString,
            MultiPolygon => member == Polygon,
            CompoundCurve => matches!(member, LineString | CircularString),
            CurvePolygon | MultiCurve => {
                matches!(member, LineString | CircularString | CompoundCurve)
            }
            MultiSurface => matches!(member, Polygon | CurvePolygon),
            PolyhedralSurface => member == Polygon,
            Tin => member == Triangle,
            GeometryCollection => true,
            _ => false,
        }
    }
}

impl fmt::Debug for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The variant payload of a [`Geometry`].
///
/// Collections keep their concrete type on the enclosing [`Geometry`]; the
/// payload only distinguishes the storage shapes.
#[derive(Clone, Debug)]
pub enum GeometryData {
    Point(PointArray),
    LineString(PointArray),
    CircularString(PointArray),
    Triangle(PointArray),
    Polygon(Vec<PointArray>),
    Collection(Vec<Geometry>),
}

/// A geometry value: a tagged variant plus SRID, flags and an optional
/// cached bounding box.
///
/// Geometry trees are built by parsers (or the deserializer) and mutated
/// only during construction, bbox attachment, or the explicit coordinate
/// transformations; afterwards they are logically immutable. `Clone` is
/// shallow over shared point-array storage; use
/// [`clone_deep`](Geometry::clone_deep) to sever all sharing.
#[derive(Clone, Debug)]
pub struct Geometry {
    geom_type: GeometryType,
    srid: Srid,
    flags: Flags,
    xflags: u64,
    bbox: Option<BoundingBox>,
    data: GeometryData,
}

impl Geometry {
    /// An empty geometry of any variant.
    pub fn new(geom_type: GeometryType, srid: Srid, dims: Dims) -> Geometry {
        use GeometryType::*;
        let data = match geom_type {
            Point => GeometryData::Point(PointArray::new(dims)),
            LineString => GeometryData::LineString(PointArray::new(dims)),
            CircularString => GeometryData::CircularString(PointArray::new(dims)),
            Triangle => GeometryData::Triangle(PointArray::new(dims)),
            Polygon => GeometryData::Polygon(Vec::new()),
            _ => GeometryData::Collection(Vec::new()),
        };
        Geometry {
            geom_type,
            srid,
            flags: Flags::new(dims),
            xflags: 0,
            bbox: None,
            data,
        }
    }

    /// A single point.
    pub fn point(srid: Srid, dims: Dims, c: Coord) -> Geometry {
        let mut g = Geometry::new(GeometryType::Point, srid, dims);
        if let GeometryData::Point(pa) = &mut g.data {
            pa.push(c);
        }
        g
    }

    /// A point from an existing (possibly shared-storage) array of zero or
    /// one coordinates.
    pub fn point_from_array(srid: Srid, points: PointArray) -> Result<Geometry, Error> {
        if points.npoints() > 1 {
            return Err(Error::InvalidGeometry("a point holds at most one coordinate"));
        }
        Ok(Geometry::from_point_array(GeometryType::Point, srid, points))
    }

    pub fn line_string(srid: Srid, points: PointArray) -> Result<Geometry, Error> {
        if points.npoints() == 1 {
            return Err(Error::InvalidGeometry(
                "a line string needs at least two points",
            ));
        }
        Ok(Geometry::from_point_array(
            GeometryType::LineString,
            srid,
            points,
        ))
    }

    pub fn circular_string(srid: Srid, points: PointArray) -> Result<Geometry, Error> {
        let n = points.npoints();
        if n != 0 && (n < 3 || n % 2 == 0) {
            return Err(Error::InvalidGeometry(
                "a circular string needs an odd point count of at least three",
            ));
        }
        Ok(Geometry::from_point_array(
            GeometryType::CircularString,
            srid,
            points,
        ))
    }

    pub fn triangle(srid: Srid, ring: PointArray) -> Result<Geometry, Error> {
        if !ring.is_empty() {
            check_ring(&ring)?;
            if ring.npoints() != 4 {
                return Err(Error::InvalidGeometry(
                    "a triangle ring has exactly four points",
                ));
            }
        }
        Ok(Geometry::from_point_array(
            GeometryType::Triangle,
            srid,
            ring,
        ))
    }

    pub fn polygon(srid: Srid, dims: Dims, rings: Vec<PointArray>) -> Result<Geometry, Error> {
        let mut g = Geometry::new(GeometryType::Polygon, srid, dims);
        for ring in rings {
            g.add_ring(ring)?;
        }
        Ok(g)
    }

    /// A collection of any variant, populated through
    /// [`add_geom`](Geometry::add_geom) checks.
    pub fn collection(
        geom_type: GeometryType,
        srid: Srid,
        dims: Dims,
        members: Vec<Geometry>,
    ) -> Result<Geometry, Error> {
        if !geom_type.is_collection() {
            return Err(Error::InvalidGeometry(
                "collection constructor applied to a primitive type",
            ));
        }
        let mut g = Geometry::new(geom_type, srid, dims);
        for member in members {
            g.add_geom(member)?;
        }
        Ok(g)
    }

    fn from_point_array(geom_type: GeometryType, srid: Srid, pa: PointArray) -> Geometry {
        use GeometryType::*;
        let flags = Flags::new(pa.dims());
        let data = match geom_type {
            Point => GeometryData::Point(pa),
            LineString => GeometryData::LineString(pa),
            CircularString => GeometryData::CircularString(pa),
            Triangle => GeometryData::Triangle(pa),
            _ => unreachable!("not a point-array variant"),
        };
        Geometry {
            geom_type,
            srid,
            flags,
            xflags: 0,
            bbox: None,
            data,
        }
    }

    pub fn geom_type(&self) -> GeometryType {
        self.geom_type
    }

    pub fn srid(&self) -> Srid {
        self.srid
    }

    /// Set the SRID on this geometry and every sub-geometry.
    pub fn set_srid(&mut self, srid: Srid) {
        self.srid = srid;
        if let GeometryData::Collection(geoms) = &mut self.data {
            for g in geoms {
                g.set_srid(srid);
            }
        }
    }

    pub fn dims(&self) -> Dims {
        self.flags.dims()
    }

    pub fn has_z(&self) -> bool {
        self.flags.has_z()
    }

    pub fn has_m(&self) -> bool {
        self.flags.has_m()
    }

    pub fn flags(&self) -> Flags {
        let mut flags = self.flags;
        flags.set_bbox(self.bbox.is_some());
        flags.set_read_only(self.is_read_only());
        flags
    }

    pub fn is_geodetic(&self) -> bool {
        self.flags.is_geodetic()
    }

    /// Mark the whole tree geodetic (or planar). Drops any cached box, whose
    /// interpretation would otherwise silently change.
    pub fn set_geodetic(&mut self, geodetic: bool) {
        self.flags.set_geodetic(geodetic);
        self.bbox = None;
        if let GeometryData::Collection(geoms) = &mut self.data {
            for g in geoms {
                g.set_geodetic(geodetic);
            }
        }
    }

    pub fn is_solid(&self) -> bool {
        self.flags.is_solid()
    }

    pub fn set_solid(&mut self, solid: bool) {
        self.flags.set_solid(solid);
        if solid {
            self.xflags |= XFLAG_SOLID;
        } else {
            self.xflags &= !XFLAG_SOLID;
        }
    }

    /// The full extended-flags word. Bit 0 mirrors the solid flag; the
    /// remaining bits are reserved and round-trip through serialization
    /// untouched.
    pub fn xflags(&self) -> u64 {
        self.xflags
    }

    pub fn set_xflags(&mut self, xflags: u64) {
        self.xflags = xflags;
        self.flags.set_solid(xflags & XFLAG_SOLID != 0);
    }

    pub fn data(&self) -> &GeometryData {
        &self.data
    }

    /// The single point array of a primitive variant.
    pub fn point_array(&self) -> Option<&PointArray> {
        match &self.data {
            GeometryData::Point(pa)
            | GeometryData::LineString(pa)
            | GeometryData::CircularString(pa)
            | GeometryData::Triangle(pa) => Some(pa),
            _ => None,
        }
    }

    /// The rings of a polygon, exterior first.
    pub fn rings(&self) -> Option<&[PointArray]> {
        match &self.data {
            GeometryData::Polygon(rings) => Some(rings),
            _ => None,
        }
    }

    /// The members of a collection variant.
    pub fn geoms(&self) -> Option<&[Geometry]> {
        match &self.data {
            GeometryData::Collection(geoms) => Some(geoms),
            _ => None,
        }
    }

    /// Mutable access to the rings of a polygon (or the single ring of a
    /// triangle). Callers must leave every ring closed.
    pub fn rings_mut(&mut self) -> Option<&mut [PointArray]> {
        match &mut self.data {
            GeometryData::Polygon(rings) => Some(rings),
            GeometryData::Triangle(ring) => Some(std::slice::from_mut(ring)),
            _ => None,
        }
    }

    /// Mutable access to the members of a collection variant. The member
    /// list itself cannot be grown or shrunk this way; use
    /// [`add_geom`](Geometry::add_geom) for that.
    pub fn geoms_mut(&mut self) -> Option<&mut [Geometry]> {
        match &mut self.data {
            GeometryData::Collection(geoms) => Some(geoms),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.data {
            GeometryData::Point(pa)
            | GeometryData::LineString(pa)
            | GeometryData::CircularString(pa)
            | GeometryData::Triangle(pa) => pa.is_empty(),
            GeometryData::Polygon(rings) => rings.iter().all(|r| r.is_empty()),
            GeometryData::Collection(geoms) => geoms.iter().all(|g| g.is_empty()),
        }
    }

    pub fn count_vertices(&self) -> usize {
        let mut n = 0;
        self.for_each_point_array(&mut |pa| n += pa.npoints());
        n
    }

    /// Whether any edge of this geometry is a circular arc.
    pub fn has_arcs(&self) -> bool {
        match &self.data {
            GeometryData::CircularString(_) => true,
            GeometryData::Collection(geoms) => geoms.iter().any(Geometry::has_arcs),
            _ => false,
        }
    }

    /// Whether any point array shares storage with a deserialization buffer.
    pub fn is_read_only(&self) -> bool {
        let mut read_only = false;
        self.for_each_point_array(&mut |pa| read_only |= pa.is_read_only());
        read_only
    }

    pub fn bbox_cached(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }

    /// Attach a bounding box. The box must match the geometry's
    /// dimensionality, and an empty geometry never carries one.
    pub fn set_bbox(&mut self, bbox: BoundingBox) -> Result<(), Error> {
        if self.is_empty() {
            return Err(Error::InvalidGeometry(
                "an empty geometry cannot carry a bounding box",
            ));
        }
        if bbox.dims() != self.dims() || bbox.is_geodetic() != self.is_geodetic() {
            return Err(Error::DimensionMismatch {
                expected: self.dims(),
                found: bbox.dims(),
            });
        }
        self.bbox = Some(bbox);
        Ok(())
    }

    /// Discard the cached bounding box.
    pub fn drop_bbox(&mut self) {
        self.bbox = None;
    }

    /// Append a ring to a polygon: ring 0 is the exterior, later rings are
    /// holes. The ring must be closed, have at least four points, and match
    /// the polygon's dimensionality.
    pub fn add_ring(&mut self, ring: PointArray) -> Result<(), Error> {
        if ring.dims() != self.dims() {
            return Err(Error::DimensionMismatch {
                expected: self.dims(),
                found: ring.dims(),
            });
        }
        check_ring(&ring)?;
        match &mut self.data {
            GeometryData::Polygon(rings) => {
                rings.push(ring);
                self.bbox = None;
                Ok(())
            }
            _ => Err(Error::InvalidGeometry("add_ring applies to polygons")),
        }
    }

    /// Append a member to a collection, enforcing the subtype table and
    /// dimensionality agreement. The member inherits this collection's SRID.
    pub fn add_geom(&mut self, mut member: Geometry) -> Result<(), Error> {
        if !self.geom_type.allows_member(member.geom_type) {
            log::error!(
                "invalid member type {} for collection type {}",
                member.geom_type,
                self.geom_type
            );
            return Err(Error::SubtypeNotAllowed {
                collection: self.geom_type,
                member: member.geom_type,
            });
        }
        if member.dims() != self.dims() {
            return Err(Error::DimensionMismatch {
                expected: self.dims(),
                found: member.dims(),
            });
        }
        if member.is_geodetic() != self.is_geodetic() {
            return Err(Error::InvalidGeometry(
                "geodetic flag differs between collection and member",
            ));
        }
        match &mut self.data {
            GeometryData::Collection(geoms) => {
                member.set_srid(self.srid);
                geoms.push(member);
                self.bbox = None;
                Ok(())
            }
            _ => Err(Error::InvalidGeometry("add_geom applies to collections")),
        }
    }

    /// Structural equality: same variant, SRID, dimensionality, semantic
    /// flags, nesting and bit-exact vertex sequences. Cached boxes and
    /// storage kind are ignored.
    pub fn same(&self, other: &Geometry) -> bool {
        if self.geom_type != other.geom_type
            || self.srid != other.srid
            || self.dims() != other.dims()
            || self.is_geodetic() != other.is_geodetic()
            || self.is_solid() != other.is_solid()
        {
            return false;
        }
        match (&self.data, &other.data) {
            (GeometryData::Point(a), GeometryData::Point(b))
            | (GeometryData::LineString(a), GeometryData::LineString(b))
            | (GeometryData::CircularString(a), GeometryData::CircularString(b))
            | (GeometryData::Triangle(a), GeometryData::Triangle(b)) => a.same(b),
            (GeometryData::Polygon(a), GeometryData::Polygon(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(r, s)| r.same(s))
            }
            (GeometryData::Collection(a), GeometryData::Collection(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(g, h)| g.same(h))
            }
            _ => false,
        }
    }

    /// Visit every point array in the tree, depth first.
    pub fn for_each_point_array<F>(&self, f: &mut F)
    where
        F: FnMut(&PointArray),
    {
        match &self.data {
            GeometryData::Point(pa)
            | GeometryData::LineString(pa)
            | GeometryData::CircularString(pa)
            | GeometryData::Triangle(pa) => f(pa),
            GeometryData::Polygon(rings) => rings.iter().for_each(|r| f(r)),
            GeometryData::Collection(geoms) => {
                geoms.iter().for_each(|g| g.for_each_point_array(f))
            }
        }
    }

    /// Visit every point array mutably. Callers are expected to keep the
    /// cached bounding box consistent or drop it.
    pub(crate) fn for_each_point_array_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut PointArray),
    {
        match &mut self.data {
            GeometryData::Point(pa)
            | GeometryData::LineString(pa)
            | GeometryData::CircularString(pa)
            | GeometryData::Triangle(pa) => f(pa),
            GeometryData::Polygon(rings) => rings.iter_mut().for_each(|r| f(r)),
            GeometryData::Collection(geoms) => geoms
                .iter_mut()
                .for_each(|g| g.for_each_point_array_mut(f)),
        }
    }
}

fn check_ring(ring: &PointArray) -> Result<(), Error> {
    if ring.npoints() < 4 {
        return Err(Error::InvalidGeometry("a ring needs at least four points"));
    }
    if !ring.is_closed() {
        return Err(Error::InvalidGeometry("a ring must be closed"));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    pub(crate) fn pa_xy(points: &[(f64, f64)]) -> PointArray {
        let coords: Vec<Coord> = points.iter().map(|&(x, y)| Coord::xy(x, y)).collect();
        PointArray::from_coords(Dims::XY, &coords)
    }

    pub(crate) fn unit_square(srid: Srid) -> Geometry {
        Geometry::polygon(
            srid,
            Dims::XY,
            vec![pa_xy(&[
                (0.0, 0.0),
                (0.0, 1.0),
                (1.0, 1.0),
                (1.0, 0.0),
                (0.0, 0.0),
            ])],
        )
        .unwrap()
    }

    #[test]
    fn type_codes_roundtrip() {
        for code in 1..=15 {
            let t = GeometryType::from_code(code).unwrap();
            assert_eq!(t.code(), code);
        }
        assert!(GeometryType::from_code(0).is_err());
        assert!(GeometryType::from_code(16).is_err());
    }

    #[test]
    fn empty_constructor_all_variants() {
        for code in 1..=15 {
            let t = GeometryType::from_code(code).unwrap();
            let g = Geometry::new(t, Srid::UNKNOWN, Dims::XYZ);
            assert!(g.is_empty());
            assert_eq!(g.geom_type(), t);
            assert!(g.has_z());
            assert!(!g.has_m());
            assert_eq!(g.count_vertices(), 0);
            assert!(g.bbox_cached().is_none());
        }
    }

    #[test]
    fn line_string_needs_two_points() {
        let err = Geometry::line_string(Srid::UNKNOWN, pa_xy(&[(0.0, 0.0)]));
        assert!(matches!(err, Err(Error::InvalidGeometry(_))));
        assert!(Geometry::line_string(Srid::UNKNOWN, pa_xy(&[])).is_ok());
        assert!(Geometry::line_string(Srid::UNKNOWN, pa_xy(&[(0.0, 0.0), (1.0, 1.0)])).is_ok());
    }

    #[test]
    fn circular_string_needs_odd_count() {
        assert!(Geometry::circular_string(
            Srid::UNKNOWN,
            pa_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])
        )
        .is_ok());
        assert!(Geometry::circular_string(
            Srid::UNKNOWN,
            pa_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)])
        )
        .is_err());
    }

    #[test]
    fn ring_validation() {
        let open = pa_xy(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        assert!(matches!(
            Geometry::polygon(Srid::UNKNOWN, Dims::XY, vec![open]),
            Err(Error::InvalidGeometry("a ring must be closed"))
        ));
        let short = pa_xy(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert!(Geometry::polygon(Srid::UNKNOWN, Dims::XY, vec![short]).is_err());
    }

    #[test]
    fn add_ring_dimension_check() {
        let mut poly = Geometry::new(GeometryType::Polygon, Srid::UNKNOWN, Dims::XYZ);
        let ring = pa_xy(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 0.0)]);
        assert!(matches!(
            poly.add_ring(ring),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn collection_subtype_checks() {
        let mut mp = Geometry::new(GeometryType::MultiPoint, Srid::new(4326), Dims::XY);
        mp.add_geom(Geometry::point(Srid::UNKNOWN, Dims::XY, Coord::xy(1.0, 2.0)))
            .unwrap();
        // Member inherited the collection SRID.
        assert_eq!(mp.geoms().unwrap()[0].srid(), Srid::new(4326));

        let line =
            Geometry::line_string(Srid::UNKNOWN, pa_xy(&[(0.0, 0.0), (1.0, 1.0)])).unwrap();
        assert!(matches!(
            mp.add_geom(line),
            Err(Error::SubtypeNotAllowed { .. })
        ));

        let mut gc = Geometry::new(GeometryType::GeometryCollection, Srid::UNKNOWN, Dims::XY);
        gc.add_geom(unit_square(Srid::UNKNOWN)).unwrap();
        gc.add_geom(Geometry::point(Srid::UNKNOWN, Dims::XY, Coord::xy(0.0, 0.0)))
            .unwrap();
        assert_eq!(gc.count_vertices(), 6);
    }

    #[test]
    fn collection_of_empties_is_empty() {
        let mut gc = Geometry::new(GeometryType::GeometryCollection, Srid::UNKNOWN, Dims::XY);
        gc.add_geom(Geometry::new(GeometryType::Point, Srid::UNKNOWN, Dims::XY))
            .unwrap();
        assert!(gc.is_empty());
    }

    #[test]
    fn bbox_attachment_rules() {
        let mut poly = unit_square(Srid::UNKNOWN);
        let bbox = BoundingBox::from_xy_ranges(0.0, 1.0, 0.0, 1.0);
        poly.set_bbox(bbox).unwrap();
        assert!(poly.bbox_cached().is_some());
        poly.drop_bbox();
        assert!(poly.bbox_cached().is_none());

        let mut empty = Geometry::new(GeometryType::Polygon, Srid::UNKNOWN, Dims::XY);
        assert!(empty.set_bbox(bbox).is_err());
    }

    #[test]
    fn same_ignores_bbox_and_storage() {
        let mut a = unit_square(Srid::new(4326));
        let b = unit_square(Srid::new(4326));
        assert!(a.same(&b));
        a.set_bbox(BoundingBox::from_xy_ranges(0.0, 1.0, 0.0, 1.0))
            .unwrap();
        assert!(a.same(&b));
        assert!(!a.same(&unit_square(Srid::UNKNOWN)));
    }

    #[test]
    fn solid_flag_mirrors_xflags() {
        let mut g = unit_square(Srid::UNKNOWN);
        assert!(!g.is_solid());
        g.set_solid(true);
        assert!(g.is_solid());
        assert_eq!(g.xflags() & XFLAG_SOLID, XFLAG_SOLID);
        g.set_xflags(0xF0);
        assert!(!g.is_solid());
        assert_eq!(g.xflags(), 0xF0);
    }

    #[test]
    fn has_arcs_recurses() {
        let arc = Geometry::circular_string(
            Srid::UNKNOWN,
            pa_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]),
        )
        .unwrap();
        let mut curve = Geometry::new(GeometryType::CompoundCurve, Srid::UNKNOWN, Dims::XY);
        curve.add_geom(arc).unwrap();
        assert!(curve.has_arcs());
        assert!(!unit_square(Srid::UNKNOWN).has_arcs());
    }
}
