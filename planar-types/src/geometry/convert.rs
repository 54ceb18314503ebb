//! Lifting linear variants to their curvilinear counterparts and flattening
//! collections by member type.

use crate::{Error, Geometry, GeometryData, GeometryType};

impl Geometry {
    /// Lift a linear geometry to its curvilinear counterpart.
    ///
    /// A line string becomes a compound curve of one straight piece, a
    /// polygon becomes a curve polygon over the same rings, and the multi
    /// variants follow suit. Already-curvilinear and non-linear inputs come
    /// back as deep copies of themselves.
    pub fn as_curve(&self) -> Geometry {
        use GeometryType::*;
        match self.geom_type() {
            LineString => {
                let mut curve = Geometry::new(CompoundCurve, self.srid(), self.dims());
                curve.flags = self.flags;
                if !self.is_empty() {
                    curve
                        .add_geom(self.clone_deep())
                        .expect("a line string is a valid compound curve piece");
                }
                curve
            }
            Polygon => {
                let mut curve = Geometry::new(CurvePolygon, self.srid(), self.dims());
                curve.flags = self.flags;
                if let GeometryData::Polygon(rings) = self.data() {
                    for ring in rings {
                        let mut ring = ring.clone();
                        ring.make_owned();
                        let mut boundary =
                            Geometry::from_point_array(LineString, self.srid(), ring);
                        boundary.flags.set_geodetic(self.is_geodetic());
                        curve
                            .add_geom(boundary)
                            .expect("a closed line string is a valid curve polygon ring");
                    }
                }
                curve
            }
            MultiLineString => self.retype_collection(MultiCurve),
            MultiPolygon => self.retype_collection(MultiSurface),
            _ => self.clone_deep(),
        }
    }

    fn retype_collection(&self, target: GeometryType) -> Geometry {
        let mut out = Geometry::new(target, self.srid(), self.dims());
        out.flags = self.flags;
        if let GeometryData::Collection(geoms) = self.data() {
            for g in geoms {
                out.add_geom(g.clone_deep())
                    .expect("members of the source multi are valid in the curved multi");
            }
        }
        out
    }

    /// Collect every sub-geometry of the requested primitive type into a
    /// fresh multi-geometry, flattening through nested collections.
    ///
    /// `want` must be `Point`, `LineString` or `Polygon`; the result is the
    /// matching multi variant, empty when nothing matches.
    pub fn collection_extract(&self, want: GeometryType) -> Result<Geometry, Error> {
        use GeometryType::*;
        let target = match want {
            Point => MultiPoint,
            LineString => MultiLineString,
            Polygon => MultiPolygon,
            _ => {
                return Err(Error::InvalidGeometry(
                    "extraction is defined for point, line string and polygon members",
                ))
            }
        };
        let mut out = Geometry::new(target, self.srid(), self.dims());
        out.flags.set_geodetic(self.is_geodetic());
        self.extract_into(want, &mut out)?;
        Ok(out)
    }

    fn extract_into(&self, want: GeometryType, out: &mut Geometry) -> Result<(), Error> {
        if self.geom_type() == want {
            if !self.is_empty() {
                out.add_geom(self.clone_deep())?;
            }
            return Ok(());
        }
        if let GeometryData::Collection(geoms) = self.data() {
            for g in geoms {
                g.extract_into(want, out)?;
            }
        }
        Ok(())
    }
}
