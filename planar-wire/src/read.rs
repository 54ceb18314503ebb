//! Deserializing wire bytes into a geometry tree.
//!
//! Ordinate runs are copied once into shared, reference-counted buffers, so
//! the resulting point arrays are flagged read-only and upgrade to owned
//! storage only if mutated. A polygon's rings all reference a single
//! backing allocation.

use crate::flags::flags_from_byte;
use crate::header::Header;
use crate::peek::read_bbox;
use crate::write::needs_bbox;
use byteorder::{ByteOrder, LittleEndian};
use planar::BoundingRect;
use planar_types::{
    Dims, Error, Geometry, GeometryType, PointArray, Srid,
};
use std::sync::Arc;

struct Reader<'a> {
    buf: &'a [u8],
    at: usize,
    dims: Dims,
    geodetic: bool,
    srid: Srid,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.buf.len() - self.at
    }

    fn read_u32(&mut self) -> Result<u32, Error> {
        if self.remaining() < 4 {
            return Err(Error::InvalidPayload("payload truncated"));
        }
        let v = LittleEndian::read_u32(&self.buf[self.at..self.at + 4]);
        self.at += 4;
        Ok(v)
    }

    /// Copy `npoints` worth of ordinates into a fresh shared buffer.
    fn read_ordinates(&mut self, npoints: usize) -> Result<Arc<[f64]>, Error> {
        let count = npoints * self.dims.ndims();
        let byte_len = count * std::mem::size_of::<f64>();
        if self.remaining() < byte_len {
            return Err(Error::InvalidPayload(
                "point count exceeds the remaining payload",
            ));
        }
        let mut ords = vec![0.0f64; count];
        LittleEndian::read_f64_into(&self.buf[self.at..self.at + byte_len], &mut ords);
        self.at += byte_len;
        Ok(Arc::from(ords))
    }

    fn read_point_array(&mut self, npoints: usize) -> Result<PointArray, Error> {
        if npoints == 0 {
            return Ok(PointArray::new(self.dims));
        }
        let buf = self.read_ordinates(npoints)?;
        Ok(PointArray::from_shared(self.dims, buf, 0, npoints))
    }

    fn read_geometry(&mut self) -> Result<Geometry, Error> {
        let type_code = self.read_u32()?;
        let geom_type = GeometryType::from_code(type_code)?;
        let count = self.read_u32()? as usize;

        let mut geom = match geom_type {
            GeometryType::Point => {
                if count > 1 {
                    return Err(Error::InvalidPayload("a point holds at most one vertex"));
                }
                let pa = self.read_point_array(count)?;
                Geometry::point_from_array(self.srid, pa)
                    .map_err(|_| Error::InvalidPayload("malformed point"))?
            }
            GeometryType::LineString => {
                let pa = self.read_point_array(count)?;
                Geometry::line_string(self.srid, pa)
                    .map_err(|_| Error::InvalidPayload("malformed line string"))?
            }
            GeometryType::CircularString => {
                let pa = self.read_point_array(count)?;
                Geometry::circular_string(self.srid, pa)
                    .map_err(|_| Error::InvalidPayload("malformed circular string"))?
            }
            GeometryType::Triangle => {
                let pa = self.read_point_array(count)?;
                Geometry::triangle(self.srid, pa)
                    .map_err(|_| Error::InvalidPayload("malformed triangle"))?
            }
            GeometryType::Polygon => self.read_polygon(count)?,
            _ => self.read_collection(geom_type, count)?,
        };
        if self.geodetic {
            geom.set_geodetic(true);
        }
        Ok(geom)
    }

    fn read_polygon(&mut self, nrings: usize) -> Result<Geometry, Error> {
        if self.remaining() < 4 * nrings {
            return Err(Error::InvalidPayload("ring count exceeds the payload"));
        }
        let mut npoints = Vec::with_capacity(nrings);
        for _ in 0..nrings {
            npoints.push(self.read_u32()? as usize);
        }
        if nrings % 2 == 1 {
            self.read_u32()?; // alignment padding
        }

        // One backing buffer for all rings.
        let total: usize = npoints.iter().sum();
        let buf = self.read_ordinates(total)?;
        let nd = self.dims.ndims();
        let mut rings = Vec::with_capacity(nrings);
        let mut offset = 0;
        for &n in &npoints {
            rings.push(PointArray::from_shared(self.dims, buf.clone(), offset, n));
            offset += n * nd;
        }
        Geometry::polygon(self.srid, self.dims, rings)
            .map_err(|_| Error::InvalidPayload("malformed polygon ring"))
    }

    fn read_collection(
        &mut self,
        geom_type: GeometryType,
        ngeoms: usize,
    ) -> Result<Geometry, Error> {
        let mut coll = Geometry::new(geom_type, self.srid, self.dims);
        if self.geodetic {
            coll.set_geodetic(true);
        }
        for _ in 0..ngeoms {
            if self.remaining() < 8 {
                return Err(Error::InvalidPayload("collection member truncated"));
            }
            let member_code = LittleEndian::read_u32(&self.buf[self.at..self.at + 4]);
            let member_type = GeometryType::from_code(member_code)?;
            if !geom_type.allows_member(member_type) {
                log::error!(
                    "invalid member type {} for collection type {}",
                    member_type,
                    geom_type
                );
                return Err(Error::InvalidPayload(
                    "collection member type not allowed by its parent",
                ));
            }
            let member = self.read_geometry()?;
            coll.add_geom(member)
                .map_err(|_| Error::InvalidPayload("malformed collection member"))?;
        }
        Ok(coll)
    }
}

/// Deserialize a geometry of either format version.
///
/// The produced point arrays share freshly allocated, aligned ordinate
/// buffers and are flagged read-only. If the serialization carried a box it
/// is attached; otherwise one is computed for geometries that warrant it,
/// exactly as the writer would have.
pub fn from_bytes(bytes: &[u8]) -> Result<Geometry, Error> {
    let header = Header::parse(bytes)?;
    let flags = flags_from_byte(header.flags_byte, header.version);

    let xflags = if header.has_extended {
        LittleEndian::read_u64(&bytes[header.extended_offset..header.extended_offset + 8])
    } else {
        0
    };

    let mut reader = Reader {
        buf: bytes,
        at: header.payload_offset,
        dims: flags.dims(),
        geodetic: flags.is_geodetic(),
        srid: header.srid,
    };
    let mut geom = reader.read_geometry()?;
    if reader.remaining() != 0 {
        return Err(Error::InvalidPayload("trailing bytes after the payload"));
    }

    if header.has_extended {
        geom.set_xflags(xflags);
    } else if flags.is_solid() {
        geom.set_solid(true);
    }

    if let Some(bbox) = read_bbox(bytes)? {
        geom.set_bbox(bbox)
            .map_err(|_| Error::InvalidPayload("an empty geometry cannot carry a box"))?;
    } else if needs_bbox(&geom) && !geom.is_empty() && !geom.is_geodetic() {
        if let Some(bbox) = geom.bounding_rect() {
            // Attachment cannot fail: the box was computed from this very
            // geometry.
            let _ = geom.set_bbox(bbox);
        }
    }
    Ok(geom)
}
