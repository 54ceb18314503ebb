//! Questions answered without deserializing: type, SRID, flags, emptiness,
//! and, for shapes simple enough, the bounding box and first coordinate.

use crate::flags::{box_ndims, dims_from_byte, flags_from_byte, FLAG_BBOX};
use crate::header::Header;
use crate::read::from_bytes;
use byteorder::{ByteOrder, LittleEndian};
use planar::BoundingRect;
use planar_types::{BoundingBox, Coord, Dims, Error, Flags, GeometryType, Srid};

pub fn peek_type(bytes: &[u8]) -> Result<GeometryType, Error> {
    let header = Header::parse(bytes)?;
    let code = read_payload_u32(bytes, header.payload_offset, 0)?;
    GeometryType::from_code(code)
}

pub fn peek_srid(bytes: &[u8]) -> Result<Srid, Error> {
    Ok(Header::parse(bytes)?.srid)
}

/// The in-memory flags a deserialization would produce (V2 solid state is
/// pulled from the extended word).
pub fn peek_flags(bytes: &[u8]) -> Result<Flags, Error> {
    let header = Header::parse(bytes)?;
    let mut flags = flags_from_byte(header.flags_byte, header.version);
    if header.has_extended {
        let word =
            LittleEndian::read_u64(&bytes[header.extended_offset..header.extended_offset + 8]);
        flags.set_solid(word & planar_types::XFLAG_SOLID != 0);
    }
    Ok(flags)
}

pub fn peek_ndims(bytes: &[u8]) -> Result<usize, Error> {
    let header = Header::parse(bytes)?;
    Ok(dims_from_byte(header.flags_byte).ndims())
}

pub fn has_bbox(bytes: &[u8]) -> Result<bool, Error> {
    let header = Header::parse(bytes)?;
    Ok(header.flags_byte & FLAG_BBOX != 0)
}

pub fn has_extended(bytes: &[u8]) -> Result<bool, Error> {
    Ok(Header::parse(bytes)?.has_extended)
}

/// Recursively true iff every reachable primitive holds zero points. Only
/// the leading counts are read, so the walk touches a few bytes per level.
pub fn is_empty(bytes: &[u8]) -> Result<bool, Error> {
    let header = Header::parse(bytes)?;
    Ok(is_empty_recurse(bytes, header.payload_offset)?.1)
}

/// Returns `(consumed, empty)`. The consumed size is only exact while
/// everything seen so far is empty, which is all the caller relies on: a
/// non-empty primitive ends the walk immediately.
fn is_empty_recurse(bytes: &[u8], at: usize) -> Result<(usize, bool), Error> {
    let type_code = read_payload_u32(bytes, at, 0)?;
    let count = read_payload_u32(bytes, at, 1)? as usize;
    let geom_type = GeometryType::from_code(type_code)?;
    if geom_type.is_collection() {
        let mut consumed = 8;
        for _ in 0..count {
            let (sub, empty) = is_empty_recurse(bytes, at + consumed)?;
            consumed += sub;
            if !empty {
                return Ok((consumed, false));
            }
        }
        Ok((consumed, true))
    } else {
        Ok((8, count == 0))
    }
}

/// The embedded bounding box, if the serialization carries one.
pub fn read_bbox(bytes: &[u8]) -> Result<Option<BoundingBox>, Error> {
    let header = Header::parse(bytes)?;
    if header.flags_byte & FLAG_BBOX == 0 {
        return Ok(None);
    }
    let geodetic = flags_from_byte(header.flags_byte, header.version).is_geodetic();
    let dims = dims_from_byte(header.flags_byte);
    let ndims = box_ndims(header.flags_byte);
    let mut ranges = [0.0f64; 4 * 2];
    for (i, range) in ranges.iter_mut().enumerate().take(2 * ndims) {
        let at = header.bbox_offset + i * 4;
        *range = f64::from(LittleEndian::read_f32(&bytes[at..at + 4]));
    }
    let mut bbox = BoundingBox::new(dims, geodetic);
    bbox.xmin = ranges[0];
    bbox.xmax = ranges[1];
    bbox.ymin = ranges[2];
    bbox.ymax = ranges[3];
    let mut at = 4;
    if geodetic || dims.has_z() {
        bbox.zmin = ranges[at];
        bbox.zmax = ranges[at + 1];
        at += 2;
    }
    if dims.has_m() && !geodetic {
        bbox.mmin = ranges[at];
        bbox.mmax = ranges[at + 1];
    }
    Ok(Some(bbox))
}

/// The box of the serialization without touching the whole payload: the
/// embedded box when present, otherwise derived for the four shapes whose
/// box a few header-adjacent reads determine: a single point, a two-vertex
/// line, and their single-entry multi wrappers. Anything else is
/// `NotAvailable`.
pub fn peek_bbox(bytes: &[u8]) -> Result<BoundingBox, Error> {
    if let Some(bbox) = read_bbox(bytes)? {
        return Ok(bbox);
    }
    let header = Header::parse(bytes)?;
    let flags = flags_from_byte(header.flags_byte, header.version);
    if flags.is_geodetic() {
        // A geodetic box is geocentric; nothing cheap to derive.
        return Err(Error::NotAvailable);
    }
    let dims = flags.dims();
    let base = header.payload_offset;
    let geom_type = GeometryType::from_code(read_payload_u32(bytes, base, 0)?)?;
    let (first, npoints) = match geom_type {
        GeometryType::Point => (base + 8, match read_payload_u32(bytes, base, 1)? {
            0 => return Err(Error::NotAvailable),
            _ => 1,
        }),
        GeometryType::LineString => {
            let n = read_payload_u32(bytes, base, 1)?;
            if n != 2 {
                return Err(Error::NotAvailable);
            }
            (base + 8, 2)
        }
        GeometryType::MultiPoint => {
            if read_payload_u32(bytes, base, 1)? != 1 {
                return Err(Error::NotAvailable);
            }
            // A single, possibly empty point follows.
            if read_payload_u32(bytes, base, 3)? != 1 {
                return Err(Error::NotAvailable);
            }
            (base + 16, 1)
        }
        GeometryType::MultiLineString => {
            if read_payload_u32(bytes, base, 1)? != 1 {
                return Err(Error::NotAvailable);
            }
            if read_payload_u32(bytes, base, 3)? != 2 {
                return Err(Error::NotAvailable);
            }
            (base + 16, 2)
        }
        _ => return Err(Error::NotAvailable),
    };

    let mut bbox = BoundingBox::from_coord(read_coord(bytes, first, dims)?, dims);
    for i in 1..npoints {
        let at = first + i * dims.ndims() * 8;
        bbox.expand_to_include(read_coord(bytes, at, dims)?);
    }
    bbox.widen();
    Ok(bbox)
}

/// The box, falling back to full deserialization and computation when no
/// cheap answer exists. Empty geometries have no box.
pub fn bbox(bytes: &[u8]) -> Result<BoundingBox, Error> {
    match peek_bbox(bytes) {
        Err(Error::NotAvailable) => {}
        other => return other,
    }
    let geom = from_bytes(bytes)?;
    match geom.bounding_rect() {
        Some(mut bbox) => {
            bbox.widen();
            Ok(bbox)
        }
        None => Err(Error::NotAvailable),
    }
}

/// The first coordinate of a point geometry, without materializing it.
pub fn peek_first_point(bytes: &[u8]) -> Result<Coord, Error> {
    let header = Header::parse(bytes)?;
    let base = header.payload_offset;
    let geom_type = GeometryType::from_code(read_payload_u32(bytes, base, 0)?)?;
    if geom_type != GeometryType::Point {
        return Err(Error::NotAvailable);
    }
    if read_payload_u32(bytes, base, 1)? == 0 {
        return Err(Error::NotAvailable);
    }
    read_coord(bytes, base + 8, dims_from_byte(header.flags_byte))
}

fn read_payload_u32(bytes: &[u8], base: usize, index: usize) -> Result<u32, Error> {
    let at = base + 4 * index;
    if bytes.len() < at + 4 {
        return Err(Error::InvalidPayload("payload truncated"));
    }
    Ok(LittleEndian::read_u32(&bytes[at..at + 4]))
}

fn read_coord(bytes: &[u8], at: usize, dims: Dims) -> Result<Coord, Error> {
    let nd = dims.ndims();
    if bytes.len() < at + nd * 8 {
        return Err(Error::InvalidPayload("payload truncated"));
    }
    let mut ords = [0.0f64; 4];
    for (i, ord) in ords.iter_mut().enumerate().take(nd) {
        *ord = LittleEndian::read_f64(&bytes[at + i * 8..at + i * 8 + 8]);
    }
    let mut c = Coord::xy(ords[0], ords[1]);
    let mut i = 2;
    if dims.has_z() {
        c.z = ords[i];
        i += 1;
    }
    if dims.has_m() {
        c.m = ords[i];
    }
    Ok(c)
}
