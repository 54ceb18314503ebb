//! Serializing a geometry tree into wire bytes.

use crate::flags::{v1_byte, v2_byte};
use crate::header::{pack_srid, write_varlen, HEADER_SIZE};
use byteorder::{ByteOrder, LittleEndian};
use planar::BoundingRect;
use planar_types::{
    interrupt, next_float_down, next_float_up, BoundingBox, Error, Geometry, GeometryData,
    GeometryType,
};

/// Whether a geometry's serialization warrants an embedded bounding box.
///
/// Small geometries whose box is derivable by peeking (a point, a
/// two-vertex line, and their single-entry multi wrappers) skip the header
/// box; everything else gets one.
pub(crate) fn needs_bbox(geom: &Geometry) -> bool {
    match geom.geom_type() {
        GeometryType::Point => false,
        GeometryType::LineString => geom.count_vertices() > 2,
        GeometryType::MultiPoint => geom.geoms().map_or(false, |g| g.len() != 1),
        GeometryType::MultiLineString => {
            geom.geoms()
                .map_or(false, |g| g.len() != 1 || g[0].count_vertices() > 2)
        }
        _ => true,
    }
}

/// The box that will be embedded: the cached one, or a freshly computed one
/// where the geometry warrants it. Geodetic boxes are never computed here;
/// a geodetic geometry is serialized with whatever box the host attached.
fn bbox_for_write(geom: &Geometry) -> Option<BoundingBox> {
    if geom.is_empty() {
        return None;
    }
    if let Some(bbox) = geom.bbox_cached() {
        return Some(*bbox);
    }
    if needs_bbox(geom) && !geom.is_geodetic() {
        return geom.bounding_rect();
    }
    None
}

fn payload_size(geom: &Geometry) -> usize {
    let point_size = geom.dims().ndims() * std::mem::size_of::<f64>();
    match geom.data() {
        GeometryData::Point(pa)
        | GeometryData::LineString(pa)
        | GeometryData::CircularString(pa)
        | GeometryData::Triangle(pa) => 8 + pa.npoints() * point_size,
        GeometryData::Polygon(rings) => {
            let mut size = 8 + 4 * rings.len();
            if rings.len() % 2 == 1 {
                size += 4; // padding to keep ordinates double-aligned
            }
            size + rings.iter().map(|r| r.npoints() * point_size).sum::<usize>()
        }
        GeometryData::Collection(geoms) => {
            8 + geoms.iter().map(payload_size).sum::<usize>()
        }
    }
}

/// The size in bytes this geometry serializes to in its current state: an
/// embedded box is counted only if one is already attached.
pub fn serialized_size(geom: &Geometry) -> usize {
    let mut size = HEADER_SIZE;
    if geom.xflags() != 0 {
        size += 8;
    }
    if let Some(bbox) = geom.bbox_cached() {
        size += 2 * bbox.ndims() * std::mem::size_of::<f32>();
    }
    size + payload_size(geom)
}

fn push_u32(buf: &mut Vec<u8>, value: u32) {
    let mut word = [0u8; 4];
    LittleEndian::write_u32(&mut word, value);
    buf.extend_from_slice(&word);
}

fn push_f64(buf: &mut Vec<u8>, value: f64) {
    let mut word = [0u8; 8];
    LittleEndian::write_f64(&mut word, value);
    buf.extend_from_slice(&word);
}

fn push_f32(buf: &mut Vec<u8>, value: f32) {
    let mut word = [0u8; 4];
    LittleEndian::write_f32(&mut word, value);
    buf.extend_from_slice(&word);
}

/// Write the box ranges, widening every side outward to single precision.
fn write_bbox(buf: &mut Vec<u8>, bbox: &BoundingBox) {
    push_f32(buf, next_float_down(bbox.xmin));
    push_f32(buf, next_float_up(bbox.xmax));
    push_f32(buf, next_float_down(bbox.ymin));
    push_f32(buf, next_float_up(bbox.ymax));
    if bbox.is_geodetic() {
        push_f32(buf, next_float_down(bbox.zmin));
        push_f32(buf, next_float_up(bbox.zmax));
        return;
    }
    if bbox.dims().has_z() {
        push_f32(buf, next_float_down(bbox.zmin));
        push_f32(buf, next_float_up(bbox.zmax));
    }
    if bbox.dims().has_m() {
        push_f32(buf, next_float_down(bbox.mmin));
        push_f32(buf, next_float_up(bbox.mmax));
    }
}

fn write_point_array(
    buf: &mut Vec<u8>,
    geom: &Geometry,
    pa: &planar_types::PointArray,
) -> Result<(), Error> {
    if pa.dims() != geom.dims() {
        return Err(Error::DimensionMismatch {
            expected: geom.dims(),
            found: pa.dims(),
        });
    }
    push_u32(buf, geom.geom_type().code());
    push_u32(buf, pa.npoints() as u32);
    for &ord in pa.ordinates() {
        push_f64(buf, ord);
    }
    Ok(())
}

fn write_payload(buf: &mut Vec<u8>, geom: &Geometry) -> Result<(), Error> {
    match geom.data() {
        GeometryData::Point(pa)
        | GeometryData::LineString(pa)
        | GeometryData::CircularString(pa)
        | GeometryData::Triangle(pa) => write_point_array(buf, geom, pa),
        GeometryData::Polygon(rings) => {
            push_u32(buf, geom.geom_type().code());
            push_u32(buf, rings.len() as u32);
            for ring in rings {
                if ring.dims() != geom.dims() {
                    return Err(Error::DimensionMismatch {
                        expected: geom.dims(),
                        found: ring.dims(),
                    });
                }
                push_u32(buf, ring.npoints() as u32);
            }
            if rings.len() % 2 == 1 {
                push_u32(buf, 0);
            }
            for ring in rings {
                for &ord in ring.ordinates() {
                    push_f64(buf, ord);
                }
            }
            Ok(())
        }
        GeometryData::Collection(geoms) => {
            push_u32(buf, geom.geom_type().code());
            push_u32(buf, geoms.len() as u32);
            for child in geoms {
                interrupt::check()?;
                if child.dims() != geom.dims() {
                    return Err(Error::DimensionMismatch {
                        expected: geom.dims(),
                        found: child.dims(),
                    });
                }
                write_payload(buf, child)?;
            }
            Ok(())
        }
    }
}

fn to_bytes_version(geom: &Geometry, v1: bool) -> Result<Vec<u8>, Error> {
    let bbox = bbox_for_write(geom);
    let xflags = geom.xflags();
    let use_extended = !v1 && xflags != 0;

    let mut expected = HEADER_SIZE + payload_size(geom);
    if use_extended {
        expected += 8;
    }
    if let Some(bbox) = &bbox {
        expected += 2 * bbox.ndims() * std::mem::size_of::<f32>();
    }

    let mut buf = Vec::with_capacity(expected);
    buf.extend_from_slice(&[0u8; 4]); // varlen, patched below
    buf.extend_from_slice(&pack_srid(geom.srid()));
    let byte = if v1 {
        v1_byte(geom.flags(), bbox.is_some())
    } else {
        v2_byte(geom.flags(), bbox.is_some(), use_extended)
    };
    buf.push(byte);

    if use_extended {
        let mut word = [0u8; 8];
        LittleEndian::write_u64(&mut word, xflags);
        buf.extend_from_slice(&word);
    }
    if let Some(bbox) = &bbox {
        write_bbox(&mut buf, bbox);
    }
    write_payload(&mut buf, geom)?;

    debug_assert_eq!(buf.len(), expected);
    let total = buf.len();
    write_varlen(&mut buf, total);
    Ok(buf)
}

/// Serialize in the current (V2) format. A bounding box is computed and
/// embedded for every non-empty geometry that warrants one.
pub fn to_bytes(geom: &Geometry) -> Result<Vec<u8>, Error> {
    to_bytes_version(geom, false)
}

/// Serialize in the legacy (V1) format. Extended-flag bits beyond SOLID
/// cannot be represented and are dropped.
pub fn to_bytes_v1(geom: &Geometry) -> Result<Vec<u8>, Error> {
    to_bytes_version(geom, true)
}
