//! Updates applied directly to serialized buffers: replacing or removing
//! the header box and rewriting the SRID, all without touching the payload.

use crate::flags::{box_ndims, FLAG_BBOX};
use crate::header::{pack_srid, write_varlen, Header, HEADER_SIZE};
use byteorder::{ByteOrder, LittleEndian};
use planar_types::{next_float_down, next_float_up, BoundingBox, Error, Srid};

/// Write a new bounding box into a serialization.
///
/// If the buffer already has room for a box the floats are written in place
/// and the same buffer comes back. Otherwise a fresh buffer is allocated
/// with the box segment spliced in between the header (and any extended
/// word) and the payload, the BBOX flag set and the varlen updated.
///
/// The box dimensionality must match the serialization's.
pub fn set_bbox(bytes: Vec<u8>, bbox: &BoundingBox) -> Result<Vec<u8>, Error> {
    let header = Header::parse(&bytes)?;
    let ndims = box_ndims(header.flags_byte);
    if bbox.ndims() != ndims {
        return Err(Error::DimensionMismatch {
            expected: crate::flags::dims_from_byte(header.flags_byte),
            found: bbox.dims(),
        });
    }
    let box_size = 2 * ndims * std::mem::size_of::<f32>();

    let mut out;
    let bbox_offset;
    if header.flags_byte & FLAG_BBOX != 0 {
        // Room already reserved: overwrite in place.
        out = bytes;
        bbox_offset = header.bbox_offset;
    } else {
        out = Vec::with_capacity(bytes.len() + box_size);
        out.extend_from_slice(&bytes[..header.bbox_offset]);
        out.extend_from_slice(&vec![0u8; box_size]);
        out.extend_from_slice(&bytes[header.bbox_offset..]);
        out[7] |= FLAG_BBOX;
        bbox_offset = header.bbox_offset;
        let total = out.len();
        write_varlen(&mut out, total);
    }

    write_box_floats(&mut out[bbox_offset..bbox_offset + box_size], bbox, ndims);
    Ok(out)
}

/// A fresh serialization with the bounding-box segment removed.
pub fn drop_bbox(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    let header = Header::parse(bytes)?;
    if header.flags_byte & FLAG_BBOX == 0 {
        return Ok(bytes.to_vec());
    }
    let mut out = Vec::with_capacity(bytes.len() - (header.payload_offset - header.bbox_offset));
    out.extend_from_slice(&bytes[..header.bbox_offset]);
    out.extend_from_slice(&bytes[header.payload_offset..]);
    out[7] &= !FLAG_BBOX;
    let total = out.len();
    write_varlen(&mut out, total);
    Ok(out)
}

/// Rewrite the packed SRID in place.
pub fn set_srid_in_place(bytes: &mut [u8], srid: Srid) -> Result<(), Error> {
    if bytes.len() < HEADER_SIZE {
        return Err(Error::InvalidPayload("buffer shorter than the header"));
    }
    bytes[4..7].copy_from_slice(&pack_srid(srid));
    Ok(())
}

/// Serialize the widened box ranges into an existing float region.
fn write_box_floats(region: &mut [u8], bbox: &BoundingBox, ndims: usize) {
    let mut values = [0.0f32; 8];
    values[0] = next_float_down(bbox.xmin);
    values[1] = next_float_up(bbox.xmax);
    values[2] = next_float_down(bbox.ymin);
    values[3] = next_float_up(bbox.ymax);
    let mut at = 4;
    if bbox.is_geodetic() || bbox.dims().has_z() {
        values[at] = next_float_down(bbox.zmin);
        values[at + 1] = next_float_up(bbox.zmax);
        at += 2;
    }
    if bbox.dims().has_m() && !bbox.is_geodetic() {
        values[at] = next_float_down(bbox.mmin);
        values[at + 1] = next_float_up(bbox.mmax);
    }
    for (i, value) in values.iter().enumerate().take(2 * ndims) {
        LittleEndian::write_f32(&mut region[i * 4..i * 4 + 4], *value);
    }
}
