//! The wire flags byte, in both versions, and the extended-flags word.
//!
//! V1 (`VVSRGBMZ`, low bit first): Z, M, BBOX, GEODETIC, READONLY, SOLID,
//! version bits zero. V2 keeps the low nibble, turns bit 4 into EXTENDED,
//! reserves bit 5, and sets bit 6 as the version mark. Bits that V2 moved
//! out of the byte live in the 8-byte extended word instead; everything
//! reserved must survive a round trip untouched.

use planar_types::{Dims, Error, Flags};

pub(crate) const FLAG_Z: u8 = 0x01;
pub(crate) const FLAG_M: u8 = 0x02;
pub(crate) const FLAG_BBOX: u8 = 0x04;
pub(crate) const FLAG_GEODETIC: u8 = 0x08;

pub(crate) const V1_READONLY: u8 = 0x10;
pub(crate) const V1_SOLID: u8 = 0x20;

pub(crate) const V2_EXTENDED: u8 = 0x10;
pub(crate) const V2_VERSION: u8 = 0x40;

const VERSION_MASK: u8 = 0xC0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Version {
    V1,
    V2,
}

/// Decode the version bits, rejecting layouts this crate does not know.
pub(crate) fn version_of(byte: u8) -> Result<Version, Error> {
    match byte & VERSION_MASK {
        0x00 => Ok(Version::V1),
        V2_VERSION => Ok(Version::V2),
        _ => {
            log::error!("unknown serialization version in flags byte {byte:#04x}");
            Err(Error::UnknownVersion(byte >> 6))
        }
    }
}

/// The V1 byte for a geometry's in-memory flags. The in-memory layout
/// matches V1 over the low six bits, except that READONLY is a storage
/// artifact and is never written.
pub(crate) fn v1_byte(flags: Flags, has_bbox: bool) -> u8 {
    let mut byte = flags.bits() & (FLAG_Z | FLAG_M | FLAG_GEODETIC | V1_SOLID);
    if has_bbox {
        byte |= FLAG_BBOX;
    }
    byte
}

/// The V2 byte. Solid state moves to the extended word.
pub(crate) fn v2_byte(flags: Flags, has_bbox: bool, has_extended: bool) -> u8 {
    let mut byte = flags.bits() & (FLAG_Z | FLAG_M | FLAG_GEODETIC);
    if has_bbox {
        byte |= FLAG_BBOX;
    }
    if has_extended {
        byte |= V2_EXTENDED;
    }
    byte | V2_VERSION
}

/// In-memory flags from a wire byte of either version. READONLY is never
/// trusted from the wire; V2 solid state arrives via the extended word.
pub(crate) fn flags_from_byte(byte: u8, version: Version) -> Flags {
    let mask = match version {
        Version::V1 => FLAG_Z | FLAG_M | FLAG_BBOX | FLAG_GEODETIC | V1_SOLID,
        Version::V2 => FLAG_Z | FLAG_M | FLAG_BBOX | FLAG_GEODETIC,
    };
    Flags::from_bits(byte & mask)
}

pub(crate) fn byte_has_extended(byte: u8, version: Version) -> bool {
    version == Version::V2 && byte & V2_EXTENDED != 0
}

pub(crate) fn dims_from_byte(byte: u8) -> Dims {
    Dims::new(byte & FLAG_Z != 0, byte & FLAG_M != 0)
}

/// Number of serialized box ranges for a flags byte: a geodetic box is a
/// geocentric XYZ cap, otherwise one range per ordinate.
pub(crate) fn box_ndims(byte: u8) -> usize {
    if byte & FLAG_GEODETIC != 0 {
        3
    } else {
        dims_from_byte(byte).ndims()
    }
}
