//! A deterministic 64-bit hash of the geometric content of a
//! serialization.

use crate::header::Header;
use planar_types::Error;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hash `(SRID, type, ordinates)` with 64-bit FNV-1a.
///
/// Flags, version bits, the extended word and any embedded box are all
/// excluded, so V1 and V2 serializations of the same geometry, with or
/// without boxes, hash identically.
pub fn hash(bytes: &[u8]) -> Result<u64, Error> {
    let header = Header::parse(bytes)?;
    let mut h = FNV_OFFSET_BASIS;
    for byte in header.srid.value().to_le_bytes() {
        h = (h ^ u64::from(byte)).wrapping_mul(FNV_PRIME);
    }
    for &byte in &bytes[header.payload_offset..] {
        h = (h ^ u64::from(byte)).wrapping_mul(FNV_PRIME);
    }
    Ok(h)
}
