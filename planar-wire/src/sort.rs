//! A total order over serialized geometries.

use crate::peek::bbox;
use planar_types::Error;
use std::cmp::Ordering;

/// Compare two serializations: equal bytes are equal; otherwise order by
/// the Morton key of the bounding-box center, breaking ties by byte order.
///
/// The Morton key clusters nearby geometries together, which is what makes
/// this ordering useful for sorting storage; the byte-wise tie-break keeps
/// the order total.
pub fn cmp(a: &[u8], b: &[u8]) -> Result<Ordering, Error> {
    if a == b {
        return Ok(Ordering::Equal);
    }
    let ka = sort_key(a)?;
    let kb = sort_key(b)?;
    match ka.cmp(&kb) {
        Ordering::Equal => Ok(a.cmp(b)),
        ordering => Ok(ordering),
    }
}

/// Geometries with no box (empty ones) sort before everything else.
fn sort_key(bytes: &[u8]) -> Result<u64, Error> {
    match bbox(bytes) {
        Ok(bbox) => Ok(bbox.sortable_hash()),
        Err(Error::NotAvailable) => Ok(0),
        Err(err) => Err(err),
    }
}
