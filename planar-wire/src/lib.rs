//! The `planar-wire` crate is the binary serialization of the planar
//! geometry core: a self-describing, variant-tagged format that round-trips
//! geometries losslessly under every dimensionality, with an optional
//! single-precision bounding box in the header for index filtering.
//!
//! # Layout
//!
//! ```text
//! offset  size  field
//! 0       4     varlen        total size << 2, little-endian
//! 4       3     SRID          21-bit signed, packed big-endian
//! 7       1     flags byte    dimensionality, bbox, geodetic, version
//! 8       8     extended      optional (V2, EXTENDED flag): u64 flags word
//! ·       4·N   bbox          optional (BBOX flag): f32 low,high per axis
//! ·       …     payload       recursive little-endian type/count/ordinates
//! ```
//!
//! Two versions share this front matter and are told apart by the version
//! bits of the flags byte: the legacy V1 layout packs solid/read-only state
//! into the flags byte, while V2 moves per-feature bits into the extended
//! word. The writer emits V2 (V1 is kept for compatibility); the reader
//! accepts both and produces identical geometries from identical vertex
//! data.
//!
//! Header, box and extended segments are sized in multiples of eight minus
//! the 4+3+1 front matter, so ordinates always land 8-aligned and can be
//! read directly as `f64`.
//!
//! # Peeking
//!
//! The [`peek_type`], [`peek_srid`], [`peek_bbox`], [`peek_first_point`]
//! and [`is_empty`] family answers questions about a serialized geometry
//! without deserializing it, which is what makes stored blobs directly
//! index-scannable.

mod flags;
mod hash;
mod header;
mod patch;
mod peek;
mod read;
mod sort;
mod write;

pub use crate::hash::hash;
pub use crate::header::max_header_size;
pub use crate::patch::{drop_bbox, set_bbox, set_srid_in_place};
pub use crate::peek::{
    bbox, has_bbox, has_extended, is_empty, peek_bbox, peek_first_point, peek_flags, peek_ndims,
    peek_srid, peek_type, read_bbox,
};
pub use crate::read::from_bytes;
pub use crate::sort::cmp;
pub use crate::write::{serialized_size, to_bytes, to_bytes_v1};
