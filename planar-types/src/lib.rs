//! The `planar-types` crate provides the primitive types of the planar
//! geometry core.
//!
//! # Types
//!
//! - **[`Coord`]**: a coordinate of up to four ordinates (`x`, `y`, `z`, `m`).
//!   Which of `z` and `m` are meaningful is decided by the [`Dims`] of the
//!   containing [`PointArray`], never by the coordinate itself.
//! - **[`PointArray`]**: an ordered run of coordinates of uniform
//!   dimensionality. Storage is either owned or shared with a deserialization
//!   buffer; shared arrays are upgraded to owned copies before any mutation.
//! - **[`BoundingBox`]**: an axis-aligned box matching its geometry's
//!   dimensionality, widened to single precision on serialization.
//! - **[`Geometry`]**: the tagged sum over all geometry variants, carrying
//!   SRID, flags and an optional cached bounding box.
//!
//! Measures, predicates and the spatial index live in the `planar` crate;
//! the binary wire format lives in `planar-wire`.

mod bbox;
mod coord;
mod error;
mod flags;
mod float;
mod geometry;
pub mod interrupt;
mod point_array;
mod srid;

pub use crate::bbox::BoundingBox;
pub use crate::coord::{Coord, Ordinate};
pub use crate::error::Error;
pub use crate::flags::{Dims, Flags};
pub use crate::float::{next_float_down, next_float_up};
pub use crate::geometry::{Geometry, GeometryData, GeometryType, XFLAG_SOLID};
pub use crate::point_array::PointArray;
pub use crate::srid::Srid;
