//! The `planar` crate provides the measures, predicates and the spatial
//! index of the planar geometry core.
//!
//! The geometry model is re-exported from [`planar_types`].
//!
//! # Algorithms
//!
//! - **[`Area`](algorithm::Area)**: planar area of areal geometries
//! - **[`EuclideanLength`](algorithm::EuclideanLength)**: length of linear
//!   geometries, circular arcs measured along the arc
//! - **[`Perimeter`](algorithm::Perimeter)**: boundary length of areal
//!   geometries
//! - **[`BoundingRect`](algorithm::BoundingRect)**: the minimum axis-aligned
//!   box of a geometry, arc-aware
//! - **[`ForceClockwise`](algorithm::ForceClockwise)**: ring orientation
//!   normalization (exterior clockwise, holes counter-clockwise)
//! - **[`ContainsPoint`](algorithm::ContainsPoint)**,
//!   **[`Intersects`](algorithm::Intersects)**,
//!   **[`EuclideanDistance`](algorithm::EuclideanDistance)**: the predicate
//!   and measure front-ends over the rectangle-tree index
//!
//! # Index
//!
//! [`RectTree`](index::RectTree) is a bounding-rectangle tree over the
//! primitive edges of one geometry: points, straight segments and circular
//! arcs under a single node layout. It answers point containment, pairwise
//! intersection and pairwise minimum distance, pruning on rectangle
//! relationships at every level.

pub use planar_types::{
    interrupt, BoundingBox, Coord, Dims, Error, Flags, Geometry, GeometryData, GeometryType,
    Ordinate, PointArray, Srid,
};

pub mod algorithm;
pub mod index;

pub use crate::algorithm::area::Area;
pub use crate::algorithm::bounding_rect::BoundingRect;
pub use crate::algorithm::contains::ContainsPoint;
pub use crate::algorithm::distance::EuclideanDistance;
pub use crate::algorithm::euclidean_length::{EuclideanLength, Perimeter};
pub use crate::algorithm::intersects::Intersects;
pub use crate::algorithm::winding_order::ForceClockwise;
pub use crate::index::RectTree;
