pub mod area;
pub mod bounding_rect;
pub mod contains;
pub mod distance;
pub mod euclidean_length;
pub mod intersects;
pub mod kernels;
pub mod winding_order;

pub use area::Area;
pub use bounding_rect::BoundingRect;
pub use contains::ContainsPoint;
pub use distance::EuclideanDistance;
pub use euclidean_length::{EuclideanLength, Perimeter};
pub use intersects::Intersects;
pub use winding_order::ForceClockwise;
