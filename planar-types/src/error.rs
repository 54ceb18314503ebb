use crate::{Dims, GeometryType};
use std::fmt;

/// Everything the planar core can fail with.
///
/// Errors always surface as return values; invalid input never corrupts the
/// target of an operation. `NotAvailable` is an expected answer to fast-path
/// requests and is never logged; the other kinds are reported through the
/// `log` facade at the point of failure before being returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A geometry composes components with differing Z/M presence.
    DimensionMismatch { expected: Dims, found: Dims },
    /// A collection received a member of a type it does not accept.
    SubtypeNotAllowed {
        collection: GeometryType,
        member: GeometryType,
    },
    /// A structural rule of the model was violated (open ring, too few
    /// points, operation applied to the wrong variant).
    InvalidGeometry(&'static str),
    /// Serialized bytes failed structural or size validation.
    InvalidPayload(&'static str),
    /// The serialized flags byte declares a version this crate does not
    /// implement.
    UnknownVersion(u8),
    /// A peek or fast-path request cannot be answered without full
    /// deserialization.
    NotAvailable,
    /// An operation received NaN or an infinity where one is not acceptable.
    NumericDomain(&'static str),
    /// The host set the interrupt flag mid-operation.
    Interrupted,
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::SubtypeNotAllowed { collection, member } => {
                write!(
                    f,
                    "{} is not an allowed member of {}",
                    member.name(),
                    collection.name()
                )
            }
            Error::InvalidGeometry(reason) => write!(f, "invalid geometry: {reason}"),
            Error::InvalidPayload(reason) => write!(f, "invalid serialized payload: {reason}"),
            Error::UnknownVersion(bits) => {
                write!(f, "unknown serialization version (flag bits {bits:#04x})")
            }
            Error::NotAvailable => write!(f, "not available without full deserialization"),
            Error::NumericDomain(reason) => write!(f, "numeric domain error: {reason}"),
            Error::Interrupted => write!(f, "operation interrupted by host request"),
        }
    }
}
