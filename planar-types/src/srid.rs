use std::fmt;

/// Largest identifier representable in the 21 bits the wire format packs an
/// SRID into, leaving headroom below the raw 2^20-1 ceiling.
const SRID_MAXIMUM: i32 = 999_999;

/// A spatial reference system identifier.
///
/// The value is opaque to the core. On the wire it is packed into 21 bits
/// (see `planar-wire`), so [`Srid::clamp`] restricts out-of-range values
/// before serialization.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Srid(i32);

impl Srid {
    /// The "unknown" sentinel, mapped to zero on the wire.
    pub const UNKNOWN: Srid = Srid(0);

    pub fn new(value: i32) -> Self {
        Srid(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == 0
    }

    /// Force the identifier into the wire-representable range.
    ///
    /// Negative identifiers become [`Srid::UNKNOWN`]; identifiers above the
    /// maximum are pinned to it. Out-of-range input is reported through the
    /// log facade, matching how the host's error sink is notified of
    /// recoverable conditions.
    pub fn clamp(self) -> Srid {
        if self.0 < 0 {
            log::warn!("SRID value {} converted to the unknown SRID", self.0);
            Srid::UNKNOWN
        } else if self.0 > SRID_MAXIMUM {
            log::warn!("SRID value {} converted to maximum {}", self.0, SRID_MAXIMUM);
            Srid(SRID_MAXIMUM)
        } else {
            self
        }
    }
}

impl From<i32> for Srid {
    fn from(value: i32) -> Self {
        Srid(value)
    }
}

impl fmt::Debug for Srid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_unknown() {
            write!(f, "Srid(unknown)")
        } else {
            write!(f, "Srid({})", self.0)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clamp_ranges() {
        assert_eq!(Srid::new(4326).clamp(), Srid::new(4326));
        assert_eq!(Srid::new(-5).clamp(), Srid::UNKNOWN);
        assert_eq!(Srid::new(1_500_000).clamp(), Srid::new(999_999));
        assert_eq!(Srid::UNKNOWN.clamp(), Srid::UNKNOWN);
    }
}
