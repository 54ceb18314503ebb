#[cfg(any(feature = "approx", test))]
use approx::{AbsDiffEq, RelativeEq};

/// A single coordinate.
///
/// All four ordinate slots are always present in memory; whether `z` and `m`
/// carry meaning is decided by the [`Dims`](crate::Dims) of the containing
/// point array. Unset ordinates default to `0.0` and are never serialized.
///
/// `NaN` and infinite ordinates are legal and are carried through the core
/// unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub m: f64,
}

/// One of the four named ordinate axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ordinate {
    X,
    Y,
    Z,
    M,
}

impl Coord {
    /// A two-dimensional coordinate.
    pub fn xy(x: f64, y: f64) -> Self {
        Coord { x, y, z: 0.0, m: 0.0 }
    }

    /// A three-dimensional coordinate with elevation.
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Coord { x, y, z, m: 0.0 }
    }

    /// A coordinate with a measure but no elevation.
    pub fn xym(x: f64, y: f64, m: f64) -> Self {
        Coord { x, y, z: 0.0, m }
    }

    /// A full four-dimensional coordinate.
    pub fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Coord { x, y, z, m }
    }

    /// Read one named ordinate.
    pub fn get(&self, ordinate: Ordinate) -> f64 {
        match ordinate {
            Ordinate::X => self.x,
            Ordinate::Y => self.y,
            Ordinate::Z => self.z,
            Ordinate::M => self.m,
        }
    }

    /// Write one named ordinate.
    pub fn set(&mut self, ordinate: Ordinate, value: f64) {
        match ordinate {
            Ordinate::X => self.x = value,
            Ordinate::Y => self.y = value,
            Ordinate::Z => self.z = value,
            Ordinate::M => self.m = value,
        }
    }

    /// Planar Euclidean distance to `other`, ignoring `z` and `m`.
    pub fn distance_2d(&self, other: &Coord) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Bit-exact comparison, so that `NaN` ordinates compare equal to
    /// themselves and `-0.0` is distinct from `0.0`.
    pub fn same(&self, other: &Coord) -> bool {
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.z.to_bits() == other.z.to_bits()
            && self.m.to_bits() == other.m.to_bits()
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Coord::xy(x, y)
    }
}

#[cfg(any(feature = "approx", test))]
impl AbsDiffEq for Coord {
    type Epsilon = f64;

    #[inline]
    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.m.abs_diff_eq(&other.m, epsilon)
    }
}

#[cfg(any(feature = "approx", test))]
impl RelativeEq for Coord {
    #[inline]
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.m.relative_eq(&other.m, epsilon, max_relative)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ordinate_get_set() {
        let mut c = Coord::xy(1.0, 2.0);
        c.set(Ordinate::Z, 3.0);
        c.set(Ordinate::M, 4.0);
        assert_eq!(c.get(Ordinate::X), 1.0);
        assert_eq!(c.get(Ordinate::Y), 2.0);
        assert_eq!(c.get(Ordinate::Z), 3.0);
        assert_eq!(c.get(Ordinate::M), 4.0);
    }

    #[test]
    fn same_is_bit_exact() {
        let a = Coord::xy(f64::NAN, 0.0);
        let b = Coord::xy(f64::NAN, 0.0);
        assert!(a.same(&b));
        assert!(a != b);
        assert!(!Coord::xy(0.0, 0.0).same(&Coord::xy(-0.0, 0.0)));
    }

    #[test]
    fn distance_2d_ignores_zm() {
        let a = Coord::xyzm(0.0, 0.0, 100.0, 7.0);
        let b = Coord::xyzm(3.0, 4.0, -100.0, 9.0);
        assert_eq!(a.distance_2d(&b), 5.0);
    }
}
