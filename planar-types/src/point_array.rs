use crate::{BoundingBox, Coord, Dims, Ordinate};
use std::sync::Arc;

/// An ordered run of coordinates of uniform dimensionality.
///
/// Ordinates are stored packed (`x y [z] [m] x y …`). Storage is either
/// owned or a read-only window into a buffer shared with other arrays
/// (typically the product of deserialization). Shared storage is upgraded
/// to an owned copy before any mutation, and the reference count keeps the
/// backing buffer alive for as long as any borrower needs it.
#[derive(Clone, Debug)]
pub struct PointArray {
    dims: Dims,
    storage: Storage,
}

#[derive(Clone, Debug)]
enum Storage {
    Owned(Vec<f64>),
    Shared {
        buf: Arc<[f64]>,
        start: usize,
        len: usize,
    },
}

impl PointArray {
    /// An empty array with owned storage.
    pub fn new(dims: Dims) -> Self {
        PointArray {
            dims,
            storage: Storage::Owned(Vec::new()),
        }
    }

    pub fn with_capacity(dims: Dims, npoints: usize) -> Self {
        PointArray {
            dims,
            storage: Storage::Owned(Vec::with_capacity(npoints * dims.ndims())),
        }
    }

    /// Build from coordinates; only the ordinates named by `dims` are kept.
    pub fn from_coords(dims: Dims, coords: &[Coord]) -> Self {
        let mut pa = PointArray::with_capacity(dims, coords.len());
        for &c in coords {
            pa.push(c);
        }
        pa
    }

    /// An array over a window of a shared ordinate buffer. `start` is an
    /// ordinate offset; the window covers `npoints * dims.ndims()` values.
    ///
    /// The resulting array reports [`PointArray::is_read_only`] until a
    /// mutation upgrades it to owned storage.
    pub fn from_shared(dims: Dims, buf: Arc<[f64]>, start: usize, npoints: usize) -> Self {
        let len = npoints * dims.ndims();
        debug_assert!(start + len <= buf.len());
        PointArray {
            dims,
            storage: Storage::Shared { buf, start, len },
        }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn npoints(&self) -> usize {
        self.ordinates().len() / self.dims.ndims()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinates().is_empty()
    }

    /// Whether the ordinates live in a shared (deserialization) buffer.
    pub fn is_read_only(&self) -> bool {
        matches!(self.storage, Storage::Shared { .. })
    }

    /// The packed ordinate slice.
    pub fn ordinates(&self) -> &[f64] {
        match &self.storage {
            Storage::Owned(v) => v,
            Storage::Shared { buf, start, len } => &buf[*start..*start + *len],
        }
    }

    /// Read point `i`. Absent ordinates come back as `0.0`.
    pub fn coord(&self, i: usize) -> Coord {
        let nd = self.dims.ndims();
        let ords = &self.ordinates()[i * nd..(i + 1) * nd];
        let mut c = Coord::xy(ords[0], ords[1]);
        let mut at = 2;
        if self.dims.has_z() {
            c.z = ords[at];
            at += 1;
        }
        if self.dims.has_m() {
            c.m = ords[at];
        }
        c
    }

    /// Read just the planar ordinates of point `i`.
    pub fn xy(&self, i: usize) -> (f64, f64) {
        let nd = self.dims.ndims();
        let ords = self.ordinates();
        (ords[i * nd], ords[i * nd + 1])
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.npoints()).map(move |i| self.coord(i))
    }

    /// Append a coordinate, upgrading shared storage first.
    pub fn push(&mut self, c: Coord) {
        let dims = self.dims;
        let v = self.owned_mut();
        v.push(c.x);
        v.push(c.y);
        if dims.has_z() {
            v.push(c.z);
        }
        if dims.has_m() {
            v.push(c.m);
        }
    }

    /// Overwrite point `i`, upgrading shared storage first.
    pub fn set_coord(&mut self, i: usize, c: Coord) {
        let dims = self.dims;
        let nd = dims.ndims();
        let v = self.owned_mut();
        v[i * nd] = c.x;
        v[i * nd + 1] = c.y;
        let mut at = i * nd + 2;
        if dims.has_z() {
            v[at] = c.z;
            at += 1;
        }
        if dims.has_m() {
            v[at] = c.m;
        }
    }

    /// True when the first and last points coincide in the plane.
    pub fn is_closed(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        let (x0, y0) = self.xy(0);
        let (xn, yn) = self.xy(self.npoints() - 1);
        x0 == xn && y0 == yn
    }

    /// Reverse point order in place.
    pub fn reverse(&mut self) {
        let nd = self.dims.ndims();
        let v = self.owned_mut();
        let n = v.len() / nd;
        for i in 0..n / 2 {
            for k in 0..nd {
                v.swap(i * nd + k, (n - 1 - i) * nd + k);
            }
        }
    }

    /// Swap two named ordinates over every point. The caller has verified
    /// both ordinates are present.
    pub fn swap_ordinates(&mut self, a: Ordinate, b: Ordinate) {
        let dims = self.dims;
        let ia = ordinate_index(dims, a);
        let ib = ordinate_index(dims, b);
        let nd = dims.ndims();
        let v = self.owned_mut();
        for p in v.chunks_exact_mut(nd) {
            p.swap(ia, ib);
        }
    }

    /// Multiply every ordinate by the matching factor component.
    pub fn scale(&mut self, factor: Coord) {
        let dims = self.dims;
        let nd = dims.ndims();
        let v = self.owned_mut();
        for p in v.chunks_exact_mut(nd) {
            p[0] *= factor.x;
            p[1] *= factor.y;
            let mut at = 2;
            if dims.has_z() {
                p[at] *= factor.z;
                at += 1;
            }
            if dims.has_m() {
                p[at] *= factor.m;
            }
        }
    }

    /// Copy shared storage into an owned buffer; no-op when already owned.
    pub fn make_owned(&mut self) {
        if let Storage::Shared { .. } = self.storage {
            self.storage = Storage::Owned(self.ordinates().to_vec());
        }
    }

    /// The smallest box covering every point, or `None` when empty.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        if self.is_empty() {
            return None;
        }
        let mut b = BoundingBox::from_coord(self.coord(0), self.dims);
        for c in self.iter().skip(1) {
            b.expand_to_include(c);
        }
        Some(b)
    }

    /// Bit-exact structural equality: same dimensionality, same ordinates.
    pub fn same(&self, other: &PointArray) -> bool {
        if self.dims != other.dims {
            return false;
        }
        let a = self.ordinates();
        let b = other.ordinates();
        a.len() == b.len()
            && a.iter()
                .zip(b.iter())
                .all(|(x, y)| x.to_bits() == y.to_bits())
    }

    fn owned_mut(&mut self) -> &mut Vec<f64> {
        self.make_owned();
        match &mut self.storage {
            Storage::Owned(v) => v,
            Storage::Shared { .. } => unreachable!("storage was just made owned"),
        }
    }
}

fn ordinate_index(dims: Dims, o: Ordinate) -> usize {
    match o {
        Ordinate::X => 0,
        Ordinate::Y => 1,
        Ordinate::Z => 2,
        Ordinate::M => {
            if dims.has_z() {
                3
            } else {
                2
            }
        }
    }
}
