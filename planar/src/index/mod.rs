//! A bounding-rectangle tree over the primitive edges of one geometry.
//!
//! Every leaf references a single primitive edge (a point, a straight segment
//! between two consecutive vertices, or a circular arc through three) by
//! point array and segment number. Internal nodes hold up to eight
//! children, a ring tag for area reasoning, and the source geometry type
//! for dispatch. Leaves come out of a point array in vertex order, which is
//! already spatially coherent; subtrees of collections are ordered along a
//! Morton curve before merging so tree edges join spatially adjacent
//! subtrees.
//!
//! The tree answers three queries: point containment (horizontal ray
//! crossing count over ring tags), pairwise intersection (synchronized
//! descent pruning disjoint rectangles, with a full-containment shortcut
//! for areas), and pairwise minimum distance (best-first descent bounded by
//! rectangle min/max distances).

use crate::algorithm::distance::{
    dist_arc_arc, dist_pt_arc, dist_pt_pt, dist_pt_seg, dist_seg_arc, dist_seg_seg, with_swapped,
    DistState, DistanceMode,
};
use crate::algorithm::kernels::arc::{arc_bounding_rect, arc_center, arc_side};
use crate::algorithm::kernels::{point_in_segment_bounds, segment_side, segments_intersect};
use planar_types::{interrupt, BoundingBox, Coord, Error, Geometry, GeometryData, GeometryType, PointArray};

/// Fixed fan-out of internal nodes.
const NODE_SIZE: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SegType {
    Point,
    Linear,
    Circular,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RingKind {
    None,
    Exterior,
    Interior,
}

struct Leaf<'a> {
    pa: &'a PointArray,
    seg_num: usize,
    seg_type: SegType,
}

struct Internal<'a> {
    nodes: Vec<Node<'a>>,
    ring: RingKind,
    sorted: bool,
}

enum Kind<'a> {
    Leaf(Leaf<'a>),
    Internal(Internal<'a>),
}

struct Node<'a> {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
    geom_type: GeometryType,
    // Center-distance key used by the lazy child sort during distance
    // descent.
    d: f64,
    kind: Kind<'a>,
}

/// The index over one geometry's edges. Borrows the geometry's point
/// arrays for the lifetime of the tree.
pub struct RectTree<'a> {
    root: Node<'a>,
}

impl<'a> RectTree<'a> {
    /// Build the tree. Empty geometries have no edges and produce `None`.
    /// Construction polls the interrupt flag between merge passes.
    pub fn build(geom: &'a Geometry) -> Result<Option<RectTree<'a>>, Error> {
        Ok(node_from_geometry(geom)?.map(|root| RectTree { root }))
    }

    /// The planar bounds of the whole tree.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_xy_ranges(self.root.xmin, self.root.xmax, self.root.ymin, self.root.ymax)
    }

    /// Whether the indexed geometry contains `pt` (boundary included).
    /// Only areal geometries can contain a point.
    pub fn contains_point(&self, pt: Coord) -> bool {
        node_contains_point(&self.root, &pt)
    }

    /// Whether the two indexed geometries share at least one point.
    pub fn intersects(&self, other: &RectTree<'_>) -> bool {
        // An area can swallow the other geometry whole without any edges
        // crossing, so test a sample point against each areal side first.
        if node_is_area(&self.root) && node_contains_point(&self.root, &node_sample_point(&other.root))
        {
            return true;
        }
        if node_is_area(&other.root) && node_contains_point(&other.root, &node_sample_point(&self.root))
        {
            return true;
        }
        intersects_recursive(&self.root, &other.root)
    }

    /// Minimum distance between the two indexed geometries.
    ///
    /// `threshold` stops the search as soon as a pair closer than it is
    /// found; pass `0.0` for the exact minimum. The descent lazily sorts
    /// each node's children by proximity to the partner node and prunes
    /// child pairs whose rectangles cannot beat the best upper bound.
    pub fn min_distance(
        &mut self,
        other: &mut RectTree<'_>,
        threshold: f64,
    ) -> Result<f64, Error> {
        if node_is_area(&self.root)
            && node_contains_point(&self.root, &node_sample_point(&other.root))
        {
            return Ok(0.0);
        }
        if node_is_area(&other.root)
            && node_contains_point(&other.root, &node_sample_point(&self.root))
        {
            return Ok(0.0);
        }
        let mut state = TreeDistanceState {
            threshold,
            min_dist: f64::MAX,
            max_dist: f64::MAX,
            p1: Coord::default(),
            p2: Coord::default(),
            ticks: 0,
        };
        distance_recursive(&mut self.root, &mut other.root, &mut state)?;
        Ok(state.min_dist)
    }
}

fn seg_type_for(geom_type: GeometryType) -> SegType {
    use GeometryType::*;
    match geom_type {
        Point | MultiPoint => SegType::Point,
        CircularString => SegType::Circular,
        _ => SegType::Linear,
    }
}

/// One leaf per edge. Zero-length edges get no node.
fn leaf_new<'a>(pa: &'a PointArray, seg_num: usize, geom_type: GeometryType) -> Option<Node<'a>> {
    let seg_type = seg_type_for(geom_type);
    let (xmin, ymin, xmax, ymax) = match seg_type {
        SegType::Point => {
            let (x, y) = pa.xy(seg_num);
            (x, y, x, y)
        }
        SegType::Linear => {
            let (x1, y1) = pa.xy(seg_num);
            let (x2, y2) = pa.xy(seg_num + 1);
            if x1 == x2 && y1 == y2 {
                return None;
            }
            (x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
        }
        SegType::Circular => {
            let p1 = pa.coord(2 * seg_num);
            let p2 = pa.coord(2 * seg_num + 1);
            let p3 = pa.coord(2 * seg_num + 2);
            if p1.x == p2.x && p2.x == p3.x && p1.y == p2.y && p2.y == p3.y {
                return None;
            }
            arc_bounding_rect(&p1, &p2, &p3)
        }
    };
    Some(Node {
        xmin,
        ymin,
        xmax,
        ymax,
        geom_type,
        d: 0.0,
        kind: Kind::Leaf(Leaf {
            pa,
            seg_num,
            seg_type,
        }),
    })
}

fn internal_from_seed<'a>(seed: &Node<'a>) -> Node<'a> {
    Node {
        xmin: seed.xmin,
        ymin: seed.ymin,
        xmax: seed.xmax,
        ymax: seed.ymax,
        geom_type: seed.geom_type,
        d: 0.0,
        kind: Kind::Internal(Internal {
            nodes: Vec::with_capacity(NODE_SIZE),
            ring: RingKind::None,
            sorted: false,
        }),
    }
}

fn internal_add<'a>(parent: &mut Node<'a>, child: Node<'a>) {
    parent.xmin = parent.xmin.min(child.xmin);
    parent.ymin = parent.ymin.min(child.ymin);
    parent.xmax = parent.xmax.max(child.xmax);
    parent.ymax = parent.ymax.max(child.ymax);
    match &mut parent.kind {
        Kind::Internal(i) => i.nodes.push(child),
        Kind::Leaf(_) => unreachable!("cannot add children to a leaf"),
    }
}

/// Merge an ordered node list pairwise up into a single root, eight
/// children at a time. Ordering is preserved so spatial adjacency is
/// retained.
fn merge_nodes(mut nodes: Vec<Node<'_>>) -> Result<Option<Node<'_>>, Error> {
    if nodes.is_empty() {
        return Ok(None);
    }
    while nodes.len() > 1 {
        interrupt::check()?;
        let mut next = Vec::with_capacity(nodes.len() / NODE_SIZE + 1);
        let mut current: Option<Node> = None;
        for node in nodes {
            let mut parent = match current.take() {
                Some(parent) => parent,
                None => internal_from_seed(&node),
            };
            internal_add(&mut parent, node);
            let full = match &parent.kind {
                Kind::Internal(i) => i.nodes.len() == NODE_SIZE,
                Kind::Leaf(_) => false,
            };
            if full {
                next.push(parent);
            } else {
                current = Some(parent);
            }
        }
        if let Some(parent) = current {
            next.push(parent);
        }
        nodes = next;
    }
    Ok(nodes.pop())
}

/// A flat leaf list from one point array, merged into a subtree.
fn node_from_point_array<'a>(
    pa: &'a PointArray,
    geom_type: GeometryType,
) -> Result<Option<Node<'a>>, Error> {
    if pa.is_empty() {
        return Ok(None);
    }
    let num_edges = match seg_type_for(geom_type) {
        SegType::Point => return Ok(leaf_new(pa, 0, geom_type)),
        SegType::Linear => pa.npoints().saturating_sub(1),
        SegType::Circular => pa.npoints().saturating_sub(1) / 2,
    };
    let mut leaves = Vec::with_capacity(num_edges);
    for i in 0..num_edges {
        if let Some(leaf) = leaf_new(pa, i, geom_type) {
            leaves.push(leaf);
        }
    }
    merge_nodes(leaves)
}

/// Wrap a leaf in an internal node so it can carry a ring tag. A ring made
/// of a single closed arc arrives as a bare leaf.
fn ensure_internal(node: Node<'_>) -> Node<'_> {
    match node.kind {
        Kind::Internal(_) => node,
        Kind::Leaf(_) => {
            let mut parent = internal_from_seed(&node);
            internal_add(&mut parent, node);
            parent
        }
    }
}

fn set_ring(node: &mut Node<'_>, ring: RingKind) {
    if let Kind::Internal(i) = &mut node.kind {
        i.ring = ring;
    }
}

fn node_from_geometry(geom: &Geometry) -> Result<Option<Node<'_>>, Error> {
    let geom_type = geom.geom_type();
    match geom.data() {
        GeometryData::Point(pa)
        | GeometryData::LineString(pa)
        | GeometryData::CircularString(pa) => node_from_point_array(pa, geom_type),
        GeometryData::Triangle(pa) => {
            let Some(node) = node_from_point_array(pa, geom_type)? else {
                return Ok(None);
            };
            let mut node = ensure_internal(node);
            set_ring(&mut node, RingKind::Exterior);
            Ok(Some(node))
        }
        GeometryData::Polygon(rings) => {
            let mut nodes = Vec::with_capacity(rings.len());
            for (i, ring) in rings.iter().enumerate() {
                if let Some(node) = node_from_point_array(ring, geom_type)? {
                    let mut node = ensure_internal(node);
                    set_ring(
                        &mut node,
                        if i == 0 {
                            RingKind::Exterior
                        } else {
                            RingKind::Interior
                        },
                    );
                    nodes.push(node);
                }
            }
            finish_merge(nodes, geom_type)
        }
        GeometryData::Collection(geoms) => {
            let mut nodes = Vec::with_capacity(geoms.len());
            for (i, child) in geoms.iter().enumerate() {
                if let Some(node) = node_from_geometry(child)? {
                    // Curve polygon members are its rings and need tags for
                    // the area tests.
                    if geom_type == GeometryType::CurvePolygon {
                        let mut node = ensure_internal(node);
                        set_ring(
                            &mut node,
                            if i == 0 {
                                RingKind::Exterior
                            } else {
                                RingKind::Interior
                            },
                        );
                        nodes.push(node);
                    } else {
                        nodes.push(node);
                    }
                }
            }
            // Order sibling subtrees along a Morton curve so the merge
            // joins spatially nearby subtrees. A compound curve's pieces
            // are already adjacent by construction.
            if geom_type != GeometryType::CompoundCurve {
                nodes.sort_by_key(|n| {
                    BoundingBox::from_xy_ranges(n.xmin, n.xmax, n.ymin, n.ymax).sortable_hash()
                });
            }
            finish_merge(nodes, geom_type)
        }
    }
}

fn finish_merge(nodes: Vec<Node<'_>>, geom_type: GeometryType) -> Result<Option<Node<'_>>, Error> {
    let mut root = merge_nodes(nodes)?;
    if let Some(root) = &mut root {
        root.geom_type = geom_type;
    }
    Ok(root)
}

fn boxes_overlap(n1: &Node<'_>, n2: &Node<'_>) -> bool {
    !(n1.xmin > n2.xmax || n2.xmin > n1.xmax || n1.ymin > n2.ymax || n2.ymin > n1.ymax)
}

fn node_bounds_point(node: &Node<'_>, pt: &Coord) -> bool {
    !(pt.y < node.ymin || pt.y > node.ymax || pt.x < node.xmin || pt.x > node.xmax)
}

/// Any coordinate of the indexed geometry, for containment sampling.
fn node_sample_point(node: &Node<'_>) -> Coord {
    match &node.kind {
        Kind::Leaf(leaf) => leaf.pa.coord(0),
        Kind::Internal(i) => node_sample_point(&i.nodes[0]),
    }
}

/// Whether the subtree indexes an area type (directly or, for generic
/// collections, anywhere below).
fn node_is_area(node: &Node<'_>) -> bool {
    if node.geom_type == GeometryType::GeometryCollection {
        match &node.kind {
            Kind::Internal(i) => i.nodes.iter().any(node_is_area),
            Kind::Leaf(_) => false,
        }
    } else {
        node.geom_type.is_areal()
    }
}

fn node_contains_point(node: &Node<'_>, pt: &Coord) -> bool {
    use GeometryType::*;
    if !node_bounds_point(node, pt) {
        return false;
    }
    match node.geom_type {
        Polygon | CurvePolygon | Triangle => area_contains_point(node, pt) > 0,
        MultiPolygon | MultiSurface | PolyhedralSurface | Tin | GeometryCollection => {
            match &node.kind {
                Kind::Internal(i) => i.nodes.iter().any(|n| node_contains_point(n, pt)),
                Kind::Leaf(_) => false,
            }
        }
        _ => false,
    }
}

/// Sum of ring containments below an area root: exterior rings add their
/// containment, holes subtract theirs, so a point in a hole nets zero.
fn area_contains_point(node: &Node<'_>, pt: &Coord) -> i32 {
    match &node.kind {
        Kind::Leaf(_) => 0,
        Kind::Internal(i) => {
            if i.ring == RingKind::None {
                i.nodes.iter().map(|n| area_contains_point(n, pt)).sum()
            } else {
                let mut on_boundary = false;
                let crossings = ring_crossings(node, pt, &mut on_boundary);
                let contained = crossings % 2 != 0;
                match i.ring {
                    RingKind::Interior => {
                        if on_boundary {
                            0
                        } else if contained {
                            -1
                        } else {
                            0
                        }
                    }
                    _ => i32::from(contained || on_boundary),
                }
            }
        }
    }
}

/// Horizontal-ray crossing count for one ring subtree. Only nodes that
/// straddle the stab line vertically and might lie to the right get
/// descended.
fn ring_crossings(node: &Node<'_>, pt: &Coord, on_boundary: &mut bool) -> i32 {
    if node.ymin <= pt.y && pt.y <= node.ymax && pt.x <= node.xmax {
        match &node.kind {
            Kind::Leaf(leaf) => leaf_crossing(leaf, pt, on_boundary),
            Kind::Internal(i) => i
                .nodes
                .iter()
                .map(|n| ring_crossings(n, pt, on_boundary))
                .sum(),
        }
    } else {
        0
    }
}

/// Whether the stab line rightward from `pt` crosses this edge, with an
/// up-going/down-going rule that counts each ring vertex exactly once and
/// detects the on-boundary case.
fn leaf_crossing(leaf: &Leaf<'_>, q: &Coord, on_boundary: &mut bool) -> i32 {
    match leaf.seg_type {
        SegType::Linear => {
            let p1 = leaf.pa.coord(leaf.seg_num);
            let p2 = leaf.pa.coord(leaf.seg_num + 1);
            let side = segment_side(&p1, &p2, q);
            if side == 0 && point_in_segment_bounds(q, &p1, &p2) {
                *on_boundary = true;
                return 0;
            }
            // Segment points up and the point is on the left.
            if p1.y < p2.y && side == -1 && q.y != p2.y {
                return 1;
            }
            // Segment points down and the point is on the right.
            if p1.y > p2.y && side == 1 && q.y != p2.y {
                return 1;
            }
            // Horizontal segment: do we cross the first point?
            if p1.y == p2.y && q.x < p1.x {
                return 1;
            }
            0
        }
        SegType::Circular => {
            let p1 = leaf.pa.coord(2 * leaf.seg_num);
            let p2 = leaf.pa.coord(2 * leaf.seg_num + 1);
            let p3 = leaf.pa.coord(2 * leaf.seg_num + 2);
            // A whole-circle edge has no usable chord; intersect the
            // rightward ray with the circle directly.
            if p1.x == p3.x && p1.y == p3.y {
                let Some((center, radius)) = arc_center(&p1, &p2, &p3) else {
                    return 0;
                };
                let d = q.distance_2d(&center);
                if d == radius {
                    *on_boundary = true;
                    return 0;
                }
                let dy = q.y - center.y;
                if dy.abs() >= radius {
                    return 0;
                }
                let h = (radius * radius - dy * dy).sqrt();
                let mut crossings = 0;
                if center.x - h > q.x {
                    crossings += 1;
                }
                if center.x + h > q.x {
                    crossings += 1;
                }
                return crossings;
            }
            let arc = arc_side(&p1, &p2, &p3, q);
            if arc == 0 {
                *on_boundary = true;
                return 0;
            }
            let seg = segment_side(&p1, &p3, q);
            if seg == arc {
                if p1.y < p3.y && seg == -1 && q.y != p3.y {
                    return 1;
                }
                if p1.y > p3.y && seg == 1 && q.y != p3.y {
                    return 1;
                }
            } else {
                if p1.y < p3.y && seg == 1 && q.y != p3.y {
                    return 1;
                }
                if p1.y > p3.y && seg == -1 && q.y != p3.y {
                    return 1;
                }
                if p1.y == p3.y {
                    return 1;
                }
            }
            0
        }
        SegType::Point => 0,
    }
}

fn intersects_recursive(n1: &Node<'_>, n2: &Node<'_>) -> bool {
    if !boxes_overlap(n1, n2) {
        return false;
    }
    match (&n1.kind, &n2.kind) {
        (Kind::Leaf(l1), Kind::Leaf(l2)) => leaf_intersects(l1, l2),
        (Kind::Internal(i), Kind::Leaf(_)) => {
            i.nodes.iter().any(|c| intersects_recursive(c, n2))
        }
        (Kind::Leaf(_), Kind::Internal(i)) => {
            i.nodes.iter().any(|c| intersects_recursive(n1, c))
        }
        (Kind::Internal(i1), Kind::Internal(i2)) => i1
            .nodes
            .iter()
            .any(|c1| i2.nodes.iter().any(|c2| intersects_recursive(c1, c2))),
    }
}

fn leaf_point(leaf: &Leaf<'_>) -> Coord {
    leaf.pa.coord(leaf.seg_num)
}

fn leaf_seg(leaf: &Leaf<'_>) -> (Coord, Coord) {
    (leaf.pa.coord(leaf.seg_num), leaf.pa.coord(leaf.seg_num + 1))
}

fn leaf_arc(leaf: &Leaf<'_>) -> (Coord, Coord, Coord) {
    (
        leaf.pa.coord(2 * leaf.seg_num),
        leaf.pa.coord(2 * leaf.seg_num + 1),
        leaf.pa.coord(2 * leaf.seg_num + 2),
    )
}

/// Exact intersection test between two primitive edges.
fn leaf_intersects(l1: &Leaf<'_>, l2: &Leaf<'_>) -> bool {
    use SegType::*;
    let mut dl = DistState::new(DistanceMode::Min);
    match (l1.seg_type, l2.seg_type) {
        (Point, Point) => {
            let p = leaf_point(l1);
            let q = leaf_point(l2);
            p.x == q.x && p.y == q.y
        }
        (Point, Linear) => {
            let p = leaf_point(l1);
            let (q1, q2) = leaf_seg(l2);
            dist_pt_seg(&mut dl, &p, &q1, &q2);
            dl.distance == 0.0
        }
        (Linear, Point) => {
            let (p1, p2) = leaf_seg(l1);
            let q = leaf_point(l2);
            dist_pt_seg(&mut dl, &q, &p1, &p2);
            dl.distance == 0.0
        }
        (Point, Circular) => {
            let p = leaf_point(l1);
            let (q1, q2, q3) = leaf_arc(l2);
            dist_pt_arc(&mut dl, &p, &q1, &q2, &q3);
            dl.distance == 0.0
        }
        (Circular, Point) => {
            let q = leaf_point(l2);
            let (p1, p2, p3) = leaf_arc(l1);
            dist_pt_arc(&mut dl, &q, &p1, &p2, &p3);
            dl.distance == 0.0
        }
        (Linear, Linear) => {
            let (p1, p2) = leaf_seg(l1);
            let (q1, q2) = leaf_seg(l2);
            segments_intersect(&p1, &p2, &q1, &q2)
        }
        (Linear, Circular) => {
            let (p1, p2) = leaf_seg(l1);
            let (q1, q2, q3) = leaf_arc(l2);
            dist_seg_arc(&mut dl, &p1, &p2, &q1, &q2, &q3);
            dl.distance == 0.0
        }
        (Circular, Linear) => {
            let (q1, q2) = leaf_seg(l2);
            let (p1, p2, p3) = leaf_arc(l1);
            dist_seg_arc(&mut dl, &q1, &q2, &p1, &p2, &p3);
            dl.distance == 0.0
        }
        (Circular, Circular) => {
            let (p1, p2, p3) = leaf_arc(l1);
            let (q1, q2, q3) = leaf_arc(l2);
            dist_arc_arc(&mut dl, &p1, &p2, &p3, &q1, &q2, &q3);
            dl.distance == 0.0
        }
    }
}

struct TreeDistanceState {
    threshold: f64,
    min_dist: f64,
    max_dist: f64,
    p1: Coord,
    p2: Coord,
    ticks: u32,
}

fn node_center(node: &Node<'_>) -> (f64, f64) {
    ((node.xmin + node.xmax) / 2.0, (node.ymin + node.ymax) / 2.0)
}

/// The closest any contents of the two nodes can be, from the relative
/// position of their rectangles.
fn node_min_distance(n1: &Node<'_>, n2: &Node<'_>) -> f64 {
    let left = n1.xmin > n2.xmax;
    let right = n1.xmax < n2.xmin;
    let bottom = n1.ymin > n2.ymax;
    let top = n1.ymax < n2.ymin;

    if top && left {
        (n1.xmin - n2.xmax).hypot(n1.ymax - n2.ymin)
    } else if top && right {
        (n1.xmax - n2.xmin).hypot(n1.ymax - n2.ymin)
    } else if bottom && left {
        (n1.xmin - n2.xmax).hypot(n1.ymin - n2.ymax)
    } else if bottom && right {
        (n1.xmax - n2.xmin).hypot(n1.ymin - n2.ymax)
    } else if left {
        n1.xmin - n2.xmax
    } else if right {
        n2.xmin - n1.xmax
    } else if bottom {
        n1.ymin - n2.ymax
    } else if top {
        n2.ymin - n1.ymax
    } else {
        0.0
    }
}

/// The farthest any contents can be: opposite corners of the union box.
fn node_max_distance(n1: &Node<'_>, n2: &Node<'_>) -> f64 {
    let dx = n1.xmax.max(n2.xmax) - n1.xmin.min(n2.xmin);
    let dy = n1.ymax.max(n2.ymax) - n1.ymin.min(n2.ymin);
    dx.hypot(dy)
}

/// Once per node pair, order each side's children by the squared distance
/// of their centers to the partner's center so the descent visits likely
/// winners first.
fn sort_node_children(node: &mut Node<'_>, partner: (f64, f64)) {
    if let Kind::Internal(i) = &mut node.kind {
        if !i.sorted {
            for child in i.nodes.iter_mut() {
                let c = node_center(child);
                let dx = c.0 - partner.0;
                let dy = c.1 - partner.1;
                child.d = dx * dx + dy * dy;
            }
            i.nodes
                .sort_by(|a, b| a.d.partial_cmp(&b.d).unwrap_or(std::cmp::Ordering::Equal));
            i.sorted = true;
        }
    }
}

fn sort_children(n1: &mut Node<'_>, n2: &mut Node<'_>) {
    let c1 = node_center(n1);
    let c2 = node_center(n2);
    sort_node_children(n1, c2);
    sort_node_children(n2, c1);
}

fn leaf_distance(l1: &Leaf<'_>, l2: &Leaf<'_>, state: &mut TreeDistanceState) -> f64 {
    use SegType::*;
    let mut dl = DistState::new(DistanceMode::Min);
    match (l1.seg_type, l2.seg_type) {
        (Point, Point) => {
            let (p, q) = (leaf_point(l1), leaf_point(l2));
            dist_pt_pt(&mut dl, &p, &q);
        }
        (Point, Linear) => {
            let p = leaf_point(l1);
            let (q1, q2) = leaf_seg(l2);
            dist_pt_seg(&mut dl, &p, &q1, &q2);
        }
        (Linear, Point) => {
            let (p1, p2) = leaf_seg(l1);
            let q = leaf_point(l2);
            with_swapped(&mut dl, |s| dist_pt_seg(s, &q, &p1, &p2));
        }
        (Point, Circular) => {
            let p = leaf_point(l1);
            let (q1, q2, q3) = leaf_arc(l2);
            dist_pt_arc(&mut dl, &p, &q1, &q2, &q3);
        }
        (Circular, Point) => {
            let (p1, p2, p3) = leaf_arc(l1);
            let q = leaf_point(l2);
            with_swapped(&mut dl, |s| dist_pt_arc(s, &q, &p1, &p2, &p3));
        }
        (Linear, Linear) => {
            let (p1, p2) = leaf_seg(l1);
            let (q1, q2) = leaf_seg(l2);
            dist_seg_seg(&mut dl, &p1, &p2, &q1, &q2);
        }
        (Linear, Circular) => {
            let (p1, p2) = leaf_seg(l1);
            let (q1, q2, q3) = leaf_arc(l2);
            dist_seg_arc(&mut dl, &p1, &p2, &q1, &q2, &q3);
        }
        (Circular, Linear) => {
            let (p1, p2, p3) = leaf_arc(l1);
            let (q1, q2) = leaf_seg(l2);
            with_swapped(&mut dl, |s| dist_seg_arc(s, &q1, &q2, &p1, &p2, &p3));
        }
        (Circular, Circular) => {
            let (p1, p2, p3) = leaf_arc(l1);
            let (q1, q2, q3) = leaf_arc(l2);
            dist_arc_arc(&mut dl, &p1, &p2, &p3, &q1, &q2, &q3);
        }
    }
    if dl.distance < state.min_dist {
        state.min_dist = dl.distance;
        state.p1 = dl.p1;
        state.p2 = dl.p2;
    }
    dl.distance
}

fn distance_recursive(
    n1: &mut Node<'_>,
    n2: &mut Node<'_>,
    state: &mut TreeDistanceState,
) -> Result<f64, Error> {
    state.ticks = state.ticks.wrapping_add(1);
    if state.ticks & 0xFF == 0 {
        interrupt::check()?;
    }

    // Good enough already?
    if state.min_dist < state.threshold || state.min_dist == 0.0 {
        return Ok(state.min_dist);
    }

    // A pair whose best case is worse than someone's worst case cannot
    // hold the winner.
    let min = node_min_distance(n1, n2);
    if min > state.max_dist {
        return Ok(f64::MAX);
    }
    let max = node_max_distance(n1, n2);
    if max < state.max_dist {
        state.max_dist = max;
    }

    if let (Kind::Leaf(l1), Kind::Leaf(l2)) = (&n1.kind, &n2.kind) {
        return Ok(leaf_distance(l1, l2, state));
    }

    sort_children(n1, n2);
    let mut d_min = f64::MAX;
    let n1_is_leaf = matches!(n1.kind, Kind::Leaf(_));
    if n1_is_leaf {
        if let Kind::Internal(i2) = &mut n2.kind {
            for child in i2.nodes.iter_mut() {
                let d = distance_recursive(n1, child, state)?;
                d_min = d_min.min(d);
            }
        }
    } else if matches!(n2.kind, Kind::Leaf(_)) {
        if let Kind::Internal(i1) = &mut n1.kind {
            for child in i1.nodes.iter_mut() {
                let d = distance_recursive(child, n2, state)?;
                d_min = d_min.min(d);
            }
        }
    } else if let (Kind::Internal(i1), Kind::Internal(i2)) = (&mut n1.kind, &mut n2.kind) {
        for c1 in i1.nodes.iter_mut() {
            for c2 in i2.nodes.iter_mut() {
                let d = distance_recursive(c1, c2, state)?;
                d_min = d_min.min(d);
            }
        }
    }
    Ok(d_min)
}
