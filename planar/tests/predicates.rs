//! Cross-checks of the index-backed predicates against brute force and the
//! documented behavior of the measure kernels.

use planar::algorithm::distance::{dist_seg_seg, min_distance, DistState, DistanceMode};
use planar::{
    ContainsPoint, Coord, Dims, EuclideanDistance, Geometry, GeometryData, GeometryType,
    Intersects, PointArray, Srid,
};

fn pa_xy(points: &[(f64, f64)]) -> PointArray {
    let coords: Vec<Coord> = points.iter().map(|&(x, y)| Coord::xy(x, y)).collect();
    PointArray::from_coords(Dims::XY, &coords)
}

fn poly(points: &[(f64, f64)]) -> Geometry {
    Geometry::polygon(Srid::UNKNOWN, Dims::XY, vec![pa_xy(points)]).unwrap()
}

fn line(points: &[(f64, f64)]) -> Geometry {
    Geometry::line_string(Srid::UNKNOWN, pa_xy(points)).unwrap()
}

/// Every straight edge of a geometry, assuming no circular members.
fn segments(g: &Geometry) -> Vec<(Coord, Coord)> {
    let mut out = Vec::new();
    g.for_each_point_array(&mut |pa| {
        for i in 1..pa.npoints() {
            out.push((pa.coord(i - 1), pa.coord(i)));
        }
    });
    out
}

fn brute_force_min_distance(a: &Geometry, b: &Geometry) -> f64 {
    let mut state = DistState::new(DistanceMode::Min);
    for (p1, p2) in segments(a) {
        for (q1, q2) in segments(b) {
            dist_seg_seg(&mut state, &p1, &p2, &q1, &q2);
        }
    }
    state.distance
}

#[test]
fn ziggy_polygon_scenario() {
    let ziggy = poly(&[
        (0.0, 0.0),
        (1.0, 3.0),
        (2.0, 0.0),
        (3.0, 3.0),
        (4.0, 0.0),
        (4.0, 5.0),
        (0.0, 5.0),
        (0.0, 0.0),
    ]);
    assert!(ziggy.contains_point(Coord::xy(2.0, 1.0)).unwrap());
    assert!(!ziggy.contains_point(Coord::xy(-0.5, 0.5)).unwrap());
    assert!(ziggy.contains_point(Coord::xy(0.0, 1.0)).unwrap());
}

#[test]
fn comb_intersection_scenarios() {
    let comb = poly(&[
        (0.0, 0.0),
        (3.0, 1.0),
        (0.0, 2.0),
        (3.0, 3.0),
        (0.0, 4.0),
        (3.0, 5.0),
        (0.0, 6.0),
        (5.0, 6.0),
        (5.0, 0.0),
        (0.0, 0.0),
    ]);
    let touching = poly(&[(-1.0, 5.0), (0.0, 5.0), (0.0, 7.0), (-1.0, 7.0), (-1.0, 5.0)]);
    assert!(comb.intersects(&touching).unwrap());

    let hidden = poly(&[
        (0.3, 0.7),
        (0.3, 0.8),
        (0.4, 0.8),
        (0.4, 0.7),
        (0.3, 0.7),
    ]);
    assert!(!comb.intersects(&hidden).unwrap());
}

#[test]
fn multipoint_distance_scenario() {
    let pt = Geometry::point(Srid::UNKNOWN, Dims::XY, Coord::xy(0.0, 0.0));
    let mp = Geometry::collection(
        GeometryType::MultiPoint,
        Srid::UNKNOWN,
        Dims::XY,
        vec![
            Geometry::point(Srid::UNKNOWN, Dims::XY, Coord::xy(0.0, 1.5)),
            Geometry::point(Srid::UNKNOWN, Dims::XY, Coord::xy(0.0, 2.0)),
            Geometry::point(Srid::UNKNOWN, Dims::XY, Coord::xy(0.0, 2.5)),
        ],
    )
    .unwrap();
    assert_eq!(min_distance(&pt, &mp, 0.0).unwrap(), 1.5);
}

#[test]
fn intersection_soundness_on_shared_points() {
    // Pairs that share at least one point must intersect; strictly
    // disjoint pairs must not.
    let cases = [
        // Crossing lines.
        (line(&[(0.0, 0.0), (2.0, 2.0)]), line(&[(0.0, 2.0), (2.0, 0.0)]), true),
        // Endpoint touch.
        (line(&[(0.0, 0.0), (1.0, 1.0)]), line(&[(1.0, 1.0), (2.0, 0.0)]), true),
        // Parallel and apart.
        (line(&[(0.0, 0.0), (2.0, 0.0)]), line(&[(0.0, 1.0), (2.0, 1.0)]), false),
        // Polygon edge grazed by a line.
        (
            poly(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]),
            line(&[(2.0, -1.0), (2.0, 3.0)]),
            true,
        ),
        // Line clean through a polygon.
        (
            poly(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]),
            line(&[(-1.0, 1.0), (3.0, 1.0)]),
            true,
        ),
        // Line wholly outside.
        (
            poly(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]),
            line(&[(3.0, -1.0), (3.0, 3.0)]),
            false,
        ),
    ];
    for (a, b, expected) in &cases {
        assert_eq!(a.intersects(b).unwrap(), *expected);
        assert_eq!(b.intersects(a).unwrap(), *expected);
    }
}

#[test]
fn tree_distance_matches_brute_force() {
    let shapes = [
        poly(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
        poly(&[(3.0, 3.0), (6.0, 3.5), (5.0, 6.0), (3.0, 3.0)]),
        line(&[(10.0, 0.0), (10.0, 10.0), (12.0, 10.0)]),
        line(&[(-5.0, -5.0), (-4.0, -3.0), (-2.0, -4.5), (0.0, -2.0)]),
        poly(&[
            (7.0, -3.0),
            (9.0, -3.0),
            (9.0, -1.0),
            (7.0, -1.0),
            (7.0, -3.0),
        ]),
    ];
    for (i, a) in shapes.iter().enumerate() {
        for b in shapes.iter().skip(i + 1) {
            let expected = brute_force_min_distance(a, b);
            let got = a.euclidean_distance(b).unwrap();
            assert!(
                (got - expected).abs() <= f64::EPSILON * expected.abs().max(1.0),
                "tree distance {got} != brute force {expected}"
            );
        }
    }
}

#[test]
fn distance_between_nested_rings_is_zero_only_when_touching() {
    // A polygon with a hole, and a small polygon inside the hole.
    let outer = Geometry::polygon(
        Srid::UNKNOWN,
        Dims::XY,
        vec![
            pa_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            pa_xy(&[(3.0, 3.0), (7.0, 3.0), (7.0, 7.0), (3.0, 7.0), (3.0, 3.0)]),
        ],
    )
    .unwrap();
    let islet = poly(&[(4.5, 4.5), (5.5, 4.5), (5.5, 5.5), (4.5, 5.5), (4.5, 4.5)]);

    // The islet sits in the hole: not contained, distance is the gap to
    // the hole boundary.
    assert!(!outer.contains_point(Coord::xy(5.0, 5.0)).unwrap());
    assert!(!outer.intersects(&islet).unwrap());
    assert_eq!(min_distance(&outer, &islet, 0.0).unwrap(), 1.5);
}

#[test]
fn geometry_collection_dispatch() {
    let mut gc = Geometry::new(GeometryType::GeometryCollection, Srid::UNKNOWN, Dims::XY);
    gc.add_geom(line(&[(0.0, 0.0), (1.0, 0.0)])).unwrap();
    gc.add_geom(poly(&[(5.0, 5.0), (7.0, 5.0), (7.0, 7.0), (5.0, 7.0), (5.0, 5.0)]))
        .unwrap();

    // The collection is areal because one member is.
    assert!(gc.contains_point(Coord::xy(6.0, 6.0)).unwrap());
    let probe = Geometry::point(Srid::UNKNOWN, Dims::XY, Coord::xy(6.0, 6.0));
    assert!(gc.intersects(&probe).unwrap());
    assert_eq!(min_distance(&gc, &probe, 0.0).unwrap(), 0.0);

    // Verify the data model agrees about what is inside the collection.
    match gc.data() {
        GeometryData::Collection(members) => assert_eq!(members.len(), 2),
        _ => unreachable!(),
    }
}
