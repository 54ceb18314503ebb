//! Host-requested cancellation. Kept in its own test binary because the
//! interrupt flag is process-wide.

use planar::{interrupt, Coord, Dims, Error, Geometry, PointArray, RectTree, Srid};

#[test]
fn index_construction_honors_interrupt() {
    let mut points = Vec::with_capacity(1001);
    for i in 0..=1000 {
        points.push(Coord::xy(f64::from(i), f64::from(i % 7)));
    }
    let line =
        Geometry::line_string(Srid::UNKNOWN, PointArray::from_coords(Dims::XY, &points)).unwrap();

    interrupt::request();
    assert_eq!(
        RectTree::build(&line).err(),
        Some(Error::Interrupted),
        "a pending interrupt aborts construction"
    );

    // The request was consumed; the next build succeeds.
    assert!(RectTree::build(&line).unwrap().is_some());

    // A withdrawn request has no effect.
    interrupt::request();
    interrupt::clear();
    assert!(RectTree::build(&line).unwrap().is_some());
}
