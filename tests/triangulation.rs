// Copyright 2025 Lars Brubaker
// License: MIT
//
// End-to-end triangulation tests through the Triangulator pipeline.

mod helpers;

use std::sync::{Arc, Mutex};

use monotri::geom::center_of_gravity;
use monotri::{
    triangulate_monotone_polygon, triangulate_polygon, Dcel, GeometryError, Point, TriOption,
    Triangulator, INNER_FACE,
};

fn triangulate_checked(points: &[Point], label: &str) -> Triangulator {
    let mut tri = Triangulator::new();
    tri.triangulate(points)
        .unwrap_or_else(|e| panic!("{}: triangulation failed: {}", label, e));
    helpers::verify_triangulation(points, tri.triangles(), label);
    helpers::verify_edge_sharing(points.len(), tri.triangles(), label);
    tri
}

#[test]
fn triangle_passes_through() {
    let points = helpers::pts(&[(0.0, 0.0), (3.0, 0.0), (0.0, 2.0)]);
    let tri = triangulate_checked(&points, "triangle");
    assert_eq!(tri.triangles(), &[[0, 1, 2]]);
    assert!(tri.diagonals().is_empty());
}

#[test]
fn square() {
    let tri = triangulate_checked(&helpers::square(), "square");
    assert_eq!(tri.triangle_count(), 2);
    assert_eq!(tri.monotone_face_count(), 1);
}

#[test]
fn split_and_merge_polygon() {
    let tri = triangulate_checked(&helpers::split_merge(), "split_merge");
    assert_eq!(tri.monotone_face_count(), 3);
    // n - 3 diagonals in total, whichever stage inserted them.
    assert_eq!(tri.diagonals().len(), 3);
}

#[test]
fn combs() {
    for teeth in 1..=6 {
        triangulate_checked(&helpers::comb(teeth), &format!("comb({})", teeth));
        triangulate_checked(&helpers::comb_up(teeth), &format!("comb_up({})", teeth));
    }
}

#[test]
fn data_files() {
    for (label, data) in [
        ("spiral.dat", include_str!("data/spiral.dat")),
        ("comb.dat", include_str!("data/comb.dat")),
    ] {
        let contours = helpers::parse_contours(data);
        assert!(!contours.is_empty(), "{}: should parse one contour", label);
        triangulate_checked(&contours[0], label);
    }
}

#[test]
fn collinear_points_on_horizontal_sides() {
    let points = helpers::pts(&[
        (0.0, 0.0),
        (2.0, 0.0),
        (4.0, 0.0),
        (4.0, 2.0),
        (4.0, 4.0),
        (2.0, 4.0),
        (0.0, 4.0),
        (0.0, 2.0),
    ]);
    triangulate_checked(&points, "square with midpoints");
}

#[test]
fn remove_collinear_drops_midpoints() {
    let points = helpers::pts(&[
        (0.0, 0.0),
        (2.0, 0.0),
        (4.0, 0.0),
        (4.0, 2.0),
        (4.0, 4.0),
        (2.0, 4.0),
        (0.0, 4.0),
        (0.0, 2.0),
    ]);
    let mut tri = Triangulator::new();
    tri.set_option(TriOption::RemoveCollinear, true);
    tri.triangulate(&points).unwrap();
    assert_eq!(tri.triangle_count(), 2);
    let used: Vec<u32> = tri.triangles().iter().flatten().copied().collect();
    for corner in [0, 2, 4, 6] {
        assert!(used.contains(&corner), "corner {} missing", corner);
    }
    for midpoint in [1, 3, 5, 7] {
        assert!(!used.contains(&midpoint), "midpoint {} kept", midpoint);
    }
    let area: f64 = tri
        .triangles()
        .iter()
        .map(|t| helpers::triangle_area_two(&points, t) / 2.0)
        .sum();
    assert!((area - 16.0).abs() < 1e-9);
}

#[test]
fn clockwise_input() {
    let mut points = helpers::split_merge();
    points.reverse();
    let triangles = triangulate_polygon(&points).unwrap();
    helpers::verify_triangulation(&points, &triangles, "clockwise split_merge");

    let mut strict = Triangulator::new();
    strict.set_option(TriOption::FixOrientation, false);
    assert!(matches!(
        strict.triangulate(&points),
        Err(GeometryError::NotCounterClockwise { .. })
    ));
}

#[test]
fn invalid_input_is_reported_as_precondition() {
    let cases = [
        helpers::pts(&[(0.0, 0.0), (1.0, 0.0)]),
        helpers::pts(&[(0.0, 0.0), (1.0, 0.0), (f64::INFINITY, 1.0)]),
        helpers::pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]),
        helpers::crossing_hexagon(),
    ];
    for points in &cases {
        let err = triangulate_polygon(points).unwrap_err();
        assert!(err.is_precondition(), "{:?} should be a precondition error", err);
        assert!(!err.is_invariant_violation());
    }
}

#[test]
fn self_intersecting_boundary_fails_before_any_diagonal() {
    let calls = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&calls);
    let mut tri = Triangulator::new();
    tri.set_diagonal_observer(move |_| *counter.lock().unwrap() += 1);

    let points = helpers::crossing_hexagon();
    assert_eq!(
        tri.triangulate(&points),
        Err(GeometryError::NotSimple { first: 1, second: 3 })
    );
    // Reversed input is turned back around before the check.
    let reversed: Vec<Point> = points.iter().rev().copied().collect();
    let err = tri.triangulate(&reversed).unwrap_err();
    assert!(err.is_precondition(), "{:?}", err);
    assert_eq!(*calls.lock().unwrap(), 0);
    assert_eq!(tri.triangle_count(), 0);
}

#[test]
fn failed_run_clears_previous_output() {
    let mut tri = Triangulator::new();
    tri.triangulate(&helpers::square()).unwrap();
    assert_eq!(tri.triangle_count(), 2);
    assert!(tri.triangulate(&helpers::pts(&[(0.0, 0.0), (1.0, 1.0)])).is_err());
    assert_eq!(tri.triangle_count(), 0);
    assert!(tri.diagonals().is_empty());
    assert!(tri.dcel().is_none());
    assert!(tri.vertices().is_empty());
}

#[test]
fn observer_is_called_once_per_diagonal() {
    let calls = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&calls);
    let mut tri = Triangulator::new();
    tri.set_diagonal_observer(move |_| *counter.lock().unwrap() += 1);

    let points = helpers::comb(4);
    tri.triangulate(&points).unwrap();
    assert_eq!(*calls.lock().unwrap(), points.len() - 3);
    assert_eq!(tri.diagonals().len(), points.len() - 3);

    tri.clear_diagonal_observer();
    tri.triangulate(&points).unwrap();
    assert_eq!(*calls.lock().unwrap(), points.len() - 3);
}

#[test]
fn triangle_centroids_locate_their_face() {
    let points = helpers::split_merge();
    let tri = triangulate_checked(&points, "split_merge");
    let dcel = tri.dcel().unwrap();
    for f in dcel.bounded_faces() {
        let verts = dcel.walk_around_vertex_face(f).unwrap();
        let c = center_of_gravity(
            &dcel.point(verts[0]),
            &dcel.point(verts[1]),
            &dcel.point(verts[2]),
        );
        assert!(dcel.is_inside_face(f, &c).unwrap());
        assert_eq!(dcel.in_which_face(&c).unwrap(), Some(f));
    }
}

#[test]
fn monotone_polygon_triangulated_directly() {
    // Convex octagon: already monotone, so the triangulation stage alone
    // must produce all n - 2 triangles.
    let points: Vec<Point> = (0..8)
        .map(|i| {
            let a = i as f64 * std::f64::consts::PI / 4.0 + 0.1;
            Point::new(5.0 * a.cos(), 5.0 * a.sin())
        })
        .collect();
    let mut dcel = Dcel::from_polygon(&points).unwrap();
    let faces = triangulate_monotone_polygon(&mut dcel, INNER_FACE).unwrap();
    assert_eq!(faces.len(), 5);
    for f in dcel.bounded_faces() {
        assert_eq!(dcel.face_vertex_count(f).unwrap(), 3);
    }
    helpers::verify_dcel(&dcel, monotri::polygon::signed_area_two(&points), "octagon");
}
