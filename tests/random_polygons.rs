// Copyright 2025 Lars Brubaker
// License: MIT
//
// Randomized polygons with fixed seeds: decomposition and triangulation
// properties that must hold for every simple polygon.

mod helpers;

use monotri::monotone::{is_monotone_polygon, make_monotone};
use monotri::polygon::signed_area_two;
use monotri::{Dcel, Point, Triangulator, INNER_FACE};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn check_pipeline(points: &[Point], label: &str) {
    let mut tri = Triangulator::new();
    tri.triangulate(points)
        .unwrap_or_else(|e| panic!("{}: triangulation failed: {}", label, e));
    helpers::verify_triangulation(points, tri.triangles(), label);
    helpers::verify_edge_sharing(points.len(), tri.triangles(), label);
    assert_eq!(tri.diagonals().len(), points.len() - 3, "{}", label);
}

fn check_decomposition(points: &[Point], label: &str) {
    let mut dcel = Dcel::from_polygon(points).unwrap();
    make_monotone(&mut dcel, INNER_FACE).unwrap_or_else(|e| panic!("{}: {}", label, e));
    helpers::verify_dcel(&dcel, signed_area_two(points), label);
    for f in dcel.bounded_faces() {
        assert!(
            is_monotone_polygon(&dcel, f).unwrap(),
            "{}: face {} is not monotone",
            label,
            f
        );
    }
}

#[test]
fn random_star_polygons() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for case in 0..300 {
        let n = rng.gen_range(3..=60);
        let points = helpers::random_star_polygon(&mut rng, n);
        let label = format!("star case {} (n={})", case, n);
        check_decomposition(&points, &label);
        check_pipeline(&points, &label);
    }
}

#[test]
fn large_star_polygon() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let points = helpers::random_star_polygon(&mut rng, 2000);
    check_pipeline(&points, "star n=2000");
}

#[test]
fn random_histograms_in_every_orientation() {
    let mut rng = ChaCha8Rng::seed_from_u64(0xC0FFEE);
    for case in 0..60 {
        let bars = rng.gen_range(1..=12);
        let base = helpers::random_histogram(&mut rng, bars);
        let variants = [
            ("upright", base.clone()),
            ("mirrored", helpers::mirrored(&base)),
            (
                "upside down",
                base.iter().rev().map(|p| Point::new(p.x, -p.y)).collect(),
            ),
            (
                "sideways",
                base.iter().rev().map(|p| Point::new(p.y, p.x)).collect(),
            ),
        ];
        for (name, points) in &variants {
            for k in 0..points.len() {
                let label = format!("histogram case {} {} rotated by {}", case, name, k);
                check_pipeline(&helpers::rotated(points, k), &label);
            }
        }
    }
}

#[test]
fn clockwise_random_polygons() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for case in 0..50 {
        let n = rng.gen_range(3..=40);
        let mut points = helpers::random_star_polygon(&mut rng, n);
        points.reverse();
        check_pipeline(&points, &format!("clockwise star case {}", case));
    }
}
