// Copyright 2025 Lars Brubaker
// License: MIT
//
// Shared test utilities for monotri tests.

#![allow(dead_code)]

use std::f64::consts::PI;

use monotri::dcel::Dcel;
use monotri::geom::area_two;
use monotri::polygon::signed_area_two;
use monotri::{Point, Real};
use rand::Rng;

/// Parse a `.dat` polygon: one vertex per line as `x y` or `x, y`.
/// Blank lines separate contours.
pub fn parse_contours(data: &str) -> Vec<Vec<Point>> {
    let mut contours: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for line in data.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !current.is_empty() {
                contours.push(std::mem::take(&mut current));
            }
            continue;
        }
        let coords: Vec<Real> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse::<Real>().ok())
            .collect();
        if let [x, y, ..] = coords.as_slice() {
            current.push(Point::new(*x, *y));
        }
    }
    if !current.is_empty() {
        contours.push(current);
    }
    contours
}

pub fn pts(coords: &[(Real, Real)]) -> Vec<Point> {
    coords.iter().map(|&c| Point::from(c)).collect()
}

pub fn square() -> Vec<Point> {
    pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
}

/// One split vertex at (1,3) and one merge vertex at (5,1.5).
pub fn split_merge() -> Vec<Point> {
    pts(&[(0.0, 0.0), (1.0, 3.0), (6.0, 0.0), (6.0, 4.0), (5.0, 1.5), (0.0, 4.0)])
}

/// Six points enclosing positive signed area whose boundary crosses
/// itself: edge 1 cuts through edge 3.
pub fn crossing_hexagon() -> Vec<Point> {
    pts(&[
        (3.54, 5.90),
        (0.42, 2.26),
        (8.07, 2.35),
        (6.72, 5.19),
        (7.54, 1.84),
        (8.14, 8.76),
    ])
}

/// A bar along y = 3 with `teeth` unit-wide teeth hanging down to y = 0.
/// Every gap between two teeth is closed by a horizontal edge at y = 2.
pub fn comb(teeth: usize) -> Vec<Point> {
    let mut out = Vec::new();
    for k in 0..teeth {
        let x = (2 * k) as Real;
        out.push(Point::new(x, 0.0));
        out.push(Point::new(x + 1.0, 0.0));
        if k + 1 < teeth {
            out.push(Point::new(x + 1.0, 2.0));
            out.push(Point::new(x + 2.0, 2.0));
        }
    }
    out.push(Point::new((2 * teeth - 1) as Real, 3.0));
    out.push(Point::new(0.0, 3.0));
    out
}

/// `comb` flipped upside down, teeth pointing up.
pub fn comb_up(teeth: usize) -> Vec<Point> {
    comb(teeth).into_iter().rev().map(|p| Point::new(p.x, 3.0 - p.y)).collect()
}

/// A random polygon, star-shaped around the origin: one vertex per angular
/// sector, at a random angle inside the sector and a random radius.
pub fn random_star_polygon<R: Rng>(rng: &mut R, n: usize) -> Vec<Point> {
    let sector = 2.0 * PI / n as Real;
    (0..n)
        .map(|i| {
            let angle = (i as Real + rng.gen_range(0.1..0.9)) * sector;
            let radius = rng.gen_range(1.0..10.0);
            Point::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Bars of random integer height standing on the x axis. Neighbouring bars
/// differ in height, so the top is a staircase of horizontal edges.
pub fn random_histogram<R: Rng>(rng: &mut R, bars: usize) -> Vec<Point> {
    let mut heights: Vec<u32> = Vec::with_capacity(bars);
    while heights.len() < bars {
        let h = rng.gen_range(1..=6);
        if heights.last() != Some(&h) {
            heights.push(h);
        }
    }
    let mut out = vec![Point::new(0.0, 0.0), Point::new(bars as Real, 0.0)];
    for (i, &h) in heights.iter().enumerate().rev() {
        out.push(Point::new((i + 1) as Real, h as Real));
        out.push(Point::new(i as Real, h as Real));
    }
    out
}

/// Same polygon, starting at vertex `k`.
pub fn rotated(points: &[Point], k: usize) -> Vec<Point> {
    let mut out = points.to_vec();
    out.rotate_left(k % points.len());
    out
}

/// Mirror across the y axis, keeping the boundary counter-clockwise.
pub fn mirrored(points: &[Point]) -> Vec<Point> {
    points.iter().rev().map(|p| Point::new(-p.x, p.y)).collect()
}

/// Twice the area of a triangle given as input indices.
pub fn triangle_area_two(points: &[Point], tri: &[u32; 3]) -> Real {
    area_two(
        &points[tri[0] as usize],
        &points[tri[1] as usize],
        &points[tri[2] as usize],
    )
}

pub fn polygon_area(points: &[Point]) -> Real {
    signed_area_two(points) / 2.0
}

/// Verify a triangulation of a simple polygon: n - 2 counter-clockwise
/// triangles over valid indices whose areas add up to the polygon's.
pub fn verify_triangulation(points: &[Point], triangles: &[[u32; 3]], label: &str) {
    let n = points.len();
    assert_eq!(
        triangles.len(),
        n - 2,
        "{}: expected {} triangles, got {}",
        label,
        n - 2,
        triangles.len()
    );

    let mut total = 0.0;
    for (i, tri) in triangles.iter().enumerate() {
        for &idx in tri {
            assert!(
                (idx as usize) < n,
                "{}: triangle {} index {} out of range (n={})",
                label,
                i,
                idx,
                n
            );
        }
        let area = triangle_area_two(points, tri);
        assert!(
            area > 0.0,
            "{}: triangle {} {:?} is not counter-clockwise (area2={})",
            label,
            i,
            tri,
            area
        );
        total += area / 2.0;
    }

    let expected = polygon_area(points).abs();
    assert!(
        (total - expected).abs() <= 1e-6 * expected.max(1.0),
        "{}: triangle areas sum to {}, polygon area is {}",
        label,
        total,
        expected
    );
}

/// Every interior edge is shared by exactly two triangles and every
/// boundary edge belongs to exactly one.
pub fn verify_edge_sharing(n: usize, triangles: &[[u32; 3]], label: &str) {
    use std::collections::HashMap;

    let mut uses: HashMap<(u32, u32), usize> = HashMap::new();
    for tri in triangles {
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            *uses.entry((a.min(b), a.max(b))).or_default() += 1;
        }
    }
    for i in 0..n as u32 {
        let j = (i + 1) % n as u32;
        assert_eq!(
            uses.remove(&(i.min(j), i.max(j))),
            Some(1),
            "{}: boundary edge {}-{} should be used once",
            label,
            i,
            j
        );
    }
    assert_eq!(uses.len(), n - 3, "{}: expected {} interior edges", label, n - 3);
    for (edge, count) in uses {
        assert_eq!(count, 2, "{}: interior edge {:?} used {} times", label, edge, count);
    }
}

/// Links of every bounded face are consistent and the faces tile the
/// polygon without gaps or overlap.
pub fn verify_dcel(dcel: &Dcel, polygon_area_two: Real, label: &str) {
    let mut total = 0.0;
    for f in dcel.bounded_faces() {
        dcel.check_face_invariants(f)
            .unwrap_or_else(|e| panic!("{}: face {}: {}", label, f, e));
        let area = dcel.face_area_two(f).unwrap();
        assert!(area > 0.0, "{}: face {} has area2 {}", label, f, area);
        total += area;
    }
    assert!(
        (total - polygon_area_two).abs() <= 1e-6 * polygon_area_two.max(1.0),
        "{}: faces cover {} of {}",
        label,
        total,
        polygon_area_two
    );
}
