// Copyright 2025 Lars Brubaker
// License: MIT
//
// Polygon-level helpers: input validation, orientation and clean-up.

use std::cmp::Ordering;

use crate::error::{GeometryError, Result};
use crate::geom::{
    area_two, double_compare, is_collinear, is_negative, is_positive, segments_intersect, Point,
    Real,
};

/// Twice the signed area of a closed boundary (shoelace formula).
pub fn signed_area_two(points: &[Point]) -> Real {
    let Some(anchor) = points.first() else {
        return 0.0;
    };
    points
        .windows(2)
        .map(|w| area_two(anchor, &w[0], &w[1]))
        .sum()
}

pub fn is_counter_clockwise(points: &[Point]) -> bool {
    is_positive(signed_area_two(points))
}

/// First pair of boundary edges that share a point they should not, or
/// `None` for a simple boundary. Edge i runs from point i to point i + 1.
///
/// Neighbouring edges may only meet at their common vertex, so they are
/// flagged when one is empty or when the boundary folds back on itself.
/// Every other pair is tested with `segments_intersect`, visiting edges by
/// their lowest y and stopping once the next edge starts above the current.
pub fn find_intersecting_edges(points: &[Point]) -> Option<(usize, usize)> {
    let n = points.len();
    let edge = |i: usize| (points[i], points[(i + 1) % n]);

    for i in 0..n {
        let (a, b) = edge(i);
        let c = points[(i + 2) % n];
        if a.approx_eq(&b) {
            return Some((i, i));
        }
        if is_collinear(&a, &b, &c) && is_negative((b - a).dot(&(c - b))) {
            return Some((i, (i + 1) % n));
        }
    }
    if n < 4 {
        return None;
    }

    let low = |i: usize| points[i].y.min(points[(i + 1) % n].y);
    let high = |i: usize| points[i].y.max(points[(i + 1) % n].y);
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| low(i).total_cmp(&low(j)));

    for (k, &i) in order.iter().enumerate() {
        let (p1, p2) = edge(i);
        for &j in &order[k + 1..] {
            if double_compare(low(j), high(i)) == Ordering::Greater {
                break;
            }
            if j == (i + 1) % n || i == (j + 1) % n {
                continue;
            }
            let (q1, q2) = edge(j);
            if segments_intersect(&p1, &p2, &q1, &q2) {
                return Some((i.min(j), i.max(j)));
            }
        }
    }
    None
}

/// Check what `Dcel::from_polygon` requires: at least three finite points
/// enclosing positive area, listed counter-clockwise, with no two edges
/// crossing or touching.
pub fn validate(points: &[Point]) -> Result<()> {
    if points.len() < 3 {
        return Err(GeometryError::TooFewVertices(points.len()));
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(GeometryError::InvalidCoordinate { index });
    }
    let area = signed_area_two(points);
    if !is_positive(area) {
        return Err(GeometryError::NotCounterClockwise { area: area / 2.0 });
    }
    if let Some((first, second)) = find_intersecting_edges(points) {
        return Err(GeometryError::NotSimple { first, second });
    }
    Ok(())
}

/// Indices of the boundary points that survive dropping every vertex lying
/// on the line through its neighbours. Repeated points go too. At least three
/// indices are always kept.
pub fn remove_points_on_the_same_line(points: &[Point]) -> Vec<usize> {
    let mut kept: Vec<usize> = (0..points.len()).collect();
    loop {
        let before = kept.len();
        let mut i = 0;
        while kept.len() > 3 && i < kept.len() {
            let n = kept.len();
            let prev = points[kept[(i + n - 1) % n]];
            let next = points[kept[(i + 1) % n]];
            if is_collinear(&prev, &points[kept[i]], &next) {
                kept.remove(i);
                i = i.saturating_sub(1);
            } else {
                i += 1;
            }
        }
        if kept.len() == before {
            return kept;
        }
    }
}
