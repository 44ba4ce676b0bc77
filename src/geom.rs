// Copyright 2025 Lars Brubaker
// License: MIT
//
// Geometric primitives shared by the DCEL and both sweeps.
//
// Every coordinate comparison in the crate goes through `double_compare`,
// so the decomposition and triangulation passes break ties identically.

use std::cmp::Ordering;
use std::ops::{Add, Sub};

pub type Real = f64;

/// Tolerance used by every float comparison in the crate.
pub const EPSILON: Real = 1e-8;

/// Compare two reals, treating values closer than `EPSILON` as equal.
#[inline]
pub fn double_compare(a: Real, b: Real) -> Ordering {
    let diff = a - b;
    if diff.abs() < EPSILON {
        Ordering::Equal
    } else if diff < 0.0 {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

#[inline]
pub fn is_equal(a: Real, b: Real) -> bool {
    double_compare(a, b) == Ordering::Equal
}

#[inline]
pub fn is_equal_zero(a: Real) -> bool {
    is_equal(a, 0.0)
}

#[inline]
pub fn is_positive(a: Real) -> bool {
    double_compare(a, 0.0) == Ordering::Greater
}

#[inline]
pub fn is_negative(a: Real) -> bool {
    double_compare(a, 0.0) == Ordering::Less
}

/// True when both values are strictly positive or both strictly negative.
pub fn is_same_sign(a: Real, b: Real) -> bool {
    (is_positive(a) && is_positive(b)) || (is_negative(a) && is_negative(b))
}

// ─── Point ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    pub const fn new(x: Real, y: Real) -> Self {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Coordinate equality under `EPSILON`.
    pub fn approx_eq(&self, other: &Point) -> bool {
        is_equal(self.x, other.x) && is_equal(self.y, other.y)
    }

    pub fn dot(&self, other: &Point) -> Real {
        self.x * other.x + self.y * other.y
    }

    pub fn cross(&self, other: &Point) -> Real {
        self.x * other.y - self.y * other.x
    }

    pub fn norm(&self) -> Real {
        self.dot(self).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(Real, Real)> for Point {
    fn from((x, y): (Real, Real)) -> Self {
        Point::new(x, y)
    }
}

/// Order by y, then by x. Used for the sweep event order.
pub fn sort_by_y(a: &Point, b: &Point) -> Ordering {
    match double_compare(a.y, b.y) {
        Ordering::Equal => double_compare(a.x, b.x),
        ord => ord,
    }
}

/// Order by x, then by y. Used to order status keys.
pub fn sort_by_x(a: &Point, b: &Point) -> Ordering {
    match double_compare(a.x, b.x) {
        Ordering::Equal => double_compare(a.y, b.y),
        ord => ord,
    }
}

/// True if `v` is below or level with `base`.
#[inline]
pub fn is_below(base: &Point, v: &Point) -> bool {
    double_compare(base.y, v.y) != Ordering::Less
}

/// True if `v` is above or level with `base`.
#[inline]
pub fn is_above(base: &Point, v: &Point) -> bool {
    double_compare(base.y, v.y) != Ordering::Greater
}

// ─── Orientation ─────────────────────────────────────────────────────────────

/// Twice the signed area of triangle (p1, p2, p3).
/// Positive when p3 lies strictly left of the directed line p1 -> p2.
#[inline]
pub fn area_two(p1: &Point, p2: &Point, p3: &Point) -> Real {
    p1.x * p2.y - p1.y * p2.x + p2.x * p3.y - p2.y * p3.x + p3.x * p1.y - p3.y * p1.x
}

/// p3 is left of or on p1 -> p2.
#[inline]
pub fn to_left(p1: &Point, p2: &Point, p3: &Point) -> bool {
    double_compare(area_two(p1, p2, p3), 0.0) != Ordering::Less
}

/// p3 is strictly left of p1 -> p2.
#[inline]
pub fn to_left_rigorously(p1: &Point, p2: &Point, p3: &Point) -> bool {
    double_compare(area_two(p1, p2, p3), 0.0) == Ordering::Greater
}

pub fn is_collinear(p1: &Point, p2: &Point, p3: &Point) -> bool {
    is_equal_zero(area_two(p1, p2, p3))
}

/// `p` lies inside the bounding box of segment a-b. Together with
/// `is_collinear` this means `p` is on the segment.
fn within_box(a: &Point, b: &Point, p: &Point) -> bool {
    let inside = |lo: Real, hi: Real, v: Real| {
        double_compare(lo.min(hi), v) != Ordering::Greater
            && double_compare(v, lo.max(hi)) != Ordering::Greater
    };
    inside(a.x, b.x, p.x) && inside(a.y, b.y, p.y)
}

/// Segments p1-p2 and q1-q2 share at least one point: they cross properly,
/// or an endpoint of one lies on the other.
pub fn segments_intersect(p1: &Point, p2: &Point, q1: &Point, q2: &Point) -> bool {
    let side = |a: &Point, b: &Point, c: &Point| double_compare(area_two(a, b, c), 0.0);
    let d1 = side(q1, q2, p1);
    let d2 = side(q1, q2, p2);
    let d3 = side(p1, p2, q1);
    let d4 = side(p1, p2, q2);

    let straddles = |a: Ordering, b: Ordering| {
        a != Ordering::Equal && b != Ordering::Equal && a != b
    };
    if straddles(d1, d2) && straddles(d3, d4) {
        return true;
    }
    (d1 == Ordering::Equal && within_box(q1, q2, p1))
        || (d2 == Ordering::Equal && within_box(q1, q2, p2))
        || (d3 == Ordering::Equal && within_box(p1, p2, q1))
        || (d4 == Ordering::Equal && within_box(p1, p2, q2))
}

/// Angle at `a` between rays a -> b and a -> c, in [0, PI].
pub fn radian(a: &Point, b: &Point, c: &Point) -> Real {
    let ab = *b - *a;
    let ac = *c - *a;
    let denom = ab.norm() * ac.norm();
    if is_equal_zero(denom) {
        return 0.0;
    }
    (ab.dot(&ac) / denom).clamp(-1.0, 1.0).acos()
}

pub fn center_of_gravity(a: &Point, b: &Point, c: &Point) -> Point {
    Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
}

/// Order `c` and `d` by clockwise angle around the base edge a -> b.
///
/// Points on the left side of b -> a come first, collinear points next and
/// right-side points last. Within one side the angle at `a` decides, with the
/// right side reversed so the order keeps turning clockwise.
pub fn clockwise_angle_compare(a: &Point, b: &Point, c: &Point, d: &Point) -> Ordering {
    let side_c = area_two(b, a, c);
    let side_d = area_two(b, a, d);

    if is_same_sign(side_c, side_d) {
        let by_angle = double_compare(radian(a, b, c), radian(a, b, d));
        return if is_positive(side_c) {
            by_angle
        } else {
            by_angle.reverse()
        };
    }

    if comes_after(side_c, side_d) {
        Ordering::Greater
    } else if comes_after(side_d, side_c) {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

// A point on side `first` sorts after one on side `second` when it is on the
// right while the other is not, or collinear while the other is on the left.
fn comes_after(first: Real, second: Real) -> bool {
    (is_negative(first) && !is_negative(second)) || (is_equal_zero(first) && is_positive(second))
}

// ─── Line ────────────────────────────────────────────────────────────────────

/// A polygon edge in standard form `a·x + b·y = c`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    a: Real,
    b: Real,
    c: Real,
    vertical: bool,
    horizontal: bool,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        let a = start.y - end.y;
        let b = end.x - start.x;
        Line {
            start,
            end,
            a,
            b,
            c: b * start.y + a * start.x,
            vertical: is_equal(start.x, end.x),
            horizontal: is_equal(start.y, end.y),
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.vertical
    }

    pub fn is_horizontal(&self) -> bool {
        self.horizontal
    }

    /// x on the line at height `y`. Meaningless for horizontal lines.
    pub fn x_at(&self, y: Real) -> Real {
        (self.c - y * self.b) / self.a
    }

    /// y on the line at abscissa `x`. Meaningless for vertical lines.
    pub fn y_at(&self, x: Real) -> Real {
        (self.c - x * self.a) / self.b
    }

    /// Move `cached` to where this line crosses the sweep through `query`.
    ///
    /// A vertical line only moves when the query is on it (the cached y jumps
    /// to the query's); a horizontal line likewise only moves along x. Any
    /// other line takes the point at the query's height.
    pub fn reevaluate(&self, cached: &mut Point, query: &Point) {
        if self.vertical {
            if is_equal(query.x, self.start.x) {
                cached.y = query.y;
            }
        } else if self.horizontal {
            if is_equal(query.y, self.start.y) {
                cached.x = query.x;
            }
        } else {
            cached.x = self.x_at(query.y);
            cached.y = query.y;
        }
    }
}
