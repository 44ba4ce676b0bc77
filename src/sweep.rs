// Copyright 2025 Lars Brubaker
// License: MIT
//
// Status-structure keys for the monotone decomposition sweep.
//
// An EventEdge is a polygon edge currently crossing the sweep line together
// with its helper vertex. Its position is cached as a point on the line and
// refreshed at the query position by SweepOrder before every comparison, so
// the tree always orders edges by their x at the current sweep height.

use std::cmp::Ordering;

use crate::dcel::{EdgeIdx, VertIdx};
use crate::geom::{sort_by_x, Line, Point};
use crate::rbtree::{KeyOrder, RedBlackTree};

/// An active edge in the sweep status.
#[derive(Clone, Debug)]
pub struct EventEdge {
    /// Where the edge crossed the sweep line at the last comparison.
    pub at: Point,
    pub line: Line,
    /// Half-edge of the polygon boundary this key stands for.
    pub edge: EdgeIdx,
    /// Most recent vertex whose diagonal may still have to land on this edge.
    pub helper: VertIdx,
}

impl EventEdge {
    /// Key for the edge `line` entering the sweep at its upper endpoint.
    pub fn new(line: Line, edge: EdgeIdx, helper: VertIdx) -> Self {
        EventEdge {
            at: line.start,
            line,
            edge,
            helper,
        }
    }

    /// Move the cached crossing point to the sweep height of `query`.
    pub fn reevaluate(&mut self, query: &Point) {
        self.line.reevaluate(&mut self.at, query);
    }
}

/// Orders status edges left to right at the query's sweep height.
#[derive(Copy, Clone, Debug, Default)]
pub struct SweepOrder;

impl KeyOrder<EventEdge, Point> for SweepOrder {
    fn compare(&self, key: &mut EventEdge, query: &Point) -> Ordering {
        key.reevaluate(query);
        sort_by_x(&key.at, query)
    }
}

impl KeyOrder<EventEdge> for SweepOrder {
    fn compare(&self, key: &mut EventEdge, query: &EventEdge) -> Ordering {
        key.reevaluate(&query.at);
        sort_by_x(&key.at, &query.at)
    }
}

/// The sweep status: active edges ordered by x at the sweep line.
pub type StatusTree = RedBlackTree<EventEdge, SweepOrder>;

pub fn new_status_tree() -> StatusTree {
    RedBlackTree::with_order(SweepOrder)
}
