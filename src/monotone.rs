// Copyright 2025 Lars Brubaker
// License: MIT
//
// Partition of a simple polygon into y-monotone pieces.
//
// A sweep line moves top to bottom over the polygon vertices. Every vertex is
// classified from its two boundary neighbours; split and merge vertices are
// the ones that break monotonicity, and each gets a diagonal to the helper of
// the status edge directly left of it. The status is a StatusTree of the
// edges currently crossing the sweep line, keyed by their x at the sweep.
//
// Vertices level with a neighbour are classified as if the later of the two,
// walking counter-clockwise, were nudged by SHIFT: up if the horizontal edge
// runs rightwards, down if it runs leftwards. Along a run of level vertices
// the nudges accumulate. This matches the event order, in which the larger x
// of two level vertices is processed first.

use std::cmp::Ordering;
use std::mem;

use tracing::{debug, trace};

use crate::dcel::{Dcel, EdgeIdx, FaceIdx, VertIdx};
use crate::error::{GeometryError, Result};
use crate::geom::{area_two, is_above, is_below, is_equal, is_negative, sort_by_y, to_left_rigorously, Line, Point, Real};
use crate::priorityq::EventQueue;
use crate::sweep::{new_status_tree, EventEdge, StatusTree};

/// Offset used to break ties between level vertices.
pub const SHIFT: Real = 0.01;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VertexType {
    /// Both neighbours below, interior angle under PI.
    Start,
    /// Both neighbours below, interior angle over PI.
    Split,
    /// Both neighbours above, interior angle under PI.
    End,
    /// Both neighbours above, interior angle over PI.
    Merge,
    /// On the left chain: the interior lies to the right.
    RegularLeft,
    /// On the right chain: the interior lies to the left.
    RegularRight,
}

/// `p` moved up or down by SHIFT so that `p` lies above `base` exactly when
/// the edge base -> p runs rightwards.
pub fn handle_horizontal_vertices(p: &Point, base: &Point) -> Point {
    let up = Point::new(p.x, p.y + SHIFT);
    if to_left_rigorously(base, p, &up) {
        up
    } else {
        Point::new(p.x, p.y - SHIFT)
    }
}

/// Whether `p` lies inside the corner prev -> base -> next.
pub fn is_inside_corner(p: &Point, base: &Point, prev: &Point, next: &Point) -> bool {
    to_left_rigorously(prev, base, p) && to_left_rigorously(base, next, p)
}

/// Classify the origin of `edge` on the face `edge` bounds.
pub fn vertex_type(dcel: &Dcel, edge: EdgeIdx) -> VertexType {
    let original = dcel.point(dcel.origin(edge));
    let original_next = dcel.point(dcel.destination(edge));
    let original_prev = dcel.point(dcel.origin(dcel.prev(edge)));

    let mut base = original;
    let mut next = original_next;
    let prev = original_prev;
    if is_equal(base.y, prev.y) {
        base = handle_horizontal_vertices(&base, &prev);
        // Inside a horizontal run the next vertex moves on from the shifted base.
        if is_equal(original.y, next.y) {
            next = handle_horizontal_vertices(&Point::new(next.x, base.y), &base);
        }
    } else if is_equal(base.y, next.y) {
        next = handle_horizontal_vertices(&next, &base);
    }

    let reflex = is_negative(area_two(&original_prev, &original, &original_next));
    if is_below(&base, &next) && is_below(&base, &prev) {
        return if reflex { VertexType::Split } else { VertexType::Start };
    }
    if is_above(&base, &next) && is_above(&base, &prev) {
        return if reflex { VertexType::Merge } else { VertexType::End };
    }

    let right_of_base = Point::new(base.x + SHIFT, base.y);
    if is_inside_corner(&right_of_base, &base, &prev, &next) {
        VertexType::RegularLeft
    } else {
        VertexType::RegularRight
    }
}

/// Tag every vertex on the boundary of `face` with its type.
pub fn classify_vertices(dcel: &mut Dcel, face: FaceIdx) -> Result<()> {
    for e in dcel.walk_around_edge_face(face)? {
        let kind = vertex_type(dcel, e);
        let v = dcel.origin(e);
        dcel.verts[v as usize].vertex_type = Some(kind);
    }
    Ok(())
}

/// Split `face` into y-monotone faces by inserting diagonals.
///
/// Returns the faces created; `face` itself remains one of the pieces.
pub fn make_monotone(dcel: &mut Dcel, face: FaceIdx) -> Result<Vec<FaceIdx>> {
    classify_vertices(dcel, face)?;
    let boundary = dcel.walk_around_edge_face(face)?;
    let mut queue = EventQueue::new(dcel, boundary);
    debug!(face, events = queue.len(), "monotone decomposition");

    let mut sweep = MonotoneSweep {
        dcel,
        status: new_status_tree(),
        new_faces: Vec::new(),
    };
    while let Some(edge) = queue.extract_max() {
        sweep.handle_event(edge)?;
    }
    sweep.finish()
}

struct MonotoneSweep<'a> {
    dcel: &'a mut Dcel,
    status: StatusTree,
    new_faces: Vec<FaceIdx>,
}

impl MonotoneSweep<'_> {
    /// Every edge inserted at its upper vertex leaves at its lower one.
    fn finish(self) -> Result<Vec<FaceIdx>> {
        if !self.status.is_empty() {
            return Err(GeometryError::StatusNotEmpty(self.status.len()));
        }
        Ok(self.new_faces)
    }

    fn handle_event(&mut self, edge: EdgeIdx) -> Result<()> {
        let v = self.dcel.origin(edge);
        let kind = self.dcel.verts[v as usize]
            .vertex_type
            .ok_or(GeometryError::UnclassifiedVertex(v))?;
        trace!(vertex = v, ?kind, "sweep event");

        match kind {
            VertexType::Start => self.handle_start(edge),
            VertexType::Split => {
                let helper = self.replace_left_helper(v)?;
                self.connect(helper, v)?;
                self.handle_start(edge);
            }
            VertexType::End => self.handle_end(v)?,
            VertexType::Merge => {
                self.handle_end(v)?;
                self.update_left_helper(v)?;
            }
            // The two regular cases are not mirror images: a left-chain vertex
            // swaps its incoming edge for its outgoing one in the status, a
            // right-chain vertex only hands its helper role to the edge on its left.
            VertexType::RegularLeft => {
                self.handle_end(v)?;
                self.handle_start(edge);
            }
            VertexType::RegularRight => self.update_left_helper(v)?,
        }
        Ok(())
    }

    /// Insert the boundary edge leaving the event vertex, helped by it.
    fn handle_start(&mut self, edge: EdgeIdx) {
        let v = self.dcel.origin(edge);
        let line = Line::new(self.dcel.point(v), self.dcel.point(self.dcel.destination(edge)));
        trace!(vertex = v, edge, "status insert");
        self.status.put(EventEdge::new(line, edge, v));
    }

    /// Remove the boundary edge ending at `v`; settle a pending merge helper.
    fn handle_end(&mut self, v: VertIdx) -> Result<()> {
        let removed = self
            .status
            .delete(&self.dcel.point(v))
            .ok_or(GeometryError::MissingStatusEdge(v))?;
        trace!(vertex = v, edge = removed.edge, "status delete");
        if self.is_merge(removed.helper) {
            self.connect(removed.helper, v)?;
        }
        Ok(())
    }

    /// Make `v` the helper of the edge left of it, settling a merge helper.
    fn update_left_helper(&mut self, v: VertIdx) -> Result<()> {
        let helper = self.replace_left_helper(v)?;
        if self.is_merge(helper) {
            self.connect(helper, v)?;
        }
        Ok(())
    }

    fn replace_left_helper(&mut self, v: VertIdx) -> Result<VertIdx> {
        let left = self
            .status
            .lower(&self.dcel.point(v))
            .ok_or(GeometryError::NoEdgeLeftOf(v))?;
        Ok(mem::replace(&mut left.helper, v))
    }

    fn is_merge(&self, v: VertIdx) -> bool {
        self.dcel.verts[v as usize].vertex_type == Some(VertexType::Merge)
    }

    fn connect(&mut self, from: VertIdx, to: VertIdx) -> Result<()> {
        if let Some(face) = self.dcel.connect_helper(from, to)? {
            self.new_faces.push(face);
        }
        Ok(())
    }
}

/// A local extremum in the (y, x) order used by the sweep.
pub fn is_corner(prev: &Point, v: &Point, next: &Point) -> bool {
    let to_prev = sort_by_y(prev, v);
    to_prev != Ordering::Equal && to_prev == sort_by_y(next, v)
}

/// At most one top and one bottom corner along the boundary of `face`.
pub fn is_monotone_polygon(dcel: &Dcel, face: FaceIdx) -> Result<bool> {
    let verts = dcel.walk_around_vertex_face(face)?;
    let n = verts.len();
    let corners = (0..n)
        .filter(|&i| {
            let prev = dcel.point(verts[(i + n - 1) % n]);
            let next = dcel.point(verts[(i + 1) % n]);
            is_corner(&prev, &dcel.point(verts[i]), &next)
        })
        .count();
    Ok(corners <= 2)
}
