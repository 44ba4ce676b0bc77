// Copyright 2025 Lars Brubaker
// License: MIT
//
// Doubly-connected edge list for one simple polygon and its subdivisions.
//
// All links are u32 indices into Vec arenas:
//   - INVALID: u32::MAX (null link)
//   - Half-edges are allocated in pairs: edges[i] and edges[i^1] are twins.
//     twin(e) = e ^ 1, so twin(twin(e)) == e holds by construction.
//   - faces[OUTER_FACE] is the unbounded face (no out component, one inner
//     component); faces[INNER_FACE] is the polygon interior.
//
// The structure only ever grows: diagonals add one twin pair and one face,
// nothing is deleted.

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::error::{GeometryError, Result};
use crate::geom::{area_two, clockwise_angle_compare, is_collinear, is_equal, to_left_rigorously, Point, Real};
use crate::monotone::VertexType;
use crate::polygon;
use crate::triangulate::Chain;

pub const INVALID: u32 = u32::MAX;

/// Index into Dcel::verts
pub type VertIdx = u32;
/// Index into Dcel::faces
pub type FaceIdx = u32;
/// Index into Dcel::edges
pub type EdgeIdx = u32;

/// The unbounded face.
pub const OUTER_FACE: FaceIdx = 0;
/// The polygon interior as built by `Dcel::from_polygon`.
pub const INNER_FACE: FaceIdx = 1;

/// The opposite half of an edge pair.
#[inline(always)]
pub fn twin(e: EdgeIdx) -> EdgeIdx {
    e ^ 1
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub point: Point,
    /// Position of the vertex in the caller's input.
    pub id: u32,
    /// One half-edge whose origin is this vertex.
    pub incident_edge: EdgeIdx,
    /// Set by the monotone decomposition.
    pub vertex_type: Option<VertexType>,
    /// Set by the monotone triangulation.
    pub chain: Option<Chain>,
}

#[derive(Clone, Debug)]
pub struct HalfEdge {
    pub origin: VertIdx,
    pub next: EdgeIdx,
    pub prev: EdgeIdx,
    pub incident_face: FaceIdx,
}

impl Default for HalfEdge {
    fn default() -> Self {
        Self {
            origin: INVALID,
            next: INVALID,
            prev: INVALID,
            incident_face: INVALID,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Face {
    /// A half-edge on the outer boundary. None for the unbounded face.
    pub out_component: Option<EdgeIdx>,
    /// One half-edge per boundary loop seen from outside.
    pub inner_components: Vec<EdgeIdx>,
}

/// Record of one inserted diagonal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Diagonal {
    pub from: VertIdx,
    pub to: VertIdx,
    /// The new half-edge leaving `from`.
    pub edge: EdgeIdx,
    /// The face created by the insertion.
    pub face: FaceIdx,
}

/// Called once for every diagonal inserted by `Dcel::connect_helper`.
pub type DiagonalObserver = Box<dyn FnMut(&Diagonal) + Send>;

pub struct Dcel {
    pub verts: Vec<Vertex>,
    pub edges: Vec<HalfEdge>,
    pub faces: Vec<Face>,
    diagonals: Vec<Diagonal>,
    observer: Option<DiagonalObserver>,
}

impl fmt::Debug for Dcel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dcel")
            .field("verts", &self.verts)
            .field("edges", &self.edges)
            .field("faces", &self.faces)
            .field("diagonals", &self.diagonals)
            .finish_non_exhaustive()
    }
}

impl Dcel {
    /// Build the DCEL of a simple polygon given as a counter-clockwise
    /// boundary. Half-edge 2i runs from vertex i to vertex i+1 on the inner
    /// face; its twin runs back on the outer face.
    pub fn from_polygon(points: &[Point]) -> Result<Dcel> {
        polygon::validate(points)?;

        let n = points.len();
        let mut verts = Vec::with_capacity(n);
        let mut edges = Vec::with_capacity(2 * n);
        for (i, &point) in points.iter().enumerate() {
            verts.push(Vertex {
                point,
                id: i as u32,
                incident_edge: (2 * i) as EdgeIdx,
                vertex_type: None,
                chain: None,
            });
        }
        for i in 0..n {
            let next = (i + 1) % n;
            let prev = (i + n - 1) % n;
            edges.push(HalfEdge {
                origin: i as VertIdx,
                next: (2 * next) as EdgeIdx,
                prev: (2 * prev) as EdgeIdx,
                incident_face: INNER_FACE,
            });
            edges.push(HalfEdge {
                origin: next as VertIdx,
                next: (2 * prev + 1) as EdgeIdx,
                prev: (2 * next + 1) as EdgeIdx,
                incident_face: OUTER_FACE,
            });
        }

        let faces = vec![
            Face {
                out_component: None,
                inner_components: vec![1],
            },
            Face {
                out_component: Some(0),
                inner_components: Vec::new(),
            },
        ];

        debug!(vertices = n, "built polygon DCEL");
        Ok(Dcel {
            verts,
            edges,
            faces,
            diagonals: Vec::new(),
            observer: None,
        })
    }

    // ──────────────────────────── Navigation ──────────────────────────────

    #[inline]
    pub fn origin(&self, e: EdgeIdx) -> VertIdx {
        self.edges[e as usize].origin
    }

    #[inline]
    pub fn destination(&self, e: EdgeIdx) -> VertIdx {
        self.edges[twin(e) as usize].origin
    }

    #[inline]
    pub fn next(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[e as usize].next
    }

    #[inline]
    pub fn prev(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[e as usize].prev
    }

    #[inline]
    pub fn point(&self, v: VertIdx) -> Point {
        self.verts[v as usize].point
    }

    pub fn face(&self, f: FaceIdx) -> Result<&Face> {
        self.faces.get(f as usize).ok_or(GeometryError::NotAFace(f))
    }

    pub fn num_vertices(&self) -> usize {
        self.verts.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Faces with an outer boundary, in creation order.
    pub fn bounded_faces(&self) -> impl Iterator<Item = FaceIdx> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, face)| face.out_component.is_some())
            .map(|(i, _)| i as FaceIdx)
    }

    pub fn diagonals(&self) -> &[Diagonal] {
        &self.diagonals
    }

    pub fn set_diagonal_observer(&mut self, observer: DiagonalObserver) {
        self.observer = Some(observer);
    }

    pub fn take_diagonal_observer(&mut self) -> Option<DiagonalObserver> {
        self.observer.take()
    }

    // ──────────────────────────── Walks ───────────────────────────────────

    /// Half-edges of the loop through `start`, following `next`.
    ///
    /// Fails instead of looping when the cycle does not close within the
    /// number of existing edges, or when the incident face changes on the way.
    pub fn walk_around_edge(&self, start: EdgeIdx) -> Result<Vec<EdgeIdx>> {
        let face = self
            .edges
            .get(start as usize)
            .ok_or(GeometryError::BrokenCycle { start })?
            .incident_face;
        let mut out = Vec::new();
        let mut e = start;
        loop {
            if out.len() >= self.edges.len() {
                return Err(GeometryError::BrokenCycle { start });
            }
            let half = self
                .edges
                .get(e as usize)
                .ok_or(GeometryError::BrokenCycle { start })?;
            if half.incident_face != face {
                return Err(GeometryError::FaceMismatch {
                    edge: e,
                    expected: face,
                    found: half.incident_face,
                });
            }
            out.push(e);
            e = half.next;
            if e == start {
                break;
            }
        }
        Ok(out)
    }

    /// Boundary half-edges of a bounded face, starting at its out component.
    pub fn walk_around_edge_face(&self, f: FaceIdx) -> Result<Vec<EdgeIdx>> {
        let start = self
            .face(f)?
            .out_component
            .ok_or(GeometryError::UnboundedFace(f))?;
        self.walk_around_edge(start)
    }

    pub fn walk_around_vertex(&self, start: EdgeIdx) -> Result<Vec<VertIdx>> {
        Ok(self
            .walk_around_edge(start)?
            .into_iter()
            .map(|e| self.origin(e))
            .collect())
    }

    /// Boundary vertices of a bounded face, counter-clockwise.
    pub fn walk_around_vertex_face(&self, f: FaceIdx) -> Result<Vec<VertIdx>> {
        Ok(self
            .walk_around_edge_face(f)?
            .into_iter()
            .map(|e| self.origin(e))
            .collect())
    }

    pub fn face_vertex_count(&self, f: FaceIdx) -> Result<usize> {
        Ok(self.walk_around_edge_face(f)?.len())
    }

    /// Twice the signed area enclosed by a bounded face.
    pub fn face_area_two(&self, f: FaceIdx) -> Result<Real> {
        let verts = self.walk_around_vertex_face(f)?;
        let anchor = self.point(verts[0]);
        Ok(verts
            .windows(2)
            .map(|w| area_two(&anchor, &self.point(w[0]), &self.point(w[1])))
            .sum())
    }

    /// Check that `next` and `prev` agree along the face loop.
    pub fn check_face_invariants(&self, f: FaceIdx) -> Result<()> {
        let edges = self.walk_around_edge_face(f)?;
        for &e in &edges {
            if self.prev(self.next(e)) != e || self.next(self.prev(e)) != e {
                return Err(GeometryError::BrokenCycle { start: e });
            }
            if self.destination(e) != self.origin(self.next(e)) {
                return Err(GeometryError::BrokenCycle { start: e });
            }
        }
        Ok(())
    }

    // ──────────────────────────── Vertex stars ────────────────────────────

    /// Half-edges leaving `v`, in rotation order starting at its incident edge.
    pub fn all_incident_edges(&self, v: VertIdx) -> Result<Vec<EdgeIdx>> {
        let start = self.verts[v as usize].incident_edge;
        let mut out = Vec::new();
        let mut e = start;
        loop {
            if out.len() >= self.edges.len() || self.origin(e) != v {
                return Err(GeometryError::BrokenCycle { start });
            }
            out.push(e);
            e = self.next(twin(e));
            if e == start {
                break;
            }
        }
        Ok(out)
    }

    /// O(degree) scan for an existing edge between `a` and `b`.
    pub fn is_already_connected(&self, a: VertIdx, b: VertIdx) -> Result<bool> {
        Ok(self
            .all_incident_edges(a)?
            .into_iter()
            .any(|e| self.destination(e) == b))
    }

    /// Among the half-edges leaving `destination`, the one a new edge
    /// origin -> destination must be followed by.
    pub fn first_clockwise_edge(&self, destination: VertIdx, origin: VertIdx) -> Result<EdgeIdx> {
        let (a, b) = (self.point(destination), self.point(origin));
        let outgoing = self.all_incident_edges(destination)?;
        let mut first = outgoing[0];
        for &e in &outgoing[1..] {
            let current = self.point(self.destination(first));
            let candidate = self.point(self.destination(e));
            if clockwise_angle_compare(&a, &b, &current, &candidate) == Ordering::Greater {
                first = e;
            }
        }
        Ok(first)
    }

    /// Among the half-edges entering `origin`, the one a new edge
    /// origin -> destination must follow.
    pub fn first_counter_clockwise_edge(&self, origin: VertIdx, destination: VertIdx) -> Result<EdgeIdx> {
        let (a, b) = (self.point(origin), self.point(destination));
        let incoming: Vec<EdgeIdx> = self.all_incident_edges(origin)?.into_iter().map(twin).collect();
        let mut first = incoming[0];
        for &e in &incoming[1..] {
            let current = self.point(self.origin(first));
            let candidate = self.point(self.origin(e));
            if clockwise_angle_compare(&a, &b, &current, &candidate) == Ordering::Less {
                first = e;
            }
        }
        Ok(first)
    }

    /// Assign `f` to every half-edge on the loop through `start`.
    pub fn reset_incident_face(&mut self, start: EdgeIdx, f: FaceIdx) -> Result<()> {
        let mut e = start;
        let mut steps = 0;
        loop {
            if steps >= self.edges.len() {
                return Err(GeometryError::BrokenCycle { start });
            }
            self.edges[e as usize].incident_face = f;
            e = self.next(e);
            steps += 1;
            if e == start {
                return Ok(());
            }
        }
    }

    // ──────────────────────────── Diagonals ───────────────────────────────

    /// Insert the diagonal left-right into the face both vertices bound.
    ///
    /// Returns the new face, or None when the vertices are already joined.
    /// The new face lies on the side of the half-edge leaving `right`; the
    /// split face keeps its index and is re-anchored on the half-edge leaving
    /// `left`. Cost is linear in the degree of the two endpoints.
    pub fn connect_helper(&mut self, left: VertIdx, right: VertIdx) -> Result<Option<FaceIdx>> {
        if self.is_already_connected(left, right)? {
            trace!(left, right, "diagonal already present");
            return Ok(None);
        }

        let into_left = self.first_clockwise_edge(left, right)?;
        let before_left = self.first_counter_clockwise_edge(left, right)?;
        let into_right = self.first_clockwise_edge(right, left)?;
        let before_right = self.first_counter_clockwise_edge(right, left)?;

        let old_face = self.edges[into_right as usize].incident_face;
        let other_face = self.edges[into_left as usize].incident_face;
        if other_face != old_face {
            return Err(GeometryError::FaceMismatch {
                edge: into_left,
                expected: old_face,
                found: other_face,
            });
        }
        if self.face(old_face)?.out_component.is_none() {
            return Err(GeometryError::DiagonalOnUnboundedFace { from: left, to: right });
        }

        let newer = self.edges.len() as EdgeIdx;
        let older = twin(newer);
        let new_face = self.faces.len() as FaceIdx;
        self.edges.push(HalfEdge {
            origin: right,
            next: into_left,
            prev: before_right,
            incident_face: new_face,
        });
        self.edges.push(HalfEdge {
            origin: left,
            next: into_right,
            prev: before_left,
            incident_face: old_face,
        });
        self.edges[into_left as usize].prev = newer;
        self.edges[before_right as usize].next = newer;
        self.edges[into_right as usize].prev = older;
        self.edges[before_left as usize].next = older;

        self.faces.push(Face {
            out_component: Some(newer),
            inner_components: Vec::new(),
        });
        self.reset_incident_face(newer, new_face)?;
        self.faces[old_face as usize].out_component = Some(older);

        let diagonal = Diagonal {
            from: left,
            to: right,
            edge: older,
            face: new_face,
        };
        debug!(from = left, to = right, face = new_face, "inserted diagonal");
        self.diagonals.push(diagonal);
        if let Some(observer) = self.observer.as_mut() {
            observer(&diagonal);
        }
        Ok(Some(new_face))
    }

    // ──────────────────────────── Point location ──────────────────────────

    /// Strictly inside a convex bounded face (every face after triangulation).
    pub fn is_inside_face(&self, f: FaceIdx, p: &Point) -> Result<bool> {
        let edges = self.walk_around_edge_face(f)?;
        Ok(edges.iter().all(|&e| {
            let a = self.point(self.origin(e));
            let b = self.point(self.destination(e));
            to_left_rigorously(&a, &b, p)
        }))
    }

    /// On the boundary of a bounded face.
    pub fn is_on_face(&self, f: FaceIdx, p: &Point) -> Result<bool> {
        let edges = self.walk_around_edge_face(f)?;
        Ok(edges.iter().any(|&e| {
            let a = self.point(self.origin(e));
            let b = self.point(self.destination(e));
            is_collinear(&a, &b, p) && within_span(a.x, b.x, p.x) && within_span(a.y, b.y, p.y)
        }))
    }

    /// First bounded face containing `p`, boundary included.
    pub fn in_which_face(&self, p: &Point) -> Result<Option<FaceIdx>> {
        for f in self.bounded_faces() {
            if self.is_inside_face(f, p)? || self.is_on_face(f, p)? {
                return Ok(Some(f));
            }
        }
        Ok(None)
    }
}

fn within_span(a: Real, b: Real, v: Real) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    (v > lo || is_equal(v, lo)) && (v < hi || is_equal(v, hi))
}
