// Copyright 2025 Lars Brubaker
// License: MIT
//
// Error type shared by every stage of the pipeline.
//
// Precondition errors report bad input. Invariant errors mean the DCEL or the
// status structure reached a state the algorithms never produce on valid
// input; they always abort the whole call.

use crate::dcel::{EdgeIdx, FaceIdx, VertIdx};

pub type Result<T> = std::result::Result<T, GeometryError>;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("vertex {index} has a non-finite coordinate")]
    InvalidCoordinate { index: usize },

    #[error("polygon boundary must be counter-clockwise (signed area {area})")]
    NotCounterClockwise { area: f64 },

    /// Boundary edges `first` and `second` cross, touch or overlap. Edge i
    /// runs from point i to point i + 1 of the checked boundary; a
    /// zero-length edge is reported against itself.
    #[error("polygon is not simple: edges {first} and {second} intersect")]
    NotSimple { first: usize, second: usize },

    #[error("face {0} is unbounded and has no outer component")]
    UnboundedFace(FaceIdx),

    #[error("face {0} does not exist")]
    NotAFace(FaceIdx),

    #[error("half-edge walk from {start} did not return to its start")]
    BrokenCycle { start: EdgeIdx },

    #[error("half-edge {edge} lies on face {found}, expected face {expected}")]
    FaceMismatch {
        edge: EdgeIdx,
        expected: FaceIdx,
        found: FaceIdx,
    },

    #[error("no status edge passes through vertex {0}")]
    MissingStatusEdge(VertIdx),

    #[error("no status edge lies left of vertex {0}")]
    NoEdgeLeftOf(VertIdx),

    #[error("vertex {0} was never classified")]
    UnclassifiedVertex(VertIdx),

    #[error("vertex {0} has no chain assigned")]
    UnassignedChain(VertIdx),

    #[error("diagonal {from}-{to} would split the unbounded face")]
    DiagonalOnUnboundedFace { from: VertIdx, to: VertIdx },

    #[error("{0} status edges left after the sweep")]
    StatusNotEmpty(usize),

    #[error("face {face} has {edges} edges after triangulation")]
    NotATriangle { face: FaceIdx, edges: usize },
}

impl GeometryError {
    /// The caller handed in something the algorithms do not accept.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            GeometryError::TooFewVertices(_)
                | GeometryError::InvalidCoordinate { .. }
                | GeometryError::NotCounterClockwise { .. }
                | GeometryError::NotSimple { .. }
                | GeometryError::UnboundedFace(_)
                | GeometryError::NotAFace(_)
        )
    }

    /// Internal bookkeeping went wrong.
    pub fn is_invariant_violation(&self) -> bool {
        !self.is_precondition()
    }
}
