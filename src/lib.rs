// monotri: simple polygon triangulation by monotone decomposition
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod bucketalloc;
pub mod dcel;
pub mod error;
pub mod geom;
pub mod monotone;
pub mod polygon;
pub mod priorityq;
pub mod rbtree;
pub mod sweep;
pub mod triangulate;
pub mod triangulator;

pub use dcel::{Dcel, Diagonal, EdgeIdx, FaceIdx, VertIdx, INNER_FACE, OUTER_FACE};
pub use error::{GeometryError, Result};
pub use geom::{Line, Point, Real};
pub use monotone::{make_monotone, VertexType};
pub use rbtree::{FnOrder, KeyOrder, NaturalOrder, RedBlackTree};
pub use triangulate::{triangulate_monotone_polygon, Chain};
pub use triangulator::{triangulate_polygon, TriOption, Triangulator};
