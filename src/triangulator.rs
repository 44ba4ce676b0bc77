// Copyright 2025 Lars Brubaker
// License: MIT
//
// Top-level pipeline: polygon in, triangles out.
//
// One call runs clean-up, DCEL construction, monotone decomposition and
// monotone triangulation. Output refers to the caller's vertex indices, so
// dropped collinear points and a reversed boundary never leak out.

use tracing::debug;

use crate::dcel::{Dcel, Diagonal, DiagonalObserver, FaceIdx, INNER_FACE};
use crate::error::{GeometryError, Result};
use crate::geom::Point;
use crate::monotone::make_monotone;
use crate::polygon::{is_counter_clockwise, remove_points_on_the_same_line};
use crate::triangulate::triangulate_faces;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TriOption {
    /// Drop vertices lying on the line through their neighbours before
    /// building the DCEL. Off by default.
    RemoveCollinear,
    /// Accept clockwise input by reversing it. On by default; when off,
    /// clockwise input fails with `NotCounterClockwise`.
    FixOrientation,
}

pub struct Triangulator {
    remove_collinear: bool,
    fix_orientation: bool,
    observer: Option<DiagonalObserver>,

    // Output of the last successful run
    input: Vec<Point>,
    dcel: Option<Dcel>,
    triangles: Vec<[u32; 3]>,
    monotone_faces: usize,
}

impl Triangulator {
    pub fn new() -> Self {
        Triangulator {
            remove_collinear: false,
            fix_orientation: true,
            observer: None,
            input: Vec::new(),
            dcel: None,
            triangles: Vec::new(),
            monotone_faces: 0,
        }
    }

    pub fn set_option(&mut self, option: TriOption, value: bool) {
        match option {
            TriOption::RemoveCollinear => self.remove_collinear = value,
            TriOption::FixOrientation => self.fix_orientation = value,
        }
    }

    /// Called once per diagonal, in insertion order, by every later run.
    pub fn set_diagonal_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&Diagonal) + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_diagonal_observer(&mut self) {
        self.observer = None;
    }

    /// Triangulate a simple polygon. On error the previous output is gone
    /// and nothing of the failed run is kept.
    pub fn triangulate(&mut self, points: &[Point]) -> Result<()> {
        self.input.clear();
        self.dcel = None;
        self.triangles.clear();
        self.monotone_faces = 0;

        if points.len() < 3 {
            return Err(GeometryError::TooFewVertices(points.len()));
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::InvalidCoordinate { index });
        }

        let mut ids: Vec<usize> = if self.remove_collinear {
            remove_points_on_the_same_line(points)
        } else {
            (0..points.len()).collect()
        };
        let mut boundary: Vec<Point> = ids.iter().map(|&i| points[i]).collect();
        if self.fix_orientation && !is_counter_clockwise(&boundary) {
            boundary.reverse();
            ids.reverse();
        }
        debug!(input = points.len(), kept = boundary.len(), "triangulating polygon");

        let mut dcel = Dcel::from_polygon(&boundary)?;
        for (v, &id) in dcel.verts.iter_mut().zip(&ids) {
            v.id = id as u32;
        }
        if let Some(observer) = self.observer.take() {
            dcel.set_diagonal_observer(observer);
        }
        let result = run_stages(&mut dcel);
        self.observer = dcel.take_diagonal_observer();
        let (monotone_faces, triangles) = result?;

        debug!(
            monotone_faces,
            triangles = triangles.len(),
            diagonals = dcel.diagonals().len(),
            "triangulation done"
        );
        self.input = points.to_vec();
        self.monotone_faces = monotone_faces;
        self.triangles = triangles;
        self.dcel = Some(dcel);
        Ok(())
    }

    /// Triangles of the last run as counter-clockwise triples of input
    /// indices.
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of y-monotone pieces the decomposition produced.
    pub fn monotone_face_count(&self) -> usize {
        self.monotone_faces
    }

    /// Every diagonal of the last run: decomposition first, then triangulation.
    pub fn diagonals(&self) -> &[Diagonal] {
        self.dcel.as_ref().map(|d| d.diagonals()).unwrap_or(&[])
    }

    pub fn dcel(&self) -> Option<&Dcel> {
        self.dcel.as_ref()
    }

    /// The points passed to the last successful run.
    pub fn vertices(&self) -> &[Point] {
        &self.input
    }
}

impl Default for Triangulator {
    fn default() -> Self {
        Self::new()
    }
}

fn run_stages(dcel: &mut Dcel) -> Result<(usize, Vec<[u32; 3]>)> {
    let mut monotone = vec![INNER_FACE];
    monotone.extend(make_monotone(dcel, INNER_FACE)?);
    debug!(faces = monotone.len(), "monotone decomposition done");

    triangulate_faces(dcel, &monotone)?;

    let faces: Vec<FaceIdx> = dcel.bounded_faces().collect();
    let mut triangles = Vec::with_capacity(faces.len());
    for face in faces {
        let verts = dcel.walk_around_vertex_face(face)?;
        let &[a, b, c] = verts.as_slice() else {
            return Err(GeometryError::NotATriangle {
                face,
                edges: verts.len(),
            });
        };
        let id = |v: u32| dcel.verts[v as usize].id;
        triangles.push([id(a), id(b), id(c)]);
    }
    Ok((monotone.len(), triangles))
}

/// Triangulate `points` with default options and return the triangles as
/// input-index triples.
pub fn triangulate_polygon(points: &[Point]) -> Result<Vec<[u32; 3]>> {
    let mut tri = Triangulator::new();
    tri.triangulate(points)?;
    Ok(tri.triangles)
}
