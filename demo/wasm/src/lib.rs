// Copyright 2025 Lars Brubaker
// License: MIT
//
// WASM bindings for monotri

use monotri::{Point, TriOption, Triangulator};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

/// Collects one polygon boundary, then triangulates it.
#[wasm_bindgen]
pub struct TriangulatorJs {
    inner: Triangulator,
    points: Vec<Point>,
    last_error: Option<String>,
}

#[wasm_bindgen]
impl TriangulatorJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TriangulatorJs {
        TriangulatorJs {
            inner: Triangulator::new(),
            points: Vec::new(),
            last_error: None,
        }
    }

    /// Set the boundary from a flat [x0,y0, x1,y1, ...] Float64Array.
    /// A trailing odd coordinate is ignored.
    pub fn add_contour(&mut self, vertices: &[f64]) {
        self.points = vertices
            .chunks_exact(2)
            .map(|c| Point::new(c[0], c[1]))
            .collect();
    }

    /// Set an option (0 = RemoveCollinear, 1 = FixOrientation).
    pub fn set_option(&mut self, option: u32, value: bool) {
        let opt = match option {
            0 => TriOption::RemoveCollinear,
            1 => TriOption::FixOrientation,
            _ => return,
        };
        self.inner.set_option(opt, value);
    }

    /// Triangulate and return true on success; see `last_error` otherwise.
    pub fn triangulate(&mut self) -> bool {
        match self.inner.triangulate(&self.points) {
            Ok(()) => {
                self.last_error = None;
                true
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.clone()
    }

    pub fn triangle_count(&self) -> u32 {
        self.inner.triangle_count() as u32
    }

    pub fn monotone_face_count(&self) -> u32 {
        self.inner.monotone_face_count() as u32
    }

    /// Flat triangle vertex-index triples [i0,i1,i2, ...] into the input.
    pub fn get_triangles(&self) -> Vec<u32> {
        self.inner.triangles().iter().flatten().copied().collect()
    }

    /// Flat diagonal endpoint pairs [from0,to0, from1,to1, ...] in insertion order.
    pub fn get_diagonals(&self) -> Vec<u32> {
        let Some(dcel) = self.inner.dcel() else {
            return Vec::new();
        };
        self.inner
            .diagonals()
            .iter()
            .flat_map(|d| [dcel.verts[d.from as usize].id, dcel.verts[d.to as usize].id])
            .collect()
    }
}

impl Default for TriangulatorJs {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience: triangulate a single boundary and return the index triples.
/// Returns an empty array when the polygon is rejected.
#[wasm_bindgen]
pub fn triangulate_polygon_elements(vertices: &[f64]) -> Vec<u32> {
    let mut t = TriangulatorJs::new();
    t.add_contour(vertices);
    if !t.triangulate() {
        return Vec::new();
    }
    t.get_triangles()
}
