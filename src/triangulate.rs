// Copyright 2025 Lars Brubaker
// License: MIT
//
// Triangulation of y-monotone faces.
//
// The boundary of a monotone face splits at its top and bottom vertices into
// a left and a right chain. Vertices are visited top to bottom while a stack
// holds the vertices that still have an unresolved reflex chain below them;
// every diagonal goes through Dcel::connect_helper.

use tracing::debug;

use crate::dcel::{Dcel, FaceIdx, VertIdx};
use crate::error::{GeometryError, Result};
use crate::geom::{sort_by_y, to_left_rigorously};
use crate::priorityq::EventQueue;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Chain {
    Left,
    Right,
}

/// Tag the vertices of `face`: walking counter-clockwise, the top vertex up
/// to (not including) the bottom one form the left chain, the rest the right.
/// Top and bottom use the same (y, x) order as the sweep.
pub fn find_left_and_right_chain_vertices(dcel: &mut Dcel, face: FaceIdx) -> Result<()> {
    let verts = dcel.walk_around_vertex_face(face)?;
    let n = verts.len();
    let mut top = 0;
    let mut bottom = 0;
    for i in 1..n {
        let p = dcel.point(verts[i]);
        if sort_by_y(&p, &dcel.point(verts[top])).is_gt() {
            top = i;
        }
        if sort_by_y(&p, &dcel.point(verts[bottom])).is_lt() {
            bottom = i;
        }
    }

    let mut i = top;
    while i != bottom {
        dcel.verts[verts[i] as usize].chain = Some(Chain::Left);
        i = (i + 1) % n;
    }
    while i != top {
        dcel.verts[verts[i] as usize].chain = Some(Chain::Right);
        i = (i + 1) % n;
    }
    Ok(())
}

fn chain_of(dcel: &Dcel, v: VertIdx) -> Result<Chain> {
    dcel.verts[v as usize]
        .chain
        .ok_or(GeometryError::UnassignedChain(v))
}

/// Triangulate one monotone face. A face with m vertices receives m - 3
/// diagonals; the new faces are returned and `face` itself becomes one of
/// the m - 2 triangles.
pub fn triangulate_monotone_polygon(dcel: &mut Dcel, face: FaceIdx) -> Result<Vec<FaceIdx>> {
    find_left_and_right_chain_vertices(dcel, face)?;
    let boundary = dcel.walk_around_edge_face(face)?;
    let queue = EventQueue::new(dcel, boundary);
    let sorted: Vec<VertIdx> = queue.as_ascending().iter().map(|&e| dcel.origin(e)).collect();
    let n = sorted.len();

    let mut new_faces = Vec::new();
    if n <= 3 {
        return Ok(new_faces);
    }
    debug!(face, vertices = n, "triangulating monotone face");

    let mut stack = vec![sorted[n - 1], sorted[n - 2]];
    for &u in sorted[1..n - 2].iter().rev() {
        let Some(&top) = stack.last() else {
            break;
        };
        let u_chain = chain_of(dcel, u)?;

        if u_chain != chain_of(dcel, top)? {
            // Opposite chains: u sees every vertex on the stack.
            while stack.len() > 1 {
                if let Some(w) = stack.pop() {
                    connect(dcel, u, w, &mut new_faces)?;
                }
            }
            stack.clear();
            stack.push(top);
            stack.push(u);
        } else {
            let mut prev = top;
            stack.pop();
            while let Some(&peek) = stack.last() {
                let (a, b, c) = (dcel.point(peek), dcel.point(prev), dcel.point(u));
                let inside = match u_chain {
                    Chain::Left => to_left_rigorously(&a, &b, &c),
                    Chain::Right => to_left_rigorously(&c, &b, &a),
                };
                if !inside {
                    break;
                }
                stack.pop();
                prev = peek;
                connect(dcel, u, prev, &mut new_faces)?;
            }
            stack.push(prev);
            stack.push(u);
        }
    }

    // The bottom vertex sees everything left on the stack but its ends.
    let u = sorted[0];
    stack.pop();
    while stack.len() > 1 {
        if let Some(w) = stack.pop() {
            connect(dcel, u, w, &mut new_faces)?;
        }
    }
    Ok(new_faces)
}

fn connect(dcel: &mut Dcel, from: VertIdx, to: VertIdx, new_faces: &mut Vec<FaceIdx>) -> Result<()> {
    if let Some(f) = dcel.connect_helper(from, to)? {
        new_faces.push(f);
    }
    Ok(())
}

/// Triangulate every bounded face in `faces`; the unbounded face is skipped.
pub fn triangulate_faces(dcel: &mut Dcel, faces: &[FaceIdx]) -> Result<Vec<FaceIdx>> {
    let mut triangles = Vec::new();
    for &face in faces {
        if dcel.face(face)?.out_component.is_none() {
            continue;
        }
        triangles.extend(triangulate_monotone_polygon(dcel, face)?);
    }
    Ok(triangles)
}
