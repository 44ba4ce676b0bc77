// Copyright 2025 Lars Brubaker
// License: MIT
//
// Sweep event queue.
//
// Neither sweep creates events while it runs, so the queue is a key array
// sorted once up front: keys are boundary half-edges ordered by their origin
// from lowest to highest, and events are extracted from the back.

use std::cmp::Ordering;

use crate::dcel::{Dcel, EdgeIdx};
use crate::geom::sort_by_y;

pub struct EventQueue {
    /// Ascending by origin (y, then x).
    keys: Vec<EdgeIdx>,
}

impl EventQueue {
    pub fn new(dcel: &Dcel, mut keys: Vec<EdgeIdx>) -> Self {
        keys.sort_by(|&a, &b| event_order(dcel, a, b));
        EventQueue { keys }
    }

    /// Remove and return the highest event: largest y, and among level
    /// vertices the one with the largest x.
    pub fn extract_max(&mut self) -> Option<EdgeIdx> {
        self.keys.pop()
    }

    pub fn peek_max(&self) -> Option<EdgeIdx> {
        self.keys.last().copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Remaining events, lowest first.
    pub fn as_ascending(&self) -> &[EdgeIdx] {
        &self.keys
    }
}

fn event_order(dcel: &Dcel, a: EdgeIdx, b: EdgeIdx) -> Ordering {
    sort_by_y(&dcel.point(dcel.origin(a)), &dcel.point(dcel.origin(b)))
}
