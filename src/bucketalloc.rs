// Copyright 2025 Lars Brubaker
// License: MIT
//
// Vec-backed arena with a free list.
//
// The status tree allocates and frees a node for every active edge, so slots
// are recycled rather than letting the backing Vec grow for the whole sweep.

use std::ops::{Index, IndexMut};

/// Slot index handed out by `BucketAlloc`.
pub type SlotIdx = u32;

/// A simple arena allocator backed by a Vec.
/// Items are allocated by pushing to the vec and freed via a freelist.
pub struct BucketAlloc<T> {
    items: Vec<Option<T>>,
    free_list: Vec<SlotIdx>,
    live: usize,
}

impl<T> BucketAlloc<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Store `value`, returning its slot.
    pub fn alloc(&mut self, value: T) -> SlotIdx {
        self.live += 1;
        if let Some(idx) = self.free_list.pop() {
            self.items[idx as usize] = Some(value);
            idx
        } else {
            let idx = self.items.len() as SlotIdx;
            self.items.push(Some(value));
            idx
        }
    }

    /// Free a slot and hand back what it held. Freeing an empty slot is a no-op.
    pub fn free(&mut self, idx: SlotIdx) -> Option<T> {
        let value = self.items.get_mut(idx as usize)?.take()?;
        self.free_list.push(idx);
        self.live -= 1;
        Some(value)
    }

    pub fn get(&self, idx: SlotIdx) -> Option<&T> {
        self.items.get(idx as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, idx: SlotIdx) -> Option<&mut T> {
        self.items.get_mut(idx as usize)?.as_mut()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.free_list.clear();
        self.live = 0;
    }
}

impl<T> Default for BucketAlloc<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<SlotIdx> for BucketAlloc<T> {
    type Output = T;

    fn index(&self, idx: SlotIdx) -> &T {
        match self.get(idx) {
            Some(item) => item,
            None => panic!("arena slot {} is not allocated", idx),
        }
    }
}

impl<T> IndexMut<SlotIdx> for BucketAlloc<T> {
    fn index_mut(&mut self, idx: SlotIdx) -> &mut T {
        match self.get_mut(idx) {
            Some(item) => item,
            None => panic!("arena slot {} is not allocated", idx),
        }
    }
}
