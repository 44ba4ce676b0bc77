// Copyright 2025 Lars Brubaker
// License: MIT
//
// Left-leaning red-black tree with an injectable comparator.
//
// The comparator receives the stored key mutably together with the query, so
// keys that describe moving geometry (status-structure edges) can be brought
// up to date at the query position before they are compared. Nodes live in a
// BucketAlloc arena and are linked by index; NIL = u32::MAX is the null link.
//
// The tree is an ordered set: a key is its own payload. `lower`/`higher`/`get`
// hand out `&mut K` so the caller may update the non-ordering parts of a key
// (the helper vertex of a status edge) in place.

use std::cmp::Ordering;
use std::mem;

use crate::bucketalloc::{BucketAlloc, SlotIdx};

/// Index into the node arena.
pub type NodeIdx = SlotIdx;

const NIL: NodeIdx = u32::MAX;

/// Orders stored keys of type `K` against queries of type `Q`.
///
/// `compare(key, query)` returns the position of `key` relative to `query`:
/// `Greater` means the stored key sorts after the query. Implementations may
/// mutate `key` (re-evaluate it at the query) but must not change its identity.
pub trait KeyOrder<K, Q: ?Sized = K> {
    fn compare(&self, key: &mut K, query: &Q) -> Ordering;
}

/// `Ord` ordering of the keys themselves.
#[derive(Copy, Clone, Debug, Default)]
pub struct NaturalOrder;

impl<K: Ord> KeyOrder<K> for NaturalOrder {
    fn compare(&self, key: &mut K, query: &K) -> Ordering {
        K::cmp(key, query)
    }
}

/// Wraps a closure as a comparator.
#[derive(Copy, Clone, Debug)]
pub struct FnOrder<F>(pub F);

impl<K, Q: ?Sized, F> KeyOrder<K, Q> for FnOrder<F>
where
    F: Fn(&mut K, &Q) -> Ordering,
{
    fn compare(&self, key: &mut K, query: &Q) -> Ordering {
        (self.0)(key, query)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Debug)]
struct TreeNode<K> {
    key: K,
    left: NodeIdx,
    right: NodeIdx,
    color: Color,
    /// Number of nodes in the subtree rooted here.
    size: usize,
}

pub struct RedBlackTree<K, C = NaturalOrder> {
    nodes: BucketAlloc<TreeNode<K>>,
    root: NodeIdx,
    order: C,
}

impl<K: Ord> RedBlackTree<K, NaturalOrder> {
    pub fn new() -> Self {
        Self::with_order(NaturalOrder)
    }
}

impl<K: Ord> Default for RedBlackTree<K, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> RedBlackTree<K, C> {
    pub fn with_order(order: C) -> Self {
        RedBlackTree {
            nodes: BucketAlloc::new(),
            root: NIL,
            order,
        }
    }

    pub fn len(&self) -> usize {
        self.size_of(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NIL;
    }

    /// Smallest key, without re-evaluation.
    pub fn min(&self) -> Option<&K> {
        let mut h = self.root;
        if h == NIL {
            return None;
        }
        while self.nodes[h].left != NIL {
            h = self.nodes[h].left;
        }
        Some(&self.nodes[h].key)
    }

    /// Largest key, without re-evaluation.
    pub fn max(&self) -> Option<&K> {
        let mut h = self.root;
        if h == NIL {
            return None;
        }
        while self.nodes[h].right != NIL {
            h = self.nodes[h].right;
        }
        Some(&self.nodes[h].key)
    }

    /// Keys in order.
    pub fn keys(&self) -> Vec<&K> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut h = self.root;
        while h != NIL || !stack.is_empty() {
            while h != NIL {
                stack.push(h);
                h = self.nodes[h].left;
            }
            if let Some(top) = stack.pop() {
                out.push(&self.nodes[top].key);
                h = self.nodes[top].right;
            }
        }
        out
    }

    pub fn delete_min(&mut self) -> Option<K> {
        if self.root == NIL {
            return None;
        }
        self.redden_root_for_delete();
        let mut removed = None;
        self.root = self.delete_min_at(self.root, &mut removed);
        self.blacken_root();
        removed
    }

    pub fn delete_max(&mut self) -> Option<K> {
        if self.root == NIL {
            return None;
        }
        self.redden_root_for_delete();
        let mut removed = None;
        self.root = self.delete_max_at(self.root, &mut removed);
        self.blacken_root();
        removed
    }

    /// Verify the left-leaning red-black shape: black root, no red right
    /// links, no two reds in a row, equal black height on every path and
    /// consistent subtree sizes.
    pub fn check_invariants(&self) -> bool {
        if self.root != NIL && self.is_red(self.root) {
            return false;
        }
        self.black_height_of(self.root).is_some() && self.len() == self.nodes.len()
    }

    fn black_height_of(&self, h: NodeIdx) -> Option<usize> {
        if h == NIL {
            return Some(0);
        }
        let node = &self.nodes[h];
        if self.is_red(node.right) {
            return None;
        }
        if node.color == Color::Red && self.is_red(node.left) {
            return None;
        }
        if node.size != 1 + self.size_of(node.left) + self.size_of(node.right) {
            return None;
        }
        let left = self.black_height_of(node.left)?;
        let right = self.black_height_of(node.right)?;
        if left != right {
            return None;
        }
        Some(left + usize::from(node.color == Color::Black))
    }

    // ─── Node helpers ────────────────────────────────────────────────────────

    fn is_red(&self, h: NodeIdx) -> bool {
        h != NIL && self.nodes[h].color == Color::Red
    }

    fn size_of(&self, h: NodeIdx) -> usize {
        if h == NIL {
            0
        } else {
            self.nodes[h].size
        }
    }

    fn left_of(&self, h: NodeIdx) -> NodeIdx {
        if h == NIL {
            NIL
        } else {
            self.nodes[h].left
        }
    }

    fn right_of(&self, h: NodeIdx) -> NodeIdx {
        if h == NIL {
            NIL
        } else {
            self.nodes[h].right
        }
    }

    fn update_size(&mut self, h: NodeIdx) {
        let size = 1 + self.size_of(self.nodes[h].left) + self.size_of(self.nodes[h].right);
        self.nodes[h].size = size;
    }

    fn rotate_left(&mut self, h: NodeIdx) -> NodeIdx {
        let x = self.nodes[h].right;
        self.nodes[h].right = self.nodes[x].left;
        self.nodes[x].left = h;
        self.nodes[x].color = self.nodes[h].color;
        self.nodes[h].color = Color::Red;
        self.nodes[x].size = self.nodes[h].size;
        self.update_size(h);
        x
    }

    fn rotate_right(&mut self, h: NodeIdx) -> NodeIdx {
        let x = self.nodes[h].left;
        self.nodes[h].left = self.nodes[x].right;
        self.nodes[x].right = h;
        self.nodes[x].color = self.nodes[h].color;
        self.nodes[h].color = Color::Red;
        self.nodes[x].size = self.nodes[h].size;
        self.update_size(h);
        x
    }

    fn toggle(&mut self, h: NodeIdx) {
        if h != NIL {
            let node = &mut self.nodes[h];
            node.color = match node.color {
                Color::Red => Color::Black,
                Color::Black => Color::Red,
            };
        }
    }

    fn flip_colors(&mut self, h: NodeIdx) {
        let (left, right) = (self.nodes[h].left, self.nodes[h].right);
        self.toggle(h);
        self.toggle(left);
        self.toggle(right);
    }

    fn balance(&mut self, mut h: NodeIdx) -> NodeIdx {
        if self.is_red(self.right_of(h)) && !self.is_red(self.left_of(h)) {
            h = self.rotate_left(h);
        }
        if self.is_red(self.left_of(h)) && self.is_red(self.left_of(self.left_of(h))) {
            h = self.rotate_right(h);
        }
        if self.is_red(self.left_of(h)) && self.is_red(self.right_of(h)) {
            self.flip_colors(h);
        }
        self.update_size(h);
        h
    }

    // Assuming h is red and both h.left and h.left.left are black,
    // make h.left or one of its children red.
    fn move_red_left(&mut self, mut h: NodeIdx) -> NodeIdx {
        self.flip_colors(h);
        let right = self.right_of(h);
        if self.is_red(self.left_of(right)) {
            let new_right = self.rotate_right(right);
            self.nodes[h].right = new_right;
            h = self.rotate_left(h);
            self.flip_colors(h);
        }
        h
    }

    // Assuming h is red and both h.right and h.right.left are black,
    // make h.right or one of its children red.
    fn move_red_right(&mut self, mut h: NodeIdx) -> NodeIdx {
        self.flip_colors(h);
        if self.is_red(self.left_of(self.left_of(h))) {
            h = self.rotate_right(h);
            self.flip_colors(h);
        }
        h
    }

    fn redden_root_for_delete(&mut self) {
        let root = self.root;
        if !self.is_red(self.left_of(root)) && !self.is_red(self.right_of(root)) {
            self.nodes[root].color = Color::Red;
        }
    }

    fn blacken_root(&mut self) {
        let root = self.root;
        if root != NIL {
            self.nodes[root].color = Color::Black;
        }
    }

    fn delete_min_at(&mut self, mut h: NodeIdx, removed: &mut Option<K>) -> NodeIdx {
        if self.left_of(h) == NIL {
            *removed = self.nodes.free(h).map(|node| node.key);
            return NIL;
        }
        let left = self.left_of(h);
        if !self.is_red(left) && !self.is_red(self.left_of(left)) {
            h = self.move_red_left(h);
        }
        let new_left = self.delete_min_at(self.left_of(h), removed);
        self.nodes[h].left = new_left;
        self.balance(h)
    }

    fn delete_max_at(&mut self, mut h: NodeIdx, removed: &mut Option<K>) -> NodeIdx {
        if self.is_red(self.left_of(h)) {
            h = self.rotate_right(h);
        }
        if self.right_of(h) == NIL {
            *removed = self.nodes.free(h).map(|node| node.key);
            return NIL;
        }
        let right = self.right_of(h);
        if !self.is_red(right) && !self.is_red(self.left_of(right)) {
            h = self.move_red_right(h);
        }
        let new_right = self.delete_max_at(self.right_of(h), removed);
        self.nodes[h].right = new_right;
        self.balance(h)
    }
}

// ─── Comparator-driven operations ────────────────────────────────────────────

impl<K, C> RedBlackTree<K, C> {
    /// Insert `key`, replacing a key that compares equal to it.
    pub fn put(&mut self, key: K)
    where
        C: KeyOrder<K>,
    {
        self.root = self.put_at(self.root, key);
        self.blacken_root();
    }

    /// The stored key equal to `query`, if any.
    pub fn get<Q: ?Sized>(&mut self, query: &Q) -> Option<&mut K>
    where
        C: KeyOrder<K, Q>,
    {
        let h = self.find(query);
        if h == NIL {
            None
        } else {
            Some(&mut self.nodes[h].key)
        }
    }

    pub fn contains<Q: ?Sized>(&mut self, query: &Q) -> bool
    where
        C: KeyOrder<K, Q>,
    {
        self.find(query) != NIL
    }

    /// Largest key strictly less than `query`. The caller may update the
    /// returned key's payload in place.
    pub fn lower<Q: ?Sized>(&mut self, query: &Q) -> Option<&mut K>
    where
        C: KeyOrder<K, Q>,
    {
        let mut best = NIL;
        let mut h = self.root;
        while h != NIL {
            if self.compare_at(h, query) == Ordering::Less {
                best = h;
                h = self.nodes[h].right;
            } else {
                h = self.nodes[h].left;
            }
        }
        if best == NIL {
            None
        } else {
            Some(&mut self.nodes[best].key)
        }
    }

    /// Smallest key strictly greater than `query`.
    pub fn higher<Q: ?Sized>(&mut self, query: &Q) -> Option<&mut K>
    where
        C: KeyOrder<K, Q>,
    {
        let mut best = NIL;
        let mut h = self.root;
        while h != NIL {
            if self.compare_at(h, query) == Ordering::Greater {
                best = h;
                h = self.nodes[h].left;
            } else {
                h = self.nodes[h].right;
            }
        }
        if best == NIL {
            None
        } else {
            Some(&mut self.nodes[best].key)
        }
    }

    /// Remove the key equal to `query` and return it, payload included.
    pub fn delete<Q: ?Sized>(&mut self, query: &Q) -> Option<K>
    where
        C: KeyOrder<K, Q>,
    {
        if self.find(query) == NIL {
            return None;
        }
        self.redden_root_for_delete();
        let mut removed = None;
        self.root = self.delete_at(self.root, query, &mut removed);
        self.blacken_root();
        removed
    }

    fn compare_at<Q: ?Sized>(&mut self, h: NodeIdx, query: &Q) -> Ordering
    where
        C: KeyOrder<K, Q>,
    {
        self.order.compare(&mut self.nodes[h].key, query)
    }

    fn find<Q: ?Sized>(&mut self, query: &Q) -> NodeIdx
    where
        C: KeyOrder<K, Q>,
    {
        let mut h = self.root;
        while h != NIL {
            match self.compare_at(h, query) {
                Ordering::Greater => h = self.nodes[h].left,
                Ordering::Less => h = self.nodes[h].right,
                Ordering::Equal => return h,
            }
        }
        NIL
    }

    fn put_at(&mut self, h: NodeIdx, key: K) -> NodeIdx
    where
        C: KeyOrder<K>,
    {
        if h == NIL {
            return self.nodes.alloc(TreeNode {
                key,
                left: NIL,
                right: NIL,
                color: Color::Red,
                size: 1,
            });
        }
        match self.compare_at(h, &key) {
            Ordering::Greater => {
                let new_left = self.put_at(self.nodes[h].left, key);
                self.nodes[h].left = new_left;
            }
            Ordering::Less => {
                let new_right = self.put_at(self.nodes[h].right, key);
                self.nodes[h].right = new_right;
            }
            Ordering::Equal => self.nodes[h].key = key,
        }
        self.balance(h)
    }

    fn delete_at<Q: ?Sized>(&mut self, mut h: NodeIdx, query: &Q, removed: &mut Option<K>) -> NodeIdx
    where
        C: KeyOrder<K, Q>,
    {
        if h == NIL {
            return NIL;
        }
        if self.compare_at(h, query) == Ordering::Greater {
            let left = self.left_of(h);
            if !self.is_red(left) && !self.is_red(self.left_of(left)) {
                h = self.move_red_left(h);
            }
            let new_left = self.delete_at(self.left_of(h), query, removed);
            self.nodes[h].left = new_left;
        } else {
            if self.is_red(self.left_of(h)) {
                h = self.rotate_right(h);
            }
            if self.right_of(h) == NIL && self.compare_at(h, query) == Ordering::Equal {
                *removed = self.nodes.free(h).map(|node| node.key);
                return NIL;
            }
            let right = self.right_of(h);
            if !self.is_red(right) && !self.is_red(self.left_of(right)) {
                h = self.move_red_right(h);
            }
            if self.compare_at(h, query) == Ordering::Equal {
                // Replace h's key with its successor, then drop the successor's node.
                let mut successor = None;
                let new_right = self.delete_min_at(self.right_of(h), &mut successor);
                self.nodes[h].right = new_right;
                if let Some(next) = successor {
                    *removed = Some(mem::replace(&mut self.nodes[h].key, next));
                }
            } else {
                let new_right = self.delete_at(self.right_of(h), query, removed);
                self.nodes[h].right = new_right;
            }
        }
        self.balance(h)
    }
}
