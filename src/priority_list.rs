//! Height-ordered bucket queue used exclusively by the top-down matcher
//! (spec §4.3).
//!
//! Grounded on `mergiraf`'s `tree_matcher/priority_list.rs` (a `BinaryHeap`
//! of height-keyed entries) and on `original_source/clang-diff/ClangDiff.h`'s
//! `PriorityList` (bucket-draining `pop`, `peekMax` returning `0` when
//! empty, `open` pushing all children).

use std::{cmp::Ordering, collections::BinaryHeap};

use crate::{node::NodeId, tree::Tree};

#[derive(Debug, PartialEq, Eq)]
struct Entry {
    height: i32,
    id: NodeId,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; we only ever compare on height here,
        // ties are broken once a bucket is fully drained (see `pop`).
        self.height.cmp(&other.height)
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A max-heap over the nodes of one [`Tree`], keyed by height.
#[derive(Debug)]
pub struct PriorityList<'t> {
    tree: &'t Tree,
    heap: BinaryHeap<Entry>,
}

impl<'t> PriorityList<'t> {
    /// An empty priority list over `tree`.
    pub fn new(tree: &'t Tree) -> Self {
        Self {
            tree,
            heap: BinaryHeap::new(),
        }
    }

    /// Adds `id` to the list.
    pub fn push(&mut self, id: NodeId) {
        self.heap.push(Entry {
            height: self.tree.height(id),
            id,
        });
    }

    /// The height of the tallest node currently in the list, or `0` when
    /// the list is empty.
    pub fn peek_max(&self) -> i32 {
        self.heap.peek().map_or(0, |entry| entry.height)
    }

    /// Drains and returns every id sharing the current maximum height,
    /// sorted ascending by id for deterministic downstream iteration (spec
    /// §5). Returns an empty vector when the list is empty.
    pub fn pop(&mut self) -> Vec<NodeId> {
        let max_height = self.peek_max();
        if self.heap.is_empty() {
            return Vec::new();
        }
        let mut bucket = Vec::new();
        while self.peek_max() == max_height && !self.heap.is_empty() {
            bucket.push(self.heap.pop().unwrap().id);
        }
        bucket.sort_unstable();
        bucket
    }

    /// Pushes every child of `id` into the list.
    pub fn open(&mut self, id: NodeId) {
        for &child in self.tree.children(id) {
            self.push(child);
        }
    }
}
