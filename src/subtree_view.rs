//! A local, 1-based postorder reindexing of a single subtree, used only by
//! [`crate::zhang_shasha`] (spec §3's "Subtree view").
//!
//! Because a `Tree`'s postorder numbering already guarantees that a
//! subtree occupies a contiguous range of original ids (spec §3 invariant
//! 1), building this view is a simple affine reindexing: local id `l`
//! corresponds to original id `leftmost_descendant(root) + l - 1`.

use rustc_hash::FxHashMap;

use crate::{node::NodeId, tree::Tree};

/// A 1-based local view over the subtree rooted at some node.
#[derive(Debug)]
pub struct SubtreeView {
    /// `original_id[l]` is the original `NodeId` for local id `l` (1-based;
    /// index 0 is unused).
    original_id: Vec<NodeId>,
    /// `local_lmd[l]` is the local id of the leftmost descendant of local
    /// id `l` (1-based; index 0 is unused).
    local_lmd: Vec<usize>,
    /// The key-roots of this subtree, in ascending local-id order: the
    /// rightmost local id for each distinct `local_lmd` value.
    key_roots: Vec<usize>,
}

impl SubtreeView {
    /// Builds a view over the subtree of `tree` rooted at `root`.
    pub fn build(tree: &Tree, root: NodeId) -> Self {
        let base = tree.leftmost_descendant(root);
        let size = (root - base + 1) as usize;

        let mut original_id = vec![0 as NodeId; size + 1];
        let mut local_lmd = vec![0usize; size + 1];
        for local in 1..=size {
            let original = base + (local as NodeId - 1);
            original_id[local] = original;
            let original_lmd = tree.leftmost_descendant(original);
            local_lmd[local] = (original_lmd - base + 1) as usize;
        }

        // Scanning left to right and overwriting on ties keeps, for each
        // distinct leftmost-descendant value, the rightmost local id that
        // has it — the same result as the spec's right-to-left scan.
        let mut key_root_by_lmd: FxHashMap<usize, usize> = FxHashMap::default();
        for local in 1..=size {
            key_root_by_lmd.insert(local_lmd[local], local);
        }
        let mut key_roots: Vec<usize> = key_root_by_lmd.into_values().collect();
        key_roots.sort_unstable();

        Self {
            original_id,
            local_lmd,
            key_roots,
        }
    }

    /// The number of nodes in the subtree, `|S|`.
    pub fn size(&self) -> usize {
        self.original_id.len() - 1
    }

    /// The local id of the leftmost descendant of local id `local`.
    pub fn local_leftmost_descendant(&self, local: usize) -> usize {
        self.local_lmd[local]
    }

    /// The original `NodeId` a local id corresponds to.
    pub fn original_id(&self, local: usize) -> NodeId {
        self.original_id[local]
    }

    /// The key-roots of this subtree, ascending.
    pub fn key_roots(&self) -> &[usize] {
        &self.key_roots
    }
}
