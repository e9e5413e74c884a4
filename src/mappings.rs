//! Bidirectional, one-to-one `src<->dst` node correspondence (spec §3/§4.7).
//!
//! Grounded on `original_source/clang-diff/ClangDiff.h`'s `Mappings` (two
//! arrays sized to each tree, sentinel-filled, O(1) `link`/`getDst`/`getSrc`/
//! `hasSrc`/`hasDst`) and naming borrowed from `mergiraf`'s `matching.rs`
//! (`get_from_left`/`get_from_right`). Per spec §9, the sentinel is
//! element-filled rather than `memset`, since `NO_NODE_ID` is only
//! guaranteed to be all-ones bytes in the original's C++ representation.

use crate::node::{NodeId, NO_NODE_ID};

/// A one-to-one mapping between the nodes of two trees, `T1` ("src") and
/// `T2` ("dst").
#[derive(Debug, Clone)]
pub struct Mappings {
    src_to_dst: Vec<NodeId>,
    dst_to_src: Vec<NodeId>,
}

impl Mappings {
    /// An empty mapping sized for trees of `src_size` and `dst_size` nodes.
    pub fn new(src_size: usize, dst_size: usize) -> Self {
        Self {
            src_to_dst: vec![NO_NODE_ID; src_size],
            dst_to_src: vec![NO_NODE_ID; dst_size],
        }
    }

    /// Links `src` and `dst` together. Panics if either side is already
    /// mapped: callers are expected to have checked `mapping_allowed`
    /// first, so a double-link here indicates a matcher bug (spec §7's
    /// `InvariantViolation`).
    pub fn link(&mut self, src: NodeId, dst: NodeId) {
        debug_assert!(
            !self.has_src(src) && !self.has_dst(dst),
            "link({src}, {dst}) would overwrite an existing mapping"
        );
        self.src_to_dst[src as usize] = dst;
        self.dst_to_src[dst as usize] = src;
    }

    pub fn get_dst(&self, src: NodeId) -> NodeId {
        self.src_to_dst[src as usize]
    }

    pub fn get_src(&self, dst: NodeId) -> NodeId {
        self.dst_to_src[dst as usize]
    }

    pub fn has_src(&self, src: NodeId) -> bool {
        self.src_to_dst[src as usize] != NO_NODE_ID
    }

    pub fn has_dst(&self, dst: NodeId) -> bool {
        self.dst_to_src[dst as usize] != NO_NODE_ID
    }

    /// The number of linked pairs.
    pub fn len(&self) -> usize {
        self.src_to_dst.iter().filter(|&&dst| dst != NO_NODE_ID).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all linked `(src, dst)` pairs, in ascending `src`
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.src_to_dst
            .iter()
            .enumerate()
            .filter(|(_, &dst)| dst != NO_NODE_ID)
            .map(|(src, &dst)| (src as NodeId, dst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_mapping_has_no_links() {
        let mappings = Mappings::new(5, 5);
        assert!(!mappings.has_src(0));
        assert!(!mappings.has_dst(0));
        assert_eq!(mappings.get_dst(0), NO_NODE_ID);
        assert_eq!(mappings.get_src(0), NO_NODE_ID);
        assert_eq!(mappings.len(), 0);
    }

    #[test]
    fn link_is_visible_from_both_sides() {
        let mut mappings = Mappings::new(5, 5);
        mappings.link(2, 3);
        assert!(mappings.has_src(2));
        assert!(mappings.has_dst(3));
        assert_eq!(mappings.get_dst(2), 3);
        assert_eq!(mappings.get_src(3), 2);
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings.iter().collect::<Vec<_>>(), vec![(2, 3)]);
    }

    #[test]
    #[should_panic]
    fn double_link_on_src_panics() {
        let mut mappings = Mappings::new(5, 5);
        mappings.link(2, 3);
        mappings.link(2, 4);
    }

    #[test]
    #[should_panic]
    fn double_link_on_dst_panics() {
        let mut mappings = Mappings::new(5, 5);
        mappings.link(2, 3);
        mappings.link(1, 3);
    }
}
