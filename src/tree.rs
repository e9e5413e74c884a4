use crate::node::{Kind, Node, NodeId, NO_NODE_ID};

/// A built AST: a flat, postorder-numbered vector of [`Node`]s (spec §3).
///
/// A `Tree` is constructed once by the [`crate::tree_builder`] and is
/// immutable thereafter. [`crate::edit_script::build_edit_script`] never
/// mutates it: a newly inserted `dst` node is recognised directly from the
/// mapping (`mappings.get_src(dst) == NO_NODE_ID`) rather than by
/// materializing a patch node into `src` (see DESIGN.md's note on spec
/// §4.9).
#[derive(Debug)]
pub struct Tree {
    pub(crate) postorder: Vec<Node>,
}

impl Tree {
    pub(crate) fn new(postorder: Vec<Node>) -> Self {
        Self { postorder }
    }

    /// The number of nodes in the tree.
    pub fn size(&self) -> usize {
        self.postorder.len()
    }

    /// The root's id: the largest id in the tree (spec §3 invariant 2), or
    /// [`NO_NODE_ID`] for an empty tree.
    pub fn root(&self) -> NodeId {
        if self.postorder.is_empty() {
            NO_NODE_ID
        } else {
            (self.postorder.len() - 1) as NodeId
        }
    }

    /// Looks up a node by id. Panics on an out-of-range id, since every
    /// `NodeId` the matching core hands back to a `Tree` is expected to
    /// have come from that same `Tree`.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.postorder[id as usize]
    }

    pub fn kind(&self, id: NodeId) -> Kind {
        self.node(id).kind()
    }

    pub fn label(&self, id: NodeId) -> &str {
        self.node(id).label()
    }

    pub fn parent(&self, id: NodeId) -> NodeId {
        self.node(id).parent()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).is_leaf()
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.node(id).parent() == NO_NODE_ID
    }

    pub fn depth(&self, id: NodeId) -> i32 {
        self.node(id).depth()
    }

    pub fn height(&self, id: NodeId) -> i32 {
        self.node(id).height()
    }

    pub fn leftmost_descendant(&self, id: NodeId) -> NodeId {
        self.node(id).leftmost_descendant()
    }

    /// `descendantCount(i) = i - leftmostDescendant(i)`, exclusive of `i`
    /// itself (spec §3 invariant 3).
    pub fn descendant_count(&self, id: NodeId) -> i32 {
        id - self.leftmost_descendant(id)
    }

    /// All postorder ids in this tree, in ascending (i.e. postorder) order.
    pub fn postorder_ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + Clone {
        0..self.size() as NodeId
    }

    /// The descendants of `id`, not including `id` itself, in postorder.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + use<> {
        self.leftmost_descendant(id)..id
    }

    /// `id` together with all of its descendants, in postorder.
    pub fn subtree_ids(&self, id: NodeId) -> impl Iterator<Item = NodeId> + use<> {
        self.leftmost_descendant(id)..=id
    }

    /// The human-readable form used throughout edit-script output (spec
    /// §6.2): `"<kind>[: <label>](<id>)"`, the label suffix only present
    /// when the label is non-empty.
    pub fn show(&self, id: NodeId) -> String {
        let node = self.node(id);
        if node.label().is_empty() {
            format!("{}({})", node.kind(), id)
        } else {
            format!("{}: {}({})", node.kind(), node.label(), id)
        }
    }

    /// Checks the structural invariants of spec §3 (postorder numbering,
    /// leftmost-descendant ranges, depth/height consistency, exactly-once
    /// sibling membership). Intended to run under `debug_assert!` in
    /// matcher code and unconditionally in tests; see spec §7's guidance
    /// that `InvariantViolation`-style checks should be debug-only.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        for id in self.postorder_ids() {
            let node = self.node(id);
            if node.leftmost_descendant() > id {
                return Err(format!(
                    "node {id} has leftmost descendant {} greater than itself",
                    node.leftmost_descendant()
                ));
            }
            for (position, &child) in node.children().iter().enumerate() {
                if child >= id {
                    return Err(format!("child {child} of {id} is not numbered before it"));
                }
                if self.parent(child) != id {
                    return Err(format!("child {child} of {id} does not point back to it"));
                }
                if self.depth(child) != node.depth() + 1 {
                    return Err(format!("child {child} of {id} has inconsistent depth"));
                }
                let _ = position;
            }
            let expected_height = node
                .children()
                .iter()
                .map(|&c| self.height(c))
                .max()
                .map_or(0, |h| h + 1);
            if node.height() != expected_height {
                return Err(format!(
                    "node {id} has height {} but expected {expected_height}",
                    node.height()
                ));
            }
            let expected_lmd = node
                .children()
                .first()
                .map_or(id, |&first_child| self.leftmost_descendant(first_child));
            if node.leftmost_descendant() != expected_lmd {
                return Err(format!(
                    "node {id} has leftmost descendant {} but expected {expected_lmd}",
                    node.leftmost_descendant()
                ));
            }
        }
        if self.root() != NO_NODE_ID && self.parent(self.root()) != NO_NODE_ID {
            return Err("root has a parent".to_string());
        }
        Ok(())
    }
}
