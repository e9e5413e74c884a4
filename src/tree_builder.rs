//! Builds a [`Tree`] from an [`AstAdapter`] in three passes, per spec §4.2.
//!
//! Grounded on `original_source/clang-diff/ClangDiff.cpp`'s
//! `NodeCountVisitor` / `PostorderVisitor` / `PreorderVisitor` /
//! `Preprocess`, each a `RecursiveASTVisitor` subclass doing one traversal.
//! Per spec §9's re-architecture hint ("the three traversals... become
//! three closures over the same walk"), this module collapses that visitor
//! hierarchy into three plain recursive functions sharing one node-walking
//! shape, rather than three trait-dispatch visitor types.

use rustc_hash::FxHashMap;

use crate::{
    ast_adapter::AstAdapter,
    node::{Node, NodeId, NO_NODE_ID},
    tree::Tree,
};

/// Builds a [`Tree`] from the root exposed by `adapter`.
///
/// A null/absent root (spec §4.2's "a null AST pointer produces no node"
/// edge case) yields an empty tree, i.e. `Tree::size() == 0`.
pub fn build<A: AstAdapter>(adapter: &A) -> Tree {
    let node_count = count(adapter, adapter.root());
    let mut postorder = Vec::with_capacity(node_count);
    let mut ids_by_identity = FxHashMap::with_capacity_and_hasher(node_count, Default::default());

    emit_postorder(adapter, adapter.root(), 0, &mut postorder, &mut ids_by_identity);
    link_preorder(adapter, adapter.root(), NO_NODE_ID, &ids_by_identity, &mut postorder);
    compute_heights(&mut postorder);

    Tree::new(postorder)
}

/// Pass 1: count the nodes reachable from `external`, including it.
fn count<A: AstAdapter>(adapter: &A, external: A::ExternalNode) -> usize {
    1 + adapter
        .children(external)
        .into_iter()
        .map(|child| count(adapter, child))
        .sum::<usize>()
}

/// Pass 2: emit a `Node` per external node on *exit* from the recursion, so
/// that the k-th emission lands at postorder index `k` and every
/// descendant of a node is emitted (and thus numbered) before it.
/// `leftmost_descendant` is provisionally set to the node's own id; pass 3
/// narrows it down to the true minimum over the subtree.
fn emit_postorder<A: AstAdapter>(
    adapter: &A,
    external: A::ExternalNode,
    depth: i32,
    postorder: &mut Vec<Node>,
    ids_by_identity: &mut FxHashMap<u64, NodeId>,
) -> NodeId {
    for child in adapter.children(external) {
        emit_postorder(adapter, child, depth + 1, postorder, ids_by_identity);
    }

    let id = postorder.len() as NodeId;
    postorder.push(Node {
        parent: NO_NODE_ID,
        leftmost_descendant: id,
        depth,
        height: 0,
        children: Vec::new(),
        kind: adapter.kind(external),
        label: adapter.label(external),
    });
    ids_by_identity.insert(adapter.identity(external), id);
    id
}

/// Pass 3: revisit the same traversal; on entry to a node, assign its
/// parent (the most recently entered ancestor), append it to that parent's
/// `children`, and widen the parent's `leftmost_descendant`.
fn link_preorder<A: AstAdapter>(
    adapter: &A,
    external: A::ExternalNode,
    parent: NodeId,
    ids_by_identity: &FxHashMap<u64, NodeId>,
    postorder: &mut [Node],
) {
    let id = ids_by_identity[&adapter.identity(external)];
    postorder[id as usize].parent = parent;
    if parent != NO_NODE_ID {
        let parent_node = &mut postorder[parent as usize];
        parent_node.children.push(id);
        parent_node.leftmost_descendant = parent_node.leftmost_descendant.min(id);
    }
    for child in adapter.children(external) {
        link_preorder(adapter, child, id, ids_by_identity, postorder);
    }
}

/// Final step of pass 3: one upward sweep computing `height` from the
/// already-postorder-numbered nodes. Because every child has a strictly
/// smaller id than its parent, a single forward scan sees each child's
/// height before it is needed to compute the parent's.
fn compute_heights(postorder: &mut [Node]) {
    for id in 0..postorder.len() {
        let height = postorder[id]
            .children
            .iter()
            .map(|&child| postorder[child as usize].height)
            .max()
            .map_or(0, |h| h + 1);
        postorder[id].height = height;
    }
}
