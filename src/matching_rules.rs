//! The two predicates shared by every matcher phase: `isomorphic` (used by
//! the top-down matcher to discover whole-subtree matches) and
//! `mapping_allowed` (used to gate every candidate link, from the top-down
//! matcher through to the Zhang-Shasha backtrace).
//!
//! Grounded on `original_source/clang-diff/ClangDiff.cpp`'s `isomorphic`
//! and `isMappingAllowed` member functions.

use crate::{mappings::Mappings, node::NodeId, tree::Tree};

/// Two nodes are isomorphic when their kinds and child counts match, their
/// labels match, and all corresponding children are recursively isomorphic
/// (spec §4.4).
///
/// Per DESIGN.md's resolution of the open question in spec §9: label
/// equality is always checked (as the original's `isomorphic` does, modulo
/// its own `// TODO compare T1.label(Id1)` left unfinished), which matters
/// for leaves (identifiers, literals, operators, whose identity *is* their
/// label) and is a no-op for non-leaf nodes, since this crate's adapter
/// gives every interior node the same empty label (spec §3's "or empty"),
/// so the comparison always passes and the shape check is carried entirely
/// by the recursive child comparison.
pub fn isomorphic(t1: &Tree, id1: NodeId, t2: &Tree, id2: NodeId) -> bool {
    let n1 = t1.node(id1);
    let n2 = t2.node(id2);
    if n1.kind() != n2.kind() || n1.children().len() != n2.children().len() {
        return false;
    }
    if n1.label() != n2.label() {
        return false;
    }
    n1.children()
        .iter()
        .zip(n2.children())
        .all(|(&c1, &c2)| isomorphic(t1, c1, t2, c2))
}

/// A candidate pair may be linked when: neither side is already mapped, the
/// kinds match, and either both parents are absent (both nodes are roots)
/// or both parents exist and have equal kinds (spec §4.4). The parent-kind
/// gate prevents e.g. mapping an expression-statement child to a loop-body
/// child just because the leaves underneath happen to coincide.
pub fn mapping_allowed(t1: &Tree, id1: NodeId, t2: &Tree, id2: NodeId, mappings: &Mappings) -> bool {
    if mappings.has_src(id1) || mappings.has_dst(id2) {
        return false;
    }
    if t1.kind(id1) != t2.kind(id2) {
        return false;
    }
    let p1 = t1.parent(id1);
    let p2 = t2.parent(id2);
    match (p1, p2) {
        (crate::node::NO_NODE_ID, crate::node::NO_NODE_ID) => true,
        (crate::node::NO_NODE_ID, _) | (_, crate::node::NO_NODE_ID) => false,
        (p1, p2) => t1.kind(p1) == t2.kind(p2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::parse_rust;

    #[test]
    fn identical_sources_are_isomorphic_at_the_root() {
        let t1 = parse_rust("fn f() { 1 + 2 }");
        let t2 = parse_rust("fn f() { 1 + 2 }");
        assert!(isomorphic(&t1, t1.root(), &t2, t2.root()));
    }

    #[test]
    fn a_renamed_leaf_breaks_isomorphism() {
        let t1 = parse_rust("fn f() { 1 + 2 }");
        let t2 = parse_rust("fn f() { 1 + 3 }");
        assert!(!isomorphic(&t1, t1.root(), &t2, t2.root()));
    }

    #[test]
    fn differing_shapes_are_not_isomorphic() {
        let t1 = parse_rust("fn f() { 1 + 2 }");
        let t2 = parse_rust("fn f() { 1 + 2 + 3 }");
        assert!(!isomorphic(&t1, t1.root(), &t2, t2.root()));
    }

    #[test]
    fn mapping_allowed_rejects_already_mapped_nodes() {
        let t1 = parse_rust("fn f() { 1 }");
        let t2 = parse_rust("fn f() { 1 }");
        let mut mappings = Mappings::new(t1.size(), t2.size());
        mappings.link(t1.root(), t2.root());
        assert!(!mapping_allowed(&t1, t1.root(), &t2, t2.root(), &mappings));
    }

    #[test]
    fn mapping_allowed_requires_same_kind_parents() {
        let t1 = parse_rust("fn f() { if true { 1 } }");
        let t2 = parse_rust("fn f() { while true { 1 } }");
        let mappings = Mappings::new(t1.size(), t2.size());
        let leaf1 = t1.postorder_ids().find(|&id| t1.label(id) == "1").unwrap();
        let leaf2 = t2.postorder_ids().find(|&id| t2.label(id) == "1").unwrap();
        assert!(!mapping_allowed(&t1, leaf1, &t2, leaf2, &mappings));
    }
}
