//! Top-down matching: synchronized descent of two height-ordered
//! [`PriorityList`]s, linking whole isomorphic subtrees as soon as they are
//! found (spec §4.3/§4.4).
//!
//! Grounded on `original_source/clang-diff/ClangDiff.cpp`'s top-down
//! matching loop, with one correction noted in DESIGN.md: the original
//! re-opens a bucket member only `if !A.hasSrc(Id1)`, checked against a
//! `MappingList A` that is constructed fresh and empty right before the
//! check, so the condition is always true and every candidate is reopened
//! even when it was just matched. Here the check instead asks whether the
//! node was linked *during this round*, which is the condition the
//! variable name was clearly meant to express.

use itertools::Itertools as _;

use crate::{
    mappings::Mappings,
    matching_rules::{isomorphic, mapping_allowed},
    node::NodeId,
    priority_list::PriorityList,
    tree::Tree,
};

/// Links `id1`/`id2` and every corresponding pair of descendants, which
/// must exist in lock-step since `isomorphic` has already confirmed both
/// subtrees have identical shape. `zip_eq` rather than `zip` turns a
/// violation of that precondition into a panic instead of a silently
/// truncated walk.
fn link_isomorphic_subtrees(t1: &Tree, id1: NodeId, t2: &Tree, id2: NodeId, mappings: &mut Mappings) {
    mappings.link(id1, id2);
    for (&c1, &c2) in t1.children(id1).iter().zip_eq(t2.children(id2)) {
        link_isomorphic_subtrees(t1, c1, t2, c2, mappings);
    }
}

/// Runs the top-down phase over `t1`/`t2`, extending `mappings` in place.
/// Descent stops once both lists' tallest remaining node is at or below
/// `min_height`: whatever subtrees remain are left for the bottom-up phase.
pub fn top_down_match(t1: &Tree, t2: &Tree, mappings: &mut Mappings, min_height: i32) {
    let mut l1 = PriorityList::new(t1);
    let mut l2 = PriorityList::new(t2);
    l1.push(t1.root());
    l2.push(t2.root());

    while l1.peek_max().min(l2.peek_max()) > min_height {
        if l1.peek_max() > l2.peek_max() {
            for id in l1.pop() {
                l1.open(id);
            }
        } else if l2.peek_max() > l1.peek_max() {
            for id in l2.pop() {
                l2.open(id);
            }
        } else {
            let bucket1 = l1.pop();
            let bucket2 = l2.pop();

            for &id1 in &bucket1 {
                if mappings.has_src(id1) {
                    continue;
                }
                for &id2 in &bucket2 {
                    if mappings.has_dst(id2) {
                        continue;
                    }
                    if isomorphic(t1, id1, t2, id2) && mapping_allowed(t1, id1, t2, id2, mappings) {
                        link_isomorphic_subtrees(t1, id1, t2, id2, mappings);
                        break;
                    }
                }
            }

            for &id1 in &bucket1 {
                if !mappings.has_src(id1) {
                    l1.open(id1);
                }
            }
            for &id2 in &bucket2 {
                if !mappings.has_dst(id2) {
                    l2.open(id2);
                }
            }
        }
    }
}
