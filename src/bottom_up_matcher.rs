//! Bottom-up "container matching" phase: for every still-unmatched node
//! with at least one mapped descendant, finds the best unmatched candidate
//! on the other side by Dice coefficient, and — when the pair is small
//! enough — refines the match with [`crate::zhang_shasha`] (spec §4.5/§4.6).
//!
//! Grounded on `original_source/clang-diff/ClangDiff.cpp`'s bottom-up
//! matching loop (`matchBottomUp`/`getDice`/candidate search via mapped
//! descendants' ancestor chains) and `mergiraf`'s `tree_matcher.rs`, which
//! runs the analogous container-matching pass after top-down matching.

use rustc_hash::FxHashSet;

use crate::{
    config::MatchConfig,
    mappings::Mappings,
    matching_rules::mapping_allowed,
    node::{NodeId, NO_NODE_ID},
    tree::Tree,
    zhang_shasha,
};

/// The Dice coefficient between the subtrees rooted at `id1` and `id2`:
/// twice the number of already-mapped descendant pairs that fall inside
/// both subtrees, over the sum of their sizes (spec §4.5).
pub fn dice(t1: &Tree, id1: NodeId, t2: &Tree, id2: NodeId, mappings: &Mappings) -> f64 {
    let lo2 = t2.leftmost_descendant(id2);
    let common = t1
        .descendants(id1)
        .filter(|&d1| {
            let dst = mappings.get_dst(d1);
            dst != NO_NODE_ID && dst >= lo2 && dst <= id2
        })
        .count();
    let size1 = t1.descendant_count(id1) as f64;
    let size2 = t2.descendant_count(id2) as f64;
    if size1 + size2 == 0.0 {
        0.0
    } else {
        2.0 * common as f64 / (size1 + size2)
    }
}

/// Candidate nodes in `t2` for matching `id1`: the unmapped ancestors (of
/// matching kind) of every `t2` node already mapped from a descendant of
/// `id1`.
fn find_candidates(t1: &Tree, id1: NodeId, t2: &Tree, mappings: &Mappings) -> Vec<NodeId> {
    let mut seen = FxHashSet::default();
    let mut candidates = Vec::new();
    for d1 in t1.descendants(id1) {
        let dst = mappings.get_dst(d1);
        if dst == NO_NODE_ID {
            continue;
        }
        let mut cursor = t2.parent(dst);
        while cursor != NO_NODE_ID {
            if t2.kind(cursor) == t1.kind(id1) && !mappings.has_dst(cursor) && seen.insert(cursor) {
                candidates.push(cursor);
            }
            cursor = t2.parent(cursor);
        }
    }
    candidates
}

/// Runs the bottom-up phase over `t1`/`t2`, extending `mappings` in place.
///
/// Walks `t1` in postorder so that a node's children are always resolved
/// (and thus contribute to its own Dice coefficient) before the node
/// itself is considered, per spec §4.5.
pub fn bottom_up_match(t1: &Tree, t2: &Tree, mappings: &mut Mappings, config: &MatchConfig) {
    for id1 in t1.postorder_ids() {
        if id1 == t1.root() {
            // spec §4.5: the two roots always correspond, unconditionally
            // of dice — even two completely disjoint translation units
            // still share a translation-unit root.
            if !mappings.has_src(id1) {
                mappings.link(id1, t2.root());
            }
            refine_with_zhang_shasha(t1, id1, t2, t2.root(), mappings, config);
            continue;
        }

        if mappings.has_src(id1) || t1.is_leaf(id1) {
            continue;
        }
        if !t1.descendants(id1).any(|d1| mappings.has_src(d1)) {
            continue;
        }

        let candidates = find_candidates(t1, id1, t2, mappings);
        // `max_by` keeps the *last* maximum; on a dice tie, break toward
        // the lower id (spec §5: "tie-breaks in dice prefer the earlier
        // (lower-id) candidate"), since `find_candidates` yields ids in
        // ancestor-walk order rather than ascending order.
        let best = candidates
            .into_iter()
            .map(|id2| (id2, dice(t1, id1, t2, id2, mappings)))
            .max_by(|(ia, a), (ib, b)| a.total_cmp(b).then(ib.cmp(ia)));

        if let Some((id2, best_dice)) = best {
            if best_dice > config.min_dice && mapping_allowed(t1, id1, t2, id2, mappings) {
                mappings.link(id1, id2);
                refine_with_zhang_shasha(t1, id1, t2, id2, mappings, config);
            }
        }
    }
}

/// Invokes Zhang-Shasha on `(id1, id2)` when both subtrees are within the
/// `max_size` guard, linking every recovered pair that is still mapping-
/// allowed (spec §4.6's size gate; already-linked `(id1, id2)` itself is
/// skipped since it is a no-op relink).
fn refine_with_zhang_shasha(t1: &Tree, id1: NodeId, t2: &Tree, id2: NodeId, mappings: &mut Mappings, config: &MatchConfig) {
    if t1.descendant_count(id1) >= config.max_size || t2.descendant_count(id2) >= config.max_size {
        return;
    }
    for (d1, d2) in zhang_shasha::match_subtrees(t1, id1, t2, id2) {
        if d1 == id1 && d2 == id2 {
            continue;
        }
        if mapping_allowed(t1, d1, t2, d2, mappings) {
            mappings.link(d1, d2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{matching_rules::isomorphic, test_utils::parse_rust, top_down_matcher::top_down_match};

    #[test]
    fn unmatched_parent_gets_linked_once_children_are() {
        let t1 = parse_rust("fn f() { 1 + 2 }");
        let t2 = parse_rust("fn g() { 1 + 2 }");
        let mut mappings = Mappings::new(t1.size(), t2.size());
        let config = MatchConfig::default();
        top_down_match(&t1, &t2, &mut mappings, config.min_height);
        // the renamed function items are not isomorphic (the `f`/`g` name
        // leaves disagree), so the root is unmapped after the top-down
        // phase...
        assert!(!mappings.has_src(t1.root()));
        bottom_up_match(&t1, &t2, &mut mappings, &config);
        // ...but every descendant matched, so bottom-up should still link
        // the two function roots together as containers.
        assert!(mappings.has_src(t1.root()));
        assert_eq!(mappings.get_dst(t1.root()), t2.root());
    }

    #[test]
    fn completely_disjoint_trees_still_map_the_root() {
        // spec §4.5: the two translation-unit roots always correspond,
        // even when nothing underneath them does.
        let t1 = parse_rust("fn f() { 1 }");
        let t2 = parse_rust("struct S { field: i32 }");
        let mut mappings = Mappings::new(t1.size(), t2.size());
        let config = MatchConfig::default();
        top_down_match(&t1, &t2, &mut mappings, config.min_height);
        assert!(!mappings.has_src(t1.root()));
        bottom_up_match(&t1, &t2, &mut mappings, &config);
        assert_eq!(mappings.get_dst(t1.root()), t2.root());
    }

    #[test]
    fn dice_is_one_for_fully_matched_subtrees() {
        let t1 = parse_rust("fn f() { 1 + 2 }");
        let t2 = parse_rust("fn f() { 1 + 2 }");
        assert!(isomorphic(&t1, t1.root(), &t2, t2.root()));
        let mut mappings = Mappings::new(t1.size(), t2.size());
        let config = MatchConfig::default();
        top_down_match(&t1, &t2, &mut mappings, config.min_height);
        assert_eq!(dice(&t1, t1.root(), &t2, t2.root(), &mappings), 1.0);
    }
}
