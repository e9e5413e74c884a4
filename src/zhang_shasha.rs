//! The optimal tree-edit-distance matcher used by the bottom-up phase to
//! refine a container pair whose subtree is small enough (spec §4.6).
//!
//! Grounded on `original_source/clang-diff/ClangDiff.cpp`'s `ZsMatcher`
//! class (`TreeDist`/`ForestDist` tables, `computeForestDist`, the
//! keyroot-driven outer loop and the `mapSubtrees` backtrace) — except that
//! class's own `match()` entry point is an unfinished stub (`return {};`),
//! so the DP and backtrace below are written from the textbook Zhang-Shasha
//! algorithm the class's member names and table shapes were clearly modeled
//! on, not copied from working code.
//!
//! Per spec §9's bug-fix note: the historical implementation's `if`-branch
//! left `TreeDist[D1][D2]` assigned to itself; here it is copied from the
//! freshly computed `ForestDist[D1][D2]`, since that value *is* the tree
//! distance once `D1`/`D2` bound complete subtrees of the current pair.

use crate::{node::NodeId, subtree_view::SubtreeView, tree::Tree};

const DELETE_COST: f64 = 1.0;
const INSERT_COST: f64 = 1.0;

/// Relabel cost between two original nodes: `0` when they could be mapped
/// (same kind, same label), `1` for a same-kind relabel, and infinite when
/// the kinds differ outright — mirroring spec §4.6's "substitution is only
/// offered between nodes of the same kind".
fn relabel_cost(t1: &Tree, o1: NodeId, t2: &Tree, o2: NodeId) -> f64 {
    if t1.kind(o1) != t2.kind(o2) {
        f64::INFINITY
    } else if t1.label(o1) == t2.label(o2) {
        0.0
    } else {
        1.0
    }
}

/// Computes the forest distances for the tree pair `(id1, id2)` (local
/// ids), filling in `tree_dist[d1][d2]` for every `(d1, d2)` pair that
/// bounds a complete subtree within this pair's range.
#[allow(clippy::too_many_arguments)]
fn compute_forest_dist(
    id1: usize,
    id2: usize,
    t1: &Tree,
    s1: &SubtreeView,
    t2: &Tree,
    s2: &SubtreeView,
    tree_dist: &mut [Vec<f64>],
    forest_dist: &mut [Vec<f64>],
) {
    let lmd1 = s1.local_leftmost_descendant(id1) - 1;
    let lmd2 = s2.local_leftmost_descendant(id2) - 1;

    forest_dist[lmd1][lmd2] = 0.0;
    for d1 in (lmd1 + 1)..=id1 {
        forest_dist[d1][lmd2] = forest_dist[d1 - 1][lmd2] + DELETE_COST;
    }
    for d2 in (lmd2 + 1)..=id2 {
        forest_dist[lmd1][d2] = forest_dist[lmd1][d2 - 1] + INSERT_COST;
    }

    for d1 in (lmd1 + 1)..=id1 {
        for d2 in (lmd2 + 1)..=id2 {
            let dlmd1 = s1.local_leftmost_descendant(d1) - 1;
            let dlmd2 = s2.local_leftmost_descendant(d2) - 1;
            let delete = forest_dist[d1 - 1][d2] + DELETE_COST;
            let insert = forest_dist[d1][d2 - 1] + INSERT_COST;
            if dlmd1 == lmd1 && dlmd2 == lmd2 {
                let update =
                    forest_dist[d1 - 1][d2 - 1] + relabel_cost(t1, s1.original_id(d1), t2, s2.original_id(d2));
                let best = delete.min(insert).min(update);
                forest_dist[d1][d2] = best;
                tree_dist[d1][d2] = best;
            } else {
                let keep = forest_dist[dlmd1][dlmd2] + tree_dist[d1][d2];
                forest_dist[d1][d2] = delete.min(insert).min(keep);
            }
        }
    }
}

/// Matches the subtree rooted at `root1` in `t1` against the subtree rooted
/// at `root2` in `t2` via Zhang-Shasha optimal tree-edit-distance, returning
/// every recovered `(src, dst)` pair of original node ids, including
/// `(root1, root2)` itself.
///
/// Callers are expected to have already checked that both subtrees are
/// within the `max_size` bound (spec §4.6); this function does no size
/// gating of its own; a pathologically large pair will simply be slow.
pub fn match_subtrees(t1: &Tree, root1: NodeId, t2: &Tree, root2: NodeId) -> Vec<(NodeId, NodeId)> {
    let s1 = SubtreeView::build(t1, root1);
    let s2 = SubtreeView::build(t2, root2);
    let n1 = s1.size();
    let n2 = s2.size();

    let mut tree_dist = vec![vec![0.0f64; n2 + 1]; n1 + 1];
    let mut forest_dist = vec![vec![0.0f64; n2 + 1]; n1 + 1];

    for &kr1 in s1.key_roots() {
        for &kr2 in s2.key_roots() {
            compute_forest_dist(kr1, kr2, t1, &s1, t2, &s2, &mut tree_dist, &mut forest_dist);
        }
    }

    backtrace(&s1, &s2, t1, t2, &mut tree_dist, &mut forest_dist)
}

/// Recovers the actual matched pairs from the completed DP tables, per spec
/// §4.6's `mapSubtrees`: walk back through the forest-distance table of
/// the full tree pair, and whenever it bottoms out into a nested tree pair
/// not yet resolved, push it for its own backtrace once its forest
/// distances have been recomputed.
fn backtrace(
    s1: &SubtreeView,
    s2: &SubtreeView,
    t1: &Tree,
    t2: &Tree,
    tree_dist: &mut [Vec<f64>],
    forest_dist: &mut [Vec<f64>],
) -> Vec<(NodeId, NodeId)> {
    let mut result = Vec::new();
    let mut pending = vec![(s1.size(), s2.size())];
    let mut first = true;

    while let Some((last_row, last_col)) = pending.pop() {
        if !first {
            compute_forest_dist(last_row, last_col, t1, s1, t2, s2, tree_dist, forest_dist);
        }
        first = false;

        let boundary_row = s1.local_leftmost_descendant(last_row) - 1;
        let boundary_col = s2.local_leftmost_descendant(last_col) - 1;
        let mut row = last_row;
        let mut col = last_col;

        while row > boundary_row || col > boundary_col {
            if row > boundary_row && forest_dist[row - 1][col] + DELETE_COST == forest_dist[row][col] {
                row -= 1;
            } else if col > boundary_col && forest_dist[row][col - 1] + INSERT_COST == forest_dist[row][col] {
                col -= 1;
            } else {
                let lmd1 = s1.local_leftmost_descendant(row) - 1;
                let lmd2 = s2.local_leftmost_descendant(col) - 1;
                if lmd1 == boundary_row && lmd2 == boundary_col {
                    result.push((s1.original_id(row), s2.original_id(col)));
                    row -= 1;
                    col -= 1;
                } else {
                    pending.push((row, col));
                    row = lmd1;
                    col = lmd2;
                }
            }
        }
    }

    result
}
