//! Turns a completed [`Mappings`] into an ordered list of edits that turns
//! `src` into `dst`: updates, then inserts and moves (walked top-down over
//! `dst` so a node's new parent is always already placed), then deletes
//! (walked bottom-up over `src` so a node's children are always removed
//! before it) — spec §4.8/§4.9.
//!
//! Grounded on `mergiraf`'s `changeset.rs`, which reports the same four
//! edit kinds over a computed mapping, and on spec §4.9's note that a
//! freshly inserted node has no source counterpart to anchor a later move
//! onto: this builder keeps that fact purely as a property of the mapping
//! (`mappings.get_src(dst) == NO_NODE_ID`) rather than mutating `src` or
//! `dst` to splice in a placeholder "patch node", since this crate only
//! ever reports an edit script and never needs to materialize the merged
//! tree the original's side-table was built to support.

use crate::{
    mappings::Mappings,
    node::{NodeId, NO_NODE_ID},
    tree::Tree,
};

/// One step of the edit script.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// `src` and `dst` are mapped to each other but disagree on label.
    Update { src: NodeId, dst: NodeId },
    /// `dst` has no source counterpart; it is a new node under `parent_dst`
    /// at `position` among that parent's children.
    Insert {
        dst: NodeId,
        parent_dst: NodeId,
        position: usize,
    },
    /// `src`/`dst` are mapped, but `dst`'s parent or position among
    /// siblings does not correspond to where `src` sat in its own tree.
    Move {
        src: NodeId,
        dst: NodeId,
        parent_dst: NodeId,
        position: usize,
    },
    /// `src` has no destination counterpart; it is removed.
    Delete { src: NodeId },
}

impl Edit {
    /// The same human-readable node form used by [`Tree::show`], applied
    /// to whichever tree(s) this edit references (spec §6.2).
    pub fn render(&self, src: &Tree, dst: &Tree) -> String {
        match *self {
            Self::Update { src: s, dst: d } => {
                format!("update {} -> {}", src.show(s), dst.show(d))
            }
            Self::Insert {
                dst: d,
                parent_dst,
                position,
            } => format!("insert {} into {} at {position}", dst.show(d), dst.show(parent_dst)),
            Self::Move {
                src: s,
                dst: d,
                parent_dst,
                position,
            } => format!(
                "move {} (now {}) into {} at {position}",
                src.show(s),
                dst.show(d),
                dst.show(parent_dst)
            ),
            Self::Delete { src: s } => format!("delete {}", src.show(s)),
        }
    }
}

/// Builds the edit script transforming `src` into `dst` given `mappings`.
pub fn build_edit_script(src: &Tree, dst: &Tree, mappings: &Mappings) -> Vec<Edit> {
    let mut edits = Vec::new();

    for (s, d) in mappings.iter() {
        if src.label(s) != dst.label(d) {
            edits.push(Edit::Update { src: s, dst: d });
        }
    }

    if dst.size() > 0 {
        walk_dst_preorder(dst, dst.root(), &mut |d| {
            let parent_d = dst.parent(d);
            if parent_d == NO_NODE_ID {
                return;
            }
            let position = dst.children(parent_d).iter().position(|&c| c == d).expect("d is a child of its own parent");

            let s = mappings.get_src(d);
            if s == NO_NODE_ID {
                edits.push(Edit::Insert {
                    dst: d,
                    parent_dst: parent_d,
                    position,
                });
                return;
            }

            let expected_src_parent = mappings.get_src(parent_d);
            let src_position = if src.parent(s) != NO_NODE_ID {
                src.children(src.parent(s)).iter().position(|&c| c == s)
            } else {
                None
            };
            let moved = expected_src_parent != src.parent(s) || src_position != Some(position);
            if moved {
                edits.push(Edit::Move {
                    src: s,
                    dst: d,
                    parent_dst: parent_d,
                    position,
                });
            }
        });
    }

    for s in src.postorder_ids() {
        if !mappings.has_src(s) {
            edits.push(Edit::Delete { src: s });
        }
    }

    edits
}

fn walk_dst_preorder(dst: &Tree, id: NodeId, visit: &mut impl FnMut(NodeId)) {
    visit(id);
    for &child in dst.children(id) {
        walk_dst_preorder(dst, child, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::MatchConfig, matcher::match_trees, test_utils::parse_rust};

    fn edits_for(src_text: &str, dst_text: &str) -> (Tree, Tree, Vec<Edit>) {
        let src = parse_rust(src_text);
        let dst = parse_rust(dst_text);
        let matching = match_trees(&src, &dst, &MatchConfig::default());
        let edits = build_edit_script(&src, &dst, &matching.mappings);
        (src, dst, edits)
    }

    #[test]
    fn identical_trees_produce_no_edits() {
        let (_, _, edits) = edits_for("fn f() { 1 + 2 }", "fn f() { 1 + 2 }");
        assert!(edits.is_empty());
    }

    #[test]
    fn a_renamed_literal_produces_exactly_one_update() {
        let (_, _, edits) = edits_for("fn f() { 1 + 2 }", "fn f() { 1 + 3 }");
        let updates: Vec<_> = edits.iter().filter(|e| matches!(e, Edit::Update { .. })).collect();
        assert_eq!(updates.len(), 1);
    }

    #[test]
    fn an_added_statement_produces_an_insert() {
        let (_, _, edits) = edits_for("fn f() { let a = 1; }", "fn f() { let a = 1; let b = 2; }");
        assert!(edits.iter().any(|e| matches!(e, Edit::Insert { .. })));
    }

    #[test]
    fn a_removed_statement_produces_a_delete() {
        let (_, _, edits) = edits_for("fn f() { let a = 1; let b = 2; }", "fn f() { let a = 1; }");
        assert!(edits.iter().any(|e| matches!(e, Edit::Delete { .. })));
    }
}
