//! Bridges an opaque external AST into values the [`crate::tree_builder`]
//! can turn into a [`crate::tree::Tree`].
//!
//! This module is the only place in the crate that is allowed to know about
//! a concrete AST producer. Everything downstream of [`crate::tree_builder`]
//! only ever sees [`crate::node::Node`] values.

use crate::node::Kind;

/// The contract an AST producer must satisfy (spec §4.1/§6.1): a stable
/// identity usable as a map key, a kind tag, document-ordered children, and
/// a label derived from a source-range query.
///
/// `ExternalNode` is whatever cheap handle the producer uses to refer to one
/// of its nodes (e.g. a `tree_sitter::Node`, or an integer index into some
/// other in-memory AST); it is required to be `Copy` since the builder
/// revisits the same handle from both the postorder and preorder passes.
pub trait AstAdapter {
    type ExternalNode: Copy;

    /// The translation-unit root: the adapter's entry point.
    fn root(&self) -> Self::ExternalNode;

    /// A value that uniquely and stably identifies `node` for the lifetime
    /// of this adapter. Used as the key of the postorder-id map built by
    /// the tree builder.
    fn identity(&self, node: Self::ExternalNode) -> u64;

    /// The node's type tag, compared by equality everywhere else in the
    /// crate (with `Kind::NONE == Kind::NONE` regardless of which absent
    /// slot produced either side, per spec §3).
    fn kind(&self, node: Self::ExternalNode) -> Kind;

    /// This node's children, in document order.
    fn children(&self, node: Self::ExternalNode) -> Vec<Self::ExternalNode>;

    /// The textual label for this node (identifier name, operator text,
    /// literal value, or empty for nodes that carry none of those).
    fn label(&self, node: Self::ExternalNode) -> String;
}

pub mod tree_sitter_adapter {
    //! A concrete [`AstAdapter`] over `tree-sitter` parse trees.
    //!
    //! Grounded on `mergiraf`'s `AstNode::internal_new`, which walks a
    //! `tree_sitter::Tree` with a `TreeCursor` and slices the source by
    //! byte range to get each node's text. Unlike mergiraf (which keeps
    //! every anonymous token, since it needs to reconstruct full source
    //! text for merges) this adapter only keeps *named* nodes: this crate
    //! only diffs ASTs, so punctuation and keyword tokens are irrelevant
    //! structure, and named nodes already match the "one node per
    //! declaration, statement, expression, or type" shape spec.md's
    //! GLOSSARY describes for "AST".

    use tree_sitter::{Node as TsNode, Tree as TsTree};

    use super::AstAdapter;
    use crate::node::Kind;

    /// Adapts a parsed `tree-sitter` tree and its source text.
    pub struct TreeSitterAdapter<'a> {
        tree: &'a TsTree,
        source: &'a str,
    }

    impl<'a> TreeSitterAdapter<'a> {
        pub fn new(tree: &'a TsTree, source: &'a str) -> Self {
            Self { tree, source }
        }

        /// Whether the parse produced any error-recovery node, which this
        /// crate's CLI (§10.1) treats as an `Error::Input`.
        pub fn has_error(&self) -> bool {
            self.tree.root_node().has_error()
        }
    }

    impl<'a> AstAdapter for TreeSitterAdapter<'a> {
        type ExternalNode = TsNode<'a>;

        fn root(&self) -> Self::ExternalNode {
            self.tree.root_node()
        }

        fn identity(&self, node: Self::ExternalNode) -> u64 {
            node.id() as u64
        }

        fn kind(&self, node: Self::ExternalNode) -> Kind {
            // A "missing" node is tree-sitter's error-recovery stand-in for
            // a token the grammar expected but the source never supplied:
            // structurally present, but carrying no real grammar type or
            // text, which is exactly the "none" tag spec §3 describes for
            // an absent type slot.
            if node.is_missing() {
                Kind::NONE
            } else {
                Kind::named(node.kind())
            }
        }

        fn children(&self, node: Self::ExternalNode) -> Vec<Self::ExternalNode> {
            let mut cursor = node.walk();
            node.named_children(&mut cursor).collect()
        }

        fn label(&self, node: Self::ExternalNode) -> String {
            // Only leaves carry an identity-bearing label (identifier,
            // operator, literal); an interior node's span is its entire
            // subtree's text, which would make its label change whenever
            // any descendant's does (spec §3/§9).
            if node.is_missing() || node.named_child_count() > 0 {
                return String::new();
            }
            let range = node.byte_range();
            self.source[range].to_string()
        }
    }
}
