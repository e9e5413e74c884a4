use std::fmt;

/// Identifies a node within one [`crate::tree::Tree`] by its postorder
/// position. Non-negative; [`NO_NODE_ID`] is the "no such node" sentinel.
pub type NodeId = i32;

/// Sentinel meaning "no such node". Represented as `-1`, as in the source
/// this crate's tree model is grounded on (`ClangDiff.h`'s `NoNodeId`).
pub const NO_NODE_ID: NodeId = -1;

/// The type tag of a node, drawn from the external AST ("type label" in
/// spec terms). Two `Kind::None` values always compare equal to each other,
/// which `derive(PartialEq)` on `Option<&'static str>` already gives us for
/// free: `None == None` regardless of which "absent slot" produced either
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Kind(Option<&'static str>);

impl Kind {
    /// The "none" tag: used for AST slots that exist structurally (e.g. an
    /// absent optional child) but carry no real grammar type, per spec §3's
    /// rule that two "none" tags are always considered equal.
    pub const NONE: Kind = Kind(None);

    /// A concrete, named kind reported by the AST adapter.
    pub fn named(name: &'static str) -> Self {
        Kind(Some(name))
    }

    /// Whether this is the "none" tag.
    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// The textual form of the kind, or `"none"` for [`Kind::NONE`].
    pub fn as_str(&self) -> &'static str {
        self.0.unwrap_or("none")
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single AST node, stored inline inside its owning [`crate::tree::Tree`].
///
/// `Node` carries only the quantities every matcher phase needs: the tree
/// topology derived by the [`crate::tree_builder`] (parent, children,
/// leftmost descendant, depth, height) plus the two pieces of per-node
/// content the matchers compare (`kind` and `label`).
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: NodeId,
    pub(crate) leftmost_descendant: NodeId,
    pub(crate) depth: i32,
    pub(crate) height: i32,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: Kind,
    pub(crate) label: String,
}

impl Node {
    /// The parent of this node, or [`NO_NODE_ID`] for the root.
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// The smallest postorder id in this node's subtree (itself for a leaf).
    pub fn leftmost_descendant(&self) -> NodeId {
        self.leftmost_descendant
    }

    /// Depth from the root, which has depth 0.
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Height of the subtree rooted here; leaves have height 0.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Children in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The node's kind tag.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The node's label (identifier name, operator text, literal value, or
    /// empty). Never used for kind matching, only for cost comparison.
    pub fn label(&self) -> &str {
        &self.label
    }
}
