//! Locators, search roots and the DOM snapshot the resolver walks.

use std::fmt;

/// CDP-style node identifier, valid for one page load.
pub type NodeId = i64;

/// Opaque, caller-supplied element locator. Never normalised.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Locator {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An independently queryable container: a document or an open shadow root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRoot {
    /// Top-level or frame document. `frame_id` is `None` for the main frame.
    Document {
        node_id: NodeId,
        frame_id: Option<String>,
    },
    ShadowRoot { node_id: NodeId, host_id: NodeId },
}

impl SearchRoot {
    pub fn node_id(&self) -> NodeId {
        match self {
            Self::Document { node_id, .. } | Self::ShadowRoot { node_id, .. } => *node_id,
        }
    }

    pub fn is_document(&self) -> bool {
        matches!(self, Self::Document { .. })
    }
}

/// A located node. Consumed by the interaction that resolved it.
#[derive(Debug, PartialEq, Eq)]
pub struct ElementHandle {
    node_id: NodeId,
    root: SearchRoot,
}

impl ElementHandle {
    pub fn new(node_id: NodeId, root: SearchRoot) -> Self {
        Self { node_id, root }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// The root the node was found in.
    pub fn root(&self) -> &SearchRoot {
        &self.root
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document { frame_id: Option<String> },
    Element { tag: String },
    ShadowRoot,
    Other,
}

/// Elements whose content document the deep search descends into.
pub const FRAME_OWNER_TAGS: [&str; 2] = ["iframe", "frame"];

/// What a frame owner element exposes to page scripts.
#[derive(Debug, Clone)]
pub enum FrameContent {
    Accessible(Box<TreeNode>),
    CrossOrigin,
}

/// Snapshot of the pierced DOM tree.
///
/// Only open shadow roots appear in `shadow_root`; closed and user-agent
/// roots are invisible to page scripts and therefore to the resolver.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub node_id: NodeId,
    pub kind: NodeKind,
    /// Light-DOM children.
    pub children: Vec<TreeNode>,
    pub shadow_root: Option<Box<TreeNode>>,
    /// Set on `iframe`/`frame` elements only.
    pub frame: Option<FrameContent>,
}

impl TreeNode {
    fn with_kind(node_id: NodeId, kind: NodeKind) -> Self {
        Self {
            node_id,
            kind,
            children: Vec::new(),
            shadow_root: None,
            frame: None,
        }
    }

    pub fn document(node_id: NodeId, frame_id: Option<String>) -> Self {
        Self::with_kind(node_id, NodeKind::Document { frame_id })
    }

    pub fn element(node_id: NodeId, tag: impl Into<String>) -> Self {
        Self::with_kind(node_id, NodeKind::Element { tag: tag.into() })
    }

    pub fn shadow_root(node_id: NodeId) -> Self {
        Self::with_kind(node_id, NodeKind::ShadowRoot)
    }

    pub fn other(node_id: NodeId) -> Self {
        Self::with_kind(node_id, NodeKind::Other)
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_shadow_root(mut self, root: TreeNode) -> Self {
        self.shadow_root = Some(Box::new(root));
        self
    }

    pub fn with_frame(mut self, frame: FrameContent) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Tag name for element nodes.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag } => Some(tag),
            _ => None,
        }
    }

    pub fn is_frame_owner(&self) -> bool {
        self.tag().is_some_and(|tag| FRAME_OWNER_TAGS.contains(&tag))
    }

    /// The root this node represents, if it is a document.
    pub fn as_document_root(&self) -> Option<SearchRoot> {
        match &self.kind {
            NodeKind::Document { frame_id } => Some(SearchRoot::Document {
                node_id: self.node_id,
                frame_id: frame_id.clone(),
            }),
            _ => None,
        }
    }
}
