//! Arena node storage and the borrowed [`Node`] handle.

use std::fmt;

use crate::tree::{Document, Kind, Properties};

/// Index of a node in its document's arena.
///
/// An id is a plain index, never an ownership edge; it is only meaningful
/// for the document (or a copy of the document) that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owner of an attached node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    /// Top-level node owned by the document root.
    Root,
    /// Child of another node.
    Node(NodeId),
}

/// Stored node. All links are arena indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub(crate) kind: Kind,
    pub(crate) text: String,
    pub(crate) properties: Properties,
    pub(crate) parent: Option<Parent>,
    pub(crate) previous: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) depth: usize,
    /// Number of list containers above this node.
    pub(crate) level: usize,
    /// Positional marker assigned when attached to a list.
    pub(crate) marker: Option<String>,
    pub(crate) children: Vec<NodeId>,
}

impl NodeData {
    pub(crate) fn new(kind: Kind, text: String, properties: Properties) -> Self {
        Self {
            kind,
            text,
            properties,
            parent: None,
            previous: None,
            next: None,
            depth: 0,
            level: 0,
            marker: None,
            children: Vec::new(),
        }
    }
}

/// Borrowed view of a node inside a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> Node<'a> {
    pub(crate) fn new(doc: &'a Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    fn data(self) -> &'a NodeData {
        self.doc.data(self.id)
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn document(self) -> &'a Document {
        self.doc
    }

    pub fn kind(self) -> Kind {
        self.data().kind
    }

    /// Text payload; empty for every kind but [`Kind::Text`].
    pub fn text(self) -> &'a str {
        &self.data().text
    }

    pub fn property(self, name: &str) -> Option<&'a str> {
        self.data().properties.get(name).map(String::as_str)
    }

    pub fn properties(self) -> &'a Properties {
        &self.data().properties
    }

    /// Owner of this node, `None` while detached.
    pub fn parent(self) -> Option<Parent> {
        self.data().parent
    }

    /// Parent node, `None` for top-level or detached nodes.
    pub fn parent_node(self) -> Option<Node<'a>> {
        match self.data().parent {
            Some(Parent::Node(id)) => Some(Node::new(self.doc, id)),
            Some(Parent::Root) | None => None,
        }
    }

    pub fn previous_sibling(self) -> Option<Node<'a>> {
        self.data().previous.map(|id| Node::new(self.doc, id))
    }

    pub fn next_sibling(self) -> Option<Node<'a>> {
        self.data().next.map(|id| Node::new(self.doc, id))
    }

    /// Distance from the document root (top-level nodes are at depth 1).
    pub fn depth(self) -> usize {
        self.data().depth
    }

    /// Number of list containers above this node.
    pub fn level(self) -> usize {
        self.data().level
    }

    /// List marker (`N.` or `*`) assigned when attached to a list.
    pub fn marker(self) -> Option<&'a str> {
        self.data().marker.as_deref()
    }

    pub fn is_attached(self) -> bool {
        self.data().parent.is_some()
    }

    pub fn has_children(self) -> bool {
        !self.data().children.is_empty()
    }

    pub fn children(self) -> impl ExactSizeIterator<Item = Node<'a>> + 'a {
        let doc = self.doc;
        self.data()
            .children
            .iter()
            .map(move |&id| Node::new(doc, id))
    }

    /// Parent nodes from the nearest upward.
    pub fn ancestors(self) -> impl Iterator<Item = Node<'a>> + 'a {
        std::iter::successors(self.parent_node(), |node| node.parent_node())
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}
