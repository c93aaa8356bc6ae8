//! Arena-backed document tree.
//!
//! Nodes live in a flat vector owned by the [`Document`]; parent and sibling
//! links are [`NodeId`] indices into it, so back-references never own
//! anything and cloning a document is a plain structural copy.
//!
//! Invariants maintained by [`Document::attach`]:
//! - every attached node's depth is its parent's depth plus one, with the
//!   root at depth 0;
//! - `a.next == b` exactly when `b.previous == a`, for siblings under the
//!   same owner;
//! - a node has at most one parent, and attaching never duplicates it;
//! - a node's list level counts the list containers above it.

mod component;
mod kind;
mod node;

pub use component::{Children, Component, Properties};
pub use kind::{HeadingLevel, Kind, ListKind};
pub use node::{Node, NodeId, Parent};

use node::NodeData;

use crate::error::{AttachmentError, Result};

/// Root container owning the whole tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<NodeData>,
    /// Top-level nodes in insertion order.
    roots: Vec<NodeId>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from top-level components in order.
    pub fn from_components<I, C>(components: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Component>,
    {
        let mut doc = Self::new();
        for component in components {
            doc.add(component)?;
        }
        Ok(doc)
    }

    /// Append a component as the next top-level node.
    ///
    /// Strings are wrapped as text leaves.
    pub fn add(&mut self, component: impl Into<Component>) -> Result<NodeId> {
        let id = self.create(component)?;
        self.link(id, Parent::Root)?;
        Ok(id)
    }

    /// Materialize a component subtree without attaching its top node.
    ///
    /// Every component in the subtree is validated first; on error the
    /// document is left unchanged.
    pub fn create(&mut self, component: impl Into<Component>) -> Result<NodeId> {
        let component = component.into();
        validate_tree(&component)?;

        let top = self.push(&component);
        let mut stack = vec![(top, component)];
        while let Some((id, component)) = stack.pop() {
            for child in component.children {
                let child_id = self.push(&child);
                self.link(child_id, Parent::Node(id))?;
                stack.push((child_id, child));
            }
        }
        Ok(top)
    }

    /// Attach a detached node as the last child of `container`.
    pub fn attach(&mut self, child: NodeId, container: NodeId) -> Result<(), AttachmentError> {
        self.link(child, Parent::Node(container))
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.index() < self.nodes.len()).then(|| Node::new(self, id))
    }

    /// Top-level nodes in insertion order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = Node<'_>> {
        self.roots.iter().map(|&id| Node::new(self, id))
    }

    /// Every node in the arena, attached or not, in creation order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = Node<'_>> {
        (0..self.nodes.len()).map(|index| Node::new(self, NodeId(to_u32(index))))
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    fn push(&mut self, component: &Component) -> NodeId {
        let id = NodeId(to_u32(self.nodes.len()));
        self.nodes.push(NodeData::new(
            component.kind,
            component.text.clone(),
            component.properties.clone(),
        ));
        id
    }

    fn check(&self, id: NodeId) -> Result<(), AttachmentError> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(AttachmentError::UnknownNode(id))
        }
    }

    /// Link `child` under `parent`, then refresh depth and list level of the
    /// whole subtree.
    fn link(&mut self, child: NodeId, parent: Parent) -> Result<(), AttachmentError> {
        self.check(child)?;
        if self.data(child).parent.is_some() {
            return Err(AttachmentError::AlreadyAttached(child));
        }

        let (depth, level, list) = match parent {
            Parent::Root => (1, 0, None),
            Parent::Node(container) => {
                self.check(container)?;
                let owner = self.data(container);
                if owner.kind.is_leaf() {
                    return Err(AttachmentError::NotAContainer {
                        container,
                        kind: owner.kind,
                    });
                }
                if owner.kind == Kind::Anchor && !owner.children.is_empty() {
                    return Err(AttachmentError::DisplayValueTaken(container));
                }
                if container == child || self.is_ancestor(child, container) {
                    return Err(AttachmentError::Cycle { child, container });
                }
                let list = match owner.kind {
                    Kind::List(list) => Some(list),
                    _ => None,
                };
                let level = owner.level + usize::from(list.is_some());
                (owner.depth + 1, level, list)
            }
        };

        let siblings = match parent {
            Parent::Root => &mut self.roots,
            Parent::Node(container) => &mut self.nodes[container.index()].children,
        };
        let previous = siblings.last().copied();
        let position = siblings.len() + 1;
        siblings.push(child);

        if let Some(previous) = previous {
            self.nodes[previous.index()].next = Some(child);
        }
        let node = &mut self.nodes[child.index()];
        node.parent = Some(parent);
        node.previous = previous;
        node.marker = list.map(|list| list.marker(position));

        self.propagate(child, depth, level);

        tracing::trace!(%child, ?parent, depth, "Attached node");
        Ok(())
    }

    /// Whether `ancestor` is above `id`.
    fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.data(id).parent;
        while let Some(Parent::Node(parent)) = current {
            if parent == ancestor {
                return true;
            }
            current = self.data(parent).parent;
        }
        false
    }

    /// Assign depth and list level to `top` and everything below it.
    ///
    /// Iterative so that deep trees do not grow the call stack.
    fn propagate(&mut self, top: NodeId, depth: usize, level: usize) {
        let mut stack = vec![(top, depth, level)];
        while let Some((id, depth, level)) = stack.pop() {
            let node = &mut self.nodes[id.index()];
            node.depth = depth;
            node.level = level;
            let child_level = level + usize::from(node.kind.is_list());
            stack.extend(
                node.children
                    .iter()
                    .map(|&child| (child, depth + 1, child_level)),
            );
        }
    }
}

fn validate_tree(component: &Component) -> Result<()> {
    let mut stack = vec![component];
    while let Some(component) = stack.pop() {
        component.validate()?;
        stack.extend(&component.children);
    }
    Ok(())
}

fn to_u32(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}
