//! Unattached node descriptions.
//!
//! A [`Component`] owns its children outright. It becomes part of the
//! arena-backed tree only when handed to a [`Document`](crate::Document),
//! at which point parent, sibling and depth links are assigned.

use std::collections::BTreeMap;
use std::ops::Add;

use crate::error::InvalidNodeError;
use crate::tree::Kind;

/// Attribute name to value mapping carried by every node.
pub type Properties = BTreeMap<String, String>;

/// Owned, unattached node with its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub(crate) kind: Kind,
    pub(crate) text: String,
    pub(crate) properties: Properties,
    pub(crate) children: Vec<Component>,
}

impl Component {
    /// Create an empty component of the given kind.
    #[must_use]
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            text: String::new(),
            properties: Properties::new(),
            children: Vec::new(),
        }
    }

    /// Create a text leaf.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            text: value.into(),
            ..Self::new(Kind::Text)
        }
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Component>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children in order.
    #[must_use]
    pub fn with_children(mut self, children: impl Into<Children>) -> Self {
        self.children.extend(children.into().0);
        self
    }

    /// Set a property, replacing any previous value.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Text payload; empty for every kind but [`Kind::Text`].
    pub fn text_value(&self) -> &str {
        &self.text
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn children(&self) -> &[Component] {
        &self.children
    }

    /// Check this component (not its descendants) against its kind contract.
    pub fn validate(&self) -> Result<(), InvalidNodeError> {
        let count = self.children.len();
        if self.kind.is_leaf() && count > 0 {
            return Err(InvalidNodeError::UnexpectedChildren {
                kind: self.kind,
                count,
            });
        }
        if self.kind == Kind::Anchor && count != 1 {
            return Err(InvalidNodeError::DisplayValue { count });
        }
        for &property in self.kind.required_properties() {
            if !self.properties.contains_key(property) {
                return Err(InvalidNodeError::MissingProperty {
                    kind: self.kind,
                    property,
                });
            }
        }
        Ok(())
    }

    /// Concatenate two components into a span.
    ///
    /// If `self` is already a span the result is a copy of it with `other`
    /// appended; a span `other` contributes its children instead of itself.
    /// Otherwise a fresh span holding both is returned. Neither input is
    /// modified.
    #[must_use]
    pub fn combine(&self, other: &Component) -> Component {
        self.clone() + other.clone()
    }
}

impl<T: Into<Component>> Add<T> for Component {
    type Output = Component;

    fn add(self, rhs: T) -> Component {
        let rhs = rhs.into();
        if self.kind != Kind::Span {
            return Component::new(Kind::Span).with_child(self).with_child(rhs);
        }

        let mut span = self;
        if rhs.kind == Kind::Span {
            span.children.extend(rhs.children);
        } else {
            span.children.push(rhs);
        }
        span
    }
}

impl From<&str> for Component {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Component {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

/// Ordered children accepted by container constructors.
///
/// Strings become text leaves, so `h1("Title")` and
/// `span(["Inline: ".into(), code("x")])` both work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children(Vec<Component>);

impl Children {
    /// No children.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Component> {
        self.0
    }
}

impl From<Component> for Children {
    fn from(component: Component) -> Self {
        Self(vec![component])
    }
}

impl From<&str> for Children {
    fn from(value: &str) -> Self {
        Self(vec![Component::text(value)])
    }
}

impl From<String> for Children {
    fn from(value: String) -> Self {
        Self(vec![Component::text(value)])
    }
}

impl From<Vec<Component>> for Children {
    fn from(components: Vec<Component>) -> Self {
        Self(components)
    }
}

impl<const N: usize> From<[Component; N]> for Children {
    fn from(components: [Component; N]) -> Self {
        Self(components.into())
    }
}

impl FromIterator<Component> for Children {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
