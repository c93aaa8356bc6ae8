//! Node kind taxonomy.

use std::fmt;

use crate::error::InvalidNodeError;

/// Heading level (1-6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Numeric level (1-6).
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
            Self::H6 => 6,
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = InvalidNodeError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Self::H1),
            2 => Ok(Self::H2),
            3 => Ok(Self::H3),
            4 => Ok(Self::H4),
            5 => Ok(Self::H5),
            6 => Ok(Self::H6),
            _ => Err(InvalidNodeError::HeadingLevel(level)),
        }
    }
}

/// Whether a list numbers its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    /// Marker for the item at 1-based `position`.
    #[must_use]
    pub fn marker(self, position: usize) -> String {
        match self {
            Self::Ordered => format!("{position}."),
            Self::Unordered => "*".to_owned(),
        }
    }
}

/// Kind of a document node.
///
/// Formatters key their rule tables by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Raw text payload.
    Text,
    NoBreakSpace,
    Break,
    HorizontalRule,
    /// Link wrapping a single display value; requires `href`.
    Anchor,
    /// Image; requires `src` and `alt`.
    Image,
    Heading(HeadingLevel),
    Paragraph,
    Span,
    /// Generic grouping container.
    Division,
    Italic,
    Bold,
    Blockquote,
    /// Preformatted block.
    Pre,
    /// Inline code.
    Code,
    /// Strikethrough.
    Del,
    Section,
    Footer,
    Small,
    Cite,
    List(ListKind),
    ListItem,
    Table,
    TableRow,
    TableHeader,
    TableData,
}

impl Kind {
    /// Whether nodes of this kind never own children.
    #[must_use]
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            Self::Text | Self::NoBreakSpace | Self::Break | Self::HorizontalRule | Self::Image
        )
    }

    /// Whether this kind is a list container.
    #[must_use]
    pub fn is_list(self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Properties a node of this kind must carry.
    #[must_use]
    pub fn required_properties(self) -> &'static [&'static str] {
        match self {
            Self::Anchor => &["href"],
            Self::Image => &["src", "alt"],
            _ => &[],
        }
    }

    /// Whether children of this kind stack vertically.
    ///
    /// Used by the structural fallback to choose between newline- and
    /// nothing-joined children.
    #[must_use]
    pub fn is_block(self) -> bool {
        matches!(
            self,
            Self::Heading(_)
                | Self::Paragraph
                | Self::Division
                | Self::Blockquote
                | Self::Pre
                | Self::Section
                | Self::Footer
                | Self::List(_)
                | Self::ListItem
                | Self::Table
                | Self::TableRow
                | Self::HorizontalRule
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::NoBreakSpace => "no-break space",
            Self::Break => "break",
            Self::HorizontalRule => "horizontal rule",
            Self::Anchor => "anchor",
            Self::Image => "image",
            Self::Heading(level) => return write!(f, "heading {}", level.as_u8()),
            Self::Paragraph => "paragraph",
            Self::Span => "span",
            Self::Division => "division",
            Self::Italic => "italic",
            Self::Bold => "bold",
            Self::Blockquote => "blockquote",
            Self::Pre => "pre",
            Self::Code => "code",
            Self::Del => "del",
            Self::Section => "section",
            Self::Footer => "footer",
            Self::Small => "small",
            Self::Cite => "cite",
            Self::List(ListKind::Ordered) => "ordered list",
            Self::List(ListKind::Unordered) => "unordered list",
            Self::ListItem => "list item",
            Self::Table => "table",
            Self::TableRow => "table row",
            Self::TableHeader => "table header",
            Self::TableData => "table data",
        };
        f.write_str(name)
    }
}
