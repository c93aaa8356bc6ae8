//! Component constructors.
//!
//! Short names mirror the HTML element each kind corresponds to:
//!
//! ```
//! use docify::components::{a, b, h1, i, li, nbsp, ol, p};
//!
//! let title = h1("Docify");
//! let intro = p(b("Note:") + nbsp() + i("not a converter"));
//! let links = ol([li(a("Docs", "https://docify.readthedocs.io")), li("Examples")]);
//! ```

use crate::tree::{Children, Component, HeadingLevel, Kind, ListKind};

fn container(kind: Kind, children: impl Into<Children>) -> Component {
    Component::new(kind).with_children(children)
}

/// Raw text leaf.
pub fn text(value: impl Into<String>) -> Component {
    Component::text(value)
}

/// No-break space (`&nbsp;`).
pub fn nbsp() -> Component {
    Component::new(Kind::NoBreakSpace)
}

/// Line break (`<br />`).
pub fn br() -> Component {
    Component::new(Kind::Break)
}

/// Horizontal rule (`<hr />`).
pub fn hr() -> Component {
    Component::new(Kind::HorizontalRule)
}

/// Link around a display value.
pub fn a(value: impl Into<Component>, href: impl Into<String>) -> Component {
    Component::new(Kind::Anchor)
        .with_child(value)
        .with_property("href", href)
}

/// Image with source and alternative text.
pub fn img(src: impl Into<String>, alt: impl Into<String>) -> Component {
    Component::new(Kind::Image)
        .with_property("src", src)
        .with_property("alt", alt)
}

pub fn heading(level: HeadingLevel, children: impl Into<Children>) -> Component {
    container(Kind::Heading(level), children)
}

pub fn h1(children: impl Into<Children>) -> Component {
    heading(HeadingLevel::H1, children)
}

pub fn h2(children: impl Into<Children>) -> Component {
    heading(HeadingLevel::H2, children)
}

pub fn h3(children: impl Into<Children>) -> Component {
    heading(HeadingLevel::H3, children)
}

pub fn h4(children: impl Into<Children>) -> Component {
    heading(HeadingLevel::H4, children)
}

pub fn h5(children: impl Into<Children>) -> Component {
    heading(HeadingLevel::H5, children)
}

pub fn h6(children: impl Into<Children>) -> Component {
    heading(HeadingLevel::H6, children)
}

pub fn p(children: impl Into<Children>) -> Component {
    container(Kind::Paragraph, children)
}

pub fn span(children: impl Into<Children>) -> Component {
    container(Kind::Span, children)
}

/// Generic grouping container.
pub fn div(children: impl Into<Children>) -> Component {
    container(Kind::Division, children)
}

/// Emphasis.
pub fn i(children: impl Into<Children>) -> Component {
    container(Kind::Italic, children)
}

/// Strong emphasis.
pub fn b(children: impl Into<Children>) -> Component {
    container(Kind::Bold, children)
}

pub fn blockquote(children: impl Into<Children>) -> Component {
    container(Kind::Blockquote, children)
}

/// Preformatted block.
pub fn pre(children: impl Into<Children>) -> Component {
    container(Kind::Pre, children)
}

/// Inline code.
pub fn code(children: impl Into<Children>) -> Component {
    container(Kind::Code, children)
}

/// Strikethrough.
pub fn del(children: impl Into<Children>) -> Component {
    container(Kind::Del, children)
}

pub fn section(children: impl Into<Children>) -> Component {
    container(Kind::Section, children)
}

pub fn footer(children: impl Into<Children>) -> Component {
    container(Kind::Footer, children)
}

pub fn small(children: impl Into<Children>) -> Component {
    container(Kind::Small, children)
}

pub fn cite(children: impl Into<Children>) -> Component {
    container(Kind::Cite, children)
}

/// Ordered list; items are numbered `1.`, `2.`, ... as they are attached.
pub fn ol(children: impl Into<Children>) -> Component {
    container(Kind::List(ListKind::Ordered), children)
}

/// Unordered list.
pub fn ul(children: impl Into<Children>) -> Component {
    container(Kind::List(ListKind::Unordered), children)
}

pub fn li(children: impl Into<Children>) -> Component {
    container(Kind::ListItem, children)
}

pub fn table(rows: impl Into<Children>) -> Component {
    container(Kind::Table, rows)
}

/// Table row.
pub fn tr(cells: impl Into<Children>) -> Component {
    container(Kind::TableRow, cells)
}

/// Table header cell.
pub fn th(children: impl Into<Children>) -> Component {
    container(Kind::TableHeader, children)
}

/// Table data cell.
pub fn td(children: impl Into<Children>) -> Component {
    container(Kind::TableData, children)
}
