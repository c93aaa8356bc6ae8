//! Document component tree with pluggable formatters.
//!
//! A document is built from owned [`Component`] values, materialized into an
//! arena-backed [`Document`], and rendered by one of the output formats:
//! - [`Html`]: plain HTML5 page
//! - [`Bootstrap`]: HTML with a Bootstrap 4 grid and styled code blocks
//! - [`Markdown`]: Markdown text
//!
//! Each format is a static rule table keyed by node [`Kind`]. Kinds a format
//! does not know render through a structural fallback, so adding a kind
//! never breaks an existing format.
//!
//! # Example
//!
//! ```
//! use docify::components::{a, b, h1, li, ol, p};
//! use docify::{Document, Markdown, render};
//!
//! let doc = Document::from_components([
//!     h1("Docify"),
//!     p(b("Bold") + " text"),
//!     ol([li("one"), li(a("two", "#"))]),
//! ])
//! .unwrap();
//!
//! let markdown = render::<Markdown>(&doc);
//! assert!(markdown.starts_with("Docify\n===================="));
//! assert!(markdown.contains("1. one\n2. [two](#)"));
//! ```

pub mod components;
mod error;
pub mod format;
mod tree;

pub use docify_config::{Config, ConfigError, HtmlConfig, TrailerConfig};
pub use error::{AttachmentError, Error, InvalidNodeError, Result};
pub use format::{
    Bootstrap, Format, Formatter, Html, Markdown, Renderer, Rule, RuleTable, escape_html, render,
    render_with_config, trailer,
};
pub use tree::{
    Children, Component, Document, HeadingLevel, Kind, ListKind, Node, NodeId, Parent, Properties,
};
