//! Type-directed rendering dispatch.
//!
//! Every output format implements [`Format`]: a name, a rule table keyed by
//! [`Kind`], and the assembly of the final page from the top-level nodes.
//! The table is built once per format type and shared by all renderers of
//! that type; kinds without a rule render through the structural fallback,
//! so a format never fails on a kind it does not know.
//!
//! Rendering works on a snapshot: [`Renderer`] clones the caller's document,
//! optionally appends the generated-by trailer to the clone, and renders it
//! eagerly. The caller's document is never touched.

mod bootstrap;
mod html;
mod markdown;

pub use bootstrap::Bootstrap;
pub use html::{Html, escape_html};
pub use markdown::Markdown;

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use docify_config::{Config, TrailerConfig};

use crate::components::{a, cite, footer, hr, p, small};
use crate::tree::{Component, Document, Kind, Node};

/// Render rule for one node kind.
pub type Rule<F> = fn(&Formatter<'_, F>, Node<'_>) -> String;

/// Mapping from node kind to render rule.
///
/// Registering a kind twice keeps the later rule.
pub struct RuleTable<F: Format> {
    rules: HashMap<Kind, Rule<F>>,
    _format: PhantomData<fn() -> F>,
}

impl<F: Format> Default for RuleTable<F> {
    fn default() -> Self {
        Self {
            rules: HashMap::new(),
            _format: PhantomData,
        }
    }
}

impl<F: Format> RuleTable<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `rule` for `kind`, replacing any earlier rule.
    pub fn register(&mut self, kind: Kind, rule: Rule<F>) -> &mut Self {
        self.rules.insert(kind, rule);
        self
    }

    /// Register one rule for several kinds.
    pub fn register_all(&mut self, kinds: &[Kind], rule: Rule<F>) -> &mut Self {
        for &kind in kinds {
            self.rules.insert(kind, rule);
        }
        self
    }

    pub fn get(&self, kind: Kind) -> Option<Rule<F>> {
        self.rules.get(&kind).copied()
    }

    pub fn contains(&self, kind: Kind) -> bool {
        self.rules.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// An output format.
pub trait Format: Sized + 'static {
    /// Format name used in log events.
    const NAME: &'static str;

    /// Rule table shared by every renderer of this format.
    fn rules() -> &'static RuleTable<Self>;

    /// Assemble the final output from the document's top-level nodes.
    fn document(f: &Formatter<'_, Self>, doc: &Document) -> String;
}

/// Dispatches nodes to the rules of format `F`.
pub struct Formatter<'a, F: Format> {
    rules: &'static RuleTable<F>,
    config: &'a Config,
    _format: PhantomData<fn() -> F>,
}

impl<'a, F: Format> Formatter<'a, F> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            rules: F::rules(),
            config,
            _format: PhantomData,
        }
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Render a node with the rule registered for its kind, or the
    /// structural fallback when there is none.
    pub fn format(&self, node: Node<'_>) -> String {
        match self.rules.get(node.kind()) {
            Some(rule) => rule(self, node),
            None => self.fallback(node),
        }
    }

    /// Render every child of `node` in order.
    pub fn format_children(&self, node: Node<'_>) -> Vec<String> {
        node.children().map(|child| self.format(child)).collect()
    }

    /// Render the children of `node` joined by `separator`.
    pub fn join_children(&self, node: Node<'_>, separator: &str) -> String {
        self.format_children(node).join(separator)
    }

    /// Structural default: text payloads verbatim, symbols as plain
    /// whitespace, images as their alternative text, containers as their
    /// children joined by newlines (block kinds) or nothing (inline kinds).
    pub fn fallback(&self, node: Node<'_>) -> String {
        tracing::trace!(
            format = F::NAME,
            kind = %node.kind(),
            "No rule registered, using structural fallback"
        );
        match node.kind() {
            Kind::Text => node.text().to_owned(),
            Kind::NoBreakSpace => " ".to_owned(),
            Kind::Break | Kind::HorizontalRule => "\n".to_owned(),
            Kind::Image => node.property("alt").unwrap_or_default().to_owned(),
            kind if kind.is_block() => self.join_children(node, "\n"),
            _ => self.join_children(node, ""),
        }
    }
}

/// Generated-by trailer: a horizontal rule and a footer crediting the
/// generator with a link.
pub fn trailer(config: &TrailerConfig) -> [Component; 2] {
    let credit = cite([
        "This document was generated with ".into(),
        a(config.generator.as_str(), config.url.as_str()),
        ".".into(),
    ]);
    [hr(), footer(p(small(credit)))]
}

/// A document rendered to format `F`.
///
/// Rendering happens in the constructor; the value only holds the output.
pub struct Renderer<F: Format> {
    output: String,
    _format: PhantomData<F>,
}

impl<F: Format> Renderer<F> {
    /// Render with the default configuration (trailer included).
    pub fn new(doc: &Document) -> Self {
        Self::with_config(doc, &Config::default())
    }

    pub fn with_config(doc: &Document, config: &Config) -> Self {
        let mut snapshot = doc.clone();
        if config.trailer.enabled {
            for component in trailer(&config.trailer) {
                if let Err(error) = snapshot.add(component) {
                    tracing::warn!(format = F::NAME, %error, "Failed to attach trailer");
                    break;
                }
            }
        }

        tracing::debug!(
            format = F::NAME,
            nodes = snapshot.len(),
            "Rendering document"
        );
        let formatter = Formatter::<F>::new(config);
        let output = F::document(&formatter, &snapshot);
        tracing::debug!(format = F::NAME, bytes = output.len(), "Rendered document");

        Self {
            output,
            _format: PhantomData,
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

impl<F: Format> fmt::Display for Renderer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.output)
    }
}

/// Render `doc` to format `F` with the default configuration.
pub fn render<F: Format>(doc: &Document) -> String {
    Renderer::<F>::new(doc).into_output()
}

/// Render `doc` to format `F` with `config`.
pub fn render_with_config<F: Format>(doc: &Document, config: &Config) -> String {
    Renderer::<F>::with_config(doc, config).into_output()
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;
    use crate::components::{b, br, i, img, li, nbsp, ol, section, span, text};

    /// Format without any rules: everything goes through the fallback.
    struct Bare;

    static BARE_RULES: LazyLock<RuleTable<Bare>> = LazyLock::new(RuleTable::new);

    impl Format for Bare {
        const NAME: &'static str = "bare";

        fn rules() -> &'static RuleTable<Self> {
            &BARE_RULES
        }

        fn document(f: &Formatter<'_, Self>, doc: &Document) -> String {
            doc.children()
                .map(|node| f.format(node))
                .collect::<Vec<_>>()
                .join("|")
        }
    }

    /// Format that registers bold twice; the second rule wins.
    struct Shouting;

    fn quiet_bold(f: &Formatter<'_, Shouting>, node: Node<'_>) -> String {
        f.join_children(node, "")
    }

    fn loud_bold(f: &Formatter<'_, Shouting>, node: Node<'_>) -> String {
        f.join_children(node, "").to_uppercase()
    }

    static SHOUTING_RULES: LazyLock<RuleTable<Shouting>> = LazyLock::new(|| {
        let mut table = RuleTable::new();
        table
            .register(Kind::Bold, quiet_bold)
            .register(Kind::Bold, loud_bold);
        table
    });

    impl Format for Shouting {
        const NAME: &'static str = "shouting";

        fn rules() -> &'static RuleTable<Self> {
            &SHOUTING_RULES
        }

        fn document(f: &Formatter<'_, Self>, doc: &Document) -> String {
            doc.children().map(|node| f.format(node)).collect()
        }
    }

    fn no_trailer() -> Config {
        Config::without_trailer()
    }

    #[test]
    fn test_fallback_joins_children() {
        let doc = Document::from_components([
            span([text("a"), b("b"), i("c")]),
            section([text("x"), text("y")]),
            ol([li("1"), li("2")]),
        ])
        .unwrap();
        let output = render_with_config::<Bare>(&doc, &no_trailer());
        assert_eq!(output, "abc|x\ny|1\n2");
    }

    #[test]
    fn test_fallback_leaf_symbols() {
        let doc = Document::from_components([
            span([text("a"), nbsp(), text("b")]),
            span([text("c"), br(), text("d")]),
            hr(),
            img("badge.svg", "Badge"),
        ])
        .unwrap();
        assert_eq!(
            render_with_config::<Bare>(&doc, &no_trailer()),
            "a b|c\nd|\n|Badge"
        );
    }

    #[test]
    fn test_later_registration_wins() {
        assert_eq!(Shouting::rules().len(), 1);
        let doc = Document::from_components([span(["quiet ".into(), b("bold")])]).unwrap();
        let output = render_with_config::<Shouting>(&doc, &no_trailer());
        assert_eq!(output, "quiet BOLD");
    }

    #[test]
    fn test_trailer_appended_to_copy_only() {
        let doc = Document::from_components(["body"]).unwrap();
        let before = doc.clone();

        let output = render::<Bare>(&doc);
        assert_eq!(
            output,
            "body|\n|This document was generated with Docify."
        );
        assert_eq!(doc, before);
        assert_eq!(doc.children().len(), 1);
    }

    #[test]
    fn test_trailer_uses_config() {
        let mut config = Config::default();
        config.trailer.generator = "Acme".to_owned();
        config.trailer.url = "https://acme.example".to_owned();

        let [rule, credit] = trailer(&config.trailer);
        assert_eq!(rule.kind(), Kind::HorizontalRule);
        assert_eq!(credit.kind(), Kind::Footer);

        let doc = Document::new();
        let output = render_with_config::<Bare>(&doc, &config);
        assert_eq!(output, "\n|This document was generated with Acme.");
    }

    #[test]
    fn test_render_is_idempotent() {
        let doc = Document::from_components([span("a"), section(b("b"))]).unwrap();
        assert_eq!(render::<Bare>(&doc), render::<Bare>(&doc));
    }

    #[test]
    fn test_renderer_display() {
        let doc = Document::from_components(["hello"]).unwrap();
        let renderer = Renderer::<Bare>::with_config(&doc, &no_trailer());
        assert_eq!(renderer.output(), "hello");
        assert_eq!(renderer.to_string(), "hello");
    }

    #[test]
    fn test_rule_table_register_all() {
        let mut table: RuleTable<Shouting> = RuleTable::new();
        assert!(table.is_empty());
        table.register_all(&[Kind::Italic, Kind::Bold], quiet_bold);
        assert!(table.contains(Kind::Italic));
        assert!(table.contains(Kind::Bold));
        assert!(!table.contains(Kind::Span));
        assert_eq!(table.len(), 2);
    }
}
