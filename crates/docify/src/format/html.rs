//! HTML format.
//!
//! Produces an HTML5 page with every node mapped to its like-named tag.

use std::sync::LazyLock;

use crate::format::{Format, Formatter, RuleTable};
use crate::tree::{Document, HeadingLevel, Kind, ListKind, Node, Properties};

/// HTML format.
///
/// - text payloads are entity-escaped
/// - each container becomes `<tag attr="..">children</tag>`, or a
///   self-closing `<tag attr=".." />` when it has no children
/// - the top-level nodes are placed inside a fixed page template
pub struct Html;

static RULES: LazyLock<RuleTable<Html>> = LazyLock::new(|| {
    let mut table = RuleTable::new();
    register_rules(&mut table);
    table
});

impl Format for Html {
    const NAME: &'static str = "html";

    fn rules() -> &'static RuleTable<Self> {
        &RULES
    }

    fn document(f: &Formatter<'_, Self>, doc: &Document) -> String {
        let body: Vec<String> = doc.children().map(|node| f.format(node)).collect();
        page(&escape_html(&f.config().html.title), &body.join("\n"))
    }
}

/// Kinds rendered by the generic tag rule.
const TAGGED: &[Kind] = &[
    Kind::Break,
    Kind::HorizontalRule,
    Kind::Anchor,
    Kind::Image,
    Kind::Heading(HeadingLevel::H1),
    Kind::Heading(HeadingLevel::H2),
    Kind::Heading(HeadingLevel::H3),
    Kind::Heading(HeadingLevel::H4),
    Kind::Heading(HeadingLevel::H5),
    Kind::Heading(HeadingLevel::H6),
    Kind::Paragraph,
    Kind::Span,
    Kind::Division,
    Kind::Italic,
    Kind::Bold,
    Kind::Blockquote,
    Kind::Pre,
    Kind::Code,
    Kind::Del,
    Kind::Section,
    Kind::Footer,
    Kind::Small,
    Kind::Cite,
    Kind::List(ListKind::Ordered),
    Kind::List(ListKind::Unordered),
    Kind::ListItem,
    Kind::Table,
    Kind::TableRow,
    Kind::TableHeader,
    Kind::TableData,
];

/// Register the HTML rules into `table`.
///
/// Generic so that HTML-derived formats can start from the same rules and
/// override a subset.
pub(crate) fn register_rules<F: Format>(table: &mut RuleTable<F>) {
    table
        .register(Kind::Text, text)
        .register(Kind::NoBreakSpace, nbsp)
        .register_all(TAGGED, element);
}

/// Tag name for a kind, `None` for kinds that are not elements.
pub(crate) fn tag_name(kind: Kind) -> Option<&'static str> {
    let name = match kind {
        Kind::Text | Kind::NoBreakSpace => return None,
        Kind::Break => "br",
        Kind::HorizontalRule => "hr",
        Kind::Anchor => "a",
        Kind::Image => "img",
        Kind::Heading(HeadingLevel::H1) => "h1",
        Kind::Heading(HeadingLevel::H2) => "h2",
        Kind::Heading(HeadingLevel::H3) => "h3",
        Kind::Heading(HeadingLevel::H4) => "h4",
        Kind::Heading(HeadingLevel::H5) => "h5",
        Kind::Heading(HeadingLevel::H6) => "h6",
        Kind::Paragraph => "p",
        Kind::Span => "span",
        Kind::Division => "div",
        Kind::Italic => "i",
        Kind::Bold => "b",
        Kind::Blockquote => "blockquote",
        Kind::Pre => "pre",
        Kind::Code => "code",
        Kind::Del => "del",
        Kind::Section => "section",
        Kind::Footer => "footer",
        Kind::Small => "small",
        Kind::Cite => "cite",
        Kind::List(ListKind::Ordered) => "ol",
        Kind::List(ListKind::Unordered) => "ul",
        Kind::ListItem => "li",
        Kind::Table => "table",
        Kind::TableRow => "tr",
        Kind::TableHeader => "th",
        Kind::TableData => "td",
    };
    Some(name)
}

fn text<F: Format>(_f: &Formatter<'_, F>, node: Node<'_>) -> String {
    escape_html(node.text())
}

fn nbsp<F: Format>(_f: &Formatter<'_, F>, _node: Node<'_>) -> String {
    "&nbsp;".to_owned()
}

fn element<F: Format>(f: &Formatter<'_, F>, node: Node<'_>) -> String {
    match tag_name(node.kind()) {
        Some(name) => tag(f, name, node, node.properties()),
        None => f.fallback(node),
    }
}

/// Render `node` as element `name` with the given attributes.
///
/// Nodes without children become self-closing tags.
pub(crate) fn tag<F: Format>(
    f: &Formatter<'_, F>,
    name: &str,
    node: Node<'_>,
    properties: &Properties,
) -> String {
    let attrs = attributes(properties);
    if !node.has_children() {
        return format!("<{name}{attrs} />");
    }
    format!("<{name}{attrs}>{}</{name}>", f.join_children(node, ""))
}

/// Render attributes in key order.
///
/// Embedded double quotes are prefixed with a backslash rather than
/// entity-escaped; existing output depends on this form. It does not make
/// untrusted attribute values safe.
pub(crate) fn attributes(properties: &Properties) -> String {
    properties
        .iter()
        .map(|(name, value)| format!(r#" {name}="{}""#, value.replace('"', r#"\""#)))
        .collect()
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
    <head>
        <meta charset="utf-8">
        <meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no">
        <title>{title}</title>
    </head>
    <body>
        <div id="container">
{body}
        </div>
    </body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{
        a, b, br, code, div, h1, h3, hr, i, img, li, nbsp, ol, p, pre, span, table, td, text,
        th, tr, ul,
    };
    use crate::format::{render, render_with_config};
    use crate::tree::Component;
    use docify_config::Config;
    use pretty_assertions::assert_eq;

    /// Render a single component without the page template or trailer.
    fn fragment(component: Component) -> String {
        let doc = Document::from_components([component]).unwrap();
        let config = Config::without_trailer();
        let f = Formatter::<Html>::new(&config);
        f.format(doc.children().next().unwrap())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_text_is_escaped() {
        let output = fragment(p(r#"1 < 2 & "3" > 0"#));
        assert_eq!(output, "<p>1 &lt; 2 &amp; &quot;3&quot; &gt; 0</p>");
        assert!(!output.contains(r#""3""#));
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(
            fragment(b(i("Italic") + nbsp() + "inside bold")),
            "<b><span><i>Italic</i>&nbsp;inside bold</span></b>"
        );
    }

    #[test]
    fn test_headings() {
        assert_eq!(fragment(h1("Title")), "<h1>Title</h1>");
        assert_eq!(fragment(h3(["A ".into(), b("B")])), "<h3>A <b>B</b></h3>");
    }

    #[test]
    fn test_void_elements() {
        assert_eq!(fragment(br()), "<br />");
        assert_eq!(fragment(hr()), "<hr />");
        assert_eq!(fragment(div(Vec::new())), "<div />");
    }

    #[test]
    fn test_image_attributes_in_key_order() {
        assert_eq!(
            fragment(img("https://example.com/badge.svg", "Badge")),
            r#"<img alt="Badge" src="https://example.com/badge.svg" />"#
        );
    }

    #[test]
    fn test_anchor() {
        assert_eq!(
            fragment(a("google", "https://google.com")),
            r#"<a href="https://google.com">google</a>"#
        );
        assert_eq!(
            fragment(a(img("x.svg", "X"), "#")),
            r##"<a href="#"><img alt="X" src="x.svg" /></a>"##
        );
    }

    #[test]
    fn test_attribute_quotes_are_backslash_escaped() {
        let component = span("x").with_property("title", r#"say "hi""#);
        assert_eq!(fragment(component), r#"<span title="say \"hi\"">x</span>"#);
    }

    #[test]
    fn test_table() {
        let output = fragment(table([
            tr([th("A"), th("B")]),
            tr([td("1"), td("2")]),
        ]));
        assert_eq!(
            output,
            "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>"
        );
    }

    #[test]
    fn test_nested_lists() {
        let output = fragment(ol([li("a"), ul([li("b"), li(a("c", "#"))])]));
        assert_eq!(
            output,
            r##"<ol><li>a</li><ul><li>b</li><li><a href="#">c</a></li></ul></ol>"##
        );
    }

    #[test]
    fn test_pre_code() {
        assert_eq!(
            fragment(pre(code("fn main() {}\n"))),
            "<pre><code>fn main() {}\n</code></pre>"
        );
    }

    #[test]
    fn test_page_template() {
        let doc = Document::from_components([h1("Hello"), p("World")]).unwrap();
        let output = render_with_config::<Html>(&doc, &Config::without_trailer());
        assert_eq!(
            output,
            r#"<!doctype html>
<html>
    <head>
        <meta charset="utf-8">
        <meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no">
        <title>Docify Document</title>
    </head>
    <body>
        <div id="container">
<h1>Hello</h1>
<p>World</p>
        </div>
    </body>
</html>
"#
        );
    }

    #[test]
    fn test_title_from_config_is_escaped() {
        let mut config = Config::without_trailer();
        config.html.title = "Q&A".to_owned();
        let output = render_with_config::<Html>(&Document::new(), &config);
        assert!(output.contains("<title>Q&amp;A</title>"));
    }

    #[test]
    fn test_default_trailer() {
        let doc = Document::from_components([p("Body")]).unwrap();
        let output = render::<Html>(&doc);
        assert!(output.contains(
            "<p>Body</p>\n<hr />\n<footer><p><small><cite>This document was generated with \
             <a href=\"https://github.com/rapidstack/Docify\">Docify</a>.</cite></small></p></footer>\n"
        ));
    }

    #[test]
    fn test_render_does_not_mutate_document() {
        let doc = Document::from_components([p(text("x")), ol([li("a")])]).unwrap();
        let before = doc.clone();
        let first = render::<Html>(&doc);
        let second = render::<Html>(&doc);
        assert_eq!(first, second);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_every_kind_has_a_rule() {
        for &kind in TAGGED {
            assert!(Html::rules().contains(kind), "missing rule for {kind}");
        }
        assert!(Html::rules().contains(Kind::Text));
        assert!(Html::rules().contains(Kind::NoBreakSpace));
    }
}
