//! Markdown format.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::format::{Format, Formatter, RuleTable};
use crate::tree::{Document, HeadingLevel, Kind, ListKind, Node};

/// Paired strong or emphasis spans, or a lone marker.
static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*[^*\n]+\*\*|__[^_\n]+__|\*[^*\n]+\*|_[^_\n]+_|[*_]").unwrap()
});

const UNDERLINE_WIDTH: usize = 20;
const RULE_WIDTH: usize = 50;

/// Markdown format.
///
/// Sibling nodes are separated by a blank line when either neighbour is
/// block-level. Otherwise the document and sections put each node on its
/// own line, while paragraphs, divisions, block quotes and list items keep
/// runs of inline nodes on one line. Footers, small print and citations
/// have no rule of their own and render through the structural fallback.
pub struct Markdown;

static RULES: LazyLock<RuleTable<Markdown>> = LazyLock::new(|| {
    let mut table = RuleTable::new();
    table
        .register(Kind::Text, text)
        .register(Kind::NoBreakSpace, |_, _| " ".to_owned())
        .register(Kind::Break, |_, _| "\n".to_owned())
        .register(Kind::HorizontalRule, |_, _| "-".repeat(RULE_WIDTH))
        .register(Kind::Anchor, anchor)
        .register(Kind::Image, image)
        .register_all(
            &[
                Kind::Heading(HeadingLevel::H1),
                Kind::Heading(HeadingLevel::H2),
                Kind::Heading(HeadingLevel::H3),
                Kind::Heading(HeadingLevel::H4),
                Kind::Heading(HeadingLevel::H5),
                Kind::Heading(HeadingLevel::H6),
            ],
            heading,
        )
        .register_all(&[Kind::Paragraph, Kind::Division], |f, node| {
            sequence(f, node.children(), Flow::Inline)
        })
        .register(Kind::Span, inline)
        .register(Kind::Italic, |f, node| wrap(f, node, "*"))
        .register(Kind::Bold, |f, node| wrap(f, node, "**"))
        .register(Kind::Del, |f, node| wrap(f, node, "~~"))
        .register(Kind::Code, code)
        .register(Kind::Pre, pre)
        .register(Kind::Blockquote, blockquote)
        .register(Kind::Section, |f, node| {
            sequence(f, node.children(), Flow::Lines)
        })
        .register_all(
            &[
                Kind::List(ListKind::Ordered),
                Kind::List(ListKind::Unordered),
            ],
            |f, node| f.join_children(node, "\n"),
        )
        .register(Kind::ListItem, list_item)
        .register(Kind::Table, table_rule)
        .register(Kind::TableRow, |f, node| f.join_children(node, " | "))
        .register_all(&[Kind::TableHeader, Kind::TableData], inline);
    table
});

impl Format for Markdown {
    const NAME: &'static str = "markdown";

    fn rules() -> &'static RuleTable<Self> {
        &RULES
    }

    fn document(f: &Formatter<'_, Self>, doc: &Document) -> String {
        let mut output = sequence(f, doc.children(), Flow::Lines);
        output.push('\n');
        output
    }
}

/// Kinds that need a blank line around them.
fn is_block_level(kind: Kind) -> bool {
    matches!(
        kind,
        Kind::Heading(_)
            | Kind::List(_)
            | Kind::Table
            | Kind::Blockquote
            | Kind::Pre
            | Kind::HorizontalRule
            | Kind::Section
            | Kind::Break
    )
}

/// Kinds that flow within a line.
fn is_inline(kind: Kind) -> bool {
    matches!(
        kind,
        Kind::Text
            | Kind::NoBreakSpace
            | Kind::Anchor
            | Kind::Image
            | Kind::Span
            | Kind::Italic
            | Kind::Bold
            | Kind::Code
            | Kind::Del
            | Kind::Small
            | Kind::Cite
    )
}

/// How non-block siblings of a container are joined.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Every node on its own line (document, sections).
    Lines,
    /// Adjacent inline nodes stay on the same line; a break is a plain
    /// line break.
    Inline,
}

fn separator(previous: Kind, next: Kind, flow: Flow) -> &'static str {
    let inline = flow == Flow::Inline;
    if inline && (previous == Kind::Break || next == Kind::Break) {
        ""
    } else if is_block_level(previous) || is_block_level(next) {
        "\n\n"
    } else if inline && is_inline(previous) && is_inline(next) {
        ""
    } else {
        "\n"
    }
}

/// Join a sequence of sibling nodes with block-aware separators.
fn sequence<'a>(
    f: &Formatter<'_, Markdown>,
    nodes: impl IntoIterator<Item = Node<'a>>,
    flow: Flow,
) -> String {
    let mut output = String::new();
    let mut previous: Option<Kind> = None;
    for node in nodes {
        let kind = node.kind();
        if let Some(previous) = previous {
            output.push_str(separator(previous, kind, flow));
        }
        output.push_str(&f.format(node));
        previous = Some(kind);
    }
    output
}

/// Backslash-escape emphasis markers that are not part of a pair.
pub(crate) fn escape_emphasis(s: &str) -> String {
    EMPHASIS_RE
        .replace_all(s, |caps: &Captures<'_>| {
            let matched = &caps[0];
            if matched.len() == 1 {
                format!("\\{matched}")
            } else {
                matched.to_owned()
            }
        })
        .into_owned()
}

fn is_verbatim(node: Node<'_>) -> bool {
    node.ancestors()
        .any(|ancestor| matches!(ancestor.kind(), Kind::Code | Kind::Pre))
}

fn text(_f: &Formatter<'_, Markdown>, node: Node<'_>) -> String {
    if is_verbatim(node) {
        node.text().to_owned()
    } else {
        escape_emphasis(node.text())
    }
}

fn inline(f: &Formatter<'_, Markdown>, node: Node<'_>) -> String {
    f.join_children(node, "")
}

fn wrap(f: &Formatter<'_, Markdown>, node: Node<'_>, marker: &str) -> String {
    format!("{marker}{}{marker}", f.join_children(node, ""))
}

fn anchor(f: &Formatter<'_, Markdown>, node: Node<'_>) -> String {
    format!(
        "[{}]({})",
        f.join_children(node, ""),
        node.property("href").unwrap_or_default()
    )
}

fn image(_f: &Formatter<'_, Markdown>, node: Node<'_>) -> String {
    format!(
        "![{}]({})",
        node.property("alt").unwrap_or_default(),
        node.property("src").unwrap_or_default()
    )
}

fn heading(f: &Formatter<'_, Markdown>, node: Node<'_>) -> String {
    let content = f.join_children(node, "");
    match node.kind() {
        Kind::Heading(HeadingLevel::H1) => format!("{content}\n{}", "=".repeat(UNDERLINE_WIDTH)),
        Kind::Heading(HeadingLevel::H2) => format!("{content}\n{}", "-".repeat(UNDERLINE_WIDTH)),
        Kind::Heading(level) => {
            format!("{} {content}", "#".repeat(usize::from(level.as_u8())))
        }
        _ => content,
    }
}

fn code(f: &Formatter<'_, Markdown>, node: Node<'_>) -> String {
    let content = f.join_children(node, "");
    match node.parent_node() {
        Some(parent) if parent.kind() == Kind::Pre => content,
        _ => format!("``{content}``"),
    }
}

fn pre(f: &Formatter<'_, Markdown>, node: Node<'_>) -> String {
    format!("```\n{}\n```", f.join_children(node, ""))
}

fn blockquote(f: &Formatter<'_, Markdown>, node: Node<'_>) -> String {
    sequence(f, node.children(), Flow::Inline)
        .lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_owned()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix every non-empty line of `content` with `indent`.
fn indent_lines(content: &str, indent: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `indent marker content`, with nested lists on their own lines.
///
/// Children keep their order: content following a nested list continues
/// below it, aligned with the text after the marker.
fn list_item(f: &Formatter<'_, Markdown>, node: Node<'_>) -> String {
    let indent = "   ".repeat(node.level().saturating_sub(1));
    let marker = node.marker().unwrap_or("*");
    let continuation = format!("{indent}{}", " ".repeat(marker.len() + 1));

    let mut output = format!("{indent}{marker} ");
    let mut first = true;
    let mut run = Vec::new();
    for child in node.children() {
        if child.kind().is_list() {
            push_run(f, &mut output, &mut run, &continuation, first);
            first = false;
            output.push('\n');
            output.push_str(&f.format(child));
        } else {
            run.push(child);
        }
    }
    push_run(f, &mut output, &mut run, &continuation, first);
    output
}

/// Append the pending non-list children of a list item. Only the first run
/// starts on the marker line.
fn push_run(
    f: &Formatter<'_, Markdown>,
    output: &mut String,
    run: &mut Vec<Node<'_>>,
    continuation: &str,
    first: bool,
) {
    if run.is_empty() {
        return;
    }
    let content = sequence(f, run.drain(..), Flow::Inline);
    let rest = if first {
        let (head, rest) = content.split_once('\n').unwrap_or((content.as_str(), ""));
        output.push_str(head);
        rest
    } else {
        content.as_str()
    };
    if !rest.is_empty() {
        output.push('\n');
        output.push_str(&indent_lines(rest, continuation));
    }
}

fn table_rule(f: &Formatter<'_, Markdown>, node: Node<'_>) -> String {
    let mut lines = Vec::with_capacity(node.children().len() + 1);
    for (position, row) in node.children().enumerate() {
        lines.push(f.format(row));
        if position == 0 {
            lines.push(vec!["---"; row.children().len()].join(" | "));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{
        a, b, blockquote as quote, br, code as code_, del, div, h1, h2, h3, h6, hr, i, img, li,
        nbsp, ol, p, pre as pre_, section, table, td, text as text_, th, tr, ul,
    };
    use crate::format::{render, render_with_config};
    use crate::tree::Component;
    use docify_config::Config;
    use pretty_assertions::assert_eq;

    fn fragment(component: Component) -> String {
        let doc = Document::from_components([component]).unwrap();
        let config = Config::without_trailer();
        let f = Formatter::<Markdown>::new(&config);
        f.format(doc.children().next().unwrap())
    }

    fn page(components: Vec<Component>) -> String {
        let doc = Document::from_components(components).unwrap();
        render_with_config::<Markdown>(&doc, &Config::without_trailer())
    }

    #[test]
    fn test_escape_emphasis() {
        assert_eq!(escape_emphasis("*bold* and *text"), r"*bold* and \*text");
        assert_eq!(escape_emphasis("_twice_broken*"), r"_twice_broken\*");
        assert_eq!(escape_emphasis("snake_case"), r"snake\_case");
        assert_eq!(escape_emphasis("plain"), "plain");
    }

    #[test]
    fn test_escape_keeps_strong_pairs() {
        assert_eq!(escape_emphasis("**bold** x"), "**bold** x");
        assert_eq!(escape_emphasis("__init__ and _x"), r"__init__ and \_x");
        assert_eq!(escape_emphasis("**a** and *b* and *"), r"**a** and *b* and \*");
    }

    #[test]
    fn test_text_escaping() {
        assert_eq!(fragment(text_("*bold* and *text")), r"*bold* and \*text");
    }

    #[test]
    fn test_code_text_is_verbatim() {
        assert_eq!(fragment(code_("a_b*c")), "``a_b*c``");
        assert_eq!(
            fragment(pre_(code_("let x = a * b;"))),
            "```\nlet x = a * b;\n```"
        );
    }

    #[test]
    fn test_headings() {
        assert_eq!(fragment(h1("Title")), format!("Title\n{}", "=".repeat(20)));
        assert_eq!(fragment(h2("Sub")), format!("Sub\n{}", "-".repeat(20)));
        assert_eq!(fragment(h3("Minor")), "### Minor");
        assert_eq!(fragment(h6("Tiny")), "###### Tiny");
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(
            fragment(p([b("x"), text_(" "), i("y"), nbsp(), del("z")])),
            "**x** *y* ~~z~~"
        );
    }

    #[test]
    fn test_links_and_images() {
        assert_eq!(
            fragment(a("google", "https://google.com")),
            "[google](https://google.com)"
        );
        assert_eq!(fragment(img("badge.svg", "Badge")), "![Badge](badge.svg)");
        assert_eq!(
            fragment(a(img("badge.svg", "Badge"), "https://ci.example")),
            "[![Badge](badge.svg)](https://ci.example)"
        );
    }

    #[test]
    fn test_symbols() {
        assert_eq!(fragment(hr()), "-".repeat(50));
        assert_eq!(fragment(br()), "\n");
    }

    #[test]
    fn test_blockquote_prefixes_every_line() {
        assert_eq!(
            fragment(quote(["line one".into(), br(), "line two".into()])),
            "> line one\n> line two"
        );
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(fragment(ol([li("a"), li("b"), li("c")])), "1. a\n2. b\n3. c");
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(fragment(ul([li("x"), li(b("y"))])), "* x\n* **y**");
    }

    #[test]
    fn test_nested_list_indents_and_restarts() {
        let list = ol([
            li("a"),
            li([text_("b"), ol([li("c"), li("d")])]),
            li("e"),
        ]);
        assert_eq!(fragment(list), "1. a\n2. b\n   1. c\n   2. d\n3. e");
    }

    #[test]
    fn test_list_directly_inside_list() {
        let list = ul([li("a"), ul([li("b")])]);
        assert_eq!(fragment(list), "* a\n   * b");
    }

    #[test]
    fn test_table() {
        let output = fragment(table([
            tr([th("A"), th("B")]),
            tr([td("1"), td("2")]),
        ]));
        assert_eq!(output, "A | B\n--- | ---\n1 | 2");
    }

    #[test]
    fn test_section_block_spacing() {
        assert_eq!(
            fragment(section([h3("A"), p("b"), text_("c"), text_("d")])),
            "### A\n\nb\nc\nd"
        );
    }

    #[test]
    fn test_document_block_spacing() {
        let output = page(vec![h3("T"), p("x"), "a".into(), "b".into()]);
        assert_eq!(output, "### T\n\nx\na\nb\n");
    }

    #[test]
    fn test_paragraphs_are_not_block_level() {
        assert_eq!(page(vec![p("a"), p("b")]), "a\nb\n");
        assert_eq!(page(vec![p("a"), hr(), p("b")]), format!("a\n\n{}\n\nb\n", "-".repeat(50)));
    }

    #[test]
    fn test_division_separates_block_children() {
        assert_eq!(fragment(div([h3("A"), p("b")])), "### A\n\nb");
        assert_eq!(fragment(div([text_("a"), nbsp(), b("b")])), "a **b**");
        assert_eq!(fragment(div([p("a"), p("b")])), "a\nb");
    }

    #[test]
    fn test_blockquote_separates_block_children() {
        assert_eq!(fragment(quote([p("a"), p("b")])), "> a\n> b");
        assert_eq!(fragment(quote([h3("A"), p("b")])), "> ### A\n>\n> b");
    }

    #[test]
    fn test_list_item_with_block_children() {
        assert_eq!(fragment(ol([li([p("x"), p("y")])])), "1. x\n   y");
        assert_eq!(
            fragment(ul([li([h3("A"), p("b")])])),
            "* ### A\n\n  b"
        );
    }

    #[test]
    fn test_list_item_keeps_child_order() {
        let list = ol([li([ol([li("a")]), text_("after")])]);
        assert_eq!(fragment(list), "1. \n   1. a\n   after");

        let list = ol([li([text_("before"), ol([li("a")]), text_("after")])]);
        assert_eq!(fragment(list), "1. before\n   1. a\n   after");
    }

    #[test]
    fn test_trailer() {
        let doc = Document::from_components([p("Body")]).unwrap();
        let output = render::<Markdown>(&doc);
        assert_eq!(
            output,
            format!(
                "Body\n\n{}\n\nThis document was generated with \
                 [Docify](https://github.com/rapidstack/Docify).\n",
                "-".repeat(50)
            )
        );
    }

    #[test]
    fn test_render_does_not_mutate_document() {
        let doc = Document::from_components([ol([li("a"), li("b")])]).unwrap();
        let before = doc.clone();
        assert_eq!(render::<Markdown>(&doc), render::<Markdown>(&doc));
        assert_eq!(doc, before);
    }
}
