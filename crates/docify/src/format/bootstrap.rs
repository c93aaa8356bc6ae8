//! Bootstrap-styled HTML format.
//!
//! Starts from the HTML rules and restyles a handful of kinds with
//! Bootstrap 4 utility classes. Everything not overridden here renders
//! exactly as in [`Html`](super::Html).

use std::sync::LazyLock;

use crate::format::html::{self, attributes, escape_html, tag};
use crate::format::{Format, Formatter, RuleTable};
use crate::tree::{Document, HeadingLevel, Kind, Node, Properties};

const CODE_CLASS: &str = "bg-light rounded p-1";
const PRE_CLASS: &str = "bg-light rounded p-3";

/// HTML format with a Bootstrap 4 page layout.
pub struct Bootstrap;

static RULES: LazyLock<RuleTable<Bootstrap>> = LazyLock::new(|| {
    let mut table = RuleTable::new();
    html::register_rules(&mut table);
    table
        .register(Kind::Code, code)
        .register(Kind::Pre, pre)
        .register(Kind::Division, division)
        .register_all(
            &[
                Kind::Heading(HeadingLevel::H1),
                Kind::Heading(HeadingLevel::H2),
            ],
            ruled_heading,
        );
    table
});

impl Format for Bootstrap {
    const NAME: &'static str = "bootstrap";

    fn rules() -> &'static RuleTable<Self> {
        &RULES
    }

    fn document(f: &Formatter<'_, Self>, doc: &Document) -> String {
        let body: Vec<String> = doc.children().map(|node| row(&f.format(node))).collect();
        page(&escape_html(&f.config().html.title), &body.join("\n"))
    }
}

/// Copy of the node's properties with `class` set.
fn with_class(node: Node<'_>, class: &str) -> Properties {
    let mut properties = node.properties().clone();
    properties.insert("class".to_owned(), class.to_owned());
    properties
}

fn row(content: &str) -> String {
    format!(r#"<div class="row"><div class="col-md-12">{content}</div></div>"#)
}

fn code(f: &Formatter<'_, Bootstrap>, node: Node<'_>) -> String {
    tag(f, "code", node, &with_class(node, CODE_CLASS))
}

fn pre(f: &Formatter<'_, Bootstrap>, node: Node<'_>) -> String {
    tag(f, "pre", node, &with_class(node, PRE_CLASS))
}

fn division(f: &Formatter<'_, Bootstrap>, node: Node<'_>) -> String {
    let attrs = attributes(&with_class(node, "row"));
    format!(
        r#"<div{attrs}><div class="col-md-12">{}</div></div>"#,
        f.join_children(node, "")
    )
}

fn ruled_heading(f: &Formatter<'_, Bootstrap>, node: Node<'_>) -> String {
    let name = match node.kind() {
        Kind::Heading(HeadingLevel::H1) => "h1",
        _ => "h2",
    };
    format!("{}<hr />", tag(f, name, node, node.properties()))
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
    <head>
        <meta charset="utf-8">
        <meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no">
        <link rel="stylesheet" href="https://maxcdn.bootstrapcdn.com/bootstrap/4.0.0/css/bootstrap.min.css" integrity="sha384-Gn5384xqQ1aoWXA+058RXPxPg6fy4IWvTNh0E263XmFcJlSAwiGgFAW/dAiS6JXm" crossorigin="anonymous">
        <title>{title}</title>
    </head>
    <body>
        <div class="sidebar col-md-3"></div>
        <div class="container col-md-6">
{body}
        </div>
        <div class="sidebar col-md-3"></div>
        <script src="https://code.jquery.com/jquery-3.2.1.slim.min.js" integrity="sha384-KJ3o2DKtIkvYIK3UENzmM7KCkRr/rE9/Qpg6aAZGJwFDMVNA/GpGFF93hXpG5KkN" crossorigin="anonymous"></script>
        <script src="https://cdnjs.cloudflare.com/ajax/libs/popper.js/1.12.9/umd/popper.min.js" integrity="sha384-ApNbgh9B+Y1QKtv3Rn7W3mgPxhU9K/ScQsAP7hUibX39j7fakFPskvXusvfa0b4Q" crossorigin="anonymous"></script>
        <script src="https://maxcdn.bootstrapcdn.com/bootstrap/4.0.0/js/bootstrap.min.js" integrity="sha384-JZR6Spejh4U02d8jOt6vLEHfe/JQGiRRSQQxSfFWpi1MquVdAyjUar5+76PVCmYl" crossorigin="anonymous"></script>
    </body>
</html>
"#
    )
}
