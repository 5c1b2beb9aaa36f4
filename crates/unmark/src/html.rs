//! HTML parsing support.
//!
//! This module parses HTML strings with html5ever (through `scraper`) and
//! converts the result to the [`Node`] tree used by unmark. Unlike a
//! browser DOM dump, comments, doctypes and processing instructions are
//! kept, because the converter passes comments through.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node as ScraperNode};

use unmark_dom::Node;

/// How an HTML string is turned into a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// `Document` for full documents, `Fragment` for everything else
    #[default]
    Auto,
    /// Parse as `<body>` content. Leading whitespace and comments survive;
    /// stray `<html>`, `<head>` and `<body>` tags are ignored.
    Fragment,
    /// Run full document tree construction (implied `html`/`head`/`body`)
    Document,
}

/// Input that opens a full document, after any leading comments
static DOCUMENT_PREAMBLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*(?:<!--.*?-->\s*)*<(?:!doctype|html|head|body)[\s>/]")
        .expect("document preamble pattern is valid")
});

impl ParseMode {
    /// Pick `Fragment` or `Document` for the given input
    pub fn resolve(self, html: &str) -> ParseMode {
        match self {
            ParseMode::Auto if DOCUMENT_PREAMBLE.is_match(html) => ParseMode::Document,
            ParseMode::Auto => ParseMode::Fragment,
            mode => mode,
        }
    }
}

/// Parse an HTML string into a Node tree.
///
/// # Example
///
/// ```rust
/// use unmark::{parse_html, Unmarker};
///
/// let node = parse_html("<h1>Hello <em>World</em></h1>");
///
/// let markdown = Unmarker::basic().unmark(&node).unwrap();
/// assert_eq!(markdown, "# Hello *World*");
/// ```
pub fn parse_html(html: &str) -> Node {
    parse_html_with_mode(html, ParseMode::Auto)
}

/// Parse an HTML string into a Node tree using the given mode.
///
/// The returned root is a document node; fragments come back wrapped in the
/// `html` element html5ever uses as the fragment context.
pub fn parse_html_with_mode(html: &str, mode: ParseMode) -> Node {
    let mode = mode.resolve(html);
    log::debug!("parsing {} bytes of HTML as {:?}", html.len(), mode);

    let document = match mode {
        ParseMode::Document => Html::parse_document(html),
        _ => Html::parse_fragment(html),
    };

    let mut root = Node::document();
    for child in document.tree.root().children() {
        append_child(&mut root, child.value(), ElementRef::wrap(child));
    }
    root
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let tag = element.value().name();

    // Collect attributes
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();

    let mut node = if attrs.is_empty() {
        Node::element(tag)
    } else {
        Node::element_with_attrs(tag, attrs)
    };

    // Process children
    for child in element.children() {
        append_child(&mut node, child.value(), ElementRef::wrap(child));
    }

    node
}

fn append_child(parent: &mut Node, value: &ScraperNode, element: Option<ElementRef>) {
    match value {
        ScraperNode::Element(_) => {
            if let Some(child_element) = element {
                parent.add_child(scraper_to_node(child_element));
            }
        }
        ScraperNode::Text(text) => parent.add_child(Node::text(&text.text)),
        ScraperNode::Comment(comment) => parent.add_child(Node::comment(&comment.comment)),
        ScraperNode::Doctype(doctype) => parent.add_child(Node::doctype(&doctype_content(
            doctype.name(),
            doctype.public_id(),
            doctype.system_id(),
        ))),
        ScraperNode::ProcessingInstruction(pi) => {
            let content = format!("{} {}", &*pi.target, &*pi.data);
            parent.add_child(Node::processing_instruction(content.trim_end()));
        }
        _ => {}
    }
}

fn doctype_content(name: &str, public_id: &str, system_id: &str) -> String {
    let mut content = name.to_string();
    if !public_id.is_empty() {
        content.push_str(&format!(" PUBLIC \"{public_id}\""));
    }
    if !system_id.is_empty() {
        if public_id.is_empty() {
            content.push_str(" SYSTEM");
        }
        content.push_str(&format!(" \"{system_id}\""));
    }
    content
}
