//! HTML serialization of nodes.
//!
//! Used for elements the converter has no rule for, which are emitted as
//! raw markup.

use crate::node::{Node, NodeType};

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Elements whose text content is written without entity escaping
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a tag holds raw (unescaped) text
pub fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

impl Node {
    /// Reconstruct outer HTML
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        write_node(self, false, &mut out);
        out
    }

    /// Reconstruct inner HTML
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        write_children(self, &mut out);
        out
    }

    /// Get attributes as a string for HTML output
    fn attributes_string(&self) -> String {
        self.attributes
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    name.clone()
                } else {
                    format!("{}=\"{}\"", name, escape_html_attr(value))
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn write_node(node: &Node, raw_text: bool, out: &mut String) {
    match node.node_type {
        NodeType::Text if raw_text => out.push_str(node.value()),
        NodeType::Text => out.push_str(&escape_html_text(node.value())),
        NodeType::Comment => {
            out.push_str("<!--");
            out.push_str(node.value());
            out.push_str("-->");
        }
        NodeType::Doctype => {
            out.push_str("<!DOCTYPE ");
            out.push_str(node.value());
            out.push('>');
        }
        NodeType::CData => {
            out.push_str("<![CDATA[");
            out.push_str(node.value());
            out.push_str("]]>");
        }
        NodeType::ProcessingInstruction => {
            out.push_str("<?");
            out.push_str(node.value());
            out.push('>');
        }
        NodeType::Declaration => {
            out.push_str("<!");
            out.push_str(node.value());
            out.push('>');
        }
        NodeType::Element => {
            let tag = node.tag_name();
            let attrs = node.attributes_string();

            out.push('<');
            out.push_str(tag);
            if !attrs.is_empty() {
                out.push(' ');
                out.push_str(&attrs);
            }
            out.push('>');

            if is_void(tag) {
                return;
            }

            write_children(node, out);
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        NodeType::Document | NodeType::DocumentFragment => write_children(node, out),
    }
}

fn write_children(node: &Node, out: &mut String) {
    let raw_text = node.is_element() && is_raw_text(node.tag_name());
    for child in node.children() {
        write_node(child, raw_text, out);
    }
}

/// Escape text content for HTML output
pub fn escape_html_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape HTML attribute value
pub fn escape_html_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outer_html() {
        let a = Node::element_with_attrs("a", vec![("href", "https://example.com")])
            .with_child(Node::text("Link"));

        assert_eq!(a.outer_html(), "<a href=\"https://example.com\">Link</a>");
    }

    #[test]
    fn test_void_element_html() {
        let br = Node::element("br");
        assert_eq!(br.outer_html(), "<br>");

        let img = Node::element_with_attrs("img", vec![("src", "test.png"), ("alt", "Test")]);
        assert_eq!(img.outer_html(), "<img src=\"test.png\" alt=\"Test\">");
    }

    #[test]
    fn test_custom_element_round_trips() {
        let custom = Node::element("custom-element");
        assert_eq!(custom.outer_html(), "<custom-element></custom-element>");
    }

    #[test]
    fn test_boolean_attribute_and_escaping() {
        let input = Node::element_with_attrs("input", vec![("disabled", ""), ("value", "a\"&b")]);
        assert_eq!(input.outer_html(), "<input disabled value=\"a&quot;&amp;b\">");
    }

    #[test]
    fn test_text_escaping() {
        let span = Node::element("span").with_child(Node::text("1 < 2 & 3 > 2"));
        assert_eq!(span.outer_html(), "<span>1 &lt; 2 &amp; 3 &gt; 2</span>");
    }

    #[test]
    fn test_raw_text_not_escaped() {
        let script = Node::element("script").with_child(Node::text("if (a < b) {}"));
        assert_eq!(script.outer_html(), "<script>if (a < b) {}</script>");
    }

    #[test]
    fn test_markup_leaves() {
        let div = Node::element("div")
            .with_child(Node::comment("hi"))
            .with_child(Node::cdata("x"))
            .with_child(Node::processing_instruction("xml version=\"1.0\""));
        assert_eq!(
            div.inner_html(),
            "<!--hi--><![CDATA[x]]><?xml version=\"1.0\">"
        );
        assert_eq!(Node::doctype("html").outer_html(), "<!DOCTYPE html>");
        assert_eq!(Node::declaration("ELEMENT br EMPTY").outer_html(), "<!ELEMENT br EMPTY>");
    }

    #[test]
    fn test_document_serializes_children() {
        let doc = Node::document()
            .with_child(Node::doctype("html"))
            .with_child(Node::element("p").with_child(Node::text("x")));
        assert_eq!(doc.outer_html(), "<!DOCTYPE html><p>x</p>");
    }

    #[test]
    fn test_is_void() {
        assert!(is_void("br"));
        assert!(is_void("IMG"));
        assert!(!is_void("div"));
        assert!(is_raw_text("style"));
        assert!(!is_raw_text("p"));
    }
}
