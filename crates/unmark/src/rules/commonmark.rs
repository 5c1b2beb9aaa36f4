//! Built-in per-tag rules producing CommonMark.
//!
//! Every handler gets the converter, the element and the escaping flag of
//! the context it was reached from.

use indexmap::IndexMap;
use unmark_dom::NodeRef;

use super::list::{list_item, render_list, ItemFormat, MAX_ORDERED_NUMBER};
use super::TagHandler;
use crate::service::Unmarker;
use crate::utilities::{escape, longest_run};
use crate::{Result, UnmarkError};

/// Create the table of built-in handlers
pub(super) fn builtin_handlers() -> IndexMap<&'static str, TagHandler> {
    let mut handlers: IndexMap<&'static str, TagHandler> = IndexMap::new();
    handlers.insert("h1", heading::<1>);
    handlers.insert("h2", heading::<2>);
    handlers.insert("h3", heading::<3>);
    handlers.insert("h4", heading::<4>);
    handlers.insert("h5", heading::<5>);
    handlers.insert("h6", heading::<6>);
    handlers.insert("div", division);
    handlers.insert("p", paragraph);
    handlers.insert("td", paragraph);
    handlers.insert("b", strong);
    handlers.insert("i", emphasis);
    handlers.insert("del", strikethrough);
    handlers.insert("q", quotation);
    handlers.insert("code", code);
    handlers.insert("pre", code_block);
    handlers.insert("a", link);
    handlers.insert("img", image);
    handlers.insert("ul", unordered_list);
    handlers.insert("ol", ordered_list);
    handlers.insert("li", list_item);
    handlers.insert("hr", horizontal_rule);
    handlers.insert("br", line_break);
    handlers.insert("blockquote", blockquote);
    handlers
}

fn heading<const LEVEL: usize>(
    unmarker: &Unmarker,
    node: NodeRef<'_>,
    _escaping: bool,
) -> Result<String> {
    let content = unmarker.render_children(node, false)?;
    Ok(format!("{} {}\n", "#".repeat(LEVEL), content))
}

fn division(unmarker: &Unmarker, node: NodeRef<'_>, _escaping: bool) -> Result<String> {
    unmarker.render_children(node, false)
}

fn paragraph(unmarker: &Unmarker, node: NodeRef<'_>, _escaping: bool) -> Result<String> {
    unmarker.render_children(node, true)
}

fn strong(unmarker: &Unmarker, node: NodeRef<'_>, _escaping: bool) -> Result<String> {
    unmarker.wrap(node, "**")
}

fn emphasis(unmarker: &Unmarker, node: NodeRef<'_>, _escaping: bool) -> Result<String> {
    unmarker.wrap(node, "*")
}

fn strikethrough(unmarker: &Unmarker, node: NodeRef<'_>, _escaping: bool) -> Result<String> {
    unmarker.wrap(node, "~~")
}

fn quotation(unmarker: &Unmarker, node: NodeRef<'_>, _escaping: bool) -> Result<String> {
    unmarker.wrap(node, "\"")
}

fn code(unmarker: &Unmarker, node: NodeRef<'_>, _escaping: bool) -> Result<String> {
    let content = unmarker.render_children(node, false)?;
    Ok(code_span(&content))
}

/// Wrap code in enough backticks that none inside can close the span
fn code_span(content: &str) -> String {
    let backticks = "`".repeat(longest_run(content, '`') + 1);

    // A single leading and trailing space is stripped by the reader, so
    // content that relies on them gets one more on each side
    let padded = content.starts_with('`')
        || content.ends_with('`')
        || (content.len() > 1
            && content.starts_with(' ')
            && content.ends_with(' ')
            && !content.trim_matches(' ').is_empty());
    let space = if padded { " " } else { "" };

    format!("{backticks}{space}{content}{space}{backticks}")
}

fn code_block(unmarker: &Unmarker, pre: NodeRef<'_>, _escaping: bool) -> Result<String> {
    let code = pre.find_descendant("code").ok_or(UnmarkError::MissingCode)?;
    let language = unmarker.detect_language(pre)?;

    let mut text = code.text_content();
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    let fence = "`".repeat(longest_run(&text, '`').max(2) + 1);

    Ok(format!("\n{fence}{language}\n{text}{fence}\n"))
}

fn link(unmarker: &Unmarker, a: NodeRef<'_>, escaping: bool) -> Result<String> {
    let content = unmarker.render_children(a, escaping)?;
    let href = a.attr("href").unwrap_or("");
    let title = match a.attr("title") {
        Some(title) if !title.is_empty() => format!(" \"{}\"", escape(title)),
        _ => String::new(),
    };

    Ok(format!("[{content}]({href}{title})"))
}

fn image(_unmarker: &Unmarker, img: NodeRef<'_>, _escaping: bool) -> Result<String> {
    let alt = match img.attr("alt") {
        Some(alt) if !alt.is_empty() => alt.to_string(),
        _ => img
            .parent()
            .and_then(|parent| parent.find_descendant("figcaption"))
            .map(|caption| caption.text_content())
            .unwrap_or_default(),
    };
    let src = img.attr("src").unwrap_or("");

    Ok(format!("![{}]({})", escape(&alt), src))
}

fn unordered_list(unmarker: &Unmarker, list: NodeRef<'_>, _escaping: bool) -> Result<String> {
    render_list(unmarker, list, ItemFormat::Unordered)
}

fn ordered_list(unmarker: &Unmarker, list: NodeRef<'_>, _escaping: bool) -> Result<String> {
    let start = match list.attr("start").map(|raw| (raw, raw.trim().parse::<u64>())) {
        None => 1,
        Some((_, Ok(start))) if start > MAX_ORDERED_NUMBER => {
            log::debug!("<ol start={start}> is past the largest list marker, clamping");
            MAX_ORDERED_NUMBER
        }
        Some((_, Ok(start))) => start,
        Some((raw, Err(_))) => {
            log::debug!("ignoring unparsable <ol start={raw:?}>, counting from 1");
            1
        }
    };
    render_list(unmarker, list, ItemFormat::Ordered { start })
}

fn horizontal_rule(_unmarker: &Unmarker, _node: NodeRef<'_>, _escaping: bool) -> Result<String> {
    Ok("\n---\n".to_string())
}

fn line_break(_unmarker: &Unmarker, _node: NodeRef<'_>, _escaping: bool) -> Result<String> {
    Ok("\n\n".to_string())
}

fn blockquote(unmarker: &Unmarker, node: NodeRef<'_>, _escaping: bool) -> Result<String> {
    let content = unmarker.render_children(node, false)?;
    let content = content.trim();
    if content.is_empty() {
        return Ok(">\n".to_string());
    }

    let quoted: Vec<String> = content
        .lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect();
    Ok(format!("{}\n", quoted.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use unmark_dom::Node;

    fn render(node: &Node) -> String {
        Unmarker::basic().unmark(node).unwrap()
    }

    fn element(tag: &str, text: &str) -> Node {
        Node::element(tag).with_child(Node::text(text))
    }

    #[test]
    fn test_headings() {
        assert_eq!(render(&element("h1", "Title")), "# Title");
        assert_eq!(render(&element("h3", "Section")), "### Section");
        assert_eq!(render(&element("h6", "a*b")), "###### a*b");
    }

    #[test]
    fn test_paragraph_escapes() {
        assert_eq!(render(&element("p", "2 * 3 = 6")), "2 \\* 3 = 6");
        assert_eq!(render(&element("td", "[x]")), "\\[x\\]");
    }

    #[test]
    fn test_division_is_transparent() {
        let div = Node::element("div").with_child(element("p", "inside"));
        assert_eq!(render(&div), "inside");
    }

    #[test]
    fn test_inline_wrapping() {
        assert_eq!(render(&element("b", "X")), "**X**");
        assert_eq!(render(&element("i", "X")), "*X*");
        assert_eq!(render(&element("del", "X")), "~~X~~");
        assert_eq!(render(&element("q", "X")), "\"X\"");
        assert_eq!(render(&element("b", "a_b")), "**a\\_b**");
    }

    #[test]
    fn test_code_span() {
        assert_eq!(render(&element("code", "a*b")), "`a*b`");
        assert_eq!(render(&element("code", "a`b")), "``a`b``");
        assert_eq!(render(&element("code", "`tick")), "`` `tick ``");
        assert_eq!(render(&element("code", " x ")), "`  x  `");
    }

    #[test]
    fn test_code_block() {
        let pre = Node::element("pre").with_child(
            Node::element_with_attrs("code", vec![("class", "language-python")])
                .with_child(Node::text("x=1")),
        );
        assert_eq!(render(&pre), "```python\nx=1\n```");
    }

    #[test]
    fn test_code_block_fence_grows() {
        let pre = Node::element("pre").with_child(element("code", "```\nnested\n```\n"));
        assert_eq!(render(&pre), "````\n```\nnested\n```\n````");
    }

    #[test]
    fn test_code_block_requires_code() {
        let pre = element("pre", "bare");
        let err = Unmarker::basic().unmark(&pre).unwrap_err();
        assert!(matches!(err, UnmarkError::MissingCode));
    }

    #[test]
    fn test_link() {
        let a = Node::element_with_attrs("a", vec![("href", "https://example.com")])
            .with_child(Node::text("Link"));
        assert_eq!(render(&a), "[Link](https://example.com)");

        let a = Node::element_with_attrs(
            "a",
            vec![("href", "/x"), ("title", "Say \"hi\"")],
        )
        .with_child(Node::text("Link"));
        assert_eq!(render(&a), "[Link](/x \"Say &quot;hi&quot;\")");

        let a = Node::element_with_attrs("a", vec![("title", "")]).with_child(Node::text("Bare"));
        assert_eq!(render(&a), "[Bare]()");
    }

    #[test]
    fn test_link_inherits_escaping() {
        let a = Node::element_with_attrs("a", vec![("href", "/x")]).with_child(Node::text("a_b"));
        assert_eq!(render(&a), "[a_b](/x)");

        let p = Node::element("p").with_child(a);
        assert_eq!(render(&p), "[a\\_b](/x)");
    }

    #[test]
    fn test_image() {
        let img = Node::element_with_attrs("img", vec![("src", "test.png"), ("alt", "Alt")]);
        assert_eq!(render(&img), "![Alt](test.png)");

        let img = Node::element("img");
        assert_eq!(render(&img), "![]()");
    }

    #[test]
    fn test_image_caption_fallback() {
        let figure = Node::element("figure")
            .with_child(Node::element_with_attrs("img", vec![("src", "cat.png")]))
            .with_child(element("figcaption", "A cat"));
        let out = Unmarker::basic().render_children(NodeRef::new(&figure), false);
        assert_eq!(out.unwrap(), "![A cat](cat.png)<figcaption>A cat</figcaption>");
    }

    #[test]
    fn test_ordered_list_start() {
        let ol = |start: &str| {
            Node::element_with_attrs("ol", vec![("start", start)])
                .with_child(element("li", "a"))
                .with_child(element("li", "b"))
        };
        assert_eq!(render(&ol(" 7 ")), "7. a\n8. b");
        assert_eq!(render(&ol("0")), "0. a\n1. b");
        assert_eq!(render(&ol("x")), "1. a\n2. b");
        assert_eq!(render(&ol("1000000000")), "999999999. a\n999999999. b");
        assert_eq!(
            render(&ol("18446744073709551615")),
            "999999999. a\n999999999. b"
        );
        assert_eq!(render(&ol("18446744073709551616")), "1. a\n2. b");
    }

    #[test]
    fn test_breaks() {
        let p = Node::element("p")
            .with_child(Node::text("a"))
            .with_child(Node::element("br"))
            .with_child(Node::text("b"));
        assert_eq!(render(&p), "a\n\nb");
        assert_eq!(render(&Node::element("hr")), "---");
    }

    #[test]
    fn test_blockquote_prefixes_every_line() {
        let quote = Node::element("blockquote")
            .with_child(element("p", "one"))
            .with_child(Node::text("\n"))
            .with_child(element("p", "two"));
        assert_eq!(render(&quote), "> one\n>\n> two");
    }

    #[test]
    fn test_nested_blockquote() {
        let inner = Node::element("blockquote").with_child(element("p", "inner"));
        let outer = Node::element("blockquote")
            .with_child(element("p", "outer"))
            .with_child(Node::text("\n"))
            .with_child(inner);
        assert_eq!(render(&outer), "> outer\n>\n> > inner");
    }

    #[test]
    fn test_empty_blockquote() {
        assert_eq!(render(&Node::element("blockquote")), ">");
    }
}
