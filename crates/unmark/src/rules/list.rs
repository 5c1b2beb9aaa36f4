//! Rendering `<ul>` / `<ol>` and their items.

use unmark_dom::NodeRef;

use crate::service::Unmarker;
use crate::utilities::indent;
use crate::{Result, UnmarkError};

/// Largest number CommonMark reads as an ordered list marker (nine digits)
pub(crate) const MAX_ORDERED_NUMBER: u64 = 999_999_999;

/// How each list item is introduced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFormat {
    /// `- item`
    Unordered,
    /// `n. item`, counting up from `start`
    Ordered { start: u64 },
}

impl ItemFormat {
    fn start(self) -> u64 {
        match self {
            ItemFormat::Unordered => 1,
            ItemFormat::Ordered { start } => start.min(MAX_ORDERED_NUMBER),
        }
    }

    fn item(self, number: u64, item: &str) -> String {
        match self {
            ItemFormat::Unordered => format!("\n- {item}"),
            ItemFormat::Ordered { .. } => format!("\n{number}. {item}"),
        }
    }
}

/// Render the direct children of a list element as a Markdown list.
///
/// Every element child is an item. Comments and non-blank text between
/// items are copied through in place; blank text is dropped.
pub fn render_list(unmarker: &Unmarker, list: NodeRef<'_>, format: ItemFormat) -> Result<String> {
    if !list.is_element() {
        return Err(UnmarkError::UnexpectedNode {
            expected: "list element",
            found: list.node_type(),
        });
    }

    let mut output = String::new();
    let mut number = format.start();

    for child in list.child_refs() {
        if !child.is_element() {
            let rendered = unmarker.render_node(child, true)?;
            if !rendered.trim().is_empty() {
                output.push_str(&rendered);
            }
            continue;
        }

        let item = list_item(unmarker, child, true)?;
        // Both ends: an item opening with a block must not leave its marker
        // on an empty line
        output.push_str(&format.item(number, item.trim()));
        number = number.saturating_add(1).min(MAX_ORDERED_NUMBER);
    }

    if output.starts_with('\n') {
        output.remove(0);
    }
    Ok(output)
}

/// Render the content of one list item; nested lists are indented.
pub(crate) fn list_item(unmarker: &Unmarker, item: NodeRef<'_>, _escaping: bool) -> Result<String> {
    let mut output = String::new();

    for child in item.child_refs() {
        let rendered = unmarker.render_node(child, true)?;
        let nested =
            child.is_element() && matches!(unmarker.resolve_tag(child.tag_name()), "ul" | "ol");
        if !nested {
            output.push_str(&rendered);
            continue;
        }

        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(&indent(&rendered, &unmarker.options().nested_list_indent));
    }

    Ok(output)
}
