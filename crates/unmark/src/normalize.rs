//! Preparing the root tree before the walk and the final string after it.

use std::borrow::Cow;

use unmark_dom::{Node, NodeType};

/// Adjust the root so that its children are the top-level content.
///
/// Top-level `html` wrappers are hoisted, `head` is dropped and `body` is
/// unwrapped, so a full document renders like the bare fragment. A root
/// element other than `html` becomes the single top-level node.
pub fn normalize(root: &Node) -> Cow<'_, Node> {
    let children: Vec<&Node> = match root.node_type {
        NodeType::Element if root.is_tag("html") => root.children().collect(),
        NodeType::Element => {
            return Cow::Owned(Node::document_fragment().with_child(root.clone()));
        }
        NodeType::Document | NodeType::DocumentFragment => {
            let needs_rewrite = root
                .children()
                .any(|child| child.is_tag("html") || child.is_tag("head") || child.is_tag("body"));
            if !needs_rewrite {
                return Cow::Borrowed(root);
            }
            root.children().collect()
        }
        // A leaf is rendered as the only top-level node
        _ => return Cow::Owned(Node::document_fragment().with_child(root.clone())),
    };

    let hoisted = children.into_iter().flat_map(|child| {
        if child.is_tag("html") {
            child.children().collect::<Vec<_>>()
        } else {
            vec![child]
        }
    });

    let mut fragment = Node::document_fragment();
    for child in hoisted {
        if child.is_tag("head") {
            continue;
        }
        if child.is_tag("body") {
            fragment.children.extend(child.children().cloned());
        } else {
            fragment.add_child(child.clone());
        }
    }

    log::debug!(
        "normalized document root into {} top-level nodes",
        fragment.children.len()
    );
    Cow::Owned(fragment)
}

/// Final clean-up of rendered Markdown: trim and replace NUL characters.
pub fn finish(output: &str) -> String {
    output.trim().replace('\0', "\u{FFFD}")
}
