//! Node tree structure for HTML to Markdown conversion.
//!
//! The tree is owned by whoever built it (a parser adapter or a test) and is
//! only ever read by the converter. Parent links are not stored; a [`NodeRef`]
//! carries a borrowed parent for the few upward lookups the converter needs.

/// Kinds of nodes an HTML parser can hand over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Element,
    Text,
    Comment,
    Doctype,
    CData,
    ProcessingInstruction,
    /// `<!...>` markup declarations other than doctypes
    Declaration,
    Document,
    DocumentFragment,
}

impl NodeType {
    fn node_name(self) -> &'static str {
        match self {
            NodeType::Element => "",
            NodeType::Text => "#text",
            NodeType::Comment => "#comment",
            NodeType::Doctype => "#doctype",
            NodeType::CData => "#cdata-section",
            NodeType::ProcessingInstruction => "#processing-instruction",
            NodeType::Declaration => "#declaration",
            NodeType::Document => "#document",
            NodeType::DocumentFragment => "#document-fragment",
        }
    }
}

/// A node in an HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// What kind of node this is
    pub node_type: NodeType,

    /// Lowercase tag name for elements, `#text`, `#comment`, ... otherwise
    pub node_name: String,

    /// Literal content for text, comment, doctype, CDATA, PI and declaration nodes
    pub node_value: Option<String>,

    /// Attributes in document order
    pub attributes: Vec<(String, String)>,

    /// Child nodes, in rendering order
    pub children: Vec<Node>,
}

impl Node {
    fn leaf(node_type: NodeType, content: &str) -> Self {
        Self {
            node_type,
            node_name: node_type.node_name().to_string(),
            node_value: Some(content.to_string()),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    fn container(node_type: NodeType) -> Self {
        Self {
            node_type,
            node_name: node_type.node_name().to_string(),
            node_value: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_lowercase(),
            node_value: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag_name);
        node.attributes = attrs
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v.to_string()))
            .collect();
        node
    }

    pub fn text(content: &str) -> Self {
        Self::leaf(NodeType::Text, content)
    }

    pub fn comment(content: &str) -> Self {
        Self::leaf(NodeType::Comment, content)
    }

    /// Create a doctype node; `content` is everything after `<!DOCTYPE `
    pub fn doctype(content: &str) -> Self {
        Self::leaf(NodeType::Doctype, content)
    }

    pub fn cdata(content: &str) -> Self {
        Self::leaf(NodeType::CData, content)
    }

    /// Create a processing instruction; `content` is everything between `<?` and `>`
    pub fn processing_instruction(content: &str) -> Self {
        Self::leaf(NodeType::ProcessingInstruction, content)
    }

    pub fn declaration(content: &str) -> Self {
        Self::leaf(NodeType::Declaration, content)
    }

    /// Create an empty document root
    pub fn document() -> Self {
        Self::container(NodeType::Document)
    }

    /// Create an empty document fragment
    pub fn document_fragment() -> Self {
        Self::container(NodeType::DocumentFragment)
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Check if this is an element with the given (lowercase) tag name
    pub fn is_tag(&self, tag: &str) -> bool {
        self.is_element() && self.node_name == tag
    }

    /// Get the tag name (lowercase); empty for non-elements
    pub fn tag_name(&self) -> &str {
        if self.is_element() {
            &self.node_name
        } else {
            ""
        }
    }

    /// Literal content of a leaf node; empty for elements and documents
    pub fn value(&self) -> &str {
        self.node_value.as_deref().unwrap_or("")
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr_name, _)| attr_name.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// The `class` attribute split into its tokens, in order
    pub fn classes(&self) -> Vec<&str> {
        self.attr("class")
            .map(|class| class.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    /// First descendant element with the given tag, in document order
    pub fn find_descendant(&self, tag: &str) -> Option<&Node> {
        self.children().find_map(|child| {
            if child.is_tag(tag) {
                Some(child)
            } else {
                child.find_descendant(tag)
            }
        })
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Builder form of [`Node::add_child`]
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Set an attribute, replacing an existing value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some((_, existing)) = self
            .attributes
            .iter_mut()
            .find(|(attr_name, _)| attr_name.eq_ignore_ascii_case(name))
        {
            *existing = value.to_string();
            return;
        }
        self.attributes.push((name.to_lowercase(), value.to_string()));
    }

    /// Get all text content from this node and descendants.
    ///
    /// CDATA counts as text; comments and other markup do not.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text_content(&mut out);
        out
    }

    fn push_text_content(&self, out: &mut String) {
        match self.node_type {
            NodeType::Text | NodeType::CData => out.push_str(self.value()),
            NodeType::Element | NodeType::Document | NodeType::DocumentFragment => {
                for child in self.children() {
                    child.push_text_content(out);
                }
            }
            _ => {}
        }
    }
}

/// A reference to a node together with its parent.
///
/// The parent is a plain borrow and only serves upward, read-only lookups
/// such as finding the `figcaption` next to an image.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    /// The node itself
    pub node: &'a Node,
    parent: Option<&'a Node>,
}

impl<'a> NodeRef<'a> {
    /// Create a new NodeRef without parent context
    pub fn new(node: &'a Node) -> Self {
        Self { node, parent: None }
    }

    /// Create a new NodeRef with parent context
    pub fn with_parent(node: &'a Node, parent: &'a Node) -> Self {
        Self {
            node,
            parent: Some(parent),
        }
    }

    /// Get the parent node if known
    pub fn parent(&self) -> Option<&'a Node> {
        self.parent
    }

    /// Children of this node, each carrying this node as its parent
    pub fn child_refs(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let parent = self.node;
        parent
            .children
            .iter()
            .map(move |child| NodeRef::with_parent(child, parent))
    }

    pub fn node_type(&self) -> NodeType {
        self.node.node_type
    }

    pub fn is_element(&self) -> bool {
        self.node.is_element()
    }

    pub fn is_text(&self) -> bool {
        self.node.is_text()
    }

    pub fn tag_name(&self) -> &'a str {
        self.node.tag_name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node.attr(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.node.has_attr(name)
    }

    pub fn classes(&self) -> Vec<&'a str> {
        self.node.classes()
    }

    pub fn children(&self) -> impl Iterator<Item = &'a Node> {
        self.node.children.iter()
    }

    pub fn find_descendant(&self, tag: &str) -> Option<&'a Node> {
        self.node.find_descendant(tag)
    }

    pub fn text_content(&self) -> String {
        self.node.text_content()
    }

    pub fn outer_html(&self) -> String {
        self.node.outer_html()
    }

    pub fn inner_html(&self) -> String {
        self.node.inner_html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element() {
        let node = Node::element("DIV");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "div");
        assert!(node.is_tag("div"));
    }

    #[test]
    fn test_create_text() {
        let node = Node::text("Hello World");
        assert!(node.is_text());
        assert_eq!(node.tag_name(), "");
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_attributes() {
        let node = Node::element_with_attrs(
            "a",
            vec![("href", "https://example.com"), ("title", "Example")],
        );
        assert_eq!(node.attr("href"), Some("https://example.com"));
        assert_eq!(node.attr("TITLE"), Some("Example"));
        assert_eq!(node.attr("class"), None);
        assert!(!node.has_attr("class"));
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut node = Node::element_with_attrs("ol", vec![("start", "1")]);
        node.set_attr("start", "3");
        node.set_attr("reversed", "");
        assert_eq!(node.attr("start"), Some("3"));
        assert_eq!(node.attributes.len(), 2);
    }

    #[test]
    fn test_classes() {
        let node = Node::element_with_attrs("pre", vec![("class", " lang-rust  hljs ")]);
        assert_eq!(node.classes(), vec!["lang-rust", "hljs"]);
        assert!(Node::element("pre").classes().is_empty());
    }

    #[test]
    fn test_children() {
        let parent = Node::element("div")
            .with_child(Node::text("Hello"))
            .with_child(Node::element("span"))
            .with_child(Node::comment("note"));

        assert_eq!(parent.children().count(), 3);
        assert_eq!(parent.element_children().count(), 1);
    }

    #[test]
    fn test_text_content_skips_comments() {
        let div = Node::element("div")
            .with_child(Node::text("Hello "))
            .with_child(Node::comment("hidden"))
            .with_child(Node::element("span").with_child(Node::text("World")))
            .with_child(Node::cdata("!"));

        assert_eq!(div.text_content(), "Hello World!");
    }

    #[test]
    fn test_find_descendant_is_depth_first() {
        let pre = Node::element("pre").with_child(
            Node::element("div")
                .with_child(Node::element("code").with_child(Node::text("first"))),
        );
        let pre = pre.with_child(Node::element("code").with_child(Node::text("second")));

        let code = pre.find_descendant("code");
        assert_eq!(code.map(Node::text_content).as_deref(), Some("first"));
        assert!(pre.find_descendant("span").is_none());
    }

    #[test]
    fn test_child_refs_carry_parent() {
        let figure = Node::element("figure")
            .with_child(Node::element("img"))
            .with_child(Node::element("figcaption").with_child(Node::text("Caption")));
        let root = NodeRef::new(&figure);
        assert!(root.parent().is_none());

        let img = root.child_refs().next();
        let parent = img.and_then(|img| img.parent());
        assert_eq!(parent.map(Node::tag_name), Some("figure"));
    }
}
