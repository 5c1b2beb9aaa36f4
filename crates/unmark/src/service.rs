//! Unmarker - the main entry point for HTML to Markdown conversion.

use indexmap::IndexMap;
use unmark_dom::{Node, NodeRef, NodeType};

#[cfg(feature = "html")]
use crate::html::ParseMode;
use crate::language::{BasicLanguage, LanguageDetector, StackOverflowLanguage};
use crate::normalize::{finish, normalize};
use crate::rules::{Filter, Rule, Rules};
use crate::utilities::{default_alias, escape};
use crate::{Result, UnmarkError};

/// Options for Unmarker
#[derive(Debug, Clone)]
pub struct UnmarkOptions {
    /// Extra tag aliases, consulted after the built-in `em`/`strong`/`s` ones
    pub tag_aliases: IndexMap<String, String>,

    /// How HTML strings are parsed
    #[cfg(feature = "html")]
    pub parse_mode: ParseMode,

    /// Prefix for lists nested inside a list item
    pub nested_list_indent: String,
}

impl UnmarkOptions {
    /// The tag name an element is rendered as: built-in aliases first,
    /// then `tag_aliases`, else the tag itself
    pub fn resolve_tag<'a>(&'a self, tag: &'a str) -> &'a str {
        default_alias(tag)
            .or_else(|| self.tag_aliases.get(tag).map(String::as_str))
            .unwrap_or(tag)
    }
}

impl Default for UnmarkOptions {
    fn default() -> Self {
        Self {
            tag_aliases: IndexMap::new(),
            #[cfg(feature = "html")]
            parse_mode: ParseMode::Auto,
            nested_list_indent: "    ".to_string(),
        }
    }
}

/// Converts HTML trees into Markdown.
///
/// Flavors differ in their [`LanguageDetector`] and, optionally, in tag
/// aliases; the per-tag handlers are shared.
pub struct Unmarker {
    options: UnmarkOptions,
    rules: Rules,
    detector: Box<dyn LanguageDetector>,
}

impl Unmarker {
    /// Create an Unmarker with the given language detection policy
    pub fn new<D>(detector: D) -> Self
    where
        D: LanguageDetector + 'static,
    {
        Self::with_options(detector, UnmarkOptions::default())
    }

    /// Create an Unmarker with custom options
    pub fn with_options<D>(detector: D, options: UnmarkOptions) -> Self
    where
        D: LanguageDetector + 'static,
    {
        Self {
            options,
            rules: Rules::new(),
            detector: Box::new(detector),
        }
    }

    /// The generic flavor
    pub fn basic() -> Self {
        Self::new(BasicLanguage)
    }

    /// The flavor for HTML scraped from StackOverflow
    pub fn stack_overflow() -> Self {
        Self::new(StackOverflowLanguage)
    }

    /// Same as [`Unmarker::stack_overflow`]; the markup is shared network-wide
    pub fn stack_exchange() -> Self {
        Self::stack_overflow()
    }

    /// Convert a node tree to Markdown
    pub fn unmark(&self, root: &Node) -> Result<String> {
        let root = normalize(root);
        let output = self.render_children(NodeRef::new(&root), false)?;
        Ok(finish(&output))
    }

    /// Parse an HTML string and convert it to Markdown
    #[cfg(feature = "html")]
    pub fn unmark_html(&self, html: &str) -> Result<String> {
        let root = crate::html::parse_html_with_mode(html, self.options.parse_mode);
        self.unmark(&root)
    }

    /// Render a tag as if it were another (e.g. `"mark"` as `"b"`)
    pub fn alias(&mut self, from: &str, to: &str) -> &mut Self {
        self.options
            .tag_aliases
            .insert(from.to_lowercase(), to.to_lowercase());
        self
    }

    /// Add a custom rule
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Remove elements matching the filter
    pub fn remove(&mut self, filter: Filter) -> &mut Self {
        self.rules.remove(filter);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Escape markdown special characters in a string
    pub fn escape(&self, text: &str) -> String {
        escape(text)
    }

    /// Get the current options
    pub fn options(&self) -> &UnmarkOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut UnmarkOptions {
        &mut self.options
    }

    /// The tag name an element is rendered as
    pub fn resolve_tag<'a>(&'a self, tag: &'a str) -> &'a str {
        self.options.resolve_tag(tag)
    }

    /// Info string for a `<pre>` block, per this flavor's policy
    pub fn detect_language(&self, pre: NodeRef<'_>) -> Result<String> {
        expect_element(pre)?;
        self.detector.detect_language(pre)
    }

    /// Render every child of `node`, in order, and concatenate the results
    pub fn render_children(&self, node: NodeRef<'_>, escaping: bool) -> Result<String> {
        let mut output = String::new();
        for child in node.child_refs() {
            output.push_str(&self.render_node(child, escaping)?);
        }
        Ok(output)
    }

    /// Render a single node of any kind
    pub fn render_node(&self, node: NodeRef<'_>, escaping: bool) -> Result<String> {
        match node.node_type() {
            NodeType::Element => self.render_element(node, escaping),
            NodeType::Document | NodeType::DocumentFragment => {
                self.render_children(node, escaping)
            }
            _ => self.render_leaf(node.node, escaping),
        }
    }

    /// Render an element through removal filters, custom rules, the
    /// built-in handlers and finally the raw-markup fallback
    pub fn render_element(&self, element: NodeRef<'_>, escaping: bool) -> Result<String> {
        expect_element(element)?;
        let tag = self.resolve_tag(element.tag_name());

        if self.rules.should_remove(&element, &self.options) {
            log::trace!("removing <{tag}>");
            return Ok(String::new());
        }

        if let Some(rule) = self.rules.for_node(&element, &self.options) {
            let content = self.render_children(element, escaping)?;
            return Ok(rule.replace(&element, &content, &self.options));
        }

        match Rules::builtin(tag) {
            Some(handler) => handler(self, element, escaping),
            None => {
                log::trace!("no rule for <{tag}>, keeping it as HTML");
                Ok(element.outer_html())
            }
        }
    }

    /// Surround the escaped content of `element` with `around`
    pub fn wrap(&self, element: NodeRef<'_>, around: &str) -> Result<String> {
        let content = self.render_children(element, true)?;
        Ok(format!("{around}{content}{around}"))
    }

    fn render_leaf(&self, node: &Node, escaping: bool) -> Result<String> {
        match node.node_type {
            NodeType::Text if node.value() == "\n" => Ok("\n\n".to_string()),
            NodeType::Text if escaping => Ok(escape(node.value())),
            NodeType::Text => Ok(node.value().to_string()),
            NodeType::Comment => Ok(format!("<!--{}-->", node.value())),
            NodeType::Doctype
            | NodeType::CData
            | NodeType::ProcessingInstruction
            | NodeType::Declaration => Ok(String::new()),
            found => Err(UnmarkError::UnexpectedNode {
                expected: "leaf",
                found,
            }),
        }
    }
}

impl Default for Unmarker {
    fn default() -> Self {
        Self::basic()
    }
}

fn expect_element(node: NodeRef<'_>) -> Result<()> {
    if node.is_element() {
        Ok(())
    } else {
        Err(UnmarkError::UnexpectedNode {
            expected: "element",
            found: node.node_type(),
        })
    }
}
