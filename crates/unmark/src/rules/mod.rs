//! Rule system for HTML to Markdown conversion.

mod commonmark;
mod list;
mod rule;

pub use list::{render_list, ItemFormat};
pub use rule::{Filter, Rule};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use unmark_dom::NodeRef;

use crate::service::{UnmarkOptions, Unmarker};
use crate::Result;

/// Built-in handler for one (alias-resolved) tag name
pub(crate) type TagHandler = fn(&Unmarker, NodeRef<'_>, bool) -> Result<String>;

/// Built-in handlers, shared by every converter flavor
static BUILTIN_HANDLERS: Lazy<IndexMap<&'static str, TagHandler>> =
    Lazy::new(commonmark::builtin_handlers);

/// Collection of caller-supplied rules, layered over the built-in handlers
pub struct Rules {
    /// Custom rules added by the user (checked before built-ins)
    custom_rules: IndexMap<String, Rule>,
    /// Remove rules (remove entirely)
    remove_rules: Vec<Filter>,
}

impl Rules {
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            remove_rules: Vec::new(),
        }
    }

    /// Add a custom rule; a rule with the same key is replaced
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Add a remove filter
    pub fn remove(&mut self, filter: Filter) {
        self.remove_rules.push(filter);
    }

    /// First custom rule matching the element, in insertion order
    pub fn for_node<'a>(&'a self, node: &NodeRef<'_>, options: &UnmarkOptions) -> Option<&'a Rule> {
        self.custom_rules
            .values()
            .find(|rule| rule.filter.matches(node, options))
    }

    /// Check if an element should be dropped from the output
    pub fn should_remove(&self, node: &NodeRef<'_>, options: &UnmarkOptions) -> bool {
        self.remove_rules
            .iter()
            .any(|filter| filter.matches(node, options))
    }

    /// Built-in handler for a tag, if there is one
    pub(crate) fn builtin(tag: &str) -> Option<TagHandler> {
        BUILTIN_HANDLERS.get(tag).copied()
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
