//! Rule and Filter types for caller-supplied element handling.

use unmark_dom::NodeRef;

use crate::service::UnmarkOptions;

/// Type alias for replacement functions
pub type ReplacementFn = Box<dyn Fn(&NodeRef<'_>, &str, &UnmarkOptions) -> String + Send + Sync>;

/// Type alias for filter predicates
pub type PredicateFn = Box<dyn Fn(&str, &NodeRef<'_>, &UnmarkOptions) -> bool + Send + Sync>;

/// A filter determines which elements a rule applies to.
pub enum Filter {
    /// Match a single tag name
    TagName(String),
    /// Match any of multiple tag names
    TagNames(Vec<String>),
    /// Match using a predicate function; it is handed the rendered tag name
    Predicate(PredicateFn),
}

impl Filter {
    /// Create a filter for a single tag
    pub fn tag(name: &str) -> Self {
        Filter::TagName(name.to_lowercase())
    }

    /// Create a filter for multiple tags
    pub fn tags(names: &[&str]) -> Self {
        Filter::TagNames(names.iter().map(|s| s.to_lowercase()).collect())
    }

    /// Create a filter with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str, &NodeRef<'_>, &UnmarkOptions) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Check if this filter matches an element.
    ///
    /// The element is matched under the tag it renders as, so a filter on
    /// `b` also catches `<strong>` and any tag aliased to `b`.
    pub fn matches(&self, element: &NodeRef<'_>, options: &UnmarkOptions) -> bool {
        let rendered_as = options.resolve_tag(element.tag_name());
        match self {
            Filter::TagName(t) => t == rendered_as,
            Filter::TagNames(tags) => tags.iter().any(|t| t == rendered_as),
            Filter::Predicate(f) => f(rendered_as, element, options),
        }
    }
}

/// A rule defines how to convert a matched HTML element to Markdown.
///
/// The replacement receives the element and its already rendered children.
pub struct Rule {
    /// Filter to determine which elements this rule applies to
    pub filter: Filter,
    /// Replacement function that generates Markdown
    pub replacement: ReplacementFn,
}

impl Rule {
    /// Create a new rule
    pub fn new<F>(filter: Filter, replacement: F) -> Self
    where
        F: Fn(&NodeRef<'_>, &str, &UnmarkOptions) -> String + Send + Sync + 'static,
    {
        Self {
            filter,
            replacement: Box::new(replacement),
        }
    }

    /// Create a rule that matches a single tag
    pub fn for_tag<F>(tag: &str, replacement: F) -> Self
    where
        F: Fn(&NodeRef<'_>, &str, &UnmarkOptions) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::tag(tag), replacement)
    }

    /// Create a rule that matches multiple tags
    pub fn for_tags<F>(tags: &[&str], replacement: F) -> Self
    where
        F: Fn(&NodeRef<'_>, &str, &UnmarkOptions) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::tags(tags), replacement)
    }

    /// Apply this rule's replacement
    pub fn replace(&self, element: &NodeRef<'_>, content: &str, options: &UnmarkOptions) -> String {
        (self.replacement)(element, content, options)
    }
}
