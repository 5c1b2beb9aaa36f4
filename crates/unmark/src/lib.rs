//! # unmark
//!
//! Convert HTML trees back into Markdown.
//!
//! Rendering the output through a CommonMark renderer reproduces HTML
//! equivalent to the input. Elements without a Markdown form (custom
//! elements, tables, ...) are kept as raw HTML, which Markdown passes
//! through untouched.
//!
//! ## Design
//!
//! The converter walks a [`Node`] tree recursively and dispatches every
//! element to a per-tag handler. Flavors of the converter differ only in how
//! they recover the info string of fenced code blocks ([`LanguageDetector`])
//! and in optional tag aliases.
//!
//! ## Example (HTML string)
//!
//! ```rust
//! let markdown = unmark::unmark("<p>Hello <strong>World</strong></p>").unwrap();
//! assert_eq!(markdown, "Hello **World**");
//! ```
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use unmark::{Node, Unmarker};
//!
//! let unmarker = Unmarker::stack_overflow();
//!
//! let pre = Node::element_with_attrs("pre", vec![("class", "lang-rust s-code-block")])
//!     .with_child(Node::element("code").with_child(Node::text("let x = 1;\n")));
//!
//! let markdown = unmarker.unmark(&pre).unwrap();
//! assert_eq!(markdown, "```rust\nlet x = 1;\n```");
//! ```

#[cfg(feature = "html")]
pub mod html;
mod language;
mod normalize;
mod rules;
mod service;
mod utilities;

#[cfg(feature = "html")]
pub use html::{parse_html, parse_html_with_mode, ParseMode};
pub use language::{BasicLanguage, LanguageDetector, StackExchangeLanguage, StackOverflowLanguage};
pub use normalize::{finish, normalize};
pub use rules::{render_list, Filter, ItemFormat, Rule};
pub use service::{UnmarkOptions, Unmarker};
pub use unmark_dom::{Node, NodeRef, NodeType};
pub use utilities::*;

/// Error type for unmark operations
#[derive(Debug, thiserror::Error)]
pub enum UnmarkError {
    #[error("<pre> element has no nested <code> element")]
    MissingCode,

    #[error("expected exactly one language class, found {0:?}")]
    AmbiguousLanguage(Vec<String>),

    #[error("expected {expected} node, found {found:?}")]
    UnexpectedNode {
        expected: &'static str,
        found: NodeType,
    },
}

pub type Result<T> = std::result::Result<T, UnmarkError>;

/// Convert HTML to Markdown with the generic converter.
///
/// ```rust
/// assert_eq!(unmark::unmark("<em>Italic</em>").unwrap(), "*Italic*");
/// assert_eq!(unmark::unmark("<!--kept-->").unwrap(), "<!--kept-->");
/// ```
#[cfg(feature = "html")]
pub fn unmark(html: &str) -> Result<String> {
    Unmarker::basic().unmark_html(html)
}
