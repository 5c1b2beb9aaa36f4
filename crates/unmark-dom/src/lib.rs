//! unmark-dom - the node tree consumed by `unmark`
//!
//! Any HTML parser can produce this tree; `unmark` ships an adapter for
//! html5ever (via `scraper`), and tests build trees by hand.
//!
//! # Architecture
//!
//! ```text
//! HTML String ──parser──▶ ┌───────────┐
//!                         │           │
//!                         │ Node tree │ ──▶ unmark ──▶ Markdown String
//! Hand-built tree ───────▶│           │
//!                         └───────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use unmark_dom::Node;
//!
//! let mut a = Node::element_with_attrs("a", vec![("href", "https://example.com")]);
//! a.add_child(Node::text("Link"));
//!
//! assert_eq!(a.attr("href"), Some("https://example.com"));
//! assert_eq!(a.outer_html(), "<a href=\"https://example.com\">Link</a>");
//! ```

mod node;
mod serialize;

pub use node::{Node, NodeRef, NodeType};
pub use serialize::{escape_html_attr, escape_html_text, is_raw_text, is_void, VOID_ELEMENTS};
