//! Recovering the info string of fenced code blocks.
//!
//! Renderers put the info string of a fenced block into the `class` of the
//! `<pre>` or its `<code>`, and every site decorates it differently. A
//! [`LanguageDetector`] encodes one site's convention.

use crate::{Result, UnmarkError};
use unmark_dom::NodeRef;

/// Theme and framework classes StackExchange adds to code blocks
const STACK_OVERFLOW_NOISE: &[&str] = &[
    "default",
    "s-code-block",
    "hljs",
    "snippet-code-js",
    "prettyprint-override",
];

/// Strategy for turning a code block's classes into an info string.
///
/// Returns an empty string when no usable class is found.
pub trait LanguageDetector: Send + Sync {
    fn detect_language(&self, pre: NodeRef<'_>) -> Result<String>;
}

impl<F> LanguageDetector for F
where
    F: Fn(NodeRef<'_>) -> Result<String> + Send + Sync,
{
    fn detect_language(&self, pre: NodeRef<'_>) -> Result<String> {
        self(pre)
    }
}

/// Class tokens of the block, falling back to those of its `<code>`
fn class_tokens<'a>(pre: NodeRef<'a>) -> Vec<&'a str> {
    let classes = pre.classes();
    if !classes.is_empty() {
        return classes;
    }
    pre.find_descendant("code")
        .map(|code| code.classes())
        .unwrap_or_default()
}

/// Generic policy: a single `lang-*` / `language-*` (or bare) class.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicLanguage;

impl LanguageDetector for BasicLanguage {
    fn detect_language(&self, pre: NodeRef<'_>) -> Result<String> {
        let classes = class_tokens(pre);
        let lang = match classes.as_slice() {
            [] => return Ok(String::new()),
            [lang] => *lang,
            _ => {
                return Err(UnmarkError::AmbiguousLanguage(
                    classes.iter().map(|c| c.to_string()).collect(),
                ))
            }
        };

        let lang = lang
            .strip_prefix("lang-")
            .or_else(|| lang.strip_prefix("language-"))
            .unwrap_or(lang);
        Ok(lang.to_string())
    }
}

/// StackOverflow / StackExchange policy: skip theme classes, then take the
/// first `lang-*` or `snippet-code-*` class.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackOverflowLanguage;

pub type StackExchangeLanguage = StackOverflowLanguage;

impl LanguageDetector for StackOverflowLanguage {
    fn detect_language(&self, pre: NodeRef<'_>) -> Result<String> {
        if pre.find_descendant("code").is_none() {
            return Err(UnmarkError::MissingCode);
        }

        let Some(lang) = class_tokens(pre)
            .into_iter()
            .find(|class| !STACK_OVERFLOW_NOISE.contains(class))
        else {
            return Ok(String::new());
        };

        let lang = lang
            .strip_prefix("lang-")
            .or_else(|| lang.strip_prefix("snippet-code-"))
            .unwrap_or(lang);
        Ok(lang.to_string())
    }
}
