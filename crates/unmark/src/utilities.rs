//! Utility functions and constants for Markdown output.

/// Characters that are backslash-escaped in escaping contexts
pub const ESCAPABLES: &[char] = &['*', '`', '\\', '~', '_', '-', '[', ']', '>', '#'];

/// Aliases applied before any caller-supplied alias
pub const DEFAULT_TAG_ALIASES: &[(&str, &str)] = &[("em", "i"), ("strong", "b"), ("s", "del")];

/// Escape a string so Markdown reads it back as literal text.
///
/// Markdown syntax characters get a backslash; characters that would be
/// read as HTML are written as entities.
pub fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            c if ESCAPABLES.contains(&c) => {
                result.push('\\');
                result.push(c);
            }
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }

    result
}

/// Look up a tag in [`DEFAULT_TAG_ALIASES`]
pub fn default_alias(tag: &str) -> Option<&'static str> {
    DEFAULT_TAG_ALIASES
        .iter()
        .find(|(from, _)| *from == tag)
        .map(|(_, to)| *to)
}

/// Prefix every line that has non-whitespace content
pub fn indent(text: &str, prefix: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            result.push_str(prefix);
        }
        result.push_str(line);
    }
    result
}

/// Length of the longest run of consecutive `c`
pub fn longest_run(text: &str, c: char) -> usize {
    text.chars()
        .fold((0, 0), |(max, current), ch| {
            if ch == c {
                (max.max(current + 1), current + 1)
            } else {
                (max, 0)
            }
        })
        .0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape("*test*"), "\\*test\\*");
        assert_eq!(escape("_test_"), "\\_test\\_");
        assert_eq!(escape("[link]"), "\\[link\\]");
        assert_eq!(escape("# ~x~ - `y` > \\"), "\\# \\~x\\~ \\- \\`y\\` \\> \\\\");
        assert_eq!(escape("normal"), "normal");
    }

    #[test]
    fn test_escape_every_escapable() {
        for c in ESCAPABLES {
            assert_eq!(escape(&c.to_string()), format!("\\{c}"));
        }
    }

    #[test]
    fn test_escape_html_specials() {
        assert_eq!(escape("a & b < c"), "a &amp; b &lt; c");
        assert_eq!(escape("\"q\" 'r'"), "&quot;q&quot; &#x27;r&#x27;");
        assert_eq!(escape("+.!()|"), "+.!()|");
    }

    #[test]
    fn test_default_alias() {
        assert_eq!(default_alias("em"), Some("i"));
        assert_eq!(default_alias("strong"), Some("b"));
        assert_eq!(default_alias("s"), Some("del"));
        assert_eq!(default_alias("b"), None);
    }

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("- a\n\n- b", "    "), "    - a\n\n    - b");
        assert_eq!(indent("x\n", "  "), "  x\n");
        assert_eq!(indent("", "  "), "");
    }

    #[test]
    fn test_longest_run() {
        assert_eq!(longest_run("a``b```c`", '`'), 3);
        assert_eq!(longest_run("plain", '`'), 0);
    }
}
