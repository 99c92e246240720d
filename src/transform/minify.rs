//! Line-based Lua minifier
//!
//! Best-effort size reduction only. There is no tokenizer here: block
//! comments, strings containing `--` and long brackets are not recognised.

use regex::Regex;
use std::sync::OnceLock;

/// Single-line comment marker
const COMMENT_MARKER: &str = "--";

static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

/// Strip comment-only and blank lines, then collapse whitespace
///
/// Lines are trimmed, lines that are empty or start with `--` are dropped,
/// the survivors are joined with a single space and every whitespace run is
/// collapsed to one space.
///
/// # Examples
///
/// ```
/// use luacloak::transform::minify;
///
/// let source = "-- greet\nlocal  x = 1\n\n  print(x)  \n";
/// assert_eq!(minify(source), "local x = 1 print(x)");
/// ```
pub fn minify(text: &str) -> String {
    let joined = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .collect::<Vec<_>>()
        .join(" ");

    whitespace_re().replace_all(&joined, " ").into_owned()
}

fn whitespace_re() -> &'static Regex {
    WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_minify_drops_comment_lines_and_blank_lines() {
        let source = "--[[ header\nlocal a = 1\n   -- note\n\nreturn a";
        // Only the opening line of a block comment looks like a comment
        assert_eq!(minify(source), "local a = 1 return a");
    }

    #[test]
    fn test_minify_keeps_trailing_comments_and_strings() {
        let source = "print(\"--not a comment\") -- trailing\n";
        assert_eq!(minify(source), "print(\"--not a comment\") -- trailing");
    }

    #[test]
    fn test_minify_collapses_inner_whitespace() {
        assert_eq!(minify("a\t\t=  {1,\r  2}\r\n"), "a = {1, 2}");
    }

    #[test]
    fn test_minify_empty_and_comment_only_input() {
        assert_eq!(minify(""), "");
        assert_eq!(minify("-- only\n  \n--x"), "");
    }

    proptest! {
        #[test]
        fn prop_minify_is_idempotent(text in "[ \\t\\r\\na-z=(){}\"'-]{0,120}") {
            let once = minify(&text);
            prop_assert_eq!(minify(&once), once.clone());
        }

        #[test]
        fn prop_minify_never_grows(text in "\\PC{0,120}") {
            prop_assert!(minify(&text).len() <= text.len());
        }
    }
}
