//! Keyword-driven Lua re-indenter

use regex::Regex;
use std::sync::OnceLock;

const INDENT: &str = "    ";

static DEDENT_RE: OnceLock<Regex> = OnceLock::new();
static OPEN_RE: OnceLock<Regex> = OnceLock::new();
static END_RE: OnceLock<Regex> = OnceLock::new();

/// Re-indent Lua source by block keywords
///
/// Purely line based: a line opening with `end`, `else`, `elseif` or `until`
/// is dedented; a line opening with `function`, `if`, `for`, `while`,
/// `repeat`, `else` or `elseif` indents what follows unless it also
/// contains `end`. Blank lines stay blank.
///
/// # Examples
///
/// ```
/// use luacloak::transform::beautify;
///
/// let source = "if x then\nprint(x)\nelse\nprint(0)\nend";
/// assert_eq!(beautify(source), "if x then\n    print(x)\nelse\n    print(0)\nend");
/// ```
pub fn beautify(text: &str) -> String {
    let dedent_re = DEDENT_RE.get_or_init(|| {
        Regex::new(r"^(end|else|elseif|until)\b").expect("dedent regex is valid")
    });
    let open_re = OPEN_RE.get_or_init(|| {
        Regex::new(r"^(function|if|for|while|repeat|else|elseif)\b").expect("open regex is valid")
    });
    let end_re = END_RE.get_or_init(|| Regex::new(r"\bend\b").expect("end regex is valid"));

    let mut depth: usize = 0;
    text.split('\n')
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return String::new();
            }

            if dedent_re.is_match(trimmed) {
                depth = depth.saturating_sub(1);
            }
            let rendered = format!("{}{}", INDENT.repeat(depth), trimmed);
            if open_re.is_match(trimmed) && !end_re.is_match(trimmed) {
                depth += 1;
            }
            rendered
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_blocks() {
        let source = "function f(n)\nfor i=1,n do\nprint(i)\nend\nend";
        let expected = "function f(n)\n    for i=1,n do\n        print(i)\n    end\nend";
        assert_eq!(beautify(source), expected);
    }

    #[test]
    fn test_one_line_block_does_not_indent() {
        let source = "if x then return end\nprint(x)";
        assert_eq!(beautify(source), source);
    }

    #[test]
    fn test_repeat_until() {
        let source = "repeat\n  i = i + 1\n      until i > 3";
        assert_eq!(beautify(source), "repeat\n    i = i + 1\nuntil i > 3");
    }

    #[test]
    fn test_stray_end_never_goes_negative() {
        assert_eq!(beautify("end\nend\nx = 1"), "end\nend\nx = 1");
    }

    #[test]
    fn test_keyword_prefix_is_not_a_keyword() {
        // `ending` and `format` are identifiers, not block keywords
        assert_eq!(beautify("ending = 1\nformat = 2"), "ending = 1\nformat = 2");
    }

    #[test]
    fn test_blank_lines_stay_blank() {
        assert_eq!(beautify("while true do\n\nbreak\nend"), "while true do\n\n    break\nend");
    }
}
