//! Whitespace compaction for rendered output.
//!
//! The minified text is meant to be small, not readable: lines are trimmed,
//! blank lines dropped, interior whitespace runs collapsed and everything is
//! concatenated without separators.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

/// Compact `text` into a single line
pub fn minify(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| WHITESPACE_RUN.replace_all(line, " "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_blank_lines_and_concatenates() {
        let input = "    [DIR] src/\n\n        [FILE] a.rs\n   \n        fn main() {}\n";
        assert_eq!(minify(input), "[DIR] src/[FILE] a.rsfn main() {}");
    }

    #[test]
    fn test_collapses_interior_whitespace() {
        assert_eq!(minify("let  x =\t\t1;"), "let x = 1;");
        // A single tab is not a run
        assert_eq!(minify("a\tb"), "a\tb");
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(minify("one  \r\n\r\n  two\r\n"), "onetwo");
    }

    #[test]
    fn test_idempotent() {
        let input = "Source: /tmp/x\n====\n[DIR] x/\n    [FILE] a.cs\n    Content:\n    int  a  =  1;\n\n";
        let once = minify(input);
        assert_eq!(minify(&once), once);
        assert!(!once.contains('\n'));
        assert!(!once.contains("  "));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(minify(""), "");
        assert_eq!(minify("\n  \n\t\n"), "");
    }
}
