//! Structural line masking.
//!
//! Braces and parentheses are only counted on a masked copy of a line in
//! which string literals, char literals and comments have been blanked out.
//! Masking replaces every masked byte with a space, so offsets into the
//! masked line are valid offsets into the raw line.
//!
//! State is never carried across lines: a string or block comment left open
//! at the end of a line is treated as closed there.

use regex::{Captures, Regex};
use std::sync::LazyLock;

// Alternation is leftmost-first, so whichever construct starts earliest on
// the line wins (a `"` inside a comment, a `//` inside a string).
static RE_MASKABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#""(?:[^"\\]|\\.)*(?:"|\\?$)"#,
        r"|'(?:\\[^']*|[^'\\])'",
        r"|/\*.*?(?:\*/|$)",
        r"|//.*$",
    ))
    .unwrap()
});

/// Mask literals and comments, leaving only structural text.
pub fn mask_structural(line: &str) -> String {
    mask_with(line, false)
}

/// Mask comments only; string and char literals are kept verbatim.
pub fn mask_comments(line: &str) -> String {
    mask_with(line, true)
}

/// True if the first non-blank text on the line is a `//` comment.
pub fn is_line_comment(line: &str) -> bool {
    line.trim_start().starts_with("//")
}

fn mask_with(line: &str, keep_literals: bool) -> String {
    if is_line_comment(line) {
        return " ".repeat(line.len());
    }
    RE_MASKABLE
        .replace_all(line, |caps: &Captures| {
            let span = &caps[0];
            if keep_literals && (span.starts_with('"') || span.starts_with('\'')) {
                span.to_string()
            } else {
                " ".repeat(span.len())
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_string_contents() {
        let masked = mask_structural(r#"val s = "{ not a brace }""#);
        assert!(!masked.contains('{'));
        assert!(!masked.contains('}'));
        assert!(masked.starts_with("val s = "));
    }

    #[test]
    fn preserves_byte_offsets() {
        let line = r#"fun f(a: String = "(") { // trailing {"#;
        let masked = mask_structural(line);
        assert_eq!(masked.len(), line.len());
        assert_eq!(masked.find('{'), line.find(") {").map(|p| p + 2));
    }

    #[test]
    fn escaped_quote_stays_inside_string() {
        let masked = mask_structural(r#"val s = "a\"{" + x {"#);
        assert_eq!(masked.matches('{').count(), 1);
    }

    #[test]
    fn masks_block_comment_span() {
        let masked = mask_structural("class A /* { */ {");
        assert_eq!(masked.matches('{').count(), 1);
    }

    #[test]
    fn unterminated_block_comment_runs_to_end() {
        let masked = mask_structural("val x = 1 /** starts { here");
        assert!(!masked.contains('{'));
        assert!(masked.starts_with("val x = 1"));
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        let masked = mask_structural(r#"val s = "open ( {"#);
        assert!(!masked.contains('('));
        assert!(!masked.contains('{'));
    }

    #[test]
    fn char_literals_are_masked() {
        let masked = mask_structural("if (c == '{') {");
        assert_eq!(masked.matches('{').count(), 1);
        assert_eq!(masked.matches('(').count(), 1);
    }

    #[test]
    fn leading_line_comment_masks_everything() {
        let masked = mask_structural("   // class Foo {");
        assert!(masked.trim().is_empty());
    }

    #[test]
    fn slashes_inside_string_are_not_a_comment() {
        let masked = mask_structural(r#"val url = "http://x" ; val y = f() {"#);
        assert!(masked.contains("f() {"));
    }

    #[test]
    fn mask_comments_keeps_literals() {
        let masked = mask_comments(r##"RED("#f00"), /**< red */"##);
        assert!(masked.starts_with(r##"RED("#f00"),"##));
        assert!(!masked.contains("red */"));
    }
}
