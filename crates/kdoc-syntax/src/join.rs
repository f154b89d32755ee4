//! Re-joining of statements whose parameter lists span several lines.

use crate::depth::bracket_balance;
use crate::normalize::mask_comments;

/// Maximum number of physical lines appended to one statement.
pub const JOIN_LIMIT: usize = 6;

/// One logical statement assembled from `lines[first..=last]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Raw lines joined with single spaces.
    pub text: String,
    /// Same join with comments blanked out; empty for comment lines.
    pub code: String,
    pub first: usize,
    pub last: usize,
    /// The parentheses were still open when joining stopped.
    pub truncated: bool,
}

impl Statement {
    /// Index of the first line after this statement.
    pub fn next(&self) -> usize {
        self.last + 1
    }

    pub fn is_blank(&self) -> bool {
        self.code.trim().is_empty()
    }
}

/// True for a line that starts inside or at a comment.
pub fn is_comment_line(line: &str) -> bool {
    let text = line.trim_start();
    text.starts_with("//") || text.starts_with("/*") || text.starts_with('*')
}

/// Join `lines[start]` with following lines until its parentheses balance.
pub fn join_statement(lines: &[&str], start: usize) -> Statement {
    join_from(lines, start, lines[start].trim_end())
}

/// Like [`join_statement`], but starts from `initial` instead of the raw
/// text of `lines[start]` (used for the tail of a line after a `{`).
///
/// Only a positive balance is joined; an excess of `)` cannot be repaired by
/// reading further and is left to the caller.
pub fn join_from(lines: &[&str], start: usize, initial: &str) -> Statement {
    let mut text = initial.to_string();
    if is_comment_line(initial) {
        return Statement {
            text,
            code: String::new(),
            first: start,
            last: start,
            truncated: false,
        };
    }

    let mut code = mask_comments(initial).trim_end().to_string();
    let mut last = start;
    let mut appended = 0;
    let mut truncated = false;

    while bracket_balance(&code) > 0 {
        if appended == JOIN_LIMIT || last + 1 >= lines.len() {
            truncated = true;
            tracing::debug!(line = start + 1, appended, "statement join stopped early");
            break;
        }
        last += 1;
        appended += 1;
        text.push(' ');
        text.push_str(lines[last].trim());
        code.push(' ');
        code.push_str(mask_comments(lines[last]).trim());
    }

    Statement {
        text,
        code,
        first: start,
        last,
        truncated,
    }
}
