//! Brace depth and bracket balance over masked lines.

use crate::normalize::{is_line_comment, mask_structural};

/// Apply one line's `{`/`}` delta to `depth`.
///
/// Lines starting with a `//` comment leave the depth untouched.
pub fn update_brace_depth(line: &str, depth: i32) -> i32 {
    if is_line_comment(line) {
        return depth;
    }
    depth + count_delta(&mask_structural(line), '{', '}')
}

/// Net `(` minus `)` on a line, ignoring literals and comments.
pub fn bracket_balance(line: &str) -> i32 {
    if is_line_comment(line) {
        return 0;
    }
    count_delta(&mask_structural(line), '(', ')')
}

fn count_delta(masked: &str, open: char, close: char) -> i32 {
    masked.chars().fold(0, |acc, c| {
        if c == open {
            acc + 1
        } else if c == close {
            acc - 1
        } else {
            acc
        }
    })
}

/// Running brace depth across the lines of one file.
///
/// A stray `}` never takes the depth below zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthTracker {
    depth: i32,
}

impl DepthTracker {
    pub fn starting_at(depth: i32) -> Self {
        Self {
            depth: depth.max(0),
        }
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Consume a line and return the depth after it.
    pub fn feed(&mut self, line: &str) -> i32 {
        self.depth = update_brace_depth(line, self.depth).max(0);
        self.depth
    }
}
