//! Member index of one braced container body.
//!
//! The body is walked statement by statement from the line holding its
//! opening brace. Only statements that start directly at member level are
//! matched; anything nested deeper (function bodies, nested classes) is
//! skipped here and picked up by the file-level scan.

use crate::depth::DepthTracker;
use crate::docblock::{extract_doc_block, inline_doc};
use crate::docfields::is_suppressed;
use crate::join::{is_comment_line, join_from, Statement};
use crate::model::SymbolKind;
use crate::normalize::{mask_comments, mask_structural};
use crate::signature::{
    is_companion, is_enum_stop_word, match_declaration, Signature, ENUM_CASE_MATCHERS,
    MEMBER_MATCHERS,
};

/// A matched member before it is placed in the arena.
#[derive(Debug, Clone)]
pub(crate) struct MemberDraft {
    pub signature: Signature,
    /// 0-based index of the member's first line.
    pub line: usize,
    /// Depth relative to the container (1 for direct members).
    pub level: usize,
    pub doc_block: Vec<String>,
    pub is_static: bool,
}

/// Open `companion object` scope.
#[derive(Debug, Clone, Copy)]
struct Companion {
    /// Relative depth of statements directly inside the companion body.
    depth: i32,
    opened: bool,
    header: usize,
}

/// Scan the body whose `{` is on `lines[open_line]`.
pub(crate) fn scan_members(lines: &[&str], open_line: usize, kind: SymbolKind) -> Vec<MemberDraft> {
    let Some(brace) = body_brace(lines[open_line]) else {
        return Vec::new();
    };

    let mut members = Vec::new();
    let mut depth = DepthTracker::starting_at(1);
    let mut companion: Option<Companion> = None;
    let mut in_cases = kind == SymbolKind::EnumClass;

    let mut head = &lines[open_line][brace + 1..];
    let mut stmt = join_from(lines, open_line, head);
    loop {
        let before = depth.depth();
        let after = feed_statement(&mut depth, lines, &stmt, head);
        let on_open_line = stmt.first == open_line;

        let mut consumed = false;
        if in_cases && before == 1 && !stmt.is_blank() && !is_comment_line(&stmt.text) {
            if is_enum_stop_word(&stmt.code) {
                in_cases = false;
            } else {
                in_cases = !collect_cases(&stmt, &mut members);
                consumed = true;
            }
        }

        let level = match companion {
            Some(c) if c.opened => c.depth,
            _ => 1,
        };
        if !consumed && !in_cases && before == level && !stmt.is_blank() {
            if companion.is_none() && is_companion(&stmt.code) {
                companion = Some(Companion {
                    depth: before + 1,
                    opened: false,
                    header: stmt.first,
                });
                // `companion object { fun make() = A() }`
                if let Some(brace) = body_brace(&stmt.code) {
                    if let Some(signature) =
                        match_declaration(MEMBER_MATCHERS, &stmt.code[brace + 1..])
                    {
                        let draft = MemberDraft {
                            signature,
                            line: stmt.first,
                            level: before as usize + 1,
                            doc_block: inline_doc(&stmt.text).into_iter().collect(),
                            is_static: true,
                        };
                        push_member(&mut members, draft);
                    }
                }
            } else if let Some(signature) = match_declaration(MEMBER_MATCHERS, &stmt.code) {
                let draft = MemberDraft {
                    signature,
                    line: stmt.first,
                    level: before as usize,
                    doc_block: member_doc(lines, &stmt, on_open_line),
                    is_static: companion.is_some_and(|c| c.opened),
                };
                push_member(&mut members, draft);
            }
        }

        if let Some(c) = companion.as_mut() {
            if c.opened {
                if after < c.depth {
                    companion = None;
                }
            } else if after >= c.depth {
                c.opened = true;
            } else if stmt.first != c.header && !stmt.is_blank() {
                companion = None;
            }
        }

        if after <= 0 {
            break;
        }
        let next = stmt.next();
        if next >= lines.len() {
            tracing::debug!(open_line = open_line + 1, "container body runs to end of file");
            break;
        }
        head = lines[next].trim_end();
        stmt = join_from(lines, next, head);
    }

    members
}

fn push_member(members: &mut Vec<MemberDraft>, draft: MemberDraft) {
    if is_suppressed(&draft.doc_block) {
        tracing::debug!(name = %draft.signature.name, line = draft.line + 1, "suppressed member");
    } else {
        members.push(draft);
    }
}

/// Offset of the `{` that opens the body, outside parentheses.
fn body_brace(line: &str) -> Option<usize> {
    let masked = mask_structural(line);
    let mut parens = 0i32;
    for (i, c) in masked.char_indices() {
        match c {
            '(' => parens += 1,
            ')' => parens -= 1,
            '{' if parens <= 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Advance the depth over every physical line of the statement.
fn feed_statement(depth: &mut DepthTracker, lines: &[&str], stmt: &Statement, head: &str) -> i32 {
    let mut after = depth.feed(head);
    for line in &lines[stmt.first + 1..=stmt.last] {
        after = depth.feed(line);
    }
    after
}

fn member_doc(lines: &[&str], stmt: &Statement, on_open_line: bool) -> Vec<String> {
    if let Some(doc) = inline_doc(&stmt.text) {
        return vec![doc];
    }
    if on_open_line {
        return Vec::new();
    }
    extract_doc_block(lines, stmt.first.checked_sub(1))
}

/// Split a case-list statement and record its cases. Returns true when the
/// case list ended in this statement.
fn collect_cases(stmt: &Statement, members: &mut Vec<MemberDraft>) -> bool {
    let (pieces, ended) = split_cases(&stmt.text);
    let start = members.len();

    for piece in pieces {
        let code = mask_comments(piece);
        let code = code.trim();
        let doc = inline_doc(piece);
        if code.is_empty() {
            // `RED, /**< doc */` puts the doc after the separating comma.
            if let (Some(doc), Some(last)) = (doc, members[start..].last_mut()) {
                if last.doc_block.is_empty() {
                    last.doc_block = vec![doc];
                }
            }
            continue;
        }
        if let Some(signature) = match_declaration(ENUM_CASE_MATCHERS, code) {
            members.push(MemberDraft {
                signature,
                line: stmt.first,
                level: 1,
                doc_block: doc.into_iter().collect(),
                is_static: false,
            });
        }
    }
    ended
}

/// Split on top-level commas. A `;` ends the case list; a `}` that closes
/// the body cuts the statement. Returns the pieces and whether the case list
/// ended.
fn split_cases(text: &str) -> (Vec<&str>, bool) {
    let masked = mask_structural(text);
    let mut pieces = Vec::new();
    let mut nesting = 0i32;
    let mut start = 0;

    for (i, c) in masked.char_indices() {
        match c {
            '(' | '[' | '{' => nesting += 1,
            ')' | ']' => nesting -= 1,
            '}' if nesting == 0 => {
                pieces.push(&text[start..i]);
                return (pieces, true);
            }
            '}' => nesting -= 1,
            ',' if nesting == 0 => {
                pieces.push(&text[start..i]);
                start = i + 1;
            }
            // The rest of the line stays with the last case for its inline doc.
            ';' if nesting == 0 => {
                pieces.push(&text[start..]);
                return (pieces, true);
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);
    (pieces, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(src: &str, kind: SymbolKind) -> Vec<MemberDraft> {
        let lines: Vec<&str> = src.lines().collect();
        scan_members(&lines, 0, kind)
    }

    fn names(members: &[MemberDraft]) -> Vec<&str> {
        members.iter().map(|m| m.signature.name.as_str()).collect()
    }

    #[test]
    fn one_line_enum_body() {
        let members = scan("enum class Color { RED, GREEN, BLUE }", SymbolKind::EnumClass);
        assert_eq!(names(&members), vec!["RED", "GREEN", "BLUE"]);
        assert!(members
            .iter()
            .all(|m| m.signature.kind == Some(SymbolKind::EnumCase)));
    }

    #[test]
    fn enum_cases_then_members() {
        let src = "enum class Level(val rank: Int) {\n    \
                   // ordered\n    \
                   LOW(1), /**< the least */\n    \
                   HIGH(2) /**< the most */;\n\n    \
                   /** Next level. */\n    \
                   fun next(): Level = HIGH\n}";
        let members = scan(src, SymbolKind::EnumClass);
        assert_eq!(names(&members), vec!["LOW", "HIGH", "next"]);
        assert_eq!(members[0].signature.raw_value.as_deref(), Some("1"));
        assert_eq!(members[0].doc_block, vec!["the least"]);
        assert_eq!(members[1].doc_block, vec!["the most"]);
        assert_eq!(members[2].signature.kind, Some(SymbolKind::Function));
        assert_eq!(members[2].doc_block, vec![" Next level. "]);
    }

    #[test]
    fn stop_word_ends_case_list() {
        let src = "enum class E {\n    A,\n    B\n    val x = 1\n}";
        let members = scan(src, SymbolKind::EnumClass);
        assert_eq!(names(&members), vec!["A", "B", "x"]);
        assert_eq!(members[2].signature.kind, Some(SymbolKind::Val));
    }

    #[test]
    fn nested_bodies_are_skipped() {
        let src = "class A {\n    fun f() {\n        val local = 1\n    }\n    \
                   class Inner {\n        fun g() {}\n    }\n    var v = 2\n}";
        let members = scan(src, SymbolKind::Class);
        assert_eq!(names(&members), vec!["f", "v"]);
        assert!(members.iter().all(|m| m.level == 1));
    }

    #[test]
    fn companion_members_are_static() {
        let src = "class A {\n    companion object {\n        fun create(): A = A()\n        \
                   const val KEY = \"k\"\n    }\n    fun instance() {}\n}";
        let members = scan(src, SymbolKind::Class);
        assert_eq!(names(&members), vec!["create", "KEY", "instance"]);
        assert!(members[0].is_static);
        assert!(members[1].is_static);
        assert_eq!(members[1].level, 2);
        assert!(!members[2].is_static);
    }

    #[test]
    fn companion_brace_on_next_line() {
        let src = "class A {\n    companion object\n    {\n        fun create() {}\n    }\n}";
        let members = scan(src, SymbolKind::Class);
        assert_eq!(names(&members), vec!["create"]);
        assert!(members[0].is_static);
    }

    #[test]
    fn suppressed_member_is_dropped() {
        let src = "class A {\n    /** @suppress */\n    fun hidden() {}\n    \
                   /** Shown. */\n    fun shown() {}\n}";
        let members = scan(src, SymbolKind::Class);
        assert_eq!(names(&members), vec!["shown"]);
    }

    #[test]
    fn prose_mentioning_suppress_keeps_member() {
        let src = "class X {\n    /** Mentions the @suppress tag in prose. */\n    fun f() {}\n}";
        let members = scan(src, SymbolKind::Class);
        assert_eq!(names(&members), vec!["f"]);
    }

    #[test]
    fn one_line_companion() {
        let src = "class A {\n    companion object { fun make() = A() }\n    fun inst() {}\n}";
        let members = scan(src, SymbolKind::Class);
        assert_eq!(names(&members), vec!["make", "inst"]);
        assert!(members[0].is_static);
        assert_eq!(members[0].level, 2);
        assert!(!members[1].is_static);
    }

    #[test]
    fn one_line_companion_in_one_line_body() {
        let members = scan("class A { companion object { fun a() = 1 } }", SymbolKind::Class);
        assert_eq!(names(&members), vec!["a"]);
        assert!(members[0].is_static);
        assert_eq!(members[0].signature.raw_remainder.as_deref(), Some("()"));
    }

    #[test]
    fn one_line_bodies_drop_the_closing_brace() {
        let members = scan("interface Api { fun call(): Int }", SymbolKind::Interface);
        assert_eq!(names(&members), vec!["call"]);
        assert_eq!(members[0].signature.raw_remainder.as_deref(), Some("(): Int"));

        let members = scan("object O { val x = 1 }", SymbolKind::Object);
        assert_eq!(names(&members), vec!["x"]);
        assert_eq!(members[0].signature.raw_value.as_deref(), Some("1"));
    }

    #[test]
    fn joined_member_signature() {
        let src = "interface Api {\n    fun call(\n        a: Int,\n        b: Int\n    ): Int\n    \
                   val name: String\n}";
        let members = scan(src, SymbolKind::Interface);
        assert_eq!(names(&members), vec!["call", "name"]);
        assert_eq!(
            members[0].signature.raw_remainder.as_deref(),
            Some("( a: Int, b: Int ): Int")
        );
    }

    #[test]
    fn members_on_open_line() {
        let members = scan("object O { fun f() = 1 }", SymbolKind::Object);
        assert_eq!(names(&members), vec!["f"]);
        assert!(members[0].doc_block.is_empty());
    }

    #[test]
    fn split_cases_respects_nesting() {
        let (pieces, ended) = split_cases(r#" A("x, y"), B(listOf(1, 2)); fun f() {}"#);
        assert_eq!(pieces, vec![r#" A("x, y")"#, " B(listOf(1, 2)); fun f() {}"]);
        assert!(ended);
    }
}
