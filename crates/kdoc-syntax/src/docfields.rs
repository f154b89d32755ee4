//! Structured view of a raw doc block.
//!
//! [`parse_doc_fields`] turns comment-body lines into prose, tag fields and
//! fenced code. Layout between prose and fields is tracked by an explicit
//! [`Layout`] value that [`step`] consumes and returns, one line at a time.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::docblock::SUPPRESS_MARKER;

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@(?P<tag>[A-Za-z]+)\b\s*(?P<rest>.*)$").unwrap());

// `name desc` or `[name] desc`
static RE_NAMED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\[\s*(?P<bracketed>[^\]]*?)\s*\]|(?P<plain>[\p{L}_][\p{L}\p{N}_]*))\s*(?P<desc>.*)$")
        .unwrap()
});

const FENCE: &str = "```";

/// Recognized block tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldTag {
    Parameter,
    Property,
    Author,
    #[serde(rename = "example")]
    Sample,
    Returns,
    See,
    Since,
    Throws,
}

impl FieldTag {
    /// Field directive name in the rendered output.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Parameter => "parameter",
            Self::Property => "property",
            Self::Author => "author",
            Self::Sample => "example",
            Self::Returns => "returns",
            Self::See => "see",
            Self::Since => "since",
            Self::Throws => "throws",
        }
    }

    /// Tags that name an identifier before their description.
    pub fn takes_argument(self) -> bool {
        matches!(self, Self::Parameter | Self::Property)
    }
}

/// One tag with its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub tag: FieldTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
    pub text: String,
}

/// One unit of parsed documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DocLine {
    Prose(String),
    Blank,
    Field(Field),
    /// Further description of the preceding field.
    Continuation(String),
    /// Fenced code block, indentation preserved.
    Code(Vec<String>),
}

/// Where the documentation will be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocContext {
    /// Container header: `@param` and `@constructor` sections are left to the
    /// derived constructor and parameter entries.
    Container,
    Member,
}

/// Output layout after the last consumed line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Layout {
    /// Nothing emitted yet.
    #[default]
    Start,
    Prose,
    Blank,
    Directive,
    /// Inside a section that is not rendered.
    Suppressed { resume: Box<Layout> },
    /// A tag without description; the next text line completes it.
    Pending { field: Field, resume: Box<Layout> },
    /// Inside a fenced code block.
    Code { lines: Vec<String> },
}

impl Layout {
    /// A directive emitted now needs a blank line in front of it.
    fn needs_separator(&self) -> bool {
        match self {
            Self::Prose | Self::Code { .. } => true,
            Self::Suppressed { resume } | Self::Pending { resume, .. } => resume.needs_separator(),
            Self::Start | Self::Blank | Self::Directive => false,
        }
    }
}

enum Tag {
    Field(Field),
    Constructor(String),
    Suppress,
    /// A recognized tag that cannot be used, e.g. `@param` without a name.
    Malformed,
}

/// Parse a raw doc block for the given context.
pub fn parse_doc_fields(block: &[String], context: DocContext) -> Vec<DocLine> {
    let mut out = Vec::new();
    let mut layout = Layout::Start;
    for raw in block {
        let (next, emitted) = step(layout, raw, context);
        layout = next;
        out.extend(emitted);
    }
    out.extend(finish(layout));
    while out.last() == Some(&DocLine::Blank) {
        out.pop();
    }
    out
}

/// Consume one raw block line.
pub fn step(layout: Layout, raw: &str, context: DocContext) -> (Layout, Vec<DocLine>) {
    let text = clean(raw);

    if let Layout::Code { mut lines } = layout {
        if text.starts_with(FENCE) {
            return (Layout::Prose, vec![DocLine::Code(lines)]);
        }
        lines.push(clean_code(raw));
        return (Layout::Code { lines }, Vec::new());
    }

    if text.starts_with(FENCE) {
        let out = match settle(layout) {
            Layout::Directive => vec![DocLine::Blank],
            _ => Vec::new(),
        };
        return (Layout::Code { lines: Vec::new() }, out);
    }

    if text.is_empty() {
        return match layout {
            Layout::Start | Layout::Blank => (layout, Vec::new()),
            Layout::Suppressed { resume } | Layout::Pending { resume, .. } => {
                step(*resume, raw, context)
            }
            _ => (Layout::Blank, vec![DocLine::Blank]),
        };
    }

    match classify(text) {
        Some(Tag::Suppress) => (layout, Vec::new()),
        Some(Tag::Malformed | Tag::Constructor(_)) => (
            Layout::Suppressed {
                resume: Box::new(settle(layout)),
            },
            Vec::new(),
        ),
        Some(Tag::Field(field)) => {
            if context == DocContext::Container && field.tag == FieldTag::Parameter {
                return (
                    Layout::Suppressed {
                        resume: Box::new(settle(layout)),
                    },
                    Vec::new(),
                );
            }
            let mut out = Vec::new();
            let resume = settle(layout);
            if field.text.is_empty() {
                return (
                    Layout::Pending {
                        field,
                        resume: Box::new(resume),
                    },
                    out,
                );
            }
            emit_field(&resume, field, &mut out);
            (Layout::Directive, out)
        }
        None => match layout {
            Layout::Suppressed { .. } => (layout, Vec::new()),
            Layout::Pending { mut field, resume } => {
                field.text = text.to_string();
                let mut out = Vec::new();
                emit_field(&resume, field, &mut out);
                (Layout::Directive, out)
            }
            Layout::Directive => (
                Layout::Directive,
                vec![DocLine::Continuation(text.to_string())],
            ),
            _ => (Layout::Prose, vec![DocLine::Prose(text.to_string())]),
        },
    }
}

/// Flush whatever a trailing layout still holds.
fn finish(layout: Layout) -> Vec<DocLine> {
    match layout {
        Layout::Code { lines, .. } => vec![DocLine::Code(lines)],
        _ => Vec::new(),
    }
}

/// Drop an unfinished tag and return the layout it interrupted.
fn settle(layout: Layout) -> Layout {
    match layout {
        Layout::Pending { resume, .. } | Layout::Suppressed { resume } => *resume,
        other => other,
    }
}

fn emit_field(before: &Layout, field: Field, out: &mut Vec<DocLine>) {
    if before.needs_separator() {
        out.push(DocLine::Blank);
    }
    out.push(DocLine::Field(field));
}

fn classify(text: &str) -> Option<Tag> {
    let caps = RE_TAG.captures(text)?;
    let rest = caps["rest"].trim();
    let tag = match &caps["tag"] {
        "param" => FieldTag::Parameter,
        "property" => FieldTag::Property,
        "author" => FieldTag::Author,
        "sample" => FieldTag::Sample,
        "return" => FieldTag::Returns,
        "see" => FieldTag::See,
        "since" => FieldTag::Since,
        "throws" | "exception" => FieldTag::Throws,
        "constructor" => return Some(Tag::Constructor(rest.to_string())),
        "suppress" => return Some(Tag::Suppress),
        _ => return None,
    };

    if !tag.takes_argument() {
        return Some(Tag::Field(Field {
            tag,
            argument: None,
            text: rest.to_string(),
        }));
    }
    let Some(named) = RE_NAMED.captures(rest) else {
        return Some(Tag::Malformed);
    };
    let argument = named
        .name("bracketed")
        .or_else(|| named.name("plain"))
        .map(|m| m.as_str().to_string())
        .filter(|name| !name.is_empty());
    match argument {
        Some(argument) => Some(Tag::Field(Field {
            tag,
            argument: Some(argument),
            text: named["desc"].trim().to_string(),
        })),
        None => Some(Tag::Malformed),
    }
}

/// Comment-body text with decoration removed.
fn clean(raw: &str) -> &str {
    let text = raw.trim();
    text.strip_prefix('*').unwrap_or(text).trim()
}

/// Code line with decoration removed and indentation kept.
fn clean_code(raw: &str) -> String {
    let line = raw.trim_end();
    match line.trim_start().strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest).to_string(),
        None => line.to_string(),
    }
}

// -- Per-name lookup ----------------------------------------------------------

/// Description of `@param name`, with its continuation lines.
pub fn docstring_for_param(block: &[String], name: &str) -> Vec<String> {
    named_section(block, FieldTag::Parameter, name)
}

/// Description of `@property name`, with its continuation lines.
pub fn docstring_for_val(block: &[String], name: &str) -> Vec<String> {
    named_section(block, FieldTag::Property, name)
}

/// Documentation for a primary constructor: the `@constructor` section
/// followed by every `@param` line of the container's block.
pub fn constructor_doc(block: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut params = Vec::new();
    let mut section: Option<bool> = None;

    for raw in block {
        let text = clean(raw);
        if text.is_empty() {
            section = None;
            continue;
        }
        match classify(text) {
            Some(Tag::Constructor(desc)) => {
                if !desc.is_empty() {
                    out.push(desc);
                }
                section = Some(true);
            }
            Some(Tag::Field(field)) if field.tag == FieldTag::Parameter => {
                params.push(text.to_string());
                section = Some(false);
            }
            Some(_) => section = None,
            None => match section {
                Some(true) => out.push(text.to_string()),
                Some(false) => params.push(text.to_string()),
                None => {}
            },
        }
    }

    if !out.is_empty() && !params.is_empty() {
        out.push(String::new());
    }
    out.extend(params);
    out
}

fn named_section(block: &[String], tag: FieldTag, name: &str) -> Vec<String> {
    let mut lines = block.iter().map(|raw| clean(raw));
    for text in lines.by_ref() {
        let Some(Tag::Field(field)) = classify(text) else {
            continue;
        };
        if field.tag != tag || field.argument.as_deref() != Some(name) {
            continue;
        }
        let mut out = Vec::new();
        if !field.text.is_empty() {
            out.push(field.text);
        }
        out.extend(
            lines
                .take_while(|t| !t.is_empty() && !t.starts_with('@'))
                .map(str::to_string),
        );
        return out;
    }
    Vec::new()
}

/// True if the block carries the suppress tag as a line of its own.
pub fn is_suppressed(block: &[String]) -> bool {
    block.iter().any(|raw| {
        clean(raw)
            .strip_prefix(SUPPRESS_MARKER)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    fn field(tag: FieldTag, argument: Option<&str>, text: &str) -> DocLine {
        DocLine::Field(Field {
            tag,
            argument: argument.map(str::to_string),
            text: text.to_string(),
        })
    }

    #[test]
    fn single_blank_between_prose_and_first_field() {
        let doc = block(&[" * Adds numbers.", " * @param a left", " * @return the sum"]);
        let parsed = parse_doc_fields(&doc, DocContext::Member);
        assert_eq!(
            parsed,
            vec![
                DocLine::Prose("Adds numbers.".into()),
                DocLine::Blank,
                field(FieldTag::Parameter, Some("a"), "left"),
                field(FieldTag::Returns, None, "the sum"),
            ]
        );
    }

    #[test]
    fn existing_blank_is_not_doubled() {
        let doc = block(&[" * Prose.", " *", " *", " * @since 1.2"]);
        let parsed = parse_doc_fields(&doc, DocContext::Member);
        assert_eq!(
            parsed,
            vec![
                DocLine::Prose("Prose.".into()),
                DocLine::Blank,
                field(FieldTag::Since, None, "1.2"),
            ]
        );
    }

    #[test]
    fn text_after_field_is_continuation() {
        let doc = block(&[" * @throws IllegalStateException when", " *   closed twice"]);
        let parsed = parse_doc_fields(&doc, DocContext::Member);
        assert_eq!(
            parsed,
            vec![
                field(FieldTag::Throws, None, "IllegalStateException when"),
                DocLine::Continuation("closed twice".into()),
            ]
        );
    }

    #[test]
    fn blank_returns_to_prose() {
        let doc = block(&[" * @see Other", " *", " * More text."]);
        let parsed = parse_doc_fields(&doc, DocContext::Member);
        assert_eq!(
            parsed,
            vec![
                field(FieldTag::See, None, "Other"),
                DocLine::Blank,
                DocLine::Prose("More text.".into()),
            ]
        );
    }

    #[test]
    fn container_context_drops_params_and_constructor() {
        let doc = block(&[
            " * A point.",
            " * @param x horizontal",
            " *   coordinate",
            " * @constructor Creates a point.",
            " * @property y vertical",
        ]);
        let parsed = parse_doc_fields(&doc, DocContext::Container);
        assert_eq!(
            parsed,
            vec![
                DocLine::Prose("A point.".into()),
                DocLine::Blank,
                field(FieldTag::Property, Some("y"), "vertical"),
            ]
        );
        assert!(!parsed
            .iter()
            .any(|l| matches!(l, DocLine::Field(f) if f.tag == FieldTag::Parameter)));
    }

    #[test]
    fn bracketed_param_name() {
        let doc = block(&[" * @param[count] how many"]);
        let parsed = parse_doc_fields(&doc, DocContext::Member);
        assert_eq!(parsed, vec![field(FieldTag::Parameter, Some("count"), "how many")]);
    }

    #[test]
    fn tag_without_description_takes_next_line() {
        let doc = block(&[" * @return", " *   the answer"]);
        let parsed = parse_doc_fields(&doc, DocContext::Member);
        assert_eq!(parsed, vec![field(FieldTag::Returns, None, "the answer")]);
    }

    #[test]
    fn tag_without_description_is_dropped() {
        let doc = block(&[" * Prose.", " * @return", " * @since 2"]);
        let parsed = parse_doc_fields(&doc, DocContext::Member);
        assert_eq!(
            parsed,
            vec![
                DocLine::Prose("Prose.".into()),
                DocLine::Blank,
                field(FieldTag::Since, None, "2"),
            ]
        );
    }

    #[test]
    fn param_without_name_is_dropped() {
        let doc = block(&[" * @param", "", " * Done."]);
        let parsed = parse_doc_fields(&doc, DocContext::Member);
        assert_eq!(parsed, vec![DocLine::Prose("Done.".into())]);
    }

    #[test]
    fn suppress_tag_never_renders() {
        let doc = block(&[" * Hidden.", " * @suppress"]);
        let parsed = parse_doc_fields(&doc, DocContext::Member);
        assert_eq!(parsed, vec![DocLine::Prose("Hidden.".into())]);
        assert!(is_suppressed(&doc));
    }

    #[test]
    fn suppress_only_as_a_tag() {
        assert!(is_suppressed(&block(&[" @suppress "])));
        assert!(is_suppressed(&block(&[" * Internal.", " * @suppress until 2.0"])));
        assert!(!is_suppressed(&block(&[" * Mentions the @suppress tag in prose."])));
        assert!(!is_suppressed(&block(&[" * @suppressed by the caller"])));
    }

    #[test]
    fn fenced_code_keeps_indentation() {
        let doc = block(&[
            " * Usage:",
            " * ```",
            " * val x = f(",
            " *     1)",
            " * ```",
            " * @return x",
        ]);
        let parsed = parse_doc_fields(&doc, DocContext::Member);
        assert_eq!(
            parsed,
            vec![
                DocLine::Prose("Usage:".into()),
                DocLine::Code(vec!["val x = f(".into(), "    1)".into()]),
                DocLine::Blank,
                field(FieldTag::Returns, None, "x"),
            ]
        );
    }

    #[test]
    fn unterminated_fence_is_flushed() {
        let doc = block(&[" * ```", " * code()"]);
        let parsed = parse_doc_fields(&doc, DocContext::Member);
        assert_eq!(parsed, vec![DocLine::Code(vec!["code()".into()])]);
    }

    #[test]
    fn layout_is_threaded_explicitly() {
        let (layout, out) = step(Layout::Start, " * Text.", DocContext::Member);
        assert_eq!(layout, Layout::Prose);
        assert_eq!(out, vec![DocLine::Prose("Text.".into())]);
        let (layout, out) = step(layout, " * @author me", DocContext::Member);
        assert_eq!(layout, Layout::Directive);
        assert_eq!(out, vec![DocLine::Blank, field(FieldTag::Author, None, "me")]);
    }

    #[test]
    fn param_lookup_collects_continuation() {
        let doc = block(&[
            " * Thing.",
            " * @param id the key",
            " *   of the row",
            " * @param name label",
        ]);
        assert_eq!(docstring_for_param(&doc, "id"), vec!["the key", "of the row"]);
        assert_eq!(docstring_for_param(&doc, "name"), vec!["label"]);
        assert!(docstring_for_param(&doc, "missing").is_empty());
    }

    #[test]
    fn val_lookup_uses_property_tag() {
        let doc = block(&[" * @param x the param", " * @property x the property"]);
        assert_eq!(docstring_for_val(&doc, "x"), vec!["the property"]);
    }

    #[test]
    fn constructor_doc_collects_section_and_params() {
        let doc = block(&[
            " * A token.",
            " * @constructor Wraps raw text.",
            " *   Never empty.",
            " * @param raw the text",
            " * @since 3",
        ]);
        assert_eq!(
            constructor_doc(&doc),
            vec!["Wraps raw text.", "Never empty.", "", "@param raw the text"]
        );
    }
}
