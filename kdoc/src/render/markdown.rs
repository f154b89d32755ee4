//! GitHub-flavored markdown renderer.

use anyhow::Result;
use kdoc_syntax::docfields::{parse_doc_fields, DocContext, DocLine};
use kdoc_syntax::{FileIndex, Symbol, SymbolKind};

use crate::filter;
use crate::render::{
    code_refs, container_signature, finish, member_signature, unindent, RenderOptions, Renderer,
};
use crate::toc::{self, Slugger};

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, title: &str, index: &FileIndex, options: &RenderOptions) -> Result<String> {
        let heading = format!("Documentation for {}", title);
        let mut slugger = Slugger::new();
        slugger.slug(&heading);

        let roots = filter::roots(index, options);
        if !roots.is_empty() {
            slugger.slug("Index");
        }

        // Body first: anchors are numbered in document order.
        let mut body = Vec::new();
        let mut entries = Vec::new();
        for symbol in &roots {
            let text = heading_text(symbol);
            entries.push(toc::render_toc_item(&text, &slugger.slug(&text)));
            render_declaration(&mut body, &mut slugger, index, symbol, 2, options);
        }

        let mut lines = vec![format!("# {}", heading), String::new()];
        if !entries.is_empty() {
            lines.push("## Index".to_string());
            lines.push(String::new());
            lines.extend(entries);
            lines.push(String::new());
        }
        lines.extend(body);

        Ok(finish(lines))
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// `data class Point`, `fun clamp`
fn heading_text(symbol: &Symbol) -> String {
    format!("{} {}", symbol.kind.keyword(), symbol.name)
}

fn render_declaration(
    lines: &mut Vec<String>,
    slugger: &mut Slugger,
    index: &FileIndex,
    symbol: &Symbol,
    level: usize,
    options: &RenderOptions,
) {
    let text = heading_text(symbol);
    // Roots were slugged while building the index.
    if level > 2 {
        slugger.slug(&text);
    }
    lines.push(format!("{} {}", "#".repeat(level.min(6)), text));
    lines.push(String::new());

    lines.push("```kotlin".to_string());
    lines.push(declaration_line(symbol));
    lines.push("```".to_string());
    lines.push(String::new());

    let context = if symbol.kind.is_container() {
        DocContext::Container
    } else {
        DocContext::Member
    };
    render_doc(lines, &parse_doc_fields(&symbol.doc_block, context));
    lines.push(String::new());

    if !symbol.kind.is_container() {
        return;
    }

    let members = filter::members(index, symbol, options);
    let cases: Vec<&Symbol> = members
        .iter()
        .copied()
        .filter(|m| m.kind == SymbolKind::EnumCase)
        .collect();
    for case in &cases {
        lines.push(case_item(case));
    }
    if !cases.is_empty() {
        lines.push(String::new());
    }

    let member_level = (level + 2).min(6);
    for member in members.iter().filter(|m| m.kind != SymbolKind::EnumCase) {
        let heading = format!("`{}`", member_signature(member));
        slugger.slug(&heading);
        lines.push(format!("{} {}", "#".repeat(member_level), heading));
        lines.push(String::new());
        if member.is_static {
            lines.push("*companion*".to_string());
            lines.push(String::new());
        }
        render_doc(lines, &parse_doc_fields(&member.doc_block, DocContext::Member));
        lines.push(String::new());
    }

    for child in filter::children(index, symbol, options) {
        render_declaration(lines, slugger, index, child, level + 1, options);
    }
}

/// Source-like declaration line for the signature block.
fn declaration_line(symbol: &Symbol) -> String {
    let mut words: Vec<&str> = symbol.modifiers.iter().map(String::as_str).collect();
    words.push(symbol.kind.keyword());
    let signature = if symbol.kind.is_container() {
        container_signature(symbol)
    } else {
        member_signature(symbol)
    };
    format!("{} {}", words.join(" "), signature)
}

/// List item for an enum case: name, value and summary.
fn case_item(symbol: &Symbol) -> String {
    let mut item = format!("- `{}`", symbol.name);
    if let Some(value) = &symbol.raw_value {
        item.push_str(&format!(" = `{}`", value));
    }
    let summary = parse_doc_fields(&symbol.doc_block, DocContext::Member)
        .into_iter()
        .find_map(|line| match line {
            DocLine::Prose(text) => Some(text),
            _ => None,
        });
    if let Some(summary) = summary {
        item.push_str(": ");
        item.push_str(&code_refs(&summary, "`"));
    }
    item
}

fn render_doc(lines: &mut Vec<String>, doc: &[DocLine]) {
    for line in doc {
        match line {
            DocLine::Prose(text) => lines.push(code_refs(text, "`")),
            DocLine::Blank => lines.push(String::new()),
            DocLine::Field(field) => {
                let mut item = format!("- **{}**", field.tag.directive());
                if let Some(arg) = &field.argument {
                    item.push_str(&format!(" `{}`", arg));
                }
                if !field.text.is_empty() {
                    item.push_str(": ");
                    item.push_str(&code_refs(&field.text, "`"));
                }
                lines.push(item);
            }
            DocLine::Continuation(text) => lines.push(format!("  {}", code_refs(text, "`"))),
            DocLine::Code(code) => {
                lines.push(String::new());
                lines.push("```kotlin".to_string());
                lines.extend(unindent(code));
                lines.push("```".to_string());
                lines.push(String::new());
            }
        }
    }
}
