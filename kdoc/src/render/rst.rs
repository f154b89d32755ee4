//! reStructuredText renderer for the Sphinx `kotlin` domain.
//!
//! Every container becomes a `.. kotlin:<kind>::` directive with its doc
//! text, then its members one level deeper, then nested containers.

use anyhow::Result;
use kdoc_syntax::docfields::{parse_doc_fields, DocContext, DocLine};
use kdoc_syntax::{FileIndex, Symbol, SymbolKind};

use crate::filter;
use crate::render::{
    code_refs, container_signature, directive, finish, member_signature, unindent, RenderOptions,
    Renderer,
};

pub struct RstRenderer;

const INDENT: &str = "   ";

impl Renderer for RstRenderer {
    fn render(&self, title: &str, index: &FileIndex, options: &RenderOptions) -> Result<String> {
        let heading = format!("Documentation for {}", title);
        let mut lines = vec![
            heading.clone(),
            "=".repeat(heading.chars().count()),
            String::new(),
        ];

        for symbol in filter::roots(index, options) {
            render_declaration(&mut lines, index, symbol, "", options, true);
            lines.push(String::new());
        }

        Ok(finish(lines))
    }

    fn file_extension(&self) -> &str {
        "rst"
    }
}

/// A root or nested declaration: containers with their members and
/// children, or a free function.
fn render_declaration(
    lines: &mut Vec<String>,
    index: &FileIndex,
    symbol: &Symbol,
    indent: &str,
    options: &RenderOptions,
    top_level: bool,
) {
    let noindex = options.noindex || (!top_level && options.noindex_members);

    if !symbol.kind.is_container() {
        render_member(lines, symbol, indent, noindex);
        return;
    }

    lines.push(format!(
        "{}.. kotlin:{}:: {}",
        indent,
        directive(symbol),
        container_signature(symbol)
    ));
    let inner = format!("{}{}", indent, INDENT);
    if noindex {
        lines.push(format!("{}:noindex:", inner));
    }
    lines.push(String::new());
    render_doc(
        lines,
        &parse_doc_fields(&symbol.doc_block, DocContext::Container),
        &inner,
    );
    lines.push(String::new());

    let member_noindex = options.noindex || options.noindex_members;
    let mut in_cases = false;
    for member in filter::members(index, symbol, options) {
        if member.kind == SymbolKind::EnumCase {
            lines.push(format!("{}{}", inner, case_item(member)));
            in_cases = true;
            continue;
        }
        if in_cases {
            lines.push(String::new());
            in_cases = false;
        }
        render_member(lines, member, &inner, member_noindex);
    }
    lines.push(String::new());

    for child in filter::children(index, symbol, options) {
        render_declaration(lines, index, child, &inner, options, false);
        lines.push(String::new());
    }
}

fn render_member(lines: &mut Vec<String>, symbol: &Symbol, indent: &str, noindex: bool) {
    lines.push(format!(
        "{}.. kotlin:{}:: {}",
        indent,
        directive(symbol),
        member_signature(symbol)
    ));
    let inner = format!("{}{}", indent, INDENT);
    if noindex {
        lines.push(format!("{}:noindex:", inner));
    }
    lines.push(String::new());
    render_doc(
        lines,
        &parse_doc_fields(&symbol.doc_block, DocContext::Member),
        &inner,
    );
    lines.push(String::new());
}

/// `- NAME = value : first doc line`
fn case_item(symbol: &Symbol) -> String {
    let mut item = format!("- {}", symbol.name);
    if let Some(value) = &symbol.raw_value {
        item.push_str(" = ");
        item.push_str(value);
    }
    let summary = parse_doc_fields(&symbol.doc_block, DocContext::Member)
        .into_iter()
        .find_map(|line| match line {
            DocLine::Prose(text) => Some(text),
            _ => None,
        });
    if let Some(summary) = summary {
        item.push_str(" : ");
        item.push_str(&code_refs(&summary, "``"));
    }
    item
}

fn render_doc(lines: &mut Vec<String>, doc: &[DocLine], indent: &str) {
    for line in doc {
        match line {
            DocLine::Prose(text) => lines.push(format!("{}{}", indent, code_refs(text, "``"))),
            DocLine::Blank => lines.push(String::new()),
            DocLine::Field(field) => {
                let name = match &field.argument {
                    Some(arg) => format!("{} {}", field.tag.directive(), arg),
                    None => field.tag.directive().to_string(),
                };
                lines.push(format!(
                    "{}:{}: {}",
                    indent,
                    name,
                    code_refs(&field.text, "``")
                ));
            }
            DocLine::Continuation(text) => {
                lines.push(format!("{}{}{}", indent, INDENT, code_refs(text, "``")))
            }
            DocLine::Code(code) => {
                lines.push(String::new());
                lines.push(format!("{}.. code-block:: kotlin", indent));
                lines.push(String::new());
                for code_line in unindent(code) {
                    if code_line.is_empty() {
                        lines.push(String::new());
                    } else {
                        lines.push(format!("{}{}{}", indent, INDENT, code_line));
                    }
                }
                lines.push(String::new());
            }
        }
    }
}
