//! Output formats behind one `Renderer` trait.

pub mod json;
pub mod markdown;
pub mod rst;

use anyhow::{anyhow, Result};
use kdoc_syntax::{FileIndex, Symbol, SymbolKind};
use regex::Regex;
use std::sync::LazyLock;

/// `[Name]` or `[pkg.Name]` KDoc link; a trailing `(` marks a markdown link.
static RE_CODE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([A-Za-z_][\w.]*)\](\()?").unwrap());

/// Filtering and indexing switches shared by every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub private: bool,
    pub undoc_members: bool,
    pub members: bool,
    pub noindex: bool,
    pub noindex_members: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            private: false,
            undoc_members: false,
            members: true,
            noindex: false,
            noindex_members: false,
        }
    }
}

/// Trait for rendering one indexed file into a specific output format.
pub trait Renderer {
    fn render(&self, title: &str, index: &FileIndex, options: &RenderOptions) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "rst" => Ok(Box::new(rst::RstRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use rst, markdown, or json",
            format
        )),
    }
}

/// Sphinx `kotlin` domain directive for a symbol.
pub fn directive(symbol: &Symbol) -> &'static str {
    match symbol.kind {
        SymbolKind::Class => "class",
        SymbolKind::Object => "object",
        SymbolKind::EnumClass => "enum_class",
        SymbolKind::DataClass => "data_class",
        SymbolKind::Interface => "protocol",
        SymbolKind::Extension => "extension",
        SymbolKind::Function if symbol.is_static => "static_fun",
        SymbolKind::Function => "fun",
        SymbolKind::Val => "val",
        SymbolKind::Var => "var",
        SymbolKind::Initializer => "init",
        SymbolKind::Constructor => "constructor",
        SymbolKind::Parameter if symbol.modifiers.iter().any(|m| m == "var") => "var",
        SymbolKind::Parameter => "val",
        SymbolKind::EnumCase => "enum_case",
    }
}

/// `Name<T> : Supers where T : Bound`
pub fn container_signature(symbol: &Symbol) -> String {
    let mut sig = symbol.name.clone();
    if let Some(generic) = &symbol.type_parameter {
        sig.push_str(generic);
    }
    if let Some(container) = symbol.container() {
        if let Some(supers) = &container.inheritance {
            sig.push_str(" : ");
            sig.push_str(supers);
        }
        if let Some(clause) = &container.where_clause {
            sig.push_str(" where ");
            sig.push_str(clause);
        }
    }
    sig
}

/// `<T> name(params): Type`, with ` = value` for initialized properties.
pub fn member_signature(symbol: &Symbol) -> String {
    let mut sig = String::new();
    if let Some(generic) = &symbol.type_parameter {
        sig.push_str(generic);
        sig.push(' ');
    }
    sig.push_str(&symbol.name);
    if let Some(rest) = &symbol.raw_remainder {
        if !rest.starts_with(['(', ':', '<']) {
            sig.push(' ');
        }
        sig.push_str(rest);
    }
    if matches!(symbol.kind, SymbolKind::Val | SymbolKind::Var) {
        if let Some(value) = &symbol.raw_value {
            sig.push_str(" = ");
            sig.push_str(value);
        }
    }
    sig
}

/// Rewrite KDoc `[Name]` links as inline code, quoted with `quote`.
/// Markdown links `[text](url)` are left alone.
pub fn code_refs(text: &str, quote: &str) -> String {
    RE_CODE_REF
        .replace_all(text, |caps: &regex::Captures| {
            if caps.get(2).is_some() {
                caps[0].to_string()
            } else {
                format!("{quote}{}{quote}", &caps[1])
            }
        })
        .into_owned()
}

/// Strip the common leading indentation from code lines.
pub fn unindent(lines: &[String]) -> Vec<String> {
    let min_indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| {
            if l.len() >= min_indent {
                l[min_indent..].trim_end().to_string()
            } else {
                l.trim_end().to_string()
            }
        })
        .collect()
}

/// Join output lines: no trailing whitespace, no runs of blank lines, one
/// final newline.
pub fn finish(lines: Vec<String>) -> String {
    let mut out = String::new();
    let mut blank = true;
    for line in lines {
        let line = line.trim_end();
        if line.is_empty() {
            if !blank {
                out.push('\n');
            }
            blank = true;
        } else {
            out.push_str(line);
            out.push('\n');
            blank = false;
        }
    }
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}
