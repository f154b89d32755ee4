//! JSON renderer: structured output for tooling integration.
//!
//! Serializes the filtered symbol tree with parsed doc fields, so custom
//! pipelines do not need to re-parse doc comments.

use anyhow::Result;
use kdoc_syntax::docfields::{parse_doc_fields, DocContext, DocLine};
use kdoc_syntax::{FileIndex, Symbol, SymbolKind, Visibility};
use serde::Serialize;

use crate::filter;
use crate::render::{container_signature, directive, member_signature, RenderOptions, Renderer};

pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonFile<'a> {
    file: &'a str,
    symbols: Vec<JsonSymbol<'a>>,
}

#[derive(Serialize)]
struct JsonSymbol<'a> {
    kind: SymbolKind,
    directive: &'static str,
    name: &'a str,
    signature: String,
    visibility: Visibility,
    line: usize,
    #[serde(skip_serializing_if = "no_modifiers")]
    modifiers: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    is_static: bool,
    doc: Vec<DocLine>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    members: Vec<JsonSymbol<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<JsonSymbol<'a>>,
}

impl Renderer for JsonRenderer {
    fn render(&self, title: &str, index: &FileIndex, options: &RenderOptions) -> Result<String> {
        let file = JsonFile {
            file: title,
            symbols: filter::roots(index, options)
                .into_iter()
                .map(|symbol| declaration(index, symbol, options))
                .collect(),
        };
        let mut out = serde_json::to_string_pretty(&file)?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

fn declaration<'a>(
    index: &'a FileIndex,
    symbol: &'a Symbol,
    options: &RenderOptions,
) -> JsonSymbol<'a> {
    if !symbol.kind.is_container() {
        return member(symbol);
    }
    JsonSymbol {
        signature: container_signature(symbol),
        doc: parse_doc_fields(&symbol.doc_block, DocContext::Container),
        members: filter::members(index, symbol, options)
            .into_iter()
            .map(member)
            .collect(),
        children: filter::children(index, symbol, options)
            .into_iter()
            .map(|child| declaration(index, child, options))
            .collect(),
        ..base(symbol)
    }
}

fn member(symbol: &Symbol) -> JsonSymbol<'_> {
    JsonSymbol {
        signature: member_signature(symbol),
        doc: parse_doc_fields(&symbol.doc_block, DocContext::Member),
        ..base(symbol)
    }
}

fn no_modifiers(modifiers: &&[String]) -> bool {
    modifiers.is_empty()
}

fn base(symbol: &Symbol) -> JsonSymbol<'_> {
    JsonSymbol {
        kind: symbol.kind,
        directive: directive(symbol),
        name: &symbol.name,
        signature: String::new(),
        visibility: symbol.visibility,
        line: symbol.line,
        modifiers: &symbol.modifiers,
        value: symbol.raw_value.as_deref(),
        is_static: symbol.is_static,
        doc: Vec::new(),
        members: Vec::new(),
        children: Vec::new(),
    }
}
