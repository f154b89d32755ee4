//! Which symbols make it onto the page.

use kdoc_syntax::docfields::is_suppressed;
use kdoc_syntax::{FileIndex, Symbol, SymbolKind};

use crate::render::RenderOptions;

/// Top-level declarations and nested containers.
pub fn include_declaration(symbol: &Symbol, options: &RenderOptions) -> bool {
    if is_suppressed(&symbol.doc_block) {
        tracing::debug!(name = %symbol.name, "suppressed, skipping");
        return false;
    }
    visible(symbol, options)
}

/// Entries of a container's member index. Enum cases are always listed.
pub fn include_member(symbol: &Symbol, options: &RenderOptions) -> bool {
    symbol.kind == SymbolKind::EnumCase || visible(symbol, options)
}

fn visible(symbol: &Symbol, options: &RenderOptions) -> bool {
    (options.private || symbol.visibility.is_public())
        && (options.undoc_members || symbol.is_documented())
}

/// Roots that will be rendered, in source order.
pub fn roots<'a>(index: &'a FileIndex, options: &RenderOptions) -> Vec<&'a Symbol> {
    index
        .roots()
        .iter()
        .map(|&id| &index[id])
        .filter(|s| include_declaration(s, options))
        .collect()
}

/// Members of `container` that will be rendered; none with `--no-members`.
pub fn members<'a>(
    index: &'a FileIndex,
    container: &Symbol,
    options: &RenderOptions,
) -> Vec<&'a Symbol> {
    if !options.members {
        return Vec::new();
    }
    container
        .members()
        .iter()
        .map(|&id| &index[id])
        .filter(|s| include_member(s, options))
        .collect()
}

/// Nested containers of `container` that will be rendered.
pub fn children<'a>(
    index: &'a FileIndex,
    container: &Symbol,
    options: &RenderOptions,
) -> Vec<&'a Symbol> {
    container
        .children()
        .iter()
        .map(|&id| &index[id])
        .filter(|s| include_declaration(s, options))
        .collect()
}
