//! File-level scan that assembles the [`FileIndex`].

use crate::depth::DepthTracker;
use crate::docblock::extract_doc_block;
use crate::docfields::{constructor_doc, docstring_for_param, docstring_for_val};
use crate::join::{join_statement, Statement, JOIN_LIMIT};
use crate::members::{scan_members, MemberDraft};
use crate::model::{Body, Container, FileIndex, Shape, Symbol, SymbolId, SymbolKind, Visibility};
use crate::normalize::mask_structural;
use crate::signature::{
    is_companion, match_declaration, parse_parameter, split_parameters, Binding, Signature,
    CONTAINER_MATCHERS, TOP_LEVEL_MATCHERS,
};

/// Build the symbol tree of one source text.
pub fn index_source(source: &str) -> FileIndex {
    let lines: Vec<&str> = source.lines().collect();
    let mut index = FileIndex::default();
    let mut stack = NestingStack::default();
    let mut tracker = DepthTracker::default();
    let mut resume = 0;

    for (i, line) in lines.iter().enumerate() {
        let before = tracker.depth();
        if i >= resume && !line.trim().is_empty() {
            if let Some(stmt) = declaration_at(&lines, i, before, &mut index, &mut stack) {
                resume = stmt.next();
            }
        }
        let after = tracker.feed(line);
        stack.close(i, after);
    }

    tracing::debug!(
        symbols = index.len(),
        roots = index.roots().len(),
        "indexed source"
    );
    index
}

/// Match a declaration starting at `lines[i]` and add it to the index.
fn declaration_at(
    lines: &[&str],
    i: usize,
    before: i32,
    index: &mut FileIndex,
    stack: &mut NestingStack,
) -> Option<Statement> {
    let stmt = join_statement(lines, i);
    if stmt.is_blank() || is_companion(&stmt.code) {
        return None;
    }
    // Free functions only count at file level; elsewhere they are members.
    let matchers = if before == 0 {
        TOP_LEVEL_MATCHERS
    } else {
        CONTAINER_MATCHERS
    };
    let signature = match_declaration(matchers, &stmt.code)?;
    let kind = signature.symbol_kind();
    let depth = before as usize + 1;
    let doc_block = extract_doc_block(lines, i.checked_sub(1));
    tracing::trace!(%kind, name = %signature.name, line = i + 1, depth, "declaration");

    let parent = stack.place(depth);
    let id = if kind.is_container() {
        let body = discover_body(lines, &stmt, &signature);
        let id = add_container(lines, index, signature, &stmt, depth, doc_block, body);
        if let Body::Braced { open_line } = body {
            stack.push(depth, id, open_line - 1);
        }
        id
    } else {
        index.push(symbol(signature, i, depth, doc_block, false, Shape::Leaf))
    };

    match parent {
        Some(parent) => index.add_child(parent, id),
        None => index.add_root(id),
    }
    Some(stmt)
}

fn add_container(
    lines: &[&str],
    index: &mut FileIndex,
    signature: Signature,
    stmt: &Statement,
    depth: usize,
    doc_block: Vec<String>,
    body: Body,
) -> SymbolId {
    let kind = signature.symbol_kind();
    let synthetic = primary_constructor(&signature, &doc_block, stmt.first, depth);
    let scanned = match body {
        Body::Braced { open_line } => scan_members(lines, open_line - 1, kind),
        _ => Vec::new(),
    };

    let container = Container {
        inheritance: signature.inheritance.clone(),
        where_clause: signature.where_clause.clone(),
        constructor_params: signature.constructor_params.clone(),
        body,
        ..Container::default()
    };
    let line = stmt.first;
    let id = index.push(symbol(
        signature,
        line,
        depth,
        doc_block,
        false,
        Shape::Container(container),
    ));

    let mut members: Vec<SymbolId> = synthetic.into_iter().map(|s| index.push(s)).collect();
    members.extend(
        scanned
            .into_iter()
            .map(|draft| index.push(member_symbol(draft, depth))),
    );
    if let Shape::Container(container) = &mut index.get_mut(id).shape {
        container.members = members;
    }
    id
}

fn symbol(
    signature: Signature,
    line: usize,
    depth: usize,
    doc_block: Vec<String>,
    is_static: bool,
    shape: Shape,
) -> Symbol {
    Symbol {
        kind: signature.symbol_kind(),
        visibility: signature.visibility,
        name: signature.name,
        line: line + 1,
        depth,
        doc_block,
        modifiers: signature.modifiers,
        type_parameter: signature.type_parameter,
        raw_remainder: signature.raw_remainder,
        raw_value: signature.raw_value,
        is_static,
        shape,
    }
}

fn member_symbol(draft: MemberDraft, container_depth: usize) -> Symbol {
    symbol(
        draft.signature,
        draft.line,
        container_depth + draft.level,
        draft.doc_block,
        draft.is_static,
        Shape::Leaf,
    )
}

/// Synthetic constructor and disclosed parameters of a primary constructor.
fn primary_constructor(
    signature: &Signature,
    doc_block: &[String],
    line: usize,
    depth: usize,
) -> Vec<Symbol> {
    let Some(params) = signature
        .constructor_params
        .as_deref()
        .filter(|p| !p.trim().is_empty())
    else {
        return Vec::new();
    };

    let constructor_visibility = signature.constructor_visibility;
    let mut out = vec![Symbol {
        kind: SymbolKind::Constructor,
        visibility: constructor_visibility,
        name: "constructor".to_string(),
        line: line + 1,
        depth: depth + 1,
        doc_block: constructor_doc(doc_block),
        modifiers: match constructor_visibility {
            Visibility::Public => Vec::new(),
            other => vec![other.as_str().to_string()],
        },
        type_parameter: None,
        raw_remainder: Some(format!("({params})")),
        raw_value: None,
        is_static: false,
        shape: Shape::Leaf,
    }];

    for param in split_parameters(params)
        .into_iter()
        .filter_map(parse_parameter)
        .filter(|p| p.is_disclosed())
    {
        let mut doc = docstring_for_val(doc_block, &param.name);
        if doc.is_empty() {
            doc = docstring_for_param(doc_block, &param.name);
        }
        let mut modifiers = param.modifiers;
        modifiers.push(
            match param.binding {
                Some(Binding::Var) => "var",
                _ => "val",
            }
            .to_string(),
        );
        out.push(Symbol {
            kind: SymbolKind::Parameter,
            visibility: param.visibility,
            name: param.name,
            line: line + 1,
            depth: depth + 1,
            doc_block: doc,
            modifiers,
            type_parameter: None,
            raw_remainder: param.remainder,
            raw_value: None,
            is_static: false,
            shape: Shape::Leaf,
        });
    }
    out
}

/// Locate the `{` that opens a container's body.
///
/// The brace may sit on the header itself or on a following line that
/// starts with `{` or continues the header (`:`, `,`, `where`, or any line
/// after one ending in `,`). Blank lines are skipped; the search gives up
/// after [`JOIN_LIMIT`] lines.
fn discover_body(lines: &[&str], stmt: &Statement, signature: &Signature) -> Body {
    let mut parens = 0i32;
    for (idx, line) in lines.iter().enumerate().take(stmt.last + 1).skip(stmt.first) {
        for c in mask_structural(line).chars() {
            match c {
                '(' => parens += 1,
                ')' => parens -= 1,
                '{' if parens <= 0 => return Body::Braced { open_line: idx + 1 },
                _ => {}
            }
        }
    }

    let mut dangling = false;
    for (idx, line) in lines.iter().enumerate().skip(stmt.next()).take(JOIN_LIMIT) {
        let masked = mask_structural(line);
        let text = masked.trim();
        if text.is_empty() {
            continue;
        }
        if text.starts_with('{') {
            return Body::Braced { open_line: idx + 1 };
        }
        let continues = dangling
            || text.starts_with(':')
            || text.starts_with(',')
            || text.split_whitespace().next() == Some("where");
        if !continues {
            break;
        }
        // A supertype list may wrap after `,` or `:`.
        dangling = text.ends_with(',') || text.ends_with(':');
        if text.contains('{') {
            return Body::Braced { open_line: idx + 1 };
        }
    }

    let has_constructor = signature
        .constructor_params
        .as_deref()
        .is_some_and(|p| !p.trim().is_empty());
    tracing::debug!(name = %signature.name, line = stmt.first + 1, has_constructor, "container without body");
    if has_constructor {
        Body::PrimaryConstructor
    } else {
        Body::Absent
    }
}

/// Open container bodies, innermost last.
#[derive(Debug, Default, Clone)]
pub struct NestingStack {
    frames: Vec<Frame>,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    depth: usize,
    id: SymbolId,
    /// 0-based line holding the body's `{`.
    open_line: usize,
}

impl NestingStack {
    /// Parent for a declaration at `depth`. Frames at the same or a deeper
    /// depth are siblings or stale and are dropped.
    pub fn place(&mut self, depth: usize) -> Option<SymbolId> {
        while self.frames.last().is_some_and(|f| f.depth >= depth) {
            self.frames.pop();
        }
        self.frames.last().map(|f| f.id)
    }

    pub fn push(&mut self, depth: usize, id: SymbolId, open_line: usize) {
        self.frames.push(Frame {
            depth,
            id,
            open_line,
        });
    }

    /// Drop bodies that closed on `line`, given the brace depth after it.
    pub fn close(&mut self, line: usize, depth_after: i32) {
        while let Some(frame) = self.frames.last() {
            let closed = line >= frame.open_line && depth_after < frame.depth as i32;
            if !closed {
                break;
            }
            self.frames.pop();
        }
    }

    pub fn top(&self) -> Option<SymbolId> {
        self.frames.last().map(|f| f.id)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
