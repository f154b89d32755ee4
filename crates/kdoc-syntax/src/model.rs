//! Symbol tree for one scanned file, independent of any output format.
//!
//! All symbols of a file live in one [`FileIndex`] arena and refer to each
//! other through [`SymbolId`] handles, so parents and children never alias.

use serde::Serialize;
use std::fmt;
use std::ops::Index;

/// Declaration kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Class,
    Object,
    EnumClass,
    DataClass,
    Interface,
    Extension,
    Function,
    Val,
    Var,
    Initializer,
    Constructor,
    /// Property declared in a primary-constructor parameter list.
    Parameter,
    EnumCase,
}

impl SymbolKind {
    /// Kinds that own a member index.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::Object
                | Self::EnumClass
                | Self::DataClass
                | Self::Interface
                | Self::Extension
        )
    }

    /// Keyword spelling as written in source.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Object => "object",
            Self::EnumClass => "enum class",
            Self::DataClass => "data class",
            Self::Interface => "interface",
            Self::Extension => "extension",
            Self::Function => "fun",
            Self::Val => "val",
            Self::Var => "var",
            Self::Initializer => "init",
            Self::Constructor => "constructor",
            Self::Parameter => "parameter",
            Self::EnumCase => "case",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Declared visibility. `open` is reported as [`Visibility::Public`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Internal,
    Protected,
}

impl Visibility {
    /// Resolve visibility from modifier words; the first visibility keyword wins.
    pub fn from_modifiers<'a>(modifiers: impl IntoIterator<Item = &'a str>) -> Self {
        modifiers
            .into_iter()
            .find_map(|word| match word {
                "public" | "open" => Some(Self::Public),
                "private" => Some(Self::Private),
                "internal" => Some(Self::Internal),
                "protected" => Some(Self::Protected),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn is_public(self) -> bool {
        self == Self::Public
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Internal => "internal",
            Self::Protected => "protected",
        }
    }
}

/// Handle of a symbol inside its [`FileIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SymbolId(pub(crate) u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One declaration found in the source.
#[derive(Debug, Clone, Serialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub visibility: Visibility,
    pub name: String,
    /// 1-based line of the declaration's first physical line.
    pub line: usize,
    /// Brace depth the declaration was seen at, 1 at file top level.
    pub depth: usize,
    /// Raw comment-body lines of the attached doc comment.
    pub doc_block: Vec<String>,
    pub modifiers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_parameter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_remainder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
    /// Declared inside a `companion object`.
    pub is_static: bool,
    pub shape: Shape,
}

impl Symbol {
    pub fn container(&self) -> Option<&Container> {
        match &self.shape {
            Shape::Container(container) => Some(container),
            Shape::Leaf => None,
        }
    }

    /// Member index, empty for leaves.
    pub fn members(&self) -> &[SymbolId] {
        self.container().map_or(&[], |c| c.members.as_slice())
    }

    /// Nested container declarations, empty for leaves.
    pub fn children(&self) -> &[SymbolId] {
        self.container().map_or(&[], |c| c.children.as_slice())
    }

    pub fn is_documented(&self) -> bool {
        self.doc_block.iter().any(|line| !line.trim().is_empty())
    }
}

/// Container or leaf declaration.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Leaf,
    Container(Container),
}

/// Container-specific data.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Container {
    /// Supertype list after `:`.
    pub inheritance: Option<String>,
    pub where_clause: Option<String>,
    /// Raw primary-constructor parameter list, without parentheses.
    pub constructor_params: Option<String>,
    pub body: Body,
    pub members: Vec<SymbolId>,
    pub children: Vec<SymbolId>,
}

/// How a container's member index was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Body {
    /// Braced body whose `{` sits on `open_line` (1-based).
    Braced { open_line: usize },
    /// No body; the members are the synthesized primary constructor.
    PrimaryConstructor,
    /// Forward declaration or header-only container.
    #[default]
    Absent,
}

/// Every symbol of one file, plus the top-level ordering.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileIndex {
    symbols: Vec<Symbol>,
    roots: Vec<SymbolId>,
}

impl FileIndex {
    pub(crate) fn push(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    pub(crate) fn get_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }

    pub(crate) fn add_root(&mut self, id: SymbolId) {
        self.roots.push(id);
    }

    /// Attach `child` to the container `parent`; leaves become roots.
    pub(crate) fn add_child(&mut self, parent: SymbolId, child: SymbolId) {
        match &mut self.get_mut(parent).shape {
            Shape::Container(container) => container.children.push(child),
            Shape::Leaf => self.roots.push(child),
        }
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    /// Top-level declarations in source order.
    pub fn roots(&self) -> &[SymbolId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Every symbol in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId(i as u32), s))
    }

    /// First symbol with the given name, in creation order.
    pub fn find(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }
}

impl Index<SymbolId> for FileIndex {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        self.get(id)
    }
}
