//! Line-based declaration scanner for Kotlin sources.
//!
//! The scanner never builds a syntax tree. It masks literals and comments
//! per line, tracks brace depth, re-joins multi-line signatures and matches
//! declaration shapes with an ordered list of patterns. The result is a
//! [`FileIndex`] of containers, their members and nested children, each
//! with the raw doc comment that precedes it.

pub mod builder;
pub mod depth;
pub mod docblock;
pub mod docfields;
pub mod error;
pub mod join;
mod members;
pub mod model;
pub mod normalize;
pub mod signature;

use std::path::Path;

pub use builder::{index_source, NestingStack};
pub use error::{Error, Result};
pub use model::{Body, Container, FileIndex, Shape, Symbol, SymbolId, SymbolKind, Visibility};

/// Extension of the files [`index_file`] accepts.
pub const SOURCE_EXTENSION: &str = "kt";

/// Read and index one `.kt` file.
pub fn index_file(path: &Path) -> Result<FileIndex> {
    if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
        return Err(Error::UnsupportedFile {
            path: path.to_path_buf(),
        });
    }
    let source = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let index = index_source(&source);
    tracing::info!(path = %path.display(), symbols = index.len(), "indexed file");
    Ok(index)
}
