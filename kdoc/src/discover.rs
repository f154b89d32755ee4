//! Source discovery: expand command-line sources into `.kt` files.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use kdoc_syntax::SOURCE_EXTENSION;

/// One input file and its path relative to the source root it came from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Mirrored under the output directory.
    pub relative: PathBuf,
}

/// Expand files, directories (recursively) and glob patterns.
pub fn discover(sources: &[String]) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();

    for source in sources {
        let path = Path::new(source);
        if path.is_file() {
            if is_kotlin(path) {
                let name = path.file_name().map(PathBuf::from).unwrap_or_default();
                files.push(SourceFile {
                    path: path.to_path_buf(),
                    relative: name,
                });
            } else {
                tracing::warn!(path = %path.display(), "not a .kt file, skipping");
            }
        } else if path.is_dir() {
            files.extend(walk_dir(path)?);
        } else {
            let matches: Vec<PathBuf> = glob::glob(source)
                .with_context(|| format!("invalid glob pattern: {}", source))?
                .filter_map(|entry| entry.ok())
                .filter(|p| p.is_file() && is_kotlin(p))
                .collect();
            if matches.is_empty() {
                tracing::warn!(source = %source, "no Kotlin sources matched");
            }
            for p in matches {
                let name = p.file_name().map(PathBuf::from).unwrap_or_default();
                files.push(SourceFile {
                    path: p,
                    relative: name,
                });
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Every `.kt` file below `root`, relative to it.
fn walk_dir(root: &Path) -> Result<Vec<SourceFile>> {
    // Make sure the directory itself is readable before globbing into it.
    fs::read_dir(root).with_context(|| format!("failed to read directory: {}", root.display()))?;

    let pattern = format!(
        "{}/**/*.{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        SOURCE_EXTENSION
    );
    let mut files = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("invalid glob pattern: {}", pattern))? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        files.push(SourceFile { path, relative });
    }
    Ok(files)
}

fn is_kotlin(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "fun f() {}\n").unwrap();
    }

    #[test]
    fn directory_is_walked_recursively() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("A.kt"));
        touch(&dir.path().join("sub/B.kt"));
        touch(&dir.path().join("sub/notes.txt"));

        let files = discover(&[dir.path().to_string_lossy().into_owned()]).unwrap();
        let relative: Vec<PathBuf> = files.into_iter().map(|f| f.relative).collect();
        assert_eq!(
            relative,
            vec![PathBuf::from("A.kt"), PathBuf::from("sub/B.kt")]
        );
    }

    #[test]
    fn single_file_uses_its_name() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("deep/Main.kt");
        touch(&file);

        let files = discover(&[file.to_string_lossy().into_owned()]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative, PathBuf::from("Main.kt"));
    }

    #[test]
    fn other_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("build.gradle");
        fs::write(&file, "").unwrap();

        let files = discover(&[file.to_string_lossy().into_owned()]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn duplicates_are_removed() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("A.kt");
        touch(&file);
        let source = file.to_string_lossy().into_owned();

        let files = discover(&[source.clone(), source]).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn glob_pattern_matches_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("A.kt"));
        touch(&dir.path().join("B.kt"));
        let pattern = format!("{}/*.kt", dir.path().display());

        let files = discover(&[pattern]).unwrap();
        assert_eq!(files.len(), 2);
    }
}
