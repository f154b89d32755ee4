//! kdoc: generate documentation from KDoc comments in Kotlin source files.
//!
//! Two modes:
//!
//! - **stdin mode**: `kdoc < File.kt` prints the rendered page to stdout
//! - **file mode**: `kdoc -o docs/api src/main/kotlin` writes one page per
//!   `.kt` file, mirroring the source layout

mod discover;
mod filter;
mod render;
mod toc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use render::RenderOptions;

#[derive(Parser)]
#[command(
    name = "kdoc",
    about = "Generate reStructuredText documentation from KDoc comments in Kotlin sources"
)]
struct Cli {
    /// Source files or directories (searched recursively for *.kt).
    /// Glob patterns are supported. If omitted, reads from stdin.
    sources: Vec<String>,

    /// Documentation directory (required when sources are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: rst (default), markdown, json
    #[arg(short = 'f', long, default_value = "rst")]
    format: String,

    /// Include private, protected and internal declarations
    #[arg(long)]
    private: bool,

    /// Replace documentation files that already exist
    #[arg(long)]
    overwrite: bool,

    /// Include declarations without a doc comment
    #[arg(long)]
    undoc_members: bool,

    /// Document containers only, without their members
    #[arg(long)]
    no_members: bool,

    /// Mark every directive :noindex:
    #[arg(long)]
    no_index: bool,

    /// Mark member directives :noindex:, keeping top-level entries indexed
    #[arg(long)]
    no_index_members: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            private: self.private,
            undoc_members: self.undoc_members,
            members: !self.no_members,
            noindex: self.no_index,
            noindex_members: self.no_index_members,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if cli.sources.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

fn init_tracing(verbose: u8) -> Result<()> {
    let directive = match verbose {
        0 => "kdoc=warn",
        1 => "kdoc=info",
        2 => "kdoc=debug",
        _ => "kdoc=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

/// stdin mode: index stdin as one Kotlin file and print the page.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let index = kdoc_syntax::index_source(&input);
    let renderer = render::create_renderer(&cli.format)?;
    print!("{}", renderer.render("<stdin>", &index, &cli.render_options())?);
    Ok(())
}

/// file mode: index every source file, then write one page per file.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when sources are given")?;

    let renderer = render::create_renderer(&cli.format)?;
    let options = cli.render_options();
    let ext = renderer.file_extension();

    let inputs = discover::discover(&cli.sources)?;
    if inputs.is_empty() {
        tracing::warn!("no Kotlin sources found");
        return Ok(());
    }

    let mut pages = Vec::new();
    for input in inputs {
        let index = kdoc_syntax::index_file(&input.path)
            .with_context(|| format!("failed to index {}", input.path.display()))?;
        // Nothing to document (e.g., a file of imports or type aliases)
        if index.roots().is_empty() {
            tracing::info!(path = %input.path.display(), "no declarations, skipping");
            continue;
        }
        let target = output_path(output_dir, &input.relative, ext);
        pages.push((input, index, target));
    }

    // Check every target before anything is written.
    let mut seen = HashSet::new();
    for (input, _, target) in &pages {
        if !seen.insert(target.clone()) {
            bail!(
                "{} is produced by more than one source (last: {})",
                target.display(),
                input.path.display()
            );
        }
        if target.exists() && !cli.overwrite {
            bail!(
                "{} already exists, use --overwrite to replace existing documentation",
                target.display()
            );
        }
    }

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    for (input, index, target) in &pages {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
        let title = display_path(&input.relative);
        let page = renderer.render(&title, index, &options)?;
        fs::write(target, page).with_context(|| format!("failed to write {}", target.display()))?;
        tracing::info!(source = %title, target = %target.display(), "wrote documentation");
    }

    Ok(())
}

/// Target file for a source path relative to its root: same layout, new
/// extension. "text/Strings.kt" → "<out>/text/Strings.rst"
fn output_path(output_dir: &Path, relative: &Path, ext: &str) -> PathBuf {
    output_dir.join(relative).with_extension(ext)
}

/// Relative path with `/` separators, as used in page headings.
fn display_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
